//! Configuration management for the notifier
//!
//! The configuration is loaded once at cold start using `figment`: built-in
//! defaults, an optional TOML file, the `SNS_TOPIC_ARN` variable set on the
//! Lambda function, and finally `NOTIFIER_`-prefixed environment variables.

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the optional path of a TOML config file.
pub const CONFIG_PATH_ENV: &str = "NOTIFIER_CONFIG_PATH";

/// Environment variable holding the destination topic ARN.
pub const TOPIC_ARN_ENV: &str = "SNS_TOPIC_ARN";

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level (an `EnvFilter` directive).
    pub log_level: String,
    /// The SNS topic notifications are published to. Never validated here;
    /// an empty or bogus value makes every publish fail at the service.
    pub topic_arn: String,
}

impl Config {
    /// Loads the application configuration.
    ///
    /// # Arguments
    /// * `config_path` - An optional TOML file layered over the defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }
        let config: Config = figment
            .merge(Env::raw().only(&[TOPIC_ARN_ENV]).map(|_| "topic_arn".into()))
            // Allow overriding with environment variables, e.g., NOTIFIER_LOG_LEVEL=debug
            .merge(Env::prefixed("NOTIFIER_").ignore(&["config_path"]))
            .extract()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            topic_arn: String::new(),
        }
    }
}
