//! Log Alert Notifier - AWS Lambda entry point
//!
//! Receives CloudWatch Logs subscription events and publishes a notification
//! for each one to the configured SNS topic.

use anyhow::Context;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use log_alert_notifier::{
    config::{Config, CONFIG_PATH_ENV},
    notification::SnsPublisher,
    Envelope, Notifier,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

async fn function_handler(
    notifier: &Notifier<SnsPublisher>,
    event: LambdaEvent<Envelope>,
) -> Result<(), Error> {
    info!(request_id = %event.context.request_id, "Handling log subscription event");
    notifier.handle(&event.payload).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
    let config = Config::load(config_path.as_deref()).context("failed to load configuration")?;

    // Lambda stamps every line, so time and target are left out.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_target(false)
        .without_time()
        .init();

    info!("-------------------- Configuration --------------------");
    info!("Log Level: {}", config.log_level);
    info!(
        "SNS Topic: {}",
        if config.topic_arn.is_empty() {
            "Not configured"
        } else {
            config.topic_arn.as_str()
        }
    );
    info!("-------------------------------------------------------");

    let notifier = Notifier::new(SnsPublisher::from_env(config.topic_arn).await);
    let notifier = &notifier;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Envelope>| async move {
        function_handler(notifier, event).await
    }))
    .await
}
