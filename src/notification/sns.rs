//! A publisher that sends notifications to an Amazon SNS topic.

use crate::core::{Notification, Publisher};
use crate::notification::TransportError;
use async_trait::async_trait;
use aws_config::{retry::RetryConfig, BehaviorVersion};
use aws_sdk_sns::{error::DisplayErrorContext, Client};
use tracing::{error, info, instrument};

/// Publishes to a single SNS topic fixed at construction time.
pub struct SnsPublisher {
    client: Client,
    topic_arn: String,
}

impl SnsPublisher {
    /// Creates a new `SnsPublisher` from an existing client.
    pub fn new(client: Client, topic_arn: String) -> Self {
        Self { client, topic_arn }
    }

    /// Builds a client from the Lambda environment (region, credentials).
    ///
    /// SDK retries are disabled so that each publish is a single request.
    pub async fn from_env(topic_arn: String) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .retry_config(RetryConfig::disabled())
            .load()
            .await;
        Self::new(Client::new(&sdk_config), topic_arn)
    }
}

#[async_trait]
impl Publisher for SnsPublisher {
    fn destination(&self) -> &str {
        &self.topic_arn
    }

    #[instrument(skip(self, notification), fields(topic_arn = %self.topic_arn))]
    async fn publish(&self, notification: &Notification) -> Result<(), TransportError> {
        let output = self
            .client
            .publish()
            .target_arn(&self.topic_arn)
            .subject(&notification.subject)
            .message(&notification.body)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                error!(error = %message, "SNS publish failed");
                TransportError::new(&self.topic_arn, message)
            })?;

        info!(
            message_id = output.message_id().unwrap_or_default(),
            "Published notification to SNS."
        );
        Ok(())
    }
}
