//! A mock publisher for testing the notification pipeline.

use async_trait::async_trait;
use log_alert_notifier::{notification::TransportError, Notification, Publisher};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, Default)]
pub struct MockPublisher {
    pub sent: Arc<Mutex<Vec<Notification>>>,
    /// When set, every publish fails with this message.
    pub failure: Option<String>,
}

impl MockPublisher {
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    fn destination(&self) -> &str {
        "arn:aws:sns:us-east-1:123456789012:mock"
    }

    async fn publish(&self, notification: &Notification) -> Result<(), TransportError> {
        if let Some(message) = &self.failure {
            return Err(TransportError::new(self.destination(), message.as_str()));
        }
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}
