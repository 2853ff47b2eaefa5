//! Core domain types and service traits for the notifier
//!
//! This module defines the invocation envelope, the decoded log batch and the
//! notification that is handed to a `Publisher`.

use crate::notification::TransportError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// The raw invocation payload delivered by a CloudWatch Logs subscription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Envelope {
    pub awslogs: AwsLogs,
}

/// The `awslogs` object of an [`Envelope`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AwsLogs {
    /// Base64 text of a gzip-compressed JSON log batch
    pub data: String,
}

impl Envelope {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            awslogs: AwsLogs { data: data.into() },
        }
    }
}

/// A field of the decoded log batch was missing or had the wrong shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("log batch is missing field `{0}`")]
    MissingField(String),

    #[error("log batch field `{field}` is not {expected}")]
    InvalidType {
        field: String,
        expected: &'static str,
    },

    #[error("log batch field `{field}` holds out-of-range timestamp {value}")]
    TimestampOutOfRange { field: String, value: i64 },
}

/// A decoded CloudWatch Logs batch.
///
/// The whole JSON document is kept so that fields this crate does not read
/// (`owner`, `logStream`, `subscriptionFilters`, ...) survive into the raw
/// section of the notification. The known fields are read on access and a
/// missing one surfaces as a [`SchemaError`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogBatch(Value);

impl LogBatch {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The undecorated JSON document.
    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// The name of the log group the events came from.
    pub fn log_group(&self) -> Result<&str, SchemaError> {
        let value = self
            .0
            .get("logGroup")
            .ok_or_else(|| SchemaError::MissingField("logGroup".to_string()))?;
        value.as_str().ok_or_else(|| SchemaError::InvalidType {
            field: "logGroup".to_string(),
            expected: "a string",
        })
    }

    /// The log events of the batch, in delivery order.
    pub fn log_events(&self) -> Result<Vec<LogEntry<'_>>, SchemaError> {
        let value = self
            .0
            .get("logEvents")
            .ok_or_else(|| SchemaError::MissingField("logEvents".to_string()))?;
        let events = value.as_array().ok_or_else(|| SchemaError::InvalidType {
            field: "logEvents".to_string(),
            expected: "an array",
        })?;

        events
            .iter()
            .enumerate()
            .map(|(index, event)| LogEntry::from_value(index, event))
            .collect()
    }
}

impl fmt::Display for LogBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One timestamped message inside a [`LogBatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEntry<'a> {
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub message: &'a str,
}

impl<'a> LogEntry<'a> {
    fn from_value(index: usize, event: &'a Value) -> Result<Self, SchemaError> {
        let field = |name: &str| format!("logEvents[{}].{}", index, name);

        let timestamp = event
            .get("timestamp")
            .ok_or_else(|| SchemaError::MissingField(field("timestamp")))?;
        // Whole-number JSON values first; a float is truncated to its
        // integer part when that fits in an i64.
        let timestamp = timestamp
            .as_i64()
            .or_else(|| timestamp.as_f64().and_then(float_millis))
            .ok_or_else(|| SchemaError::InvalidType {
                field: field("timestamp"),
                expected: "an integer",
            })?;

        let message = event
            .get("message")
            .ok_or_else(|| SchemaError::MissingField(field("message")))?
            .as_str()
            .ok_or_else(|| SchemaError::InvalidType {
                field: field("message"),
                expected: "a string",
            })?;

        Ok(Self { timestamp, message })
    }
}

fn float_millis(ms: f64) -> Option<i64> {
    let ms = ms.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    if ms.is_finite() && ms >= i64::MIN as f64 && ms < i64::MAX as f64 {
        Some(ms as i64)
    } else {
        None
    }
}

/// The subject and body pair sent to the destination topic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

// =============================================================================
// Service Traits
// =============================================================================

/// Sends a notification to a fixed destination.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// The destination this publisher was built for (e.g. an SNS topic ARN).
    fn destination(&self) -> &str;

    /// Sends one notification.
    ///
    /// # Returns
    /// * `Ok(())` once the destination accepted the message
    /// * `Err` for any transport or service-side failure; nothing is retried
    async fn publish(&self, notification: &Notification) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_log_group_and_events_are_read() {
        let batch = LogBatch::new(json!({
            "logGroup": "/aws/lambda/orders",
            "logEvents": [
                { "id": "1", "timestamp": 1700000000000_i64, "message": "first" },
                { "id": "2", "timestamp": 1700000001000_i64, "message": "second" }
            ]
        }));

        assert_eq!(batch.log_group().unwrap(), "/aws/lambda/orders");
        let events = batch.log_events().unwrap();
        assert_eq!(
            events,
            vec![
                LogEntry { timestamp: 1700000000000, message: "first" },
                LogEntry { timestamp: 1700000001000, message: "second" },
            ]
        );
    }

    #[test]
    fn test_missing_log_group() {
        let batch = LogBatch::new(json!({ "logEvents": [] }));
        assert_eq!(
            batch.log_group(),
            Err(SchemaError::MissingField("logGroup".to_string()))
        );
    }

    #[test]
    fn test_non_object_batch_is_schema_error() {
        let batch = LogBatch::new(json!([1, 2, 3]));
        assert!(matches!(batch.log_group(), Err(SchemaError::MissingField(_))));
        assert!(matches!(batch.log_events(), Err(SchemaError::MissingField(_))));
    }

    #[test]
    fn test_log_events_must_be_an_array() {
        let batch = LogBatch::new(json!({ "logGroup": "g", "logEvents": "nope" }));
        assert_eq!(
            batch.log_events(),
            Err(SchemaError::InvalidType {
                field: "logEvents".to_string(),
                expected: "an array",
            })
        );
    }

    #[test]
    fn test_entry_missing_message_names_the_path() {
        let batch = LogBatch::new(json!({
            "logGroup": "g",
            "logEvents": [
                { "timestamp": 1, "message": "ok" },
                { "timestamp": 2 }
            ]
        }));
        assert_eq!(
            batch.log_events(),
            Err(SchemaError::MissingField("logEvents[1].message".to_string()))
        );
    }

    #[test]
    fn test_entry_with_string_timestamp_is_rejected() {
        let batch = LogBatch::new(json!({
            "logGroup": "g",
            "logEvents": [{ "timestamp": "yesterday", "message": "ok" }]
        }));
        assert!(matches!(
            batch.log_events(),
            Err(SchemaError::InvalidType { ref field, .. }) if field == "logEvents[0].timestamp"
        ));
    }

    #[test]
    fn test_oversized_float_timestamp_is_rejected() {
        let batch = LogBatch::new(json!({
            "logGroup": "g",
            "logEvents": [{ "timestamp": 1.0e300, "message": "ok" }]
        }));
        assert_eq!(
            batch.log_events(),
            Err(SchemaError::InvalidType {
                field: "logEvents[0].timestamp".to_string(),
                expected: "an integer",
            })
        );
    }

    #[test]
    fn test_float_timestamp_is_truncated() {
        let batch = LogBatch::new(json!({
            "logGroup": "g",
            "logEvents": [{ "timestamp": 1500.9, "message": "ok" }]
        }));
        assert_eq!(batch.log_events().unwrap()[0].timestamp, 1500);
    }

    #[test]
    fn test_envelope_deserializes_from_invocation_json() {
        let envelope: Envelope =
            serde_json::from_value(json!({ "awslogs": { "data": "H4sIAAAA" } })).unwrap();
        assert_eq!(envelope, Envelope::new("H4sIAAAA"));
    }
}
