// src/formatting.rs

use crate::core::{LogBatch, Notification, SchemaError};
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

const SUBJECT_PREFIX: &str = "Error from ";
const SEPARATOR: &str = "--------------------------------";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders a [`LogBatch`] into the subject and body of an email-style
/// notification.
///
/// Timestamps are shown in `Tz`. The production formatter uses the process's
/// local time zone.
#[derive(Debug, Clone)]
pub struct EmailFormatter<Tz: TimeZone = Local> {
    tz: Tz,
}

impl Default for EmailFormatter<Local> {
    fn default() -> Self {
        Self { tz: Local }
    }
}

impl<Tz> EmailFormatter<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    /// Creates a formatter that renders timestamps in the given time zone.
    pub fn with_timezone(tz: Tz) -> Self {
        Self { tz }
    }

    /// Renders both parts of the notification.
    pub fn format(&self, batch: &LogBatch) -> Result<Notification, SchemaError> {
        Ok(Notification {
            subject: self.subject(batch)?,
            body: self.body(batch)?,
        })
    }

    pub fn subject(&self, batch: &LogBatch) -> Result<String, SchemaError> {
        Ok(format!("{}{}", SUBJECT_PREFIX, batch.log_group()?))
    }

    /// Renders one block per log event followed by the raw batch as JSON.
    pub fn body(&self, batch: &LogBatch) -> Result<String, SchemaError> {
        let mut log_events = String::new();
        for (index, event) in batch.log_events()?.iter().enumerate() {
            let timestamp = self.format_timestamp(event.timestamp).ok_or_else(|| {
                SchemaError::TimestampOutOfRange {
                    field: format!("logEvents[{}].timestamp", index),
                    value: event.timestamp,
                }
            })?;
            log_events.push_str(&format!(
                "\nAt {}\n{}\n{}\n",
                timestamp,
                SEPARATOR,
                unescape_newlines(event.message)
            ));
        }

        Ok(format!(
            "\n{}\n\nRaw logs:\n{}\n{}\n",
            log_events,
            SEPARATOR,
            batch.raw()
        ))
    }

    /// Formats milliseconds since the epoch as `YYYY-MM-DD HH:MM:SS` in this
    /// formatter's time zone. `None` if the instant is out of range.
    pub fn format_timestamp(&self, timestamp_ms: i64) -> Option<String> {
        let instant = DateTime::<Utc>::from_timestamp_millis(timestamp_ms)?;
        Some(
            instant
                .with_timezone(&self.tz)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
        )
    }
}

/// Replaces each literal backslash-n pair with a newline.
fn unescape_newlines(message: &str) -> String {
    message.replace("\\n", "\n")
}
