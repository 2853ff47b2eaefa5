//! The invocation handler: decode, render, publish.

use crate::{
    core::{Envelope, Publisher, SchemaError},
    decoder::{self, DecodeError},
    formatting::EmailFormatter,
    notification::TransportError,
};
use chrono::Local;
use thiserror::Error;
use tracing::{error, instrument};

/// Why an invocation failed. Every variant is fatal for the invocation.
#[derive(Error, Debug)]
pub enum NotifierError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Turns CloudWatch Logs subscription payloads into notifications.
///
/// Built once per process and shared across invocations; it holds no mutable
/// state.
pub struct Notifier<P: Publisher> {
    publisher: P,
    formatter: EmailFormatter<Local>,
}

impl<P: Publisher> Notifier<P> {
    pub fn new(publisher: P) -> Self {
        Self {
            publisher,
            formatter: EmailFormatter::default(),
        }
    }

    /// Handles one invocation.
    ///
    /// Errors are not recovered: a failure at any stage ends the invocation
    /// and nothing is published after it.
    #[instrument(skip_all, fields(destination = %self.publisher.destination()))]
    pub async fn handle(&self, envelope: &Envelope) -> Result<(), NotifierError> {
        let log_batch = decoder::decode(envelope)?;

        error!(log_data = %log_batch, "Received log batch");

        let notification = self.formatter.format(&log_batch)?;

        self.publisher.publish(&notification).await?;
        Ok(())
    }
}
