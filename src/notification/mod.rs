//! Delivery of rendered notifications.
//!
//! The `Publisher` trait in `core` is the seam between the handler and the
//! messaging service. `sns` holds the Amazon SNS implementation used in
//! production.
pub mod sns;

pub use sns::SnsPublisher;

use thiserror::Error;

/// The outbound publish call failed.
#[derive(Error, Debug)]
#[error("failed to publish notification to '{destination}': {message}")]
pub struct TransportError {
    /// The destination the publish was aimed at
    pub destination: String,
    /// The transport or service error, rendered with its full source chain
    pub message: String,
}

impl TransportError {
    pub fn new(destination: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            message: message.into(),
        }
    }
}
