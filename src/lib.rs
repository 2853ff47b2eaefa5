//! Log Alert Notifier - forwards CloudWatch Logs subscription payloads to SNS
//!
//! This library decodes the compressed log batch a subscription filter delivers,
//! renders it into an email-style notification and hands it to a publisher.

pub mod config;
pub mod core;
pub mod decoder;
pub mod formatting;
pub mod handler;
pub mod notification;

// Re-export core types for convenience
pub use crate::core::*;
pub use handler::{Notifier, NotifierError};
