//! Decoding of the CloudWatch Logs subscription payload.
//!
//! The payload is base64 text wrapping a gzip stream wrapping a JSON document.

use crate::core::{Envelope, LogBatch};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use flate2::read::MultiGzDecoder;
use std::io::Read;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("log payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("log payload is not a valid gzip stream: {0}")]
    Gzip(#[from] std::io::Error),

    #[error("log payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decodes the envelope's `awslogs.data` field into a [`LogBatch`].
pub fn decode(envelope: &Envelope) -> Result<LogBatch, DecodeError> {
    // Line breaks and other ASCII whitespace inside the text are ignored.
    let text: Vec<u8> = envelope
        .awslogs
        .data
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let compressed = STANDARD.decode(&text)?;

    // Concatenated gzip members decode as one stream.
    let mut decompressed = Vec::new();
    MultiGzDecoder::new(compressed.as_slice()).read_to_end(&mut decompressed)?;

    let value = serde_json::from_slice(&decompressed)?;
    Ok(LogBatch::new(value))
}
