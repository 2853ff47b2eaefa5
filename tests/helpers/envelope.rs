//! Builds invocation envelopes the way CloudWatch Logs delivers them.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use flate2::{write::GzEncoder, Compression};
use log_alert_notifier::Envelope;
use serde_json::Value;
use std::io::Write;

/// Gzips and base64-encodes `bytes` into an envelope.
pub fn envelope_from_bytes(bytes: &[u8]) -> Envelope {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).unwrap();
    Envelope::new(STANDARD.encode(encoder.finish().unwrap()))
}

pub fn envelope_for(document: &Value) -> Envelope {
    envelope_from_bytes(document.to_string().as_bytes())
}
