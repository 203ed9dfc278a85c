use super::payload::EchoPayload;

/// Errors produced while encoding an echo payload
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Payload rejected: {0}")]
    Rejected(String),
}

/// Turns an [`EchoPayload`] into the response body text
pub trait PayloadEncoder {
    fn encode(&self, payload: &EchoPayload<'_>) -> Result<String, EncodeError>;
}

/// Compact JSON encoding via `serde_json`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl PayloadEncoder for JsonEncoder {
    fn encode(&self, payload: &EchoPayload<'_>) -> Result<String, EncodeError> {
        Ok(serde_json::to_string(payload)?)
    }
}
