use base64::{engine::general_purpose::STANDARD, Engine};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("payload is empty")]
    Empty,
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// Encodes raw image bytes for transport.
pub fn encode_payload(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Removes a leading `data:<mime>;base64,` prefix, if any.
pub fn strip_data_url_prefix(payload: &str) -> &str {
    if payload.starts_with("data:") {
        if let Some((_, data)) = payload.split_once(',') {
            return data;
        }
    }
    payload
}

/// Decodes a transport payload back into bytes.
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, EncodeError> {
    let data = strip_data_url_prefix(payload).trim();
    if data.is_empty() {
        return Err(EncodeError::Empty);
    }
    STANDARD
        .decode(data)
        .map_err(|err| EncodeError::InvalidBase64(err.to_string()))
}
