//! History file encoding: a pretty-printed JSON array, base64-wrapped for the content host.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::StoreError;
use crate::assessments::ScoredRecord;

pub fn encode_history(records: &[ScoredRecord]) -> Result<String, StoreError> {
    serde_json::to_string_pretty(records).map_err(|err| StoreError::Encoding(err.to_string()))
}

/// An empty or whitespace-only file decodes to an empty history.
pub fn decode_history(text: &str) -> Result<Vec<ScoredRecord>, StoreError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(text).map_err(|err| StoreError::MalformedHistory(err.to_string()))
}

pub fn wrap_content(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode base64 content as served by the host, which breaks it into lines.
pub fn unwrap_content(content: &str) -> Result<String, StoreError> {
    let compact: String = content
        .chars()
        .filter(|ch| !ch.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|err| StoreError::MalformedHistory(format!("invalid base64 content: {err}")))?;
    String::from_utf8(bytes)
        .map_err(|err| StoreError::MalformedHistory(format!("content is not UTF-8: {err}")))
}
