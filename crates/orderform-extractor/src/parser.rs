//! Parse provider output into chunk records

use orderform_domain::{ChunkRecord, PartialRecord};
use serde_json::Value;
use tracing::warn;

/// Strip surrounding code-fence markup and whitespace from a response
///
/// Handles both ```` ```json ```` and bare ```` ``` ```` fences. Text without
/// fences is only trimmed.
pub fn clean_response(response: &str) -> &str {
    let mut text = response.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the info string (e.g. `json`) on the opening fence line
        text = match rest.find('\n') {
            Some(newline) if rest[..newline].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
                &rest[newline + 1..]
            }
            Some(_) => rest,
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
    }

    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

/// Turn one raw provider response into a chunk record
///
/// A response that is not a JSON object becomes [`ChunkRecord::Degraded`]
/// carrying the cleaned text. Inside an object, a value of the wrong type
/// loses only that field or list entry.
pub fn parse_chunk_response(response: &str) -> ChunkRecord {
    let cleaned = clean_response(response);

    match parse_partial(cleaned) {
        Ok(record) => ChunkRecord::Structured(record),
        Err(reason) => {
            warn!("Degrading chunk response ({} chars): {}", cleaned.len(), reason);
            ChunkRecord::Degraded(cleaned.to_string())
        }
    }
}

fn parse_partial(cleaned: &str) -> Result<PartialRecord, String> {
    let json: Value =
        serde_json::from_str(cleaned).map_err(|e| format!("JSON parse error: {}", e))?;

    if !json.is_object() {
        return Err("Expected JSON object".to_string());
    }

    serde_json::from_value(json).map_err(|e| format!("Record shape error: {}", e))
}
