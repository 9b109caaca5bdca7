//! Post Extraction
//!
//! Turns the model's free-text answer into a `RawPost`.
//!
//! Handles the one formatting habit the prompt cannot fully suppress:
//! - Markdown code fence wrapping (```json ... ```), possibly nested
//! - Byte-order marks and surrounding whitespace
//!
//! Everything else is parsed strictly. There is no repair pass: a payload
//! with missing, extra, or mistyped keys is a `GenerationError::Parse`.

use tracing::debug;

use crate::types::{GenerationError, RawPost};

/// Characters accepted in a fence language tag (`json`, `JSON5`, `c++`)
fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+')
}

/// Strip markdown code fences until none remain.
///
/// Idempotent: the result is a fixed point of a single strip pass.
pub fn strip_code_fences(raw: &str) -> String {
    let mut current = raw;
    loop {
        let next = strip_once(current);
        if next.len() == current.len() {
            return next.to_string();
        }
        current = next;
    }
}

/// One pass: leading fence with optional tag, trailing fence, whitespace
fn strip_once(s: &str) -> &str {
    let mut s = s.trim().trim_start_matches('\u{feff}').trim();

    if let Some(rest) = s.strip_prefix("```") {
        let tag_len = rest.find(|c: char| !is_tag_char(c)).unwrap_or(rest.len());
        s = &rest[tag_len..];
    }

    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }

    s.trim()
}

/// Parse the model's answer into a `RawPost`
pub fn parse_post(text: &str) -> Result<RawPost, GenerationError> {
    let cleaned = strip_code_fences(text);

    if cleaned.is_empty() {
        return Err(GenerationError::Parse(
            "response text is empty after removing code fences".to_string(),
        ));
    }

    debug!("Parsing post object ({} chars)", cleaned.len());

    serde_json::from_str::<RawPost>(&cleaned).map_err(|e| {
        GenerationError::Parse(format!(
            "{}. Content preview: {}...",
            e,
            cleaned.chars().take(200).collect::<String>()
        ))
    })
}
