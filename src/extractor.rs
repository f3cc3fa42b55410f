use once_cell::sync::Lazy;
use regex::Regex;

use crate::data_models::ResultPayload;
use crate::error::SearchError;

const FENCE_OPEN: &str = "```json\n";
const FENCE_CLOSE: &str = "\n```";

static FENCED_JSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```json\n([\s\S]*?)\n```").expect("fenced block pattern is valid"));

/// Returns the body of the first ```json fenced block in `text`.
pub fn fenced_block(text: &str) -> Option<&str> {
    FENCED_JSON
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn extract_payload(text: &str) -> Result<ResultPayload, SearchError> {
    let block = fenced_block(text).ok_or(SearchError::NoJsonData)?;
    let payload = serde_json::from_str(block)?;
    Ok(payload)
}

/// Inverse of [`extract_payload`]: pretty JSON inside a ```json fence.
pub fn wrap_payload(payload: &ResultPayload) -> Result<String, serde_json::Error> {
    let body = serde_json::to_string_pretty(payload)?;
    Ok(format!("{FENCE_OPEN}{body}{FENCE_CLOSE}"))
}

#[test]
fn test_fenced_block_is_non_greedy() {
    let text = "a\n```json\n{\"x\": 1}\n```\nb\n```json\n{\"y\": 2}\n```";
    assert_eq!(fenced_block(text), Some("{\"x\": 1}"));
}

#[test]
fn test_fenced_block_requires_language_marker() {
    assert_eq!(fenced_block("```\n{}\n```"), None);
}
