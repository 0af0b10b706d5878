//! Extraction of `{score, reason}` from free-form oracle text.
//!
//! The text-generation service may wrap its answer in prose. Only the substring
//! from the first `{` to the last `}` is parsed.

use serde::Deserialize;

use super::error::{OracleError, OracleResult};

/// A single directional compatibility judgment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Judgment {
    pub score: f64,
    #[serde(default)]
    pub reason: String,
}

/// Returns the first-`{`-to-last-`}` slice of `raw`, if one exists.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Parses a judgment out of raw oracle output.
///
/// Fails with [`OracleError::MalformedResponse`] when no bracket pair exists, the
/// slice is not valid JSON, or `score` is missing or not a number.
pub fn parse_judgment(raw: &str) -> OracleResult<Judgment> {
    let object = extract_json_object(raw)
        .ok_or_else(|| OracleError::malformed("no JSON object in response text"))?;

    let judgment: Judgment = serde_json::from_str(object)
        .map_err(|e| OracleError::malformed(format!("{e} in {object:?}")))?;

    if !judgment.score.is_finite() {
        return Err(OracleError::malformed("score is not a finite number"));
    }

    Ok(judgment)
}
