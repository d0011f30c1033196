//! Turns raw model output into a generic JSON record.
//!
//! The model occasionally writes a numeric range such as `1-2` as a bare token
//! where a string belongs (`"Frequency": 1-2`), which no JSON parser accepts.
//! [`quote_bare_ranges`] patches exactly that quirk and nothing else. If the
//! upstream model stops producing it, the repair can be removed without touching
//! the rest of the pipeline.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::prescription_generator::PROMPT_MISSING_SENTINEL;

static BARE_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?-\d+(?:\.\d+)?").unwrap());

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("completion is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("completion is not a JSON object")]
    NotAnObject,
}

/// Repairs, parses and maps the prompt sentinel to `null`.
pub fn normalize_response(raw: &str) -> Result<Value, NormalizeError> {
    let repaired = quote_bare_ranges(raw);
    if matches!(repaired, Cow::Owned(_)) {
        tracing::debug!("Quoted bare numeric range in completion");
    }

    let mut record: Value = serde_json::from_str(&repaired)?;
    if !record.is_object() {
        return Err(NormalizeError::NotAnObject);
    }

    replace_sentinels(&mut record);
    Ok(record)
}

/// Wraps dash-joined numeric ranges that sit outside string literals in quotes.
///
/// Returns the input untouched (borrowed) when there is nothing to repair.
pub fn quote_bare_ranges(raw: &str) -> Cow<'_, str> {
    let mut repaired = String::with_capacity(raw.len() + 8);
    let mut changed = false;
    let mut segment_start = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in raw.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
                repaired.push_str(&raw[segment_start..=idx]);
                segment_start = idx + 1;
            }
        } else if ch == '"' {
            changed |= push_quoted_ranges(&raw[segment_start..idx], &mut repaired);
            in_string = true;
            segment_start = idx;
        }
    }

    if in_string {
        repaired.push_str(&raw[segment_start..]);
    } else {
        changed |= push_quoted_ranges(&raw[segment_start..], &mut repaired);
    }

    if changed {
        Cow::Owned(repaired)
    } else {
        Cow::Borrowed(raw)
    }
}

fn push_quoted_ranges(segment: &str, out: &mut String) -> bool {
    let quoted = BARE_RANGE.replace_all(segment, "\"$0\"");
    let changed = matches!(quoted, Cow::Owned(_));
    out.push_str(&quoted);
    changed
}

fn replace_sentinels(value: &mut Value) {
    match value {
        Value::String(s) if s == PROMPT_MISSING_SENTINEL => *value = Value::Null,
        Value::Array(items) => items.iter_mut().for_each(replace_sentinels),
        Value::Object(map) => map.values_mut().for_each(replace_sentinels),
        _ => {}
    }
}
