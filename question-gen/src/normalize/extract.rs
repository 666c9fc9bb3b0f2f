//! JSON candidate extraction from noisy model output.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::errors::NormalizationError;

/// Start of a numbered object: `1. {`, `12.{`.
static NUMBERED_OBJECT_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.\s*\{").expect("valid numbered-object regex"));

/// A numbered marker at the start of the remaining text.
static NUMBER_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.").expect("valid number-marker regex"));

/// Finds the JSON text to decode, in order:
/// - the whole text (code fence stripped) when it is a JSON object that
///   wraps a question array or carries question text;
/// - the span from the first `[` to the last `]`;
/// - numbered `N. {...}` objects, joined into an array.
pub fn candidate(raw: &str) -> Result<Cow<'_, str>, NormalizationError> {
    if let Some(obj) = whole_object(raw) {
        return Ok(Cow::Borrowed(obj));
    }
    if let Some(span) = bracket_span(raw) {
        return Ok(Cow::Borrowed(span));
    }

    let objects = numbered_objects(raw);
    if objects.is_empty() {
        return Err(NormalizationError::NoJsonFound);
    }
    Ok(Cow::Owned(format!("[{}]", objects.join(","))))
}

/// Removes a surrounding markdown fence (```` ``` ```` or ```` ```json ````),
/// returning the trimmed inner text. Text without a fence is only trimmed.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`, `JSON`, ...) on the opening line.
    let body = match body.find('\n') {
        Some(nl) if !body[..nl].trim_start().starts_with(['{', '[']) => &body[nl + 1..],
        _ => body,
    };
    body.trim()
}

fn whole_object(raw: &str) -> Option<&str> {
    let text = strip_code_fence(raw);
    if !(text.starts_with('{') && text.ends_with('}')) {
        return None;
    }
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) if super::flexible::is_question_object(&map) => Some(text),
        _ => None,
    }
}

fn bracket_span(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    (end > start).then(|| &raw[start..=end])
}

/// Collects `{...}` bodies that follow `N.` markers. Each object ends at the
/// first `}` followed (after whitespace) by another `N.` marker or the end of
/// the text.
fn numbered_objects(raw: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut pos = 0;

    while let Some(m) = NUMBERED_OBJECT_START.find_at(raw, pos) {
        let open = m.end() - 1;
        let close = raw[open..].match_indices('}').map(|(i, _)| open + i).find(|&i| {
            let rest = raw[i + 1..].trim_start();
            rest.is_empty() || NUMBER_MARKER.is_match(rest)
        });

        match close {
            Some(close) => {
                out.push(&raw[open..=close]);
                pos = close + 1;
            }
            None => break,
        }
    }
    out
}
