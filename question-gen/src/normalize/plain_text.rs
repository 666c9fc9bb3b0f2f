//! Line-based fallback for model output that holds no usable JSON.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::NormalizationError;
use crate::model::Question;

/// `1.`, `1)`, `- `, `* ` at the start of a trimmed line.
static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-9]+[.)]\s*|[-*]\s+)").expect("valid list-marker regex"));

/// Removes one leading list marker, if any.
pub fn strip_list_marker(line: &str) -> &str {
    match LIST_MARKER.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

/// Every numbered or bulleted line becomes a PARAGRAPH question. Without such
/// lines, non-blank text becomes one question as a whole.
pub fn parse(raw: &str) -> Result<Vec<Question>, NormalizationError> {
    let listed: Vec<Question> = raw
        .lines()
        .map(str::trim)
        .filter(|line| LIST_MARKER.is_match(line))
        .map(|line| strip_list_marker(line).trim())
        .filter(|text| !text.is_empty())
        .map(Question::paragraph)
        .collect();

    if !listed.is_empty() {
        return Ok(listed);
    }

    let whole = raw.trim();
    if whole.is_empty() {
        return Err(NormalizationError::NoQuestions);
    }
    Ok(vec![Question::paragraph(whole)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers() {
        assert_eq!(strip_list_marker("1. What?"), "What?");
        assert_eq!(strip_list_marker("12)Why?"), "Why?");
        assert_eq!(strip_list_marker("- Item"), "Item");
        assert_eq!(strip_list_marker("* Item"), "Item");
        assert_eq!(strip_list_marker("-5 degrees"), "-5 degrees");
        assert_eq!(strip_list_marker("Plain"), "Plain");
    }

    #[test]
    fn blank_marker_lines_are_skipped() {
        let qs = parse("1.\n2. Real question?\n-   \n").unwrap();
        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].question, "Real question?");
    }

    #[test]
    fn whitespace_only_has_no_questions() {
        assert!(matches!(
            parse(" \n\t "),
            Err(NormalizationError::NoQuestions)
        ));
    }
}
