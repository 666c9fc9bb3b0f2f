//! Tiered normalization of raw model output into [`Question`]s.
//!
//! Tiers, first success wins:
//! 1. [`extract`]: pull a JSON candidate out of the noisy text.
//! 2. [`strict`]: decode it against the exact question schema.
//! 3. [`flexible`]: on schema mismatch only, map wrapper objects, string
//!    arrays and loosely keyed records onto the schema.
//! 4. [`plain_text`]: lift numbered or bulleted lines out of the raw text.
//! 5. [`placeholder`]: fabricate sample questions.
//!
//! [`normalize`] never fails; the [`QuestionOrigin`] of the outcome tells
//! which tier produced it.

pub mod extract;
mod field_resolver;
mod flexible;
pub mod placeholder;
pub mod plain_text;
mod strict;

use tracing::{debug, info, warn};

use crate::errors::NormalizationError;
use crate::model::{GenerationOutcome, QuestionOrigin};
use crate::options::{DEFAULT_PLACEHOLDER_COUNT, MAX_QUESTION_COUNT};

/// Turns raw model text into questions.
///
/// `requested_count` only sizes the placeholder tier (default 3).
pub fn normalize(raw: &str, requested_count: Option<usize>) -> GenerationOutcome {
    let outcome = decode_json(raw)
        .or_else(|err| {
            debug!(error = %err, "no usable JSON in model output; trying plain text");
            plain_text::parse(raw)
                .map(|questions| GenerationOutcome::new(questions, QuestionOrigin::Heuristic))
        })
        .unwrap_or_else(|err| {
            let count = requested_count
                .unwrap_or(DEFAULT_PLACEHOLDER_COUNT)
                .min(MAX_QUESTION_COUNT);
            warn!(error = %err, count, "model output unusable; returning placeholder questions");
            placeholder::outcome(count)
        });

    info!(
        origin = ?outcome.origin,
        count = outcome.questions.len(),
        "model output normalized"
    );
    outcome
}

/// JSON tiers only: extraction, strict decode, and flexible decode on schema
/// mismatch. Syntax errors and unsupported shapes are returned to the caller.
pub fn decode_json(raw: &str) -> Result<GenerationOutcome, NormalizationError> {
    let candidate = extract::candidate(raw)?;
    decode_candidate(&candidate)
}

/// Strict, then flexible when the JSON is well-formed but off-schema.
fn decode_candidate(candidate: &str) -> Result<GenerationOutcome, NormalizationError> {
    match strict::decode(candidate) {
        Ok(questions) => Ok(GenerationOutcome::new(questions, QuestionOrigin::Model)),
        Err(NormalizationError::SchemaMismatch(err)) => {
            debug!(error = %err, "strict decode failed; trying flexible decode");
            flexible::decode(candidate)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, QuestionType};

    #[test]
    fn exact_schema_array_is_taken_verbatim() {
        let raw = r#"Sure! Here you go:
[
  {"id":"q1","type":"MCQ","question":"What do plants absorb?","options":["CO2","O2"],"answer":"CO2","explanation":"Photosynthesis."},
  {"id":"q2","type":"ONE_WORD","question":"Green pigment?","options":null,"answer":"Chlorophyll","explanation":null}
]
Hope this helps."#;

        let out = normalize(raw, Some(2));
        assert_eq!(out.origin, QuestionOrigin::Model);
        assert_eq!(out.questions.len(), 2);
        assert_eq!(out.questions[0].id, "q1");
        assert_eq!(out.questions[0].kind, QuestionType::Mcq);
        assert_eq!(
            out.questions[0].options.as_deref(),
            Some(&["CO2".to_string(), "O2".to_string()][..])
        );
        assert_eq!(out.questions[1].answer.as_deref(), Some("Chlorophyll"));
        assert_eq!(out.questions[1].explanation, None);
    }

    #[test]
    fn strict_fills_blank_id_and_missing_type() {
        let raw = r#"[{"id":"","question":"Pick one","options":["a","b"]},{"question":"Explain."}]"#;
        let out = normalize(raw, None);

        assert_eq!(out.origin, QuestionOrigin::Model);
        assert!(out.questions.iter().all(|q| !q.id.trim().is_empty()));
        assert_eq!(out.questions[0].kind, QuestionType::Mcq);
        assert_eq!(out.questions[1].kind, QuestionType::Paragraph);
    }

    #[test]
    fn wrapper_object_is_equivalent_to_inner_array() {
        let inner = r#"[{"id":"a","type":"PARAGRAPH","question":"Why?","options":null,"answer":null,"explanation":null}]"#;
        let wrapped = format!(r#"{{"questions": {inner}}}"#);

        let direct = normalize(inner, None);
        let unwrapped = normalize(&wrapped, None);
        assert_eq!(direct, unwrapped);
        assert_eq!(unwrapped.origin, QuestionOrigin::Model);
    }

    #[test]
    fn wrapper_with_bracketed_sibling_is_unwrapped() {
        let raw = r#"```json
{"note": "see [1]", "data": [{"q": "What is osmosis?"}]}
```"#;
        let out = normalize(raw, None);
        assert_eq!(out.origin, QuestionOrigin::ModelRepaired);
        assert_eq!(out.questions.len(), 1);
        assert_eq!(out.questions[0].question, "What is osmosis?");
    }

    #[test]
    fn unknown_wrapper_key_yields_the_inner_array() {
        let raw = r#"{"quiz": [{"id":"q1","type":"PARAGRAPH","question":"Why is the sky blue?","options":null,"answer":null,"explanation":null}]}"#;
        let out = normalize(raw, Some(2));

        assert_eq!(out.origin, QuestionOrigin::Model);
        assert_eq!(out.questions.len(), 1);
        assert_eq!(out.questions[0].id, "q1");
        assert_eq!(out.questions[0].question, "Why is the sky blue?");
    }

    #[test]
    fn error_object_without_questions_is_treated_as_text() {
        let raw = r#" {"error": "rate limited"} "#;
        let out = normalize(raw, None);

        assert_eq!(out.origin, QuestionOrigin::Heuristic);
        assert_eq!(out.questions.len(), 1);
        assert_eq!(out.questions[0].question, raw.trim());
        assert_eq!(out.questions[0].kind, QuestionType::Paragraph);
    }

    #[test]
    fn blank_type_is_inferred_without_repair() {
        let raw = r#"[{"id":"q1","type":"","question":"Pick one","options":["a","b"],"answer":"a","explanation":null}]"#;
        let out = normalize(raw, None);

        assert_eq!(out.origin, QuestionOrigin::Model);
        assert_eq!(out.questions[0].kind, QuestionType::Mcq);
    }

    #[test]
    fn string_array_becomes_paragraph_questions() {
        let out = normalize(r#"["1. What is X?", "Define Y."]"#, None);

        assert_eq!(out.origin, QuestionOrigin::ModelRepaired);
        let texts: Vec<_> = out.questions.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(texts, ["What is X?", "Define Y."]);
        assert!(out.questions.iter().all(|q| q.kind == QuestionType::Paragraph));
    }

    #[test]
    fn aliased_record_with_choices_is_mcq() {
        let out = normalize(r#"[{"prompt":"Which is a vowel?","choices":["a","b"]}]"#, None);

        assert_eq!(out.origin, QuestionOrigin::ModelRepaired);
        assert_eq!(out.questions.len(), 1);
        let q = &out.questions[0];
        assert_eq!(q.question, "Which is a vowel?");
        assert_eq!(q.kind, QuestionType::Mcq);
        assert_eq!(q.options, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn numbered_objects_are_reassembled() {
        let raw = r#"1. {"question": "First?", "answer": "one"}
2. {"question": "Second?", "answer": "two"}"#;
        let out = normalize(raw, None);

        assert_eq!(out.origin, QuestionOrigin::Model);
        let texts: Vec<_> = out.questions.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(texts, ["First?", "Second?"]);
    }

    #[test]
    fn prose_without_lists_becomes_one_paragraph() {
        let out = normalize("  Describe the water cycle in detail.  ", None);

        assert_eq!(out.origin, QuestionOrigin::Heuristic);
        assert_eq!(out.questions.len(), 1);
        assert_eq!(out.questions[0].question, "Describe the water cycle in detail.");
        assert_eq!(out.questions[0].kind, QuestionType::Paragraph);
    }

    #[test]
    fn numbered_lines_are_lifted_when_json_is_broken() {
        let raw = "Questions:\n1. What is mass?\n2) What is weight?\n- Define force.\n[oops";
        let out = normalize(raw, None);

        assert_eq!(out.origin, QuestionOrigin::Heuristic);
        let texts: Vec<_> = out.questions.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(texts, ["What is mass?", "What is weight?", "Define force."]);
    }

    #[test]
    fn empty_output_yields_placeholders() {
        let out = normalize("   ", None);
        assert_eq!(out.origin, QuestionOrigin::Placeholder);
        assert_eq!(out.questions.len(), 3);

        let out = normalize("", Some(4));
        assert_eq!(out.questions.len(), 4);
        assert!(out.origin.is_fabricated());
    }

    #[test]
    fn empty_array_is_terminal() {
        let out = normalize("[]", Some(5));
        assert_eq!(out.origin, QuestionOrigin::Model);
        assert!(out.questions.is_empty());
    }

    #[test]
    fn normalizing_canonical_json_is_idempotent() {
        let raw = r#"[{"prompt":"Name a gas.","choices":["O2", 7, null],"correct_answer":"O2","type":"multiple choice"},
                     {"question_text":"Explain tides.","rationale":"Moon."}]"#;
        let first = normalize(raw, None);
        let canonical = serde_json::to_string(&first.questions).unwrap();
        let second = normalize(&canonical, None);

        assert_eq!(second.origin, QuestionOrigin::Model);
        assert_eq!(first.questions, second.questions);
        assert_eq!(
            first.questions[0].options,
            Some(vec!["O2".to_string(), "7".to_string()])
        );
    }

    #[test]
    fn decode_json_reports_missing_json() {
        let err = decode_json("no json here").unwrap_err();
        assert!(matches!(err, NormalizationError::NoJsonFound));

        let err = decode_json("[1, 2,").unwrap_err();
        assert!(matches!(err, NormalizationError::NoJsonFound));

        let err = decode_json("[1, 2,]").unwrap_err();
        assert!(matches!(err, NormalizationError::Syntax(_)));

        let _: Vec<Question> = decode_json(r#"[{"question":"ok"}]"#).unwrap().questions;
    }
}
