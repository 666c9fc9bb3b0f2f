//! Structural repairs for JSON that is well-formed but off-schema.

use serde_json::{Map, Value};

use super::field_resolver::{FieldResolver, stringify};
use super::plain_text::strip_list_marker;
use crate::errors::NormalizationError;
use crate::model::{GenerationOutcome, Question, QuestionOrigin};

const QUESTION_KEYS: &[&str] = &["question", "question_text", "prompt", "text", "q"];
const TYPE_KEYS: &[&str] = &["type", "question_type"];
const OPTION_KEYS: &[&str] = &["options", "choices"];
const ANSWER_KEYS: &[&str] = &["answer", "correct_answer", "correctAnswer"];
const EXPLANATION_KEYS: &[&str] = &["explanation", "rationale", "reason"];
const ID_KEYS: &[&str] = &["id"];

/// Keys whose array value is the real question list.
const WRAPPER_KEYS: &[&str] = &["questions", "data", "items"];

pub(super) fn decode(candidate: &str) -> Result<GenerationOutcome, NormalizationError> {
    let tree: Value = serde_json::from_str(candidate).map_err(NormalizationError::from_serde)?;
    let repaired = |questions: Vec<Question>| -> Result<GenerationOutcome, NormalizationError> {
        Ok(GenerationOutcome::new(questions, QuestionOrigin::ModelRepaired))
    };

    match &tree {
        Value::Object(map) => match wrapped_array(map) {
            Some(inner) => super::decode_candidate(&inner.to_string()),
            None => repaired(from_record(map).into_iter().collect()),
        },
        Value::Array(items) => match items.first() {
            Some(Value::String(_)) => repaired(from_strings(items)),
            Some(Value::Object(_)) => repaired(from_records(items)),
            Some(_) => Err(NormalizationError::UnsupportedShape(
                "array of neither strings nor objects",
            )),
            None => repaired(Vec::new()),
        },
        _ => Err(NormalizationError::UnsupportedShape("scalar JSON value")),
    }
}

/// `true` when an object wraps a question array or carries question text itself.
pub(super) fn is_question_object(map: &Map<String, Value>) -> bool {
    wrapped_array(map).is_some() || FieldResolver::new(map).text(QUESTION_KEYS).is_some()
}

fn wrapped_array(map: &Map<String, Value>) -> Option<&Value> {
    WRAPPER_KEYS
        .iter()
        .filter_map(|k| map.get(*k))
        .find(|v| v.is_array())
}

fn from_strings(items: &[Value]) -> Vec<Question> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(|s| strip_list_marker(s.trim()).trim())
        .filter(|s| !s.is_empty())
        .map(Question::paragraph)
        .collect()
}

fn from_records(items: &[Value]) -> Vec<Question> {
    items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(from_record)
        .collect()
}

/// Maps one record through the key aliases. Records without question text are dropped.
fn from_record(record: &Map<String, Value>) -> Option<Question> {
    let r = FieldResolver::new(record);
    let question = r.text(QUESTION_KEYS)?;

    Some(Question::with_defaults(
        r.first(ID_KEYS).and_then(stringify),
        r.question_type(TYPE_KEYS),
        question,
        r.string_list(OPTION_KEYS),
        r.text(ANSWER_KEYS),
        r.text(EXPLANATION_KEYS),
    ))
}
