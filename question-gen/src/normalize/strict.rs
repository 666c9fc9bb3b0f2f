use serde::{Deserialize, Deserializer, de};

use crate::errors::NormalizationError;
use crate::model::{Question, QuestionType};

/// Exact wire shape the prompt asks for. Unknown keys are a schema mismatch.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StrictQuestion {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "blank_as_missing")]
    kind: Option<QuestionType>,
    question: String,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    explanation: Option<String>,
}

impl From<StrictQuestion> for Question {
    fn from(q: StrictQuestion) -> Self {
        Question::with_defaults(q.id, q.kind, q.question, q.options, q.answer, q.explanation)
    }
}

/// A blank `type` counts as missing; any other value must be an exact type name.
fn blank_as_missing<'de, D>(deserializer: D) -> Result<Option<QuestionType>, D::Error>
where
    D: Deserializer<'de>,
{
    const NAMES: &[&str] = &["MCQ", "ONE_WORD", "PARAGRAPH"];

    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match raw.as_str() {
        "MCQ" => Ok(Some(QuestionType::Mcq)),
        "ONE_WORD" => Ok(Some(QuestionType::OneWord)),
        "PARAGRAPH" => Ok(Some(QuestionType::Paragraph)),
        s if s.trim().is_empty() => Ok(None),
        s => Err(<D::Error as de::Error>::unknown_variant(s, NAMES)),
    }
}

/// Decodes `candidate` as an array of exact-schema questions.
pub(super) fn decode(candidate: &str) -> Result<Vec<Question>, NormalizationError> {
    let records: Vec<StrictQuestion> =
        serde_json::from_str(candidate).map_err(NormalizationError::from_serde)?;
    Ok(records.into_iter().map(Question::from).collect())
}
