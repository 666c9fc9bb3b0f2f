use std::fmt;

use serde::{Deserialize, Serialize};
use services::uuid::{fresh_id, is_blank_id};

/// Kind of quiz question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "MCQ")]
    Mcq,
    #[serde(rename = "ONE_WORD")]
    OneWord,
    #[serde(rename = "PARAGRAPH")]
    Paragraph,
}

impl QuestionType {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Mcq => "MCQ",
            QuestionType::OneWord => "ONE_WORD",
            QuestionType::Paragraph => "PARAGRAPH",
        }
    }

    /// MCQ when there is at least one option, PARAGRAPH otherwise.
    pub fn infer(options: Option<&[String]>) -> Self {
        match options {
            Some(opts) if !opts.is_empty() => QuestionType::Mcq,
            _ => QuestionType::Paragraph,
        }
    }

    /// Case-insensitive parse that also accepts `-` and spaces as separators
    /// (`"one word"`, `"One-Word"`). Returns `None` for anything else.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let norm: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();

        match norm.as_str() {
            "MCQ" => Some(QuestionType::Mcq),
            "ONE_WORD" => Some(QuestionType::OneWord),
            "PARAGRAPH" => Some(QuestionType::Paragraph),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single quiz question in the canonical schema.
///
/// Invariants: `id` is never blank; `kind` is always set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub question: String,
    pub options: Option<Vec<String>>,
    pub answer: Option<String>,
    pub explanation: Option<String>,
}

impl Question {
    /// Builds a question, filling a fresh id when `id` is blank and inferring
    /// the type from `options` when `kind` is missing.
    pub fn with_defaults(
        id: Option<String>,
        kind: Option<QuestionType>,
        question: String,
        options: Option<Vec<String>>,
        answer: Option<String>,
        explanation: Option<String>,
    ) -> Self {
        let id = match id {
            Some(id) if !is_blank_id(Some(&id)) => id,
            _ => fresh_id(),
        };
        let kind = kind.unwrap_or_else(|| QuestionType::infer(options.as_deref()));

        Self {
            id,
            kind,
            question,
            options,
            answer,
            explanation,
        }
    }

    /// Open-ended question with only a prompt.
    pub fn paragraph(question: impl Into<String>) -> Self {
        Self {
            id: fresh_id(),
            kind: QuestionType::Paragraph,
            question: question.into(),
            options: None,
            answer: None,
            explanation: None,
        }
    }
}

/// Which normalization tier produced a question list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionOrigin {
    /// Model output matched the schema as-is.
    Model,
    /// Model output was JSON in another shape and was mapped onto the schema.
    ModelRepaired,
    /// No usable JSON; questions were lifted from list lines in the text.
    Heuristic,
    /// Nothing usable at all; questions are fabricated samples.
    Placeholder,
}

impl QuestionOrigin {
    /// `true` when the questions were not written by the model.
    pub fn is_fabricated(self) -> bool {
        matches!(self, QuestionOrigin::Placeholder)
    }
}

/// Questions plus the tier that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub questions: Vec<Question>,
    pub origin: QuestionOrigin,
}

impl GenerationOutcome {
    pub fn new(questions: Vec<Question>, origin: QuestionOrigin) -> Self {
        Self { questions, origin }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_inference_follows_options() {
        assert_eq!(QuestionType::infer(None), QuestionType::Paragraph);
        assert_eq!(QuestionType::infer(Some(Vec::<String>::new().as_slice())), QuestionType::Paragraph);
        assert_eq!(
            QuestionType::infer(Some(&["a".to_string()][..])),
            QuestionType::Mcq
        );
    }

    #[test]
    fn lenient_type_parsing() {
        assert_eq!(QuestionType::parse_lenient("mcq"), Some(QuestionType::Mcq));
        assert_eq!(
            QuestionType::parse_lenient(" one word "),
            Some(QuestionType::OneWord)
        );
        assert_eq!(
            QuestionType::parse_lenient("One-Word"),
            Some(QuestionType::OneWord)
        );
        assert_eq!(QuestionType::parse_lenient("essay"), None);
        assert_eq!(QuestionType::parse_lenient(""), None);
    }

    #[test]
    fn defaults_fill_blank_id_and_missing_type() {
        let q = Question::with_defaults(
            Some("  ".into()),
            None,
            "Q?".into(),
            Some(vec!["a".into(), "b".into()]),
            None,
            None,
        );
        assert!(!q.id.trim().is_empty());
        assert_eq!(q.kind, QuestionType::Mcq);

        let kept = Question::with_defaults(
            Some("q-7".into()),
            Some(QuestionType::OneWord),
            "Capital of France?".into(),
            None,
            Some("Paris".into()),
            None,
        );
        assert_eq!(kept.id, "q-7");
        assert_eq!(kept.kind, QuestionType::OneWord);
    }

    #[test]
    fn serializes_with_canonical_field_names() {
        let q = Question {
            id: "1".into(),
            kind: QuestionType::OneWord,
            question: "Q".into(),
            options: None,
            answer: Some("A".into()),
            explanation: None,
        };
        let v = serde_json::to_value(&q).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "id": "1",
                "type": "ONE_WORD",
                "question": "Q",
                "options": null,
                "answer": "A",
                "explanation": null
            })
        );
        assert_eq!(
            serde_json::to_value(QuestionOrigin::ModelRepaired).unwrap(),
            "model_repaired"
        );
    }
}
