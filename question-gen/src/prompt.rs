//! Prompt builder for question generation.

use crate::options::GenerationOptions;

/// Schema the model is asked to follow, one object per question.
const QUESTION_SCHEMA: &str = r#"{"id": "unique_id", "type": "MCQ|ONE_WORD|PARAGRAPH", "question": "question text", "options": ["option1", "option2", "option3", "option4"] or null, "answer": "correct answer" or null, "explanation": "explanation text" or null}"#;

/// Builds the single user message sent to the model.
///
/// # Example
/// ```
/// # use question_gen::{build_prompt, GenerationOptions};
/// let prompt = build_prompt("Water boils at 100 °C.", &GenerationOptions::default());
/// assert!(prompt.starts_with("Based on the following text content, generate 5 medium questions about general"));
/// assert!(prompt.ends_with("Text content: Water boils at 100 °C."));
/// ```
pub fn build_prompt(text: &str, options: &GenerationOptions) -> String {
    format!(
        "Based on the following text content, generate {count} {difficulty} questions about {subject} \
         with {difficulty} difficulty level. \
         Respond with ONLY a strict JSON array (no markdown, no code fences) of objects where each object has: \
         {schema}. \
         For non-MCQ questions, set options to null. Use double quotes for all keys and string values. \
         Text content: {text}",
        count = options.prompt_count(),
        difficulty = options.difficulty,
        subject = options.subject,
        schema = QUESTION_SCHEMA,
        text = text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_options_and_schema() {
        let opts = GenerationOptions::new(Some("biology"), Some("hard"), Some(3));
        let p = build_prompt("Chloroplasts capture light.", &opts);

        assert!(p.contains("generate 3 hard questions about biology with hard difficulty level"));
        assert!(p.contains(r#""type": "MCQ|ONE_WORD|PARAGRAPH""#));
        assert!(p.contains("no markdown, no code fences"));
        assert!(p.ends_with("Text content: Chloroplasts capture light."));
    }

    #[test]
    fn is_deterministic() {
        let opts = GenerationOptions::default();
        assert_eq!(build_prompt("x", &opts), build_prompt("x", &opts));
    }
}
