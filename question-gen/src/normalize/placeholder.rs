use crate::model::{GenerationOutcome, Question, QuestionOrigin, QuestionType};
use services::uuid::fresh_id;

const OPTIONS: [&str; 4] = ["Option A", "Option B", "Option C", "Option D"];

/// `count` sample MCQ questions, numbered from 1.
pub fn questions(count: usize) -> Vec<Question> {
    (1..=count)
        .map(|i| Question {
            id: fresh_id(),
            kind: QuestionType::Mcq,
            question: format!("Sample question {i} based on the provided text?"),
            options: Some(OPTIONS.iter().map(|o| o.to_string()).collect()),
            answer: Some(OPTIONS[0].to_string()),
            explanation: Some(format!("This is a sample explanation for question {i}")),
        })
        .collect()
}

pub fn outcome(count: usize) -> GenerationOutcome {
    GenerationOutcome::new(questions(count), QuestionOrigin::Placeholder)
}
