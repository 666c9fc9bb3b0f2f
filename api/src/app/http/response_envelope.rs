use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use question_gen::{GenerationOutcome, Question, QuestionOrigin};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Response envelope of the generation endpoints, for success and error alike.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// `null` on error.
    pub questions: Option<Vec<Question>>,
    pub status: ResponseStatus,
    pub message: String,
    /// Which normalization tier produced `questions`; absent on error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<QuestionOrigin>,
}

impl GenerateResponse {
    pub fn success(outcome: GenerationOutcome) -> Self {
        Self {
            message: success_message(outcome.origin).to_string(),
            origin: Some(outcome.origin),
            questions: Some(outcome.questions),
            status: ResponseStatus::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            questions: None,
            status: ResponseStatus::Error,
            message: message.into(),
            origin: None,
        }
    }

    /// Convert to axum Response.
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for GenerateResponse {
    fn into_response(self) -> Response {
        let status = match self.status {
            ResponseStatus::Success => StatusCode::OK,
            ResponseStatus::Error => StatusCode::INTERNAL_SERVER_ERROR,
        };
        self.into_response_with_status(status)
    }
}

fn success_message(origin: QuestionOrigin) -> &'static str {
    match origin {
        QuestionOrigin::Model => "Questions generated successfully",
        QuestionOrigin::ModelRepaired => {
            "Questions generated successfully (model output was repaired)"
        }
        QuestionOrigin::Heuristic => {
            "Questions generated from unstructured model output"
        }
        QuestionOrigin::Placeholder => {
            "The model could not generate questions; returning sample questions"
        }
    }
}
