use serde::Serialize;

use crate::models::domain::{QuestionType, QuizDocument};

#[derive(Debug, Serialize)]
pub struct GenerateQuizResponseDto {
    /// JSON-encoded `QuizDocument`.
    pub quiz: String,
    pub status: &'static str,
}

impl From<&QuizDocument> for GenerateQuizResponseDto {
    fn from(document: &QuizDocument) -> Self {
        GenerateQuizResponseDto {
            quiz: document.to_json_string(),
            status: "success",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionTypeDto {
    pub id: &'static str,
    pub value: &'static str,
    pub label: &'static str,
}

impl From<QuestionType> for QuestionTypeDto {
    fn from(question_type: QuestionType) -> Self {
        QuestionTypeDto {
            id: question_type.element_id(),
            value: question_type.as_str(),
            label: question_type.label(),
        }
    }
}
