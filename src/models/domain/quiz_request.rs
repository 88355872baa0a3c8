use std::collections::BTreeSet;

use crate::{
    errors::{AppError, AppResult},
    models::domain::question::QuestionType,
};

pub const MIN_QUESTIONS: u8 = 1;
pub const MAX_QUESTIONS: u8 = 20;
pub const DEFAULT_QUESTIONS: i64 = 5;

/// A validated, immutable quiz generation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizRequest {
    topic: String,
    question_count: u8,
    allowed_types: BTreeSet<QuestionType>,
}

impl QuizRequest {
    pub fn new(
        topic: &str,
        question_count: i64,
        allowed_types: impl IntoIterator<Item = QuestionType>,
    ) -> AppResult<Self> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(AppError::ValidationError("Topic must not be empty".to_string()));
        }

        let allowed_types: BTreeSet<QuestionType> = allowed_types.into_iter().collect();
        if allowed_types.is_empty() {
            return Err(AppError::ValidationError(
                "At least one question type is required".to_string(),
            ));
        }

        Ok(Self {
            topic: topic.to_string(),
            question_count: clamp_question_count(question_count),
            allowed_types,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn question_count(&self) -> u8 {
        self.question_count
    }

    pub fn allowed_types(&self) -> &BTreeSet<QuestionType> {
        &self.allowed_types
    }
}

pub fn clamp_question_count(requested: i64) -> u8 {
    requested.clamp(MIN_QUESTIONS as i64, MAX_QUESTIONS as i64) as u8
}
