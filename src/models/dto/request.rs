use serde::Deserialize;
use validator::Validate;

use crate::{
    errors::AppResult,
    models::domain::{quiz_request::DEFAULT_QUESTIONS, QuestionType, QuizRequest},
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuizRequestDto {
    #[validate(length(min = 1, max = 500))]
    pub topic: String,

    #[serde(default)]
    pub num_questions: Option<i64>,

    #[serde(default)]
    pub question_types: Option<Vec<String>>,

    #[serde(default)]
    pub include_explanations: Option<bool>,
}

impl GenerateQuizRequestDto {
    /// Validates the payload and builds the pipeline request. Unspecified types default to all
    /// five.
    pub fn into_quiz_request(self) -> AppResult<QuizRequest> {
        self.validate()?;

        let allowed_types = match self.question_types {
            Some(names) => names
                .iter()
                .map(|name| name.parse::<QuestionType>())
                .collect::<AppResult<Vec<_>>>()?,
            None => QuestionType::ALL.to_vec(),
        };

        QuizRequest::new(
            &self.topic,
            self.num_questions.unwrap_or(DEFAULT_QUESTIONS),
            allowed_types,
        )
    }
}
