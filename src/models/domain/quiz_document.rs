use serde::{Deserialize, Serialize};

use crate::models::domain::question::Question;

/// Serialized form of the canonical fallback document.
pub const EMPTY_QUIZ_JSON: &str = r#"{"questions":[]}"#;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizDocument {
    pub questions: Vec<Question>,
}

impl QuizDocument {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// The canonical fallback returned whenever generation or parsing fails.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| EMPTY_QUIZ_JSON.to_string())
    }
}
