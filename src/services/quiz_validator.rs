use serde_json::Value;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Question, QuizDocument},
};

const EXCERPT_CHARS: usize = 500;

/// Parses sanitized provider output, falling back to the empty document on any parse failure.
pub fn validate(candidate: &str) -> QuizDocument {
    match parse_document(candidate) {
        Ok(document) => {
            for (index, question) in document.questions.iter().enumerate() {
                for issue in question.structural_issues() {
                    log::warn!("Question {} failed structural check: {}", index + 1, issue);
                }
            }
            document
        }
        Err(e) => {
            log::error!("Error parsing quiz response: {}", e);
            log::error!("Raw response: {}", excerpt(candidate));
            QuizDocument::empty()
        }
    }
}

/// Accepts either `{"questions": [...]}` or a bare array of questions. Entries that cannot be
/// decoded as a question are dropped with a warning; the document fails only when nothing in it
/// decodes.
pub fn parse_document(candidate: &str) -> AppResult<QuizDocument> {
    let value: Value = serde_json::from_str(candidate)?;

    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut fields) => match fields.remove("questions") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(AppError::ParseError(
                    "Document has no questions array".to_string(),
                ))
            }
        },
        _ => {
            return Err(AppError::ParseError(
                "Document is neither an object nor an array".to_string(),
            ))
        }
    };

    let total = entries.len();
    let questions: Vec<Question> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(question) => Some(question),
            Err(e) => {
                log::warn!("Dropping question {}/{}: {}", index + 1, total, e);
                None
            }
        })
        .collect();

    if total > 0 && questions.is_empty() {
        return Err(AppError::ParseError(format!(
            "None of the {} questions could be decoded",
            total
        )));
    }

    Ok(QuizDocument::new(questions))
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(EXCERPT_CHARS).collect();
    format!("{}...", head)
}
