use std::time::Duration;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::models::domain::QuizDocument;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Request timed out after {0:?}")]
    TimeoutExceeded(Duration),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Status label carried in the JSON body next to the error message.
    pub fn status_label(&self) -> &'static str {
        match self {
            AppError::TimeoutExceeded(_) => "timeout",
            _ => "error",
        }
    }

    /// Whether the caller should still receive the fallback quiz document.
    fn carries_fallback_quiz(&self) -> bool {
        matches!(
            self,
            AppError::ProviderError(_) | AppError::ParseError(_) | AppError::TimeoutExceeded(_)
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz: Option<String>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ProviderError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ParseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::TimeoutExceeded(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let quiz = self
            .carries_fallback_quiz()
            .then(|| QuizDocument::empty().to_json_string());

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            status: self.status_label(),
            quiz,
        })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL may carry credentials
        AppError::ProviderError(err.without_url().to_string())
    }
}
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::ParseError(err.to_string())
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::ValidationError("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::ProviderError("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::TimeoutExceeded(Duration::from_secs(25)).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::ValidationError("topic must not be empty".into());
        assert_eq!(err.to_string(), "Validation error: topic must not be empty");

        let err = AppError::TimeoutExceeded(Duration::from_secs(25));
        assert_eq!(err.to_string(), "Request timed out after 25s");

        let err = AppError::TimeoutExceeded(Duration::from_millis(50));
        assert_eq!(err.to_string(), "Request timed out after 50ms");
    }

    #[test]
    fn test_status_labels_distinguish_timeout() {
        assert_eq!(AppError::TimeoutExceeded(Duration::from_secs(1)).status_label(), "timeout");
        assert_eq!(AppError::ProviderError("x".into()).status_label(), "error");
        assert_eq!(AppError::ValidationError("x".into()).status_label(), "error");
    }

    #[actix_web::test]
    async fn test_provider_error_body_includes_empty_quiz() {
        let response = AppError::ProviderError("quota".into()).error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["status"], "error");
        assert_eq!(json["quiz"], r#"{"questions":[]}"#);
    }

    #[actix_web::test]
    async fn test_transport_error_message_omits_request_url() {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:9/v1beta/models?key=do_not_echo")
            .send()
            .await
            .unwrap_err();

        let app_err = AppError::from(err);
        assert!(matches!(app_err, AppError::ProviderError(_)));
        assert!(!app_err.to_string().contains("do_not_echo"));
        assert!(!app_err.to_string().contains("127.0.0.1:9"));
    }

    #[actix_web::test]
    async fn test_validation_error_body_has_no_quiz() {
        let response = AppError::ValidationError("bad".into()).error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["status"], "error");
        assert!(json.get("quiz").is_none());
    }
}
