use std::{sync::Arc, time::Duration};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    services::{
        content_provider::{GeminiClient, ProviderLane},
        quiz_service::QuizService,
        search_provider::GoogleSearchClient,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        let primary = Arc::new(GeminiClient::new(
            http.clone(),
            config.primary_provider.clone(),
            ProviderLane::Primary,
        ));
        let explanation = Arc::new(GeminiClient::new(
            http.clone(),
            config.explanation_provider.clone(),
            ProviderLane::Explanation,
        ));
        let search = Arc::new(GoogleSearchClient::new(http, config.search.clone()));

        let quiz_service = Arc::new(QuizService::new(
            primary,
            explanation,
            search,
            config.search.result_count,
            Duration::from_secs(config.request_timeout_secs),
        ));

        Ok(Self::with_service(config, quiz_service))
    }

    pub fn with_service(config: Config, quiz_service: Arc<QuizService>) -> Self {
        Self {
            quiz_service,
            config: Arc::new(config),
        }
    }
}
