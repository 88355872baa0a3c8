use std::{fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    config::ProviderConfig,
    errors::{AppError, AppResult},
    models::domain::Reference,
    services::{context_enricher::ContextEnricher, prompt_synthesizer},
};

/// Google APIs accept the key as a header, which keeps it out of request URLs and error messages.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Which independently configured client a call goes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderLane {
    Primary,
    Explanation,
}

impl fmt::Display for ProviderLane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderLane::Primary => write!(f, "primary"),
            ProviderLane::Explanation => write!(f, "explanation"),
        }
    }
}

/// Result of one generation call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationResponse {
    Text(String),
    Blocked(String),
    Empty,
}

impl GenerationResponse {
    pub fn into_text(self) -> AppResult<String> {
        match self {
            GenerationResponse::Text(text) if !text.trim().is_empty() => Ok(text),
            GenerationResponse::Text(_) | GenerationResponse::Empty => Err(AppError::ProviderError(
                "Provider returned no text".to_string(),
            )),
            GenerationResponse::Blocked(reason) => Err(AppError::ProviderError(format!(
                "Provider blocked the response: {}",
                reason
            ))),
        }
    }
}

/// Header value for a Google API key, flagged sensitive so it is redacted from `Debug` output.
pub fn api_key_header(api_key: &SecretString) -> AppResult<HeaderValue> {
    let mut value = HeaderValue::from_str(api_key.expose_secret()).map_err(|_| {
        AppError::ProviderError("API key is not a valid header value".to_string())
    })?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> AppResult<GenerationResponse>;
}

#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(rename = "safetySettings", skip_serializing_if = "Vec::is_empty")]
    safety_settings: Vec<SafetySetting>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "promptFeedback", default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason", default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason", default)]
    block_reason: Option<String>,
}

impl From<GeminiResponse> for GenerationResponse {
    fn from(response: GeminiResponse) -> Self {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return GenerationResponse::Blocked(reason);
        }

        let Some(candidate) = response.candidates.into_iter().next() else {
            return GenerationResponse::Empty;
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if !text.is_empty() {
            return GenerationResponse::Text(text);
        }

        let finish_reason = candidate.finish_reason.unwrap_or_default();
        if matches!(
            finish_reason.as_str(),
            "SAFETY" | "BLOCKLIST" | "PROHIBITED_CONTENT"
        ) {
            GenerationResponse::Blocked(finish_reason)
        } else {
            GenerationResponse::Empty
        }
    }
}

/// Client for the Gemini `generateContent` endpoint. One instance per lane.
pub struct GeminiClient {
    http: reqwest::Client,
    config: ProviderConfig,
    lane: ProviderLane,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, config: ProviderConfig, lane: ProviderLane) -> Self {
        Self { http, config, lane }
    }

    pub fn lane(&self) -> ProviderLane {
        self.lane
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn request_body<'a>(&self, prompt: &'a str) -> GeminiRequest<'a> {
        let safety_settings = if self.config.relax_safety {
            HARM_CATEGORIES
                .into_iter()
                .map(|category| SafetySetting {
                    category,
                    threshold: "BLOCK_NONE",
                })
                .collect()
        } else {
            Vec::new()
        };

        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            safety_settings,
        }
    }

    fn build_request(&self, prompt: &str, api_key: &SecretString) -> AppResult<reqwest::Request> {
        let request = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key_header(api_key)?)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .json(&self.request_body(prompt))
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl ContentProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> AppResult<GenerationResponse> {
        let api_key = self.config.api_key.as_ref().ok_or_else(|| {
            AppError::ProviderError(format!("No API key configured for the {} lane", self.lane))
        })?;

        log::debug!(
            "Sending {} character prompt to {} on the {} lane",
            prompt.len(),
            self.config.model,
            self.lane
        );

        let request = self.build_request(prompt, api_key)?;
        let response = self.http.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ProviderError(format!(
                "Gemini API error {}: {}",
                status, body
            )));
        }

        let body: GeminiResponse = response.json().await?;
        Ok(GenerationResponse::from(body))
    }
}

/// Generated text together with the references it was grounded on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroundedText {
    pub text: String,
    pub references: Vec<Reference>,
}

/// Wraps a lane with the context enricher so callers can ask for topic-grounded generation.
pub struct GroundedGenerator {
    provider: Arc<dyn ContentProvider>,
    enricher: Arc<ContextEnricher>,
}

impl GroundedGenerator {
    pub fn new(provider: Arc<dyn ContentProvider>, enricher: Arc<ContextEnricher>) -> Self {
        Self { provider, enricher }
    }

    pub async fn generate(&self, prompt: &str) -> AppResult<String> {
        self.provider.generate(prompt).await?.into_text()
    }

    pub async fn generate_grounded(&self, prompt: &str, topic: &str) -> AppResult<GroundedText> {
        let context = self.enricher.enrich(topic).await;
        let grounded_prompt = prompt_synthesizer::with_grounding(prompt, &context);
        let text = self.generate(&grounded_prompt).await?;

        Ok(GroundedText {
            text,
            references: context.references,
        })
    }
}
