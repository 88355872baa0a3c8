pub mod content_provider;
pub mod context_enricher;
pub mod explanation_enricher;
pub mod prompt_synthesizer;
pub mod quiz_service;
pub mod quiz_validator;
pub mod response_sanitizer;
pub mod search_provider;
