use std::env;
use secrecy::SecretString;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://www.googleapis.com";
pub const DEFAULT_SEARCH_RESULT_COUNT: u8 = 5;
pub const MAX_SEARCH_RESULT_COUNT: u8 = 10;

/// Settings for one generation lane.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub api_key: Option<SecretString>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub relax_safety: bool,
}

#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub api_key: Option<SecretString>,
    pub engine_id: Option<String>,
    pub base_url: String,
    pub result_count: u8,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub primary_provider: ProviderConfig,
    pub explanation_provider: ProviderConfig,
    pub search: SearchConfig,
    pub request_timeout_secs: u64,
    pub enrich_explanations: bool,
}

/// Clamps a requested search result count into the range the search API accepts.
pub fn clamp_result_count(count: u8) -> u8 {
    count.clamp(1, MAX_SEARCH_RESULT_COUNT)
}

fn secret_var(name: &str) -> Option<SecretString> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(SecretString::from)
}

fn flag_var(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

fn parsed_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        let gemini_base_url =
            env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());
        let provider_timeout_secs = parsed_var("PROVIDER_TIMEOUT_SECS", 20);
        let relax_safety = flag_var("GEMINI_RELAX_SAFETY", false);
        let primary_key = secret_var("GEMINI_API_KEY");

        Self {
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: parsed_var("WEB_SERVER_PORT", 8080),
            primary_provider: ProviderConfig {
                api_key: primary_key.clone(),
                model: env::var("GEMINI_MODEL")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
                base_url: gemini_base_url.clone(),
                timeout_secs: provider_timeout_secs,
                relax_safety,
            },
            explanation_provider: ProviderConfig {
                api_key: secret_var("GEMINI_EXPLANATION_API_KEY").or(primary_key),
                model: env::var("GEMINI_EXPLANATION_MODEL")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
                base_url: gemini_base_url,
                timeout_secs: provider_timeout_secs,
                relax_safety,
            },
            search: SearchConfig {
                api_key: secret_var("GOOGLE_SEARCH_API_KEY"),
                engine_id: env::var("GOOGLE_SEARCH_ENGINE_ID")
                    .ok()
                    .filter(|v| !v.trim().is_empty()),
                base_url: env::var("GOOGLE_SEARCH_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_SEARCH_BASE_URL.to_string()),
                result_count: clamp_result_count(parsed_var(
                    "SEARCH_RESULT_COUNT",
                    DEFAULT_SEARCH_RESULT_COUNT,
                )),
                timeout_secs: provider_timeout_secs,
            },
            request_timeout_secs: parsed_var("REQUEST_TIMEOUT_SECS", 25),
            enrich_explanations: flag_var("ENRICH_EXPLANATIONS", true),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if the primary generation lane has no credentials
    pub fn validate_for_production(&self) {
        if self.primary_provider.api_key.is_none() {
            panic!("FATAL: GEMINI_API_KEY is not set! Quiz generation cannot run without it.");
        }

        if self.request_timeout_secs == 0 {
            panic!("FATAL: REQUEST_TIMEOUT_SECS must be greater than zero.");
        }

        if self.search.api_key.is_none() || self.search.engine_id.is_none() {
            log::warn!(
                "GOOGLE_SEARCH_API_KEY or GOOGLE_SEARCH_ENGINE_ID is not set; quizzes will be generated without grounding"
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        let provider = ProviderConfig {
            api_key: Some(SecretString::from("test_gemini_key".to_string())),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
            relax_safety: false,
        };

        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            primary_provider: provider.clone(),
            explanation_provider: provider,
            search: SearchConfig {
                api_key: None,
                engine_id: None,
                base_url: "http://127.0.0.1:9".to_string(),
                result_count: DEFAULT_SEARCH_RESULT_COUNT,
                timeout_secs: 1,
            },
            request_timeout_secs: 25,
            enrich_explanations: false,
        }
    }
}
