use std::sync::Arc;

use crate::{
    config::clamp_result_count,
    models::domain::SearchContext,
    services::search_provider::SearchProvider,
};

/// Best-effort retrieval of grounding material for a topic.
pub struct ContextEnricher {
    provider: Arc<dyn SearchProvider>,
    result_count: u8,
}

impl ContextEnricher {
    pub fn new(provider: Arc<dyn SearchProvider>, result_count: u8) -> Self {
        Self {
            provider,
            result_count: clamp_result_count(result_count),
        }
    }

    pub fn result_count(&self) -> u8 {
        self.result_count
    }

    /// Never fails: any search error degrades to an empty context.
    pub async fn enrich(&self, topic: &str) -> SearchContext {
        match self.provider.search(topic, self.result_count).await {
            Ok(mut results) => {
                results.truncate(self.result_count as usize);
                log::info!("Retrieved {} search results for '{}'", results.len(), topic);
                SearchContext::from_results(&results)
            }
            Err(e) => {
                log::warn!("Search enrichment unavailable for '{}': {}", topic, e);
                SearchContext::empty()
            }
        }
    }
}
