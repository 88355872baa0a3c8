use serde::{Deserialize, Serialize};

use crate::models::domain::question::Reference;

/// One ranked hit returned by the search provider.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub source: String,
}

impl SearchResult {
    pub fn to_reference(&self) -> Reference {
        Reference {
            url: self.link.clone(),
            title: self.title.clone(),
            source: self.source.clone(),
        }
    }

    fn context_entry(&self) -> String {
        format!("Source: {}\nURL: {}\n{}\n", self.source, self.link, self.snippet)
    }
}

/// Retrieved grounding material for a single request. Never cached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchContext {
    pub context: String,
    pub references: Vec<Reference>,
}

impl SearchContext {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_results(results: &[SearchResult]) -> Self {
        Self {
            context: results
                .iter()
                .map(SearchResult::context_entry)
                .collect::<Vec<_>>()
                .join("\n"),
            references: results.iter().map(SearchResult::to_reference).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.context.trim().is_empty()
    }
}
