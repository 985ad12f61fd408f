//! Web-search capability used by the search-backed tools.

mod tavily;

pub use tavily::TavilyClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One search hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub url: String,
}

/// How much effort the provider spends per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchDepth {
    Basic,
    Advanced,
}

/// A search request.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub query: String,
    pub max_results: usize,
    pub depth: SearchDepth,
}

impl SearchQuery {
    /// Advanced-depth query, the depth every mentor tool uses.
    pub fn advanced(query: impl Into<String>, max_results: usize) -> Self {
        Self {
            query: query.into(),
            max_results,
            depth: SearchDepth::Advanced,
        }
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("search provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid search response: {0}")]
    InvalidResponse(String),
}

/// Trait for web-search providers.
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Run a query and return results in ranked order.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, SearchError>;
}
