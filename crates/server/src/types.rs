use reviewrag_vector::SearchHit;
use serde::{Deserialize, Serialize};

/// Search form submission
#[derive(Debug, Deserialize)]
pub struct QueryForm {
    /// Free-text question
    #[serde(default)]
    pub query: String,
}

/// `/api/search` query string
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search query text
    #[serde(default)]
    pub q: String,

    /// Neighbors to fetch, server default when absent
    pub top_k: Option<usize>,

    /// Maximum distance, server default when absent
    pub threshold: Option<f32>,
}

/// `/api/search` response
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<SearchHit>,
}
