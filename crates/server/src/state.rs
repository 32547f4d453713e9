use reviewrag_common::{AppConfig, Result};
use reviewrag_vector::{RetrievalEngine, SearchOptions};
use std::sync::Arc;

use crate::render::Templates;

/// Shared application state
pub struct AppState {
    /// Retrieval engine, already ingested
    pub engine: Arc<RetrievalEngine>,

    /// Defaults for requests that don't override them
    pub search_options: SearchOptions,

    /// Page templates
    pub templates: Templates,
}

impl AppState {
    /// Create new application state
    pub fn new(config: &AppConfig, engine: Arc<RetrievalEngine>) -> Result<Self> {
        let templates = Templates::new()
            .map_err(|e| anyhow::anyhow!("Failed to load templates: {}", e))?;

        Ok(Self {
            engine,
            search_options: SearchOptions::new(config.top_k, config.distance_threshold),
            templates,
        })
    }
}
