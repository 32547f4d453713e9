use actix_web::web;
use reviewrag_common::{AppConfig, DistanceMetric, EmbeddingProvider};
use reviewrag_embed::HashEmbedder;
use reviewrag_vector::{RetrievalEngine, VectorIndex};
use std::sync::Arc;

use crate::state::AppState;

pub const REVIEWS: [&str; 3] = ["great taste", "too salty", "<i>excellent</i> value"];

/// State over an engine ingested with `REVIEWS` using 2-d hash vectors
pub async fn ingested_state() -> web::Data<AppState> {
    let config = AppConfig {
        embedding_provider: EmbeddingProvider::Hash,
        embedding_dim: 2,
        ..AppConfig::default()
    };

    let engine = RetrievalEngine::new(
        VectorIndex::new(DistanceMetric::Euclidean),
        Arc::new(HashEmbedder::new(config.embedding_dim)),
    );
    engine.ingest(&REVIEWS).await.unwrap();

    web::Data::new(AppState::new(&config, Arc::new(engine)).unwrap())
}
