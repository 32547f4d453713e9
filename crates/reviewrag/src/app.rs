//! Startup wiring shared by the `serve` and `query` commands

use anyhow::{Context, Result};
use reviewrag_common::{create_subset, load_corpus, AppConfig};
use reviewrag_embed::embedder_from_config;
use reviewrag_vector::{RetrievalEngine, SearchHit, VectorIndex};
use tracing::{info, warn};

/// Characters of each review shown on the console
const PREVIEW_CHARS: usize = 300;

/// Load the corpus, build the embedder and an ingested engine.
pub async fn build_engine(config: &AppConfig) -> Result<RetrievalEngine> {
    if !config.corpus_path.exists() {
        create_subset(
            &config.corpus_source_path,
            &config.corpus_path,
            config.corpus_limit,
        )?;
    }

    let corpus = load_corpus(&config.corpus_path, &config.corpus_column, config.corpus_limit)
        .with_context(|| format!("loading corpus from {}", config.corpus_path.display()))?;

    let embedder = embedder_from_config(config).context("building embedder")?;
    info!(
        "Embedding provider: {} ({})",
        config.embedding_provider,
        embedder.model()
    );

    let engine = RetrievalEngine::new(VectorIndex::new(config.distance_metric), embedder);
    engine.ingest(&corpus).await.context("ingesting corpus")?;

    let count = engine.count().await;
    if count != corpus.len() {
        warn!(
            "Index holds {} documents but the corpus has {}",
            count,
            corpus.len()
        );
    }

    Ok(engine)
}

/// Console rendering of search hits
pub fn format_hits(hits: &[SearchHit]) -> String {
    let mut out = format!("\nFound {} relevant reviews:\n\n", hits.len());

    if hits.is_empty() {
        out.push_str("No relevant reviews found for this query.\n");
        return out;
    }

    for hit in hits {
        let preview: String = hit.text.chars().take(PREVIEW_CHARS).collect();
        out.push_str(&format!("Rank {} | Distance: {:.3}\n", hit.rank, hit.distance));
        out.push_str(&preview);
        out.push_str(" \n---\n\n");
    }

    out
}
