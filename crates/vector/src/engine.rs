use chrono::{DateTime, Utc};
use reviewrag_common::DistanceMetric;
use reviewrag_embed::Embedder;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info};

use crate::error::RetrievalError;
use crate::index::VectorIndex;
use crate::types::{round_distance, SearchHit, SearchOptions};

/// Lifecycle of a [`RetrievalEngine`]
///
/// `Ingesting` is entered once. A failed ingestion leaves the engine there
/// with a partially filled index; later `ingest` calls see a non-empty
/// index and do nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Uninitialized,
    Ingesting,
    Ready,
}

/// Engine statistics
#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub documents: usize,
    pub dimension: Option<usize>,
    pub metric: DistanceMetric,
    pub model: String,
    pub state: EngineState,
    pub ready_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct Lifecycle {
    state: EngineState,
    ready_at: Option<DateTime<Utc>>,
}

/// Retrieval engine
///
/// Owns the vector index and the embedder it was constructed with.
/// Searches take a read lock on the index and may run concurrently.
pub struct RetrievalEngine {
    index: RwLock<VectorIndex>,
    embedder: Arc<dyn Embedder>,
    lifecycle: RwLock<Lifecycle>,
    /// Serializes the check-and-populate sequence of `ingest`
    ingest_lock: Mutex<()>,
}

impl RetrievalEngine {
    /// Create an engine over `index`. An already populated index starts `Ready`.
    pub fn new(index: VectorIndex, embedder: Arc<dyn Embedder>) -> Self {
        let lifecycle = if index.is_empty() {
            Lifecycle {
                state: EngineState::Uninitialized,
                ready_at: None,
            }
        } else {
            Lifecycle {
                state: EngineState::Ready,
                ready_at: Some(Utc::now()),
            }
        };

        info!(
            "Retrieval engine initialized - {} entries, metric={}, model={}",
            index.count(),
            index.metric(),
            embedder.model()
        );

        Self {
            index: RwLock::new(index),
            embedder,
            lifecycle: RwLock::new(lifecycle),
            ingest_lock: Mutex::new(()),
        }
    }

    /// Embed and index every document of `corpus`, using its position as id.
    ///
    /// Does nothing when the index already holds records. Stops at the first
    /// embedding failure, keeping the records inserted so far.
    ///
    /// Returns the number of records inserted.
    pub async fn ingest<S>(&self, corpus: &[S]) -> Result<usize, RetrievalError>
    where
        S: AsRef<str> + Sync,
    {
        let _guard = self.ingest_lock.lock().await;

        let existing = self.index.read().await.count();
        if existing > 0 {
            info!(
                "Index already holds {} documents, skipping ingestion",
                existing
            );
            return Ok(0);
        }

        self.lifecycle.write().await.state = EngineState::Ingesting;
        info!("Creating embeddings for {} documents...", corpus.len());

        for (id, text) in corpus.iter().enumerate() {
            let text = text.as_ref();

            let vector = self.embedder.embed(text).await.map_err(|e| {
                error!(
                    "Embedding failed for document {} of {}; index left with {} documents: {}",
                    id,
                    corpus.len(),
                    id,
                    e
                );
                e
            })?;

            self.index.write().await.insert(id, text, vector)?;
            debug!("Indexed document {}", id);
        }

        {
            let mut lifecycle = self.lifecycle.write().await;
            lifecycle.state = EngineState::Ready;
            lifecycle.ready_at = Some(Utc::now());
        }

        info!("Stored {} documents with embeddings", corpus.len());
        Ok(corpus.len())
    }

    /// Find documents similar to `query`.
    ///
    /// A blank query yields no hits without calling the embedder. Otherwise
    /// the `top_k` nearest documents within `distance_threshold` are
    /// returned, closest first, ranked from 1.
    pub async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchHit>, RetrievalError> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Empty query, returning no results");
            return Ok(Vec::new());
        }

        options.validate()?;

        debug!(
            "Searching for: {} (top_k={}, distance_threshold={})",
            query, options.top_k, options.distance_threshold
        );

        let query_vector = self.embedder.embed(query).await?;

        let index = self.index.read().await;
        let neighbors = index.nearest(&query_vector, options.top_k)?;
        let candidates = neighbors.len();

        let hits: Vec<SearchHit> = neighbors
            .into_iter()
            .filter(|(_, distance)| *distance <= options.distance_threshold)
            .enumerate()
            .map(|(i, (record, distance))| SearchHit {
                rank: i + 1,
                distance: round_distance(distance),
                text: record.text.clone(),
            })
            .collect();

        info!(
            "Search completed - {} results (filtered from {} candidates)",
            hits.len(),
            candidates
        );
        Ok(hits)
    }

    /// Number of indexed documents
    pub async fn count(&self) -> usize {
        self.index.read().await.count()
    }

    pub async fn state(&self) -> EngineState {
        self.lifecycle.read().await.state
    }

    pub fn embedding_model(&self) -> &str {
        self.embedder.model()
    }

    /// Get engine statistics
    pub async fn stats(&self) -> EngineStats {
        let index = self.index.read().await;
        let lifecycle = self.lifecycle.read().await;
        EngineStats {
            documents: index.count(),
            dimension: index.dimension(),
            metric: index.metric(),
            model: self.embedder.model().to_string(),
            state: lifecycle.state,
            ready_at: lifecycle.ready_at,
        }
    }
}
