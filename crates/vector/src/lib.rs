//! ReviewRag vector search
//!
//! Exact nearest-neighbor index over embedded documents and the retrieval
//! engine that fills it from a corpus and answers free-text queries.

mod engine;
mod error;
mod index;
mod similarity;
mod types;

pub use engine::{EngineState, EngineStats, RetrievalEngine};
pub use error::{RetrievalError, VectorError};
pub use index::VectorIndex;
pub use reviewrag_common::DistanceMetric;
pub use similarity::{cosine_similarity, distance, euclidean_distance, squared_euclidean_distance};
pub use types::{round_distance, DocumentRecord, RecordId, SearchHit, SearchOptions};
