use reviewrag_embed::EmbedError;
use thiserror::Error;

use crate::types::RecordId;

/// Vector index failures. Both indicate an upstream defect and are never retried.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VectorError {
    #[error("vector: dimension mismatch: got {got}, want {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("vector: duplicate id {0}")]
    DuplicateId(RecordId),

    #[error("vector: empty vector")]
    EmptyVector,
}

/// Retrieval engine failures
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error(transparent)]
    Index(#[from] VectorError),

    #[error(transparent)]
    Embedding(#[from] EmbedError),

    #[error("retrieval: invalid argument: {0}")]
    InvalidArgument(String),
}
