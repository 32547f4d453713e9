pub mod config;
pub mod corpus;
pub mod error;
pub mod logger;

// Re-export commonly used types
pub use config::{AppConfig, DistanceMetric, EmbeddingProvider};
pub use corpus::{create_subset, load_corpus, SubsetOutcome};
pub use error::ReviewRagError;
pub type Result<T> = std::result::Result<T, ReviewRagError>;
