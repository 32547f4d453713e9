use crate::error::ReviewRagError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which backend turns text into vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// OpenAI-compatible `/embeddings` endpoint
    OpenAi,
    /// Local Ollama server
    Ollama,
    /// Deterministic SHA-256 vectors, no network
    Hash,
}

impl FromStr for EmbeddingProvider {
    type Err = ReviewRagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "ollama" => Ok(Self::Ollama),
            "hash" => Ok(Self::Hash),
            other => Err(ReviewRagError::config(format!(
                "Unknown embedding provider '{}' (expected openai, ollama or hash)",
                other
            ))),
        }
    }
}

impl fmt::Display for EmbeddingProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OpenAi => "openai",
            Self::Ollama => "ollama",
            Self::Hash => "hash",
        };
        f.write_str(name)
    }
}

/// Distance used to rank documents against a query
///
/// Serialized with the same names `DISTANCE_METRIC` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// Euclidean (L2) distance
    #[default]
    #[serde(rename = "l2", alias = "euclidean")]
    Euclidean,
    /// Squared L2, the native space of most hosted vector stores
    #[serde(rename = "l2sq", alias = "squared_euclidean")]
    SquaredEuclidean,
    /// 1 - cosine similarity
    #[serde(rename = "cosine")]
    Cosine,
}

impl FromStr for DistanceMetric {
    type Err = ReviewRagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "l2" | "euclidean" => Ok(Self::Euclidean),
            "l2sq" | "squared_euclidean" => Ok(Self::SquaredEuclidean),
            "cosine" => Ok(Self::Cosine),
            other => Err(ReviewRagError::config(format!(
                "Unknown distance metric '{}' (expected l2, l2sq or cosine)",
                other
            ))),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Euclidean => "l2",
            Self::SquaredEuclidean => "l2sq",
            Self::Cosine => "cosine",
        };
        f.write_str(name)
    }
}

/// ReviewRag application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Embedding backend
    pub embedding_provider: EmbeddingProvider,

    /// OpenAI API key
    #[serde(skip_serializing)]
    pub openai_api_key: Option<String>,

    /// OpenAI-compatible API base URL
    pub openai_base_url: String,

    /// Ollama API base URL
    pub ollama_base_url: String,

    /// Embedding model name
    pub embedding_model: String,

    /// Output dimension of the hash embedder
    pub embedding_dim: usize,

    /// Per-request embedding timeout in seconds
    pub embed_timeout_secs: u64,

    /// Retries for transport/timeout failures
    pub embed_max_retries: u32,

    /// Distance metric of the vector index
    pub distance_metric: DistanceMetric,

    /// Full review dump the subset is cut from
    pub corpus_source_path: PathBuf,

    /// Corpus CSV that gets indexed
    pub corpus_path: PathBuf,

    /// CSV column holding the review text
    pub corpus_column: String,

    /// Maximum number of documents to index
    pub corpus_limit: usize,

    /// Default number of neighbors per query
    pub top_k: usize,

    /// Default maximum distance of a returned hit
    pub distance_threshold: f32,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            embedding_provider: EmbeddingProvider::OpenAi,
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            embedding_dim: 64,
            embed_timeout_secs: 30,
            embed_max_retries: 3,
            distance_metric: DistanceMetric::Euclidean,
            corpus_source_path: PathBuf::from("./data/Reviews.csv"),
            corpus_path: PathBuf::from("./data/small_reviews.csv"),
            corpus_column: "Text".to_string(),
            corpus_limit: 100,
            top_k: 5,
            distance_threshold: 1.3,
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    ///
    /// Call [`AppConfig::validate`] before using it for retrieval.
    pub fn from_env() -> Result<Self, ReviewRagError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();

        let config = Self {
            embedding_provider: match std::env::var("EMBEDDING_PROVIDER") {
                Ok(value) => value.parse()?,
                Err(_) => defaults.embedding_provider,
            },
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or(defaults.openai_base_url),
            ollama_base_url: std::env::var("OLLAMA_BASE_URL")
                .unwrap_or(defaults.ollama_base_url),
            embedding_model: std::env::var("EMBEDDING_MODEL")
                .unwrap_or(defaults.embedding_model),
            embedding_dim: Self::get_env_parsed("EMBEDDING_DIM")
                .unwrap_or(defaults.embedding_dim),
            embed_timeout_secs: Self::get_env_parsed("EMBED_TIMEOUT_SECS")
                .unwrap_or(defaults.embed_timeout_secs),
            embed_max_retries: Self::get_env_parsed("EMBED_MAX_RETRIES")
                .unwrap_or(defaults.embed_max_retries),
            distance_metric: match std::env::var("DISTANCE_METRIC") {
                Ok(value) => value.parse()?,
                Err(_) => defaults.distance_metric,
            },
            corpus_source_path: Self::get_env_path("CORPUS_SOURCE_PATH")
                .unwrap_or(defaults.corpus_source_path),
            corpus_path: Self::get_env_path("CORPUS_PATH")
                .unwrap_or(defaults.corpus_path),
            corpus_column: std::env::var("CORPUS_COLUMN")
                .unwrap_or(defaults.corpus_column),
            corpus_limit: Self::get_env_parsed("CORPUS_LIMIT")
                .unwrap_or(defaults.corpus_limit),
            top_k: Self::get_env_parsed("TOP_K").unwrap_or(defaults.top_k),
            distance_threshold: Self::get_env_parsed("DISTANCE_THRESHOLD")
                .unwrap_or(defaults.distance_threshold),
            server_host: std::env::var("SERVER_HOST")
                .unwrap_or(defaults.server_host),
            server_port: Self::get_env_parsed("SERVER_PORT")
                .unwrap_or(defaults.server_port),
            log_dir: Self::get_env_path("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        Ok(config)
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        std::env::var(key).ok().map(PathBuf::from)
    }

    /// Get a parsed value from environment variable, ignoring unparsable input
    fn get_env_parsed<T: FromStr>(key: &str) -> Option<T> {
        std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ReviewRagError> {
        if self.top_k == 0 {
            return Err(ReviewRagError::config("TOP_K must be at least 1"));
        }

        if !self.distance_threshold.is_finite() || self.distance_threshold < 0.0 {
            return Err(ReviewRagError::config(
                "DISTANCE_THRESHOLD must be a finite number >= 0",
            ));
        }

        if self.corpus_limit == 0 {
            return Err(ReviewRagError::config("CORPUS_LIMIT must be at least 1"));
        }

        if self.server_port == 0 {
            return Err(ReviewRagError::config("Server port cannot be 0"));
        }

        match self.embedding_provider {
            EmbeddingProvider::OpenAi => {
                if self.openai_api_key.is_none() {
                    return Err(ReviewRagError::config(
                        "OPENAI_API_KEY is required for the openai embedding provider",
                    ));
                }
                Self::check_url("OpenAI base URL", &self.openai_base_url)?;
            }
            EmbeddingProvider::Ollama => {
                Self::check_url("Ollama base URL", &self.ollama_base_url)?;
            }
            EmbeddingProvider::Hash => {
                if self.embedding_dim == 0 {
                    return Err(ReviewRagError::config("EMBEDDING_DIM cannot be 0"));
                }
            }
        }

        Ok(())
    }

    fn check_url(name: &str, url: &str) -> Result<(), ReviewRagError> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ReviewRagError::config(format!(
                "{} must start with http:// or https://",
                name
            )));
        }
        Ok(())
    }
}
