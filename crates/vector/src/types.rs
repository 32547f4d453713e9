use serde::{Deserialize, Serialize};

use crate::error::RetrievalError;

/// Document identifier, the document's 0-based position in the corpus
pub type RecordId = usize;

/// One embedded document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    /// Stable identifier, unique within an index
    pub id: RecordId,

    /// Original document text
    pub text: String,

    /// Embedding of `text`
    pub vector: Vec<f32>,
}

/// Query-time knobs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Number of neighbors to fetch before filtering (>= 1)
    pub top_k: usize,

    /// Largest distance a hit may have (>= 0)
    pub distance_threshold: f32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            top_k: 5,
            distance_threshold: 1.3,
        }
    }
}

impl SearchOptions {
    pub fn new(top_k: usize, distance_threshold: f32) -> Self {
        Self {
            top_k,
            distance_threshold,
        }
    }

    pub fn validate(&self) -> Result<(), RetrievalError> {
        if self.top_k == 0 {
            return Err(RetrievalError::InvalidArgument(
                "top_k must be at least 1".to_string(),
            ));
        }
        if !self.distance_threshold.is_finite() || self.distance_threshold < 0.0 {
            return Err(RetrievalError::InvalidArgument(format!(
                "distance_threshold must be a finite number >= 0, got {}",
                self.distance_threshold
            )));
        }
        Ok(())
    }
}

/// A ranked search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// 1-based position in the filtered result list
    pub rank: usize,

    /// Distance to the query, rounded to 3 decimals
    pub distance: f32,

    /// Original document text
    pub text: String,
}

/// Round a distance to 3 decimal digits for presentation
pub fn round_distance(distance: f32) -> f32 {
    ((distance as f64 * 1000.0).round() / 1000.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_distance() {
        assert_eq!(round_distance(0.123456), 0.123);
        assert_eq!(round_distance(1.2996), 1.3);
        assert_eq!(round_distance(0.0), 0.0);
    }

    #[test]
    fn test_default_options() {
        let options = SearchOptions::default();
        assert_eq!(options.top_k, 5);
        assert_eq!(options.distance_threshold, 1.3);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_options() {
        assert!(SearchOptions::new(0, 1.0).validate().is_err());
        assert!(SearchOptions::new(3, -0.5).validate().is_err());
        assert!(SearchOptions::new(3, f32::INFINITY).validate().is_err());
        assert!(SearchOptions::new(1, 0.0).validate().is_ok());
    }
}
