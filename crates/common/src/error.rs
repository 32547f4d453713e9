/// ReviewRag error types
#[derive(Debug, thiserror::Error)]
pub enum ReviewRagError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Corpus loading error (bad header, missing column, ...)
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReviewRagError {
    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create corpus error
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        Self::Corpus(msg.into())
    }

    /// Create not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ReviewRagError::config("bad port").to_string(),
            "Configuration error: bad port"
        );
        assert_eq!(
            ReviewRagError::not_found("data/Reviews.csv").to_string(),
            "Not found: data/Reviews.csv"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ReviewRagError = io.into();
        assert!(matches!(err, ReviewRagError::Io(_)));
    }
}
