use std::path::PathBuf;

/// Errors raised by the retrieval engine and its collaborators.
///
/// Scoring never returns these to callers; the ranker degrades to word
/// overlap instead. They surface only from construction and I/O boundaries.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid pattern for category {category}: {source}")]
    InvalidPattern {
        category: String,
        #[source]
        source: regex::Error,
    },

    #[error("vectorizer has not been fitted")]
    Untrained,

    #[error("vector dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("non-finite score for document {index}")]
    NonFiniteScore { index: usize },
}

impl RetrievalError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RetrievalError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RetrievalError>;
