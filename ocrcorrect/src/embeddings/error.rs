//! Error types for embedding-model loading.

use smol_str::SmolStr;

/// Errors raised while loading or writing an embedding model.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EmbeddingError {
    /// Underlying I/O failure while reading or writing the model file.
    #[error("failed to read embedding model")]
    Io(#[from] std::io::Error),

    /// A record in the textual model format could not be parsed.
    #[error("malformed vector record on line {line}: {reason}")]
    Parse {
        /// 1-based line number of the offending record.
        line: usize,
        /// What was wrong with the record.
        reason: String,
    },

    /// A vector did not match the dimensionality of the model.
    #[error("vector for {word:?} has {found} dimensions, expected {expected}")]
    DimensionMismatch {
        /// The word whose vector was rejected.
        word: SmolStr,
        /// Dimensionality declared by the model.
        expected: usize,
        /// Dimensionality actually found.
        found: usize,
    },

    /// The binary cache file was truncated or structurally invalid.
    #[error("invalid cache file: {0}")]
    BadCache(&'static str),

    /// The store exceeds a fixed-width field of the cache format.
    #[error("model does not fit the cache format: {0}")]
    CacheLimit(&'static str),

    /// The model contained no vectors at all.
    #[error("embedding model contains no vectors")]
    Empty,
}
