//! Error types for cdist timings

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BenchError>;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Shape mismatch: {left} columns vs {right} columns")]
    ShapeMismatch { left: usize, right: usize },

    #[error("No samples: {0}")]
    NoSamples(String),

    #[error("Zero duration: {0}")]
    ZeroDuration(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<String> for BenchError {
    fn from(s: String) -> Self {
        BenchError::Internal(s)
    }
}

impl From<&str> for BenchError {
    fn from(s: &str) -> Self {
        BenchError::Internal(s.to_string())
    }
}
