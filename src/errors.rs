//! Error types for annotation parsing and loading.

use thiserror::Error;

/// Errors that can occur while reading annotations.
#[derive(Debug, Error)]
pub enum AnnotationError {
    /// The dump broke the one structural rule the parser enforces: the line
    /// after a sentence's raw text must open with `[Text=`.
    #[error("parse error at line {line}: could not find \"[Text=\" in: {text}")]
    Format { line: usize, text: String },

    /// The JSON annotations could not be decoded.
    #[error("invalid annotation JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Error reading an annotation file.
    #[error("failed to load annotations: {path}: {message}")]
    Load { path: String, message: String },
}

/// Result type for annotation operations.
pub type AnnotationResult<T> = Result<T, AnnotationError>;
