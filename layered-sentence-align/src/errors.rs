//! Error types for sentence grouping and group preparation.

use layered_annotations::AnnotationError;
use thiserror::Error;

/// Which side of the alignment a sentence belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Target => write!(f, "target"),
        }
    }
}

/// Errors that can occur while grouping sentences.
#[derive(Debug, Error)]
pub enum GroupingError {
    /// Sentences and their parses are not parallel.
    #[error("{side}: {sentences} sentences but {parses} parses")]
    LengthMismatch {
        side: Side,
        sentences: usize,
        parses: usize,
    },

    /// A correspondence names a sentence that does not exist.
    #[error("{side} sentence index {index} out of range (have {len})")]
    IndexOutOfRange { side: Side, index: usize, len: usize },

    /// A line of the correspondence file is not two tab-separated indices.
    #[error("bad correspondence at line {line}: {text:?}")]
    Correspondence { line: usize, text: String },

    /// No correspondences were given and 1-to-1 pairing is disabled.
    #[error("no sentence correspondences given and assume_identity is off")]
    MissingCorrespondences,

    /// Reading or reparsing annotations failed.
    #[error(transparent)]
    Annotation(#[from] AnnotationError),

    /// The configuration file could not be read or parsed.
    #[error("failed to load config: {path}: {message}")]
    Config { path: String, message: String },
}

/// Result type for grouping operations.
pub type GroupingResult<T> = Result<T, GroupingError>;
