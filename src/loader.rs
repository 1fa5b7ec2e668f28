//! Annotation file loading.

use std::fs;
use std::path::Path;

use crate::errors::{AnnotationError, AnnotationResult};
use crate::json::JsonDocument;
use crate::record::DocumentRecord;
use crate::parse_document;

fn read(path: &Path) -> AnnotationResult<String> {
    fs::read_to_string(path).map_err(|e| AnnotationError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load and parse a text dump (`.out`).
pub fn load_dump(path: &Path) -> AnnotationResult<DocumentRecord> {
    parse_document(&read(path)?)
}

/// Load a JSON annotation file.
pub fn load_json(path: &Path) -> AnnotationResult<JsonDocument> {
    let content = read(path)?;
    serde_json::from_str(&content).map_err(|e| AnnotationError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load a plain sentence file, one sentence per line.
pub fn load_sentences(path: &Path) -> AnnotationResult<Vec<String>> {
    Ok(read(path)?.lines().map(str::to_string).collect())
}
