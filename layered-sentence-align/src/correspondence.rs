//! Sentence index correspondences.
//!
//! The correspondence file holds one `source<TAB>target` pair of zero-based
//! sentence indices per line, as written by the sentence aligner.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::{GroupingError, GroupingResult};

/// A source sentence paired with a target sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Correspondence {
    pub source: usize,
    pub target: usize,
}

impl Correspondence {
    pub fn new(source: usize, target: usize) -> Self {
        Self { source, target }
    }
}

impl From<(usize, usize)> for Correspondence {
    fn from((source, target): (usize, usize)) -> Self {
        Self::new(source, target)
    }
}

/// Parse correspondence lines. Blank lines are skipped.
pub fn parse_correspondences(input: &str) -> GroupingResult<Vec<Correspondence>> {
    let mut correspondences = Vec::new();

    for (line_num, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let bad = || GroupingError::Correspondence {
            line: line_num + 1,
            text: line.to_string(),
        };

        let mut fields = trimmed.split('\t');
        let (source, target) = match (fields.next(), fields.next(), fields.next()) {
            (Some(source), Some(target), None) => (source.trim(), target.trim()),
            _ => return Err(bad()),
        };

        correspondences.push(Correspondence {
            source: source.parse().map_err(|_| bad())?,
            target: target.parse().map_err(|_| bad())?,
        });
    }

    Ok(correspondences)
}

/// Read a correspondence file.
pub fn load_correspondences(path: &Path) -> GroupingResult<Vec<Correspondence>> {
    let content = fs::read_to_string(path).map_err(|e| {
        GroupingError::Annotation(layered_annotations::AnnotationError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    })?;
    parse_correspondences(&content)
}

/// `0-0, 1-1, ...` for the first `n` sentences.
pub fn identity_correspondences(n: usize) -> Vec<Correspondence> {
    (0..n).map(|i| Correspondence::new(i, i)).collect()
}
