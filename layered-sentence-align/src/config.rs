//! Preprocessing configuration, loaded from TOML.

use layered_annotations::ReconstructOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::correspondence::{identity_correspondences, Correspondence};
use crate::errors::{GroupingError, GroupingResult};

/// Top-level configuration.
///
/// ```toml
/// [reconstruct]
/// collapse_prepositions = true
/// collapse_conjunctions = true
/// dropped_relations = ["cc", "pobj"]
///
/// [grouping]
/// assume_identity = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignPrepConfig {
    /// How JSON dependencies are collapsed into the dump
    pub reconstruct: ReconstructOptions,
    pub grouping: GroupingOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingOptions {
    /// Pair sentences 1-to-1 when no correspondence file is given.
    pub assume_identity: bool,
}

impl Default for GroupingOptions {
    fn default() -> Self {
        Self {
            assume_identity: true,
        }
    }
}

impl AlignPrepConfig {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> GroupingResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| GroupingError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| GroupingError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// The correspondences to group by: the given ones, or 1-to-1 pairs
    /// when allowed.
    pub fn resolve_correspondences(
        &self,
        given: Option<Vec<Correspondence>>,
        source_len: usize,
        target_len: usize,
    ) -> GroupingResult<Vec<Correspondence>> {
        if let Some(given) = given {
            return Ok(given);
        }
        if !self.grouping.assume_identity {
            return Err(GroupingError::MissingCorrespondences);
        }
        if source_len != target_len {
            log::warn!(
                "assuming 1-to-1 alignment over {} source and {} target sentences",
                source_len,
                target_len
            );
        }
        Ok(identity_correspondences(source_len.min(target_len)))
    }
}
