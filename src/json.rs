//! CoreNLP JSON annotation schema.
//!
//! Only the fields the reconstructor reads are modelled; anything else in
//! the annotator's output is ignored on deserialisation.

use serde::{Deserialize, Serialize};

use crate::errors::AnnotationResult;

/// A JSON-annotated document: `{"sentences": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonDocument {
    pub sentences: Vec<JsonSentence>,
}

impl JsonDocument {
    pub fn from_json(json: &str) -> AnnotationResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSentence {
    /// Zero-based sentence index
    #[serde(default)]
    pub index: usize,
    /// Raw constituency parse, possibly pretty-printed over several lines
    #[serde(default)]
    pub parse: String,
    #[serde(default)]
    pub basic_dependencies: Vec<JsonDependency>,
    #[serde(default)]
    pub tokens: Vec<JsonToken>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonToken {
    /// One-based token index
    #[serde(default)]
    pub index: usize,
    /// Normalised form (`-LRB-` for `(`, etc.)
    pub word: String,
    /// Surface form as it appeared in the input
    pub original_text: String,
    pub character_offset_begin: usize,
    pub character_offset_end: usize,
    pub pos: String,
    pub lemma: String,
    pub ner: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonDependency {
    /// Relation label
    pub dep: String,
    /// One-based token id, `0` for ROOT
    pub governor: usize,
    pub governor_gloss: String,
    pub dependent: usize,
    pub dependent_gloss: String,
}
