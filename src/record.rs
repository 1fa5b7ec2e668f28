//! Structured records produced by the dump parser.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A parsed annotation document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Sentences in dump order
    pub sentences: Vec<SentenceRecord>,
    /// Coreference chains, `None` when the dump has no coreference section
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coref: Option<Vec<CorefChain>>,
}

impl DocumentRecord {
    /// Keep only the first `n` sentences.
    pub fn truncated(mut self, n: usize) -> Self {
        self.sentences.truncate(n);
        self
    }
}

/// One annotated sentence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentenceRecord {
    /// Raw sentence line
    pub text: Option<String>,
    /// Tokens with their feature attributes
    pub words: Vec<Word>,
    /// Constituency tree flattened onto one line
    pub parsetree: String,
    /// Dependency triples in dump order
    pub dependencies: Vec<Dependency>,
}

impl SentenceRecord {
    /// Surface forms of the tokens, `None` where a feature group had no `Text=`.
    pub fn surfaces(&self) -> Vec<Option<&str>> {
        self.words.iter().map(|w| w.text.as_deref()).collect()
    }
}

/// A token and its `key=value` features.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Value of the `Text` feature
    pub text: Option<String>,
    /// Every other feature
    pub attributes: BTreeMap<String, String>,
}

impl Word {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// A dependency triple such as `nsubj(sat-2, cat-1)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub relation: String,
    /// Governor descriptor, `surface-index`
    pub governor: String,
    /// Dependent descriptor, `surface-index`
    pub dependent: String,
}

impl Dependency {
    pub fn new(
        relation: impl Into<String>,
        governor: impl Into<String>,
        dependent: impl Into<String>,
    ) -> Self {
        Self {
            relation: relation.into(),
            governor: governor.into(),
            dependent: dependent.into(),
        }
    }

    /// Build from split fields; anything but exactly three is rejected.
    pub fn from_fields(fields: &[&str]) -> Option<Self> {
        match fields {
            [relation, governor, dependent] => Some(Self::new(*relation, *governor, *dependent)),
            _ => None,
        }
    }

    pub fn governor_node(&self) -> DependencyNode<'_> {
        DependencyNode::parse(&self.governor)
    }

    pub fn dependent_node(&self) -> DependencyNode<'_> {
        DependencyNode::parse(&self.dependent)
    }
}

/// A `surface-index` descriptor split into its parts.
///
/// The index is 1-based as written by the annotator; `0` is the artificial
/// ROOT node. Surfaces may themselves contain `-`, so the split happens at
/// the last dash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyNode<'a> {
    pub surface: &'a str,
    pub index: Option<usize>,
}

impl<'a> DependencyNode<'a> {
    pub fn parse(descriptor: &'a str) -> Self {
        match descriptor.rsplit_once('-') {
            Some((surface, index)) => match index.trim_end_matches('\'').parse() {
                Ok(index) => Self {
                    surface,
                    index: Some(index),
                },
                Err(_) => Self {
                    surface: descriptor,
                    index: None,
                },
            },
            None => Self {
                surface: descriptor,
                index: None,
            },
        }
    }
}

/// Mention pairs asserted to refer to the same entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorefChain {
    pub pairs: Vec<MentionPair>,
}

impl CorefChain {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// A `source -> sink` coreference link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionPair {
    pub source: Mention,
    pub sink: Mention,
}

/// A mention span. All indices are zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    pub text: String,
    pub sentence: usize,
    pub position: usize,
    pub span_left: usize,
    pub span_right: usize,
}
