//! Rebuilding the text dump from JSON annotations.
//!
//! Downstream code consumes the dump grammar only, so JSON-annotated
//! corpora are rendered back into it and then run through
//! [`parse_document`](crate::parse_document). The dependency section is
//! rendered in the annotator's collapsed style: prepositions and
//! coordinators are folded into the relation label.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::json::{JsonDependency, JsonDocument, JsonSentence};

/// Controls how basic dependencies are collapsed when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructOptions {
    /// Rewrite `prep` edges as `prep_<preposition>` pointing at the object
    pub collapse_prepositions: bool,
    /// Rewrite `conj` edges as `conj_<coordinator>`
    pub collapse_conjunctions: bool,
    /// Relations never emitted
    pub dropped_relations: Vec<String>,
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            collapse_prepositions: true,
            collapse_conjunctions: true,
            dropped_relations: vec!["cc".into(), "pobj".into()],
        }
    }
}

/// A dependency line ready to be written as `rel(gov-i, dep-j)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDependency {
    pub relation: String,
    pub governor_gloss: String,
    pub governor: usize,
    pub dependent_gloss: String,
    pub dependent: usize,
}

impl fmt::Display for RenderedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}-{}, {}-{})",
            self.relation, self.governor_gloss, self.governor, self.dependent_gloss, self.dependent
        )
    }
}

/// Apply the collapsing rules to a sentence's basic dependencies.
///
/// - `prep` becomes `prep_<gloss>` and is redirected to the token the
///   preposition governs. Without such an edge it stays a plain `prep`.
/// - `conj` becomes `conj_<coordinator>` using a `cc` edge hanging off
///   either endpoint. Without one the edge is dropped.
/// - relations in `dropped_relations` are not emitted.
pub fn collapse_dependencies(
    edges: &[JsonDependency],
    options: &ReconstructOptions,
) -> Vec<RenderedDependency> {
    let mut rendered = Vec::with_capacity(edges.len());

    for edge in edges {
        let mut relation = edge.dep.to_lowercase();
        let mut dependent = edge.dependent;
        let mut dependent_gloss = edge.dependent_gloss.clone();

        if options.dropped_relations.iter().any(|r| *r == relation) {
            continue;
        }

        if options.collapse_prepositions && relation == "prep" {
            match edges.iter().find(|e| e.governor == edge.dependent) {
                Some(object) => {
                    relation = format!("prep_{}", edge.dependent_gloss);
                    dependent = object.dependent;
                    dependent_gloss = object.dependent_gloss.clone();
                }
                None => log::debug!(
                    "no object under preposition {}-{}, keeping plain prep",
                    edge.dependent_gloss,
                    edge.dependent
                ),
            }
        } else if options.collapse_conjunctions && relation == "conj" {
            let coordinator = edges.iter().find(|e| {
                e.dep == "cc" && (e.governor == edge.dependent || e.governor == edge.governor)
            });
            match coordinator {
                Some(cc) => relation = format!("conj_{}", cc.dependent_gloss),
                None => {
                    log::debug!(
                        "no coordinator for conj({}-{}, {}-{}), dropping edge",
                        edge.governor_gloss,
                        edge.governor,
                        edge.dependent_gloss,
                        edge.dependent
                    );
                    continue;
                }
            }
        }

        rendered.push(RenderedDependency {
            relation,
            governor_gloss: edge.governor_gloss.clone(),
            governor: edge.governor,
            dependent_gloss,
            dependent,
        });
    }

    rendered
}

/// Render one sentence as a dump block, numbered `sent_num` (1-based).
pub fn reconstruct_sentence(
    sentence: &JsonSentence,
    sent_num: usize,
    options: &ReconstructOptions,
) -> String {
    let words: Vec<&str> = sentence.tokens.iter().map(|t| t.word.as_str()).collect();

    let mut features = String::new();
    for token in &sentence.tokens {
        features.push_str(&format!(
            "[Text={} CharacterOffsetBegin={} CharacterOffsetEnd={} PartOfSpeech={} Lemma={} NamedEntityTag={}] ",
            token.original_text,
            token.character_offset_begin,
            token.character_offset_end,
            token.pos,
            token.lemma,
            token.ner
        ));
    }

    let mut out = format!("Sentence #{} ({} tokens):\n", sent_num, words.len());
    out.push_str(&words.join(" "));
    out.push('\n');
    out.push_str(&features);
    out.push('\n');
    out.push_str(&sentence.parse);
    out.push_str("\n\n");
    for dependency in collapse_dependencies(&sentence.basic_dependencies, options) {
        out.push_str(&dependency.to_string());
        out.push('\n');
    }

    out
}

/// Render a sequence of sentences as one dump, numbering from 1.
pub fn reconstruct_sentences<'a, I>(sentences: I, options: &ReconstructOptions) -> String
where
    I: IntoIterator<Item = &'a JsonSentence>,
{
    sentences
        .into_iter()
        .enumerate()
        .map(|(i, sentence)| reconstruct_sentence(sentence, i + 1, options))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a whole document as a dump.
pub fn reconstruct_document(document: &JsonDocument, options: &ReconstructOptions) -> String {
    reconstruct_sentences(&document.sentences, options)
}

/// Collapse a (possibly pretty-printed) constituency parse onto one line.
pub fn flatten_parse(parse: &str) -> String {
    parse.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One flattened tree per line, in sentence order.
pub fn document_to_stp(document: &JsonDocument) -> String {
    let mut out = String::new();
    for sentence in &document.sentences {
        out.push_str(&flatten_parse(&sentence.parse));
        out.push('\n');
    }
    out
}
