//! Preparing alignment groups for the word aligner.
//!
//! The word aligner reads parsed dump records, while the corpora come with
//! JSON annotations. Each side of a group is therefore rendered into the
//! dump grammar and parsed back before alignment.

use layered_annotations::{
    parse_document, reconstruct_sentences, DocumentRecord, JsonSentence, ReconstructOptions,
};
use serde::{Deserialize, Serialize};

use crate::errors::GroupingResult;
use crate::grouper::AlignmentGroup;

/// A word in the source sentence group linked to a word in the target group.
///
/// Indices are positions in the group's concatenated token sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordLink {
    pub source: usize,
    pub target: usize,
}

impl WordLink {
    pub fn new(source: usize, target: usize) -> Self {
        Self { source, target }
    }
}

/// A monolingual word aligner.
pub trait Aligner {
    fn align(&self, source: &DocumentRecord, target: &DocumentRecord) -> Vec<WordLink>;
}

/// Both sides of a group as parsed records.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedGroup {
    pub source: DocumentRecord,
    pub target: DocumentRecord,
}

fn reparse(
    parses: &[JsonSentence],
    keep: usize,
    options: &ReconstructOptions,
) -> GroupingResult<DocumentRecord> {
    let text = reconstruct_sentences(parses, options);
    Ok(parse_document(&text)?.truncated(keep))
}

/// Render and reparse both sides of a group.
pub fn prepare_group<S>(
    group: &AlignmentGroup<S, JsonSentence>,
    options: &ReconstructOptions,
) -> GroupingResult<PreparedGroup> {
    Ok(PreparedGroup {
        source: reparse(&group.source_parses, group.source.len(), options)?,
        target: reparse(&group.target_parses, group.target.len(), options)?,
    })
}

/// Prepare every group and run the aligner once per group.
pub fn align_groups<S, A>(
    groups: &[AlignmentGroup<S, JsonSentence>],
    aligner: &A,
    options: &ReconstructOptions,
) -> GroupingResult<Vec<Vec<WordLink>>>
where
    A: Aligner + ?Sized,
{
    groups
        .iter()
        .map(|group| {
            let prepared = prepare_group(group, options)?;
            Ok(aligner.align(&prepared.source, &prepared.target))
        })
        .collect()
}
