//! Grouping of sentence correspondences into split/join groups.
//!
//! Two annotation pipelines rarely segment a text the same way: one side may
//! split a sentence the other keeps whole, or join two. Given pairwise index
//! correspondences between the two sentence streams, this module folds them
//! into ordered groups that are each 1-1, 1-n (split) or n-1 (join).
//!
//! Many-to-many groups have no well-defined word alignment, so they are
//! never built:
//!
//! ```text
//! (0,0) (0,1)        -> {0} : {0,1}      split
//! (0,0) (1,0)        -> {0,1} : {0}      join
//! (0,0) (0,1) (1,1)  -> {1} : {1}        new singleton before {0} : {0,1}
//! (0,0) (1,0) (0,1)  -> (0,1) dropped    split onto a join
//! (0,0) (1,1) (0,1)  -> (0,1) dropped    both sides already grouped
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::correspondence::Correspondence;
use crate::errors::{GroupingError, GroupingResult, Side};

/// Shape of an alignment group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupKind {
    /// One source sentence, one target sentence
    OneToOne,
    /// One source sentence split into several target sentences
    Split,
    /// Several source sentences joined into one target sentence
    Join,
}

/// Source and target sentences that align as a unit, with their parses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentGroup<S, P> {
    /// Indices into the source list, in correspondence order
    pub source_indices: Vec<usize>,
    pub source: Vec<S>,
    pub source_parses: Vec<P>,
    /// Indices into the target list, in correspondence order
    pub target_indices: Vec<usize>,
    pub target: Vec<S>,
    pub target_parses: Vec<P>,
}

impl<S, P> AlignmentGroup<S, P> {
    pub fn kind(&self) -> GroupKind {
        match (self.source.len(), self.target.len()) {
            (1, n) if n > 1 => GroupKind::Split,
            (n, 1) if n > 1 => GroupKind::Join,
            _ => GroupKind::OneToOne,
        }
    }

    /// `(source, source_parses, target, target_parses)`.
    pub fn into_parts(self) -> (Vec<S>, Vec<P>, Vec<S>, Vec<P>) {
        (self.source, self.source_parses, self.target, self.target_parses)
    }
}

impl<S: Clone, P: Clone> AlignmentGroup<S, P> {
    fn singleton(inputs: &Inputs<'_, S, P>, pair: Correspondence) -> Self {
        Self {
            source_indices: vec![pair.source],
            source: vec![inputs.source[pair.source].clone()],
            source_parses: vec![inputs.source_parses[pair.source].clone()],
            target_indices: vec![pair.target],
            target: vec![inputs.target[pair.target].clone()],
            target_parses: vec![inputs.target_parses[pair.target].clone()],
        }
    }

    fn push_source(&mut self, inputs: &Inputs<'_, S, P>, index: usize) {
        self.source_indices.push(index);
        self.source.push(inputs.source[index].clone());
        self.source_parses.push(inputs.source_parses[index].clone());
    }

    fn push_target(&mut self, inputs: &Inputs<'_, S, P>, index: usize) {
        self.target_indices.push(index);
        self.target.push(inputs.target[index].clone());
        self.target_parses.push(inputs.target_parses[index].clone());
    }
}

/// Sentence index -> group index, for both sides.
///
/// Only lives for the duration of one grouping call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupIndexMaps {
    source: HashMap<usize, usize>,
    target: HashMap<usize, usize>,
}

impl GroupIndexMaps {
    pub fn source_group(&self, index: usize) -> Option<usize> {
        self.source.get(&index).copied()
    }

    pub fn target_group(&self, index: usize) -> Option<usize> {
        self.target.get(&index).copied()
    }

    fn assign(&mut self, pair: Correspondence, group: usize) {
        self.source.insert(pair.source, group);
        self.target.insert(pair.target, group);
    }

    /// Account for a group inserted at `position`.
    fn shift_from(&mut self, position: usize) {
        for group in self.source.values_mut().chain(self.target.values_mut()) {
            if *group >= position {
                *group += 1;
            }
        }
    }
}

struct Inputs<'a, S, P> {
    source: &'a [S],
    source_parses: &'a [P],
    target: &'a [S],
    target_parses: &'a [P],
}

impl<S, P> Inputs<'_, S, P> {
    fn validate(&self) -> GroupingResult<()> {
        if self.source.len() != self.source_parses.len() {
            return Err(GroupingError::LengthMismatch {
                side: Side::Source,
                sentences: self.source.len(),
                parses: self.source_parses.len(),
            });
        }
        if self.target.len() != self.target_parses.len() {
            return Err(GroupingError::LengthMismatch {
                side: Side::Target,
                sentences: self.target.len(),
                parses: self.target_parses.len(),
            });
        }
        Ok(())
    }

    fn check(&self, pair: Correspondence) -> GroupingResult<()> {
        if pair.source >= self.source.len() {
            return Err(GroupingError::IndexOutOfRange {
                side: Side::Source,
                index: pair.source,
                len: self.source.len(),
            });
        }
        if pair.target >= self.target.len() {
            return Err(GroupingError::IndexOutOfRange {
                side: Side::Target,
                index: pair.target,
                len: self.target.len(),
            });
        }
        Ok(())
    }
}

/// Fold state: the maps plus the groups built so far.
struct Grouping<S, P> {
    maps: GroupIndexMaps,
    groups: Vec<AlignmentGroup<S, P>>,
}

impl<S: Clone, P: Clone> Grouping<S, P> {
    fn apply(mut self, inputs: &Inputs<'_, S, P>, pair: Correspondence) -> GroupingResult<Self> {
        inputs.check(pair)?;

        match (
            self.maps.source_group(pair.source),
            self.maps.target_group(pair.target),
        ) {
            // split, unless the group is already a join
            (Some(group), None) => {
                if self.groups[group].source.len() > 1 {
                    log::debug!(
                        "{}-{}: source already joined in group {}, dropping many-to-many correspondence",
                        pair.source,
                        pair.target,
                        group
                    );
                } else {
                    self.groups[group].push_target(inputs, pair.target);
                    self.maps.target.insert(pair.target, group);
                }
            }
            // join, unless the group already has several sentences on either side
            (None, Some(group)) => {
                let existing = &self.groups[group];
                if existing.source.len() > 1 || existing.target.len() > 1 {
                    self.insert_singleton(inputs, pair, group);
                } else {
                    self.groups[group].push_source(inputs, pair.source);
                    self.maps.source.insert(pair.source, group);
                }
            }
            (None, None) => {
                let group = self.groups.len();
                self.groups.push(AlignmentGroup::singleton(inputs, pair));
                self.maps.assign(pair, group);
            }
            (Some(_), Some(_)) => {
                log::debug!(
                    "{}-{}: both sentences already grouped, dropping many-to-many correspondence",
                    pair.source,
                    pair.target
                );
            }
        }

        Ok(self)
    }

    /// Start a group for `pair` at `position` instead of growing the group
    /// there into a many-to-many one.
    fn insert_singleton(
        &mut self,
        inputs: &Inputs<'_, S, P>,
        pair: Correspondence,
        position: usize,
    ) {
        log::debug!(
            "{}-{}: extending group {} would make it many-to-many, starting a new group",
            pair.source,
            pair.target,
            position
        );
        self.maps.shift_from(position);
        self.groups
            .insert(position, AlignmentGroup::singleton(inputs, pair));
        self.maps.assign(pair, position);
    }
}

/// Group sentences by their correspondences.
///
/// `source_parses` and `target_parses` run parallel to `source` and
/// `target`. Groups come back in order of first appearance, except that a
/// group started to avoid a many-to-many group is placed just before the
/// group it would otherwise have extended.
///
/// A correspondence that would split a joined source sentence is dropped,
/// so each source index lands in at most one group. A refused join starts
/// a singleton group instead, so a target index can appear in two groups.
pub fn group_sentence_alignments<S, P>(
    source: &[S],
    source_parses: &[P],
    target: &[S],
    target_parses: &[P],
    correspondences: &[Correspondence],
) -> GroupingResult<Vec<AlignmentGroup<S, P>>>
where
    S: Clone,
    P: Clone,
{
    let inputs = Inputs {
        source,
        source_parses,
        target,
        target_parses,
    };
    inputs.validate()?;

    let initial = Grouping {
        maps: GroupIndexMaps::default(),
        groups: Vec::new(),
    };
    let grouping = correspondences
        .iter()
        .try_fold(initial, |grouping, pair| grouping.apply(&inputs, *pair))?;

    Ok(grouping.groups)
}
