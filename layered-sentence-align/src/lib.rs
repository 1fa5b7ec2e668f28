#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Sentence split/join grouping for monolingual word alignment.
//!
//! Two versions of a text are annotated independently and end up segmented
//! differently. Before word alignment their sentences are grouped from
//! pairwise index correspondences into 1-1, split (1-n) and join (n-1)
//! groups. Each group is then turned back into parsed annotation records
//! for an external [`Aligner`].
//!
//! ## Modules
//!
//! - [`correspondence`] - Reading `source<TAB>target` index pairs
//! - [`grouper`] - Folding correspondences into alignment groups
//! - [`prepare`] - Reparsing group annotations and invoking the aligner
//! - [`config`] - TOML configuration
//! - [`errors`] - Error types

pub mod config;
pub mod correspondence;
pub mod errors;
pub mod grouper;
pub mod prepare;

pub use config::{AlignPrepConfig, GroupingOptions};
pub use correspondence::{
    identity_correspondences, load_correspondences, parse_correspondences, Correspondence,
};
pub use errors::{GroupingError, GroupingResult, Side};
pub use grouper::{group_sentence_alignments, AlignmentGroup, GroupIndexMaps, GroupKind};
pub use prepare::{align_groups, prepare_group, Aligner, PreparedGroup, WordLink};

#[cfg(test)]
mod tests {
    mod grouping;
    mod pipeline;
}
