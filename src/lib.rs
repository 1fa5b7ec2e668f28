#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Annotation preprocessing for monolingual word alignment.
//!
//! The aligner consumes per-sentence records built from a CoreNLP-style
//! text dump. This crate reads that dump and rebuilds it from JSON
//! annotations, so both annotation sources end up in the same shape.
//!
//! ## Modules
//!
//! - [`attributes`] - Decodes `[Text=... key=value ...]` feature groups
//! - [`dump_parser`] - State machine over the text dump
//! - [`json`] - The JSON annotation schema
//! - [`reconstruct`] - Renders JSON annotations back into the dump grammar
//! - [`record`] - Parsed sentence and document records
//! - [`loader`] - File loading
//! - [`errors`] - Error types
//!
//! ## Example
//!
//! ```
//! use layered_annotations::parse_document;
//!
//! let dump = "Sentence #1 (1 tokens):\nHi\n[Text=Hi PartOfSpeech=UH]\n(ROOT (INTJ (UH Hi)))\n\nroot(ROOT-0, Hi-1)\n";
//! let doc = parse_document(dump).unwrap();
//! assert_eq!(doc.sentences[0].dependencies[0].relation, "root");
//! ```

pub mod attributes;
pub mod dump_parser;
pub mod errors;
pub mod json;
pub mod loader;
pub mod reconstruct;
pub mod record;

pub use attributes::parse_bracketed;
pub use dump_parser::{parse_document, AnnotationParser, Emitted, ParserState};
pub use errors::{AnnotationError, AnnotationResult};
pub use json::{JsonDependency, JsonDocument, JsonSentence, JsonToken};
pub use loader::{load_dump, load_json, load_sentences};
pub use reconstruct::{
    collapse_dependencies, document_to_stp, flatten_parse, reconstruct_document,
    reconstruct_sentence, reconstruct_sentences, ReconstructOptions, RenderedDependency,
};
pub use record::{
    CorefChain, Dependency, DependencyNode, DocumentRecord, Mention, MentionPair, SentenceRecord,
    Word,
};
