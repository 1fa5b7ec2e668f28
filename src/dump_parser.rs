//! Parser for the human-readable annotation dump.
//!
//! Each sentence in the dump is laid out as
//!
//! ```text
//! Sentence #1 (4 tokens):
//! The cat sat .
//! [Text=The CharacterOffsetBegin=0 ...] [Text=cat ...] ...
//! (ROOT
//!   (S (NP (DT The) (NN cat)) ...))
//!
//! det(cat-2, The-1)
//! nsubj(sat-3, cat-2)
//!
//! Coreference set:
//!   (2,1,[1,2]) -> (1,1,[1,3]), that is: "it" -> "The cat"
//! ```
//!
//! The grammar is section-based rather than nested: blank lines close the
//! tree and dependency sections and a `Sentence #` header resynchronises
//! from anywhere. [`AnnotationParser`] is the explicit state machine over
//! those lines. Only the feature line is checked strictly; malformed
//! dependency and coreference lines are skipped.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::attributes::parse_bracketed;
use crate::errors::{AnnotationError, AnnotationResult};
use crate::record::{CorefChain, Dependency, DocumentRecord, Mention, MentionPair, SentenceRecord};

const SENTENCE_HEADER: &str = "Sentence #";
const WORDS_HEADER: &str = "[Text=";
const COREF_HEADER: &str = "Coreference set";

static WORD_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]").expect("word group pattern"));

static DEPENDENCY_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(|, ").expect("dependency split pattern"));

static MENTION_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\((\d+),(\d+),\[(\d+),(\d+)\]\) -> \((\d+),(\d+),\[(\d+),(\d+)\]\), that is: "(.*)" -> "(.*)""#,
    )
    .expect("mention pair pattern")
});

/// Section of the dump the parser is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Before the first sentence header
    Start,
    /// Expecting the raw sentence line
    Text,
    /// Expecting the bracketed feature line
    Words,
    /// Accumulating constituency tree lines
    Tree,
    /// Reading dependency triples
    Dependency,
    /// Reading coreference sets
    Coreference,
}

/// Items completed by a single [`AnnotationParser::step`].
#[derive(Debug, Default, PartialEq)]
pub struct Emitted {
    /// The previous sentence, closed by a new header
    pub sentence: Option<SentenceRecord>,
    /// The previous coreference chain, closed by a new set header
    pub chain: Option<CorefChain>,
}

/// Line-at-a-time state machine over one document's dump.
///
/// The parser owns only the sentence and chain being built. Completed
/// records are handed back from [`step`](Self::step) and
/// [`finish`](Self::finish); the caller accumulates them.
#[derive(Debug)]
pub struct AnnotationParser {
    state: ParserState,
    line_number: usize,
    sentence: Option<SentenceRecord>,
    tree_fragments: Vec<String>,
    chain: Option<CorefChain>,
}

impl Default for AnnotationParser {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationParser {
    pub fn new() -> Self {
        Self {
            state: ParserState::Start,
            line_number: 0,
            sentence: None,
            tree_fragments: Vec::new(),
            chain: None,
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Consume one line of the dump.
    pub fn step(&mut self, line: &str) -> AnnotationResult<Emitted> {
        self.line_number += 1;
        let line = line.trim();
        let mut emitted = Emitted::default();

        if line.starts_with(SENTENCE_HEADER) {
            self.close_tree();
            emitted.sentence = self.sentence.replace(SentenceRecord::default());
            emitted.chain = self.chain.take();
            self.state = ParserState::Text;
            return Ok(emitted);
        }

        match self.state {
            ParserState::Start => {}
            ParserState::Text => {
                if let Some(sentence) = self.sentence.as_mut() {
                    sentence.text = Some(line.to_string());
                }
                self.state = ParserState::Words;
            }
            ParserState::Words => {
                if !line.starts_with(WORDS_HEADER) {
                    return Err(AnnotationError::Format {
                        line: self.line_number,
                        text: line.to_string(),
                    });
                }
                if let Some(sentence) = self.sentence.as_mut() {
                    sentence.words.extend(
                        WORD_GROUP
                            .captures_iter(line)
                            .map(|caps| parse_bracketed(&caps[1])),
                    );
                }
                self.state = ParserState::Tree;
            }
            ParserState::Tree => {
                if line.is_empty() {
                    self.close_tree();
                    self.state = ParserState::Dependency;
                } else {
                    self.tree_fragments.push(line.to_string());
                }
            }
            ParserState::Dependency => {
                if line.is_empty() {
                    self.state = ParserState::Coreference;
                } else {
                    self.read_dependency(line);
                }
            }
            ParserState::Coreference => {
                if line.contains(COREF_HEADER) {
                    emitted.chain = self.chain.replace(CorefChain::default());
                } else {
                    self.read_mentions(line);
                }
            }
        }

        Ok(emitted)
    }

    /// Flush whatever is still open at end of input.
    pub fn finish(mut self) -> Emitted {
        self.close_tree();
        Emitted {
            sentence: self.sentence.take(),
            chain: self.chain.take(),
        }
    }

    fn close_tree(&mut self) {
        if self.state != ParserState::Tree {
            return;
        }
        let tree = self.tree_fragments.join(" ");
        self.tree_fragments.clear();
        if let Some(sentence) = self.sentence.as_mut() {
            sentence.parsetree = tree;
        }
    }

    fn read_dependency(&mut self, line: &str) {
        // drop the closing paren
        let mut chars = line.chars();
        chars.next_back();
        let body = chars.as_str();

        let fields: Vec<&str> = DEPENDENCY_SPLIT.split(body).collect();
        match Dependency::from_fields(&fields) {
            Some(dependency) => {
                if let Some(sentence) = self.sentence.as_mut() {
                    sentence.dependencies.push(dependency);
                }
            }
            None => log::debug!(
                "line {}: skipping dependency line with {} fields: {}",
                self.line_number,
                fields.len(),
                line
            ),
        }
    }

    fn read_mentions(&mut self, line: &str) {
        for caps in MENTION_PAIR.captures_iter(line) {
            let Some(chain) = self.chain.as_mut() else {
                log::warn!(
                    "line {}: mention pair outside of a coreference set: {}",
                    self.line_number,
                    line
                );
                return;
            };

            // one-based in the dump; 0 or an overflowing digit run is invalid
            let mut indices = [0usize; 8];
            let mut valid = true;
            for (slot, group) in indices.iter_mut().zip(1..=8) {
                match caps[group].parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
                    Some(index) => *slot = index,
                    None => valid = false,
                }
            }
            if !valid {
                log::debug!(
                    "line {}: skipping mention pair with an invalid index: {}",
                    self.line_number,
                    &caps[0]
                );
                continue;
            }

            chain.pairs.push(MentionPair {
                source: Mention {
                    text: caps[9].to_string(),
                    sentence: indices[0],
                    position: indices[1],
                    span_left: indices[2],
                    span_right: indices[3],
                },
                sink: Mention {
                    text: caps[10].to_string(),
                    sentence: indices[4],
                    position: indices[5],
                    span_left: indices[6],
                    span_right: indices[7],
                },
            });
        }
    }
}

/// Parse a complete dump into a [`DocumentRecord`].
///
/// Fails on the first feature line that does not start with `[Text=`; no
/// partial document is returned in that case.
pub fn parse_document(input: &str) -> AnnotationResult<DocumentRecord> {
    let mut parser = AnnotationParser::new();
    let mut document = DocumentRecord::default();

    for line in input.split('\n') {
        let emitted = parser.step(line)?;
        collect(&mut document, emitted);
    }
    collect(&mut document, parser.finish());

    Ok(document)
}

fn collect(document: &mut DocumentRecord, emitted: Emitted) {
    if let Some(sentence) = emitted.sentence {
        document.sentences.push(sentence);
    }
    if let Some(chain) = emitted.chain {
        document.coref.get_or_insert_with(Vec::new).push(chain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_SENTENCE: &str = "Sentence #1 (3 tokens):
The cat sat
[Text=The PartOfSpeech=DT] [Text=cat PartOfSpeech=NN] [Text=sat PartOfSpeech=VBD]
(ROOT
  (S (NP (DT The) (NN cat))
    (VP (VBD sat))))

det(cat-2, The-1)
nsubj(sat-3, cat-2)
root(ROOT-0, sat-3)
";

    #[test]
    fn parses_single_sentence() {
        let doc = parse_document(ONE_SENTENCE).unwrap();
        assert_eq!(doc.sentences.len(), 1);
        assert!(doc.coref.is_none());

        let sentence = &doc.sentences[0];
        assert_eq!(sentence.text.as_deref(), Some("The cat sat"));
        assert_eq!(
            sentence.surfaces(),
            vec![Some("The"), Some("cat"), Some("sat")]
        );
        assert_eq!(sentence.words[1].attribute("PartOfSpeech"), Some("NN"));
        assert_eq!(
            sentence.parsetree,
            "(ROOT (S (NP (DT The) (NN cat)) (VP (VBD sat))))"
        );
        assert_eq!(
            sentence.dependencies,
            vec![
                Dependency::new("det", "cat-2", "The-1"),
                Dependency::new("nsubj", "sat-3", "cat-2"),
                Dependency::new("root", "ROOT-0", "sat-3"),
            ]
        );
    }

    #[test]
    fn missing_feature_header_is_a_format_error() {
        let input = "Sentence #1 (1 tokens):\nHello\nHello PartOfSpeech=UH\n";
        match parse_document(input) {
            Err(AnnotationError::Format { line, text }) => {
                assert_eq!(line, 3);
                assert_eq!(text, "Hello PartOfSpeech=UH");
            }
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn malformed_dependency_lines_are_skipped() {
        let input = "Sentence #1 (2 tokens):
Hi there
[Text=Hi] [Text=there]
(ROOT (INTJ (UH Hi) (RB there)))

advmod(Hi-1, there-2)
garbage line
nmod(a-1, b-2, c-3)
";
        let doc = parse_document(input).unwrap();
        assert_eq!(
            doc.sentences[0].dependencies,
            vec![Dependency::new("advmod", "Hi-1", "there-2")]
        );
    }

    #[test]
    fn header_resynchronises_from_any_state() {
        let mut parser = AnnotationParser::new();
        for line in ONE_SENTENCE.lines() {
            parser.step(line).unwrap();
        }
        assert_eq!(parser.state(), ParserState::Dependency);

        let emitted = parser.step("Sentence #2 (1 tokens):").unwrap();
        assert_eq!(parser.state(), ParserState::Text);
        let finished = emitted.sentence.expect("first sentence emitted");
        assert_eq!(finished.dependencies.len(), 3);
    }

    #[test]
    fn tree_without_trailing_blank_is_still_joined() {
        let input = "Sentence #1 (1 tokens):\nHi\n[Text=Hi]\n(ROOT\n(UH Hi))";
        let doc = parse_document(input).unwrap();
        assert_eq!(doc.sentences[0].parsetree, "(ROOT (UH Hi))");
    }

    #[test]
    fn lines_before_first_header_are_ignored() {
        let input = format!("some preamble\n[Text=ignored]\n{}", ONE_SENTENCE);
        let doc = parse_document(&input).unwrap();
        assert_eq!(doc.sentences.len(), 1);
    }

    #[test]
    fn coreference_indices_become_zero_based() {
        let input = format!(
            "{}\nCoreference set:\n\t(3,1,[2,4]) -> (5,1,[1,2]), that is: \"it\" -> \"The cat\"\n",
            ONE_SENTENCE
        );
        let doc = parse_document(&input).unwrap();
        let chains = doc.coref.expect("coref section");
        assert_eq!(chains.len(), 1);

        let pair = &chains[0].pairs[0];
        assert_eq!(
            pair.source,
            Mention {
                text: "it".into(),
                sentence: 2,
                position: 0,
                span_left: 1,
                span_right: 3,
            }
        );
        assert_eq!(
            pair.sink,
            Mention {
                text: "The cat".into(),
                sentence: 4,
                position: 0,
                span_left: 0,
                span_right: 1,
            }
        );
    }

    #[test]
    fn mention_pairs_with_invalid_indices_are_skipped() {
        let input = format!(
            "{}\nCoreference set:\n\t(1,0,[1,2]) -> (1,1,[1,2]), that is: \"a\" -> \"b\"\n\t(1,1,[1,2]) -> (99999999999999999999999,1,[1,2]), that is: \"a\" -> \"c\"\n\t(2,1,[1,2]) -> (1,1,[1,2]), that is: \"d\" -> \"b\"\n",
            ONE_SENTENCE
        );
        let doc = parse_document(&input).unwrap();
        let chains = doc.coref.expect("coref section");
        assert_eq!(chains[0].pairs.len(), 1);
        assert_eq!(chains[0].pairs[0].source.text, "d");
        assert_eq!(chains[0].pairs[0].source.sentence, 1);
    }

    #[test]
    fn stray_mentions_without_set_are_skipped() {
        let input = format!(
            "{}\n(1,1,[1,2]) -> (1,2,[2,3]), that is: \"a\" -> \"b\"\n",
            ONE_SENTENCE
        );
        let doc = parse_document(&input).unwrap();
        assert!(doc.coref.is_none());
    }
}
