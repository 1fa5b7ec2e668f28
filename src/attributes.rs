//! Decoding of bracketed token-feature groups.
//!
//! A group looks like `Text=cat CharacterOffsetBegin=4 PartOfSpeech=NN`.
//! Values may carry inline markup (`Timex=<TIMEX3 tid="t1">today</TIMEX3>`),
//! whose `=` and spaces would otherwise break the key/value split, so markup
//! is swapped out for placeholders first and restored afterwards.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::record::Word;

/// Greedy: everything from the first opening tag to the last closing tag.
static MARKUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(<[^<>]+>.*</[^<>]+>)").expect("markup pattern"));

static KEY_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^=\s]*)=([^=\s]*)").expect("key/value pattern"));

const TEXT_KEY: &str = "Text";

fn placeholder(i: usize) -> String {
    format!("^^^{}^^^", i)
}

/// Parse one feature group (without its surrounding brackets).
pub fn parse_bracketed(input: &str) -> Word {
    let mut masked = input.to_string();
    let mut fragments: HashMap<String, String> = HashMap::new();

    for (i, found) in MARKUP.find_iter(input).enumerate() {
        let key = placeholder(i);
        masked = masked.replace(found.as_str(), &key);
        fragments.insert(key, found.as_str().to_string());
    }

    let mut word = Word::default();
    for caps in KEY_VALUE.captures_iter(&masked) {
        let key = &caps[1];
        let raw = &caps[2];
        let value = fragments
            .get(raw)
            .cloned()
            .unwrap_or_else(|| raw.to_string());

        if key == TEXT_KEY {
            word.text = Some(value);
        } else {
            word.attributes.insert(key.to_string(), value);
        }
    }

    word
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_text_from_attributes() {
        let word = parse_bracketed("Text=foo Bar=baz");
        assert_eq!(word.text.as_deref(), Some("foo"));
        assert_eq!(word.attributes.len(), 1);
        assert_eq!(word.attribute("Bar"), Some("baz"));
    }

    #[test]
    fn markup_values_survive_intact() {
        let word = parse_bracketed("Text=foo Tag=<a>x</a>");
        assert_eq!(word.text.as_deref(), Some("foo"));
        assert_eq!(word.attribute("Tag"), Some("<a>x</a>"));
    }

    #[test]
    fn markup_with_spaces_and_equals() {
        let word = parse_bracketed(
            r#"Text=today PartOfSpeech=NN Timex=<TIMEX3 tid="t1" type="DATE">today</TIMEX3> Lemma=today"#,
        );
        assert_eq!(word.text.as_deref(), Some("today"));
        assert_eq!(
            word.attribute("Timex"),
            Some(r#"<TIMEX3 tid="t1" type="DATE">today</TIMEX3>"#)
        );
        assert_eq!(word.attribute("PartOfSpeech"), Some("NN"));
        assert_eq!(word.attribute("Lemma"), Some("today"));
    }

    #[test]
    fn separate_markup_fragments_merge_into_one_value() {
        // the greedy match runs from the first opening tag to the last closing tag
        let word = parse_bracketed("Text=x A=<a>1</a> B=<b>2</b> Lemma=x");
        assert_eq!(word.text.as_deref(), Some("x"));
        assert_eq!(word.attribute("A"), Some("<a>1</a> B=<b>2</b>"));
        assert_eq!(word.attribute("B"), None);
        assert_eq!(word.attribute("Lemma"), Some("x"));
        assert_eq!(word.attributes.len(), 2);
    }

    #[test]
    fn missing_text_leaves_word_unset() {
        let word = parse_bracketed("PartOfSpeech=DT Lemma=the");
        assert_eq!(word.text, None);
        assert_eq!(word.attribute("Lemma"), Some("the"));
    }

    #[test]
    fn full_corenlp_group() {
        let word = parse_bracketed(
            "Text=cat CharacterOffsetBegin=4 CharacterOffsetEnd=7 PartOfSpeech=NN Lemma=cat NamedEntityTag=O",
        );
        assert_eq!(word.text.as_deref(), Some("cat"));
        assert_eq!(word.attribute("CharacterOffsetBegin"), Some("4"));
        assert_eq!(word.attribute("CharacterOffsetEnd"), Some("7"));
        assert_eq!(word.attribute("NamedEntityTag"), Some("O"));
    }
}
