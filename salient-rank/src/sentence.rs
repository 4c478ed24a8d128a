//! Sentence boundary detection.
//!
//! Text is first cut into paragraphs at blank lines, which are always hard
//! boundaries. Inside a paragraph a sentence ends at a word whose last
//! non-closing character is `.`, `!` or `?`, unless the word is a known
//! abbreviation, a single-letter initial, or (for `.`) the next word starts in
//! lower case. Abbreviations that are also ordinary words (`no.`, `fig.`) only
//! hold together before a number. Whitespace inside every sentence is
//! collapsed to single spaces.

use serde::{Deserialize, Serialize};

/// A sentence extracted from a source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Zero-based position of the sentence in its source text.
    pub index: usize,
    /// The sentence text with whitespace collapsed.
    pub text: String,
}

const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "vs", "etc", "e.g", "i.e", "inc", "ltd", "corp",
    "approx", "dept", "u.s", "u.k", "a.m", "p.m",
];

/// Abbreviations only when a number follows: "No. 5", "vol. 2", "fig. 3".
const NUMBERED_ABBREVIATIONS: &[&str] = &["no", "nos", "vol", "fig", "pp", "ch", "sec"];

const CLOSING: &[char] = &['"', '\'', ')', ']', '}', '\u{201d}', '\u{2019}', '\u{bb}'];
const OPENING: &[char] = &['"', '\'', '(', '[', '{', '\u{201c}', '\u{2018}', '\u{ab}'];

/// Split `text` into sentences, in source order.
///
/// Returns an empty `Vec` for empty or whitespace-only input.
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    for paragraph in paragraphs(text) {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        let mut start = 0;
        for i in 0..words.len() {
            let next = words.get(i + 1).copied();
            if next.is_none() || ends_sentence(words[i], next) {
                let text = words[start..=i].join(" ");
                sentences.push(Sentence { index: sentences.len(), text });
                start = i + 1;
            }
        }
    }
    sentences
}

/// The sentence-boundary-normalized form of `text`: its sentences rejoined
/// with [`join`].
pub fn normalize(text: &str) -> String {
    join(&split_sentences(text))
}

/// Join sentences so that splitting the result yields them again.
///
/// Neighbours are separated by a single space when the boundary between them
/// is still detected that way, and by a blank line otherwise (a heading, or
/// a sentence without final punctuation).
pub fn join<'a, I>(sentences: I) -> String
where
    I: IntoIterator<Item = &'a Sentence>,
{
    let mut out = String::new();
    let mut last_word: Option<&str> = None;
    for sentence in sentences {
        let text = sentence.text.as_str();
        if let Some(prev) = last_word {
            let next = text.split_whitespace().next();
            out.push_str(if ends_sentence(prev, next) { " " } else { "\n\n" });
        }
        out.push_str(text);
        last_word = text.split_whitespace().last().or(last_word);
    }
    out
}

/// Group lines into paragraphs separated by blank lines.
fn paragraphs(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    if !current.trim().is_empty() {
        out.push(current);
    }
    out
}

fn ends_sentence(word: &str, next: Option<&str>) -> bool {
    let core = word.trim_end_matches(CLOSING);
    let Some(last) = core.chars().last() else {
        return false;
    };
    match last {
        '!' | '?' => true,
        '.' => {
            let stem = core.trim_end_matches('.').trim_start_matches(OPENING).to_lowercase();
            if stem.is_empty() {
                // "..." on its own closes the sentence.
                return true;
            }
            if ABBREVIATIONS.contains(&stem.as_str()) {
                return false;
            }
            let next_alnum = next.and_then(|w| w.chars().find(|c| c.is_alphanumeric()));
            if NUMBERED_ABBREVIATIONS.contains(&stem.as_str())
                && next_alnum.is_some_and(|c| c.is_ascii_digit())
            {
                return false;
            }
            let mut chars = stem.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                if c.is_alphabetic() {
                    return false;
                }
            }
            !next_alnum.is_some_and(char::is_lowercase)
        }
        _ => false,
    }
}
