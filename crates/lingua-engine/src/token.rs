//! Word tokens with stable positions.
//!
//! Extraction works on whitespace-separated tokens that remember their
//! position in the original sentence, so a matched span can be mapped back
//! onto the text (and removed from it) after the fact.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static PERCENT_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)(%)").expect("valid regex"));
static HASH_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(#)([0-9]+\b)").expect("valid regex"));

/// A single word and its position in the tokenized sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The word as it appeared, casing preserved.
    pub word: String,
    /// Zero-based position in the sentence.
    pub index: usize,
}

impl Token {
    pub fn new(word: impl Into<String>, index: usize) -> Self {
        Self {
            word: word.into(),
            index,
        }
    }
}

/// Split a sentence into indexed tokens.
///
/// `"12%"` becomes `"12" "%"` and `"#1"` becomes `"#" "1"`; otherwise
/// tokens are the whitespace-separated words.
///
/// ```
/// use lingua_engine::token::tokenize;
///
/// let words: Vec<String> = tokenize("totally 100%").into_iter().map(|t| t.word).collect();
/// assert_eq!(words, vec!["totally", "100", "%"]);
/// ```
pub fn tokenize(text: &str) -> Vec<Token> {
    let text = PERCENT_SPLIT.replace_all(text, "$1 $2");
    let text = HASH_SPLIT.replace_all(&text, "$1 $2");
    text.split_whitespace()
        .enumerate()
        .map(|(index, word)| Token::new(word, index))
        .collect()
}

/// Split `tokens` around every token matching `is_marker`.
///
/// Each marker becomes its own single-token partition; empty partitions are
/// dropped. A sentence with exactly one marker in its interior therefore
/// yields three partitions: before, marker, after.
pub fn partition_tokens<F>(tokens: &[Token], is_marker: F) -> Vec<Vec<Token>>
where
    F: Fn(&Token) -> bool,
{
    let mut splits = Vec::new();
    let mut current = Vec::new();
    for token in tokens {
        if is_marker(token) {
            splits.push(std::mem::take(&mut current));
            splits.push(vec![token.clone()]);
        } else {
            current.push(token.clone());
        }
    }
    splits.push(current);
    splits.retain(|s| !s.is_empty());
    splits
}

/// Join token words with single spaces.
pub fn join_words(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.word.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
