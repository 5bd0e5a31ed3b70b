//! Text normalization: contractions, digits, articles, whitespace.

use crate::config::{NormalizeOptions, Ordinals};
use crate::lexicon::Language;
use crate::numbers::convert_words_to_numbers;

/// Normalize an utterance for downstream extraction.
///
/// Steps run in a fixed order: contractions are expanded, number phrases
/// become digits (ordinals stay ambiguous), articles are dropped, and
/// whitespace is collapsed. Case is preserved.
///
/// # Examples
///
/// ```
/// use lingua_engine::config::NormalizeOptions;
/// use lingua_engine::lexicon::en::English;
/// use lingua_engine::normalize::normalize;
///
/// let text = normalize(&English, "  it's  a four five six  test", &NormalizeOptions::default());
/// assert_eq!(text, "it is 4 5 6 test");
/// ```
pub fn normalize(lang: &dyn Language, text: &str, opts: &NormalizeOptions) -> String {
    let mut text = if opts.expand_contractions {
        expand_contractions(lang, text)
    } else {
        text.to_string()
    };
    if opts.numbers_to_digits {
        text = numbers_to_digits(lang, &text);
    }
    if opts.remove_articles {
        text = remove_articles(lang, &text);
    }
    collapse_whitespace(&text)
}

/// Replace contracted words with their expansion ("isn't" → "is not").
///
/// Lookup is exact: "What's" is not expanded even though "what's" is.
pub fn expand_contractions(lang: &dyn Language, text: &str) -> String {
    text.split_whitespace()
        .map(|word| lang.contraction(word).unwrap_or(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Spell number phrases as digits, leaving ordinal words alone.
pub fn numbers_to_digits(lang: &dyn Language, text: &str) -> String {
    convert_words_to_numbers(lang, text, true, Ordinals::Ambiguous)
}

/// Drop standalone articles, matched case-insensitively.
pub fn remove_articles(lang: &dyn Language, text: &str) -> String {
    text.split_whitespace()
        .filter(|word| !lang.is_article(&word.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapse runs of whitespace to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
