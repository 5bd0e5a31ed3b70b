//! Per-language vocabulary behind the extraction algorithms.
//!
//! The number extractor and datetime resolver never hard-code words: they
//! ask a [`NumberLexicon`] or [`DateTimeLexicon`] whether a token is a
//! scale word, a weekday, a marker, and so on. A [`Language`] bundles both
//! with the contraction table used by the normalizer.
//!
//! Only English ships today ([`en::English`]); [`builtin`] is the lookup the
//! [`crate::parser::Parser`] registry uses when a language is loaded.

pub mod en;

use std::sync::Arc;

use chrono::Weekday;

use crate::error::{LinguaError, Result};

/// Which half of the day a time qualifier ("morning", "tonight") implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

/// A named time of day and how firmly it pins the hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedHour {
    /// Always sets the hour ("noon", "midnight").
    Exact(u32),
    /// Sets the hour unless an explicit time already did ("evening").
    Period(u32),
    /// Like `Period`, but the word itself stays in the remainder ("tonight").
    Night(u32),
}

/// Grammatical gender of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
}

/// Number vocabulary: cardinals, scales, ordinals, fractions and markers.
pub trait NumberLexicon: Send + Sync {
    /// Standalone determiners ("a", "an", "the").
    fn is_article(&self, word: &str) -> bool;

    /// Words that negate the following number ("minus").
    fn is_negative(&self, word: &str) -> bool;

    /// Tens words, spelled or as digits, that sum with a following unit
    /// ("twenty" two, "20" 2).
    fn is_sum(&self, word: &str) -> bool;

    /// Words joining a whole number to a fraction ("two and a half").
    fn fraction_markers(&self) -> &[&'static str];

    /// Words introducing decimal digits ("three point five").
    fn decimal_markers(&self) -> &[&'static str];

    /// Cardinal number words and their plurals ("seven", "sevens").
    fn number_word(&self, word: &str) -> Option<f64>;

    /// Scale words and their plurals ("hundred", "millions").
    ///
    /// With `spoken`, colloquial quantities ("couple", "half") are included.
    fn scale_word(&self, word: &str, short_scale: bool, spoken: bool) -> Option<f64>;

    /// Whether `word` multiplies the running value ("thousand", "billions").
    fn is_multiplier(&self, word: &str, short_scale: bool) -> bool;

    /// The rank of an ordinal word ("third" → 3, "billionth" → 1e9).
    fn ordinal_word(&self, word: &str, short_scale: bool) -> Option<f64>;

    /// The value of a fraction word ("quarter" → 0.25, "fifths" → 0.2).
    ///
    /// Without `spoken`, nothing is a fraction word; callers use this to
    /// suppress fraction readings in ambiguous contexts.
    fn fraction_word(&self, word: &str, short_scale: bool, spoken: bool) -> Option<f64>;

    /// Whether `word` could be read as a fraction in some context.
    fn is_fraction_word(&self, word: &str, short_scale: bool) -> bool {
        self.fraction_word(word, short_scale, true).is_some()
    }
}

/// Calendar and clock vocabulary for the datetime resolver.
pub trait DateTimeLexicon: Send + Sync {
    /// Full weekday names ("monday").
    fn weekday(&self, word: &str) -> Option<Weekday>;

    /// Month number (1-12) for full or abbreviated month names.
    fn month(&self, word: &str) -> Option<u32>;

    /// Whether `word` is only an abbreviation ("sept"), not also a full
    /// month name ("june").
    fn is_short_month(&self, word: &str) -> bool;

    /// Words that introduce a recurring schedule ("mondays", "weekdays").
    fn is_recurring_marker(&self, word: &str) -> bool;

    /// Periods of the day that imply am or pm ("morning", "tonight").
    fn time_qualifier(&self, word: &str) -> Option<Meridiem>;

    /// Prepositions and determiners swallowed along with a date or time
    /// ("at", "on", "this").
    fn is_marker(&self, word: &str) -> bool;

    /// Years per coarse unit ("decade" → 10).
    fn year_multiple(&self, word: &str) -> Option<i64>;

    /// Day offsets of relative-day words ("tomorrow" → 1).
    fn relative_day(&self, word: &str) -> Option<i64>;

    /// Hour of day for a named period ("noon", "evening").
    fn named_hour(&self, word: &str) -> Option<NamedHour>;
}

/// A complete language: numbers, dates and normalization rules.
pub trait Language: NumberLexicon + DateTimeLexicon {
    /// Canonical short code, e.g. `"en"`.
    fn code(&self) -> &'static str;

    /// Expansion of a contracted word ("isn't" → "is not"). Case-sensitive.
    fn contraction(&self, word: &str) -> Option<&'static str>;

    /// Grammatical gender of `word`, optionally informed by the sentence it
    /// appears in. `Ok(None)` means the gender could not be determined.
    ///
    /// Languages without grammatical gender keep the default, which returns
    /// [`LinguaError::NotLocalized`].
    fn gender(&self, _word: &str, _context: Option<&str>) -> Result<Option<Gender>> {
        Err(LinguaError::NotLocalized(self.code().to_string()))
    }
}

/// Canonical registry key for a language code: `"en-US"` → `"en"`.
pub fn canonical_code(code: &str) -> String {
    let code = code.trim().to_lowercase();
    match code.split(['-', '_']).next() {
        Some(primary) if !primary.is_empty() => primary.to_string(),
        _ => code,
    }
}

/// The built-in implementation for `code`, if one exists.
pub fn builtin(code: &str) -> Option<Arc<dyn Language>> {
    match canonical_code(code).as_str() {
        "en" => Some(Arc::new(en::English)),
        _ => None,
    }
}
