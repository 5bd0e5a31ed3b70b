//! Options and configuration for the extraction entry points.
//!
//! Per-call behaviour is controlled by small option structs with sensible
//! defaults ([`NumberOptions`], [`NormalizeOptions`], [`DateTimeOptions`]).
//! Process-level setup (which languages to load, the default language and
//! timezone) lives in [`ParserConfig`], which can be read from JSON.

use chrono::{DateTime, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{LinguaError, Result};

// ── Number options ──────────────────────────────────────────────────────────

/// How ordinal words ("third", "billionth") are read.
///
/// The three variants mirror the three behaviours callers rely on: rank,
/// reciprocal fraction, or refusing to guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ordinals {
    /// Ordinal words are ambiguous; a lone ordinal is not a number.
    ///
    /// Spoken extras ("couple", "half") are also disabled.
    Ambiguous,
    /// Ordinal words yield their rank: "third" → 3.
    Rank,
    /// Ordinal words yield their reciprocal: "third" → 1/3.
    #[default]
    Fraction,
}

/// Options for number extraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumberOptions {
    /// Use short-scale names (billion = 1e9) instead of long scale (billion = 1e12).
    pub short_scale: bool,
    /// How to read ordinal words.
    pub ordinals: Ordinals,
    /// Decimal separator used in digit literals ("4,4" with `','`).
    pub decimal: char,
}

impl Default for NumberOptions {
    fn default() -> Self {
        Self {
            short_scale: true,
            ordinals: Ordinals::Fraction,
            decimal: '.',
        }
    }
}

impl NumberOptions {
    pub fn with_ordinals(mut self, ordinals: Ordinals) -> Self {
        self.ordinals = ordinals;
        self
    }

    pub fn with_short_scale(mut self, short_scale: bool) -> Self {
        self.short_scale = short_scale;
        self
    }

    pub fn with_decimal(mut self, decimal: char) -> Self {
        self.decimal = decimal;
        self
    }
}

// ── Normalize options ───────────────────────────────────────────────────────

/// Options for [`crate::normalize::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Drop standalone articles ("a", "an", "the").
    pub remove_articles: bool,
    /// Rewrite number phrases as digits ("twenty two" → "22").
    pub numbers_to_digits: bool,
    /// Expand contractions ("isn't" → "is not").
    pub expand_contractions: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            remove_articles: true,
            numbers_to_digits: true,
            expand_contractions: true,
        }
    }
}

impl NormalizeOptions {
    pub fn keep_articles(mut self) -> Self {
        self.remove_articles = false;
        self
    }
}

// ── Datetime options ────────────────────────────────────────────────────────

/// Options for datetime extraction.
#[derive(Debug, Clone, Default)]
pub struct DateTimeOptions {
    /// The reference instant. `None` means "now" in the default timezone.
    pub anchor: Option<DateTime<Tz>>,
    /// Time of day applied when a day was found but no time was.
    pub default_time: Option<NaiveTime>,
}

impl DateTimeOptions {
    pub fn anchored(anchor: DateTime<Tz>) -> Self {
        Self {
            anchor: Some(anchor),
            default_time: None,
        }
    }

    pub fn with_default_time(mut self, time: NaiveTime) -> Self {
        self.default_time = Some(time);
        self
    }
}

// ── Parser configuration ────────────────────────────────────────────────────

/// Process-level configuration for a [`crate::parser::Parser`].
///
/// ```
/// use lingua_engine::config::ParserConfig;
///
/// let config = ParserConfig::from_json(r#"{"default_language": "en-us"}"#).unwrap();
/// assert_eq!(config.default_language, "en-us");
/// assert_eq!(config.languages, vec!["en".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Language used when a call does not name one.
    pub default_language: String,
    /// Languages loaded when the parser is built.
    pub languages: Vec<String>,
    /// IANA name installed as the process default timezone, if any.
    pub default_timezone: Option<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            languages: vec!["en".to_string()],
            default_timezone: None,
        }
    }
}

impl ParserConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LinguaError::InvalidConfig`] for malformed JSON, unknown
    /// fields, or an empty default language.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ParserConfig = serde_json::from_str(json)
            .map_err(|e| LinguaError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the fields that serde cannot check.
    pub fn validate(&self) -> Result<()> {
        if self.default_language.trim().is_empty() {
            return Err(LinguaError::InvalidConfig(
                "default_language must not be empty".to_string(),
            ));
        }
        if let Some(code) = self.languages.iter().find(|c| c.trim().is_empty()) {
            return Err(LinguaError::InvalidConfig(format!(
                "empty language code in languages: '{code}'"
            )));
        }
        Ok(())
    }
}
