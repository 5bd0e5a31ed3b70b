//! The extraction service: a registry of loaded languages plus one entry
//! point per extractor.
//!
//! Every extraction method takes `lang: Option<&str>`. `None` uses the
//! parser's default language; an explicit code must already be loaded.
//!
//! ```
//! use lingua_engine::parser::Parser;
//!
//! let parser = Parser::new();
//! assert_eq!(parser.normalize("it's a four five six test", None).unwrap(), "it is 4 5 6 test");
//! assert!(parser.extract_number("twelve", Some("fr")).is_err());
//! ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::config::{DateTimeOptions, NormalizeOptions, NumberOptions, ParserConfig};
use crate::datetime::{self, ExtractedDateTime};
use crate::duration::{self, ExtractedDuration};
use crate::error::{LinguaError, Result};
use crate::lexicon::{self, canonical_code, Gender, Language};
use crate::normalize;
use crate::numbers::{self, NumberMatch};
use crate::timezone;

#[derive(Default)]
struct Registry {
    languages: HashMap<String, Arc<dyn Language>>,
    default_lang: String,
}

/// Language registry and extraction entry points.
///
/// `Parser` is `Send + Sync`; share it behind an `Arc`. Extraction takes the
/// registry's read lock only long enough to clone the language handle.
pub struct Parser {
    registry: RwLock<Registry>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// A parser with English loaded and set as the default.
    pub fn new() -> Self {
        let parser = Self {
            registry: RwLock::new(Registry::default()),
        };
        if let Some(english) = lexicon::builtin("en") {
            let mut reg = parser.write();
            reg.languages.insert("en".to_string(), english);
            reg.default_lang = "en".to_string();
        }
        parser
    }

    /// Build a parser from configuration.
    ///
    /// Loads every configured language, sets the default language, and
    /// installs the default timezone if one is named.
    ///
    /// # Errors
    ///
    /// - [`LinguaError::InvalidConfig`] for an empty or unknown language code.
    /// - [`LinguaError::InvalidTimezone`] for an unknown IANA zone.
    pub fn from_config(config: &ParserConfig) -> Result<Self> {
        config.validate()?;
        let parser = Self {
            registry: RwLock::new(Registry::default()),
        };
        for code in &config.languages {
            parser.load_language(code).map_err(unknown_in_config)?;
        }
        parser
            .set_default_lang(&config.default_language)
            .map_err(unknown_in_config)?;
        if let Some(tz) = &config.default_timezone {
            timezone::set_default_tz_name(tz)?;
        }
        Ok(parser)
    }

    /// Build a parser from a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_config(&ParserConfig::from_json(json)?)
    }

    // ── Registry ────────────────────────────────────────────────────────

    /// Load the tables for `code` ("en", "en-US", "EN").
    ///
    /// # Errors
    ///
    /// Returns [`LinguaError::NotLocalized`] if no implementation exists.
    pub fn load_language(&self, code: &str) -> Result<()> {
        let key = canonical_code(code);
        let lang = lexicon::builtin(&key).ok_or_else(|| LinguaError::NotLocalized(code.to_string()))?;
        let mut reg = self.write();
        if reg.languages.insert(key.clone(), lang).is_none() {
            tracing::debug!(lang = %key, "language loaded");
        }
        if reg.default_lang.is_empty() {
            reg.default_lang = key;
        }
        Ok(())
    }

    /// Drop the tables for `code`. Unloading the default language leaves no
    /// default until another is set.
    pub fn unload_language(&self, code: &str) {
        let key = canonical_code(code);
        let mut reg = self.write();
        if reg.languages.remove(&key).is_some() {
            tracing::debug!(lang = %key, "language unloaded");
        }
        if reg.default_lang == key {
            reg.default_lang.clear();
        }
    }

    /// Make `code` the default language, loading it first if needed.
    pub fn set_default_lang(&self, code: &str) -> Result<()> {
        let key = canonical_code(code);
        if !self.read().languages.contains_key(&key) {
            self.load_language(&key)?;
        }
        self.write().default_lang = key.clone();
        tracing::debug!(lang = %key, "default language set");
        Ok(())
    }

    /// The default language code, or "" if none is set.
    pub fn default_lang(&self) -> String {
        self.read().default_lang.clone()
    }

    /// Codes of the loaded languages, sorted.
    pub fn loaded_languages(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.read().languages.keys().cloned().collect();
        codes.sort();
        codes
    }

    fn language(&self, lang: Option<&str>) -> Result<Arc<dyn Language>> {
        let reg = self.read();
        let key = match lang {
            Some(code) => canonical_code(code),
            None => reg.default_lang.clone(),
        };
        reg.languages
            .get(&key)
            .cloned()
            .ok_or_else(|| LinguaError::NotLocalized(lang.unwrap_or(key.as_str()).to_string()))
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Registry> {
        self.registry.write().unwrap_or_else(|e| e.into_inner())
    }

    // ── Normalization ───────────────────────────────────────────────────

    /// Normalize with default options.
    pub fn normalize(&self, text: &str, lang: Option<&str>) -> Result<String> {
        self.normalize_with(text, &NormalizeOptions::default(), lang)
    }

    pub fn normalize_with(
        &self,
        text: &str,
        opts: &NormalizeOptions,
        lang: Option<&str>,
    ) -> Result<String> {
        let lang = self.language(lang)?;
        Ok(normalize::normalize(&*lang, text, opts))
    }

    /// Spell number phrases as digits, leaving ordinals as words.
    pub fn numbers_to_digits(&self, text: &str, lang: Option<&str>) -> Result<String> {
        let lang = self.language(lang)?;
        Ok(normalize::numbers_to_digits(&*lang, text))
    }

    // ── Numbers ─────────────────────────────────────────────────────────

    pub fn extract_number(&self, text: &str, lang: Option<&str>) -> Result<Option<f64>> {
        self.extract_number_with(text, &NumberOptions::default(), lang)
    }

    pub fn extract_number_with(
        &self,
        text: &str,
        opts: &NumberOptions,
        lang: Option<&str>,
    ) -> Result<Option<f64>> {
        let lang = self.language(lang)?;
        Ok(numbers::extract_number(&*lang, text, opts))
    }

    pub fn extract_number_match(
        &self,
        text: &str,
        opts: &NumberOptions,
        lang: Option<&str>,
    ) -> Result<Option<NumberMatch>> {
        let lang = self.language(lang)?;
        Ok(numbers::extract_number_match(&*lang, text, opts))
    }

    pub fn extract_numbers(
        &self,
        text: &str,
        opts: &NumberOptions,
        lang: Option<&str>,
    ) -> Result<Vec<f64>> {
        let lang = self.language(lang)?;
        Ok(numbers::extract_numbers(&*lang, text, opts))
    }

    pub fn extract_number_matches(
        &self,
        text: &str,
        opts: &NumberOptions,
        lang: Option<&str>,
    ) -> Result<Vec<NumberMatch>> {
        let lang = self.language(lang)?;
        Ok(numbers::extract_number_matches(&*lang, text, opts))
    }

    /// Whether `word` can be read as a fraction ("quarter", "thirds").
    pub fn is_fractional(&self, word: &str, short_scale: bool, lang: Option<&str>) -> Result<bool> {
        let lang = self.language(lang)?;
        Ok(lang.is_fraction_word(&word.to_lowercase(), short_scale))
    }

    /// Grammatical gender of `word`.
    ///
    /// # Errors
    ///
    /// Returns [`LinguaError::NotLocalized`] for languages without
    /// grammatical gender, English included.
    pub fn get_gender(
        &self,
        word: &str,
        context: Option<&str>,
        lang: Option<&str>,
    ) -> Result<Option<Gender>> {
        self.language(lang)?.gender(word, context)
    }

    // ── Durations & datetimes ───────────────────────────────────────────

    pub fn extract_duration(&self, text: &str, lang: Option<&str>) -> Result<Option<ExtractedDuration>> {
        let lang = self.language(lang)?;
        Ok(duration::extract_duration(&*lang, text))
    }

    /// Resolve a date and/or time. See [`datetime::extract_datetime`].
    pub fn extract_datetime(
        &self,
        text: &str,
        opts: &DateTimeOptions,
        lang: Option<&str>,
    ) -> Result<Option<ExtractedDateTime>> {
        let lang = self.language(lang)?;
        Ok(datetime::extract_datetime(&*lang, text, opts))
    }
}

fn unknown_in_config(err: LinguaError) -> LinguaError {
    match err {
        LinguaError::NotLocalized(code) => {
            LinguaError::InvalidConfig(format!("unsupported language '{code}'"))
        }
        other => other,
    }
}
