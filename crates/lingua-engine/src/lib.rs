//! # lingua-engine
//!
//! Deterministic extraction of numbers, durations and datetimes from
//! natural-language text.
//!
//! Every extractor returns what it found together with the text it did not
//! consume, so callers can chain extractors or keep the leftover as intent.
//!
//! ## Modules
//!
//! - [`parser`] — `Parser` service: language registry + extraction entry points
//! - [`numbers`] — "two million five hundred thousand" → 2500000, words → digits
//! - [`duration`] — "eight and a half days" → `Duration`
//! - [`datetime`] — "tomorrow at 7am" → `DateTime<Tz>`, anchored to a reference instant
//! - [`normalize`] — contraction expansion, digit spelling, article removal
//! - [`fuzzy`] — string similarity and best-of-N choice matching
//! - [`timezone`] — process default timezone, clocks, leap years
//! - [`lexicon`] — per-language vocabulary traits and the English tables
//! - [`token`] — indexed word tokens
//! - [`config`] — option structs and `ParserConfig`
//! - [`error`] — Error types

pub mod config;
pub mod datetime;
pub mod duration;
pub mod error;
pub mod fuzzy;
pub mod lexicon;
pub mod normalize;
pub mod numbers;
pub mod parser;
pub mod timezone;
pub mod token;

pub use config::{DateTimeOptions, NormalizeOptions, NumberOptions, Ordinals, ParserConfig};
pub use datetime::{extract_datetime, ExtractedDateTime};
pub use duration::{extract_duration, Duration, ExtractedDuration};
pub use error::LinguaError;
pub use fuzzy::{fuzzy_match, match_one, match_one_keyed};
pub use lexicon::{en::English, DateTimeLexicon, Gender, Language, NumberLexicon};
pub use normalize::normalize;
pub use numbers::{
    convert_words_to_numbers, extract_number, extract_number_match, extract_number_matches,
    extract_numbers, is_numeric, NumberMatch,
};
pub use parser::Parser;
pub use timezone::{now_local, now_utc, parse_timezone, set_default_tz, set_default_tz_name};
pub use token::{tokenize, Token};
