//! Duration extraction: "eight and a half days thirty nine seconds".
//!
//! Number phrases are first rewritten as digits (fraction reading of
//! ordinals), then every `<number> <unit>` pair is summed into its unit and
//! cut out of the text. Connector words and punctuation between the pairs
//! are left in the remainder untouched.

use chrono::TimeDelta;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

use crate::config::Ordinals;
use crate::lexicon::NumberLexicon;
use crate::numbers::convert_words_to_numbers;

/// Time units in the order they are scanned. Smaller units go first so
/// "microseconds" is consumed before "seconds" could match inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
}

impl Unit {
    const ALL: [Unit; 7] = [
        Unit::Microseconds,
        Unit::Milliseconds,
        Unit::Seconds,
        Unit::Minutes,
        Unit::Hours,
        Unit::Days,
        Unit::Weeks,
    ];

    fn singular(self) -> &'static str {
        match self {
            Unit::Microseconds => "microsecond",
            Unit::Milliseconds => "millisecond",
            Unit::Seconds => "second",
            Unit::Minutes => "minute",
            Unit::Hours => "hour",
            Unit::Days => "day",
            Unit::Weeks => "week",
        }
    }
}

static UNIT_PATTERNS: Lazy<Vec<(Unit, Regex)>> = Lazy::new(|| {
    Unit::ALL
        .iter()
        .map(|&unit| {
            let pattern = format!(r"(\d+(?:\.?\d+)?)(?:\s+|-){}s?", unit.singular());
            (unit, Regex::new(&pattern).expect("valid regex"))
        })
        .collect()
});

/// An amount of time broken down by unit, as spoken.
///
/// Components keep their fractional parts ("8.5 days" stays 8.5 days); use
/// [`Duration::to_time_delta`] for arithmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Duration {
    pub weeks: f64,
    pub days: f64,
    pub hours: f64,
    pub minutes: f64,
    pub seconds: f64,
    pub milliseconds: f64,
    pub microseconds: f64,
}

impl Duration {
    fn slot(&mut self, unit: Unit) -> &mut f64 {
        match unit {
            Unit::Microseconds => &mut self.microseconds,
            Unit::Milliseconds => &mut self.milliseconds,
            Unit::Seconds => &mut self.seconds,
            Unit::Minutes => &mut self.minutes,
            Unit::Hours => &mut self.hours,
            Unit::Days => &mut self.days,
            Unit::Weeks => &mut self.weeks,
        }
    }

    /// True when every component is zero.
    pub fn is_zero(&self) -> bool {
        self.total_microseconds() == 0.0
    }

    /// The whole duration in seconds.
    pub fn total_seconds(&self) -> f64 {
        self.total_microseconds() / 1e6
    }

    fn total_microseconds(&self) -> f64 {
        self.microseconds
            + self.milliseconds * 1e3
            + self.seconds * 1e6
            + self.minutes * 60e6
            + self.hours * 3_600e6
            + self.days * 86_400e6
            + self.weeks * 604_800e6
    }

    /// Convert to a [`TimeDelta`], rounded to the microsecond.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::TimeDelta;
    /// use lingua_engine::duration::Duration;
    ///
    /// let d = Duration { days: 8.5, seconds: 39.0, ..Duration::default() };
    /// assert_eq!(d.to_time_delta(), TimeDelta::hours(204) + TimeDelta::seconds(39));
    /// ```
    pub fn to_time_delta(&self) -> TimeDelta {
        TimeDelta::microseconds(self.total_microseconds().round() as i64)
    }
}

/// A duration found in text, with the text it was not made of.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedDuration {
    pub duration: Duration,
    pub remainder: String,
}

/// Extract and sum every duration phrase in `text`.
///
/// Returns `None` for empty input and for text without any duration.
///
/// # Examples
///
/// ```
/// use lingua_engine::duration::extract_duration;
/// use lingua_engine::lexicon::en::English;
///
/// let found = extract_duration(&English, "Set a timer for 30 minutes").unwrap();
/// assert_eq!(found.duration.minutes, 30.0);
/// assert_eq!(found.remainder, "Set a timer for");
/// ```
pub fn extract_duration(lex: &dyn NumberLexicon, text: &str) -> Option<ExtractedDuration> {
    if text.is_empty() {
        return None;
    }
    let mut text = convert_words_to_numbers(lex, text, true, Ordinals::Fraction);
    let mut duration = Duration::default();

    for (unit, pattern) in UNIT_PATTERNS.iter() {
        let slot = duration.slot(*unit);
        text = pattern
            .replace_all(&text, |caps: &Captures| {
                *slot += caps[1].parse::<f64>().unwrap_or(0.0);
                ""
            })
            .into_owned();
    }

    if duration.is_zero() {
        return None;
    }
    Some(ExtractedDuration {
        duration,
        remainder: text.trim().to_string(),
    })
}
