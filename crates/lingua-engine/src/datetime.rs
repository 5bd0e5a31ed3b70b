//! Datetime extraction: "remind me at 7 o'clock tomorrow evening".
//!
//! Resolution runs in two passes over the cleaned words of an utterance.
//! The date pass collects day, month and year offsets, explicit calendar
//! dates and the time-of-day qualifier. The time pass collects absolute
//! clock times and hour/minute/second offsets. Every word either pass
//! consumes is blanked, and whatever survives becomes the remainder.
//!
//! Vocabulary (weekdays, months, markers, named hours) comes from the
//! [`Language`]; the connective grammar ("from", "after", "ago", "o'clock")
//! is the English word order the resolver understands.

use chrono::{
    DateTime, Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, TimeDelta,
    TimeZone, Timelike,
};
use chrono_tz::Tz;
use serde::Serialize;

use crate::config::{DateTimeOptions, Ordinals};
use crate::lexicon::{Language, Meridiem, NamedHour};
use crate::normalize::collapse_whitespace;
use crate::numbers::{convert_words_to_numbers, is_numeric};
use crate::timezone;

/// A resolved datetime with the words that did not contribute to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedDateTime {
    pub datetime: DateTime<Tz>,
    pub remainder: String,
}

/// Extract a date and/or time from `text`.
///
/// Relative expressions resolve against `opts.anchor`, or the current time in
/// the default timezone when no anchor is given. The result carries the
/// anchor's timezone. When only a date is found the time is midnight, or
/// `opts.default_time` if one is set.
///
/// Returns `None` for empty input and for text without any temporal cue.
///
/// # Examples
///
/// ```
/// use chrono::TimeZone;
/// use chrono_tz::Tz;
/// use lingua_engine::config::DateTimeOptions;
/// use lingua_engine::datetime::extract_datetime;
/// use lingua_engine::lexicon::en::English;
///
/// let anchor = Tz::UTC.with_ymd_and_hms(2017, 6, 27, 13, 4, 0).unwrap();
/// let opts = DateTimeOptions::anchored(anchor);
/// let found = extract_datetime(&English, "call mom tomorrow at 7am", &opts).unwrap();
/// assert_eq!(found.datetime.to_rfc3339(), "2017-06-28T07:00:00+00:00");
/// assert_eq!(found.remainder, "call mom");
/// ```
pub fn extract_datetime(
    lang: &dyn Language,
    text: &str,
    opts: &DateTimeOptions,
) -> Option<ExtractedDateTime> {
    let anchor = opts.anchor.unwrap_or_else(timezone::now_local);
    if text.is_empty() {
        return None;
    }
    let mut ctx = DateTimeContext::new(lang, anchor, clean_words(lang, text));

    if let Some(remainder) = ctx.date_pass() {
        return Some(ExtractedDateTime {
            datetime: anchor.trunc_subsecs(0),
            remainder,
        });
    }
    ctx.time_pass();

    let found = ctx.assemble(opts.default_time);
    if found.is_none() {
        tracing::debug!(text, "no date or time found");
    }
    found
}

// ── Word cleaning ───────────────────────────────────────────────────────────

const SPELLING_FIXES: &[(&str, &str)] = &[
    (" the ", " "),
    (" a ", " "),
    (" an ", " "),
    ("o' clock", "o'clock"),
    ("o clock", "o'clock"),
    ("o ' clock", "o'clock"),
    ("o 'clock", "o'clock"),
    ("oclock", "o'clock"),
    ("couple", "2"),
    ("centuries", "century"),
    ("decades", "decade"),
    ("millenniums", "millennium"),
];

const ORDINAL_SUFFIXES: &[&str] = &["rd", "st", "nd", "th"];

/// Digits for number words, lowercase, no punctuation, no possessives,
/// no ordinal suffixes on numerals ("3rd" → "3").
fn clean_words(lang: &dyn Language, text: &str) -> Vec<String> {
    let mut s = convert_words_to_numbers(lang, text, true, Ordinals::Ambiguous).to_lowercase();
    s.retain(|c| !matches!(c, '?' | '.' | ','));
    for (from, to) in SPELLING_FIXES {
        s = s.replace(from, to);
    }

    s.split_whitespace()
        .map(|word| {
            let mut word = word.replace("'s", "");
            if starts_with_digit(&word) && !word.contains("second") {
                for suffix in ORDINAL_SUFFIXES {
                    word = word.replace(suffix, "");
                }
            }
            word
        })
        .collect()
}

fn starts_with_digit(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_ascii_digit())
}

// ── Resolver state ──────────────────────────────────────────────────────────

/// An hour or minute component of the resolved time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Clock {
    Unset,
    At(i64),
    /// An offset ("in an hour") was given; no absolute time applies.
    Relative,
}

impl Clock {
    fn is_set(self) -> bool {
        match self {
            Clock::Unset => false,
            Clock::At(v) => v != 0,
            Clock::Relative => true,
        }
    }

    fn value(self) -> i64 {
        match self {
            Clock::At(v) => v,
            _ => 0,
        }
    }
}

/// A calendar date as spoken: "june 5", "5 of june", "june 5 2017".
#[derive(Debug, Clone)]
struct ExplicitDate {
    month: u32,
    day: Option<String>,
    year: Option<String>,
}

impl ExplicitDate {
    /// The date on `today`'s clock. Without a year, the next occurrence
    /// strictly after `today` is used.
    fn resolve(&self, today: NaiveDateTime) -> Option<NaiveDateTime> {
        let day: u32 = self.day.as_deref()?.parse().ok()?;
        let date = match &self.year {
            Some(year) => NaiveDate::from_ymd_opt(year.parse().ok()?, self.month, day)?,
            None => {
                let this_year = NaiveDate::from_ymd_opt(today.year(), self.month, day)?;
                if today < this_year.and_time(NaiveTime::MIN) {
                    this_year
                } else {
                    NaiveDate::from_ymd_opt(today.year() + 1, self.month, day)?
                }
            }
        };
        Some(date.and_time(today.time()))
    }
}

struct DateTimeContext<'a> {
    lang: &'a dyn Language,
    anchor: DateTime<Tz>,
    words: Vec<String>,

    found: bool,
    day_specified: bool,
    from_flag: bool,
    date: Option<ExplicitDate>,
    time_qualifier: String,

    year_offset: i64,
    month_offset: i64,
    day_offset: i64,
    hr_offset: i64,
    min_offset: i64,
    sec_offset: i64,
    hr_abs: Clock,
    min_abs: Clock,
    military: bool,
}

impl<'a> DateTimeContext<'a> {
    fn new(lang: &'a dyn Language, anchor: DateTime<Tz>, words: Vec<String>) -> Self {
        Self {
            lang,
            anchor,
            words,
            found: false,
            day_specified: false,
            from_flag: false,
            date: None,
            time_qualifier: String::new(),
            year_offset: 0,
            month_offset: 0,
            day_offset: 0,
            hr_offset: 0,
            min_offset: 0,
            sec_offset: 0,
            hr_abs: Clock::Unset,
            min_abs: Clock::Unset,
            military: false,
        }
    }

    /// The word `delta` positions from `idx`, or "" outside the sentence.
    fn neighbour(&self, idx: usize, delta: isize) -> String {
        idx.checked_add_signed(delta)
            .and_then(|i| self.words.get(i))
            .cloned()
            .unwrap_or_default()
    }

    fn blank(&mut self, idx: usize) {
        if let Some(word) = self.words.get_mut(idx) {
            word.clear();
        }
    }

    fn is_marker(&self, word: &str) -> bool {
        self.lang.is_marker(word)
    }

    fn qualifies(&self, word: &str, meridiem: Meridiem) -> bool {
        self.lang.time_qualifier(word) == Some(meridiem)
    }

    /// Days from the anchor's weekday forward to `word`'s weekday.
    fn days_until(&self, word: &str) -> Option<i64> {
        let target = self.lang.weekday(word)?.num_days_from_monday() as i64 + 1;
        let today = self.anchor.weekday().num_days_from_sunday() as i64;
        Some((target - today).rem_euclid(7))
    }

    fn is_followup(&self, word: &str) -> bool {
        self.lang.weekday(word).is_some()
            || self.lang.month(word).is_some()
            || matches!(
                word,
                "today" | "tomorrow" | "yesterday" | "next" | "last" | "now" | "this"
            )
    }

    // ── Date pass ───────────────────────────────────────────────────────

    /// Collect date offsets. Returns the remainder early when the text
    /// asks for "now".
    fn date_pass(&mut self) -> Option<String> {
        for idx in 0..self.words.len() {
            if self.words[idx].is_empty() {
                continue;
            }
            let prev_prev = self.neighbour(idx, -2);
            let prev = self.neighbour(idx, -1);
            let next = self.neighbour(idx, 1);
            let next_next = self.neighbour(idx, 2);

            let word = self.words[idx].trim_end_matches('s').to_string();
            let mut start = idx as isize;
            let mut used = 0usize;

            if word == "ago" && self.day_offset != 0 {
                self.day_offset = self.day_offset.saturating_neg();
                used += 1;
            }

            if word == "now" && self.date.is_none() {
                return Some(collapse_whitespace(&self.words[idx + 1..].join(" ")));
            } else if let Some(years) = self.lang.year_multiple(&next) {
                let multiplier = word
                    .parse::<f64>()
                    .ok()
                    .filter(|m| is_numeric(&word) && *m != 0.0)
                    .map_or(1, |m| m as i64);
                self.year_offset = multiplier.saturating_mul(years);
                used += 2;
            } else if word == "2" && next == "of" && self.lang.year_multiple(&next_next).is_some() {
                self.year_offset = 2 * self.lang.year_multiple(&next_next).unwrap_or(0);
                used += 3;
            } else if word == "2" && next == "of" && matches!(next_next.as_str(), "weeks" | "months" | "years") {
                match next_next.as_str() {
                    "years" => self.year_offset = 2,
                    "months" => self.month_offset = 2,
                    _ => self.day_offset = 14,
                }
                used += 3;
            } else if self.lang.time_qualifier(&word).is_some() {
                self.time_qualifier = word.clone();
            } else if let Some(offset) = self.lang.relative_day(&word).filter(|_| !self.from_flag) {
                self.day_offset = offset;
                used += 1;
            } else if word == "day" && next == "before" && next_next == "yesterday" && !self.from_flag {
                self.day_offset = -2;
                used += 3;
            } else if word == "day"
                && next == "after"
                && next_next == "tomorrow"
                && !self.from_flag
                && !starts_with_digit(&prev)
            {
                self.day_offset = 2;
                used = 3;
                if prev == "the" {
                    start -= 1;
                    used += 1;
                }
            } else if word == "day" {
                if let Some(n) = leading_count(&prev) {
                    self.day_offset = self.day_offset.saturating_add(n);
                    start -= 1;
                    used = 2;
                }
            } else if word == "week" && !self.from_flag && !prev.is_empty() {
                let offset = match prev.as_str() {
                    "next" => Some(7),
                    "last" => Some(-7),
                    _ => leading_count(&prev)
                        .map(|n| self.day_offset.saturating_add(n.saturating_mul(7))),
                };
                if let Some(offset) = offset {
                    self.day_offset = offset;
                    start -= 1;
                    used = 2;
                }
            } else if word == "month" && !self.from_flag && !prev.is_empty() {
                if let Some(offset) = relative_count(&prev) {
                    self.month_offset = offset;
                    start -= 1;
                    used = 2;
                }
            } else if word == "year" && !self.from_flag && !prev.is_empty() {
                if let Some(offset) = relative_count(&prev) {
                    self.year_offset = offset;
                    start -= 1;
                    used = 2;
                }
            } else if let Some(days) = self.days_until(&word).filter(|_| !self.from_flag) {
                self.day_offset = days;
                used = 1;
                if prev == "next" {
                    if self.day_offset <= 2 {
                        self.day_offset += 7;
                    }
                    used += 1;
                    start -= 1;
                } else if prev == "last" {
                    self.day_offset -= 7;
                    used += 1;
                    start -= 1;
                }
            } else if let Some(month) = self
                .lang
                .month(&word)
                .filter(|_| !self.from_flag || !self.lang.is_short_month(&word))
            {
                used += 1;
                let mut date = ExplicitDate {
                    month,
                    day: None,
                    year: None,
                };
                let day_before = prev == "of" && starts_with_digit(&prev_prev);
                if starts_with_digit(&prev) || day_before {
                    if day_before {
                        date.day = Some(prev_prev.clone());
                        used += 1;
                        start -= 1;
                    } else {
                        date.day = Some(prev.clone());
                    }
                    start -= 1;
                    used += 1;
                    if starts_with_digit(&next) {
                        date.year = Some(next.clone());
                        used += 1;
                    }
                    self.date = Some(date);
                } else if starts_with_digit(&next) {
                    date.day = Some(next.clone());
                    used += 1;
                    if starts_with_digit(&next_next) {
                        date.year = Some(next_next.clone());
                        used += 1;
                    }
                    self.date = Some(date);
                } else if word == "may" && matches!(next.as_str(), "i" | "we" | "be") {
                    // "may I", "it may be": the verb, not the month
                    self.date = None;
                } else {
                    self.date = Some(date);
                }
            }

            // "5 days from tomorrow", "2 weeks after next friday"
            if (word == "from" || word == "after") && self.is_followup(&next) {
                used = 2;
                self.from_flag = true;
                if next == "tomorrow" {
                    self.day_offset = self.day_offset.saturating_add(1);
                } else if next == "yesterday" {
                    self.day_offset = self.day_offset.saturating_sub(1);
                } else if let Some(days) = self.days_until(&next) {
                    self.day_offset = self.day_offset.saturating_add(days);
                } else if let Some(mut days) = self.days_until(&next_next) {
                    used = 3;
                    if next == "next" {
                        if self.day_offset <= 2 {
                            days += 7;
                        }
                        used += 1;
                        start -= 1;
                    } else if next == "last" {
                        days -= 7;
                        used += 1;
                        start -= 1;
                    }
                    self.day_offset = self.day_offset.saturating_add(days);
                }
            }

            if used > 0 {
                if start > 1 && self.words[start as usize - 1] == "this" {
                    start -= 1;
                    used += 1;
                }
                for i in start..start + used as isize {
                    if i >= 0 {
                        self.blank(i as usize);
                    }
                }
                if start > 0 && self.is_marker(&self.words[start as usize - 1]) {
                    self.blank(start as usize - 1);
                }
                self.found = true;
                self.day_specified = true;
            }
        }
        None
    }

    // ── Time pass ───────────────────────────────────────────────────────

    fn time_pass(&mut self) {
        for idx in 0..self.words.len() {
            if self.words[idx].is_empty() {
                continue;
            }
            let word = self.words[idx].clone();
            let prev_prev = self.neighbour(idx, -2);
            let prev = self.neighbour(idx, -1);
            let next = self.neighbour(idx, 1);
            let next_next = self.neighbour(idx, 2);
            let mut used = 0usize;

            if let Some(named) = self.lang.named_hour(&word) {
                match named {
                    NamedHour::Exact(hour) => {
                        self.hr_abs = Clock::At(hour as i64);
                        used += 1;
                    }
                    NamedHour::Period(hour) => {
                        if self.hr_abs == Clock::Unset {
                            self.hr_abs = Clock::At(hour as i64);
                        }
                        used += 1;
                    }
                    NamedHour::Night(hour) => {
                        if self.hr_abs == Clock::Unset {
                            self.hr_abs = Clock::At(hour as i64);
                        }
                    }
                }
            } else if word == "2"
                && next == "of"
                && matches!(next_next.as_str(), "hours" | "minutes" | "seconds")
            {
                match next_next.as_str() {
                    "hours" => self.hr_offset = 2,
                    "minutes" => self.min_offset = 2,
                    _ => self.sec_offset = 2,
                }
                used += 3;
            } else if word == "minute" && prev == "in" {
                self.min_offset = 1;
                self.blank(idx - 1);
                used += 1;
            } else if word == "second" && prev == "in" {
                self.sec_offset = 1;
                self.blank(idx - 1);
                used += 1;
            } else if word == "hour" && (self.is_marker(&prev) || self.is_marker(&prev_prev)) {
                // "half an hour", "quarter of an hour", "within the hour"
                if prev == "half" {
                    self.min_offset = 30;
                } else if prev == "quarter" {
                    self.min_offset = 15;
                } else if prev_prev == "quarter" {
                    self.min_offset = 15;
                    if idx > 2 && self.is_marker(&self.words[idx - 3]) {
                        self.blank(idx - 3);
                    }
                    self.blank(idx - 2);
                } else {
                    self.hr_offset = 1;
                }
                if self.is_marker(&prev_prev) {
                    self.blank(idx - 2);
                    if prev_prev == "this" {
                        self.day_specified = true;
                    }
                }
                self.blank(idx - 1);
                used += 1;
                self.hr_abs = Clock::Relative;
                self.min_abs = Clock::Relative;
            } else if starts_with_digit(&word) {
                used = self.clock_time(idx, &word);
            }

            if used > 0 {
                self.consume_time(idx, used, &prev_prev, &prev);
            }
        }
    }

    /// Read a numeric time at `idx`: "7:30", "5pm", "0800 hours", "in 10
    /// minutes". Returns how many words starting at `idx` it used.
    fn clock_time(&mut self, idx: usize, word: &str) -> usize {
        let prev_prev = self.neighbour(idx, -2);
        let prev = self.neighbour(idx, -1);
        let next = self.neighbour(idx, 1);
        let next_next = self.neighbour(idx, 2);
        let next3 = self.neighbour(idx, 3);
        let qualifier = self.time_qualifier.clone();

        let mut used = 0usize;
        let mut is_time = true;
        let mut str_hh = String::new();
        let mut str_mm = String::new();
        let mut remainder = String::new();

        if [&next, &next_next, &prev, &prev_prev, &next3]
            .iter()
            .any(|w| w.as_str() == "tonight")
        {
            remainder = "pm".to_string();
            used += 1;
            if prev == "tonight" {
                self.blank(idx - 1);
            }
            if prev_prev == "tonight" {
                self.blank(idx - 2);
            }
            if next_next == "tonight" {
                used += 1;
            }
            if next3 == "tonight" {
                used += 1;
            }
        }

        if word.contains(':') {
            let (hh, mm, suffix) = split_clock(word);
            str_hh = hh;
            str_mm = mm;
            if let Some(suffix) = suffix {
                remainder = suffix;
            }
            if remainder.is_empty() {
                let next_word = next.replace('.', "");
                let period = |w: &str| match w {
                    "morning" => Some("am"),
                    "afternoon" | "evening" => Some("pm"),
                    _ => None,
                };
                if next_word == "am" || next_word == "pm" {
                    remainder = next_word;
                    used += 1;
                } else if let Some(p) = period(next3.as_str()).filter(|_| next == "in" && next_next == "the") {
                    remainder = p.to_string();
                    used += 3;
                } else if let Some(p) = period(next_next.as_str()).filter(|_| next == "in") {
                    remainder = p.to_string();
                    used += 2;
                } else if let Some(p) = period(next_next.as_str()).filter(|_| next == "this") {
                    remainder = p.to_string();
                    used = 2;
                    self.day_specified = true;
                } else if next == "at" && next_next == "night" {
                    let late = str_hh.parse::<i64>().is_ok_and(|h| h > 5);
                    remainder = if late { "pm" } else { "am" }.to_string();
                    used += 2;
                } else if !qualifier.is_empty() {
                    self.military = true;
                    if let Ok(hh) = str_hh.parse::<i64>() {
                        // the doubled hour reads as invalid and leaves the
                        // qualifier word to set the time
                        if hh <= 12 && self.qualifies(&qualifier, Meridiem::Pm) {
                            str_hh.push_str(&(hh + 12).to_string());
                        }
                    }
                }
            }
        } else {
            let (digits, rest): (String, String) = word.chars().partition(|c| c.is_ascii_digit());
            remainder = rest;
            if remainder.is_empty() {
                remainder = next.replace('.', "").trim().to_string();
            }
            let Ok(num) = digits.parse::<i64>() else {
                return 0;
            };

            let is_unit = |rest: &str, units: [&str; 2]| {
                units.iter().any(|u| *u == next || *u == rest)
            };

            if remainder == "pm" || next == "pm" {
                str_hh = digits;
                remainder = "pm".to_string();
                used = 1;
            } else if remainder == "am" || next == "am" {
                str_hh = digits;
                remainder = "am".to_string();
                used = 1;
            } else if self.lang.is_recurring_marker(&remainder)
                || self.lang.is_recurring_marker(&next)
                || self.lang.is_recurring_marker(&next_next)
            {
                // "7 on mondays", "3 this friday"
                str_hh = digits;
                used = 1;
            } else if num > 100 && (prev == "o" || prev == "oh") {
                // "oh eight hundred hours"
                str_hh = (num / 100).to_string();
                str_mm = (num % 100).to_string();
                self.military = true;
                if next == "hours" {
                    used += 1;
                }
            } else if is_unit(&remainder, ["hours", "hour"]) && !word.starts_with('0') && !(100..=2400).contains(&num) {
                self.hr_offset = num;
                used = 2;
                is_time = false;
                self.hr_abs = Clock::Relative;
                self.min_abs = Clock::Relative;
            } else if is_unit(&remainder, ["minutes", "minute"]) {
                self.min_offset = num;
                used = 2;
                is_time = false;
                self.hr_abs = Clock::Relative;
                self.min_abs = Clock::Relative;
            } else if is_unit(&remainder, ["seconds", "second"]) {
                self.sec_offset = num;
                used = 2;
                is_time = false;
                self.hr_abs = Clock::Relative;
                self.min_abs = Clock::Relative;
            } else if num > 100 {
                // "1730", "3300 hours"
                str_hh = (num / 100).to_string();
                str_mm = (num % 100).to_string();
                self.military = true;
                if is_unit(&remainder, ["hours", "hour"]) {
                    used += 1;
                }
            } else if starts_with_digit(&next) {
                // "04 38 hours"
                str_hh = digits;
                str_mm = next.clone();
                self.military = true;
                used += 1;
                if matches!(next_next.as_str(), "hours" | "hour")
                    || matches!(remainder.as_str(), "hours" | "hour")
                {
                    used += 1;
                }
            } else if next.is_empty()
                || next == "o'clock"
                || (next == "in" && (next_next == "the" || next_next == qualifier))
                || next == "tonight"
                || next_next == "tonight"
            {
                str_hh = digits;
                str_mm = "00".to_string();
                if next == "o'clock" {
                    used += 1;
                }
                if next == "in" || next_next == "in" {
                    used += if next == "in" { 1 } else { 2 };
                    if !next_next.is_empty()
                        && (qualifier.contains(next_next.as_str()) || qualifier.contains(next3.as_str()))
                    {
                        if self.qualifies(&next_next, Meridiem::Pm) || self.qualifies(&next3, Meridiem::Pm) {
                            remainder = "pm".to_string();
                            used += 1;
                        }
                        if self.qualifies(&next_next, Meridiem::Am) || self.qualifies(&next3, Meridiem::Am) {
                            remainder = "am".to_string();
                            used += 1;
                        }
                    }
                }
                if !qualifier.is_empty() {
                    match self.lang.time_qualifier(&qualifier) {
                        Some(Meridiem::Pm) => remainder = "pm".to_string(),
                        Some(Meridiem::Am) => remainder = "am".to_string(),
                        None => self.military = true,
                    }
                    used += 1;
                }
            } else {
                is_time = false;
            }
        }

        let (Some(mut hh), Some(mm)) = (clock_field(&str_hh), clock_field(&str_mm)) else {
            return 0;
        };
        if remainder == "pm" && hh < 12 {
            hh += 12;
        }
        if remainder == "am" && hh >= 12 {
            hh -= 12;
        }

        const UNIT_REMAINDERS: &[&str] = &[
            "am", "pm", "hours", "minutes", "second", "seconds", "hour", "minute",
        ];
        if !self.military
            && !UNIT_REMAINDERS.contains(&remainder.as_str())
            && (!self.day_specified || self.day_offset == 0)
        {
            // no am/pm: the next occurrence of the hour on a 12-hour dial
            let (now_h, now_m) = (self.anchor.hour() as i64, self.anchor.minute() as i64);
            if now_h > hh || (now_h == hh && now_m >= mm) {
                if now_h < hh.saturating_add(12) {
                    hh = hh.saturating_add(12);
                } else {
                    self.day_offset = self.day_offset.saturating_add(1);
                }
            }
        }

        if self.qualifies(&qualifier, Meridiem::Pm) && hh < 12 {
            hh += 12;
        }

        if hh > 24 || mm > 59 {
            is_time = false;
            used = 0;
        }
        if is_time {
            self.hr_abs = Clock::At(hh);
            self.min_abs = Clock::At(mm);
            used += 1;
        }
        used
    }

    /// Blank `used` words from `idx` along with any "oh", "early", "late"
    /// or marker words leading into them.
    fn consume_time(&mut self, idx: usize, used: usize, prev_prev: &str, prev: &str) {
        for i in idx..idx + used {
            self.blank(i);
        }

        if prev == "o" || prev == "oh" {
            if let Some(pos) = self.words.iter().position(|w| w == prev) {
                self.blank(pos);
            }
        }

        let mut at = idx;
        if prev == "early" || prev == "late" {
            self.hr_offset = if prev == "early" { -1 } else { 1 };
            self.blank(idx - 1);
            at -= 1;
        }
        if at > 0 && self.is_marker(prev) {
            self.blank(at - 1);
            if prev == "this" {
                self.day_specified = true;
            }
        }
        if at > 1 && self.is_marker(prev_prev) {
            self.blank(at - 2);
            if prev_prev == "this" {
                self.day_specified = true;
            }
        }
        self.found = true;
    }

    // ── Assembly ────────────────────────────────────────────────────────

    fn date_found(&self) -> bool {
        self.found
            || self.date.is_some()
            || self.year_offset != 0
            || self.month_offset != 0
            || self.hr_offset != 0
            || self.hr_abs.is_set()
            || self.min_offset != 0
            || self.min_abs.is_set()
            || self.sec_offset != 0
    }

    fn assemble(mut self, default_time: Option<NaiveTime>) -> Option<ExtractedDateTime> {
        if !self.date_found() {
            return None;
        }

        let anchor = self.anchor.naive_local();
        let mut extracted = anchor.trunc_subsecs(0);

        if let Some(date) = &self.date {
            extracted = extracted.date().and_time(NaiveTime::MIN);
            if let Some(resolved) = date.resolve(extracted) {
                extracted = resolved;
            }
        } else if self.hr_offset == 0 && self.min_offset == 0 && self.sec_offset == 0 {
            extracted = extracted.date().and_time(NaiveTime::MIN);
        }

        extracted = add_months(extracted, self.year_offset.checked_mul(12)?)?;
        extracted = add_months(extracted, self.month_offset)?;
        extracted = extracted.checked_add_signed(TimeDelta::try_days(self.day_offset)?)?;

        if self.hr_abs != Clock::Relative && self.min_abs != Clock::Relative {
            let (hour, minute) = match default_time {
                Some(t) if self.hr_abs == Clock::Unset && self.min_abs == Clock::Unset => {
                    (t.hour() as i64, t.minute() as i64)
                }
                _ => (self.hr_abs.value(), self.min_abs.value()),
            };
            extracted = extracted
                .checked_add_signed(TimeDelta::try_hours(hour)?)?
                .checked_add_signed(TimeDelta::try_minutes(minute)?)?;
            if (hour != 0 || minute != 0)
                && self.date.is_none()
                && !self.day_specified
                && anchor > extracted
            {
                extracted = extracted.checked_add_signed(TimeDelta::days(1))?;
            }
        }
        extracted = extracted
            .checked_add_signed(TimeDelta::try_hours(self.hr_offset)?)?
            .checked_add_signed(TimeDelta::try_minutes(self.min_offset)?)?
            .checked_add_signed(TimeDelta::try_seconds(self.sec_offset)?)?;

        let tz = self.anchor.timezone();
        let datetime = tz
            .from_local_datetime(&extracted)
            .earliest()
            .or_else(|| {
                let shifted = extracted.checked_add_signed(TimeDelta::hours(1))?;
                tz.from_local_datetime(&shifted).earliest()
            })?;

        // "and" left between two consumed phrases
        for idx in 1..self.words.len().saturating_sub(1) {
            if self.words[idx] == "and" && self.words[idx - 1].is_empty() && self.words[idx + 1].is_empty() {
                self.words[idx].clear();
            }
        }

        Some(ExtractedDateTime {
            datetime,
            remainder: collapse_whitespace(&self.words.join(" ")),
        })
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// A count written as digits before a unit ("5" days).
fn leading_count(word: &str) -> Option<i64> {
    if starts_with_digit(word) {
        word.parse().ok()
    } else {
        None
    }
}

/// "next" month, "last" year, or a digit count.
fn relative_count(word: &str) -> Option<i64> {
    match word {
        "next" => Some(1),
        "last" => Some(-1),
        _ => leading_count(word),
    }
}

/// Split "7:30pm" into hour digits, minute digits and whatever follows.
///
/// The character that ends the digits is dropped, so "10:45pm" leaves "m".
fn split_clock(word: &str) -> (String, String, Option<String>) {
    let mut hh = String::new();
    let mut mm = String::new();
    let mut stage = 0;
    for (i, c) in word.char_indices() {
        match stage {
            0 if c.is_ascii_digit() => hh.push(c),
            0 if c == ':' => stage = 1,
            1 if c.is_ascii_digit() => mm.push(c),
            0 | 1 => stage = 2,
            _ => return (hh, mm, Some(word[i..].replace('.', ""))),
        }
    }
    (hh, mm, None)
}

/// An hour or minute field; empty means zero.
fn clock_field(digits: &str) -> Option<i64> {
    if digits.is_empty() {
        Some(0)
    } else {
        digits.parse().ok()
    }
}

fn add_months(dt: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let n = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        dt.checked_add_months(n)
    } else {
        dt.checked_sub_months(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizeOptions;
    use crate::lexicon::en::English;
    use crate::normalize::normalize;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Tz> {
        Tz::UTC.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn anchor() -> DateTime<Tz> {
        at(2017, 6, 27, 13, 4, 0)
    }

    fn extract_at(text: &str, anchor: DateTime<Tz>) -> Option<(String, String)> {
        let normalized = normalize(&English, text, &NormalizeOptions::default());
        extract_datetime(&English, &normalized, &DateTimeOptions::anchored(anchor)).map(|found| {
            (
                found.datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
                found.remainder,
            )
        })
    }

    fn check(text: &str, expected: &str, leftover: &str) {
        check_at(text, anchor(), expected, leftover);
    }

    fn check_at(text: &str, anchor: DateTime<Tz>, expected: &str, leftover: &str) {
        let (datetime, remainder) =
            extract_at(text, anchor).unwrap_or_else(|| panic!("no datetime in {text:?}"));
        assert_eq!(datetime, expected, "datetime for {text:?}");
        assert_eq!(remainder, leftover, "remainder for {text:?}");
    }

    // ── word cleaning ───────────────────────────────────────────────────

    #[test]
    fn test_clean_words() {
        assert_eq!(
            clean_words(&English, "On the 3rd, at seven o clock?"),
            vec!["on", "3", "at", "7", "o'clock"]
        );
        assert_eq!(clean_words(&English, "tomorrow's weather"), vec!["tomorrow", "weather"]);
        assert_eq!(clean_words(&English, "in 2 seconds"), vec!["in", "2", "seconds"]);
    }

    #[test]
    fn test_split_clock() {
        assert_eq!(split_clock("7:30"), ("7".into(), "30".into(), None));
        assert_eq!(split_clock("10:45pm"), ("10".into(), "45".into(), Some("m".into())));
    }

    // ── now & relative offsets ──────────────────────────────────────────

    #[test]
    fn test_now() {
        check("now is the time", "2017-06-27 13:04:00", "is time");
    }

    #[test]
    fn test_relative_units() {
        check("in a second", "2017-06-27 13:04:01", "");
        check("in a minute", "2017-06-27 13:05:00", "");
        check("in a couple minutes", "2017-06-27 13:06:00", "");
        check("in a couple of hours", "2017-06-27 15:04:00", "");
        check("in a couple weeks", "2017-07-11 00:00:00", "");
        check("in a couple of weeks", "2017-07-11 00:00:00", "");
        check("in an hour", "2017-06-27 14:04:00", "");
        check("i want it within the hour", "2017-06-27 14:04:00", "i want it");
        check("Set the ambush in 1 minute", "2017-06-27 13:05:00", "set ambush");
        check("Set the ambush for half an hour", "2017-06-27 13:34:00", "set ambush");
        check("in a quarter of an hour", "2017-06-27 13:19:00", "");
    }

    #[test]
    fn test_relative_glued_units() {
        let anchor = at(2017, 6, 27, 10, 1, 2);
        check_at("lets meet in 5minutes", anchor, "2017-06-27 10:06:02", "lets meet");
        check_at("lets meet in 5 seconds", anchor, "2017-06-27 10:01:07", "lets meet");
        check_at("lets meet in 2hours", anchor, "2017-06-27 12:01:02", "lets meet");
    }

    #[test]
    fn test_year_multiples() {
        check("in a decade", "2027-06-27 00:00:00", "");
        check("in 5 decades", "2067-06-27 00:00:00", "");
        check("in a couple of decades", "2037-06-27 00:00:00", "");
        check("in a couple decades", "2037-06-27 00:00:00", "");
        check("next decade", "2027-06-27 00:00:00", "");
        check("in a century", "2117-06-27 00:00:00", "");
        check("in a millennium", "3017-06-27 00:00:00", "");
    }

    // ── days ────────────────────────────────────────────────────────────

    #[test]
    fn test_relative_days() {
        check("what is tomorrow's weather", "2017-06-28 00:00:00", "what is weather");
        check("day after tomorrow", "2017-06-29 00:00:00", "");
        check(
            "What is the day after tomorrow's weather?",
            "2017-06-29 00:00:00",
            "what is weather",
        );
        check("what day was the day before yesterday", "2017-06-25 00:00:00", "what day was");
        check("1 day ago", "2017-06-26 00:00:00", "");
        check("2 days from yesterday", "2017-06-28 00:00:00", "");
        check("2 days from tomorrow", "2017-06-30 00:00:00", "");
        check("3 days after tomorrow", "2017-07-01 00:00:00", "");
        check("5 years from today", "2022-06-27 00:00:00", "");
    }

    #[test]
    fn test_day_counts_with_and() {
        check(
            "remind me to call mom in 8 weeks and 2 days",
            "2017-08-24 00:00:00",
            "remind me to call mom",
        );
        check(
            "set up the visit for 2 weeks and 6 days from Saturday",
            "2017-07-21 00:00:00",
            "set up visit",
        );
        check("in 4 years and 4 days", "2021-07-01 00:00:00", "");
        check("in 2 years and 2 days", "2019-06-29 00:00:00", "");
        check("in 3 months", "2017-09-27 00:00:00", "");
        check("next week", "2017-07-04 00:00:00", "");
    }

    #[test]
    fn test_weekdays() {
        check("what is the weather on tuesday", "2017-06-27 00:00:00", "what is weather");
        check("On Monday, order pie from the bakery", "2017-07-03 00:00:00", "order pie from bakery");
        check("What's the weather next Friday?", "2017-06-30 00:00:00", "what weather");
        check("what is the weather next wednesday", "2017-07-05 00:00:00", "what is weather");
        check("what is the weather next thursday", "2017-07-06 00:00:00", "what is weather");
        check("What's the weather this Thursday?", "2017-06-29 00:00:00", "what weather");
        check("on last monday what was the weather", "2017-06-26 00:00:00", "what was weather");
        check("next tuesday", "2017-07-04 00:00:00", "");
        check(
            "what is the weather 2 weeks from next friday",
            "2017-07-14 00:00:00",
            "what is weather",
        );
        check(
            "Play Rick Astley music 2 days from Friday",
            "2017-07-02 00:00:00",
            "play rick astley music",
        );
    }

    // ── calendar dates ──────────────────────────────────────────────────

    #[test]
    fn test_explicit_dates() {
        check("Buy fireworks on the 4th of July", "2017-07-04 00:00:00", "buy fireworks");
        check("remind me to call mom on august 3rd", "2017-08-03 00:00:00", "remind me to call mom");
        check("december 3", "2017-12-03 00:00:00", "");
        check(
            "update my calendar for a morning meeting with julius on march 4th",
            "2018-03-04 08:00:00",
            "update my calendar meeting with julius",
        );
        check(
            "on the evening of june 5th 2017 remind me to call my mother",
            "2017-06-05 19:00:00",
            "remind me to call my mother",
        );
    }

    #[test]
    fn test_may_the_verb() {
        let anchor = at(2019, 7, 4, 8, 1, 2);
        let opts = DateTimeOptions::anchored(anchor);
        let found = extract_datetime(&English, "May I know what time it is tomorrow", &opts).unwrap();
        assert_eq!(found.datetime, at(2019, 7, 5, 0, 0, 0));

        let found = extract_datetime(&English, "May I when 10 o'clock is", &opts).unwrap();
        assert_eq!(found.datetime, at(2019, 7, 4, 10, 0, 0));

        let found = extract_datetime(
            &English,
            "What time will it be in two hundred minutes",
            &opts,
        )
        .unwrap();
        assert_eq!(found.datetime, at(2019, 7, 4, 11, 21, 2));

        let may = DateTimeOptions::anchored(at(2019, 5, 2, 10, 11, 20));
        let found = extract_datetime(&English, "On 24th of may I want a reminder", &may).unwrap();
        assert_eq!(found.datetime, at(2019, 5, 24, 0, 0, 0));
    }

    // ── clock times ─────────────────────────────────────────────────────

    #[test]
    fn test_clock_times() {
        check("Remind me at 10:45 pm", "2017-06-27 22:45:00", "remind me");
        check("remind me to call mom at 7am", "2017-06-28 07:00:00", "remind me to call mom");
        check(
            "remind me tomorrow to call mom at 7am",
            "2017-06-28 07:00:00",
            "remind me to call mom",
        );
        check("remind me to call mom at 7 o'clock", "2017-06-27 19:00:00", "remind me to call mom");
        check(
            "remind me to call mom at 7 o'clock in the morning",
            "2017-06-28 07:00:00",
            "remind me to call mom",
        );
        check("lets meet at 8 a.m.", "2017-06-28 08:00:00", "lets meet");
        check(
            "Skype Mom at 12:45 pm next Thursday",
            "2017-07-06 12:45:00",
            "skype mom",
        );
    }

    #[test]
    fn test_military_times() {
        check("Begin the invasion at 1730", "2017-06-27 17:30:00", "begin invasion");
        check("Begin the invasion at 0630", "2017-06-28 06:30:00", "begin invasion");
        check("Begin the invasion at 06 30 hours", "2017-06-28 06:30:00", "begin invasion");
        check(
            "Begin the invasion at 03 45 on Thursday",
            "2017-06-29 03:45:00",
            "begin invasion",
        );
        check(
            "Begin the invasion at o 800 hours on Thursday",
            "2017-06-29 08:00:00",
            "begin invasion",
        );
        check("Begin the invasion on Thursday at 0500", "2017-06-29 05:00:00", "begin invasion");
        check("wednesday at 0700 hours", "2017-06-28 07:00:00", "");
    }

    #[test]
    fn test_times_with_days() {
        check(
            "remind me to call mom Thursday evening at 7 o'clock",
            "2017-06-29 19:00:00",
            "remind me to call mom",
        );
        check(
            "remind me to call mom Thursday morning at 7 o'clock",
            "2017-06-29 07:00:00",
            "remind me to call mom",
        );
        check(
            "remind me to call mom at 7:00 Thursday morning",
            "2017-06-29 07:00:00",
            "remind me to call mom",
        );
        check(
            "remind me to call mom at 7:00 Thursday evening",
            "2017-06-29 19:00:00",
            "remind me to call mom at 7:00",
        );
        check(
            "remind me to call mom at 8 Wednesday evening",
            "2017-06-28 20:00:00",
            "remind me to call mom",
        );
        check(
            "remind me to call mom at 8 Wednesday in the evening",
            "2017-06-28 20:00:00",
            "remind me to call mom",
        );
        check(
            "remind me to call mom Wednesday evening at 8",
            "2017-06-28 20:00:00",
            "remind me to call mom",
        );
        check(
            "Begin the invasion at 3:45 pm on Thursday",
            "2017-06-29 15:45:00",
            "begin invasion",
        );
        check(
            "Begin the invasion at 8 o'clock in the evening on Thursday",
            "2017-06-29 20:00:00",
            "begin invasion",
        );
        check(
            "Begin the invasion at 8 in the evening on Thursday",
            "2017-06-29 20:00:00",
            "begin invasion",
        );
        check("Begin the invasion on Thursday at noon", "2017-06-29 12:00:00", "begin invasion");
        check("Begin the invasion on Thursday at midnight", "2017-06-29 00:00:00", "begin invasion");
        check(
            "remind me to call mom at 10am 2 days after this saturday",
            "2017-07-03 10:00:00",
            "remind me to call mom",
        );
        check(
            "remind me to call mom at 10am 2 days after next saturday",
            "2017-07-10 10:00:00",
            "remind me to call mom",
        );
        check(
            "remind me to call mom at 10 next saturday",
            "2017-07-01 10:00:00",
            "remind me to call mom",
        );
    }

    #[test]
    fn test_day_with_ambiguous_hour() {
        check("set an alarm wednesday at 7 o'clock", "2017-06-28 07:00:00", "set alarm");
        check("set an alarm for today at 7 o'clock", "2017-06-27 19:00:00", "set alarm");
        check("i had dinner yesterday at 6", "2017-06-26 06:00:00", "i had dinner");
        check("i had dinner yesterday at 6 am", "2017-06-26 06:00:00", "i had dinner");
        check("i had dinner yesterday at 6 pm", "2017-06-26 18:00:00", "i had dinner");
        check(
            "set an alarm for wednesday at 3 o'clock in the afternoon",
            "2017-06-28 15:00:00",
            "set alarm",
        );
    }

    // ── periods of the day ──────────────────────────────────────────────

    #[test]
    fn test_named_periods() {
        check("what's the weather this afternoon", "2017-06-27 15:00:00", "what is weather");
        check("what was this morning's weather", "2017-06-27 08:00:00", "what was weather");
        check("what is the weather on friday morning", "2017-06-30 08:00:00", "what is weather");
        check("lets meet tonight", "2017-06-27 22:00:00", "lets meet tonight");
        check("lets meet later at night", "2017-06-27 22:00:00", "lets meet later at night");
        check(
            "what's the weather like tomorrow night",
            "2017-06-28 22:00:00",
            "what is weather like night",
        );
        check(
            "set an alarm for this evening at 7:00",
            "2017-06-27 19:00:00",
            "set alarm at 7:00",
        );
    }

    #[test]
    fn test_tonight_times() {
        check("lets meet at 8:00 tonight", "2017-06-27 20:00:00", "lets meet");
        check("for 8 tonight", "2017-06-27 20:00:00", "");
        check("for 8:30pm tonight", "2017-06-27 20:30:00", "");
        check("set an alarm for tonight 9:30", "2017-06-27 21:30:00", "set alarm");
        check("set an alarm at 9:00 for tonight", "2017-06-27 21:00:00", "set alarm");
        check("set an alarm at 9 o'clock for tonight", "2017-06-27 21:00:00", "set alarm");
        check(
            "remind me about the game tonight at 11:30",
            "2017-06-27 23:30:00",
            "remind me about game",
        );
        check("remind me to call mom at 7 o'clock tonight", "2017-06-27 19:00:00", "remind me to call mom");
        check("remind me to call mom this evening at 7 o'clock", "2017-06-27 19:00:00", "remind me to call mom");
    }

    #[test]
    fn test_recurring_schedules() {
        check("set alarm for 9 on weekdays", "2017-06-27 21:00:00", "set alarm weekdays");
        check("set alarm at 7:30 on weekdays", "2017-06-27 19:30:00", "set alarm on weekdays");
    }

    #[test]
    fn test_ambiguous_hour_follows_anchor() {
        let text = "feed fish at 10 o'clock";
        check_at(text, at(2017, 6, 27, 8, 1, 2), "2017-06-27 10:00:00", "feed fish");
        check_at(text, at(2017, 6, 27, 12, 1, 2), "2017-06-27 22:00:00", "feed fish");
        check_at(text, at(2017, 6, 27, 20, 1, 2), "2017-06-27 22:00:00", "feed fish");
    }

    // ── options ─────────────────────────────────────────────────────────

    #[test]
    fn test_default_time_applies_to_bare_dates() {
        let opts = DateTimeOptions::anchored(anchor())
            .with_default_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        let found = extract_datetime(&English, "what is the weather on friday", &opts).unwrap();
        assert_eq!(found.datetime, at(2017, 6, 30, 9, 0, 0));

        let found = extract_datetime(&English, "on friday at 7am", &opts).unwrap();
        assert_eq!(found.datetime, at(2017, 6, 30, 7, 0, 0));
    }

    #[test]
    fn test_result_keeps_anchor_timezone() {
        let anchor = Tz::America__New_York
            .with_ymd_and_hms(2017, 6, 27, 13, 4, 0)
            .unwrap();
        let opts = DateTimeOptions::anchored(anchor);
        let found = extract_datetime(&English, "tomorrow at 7am", &opts).unwrap();
        assert_eq!(found.datetime.timezone(), Tz::America__New_York);
        assert_eq!(found.datetime.to_rfc3339(), "2017-06-28T07:00:00-04:00");
    }

    #[test]
    fn test_now_truncates_subseconds() {
        let anchor = anchor() + TimeDelta::microseconds(1234);
        let found = extract_datetime(&English, "now", &DateTimeOptions::anchored(anchor)).unwrap();
        assert_eq!(found.datetime, at(2017, 6, 27, 13, 4, 0));
        assert_eq!(found.remainder, "");
    }

    // ── no match ────────────────────────────────────────────────────────

    #[test]
    fn test_no_datetime() {
        let opts = DateTimeOptions::anchored(anchor());
        for text in ["", " ", "feed the fish", "day", "week", "month"] {
            assert!(extract_datetime(&English, text, &opts).is_none(), "for {text:?}");
        }
    }

    #[test]
    fn test_out_of_range_offsets_are_none() {
        let opts = DateTimeOptions::anchored(anchor());
        for text in [
            "in 1000000000000000000 years",
            "in 2000000000000000000 weeks",
            "in 100000000000000000 centuries",
            "in 9223372036854775807 days from tomorrow",
            "9223372036854775807 days ago",
            "in 9223372036854775807 hours",
        ] {
            assert!(extract_datetime(&English, text, &opts).is_none(), "for {text:?}");
        }
    }

    #[test]
    fn test_unresolvable_date_keeps_midnight() {
        let found = extract_datetime(&English, "february 30", &DateTimeOptions::anchored(anchor())).unwrap();
        assert_eq!(found.datetime, at(2017, 6, 27, 0, 0, 0));
    }
}
