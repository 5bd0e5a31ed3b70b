//! Number extraction from free text.
//!
//! Recognizes digit literals, spelled cardinals ("nine hundred ninety
//! nine"), scale words under short or long scale, ordinals, fractions
//! ("three quarters", "2/3"), decimal markers ("three point five"),
//! negatives and the "and a half" construction.
//!
//! # Ambiguity policy
//!
//! Ordinal words can be ranks or fractions: "the third" is 3 or 1/3. The
//! caller chooses with [`Ordinals`]:
//!
//! | text | `Rank` | `Fraction` | `Ambiguous` |
//! |---|---|---|---|
//! | "the third test" | 3 | 1/3 | no match |
//! | "sixth third" | 3 | 1/6/3 | no match |
//! | "2 fifths" | 2 | 0.4 | 2 |
//! | "one third of a cup" | 3 | 1/3 | 1 |
//! | "thirty second" | 32 | 30 | 30 |
//!
//! Digit ordinals ("1st", "31st") always read as their rank.
//!
//! # Functions
//!
//! - [`extract_number`]: the first number in the text
//! - [`extract_numbers`]: every number, left to right
//! - [`extract_number_match`] / [`extract_number_matches`]: the same, with spans
//! - [`convert_words_to_numbers`]: rewrite number phrases as digits

use serde::Serialize;

use crate::config::{NumberOptions, Ordinals};
use crate::lexicon::NumberLexicon;
use crate::token::{join_words, partition_tokens, tokenize, Token};

/// Stands in for tokens already claimed by an earlier match.
const PLACEHOLDER: &str = "<placeholder>";

// ── Results ─────────────────────────────────────────────────────────────────

/// A number found in text, with the token span it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberMatch {
    /// The resolved value.
    pub value: f64,
    /// Index of the first token of the span.
    pub start_index: usize,
    /// Index of the last token of the span (inclusive).
    pub end_index: usize,
    /// The words of the span, space-joined.
    pub text: String,
    /// Whether an ordinal was read as a rank.
    pub is_ordinal: bool,
    /// Whether a fraction word, `a/b` literal or "and a half" contributed.
    pub is_fraction: bool,
}

/// A resolved value and the tokens that produced it.
#[derive(Debug, Clone)]
struct Candidate {
    value: f64,
    tokens: Vec<Token>,
    is_ordinal: bool,
    is_fraction: bool,
}

impl Candidate {
    fn start_index(&self) -> Option<usize> {
        self.tokens.first().map(|t| t.index)
    }

    fn end_index(&self) -> Option<usize> {
        self.tokens.last().map(|t| t.index)
    }

    fn to_match(&self) -> Option<NumberMatch> {
        Some(NumberMatch {
            value: self.value,
            start_index: self.start_index()?,
            end_index: self.end_index()?,
            text: join_words(&self.tokens),
            is_ordinal: self.is_ordinal,
            is_fraction: self.is_fraction,
        })
    }
}

// ── Public entry points ─────────────────────────────────────────────────────

/// Extract the first number in `text`.
///
/// Returns `None` when no number is present. `Some(0.0)` is a real match.
///
/// # Examples
///
/// ```
/// use lingua_engine::config::NumberOptions;
/// use lingua_engine::lexicon::en::English;
/// use lingua_engine::numbers::extract_number;
///
/// let opts = NumberOptions::default();
/// assert_eq!(extract_number(&English, "two million five hundred thousand tons", &opts), Some(2_500_000.0));
/// assert_eq!(extract_number(&English, "fraggle zero", &opts), Some(0.0));
/// assert_eq!(extract_number(&English, "no numbers here", &opts), None);
/// ```
pub fn extract_number(lex: &dyn NumberLexicon, text: &str, opts: &NumberOptions) -> Option<f64> {
    let mut tokens = tokenize(&prepare(text, opts).to_lowercase());
    extract_one(lex, &mut tokens, opts.short_scale, opts.ordinals, true).map(|c| c.value)
}

/// Like [`extract_number`], but also reports where the number was found.
pub fn extract_number_match(
    lex: &dyn NumberLexicon,
    text: &str,
    opts: &NumberOptions,
) -> Option<NumberMatch> {
    let mut tokens = tokenize(&prepare(text, opts).to_lowercase());
    extract_one(lex, &mut tokens, opts.short_scale, opts.ordinals, true)?.to_match()
}

/// Extract every number in `text`, ordered by position.
///
/// # Examples
///
/// ```
/// use lingua_engine::config::NumberOptions;
/// use lingua_engine::lexicon::en::English;
/// use lingua_engine::numbers::extract_numbers;
///
/// let found = extract_numbers(&English, "twenty 20 twenty 2", &NumberOptions::default());
/// assert_eq!(found, vec![20.0, 20.0, 22.0]);
/// ```
pub fn extract_numbers(lex: &dyn NumberLexicon, text: &str, opts: &NumberOptions) -> Vec<f64> {
    extract_number_matches(lex, text, opts)
        .into_iter()
        .map(|m| m.value)
        .collect()
}

/// Like [`extract_numbers`], but also reports where each number was found.
pub fn extract_number_matches(
    lex: &dyn NumberLexicon,
    text: &str,
    opts: &NumberOptions,
) -> Vec<NumberMatch> {
    let mut tokens = tokenize(&prepare(text, opts));
    extract_all(lex, &mut tokens, opts.short_scale, opts.ordinals, true)
        .iter()
        .filter_map(Candidate::to_match)
        .collect()
}

/// Rewrite every number phrase in `text` as digits.
///
/// Words outside number phrases are kept as written. A phrase that is a
/// single digit literal keeps its original spelling ("0630" stays "0630").
///
/// ```
/// use lingua_engine::config::Ordinals;
/// use lingua_engine::lexicon::en::English;
/// use lingua_engine::numbers::convert_words_to_numbers;
///
/// let text = convert_words_to_numbers(&English, "in twenty two minutes", true, Ordinals::Ambiguous);
/// assert_eq!(text, "in 22 minutes");
/// ```
pub fn convert_words_to_numbers(
    lex: &dyn NumberLexicon,
    text: &str,
    short_scale: bool,
    ordinals: Ordinals,
) -> String {
    let mut tokens = tokenize(text);
    let found = extract_all(lex, &mut tokens, short_scale, ordinals, true);
    let mut pending = found.iter().peekable();
    let mut words = Vec::with_capacity(tokens.len());

    for token in &tokens {
        let Some(next) = pending.peek() else {
            words.push(token.word.clone());
            continue;
        };
        let (Some(start), Some(end)) = (next.start_index(), next.end_index()) else {
            pending.next();
            words.push(token.word.clone());
            continue;
        };
        if token.index < start {
            words.push(token.word.clone());
            continue;
        }
        if token.index == start {
            words.push(render(next));
        }
        if token.index == end {
            pending.next();
        }
    }
    words.join(" ")
}

/// Whether `word` parses as a float literal.
pub fn is_numeric(word: &str) -> bool {
    !word.is_empty() && word.parse::<f64>().is_ok()
}

/// Text for a value: integral values print without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

// ── Extraction passes ───────────────────────────────────────────────────────

/// Apply a non-default decimal separator between digits: "4,4" → "4.4".
fn prepare(text: &str, opts: &NumberOptions) -> String {
    if opts.decimal == '.' {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let between_digits = i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
            if c == opts.decimal && between_digits {
                '.'
            } else {
                c
            }
        })
        .collect()
}

fn render(candidate: &Candidate) -> String {
    match candidate.tokens.as_slice() {
        [single] if is_numeric(&single.word) => single.word.clone(),
        _ => format_number(candidate.value),
    }
}

/// Repeatedly extract numbers, blanking each match before the next pass.
///
/// The first pass runs on `tokens` itself, so token rewrites made while
/// reading digit ordinals ("1st one") are visible to the caller.
fn extract_all(
    lex: &dyn NumberLexicon,
    tokens: &mut Vec<Token>,
    short_scale: bool,
    ordinals: Ordinals,
    fractional: bool,
) -> Vec<Candidate> {
    let mut results = Vec::new();
    let Some(first) = extract_one(lex, tokens, short_scale, ordinals, fractional) else {
        return results;
    };
    let Some(mut working) = blank_span(tokens, &first) else {
        return results;
    };
    results.push(first);

    while let Some(candidate) = extract_one(lex, &mut working, short_scale, ordinals, fractional) {
        let Some(next) = blank_span(&working, &candidate) else {
            break;
        };
        working = next;
        results.push(candidate);
    }

    results.sort_by_key(|c| c.start_index());
    for c in &results {
        tracing::trace!(value = c.value, text = %join_words(&c.tokens), "number span");
    }
    results
}

/// Replace the tokens covered by `candidate` with placeholders.
fn blank_span(tokens: &[Token], candidate: &Candidate) -> Option<Vec<Token>> {
    let start = candidate.start_index()?;
    let end = candidate.end_index()?;
    Some(
        tokens
            .iter()
            .map(|t| {
                if (start..=end).contains(&t.index) {
                    Token::new(PLACEHOLDER, t.index)
                } else {
                    t.clone()
                }
            })
            .collect(),
    )
}

/// One extraction attempt: fraction marker, then decimal marker, then a
/// plain whole-number scan. Leading articles are trimmed from the span.
fn extract_one(
    lex: &dyn NumberLexicon,
    tokens: &mut Vec<Token>,
    short_scale: bool,
    ordinals: Ordinals,
    fractional: bool,
) -> Option<Candidate> {
    let mut marked = None;
    if fractional {
        marked = extract_fraction(lex, tokens, short_scale, ordinals);
        if marked.is_none() {
            marked = extract_decimal(lex, tokens, short_scale, ordinals);
        }
    }
    let mut candidate = match marked {
        Some(c) => c,
        None => extract_whole_number(lex, tokens, short_scale, ordinals)?,
    };
    let leading_articles = candidate
        .tokens
        .iter()
        .take_while(|t| lex.is_article(&t.word.to_lowercase()))
        .count();
    candidate.tokens.drain(..leading_articles);
    Some(candidate)
}

/// "two and a half": whole part before the marker, fraction after it.
fn extract_fraction(
    lex: &dyn NumberLexicon,
    tokens: &[Token],
    short_scale: bool,
    ordinals: Ordinals,
) -> Option<Candidate> {
    for marker in lex.fraction_markers() {
        let mut parts = partition_tokens(tokens, |t| t.word == *marker);
        if parts.len() != 3 {
            continue;
        }
        let whole = extract_all(lex, &mut parts[0], short_scale, ordinals, false);
        let fraction = extract_all(lex, &mut parts[2], short_scale, ordinals, true);
        let (Some(whole), Some(fraction)) = (whole.last(), fraction.first()) else {
            return None;
        };
        if whole.value >= 1.0 && 0.0 < fraction.value && fraction.value < 1.0 {
            let mut span = whole.tokens.clone();
            span.extend(parts[1].iter().cloned());
            span.extend(fraction.tokens.iter().cloned());
            return Some(Candidate {
                value: whole.value + fraction.value,
                tokens: span,
                is_ordinal: false,
                is_fraction: true,
            });
        }
    }
    None
}

/// "three point fourteen": digits of the right side become decimals.
fn extract_decimal(
    lex: &dyn NumberLexicon,
    tokens: &[Token],
    short_scale: bool,
    ordinals: Ordinals,
) -> Option<Candidate> {
    for marker in lex.decimal_markers() {
        let mut parts = partition_tokens(tokens, |t| t.word == *marker);
        if parts.len() != 3 {
            continue;
        }
        let whole = extract_all(lex, &mut parts[0], short_scale, ordinals, false);
        let decimals = extract_all(lex, &mut parts[2], short_scale, ordinals, false);
        let (Some(whole), Some(decimals)) = (whole.last(), decimals.first()) else {
            return None;
        };
        if join_words(&decimals.tokens).contains('.') {
            continue;
        }
        let fraction: f64 = format!("0.{}", format_number(decimals.value)).parse().ok()?;
        let value = whole.value + fraction;
        if value == 0.0 {
            return None;
        }
        let mut span = whole.tokens.clone();
        span.extend(parts[1].iter().cloned());
        span.extend(decimals.tokens.iter().cloned());
        return Some(Candidate {
            value,
            tokens: span,
            is_ordinal: false,
            is_fraction: false,
        });
    }
    None
}

// ── Whole-number scan ───────────────────────────────────────────────────────

/// Python-style truthiness of an accumulator slot.
fn truthy(value: Option<f64>) -> bool {
    matches!(value, Some(v) if v != 0.0)
}

/// "1st" → "1", "22nd" → "22"; `None` for anything else.
fn numeric_ordinal_stem(word: &str) -> Option<String> {
    let stem = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix))?;
    is_numeric(stem).then(|| stem.to_string())
}

/// "3/4" → 0.75.
fn slash_fraction(word: &str) -> Option<f64> {
    let (num, den) = word.split_once('/')?;
    if den.contains('/') || !is_numeric(num) || !is_numeric(den) {
        return None;
    }
    let den: f64 = den.parse().ok()?;
    if den == 0.0 {
        return None;
    }
    Some(num.parse::<f64>().ok()? / den)
}

/// What the scan does after consuming a token.
enum Step {
    Continue,
    Stop,
}

/// Accumulator for one left-to-right pass over a number phrase.
///
/// `val` is the working value and `prev_val` the value before the current
/// token. A scale word that outranks every later scale word seals the
/// working value into `to_sum` and restarts accumulation, which is how
/// "two million five hundred thousand" becomes 2,000,000 + 500,000.
struct ScaleState<'a> {
    lex: &'a dyn NumberLexicon,
    short_scale: bool,
    ordinals: Ordinals,
    val: Option<f64>,
    prev_val: Option<f64>,
    to_sum: Vec<f64>,
    span: Vec<Token>,
    skip_next: bool,
    is_ordinal: bool,
    is_fraction: bool,
}

impl<'a> ScaleState<'a> {
    fn new(lex: &'a dyn NumberLexicon, short_scale: bool, ordinals: Ordinals) -> Self {
        Self {
            lex,
            short_scale,
            ordinals,
            val: None,
            prev_val: None,
            to_sum: Vec::new(),
            span: Vec::new(),
            skip_next: false,
            is_ordinal: false,
            is_fraction: false,
        }
    }

    fn spoken(&self) -> bool {
        self.ordinals != Ordinals::Ambiguous
    }

    fn ranks(&self) -> bool {
        self.ordinals == Ordinals::Rank
    }

    fn is_scale(&self, word: &str) -> bool {
        self.lex
            .scale_word(word, self.short_scale, self.spoken())
            .is_some()
    }

    fn is_multiplier(&self, word: &str) -> bool {
        self.lex.is_multiplier(word, self.short_scale)
    }

    fn is_ordinal(&self, word: &str) -> bool {
        self.lex.ordinal_word(word, self.short_scale).is_some()
    }

    fn restart(&mut self, token: Token) {
        self.span = vec![token];
        self.is_ordinal = false;
        self.is_fraction = false;
    }

    /// Fraction words only join a span when they can carry a value, so an
    /// unread "half" never ends the pass early.
    fn accepts(&self, word: &str) -> bool {
        self.is_scale(word)
            || self.lex.number_word(word).is_some()
            || self.lex.is_sum(word)
            || self.is_multiplier(word)
            || (self.ranks() && self.is_ordinal(word))
            || is_numeric(word)
            || (self.spoken() && self.lex.is_fraction_word(word, self.short_scale))
            || slash_fraction(word).is_some()
    }

    /// Feed the token at `idx`. `tokens` is mutable because a digit ordinal
    /// followed by "one" swallows it.
    fn feed(&mut self, tokens: &mut [Token], idx: usize) -> Step {
        if self.skip_next {
            self.skip_next = false;
            return Step::Continue;
        }

        let token = tokens[idx].clone();
        let mut word = token.word.to_lowercase();
        if self.lex.is_article(&word) || self.lex.is_negative(&word) {
            self.span.push(token);
            return Step::Continue;
        }

        let prev_word = match idx {
            0 => String::new(),
            _ => tokens[idx - 1].word.to_lowercase(),
        };
        let mut next_word = tokens
            .get(idx + 1)
            .map(|t| t.word.to_lowercase())
            .unwrap_or_default();

        // "1st", "2nd"; "1st one" must not read the "one"
        let mut digit_ordinal = false;
        if let Some(stem) = numeric_ordinal_stem(&word) {
            word = stem;
            digit_ordinal = true;
            if next_word == "one" {
                tokens[idx + 1] = Token::new("", idx);
                next_word.clear();
            }
        }

        let lex = self.lex;
        let is_multiplier = self.is_multiplier(&word);
        let prev_is_rank = self.ranks() && self.is_ordinal(&prev_word);

        if !self.accepts(&word) {
            let only_articles = self
                .span
                .iter()
                .all(|t| lex.is_article(&t.word.to_lowercase()));
            if !self.span.is_empty() && !only_articles {
                return Step::Stop;
            }
            self.span.clear();
            return Step::Continue;
        } else if !is_multiplier
            && !self.is_multiplier(&prev_word)
            && !lex.is_sum(&prev_word)
            && !prev_is_rank
            && !lex.is_negative(&prev_word)
            && !lex.is_article(&prev_word)
        {
            self.restart(token);
        } else if lex.is_sum(&prev_word) && lex.is_sum(&word) {
            self.restart(token);
        } else if self.ordinals == Ordinals::Ambiguous && self.is_ordinal(&word) {
            // "the first test", "the second one"
            return Step::Stop;
        } else {
            self.span.push(token);
        }
        if digit_ordinal {
            self.is_ordinal = true;
        }

        let mut current_val = None;
        if is_numeric(&word) {
            self.val = word.parse().ok();
            current_val = self.val;
        }
        if let Some(v) = lex.number_word(&word) {
            self.val = Some(v);
            current_val = self.val;
        } else if let Some(v) = lex.scale_word(&word, self.short_scale, self.spoken()) {
            self.val = Some(v);
            current_val = self.val;
        } else if self.ranks() {
            if let Some(v) = lex.ordinal_word(&word, self.short_scale) {
                self.val = Some(v);
                current_val = self.val;
                self.is_ordinal = true;
            }
        }

        // "second one", "third one"
        if prev_is_rank && self.val == Some(1.0) {
            self.val = self.prev_val;
        }

        // "twenty two", "hundred fifty"
        let val = self.val.unwrap_or(0.0);
        let prev_val = self.prev_val.unwrap_or(0.0);
        let sums_unit = lex.is_sum(&prev_word) && truthy(self.val) && val < 10.0;
        let adds_below_scale =
            self.is_multiplier(&prev_word) && truthy(self.prev_val) && val < prev_val;
        if sums_unit || adds_below_scale {
            self.val = Some(prev_val + val);
        }

        // "six hundred"
        if is_multiplier {
            if !truthy(self.prev_val) {
                self.prev_val = Some(1.0);
            }
            self.val = Some(self.prev_val.unwrap_or(1.0) * self.val.unwrap_or(0.0));
        }

        // "half cup"
        if self.val.is_none() && !(self.ordinals == Ordinals::Ambiguous && self.is_ordinal(&word)) {
            self.val = lex.fraction_word(&word, self.short_scale, self.spoken());
            current_val = self.val;
            if self.val.is_some() {
                self.is_fraction = true;
            }
        }

        // "2 fifths"
        if self.ordinals == Ordinals::Fraction {
            if let Some(next_fraction) = lex.fraction_word(&next_word, self.short_scale, true) {
                self.skip_next = true;
                let base = if truthy(self.val) { self.val.unwrap_or(1.0) } else { 1.0 };
                self.val = Some(base * next_fraction);
                self.span.push(tokens[idx + 1].clone());
                self.is_fraction = true;
            }
        }

        if truthy(self.val) && lex.is_negative(&prev_word) {
            self.val = self.val.map(|v| -v);
        }

        if !truthy(self.val) {
            // "2/3"
            if let Some(v) = slash_fraction(&word) {
                self.val = Some(v);
                self.is_fraction = true;
            }
            return Step::Continue;
        }

        // "twenty 20": a tens word followed by something it cannot absorb
        if truthy(current_val)
            && lex.is_sum(&prev_word)
            && !lex.is_sum(&word)
            && !is_multiplier
            && current_val.unwrap_or(0.0) >= 10.0
        {
            self.span.pop();
            self.val = self.prev_val;
            return Step::Stop;
        }
        self.prev_val = self.val;

        if is_multiplier && !self.is_multiplier(&next_word) {
            let magnitude = current_val.unwrap_or(0.0);
            let outranks_rest = tokens[idx + 1..].iter().all(|t| {
                let w = t.word.to_lowercase();
                !self.is_multiplier(&w)
                    || lex
                        .scale_word(&w, self.short_scale, self.spoken())
                        .is_none_or(|later| later < magnitude)
            });
            if outranks_rest {
                self.to_sum.push(self.val.unwrap_or(0.0));
                self.val = Some(0.0);
                self.prev_val = Some(0.0);
            }
        }
        Step::Continue
    }

    fn finish(self) -> Option<Candidate> {
        let mut value = self.val;
        if !self.to_sum.is_empty() {
            value = Some(value.unwrap_or(0.0) + self.to_sum.iter().sum::<f64>());
        }
        Some(Candidate {
            value: value?,
            tokens: self.span,
            is_ordinal: self.is_ordinal,
            is_fraction: self.is_fraction,
        })
    }
}

fn extract_whole_number(
    lex: &dyn NumberLexicon,
    tokens: &mut [Token],
    short_scale: bool,
    ordinals: Ordinals,
) -> Option<Candidate> {
    let mut state = ScaleState::new(lex, short_scale, ordinals);
    for idx in 0..tokens.len() {
        if let Step::Stop = state.feed(tokens, idx) {
            break;
        }
    }
    state.finish()
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::en::English;
    use proptest::prelude::*;

    fn num(text: &str) -> Option<f64> {
        extract_number(&English, text, &NumberOptions::default())
    }

    fn num_with(text: &str, ordinals: Ordinals) -> Option<f64> {
        extract_number(&English, text, &NumberOptions::default().with_ordinals(ordinals))
    }

    fn nums(text: &str) -> Vec<f64> {
        extract_numbers(&English, text, &NumberOptions::default())
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.unwrap_or_else(|| panic!("expected {expected}, got no match"));
        assert!(
            (actual - expected).abs() < 1e-9 * expected.abs().max(1.0),
            "expected {expected}, got {actual}"
        );
    }

    // ── cardinals ───────────────────────────────────────────────────────

    #[test]
    fn test_extract_digits() {
        assert_eq!(num("this is 2 test"), Some(2.0));
        assert_eq!(num("this is test number 4"), Some(4.0));
        assert_eq!(num("three cups"), Some(3.0));
        assert_eq!(num("grobo 0"), Some(0.0));
        assert_eq!(num("totally 100%"), Some(100.0));
    }

    #[test]
    fn test_extract_zero_is_a_match() {
        assert_eq!(num("fraggle zero"), Some(0.0));
        assert_eq!(num("fraggle"), None);
        assert_eq!(num("The tennis player is fast"), None);
    }

    #[test]
    fn test_extract_tens_and_units() {
        assert_eq!(num("twenty two"), Some(22.0));
        assert_eq!(num("Twenty two with a leading capital"), Some(22.0));
        assert_eq!(num("two hundred"), Some(200.0));
        assert_eq!(num("nine thousand"), Some(9000.0));
        assert_eq!(num("six hundred sixty six"), Some(666.0));
        assert_eq!(num("twenty thousand"), Some(20000.0));
        assert_eq!(num("fifty million"), Some(50_000_000.0));
    }

    #[test]
    fn test_extract_scale_chains() {
        assert_eq!(
            num("two million five hundred thousand tons of spinning metal"),
            Some(2_500_000.0)
        );
        assert_eq!(num("one hundred thousand"), Some(100_000.0));
        assert_eq!(num("thousand million"), Some(1e9));
        assert_eq!(
            num("eight hundred trillion two hundred fifty seven"),
            Some(800_000_000_000_257.0)
        );
    }

    #[test]
    fn test_extract_long_scale() {
        let opts = NumberOptions::default().with_short_scale(false);
        assert_eq!(extract_number(&English, "six trillion", &opts), Some(6e18));
        assert_eq!(num("six trillion"), Some(6e12));
    }

    #[test]
    fn test_extract_plural_scale() {
        assert_eq!(num("billions of years older"), Some(1e9));
        let opts = NumberOptions::default().with_short_scale(false);
        assert_eq!(extract_number(&English, "billions of years older", &opts), Some(1e12));
    }

    #[test]
    fn test_extract_negatives() {
        assert_eq!(num("minus 2"), Some(-2.0));
        assert_eq!(num("negative seventy"), Some(-70.0));
    }

    #[test]
    fn test_extract_couple() {
        assert_eq!(num("a couple of beers"), Some(2.0));
        assert_eq!(num("a couple hundred beers"), Some(200.0));
        assert_eq!(num("a couple thousand beers"), Some(2000.0));
    }

    // ── decimals ────────────────────────────────────────────────────────

    #[test]
    fn test_extract_decimal_markers() {
        assert_eq!(num("one point five"), Some(1.5));
        assert_close(num("three dot fourteen"), 3.14);
        assert_close(num("zero point two"), 0.2);
        assert_close(
            num("twenty billion three hundred million nine hundred fifty thousand six hundred seventy five point eight"),
            20_300_950_675.8,
        );
        assert_close(
            num("nine hundred ninety nine million nine hundred ninety nine thousand nine hundred ninety nine point nine"),
            999_999_999.9,
        );
    }

    #[test]
    fn test_extract_custom_decimal_char() {
        let opts = NumberOptions::default().with_decimal(',');
        assert_eq!(extract_number(&English, "4,4", &opts), Some(4.4));
        assert_eq!(
            extract_numbers(&English, "this is a 7,0 8.0 9,6 test", &opts),
            vec![7.0, 8.0, 9.6]
        );
        assert_eq!(
            extract_numbers(&English, "this is a seven eight 9,5 test", &opts),
            vec![7.0, 8.0, 9.5]
        );
    }

    // ── fractions ───────────────────────────────────────────────────────

    #[test]
    fn test_extract_fraction_literals() {
        assert_close(num("1/3 cups"), 1.0 / 3.0);
        assert_eq!(num("1/4 cup"), Some(0.25));
        assert_close(num("2/3 cups"), 2.0 / 3.0);
        assert_eq!(num("3/4 cups"), Some(0.75));
        assert_eq!(num("1 and 3/4 cups"), Some(1.75));
    }

    #[test]
    fn test_extract_fraction_words() {
        assert_eq!(num("quarter cup"), Some(0.25));
        assert_eq!(num("one fourth cup"), Some(0.25));
        assert_eq!(num("three quarter cups"), Some(0.75));
        assert_eq!(num("three quarters cups"), Some(0.75));
    }

    #[test]
    fn test_extract_and_a_half() {
        assert_eq!(num("1 cup and a half"), Some(1.5));
        assert_eq!(num("one and a half cups"), Some(1.5));
        assert_eq!(num("one and one half cups"), Some(1.5));
        assert_close(num("Twenty two and Three Fifths"), 22.6);
        assert_eq!(num_with("Twenty two and Three Fifths", Ordinals::Rank), Some(22.0));
    }

    // ── ordinal policy ──────────────────────────────────────────────────

    #[test]
    fn test_extract_third_matrix() {
        assert_close(num_with("this is the third test", Ordinals::Fraction), 1.0 / 3.0);
        assert_eq!(num_with("this is the third test", Ordinals::Rank), Some(3.0));
        assert_eq!(num_with("this is the third test", Ordinals::Ambiguous), None);
    }

    #[test]
    fn test_extract_one_third_of_a_cup() {
        assert_close(num_with("one third of a cup", Ordinals::Fraction), 1.0 / 3.0);
        assert_eq!(num_with("one third of a cup", Ordinals::Rank), Some(3.0));
        assert_eq!(num_with("one third of a cup", Ordinals::Ambiguous), Some(1.0));
    }

    #[test]
    fn test_extract_adjacent_ordinals() {
        assert_eq!(num_with("sixth third", Ordinals::Rank), Some(3.0));
        assert_eq!(num_with("third sixth", Ordinals::Rank), Some(6.0));
        assert_close(num_with("sixth third", Ordinals::Fraction), 1.0 / 6.0 / 3.0);
        assert_eq!(num_with("sixth third", Ordinals::Ambiguous), None);
    }

    #[test]
    fn test_extract_thirty_second() {
        assert_eq!(num_with("thirty second", Ordinals::Fraction), Some(30.0));
        assert_eq!(num_with("thirty second", Ordinals::Ambiguous), Some(30.0));
        assert_eq!(num_with("thirty second", Ordinals::Rank), Some(32.0));
    }

    #[test]
    fn test_extract_plural_fractions() {
        assert_eq!(num_with("2 fifths", Ordinals::Rank), Some(2.0));
        assert_close(num_with("2 fifths", Ordinals::Fraction), 0.4);
        assert_eq!(num_with("2 fifths", Ordinals::Ambiguous), Some(2.0));
        assert_eq!(num_with("2 fifth", Ordinals::Rank), Some(5.0));
    }

    #[test]
    fn test_extract_ordinal_one() {
        assert_eq!(num_with("you are the second one", Ordinals::Fraction), Some(1.0));
        assert_eq!(num_with("you are the second one", Ordinals::Rank), Some(2.0));
        assert_eq!(num_with("the fourth one", Ordinals::Rank), Some(4.0));
        assert_eq!(num_with("the thirty sixth one", Ordinals::Rank), Some(36.0));
    }

    #[test]
    fn test_extract_lone_ordinal() {
        assert_eq!(num_with("remind me in a second", Ordinals::Rank), Some(2.0));
        assert_eq!(num_with("remind me in a second", Ordinals::Fraction), None);
        assert_eq!(num_with("remind me in a second", Ordinals::Ambiguous), None);
        assert_eq!(num_with("this is the first test", Ordinals::Fraction), None);
        assert_eq!(num_with("this is the first test", Ordinals::Ambiguous), None);
    }

    #[test]
    fn test_extract_billionth() {
        assert_eq!(num_with("this is the billionth test", Ordinals::Rank), Some(1e9));
        assert_eq!(num_with("this is the billionth test", Ordinals::Ambiguous), None);
        assert_close(num_with("this is the billionth test", Ordinals::Fraction), 1e-9);

        let long = NumberOptions::default().with_short_scale(false);
        assert_eq!(
            extract_number(&English, "this is the billionth test", &long.with_ordinals(Ordinals::Rank)),
            Some(1e12)
        );
        assert_close(extract_number(&English, "this is the billionth test", &long), 1e-12);
    }

    #[test]
    fn test_ambiguous_fraction_word_does_not_hide_later_numbers() {
        let ambiguous = NumberOptions::default().with_ordinals(Ordinals::Ambiguous);
        assert_eq!(extract_numbers(&English, "half of five people", &ambiguous), vec![5.0]);
        assert_eq!(extract_numbers(&English, "a half and then twenty", &ambiguous), vec![20.0]);
        assert_eq!(
            extract_numbers(&English, "one and a half and five six", &ambiguous),
            vec![1.0, 5.0, 6.0]
        );
        assert_eq!(
            convert_words_to_numbers(&English, "2 fifths and seven", true, Ordinals::Ambiguous),
            "2 fifths and 7"
        );
    }

    #[test]
    fn test_extract_digit_ordinals() {
        assert_eq!(num("this is the 2nd"), Some(2.0));
        assert_eq!(num_with("you are the 1st one", Ordinals::Ambiguous), Some(1.0));
        assert_eq!(num_with("you are the 8th one", Ordinals::Rank), Some(8.0));
        assert_eq!(num_with("this is the 31st test", Ordinals::Fraction), Some(31.0));
        assert_eq!(num("this is the nth test"), None);
    }

    // ── many numbers ────────────────────────────────────────────────────

    #[test]
    fn test_extract_numbers_order() {
        assert_eq!(nums("this is a one twenty one  test"), vec![1.0, 21.0]);
        assert_eq!(
            nums("1 dog, seven pigs, macdonald had a farm, 3 times 5 macarena"),
            vec![1.0, 7.0, 3.0, 5.0]
        );
        assert_eq!(nums("two pigs and six trillion bacteria"), vec![2.0, 6e12]);
    }

    #[test]
    fn test_extract_numbers_sum_boundaries() {
        assert_eq!(nums("twenty twenty two twenty"), vec![20.0, 22.0, 20.0]);
        assert_eq!(nums("twenty 20 twenty"), vec![20.0, 20.0, 20.0]);
        assert_eq!(nums("twenty 20 22"), vec![20.0, 20.0, 22.0]);
        assert_eq!(nums("twenty 2"), vec![22.0]);
        assert_eq!(nums("twenty 20 twenty 2"), vec![20.0, 20.0, 22.0]);
    }

    #[test]
    fn test_extract_numbers_ordinals() {
        let third_one = nums("third one");
        assert_eq!(third_one.len(), 2);
        assert_close(Some(third_one[0]), 1.0 / 3.0);
        assert_eq!(third_one[1], 1.0);

        let opts = NumberOptions::default().with_ordinals(Ordinals::Rank);
        assert_eq!(extract_numbers(&English, "third one", &opts), vec![3.0]);
        assert_eq!(
            extract_numbers(&English, "this is thirty second or first", &opts),
            vec![32.0, 1.0]
        );
    }

    #[test]
    fn test_extract_numbers_with_and_a_half() {
        assert_eq!(
            nums("this is a seven eight nine and a half test"),
            vec![7.0, 8.0, 9.5]
        );
    }

    #[test]
    fn test_extract_numbers_empty() {
        assert!(nums("no numbers at all").is_empty());
    }

    #[test]
    fn test_extract_number_match_span() {
        let m = extract_number_match(&English, "we need twenty two chairs", &NumberOptions::default())
            .unwrap();
        assert_eq!(m.value, 22.0);
        assert_eq!((m.start_index, m.end_index), (2, 3));
        assert_eq!(m.text, "twenty two");
        assert!(!m.is_ordinal);
    }

    #[test]
    fn test_extract_number_match_flags() {
        let rank = NumberOptions::default().with_ordinals(Ordinals::Rank);
        let m = extract_number_match(&English, "the fourth one", &rank).unwrap();
        assert!(m.is_ordinal);
        assert_eq!(m.text, "fourth one");

        let m = extract_number_match(&English, "one and a half", &NumberOptions::default()).unwrap();
        assert!(m.is_fraction);
    }

    // ── words to digits ─────────────────────────────────────────────────

    #[test]
    fn test_convert_keeps_case_and_literals() {
        let out = convert_words_to_numbers(
            &English,
            "What time will it be in twenty two minutes",
            true,
            Ordinals::Ambiguous,
        );
        assert_eq!(out, "What time will it be in 22 minutes");
        let out = convert_words_to_numbers(&English, "at 0630 or 06 30", true, Ordinals::Ambiguous);
        assert_eq!(out, "at 0630 or 06 30");
    }

    #[test]
    fn test_convert_and_a_half_fraction_mode() {
        let out = convert_words_to_numbers(
            &English,
            "eight and a half days thirty nine seconds",
            true,
            Ordinals::Fraction,
        );
        assert_eq!(out, "8.5 days 39 seconds");
    }

    #[test]
    fn test_helpers() {
        assert!(is_numeric("2.5"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("two"));
        assert_eq!(slash_fraction("3/4"), Some(0.75));
        assert_eq!(slash_fraction("3/0"), None);
        assert_eq!(numeric_ordinal_stem("31st").as_deref(), Some("31"));
        assert_eq!(numeric_ordinal_stem("nth"), None);
        assert_eq!(format_number(22.0), "22");
        assert_eq!(format_number(57.5), "57.5");
    }

    proptest! {
        #[test]
        fn prop_digit_literals_extract_to_themselves(n in 0u32..1_000_000) {
            let text = format!("I have {n} apples");
            prop_assert_eq!(num(&text), Some(n as f64));
        }

        #[test]
        fn prop_digits_are_stable_under_conversion(n in 0u32..1_000_000) {
            let text = format!("call {n} now");
            prop_assert_eq!(
                convert_words_to_numbers(&English, &text, true, Ordinals::Ambiguous),
                text
            );
        }
    }
}
