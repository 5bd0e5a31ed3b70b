//! English vocabulary.

use std::collections::{HashMap, HashSet};

use chrono::Weekday;
use once_cell::sync::Lazy;

use super::{DateTimeLexicon, Language, Meridiem, NamedHour, NumberLexicon};

// ── Number tables ───────────────────────────────────────────────────────────

const ARTICLES: &[&str] = &["a", "an", "the"];

const NEGATIVES: &[&str] = &["negative", "minus"];

const SUMS: &[&str] = &[
    "twenty", "20", "thirty", "30", "forty", "40", "fifty", "50", "sixty", "60", "seventy",
    "70", "eighty", "80", "ninety", "90",
];

const FRACTION_MARKERS: &[&str] = &["and"];

const DECIMAL_MARKERS: &[&str] = &["point", "dot"];

const NUMBERS: &[(&str, f64)] = &[
    ("zero", 0.0),
    ("one", 1.0),
    ("two", 2.0),
    ("three", 3.0),
    ("four", 4.0),
    ("five", 5.0),
    ("six", 6.0),
    ("seven", 7.0),
    ("eight", 8.0),
    ("nine", 9.0),
    ("ten", 10.0),
    ("eleven", 11.0),
    ("twelve", 12.0),
    ("thirteen", 13.0),
    ("fourteen", 14.0),
    ("fifteen", 15.0),
    ("sixteen", 16.0),
    ("seventeen", 17.0),
    ("eighteen", 18.0),
    ("nineteen", 19.0),
    ("twenty", 20.0),
    ("thirty", 30.0),
    ("forty", 40.0),
    ("fifty", 50.0),
    ("sixty", 60.0),
    ("seventy", 70.0),
    ("eighty", 80.0),
    ("ninety", 90.0),
];

const SPOKEN_EXTRAS: &[(&str, f64)] = &[("half", 0.5), ("halves", 0.5), ("couple", 2.0)];

// Magnitudes beyond f64 range are left out.
const SHORT_SCALE: &[(&str, f64)] = &[
    ("hundred", 1e2),
    ("thousand", 1e3),
    ("million", 1e6),
    ("billion", 1e9),
    ("trillion", 1e12),
    ("quadrillion", 1e15),
    ("quintillion", 1e18),
    ("sextillion", 1e21),
    ("septillion", 1e24),
    ("octillion", 1e27),
    ("nonillion", 1e30),
    ("decillion", 1e33),
    ("undecillion", 1e36),
    ("duodecillion", 1e39),
    ("tredecillion", 1e42),
    ("quattuordecillion", 1e45),
    ("quinquadecillion", 1e48),
    ("sedecillion", 1e51),
    ("septendecillion", 1e54),
    ("octodecillion", 1e57),
    ("novendecillion", 1e60),
    ("vigintillion", 1e63),
    ("unvigintillion", 1e66),
    ("uuovigintillion", 1e69),
    ("tresvigintillion", 1e72),
    ("quattuorvigintillion", 1e75),
    ("quinquavigintillion", 1e78),
    ("qesvigintillion", 1e81),
    ("septemvigintillion", 1e84),
    ("octovigintillion", 1e87),
    ("novemvigintillion", 1e90),
    ("trigintillion", 1e93),
    ("untrigintillion", 1e96),
    ("duotrigintillion", 1e99),
    ("trestrigintillion", 1e102),
    ("quattuortrigintillion", 1e105),
    ("quinquatrigintillion", 1e108),
    ("sestrigintillion", 1e111),
    ("septentrigintillion", 1e114),
    ("octotrigintillion", 1e117),
    ("noventrigintillion", 1e120),
    ("quadragintillion", 1e123),
    ("quinquagintillion", 1e153),
    ("sexagintillion", 1e183),
    ("septuagintillion", 1e213),
    ("octogintillion", 1e243),
    ("nonagintillion", 1e273),
    ("centillion", 1e303),
    ("uncentillion", 1e306),
];

const LONG_SCALE: &[(&str, f64)] = &[
    ("hundred", 1e2),
    ("thousand", 1e3),
    ("million", 1e6),
    ("billion", 1e12),
    ("trillion", 1e18),
    ("quadrillion", 1e24),
    ("quintillion", 1e30),
    ("sextillion", 1e36),
    ("septillion", 1e42),
    ("octillion", 1e48),
    ("nonillion", 1e54),
    ("decillion", 1e60),
    ("undecillion", 1e66),
    ("duodecillion", 1e72),
    ("tredecillion", 1e78),
    ("quattuordecillion", 1e84),
    ("quinquadecillion", 1e90),
    ("sedecillion", 1e96),
    ("septendecillion", 1e102),
    ("octodecillion", 1e108),
    ("novendecillion", 1e114),
    ("vigintillion", 1e120),
    ("unquinquagintillion", 1e306),
];

const ORDINAL_BASE: &[(&str, f64)] = &[
    ("first", 1.0),
    ("second", 2.0),
    ("third", 3.0),
    ("fourth", 4.0),
    ("fifth", 5.0),
    ("sixth", 6.0),
    ("seventh", 7.0),
    ("eighth", 8.0),
    ("ninth", 9.0),
    ("tenth", 10.0),
    ("eleventh", 11.0),
    ("twelfth", 12.0),
    ("thirteenth", 13.0),
    ("fourteenth", 14.0),
    ("fifteenth", 15.0),
    ("sixteenth", 16.0),
    ("seventeenth", 17.0),
    ("eighteenth", 18.0),
    ("nineteenth", 19.0),
    ("twentieth", 20.0),
    ("thirtieth", 30.0),
    ("fortieth", 40.0),
    ("fiftieth", 50.0),
    ("sixtieth", 60.0),
    ("seventieth", 70.0),
    ("eightieth", 80.0),
    ("ninetieth", 90.0),
    ("hundredth", 1e2),
    ("thousandth", 1e3),
];

const SHORT_ORDINALS: &[(&str, f64)] = &[
    ("millionth", 1e6),
    ("billionth", 1e9),
    ("trillionth", 1e12),
    ("quadrillionth", 1e15),
    ("quintillionth", 1e18),
    ("sextillionth", 1e21),
    ("septillionth", 1e24),
    ("octillionth", 1e27),
    ("nonillionth", 1e30),
    ("decillionth", 1e33),
];

const LONG_ORDINALS: &[(&str, f64)] = &[
    ("millionth", 1e6),
    ("billionth", 1e12),
    ("trillionth", 1e18),
    ("quadrillionth", 1e24),
    ("quintillionth", 1e30),
    ("sextillionth", 1e36),
    ("septillionth", 1e42),
    ("octillionth", 1e48),
    ("nonillionth", 1e54),
    ("decillionth", 1e60),
];

const FRACTION_BASE: &[(&str, f64)] = &[("whole", 1.0), ("half", 2.0), ("halve", 2.0), ("quarter", 4.0)];

/// `originals` plus every key with an `s` appended.
fn with_plurals(originals: &[(&str, f64)]) -> HashMap<String, f64> {
    originals
        .iter()
        .flat_map(|(word, value)| [(word.to_string(), *value), (format!("{word}s"), *value)])
        .collect()
}

fn ordinals(scale: &[(&str, f64)]) -> HashMap<String, f64> {
    ORDINAL_BASE
        .iter()
        .chain(scale)
        .map(|(word, value)| (word.to_string(), *value))
        .collect()
}

/// Ordinals above two double as fraction denominators ("third" → 3).
fn fractions(ordinals: &HashMap<String, f64>) -> HashMap<String, f64> {
    let mut fracts: HashMap<String, f64> = FRACTION_BASE
        .iter()
        .map(|(word, value)| (word.to_string(), *value))
        .collect();
    fracts.extend(
        ordinals
            .iter()
            .filter(|(_, value)| **value > 2.0)
            .map(|(word, value)| (word.clone(), *value)),
    );
    fracts
}

static NUMBER_WORDS: Lazy<HashMap<String, f64>> = Lazy::new(|| with_plurals(NUMBERS));
static SHORT_SCALE_WORDS: Lazy<HashMap<String, f64>> = Lazy::new(|| with_plurals(SHORT_SCALE));
static LONG_SCALE_WORDS: Lazy<HashMap<String, f64>> = Lazy::new(|| with_plurals(LONG_SCALE));
static SHORT_ORDINAL_WORDS: Lazy<HashMap<String, f64>> = Lazy::new(|| ordinals(SHORT_ORDINALS));
static LONG_ORDINAL_WORDS: Lazy<HashMap<String, f64>> = Lazy::new(|| ordinals(LONG_ORDINALS));
static SHORT_FRACTIONS: Lazy<HashMap<String, f64>> =
    Lazy::new(|| fractions(&SHORT_ORDINAL_WORDS));
static LONG_FRACTIONS: Lazy<HashMap<String, f64>> = Lazy::new(|| fractions(&LONG_ORDINAL_WORDS));

// ── Datetime tables ─────────────────────────────────────────────────────────

const WEEKDAYS: &[(&str, Weekday)] = &[
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

const MONTHS: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const MONTHS_SHORT: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "june", "july", "aug", "sept", "oct", "nov", "dec",
];

const MARKERS: &[&str] = &[
    "at", "in", "on", "by", "this", "around", "for", "of", "within",
];

static RECURRING_MARKERS: Lazy<HashSet<String>> = Lazy::new(|| {
    WEEKDAYS
        .iter()
        .flat_map(|(day, _)| [day.to_string(), format!("{day}s")])
        .chain(
            ["weekend", "weekday", "weekends", "weekdays"]
                .iter()
                .map(|w| w.to_string()),
        )
        .collect()
});

// ── Contractions ────────────────────────────────────────────────────────────

const CONTRACTIONS: &[(&str, &str)] = &[
    ("I'd", "I would"),
    ("I'll", "I will"),
    ("I'm", "I am"),
    ("I've", "I have"),
    ("ain't", "is not"),
    ("aren't", "are not"),
    ("can't", "can not"),
    ("could've", "could have"),
    ("couldn't", "could not"),
    ("didn't", "did not"),
    ("doesn't", "does not"),
    ("don't", "do not"),
    ("gonna", "going to"),
    ("gotta", "got to"),
    ("hadn't", "had not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("he'd", "he would"),
    ("he'll", "he will"),
    ("he's", "he is"),
    ("how'd", "how did"),
    ("how'll", "how will"),
    ("how's", "how is"),
    ("isn't", "is not"),
    ("it'd", "it would"),
    ("it'll", "it will"),
    ("it's", "it is"),
    ("mightn't", "might not"),
    ("might've", "might have"),
    ("mustn't", "must not"),
    ("must've", "must have"),
    ("needn't", "need not"),
    ("oughtn't", "ought not"),
    ("shan't", "shall not"),
    ("she'd", "she would"),
    ("she'll", "she will"),
    ("she's", "she is"),
    ("should've", "should have"),
    ("shouldn't", "should not"),
    ("somebody's", "somebody is"),
    ("someone'd", "someone would"),
    ("someone'll", "someone will"),
    ("someone's", "someone is"),
    ("that'd", "that would"),
    ("that'll", "that will"),
    ("that's", "that is"),
    ("there'd", "there would"),
    ("there're", "there are"),
    ("there's", "there is"),
    ("they'd", "they would"),
    ("they'll", "they will"),
    ("they're", "they are"),
    ("they've", "they have"),
    ("wasn't", "was not"),
    ("we'd", "we would"),
    ("we'll", "we will"),
    ("we're", "we are"),
    ("we've", "we have"),
    ("weren't", "were not"),
    ("what'd", "what did"),
    ("what'll", "what will"),
    ("what're", "what are"),
    ("what's", "what is"),
    ("whats", "what is"),
    ("what've", "what have"),
    ("when's", "when is"),
    ("where'd", "where did"),
    ("where's", "where is"),
    ("where've", "where have"),
    ("who'd", "who would"),
    ("who'd've", "who would have"),
    ("who'll", "who will"),
    ("who're", "who are"),
    ("who's", "who is"),
    ("who've", "who have"),
    ("why'd", "why did"),
    ("why're", "why are"),
    ("why's", "why is"),
    ("won't", "will not"),
    ("won't've", "will not have"),
    ("would've", "would have"),
    ("wouldn't", "would not"),
    ("wouldn't've", "would not have"),
    ("ya'll", "you all"),
    ("y'all", "you all"),
    ("y'ain't", "you are not"),
    ("you'd", "you would"),
    ("you'd've", "you would have"),
    ("you'll", "you will"),
    ("you're", "you are"),
    ("you've", "you have"),
];

static CONTRACTION_MAP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| CONTRACTIONS.iter().copied().collect());

// ── English ─────────────────────────────────────────────────────────────────

/// The English language implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl NumberLexicon for English {
    fn is_article(&self, word: &str) -> bool {
        ARTICLES.contains(&word)
    }

    fn is_negative(&self, word: &str) -> bool {
        NEGATIVES.contains(&word)
    }

    fn is_sum(&self, word: &str) -> bool {
        SUMS.contains(&word)
    }

    fn fraction_markers(&self) -> &[&'static str] {
        FRACTION_MARKERS
    }

    fn decimal_markers(&self) -> &[&'static str] {
        DECIMAL_MARKERS
    }

    fn number_word(&self, word: &str) -> Option<f64> {
        NUMBER_WORDS.get(word).copied()
    }

    fn scale_word(&self, word: &str, short_scale: bool, spoken: bool) -> Option<f64> {
        let scale = if short_scale {
            &SHORT_SCALE_WORDS
        } else {
            &LONG_SCALE_WORDS
        };
        scale.get(word).copied().or_else(|| {
            spoken
                .then(|| SPOKEN_EXTRAS.iter().find(|(w, _)| *w == word))
                .flatten()
                .map(|(_, value)| *value)
        })
    }

    fn is_multiplier(&self, word: &str, short_scale: bool) -> bool {
        if short_scale {
            SHORT_SCALE_WORDS.contains_key(word)
        } else {
            LONG_SCALE_WORDS.contains_key(word)
        }
    }

    fn ordinal_word(&self, word: &str, short_scale: bool) -> Option<f64> {
        if short_scale {
            SHORT_ORDINAL_WORDS.get(word).copied()
        } else {
            LONG_ORDINAL_WORDS.get(word).copied()
        }
    }

    fn fraction_word(&self, word: &str, short_scale: bool, spoken: bool) -> Option<f64> {
        if !spoken {
            return None;
        }
        let word = word.to_lowercase();
        let word = word.strip_suffix('s').unwrap_or(&word);
        let fracts = if short_scale {
            &SHORT_FRACTIONS
        } else {
            &LONG_FRACTIONS
        };
        fracts.get(word).map(|denominator| 1.0 / denominator)
    }
}

impl DateTimeLexicon for English {
    fn weekday(&self, word: &str) -> Option<Weekday> {
        WEEKDAYS
            .iter()
            .find(|(name, _)| *name == word)
            .map(|(_, day)| *day)
    }

    fn month(&self, word: &str) -> Option<u32> {
        MONTHS
            .iter()
            .position(|m| *m == word)
            .or_else(|| MONTHS_SHORT.iter().position(|m| *m == word))
            .map(|i| i as u32 + 1)
    }

    fn is_short_month(&self, word: &str) -> bool {
        MONTHS_SHORT.contains(&word) && !MONTHS.contains(&word)
    }

    fn is_recurring_marker(&self, word: &str) -> bool {
        RECURRING_MARKERS.contains(word)
    }

    fn time_qualifier(&self, word: &str) -> Option<Meridiem> {
        match word {
            "morning" => Some(Meridiem::Am),
            "afternoon" | "evening" | "night" | "tonight" => Some(Meridiem::Pm),
            _ => None,
        }
    }

    fn is_marker(&self, word: &str) -> bool {
        MARKERS.contains(&word)
    }

    fn year_multiple(&self, word: &str) -> Option<i64> {
        match word {
            "decade" => Some(10),
            "century" => Some(100),
            "millennium" => Some(1000),
            _ => None,
        }
    }

    fn relative_day(&self, word: &str) -> Option<i64> {
        match word {
            "today" => Some(0),
            "tomorrow" => Some(1),
            "yesterday" => Some(-1),
            _ => None,
        }
    }

    fn named_hour(&self, word: &str) -> Option<NamedHour> {
        match word {
            "midnight" => Some(NamedHour::Exact(0)),
            "noon" => Some(NamedHour::Exact(12)),
            "morning" => Some(NamedHour::Period(8)),
            "afternoon" => Some(NamedHour::Period(15)),
            "evening" => Some(NamedHour::Period(19)),
            "night" | "tonight" => Some(NamedHour::Night(22)),
            _ => None,
        }
    }
}

impl Language for English {
    fn code(&self) -> &'static str {
        "en"
    }

    fn contraction(&self, word: &str) -> Option<&'static str> {
        CONTRACTION_MAP.get(word).copied()
    }
}
