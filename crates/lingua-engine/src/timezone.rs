//! Process-wide default timezone and clock helpers.
//!
//! Extraction resolves "now" in the default timezone. Until one is set with
//! [`set_default_tz`] the host zone is used: the `TZ` environment variable,
//! then the operating system's zone, then UTC.
//!
//! Naive datetimes (no zone attached) are always taken to be in the default
//! timezone, never UTC.
//!
//! # Functions
//!
//! - [`set_default_tz`] / [`set_default_tz_name`] / [`clear_default_tz`]
//! - [`default_timezone`] / [`system_timezone`]
//! - [`now_utc`] / [`now_local`] / [`now_local_in`] / [`now_system`]
//! - [`to_utc`] / [`to_local`] / [`to_system`]
//! - [`is_leap_year`] / [`get_next_leap_year`]

use std::sync::RwLock;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;

use crate::error::{LinguaError, Result};

static DEFAULT_TZ: RwLock<Option<Tz>> = RwLock::new(None);

static SYSTEM_TZ: Lazy<Tz> = Lazy::new(detect_system_timezone);

/// Serializes tests that touch the process-wide default.
#[cfg(test)]
pub(crate) static TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

fn detect_system_timezone() -> Tz {
    if let Ok(name) = std::env::var("TZ") {
        if let Ok(tz) = name.trim_start_matches(':').parse::<Tz>() {
            return tz;
        }
    }
    match iana_time_zone::get_timezone() {
        Ok(name) => name.parse::<Tz>().unwrap_or_else(|_| {
            tracing::debug!(zone = %name, "host timezone not in tz database, using UTC");
            Tz::UTC
        }),
        Err(e) => {
            tracing::debug!(error = %e, "host timezone lookup failed, using UTC");
            Tz::UTC
        }
    }
}

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| LinguaError::InvalidTimezone(format!("'{name}'")))
}

// ── Default registry ────────────────────────────────────────────────────────

/// Install `tz` as the process default.
pub fn set_default_tz(tz: Tz) {
    let mut slot = DEFAULT_TZ.write().unwrap_or_else(|e| e.into_inner());
    *slot = Some(tz);
    tracing::debug!(timezone = %tz.name(), "default timezone set");
}

/// Install the zone named `name` as the process default.
///
/// # Errors
///
/// Returns [`LinguaError::InvalidTimezone`] if `name` is not an IANA zone.
pub fn set_default_tz_name(name: &str) -> Result<()> {
    set_default_tz(parse_timezone(name)?);
    Ok(())
}

/// Forget the configured default; the host zone applies again.
pub fn clear_default_tz() {
    let mut slot = DEFAULT_TZ.write().unwrap_or_else(|e| e.into_inner());
    *slot = None;
}

/// The configured default timezone, or the host zone if none was set.
pub fn default_timezone() -> Tz {
    let slot = DEFAULT_TZ.read().unwrap_or_else(|e| e.into_inner());
    slot.unwrap_or_else(system_timezone)
}

/// The host's timezone, looked up once.
pub fn system_timezone() -> Tz {
    *SYSTEM_TZ
}

// ── Clocks ──────────────────────────────────────────────────────────────────

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Current time in the default timezone.
pub fn now_local() -> DateTime<Tz> {
    now_local_in(default_timezone())
}

pub fn now_local_in(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

/// Current time in the host timezone, ignoring the configured default.
pub fn now_system() -> DateTime<Tz> {
    now_local_in(system_timezone())
}

// ── Conversions ─────────────────────────────────────────────────────────────

/// A datetime that can be pinned to an instant.
///
/// Zone-aware values already are. Naive values are read as wall time in
/// the default timezone.
pub trait TimeInput {
    fn to_instant(&self) -> Result<DateTime<Tz>>;
}

impl TimeInput for DateTime<Tz> {
    fn to_instant(&self) -> Result<DateTime<Tz>> {
        Ok(*self)
    }
}

impl TimeInput for DateTime<Utc> {
    fn to_instant(&self) -> Result<DateTime<Tz>> {
        Ok(self.with_timezone(&Tz::UTC))
    }
}

impl TimeInput for NaiveDateTime {
    fn to_instant(&self) -> Result<DateTime<Tz>> {
        attach(self, default_timezone())
    }
}

/// Read `naive` as wall time in `tz`. Ambiguous (DST fold) times take the
/// earlier instant; nonexistent (DST gap) times are an error.
fn attach(naive: &NaiveDateTime, tz: Tz) -> Result<DateTime<Tz>> {
    tz.from_local_datetime(naive).earliest().ok_or_else(|| {
        LinguaError::InvalidDatetime(format!("{naive} does not exist in {}", tz.name()))
    })
}

/// Convert to UTC.
///
/// # Errors
///
/// Returns [`LinguaError::InvalidDatetime`] for a naive time that falls in
/// a DST gap of the default timezone.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Timelike};
/// use chrono_tz::Tz;
/// use lingua_engine::timezone::to_utc;
///
/// let lisbon = Tz::Europe__Lisbon.with_ymd_and_hms(2017, 6, 27, 13, 4, 0).unwrap();
/// assert_eq!(to_utc(&lisbon).unwrap().hour(), 12);
/// ```
pub fn to_utc(dt: &impl TimeInput) -> Result<DateTime<Utc>> {
    Ok(dt.to_instant()?.with_timezone(&Utc))
}

/// Convert to the default timezone.
pub fn to_local(dt: &impl TimeInput) -> Result<DateTime<Tz>> {
    Ok(dt.to_instant()?.with_timezone(&default_timezone()))
}

/// Convert to the host timezone.
pub fn to_system(dt: &impl TimeInput) -> Result<DateTime<Tz>> {
    Ok(dt.to_instant()?.with_timezone(&system_timezone()))
}

// ── Calendar helpers ────────────────────────────────────────────────────────

pub fn is_leap_year(year: i32) -> bool {
    (year % 400 == 0) || (year % 4 == 0 && year % 100 != 0)
}

/// The first leap year strictly after `year`; `None` when it would not fit
/// in an `i32`.
pub fn get_next_leap_year(year: i32) -> Option<i32> {
    (year.checked_add(1)?..=i32::MAX).find(|&y| is_leap_year(y))
}
