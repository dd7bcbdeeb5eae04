//! Clock abstractions that make every temporal decision deterministic.
//!
//! Business logic never reads system time directly. It asks a [`Clock`] for
//! "now", so production code runs against [`SystemClock`] while tests pin the
//! instant with [`FixedClock`] or steer it with [`MutableClock`].

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

/// Errors produced when building or steering a clock from user-supplied text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClockError {
    /// The string could not be read as an instant. Construction fails loudly
    /// instead of silently defaulting to the current time.
    #[error("unparsable instant: {0:?}")]
    Parse(String),

    /// The string is not a recognized relative-offset expression.
    #[error("unrecognized relative offset: {0:?}")]
    InvalidOffset(String),
}

/// The single source of "now" for the engine.
pub trait Clock: Send + Sync {
    /// Returns the current instant. Never fails.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock: a fresh wall-clock reading on every call.
///
/// No two calls are guaranteed to return the same instant.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant for its entire lifetime.
///
/// Derived clocks are always new instances; a `FixedClock` is never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Freezes the clock at the given instant.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Freezes the clock at the instant described by `input`.
    pub fn parse(input: &str) -> Result<Self, ClockError> {
        Ok(Self::new(parse_instant(input)?))
    }

    /// Returns a new clock shifted by `delta` relative to this one.
    pub fn advanced(&self, delta: Duration) -> Self {
        Self::new(self.now + delta)
    }

    /// Returns a new clock frozen at `instant`.
    pub fn at(&self, instant: DateTime<Utc>) -> Self {
        Self::new(instant)
    }
}

impl Default for FixedClock {
    /// Freezes the clock at the real time of construction.
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// A settable clock for driving simulated timelines in tests.
///
/// Clones share the same instant, so a test can keep a handle while the
/// service under test holds another. The instant itself is guarded, but the
/// semantics of interleaved `set`/`advance` calls are not: confine each
/// `MutableClock` to one test or execution context at a time.
#[derive(Debug, Clone)]
pub struct MutableClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl MutableClock {
    /// Starts the clock at the given instant.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Starts the clock at the instant described by `input`.
    pub fn parse(input: &str) -> Result<Self, ClockError> {
        Ok(Self::new(parse_instant(input)?))
    }

    /// Moves the clock to `instant`.
    pub fn set_now(&self, instant: DateTime<Utc>) {
        *self.lock() = instant;
    }

    /// Shifts the clock by a relative expression such as `"+2 days"`,
    /// `"-90 minutes"`, `"tomorrow"` or `"yesterday"`.
    pub fn advance(&self, expr: &str) -> Result<(), ClockError> {
        let delta = parse_offset(expr)?;
        let mut now = self.lock();
        *now += delta;
        Ok(())
    }

    /// Shifts the clock by `n` seconds; `0` is a no-op, negative rewinds.
    pub fn advance_seconds(&self, n: i64) {
        *self.lock() += Duration::seconds(n);
    }

    /// Shifts the clock by `n` minutes; `0` is a no-op, negative rewinds.
    pub fn advance_minutes(&self, n: i64) {
        *self.lock() += Duration::minutes(n);
    }

    /// Shifts the clock by `n` hours; `0` is a no-op, negative rewinds.
    pub fn advance_hours(&self, n: i64) {
        *self.lock() += Duration::hours(n);
    }

    /// Shifts the clock by `n` days; `0` is a no-op, negative rewinds.
    pub fn advance_days(&self, n: i64) {
        *self.lock() += Duration::days(n);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MutableClock {
    /// Starts the clock at the real time of construction.
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for MutableClock {
    fn now(&self) -> DateTime<Utc> {
        *self.lock()
    }
}

/// Reads an instant from text.
///
/// Accepts RFC 3339 (`2025-03-01T12:00:00Z`), a space-separated datetime
/// (`2025-03-01 12:00:00`, read as UTC), or a bare date (`2025-03-01`, read
/// as UTC midnight).
pub fn parse_instant(input: &str) -> Result<DateTime<Utc>, ClockError> {
    let trimmed = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc());
    }
    Err(ClockError::Parse(input.to_string()))
}

/// Reads a relative-offset expression into a signed duration.
///
/// Supported forms: named offsets (`now`, `tomorrow`, `yesterday`) and
/// `[+|-]<count> <unit>` where the unit is seconds, minutes, hours, days or
/// weeks (singular, plural, or the `sec`/`min` short forms).
pub fn parse_offset(expr: &str) -> Result<Duration, ClockError> {
    let normalized = expr.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "now" => return Ok(Duration::zero()),
        "tomorrow" => return Ok(Duration::days(1)),
        "yesterday" => return Ok(Duration::days(-1)),
        _ => {}
    }

    let invalid = || ClockError::InvalidOffset(expr.to_string());
    let (count_str, unit) = normalized.split_once(' ').ok_or_else(invalid)?;
    let count: i64 = count_str.parse().map_err(|_| invalid())?;
    let delta = match unit.trim() {
        "sec" | "secs" | "second" | "seconds" => Duration::seconds(count),
        "min" | "mins" | "minute" | "minutes" => Duration::minutes(count),
        "hour" | "hours" => Duration::hours(count),
        "day" | "days" => Duration::days(count),
        "week" | "weeks" => Duration::weeks(count),
        _ => return Err(invalid()),
    };
    Ok(delta)
}
