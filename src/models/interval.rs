//! Time intervals and instant parsing.
//!
//! All instants are wall-clock times (`NaiveDateTime`) in the station's
//! time zone: rate zones are defined in local time of day. Timestamps that
//! carry a UTC offset are converted into that zone when parsed, so a `Z`
//! return time and a local shift bound compare as the same moment.

use chrono::{DateTime, Duration, NaiveDateTime};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Minutes in an hour, for converting interval lengths into paid hours.
pub const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Zone used to read offset-bearing timestamps when none is configured.
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::Europe::Paris;

/// Formats accepted by [`parse_instant`] in addition to RFC 3339.
const INSTANT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A half-open time interval `[start, end)`.
///
/// An interval with `end <= start` is empty. Producers never emit empty
/// intervals and consumers ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    /// Inclusive start of the interval.
    pub start: NaiveDateTime,
    /// Exclusive end of the interval.
    pub end: NaiveDateTime,
}

impl TimeInterval {
    /// Creates a new interval. No ordering check is made; see [`is_empty`](Self::is_empty).
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Returns true if the interval covers no time.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Returns the length of the interval, zero when empty.
    pub fn duration(&self) -> Duration {
        if self.is_empty() {
            Duration::zero()
        } else {
            self.end - self.start
        }
    }

    /// Returns the length of the interval in minutes, at full precision.
    ///
    /// # Examples
    ///
    /// ```
    /// use garde_engine::models::{TimeInterval, parse_instant};
    /// use rust_decimal::Decimal;
    ///
    /// let interval = TimeInterval::new(
    ///     parse_instant("2026-01-15T08:00:00").unwrap(),
    ///     parse_instant("2026-01-15T09:30:30").unwrap(),
    /// );
    /// assert_eq!(interval.minutes(), Decimal::new(905, 1)); // 90.5
    /// ```
    pub fn minutes(&self) -> Decimal {
        Decimal::new(self.duration().num_milliseconds(), 0) / Decimal::new(MILLIS_PER_MINUTE, 0)
    }

    /// Returns true if the two intervals share any time.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns the common part of two intervals, or `None` if they do not overlap.
    pub fn overlap(&self, other: &TimeInterval) -> Option<TimeInterval> {
        let clipped = TimeInterval::new(self.start.max(other.start), self.end.min(other.end));
        if clipped.is_empty() {
            None
        } else {
            Some(clipped)
        }
    }
}

/// Parses a timestamp into a wall-clock instant of [`DEFAULT_TIME_ZONE`].
///
/// See [`parse_instant_in`].
///
/// # Examples
///
/// ```
/// use garde_engine::models::parse_instant;
///
/// assert!(parse_instant("2026-01-15T08:00").is_some());
/// assert!(parse_instant("2026-01-15T08:00:00+01:00").is_some());
/// assert!(parse_instant("yesterday").is_none());
/// ```
pub fn parse_instant(value: &str) -> Option<NaiveDateTime> {
    parse_instant_in(value, DEFAULT_TIME_ZONE)
}

/// Parses a timestamp into a wall-clock instant of `zone`.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS[.fff]]` and the same with a space instead
/// of `T`; these are already local and are kept as is. RFC 3339 timestamps
/// with an offset are converted to the wall-clock time of `zone`. Returns
/// `None` for anything else, including blank input.
///
/// # Examples
///
/// ```
/// use garde_engine::models::parse_instant_in;
///
/// let zone = chrono_tz::Europe::Paris;
/// assert_eq!(
///     parse_instant_in("2026-01-15T08:00:00Z", zone),
///     parse_instant_in("2026-01-15T09:00", zone),
/// );
/// ```
pub fn parse_instant_in(value: &str, zone: Tz) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.with_timezone(&zone).naive_local());
    }

    INSTANT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}
