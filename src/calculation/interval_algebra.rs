//! Interval subtraction.
//!
//! Removes intervention time from guard time: given a set of disjoint
//! periods and one exclusion, produce what is left of the periods.

use chrono::NaiveDateTime;

use crate::models::TimeInterval;

/// Removes `[exclusion_start, exclusion_end)` from every period.
///
/// Each period is handled independently:
/// - no overlap: kept unchanged
/// - fully covered: dropped
/// - partial overlap: the part before and the part after the exclusion are
///   kept, each only if it is non-empty
///
/// Emitted intervals are never empty. An empty exclusion leaves the
/// non-empty periods untouched. Apply once per exclusion when several apply;
/// see [`subtract_all`].
///
/// # Examples
///
/// ```
/// use garde_engine::calculation::subtract_intervals;
/// use garde_engine::models::{TimeInterval, parse_instant};
///
/// let guard = TimeInterval::new(
///     parse_instant("2026-01-15T08:00").unwrap(),
///     parse_instant("2026-01-15T10:00").unwrap(),
/// );
/// let remaining = subtract_intervals(
///     &[guard],
///     parse_instant("2026-01-15T09:00").unwrap(),
///     parse_instant("2026-01-15T09:30").unwrap(),
/// );
/// assert_eq!(remaining.len(), 2);
/// ```
pub fn subtract_intervals(
    periods: &[TimeInterval],
    exclusion_start: NaiveDateTime,
    exclusion_end: NaiveDateTime,
) -> Vec<TimeInterval> {
    let mut remaining = Vec::with_capacity(periods.len() + 1);
    let exclusion_is_empty = exclusion_end <= exclusion_start;

    for period in periods.iter().filter(|p| !p.is_empty()) {
        if exclusion_is_empty || period.end <= exclusion_start || period.start >= exclusion_end {
            remaining.push(*period);
            continue;
        }

        if exclusion_start <= period.start && exclusion_end >= period.end {
            continue;
        }

        let before = TimeInterval::new(period.start, period.end.min(exclusion_start));
        if !before.is_empty() {
            remaining.push(before);
        }

        let after = TimeInterval::new(period.start.max(exclusion_end), period.end);
        if !after.is_empty() {
            remaining.push(after);
        }
    }

    remaining
}

/// Removes every exclusion from `base`, folding [`subtract_intervals`] over them.
pub fn subtract_all<'a, I>(base: TimeInterval, exclusions: I) -> Vec<TimeInterval>
where
    I: IntoIterator<Item = &'a TimeInterval>,
{
    let initial = if base.is_empty() { Vec::new() } else { vec![base] };
    exclusions.into_iter().fold(initial, |periods, exclusion| {
        subtract_intervals(&periods, exclusion.start, exclusion.end)
    })
}
