//! Daily rate-zone segmentation for guard shifts.
//!
//! A guard day is split into five fixed time-of-day zones. Zones during
//! station working hours are paid at the guard rate; nights, the lunch
//! break and evenings are paid at the standby rate:
//!
//! | Zone          | Rate      |
//! |---------------|-----------|
//! | 00:00 – 08:00 | astreinte |
//! | 08:00 – 12:00 | garde     |
//! | 12:00 – 13:30 | astreinte |
//! | 13:30 – 17:30 | garde     |
//! | 17:30 – 24:00 | astreinte |
//!
//! The partition is the same for every grade and every day.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ActivityType, MINUTES_PER_HOUR, TimeInterval, ValuationLine};

/// Number of minutes in a day; the exclusive end of the last zone.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time-of-day zone with the rate category it is paid at.
///
/// Bounds are minutes after midnight, `start_minute` inclusive and
/// `end_minute` exclusive, so the last zone of a day ends at
/// [`MINUTES_PER_DAY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateZone {
    /// Start of the zone, in minutes after midnight.
    pub start_minute: u32,
    /// End of the zone, in minutes after midnight.
    pub end_minute: u32,
    /// The rate category applied to time in this zone.
    pub activity: ActivityType,
}

impl RateZone {
    const fn new(start_minute: u32, end_minute: u32, activity: ActivityType) -> Self {
        Self {
            start_minute,
            end_minute,
            activity,
        }
    }

    /// Returns the zone's interval on the day starting at `day_start`.
    ///
    /// On the last representable day, bounds past the calendar's end are
    /// clamped to [`NaiveDateTime::MAX`].
    pub fn on_day(&self, day_start: NaiveDateTime) -> TimeInterval {
        TimeInterval::new(
            offset_by_minutes(day_start, self.start_minute),
            offset_by_minutes(day_start, self.end_minute),
        )
    }
}

fn offset_by_minutes(at: NaiveDateTime, minutes: u32) -> NaiveDateTime {
    at.checked_add_signed(Duration::minutes(i64::from(minutes)))
        .unwrap_or(NaiveDateTime::MAX)
}

/// The fixed daily partition used for every guard shift.
pub const DAILY_RATE_ZONES: [RateZone; 5] = [
    RateZone::new(0, 8 * 60, ActivityType::Astreinte),
    RateZone::new(8 * 60, 12 * 60, ActivityType::Garde),
    RateZone::new(12 * 60, 13 * 60 + 30, ActivityType::Astreinte),
    RateZone::new(13 * 60 + 30, 17 * 60 + 30, ActivityType::Garde),
    RateZone::new(17 * 60 + 30, MINUTES_PER_DAY, ActivityType::Astreinte),
];

/// Duration and pay accumulated over one guard segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentValue {
    /// Total minutes priced, unrounded.
    pub duration_minutes: Decimal,
    /// Total amount, unrounded.
    pub amount: Decimal,
    /// One line per non-empty zone intersection, in chronological order.
    pub lines: Vec<ValuationLine>,
}

/// Returns true if `zones` are ordered, contiguous and cover exactly one day.
pub fn zones_cover_day(zones: &[RateZone]) -> bool {
    let mut expected_start = 0;
    for zone in zones {
        if zone.start_minute != expected_start || zone.end_minute <= zone.start_minute {
            return false;
        }
        expected_start = zone.end_minute;
    }
    expected_start == MINUTES_PER_DAY
}

/// Prices a continuous, intervention-free guard interval zone by zone.
///
/// The interval is walked one calendar day at a time. The part of the
/// interval falling on each day is intersected with every zone, and each
/// non-empty intersection is priced at `rate_lookup(zone.activity)` per hour.
/// Every minute is therefore priced exactly once, by the zone active at that
/// minute, however many midnights the interval crosses.
///
/// An empty interval yields a zero [`SegmentValue`].
///
/// # Examples
///
/// ```
/// use garde_engine::calculation::{DAILY_RATE_ZONES, value_guard_segment};
/// use garde_engine::models::{ActivityType, parse_instant};
/// use rust_decimal::Decimal;
///
/// // 11:00 to 13:00: one hour of guard, one hour of lunch standby
/// let value = value_guard_segment(
///     parse_instant("2026-01-15T11:00").unwrap(),
///     parse_instant("2026-01-15T13:00").unwrap(),
///     &DAILY_RATE_ZONES,
///     |activity| match activity {
///         ActivityType::Garde => Decimal::new(20, 0),
///         _ => Decimal::new(10, 0),
///     },
/// );
/// assert_eq!(value.duration_minutes, Decimal::new(120, 0));
/// assert_eq!(value.amount, Decimal::new(30, 0));
/// ```
pub fn value_guard_segment<F>(
    segment_start: NaiveDateTime,
    segment_end: NaiveDateTime,
    rate_zones: &[RateZone],
    rate_lookup: F,
) -> SegmentValue
where
    F: Fn(ActivityType) -> Decimal,
{
    let mut value = SegmentValue::default();
    let mut cursor = segment_start;

    while cursor < segment_end {
        let day_start = cursor.date().and_time(NaiveTime::MIN);
        let day_end = offset_by_minutes(day_start, MINUTES_PER_DAY);
        let day_slice = TimeInterval::new(cursor, segment_end.min(day_end));

        for zone in rate_zones {
            let Some(portion) = day_slice.overlap(&zone.on_day(day_start)) else {
                continue;
            };

            let minutes = portion.minutes();
            let rate = rate_lookup(zone.activity);
            let amount = minutes / MINUTES_PER_HOUR * rate;

            value.duration_minutes += minutes;
            value.amount += amount;
            value.lines.push(ValuationLine {
                activity: zone.activity,
                start: portion.start,
                end: portion.end,
                minutes,
                rate,
                amount,
            });
        }

        cursor = day_end;
    }

    value
}
