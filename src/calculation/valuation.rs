//! Shift valuation.
//!
//! Entry point of the pay engine. Standby and intervention shifts are paid
//! at a flat rate. Guard shifts are composite: time covered by an
//! intervention is paid at the intervention rate, and the rest of the guard
//! is priced zone by zone (see [`value_guard_segment`]).
//!
//! Valuation never fails. A missing, unparseable or non-positive time range
//! yields [`ShiftValuation::zero`], and malformed interventions are skipped.

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::models::{
    ActivityType, Intervention, MINUTES_PER_HOUR, RateTable, Shift, ShiftValuation, TimeInterval,
    ValuationLine, parse_instant,
};

use super::interval_algebra::subtract_all;
use super::rate_zones::{DAILY_RATE_ZONES, value_guard_segment};

/// Values a shift given its bounds, type, the interventions of its owner and
/// the owner's rate table.
///
/// For `astreinte` and `intervention` shifts, the whole duration is paid at
/// the effective rate of that type. For `garde` shifts:
///
/// 1. interventions overlapping `[start, end)` are selected
/// 2. their time is removed from the guard interval
/// 3. the remaining guard periods are priced by daily rate zone
/// 4. each intervention's overlap with the shift is priced at the
///    intervention rate
///
/// `duration_minutes` is always the full nominal length of the shift; it is
/// not reduced by intervention time. `applied_hourly_rate` is the blended
/// average `total_amount / hours` for a guard shift.
///
/// Amounts are rounded to 2 decimal places and the duration to the nearest
/// minute only once, on the final result.
///
/// # Examples
///
/// ```
/// use garde_engine::calculation::calculate_duration_and_amount;
/// use garde_engine::models::{ActivityType, Intervention, RateTable, parse_instant};
/// use rust_decimal::Decimal;
///
/// let rates = RateTable {
///     base_rate: Decimal::new(20, 0),
///     garde: Decimal::new(100, 0),
///     astreinte: Decimal::new(50, 0),
///     intervention: Decimal::new(150, 0),
/// };
/// let interventions = vec![Intervention::completed(
///     "int_001",
///     parse_instant("2026-01-15T09:00").unwrap(),
///     parse_instant("2026-01-15T09:30").unwrap(),
/// )];
///
/// let valuation = calculate_duration_and_amount(
///     parse_instant("2026-01-15T08:00").unwrap(),
///     parse_instant("2026-01-15T10:00").unwrap(),
///     ActivityType::Garde,
///     &interventions,
///     &rates,
/// );
/// assert_eq!(valuation.duration_minutes, 120);
/// assert_eq!(valuation.total_amount, Decimal::new(3500, 2));
/// assert_eq!(valuation.intervention_count, 1);
/// ```
pub fn calculate_duration_and_amount(
    start: NaiveDateTime,
    end: NaiveDateTime,
    activity_type: ActivityType,
    interventions: &[Intervention],
    rates: &RateTable,
) -> ShiftValuation {
    let shift = TimeInterval::new(start, end);
    if shift.is_empty() {
        debug!(%start, %end, "Shift has no positive duration, valuing at zero");
        return ShiftValuation::zero();
    }

    match activity_type {
        ActivityType::Garde => value_guard_shift(shift, interventions, rates),
        ActivityType::Astreinte | ActivityType::Intervention => {
            value_flat_shift(shift, activity_type, rates)
        }
    }
}

/// Values a shift whose bounds are still raw timestamps.
///
/// Bounds that do not parse (see [`parse_instant`]) yield the zero result.
pub fn calculate_duration_and_amount_str(
    start: &str,
    end: &str,
    activity_type: ActivityType,
    interventions: &[Intervention],
    rates: &RateTable,
) -> ShiftValuation {
    match (parse_instant(start), parse_instant(end)) {
        (Some(start), Some(end)) => {
            calculate_duration_and_amount(start, end, activity_type, interventions, rates)
        }
        _ => {
            debug!(start, end, "Unparseable shift bounds, valuing at zero");
            ShiftValuation::zero()
        }
    }
}

/// Values a logged shift. A shift with a missing bound values at zero.
pub fn valuate_shift(
    shift: &Shift,
    interventions: &[Intervention],
    rates: &RateTable,
) -> ShiftValuation {
    match (shift.start_time, shift.end_time) {
        (Some(start), Some(end)) => {
            calculate_duration_and_amount(start, end, shift.activity_type, interventions, rates)
        }
        _ => {
            debug!(shift_id = %shift.id, "Shift is missing a bound, valuing at zero");
            ShiftValuation::zero()
        }
    }
}

fn value_flat_shift(
    shift: TimeInterval,
    activity_type: ActivityType,
    rates: &RateTable,
) -> ShiftValuation {
    let minutes = shift.minutes();
    let rate = rates.effective_rate(activity_type);
    let amount = minutes / MINUTES_PER_HOUR * rate;

    ShiftValuation {
        duration_minutes: round_minutes(minutes),
        total_amount: round_money(amount),
        applied_hourly_rate: round_money(rate),
        intervention_count: 0,
        lines: vec![ValuationLine {
            activity: activity_type,
            start: shift.start,
            end: shift.end,
            minutes,
            rate,
            amount,
        }],
    }
}

fn value_guard_shift(
    shift: TimeInterval,
    interventions: &[Intervention],
    rates: &RateTable,
) -> ShiftValuation {
    let relevant = relevant_interventions(shift, interventions);
    let effective_guard_periods = subtract_all(shift, &relevant);

    let mut total_amount = Decimal::ZERO;
    let mut lines = Vec::new();

    for period in &effective_guard_periods {
        let segment = value_guard_segment(period.start, period.end, &DAILY_RATE_ZONES, |activity| {
            rates.effective_rate(activity)
        });
        total_amount += segment.amount;
        lines.extend(segment.lines);
    }

    let intervention_rate = rates.effective_rate(ActivityType::Intervention);
    for overlap in relevant.iter().filter_map(|i| shift.overlap(i)) {
        let minutes = overlap.minutes();
        let amount = minutes / MINUTES_PER_HOUR * intervention_rate;
        total_amount += amount;
        lines.push(ValuationLine {
            activity: ActivityType::Intervention,
            start: overlap.start,
            end: overlap.end,
            minutes,
            rate: intervention_rate,
            amount,
        });
    }

    lines.sort_by_key(|line| (line.start, line.end));

    let minutes = shift.minutes();
    let hours = minutes / MINUTES_PER_HOUR;
    let applied_hourly_rate = if hours.is_zero() {
        Decimal::ZERO
    } else {
        total_amount / hours
    };

    debug!(
        start = %shift.start,
        end = %shift.end,
        intervention_count = relevant.len(),
        guard_periods = effective_guard_periods.len(),
        total_amount = %total_amount,
        "Valued guard shift"
    );

    ShiftValuation {
        duration_minutes: round_minutes(minutes),
        total_amount: round_money(total_amount),
        applied_hourly_rate: round_money(applied_hourly_rate),
        intervention_count: relevant.len(),
        lines,
    }
}

/// Returns the intervals of completed interventions overlapping `shift`.
///
/// Interventions that are still in progress, lack a bound or have no
/// length are skipped.
fn relevant_interventions(shift: TimeInterval, interventions: &[Intervention]) -> Vec<TimeInterval> {
    interventions
        .iter()
        .filter_map(|intervention| {
            let interval = intervention.completed_interval();
            if interval.is_none() {
                debug!(
                    intervention_id = %intervention.id,
                    "Skipping incomplete or malformed intervention"
                );
            }
            interval
        })
        .filter(|interval| interval.overlaps(&shift))
        .collect()
}

fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

fn round_minutes(minutes: Decimal) -> i64 {
    minutes
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}
