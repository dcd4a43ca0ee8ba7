//! Batch recomputation and totals.
//!
//! Stored computed fields go stale whenever the rate table or the
//! intervention set changes, so they are always recomputed from the raw
//! shift bounds rather than trusted.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{
    ActivityTotals, ActivityType, Intervention, MINUTES_PER_HOUR, RateTable, Shift, ShiftSummary,
    ValuedShift, completed_interventions,
};

use super::valuation::valuate_shift;

/// Values every shift against one snapshot of interventions and rates.
///
/// In-progress interventions are dropped before valuation, so callers can
/// pass the full intervention history of the user.
///
/// # Examples
///
/// ```
/// use garde_engine::calculation::recompute_shifts;
/// use garde_engine::models::{ActivityType, RateTable, Shift, parse_instant};
///
/// let shifts = vec![Shift {
///     id: "shift_001".to_string(),
///     activity_type: ActivityType::Astreinte,
///     start_time: parse_instant("2026-01-15T22:00"),
///     end_time: parse_instant("2026-01-16T06:00"),
///     notes: String::new(),
/// }];
///
/// let valued = recompute_shifts(&shifts, &[], &RateTable::default());
/// assert_eq!(valued[0].valuation.duration_minutes, 480);
/// ```
pub fn recompute_shifts(
    shifts: &[Shift],
    interventions: &[Intervention],
    rates: &RateTable,
) -> Vec<ValuedShift> {
    let completed = completed_interventions(interventions);
    debug!(
        shifts = shifts.len(),
        interventions = completed.len(),
        skipped_active = interventions.len() - completed.len(),
        "Recomputing shifts"
    );

    shifts
        .iter()
        .map(|shift| ValuedShift {
            shift: shift.clone(),
            valuation: valuate_shift(shift, &completed, rates),
        })
        .collect()
}

/// Totals hours and pay over valued shifts, overall and per activity.
pub fn summarize(shifts: &[ValuedShift]) -> ShiftSummary {
    let mut minutes_by_activity: BTreeMap<ActivityType, Decimal> = BTreeMap::new();
    let mut by_activity: BTreeMap<ActivityType, ActivityTotals> = ActivityType::ALL
        .into_iter()
        .map(|activity| (activity, ActivityTotals::default()))
        .collect();

    let mut total_minutes = Decimal::ZERO;
    let mut total_amount = Decimal::ZERO;

    for valued in shifts {
        let activity = valued.shift.activity_type;
        let minutes = Decimal::from(valued.valuation.duration_minutes);
        let amount = valued.valuation.total_amount;

        total_minutes += minutes;
        total_amount += amount;
        *minutes_by_activity.entry(activity).or_default() += minutes;
        by_activity.entry(activity).or_default().amount += amount;
    }

    for (activity, minutes) in minutes_by_activity {
        by_activity.entry(activity).or_default().hours = to_hours(minutes);
    }

    ShiftSummary {
        total_hours: to_hours(total_minutes),
        total_amount,
        by_activity,
    }
}

fn to_hours(minutes: Decimal) -> Decimal {
    (minutes / MINUTES_PER_HOUR).round_dp(2)
}
