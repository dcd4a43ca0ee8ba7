//! Property-based tests for the valuation core using proptest.
//!
//! These tests check invariants that must hold for any shift, not just the
//! scenarios covered in the unit and integration tests.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use garde_engine::calculation::{
    DAILY_RATE_ZONES, calculate_duration_and_amount, subtract_all, subtract_intervals,
    value_guard_segment,
};
use garde_engine::models::{ActivityType, Intervention, RateTable, TimeInterval};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn origin() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 12)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn at(offset_minutes: i64) -> NaiveDateTime {
    origin() + Duration::minutes(offset_minutes)
}

/// A non-empty interval starting within the first week, up to three days long.
fn arb_interval() -> impl Strategy<Value = TimeInterval> {
    (0i64..7 * 1440, 1i64..=3 * 1440)
        .prop_map(|(start, length)| TimeInterval::new(at(start), at(start + length)))
}

/// Any interval, possibly empty or reversed.
fn arb_raw_interval() -> impl Strategy<Value = (NaiveDateTime, NaiveDateTime)> {
    (0i64..7 * 1440, -600i64..=3 * 1440).prop_map(|(start, length)| (at(start), at(start + length)))
}

/// Pairwise disjoint completed interventions, generated as alternating gaps
/// and lengths so they never overlap each other.
fn arb_disjoint_interventions() -> impl Strategy<Value = Vec<Intervention>> {
    (0i64..7 * 1440, prop::collection::vec((0i64..600, 1i64..300), 0..6)).prop_map(
        |(first, gaps_and_lengths)| {
            let mut cursor = first;
            gaps_and_lengths
                .into_iter()
                .enumerate()
                .map(|(index, (gap, length))| {
                    let start = cursor + gap;
                    cursor = start + length;
                    Intervention::completed(format!("int_{}", index), at(start), at(cursor))
                })
                .collect()
        },
    )
}

fn arb_rates() -> impl Strategy<Value = RateTable> {
    (0i64..5000, 0i64..300, 0i64..300, 0i64..300).prop_map(
        |(base_cents, garde, astreinte, intervention)| RateTable {
            base_rate: Decimal::new(base_cents, 2),
            garde: Decimal::from(garde),
            astreinte: Decimal::from(astreinte),
            intervention: Decimal::from(intervention),
        },
    )
}

fn arb_activity() -> impl Strategy<Value = ActivityType> {
    prop_oneof![
        Just(ActivityType::Garde),
        Just(ActivityType::Astreinte),
        Just(ActivityType::Intervention),
    ]
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn total_minutes(intervals: &[TimeInterval]) -> Decimal {
    intervals.iter().map(TimeInterval::minutes).sum()
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Slack for repeating fractions of an hour summed in a different order.
fn tolerance() -> Decimal {
    Decimal::new(1, 12)
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Subtraction keeps exactly the time outside the exclusion
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn prop_subtraction_is_total(base in arb_interval(), exclusion in arb_interval()) {
        let remaining = subtract_intervals(&[base], exclusion.start, exclusion.end);

        let removed = base.overlap(&exclusion).map(|o| o.minutes()).unwrap_or_default();
        prop_assert_eq!(total_minutes(&remaining) + removed, base.minutes());

        for period in &remaining {
            prop_assert!(!period.is_empty());
            prop_assert!(period.start >= base.start && period.end <= base.end);
            prop_assert!(!period.overlaps(&exclusion));
        }
    }

    #[test]
    fn prop_subtracting_all_leaves_disjoint_ordered_periods(
        base in arb_interval(),
        interventions in arb_disjoint_interventions(),
    ) {
        let exclusions: Vec<TimeInterval> = interventions
            .iter()
            .filter_map(Intervention::completed_interval)
            .collect();
        let remaining = subtract_all(base, &exclusions);

        for pair in remaining.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
        for period in &remaining {
            for exclusion in &exclusions {
                prop_assert!(!period.overlaps(exclusion));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Rate zones price every minute exactly once
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn prop_zones_partition_any_segment(segment in arb_interval()) {
        let value = value_guard_segment(segment.start, segment.end, &DAILY_RATE_ZONES, |_| Decimal::ONE);

        prop_assert_eq!(value.duration_minutes, segment.minutes());
        prop_assert_eq!(value.lines.first().map(|l| l.start), Some(segment.start));
        prop_assert_eq!(value.lines.last().map(|l| l.end), Some(segment.end));
        for pair in value.lines.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn prop_uniform_rate_ignores_zones(segment in arb_interval(), rates in arb_rates()) {
        let flat = RateTable {
            astreinte: rates.garde,
            ..rates.clone()
        };
        let rate = flat.effective_rate(ActivityType::Garde);
        let value = value_guard_segment(segment.start, segment.end, &DAILY_RATE_ZONES, |activity| {
            flat.effective_rate(activity)
        });

        let expected = segment.minutes() / Decimal::from(60) * rate;
        prop_assert!((value.amount - expected).abs() < tolerance());
    }
}

// ---------------------------------------------------------------------------
// Property 3: Guard valuation covers the shift exactly
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn prop_guard_lines_cover_shift(
        shift in arb_interval(),
        interventions in arb_disjoint_interventions(),
        rates in arb_rates(),
    ) {
        let valuation = calculate_duration_and_amount(
            shift.start,
            shift.end,
            ActivityType::Garde,
            &interventions,
            &rates,
        );

        let line_minutes: Decimal = valuation.lines.iter().map(|l| l.minutes).sum();
        prop_assert_eq!(line_minutes, shift.minutes());

        let line_amount: Decimal = valuation.lines.iter().map(|l| l.amount).sum();
        prop_assert!((valuation.total_amount - line_amount).abs() <= Decimal::new(5, 3) + tolerance());

        for pair in valuation.lines.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
        }

        let overlapping = interventions
            .iter()
            .filter_map(Intervention::completed_interval)
            .filter(|i| i.overlaps(&shift))
            .count();
        prop_assert_eq!(valuation.intervention_count, overlapping);
    }

    #[test]
    fn prop_duration_is_nominal_length(
        shift in arb_interval(),
        activity in arb_activity(),
        interventions in arb_disjoint_interventions(),
        rates in arb_rates(),
    ) {
        let valuation =
            calculate_duration_and_amount(shift.start, shift.end, activity, &interventions, &rates);
        prop_assert_eq!(valuation.duration_minutes, (shift.end - shift.start).num_minutes());
        prop_assert!(valuation.total_amount >= Decimal::ZERO);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Valuation is total and deterministic
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn prop_valuation_never_fails_and_is_idempotent(
        (start, end) in arb_raw_interval(),
        activity in arb_activity(),
        interventions in arb_disjoint_interventions(),
        rates in arb_rates(),
    ) {
        let first = calculate_duration_and_amount(start, end, activity, &interventions, &rates);
        let second = calculate_duration_and_amount(start, end, activity, &interventions, &rates);
        prop_assert_eq!(&first, &second);

        if end <= start {
            prop_assert!(first.is_zero());
            prop_assert!(first.lines.is_empty());
        }
    }

    #[test]
    fn prop_flat_shifts_pay_minutes_times_rate(
        shift in arb_interval(),
        activity in prop_oneof![Just(ActivityType::Astreinte), Just(ActivityType::Intervention)],
        rates in arb_rates(),
    ) {
        let valuation = calculate_duration_and_amount(shift.start, shift.end, activity, &[], &rates);
        let expected = shift.minutes() / Decimal::from(60) * rates.effective_rate(activity);
        prop_assert_eq!(valuation.total_amount, round_money(expected));
        prop_assert_eq!(valuation.intervention_count, 0);
    }
}
