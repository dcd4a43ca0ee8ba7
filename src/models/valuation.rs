//! Valuation result models.
//!
//! This module contains the computed fields produced for a shift
//! ([`ShiftValuation`]), the priced breakdown behind them
//! ([`ValuationLine`]) and the aggregated totals over many shifts
//! ([`ShiftSummary`]).

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ActivityType, Shift};

/// One priced slice of a shift.
///
/// A flat-rate shift produces a single line. A guard shift produces one line
/// per rate zone crossed by its intervention-free time, plus one line per
/// overlapping intervention.
///
/// # Example
///
/// ```
/// use garde_engine::models::{ActivityType, ValuationLine, parse_instant};
/// use rust_decimal::Decimal;
///
/// let line = ValuationLine {
///     activity: ActivityType::Garde,
///     start: parse_instant("2026-01-15T08:00").unwrap(),
///     end: parse_instant("2026-01-15T12:00").unwrap(),
///     minutes: Decimal::new(240, 0),
///     rate: Decimal::new(20, 0),
///     amount: Decimal::new(80, 0),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationLine {
    /// The rate category this slice was priced at.
    pub activity: ActivityType,
    /// Start of the slice.
    pub start: NaiveDateTime,
    /// End of the slice.
    pub end: NaiveDateTime,
    /// Length of the slice in minutes, unrounded.
    pub minutes: Decimal,
    /// Effective hourly rate applied.
    pub rate: Decimal,
    /// Amount for the slice (`minutes / 60 * rate`), unrounded.
    pub amount: Decimal,
}

/// The computed fields of a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftValuation {
    /// Nominal length of the shift, rounded to the nearest minute.
    pub duration_minutes: i64,
    /// Total pay for the shift, rounded to 2 decimal places.
    pub total_amount: Decimal,
    /// Average hourly rate over the shift, rounded to 2 decimal places.
    pub applied_hourly_rate: Decimal,
    /// Number of interventions overlapping a guard shift (0 for other types).
    pub intervention_count: usize,
    /// Priced breakdown, in chronological order.
    #[serde(default)]
    pub lines: Vec<ValuationLine>,
}

impl ShiftValuation {
    /// The result for a shift with no valid time range.
    pub fn zero() -> Self {
        Self {
            duration_minutes: 0,
            total_amount: Decimal::ZERO,
            applied_hourly_rate: Decimal::ZERO,
            intervention_count: 0,
            lines: Vec::new(),
        }
    }

    /// Returns true if this is the no-op result.
    pub fn is_zero(&self) -> bool {
        self.duration_minutes == 0 && self.total_amount.is_zero()
    }
}

/// A shift together with its freshly computed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuedShift {
    /// The shift as logged.
    #[serde(flatten)]
    pub shift: Shift,
    /// Its computed fields.
    #[serde(flatten)]
    pub valuation: ShiftValuation,
}

/// Hours and pay accumulated for one activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTotals {
    /// Total hours, rounded to 2 decimal places.
    pub hours: Decimal,
    /// Total pay.
    pub amount: Decimal,
}

/// Totals over a list of valued shifts, overall and per activity.
///
/// Every activity type has an entry in `by_activity`, even when no shift of
/// that type was logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSummary {
    /// Total hours across all shifts, rounded to 2 decimal places.
    pub total_hours: Decimal,
    /// Total pay across all shifts.
    pub total_amount: Decimal,
    /// Totals per activity type.
    pub by_activity: BTreeMap<ActivityType, ActivityTotals>,
}
