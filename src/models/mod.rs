//! Core data models for the garde pay engine.
//!
//! This module contains all the domain models used throughout the engine.

mod intervention;
mod interval;
mod rate_table;
mod shift;
mod valuation;

pub use intervention::{Intervention, completed_interventions};
pub use interval::{
    DEFAULT_TIME_ZONE, MINUTES_PER_HOUR, TimeInterval, parse_instant, parse_instant_in,
};
pub use rate_table::{ActivityType, RateTable};
pub use shift::Shift;
pub use valuation::{ActivityTotals, ShiftSummary, ShiftValuation, ValuationLine, ValuedShift};
