//! Calculation logic for the garde pay engine.
//!
//! This module contains interval subtraction (removing intervention time
//! from guard time), daily rate-zone segmentation of guard time, shift
//! valuation, and batch recomputation with totals.
//!
//! Everything here is pure and synchronous: outputs depend only on the
//! shift bounds, the intervention list and the rate table passed in, so
//! shifts can be valued concurrently without coordination.

mod interval_algebra;
mod rate_zones;
mod recompute;
mod valuation;

pub use interval_algebra::{subtract_all, subtract_intervals};
pub use rate_zones::{
    DAILY_RATE_ZONES, MINUTES_PER_DAY, RateZone, SegmentValue, value_guard_segment,
    zones_cover_day,
};
pub use recompute::{recompute_shifts, summarize};
pub use valuation::{
    calculate_duration_and_amount, calculate_duration_and_amount_str, valuate_shift,
};
