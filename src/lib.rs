//! Pay engine for firefighter guard, standby and intervention shifts.
//!
//! This crate values logged shifts against per-grade rates. Guard time is
//! priced by time-of-day rate zones, with completed interventions carved
//! out of it and paid at the intervention rate instead. Standby and
//! intervention shifts are priced at a flat rate.
//!
//! - [`models`]: shifts, interventions, rate tables and valuation results
//! - [`calculation`]: interval subtraction, rate zones, valuation and totals
//! - [`config`]: grade rates loaded from YAML
//! - [`api`]: an axum router exposing valuation over HTTP

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
