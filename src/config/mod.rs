//! Configuration loading and management for the garde pay engine.
//!
//! This module loads per-grade rate tables from YAML, either as one table
//! per grade or as flat settings rows, and resolves the rate table used to
//! value a user's shifts.
//!
//! # Example
//!
//! ```no_run
//! use garde_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Default grade: {}", config.rate_book().default_grade());
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, RATES_FILE_NAME};
pub use types::{
    BASE_RATE_FIELD, DEFAULT_GRADE, GradeEntry, RateBook, RateSetting, RateValue, RatesFile,
};
