//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading grade rate
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::RateTable;

use super::types::{RateBook, RatesFile};

/// Name of the rate file inside a configuration directory.
pub const RATES_FILE_NAME: &str = "grades.yaml";

/// Loads and provides access to grade rate configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── grades.yaml   # Default grade, per-grade rates and/or settings rows
/// ```
///
/// A `grades.yaml` looks like:
///
/// ```yaml
/// default_grade: Pompier
/// time_zone: Europe/Paris
/// grades:
///   Pompier:
///     base_rate: 20
///     garde: 100
///     astreinte: 50
///     intervention: 150
/// settings:
///   - grade: Caporal
///     activity_type: base_rate
///     hourly_rate: 22
/// ```
///
/// # Example
///
/// ```no_run
/// use garde_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// let rates = loader.rate_table("Pompier").unwrap();
/// println!("Base rate: {}", rates.base_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rate_book: RateBook,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if `grades.yaml` is missing
    /// - [`EngineError::ConfigParseError`] if it is not valid YAML
    /// - [`EngineError::InvalidRate`] if a rate is negative
    /// - [`EngineError::InvalidTimeZone`] if `time_zone` is not an IANA zone
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let rates_path = path.as_ref().join(RATES_FILE_NAME);
        let path_str = rates_path.display().to_string();

        let content = fs::read_to_string(&rates_path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::from_yaml_str(&content, &path_str)?;
        info!(
            path = %path_str,
            grades = loader.rate_book.grades().count(),
            default_grade = loader.rate_book.default_grade(),
            time_zone = %loader.rate_book.time_zone(),
            "Loaded grade rates"
        );
        Ok(loader)
    }

    /// Parses configuration from YAML text. `origin` names the source in errors.
    pub fn from_yaml_str(content: &str, origin: &str) -> EngineResult<Self> {
        let file: RatesFile =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            rate_book: file.into_rate_book()?,
        })
    }

    /// Creates a loader around an already built rate book.
    pub fn from_rate_book(rate_book: RateBook) -> Self {
        Self { rate_book }
    }

    /// Returns the loaded rate book.
    pub fn rate_book(&self) -> &RateBook {
        &self.rate_book
    }

    /// Consumes the loader, returning the rate book.
    pub fn into_rate_book(self) -> RateBook {
        self.rate_book
    }

    /// Returns the rate table of a grade.
    pub fn rate_table(&self, grade: &str) -> EngineResult<&RateTable> {
        self.rate_book.rate_table(grade)
    }
}
