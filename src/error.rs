//! Error types for the garde pay engine.
//!
//! The valuation core never fails: invalid time ranges and malformed
//! interventions degrade to zero-valued output. These errors cover the
//! surrounding concerns instead: loading the grade rate book and driving
//! the intervention lifecycle.

use thiserror::Error;

/// The main error type for the garde pay engine.
///
/// # Example
///
/// ```
/// use garde_engine::error::EngineError;
///
/// let error = EngineError::GradeNotFound {
///     grade: "Colonel".to_string(),
/// };
/// assert_eq!(error.to_string(), "Grade not found: Colonel");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No rate table is configured for the requested grade.
    #[error("Grade not found: {grade}")]
    GradeNotFound {
        /// The grade that was requested.
        grade: String,
    },

    /// A configured rate value is outside its allowed range.
    #[error("Invalid rate '{field}' for grade '{grade}': {message}")]
    InvalidRate {
        /// The grade the rate belongs to.
        grade: String,
        /// The rate field (base_rate, garde, astreinte, intervention).
        field: String,
        /// What was wrong with the value.
        message: String,
    },

    /// The configured time zone is not a known IANA zone name.
    #[error("Invalid time zone: {name}")]
    InvalidTimeZone {
        /// The zone name as configured.
        name: String,
    },

    /// An intervention lifecycle transition was rejected.
    #[error("Invalid intervention '{intervention_id}': {message}")]
    InvalidIntervention {
        /// The ID of the intervention.
        intervention_id: String,
        /// A description of the rejected transition.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
