//! Intervention model and its lifecycle.
//!
//! An intervention starts when the firefighter departs ("départ") and
//! ends on return ("retour"). Only completed interventions take part in
//! shift valuation.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::TimeInterval;

/// A field response logged by a firefighter.
///
/// Times are optional because stored records may be incomplete: an
/// in-progress intervention has no end, and an edited record may have lost
/// either bound. Such records are skipped by valuation rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intervention {
    /// Unique identifier for the intervention.
    pub id: String,
    /// When the firefighter departed.
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    /// When the firefighter returned, if they have.
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    /// Whether the intervention is still in progress.
    #[serde(default)]
    pub is_active: bool,
}

impl Intervention {
    /// Records a departure: a new in-progress intervention starting at `at`.
    pub fn depart(id: impl Into<String>, at: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            start_time: Some(at),
            end_time: None,
            is_active: true,
        }
    }

    /// Creates an already completed intervention.
    pub fn completed(id: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            start_time: Some(start),
            end_time: Some(end),
            is_active: false,
        }
    }

    /// Records the return from an in-progress intervention.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidIntervention`] if the intervention is
    /// not in progress, has no start time, or if `at` is not after the start.
    ///
    /// # Examples
    ///
    /// ```
    /// use garde_engine::models::{Intervention, parse_instant};
    ///
    /// let mut intervention = Intervention::depart("int_001", parse_instant("2026-01-15T09:00").unwrap());
    /// intervention.finish(parse_instant("2026-01-15T09:45").unwrap()).unwrap();
    /// assert!(!intervention.is_active);
    /// assert!(intervention.completed_interval().is_some());
    /// ```
    pub fn finish(&mut self, at: NaiveDateTime) -> EngineResult<()> {
        if !self.is_active {
            return Err(self.invalid("intervention is not in progress"));
        }
        let start = self
            .start_time
            .ok_or_else(|| self.invalid("intervention has no start time"))?;
        if at <= start {
            return Err(self.invalid("return time must be after departure time"));
        }

        self.end_time = Some(at);
        self.is_active = false;
        Ok(())
    }

    /// Returns the interval covered by a completed intervention.
    ///
    /// Returns `None` while the intervention is in progress, when either bound
    /// is missing, or when the recorded interval has no length.
    pub fn completed_interval(&self) -> Option<TimeInterval> {
        if self.is_active {
            return None;
        }
        let interval = TimeInterval::new(self.start_time?, self.end_time?);
        if interval.is_empty() {
            None
        } else {
            Some(interval)
        }
    }

    /// Returns how long the intervention has lasted, measured up to `now`
    /// when it is still in progress.
    pub fn elapsed(&self, now: NaiveDateTime) -> Option<Duration> {
        let start = self.start_time?;
        let end = self.end_time.unwrap_or(now);
        Some(TimeInterval::new(start, end).duration())
    }

    fn invalid(&self, message: &str) -> EngineError {
        EngineError::InvalidIntervention {
            intervention_id: self.id.clone(),
            message: message.to_string(),
        }
    }
}

/// Keeps only the interventions that are no longer in progress.
///
/// This is the set handed to valuation; records that are finished but
/// malformed are kept here and skipped later.
pub fn completed_interventions(interventions: &[Intervention]) -> Vec<Intervention> {
    interventions
        .iter()
        .filter(|intervention| !intervention.is_active)
        .cloned()
        .collect()
}
