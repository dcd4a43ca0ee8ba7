//! Shift model.
//!
//! A shift ("vacation" in the duty log) is the unit of persistence. Its
//! computed fields are never stored here; they are produced fresh by
//! valuation as a [`ShiftValuation`](super::ShiftValuation).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{ActivityType, TimeInterval};

/// A loggable unit of duty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The kind of duty performed.
    pub activity_type: ActivityType,
    /// Start of the shift, `None` if it could not be parsed.
    pub start_time: Option<NaiveDateTime>,
    /// End of the shift, `None` if it could not be parsed.
    pub end_time: Option<NaiveDateTime>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}

impl Shift {
    /// Returns the shift's interval when both bounds are present and ordered.
    ///
    /// # Examples
    ///
    /// ```
    /// use garde_engine::models::{ActivityType, Shift, parse_instant};
    ///
    /// let shift = Shift {
    ///     id: "shift_001".to_string(),
    ///     activity_type: ActivityType::Astreinte,
    ///     start_time: parse_instant("2026-01-15T22:00"),
    ///     end_time: parse_instant("2026-01-16T06:00"),
    ///     notes: String::new(),
    /// };
    /// assert_eq!(shift.interval().unwrap().duration().num_hours(), 8);
    /// ```
    pub fn interval(&self) -> Option<TimeInterval> {
        let interval = TimeInterval::new(self.start_time?, self.end_time?);
        if interval.is_empty() {
            None
        } else {
            Some(interval)
        }
    }
}
