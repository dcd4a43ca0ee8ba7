//! Request types for the garde pay API.
//!
//! Times arrive as text, the way they are stored in the duty log. They are
//! parsed with [`parse_instant_in`] in the station's zone; a value that does
//! not parse becomes a missing bound, which values to zero rather than
//! failing the request.

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::{ActivityType, Intervention, RateTable, Shift, parse_instant_in};

/// Request body for the `/valuate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationRequest {
    /// Grade whose configured rates apply. Ignored when `rates` is given.
    #[serde(default)]
    pub grade: Option<String>,
    /// Explicit rates, overriding any grade.
    #[serde(default)]
    pub rates: Option<RateTable>,
    /// The shift to value.
    pub shift: ShiftRequest,
    /// Interventions of the same user. In-progress ones are ignored.
    #[serde(default)]
    pub interventions: Vec<InterventionRequest>,
}

/// Request body for the `/recompute` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecomputeRequest {
    /// Grade whose configured rates apply. Ignored when `rates` is given.
    #[serde(default)]
    pub grade: Option<String>,
    /// Explicit rates, overriding any grade.
    #[serde(default)]
    pub rates: Option<RateTable>,
    /// Every shift to revalue.
    pub shifts: Vec<ShiftRequest>,
    /// Interventions of the same user. In-progress ones are ignored.
    #[serde(default)]
    pub interventions: Vec<InterventionRequest>,
}

/// Shift information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// Unique identifier for the shift.
    #[serde(default)]
    pub id: String,
    /// The kind of duty performed.
    pub activity_type: ActivityType,
    /// Start of the shift, e.g. `2026-01-15T08:00`.
    #[serde(default)]
    pub start_time: Option<String>,
    /// End of the shift.
    #[serde(default)]
    pub end_time: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}

/// Intervention information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterventionRequest {
    /// Unique identifier for the intervention.
    #[serde(default)]
    pub id: String,
    /// Departure time.
    #[serde(default)]
    pub start_time: Option<String>,
    /// Return time, absent while in progress.
    #[serde(default)]
    pub end_time: Option<String>,
    /// Whether the intervention is still in progress.
    #[serde(default)]
    pub is_active: bool,
}

impl ShiftRequest {
    /// Converts into a [`Shift`], reading offset-bearing times in `zone`.
    pub fn into_shift(self, zone: Tz) -> Shift {
        Shift {
            id: self.id,
            activity_type: self.activity_type,
            start_time: local_instant(self.start_time.as_deref(), zone),
            end_time: local_instant(self.end_time.as_deref(), zone),
            notes: self.notes,
        }
    }
}

impl InterventionRequest {
    /// Converts into an [`Intervention`], reading offset-bearing times in `zone`.
    pub fn into_intervention(self, zone: Tz) -> Intervention {
        Intervention {
            id: self.id,
            start_time: local_instant(self.start_time.as_deref(), zone),
            end_time: local_instant(self.end_time.as_deref(), zone),
            is_active: self.is_active,
        }
    }
}

fn local_instant(value: Option<&str>, zone: Tz) -> Option<NaiveDateTime> {
    value.and_then(|value| parse_instant_in(value, zone))
}
