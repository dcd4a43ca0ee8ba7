//! Rate table model and activity types.
//!
//! A grade's pay is described by a base hourly rate and one percentage per
//! activity. The effective hourly rate of an activity is
//! `base_rate * percent / 100`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// The kind of duty being paid.
///
/// Used both as the type of a logged shift and as the rate category of a
/// daily rate zone (zones only ever use `Garde` or `Astreinte`).
///
/// # Example
///
/// ```
/// use garde_engine::models::ActivityType;
///
/// let activity: ActivityType = serde_json::from_str("\"astreinte\"").unwrap();
/// assert_eq!(activity, ActivityType::Astreinte);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    /// Guard duty on station, priced by time-of-day zones.
    Garde,
    /// Standby duty, priced at a flat rate.
    Astreinte,
    /// Field intervention, priced at a flat rate.
    Intervention,
}

impl ActivityType {
    /// All activity types, in display order.
    pub const ALL: [ActivityType; 3] = [
        ActivityType::Garde,
        ActivityType::Astreinte,
        ActivityType::Intervention,
    ];

    /// Returns the persisted name of the activity.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Garde => "garde",
            ActivityType::Astreinte => "astreinte",
            ActivityType::Intervention => "intervention",
        }
    }

    /// Parses a persisted activity name. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "garde" => Some(ActivityType::Garde),
            "astreinte" => Some(ActivityType::Astreinte),
            "intervention" => Some(ActivityType::Intervention),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-grade rate configuration.
///
/// Percentages are expressed out of 100, so `garde: 100` pays the base rate
/// and `intervention: 150` pays one and a half times the base rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// Base hourly rate for the grade.
    pub base_rate: Decimal,
    /// Percentage of the base rate paid for guard time.
    pub garde: Decimal,
    /// Percentage of the base rate paid for standby time.
    pub astreinte: Decimal,
    /// Percentage of the base rate paid for intervention time.
    pub intervention: Decimal,
}

impl Default for RateTable {
    /// An unconfigured grade: no base rate, every activity at 100%.
    fn default() -> Self {
        Self {
            base_rate: Decimal::ZERO,
            garde: ONE_HUNDRED,
            astreinte: ONE_HUNDRED,
            intervention: ONE_HUNDRED,
        }
    }
}

impl RateTable {
    /// Returns the configured percentage for an activity.
    pub fn percent(&self, activity: ActivityType) -> Decimal {
        match activity {
            ActivityType::Garde => self.garde,
            ActivityType::Astreinte => self.astreinte,
            ActivityType::Intervention => self.intervention,
        }
    }

    /// Returns the effective hourly rate for an activity.
    ///
    /// # Examples
    ///
    /// ```
    /// use garde_engine::models::{ActivityType, RateTable};
    /// use rust_decimal::Decimal;
    ///
    /// let rates = RateTable {
    ///     base_rate: Decimal::new(20, 0),
    ///     garde: Decimal::new(100, 0),
    ///     astreinte: Decimal::new(50, 0),
    ///     intervention: Decimal::new(150, 0),
    /// };
    /// assert_eq!(rates.effective_rate(ActivityType::Astreinte), Decimal::new(10, 0));
    /// assert_eq!(rates.effective_rate(ActivityType::Intervention), Decimal::new(30, 0));
    /// ```
    pub fn effective_rate(&self, activity: ActivityType) -> Decimal {
        self.base_rate * self.percent(activity) / ONE_HUNDRED
    }

    /// Checks that the base rate and every percentage are non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRate`] naming `grade` and the first
    /// negative field.
    pub fn validate(&self, grade: &str) -> EngineResult<()> {
        let fields = [
            ("base_rate", self.base_rate),
            ("garde", self.garde),
            ("astreinte", self.astreinte),
            ("intervention", self.intervention),
        ];
        match fields.iter().find(|(_, value)| *value < Decimal::ZERO) {
            Some((field, value)) => Err(EngineError::InvalidRate {
                grade: grade.to_string(),
                field: field.to_string(),
                message: format!("must not be negative, got {}", value),
            }),
            None => Ok(()),
        }
    }

    /// Sets the percentage for an activity.
    pub fn set_percent(&mut self, activity: ActivityType, percent: Decimal) {
        match activity {
            ActivityType::Garde => self.garde = percent,
            ActivityType::Astreinte => self.astreinte = percent,
            ActivityType::Intervention => self.intervention = percent,
        }
    }
}
