//! Configuration types for grade rates.
//!
//! Rates are configured per grade, either as a table per grade or as flat
//! settings rows `{ grade, activity_type, hourly_rate }` (the shape rates
//! are persisted in). Both are resolved into a [`RateBook`].

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{ActivityType, DEFAULT_TIME_ZONE, RateTable};

/// The grade used when none is selected and none is configured.
pub const DEFAULT_GRADE: &str = "Pompier";

/// Settings rows use this activity type for the grade's base rate.
pub const BASE_RATE_FIELD: &str = "base_rate";

/// A configured rate as written by the user.
///
/// Values that are not numbers are kept as text and coerced to `0` when the
/// rate book is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RateValue {
    /// A numeric value.
    Number(Decimal),
    /// Anything else.
    Text(String),
}

impl RateValue {
    /// Returns the numeric value, if there is one.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            RateValue::Number(value) => Some(*value),
            RateValue::Text(text) => Decimal::from_str(text.trim()).ok(),
        }
    }
}

/// One persisted settings row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSetting {
    /// The grade the row applies to.
    pub grade: String,
    /// `base_rate`, or the activity whose percentage this row sets.
    pub activity_type: String,
    /// The base rate or percentage.
    #[serde(default)]
    pub hourly_rate: Option<RateValue>,
}

/// Rates for one grade in a configuration file. Missing fields take the
/// defaults of [`RateTable::default`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GradeEntry {
    /// Base hourly rate.
    #[serde(default)]
    pub base_rate: Option<RateValue>,
    /// Guard percentage.
    #[serde(default)]
    pub garde: Option<RateValue>,
    /// Standby percentage.
    #[serde(default)]
    pub astreinte: Option<RateValue>,
    /// Intervention percentage.
    #[serde(default)]
    pub intervention: Option<RateValue>,
}

/// Structure of `grades.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatesFile {
    /// Grade used when a caller does not select one.
    #[serde(default)]
    pub default_grade: Option<String>,
    /// Rate tables keyed by grade.
    #[serde(default)]
    pub grades: BTreeMap<String, GradeEntry>,
    /// Flat settings rows, applied on top of `grades`.
    #[serde(default)]
    pub settings: Vec<RateSetting>,
    /// IANA zone that UTC timestamps are converted into, e.g. `Europe/Paris`.
    #[serde(default)]
    pub time_zone: Option<String>,
}

impl RatesFile {
    /// Resolves the file into a validated rate book.
    pub fn into_rate_book(self) -> EngineResult<RateBook> {
        let mut grades = BTreeMap::new();

        for (grade, entry) in &self.grades {
            let grade = grade.trim();
            if grade.is_empty() {
                warn!("Ignoring grade with an empty name");
                continue;
            }
            let defaults = RateTable::default();
            let table = RateTable {
                base_rate: coerce(
                    grade,
                    BASE_RATE_FIELD,
                    entry.base_rate.as_ref(),
                    defaults.base_rate,
                ),
                garde: coerce(grade, "garde", entry.garde.as_ref(), defaults.garde),
                astreinte: coerce(
                    grade,
                    "astreinte",
                    entry.astreinte.as_ref(),
                    defaults.astreinte,
                ),
                intervention: coerce(
                    grade,
                    "intervention",
                    entry.intervention.as_ref(),
                    defaults.intervention,
                ),
            };
            grades.insert(grade.to_string(), table);
        }

        apply_settings(&mut grades, &self.settings);

        let time_zone = match self.time_zone.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                name.parse::<Tz>().map_err(|_| EngineError::InvalidTimeZone {
                    name: name.to_string(),
                })?
            }
            _ => DEFAULT_TIME_ZONE,
        };

        let default_grade = self.default_grade.as_deref().unwrap_or(DEFAULT_GRADE);
        Ok(RateBook::new(default_grade, grades)?.with_time_zone(time_zone))
    }
}

/// Rate tables for every configured grade, and the station's time zone.
///
/// Always contains an entry for its default grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateBook {
    default_grade: String,
    grades: BTreeMap<String, RateTable>,
    time_zone: Tz,
}

impl RateBook {
    /// Creates a rate book, adding a default table for `default_grade` when
    /// it is not configured.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRate`] if any rate or percentage is negative.
    pub fn new(
        default_grade: impl Into<String>,
        mut grades: BTreeMap<String, RateTable>,
    ) -> EngineResult<Self> {
        let default_grade = default_grade.into().trim().to_string();
        let default_grade = if default_grade.is_empty() {
            DEFAULT_GRADE.to_string()
        } else {
            default_grade
        };

        for (grade, table) in &grades {
            table.validate(grade)?;
        }

        if !grades.contains_key(&default_grade) {
            warn!(grade = %default_grade, "Default grade has no rates configured, using defaults");
            grades.insert(default_grade.clone(), RateTable::default());
        }

        Ok(Self {
            default_grade,
            grades,
            time_zone: DEFAULT_TIME_ZONE,
        })
    }

    /// Sets the zone offset-bearing timestamps are read in.
    pub fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Returns the zone offset-bearing timestamps are read in.
    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// Builds a rate book from flat settings rows.
    ///
    /// A grade first seen in a row starts from [`RateTable::default`].
    /// Non-numeric values become `0`, and rows for unknown activity types
    /// are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use garde_engine::config::{RateBook, RateSetting, RateValue};
    /// use garde_engine::models::ActivityType;
    /// use rust_decimal::Decimal;
    ///
    /// let rows = vec![
    ///     RateSetting {
    ///         grade: "Caporal".to_string(),
    ///         activity_type: "base_rate".to_string(),
    ///         hourly_rate: Some(RateValue::Number(Decimal::new(22, 0))),
    ///     },
    ///     RateSetting {
    ///         grade: "Caporal".to_string(),
    ///         activity_type: "astreinte".to_string(),
    ///         hourly_rate: Some(RateValue::Text("50".to_string())),
    ///     },
    /// ];
    ///
    /// let book = RateBook::from_settings(Some("Caporal"), &rows).unwrap();
    /// let rates = book.rate_table("Caporal").unwrap();
    /// assert_eq!(rates.effective_rate(ActivityType::Astreinte), Decimal::new(11, 0));
    /// ```
    pub fn from_settings(default_grade: Option<&str>, rows: &[RateSetting]) -> EngineResult<Self> {
        let mut grades = BTreeMap::new();
        apply_settings(&mut grades, rows);
        RateBook::new(default_grade.unwrap_or(DEFAULT_GRADE), grades)
    }

    /// Returns the grade used when none is selected.
    pub fn default_grade(&self) -> &str {
        &self.default_grade
    }

    /// Returns the configured grade names, sorted.
    pub fn grades(&self) -> impl Iterator<Item = &str> {
        self.grades.keys().map(String::as_str)
    }

    /// Returns the rate table of a grade.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::GradeNotFound`] if the grade is not configured.
    pub fn rate_table(&self, grade: &str) -> EngineResult<&RateTable> {
        self.grades
            .get(grade.trim())
            .ok_or_else(|| EngineError::GradeNotFound {
                grade: grade.to_string(),
            })
    }

    /// Returns the rate table of the selected grade, or of the default grade
    /// when none is selected.
    pub fn rate_table_or_default(&self, grade: Option<&str>) -> EngineResult<&RateTable> {
        match grade {
            Some(grade) if !grade.trim().is_empty() => self.rate_table(grade),
            _ => self.rate_table(&self.default_grade),
        }
    }
}

fn apply_settings(grades: &mut BTreeMap<String, RateTable>, rows: &[RateSetting]) {
    for row in rows {
        let grade = row.grade.trim();
        if grade.is_empty() {
            warn!("Ignoring settings row with an empty grade");
            continue;
        }

        let field = row.activity_type.trim();
        let activity = ActivityType::from_name(field);
        if field != BASE_RATE_FIELD && activity.is_none() {
            warn!(grade, activity_type = field, "Ignoring settings row for unknown activity type");
            continue;
        }

        let value = coerce(grade, field, row.hourly_rate.as_ref(), Decimal::ZERO);
        let table = grades.entry(grade.to_string()).or_default();
        match activity {
            Some(activity) => table.set_percent(activity, value),
            None => table.base_rate = value,
        }
    }
}

/// Missing values take `default`; non-numeric values become `0`.
fn coerce(grade: &str, field: &str, value: Option<&RateValue>, default: Decimal) -> Decimal {
    let Some(value) = value else {
        return default;
    };
    value.as_decimal().unwrap_or_else(|| {
        warn!(grade, field, value = ?value, "Non-numeric rate, using 0");
        Decimal::ZERO
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn row(grade: &str, activity_type: &str, value: Option<RateValue>) -> RateSetting {
        RateSetting {
            grade: grade.to_string(),
            activity_type: activity_type.to_string(),
            hourly_rate: value,
        }
    }

    fn num(s: &str) -> Option<RateValue> {
        Some(RateValue::Number(dec(s)))
    }

    #[test]
    fn test_from_settings_builds_tables() {
        let rows = vec![
            row("Pompier", "base_rate", num("20")),
            row("Pompier", "garde", num("100")),
            row("Pompier", "astreinte", num("50")),
            row("Pompier", "intervention", num("150")),
            row("Caporal", "base_rate", num("22")),
        ];

        let book = RateBook::from_settings(None, &rows).unwrap();
        let pompier = book.rate_table("Pompier").unwrap();
        assert_eq!(pompier.effective_rate(ActivityType::Intervention), dec("30"));

        // Unset percentages default to 100
        let caporal = book.rate_table("Caporal").unwrap();
        assert_eq!(caporal.effective_rate(ActivityType::Astreinte), dec("22"));
        assert_eq!(book.grades().collect::<Vec<_>>(), vec!["Caporal", "Pompier"]);
    }

    #[test]
    fn test_non_numeric_values_become_zero() {
        let rows = vec![
            row("Pompier", "base_rate", Some(RateValue::Text("vingt".to_string()))),
            row("Pompier", "garde", None),
        ];

        let book = RateBook::from_settings(None, &rows).unwrap();
        let pompier = book.rate_table("Pompier").unwrap();
        assert_eq!(pompier.base_rate, Decimal::ZERO);
        assert_eq!(pompier.garde, Decimal::ZERO);
        assert_eq!(pompier.astreinte, dec("100"));
    }

    #[test]
    fn test_numeric_text_is_parsed() {
        let value = RateValue::Text(" 12.5 ".to_string());
        assert_eq!(value.as_decimal(), Some(dec("12.5")));
    }

    #[test]
    fn test_unknown_activity_rows_are_ignored() {
        let rows = vec![
            row("Pompier", "base_rate", num("20")),
            row("Pompier", "permanence", num("80")),
            row("  ", "garde", num("80")),
        ];

        let book = RateBook::from_settings(None, &rows).unwrap();
        assert_eq!(book.rate_table("Pompier").unwrap().garde, dec("100"));
        assert_eq!(book.grades().count(), 1);
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let rows = vec![row("Pompier", "astreinte", num("-10"))];

        match RateBook::from_settings(None, &rows) {
            Err(EngineError::InvalidRate { grade, field, .. }) => {
                assert_eq!(grade, "Pompier");
                assert_eq!(field, "astreinte");
            }
            other => panic!("Expected InvalidRate error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_grade_is_always_present() {
        let book = RateBook::from_settings(None, &[]).unwrap();
        assert_eq!(book.default_grade(), DEFAULT_GRADE);
        assert_eq!(book.rate_table(DEFAULT_GRADE).unwrap(), &RateTable::default());
    }

    #[test]
    fn test_rate_table_or_default() {
        let rows = vec![
            row("Pompier", "base_rate", num("20")),
            row("Sergent", "base_rate", num("25")),
        ];
        let book = RateBook::from_settings(Some("Pompier"), &rows).unwrap();

        assert_eq!(book.rate_table_or_default(None).unwrap().base_rate, dec("20"));
        assert_eq!(book.rate_table_or_default(Some("")).unwrap().base_rate, dec("20"));
        assert_eq!(
            book.rate_table_or_default(Some("Sergent")).unwrap().base_rate,
            dec("25")
        );
        assert!(matches!(
            book.rate_table_or_default(Some("Colonel")),
            Err(EngineError::GradeNotFound { .. })
        ));
    }

    #[test]
    fn test_rates_file_settings_override_grades() {
        let file = RatesFile {
            default_grade: Some("Pompier".to_string()),
            grades: BTreeMap::from([(
                "Pompier".to_string(),
                GradeEntry {
                    base_rate: num("20"),
                    astreinte: num("50"),
                    ..GradeEntry::default()
                },
            )]),
            settings: vec![row("Pompier", "astreinte", num("60"))],
            time_zone: None,
        };

        let book = file.into_rate_book().unwrap();
        let pompier = book.rate_table("Pompier").unwrap();
        assert_eq!(pompier.astreinte, dec("60"));
        assert_eq!(pompier.garde, dec("100"));
    }

    #[test]
    fn test_time_zone_defaults_and_parses() {
        let book = RatesFile::default().into_rate_book().unwrap();
        assert_eq!(book.time_zone(), DEFAULT_TIME_ZONE);

        let file = RatesFile {
            time_zone: Some(" Indian/Reunion ".to_string()),
            ..RatesFile::default()
        };
        let book = file.into_rate_book().unwrap();
        assert_eq!(book.time_zone(), chrono_tz::Indian::Reunion);
    }

    #[test]
    fn test_unknown_time_zone_is_rejected() {
        let file = RatesFile {
            time_zone: Some("Europe/Lutece".to_string()),
            ..RatesFile::default()
        };

        match file.into_rate_book() {
            Err(EngineError::InvalidTimeZone { name }) => assert_eq!(name, "Europe/Lutece"),
            other => panic!("Expected InvalidTimeZone error, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_value_deserializes_numbers_and_text() {
        let values: Vec<RateValue> = serde_json::from_str(r#"[20, "15.5", "n/a"]"#).unwrap();
        assert_eq!(values[0].as_decimal(), Some(dec("20")));
        assert_eq!(values[1].as_decimal(), Some(dec("15.5")));
        assert_eq!(values[2].as_decimal(), None);
    }
}
