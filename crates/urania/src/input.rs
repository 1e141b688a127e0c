//! Birth request record handed to the engine by callers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Local civil birth instant plus the place it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthInput {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Local hour, 0-23
    pub hour: u32,
    pub minute: u32,
    /// Decimal degrees, north positive
    pub latitude: f64,
    /// Decimal degrees, east positive
    pub longitude: f64,
    /// IANA identifier, e.g. "Europe/Paris"
    pub timezone: String,
    /// Display only; never used in computation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl BirthInput {
    /// Checks every field against its range, reporting the first offender.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(1..=12).contains(&self.month) {
            return Err(EngineError::invalid(
                "month",
                format!("{} is outside 1-12", self.month),
            ));
        }
        if NaiveDate::from_ymd_opt(self.year, self.month, 1).is_none() {
            return Err(EngineError::invalid(
                "year",
                format!("{} is outside the supported calendar range", self.year),
            ));
        }
        if NaiveDate::from_ymd_opt(self.year, self.month, self.day).is_none() {
            return Err(EngineError::invalid(
                "day",
                format!(
                    "{} is not a valid day of {:04}-{:02}",
                    self.day, self.year, self.month
                ),
            ));
        }
        if self.hour > 23 {
            return Err(EngineError::invalid(
                "hour",
                format!("{} is outside 0-23", self.hour),
            ));
        }
        if self.minute > 59 {
            return Err(EngineError::invalid(
                "minute",
                format!("{} is outside 0-59", self.minute),
            ));
        }
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(EngineError::invalid(
                "latitude",
                format!("{} is outside [-90, 90]", self.latitude),
            ));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(EngineError::invalid(
                "longitude",
                format!("{} is outside [-180, 180]", self.longitude),
            ));
        }
        if self.timezone.trim().is_empty() {
            return Err(EngineError::invalid("timezone", "identifier is empty"));
        }
        Ok(())
    }
}
