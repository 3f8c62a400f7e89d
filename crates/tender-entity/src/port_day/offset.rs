//! Port timezone expressed as a UTC offset in half-hour steps.

use std::fmt;
use std::str::FromStr;

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tender_core::AppError;

/// Lowest accepted offset in hours.
pub const MIN_OFFSET_HOURS: f64 = -12.0;
/// Highest accepted offset in hours.
pub const MAX_OFFSET_HOURS: f64 = 14.0;

/// A UTC offset in [-12, +14] hours, in multiples of 0.5.
///
/// Stored and exchanged as a numeric string (`"-12"`, `"0"`, `"5.5"`, `"+2"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtcOffset {
    half_hours: i8,
}

impl UtcOffset {
    /// UTC itself.
    pub const UTC: UtcOffset = UtcOffset { half_hours: 0 };

    /// Build an offset from a number of half hours.
    pub fn from_half_hours(half_hours: i8) -> Result<Self, AppError> {
        let hours = f64::from(half_hours) / 2.0;
        if !(MIN_OFFSET_HOURS..=MAX_OFFSET_HOURS).contains(&hours) {
            return Err(out_of_range(&hours.to_string()));
        }
        Ok(Self { half_hours })
    }

    /// The offset in hours.
    pub fn hours(&self) -> f64 {
        f64::from(self.half_hours) / 2.0
    }

    /// The offset in seconds east of UTC.
    pub fn seconds(&self) -> i32 {
        i32::from(self.half_hours) * 1800
    }

    /// Convert into a chrono offset.
    pub fn to_fixed_offset(&self) -> FixedOffset {
        // Bounded to [-12h, +14h] by construction, always within FixedOffset's range.
        FixedOffset::east_opt(self.seconds()).unwrap_or(Utc.fix())
    }
}

impl FromStr for UtcOffset {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("Timezone is required"));
        }
        let hours: f64 = trimmed.parse().map_err(|_| {
            AppError::validation(format!("Timezone '{trimmed}' is not a numeric UTC offset"))
        })?;
        if !hours.is_finite() {
            return Err(AppError::validation(format!(
                "Timezone '{trimmed}' is not a numeric UTC offset"
            )));
        }
        if !(MIN_OFFSET_HOURS..=MAX_OFFSET_HOURS).contains(&hours) {
            return Err(out_of_range(trimmed));
        }
        let doubled = hours * 2.0;
        if doubled.fract() != 0.0 {
            return Err(AppError::validation(format!(
                "Timezone '{trimmed}' must be a multiple of 0.5 hours"
            )));
        }
        Ok(Self {
            half_hours: doubled as i8,
        })
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.half_hours % 2 == 0 {
            write!(f, "{}", self.half_hours / 2)
        } else {
            write!(f, "{}", self.hours())
        }
    }
}

impl Serialize for UtcOffset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UtcOffset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|e: AppError| serde::de::Error::custom(e.message))
    }
}

fn out_of_range(value: &str) -> AppError {
    AppError::validation(format!(
        "Timezone '{value}' must be between {MIN_OFFSET_HOURS} and +{MAX_OFFSET_HOURS}"
    ))
}
