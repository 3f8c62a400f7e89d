//! Operator-supplied port day fields and their validation.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use tender_core::error::AppError;
use tender_entity::port_day::model::hh_mm;
use tender_entity::port_day::{PierLocation, UtcOffset};

/// The word an operator must type to confirm creating a port day.
pub const PORT_CONFIRMATION: &str = "PORT";

/// Port day form values as submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortDayInput {
    /// Display name, e.g. the port.
    #[serde(default)]
    pub name: Option<String>,
    /// Pier coordinates.
    #[serde(default)]
    pub pier_location: Option<PierLocation>,
    /// Average tender ride in minutes.
    #[serde(default)]
    pub avg_time: Option<i64>,
    /// Last tender back, `HH:MM`.
    #[serde(default)]
    pub last_tender_time: Option<String>,
    /// UTC offset, as a string (`"+2"`) or a number (`2`, `5.5`).
    #[serde(default)]
    pub timezone: Option<serde_json::Value>,
}

/// Validated port day fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PortDayFields {
    /// Trimmed, non-empty name.
    pub name: String,
    /// Pier coordinates within range.
    pub pier_location: PierLocation,
    /// Positive ride time in minutes.
    pub avg_time: u32,
    /// Last tender back, if given.
    pub last_tender_time: Option<NaiveTime>,
    /// Port timezone.
    pub timezone: UtcOffset,
}

impl PortDayInput {
    /// Check every required field and parse the typed ones.
    pub fn validate(&self) -> Result<PortDayFields, AppError> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::validation("Port day name is required."))?
            .to_string();

        let avg = self
            .avg_time
            .ok_or_else(|| AppError::validation("Average tender time is required."))?;
        let avg_time = u32::try_from(avg)
            .ok()
            .filter(|minutes| *minutes > 0)
            .ok_or_else(|| {
                AppError::validation("Average tender time must be a positive number of minutes.")
            })?;

        let pier_location = self
            .pier_location
            .ok_or_else(|| AppError::validation("Pier location is required."))?;
        if !pier_location.is_valid() {
            return Err(AppError::validation(
                "Pier location must have a latitude between -90 and 90 and a longitude between -180 and 180.",
            ));
        }

        let timezone = match &self.timezone {
            None | Some(serde_json::Value::Null) => {
                return Err(AppError::validation("Timezone is required."));
            }
            Some(serde_json::Value::String(raw)) => raw.parse::<UtcOffset>()?,
            Some(serde_json::Value::Number(n)) => n.to_string().parse::<UtcOffset>()?,
            Some(other) => {
                return Err(AppError::validation(format!(
                    "Timezone '{other}' is not a numeric UTC offset"
                )));
            }
        };

        let last_tender_time = match self.last_tender_time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(NaiveTime::parse_from_str(raw, hh_mm::FORMAT).map_err(|_| {
                AppError::validation("Last tender time must be in HH:MM format.")
            })?),
        };

        Ok(PortDayFields {
            name,
            pier_location,
            avg_time,
            last_tender_time,
            timezone,
        })
    }
}

/// Reject a creation that was not confirmed with [`PORT_CONFIRMATION`].
pub fn check_confirmation(confirmation: &str) -> Result<(), AppError> {
    if confirmation == PORT_CONFIRMATION {
        Ok(())
    } else {
        Err(AppError::validation(
            "Port day creation cancelled. You must type PORT to confirm.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tender_core::ErrorKind;

    use super::*;

    fn input(timezone: serde_json::Value) -> PortDayInput {
        PortDayInput {
            name: Some(" Gibraltar ".to_string()),
            pier_location: Some(PierLocation { lat: 36.143, lng: -5.353 }),
            avg_time: Some(15),
            last_tender_time: Some("17:30".to_string()),
            timezone: Some(timezone),
        }
    }

    #[test]
    fn test_valid_input() {
        let fields = input(json!("+2")).validate().unwrap();
        assert_eq!(fields.name, "Gibraltar");
        assert_eq!(fields.avg_time, 15);
        assert_eq!(fields.timezone.hours(), 2.0);
        assert_eq!(fields.last_tender_time, NaiveTime::from_hms_opt(17, 30, 0));
    }

    #[test]
    fn test_timezone_forms() {
        for ok in [json!("-12"), json!("0"), json!("5.5"), json!("14"), json!(5.5), json!(-3)] {
            assert!(input(ok.clone()).validate().is_ok(), "{ok}");
        }
        for bad in [json!("3.25"), json!("15"), json!("abc"), json!(""), json!(true), json!(null)] {
            let err = input(bad.clone()).validate().unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "{bad}");
        }
    }

    #[test]
    fn test_required_fields() {
        let mut missing_name = input(json!("1"));
        missing_name.name = Some("   ".to_string());
        assert_eq!(missing_name.validate().unwrap_err().message, "Port day name is required.");

        let mut missing_avg = input(json!("1"));
        missing_avg.avg_time = None;
        assert!(missing_avg.validate().is_err());

        let mut zero_avg = input(json!("1"));
        zero_avg.avg_time = Some(0);
        assert!(zero_avg.validate().is_err());

        let mut missing_pier = input(json!("1"));
        missing_pier.pier_location = None;
        assert_eq!(missing_pier.validate().unwrap_err().message, "Pier location is required.");

        let mut bad_pier = input(json!("1"));
        bad_pier.pier_location = Some(PierLocation { lat: 100.0, lng: 0.0 });
        assert!(bad_pier.validate().is_err());
    }

    #[test]
    fn test_last_tender_time_optional_but_checked() {
        let mut none = input(json!("1"));
        none.last_tender_time = Some(String::new());
        assert_eq!(none.validate().unwrap().last_tender_time, None);

        let mut bad = input(json!("1"));
        bad.last_tender_time = Some("5pm".to_string());
        assert_eq!(
            bad.validate().unwrap_err().message,
            "Last tender time must be in HH:MM format."
        );
    }

    #[test]
    fn test_confirmation() {
        assert!(check_confirmation("PORT").is_ok());
        for bad in ["port", " PORT", "", "PORTS"] {
            assert!(check_confirmation(bad).is_err());
        }
    }
}
