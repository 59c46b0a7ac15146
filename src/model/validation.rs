use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire name of the vehicle field in the check payload.
pub const VEHICLE_FIELD: &str = "vehicleId";
/// Wire name of the odometer field in the check payload.
pub const ODOMETER_FIELD: &str = "odometerKm";

/// A single rejected field, either from the server or from local checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    pub field: String,
    pub reason: String,
}

impl ValidationErrorDetail {
    /// Creates a detail for the given field and reason.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Renders as `field: reason`.
impl fmt::Display for ValidationErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Problems caught before a check is sent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocalValidationError {
    #[error("a vehicle must be selected")]
    MissingVehicle,
    #[error("is required")]
    MissingOdometer,
    #[error("must be a number")]
    InvalidOdometer(String),
    #[error("must be positive")]
    NonPositiveOdometer(f64),
}

impl LocalValidationError {
    /// Payload field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingVehicle => VEHICLE_FIELD,
            Self::MissingOdometer | Self::InvalidOdometer(_) | Self::NonPositiveOdometer(_) => {
                ODOMETER_FIELD
            }
        }
    }
}

impl From<LocalValidationError> for ValidationErrorDetail {
    fn from(err: LocalValidationError) -> Self {
        Self::new(err.field(), err.to_string())
    }
}

/// Validates that a vehicle has been picked.
pub fn validate_vehicle_id(vehicle_id: &str) -> Result<(), LocalValidationError> {
    if vehicle_id.is_empty() {
        Err(LocalValidationError::MissingVehicle)
    } else {
        Ok(())
    }
}

/// Parses an odometer reading, requiring a finite number greater than zero.
pub fn validate_odometer(raw: &str) -> Result<f64, LocalValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LocalValidationError::MissingOdometer);
    }
    match trimmed.parse::<f64>() {
        Ok(km) if !km.is_finite() => Err(LocalValidationError::InvalidOdometer(raw.to_string())),
        Ok(km) if km <= 0.0 => Err(LocalValidationError::NonPositiveOdometer(km)),
        Ok(km) => Ok(km),
        Err(_) => Err(LocalValidationError::InvalidOdometer(raw.to_string())),
    }
}

/// Parses an odometer reading without checks; anything unparseable is NaN.
pub fn parse_odometer_lenient(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    // --- ValidationErrorDetail ---

    #[test]
    fn detail_displays_field_and_reason() {
        let detail = ValidationErrorDetail::new("odometerKm", "must be positive");
        assert_eq!(detail.to_string(), "odometerKm: must be positive");
    }

    #[test]
    fn detail_deserializes_from_server_shape() {
        let detail: ValidationErrorDetail =
            serde_json::from_str(r#"{"field":"vehicleId","reason":"unknown vehicle"}"#).unwrap();
        assert_eq!(detail, ValidationErrorDetail::new("vehicleId", "unknown vehicle"));
    }

    #[test]
    fn local_errors_map_to_wire_fields() {
        let cases = [
            (LocalValidationError::MissingVehicle, "vehicleId: a vehicle must be selected"),
            (LocalValidationError::MissingOdometer, "odometerKm: is required"),
            (
                LocalValidationError::InvalidOdometer("abc".into()),
                "odometerKm: must be a number",
            ),
            (
                LocalValidationError::NonPositiveOdometer(-3.0),
                "odometerKm: must be positive",
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ValidationErrorDetail::from(err).to_string(), expected);
        }
    }

    // --- validate_vehicle_id ---

    #[test]
    fn vehicle_id_present() {
        assert_eq!(validate_vehicle_id("v1"), Ok(()));
    }

    #[test]
    fn vehicle_id_empty() {
        assert_eq!(
            validate_vehicle_id(""),
            Err(LocalValidationError::MissingVehicle)
        );
    }

    // --- validate_odometer ---

    #[test]
    fn odometer_integer() {
        assert_eq!(validate_odometer("120500"), Ok(120500.0));
    }

    #[test]
    fn odometer_decimal_with_whitespace() {
        assert_eq!(validate_odometer("  1234.5 "), Ok(1234.5));
    }

    #[test]
    fn odometer_empty() {
        assert_eq!(
            validate_odometer("   "),
            Err(LocalValidationError::MissingOdometer)
        );
    }

    #[test]
    fn odometer_not_a_number() {
        assert_eq!(
            validate_odometer("12km"),
            Err(LocalValidationError::InvalidOdometer("12km".into()))
        );
    }

    #[test]
    fn odometer_nan_and_infinity_rejected() {
        assert!(matches!(
            validate_odometer("NaN"),
            Err(LocalValidationError::InvalidOdometer(_))
        ));
        assert!(matches!(
            validate_odometer("inf"),
            Err(LocalValidationError::InvalidOdometer(_))
        ));
    }

    #[test]
    fn odometer_zero_and_negative_rejected() {
        assert_eq!(
            validate_odometer("0"),
            Err(LocalValidationError::NonPositiveOdometer(0.0))
        );
        assert_eq!(
            validate_odometer("-5"),
            Err(LocalValidationError::NonPositiveOdometer(-5.0))
        );
    }

    #[quickcheck]
    fn odometer_positive_integers_accepted(km: u32) -> bool {
        let km = u64::from(km) + 1;
        validate_odometer(&km.to_string()) == Ok(km as f64)
    }

    // --- parse_odometer_lenient ---

    #[test]
    fn lenient_parses_numbers() {
        assert_eq!(parse_odometer_lenient(" 42.5 "), 42.5);
        assert_eq!(parse_odometer_lenient("-1"), -1.0);
    }

    #[test]
    fn lenient_empty_is_nan() {
        assert!(parse_odometer_lenient("").is_nan());
        assert!(parse_odometer_lenient("abc").is_nan());
    }
}
