//! Error types for Riskgate.
use thiserror::Error;

/// Malformed or missing request fields. Surfaced to callers as a client error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("location is required for known users")] MissingLocation,
    #[error("{field} is not a finite number")] NonFinite { field: &'static str },
    #[error("latitude out of range [-90, 90]: {0}")] LatitudeOutOfRange(f64),
    #[error("longitude out of range [-180, 180]: {0}")] LongitudeOutOfRange(f64),
}

/// Failures of a network reputation source. Never fails an assessment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReputationError {
    #[error("reputation source unavailable: {0}")] Unavailable(String),
    #[error("reputation lookup timed out")] Timeout,
}

/// Invalid scoring or store configuration, detected at startup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("weight {name} must be finite and within [0, 1], got {value}")] InvalidWeight { name: &'static str, value: f64 },
    #[error("weights must sum to 1.0, got {0}")] WeightSum(f64),
    #[error("expected 4 weights (geo,network,device,behavior), got {0}")] WeightCount(usize),
    #[error("thresholds must satisfy 0 <= allow ({allow_below}) <= deny ({deny_at_or_above}) <= 100")] InvalidThresholds { allow_below: f64, deny_at_or_above: f64 },
    #[error("risk value must be finite and within [0, 100], got {0}")] InvalidRisk(f64),
    #[error("unknown scoring scheme: {0}")] UnknownScheme(String),
    #[error("invalid profile entry {entry:?}: {reason}")] InvalidProfile { entry: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_name_the_field() {
        let err = ValidationError::NonFinite { field: "latitude" };
        assert_eq!(err.to_string(), "latitude is not a finite number");
        assert_eq!(
            ValidationError::MissingLocation.to_string(),
            "location is required for known users"
        );
    }

    #[test]
    fn config_error_reports_sum() {
        let err = ConfigError::WeightSum(0.9);
        assert_eq!(err.to_string(), "weights must sum to 1.0, got 0.9");
    }
}
