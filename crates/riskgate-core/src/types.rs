//! Request, response and profile types.
//!
//! Wire types use camelCase JSON field names. Only [`GeoPoint`] carries
//! validation; everything else is accepted as deserialised.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Build a validated point.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        let point = Self { latitude, longitude };
        point.validate()?;
        Ok(point)
    }

    /// Check that both coordinates are finite and within their ranges.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.latitude.is_finite() {
            return Err(ValidationError::NonFinite { field: "latitude" });
        }
        if !self.longitude.is_finite() {
            return Err(ValidationError::NonFinite { field: "longitude" });
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ValidationError::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ValidationError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }

    /// The diametrically opposite point on the globe.
    ///
    /// # Examples
    ///
    /// ```
    /// use riskgate_core::types::GeoPoint;
    /// let p = GeoPoint { latitude: 17.385, longitude: 78.4867 };
    /// let a = p.antipode();
    /// assert_eq!(a.latitude, -17.385);
    /// assert!((a.longitude - (-101.5133)).abs() < 1e-9);
    /// ```
    pub fn antipode(&self) -> Self {
        let longitude = if self.longitude > 0.0 {
            self.longitude - 180.0
        } else {
            self.longitude + 180.0
        };
        Self {
            latitude: -self.latitude,
            longitude,
        }
    }
}

/// Last-known trusted location of a user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub latitude: f64,
    pub longitude: f64,
}

impl UserProfile {
    pub fn new(location: GeoPoint) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }

    pub fn location(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Client-reported device integrity signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceData {
    #[serde(default)]
    pub is_virtual_device: bool,
}

/// Inbound assessment request body.
///
/// `location` is optional on the wire so that unknown users can be answered
/// without it; a known user without a location is a [`ValidationError`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRequest {
    pub user_id: String,
    /// Mouse interaction heuristic, expected in 0–100.
    pub mouse_score: i32,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_data: Option<DeviceData>,
}

/// Final decision derived from the weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Allow,
    Challenge,
    Deny,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "Allow",
            Self::Challenge => "Challenge",
            Self::Deny => "Deny",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outbound assessment result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResponse {
    pub decision: Decision,
    /// Unrounded weighted total in [0, 100].
    pub risk_score: f64,
}

/// Per-request sub-scores, kept for diagnostics. Never serialised on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RiskBreakdown {
    pub distance_km: f64,
    pub geo: f64,
    pub behavior: f64,
    pub network: f64,
    pub device: f64,
    /// `true` when the network score is a substitute for a failed lookup.
    pub network_degraded: bool,
}
