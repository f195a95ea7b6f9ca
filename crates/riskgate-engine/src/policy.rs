//! Scoring policy: sub-score weights and decision thresholds.
//!
//! Two incompatible weighting schemes are in circulation, so the policy is an
//! explicit value chosen at startup rather than a baked-in constant:
//!
//! | Scheme     | geo  | network | device | behaviour | Allow below | Deny from |
//! |------------|------|---------|--------|-----------|-------------|-----------|
//! | `extended` | 0.25 | 0.15    | 0.10   | 0.50      | 30          | 65        |
//! | `baseline` | 0.40 | 0       | 0      | 0.60      | 35          | 65        |
//!
//! `extended` is the default. Identical inputs score differently under the
//! two schemes; callers comparing scores across deployments must compare the
//! scheme reported by the status endpoint first.

use std::fmt;
use std::str::FromStr;

use riskgate_core::constants::{
    BASELINE_ALLOW_BELOW, BASELINE_WEIGHTS, DEFAULT_UNAVAILABLE_NETWORK_RISK, DENY_AT_OR_ABOVE,
    EXTENDED_ALLOW_BELOW, EXTENDED_WEIGHTS, MAX_RISK, WEIGHT_SUM_EPSILON,
};
use riskgate_core::error::ConfigError;
use riskgate_core::types::{Decision, RiskBreakdown};
use serde::Serialize;

/// Named weighting scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Geo, network, device and behaviour.
    #[default]
    Extended,
    /// Geo and behaviour only.
    Baseline,
    /// Operator-supplied weights and thresholds.
    Custom,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extended => "extended",
            Self::Baseline => "baseline",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "extended" => Ok(Self::Extended),
            "baseline" => Ok(Self::Baseline),
            other => Err(ConfigError::UnknownScheme(other.to_string())),
        }
    }
}

/// Per-signal weights. Must sum to 1.0 so the total stays on the 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weights {
    pub geo: f64,
    pub network: f64,
    pub device: f64,
    pub behavior: f64,
}

impl Weights {
    fn from_array([geo, network, device, behavior]: [f64; 4]) -> Self {
        Self {
            geo,
            network,
            device,
            behavior,
        }
    }

    pub fn sum(&self) -> f64 {
        self.geo + self.network + self.device + self.behavior
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("geo", self.geo),
            ("network", self.network),
            ("device", self.device),
            ("behavior", self.behavior),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(ConfigError::WeightSum(sum));
        }
        Ok(())
    }
}

/// Decision cut-offs on the weighted total.
///
/// `total < allow_below` allows, `total >= deny_at_or_above` denies, anything
/// in between is challenged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    pub allow_below: f64,
    pub deny_at_or_above: f64,
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self {
            allow_below,
            deny_at_or_above,
        } = *self;
        let ordered = allow_below.is_finite()
            && deny_at_or_above.is_finite()
            && 0.0 <= allow_below
            && allow_below <= deny_at_or_above
            && deny_at_or_above <= MAX_RISK;
        if !ordered {
            return Err(ConfigError::InvalidThresholds {
                allow_below,
                deny_at_or_above,
            });
        }
        Ok(())
    }

    pub fn decide(&self, total: f64) -> Decision {
        if total < self.allow_below {
            Decision::Allow
        } else if total < self.deny_at_or_above {
            Decision::Challenge
        } else {
            Decision::Deny
        }
    }
}

/// Complete scoring configuration handed to the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringPolicy {
    pub scheme: Scheme,
    pub weights: Weights,
    pub thresholds: Thresholds,
    /// Network risk used when the reputation source fails.
    pub unavailable_network_risk: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::extended()
    }
}

impl ScoringPolicy {
    /// Geo 0.25, network 0.15, device 0.10, behaviour 0.50; Allow below 30.
    pub fn extended() -> Self {
        Self {
            scheme: Scheme::Extended,
            weights: Weights::from_array(EXTENDED_WEIGHTS),
            thresholds: Thresholds {
                allow_below: EXTENDED_ALLOW_BELOW,
                deny_at_or_above: DENY_AT_OR_ABOVE,
            },
            unavailable_network_risk: DEFAULT_UNAVAILABLE_NETWORK_RISK,
        }
    }

    /// Geo 0.40, behaviour 0.60; Allow below 35.
    pub fn baseline() -> Self {
        Self {
            scheme: Scheme::Baseline,
            weights: Weights::from_array(BASELINE_WEIGHTS),
            thresholds: Thresholds {
                allow_below: BASELINE_ALLOW_BELOW,
                deny_at_or_above: DENY_AT_OR_ABOVE,
            },
            unavailable_network_risk: DEFAULT_UNAVAILABLE_NETWORK_RISK,
        }
    }

    /// Preset policy for a named scheme. `Custom` falls back to `extended`.
    pub fn for_scheme(scheme: Scheme) -> Self {
        match scheme {
            Scheme::Baseline => Self::baseline(),
            Scheme::Extended | Scheme::Custom => Self::extended(),
        }
    }

    /// Validated operator-supplied policy.
    pub fn custom(weights: Weights, thresholds: Thresholds) -> Result<Self, ConfigError> {
        weights.validate()?;
        thresholds.validate()?;
        Ok(Self {
            scheme: Scheme::Custom,
            weights,
            thresholds,
            unavailable_network_risk: DEFAULT_UNAVAILABLE_NETWORK_RISK,
        })
    }

    /// Override the degraded-upstream network risk.
    pub fn with_unavailable_network_risk(mut self, risk: f64) -> Result<Self, ConfigError> {
        if !risk.is_finite() || !(0.0..=MAX_RISK).contains(&risk) {
            return Err(ConfigError::InvalidRisk(risk));
        }
        self.unavailable_network_risk = risk;
        Ok(self)
    }

    /// Weighted sum of the sub-scores, clamped to the 0–100 scale.
    pub fn weighted_total(&self, b: &RiskBreakdown) -> f64 {
        let w = &self.weights;
        let total = b.geo * w.geo
            + b.network * w.network
            + b.device * w.device
            + b.behavior * w.behavior;
        total.clamp(0.0, MAX_RISK)
    }

    pub fn decide(&self, total: f64) -> Decision {
        self.thresholds.decide(total)
    }
}
