//! Risk aggregator: combines the four sub-scores into a decision.
//!
//! Each call is independent. The only shared state is the read-only profile
//! store and the reputation checker, both injected at construction.

use std::sync::Arc;

use riskgate_core::constants::{MAX_RISK, UNKNOWN_USER_RISK};
use riskgate_core::error::ValidationError;
use riskgate_core::traits::{NetworkReputationChecker, ProfileStore};
use riskgate_core::types::{Decision, RiskBreakdown, RiskRequest, RiskResponse};
use tracing::{debug, info, warn};

use crate::behavior::behavior_risk;
use crate::device::device_risk;
use crate::geo::geo_risk;
use crate::policy::ScoringPolicy;

/// Response for users without a trusted profile. Not derived from weights.
pub const UNKNOWN_USER_RESPONSE: RiskResponse = RiskResponse {
    decision: Decision::Challenge,
    risk_score: UNKNOWN_USER_RISK,
};

/// Result of an assessment together with the sub-scores that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    pub response: RiskResponse,
    /// `None` when the user was unknown and the fixed fallback was returned.
    pub breakdown: Option<RiskBreakdown>,
}

/// Scores requests against a profile store, a reputation source and a policy.
#[derive(Clone)]
pub struct RiskAggregator {
    profiles: Arc<dyn ProfileStore>,
    reputation: Arc<dyn NetworkReputationChecker>,
    policy: ScoringPolicy,
}

impl RiskAggregator {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        reputation: Arc<dyn NetworkReputationChecker>,
        policy: ScoringPolicy,
    ) -> Self {
        Self {
            profiles,
            reputation,
            policy,
        }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn profiles(&self) -> &dyn ProfileStore {
        self.profiles.as_ref()
    }

    pub fn reputation(&self) -> &dyn NetworkReputationChecker {
        self.reputation.as_ref()
    }

    /// Assess a request from `caller_address`.
    ///
    /// Unknown users get [`UNKNOWN_USER_RESPONSE`] regardless of the other
    /// fields. A known user without a valid location is a [`ValidationError`].
    pub fn assess(
        &self,
        request: &RiskRequest,
        caller_address: &str,
    ) -> Result<RiskResponse, ValidationError> {
        self.assess_detailed(request, caller_address)
            .map(|a| a.response)
    }

    /// Like [`assess`](Self::assess) but also returns the sub-scores.
    pub fn assess_detailed(
        &self,
        request: &RiskRequest,
        caller_address: &str,
    ) -> Result<Assessment, ValidationError> {
        let Some(profile) = self.profiles.lookup(&request.user_id) else {
            info!(
                user = %request.user_id,
                decision = %UNKNOWN_USER_RESPONSE.decision,
                risk_score = UNKNOWN_USER_RESPONSE.risk_score,
                "assess: unknown user"
            );
            return Ok(Assessment {
                response: UNKNOWN_USER_RESPONSE,
                breakdown: None,
            });
        };

        let observed = request.location.ok_or(ValidationError::MissingLocation)?;
        observed.validate()?;

        let (distance_km, geo) = geo_risk(&observed, &profile.location());
        let behavior = behavior_risk(request.mouse_score);
        let (network, network_degraded) = self.network_risk(caller_address);
        let device = device_risk(request.device_data.as_ref());

        let breakdown = RiskBreakdown {
            distance_km,
            geo,
            behavior,
            network,
            device,
            network_degraded,
        };
        let total = self.policy.weighted_total(&breakdown);
        let decision = self.policy.decide(total);

        debug!(
            user = %request.user_id,
            distance_km,
            geo,
            mouse_score = request.mouse_score,
            behavior,
            network,
            network_degraded,
            device,
            total,
            scheme = %self.policy.scheme,
            "assess: sub-scores"
        );
        info!(
            user = %request.user_id,
            %decision,
            risk_score = total,
            "assess: decision"
        );

        Ok(Assessment {
            response: RiskResponse {
                decision,
                risk_score: total,
            },
            breakdown: Some(breakdown),
        })
    }

    /// Network risk, degrading to the policy default when the source fails
    /// or answers outside the 0–100 scale.
    fn network_risk(&self, caller_address: &str) -> (f64, bool) {
        let fallback = self.policy.unavailable_network_risk;
        match self.reputation.risk(caller_address) {
            Ok(risk) if risk.is_finite() && (0.0..=MAX_RISK).contains(&risk) => (risk, false),
            Ok(risk) => {
                warn!(
                    address = %caller_address,
                    risk,
                    fallback,
                    "assess: reputation source returned out-of-range risk, using fallback"
                );
                (fallback, true)
            }
            Err(e) => {
                warn!(
                    address = %caller_address,
                    error = %e,
                    fallback,
                    "assess: reputation lookup failed, using fallback"
                );
                (fallback, true)
            }
        }
    }
}
