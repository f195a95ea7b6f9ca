//! Server configuration from CLI flags and environment variables.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use riskgate_core::error::ConfigError;
use riskgate_core::types::{GeoPoint, UserProfile};
use riskgate_engine::{
    MemoryProfileStore, RiskAggregator, Scheme, ScoringPolicy, StaticDenylist, Thresholds, Weights,
};

/// Riskgate scoring server.
#[derive(Parser, Debug)]
#[command(
    name = "riskgate-server",
    version,
    about = "Login and transaction risk scoring over HTTP"
)]
pub struct Args {
    /// Address to bind the HTTP server.
    #[arg(long, env = "RISKGATE_BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: String,

    /// Weighting scheme ("extended" or "baseline").
    #[arg(long, env = "RISKGATE_SCHEME", default_value = "extended")]
    pub scheme: String,

    /// Custom weights as `<geo>,<network>,<device>,<behavior>`; must sum to 1.0.
    ///
    /// Setting this or either threshold switches to the `custom` scheme, with
    /// unset values taken from `--scheme`.
    #[arg(long, env = "RISKGATE_WEIGHTS", value_delimiter = ',')]
    pub weights: Vec<f64>,

    /// Totals strictly below this are allowed.
    #[arg(long, env = "RISKGATE_ALLOW_BELOW")]
    pub allow_below: Option<f64>,

    /// Totals at or above this are denied.
    #[arg(long, env = "RISKGATE_DENY_AT")]
    pub deny_at: Option<f64>,

    /// Network risk used when the reputation source cannot answer (0-100).
    #[arg(long, default_value_t = riskgate_core::constants::DEFAULT_UNAVAILABLE_NETWORK_RISK)]
    pub unavailable_network_risk: f64,

    /// Extra denylisted addresses, on top of the demo list.
    #[arg(long = "deny-ip", value_delimiter = ',')]
    pub deny_ips: Vec<String>,

    /// Extra trusted profiles as `<user>=<lat>,<lon>`, on top of the demo user.
    #[arg(long = "profile")]
    pub profiles: Vec<String>,

    /// Take the caller address from X-Forwarded-For / X-Real-IP when present.
    ///
    /// Only enable behind a reverse proxy that overwrites these headers.
    #[arg(long)]
    pub trust_forwarded_for: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, default_value = "text")]
    pub log_format: String,
}

/// Validated server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub policy: ScoringPolicy,
    pub deny_ips: Vec<String>,
    pub profiles: Vec<(String, UserProfile)>,
    pub trust_forwarded_for: bool,
    pub log_level: String,
    pub log_format: String,
}

impl Args {
    /// Validate CLI args into a [`ServerConfig`].
    pub fn into_config(self) -> Result<ServerConfig> {
        let scheme: Scheme = self.scheme.parse().context("Invalid --scheme")?;
        let policy = self
            .scoring_policy(scheme)?
            .with_unavailable_network_risk(self.unavailable_network_risk)
            .context("Invalid --unavailable-network-risk")?;

        let profiles = self
            .profiles
            .iter()
            .map(|entry| parse_profile(entry))
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid --profile")?;

        let deny_ips = self
            .deny_ips
            .into_iter()
            .map(|ip| ip.trim().to_string())
            .filter(|ip| !ip.is_empty())
            .collect();

        Ok(ServerConfig {
            bind_addr: self.bind,
            policy,
            deny_ips,
            profiles,
            trust_forwarded_for: self.trust_forwarded_for,
            log_level: self.log_level,
            log_format: self.log_format,
        })
    }

    /// Preset for `scheme`, or a validated custom policy when any weight or
    /// threshold override is given.
    fn scoring_policy(&self, scheme: Scheme) -> Result<ScoringPolicy> {
        let preset = ScoringPolicy::for_scheme(scheme);
        if self.weights.is_empty() && self.allow_below.is_none() && self.deny_at.is_none() {
            return Ok(preset);
        }

        let weights = match self.weights.as_slice() {
            [] => preset.weights,
            &[geo, network, device, behavior] => Weights {
                geo,
                network,
                device,
                behavior,
            },
            other => return Err(ConfigError::WeightCount(other.len())).context("Invalid --weights"),
        };
        let thresholds = Thresholds {
            allow_below: self.allow_below.unwrap_or(preset.thresholds.allow_below),
            deny_at_or_above: self.deny_at.unwrap_or(preset.thresholds.deny_at_or_above),
        };
        ScoringPolicy::custom(weights, thresholds).context("Invalid custom scoring policy")
    }
}

impl ServerConfig {
    /// Build the profile store, denylist and aggregator described by this config.
    pub fn build_aggregator(&self) -> RiskAggregator {
        let store = MemoryProfileStore::with_demo_seed();
        for (user_id, profile) in &self.profiles {
            store.insert(user_id.clone(), *profile);
        }

        let mut denylist = StaticDenylist::demo();
        for ip in &self.deny_ips {
            denylist.insert(ip);
        }

        RiskAggregator::new(Arc::new(store), Arc::new(denylist), self.policy)
    }
}

/// Parse a `<user>=<lat>,<lon>` profile entry.
pub fn parse_profile(entry: &str) -> Result<(String, UserProfile), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidProfile {
        entry: entry.to_string(),
        reason: reason.to_string(),
    };

    let (user, coords) = entry
        .split_once('=')
        .ok_or_else(|| invalid("expected <user>=<lat>,<lon>"))?;
    let user = user.trim();
    if user.is_empty() {
        return Err(invalid("empty user id"));
    }

    let (lat, lon) = coords
        .split_once(',')
        .ok_or_else(|| invalid("expected <lat>,<lon>"))?;
    let latitude: f64 = lat.trim().parse().map_err(|_| invalid("latitude is not a number"))?;
    let longitude: f64 = lon.trim().parse().map_err(|_| invalid("longitude is not a number"))?;
    let location = GeoPoint::new(latitude, longitude).map_err(|e| invalid(&e.to_string()))?;

    Ok((user.to_string(), UserProfile::new(location)))
}
