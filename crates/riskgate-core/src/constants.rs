//! Scoring constants. All risk values are on a 0–100 scale.

/// Upper bound of every sub-score and of the weighted total.
pub const MAX_RISK: f64 = 100.0;

/// Mean Earth radius used by the haversine distance, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// --- Geo risk ---------------------------------------------------------------

/// Distances strictly below this are treated as the trusted location.
pub const GEO_NEAR_KM: f64 = 50.0;
/// Distances at or above this are treated as a different region.
pub const GEO_FAR_KM: f64 = 500.0;

pub const GEO_RISK_NEAR: f64 = 0.0;
pub const GEO_RISK_REGIONAL: f64 = 60.0;
pub const GEO_RISK_FAR: f64 = 100.0;

// --- Behaviour risk ---------------------------------------------------------

/// Mouse heuristic scores below this are human-like.
pub const MOUSE_SUSPICIOUS_FROM: i32 = 30;
/// Mouse heuristic scores at or above this are bot-like.
pub const MOUSE_BOT_FROM: i32 = 70;

pub const BEHAVIOR_RISK_HUMAN: f64 = 0.0;
pub const BEHAVIOR_RISK_SUSPICIOUS: f64 = 50.0;
pub const BEHAVIOR_RISK_BOT: f64 = 90.0;

// --- Network / device risk --------------------------------------------------

pub const NETWORK_RISK_CLEAN: f64 = 0.0;
pub const NETWORK_RISK_LISTED: f64 = 100.0;

/// Network risk substituted when the reputation source cannot answer.
pub const DEFAULT_UNAVAILABLE_NETWORK_RISK: f64 = 50.0;

pub const DEVICE_RISK_PHYSICAL: f64 = 0.0;
pub const DEVICE_RISK_VIRTUAL: f64 = 100.0;

// --- Unknown users ----------------------------------------------------------

/// Fixed score returned for users without a trusted profile.
pub const UNKNOWN_USER_RISK: f64 = 75.0;

// --- Weighting presets ------------------------------------------------------

/// Extended scheme: geo, network, device and behaviour weights.
pub const EXTENDED_WEIGHTS: [f64; 4] = [0.25, 0.15, 0.10, 0.50];
/// Extended scheme: totals below this are allowed.
pub const EXTENDED_ALLOW_BELOW: f64 = 30.0;

/// Baseline scheme: geo and behaviour only.
pub const BASELINE_WEIGHTS: [f64; 4] = [0.40, 0.0, 0.0, 0.60];
/// Baseline scheme: totals below this are allowed.
pub const BASELINE_ALLOW_BELOW: f64 = 35.0;

/// Both schemes deny at or above this total.
pub const DENY_AT_OR_ABOVE: f64 = 65.0;

/// Tolerance when checking that weights sum to one.
pub const WEIGHT_SUM_EPSILON: f64 = 1e-9;

// --- Demo data --------------------------------------------------------------

/// Demo user seeded into the in-memory profile store.
pub const DEMO_USER_ID: &str = "user123";
/// Trusted location of [`DEMO_USER_ID`] (Hyderabad).
pub const DEMO_USER_LOCATION: (f64, f64) = (17.3850, 78.4867);

/// Demo denylist: loopback plus two documentation-range "VPN exit" addresses.
pub const DEMO_DENYLIST: [&str; 4] = ["127.0.0.1", "::1", "192.0.2.10", "198.51.100.23"];
