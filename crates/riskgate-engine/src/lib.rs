//! # riskgate-engine — Risk evaluators and aggregation.
//!
//! All scoring is pure computation over a read-only profile lookup:
//! - **Geo risk**: haversine distance from the trusted location, bucketed at
//!   50 km and 500 km.
//! - **Behaviour risk**: mouse heuristic bucketed at 30 and 70.
//! - **Network risk**: caller address against a [`StaticDenylist`], behind the
//!   `NetworkReputationChecker` seam so a live reputation source can replace it.
//! - **Device risk**: client-reported virtualisation flag.
//! - **Aggregation**: [`ScoringPolicy`] weights and thresholds turn the four
//!   sub-scores into an Allow / Challenge / Deny decision.

pub mod aggregator;
pub mod behavior;
pub mod device;
pub mod geo;
pub mod network;
pub mod policy;
pub mod store;

pub use aggregator::{Assessment, RiskAggregator, UNKNOWN_USER_RESPONSE};
pub use network::StaticDenylist;
pub use policy::{Scheme, ScoringPolicy, Thresholds, Weights};
pub use store::MemoryProfileStore;
