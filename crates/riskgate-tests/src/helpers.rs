//! Shared test helpers for scoring integration tests.

use std::sync::Arc;

use riskgate_core::constants::DEMO_USER_LOCATION;
use riskgate_core::types::{DeviceData, GeoPoint, RiskRequest};
use riskgate_engine::{MemoryProfileStore, RiskAggregator, ScoringPolicy, StaticDenylist};

/// A denylisted address from the demo list.
pub const LISTED_ADDR: &str = "198.51.100.23";
/// An address not on the demo list.
pub const CLEAN_ADDR: &str = "203.0.113.77";

/// Trusted location of the demo user.
pub fn home() -> GeoPoint {
    let (latitude, longitude) = DEMO_USER_LOCATION;
    GeoPoint {
        latitude,
        longitude,
    }
}

/// Aggregator over the demo profile store and demo denylist.
pub fn demo_aggregator(policy: ScoringPolicy) -> RiskAggregator {
    RiskAggregator::new(
        Arc::new(MemoryProfileStore::with_demo_seed()),
        Arc::new(StaticDenylist::demo()),
        policy,
    )
}

/// Request for `user` with every field supplied.
pub fn make_request(
    user: &str,
    mouse_score: i32,
    location: GeoPoint,
    is_virtual: bool,
) -> RiskRequest {
    RiskRequest {
        user_id: user.to_string(),
        mouse_score,
        location: Some(location),
        device_data: Some(DeviceData {
            is_virtual_device: is_virtual,
        }),
    }
}

/// Point `km` kilometres due north of `from` along its meridian.
pub fn north_of(from: GeoPoint, km: f64) -> GeoPoint {
    let degrees = (km / riskgate_core::constants::EARTH_RADIUS_KM).to_degrees();
    GeoPoint {
        latitude: from.latitude + degrees,
        longitude: from.longitude,
    }
}
