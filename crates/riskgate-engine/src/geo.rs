//! Geo risk: great-circle distance from the trusted location, bucketed.
//!
//! Buckets are half-open: `[0, 50)` km scores 0, `[50, 500)` km scores 60,
//! and anything from 500 km up scores 100.

use riskgate_core::constants::{
    EARTH_RADIUS_KM, GEO_FAR_KM, GEO_NEAR_KM, GEO_RISK_FAR, GEO_RISK_NEAR, GEO_RISK_REGIONAL,
};
use riskgate_core::types::GeoPoint;

/// Great-circle distance between two points in kilometres (haversine).
///
/// # Examples
///
/// ```
/// use riskgate_core::types::GeoPoint;
/// use riskgate_engine::geo::haversine_km;
/// let a = GeoPoint { latitude: 0.0, longitude: 0.0 };
/// let b = GeoPoint { latitude: 1.0, longitude: 0.0 };
/// assert!((haversine_km(&a, &b) - 111.195).abs() < 0.001);
/// ```
pub fn haversine_km(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let half_lat = (d_lat / 2.0).sin();
    let half_lon = (d_lon / 2.0).sin();
    let a = half_lat * half_lat + lat1.cos() * lat2.cos() * half_lon * half_lon;
    // Rounding can push `a` a hair past 1 near antipodes.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Map a distance in kilometres to a geo risk bucket.
pub fn geo_risk_for_distance(distance_km: f64) -> f64 {
    if distance_km < GEO_NEAR_KM {
        GEO_RISK_NEAR
    } else if distance_km < GEO_FAR_KM {
        GEO_RISK_REGIONAL
    } else {
        GEO_RISK_FAR
    }
}

/// Distance and geo risk of an observed location against the trusted one.
pub fn geo_risk(observed: &GeoPoint, trusted: &GeoPoint) -> (f64, f64) {
    let distance = haversine_km(observed, trusted);
    (distance, geo_risk_for_distance(distance))
}
