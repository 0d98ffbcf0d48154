//! Great-circle distance helpers

use shared::types::{GeoPoint, RoutePoint};

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers (haversine)
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Total length of an ordered route in kilometers
pub fn route_length_km(points: &[RoutePoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_km(pair[0].position(), pair[1].position()))
        .sum()
}
