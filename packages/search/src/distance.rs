//! Great-circle distances in miles.
//!
//! Thin wrapper over `geo`'s haversine measure on a spherical earth. Every
//! input in WGS84 range produces a finite, non-negative distance.

use facility_map_search_models::Coordinate;
use geo::{Distance as _, Haversine, Point};

/// Meters in one statute mile.
pub const METERS_PER_MILE: f64 = 1_609.344;

/// Great-circle distance between two coordinates, in miles.
#[must_use]
pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    Haversine.distance(to_point(a), to_point(b)) / METERS_PER_MILE
}

/// Distances from `origin` to every point, aligned by position.
#[must_use]
pub fn distances_from(
    origin: Coordinate,
    points: impl IntoIterator<Item = Coordinate>,
) -> Vec<f64> {
    let origin = to_point(origin);
    points
        .into_iter()
        .map(|p| Haversine.distance(origin, to_point(p)) / METERS_PER_MILE)
        .collect()
}

/// Converts miles to meters (for map circle overlays).
#[must_use]
pub const fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

fn to_point(c: Coordinate) -> Point<f64> {
    Point::new(c.longitude, c.latitude)
}
