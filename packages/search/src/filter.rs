//! Radius and attribute filtering.
//!
//! Facilities are first annotated with their distance from the query point,
//! then narrowed by radius, and only the survivors are checked against the
//! facility-type and additional attribute filters.

use facility_map_facility_models::Facility;
use facility_map_search_models::{Coordinate, SearchQuery};

use crate::distance::distances_from;

/// A catalog facility paired with its distance from the query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyFacility<'a> {
    /// The catalog record.
    pub facility: &'a Facility,
    /// Great-circle distance in miles.
    pub distance_miles: f64,
}

/// Pairs every facility with its distance from `origin`.
#[must_use]
pub fn annotate(origin: Coordinate, facilities: &[Facility]) -> Vec<NearbyFacility<'_>> {
    let distances = distances_from(origin, facilities.iter().map(Coordinate::from));
    facilities
        .iter()
        .zip(distances)
        .map(|(facility, distance_miles)| NearbyFacility {
            facility,
            distance_miles,
        })
        .collect()
}

/// Keeps the facilities that satisfy every filter in `query`.
///
/// The radius check is inclusive and runs first; the type and attribute
/// predicates only see facilities already inside the radius.
#[must_use]
pub fn apply_filters<'a>(
    annotated: impl IntoIterator<Item = NearbyFacility<'a>>,
    query: &SearchQuery,
) -> Vec<NearbyFacility<'a>> {
    let radius = query.radius.as_f64();

    annotated
        .into_iter()
        .filter(|n| n.distance_miles <= radius)
        .filter(|n| matches_type(n.facility, query.facility_type.as_deref()))
        .filter(|n| query.filters.iter().all(|f| n.facility.satisfies(*f)))
        .collect()
}

fn matches_type(facility: &Facility, facility_type: Option<&str>) -> bool {
    facility_type.is_none_or(|t| facility.facility_type == t)
}
