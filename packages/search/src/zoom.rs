//! Map zoom selection for a search radius.

use facility_map_search_models::SearchRadius;

/// Zoom level for the region-wide overview shown without a valid ZIP.
pub const OVERVIEW_ZOOM: u8 = 6;

/// Zoom level used for radii larger than every step below.
pub const FALLBACK_ZOOM: u8 = 8;

/// Upper radius bound (inclusive, miles) and the zoom level for it.
const ZOOM_STEPS: &[(u8, u8)] = &[(6, 12), (10, 11), (23, 10), (47, 9)];

/// Picks the zoom level that frames a circle of the given radius.
#[must_use]
pub fn zoom_for_radius(radius: SearchRadius) -> u8 {
    let miles = radius.miles();
    ZOOM_STEPS
        .iter()
        .find(|(max_miles, _)| miles <= *max_miles)
        .map_or(FALLBACK_ZOOM, |(_, zoom)| *zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zoom(miles: u32) -> u8 {
        zoom_for_radius(SearchRadius::from_miles(miles).unwrap())
    }

    #[test]
    fn step_boundaries() {
        assert_eq!(zoom(0), 12);
        assert_eq!(zoom(6), 12);
        assert_eq!(zoom(7), 11);
        assert_eq!(zoom(10), 11);
        assert_eq!(zoom(11), 10);
        assert_eq!(zoom(23), 10);
        assert_eq!(zoom(24), 9);
        assert_eq!(zoom(47), 9);
        assert_eq!(zoom(48), 8);
        assert_eq!(zoom(100), 8);
    }

    #[test]
    fn zoom_never_increases_with_radius() {
        for miles in 0..100 {
            assert!(zoom(miles) >= zoom(miles + 1), "zoom rose at {miles} miles");
        }
    }
}
