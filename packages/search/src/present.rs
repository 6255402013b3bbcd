//! Describes a search outcome for the map and summary widgets.
//!
//! Nothing here draws anything: it produces the [`Presentation`] value a
//! frontend renders, so the two display states are fully determined by the
//! outcome alone.

use facility_map_facility_models::CapacityStatus;
use facility_map_search_models::{
    Coordinate, FacilityMatch, LegendEntry, MapMarker, MapView, Presentation, RadiusCircle,
    SearchOutcome, SearchResult, SearchState, SummaryView,
};

use crate::distance::miles_to_meters;
use crate::zoom::{OVERVIEW_ZOOM, zoom_for_radius};

/// Center of the California overview map.
pub const OVERVIEW_CENTER: Coordinate = Coordinate::new(37.1841, -119.4696);

/// Summary text shown while no valid ZIP is entered.
pub const PLACEHOLDER_TEXT: &str = "Enter a valid California ZIP code to see nearby facilities.";

/// Builds the presentation for a search outcome.
#[must_use]
pub fn present(outcome: &SearchOutcome) -> Presentation {
    match outcome {
        SearchOutcome::NoValidZip => overview(),
        SearchOutcome::ValidZip(result) => results_view(result),
    }
}

/// The fixed region overview: no circle, no markers, placeholder text.
#[must_use]
pub fn overview() -> Presentation {
    Presentation {
        state: SearchState::NoValidZip,
        map: MapView {
            center: OVERVIEW_CENTER,
            zoom: OVERVIEW_ZOOM,
            circle: None,
            markers: Vec::new(),
            legend: legend(),
        },
        summary: SummaryView::Placeholder {
            text: PLACEHOLDER_TEXT.to_owned(),
        },
    }
}

fn results_view(result: &SearchResult) -> Presentation {
    let center = Coordinate::from(&result.origin);
    let radius = result.radius;

    Presentation {
        state: SearchState::ValidZip,
        map: MapView {
            center,
            zoom: zoom_for_radius(radius),
            circle: Some(RadiusCircle {
                center,
                radius_meters: miles_to_meters(radius.as_f64()),
            }),
            markers: result.facilities.iter().map(marker).collect(),
            legend: legend(),
        },
        summary: SummaryView::Statistics {
            lines: result.summary.lines(),
        },
    }
}

fn marker(m: &FacilityMatch) -> MapMarker {
    let status = m.facility.capacity_status();
    MapMarker {
        id: m.facility.id.clone(),
        position: Coordinate::from(&m.facility),
        capacity_status: status,
        color: status.color().to_owned(),
        popup: popup_text(m),
    }
}

/// Popup text for a facility marker: name, address, city and the distance
/// rounded to two decimals.
#[must_use]
pub fn popup_text(m: &FacilityMatch) -> String {
    format!(
        "{}\n{}, {}\n{:.2} miles away",
        m.facility.name, m.facility.address, m.facility.city, m.distance_miles
    )
}

fn legend() -> Vec<LegendEntry> {
    CapacityStatus::all()
        .iter()
        .map(|status| LegendEntry {
            capacity_status: *status,
            label: status.label().to_owned(),
            color: status.color().to_owned(),
        })
        .collect()
}
