#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the facility map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the search pipeline types to allow independent evolution of the API
//! contract.

use facility_map_facility_models::AdditionalFilter;
use facility_map_search_models::{
    FacilityMatch, InvalidRadiusError, MapView, Presentation, SearchOutcome, SearchQuery,
    SearchRadius, SearchState, SummaryView,
};
use serde::{Deserialize, Serialize};

/// Query parameters for the search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQueryParams {
    /// ZIP code as typed by the user.
    pub zip: Option<String>,
    /// Search radius in whole miles (0-100). Defaults to 10.
    pub radius: Option<u32>,
    /// Whether the facility-type filter is switched on.
    pub facility_type_enabled: Option<bool>,
    /// Facility type to keep when the filter is on.
    pub facility_type: Option<String>,
    /// Comma-separated additional filters (`longTermCare`, `birthing`).
    pub filters: Option<String>,
}

impl TryFrom<&SearchQueryParams> for SearchQuery {
    type Error = InvalidRadiusError;

    fn try_from(params: &SearchQueryParams) -> Result<Self, Self::Error> {
        let radius = params
            .radius
            .map_or(Ok(SearchRadius::DEFAULT), SearchRadius::from_miles)?;

        let facility_type = if params.facility_type_enabled.unwrap_or(false) {
            params
                .facility_type
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_owned)
        } else {
            None
        };

        let filters = params
            .filters
            .as_deref()
            .map(|s| {
                s.split(',')
                    .filter_map(|f| f.trim().parse::<AdditionalFilter>().ok())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            zip: params.zip.clone().unwrap_or_default(),
            radius,
            facility_type,
            filters,
        })
    }
}

/// A facility in a search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFacility {
    /// Licensing identifier.
    pub id: String,
    /// Facility name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Facility-type category.
    pub facility_type: String,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Licensed capacity, if reported.
    pub capacity: Option<u32>,
    /// Whether capacity is greater than zero.
    pub has_inpatient_capacity: bool,
    /// Long-term-care license flag.
    pub long_term_care: bool,
    /// Birthing services flag.
    pub birthing: bool,
    /// Distance from the searched ZIP, in miles.
    pub distance_miles: f64,
}

impl From<&FacilityMatch> for ApiFacility {
    fn from(m: &FacilityMatch) -> Self {
        let f = &m.facility;
        Self {
            id: f.id.clone(),
            name: f.name.clone(),
            address: f.address.clone(),
            city: f.city.clone(),
            facility_type: f.facility_type.clone(),
            latitude: f.latitude,
            longitude: f.longitude,
            capacity: f.capacity,
            has_inpatient_capacity: f.has_inpatient_capacity(),
            long_term_care: f.long_term_care,
            birthing: f.birthing,
            distance_miles: m.distance_miles,
        }
    }
}

/// Response from the search endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSearchResponse {
    /// Display state (`validZip` or `noValidZip`).
    pub state: SearchState,
    /// Map description.
    pub map: MapView,
    /// Summary panel contents.
    pub summary: SummaryView,
    /// Matching facilities, nearest first. Empty without a valid ZIP.
    pub facilities: Vec<ApiFacility>,
}

impl ApiSearchResponse {
    /// Combines a search outcome with its presentation.
    #[must_use]
    pub fn new(outcome: &SearchOutcome, presentation: Presentation) -> Self {
        let facilities = outcome
            .result()
            .map(|r| r.facilities.iter().map(ApiFacility::from).collect())
            .unwrap_or_default();

        Self {
            state: presentation.state,
            map: presentation.map,
            summary: presentation.summary,
            facilities,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Number of facilities in the loaded catalog.
    pub facility_count: usize,
    /// Number of ZIP codes in the loaded gazetteer.
    pub zip_count: usize,
}

/// Error body for rejected requests.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// What went wrong.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SearchQueryParams {
        SearchQueryParams {
            zip: Some("90210".to_string()),
            ..SearchQueryParams::default()
        }
    }

    #[test]
    fn defaults_to_ten_miles_and_no_filters() {
        let query = SearchQuery::try_from(&params()).unwrap();
        assert_eq!(query.zip, "90210");
        assert_eq!(query.radius, SearchRadius::DEFAULT);
        assert!(query.facility_type.is_none());
        assert!(query.filters.is_empty());
    }

    #[test]
    fn rejects_out_of_range_radius() {
        let p = SearchQueryParams {
            radius: Some(150),
            ..params()
        };
        assert_eq!(
            SearchQuery::try_from(&p),
            Err(InvalidRadiusError { miles: 150 })
        );
    }

    #[test]
    fn facility_type_only_applies_when_enabled() {
        let disabled = SearchQueryParams {
            facility_type: Some("Clinic".to_string()),
            facility_type_enabled: Some(false),
            ..params()
        };
        assert!(
            SearchQuery::try_from(&disabled)
                .unwrap()
                .facility_type
                .is_none()
        );

        let enabled = SearchQueryParams {
            facility_type_enabled: Some(true),
            ..disabled
        };
        assert_eq!(
            SearchQuery::try_from(&enabled)
                .unwrap()
                .facility_type
                .as_deref(),
            Some("Clinic")
        );
    }

    #[test]
    fn parses_filter_list_and_ignores_unknown() {
        let p = SearchQueryParams {
            filters: Some("longTermCare, birthing,icu".to_string()),
            ..params()
        };
        let query = SearchQuery::try_from(&p).unwrap();
        assert!(query.long_term_care_only());
        assert!(query.birthing_only());
        assert_eq!(query.filters.len(), 2);
    }

    #[test]
    fn params_deserialize_from_camel_case() {
        let p: SearchQueryParams = serde_json::from_value(serde_json::json!({
            "zip": "94103",
            "radius": 25,
            "facilityTypeEnabled": true,
            "facilityType": "Clinic",
        }))
        .unwrap();
        assert_eq!(p.radius, Some(25));
        assert_eq!(p.facility_type_enabled, Some(true));
    }
}
