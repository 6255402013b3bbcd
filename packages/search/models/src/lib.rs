#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Search query, result and map presentation types.
//!
//! A [`SearchQuery`] is built fresh for every user interaction and turned
//! into a [`SearchOutcome`] by the search pipeline. The outcome is then
//! described for the UI as a [`Presentation`]: where to center the map,
//! which markers to draw, and what the summary panel says. None of these
//! values are cached between queries.

use std::collections::BTreeSet;

use facility_map_facility_models::{AdditionalFilter, CapacityStatus, Facility, ZipLocation};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<&ZipLocation> for Coordinate {
    fn from(zip: &ZipLocation) -> Self {
        Self::new(zip.latitude, zip.longitude)
    }
}

impl From<&Facility> for Coordinate {
    fn from(facility: &Facility) -> Self {
        Self::new(facility.latitude, facility.longitude)
    }
}

/// Search radius in whole miles, from 0 to [`SearchRadius::MAX_MILES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SearchRadius(u8);

impl SearchRadius {
    /// Largest radius the UI offers.
    pub const MAX_MILES: u8 = 100;

    /// Radius used when the caller does not pick one.
    pub const DEFAULT: Self = Self(10);

    /// Creates a radius from a mile count.
    ///
    /// # Errors
    ///
    /// Returns an error if `miles` is greater than [`Self::MAX_MILES`].
    pub fn from_miles(miles: u32) -> Result<Self, InvalidRadiusError> {
        u8::try_from(miles)
            .ok()
            .filter(|m| *m <= Self::MAX_MILES)
            .map(Self)
            .ok_or(InvalidRadiusError { miles })
    }

    /// Radius in whole miles.
    #[must_use]
    pub const fn miles(self) -> u8 {
        self.0
    }

    /// Radius in miles as a float, for comparing against distances.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl Default for SearchRadius {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Error returned when a radius falls outside `0..=100` miles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRadiusError {
    /// The rejected radius.
    pub miles: u32,
}

impl std::fmt::Display for InvalidRadiusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid radius {} miles: expected 0-{}",
            self.miles,
            SearchRadius::MAX_MILES
        )
    }
}

impl std::error::Error for InvalidRadiusError {}

/// One user interaction's worth of search input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    /// ZIP code as typed.
    pub zip: String,
    /// Maximum distance from the ZIP centroid.
    pub radius: SearchRadius,
    /// Exact facility-type category to keep, when the type filter is on.
    pub facility_type: Option<String>,
    /// Additional attribute filters; every one present must hold.
    pub filters: BTreeSet<AdditionalFilter>,
}

impl SearchQuery {
    /// Creates a query with no attribute filters.
    #[must_use]
    pub fn new(zip: &str, radius: SearchRadius) -> Self {
        Self {
            zip: zip.to_owned(),
            radius,
            facility_type: None,
            filters: BTreeSet::new(),
        }
    }

    /// Restricts results to one facility type.
    #[must_use]
    pub fn with_facility_type(mut self, facility_type: &str) -> Self {
        self.facility_type = Some(facility_type.to_owned());
        self
    }

    /// Adds an attribute filter.
    #[must_use]
    pub fn with_filter(mut self, filter: AdditionalFilter) -> Self {
        self.filters.insert(filter);
        self
    }

    /// Whether only long-term-care facilities are wanted.
    #[must_use]
    pub fn long_term_care_only(&self) -> bool {
        self.filters.contains(&AdditionalFilter::LongTermCare)
    }

    /// Whether only facilities with birthing services are wanted.
    #[must_use]
    pub fn birthing_only(&self) -> bool {
        self.filters.contains(&AdditionalFilter::Birthing)
    }
}

/// A facility that passed the filters, with its distance from the query
/// point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityMatch {
    /// The facility record.
    #[serde(flatten)]
    pub facility: Facility,
    /// Great-circle distance from the query ZIP centroid, in miles.
    pub distance_miles: f64,
}

/// Aggregate statistics over a filtered facility subset.
///
/// Means are `None` when there is nothing to average; they are never NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSummary {
    /// Number of facilities in the subset.
    pub count: usize,
    /// Mean distance in miles.
    pub mean_distance_miles: Option<f64>,
    /// Number of facilities with inpatient capacity.
    pub with_capacity_count: usize,
    /// Sum of licensed capacity (unreported counts as zero).
    pub total_capacity: u64,
    /// Mean capacity over facilities that report one.
    pub mean_capacity: Option<f64>,
}

/// Sentinel text for an undefined statistic.
pub const NOT_AVAILABLE: &str = "N/A";

impl SearchSummary {
    /// The five labeled statistics shown in the summary panel.
    #[must_use]
    pub fn lines(&self) -> Vec<SummaryLine> {
        vec![
            SummaryLine::new("Facilities found", self.count.to_string()),
            SummaryLine::new(
                "Average distance (miles)",
                format_optional(self.mean_distance_miles),
            ),
            SummaryLine::new(
                "Facilities with inpatient capacity",
                self.with_capacity_count.to_string(),
            ),
            SummaryLine::new("Total capacity", self.total_capacity.to_string()),
            SummaryLine::new("Average capacity", format_optional(self.mean_capacity)),
        ]
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_owned(), |v| format!("{v:.2}"))
}

/// The result of running the pipeline for a valid ZIP.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// The gazetteer entry the search was centered on.
    pub origin: ZipLocation,
    /// The radius that bounded the search.
    pub radius: SearchRadius,
    /// Matching facilities, nearest first.
    pub facilities: Vec<FacilityMatch>,
    /// Statistics over [`Self::facilities`].
    pub summary: SearchSummary,
}

/// Which of the two display states a query lands in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SearchState {
    /// The ZIP is not in the gazetteer; show the region overview.
    NoValidZip,
    /// The ZIP resolved; show the filtered facilities.
    ValidZip,
}

/// Outcome of a single search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The ZIP is not in the gazetteer, so nothing was computed.
    NoValidZip,
    /// The full pipeline ran.
    ValidZip(SearchResult),
}

impl SearchOutcome {
    /// The display state for this outcome.
    #[must_use]
    pub const fn state(&self) -> SearchState {
        match self {
            Self::NoValidZip => SearchState::NoValidZip,
            Self::ValidZip(_) => SearchState::ValidZip,
        }
    }

    /// The computed result, if the ZIP was valid.
    #[must_use]
    pub const fn result(&self) -> Option<&SearchResult> {
        match self {
            Self::NoValidZip => None,
            Self::ValidZip(result) => Some(result),
        }
    }
}

/// A labeled statistic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryLine {
    /// Label (e.g. `"Facilities found"`).
    pub label: String,
    /// Formatted value.
    pub value: String,
}

impl SummaryLine {
    /// Creates a summary line.
    #[must_use]
    pub fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_owned(),
            value,
        }
    }
}

/// What the summary panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SummaryView {
    /// Fixed text shown while no valid ZIP is entered.
    Placeholder {
        /// The placeholder text.
        text: String,
    },
    /// Computed statistics.
    Statistics {
        /// The labeled statistics.
        lines: Vec<SummaryLine>,
    },
}

/// The circle drawn around the query point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiusCircle {
    /// Circle center.
    pub center: Coordinate,
    /// Radius in meters, as map widgets expect.
    pub radius_meters: f64,
}

/// A facility marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    /// Facility identifier.
    pub id: String,
    /// Marker position.
    pub position: Coordinate,
    /// Legend bucket.
    pub capacity_status: CapacityStatus,
    /// Marker color.
    pub color: String,
    /// Popup text (name, address, city, distance).
    pub popup: String,
}

/// A legend entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    /// Legend bucket.
    pub capacity_status: CapacityStatus,
    /// Label shown next to the swatch.
    pub label: String,
    /// Swatch color.
    pub color: String,
}

/// Everything the map widget needs to draw one state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// Map center.
    pub center: Coordinate,
    /// Zoom level.
    pub zoom: u8,
    /// Search radius boundary, absent in the overview.
    pub circle: Option<RadiusCircle>,
    /// Facility markers.
    pub markers: Vec<MapMarker>,
    /// Capacity legend.
    pub legend: Vec<LegendEntry>,
}

/// A complete description of what the UI should display for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    /// Display state.
    pub state: SearchState,
    /// Map description.
    pub map: MapView,
    /// Summary panel contents.
    pub summary: SummaryView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_bounds() {
        assert_eq!(SearchRadius::from_miles(0).unwrap().miles(), 0);
        assert_eq!(SearchRadius::from_miles(100).unwrap().miles(), 100);
        assert_eq!(
            SearchRadius::from_miles(101),
            Err(InvalidRadiusError { miles: 101 })
        );
        assert!(SearchRadius::from_miles(100_000).is_err());
        assert_eq!(SearchRadius::default().miles(), 10);
    }

    #[test]
    fn query_flags_follow_filters() {
        let query = SearchQuery::new("90210", SearchRadius::DEFAULT)
            .with_filter(AdditionalFilter::LongTermCare);
        assert!(query.long_term_care_only());
        assert!(!query.birthing_only());
        assert!(query.facility_type.is_none());
    }

    #[test]
    fn empty_summary_renders_sentinels() {
        let summary = SearchSummary {
            count: 0,
            mean_distance_miles: None,
            with_capacity_count: 0,
            total_capacity: 0,
            mean_capacity: None,
        };
        let lines = summary.lines();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].value, "0");
        assert_eq!(lines[1].value, NOT_AVAILABLE);
        assert_eq!(lines[4].value, NOT_AVAILABLE);
    }

    #[test]
    fn summary_lines_round_means() {
        let summary = SearchSummary {
            count: 3,
            mean_distance_miles: Some(4.257),
            with_capacity_count: 2,
            total_capacity: 120,
            mean_capacity: Some(60.0),
        };
        let lines = summary.lines();
        assert_eq!(lines[1].value, "4.26");
        assert_eq!(lines[3].value, "120");
        assert_eq!(lines[4].value, "60.00");
    }

    #[test]
    fn summary_view_is_tagged() {
        let view = SummaryView::Placeholder {
            text: "hello".to_string(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["kind"], "placeholder");
        assert_eq!(json["text"], "hello");
    }

    #[test]
    fn search_state_names() {
        assert_eq!(SearchState::NoValidZip.to_string(), "noValidZip");
        assert_eq!(
            serde_json::to_value(SearchState::ValidZip).unwrap(),
            "validZip"
        );
    }
}
