#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Facility search pipeline.
//!
//! Every user interaction runs the same synchronous pass over the immutable
//! [`Catalog`]:
//!
//! 1. resolve the ZIP in the gazetteer (unknown ZIP → [`SearchOutcome::NoValidZip`]),
//! 2. compute great-circle distances to every facility ([`distance`]),
//! 3. apply the radius, then type and attribute filters ([`filter`]),
//! 4. aggregate the survivors ([`summary`]).
//!
//! [`present`] turns the outcome into the map and summary description the
//! UI draws. Nothing is cached between calls.

pub mod distance;
pub mod filter;
pub mod present;
pub mod summary;
pub mod zoom;

use facility_map_catalog::Catalog;
use facility_map_search_models::{
    Coordinate, FacilityMatch, Presentation, SearchOutcome, SearchQuery, SearchResult,
};

/// Runs the search pipeline for one query.
///
/// Returns [`SearchOutcome::NoValidZip`] without touching the facility
/// catalog when the ZIP is not in the gazetteer. Otherwise the result holds
/// the matching facilities, nearest first, and their summary.
#[must_use]
pub fn compute_result(catalog: &Catalog, query: &SearchQuery) -> SearchOutcome {
    let Some(origin) = catalog.lookup_zip(&query.zip) else {
        log::debug!("ZIP '{}' not in gazetteer", query.zip);
        return SearchOutcome::NoValidZip;
    };

    let annotated = filter::annotate(Coordinate::from(origin), catalog.facilities());
    let mut facilities: Vec<FacilityMatch> = filter::apply_filters(annotated, query)
        .into_iter()
        .map(|n| FacilityMatch {
            facility: n.facility.clone(),
            distance_miles: n.distance_miles,
        })
        .collect();
    facilities.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));

    let summary = summary::summarize(&facilities);

    log::debug!(
        "ZIP {} within {} mi: {} of {} facilities",
        origin.zip,
        query.radius.miles(),
        facilities.len(),
        catalog.facilities().len()
    );

    SearchOutcome::ValidZip(SearchResult {
        origin: origin.clone(),
        radius: query.radius,
        facilities,
        summary,
    })
}

/// Runs the pipeline and describes the outcome for the UI in one step.
#[must_use]
pub fn search(catalog: &Catalog, query: &SearchQuery) -> (SearchOutcome, Presentation) {
    let outcome = compute_result(catalog, query);
    let presentation = present::present(&outcome);
    (outcome, presentation)
}
