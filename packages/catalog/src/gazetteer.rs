//! ZIP code gazetteer.
//!
//! Maps five-digit ZIP codes to their centroid, restricted to a single
//! region (state). Lookups are exact on the normalized code.

use std::collections::BTreeMap;

use facility_map_facility_models::ZipLocation;

use crate::CatalogError;
use crate::dataset::GazetteerDataset;
use crate::parsing::{column_index, field, find_column, normalize_zip, parse_lat_lng};

/// Read-only ZIP → location index for one region.
#[derive(Debug, Clone, Default)]
pub struct ZipGazetteer {
    by_zip: BTreeMap<String, ZipLocation>,
}

impl ZipGazetteer {
    /// Builds a gazetteer from already-cleaned locations. The first entry
    /// for a duplicated ZIP wins.
    #[must_use]
    pub fn from_locations(locations: impl IntoIterator<Item = ZipLocation>) -> Self {
        let mut by_zip = BTreeMap::new();
        for location in locations {
            by_zip.entry(location.zip.clone()).or_insert(location);
        }
        Self { by_zip }
    }

    /// Looks up a ZIP code as typed by a user.
    ///
    /// Surrounding whitespace is ignored, but the code must otherwise be
    /// exactly five digits: partial input never matches.
    #[must_use]
    pub fn lookup(&self, zip: &str) -> Option<&ZipLocation> {
        let zip = zip.trim();
        if zip.len() != 5 || !zip.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.by_zip.get(zip)
    }

    /// Number of ZIP codes in the gazetteer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_zip.len()
    }

    /// Whether the gazetteer has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_zip.is_empty()
    }
}

/// Parses the gazetteer table, keeping only rows in the definition's
/// region.
///
/// Rows are matched on the state column when the table has one, otherwise
/// on the region's ZIP range.
///
/// # Errors
///
/// Returns [`CatalogError::MissingColumn`] if a mapped column is absent,
/// or [`CatalogError::Csv`] if the file is not valid delimited text.
pub fn parse_gazetteer(
    bytes: &[u8],
    def: &GazetteerDataset,
) -> Result<ZipGazetteer, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(def.source.delimiter_for(bytes)?)
        .flexible(true)
        .from_reader(bytes);

    let dataset = def.source.id.as_str();
    let headers = reader.headers()?.clone();
    let zip_idx = column_index(&headers, dataset, &def.columns.zip)?;
    let lat_idx = column_index(&headers, dataset, &def.columns.latitude)?;
    let lng_idx = column_index(&headers, dataset, &def.columns.longitude)?;
    let state_idx = def
        .columns
        .state
        .as_ref()
        .and_then(|column| find_column(&headers, column));

    if state_idx.is_none() {
        log::debug!(
            "{} has no state column, restricting to ZIP range {:?}",
            def.source.name,
            def.region.zip_range
        );
    }

    let region = &def.region;
    let mut locations = Vec::new();
    let mut dropped = 0_usize;

    for result in reader.records() {
        let record = result?;

        if state_idx.is_some_and(|idx| !field(&record, idx).eq_ignore_ascii_case(&region.state)) {
            continue;
        }

        let zip = normalize_zip(field(&record, zip_idx));
        if state_idx.is_none() && !zip.as_deref().is_some_and(|z| region.contains_zip(z)) {
            continue;
        }

        let coords = parse_lat_lng(field(&record, lat_idx), field(&record, lng_idx));
        let (Some(zip), Some((latitude, longitude))) = (zip, coords) else {
            log::debug!(
                "Dropping gazetteer row '{}': invalid ZIP or coordinates",
                field(&record, zip_idx)
            );
            dropped += 1;
            continue;
        };

        locations.push(ZipLocation {
            zip,
            latitude,
            longitude,
            state: region.state.to_ascii_uppercase(),
        });
    }

    let gazetteer = ZipGazetteer::from_locations(locations);

    log::info!(
        "Loaded {} {} ZIP codes from {} ({dropped} dropped)",
        gazetteer.len(),
        region.state,
        def.source.name
    );

    Ok(gazetteer)
}
