#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static facility catalog and ZIP gazetteer.
//!
//! Both datasets are fetched once at startup (from a URL, a CKAN catalog
//! or a local path, see [`dataset`]), cleaned, and frozen into a
//! [`Catalog`]. Nothing here is ever mutated after [`Catalog::load`]
//! returns; callers share the catalog behind an `Arc` for the life of the
//! process.

pub mod ckan;
pub mod dataset;
pub mod facilities;
pub mod fetch;
pub mod gazetteer;
pub mod parsing;

use std::collections::BTreeSet;

use facility_map_facility_models::{Facility, ZipLocation};

pub use gazetteer::ZipGazetteer;

/// Errors that can occur while loading the static datasets.
///
/// Any of these at startup means a dataset is unavailable, which is fatal:
/// the application cannot do anything without both catalogs.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An embedded dataset definition could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A dataset definition is unusable.
    #[error("Invalid dataset definition: {message}")]
    Definition {
        /// Description of what went wrong.
        message: String,
    },

    /// A downloaded archive could not be read.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The payload did not contain the expected resource.
    #[error("Resource not found: {message}")]
    ResourceNotFound {
        /// Description of what was looked for.
        message: String,
    },

    /// Fetching a dataset failed.
    #[error("Failed to fetch dataset '{dataset}' from {location}: {source}")]
    Fetch {
        /// Dataset identifier.
        dataset: String,
        /// Where the dataset was fetched from.
        location: String,
        /// The underlying failure.
        source: Box<Self>,
    },

    /// A mapped column is not present in the dataset's header row.
    #[error("Dataset '{dataset}' has no column '{column}'")]
    MissingColumn {
        /// Dataset identifier.
        dataset: String,
        /// Expected header name.
        column: String,
    },
}

/// The immutable facility catalog and ZIP gazetteer.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    facilities: Vec<Facility>,
    gazetteer: ZipGazetteer,
    facility_types: Vec<String>,
}

impl Catalog {
    /// Builds a catalog from already-cleaned records.
    #[must_use]
    pub fn new(facilities: Vec<Facility>, gazetteer: ZipGazetteer) -> Self {
        let facility_types = facilities
            .iter()
            .map(|f| f.facility_type.as_str())
            .filter(|t| !t.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect();

        Self {
            facilities,
            gazetteer,
            facility_types,
        }
    }

    /// Fetches and parses both datasets using the embedded definitions
    /// (and any environment overrides of their sources).
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if either dataset cannot be fetched or
    /// parsed.
    pub async fn load() -> Result<Self, CatalogError> {
        let facility_def = dataset::facility_dataset()?;
        let gazetteer_def = dataset::gazetteer_dataset()?;

        let facility_bytes = fetch::fetch_bytes(&facility_def.source).await?;
        let facilities = facilities::parse_facilities(&facility_bytes, &facility_def)?;

        let gazetteer_bytes = fetch::fetch_bytes(&gazetteer_def.source).await?;
        let gazetteer = gazetteer::parse_gazetteer(&gazetteer_bytes, &gazetteer_def)?;

        let catalog = Self::new(facilities, gazetteer);

        log::info!(
            "Catalog ready: {} facilities across {} types, {} ZIP codes",
            catalog.facilities.len(),
            catalog.facility_types.len(),
            catalog.gazetteer.len()
        );

        Ok(catalog)
    }

    /// All facilities with known coordinates.
    #[must_use]
    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    /// Distinct facility-type categories, sorted.
    #[must_use]
    pub fn facility_types(&self) -> &[String] {
        &self.facility_types
    }

    /// Looks up a ZIP code in the gazetteer.
    #[must_use]
    pub fn lookup_zip(&self, zip: &str) -> Option<&ZipLocation> {
        self.gazetteer.lookup(zip)
    }

    /// The underlying gazetteer.
    #[must_use]
    pub const fn gazetteer(&self) -> &ZipGazetteer {
        &self.gazetteer
    }
}
