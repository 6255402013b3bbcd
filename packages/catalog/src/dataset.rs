//! Compile-time dataset definitions.
//!
//! Each static dataset is described by a TOML file under `datasets/`: where
//! to fetch it from, how it is encoded, and which header names carry the
//! fields the catalog needs. The definitions are embedded at compile time;
//! the source location can be overridden at runtime through the
//! environment variable named by `source_env`.

use serde::Deserialize;

use crate::CatalogError;

const FACILITIES_TOML: &str = include_str!("../datasets/facilities.toml");
const ZIP_GAZETTEER_TOML: &str = include_str!("../datasets/zip_gazetteer.toml");

/// Where and how a dataset is fetched.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Unique identifier (e.g., `"facilities"`).
    pub id: String,
    /// Human-readable name used in log output.
    pub name: String,
    /// Default location: an `http(s)://` URL or a filesystem path. With a
    /// [`Self::ckan`] block this is the portal's `package_show` endpoint.
    pub source: String,
    /// Environment variable that overrides [`Self::source`] when set.
    pub source_env: Option<String>,
    /// Resolve the download through a CKAN catalog instead of fetching
    /// [`Self::source`] directly.
    pub ckan: Option<CkanResource>,
    /// Field delimiter. Detected from the header line when unset.
    pub delimiter: Option<char>,
}

/// A resource published in a CKAN package.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CkanResource {
    /// Package (dataset) name or id.
    pub package_id: String,
    /// Resource format to pick, e.g. `"CSV"`.
    pub format: String,
}

impl SourceConfig {
    /// Resolves the effective location, preferring the environment
    /// override when it is set and non-empty.
    #[must_use]
    pub fn location(&self) -> DataLocation {
        if let Some(raw) = self
            .source_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|v| !v.trim().is_empty())
        {
            return DataLocation::parse(&raw);
        }

        match &self.ckan {
            Some(ckan) => DataLocation::Ckan {
                api_url: self.source.trim().to_owned(),
                package_id: ckan.package_id.clone(),
                format: ckan.format.clone(),
            },
            None => DataLocation::parse(&self.source),
        }
    }

    /// Delimiter as the single byte the CSV reader expects. Without a
    /// configured delimiter, a header line with more tabs than commas
    /// selects `\t` and anything else `,`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Definition`] if the configured delimiter is
    /// not ASCII.
    pub fn delimiter_for(&self, bytes: &[u8]) -> Result<u8, CatalogError> {
        let Some(delimiter) = self.delimiter else {
            return Ok(detect_delimiter(bytes));
        };

        u8::try_from(delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| CatalogError::Definition {
                message: format!(
                    "dataset '{}' has non-ASCII delimiter {delimiter:?}",
                    self.id
                ),
            })
    }
}

fn detect_delimiter(bytes: &[u8]) -> u8 {
    let header = bytes.split(|&b| b == b'\n').next().unwrap_or_default();
    let tabs = header.iter().filter(|&&b| b == b'\t').count();
    let commas = header.iter().filter(|&&b| b == b',').count();
    if tabs > commas { b'\t' } else { b',' }
}

/// A resolved dataset location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLocation {
    /// Fetched over HTTP(S).
    Url(String),
    /// Read from the local filesystem.
    Path(std::path::PathBuf),
    /// Looked up in a CKAN catalog, then fetched over HTTP(S).
    Ckan {
        /// `package_show` endpoint.
        api_url: String,
        /// Package name or id.
        package_id: String,
        /// Resource format to pick.
        format: String,
    },
}

impl DataLocation {
    /// Classifies a raw location string. Anything that is not an
    /// `http://` or `https://` URL is treated as a path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_owned())
        } else {
            Self::Path(raw.into())
        }
    }
}

impl std::fmt::Display for DataLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Ckan {
                api_url,
                package_id,
                format,
            } => write!(f, "{api_url}?id={package_id} ({format})"),
        }
    }
}

/// Accepted header name(s) for one field. The first candidate present in
/// the header row is used.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ColumnName {
    /// A single header name.
    One(String),
    /// Alternative header names, in order of preference.
    AnyOf(Vec<String>),
}

impl ColumnName {
    /// Candidate header names in order of preference.
    #[must_use]
    pub fn candidates(&self) -> &[String] {
        match self {
            Self::One(name) => std::slice::from_ref(name),
            Self::AnyOf(names) => names,
        }
    }
}

impl From<&str> for ColumnName {
    fn from(name: &str) -> Self {
        Self::One(name.to_owned())
    }
}

impl std::fmt::Display for ColumnName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.candidates().join(" | "))
    }
}

/// Header names for the facility listing.
#[derive(Debug, Clone, Deserialize)]
pub struct FacilityColumns {
    /// Licensing identifier column.
    pub id: ColumnName,
    /// Facility name column.
    pub name: ColumnName,
    /// Street address column.
    pub address: ColumnName,
    /// City column.
    pub city: ColumnName,
    /// Facility-type category column.
    pub facility_type: ColumnName,
    /// Latitude column.
    pub latitude: ColumnName,
    /// Longitude column.
    pub longitude: ColumnName,
    /// Licensed capacity column.
    pub capacity: ColumnName,
    /// Long-term-care flag column (non-empty means licensed).
    pub long_term_care: ColumnName,
    /// Birthing-services flag column (`Yes`/`No`).
    pub birthing: ColumnName,
}

/// Definition of the facility listing dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct FacilityDataset {
    /// Fetch configuration.
    #[serde(flatten)]
    pub source: SourceConfig,
    /// Column mapping.
    pub columns: FacilityColumns,
}

/// Header names for the ZIP gazetteer.
#[derive(Debug, Clone, Deserialize)]
pub struct GazetteerColumns {
    /// ZIP code column.
    pub zip: ColumnName,
    /// Latitude column.
    pub latitude: ColumnName,
    /// Longitude column.
    pub longitude: ColumnName,
    /// Two-letter state code column. Optional in the file: tables without
    /// it are restricted by [`Region::zip_range`] instead.
    pub state: Option<ColumnName>,
}

/// The part of the gazetteer that is kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Region {
    /// Two-letter state code (e.g. `"CA"`).
    pub state: String,
    /// Inclusive range of the state's five-digit ZIP codes, used when the
    /// table has no state column.
    pub zip_range: Option<(String, String)>,
}

impl Region {
    /// Whether a normalized ZIP falls inside [`Self::zip_range`]. Without a
    /// range every ZIP matches.
    #[must_use]
    pub fn contains_zip(&self, zip: &str) -> bool {
        self.zip_range
            .as_ref()
            .is_none_or(|(low, high)| (low.as_str()..=high.as_str()).contains(&zip))
    }
}

/// Definition of the ZIP gazetteer dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct GazetteerDataset {
    /// Fetch configuration.
    #[serde(flatten)]
    pub source: SourceConfig,
    /// Rows outside this region are dropped.
    pub region: Region,
    /// Column mapping.
    pub columns: GazetteerColumns,
}

/// Returns the embedded facility listing definition.
///
/// # Errors
///
/// Returns [`CatalogError::Toml`] if the embedded TOML is malformed.
pub fn facility_dataset() -> Result<FacilityDataset, CatalogError> {
    Ok(toml::de::from_str(FACILITIES_TOML)?)
}

/// Returns the embedded ZIP gazetteer definition.
///
/// # Errors
///
/// Returns [`CatalogError::Toml`] if the embedded TOML is malformed.
pub fn gazetteer_dataset() -> Result<GazetteerDataset, CatalogError> {
    Ok(toml::de::from_str(ZIP_GAZETTEER_TOML)?)
}
