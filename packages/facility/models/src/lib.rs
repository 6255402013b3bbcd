#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Healthcare facility and ZIP gazetteer record types.
//!
//! These are the cleaned, in-memory shapes of the two static datasets the
//! facility map is built on. Every value here is immutable once loaded:
//! the catalog crate constructs them at startup and the search pipeline
//! only ever reads them.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A licensed healthcare facility with a known location.
///
/// Rows without both coordinates never become a `Facility`, so
/// `latitude`/`longitude` are always meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    /// Licensing identifier (e.g. `"010000001"`).
    pub id: String,
    /// Facility name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Facility-type category (e.g. `"General Acute Care Hospital"`).
    pub facility_type: String,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Licensed inpatient bed capacity, when the source reports one.
    pub capacity: Option<u32>,
    /// Whether the facility is licensed for long-term care.
    pub long_term_care: bool,
    /// Whether the facility offers birthing services.
    pub birthing: bool,
}

impl Facility {
    /// Licensed capacity, treating an unreported capacity as zero.
    #[must_use]
    pub fn capacity_or_zero(&self) -> u32 {
        self.capacity.unwrap_or(0)
    }

    /// Whether the facility can admit patients for overnight stays.
    #[must_use]
    pub fn has_inpatient_capacity(&self) -> bool {
        self.capacity_or_zero() > 0
    }

    /// Legend bucket this facility is drawn in.
    #[must_use]
    pub fn capacity_status(&self) -> CapacityStatus {
        if self.has_inpatient_capacity() {
            CapacityStatus::WithCapacity
        } else {
            CapacityStatus::WithoutCapacity
        }
    }

    /// Whether the facility has the attribute an [`AdditionalFilter`]
    /// asks for.
    #[must_use]
    pub const fn satisfies(&self, filter: AdditionalFilter) -> bool {
        match filter {
            AdditionalFilter::LongTermCare => self.long_term_care,
            AdditionalFilter::Birthing => self.birthing,
        }
    }
}

/// A ZIP code centroid from the gazetteer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZipLocation {
    /// Five-digit ZIP code.
    pub zip: String,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Two-letter state code (e.g. `"CA"`).
    pub state: String,
}

/// Optional attribute filters a user can toggle on top of the radius.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum AdditionalFilter {
    /// Only facilities licensed for long-term care.
    LongTermCare,
    /// Only facilities with birthing services.
    Birthing,
}

impl AdditionalFilter {
    /// Human-readable label for pickers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LongTermCare => "Long-term care",
            Self::Birthing => "Birthing services",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::LongTermCare, Self::Birthing]
    }
}

/// Legend bucket keyed on whether a facility has inpatient capacity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum CapacityStatus {
    /// Capacity greater than zero.
    WithCapacity,
    /// No reported capacity, or capacity of zero.
    WithoutCapacity,
}

impl CapacityStatus {
    /// Marker and legend color for this bucket.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::WithCapacity => "#2b83ba",
            Self::WithoutCapacity => "#d7191c",
        }
    }

    /// Legend label for this bucket.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::WithCapacity => "Has inpatient capacity",
            Self::WithoutCapacity => "No inpatient capacity",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::WithCapacity, Self::WithoutCapacity]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility(capacity: Option<u32>) -> Facility {
        Facility {
            id: "1".to_string(),
            name: "Test Hospital".to_string(),
            address: "1 Main St".to_string(),
            city: "Fresno".to_string(),
            facility_type: "General Acute Care Hospital".to_string(),
            latitude: 36.74,
            longitude: -119.78,
            capacity,
            long_term_care: false,
            birthing: true,
        }
    }

    #[test]
    fn inpatient_capacity_requires_positive_capacity() {
        assert!(facility(Some(25)).has_inpatient_capacity());
        assert!(!facility(Some(0)).has_inpatient_capacity());
        assert!(!facility(None).has_inpatient_capacity());
    }

    #[test]
    fn capacity_status_follows_capacity() {
        assert_eq!(
            facility(Some(1)).capacity_status(),
            CapacityStatus::WithCapacity
        );
        assert_eq!(
            facility(Some(0)).capacity_status(),
            CapacityStatus::WithoutCapacity
        );
    }

    #[test]
    fn satisfies_checks_matching_flag() {
        let f = facility(None);
        assert!(f.satisfies(AdditionalFilter::Birthing));
        assert!(!f.satisfies(AdditionalFilter::LongTermCare));
    }

    #[test]
    fn additional_filter_parses_camel_case() {
        assert_eq!(
            "longTermCare".parse::<AdditionalFilter>().unwrap(),
            AdditionalFilter::LongTermCare
        );
        assert_eq!(
            "birthing".parse::<AdditionalFilter>().unwrap(),
            AdditionalFilter::Birthing
        );
        assert!("icu".parse::<AdditionalFilter>().is_err());
        assert_eq!(AdditionalFilter::LongTermCare.to_string(), "longTermCare");
    }

    #[test]
    fn capacity_status_colors_are_distinct() {
        assert_ne!(
            CapacityStatus::WithCapacity.color(),
            CapacityStatus::WithoutCapacity.color()
        );
    }
}
