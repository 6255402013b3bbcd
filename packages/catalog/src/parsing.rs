//! Shared field parsing for the static datasets.
//!
//! Column lookup by header name plus the small value parsers both the
//! facility listing and the ZIP gazetteer need.

use crate::CatalogError;
use crate::dataset::ColumnName;

/// Position of the first candidate header present in `headers`.
///
/// Header names are compared trimmed and case-insensitively.
#[must_use]
pub fn find_column(headers: &csv::StringRecord, column: &ColumnName) -> Option<usize> {
    column.candidates().iter().find_map(|name| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name.trim()))
    })
}

/// Resolves the position of a mapped column in a header row.
///
/// # Errors
///
/// Returns [`CatalogError::MissingColumn`] if no candidate matches.
pub fn column_index(
    headers: &csv::StringRecord,
    dataset: &str,
    column: &ColumnName,
) -> Result<usize, CatalogError> {
    find_column(headers, column).ok_or_else(|| CatalogError::MissingColumn {
        dataset: dataset.to_owned(),
        column: column.to_string(),
    })
}

/// Returns the trimmed field at `idx`, or `""` for short rows.
#[must_use]
pub fn field(record: &csv::StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("").trim()
}

/// Parses a latitude/longitude pair. Returns `None` if either value is
/// missing, unparseable, or outside WGS84 bounds.
#[must_use]
pub fn parse_lat_lng(lat: &str, lng: &str) -> Option<(f64, f64)> {
    let latitude = lat.trim().parse::<f64>().ok()?;
    let longitude = lng.trim().parse::<f64>().ok()?;
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return None;
    }
    Some((latitude, longitude))
}

/// Parses a licensed capacity. Accepts integers and whole-valued floats
/// (`"99.0"`); empty, negative, or garbage values yield `None`.
#[must_use]
pub fn parse_capacity(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<u32>() {
        return Some(v);
    }
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() && v >= 0.0 && v <= f64::from(u32::MAX) && v.fract() == 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        return Some(v as u32);
    }
    None
}

/// A presence flag: any non-empty value counts as set.
#[must_use]
pub fn parse_presence_flag(s: &str) -> bool {
    !s.trim().is_empty()
}

/// An affirmative flag: `yes`, `y`, `true` or `1`, case-insensitive.
#[must_use]
pub fn parse_affirmative(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "1"
    )
}

/// Normalizes a ZIP code to five digits.
///
/// Numeric codes shorter than five digits (leading zeros stripped by a
/// spreadsheet export) are left-padded. ZIP+4 values keep their first five
/// digits. Anything else yields `None`.
#[must_use]
pub fn normalize_zip(s: &str) -> Option<String> {
    let s = s.trim();
    let base = s.split_once('-').map_or(s, |(head, _)| head);
    if base.is_empty() || base.len() > 5 || !base.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{base:0>5}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_columns_case_insensitively() {
        let headers = csv::StringRecord::from(vec!["FACID", " Latitude ", "LONGITUDE"]);
        assert_eq!(column_index(&headers, "t", &"latitude".into()).unwrap(), 1);
        assert_eq!(column_index(&headers, "t", &"LONGITUDE".into()).unwrap(), 2);
    }

    #[test]
    fn first_present_candidate_wins() {
        let headers = csv::StringRecord::from(vec!["GEOID", "INTPTLAT", "INTPTLONG   "]);
        let zip = ColumnName::AnyOf(vec!["zip".to_string(), "GEOID".to_string()]);
        let lng = ColumnName::AnyOf(vec!["INTPTLONG".to_string(), "lng".to_string()]);
        assert_eq!(find_column(&headers, &zip), Some(0));
        assert_eq!(find_column(&headers, &lng), Some(2));
        assert_eq!(find_column(&headers, &"state_id".into()), None);
    }

    #[test]
    fn missing_column_names_dataset_and_column() {
        let headers = csv::StringRecord::from(vec!["FACID"]);
        let err = column_index(&headers, "facilities", &"CAPACITY".into()).unwrap_err();
        assert!(err.to_string().contains("facilities"));
        assert!(err.to_string().contains("CAPACITY"));
    }

    #[test]
    fn parses_lat_lng() {
        let (lat, lng) = parse_lat_lng("34.0901", "-118.4065").unwrap();
        assert!((lat - 34.0901).abs() < f64::EPSILON);
        assert!((lng - -118.4065).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_missing_or_out_of_range_lat_lng() {
        assert!(parse_lat_lng("", "-118.4").is_none());
        assert!(parse_lat_lng("34.1", "").is_none());
        assert!(parse_lat_lng("abc", "-118.4").is_none());
        assert!(parse_lat_lng("91.0", "-118.4").is_none());
        assert!(parse_lat_lng("34.1", "-181.0").is_none());
    }

    #[test]
    fn parses_capacity_variants() {
        assert_eq!(parse_capacity("25"), Some(25));
        assert_eq!(parse_capacity("99.0"), Some(99));
        assert_eq!(parse_capacity("0"), Some(0));
        assert_eq!(parse_capacity(""), None);
        assert_eq!(parse_capacity("-3"), None);
        assert_eq!(parse_capacity("12.5"), None);
        assert_eq!(parse_capacity("n/a"), None);
    }

    #[test]
    fn flags() {
        assert!(parse_presence_flag("LTC"));
        assert!(!parse_presence_flag("  "));
        assert!(parse_affirmative("Yes"));
        assert!(parse_affirmative(" Y "));
        assert!(!parse_affirmative("No"));
        assert!(!parse_affirmative(""));
    }

    #[test]
    fn normalizes_zips() {
        assert_eq!(normalize_zip("90210").as_deref(), Some("90210"));
        assert_eq!(normalize_zip("2134").as_deref(), Some("02134"));
        assert_eq!(normalize_zip("94103-1234").as_deref(), Some("94103"));
        assert_eq!(normalize_zip("9021A"), None);
        assert_eq!(normalize_zip("902101"), None);
        assert_eq!(normalize_zip(""), None);
    }
}
