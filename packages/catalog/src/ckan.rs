//! CKAN catalog lookup.
//!
//! Open-data portals built on CKAN publish each dataset as a package whose
//! resources carry the actual download URLs. `package_show` is asked for
//! the package and the first resource of the wanted format is downloaded.

use serde::Deserialize;

use crate::CatalogError;

/// Response envelope of `package_show`.
#[derive(Debug, Deserialize)]
pub struct PackageShow {
    /// Whether the API call succeeded.
    pub success: bool,
    /// The package, present on success.
    pub result: Option<Package>,
}

/// A CKAN package.
#[derive(Debug, Deserialize)]
pub struct Package {
    /// Published resources.
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// A downloadable resource of a package.
#[derive(Debug, Deserialize)]
pub struct Resource {
    /// Download URL.
    pub url: String,
    /// Declared format (e.g. `"CSV"`).
    #[serde(default)]
    pub format: String,
}

/// Looks up the download URL of the first `format` resource in a package.
///
/// # Errors
///
/// Returns [`CatalogError::Http`] if the API call fails, or
/// [`CatalogError::ResourceNotFound`] if the package has no such resource.
pub async fn resolve_resource_url(
    api_url: &str,
    package_id: &str,
    format: &str,
) -> Result<String, CatalogError> {
    log::info!("Resolving {format} resource of CKAN package '{package_id}'");

    let body: PackageShow = reqwest::Client::new()
        .get(api_url)
        .query(&[("id", package_id)])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let url = select_resource(&body, package_id, format)?;
    log::debug!("Resolved '{package_id}' to {url}");
    Ok(url)
}

/// Picks the first resource of `format` (case-insensitive) with an
/// HTTP(S) URL.
///
/// # Errors
///
/// Returns [`CatalogError::ResourceNotFound`] if the call was unsuccessful
/// or no resource matches.
pub fn select_resource(
    body: &PackageShow,
    package_id: &str,
    format: &str,
) -> Result<String, CatalogError> {
    let not_found = || CatalogError::ResourceNotFound {
        message: format!("no {format} resource in CKAN package '{package_id}'"),
    };

    if !body.success {
        return Err(not_found());
    }

    body.result
        .iter()
        .flat_map(|package| &package.resources)
        .find(|r| {
            r.format.trim().eq_ignore_ascii_case(format)
                && (r.url.starts_with("https://") || r.url.starts_with("http://"))
        })
        .map(|r| r.url.clone())
        .ok_or_else(not_found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(json: serde_json::Value) -> PackageShow {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn picks_first_matching_format() {
        let body = package(serde_json::json!({
            "success": true,
            "result": {
                "resources": [
                    { "url": "https://example.org/dictionary.pdf", "format": "PDF" },
                    { "url": "https://example.org/facilities.csv", "format": "csv" },
                    { "url": "https://example.org/facilities-old.csv", "format": "CSV" },
                ]
            }
        }));

        assert_eq!(
            select_resource(&body, "facilities", "CSV").unwrap(),
            "https://example.org/facilities.csv"
        );
    }

    #[test]
    fn missing_format_is_resource_not_found() {
        let body = package(serde_json::json!({
            "success": true,
            "result": { "resources": [{ "url": "https://example.org/a.xlsx", "format": "XLSX" }] }
        }));

        let err = select_resource(&body, "facilities", "CSV").unwrap_err();
        assert!(matches!(err, CatalogError::ResourceNotFound { .. }));
        assert!(err.to_string().contains("facilities"));
    }

    #[test]
    fn unsuccessful_call_is_resource_not_found() {
        let body = package(serde_json::json!({ "success": false }));
        assert!(select_resource(&body, "facilities", "CSV").is_err());
    }
}
