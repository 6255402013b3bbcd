//! Raw dataset retrieval.
//!
//! Reads a dataset from a URL, a CKAN catalog or a local path and unpacks
//! it when it arrives gzipped or as a zip archive. The result is the plain
//! delimited text handed to the parsers.

use std::io::{Cursor, Read as _};

use crate::dataset::{DataLocation, SourceConfig};
use crate::{CatalogError, ckan};

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Fetches the raw (decompressed) bytes of a dataset.
///
/// # Errors
///
/// Returns [`CatalogError::Fetch`] naming the dataset and its location,
/// wrapping the HTTP, I/O or archive failure.
pub async fn fetch_bytes(config: &SourceConfig) -> Result<Vec<u8>, CatalogError> {
    let location = config.location();
    log::info!("Fetching {} from {location}", config.name);

    fetch_location(&location)
        .await
        .and_then(unpack)
        .map_err(|e| CatalogError::Fetch {
            dataset: config.id.clone(),
            location: location.to_string(),
            source: Box::new(e),
        })
}

async fn fetch_location(location: &DataLocation) -> Result<Vec<u8>, CatalogError> {
    let bytes = match location {
        DataLocation::Url(url) => download(url).await?,
        DataLocation::Path(path) => tokio::fs::read(path).await?,
        DataLocation::Ckan {
            api_url,
            package_id,
            format,
        } => {
            let url = ckan::resolve_resource_url(api_url, package_id, format).await?;
            download(&url).await?
        }
    };

    log::debug!("Read {} bytes from {location}", bytes.len());
    Ok(bytes)
}

async fn download(url: &str) -> Result<Vec<u8>, CatalogError> {
    let response = reqwest::get(url).await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

/// Decompresses gzip payloads and extracts the first table from zip
/// archives. Anything else is returned unchanged.
fn unpack(bytes: Vec<u8>) -> Result<Vec<u8>, CatalogError> {
    let unpacked = if bytes.starts_with(GZIP_MAGIC) {
        gunzip(&bytes)?
    } else if bytes.starts_with(ZIP_MAGIC) {
        extract_table(&bytes)?
    } else {
        return Ok(bytes);
    };

    log::debug!("Unpacked to {} bytes", unpacked.len());
    Ok(unpacked)
}

fn gunzip(bytes: &[u8]) -> Result<Vec<u8>, CatalogError> {
    let mut decoder = flate2::read::GzDecoder::new(bytes);
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed)?;
    Ok(decompressed)
}

/// Reads the first `.csv` or `.txt` entry of a zip archive.
fn extract_table(bytes: &[u8]) -> Result<Vec<u8>, CatalogError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let name = entry.name().to_ascii_lowercase();
        if !(name.ends_with(".csv") || name.ends_with(".txt")) {
            continue;
        }

        log::debug!("Extracting {} from archive", entry.name());
        let mut table = Vec::new();
        entry.read_to_end(&mut table)?;
        return Ok(table);
    }

    Err(CatalogError::ResourceNotFound {
        message: "archive contains no .csv or .txt table".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn config(source: &str) -> SourceConfig {
        SourceConfig {
            id: "test".to_string(),
            name: "Test dataset".to_string(),
            source: source.to_string(),
            source_env: None,
            ckan: None,
            delimiter: None,
        }
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("facility_map_fetch_{}_{name}", std::process::id()))
    }

    #[tokio::test]
    async fn reads_plain_file() {
        let path = temp_path("plain.csv");
        std::fs::write(&path, "zip,lat\n90210,34.1\n").unwrap();

        let bytes = fetch_bytes(&config(path.to_str().unwrap()))
            .await
            .unwrap();
        assert_eq!(bytes, b"zip,lat\n90210,34.1\n");

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn reads_gzipped_file() {
        let path = temp_path("gz.csv.gz");
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(b"zip,lat\n94103,37.7\n").unwrap();
        std::fs::write(&path, encoder.finish().unwrap()).unwrap();

        let bytes = fetch_bytes(&config(path.to_str().unwrap()))
            .await
            .unwrap();
        assert_eq!(bytes, b"zip,lat\n94103,37.7\n");

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn extracts_table_from_zip_archive() {
        let path = temp_path("gazetteer.zip");
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        writer.start_file("README.pdf", options).unwrap();
        writer.write_all(b"not a table").unwrap();
        writer.start_file("2020_Gaz_zcta_national.txt", options).unwrap();
        writer.write_all(b"GEOID\tINTPTLAT\n90210\t34.1\n").unwrap();
        std::fs::write(&path, writer.finish().unwrap().into_inner()).unwrap();

        let bytes = fetch_bytes(&config(path.to_str().unwrap()))
            .await
            .unwrap();
        assert_eq!(bytes, b"GEOID\tINTPTLAT\n90210\t34.1\n");

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn missing_file_names_dataset_and_location() {
        let path = temp_path("does-not-exist.csv");
        let err = fetch_bytes(&config(path.to_str().unwrap()))
            .await
            .unwrap_err();

        let CatalogError::Fetch {
            dataset,
            location,
            source,
        } = &err
        else {
            panic!("expected a fetch error, got {err:?}");
        };
        assert_eq!(dataset, "test");
        assert_eq!(location, &path.display().to_string());
        assert!(matches!(**source, CatalogError::Io(_)));

        let message = err.to_string();
        assert!(message.contains("'test'"));
        assert!(message.contains("does-not-exist.csv"));
    }
}
