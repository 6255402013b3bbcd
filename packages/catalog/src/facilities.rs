//! Facility listing parser.
//!
//! Turns the raw facility CSV into cleaned [`Facility`] records. Rows
//! without a usable latitude/longitude pair are dropped; every other field
//! is taken as-is after trimming.

use facility_map_facility_models::Facility;

use crate::CatalogError;
use crate::dataset::FacilityDataset;
use crate::parsing::{
    column_index, field, parse_affirmative, parse_capacity, parse_lat_lng, parse_presence_flag,
};

/// Column positions resolved from the header row.
struct FacilityLayout {
    id: usize,
    name: usize,
    address: usize,
    city: usize,
    facility_type: usize,
    latitude: usize,
    longitude: usize,
    capacity: usize,
    long_term_care: usize,
    birthing: usize,
}

impl FacilityLayout {
    fn resolve(headers: &csv::StringRecord, def: &FacilityDataset) -> Result<Self, CatalogError> {
        let dataset = def.source.id.as_str();
        let cols = &def.columns;
        Ok(Self {
            id: column_index(headers, dataset, &cols.id)?,
            name: column_index(headers, dataset, &cols.name)?,
            address: column_index(headers, dataset, &cols.address)?,
            city: column_index(headers, dataset, &cols.city)?,
            facility_type: column_index(headers, dataset, &cols.facility_type)?,
            latitude: column_index(headers, dataset, &cols.latitude)?,
            longitude: column_index(headers, dataset, &cols.longitude)?,
            capacity: column_index(headers, dataset, &cols.capacity)?,
            long_term_care: column_index(headers, dataset, &cols.long_term_care)?,
            birthing: column_index(headers, dataset, &cols.birthing)?,
        })
    }
}

/// Parses the facility listing.
///
/// # Errors
///
/// Returns [`CatalogError::MissingColumn`] if a mapped column is absent
/// from the header row, or [`CatalogError::Csv`] if the file is not valid
/// delimited text.
pub fn parse_facilities(
    bytes: &[u8],
    def: &FacilityDataset,
) -> Result<Vec<Facility>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(def.source.delimiter_for(bytes)?)
        .flexible(true)
        .from_reader(bytes);

    let layout = FacilityLayout::resolve(reader.headers()?, def)?;

    let mut facilities = Vec::new();
    let mut dropped = 0_usize;

    for result in reader.records() {
        let record = result?;

        let Some((latitude, longitude)) = parse_lat_lng(
            field(&record, layout.latitude),
            field(&record, layout.longitude),
        ) else {
            log::debug!(
                "Dropping facility {} ({}): missing coordinates",
                field(&record, layout.id),
                field(&record, layout.name)
            );
            dropped += 1;
            continue;
        };

        facilities.push(Facility {
            id: field(&record, layout.id).to_owned(),
            name: field(&record, layout.name).to_owned(),
            address: field(&record, layout.address).to_owned(),
            city: field(&record, layout.city).to_owned(),
            facility_type: field(&record, layout.facility_type).to_owned(),
            latitude,
            longitude,
            capacity: parse_capacity(field(&record, layout.capacity)),
            long_term_care: parse_presence_flag(field(&record, layout.long_term_care)),
            birthing: parse_affirmative(field(&record, layout.birthing)),
        });
    }

    log::info!(
        "Parsed {} facilities from {} ({dropped} dropped without coordinates)",
        facilities.len(),
        def.source.name
    );

    Ok(facilities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::facility_dataset;

    const SAMPLE: &str = "\
FACID,FACNAME,FAC_FDR,LTC,CAPACITY,ADDRESS,CITY,BIRTHING_FACILITY_FLAG,LATITUDE,LONGITUDE
100,Cedars Medical Center,General Acute Care Hospital,,886,8700 Beverly Blvd,Los Angeles,Yes,34.0754,-118.3806
200,Sunset Skilled Nursing,Skilled Nursing Facility,LTC,99.0,1 Sunset Way,Los Angeles,No,34.0980,-118.3300
300,Nowhere Clinic,Primary Care Clinic,,,5 Lost Rd,Fresno,,,
400,Hills Surgery Center,Surgical Clinic,,0,9 Hill St,Beverly Hills,, 34.0700 , -118.4000
";

    #[test]
    fn parses_and_drops_rows_without_coordinates() {
        let def = facility_dataset().unwrap();
        let facilities = parse_facilities(SAMPLE.as_bytes(), &def).unwrap();

        assert_eq!(facilities.len(), 3);
        assert!(facilities.iter().all(|f| f.id != "300"));
    }

    #[test]
    fn maps_fields() {
        let def = facility_dataset().unwrap();
        let facilities = parse_facilities(SAMPLE.as_bytes(), &def).unwrap();

        let cedars = &facilities[0];
        assert_eq!(cedars.name, "Cedars Medical Center");
        assert_eq!(cedars.facility_type, "General Acute Care Hospital");
        assert_eq!(cedars.capacity, Some(886));
        assert!(cedars.birthing);
        assert!(!cedars.long_term_care);

        let sunset = &facilities[1];
        assert_eq!(sunset.capacity, Some(99));
        assert!(sunset.long_term_care);
        assert!(!sunset.birthing);

        let hills = &facilities[2];
        assert_eq!(hills.capacity, Some(0));
        assert!(!hills.has_inpatient_capacity());
        assert!((hills.latitude - 34.07).abs() < 1e-9);
    }

    #[test]
    fn missing_mapped_column_is_an_error() {
        let def = facility_dataset().unwrap();
        let csv = "FACID,FACNAME\n1,Only Name\n";
        let err = parse_facilities(csv.as_bytes(), &def).unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn { .. }));
    }
}
