//! CSV row schema
//!
//! The source file is parsed straight into `RawRow`, so nothing untyped
//! leaves this module. Coordinates that do not parse as numbers are read
//! as missing, which later drops the row.

use crate::constants::columns;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::Deserialize;
use tracing::warn;

/// One row of the toilet CSV, as found in the file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRow {
    #[serde(rename = "LATITUDE", default, deserialize_with = "csv::invalid_option")]
    pub latitude: Option<f64>,

    #[serde(rename = "LONGITUDE", default, deserialize_with = "csv::invalid_option")]
    pub longitude: Option<f64>,

    #[serde(rename = "STRASSE", default)]
    pub street: Option<String>,

    #[serde(rename = "HsNr", default)]
    pub house_number: Option<String>,

    #[serde(rename = "PLZ", default)]
    pub postal_code: Option<String>,

    #[serde(rename = "ORT", default)]
    pub city: Option<String>,

    #[serde(rename = "ANMERKUNG", default)]
    pub note: Option<String>,

    #[serde(rename = "한국어", default)]
    pub note_ko: Option<String>,
}

impl RawRow {
    /// Both coordinates, if the row has them
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(Coordinates::new(lat, lng))
            }
            _ => None,
        }
    }
}

/// Parse CSV bytes (with a header row) into rows
///
/// Rows may be ragged: columns missing at the end of a row read as `None`
/// and fields past the last header are ignored. Fails with `DataParse` when
/// the content is not UTF-8.
pub fn parse_rows(data: &[u8]) -> Result<Vec<RawRow>> {
    let data = data.strip_prefix(b"\xef\xbb\xbf").unwrap_or(data);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| Error::DataParse(format!("Invalid header row: {}", e)))?;
    for column in [columns::LATITUDE, columns::LONGITUDE] {
        if !headers.iter().any(|h| h == column) {
            warn!("Dataset has no {} column, every row will be skipped", column);
        }
    }

    reader
        .deserialize()
        .enumerate()
        .map(|(line, row)| {
            row.map_err(|e| Error::DataParse(format!("Row {}: {}", line + 1, e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "LATITUDE,LONGITUDE,STRASSE,HsNr,PLZ,ORT,ANMERKUNG,한국어";

    #[test]
    fn test_parse_full_row() {
        let csv = format!(
            "{}\n51.2254,6.7722,Burgplatz,1,40213,Düsseldorf,barrierefrei,휠체어 접근 가능\n",
            HEADER
        );
        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.latitude, Some(51.2254));
        assert_eq!(row.longitude, Some(6.7722));
        assert_eq!(row.street.as_deref(), Some("Burgplatz"));
        assert_eq!(row.house_number.as_deref(), Some("1"));
        assert_eq!(row.postal_code.as_deref(), Some("40213"));
        assert_eq!(row.city.as_deref(), Some("Düsseldorf"));
        assert_eq!(row.note.as_deref(), Some("barrierefrei"));
        assert_eq!(row.note_ko.as_deref(), Some("휠체어 접근 가능"));
        assert_eq!(row.coordinates(), Some(Coordinates::new(51.2254, 6.7722)));
    }

    #[test]
    fn test_empty_fields_are_missing() {
        let csv = format!("{}\n51.2254,,Burgplatz,,,,,\n", HEADER);
        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].longitude, None);
        assert_eq!(rows[0].house_number, None);
        assert!(rows[0].coordinates().is_none());
    }

    #[test]
    fn test_non_numeric_coordinates_are_missing() {
        let csv = format!("{}\n\"51,2254\",6.77,Burgplatz,1,40213,Düsseldorf,,\n", HEADER);
        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].latitude, None);
        assert!(rows[0].coordinates().is_none());
    }

    #[test]
    fn test_missing_optional_columns() {
        let csv = "LATITUDE,LONGITUDE,STRASSE\n51.2,6.7,Burgplatz\n";
        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].street.as_deref(), Some("Burgplatz"));
        assert_eq!(rows[0].city, None);
        assert_eq!(rows[0].note_ko, None);
    }

    #[test]
    fn test_whitespace_and_bom() {
        let csv = "\u{feff}LATITUDE,LONGITUDE,ORT\n 51.2 , 6.7 , Düsseldorf \n";
        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].latitude, Some(51.2));
        assert_eq!(rows[0].city.as_deref(), Some("Düsseldorf"));
    }

    #[test]
    fn test_ragged_rows_are_read_per_row() {
        let csv = "LATITUDE,LONGITUDE,STRASSE,ORT\n\
            51.1,6.1,A,X\n\
            51.2,6.2,B,Y,\n\
            51.3,6.3,C\n\
            51.4\n";
        let rows = parse_rows(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1].city.as_deref(), Some("Y"));
        assert_eq!(rows[2].street.as_deref(), Some("C"));
        assert_eq!(rows[2].city, None);
        assert!(rows[2].coordinates().is_some());
        assert_eq!(rows[3].latitude, Some(51.4));
        assert!(rows[3].coordinates().is_none());
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let mut csv = b"LATITUDE,LONGITUDE,STRASSE\n51.2,6.7,".to_vec();
        csv.extend_from_slice(b"K\xf6nigsallee\n");

        let err = parse_rows(&csv).unwrap_err();
        assert!(matches!(err, Error::DataParse(_)));
    }

    #[test]
    fn test_header_only() {
        let rows = parse_rows(HEADER.as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_nan_is_not_a_coordinate() {
        let row = RawRow {
            latitude: Some(f64::NAN),
            longitude: Some(6.7),
            ..RawRow::default()
        };
        assert!(row.coordinates().is_none());
    }
}
