//! Dataset loader
//!
//! Fetch → parse → drop rows without coordinates → number the rest →
//! optionally annotate with distance and sort nearest first.

use crate::coord::distance::haversine_distance;
use crate::coord::Coordinates;
use crate::dataset::row::{parse_rows, RawRow};
use crate::dataset::source::Source;
use crate::dataset::{Proximity, Snapshot, ToiletRecord};
use crate::error::Result;
use crate::locale::Locale;
use tracing::{debug, info};

/// Loads toilet snapshots from a source
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    source: Source,
    locale: Locale,
}

impl DatasetLoader {
    pub fn new(source: Source, locale: Locale) -> Self {
        Self { source, locale }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Load a fresh snapshot
    ///
    /// With a reference point, records carry distance and walking time and
    /// come back nearest first. Without one, they keep file order.
    ///
    /// # Errors
    /// * `DataFetch` when the source cannot be read
    /// * `DataParse` when the content is not UTF-8 CSV
    pub async fn load(&self, reference: Option<Coordinates>) -> Result<Snapshot> {
        let data = self.source.fetch().await?;
        let rows = parse_rows(&data)?;
        let total_rows = rows.len();

        let locale = self.locale();
        let records = build_records(rows, reference, locale);

        info!(
            "Loaded {} toilets from {} ({} rows without coordinates skipped, locale {})",
            records.len(),
            self.source,
            total_rows - records.len(),
            locale
        );

        Ok(Snapshot::new(records, reference, locale))
    }
}

/// Turn parsed rows into records
///
/// Ids are assigned after rows without coordinates are dropped, so they are
/// dense (0, 1, 2, ...) and follow file order. Sorting by distance is
/// stable: equal distances keep id order.
pub fn build_records(
    rows: Vec<RawRow>,
    reference: Option<Coordinates>,
    locale: Locale,
) -> Vec<ToiletRecord> {
    let mut records: Vec<ToiletRecord> = rows
        .into_iter()
        .filter_map(|row| {
            let coords = row.coordinates()?;
            Some((coords, row))
        })
        .enumerate()
        .map(|(index, (coords, row))| ToiletRecord {
            id: index.to_string(),
            latitude: coords.lat,
            longitude: coords.lng,
            street: row.street.unwrap_or_default(),
            house_number: row.house_number.unwrap_or_default(),
            postal_code: row.postal_code.unwrap_or_default(),
            city: row.city.unwrap_or_default(),
            note: row.note.filter(|n| !n.is_empty()),
            note_ko: row.note_ko.filter(|n| !n.is_empty()),
            proximity: reference.map(|from| {
                Proximity::new(haversine_distance(from, coords), locale)
            }),
        })
        .collect();

    if let Some(from) = reference {
        debug!("Ranking {} toilets from {}", records.len(), from);
        records.sort_by(|a, b| {
            let da = a.distance_meters().unwrap_or(0.0);
            let db = b.distance_meters().unwrap_or(0.0);
            da.total_cmp(&db)
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const DATASET: &str = "\
LATITUDE,LONGITUDE,STRASSE,HsNr,PLZ,ORT,ANMERKUNG,한국어
51.2254,6.7722,Burgplatz,1,40213,Düsseldorf,barrierefrei,휠체어 접근 가능
51.2200,,Königsallee,60,40212,Düsseldorf,,
51.2197,6.7943,Konrad-Adenauer-Platz,14,40210,Düsseldorf,Hauptbahnhof,
51.2390,6.7310,Rheinpark,,40476,Düsseldorf,nur im Sommer,
";

    fn loader() -> DatasetLoader {
        DatasetLoader::new(Source::inline(DATASET), Locale::De)
    }

    #[tokio::test]
    async fn test_load_without_reference_keeps_file_order() {
        let snapshot = loader().load(None).await.unwrap();

        let ids: Vec<&str> = snapshot.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2"]);

        let streets: Vec<&str> = snapshot.records.iter().map(|r| r.street.as_str()).collect();
        assert_eq!(streets, vec!["Burgplatz", "Konrad-Adenauer-Platz", "Rheinpark"]);

        assert!(snapshot.records.iter().all(|r| r.proximity.is_none()));
        assert!(snapshot.reference.is_none());
    }

    #[tokio::test]
    async fn test_repeated_loads_are_identical() {
        let loader = loader();
        let first = loader.load(None).await.unwrap();
        let second = loader.load(None).await.unwrap();
        assert_eq!(first.records, second.records);
    }

    #[tokio::test]
    async fn test_row_missing_longitude_is_dropped() {
        let snapshot = loader().load(None).await.unwrap();
        assert!(snapshot.records.iter().all(|r| r.street != "Königsallee"));
    }

    #[tokio::test]
    async fn test_load_with_reference_sorts_by_distance() {
        // Hauptbahnhof forecourt
        let reference = Coordinates::new(51.2200, 6.7940);
        let snapshot = loader().load(Some(reference)).await.unwrap();

        let distances: Vec<f64> = snapshot
            .records
            .iter()
            .map(|r| r.distance_meters().unwrap())
            .collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));

        let nearest = snapshot.nearest().unwrap();
        assert_eq!(nearest.street, "Konrad-Adenauer-Platz");
        // Ids stay with their rows after sorting
        assert_eq!(nearest.id, "1");
        assert!(snapshot.records.iter().all(|r| r.walking_time().is_some()));
    }

    #[tokio::test]
    async fn test_defaults_for_missing_address_fields() {
        let snapshot = loader().load(None).await.unwrap();
        let rheinpark = snapshot.get("2").unwrap();

        assert_eq!(rheinpark.house_number, "");
        assert_eq!(rheinpark.note.as_deref(), Some("nur im Sommer"));
        assert_eq!(rheinpark.note_ko, None);
    }

    #[tokio::test]
    async fn test_three_rows_middle_missing_longitude() {
        let csv = "LATITUDE,LONGITUDE,STRASSE\n51.1,6.1,A\n51.2,,B\n51.3,6.3,C\n";
        let loader = DatasetLoader::new(Source::inline(csv), Locale::De);
        let snapshot = loader.load(None).await.unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.records[0].id, "0");
        assert_eq!(snapshot.records[0].street, "A");
        assert_eq!(snapshot.records[1].id, "1");
        assert_eq!(snapshot.records[1].street, "C");
    }

    #[test]
    fn test_equal_distances_keep_id_order() {
        let row = |street: &str| RawRow {
            latitude: Some(51.2),
            longitude: Some(6.7),
            street: Some(street.to_string()),
            ..RawRow::default()
        };
        let rows = vec![row("A"), row("B"), row("C")];

        let records = build_records(rows, Some(Coordinates::new(51.3, 6.8)), Locale::En);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_walking_label_uses_loader_locale() {
        let rows = vec![RawRow {
            latitude: Some(51.2277),
            longitude: Some(6.7735),
            ..RawRow::default()
        }];
        let records = build_records(rows, Some(Coordinates::new(51.2277, 6.7735)), Locale::Ko);
        assert_eq!(records[0].walking_time(), Some("도보 0분"));
        assert_eq!(records[0].distance_meters(), Some(0.0));
    }

    #[tokio::test]
    async fn test_fetch_failure() {
        let loader = DatasetLoader::new(Source::parse("/nonexistent/dus-toilet.csv"), Locale::De);
        let err = loader.load(None).await.unwrap_err();
        assert!(matches!(err, Error::DataFetch(_)));
    }

    #[tokio::test]
    async fn test_snapshot_uses_loader_locale() {
        let csv = "LATITUDE,LONGITUDE,STRASSE\n51.2200,6.7940,Konrad-Adenauer-Platz\n";
        let loader = DatasetLoader::new(Source::inline(csv), Locale::En);
        assert_eq!(loader.locale(), Locale::En);

        let snapshot = loader.load(Some(Coordinates::new(51.2277, 6.7735))).await.unwrap();
        assert_eq!(snapshot.locale, loader.locale());
        assert!(snapshot.records[0].walking_time().unwrap().ends_with("min walk"));
    }

    #[tokio::test]
    async fn test_ragged_rows_do_not_fail_load() {
        let csv = "LATITUDE,LONGITUDE,STRASSE,ORT\n\
            51.1,6.1,A,X\n\
            51.2,6.2,B,Y,\n\
            51.3,6.3,C\n\
            ,,D,Z\n\
            51.4,6.4,E,W\n";
        let loader = DatasetLoader::new(Source::inline(csv), Locale::De);
        let snapshot = loader.load(None).await.unwrap();

        let streets: Vec<&str> = snapshot.records.iter().map(|r| r.street.as_str()).collect();
        assert_eq!(streets, vec!["A", "B", "C", "E"]);
        assert_eq!(snapshot.records[2].city, "");
    }

    #[tokio::test]
    async fn test_parse_failure() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("latin1.csv");
        std::fs::write(&path, b"LATITUDE,LONGITUDE,ORT\n51.2,6.7,D\xfcsseldorf\n").unwrap();

        let loader = DatasetLoader::new(Source::File(path), Locale::De);
        let err = loader.load(None).await.unwrap_err();
        assert!(matches!(err, Error::DataParse(_)));
    }
}
