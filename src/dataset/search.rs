//! Free-text search over loaded records

use crate::dataset::ToiletRecord;

/// Find records whose address or remark contains `query`
///
/// Matching is a case-insensitive substring test against street, postal
/// code, city and remark. A blank query matches nothing, so callers can
/// tell "nothing typed yet" apart from "no results". Matches keep the
/// order of `records`.
pub fn search<'a>(records: &'a [ToiletRecord], query: &str) -> Vec<&'a ToiletRecord> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    records.iter().filter(|r| matches(r, &needle)).collect()
}

fn matches(record: &ToiletRecord, needle: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(needle);

    contains(&record.street)
        || contains(&record.postal_code)
        || contains(&record.city)
        || record.note.as_deref().is_some_and(contains)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::test_support::record;

    fn records() -> Vec<ToiletRecord> {
        let mut hbf = record("0", "Konrad-Adenauer-Platz", "40210", "Düsseldorf");
        hbf.note = Some("Hauptbahnhof, Zugang über Bahnsteig".to_string());
        let mut burgplatz = record("1", "Burgplatz", "40213", "Düsseldorf");
        burgplatz.note_ko = Some("기차역".to_string());
        let neuss = record("2", "Bahnhofstraße", "41460", "Neuss");
        vec![hbf, burgplatz, neuss]
    }

    fn ids(found: &[&ToiletRecord]) -> Vec<String> {
        found.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let records = records();
        assert!(search(&records, "").is_empty());
        assert!(search(&records, "   ").is_empty());
        assert!(search(&records, "\t\n").is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let records = records();
        let upper = search(&records, "Bahn");
        let lower = search(&records, "bahn");
        assert_eq!(ids(&upper), ids(&lower));
        assert_eq!(ids(&upper), vec!["0", "2"]);
    }

    #[test]
    fn test_matches_each_field() {
        let records = records();
        assert_eq!(ids(&search(&records, "burgplatz")), vec!["1"]);
        assert_eq!(ids(&search(&records, "4021")), vec!["0", "1"]);
        assert_eq!(ids(&search(&records, "NEUSS")), vec!["2"]);
        assert_eq!(ids(&search(&records, "bahnsteig")), vec!["0"]);
    }

    #[test]
    fn test_translated_note_is_not_searched() {
        let records = records();
        assert!(search(&records, "기차역").is_empty());
    }

    #[test]
    fn test_preserves_input_order() {
        let mut records = records();
        records.reverse();
        assert_eq!(ids(&search(&records, "düsseldorf")), vec!["1", "0"]);
    }

    #[test]
    fn test_no_match() {
        let records = records();
        assert!(search(&records, "Köln").is_empty());
    }
}
