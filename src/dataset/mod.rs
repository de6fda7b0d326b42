//! Toilet dataset
//!
//! This module handles:
//! - The normalized `ToiletRecord` and its optional distance annotation
//! - Parsing the source CSV through an explicit row schema ([`row`])
//! - Fetching the raw dataset ([`source`])
//! - Loading, ranking and searching ([`loader`], [`search`])
//! - Superseding loads when the reference point changes ([`coordinator`])

pub mod coordinator;
pub mod loader;
pub mod row;
pub mod search;
pub mod source;

use crate::coord::distance::{format_distance, walking_time_label};
use crate::coord::Coordinates;
use crate::locale::Locale;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use loader::DatasetLoader;
pub use search::search;
pub use source::Source;

/// Distance from the reference point and the matching walking estimate
///
/// Kept together so a record either has both or neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proximity {
    pub distance_meters: f64,
    pub walking_time: String,
}

impl Proximity {
    pub fn new(distance_meters: f64, locale: Locale) -> Self {
        Self {
            distance_meters,
            walking_time: walking_time_label(distance_meters, locale),
        }
    }
}

/// One public toilet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToiletRecord {
    /// Position in the loaded dataset, after rows without coordinates are dropped
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,

    /// Facility remarks (German in the Düsseldorf dataset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Korean translation of `note`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_ko: Option<String>,

    #[serde(flatten)]
    pub proximity: Option<Proximity>,
}

impl ToiletRecord {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn distance_meters(&self) -> Option<f64> {
        self.proximity.as_ref().map(|p| p.distance_meters)
    }

    pub fn walking_time(&self) -> Option<&str> {
        self.proximity.as_ref().map(|p| p.walking_time.as_str())
    }

    /// "1.2km", or None when the record has no distance
    pub fn distance_label(&self) -> Option<String> {
        self.distance_meters().map(format_distance)
    }

    /// "Burgplatz 1"
    pub fn street_line(&self) -> String {
        join_nonempty(&[self.street.as_str(), self.house_number.as_str()])
    }

    /// "40213 Düsseldorf"
    pub fn city_line(&self) -> String {
        join_nonempty(&[self.postal_code.as_str(), self.city.as_str()])
    }

    /// "Burgplatz 1, 40213 Düsseldorf"
    pub fn address(&self) -> String {
        [self.street_line(), self.city_line()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Remark in the reader's language
    ///
    /// Korean readers get the translation when there is one. Everyone else
    /// gets the original remark.
    pub fn note_for(&self, locale: Locale) -> Option<&str> {
        match (locale, &self.note_ko) {
            (Locale::Ko, Some(ko)) => Some(ko.as_str()),
            _ => self.note.as_deref(),
        }
    }

    /// Copy of this record with the walking label rewritten for `locale`
    pub fn localized(&self, locale: Locale) -> Self {
        let mut record = self.clone();
        if let Some(proximity) = record.proximity.as_mut() {
            proximity.walking_time = walking_time_label(proximity.distance_meters, locale);
        }
        record
    }
}

fn join_nonempty(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Result of one dataset load
///
/// Immutable once built. A new reference point means a new snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub records: Vec<ToiletRecord>,

    /// Point the records were ranked from, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Coordinates>,

    pub locale: Locale,
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(records: Vec<ToiletRecord>, reference: Option<Coordinates>, locale: Locale) -> Self {
        Self {
            records,
            reference,
            locale,
            loaded_at: Utc::now(),
        }
    }

    /// Look up a record by id
    pub fn get(&self, id: &str) -> Option<&ToiletRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Closest record (first one when ranked)
    pub fn nearest(&self) -> Option<&ToiletRecord> {
        self.reference.and(self.records.first())
    }
}

/// A record reduced to what a map widget needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub id: String,
    pub position: Coordinates,
    pub label: String,
}

impl From<&ToiletRecord> for MapMarker {
    fn from(record: &ToiletRecord) -> Self {
        Self {
            id: record.id.clone(),
            position: record.coordinates(),
            label: record.street_line(),
        }
    }
}

/// Build map markers, keeping the order of `records`
pub fn markers<'a>(records: impl IntoIterator<Item = &'a ToiletRecord>) -> Vec<MapMarker> {
    records.into_iter().map(MapMarker::from).collect()
}
