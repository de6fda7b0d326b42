//! Output formatters
//!
//! Provides trait-based output formatting for toilet listings.

pub mod gpx;
pub mod json;
pub mod text;
pub mod url;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::dataset::{Snapshot, ToiletRecord};
use crate::error::Result;
use crate::locale::Locale;
use serde::{Deserialize, Serialize};

/// Records to print, in display order, plus the context they were ranked in
#[derive(Debug, Clone, Serialize)]
pub struct Listing<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Coordinates>,
    pub locale: Locale,
    pub count: usize,
    pub records: Vec<&'a ToiletRecord>,
}

impl<'a> Listing<'a> {
    pub fn new(
        records: Vec<&'a ToiletRecord>,
        reference: Option<Coordinates>,
        locale: Locale,
    ) -> Self {
        Self {
            reference,
            locale,
            count: records.len(),
            records,
        }
    }

    /// Every record of a snapshot
    pub fn from_snapshot(snapshot: &'a Snapshot) -> Self {
        Self::new(snapshot.records.iter().collect(), snapshot.reference, snapshot.locale)
    }

    /// Keep at most `limit` records
    pub fn truncate(mut self, limit: Option<usize>) -> Self {
        if let Some(limit) = limit {
            self.records.truncate(limit);
            self.count = self.records.len();
        }
        self
    }
}

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a listing
    ///
    /// # Arguments
    /// * `listing` - Records to format, already in display order
    /// * `config` - Application config (for the directions service, etc.)
    fn format(&self, listing: &Listing<'_>, config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        "url" => Some(Box::new(url::UrlFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    ["json", "text", "gpx", "url"]
        .into_iter()
        .filter_map(get_formatter)
        .map(|f| FormatInfo {
            name: f.name().to_string(),
            description: f.description().to_string(),
        })
        .collect()
}
