//! GPX output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{Listing, OutputFormatter};

/// GPX formatter - one waypoint per toilet
pub struct GpxFormatter;

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, listing: &Listing<'_>, _config: &Config) -> Result<String> {
        let mut gpx = String::new();

        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="toilet-finder">"#);
        gpx.push('\n');

        gpx.push_str("  <metadata>\n");
        gpx.push_str("    <name>Public toilets</name>\n");
        gpx.push_str("  </metadata>\n");

        if let Some(reference) = listing.reference {
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                reference.lat, reference.lng
            ));
            gpx.push('\n');
            gpx.push_str("    <name>Start</name>\n");
            gpx.push_str("  </wpt>\n");
        }

        for record in &listing.records {
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                record.latitude, record.longitude
            ));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(&record.street_line())));

            let mut desc = record.address();
            if let Some(note) = record.note_for(listing.locale) {
                desc.push_str(" - ");
                desc.push_str(note);
            }
            gpx.push_str(&format!("    <desc>{}</desc>\n", escape_xml(&desc)));
            gpx.push_str("    <sym>Restroom</sym>\n");
            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");

        Ok(gpx)
    }
}
