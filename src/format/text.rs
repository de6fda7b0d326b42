//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{Listing, OutputFormatter};

/// Text formatter - one block per toilet
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, listing: &Listing<'_>, _config: &Config) -> Result<String> {
        let mut output = String::new();

        match listing.reference {
            Some(reference) => output.push_str(&format!(
                "{} toilets near ({:.6}, {:.6})\n",
                listing.count, reference.lat, reference.lng
            )),
            None => output.push_str(&format!("{} toilets\n", listing.count)),
        }

        for record in &listing.records {
            output.push('\n');
            output.push_str(&format!("[{}] {}\n", record.id, record.address()));

            if let (Some(distance), Some(walking)) = (record.distance_label(), record.walking_time()) {
                output.push_str(&format!("    {} · {}\n", distance, walking));
            }

            if let Some(note) = record.note_for(listing.locale) {
                output.push_str(&format!("    {}\n", note));
            }
        }

        Ok(output)
    }
}
