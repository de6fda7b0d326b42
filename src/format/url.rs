//! Directions URL output formatter

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{Listing, OutputFormatter};
use crate::navigation::TravelMode;

/// URL formatter - directions link to the first toilet in the listing
///
/// For a ranked listing that is the nearest one.
pub struct UrlFormatter;

impl UrlFormatter {
    /// Format URL with an explicit travel mode
    pub fn format_with_mode(
        &self,
        listing: &Listing<'_>,
        config: &Config,
        mode: Option<TravelMode>,
    ) -> Result<String> {
        let first = listing
            .records
            .first()
            .ok_or_else(|| Error::NotFound("No toilet to link to".to_string()))?;

        Ok(config.directions_url(listing.reference, first.coordinates(), mode))
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Directions link to the first toilet"
    }

    fn format(&self, listing: &Listing<'_>, config: &Config) -> Result<String> {
        self.format_with_mode(listing, config, None)
    }
}
