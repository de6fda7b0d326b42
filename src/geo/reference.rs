//! Reference point resolution
//!
//! Distances are ranked from a reference point. A device reading is only
//! trusted when it falls inside the supported region; otherwise the
//! configured default (Düsseldorf city centre) is used instead.

use crate::config::ReferenceConfig;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Where the resolved reference point came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceSource {
    Device,
    Fallback,
}

/// A reference point ready for ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedReference {
    pub point: Coordinates,
    pub source: ReferenceSource,

    /// Why the device reading was not used, when it wasn't
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Accept a device reading only if it lies inside the configured region
pub fn check_reading(reading: Coordinates, config: &ReferenceConfig) -> Result<Coordinates> {
    reading.validate().map_err(|e| Error::GeolocationUnavailable(e.to_string()))?;

    if !config.bounds().contains(reading) {
        return Err(Error::GeolocationUnavailable(format!(
            "Location {} is outside the supported region",
            reading
        )));
    }
    Ok(reading)
}

/// Resolve a device reading (or the failure to get one) into a reference point
///
/// Never fails: anything unusable falls back to the configured default, and
/// the reason is kept in `notice`.
pub fn resolve(reading: Result<Coordinates>, config: &ReferenceConfig) -> ResolvedReference {
    match reading.and_then(|r| check_reading(r, config)) {
        Ok(point) => {
            debug!("Using device location {}", point);
            ResolvedReference {
                point,
                source: ReferenceSource::Device,
                notice: None,
            }
        }
        Err(e) => {
            let notice = match e {
                Error::GeolocationUnavailable(_) => e.to_string(),
                other => Error::GeolocationUnavailable(other.to_string()).to_string(),
            };
            warn!("{}; falling back to {}", notice, config.default_point());
            fallback(config, Some(notice))
        }
    }
}

/// The configured default reference point
pub fn fallback(config: &ReferenceConfig, notice: Option<String>) -> ResolvedReference {
    ResolvedReference {
        point: config.default_point(),
        source: ReferenceSource::Fallback,
        notice,
    }
}
