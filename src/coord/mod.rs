//! Coordinates and geographic helpers
//!
//! This module handles:
//! - The `Coordinates` value type shared by every other module
//! - Rectangular region checks for device location readings
//! - Distance, walking time and distance labels (see [`distance`])

pub mod distance;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// A latitude/longitude rectangle
///
/// Bounds are exclusive: a point exactly on an edge is outside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl RegionBounds {
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Check whether a point lies strictly inside the rectangle
    pub fn contains(&self, point: Coordinates) -> bool {
        point.lat > self.min_lat
            && point.lat < self.max_lat
            && point.lng > self.min_lng
            && point.lng < self.max_lng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(Coordinates::new(51.2277, 6.7735).validate().is_ok());
        assert!(Coordinates::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinates::new(91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -180.5).validate().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Coordinates::new(51.2277, 6.7735).to_string(), "51.2277,6.7735");
    }

    #[test]
    fn test_region_contains() {
        let germany = RegionBounds::new(47.0, 55.0, 5.0, 15.0);

        assert!(germany.contains(Coordinates::new(51.2277, 6.7735)));
        assert!(!germany.contains(Coordinates::new(40.7128, -74.0060)));

        // Edges are excluded
        assert!(!germany.contains(Coordinates::new(47.0, 10.0)));
        assert!(!germany.contains(Coordinates::new(50.0, 15.0)));
    }
}
