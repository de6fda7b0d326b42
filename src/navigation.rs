//! Directions links
//!
//! Builds links into an external directions service (Google Maps by
//! default). The link is only constructed here; opening it and whatever the
//! service answers is up to the caller.

use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};

/// How the user wants to get there
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Walking,
    Transit,
    Driving,
}

impl TravelMode {
    /// Value of the `travelmode` query parameter
    pub fn token(&self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Transit => "transit",
            Self::Driving => "driving",
        }
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl std::str::FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "walking" | "walk" | "foot" => Ok(Self::Walking),
            "transit" | "public" | "bus" | "train" => Ok(Self::Transit),
            "driving" | "drive" | "car" => Ok(Self::Driving),
            _ => Err(format!("Unknown travel mode: {}", s)),
        }
    }
}

/// List all travel modes
pub fn available_modes() -> Vec<TravelMode> {
    vec![TravelMode::Walking, TravelMode::Transit, TravelMode::Driving]
}

/// Build a directions link
///
/// `base_url` already carries its own query (`...?api=1`), the remaining
/// parameters are appended. Without an origin the service starts from the
/// user's own position.
pub fn directions_url(
    base_url: &str,
    origin: Option<Coordinates>,
    destination: Coordinates,
    mode: TravelMode,
) -> String {
    let mut params = Vec::with_capacity(3);
    if let Some(origin) = origin {
        params.push(format!("origin={}", urlencoding::encode(&origin.to_string())));
    }
    params.push(format!(
        "destination={}",
        urlencoding::encode(&destination.to_string())
    ));
    params.push(format!("travelmode={}", mode.token()));

    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base_url, separator, params.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::api::DIRECTIONS_URL;

    #[test]
    fn test_directions_with_origin() {
        let url = directions_url(
            DIRECTIONS_URL,
            Some(Coordinates::new(51.2277, 6.7735)),
            Coordinates::new(51.2254, 6.7722),
            TravelMode::Walking,
        );
        assert_eq!(
            url,
            "https://www.google.com/maps/dir/?api=1&origin=51.2277%2C6.7735&destination=51.2254%2C6.7722&travelmode=walking"
        );
    }

    #[test]
    fn test_directions_without_origin() {
        let url = directions_url(
            DIRECTIONS_URL,
            None,
            Coordinates::new(51.2254, 6.7722),
            TravelMode::Transit,
        );
        assert!(!url.contains("origin="));
        assert!(url.ends_with("destination=51.2254%2C6.7722&travelmode=transit"));
    }

    #[test]
    fn test_base_without_query() {
        let url = directions_url(
            "https://maps.example.org/dir",
            None,
            Coordinates::new(1.0, 2.0),
            TravelMode::Driving,
        );
        assert_eq!(url, "https://maps.example.org/dir?destination=1%2C2&travelmode=driving");
    }

    #[test]
    fn test_travel_mode_parse() {
        assert_eq!("walking".parse::<TravelMode>().unwrap(), TravelMode::Walking);
        assert_eq!("Transit".parse::<TravelMode>().unwrap(), TravelMode::Transit);
        assert_eq!("car".parse::<TravelMode>().unwrap(), TravelMode::Driving);
        assert!("bike".parse::<TravelMode>().is_err());
    }

    #[test]
    fn test_available_modes() {
        let modes = available_modes();
        assert_eq!(modes.len(), 3);
        assert_eq!(modes[0], TravelMode::default());
    }
}
