//! Distance and walking estimates
//!
//! Great-circle distance (haversine), a walking-time estimate at a fixed
//! pace and a compact metric distance label.

use crate::constants::geo::EARTH_RADIUS_METERS;
use crate::constants::walking::MINUTES_PER_KM;
use crate::coord::Coordinates;
use crate::locale::Locale;
use serde::{Deserialize, Serialize};

/// Calculate the distance between two points in meters (Haversine formula)
///
/// Inputs are not range-checked. Out-of-range coordinates still produce a
/// number, it just has no physical meaning.
pub fn haversine_distance(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lng = (p2.lng - p1.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Estimated walking duration, whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkingTime {
    pub total_minutes: u64,
}

impl WalkingTime {
    /// Estimate the walking time for a distance in meters
    ///
    /// Minutes are rounded half away from zero, so 1033m (15.495 min)
    /// gives 15 and 1034m (15.51 min) gives 16.
    pub fn from_meters(meters: f64) -> Self {
        let minutes = (meters / 1000.0 * MINUTES_PER_KM).round().max(0.0);
        Self {
            total_minutes: minutes as u64,
        }
    }

    /// Whole hours (only meaningful once the estimate reaches an hour)
    pub fn hours(&self) -> u64 {
        self.total_minutes / 60
    }

    /// Minutes left over after whole hours
    pub fn remaining_minutes(&self) -> u64 {
        self.total_minutes % 60
    }

    /// True when the label should carry an hour component
    pub fn has_hours(&self) -> bool {
        self.total_minutes >= 60
    }

    /// Localized label, e.g. "도보 15분" or "15 Min. zu Fuß"
    pub fn label(&self, locale: Locale) -> String {
        locale.walking_label(*self)
    }
}

/// Localized walking-time label for a distance in meters
pub fn walking_time_label(meters: f64, locale: Locale) -> String {
    WalkingTime::from_meters(meters).label(locale)
}

/// Format a distance for display
///
/// Below 1000m: whole meters ("999m"). From 1000m: kilometers with one
/// decimal ("1.5km"), rounded from the binary value of `meters / 1000`, so
/// 1150m (1.1499...km) shows as "1.1km". Exact ties such as 1250m round up.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        return format!("{}m", meters.round() as u64);
    }
    let km = meters / 1000.0;

    // An exact tie at one decimal is an odd number of quarter kilometers
    let quarters = km * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        return format!("{:.1}km", (km * 10.0).ceil() / 10.0);
    }
    format!("{:.1}km", km)
}
