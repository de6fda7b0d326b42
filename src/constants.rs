//! Centralized constants for the toilet-finder crate
//!
//! Values shared by more than one module live here so the numbers used for
//! ranking, labelling and lookups stay consistent.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters (WGS84 approximation)
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
}

/// Walking estimate constants
pub mod walking {
    /// Average walking speed in km/h
    pub const SPEED_KMH: f64 = 4.0;

    /// Minutes needed to walk one kilometer at `SPEED_KMH`
    pub const MINUTES_PER_KM: f64 = 60.0 / SPEED_KMH;
}

/// Dataset column headers, exactly as they appear in the source CSV
pub mod columns {
    pub const LATITUDE: &str = "LATITUDE";
    pub const LONGITUDE: &str = "LONGITUDE";
}

/// External API endpoints
pub mod api {
    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";

    /// Google Maps directions endpoint
    pub const DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/?api=1";
}

/// Cache settings
pub mod cache {
    /// IP location cache duration in seconds (1 hour)
    pub const IP_LOCATION_TTL_SECS: u64 = 3600;

    /// IP location cache file name
    pub const IP_LOCATION_CACHE_FILE: &str = "ip_location_cache.json";
}
