//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default dataset location (file path or URL)
pub const DEFAULT_DATASET_SOURCE: &str = "data/dus-toilet.csv";

/// Düsseldorf city centre, used when no trustworthy location is available
pub const DEFAULT_REFERENCE_LAT: f64 = 51.2277;
pub const DEFAULT_REFERENCE_LNG: f64 = 6.7735;

/// Region in which device readings are trusted (roughly Germany)
pub const DEFAULT_REGION_MIN_LAT: f64 = 47.0;
pub const DEFAULT_REGION_MAX_LAT: f64 = 55.0;
pub const DEFAULT_REGION_MIN_LNG: f64 = 5.0;
pub const DEFAULT_REGION_MAX_LNG: f64 = 15.0;

/// Default travel mode for directions links
pub const DEFAULT_TRAVEL_MODE: &str = "walking";

/// Default display locale
pub const DEFAULT_LOCALE: &str = "de";

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7879;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "toilet-finder";
