//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/toilet-finder/config.toml

pub mod defaults;

use crate::coord::{Coordinates, RegionBounds};
use crate::dataset::Source;
use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::navigation::{self, TravelMode};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the toilet CSV lives
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Default reference point and trusted region
    #[serde(default)]
    pub reference: ReferenceConfig,

    /// Directions link settings
    #[serde(default)]
    pub navigation: NavigationConfig,

    /// Output settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Dataset settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// File path or http(s) URL of the CSV
    #[serde(default = "default_dataset_source")]
    pub source: String,
}

/// Reference point settings
///
/// This is the single place the default location is defined; every
/// consumer gets it from here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceConfig {
    #[serde(default = "default_reference_lat")]
    pub default_lat: f64,

    #[serde(default = "default_reference_lng")]
    pub default_lng: f64,

    #[serde(default = "default_region_min_lat")]
    pub min_lat: f64,

    #[serde(default = "default_region_max_lat")]
    pub max_lat: f64,

    #[serde(default = "default_region_min_lng")]
    pub min_lng: f64,

    #[serde(default = "default_region_max_lng")]
    pub max_lng: f64,

    /// If true, the CLI locates the user by IP when no location is given
    #[serde(default)]
    pub use_device: bool,
}

/// Directions link settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Directions endpoint, query parameters are appended
    #[serde(default = "default_navigation_url")]
    pub base_url: String,

    #[serde(default = "default_travel_mode")]
    pub default_mode: TravelMode,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_locale")]
    pub locale: Locale,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions for serde
fn default_dataset_source() -> String {
    DEFAULT_DATASET_SOURCE.to_string()
}
fn default_reference_lat() -> f64 {
    DEFAULT_REFERENCE_LAT
}
fn default_reference_lng() -> f64 {
    DEFAULT_REFERENCE_LNG
}
fn default_region_min_lat() -> f64 {
    DEFAULT_REGION_MIN_LAT
}
fn default_region_max_lat() -> f64 {
    DEFAULT_REGION_MAX_LAT
}
fn default_region_min_lng() -> f64 {
    DEFAULT_REGION_MIN_LNG
}
fn default_region_max_lng() -> f64 {
    DEFAULT_REGION_MAX_LNG
}
fn default_navigation_url() -> String {
    crate::constants::api::DIRECTIONS_URL.to_string()
}
fn default_travel_mode() -> TravelMode {
    DEFAULT_TRAVEL_MODE.parse().unwrap_or_default()
}
fn default_locale() -> Locale {
    DEFAULT_LOCALE.parse().unwrap_or_default()
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            source: default_dataset_source(),
        }
    }
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            default_lat: default_reference_lat(),
            default_lng: default_reference_lng(),
            min_lat: default_region_min_lat(),
            max_lat: default_region_max_lat(),
            min_lng: default_region_min_lng(),
            max_lng: default_region_max_lng(),
            use_device: false,
        }
    }
}

impl ReferenceConfig {
    /// Fallback reference point
    pub fn default_point(&self) -> Coordinates {
        Coordinates::new(self.default_lat, self.default_lng)
    }

    /// Region in which device readings are accepted
    pub fn bounds(&self) -> RegionBounds {
        RegionBounds::new(self.min_lat, self.max_lat, self.min_lng, self.max_lng)
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            base_url: default_navigation_url(),
            default_mode: default_travel_mode(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            format: default_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid value for {}: {}", key, value)))
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file, creating it if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path ("section.key")
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["dataset", "source"] => Some(self.dataset.source.clone()),

            ["reference", "default_lat"] => Some(self.reference.default_lat.to_string()),
            ["reference", "default_lng"] => Some(self.reference.default_lng.to_string()),
            ["reference", "min_lat"] => Some(self.reference.min_lat.to_string()),
            ["reference", "max_lat"] => Some(self.reference.max_lat.to_string()),
            ["reference", "min_lng"] => Some(self.reference.min_lng.to_string()),
            ["reference", "max_lng"] => Some(self.reference.max_lng.to_string()),
            ["reference", "use_device"] => Some(self.reference.use_device.to_string()),

            ["navigation", "base_url"] => Some(self.navigation.base_url.clone()),
            ["navigation", "default_mode"] => Some(self.navigation.default_mode.to_string()),

            ["display", "locale"] => Some(self.display.locale.to_string()),
            ["display", "format"] => Some(self.display.format.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["dataset", "source"] => self.dataset.source = value.to_string(),

            ["reference", "default_lat"] => self.reference.default_lat = parse_value(key, value)?,
            ["reference", "default_lng"] => self.reference.default_lng = parse_value(key, value)?,
            ["reference", "min_lat"] => self.reference.min_lat = parse_value(key, value)?,
            ["reference", "max_lat"] => self.reference.max_lat = parse_value(key, value)?,
            ["reference", "min_lng"] => self.reference.min_lng = parse_value(key, value)?,
            ["reference", "max_lng"] => self.reference.max_lng = parse_value(key, value)?,
            ["reference", "use_device"] => self.reference.use_device = parse_value(key, value)?,

            ["navigation", "base_url"] => self.navigation.base_url = value.to_string(),
            ["navigation", "default_mode"] => {
                self.navigation.default_mode = value.parse::<TravelMode>().map_err(Error::Config)?;
            }

            ["display", "locale"] => {
                self.display.locale = value.parse::<Locale>().map_err(Error::Config)?;
            }
            ["display", "format"] => self.display.format = value.to_string(),

            ["server", "host"] => self.server.host = value.to_string(),
            ["server", "port"] => self.server.port = parse_value(key, value)?,

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "dataset.source",
            "reference.default_lat",
            "reference.default_lng",
            "reference.min_lat",
            "reference.max_lat",
            "reference.min_lng",
            "reference.max_lng",
            "reference.use_device",
            "navigation.base_url",
            "navigation.default_mode",
            "display.locale",
            "display.format",
            "server.host",
            "server.port",
        ]
    }

    /// Dataset source described by `dataset.source`
    pub fn dataset_source(&self) -> Source {
        Source::parse(&self.dataset.source)
    }

    /// Directions link using the configured service and default mode
    pub fn directions_url(
        &self,
        origin: Option<Coordinates>,
        destination: Coordinates,
        mode: Option<TravelMode>,
    ) -> String {
        navigation::directions_url(
            &self.navigation.base_url,
            origin,
            destination,
            mode.unwrap_or(self.navigation.default_mode),
        )
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.dataset.source, "data/dus-toilet.csv");
        assert_eq!(config.reference.default_point(), Coordinates::new(51.2277, 6.7735));
        assert_eq!(config.navigation.default_mode, TravelMode::Walking);
        assert_eq!(config.display.locale, Locale::De);
        assert_eq!(config.server.port, 7879);
    }

    #[test]
    fn test_defaults_match_constants() {
        assert_eq!(
            DEFAULT_TRAVEL_MODE.parse::<TravelMode>(),
            Ok(default_travel_mode())
        );
        assert_eq!(DEFAULT_LOCALE.parse::<Locale>(), Ok(default_locale()));

        let config: Config = toml::from_str("[navigation]\n[display]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.navigation.default_mode, default_travel_mode());
        assert_eq!(config.display.locale, default_locale());
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("display.locale"), Some("de".to_string()));
        config.set("display.locale", "ko").unwrap();
        assert_eq!(config.display.locale, Locale::Ko);

        config.set("reference.default_lat", "51.2197").unwrap();
        assert_eq!(config.get("reference.default_lat"), Some("51.2197".to_string()));

        config.set("navigation.default_mode", "transit").unwrap();
        assert_eq!(config.get("navigation.default_mode"), Some("transit".to_string()));

        config.set("reference.use_device", "true").unwrap();
        assert!(config.reference.use_device);
    }

    #[test]
    fn test_every_key_is_readable() {
        let config = Config::default();
        for key in Config::available_keys() {
            assert!(config.get(key).is_some(), "missing getter for {}", key);
        }
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("server.port", "not_a_number").is_err());
        assert!(config.set("display.locale", "fr").is_err());
        assert!(config.set("navigation.default_mode", "bike").is_err());
    }

    #[test]
    fn test_directions_url_uses_default_mode() {
        let mut config = Config::default();
        config.navigation.default_mode = TravelMode::Driving;

        let url = config.directions_url(None, Coordinates::new(51.2254, 6.7722), None);
        assert!(url.starts_with("https://www.google.com/maps/dir/?api=1&"));
        assert!(url.ends_with("travelmode=driving"));

        let url = config.directions_url(
            None,
            Coordinates::new(51.2254, 6.7722),
            Some(TravelMode::Walking),
        );
        assert!(url.ends_with("travelmode=walking"));
    }

    #[test]
    fn test_dataset_source() {
        let mut config = Config::default();
        assert!(config.dataset_source().file_path().is_some());

        config.dataset.source = "https://example.org/dus-toilet.csv".to_string();
        assert!(matches!(config.dataset_source(), Source::Http(_)));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("toilet-finder").join("config.toml");

        let mut config = Config::default();
        config.display.locale = Locale::En;
        config.dataset.source = "/srv/data/toilets.csv".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.display.locale, Locale::En);
        assert_eq!(loaded.dataset.source, "/srv/data/toilets.csv");
    }

    #[test]
    fn test_load_creates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.server.port, 7879);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[display]\nlocale = \"ko\"\n").unwrap();
        assert_eq!(loaded.display.locale, Locale::Ko);
        assert_eq!(loaded.display.format, "text");
        assert_eq!(loaded.reference.max_lat, 55.0);
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[dataset]"));
        assert!(toml.contains("[reference]"));
        assert!(toml.contains("[navigation]"));
        assert!(toml.contains("default_mode = \"walking\""));
        assert!(toml.contains("locale = \"de\""));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "127.0.0.1:7879");
    }
}
