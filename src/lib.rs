//! toilet-finder: nearest public toilets in Düsseldorf
//!
//! A library and CLI tool that loads the city's public toilet dataset,
//! ranks it by distance from a reference point and builds directions links.
//!
//! ## Features
//!
//! - CSV dataset from a file or URL, normalized into [`ToiletRecord`]s
//! - Great-circle distance with walking-time estimates in German, Korean and English
//! - Reference point from the device (IP lookup) with a city-center fallback
//! - Free-text search over address and remarks
//! - Directions links for walking, transit and driving
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use toilet_finder::coord::distance::{format_distance, haversine_distance};
//! use toilet_finder::Coordinates;
//!
//! let center = Coordinates::new(51.2277, 6.7735); // Düsseldorf
//! let station = Coordinates::new(51.2200, 6.7940);
//!
//! let meters = haversine_distance(center, station);
//! println!("Hauptbahnhof is {} away", format_distance(meters));
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod dataset;
pub mod error;
pub mod format;
pub mod geo;
pub mod locale;
pub mod navigation;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use dataset::{Snapshot, ToiletRecord};
pub use error::{Error, Result};
pub use locale::Locale;
pub use navigation::TravelMode;
