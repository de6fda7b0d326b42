//! Device location and reference point handling
//!
//! [`ip_location`] stands in for a device location sensor on the command
//! line. [`reference`] decides whether such a reading is trustworthy.

pub mod ip_location;
pub mod reference;

use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};

pub use reference::{resolve, ReferenceSource, ResolvedReference};

/// A location reading with a human-readable description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceLocation {
    pub point: Coordinates,
    /// e.g. "Düsseldorf, North Rhine-Westphalia, Germany"
    pub display_name: String,
}

/// Get the IP location service
pub fn get_ip_locator() -> ip_location::IpLocator {
    ip_location::IpLocator::new()
}
