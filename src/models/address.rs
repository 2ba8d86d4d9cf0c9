use serde::{Deserialize, Serialize};

use super::LatLon;

/// A resolved postal address as returned by the address service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub label: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postcode: String,
    /// `(longitude, latitude)`, the order used by the address service
    pub coordinates: (f64, f64),
}

impl Address {
    #[must_use]
    pub fn lon(&self) -> f64 {
        self.coordinates.0
    }

    #[must_use]
    pub fn lat(&self) -> f64 {
        self.coordinates.1
    }

    /// Position in map order
    #[must_use]
    pub fn lat_lon(&self) -> LatLon {
        (self.lat(), self.lon())
    }

    /// Secondary line shown under the label in the candidate list
    #[must_use]
    pub fn locality(&self) -> String {
        format!("{} {}", self.postcode, self.city).trim().to_string()
    }
}

/// Snapshot of the last submitted search, restored on page load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastSearch {
    pub origin: Option<Address>,
    pub destination: Option<Address>,
}

impl LastSearch {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.origin.is_some() && self.destination.is_some()
    }
}
