use serde::{Deserialize, Serialize};

use super::LatLon;
use crate::error::ItineraryError;

/// Travel mode of one step of an itinerary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Walk,
    Bike,
}

impl StepType {
    /// Classify a backend mode label, ignoring case
    ///
    /// # Errors
    ///
    /// Returns `UnknownStepType` for labels that name neither mode.
    pub fn from_label(label: &str) -> Result<Self, ItineraryError> {
        match label.trim().to_ascii_lowercase().as_str() {
            "walk" | "walking" | "foot" | "foot-walking" | "pedestrian" => Ok(Self::Walk),
            "bike" | "bicycle" | "cycling" | "cycling-regular" | "velo" => Ok(Self::Bike),
            _ => Err(ItineraryError::UnknownStepType(label.to_string())),
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Walk => "fa-solid fa-person-walking",
            Self::Bike => "fa-solid fa-bicycle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    pub step_type: StepType,
    pub instruction: String,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// A bike-share station suggested by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BikeStation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub available_bikes: u32,
    pub bike_stands: u32,
}

impl BikeStation {
    #[must_use]
    pub fn free_stands(&self) -> u32 {
        self.bike_stands.saturating_sub(self.available_bikes)
    }

    #[must_use]
    pub fn lat_lon(&self) -> LatLon {
        (self.lat, self.lon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationPair {
    pub origin: BikeStation,
    pub destination: BikeStation,
}

/// Backend-shape-independent itinerary
///
/// Built once per backend response by [`crate::transform::normalize`] and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalItinerary {
    pub total_distance_meters: f64,
    pub total_duration_seconds: f64,
    pub steps: Vec<RouteStep>,
    /// Whole-trip geometry in traversal order
    pub polyline: Vec<LatLon>,
    pub use_bike: bool,
    pub stations: Option<StationPair>,
    pub recommendation: Option<String>,
}

impl CanonicalItinerary {
    /// Contiguous runs of same-typed steps, in traversal order
    #[must_use]
    pub fn legs(&self) -> Vec<(StepType, &[RouteStep])> {
        let mut legs = Vec::new();
        let mut start = 0;

        for i in 1..=self.steps.len() {
            let boundary = i == self.steps.len() || self.steps[i].step_type != self.steps[start].step_type;
            if boundary {
                legs.push((self.steps[start].step_type, &self.steps[start..i]));
                start = i;
            }
        }

        legs
    }

    #[must_use]
    pub fn step_distance_sum(&self) -> f64 {
        self.steps.iter().map(|s| s.distance_meters).sum()
    }
}
