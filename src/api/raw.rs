//! Wire shapes of the itinerary backend.
//!
//! The backend has answered in three incompatible layouts over time. They are
//! kept apart here as [`RawItinerary`] variants and only
//! [`crate::transform::normalize`] looks inside them.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ItineraryError;

/// One backend payload, classified by shape
#[derive(Debug, Clone, PartialEq)]
pub enum RawItinerary {
    /// Top-level `Steps` array plus one `Geometry` for the whole trip
    Flat(FlatItinerary),
    /// Route collections per leg, each with its own summary and geometry
    Nested(NestedItinerary),
    /// WCF envelope (`{"d": ...}` or `{"<Operation>Result": ...}`) around another payload
    Envelope(Value),
}

impl RawItinerary {
    /// Classify a decoded JSON payload
    ///
    /// # Errors
    ///
    /// Returns `MalformedResponse` if the payload matches no known shape or a
    /// matching shape is missing required fields
    pub fn from_value(value: Value) -> Result<Self, ItineraryError> {
        let Some(object) = value.as_object() else {
            return Err(ItineraryError::MalformedResponse(
                "expected a JSON object".to_string(),
            ));
        };

        if has_key(object, "steps") {
            return Ok(Self::Flat(serde_json::from_value(value)?));
        }
        if has_key(object, "itinerary") {
            return Ok(Self::Nested(serde_json::from_value(value)?));
        }
        if let Some(payload) = envelope_payload(object) {
            return Ok(Self::Envelope(payload.clone()));
        }

        Err(ItineraryError::MalformedResponse(
            "no steps, itinerary or envelope field".to_string(),
        ))
    }

    /// Decode and classify a response body
    ///
    /// # Errors
    ///
    /// Returns `MalformedResponse` if the body is not JSON or matches no known shape
    pub fn from_json(body: &str) -> Result<Self, ItineraryError> {
        Self::from_value(serde_json::from_str(body)?)
    }
}

fn has_key(object: &Map<String, Value>, name: &str) -> bool {
    object.keys().any(|k| k.eq_ignore_ascii_case(name))
}

fn envelope_payload(object: &Map<String, Value>) -> Option<&Value> {
    if object.len() != 1 {
        return None;
    }
    let (key, payload) = object.iter().next()?;
    let is_envelope = key == "d" || key.to_ascii_lowercase().ends_with("result");
    is_envelope.then_some(payload)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawGeometry {
    /// `[lon, lat]` pairs, optionally followed by elevation
    #[serde(alias = "Coordinates")]
    pub coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawStation {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Latitude", alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "Longitude", alias = "lon", alias = "lng")]
    pub longitude: f64,
    #[serde(alias = "AvailableBikes", alias = "availableBikes", default)]
    pub available_bikes: u32,
    #[serde(alias = "BikeStands", alias = "bikeStands", default)]
    pub bike_stands: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FlatStep {
    #[serde(rename = "type", alias = "Type", alias = "mode", alias = "Mode")]
    pub mode: String,
    #[serde(alias = "Instruction", default)]
    pub instruction: Option<String>,
    #[serde(alias = "Distance")]
    pub distance: f64,
    #[serde(alias = "Duration", default)]
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FlatItinerary {
    #[serde(alias = "TotalDistance", alias = "totalDistance")]
    pub total_distance: f64,
    #[serde(alias = "TotalDuration", alias = "totalDuration")]
    pub total_duration: f64,
    #[serde(alias = "Steps")]
    pub steps: Vec<FlatStep>,
    #[serde(alias = "Geometry")]
    pub geometry: RawGeometry,
    #[serde(alias = "UseBike", alias = "useBike", default)]
    pub use_bike: bool,
    #[serde(alias = "ClosestOriginStation", alias = "closestOriginStation", default)]
    pub closest_origin_station: Option<RawStation>,
    #[serde(alias = "ClosestDestinationStation", alias = "closestDestinationStation", default)]
    pub closest_destination_station: Option<RawStation>,
    #[serde(alias = "PreferredOption", alias = "preferredOption", default)]
    pub preferred_option: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteSummary {
    #[serde(alias = "Distance")]
    pub distance: f64,
    #[serde(alias = "Duration")]
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NestedStep {
    #[serde(alias = "Instruction", default)]
    pub instruction: Option<String>,
    #[serde(alias = "Distance", default)]
    pub distance: f64,
    #[serde(alias = "Duration", default)]
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NestedSegment {
    #[serde(alias = "Steps", default)]
    pub steps: Vec<NestedStep>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NestedRoute {
    #[serde(alias = "Summary")]
    pub summary: RouteSummary,
    #[serde(alias = "Geometry")]
    pub geometry: RawGeometry,
    #[serde(alias = "Segments", default)]
    pub segments: Vec<NestedSegment>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteCollection {
    #[serde(alias = "Routes")]
    pub routes: Vec<NestedRoute>,
}

/// Either one walking route or the three legs of a bike-share trip
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NestedLegs {
    #[serde(alias = "Routes", default)]
    pub routes: Option<Vec<NestedRoute>>,
    #[serde(alias = "OriginToStation", alias = "originToStation", default)]
    pub origin_to_station: Option<RouteCollection>,
    #[serde(alias = "StationToStation", alias = "stationToStation", default)]
    pub station_to_station: Option<RouteCollection>,
    #[serde(alias = "StationToDestination", alias = "stationToDestination", default)]
    pub station_to_destination: Option<RouteCollection>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NestedItinerary {
    #[serde(alias = "UseBike", alias = "useBike", default)]
    pub use_bike: bool,
    #[serde(alias = "Itinerary")]
    pub itinerary: NestedLegs,
    #[serde(alias = "ClosestOriginStation", alias = "closestOriginStation", default)]
    pub closest_origin_station: Option<RawStation>,
    #[serde(alias = "ClosestDestinationStation", alias = "closestDestinationStation", default)]
    pub closest_destination_station: Option<RawStation>,
    #[serde(alias = "PreferredOption", alias = "preferredOption", default)]
    pub preferred_option: Option<String>,
}
