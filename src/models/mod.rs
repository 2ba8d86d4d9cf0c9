mod address;
mod itinerary;
mod segment;

pub use address::{Address, LastSearch};
pub use itinerary::{BikeStation, CanonicalItinerary, RouteStep, StationPair, StepType};
pub use segment::Segment;

/// A geographic position as `(latitude, longitude)` in degrees
pub type LatLon = (f64, f64);
