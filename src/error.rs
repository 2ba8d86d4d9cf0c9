use thiserror::Error;

/// Failures of an itinerary calculation
///
/// The `Display` text is what the error panel shows.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ItineraryError {
    #[error("Malformed itinerary response: {0}")]
    MalformedResponse(String),
    #[error("Unknown step type: {0:?}")]
    UnknownStepType(String),
    #[error("Itinerary request failed: {0}")]
    TransportFailure(String),
    #[error("Itinerary request timed out after {0} ms")]
    Timeout(u32),
}

impl From<serde_json::Error> for ItineraryError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl From<reqwest::Error> for ItineraryError {
    fn from(err: reqwest::Error) -> Self {
        Self::TransportFailure(err.to_string())
    }
}
