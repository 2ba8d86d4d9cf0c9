use serde::Serialize;
use serde_json::Value;

use super::raw::RawItinerary;
use super::{sleep_ms, with_timeout};
use crate::config::ApiConfig;
use crate::error::ItineraryError;
use crate::logging::{log, warn};
use crate::models::{Address, CanonicalItinerary};
use crate::transform::normalize;

/// Longest slice of an unstructured error body shown to the user
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Body of `POST /api/itinerary`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRequest {
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub use_bike: bool,
}

impl ItineraryRequest {
    #[must_use]
    pub fn between(origin: &Address, destination: &Address, use_bike: bool) -> Self {
        Self {
            origin: Coordinates {
                latitude: origin.lat(),
                longitude: origin.lon(),
            },
            destination: Coordinates {
                latitude: destination.lat(),
                longitude: destination.lon(),
            },
            use_bike,
        }
    }
}

/// Itinerary backend
#[allow(async_fn_in_trait)]
pub trait ItineraryService {
    /// Request a route and classify the payload without interpreting it
    async fn calculate(&self, request: &ItineraryRequest) -> Result<RawItinerary, ItineraryError>;

    /// Whether the backend answers its health check
    async fn ping(&self) -> bool;
}

/// Human-readable message for a failed backend response
///
/// Uses the `message`/`error` field of a JSON body when there is one, else
/// the start of the body, else the status code alone.
#[must_use]
pub fn describe_backend_error(status: u16, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        ["message", "Message", "error", "Error"]
            .iter()
            .find_map(|key| value.get(key)?.as_str().map(str::to_string))
    });

    if let Some(message) = from_json.filter(|m| !m.trim().is_empty()) {
        return format!("HTTP {status}: {}", message.trim());
    }

    let body = body.trim();
    if body.is_empty() {
        return format!("HTTP {status}");
    }

    let snippet: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    if snippet.len() < body.len() {
        format!("HTTP {status}: {snippet}…")
    } else {
        format!("HTTP {status}: {snippet}")
    }
}

/// HTTP client for the itinerary backend
pub struct ItineraryApi {
    client: reqwest::Client,
    itinerary_url: String,
    ping_url: String,
    timeout_ms: u32,
}

impl ItineraryApi {
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            itinerary_url: config.itinerary_url(),
            ping_url: config.ping_url(),
            timeout_ms: config.itinerary_timeout_ms,
        }
    }

    async fn post(&self, request: &ItineraryRequest) -> Result<RawItinerary, ItineraryError> {
        let response = self
            .client
            .post(&self.itinerary_url)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ItineraryError::TransportFailure(describe_backend_error(
                status.as_u16(),
                &body,
            )));
        }

        RawItinerary::from_json(&body)
    }
}

impl ItineraryService for ItineraryApi {
    async fn calculate(&self, request: &ItineraryRequest) -> Result<RawItinerary, ItineraryError> {
        log!("Requesting itinerary (use_bike: {})", request.use_bike);

        with_timeout(self.post(request), sleep_ms(self.timeout_ms))
            .await
            .unwrap_or(Err(ItineraryError::Timeout(self.timeout_ms)))
    }

    async fn ping(&self) -> bool {
        let request = self.client.get(&self.ping_url).send();
        match with_timeout(request, sleep_ms(self.timeout_ms)).await {
            Some(Ok(response)) => response.status().is_success(),
            Some(Err(e)) => {
                warn!("Backend ping failed: {e}");
                false
            }
            None => false,
        }
    }
}

/// Request an itinerary and normalize it for display
///
/// # Errors
///
/// Returns the transport error, or the transform error if the payload cannot
/// be interpreted
pub async fn fetch_canonical<S: ItineraryService>(
    service: &S,
    request: &ItineraryRequest,
) -> Result<CanonicalItinerary, ItineraryError> {
    let raw = service.calculate(request).await?;
    let itinerary = normalize(raw)?;

    log!(
        "Itinerary ready: {} steps, {} points",
        itinerary.steps.len(),
        itinerary.polyline.len()
    );
    Ok(itinerary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    struct FakeService {
        response: Result<&'static str, ItineraryError>,
        requests: RefCell<Vec<ItineraryRequest>>,
    }

    impl FakeService {
        fn answering(body: &'static str) -> Self {
            Self {
                response: Ok(body),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn failing(err: ItineraryError) -> Self {
            Self {
                response: Err(err),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl ItineraryService for FakeService {
        async fn calculate(&self, request: &ItineraryRequest) -> Result<RawItinerary, ItineraryError> {
            self.requests.borrow_mut().push(request.clone());
            RawItinerary::from_json(self.response.clone()?)
        }

        async fn ping(&self) -> bool {
            true
        }
    }

    fn address(label: &str, lon: f64, lat: f64) -> Address {
        Address {
            label: label.to_string(),
            city: String::new(),
            postcode: String::new(),
            coordinates: (lon, lat),
        }
    }

    #[test]
    fn test_request_body_shape() {
        let request = ItineraryRequest::between(
            &address("a", 7.26, 43.70),
            &address("b", 7.28, 43.72),
            true,
        );
        let json = serde_json::to_value(&request).expect("serializable");

        assert_eq!(
            json,
            serde_json::json!({
                "origin": {"latitude": 43.70, "longitude": 7.26},
                "destination": {"latitude": 43.72, "longitude": 7.28},
                "useBike": true
            })
        );
    }

    #[test]
    fn test_describe_error_prefers_message_field() {
        assert_eq!(
            describe_backend_error(400, r#"{"Message": "No station near origin"}"#),
            "HTTP 400: No station near origin"
        );
        assert_eq!(
            describe_backend_error(500, r#"{"error": "boom"}"#),
            "HTTP 500: boom"
        );
    }

    #[test]
    fn test_describe_error_falls_back_to_body_then_status() {
        assert_eq!(describe_backend_error(502, "Bad Gateway"), "HTTP 502: Bad Gateway");
        assert_eq!(describe_backend_error(503, "  "), "HTTP 503");

        let long = "x".repeat(500);
        let message = describe_backend_error(500, &long);
        assert!(message.ends_with('…'));
        assert!(message.chars().count() < 220);
    }

    #[test]
    fn test_fetch_canonical_normalizes_payload() {
        let service = FakeService::answering(
            r#"{
                "TotalDistance": 1000,
                "TotalDuration": 300,
                "Steps": [
                    {"Type": "walk", "Instruction": "Head north", "Distance": 400, "Duration": 120},
                    {"Type": "bike", "Instruction": "", "Distance": 600, "Duration": 180}
                ],
                "Geometry": {"coordinates": [[7.26, 43.70], [7.27, 43.71], [7.28, 43.72]]}
            }"#,
        );
        let request = ItineraryRequest::between(
            &address("a", 7.26, 43.70),
            &address("b", 7.28, 43.72),
            true,
        );

        let itinerary = block_on(fetch_canonical(&service, &request)).expect("valid itinerary");
        assert_eq!(itinerary.steps.len(), 2);
        assert_eq!(itinerary.polyline[0], (43.70, 7.26));
        assert_eq!(service.requests.borrow().len(), 1);
    }

    #[test]
    fn test_fetch_canonical_surfaces_transport_failure() {
        let service = FakeService::failing(ItineraryError::TransportFailure("HTTP 500".to_string()));
        let request = ItineraryRequest::between(
            &address("a", 0.0, 0.0),
            &address("b", 1.0, 1.0),
            false,
        );

        assert_eq!(
            block_on(fetch_canonical(&service, &request)),
            Err(ItineraryError::TransportFailure("HTTP 500".to_string()))
        );
    }

    #[test]
    fn test_fetch_canonical_rejects_unknown_step_type() {
        let service = FakeService::answering(
            r#"{
                "TotalDistance": 100,
                "TotalDuration": 60,
                "Steps": [{"Type": "teleport", "Distance": 100}],
                "Geometry": {"coordinates": [[0, 0], [1, 1]]}
            }"#,
        );
        let request = ItineraryRequest::between(
            &address("a", 0.0, 0.0),
            &address("b", 1.0, 1.0),
            false,
        );

        assert!(matches!(
            block_on(fetch_canonical(&service, &request)),
            Err(ItineraryError::UnknownStepType(_))
        ));
    }
}
