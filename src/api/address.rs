use serde::Deserialize;

use super::{sleep_ms, with_timeout};
use crate::config::ApiConfig;
use crate::constants::MIN_QUERY_CHARS;
use crate::logging::warn;
use crate::models::Address;

/// Address lookup used by the autocomplete
///
/// Implementations never fail: transport problems come back as an empty
/// list, which callers cannot tell apart from a query with no match.
#[allow(async_fn_in_trait)]
pub trait AddressSearch {
    async fn search(&self, query: &str, limit: usize) -> Vec<Address>;
}

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    properties: FeatureProperties,
    geometry: PointGeometry,
}

#[derive(Deserialize)]
struct FeatureProperties {
    label: String,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    postcode: Option<String>,
}

#[derive(Deserialize)]
struct PointGeometry {
    coordinates: (f64, f64),
}

/// Parse a `GeoJSON` search response from the address service
///
/// # Errors
///
/// Returns an error if the body is not a feature collection of points
pub fn parse_search_response(body: &str) -> Result<Vec<Address>, serde_json::Error> {
    let collection: FeatureCollection = serde_json::from_str(body)?;

    Ok(collection
        .features
        .into_iter()
        .map(|feature| Address {
            label: feature.properties.label,
            city: feature.properties.city.unwrap_or_default(),
            postcode: feature.properties.postcode.unwrap_or_default(),
            coordinates: feature.geometry.coordinates,
        })
        .collect())
}

/// Client for the national address service (api-adresse.data.gouv.fr)
pub struct AddressApi {
    client: reqwest::Client,
    url: String,
    timeout_ms: u32,
}

impl AddressApi {
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.address_search_url.clone(),
            timeout_ms: config.address_timeout_ms,
        }
    }

    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<Address>, String> {
        let limit = limit.to_string();
        let body = self
            .client
            .get(&self.url)
            .query(&[("q", query), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| format!("Request failed: {e}"))?
            .error_for_status()
            .map_err(|e| format!("HTTP error: {e}"))?
            .text()
            .await
            .map_err(|e| format!("Failed to read body: {e}"))?;

        parse_search_response(&body).map_err(|e| format!("Failed to deserialize: {e}"))
    }
}

impl AddressSearch for AddressApi {
    async fn search(&self, query: &str, limit: usize) -> Vec<Address> {
        if query.trim().chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        match with_timeout(self.fetch(query, limit), sleep_ms(self.timeout_ms)).await {
            Some(Ok(addresses)) => addresses,
            Some(Err(e)) => {
                warn!("Address search for {query:?} failed: {e}");
                Vec::new()
            }
            None => {
                warn!("Address search for {query:?} timed out after {} ms", self.timeout_ms);
                Vec::new()
            }
        }
    }
}
