use crate::constants::{
    ADDRESS_RESULT_LIMIT, ADDRESS_SEARCH_TIMEOUT_MS, ADDRESS_SEARCH_URL, DEFAULT_BACKEND_URL,
    ITINERARY_ENDPOINT, ITINERARY_TIMEOUT_MS, MIN_QUERY_CHARS, PING_ENDPOINT, SEARCH_DEBOUNCE_MS,
};

/// Endpoints and timeouts handed to the HTTP clients at construction
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub address_search_url: String,
    pub backend_url: String,
    pub address_result_limit: usize,
    pub address_timeout_ms: u32,
    pub itinerary_timeout_ms: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            address_search_url: ADDRESS_SEARCH_URL.to_string(),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            address_result_limit: ADDRESS_RESULT_LIMIT,
            address_timeout_ms: ADDRESS_SEARCH_TIMEOUT_MS,
            itinerary_timeout_ms: ITINERARY_TIMEOUT_MS,
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub fn itinerary_url(&self) -> String {
        format!("{}{ITINERARY_ENDPOINT}", self.backend_url.trim_end_matches('/'))
    }

    #[must_use]
    pub fn ping_url(&self) -> String {
        format!("{}{PING_ENDPOINT}", self.backend_url.trim_end_matches('/'))
    }
}

/// Behavior knobs of one autocomplete field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutocompleteConfig {
    pub debounce_ms: u32,
    pub min_query_chars: usize,
    pub result_limit: usize,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            debounce_ms: SEARCH_DEBOUNCE_MS,
            min_query_chars: MIN_QUERY_CHARS,
            result_limit: ADDRESS_RESULT_LIMIT,
        }
    }
}

impl From<&ApiConfig> for AutocompleteConfig {
    fn from(api: &ApiConfig) -> Self {
        Self {
            result_limit: api.address_result_limit,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls_join_without_double_slash() {
        let config = ApiConfig {
            backend_url: "http://backend.local/".to_string(),
            ..ApiConfig::default()
        };
        assert_eq!(config.itinerary_url(), "http://backend.local/api/itinerary");
        assert_eq!(config.ping_url(), "http://backend.local/api/ping");
    }

    #[test]
    fn test_autocomplete_defaults() {
        let config = AutocompleteConfig::default();
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.min_query_chars, 3);
        assert_eq!(config.result_limit, 5);
    }
}
