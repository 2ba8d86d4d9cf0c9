/// Quiet period before a keystroke burst turns into an address search
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Queries shorter than this (in characters) never reach the address service
pub const MIN_QUERY_CHARS: usize = 3;

/// Number of candidates requested from the address service
pub const ADDRESS_RESULT_LIMIT: usize = 5;

pub const ADDRESS_SEARCH_URL: &str = "https://api-adresse.data.gouv.fr/search/";

/// Itinerary backend, overridable at build time with `ITINERARY_API_URL`
pub const DEFAULT_BACKEND_URL: &str = match option_env!("ITINERARY_API_URL") {
    Some(url) => url,
    None => "http://localhost:8080",
};

pub const ITINERARY_ENDPOINT: &str = "/api/itinerary";
pub const PING_ENDPOINT: &str = "/api/ping";

pub const ADDRESS_SEARCH_TIMEOUT_MS: u32 = 5_000;
pub const ITINERARY_TIMEOUT_MS: u32 = 20_000;

/// localStorage key holding the last submitted origin/destination pair
pub const LAST_SEARCH_STORAGE_KEY: &str = "itinerary";

/// Delay before a restored search is recalculated on page load
pub const RESTORE_CALCULATE_DELAY_MS: u32 = 500;

/// Initial map view (Nice)
pub const DEFAULT_MAP_CENTER: (f64, f64) = (43.7102, 7.2620);
pub const DEFAULT_MAP_ZOOM: f64 = 13.0;
pub const MAX_MAP_ZOOM: f64 = 19.0;

/// Screen padding kept around the route when fitting the viewport
pub const FIT_PADDING_PX: f64 = 50.0;
