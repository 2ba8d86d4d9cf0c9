use crate::constants::LAST_SEARCH_STORAGE_KEY;
use crate::logging::warn;
use crate::models::LastSearch;

/// Persistence of the last submitted search
pub trait SearchStore {
    /// The stored snapshot, `None` when absent or unreadable
    fn load_last_search(&self) -> Option<LastSearch>;

    /// Overwrite the stored snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend is unavailable or rejects the write
    fn save_last_search(&self, search: &LastSearch) -> Result<(), String>;
}

/// Decode a stored snapshot, dropping it when it no longer parses
#[must_use]
pub fn parse_last_search(json: &str) -> Option<LastSearch> {
    match serde_json::from_str(json) {
        Ok(search) => Some(search),
        Err(e) => {
            warn!("Discarding unreadable last search: {e}");
            None
        }
    }
}

/// `window.localStorage` under a single key
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSearchStore;

impl LocalSearchStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl SearchStore for LocalSearchStore {
    fn load_last_search(&self) -> Option<LastSearch> {
        let storage = Self::storage()?;
        let json = storage.get_item(LAST_SEARCH_STORAGE_KEY).ok()??;
        parse_last_search(&json)
    }

    fn save_last_search(&self, search: &LastSearch) -> Result<(), String> {
        let storage = Self::storage().ok_or("localStorage unavailable")?;
        let json = serde_json::to_string(search).map_err(|e| format!("Failed to serialize: {e}"))?;

        storage
            .set_item(LAST_SEARCH_STORAGE_KEY, &json)
            .map_err(|e| format!("Failed to write localStorage: {e:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Address;

    #[test]
    fn test_parse_stored_snapshot() {
        let json = r#"{
            "origin": {"label": "Place Massena", "city": "Nice", "postcode": "06000", "coordinates": [7.27, 43.69]},
            "destination": null
        }"#;
        let search = parse_last_search(json).expect("valid snapshot");

        assert_eq!(search.origin.map(|a| a.label), Some("Place Massena".to_string()));
        assert!(search.destination.is_none());
    }

    #[test]
    fn test_snapshot_survives_serialization() {
        let address = Address {
            label: "Gare de Nice-Ville".to_string(),
            city: "Nice".to_string(),
            postcode: "06000".to_string(),
            coordinates: (7.262, 43.704),
        };
        let search = LastSearch {
            origin: Some(address.clone()),
            destination: Some(address),
        };

        let json = serde_json::to_string(&search).expect("serializable");
        assert_eq!(parse_last_search(&json), Some(search));
    }

    #[test]
    fn test_unreadable_snapshot_is_dropped() {
        assert_eq!(parse_last_search("{\"origin\": 12"), None);
        assert_eq!(parse_last_search("[]"), None);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::models::Address;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_save_and_load_last_search() {
        let store = LocalSearchStore;
        let search = LastSearch {
            origin: Some(Address {
                label: "Promenade des Anglais".to_string(),
                city: "Nice".to_string(),
                postcode: "06200".to_string(),
                coordinates: (7.24, 43.69),
            }),
            destination: None,
        };

        store.save_last_search(&search).unwrap();
        assert_eq!(store.load_last_search(), Some(search));
    }

    #[wasm_bindgen_test]
    fn test_corrupt_entry_loads_as_none() {
        let storage = LocalSearchStore::storage().unwrap();
        storage.set_item(LAST_SEARCH_STORAGE_KEY, "not json").unwrap();

        assert_eq!(LocalSearchStore.load_last_search(), None);
    }
}
