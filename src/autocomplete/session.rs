use crate::models::Address;

/// Keys the candidate list reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

impl NavigationKey {
    /// Map a `KeyboardEvent.key` value
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" => Some(Self::ArrowDown),
            "ArrowUp" => Some(Self::ArrowUp),
            "Enter" => Some(Self::Enter),
            "Escape" => Some(Self::Escape),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    Highlighted(usize),
    Committed(Address),
    Closed,
    Ignored,
}

/// Identity of one issued address search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
}

/// Render-ready copy of the session
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AutocompleteView {
    pub query: String,
    pub candidates: Vec<Address>,
    pub highlighted: Option<usize>,
    pub is_open: bool,
    pub loading: bool,
}

/// Per-input autocomplete state
///
/// Searches are numbered in issue order. Only the most recently issued search
/// may populate the candidate list; anything older is stale, whatever order
/// the responses arrive in.
#[derive(Debug, Default)]
pub struct AutocompleteSession {
    query: String,
    candidates: Vec<Address>,
    highlighted: Option<usize>,
    is_open: bool,
    loading: bool,
    latest_seq: u64,
    selected: Option<Address>,
}

impl AutocompleteSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, text: &str) {
        self.query = text.to_string();
    }

    /// Start a search for `query`, superseding any search still in flight
    pub fn begin_search(&mut self, query: String) -> SearchTicket {
        self.latest_seq += 1;
        self.loading = true;
        SearchTicket {
            seq: self.latest_seq,
            query,
        }
    }

    #[must_use]
    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        ticket.seq == self.latest_seq
    }

    /// Apply a search result; returns false when the ticket is stale
    pub fn complete_search(&mut self, ticket: &SearchTicket, candidates: Vec<Address>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        self.loading = false;
        self.highlighted = None;
        self.is_open = !candidates.is_empty();
        self.candidates = candidates;
        true
    }

    /// Close the list and forget candidates; in-flight searches become stale
    pub fn dismiss(&mut self) {
        self.latest_seq += 1;
        self.loading = false;
        self.is_open = false;
        self.highlighted = None;
        self.candidates.clear();
    }

    pub fn navigate(&mut self, key: NavigationKey) -> KeyOutcome {
        match key {
            NavigationKey::Escape => {
                let was_open = self.is_open;
                self.dismiss();
                if was_open { KeyOutcome::Closed } else { KeyOutcome::Ignored }
            }
            NavigationKey::ArrowDown | NavigationKey::ArrowUp => {
                let len = self.candidates.len();
                if !self.is_open || len == 0 {
                    return KeyOutcome::Ignored;
                }

                let next = match (key, self.highlighted) {
                    (NavigationKey::ArrowDown, None) => 0,
                    (NavigationKey::ArrowDown, Some(i)) => (i + 1) % len,
                    (_, None | Some(0)) => len - 1,
                    (_, Some(i)) => (i - 1).min(len - 1),
                };
                self.highlighted = Some(next);
                KeyOutcome::Highlighted(next)
            }
            NavigationKey::Enter => {
                let Some(index) = self.highlighted.filter(|_| self.is_open) else {
                    return KeyOutcome::Ignored;
                };
                self.activate(index)
                    .map_or(KeyOutcome::Ignored, KeyOutcome::Committed)
            }
        }
    }

    /// Commit the candidate at `index` as the selection
    pub fn activate(&mut self, index: usize) -> Option<Address> {
        let address = self.candidates.get(index)?.clone();
        self.query.clone_from(&address.label);
        self.selected = Some(address.clone());
        self.dismiss();
        Some(address)
    }

    /// Put back a previously committed address without a search
    pub fn restore(&mut self, address: Address) {
        self.dismiss();
        self.query.clone_from(&address.label);
        self.selected = Some(address);
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Address> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn view(&self) -> AutocompleteView {
        AutocompleteView {
            query: self.query.clone(),
            candidates: self.candidates.clone(),
            highlighted: self.highlighted,
            is_open: self.is_open,
            loading: self.loading,
        }
    }
}
