//! Address autocomplete for one text input.
//!
//! The controller owns an [`AutocompleteSession`] and feeds it from three
//! sources: keystrokes (debounced into searches), address search responses,
//! and keyboard/mouse selection. Observers get an [`AutocompleteEvent`] after
//! every change.

mod session;

pub use session::{AutocompleteSession, AutocompleteView, KeyOutcome, NavigationKey, SearchTicket};

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use crate::api::address::AddressSearch;
use crate::config::AutocompleteConfig;
use crate::logging::log;
use crate::models::Address;
use crate::scheduler::{Debouncer, TimerHost};

/// Hands a search future to the event loop
pub type Spawner = Rc<dyn Fn(Pin<Box<dyn Future<Output = ()>>>)>;

#[derive(Debug, Clone, PartialEq)]
pub enum AutocompleteEvent {
    Changed(AutocompleteView),
    AddressSelected(Address),
}

type Listener = Rc<dyn Fn(&AutocompleteEvent)>;

struct Shared<S> {
    session: RefCell<AutocompleteSession>,
    search: S,
    config: AutocompleteConfig,
    spawn: Spawner,
    listener: RefCell<Option<Listener>>,
}

impl<S: AddressSearch + 'static> Shared<S> {
    fn notify(&self, event: &AutocompleteEvent) {
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener(event);
        }
    }

    fn notify_changed(&self) {
        let view = self.session.borrow().view();
        self.notify(&AutocompleteEvent::Changed(view));
    }

    fn start_search(self: &Rc<Self>, query: String) {
        let ticket = self.session.borrow_mut().begin_search(query);
        log!("Address search #{} issued for {:?}", ticket.seq, ticket.query);
        self.notify_changed();

        let shared = Rc::clone(self);
        (self.spawn)(Box::pin(async move {
            let candidates = shared
                .search
                .search(&ticket.query, shared.config.result_limit)
                .await;
            shared.finish_search(&ticket, candidates);
        }));
    }

    fn finish_search(&self, ticket: &SearchTicket, candidates: Vec<Address>) {
        let count = candidates.len();
        let applied = self.session.borrow_mut().complete_search(ticket, candidates);

        if applied {
            log!("Address search #{} returned {} candidates", ticket.seq, count);
            self.notify_changed();
        } else {
            log!("Discarding stale address search #{} ({:?})", ticket.seq, ticket.query);
        }
    }
}

/// Autocomplete controller for one address input
pub struct AutocompleteController<S: AddressSearch + 'static, H: TimerHost> {
    shared: Rc<Shared<S>>,
    debouncer: Debouncer<String, H>,
}

impl<S: AddressSearch + 'static, H: TimerHost> AutocompleteController<S, H> {
    pub fn new(search: S, timers: H, spawn: Spawner, config: AutocompleteConfig) -> Self {
        let shared = Rc::new(Shared {
            session: RefCell::new(AutocompleteSession::new()),
            search,
            config,
            spawn,
            listener: RefCell::new(None),
        });

        let debounced = Rc::clone(&shared);
        let debouncer = Debouncer::new(timers, config.debounce_ms, move |query: String| {
            debounced.start_search(query);
        });

        Self { shared, debouncer }
    }

    /// Register the observer of state changes and selections
    pub fn set_listener(&self, listener: impl Fn(&AutocompleteEvent) + 'static) {
        *self.shared.listener.borrow_mut() = Some(Rc::new(listener));
    }

    pub fn on_user_input(&self, text: &str) {
        self.shared.session.borrow_mut().set_query(text);

        if text.trim().chars().count() < self.shared.config.min_query_chars {
            self.debouncer.cancel();
            self.shared.session.borrow_mut().dismiss();
        } else {
            self.debouncer.trigger(text.to_string());
        }

        self.shared.notify_changed();
    }

    /// Returns true when the key was consumed and its default action should be suppressed
    pub fn on_keyboard_event(&self, key: NavigationKey) -> bool {
        if key == NavigationKey::Escape {
            self.debouncer.cancel();
        }

        let outcome = self.shared.session.borrow_mut().navigate(key);
        match outcome {
            KeyOutcome::Ignored => {
                // Escape on a closed list may still have dropped a search in flight
                if key == NavigationKey::Escape {
                    self.shared.notify_changed();
                }
                false
            }
            KeyOutcome::Highlighted(_) | KeyOutcome::Closed => {
                self.shared.notify_changed();
                true
            }
            KeyOutcome::Committed(address) => {
                self.committed(address);
                true
            }
        }
    }

    /// Commit the candidate at `index` (mouse click or keyboard Enter)
    pub fn on_candidate_activated(&self, index: usize) -> Option<Address> {
        let address = self.shared.session.borrow_mut().activate(index)?;
        self.committed(address.clone());
        Some(address)
    }

    pub fn on_outside_interaction(&self) {
        self.debouncer.cancel();
        self.shared.session.borrow_mut().dismiss();
        self.shared.notify_changed();
    }

    /// Put back an address from a saved search; no selection event is emitted
    pub fn restore_selection(&self, address: Address) {
        self.debouncer.cancel();
        self.shared.session.borrow_mut().restore(address);
        self.shared.notify_changed();
    }

    /// Last committed address, kept while the user edits the text
    #[must_use]
    pub fn selected_address(&self) -> Option<Address> {
        self.shared.session.borrow().selected().cloned()
    }

    #[must_use]
    pub fn view(&self) -> AutocompleteView {
        self.shared.session.borrow().view()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.shared.session.borrow().is_loading()
    }

    fn committed(&self, address: Address) {
        self.debouncer.cancel();
        log!("Address selected: {}", address.label);
        self.shared.notify_changed();
        self.shared.notify(&AutocompleteEvent::AddressSelected(address));
    }
}
