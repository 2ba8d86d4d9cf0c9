use leptos::{
    component, create_signal, event_target_checked, spawn_local, store_value, view, Callback,
    IntoView, ReadSignal, Signal, SignalGet, SignalGetUntracked, SignalSet, StoredValue,
};
use leptos_meta::{provide_meta_context, Stylesheet, Title};
use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use super::address_input::{AddressAutocomplete, AddressInput};
use super::map_view::{MapView, SharedMap};
use super::results_panel::ResultsPanel;
use crate::api::address::AddressApi;
use crate::api::itinerary::{fetch_canonical, ItineraryApi, ItineraryRequest, ItineraryService};
use crate::autocomplete::{AutocompleteEvent, AutocompleteView, Spawner};
use crate::config::{ApiConfig, AutocompleteConfig};
use crate::constants::RESTORE_CALCULATE_DELAY_MS;
use crate::logging::{error, log, warn};
use crate::map::{Marker, MarkerKind};
use crate::models::{Address, LastSearch};
use crate::scheduler::BrowserTimers;
use crate::storage::{LocalSearchStore, SearchStore};

const MISSING_ADDRESSES: &str = "Please select an origin and a destination";

fn place_marker(map: StoredValue<Option<SharedMap>>, kind: MarkerKind, address: &Address) {
    map.with_value(|map| {
        if let Some(map) = map {
            map.borrow_mut().set_marker(&Marker::for_address(kind, address));
        }
    });
}

fn new_autocomplete(
    config: &ApiConfig,
    spawner: &Spawner,
    kind: MarkerKind,
    map: StoredValue<Option<SharedMap>>,
) -> (Rc<AddressAutocomplete>, ReadSignal<AutocompleteView>) {
    let (state, set_state) = create_signal(AutocompleteView::default());
    let controller = Rc::new(AddressAutocomplete::new(
        AddressApi::new(config),
        BrowserTimers,
        spawner.clone(),
        AutocompleteConfig::from(config),
    ));

    controller.set_listener(move |event| match event {
        AutocompleteEvent::Changed(view) => set_state.set(view.clone()),
        AutocompleteEvent::AddressSelected(address) => place_marker(map, kind, address),
    });

    (controller, state)
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ApiConfig::default();
    let spawner: Spawner = Rc::new(|fut: Pin<Box<dyn Future<Output = ()>>>| spawn_local(fut));
    let map: StoredValue<Option<SharedMap>> = store_value(None);

    let (origin, origin_state) = new_autocomplete(&config, &spawner, MarkerKind::Origin, map);
    let (destination, destination_state) =
        new_autocomplete(&config, &spawner, MarkerKind::Destination, map);

    let (use_bike, set_use_bike) = create_signal(true);
    let (loading, set_loading) = create_signal(false);
    let (error_message, set_error_message) = create_signal(None::<String>);
    let (itinerary, set_itinerary) = create_signal(None);

    let backend = Rc::new(ItineraryApi::new(&config));
    let latest_request = Rc::new(Cell::new(0_u64));

    spawn_local({
        let backend = backend.clone();
        async move {
            if backend.ping().await {
                log!("Itinerary backend reachable");
            } else {
                warn!("Itinerary backend did not answer the ping");
            }
        }
    });

    let calculate: Rc<dyn Fn()> = {
        let origin = origin.clone();
        let destination = destination.clone();
        Rc::new(move || {
            let (Some(from), Some(to)) = (origin.selected_address(), destination.selected_address()) else {
                set_error_message.set(Some(MISSING_ADDRESSES.to_string()));
                return;
            };

            let snapshot = LastSearch {
                origin: Some(from.clone()),
                destination: Some(to.clone()),
            };
            if let Err(e) = LocalSearchStore.save_last_search(&snapshot) {
                warn!("Could not save last search: {e}");
            }

            let seq = latest_request.get() + 1;
            latest_request.set(seq);
            set_error_message.set(None);
            set_loading.set(true);

            let request = ItineraryRequest::between(&from, &to, use_bike.get_untracked());
            let backend = backend.clone();
            let latest_request = latest_request.clone();
            spawn_local(async move {
                let result = fetch_canonical(backend.as_ref(), &request).await;
                if latest_request.get() != seq {
                    log!("Discarding itinerary #{seq}, a newer request is pending");
                    return;
                }
                set_loading.set(false);

                match result {
                    Ok(itinerary) => {
                        map.with_value(|map| {
                            if let Some(map) = map {
                                map.borrow_mut().render_itinerary(&itinerary, Some(&from), Some(&to));
                            }
                        });
                        set_itinerary.set(Some(itinerary));
                    }
                    Err(e) => {
                        error!("Itinerary calculation failed: {e}");
                        map.with_value(|map| {
                            if let Some(map) = map {
                                let mut renderer = map.borrow_mut();
                                renderer.clear_paths();
                                renderer.remove_marker(MarkerKind::OriginStation);
                                renderer.remove_marker(MarkerKind::DestinationStation);
                            }
                        });
                        set_itinerary.set(None);
                        set_error_message.set(Some(e.to_string()));
                    }
                }
            });
        })
    };

    let on_map_ready = Callback::new({
        let origin = origin.clone();
        let destination = destination.clone();
        let calculate = calculate.clone();
        move |shared: SharedMap| {
            map.set_value(Some(shared));

            let Some(last) = LocalSearchStore.load_last_search() else { return };
            log!("Restoring last search");
            if let Some(address) = last.origin.clone() {
                place_marker(map, MarkerKind::Origin, &address);
                origin.restore_selection(address);
            }
            if let Some(address) = last.destination.clone() {
                place_marker(map, MarkerKind::Destination, &address);
                destination.restore_selection(address);
            }

            if last.is_complete() {
                let calculate = calculate.clone();
                gloo_timers::callback::Timeout::new(RESTORE_CALCULATE_DELAY_MS, move || calculate()).forget();
            }
        }
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/itinerary_planner.css"/>
        <Title text="Itinerary Planner"/>

        <div class="app">
            <aside class="sidebar">
                <h1><i class="fa-solid fa-route"></i>" Itinerary"</h1>

                <AddressInput
                    controller=origin
                    state=origin_state
                    id="origin"
                    placeholder="Departure address"
                    icon="fa-solid fa-circle-dot"
                />
                <AddressInput
                    controller=destination
                    state=destination_state
                    id="destination"
                    placeholder="Arrival address"
                    icon="fa-solid fa-flag-checkered"
                />

                <label class="mode-toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || use_bike.get()
                        on:change=move |ev| set_use_bike.set(event_target_checked(&ev))
                    />
                    <i class="fa-solid fa-bicycle"></i>
                    " Use a shared bike"
                </label>

                <button
                    class="calculate-button"
                    disabled=move || loading.get()
                    on:click=move |_| calculate()
                >
                    <i class="fa-solid fa-magnifying-glass-location"></i>
                    " Calculate"
                </button>

                {move || loading.get().then(|| view! {
                    <div class="loading"><i class="fa-solid fa-spinner fa-spin"></i>" Calculating…"</div>
                })}

                {move || error_message.get().map(|message| view! {
                    <div class="error-panel">
                        <i class="fa-solid fa-triangle-exclamation"></i>
                        " "{message}
                    </div>
                })}

                <ResultsPanel itinerary=Signal::from(itinerary)/>
            </aside>

            <main class="map-area">
                <MapView on_ready=on_map_ready/>
            </main>
        </div>
    }
}
