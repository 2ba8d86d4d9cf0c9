use leptos::{component, create_node_ref, event_target_value, html, view, CollectView, IntoView, ReadSignal, SignalWith};
use leptos_use::on_click_outside;
use std::rc::Rc;
use web_sys::{KeyboardEvent, MouseEvent};

use crate::api::address::AddressApi;
use crate::autocomplete::{AutocompleteController, AutocompleteView, NavigationKey};
use crate::scheduler::BrowserTimers;

pub type AddressAutocomplete = AutocompleteController<AddressApi, BrowserTimers>;

#[component]
#[must_use]
pub fn AddressInput(
    controller: Rc<AddressAutocomplete>,
    state: ReadSignal<AutocompleteView>,
    id: &'static str,
    placeholder: &'static str,
    icon: &'static str,
) -> impl IntoView {
    let container_ref = create_node_ref::<html::Div>();

    let _ = on_click_outside(container_ref, {
        let controller = controller.clone();
        move |_| controller.on_outside_interaction()
    });

    let handle_input = {
        let controller = controller.clone();
        move |ev| controller.on_user_input(&event_target_value(&ev))
    };

    let handle_keydown = {
        let controller = controller.clone();
        move |ev: KeyboardEvent| {
            let Some(key) = NavigationKey::from_key(&ev.key()) else { return };
            if controller.on_keyboard_event(key) {
                ev.prevent_default();
            }
        }
    };

    let candidates = move || {
        state.with(|s| {
            if !s.is_open {
                return None;
            }
            let items = s
                .candidates
                .iter()
                .enumerate()
                .map(|(index, address)| {
                    let controller = controller.clone();
                    let class = if s.highlighted == Some(index) {
                        "autocomplete-item highlighted"
                    } else {
                        "autocomplete-item"
                    };
                    view! {
                        <li
                            class=class
                            // mousedown fires before the input loses focus
                            on:mousedown=move |ev: MouseEvent| {
                                ev.prevent_default();
                                controller.on_candidate_activated(index);
                            }
                        >
                            <i class="fa-solid fa-location-dot"></i>
                            <div class="autocomplete-text">
                                <strong>{address.label.clone()}</strong>
                                <small>{address.locality()}</small>
                            </div>
                        </li>
                    }
                })
                .collect_view();
            Some(view! { <ul class="autocomplete-list">{items}</ul> })
        })
    };

    view! {
        <div class="address-input" node_ref=container_ref>
            <label for=id>
                <i class=icon></i>
            </label>
            <input
                id=id
                type="text"
                autocomplete="off"
                placeholder=placeholder
                class="address-field"
                class:loading=move || state.with(|s| s.loading)
                prop:value=move || state.with(|s| s.query.clone())
                on:input=handle_input
                on:keydown=handle_keydown
            />
            {candidates}
        </div>
    }
}
