use leptos::{component, create_node_ref, html, request_animation_frame, store_value, view, Callable, Callback, IntoView, StoredValue};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{MouseEvent, WheelEvent};

use crate::map::{CanvasMap, MapRenderer};

pub type SharedMap = Rc<RefCell<MapRenderer<CanvasMap>>>;

const WHEEL_ZOOM_STEP: f64 = 0.5;

fn with_map(map: StoredValue<Option<SharedMap>>, f: impl FnOnce(&mut MapRenderer<CanvasMap>)) {
    map.with_value(|map| {
        if let Some(map) = map {
            f(&mut map.borrow_mut());
        }
    });
}

/// Canvas map filling its container; hands the renderer out once mounted
#[component]
#[must_use]
pub fn MapView(on_ready: Callback<SharedMap>) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();
    let map: StoredValue<Option<SharedMap>> = store_value(None);
    let drag_origin: StoredValue<Option<(f64, f64)>> = store_value(None);

    canvas_ref.on_load(move |canvas| {
        let element: &web_sys::HtmlCanvasElement = &canvas;
        let shared: SharedMap = Rc::new(RefCell::new(MapRenderer::new(CanvasMap::new(element.clone()))));
        map.set_value(Some(shared.clone()));

        // Layout size is only known after the element is attached
        request_animation_frame(move || {
            shared.borrow_mut().surface_mut().redraw();
            on_ready.call(shared);
        });
    });

    let _ = leptos::leptos_dom::helpers::window_event_listener(leptos::ev::resize, move |_| {
        with_map(map, |m| m.surface_mut().redraw());
    });

    let handle_mouse_down = move |ev: MouseEvent| {
        drag_origin.set_value(Some((f64::from(ev.client_x()), f64::from(ev.client_y()))));
    };

    let handle_mouse_move = move |ev: MouseEvent| {
        let Some((last_x, last_y)) = drag_origin.get_value() else { return };
        let (x, y) = (f64::from(ev.client_x()), f64::from(ev.client_y()));
        drag_origin.set_value(Some((x, y)));
        with_map(map, |m| m.surface_mut().pan_by(x - last_x, y - last_y));
    };

    let end_drag = move |_: MouseEvent| drag_origin.set_value(None);

    let handle_wheel = move |ev: WheelEvent| {
        ev.prevent_default();
        let delta = if ev.delta_y() < 0.0 { WHEEL_ZOOM_STEP } else { -WHEEL_ZOOM_STEP };
        let anchor = (f64::from(ev.offset_x()), f64::from(ev.offset_y()));
        with_map(map, |m| m.surface_mut().zoom_by(delta, anchor));
    };

    view! {
        <div class="map-container">
            <canvas
                node_ref=canvas_ref
                class="map-canvas"
                on:mousedown=handle_mouse_down
                on:mousemove=handle_mouse_move
                on:mouseup=end_drag
                on:mouseleave=end_drag
                on:wheel=handle_wheel
            />
        </div>
    }
}
