use indexmap::IndexMap;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{MapSurface, Marker, PathStyle};
use crate::constants::{DEFAULT_MAP_CENTER, DEFAULT_MAP_ZOOM, MAX_MAP_ZOOM};
use crate::geometry::{self, LatLngBounds};
use crate::models::LatLon;

const BACKGROUND_COLOR: &str = "#eef1f4";
const EMPTY_MESSAGE_COLOR: &str = "#8a94a0";
const EMPTY_MESSAGE_FONT: &str = "14px sans-serif";
const EMPTY_MESSAGE_TEXT: &str = "Choose a departure and an arrival";
const MARKER_RADIUS: f64 = 9.0;
const MARKER_BORDER_COLOR: &str = "#fff";
const MARKER_BORDER_WIDTH: f64 = 3.0;
const LABEL_FONT: &str = "12px sans-serif";
const LABEL_COLOR: &str = "#1f2933";
const LABEL_OFFSET: f64 = 14.0;
const MIN_MAP_ZOOM: f64 = 1.0;

/// Handle of one drawn layer
pub type LayerId = u64;

enum Layer {
    Path { points: Vec<LatLon>, style: PathStyle },
    Marker(Marker),
}

/// Center, zoom and pixel size of the visible map area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLon,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: DEFAULT_MAP_CENTER,
            zoom: DEFAULT_MAP_ZOOM,
            width: 0.0,
            height: 0.0,
        }
    }
}

impl Viewport {
    /// Canvas pixel position of `point`
    #[must_use]
    pub fn to_screen(&self, point: LatLon) -> (f64, f64) {
        let (x, y) = geometry::project(point, self.zoom);
        let (cx, cy) = geometry::project(self.center, self.zoom);
        (x - cx + self.width / 2.0, y - cy + self.height / 2.0)
    }

    /// Geographic position under canvas pixel `(x, y)`
    #[must_use]
    pub fn to_lat_lon(&self, (x, y): (f64, f64)) -> LatLon {
        let (cx, cy) = geometry::project(self.center, self.zoom);
        geometry::unproject(
            (cx + x - self.width / 2.0, cy + y - self.height / 2.0),
            self.zoom,
        )
    }

    /// Move the map content by a pixel delta, as when dragging
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let (cx, cy) = geometry::project(self.center, self.zoom);
        self.center = geometry::unproject((cx - dx, cy - dy), self.zoom);
    }

    /// Zoom by `delta` levels keeping the point under `anchor` fixed on screen
    pub fn zoom_at(&mut self, delta: f64, anchor: (f64, f64)) {
        let pinned = self.to_lat_lon(anchor);
        self.zoom = (self.zoom + delta).clamp(MIN_MAP_ZOOM, MAX_MAP_ZOOM);

        let (px, py) = self.to_screen(pinned);
        self.pan_by(anchor.0 - px, anchor.1 - py);
    }

    pub fn fit(&mut self, bounds: &LatLngBounds, padding_px: f64) {
        if !bounds.is_valid() {
            return;
        }
        let (center, zoom) = geometry::fit_bounds(bounds, self.width, self.height, padding_px, MAX_MAP_ZOOM);
        self.center = center;
        self.zoom = zoom.max(MIN_MAP_ZOOM);
    }
}

/// Map drawn on a 2d canvas with a Web Mercator projection and no tiles
pub struct CanvasMap {
    canvas: HtmlCanvasElement,
    viewport: Viewport,
    layers: IndexMap<LayerId, Layer>,
    next_id: LayerId,
}

impl CanvasMap {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        let mut map = Self {
            canvas,
            viewport: Viewport::default(),
            layers: IndexMap::new(),
            next_id: 0,
        };
        map.redraw();
        map
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_view(&mut self, center: LatLon, zoom: f64) {
        self.viewport.center = center;
        self.viewport.zoom = zoom.clamp(MIN_MAP_ZOOM, MAX_MAP_ZOOM);
        self.redraw();
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
        self.redraw();
    }

    pub fn zoom_by(&mut self, delta: f64, anchor: (f64, f64)) {
        self.viewport.zoom_at(delta, anchor);
        self.redraw();
    }

    /// Match the backing store to the element's layout size and repaint
    pub fn redraw(&mut self) {
        self.sync_size();
        let Some(ctx) = self.context() else { return };
        let Viewport { width, height, .. } = self.viewport;

        ctx.set_fill_style_str(BACKGROUND_COLOR);
        ctx.fill_rect(0.0, 0.0, width, height);

        if self.layers.is_empty() {
            ctx.set_fill_style_str(EMPTY_MESSAGE_COLOR);
            ctx.set_font(EMPTY_MESSAGE_FONT);
            ctx.set_text_align("center");
            let _ = ctx.fill_text(EMPTY_MESSAGE_TEXT, width / 2.0, height / 2.0);
            return;
        }

        // Paths first so markers stay on top
        for layer in self.layers.values() {
            if let Layer::Path { points, style } = layer {
                self.draw_path(&ctx, points, *style);
            }
        }
        for layer in self.layers.values() {
            if let Layer::Marker(marker) = layer {
                self.draw_marker(&ctx, marker);
            }
        }
    }

    fn sync_size(&mut self) {
        let width = self.canvas.client_width();
        let height = self.canvas.client_height();
        if width > 0 && height > 0 {
            #[allow(clippy::cast_sign_loss)]
            {
                self.canvas.set_width(width as u32);
                self.canvas.set_height(height as u32);
            }
            self.viewport.width = f64::from(width);
            self.viewport.height = f64::from(height);
        }
    }

    fn context(&self) -> Option<CanvasRenderingContext2d> {
        self.canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
    }

    fn draw_path(&self, ctx: &CanvasRenderingContext2d, points: &[LatLon], style: PathStyle) {
        let mut screen = points.iter().map(|&p| self.viewport.to_screen(p));
        let Some((x0, y0)) = screen.next() else { return };

        ctx.save();
        ctx.set_global_alpha(style.opacity);
        ctx.set_stroke_style_str(style.color);
        ctx.set_line_width(style.width);
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        let dash: js_sys::Array = style
            .dash
            .unwrap_or_default()
            .iter()
            .map(|&d| JsValue::from_f64(d))
            .collect();
        let _ = ctx.set_line_dash(&dash);

        ctx.begin_path();
        ctx.move_to(x0, y0);
        for (x, y) in screen {
            ctx.line_to(x, y);
        }
        ctx.stroke();
        ctx.restore();
    }

    fn draw_marker(&self, ctx: &CanvasRenderingContext2d, marker: &Marker) {
        let (x, y) = self.viewport.to_screen(marker.position);

        ctx.save();
        ctx.set_fill_style_str(marker.kind.color());
        ctx.set_stroke_style_str(MARKER_BORDER_COLOR);
        ctx.set_line_width(MARKER_BORDER_WIDTH);
        ctx.begin_path();
        let _ = ctx.arc(x, y, MARKER_RADIUS, 0.0, 2.0 * std::f64::consts::PI);
        ctx.fill();
        ctx.stroke();

        if !marker.label.is_empty() {
            ctx.set_fill_style_str(LABEL_COLOR);
            ctx.set_font(LABEL_FONT);
            ctx.set_text_align("left");
            let _ = ctx.fill_text(&marker.label, x + LABEL_OFFSET, y + 4.0);
        }
        ctx.restore();
    }

    fn insert(&mut self, layer: Layer) -> LayerId {
        self.next_id += 1;
        self.layers.insert(self.next_id, layer);
        self.redraw();
        self.next_id
    }
}

impl MapSurface for CanvasMap {
    type Layer = LayerId;

    fn add_path(&mut self, points: &[LatLon], style: PathStyle) -> LayerId {
        self.insert(Layer::Path {
            points: points.to_vec(),
            style,
        })
    }

    fn add_marker(&mut self, marker: &Marker) -> LayerId {
        self.insert(Layer::Marker(marker.clone()))
    }

    fn remove(&mut self, layer: LayerId) {
        if self.layers.shift_remove(&layer).is_some() {
            self.redraw();
        }
    }

    fn fit_bounds(&mut self, bounds: &LatLngBounds, padding_px: f64) {
        self.sync_size();
        self.viewport.fit(bounds, padding_px);
        self.redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            center: (43.7102, 7.2620),
            zoom: 13.0,
            width: 800.0,
            height: 600.0,
        }
    }

    #[test]
    fn test_center_maps_to_middle_of_canvas() {
        let view = viewport();
        let (x, y) = view.to_screen(view.center);
        assert!((x - 400.0).abs() < 1e-6);
        assert!((y - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_screen_roundtrip() {
        let view = viewport();
        let (lat, lon) = view.to_lat_lon(view.to_screen((43.70, 7.25)));
        assert!((lat - 43.70).abs() < 1e-9);
        assert!((lon - 7.25).abs() < 1e-9);
    }

    #[test]
    fn test_pan_moves_content_with_drag() {
        let mut view = viewport();
        let point = (43.70, 7.25);
        let (x0, y0) = view.to_screen(point);

        view.pan_by(30.0, -20.0);
        let (x1, y1) = view.to_screen(point);
        assert!((x1 - x0 - 30.0).abs() < 1e-6);
        assert!((y1 - y0 + 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed_and_clamps() {
        let mut view = viewport();
        let anchor = (200.0, 150.0);
        let pinned = view.to_lat_lon(anchor);

        view.zoom_at(1.0, anchor);
        assert_eq!(view.zoom, 14.0);
        let (x, y) = view.to_screen(pinned);
        assert!((x - anchor.0).abs() < 1e-6);
        assert!((y - anchor.1).abs() < 1e-6);

        view.zoom_at(100.0, anchor);
        assert_eq!(view.zoom, MAX_MAP_ZOOM);
    }

    #[test]
    fn test_fit_ignores_empty_bounds() {
        let mut view = viewport();
        view.fit(&LatLngBounds::new(), 50.0);
        assert_eq!(view, viewport());
    }
}
