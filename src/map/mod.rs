pub mod canvas;
pub mod style;

pub use canvas::CanvasMap;
pub use style::{style_of, MarkerKind, PathStyle};

use std::collections::BTreeMap;

use crate::constants::FIT_PADDING_PX;
use crate::geometry::LatLngBounds;
use crate::logging::warn;
use crate::models::{Address, CanonicalItinerary, LatLon, Segment};
use crate::segmentation::segments_for_display;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: LatLon,
    pub label: String,
}

impl Marker {
    #[must_use]
    pub fn for_address(kind: MarkerKind, address: &Address) -> Self {
        Self {
            kind,
            position: address.lat_lon(),
            label: address.label.clone(),
        }
    }
}

/// Drawing primitives of a map widget
///
/// Every `add_*` returns a layer handle that stays on screen until passed back
/// to `remove`.
pub trait MapSurface {
    type Layer;

    fn add_path(&mut self, points: &[LatLon], style: PathStyle) -> Self::Layer;
    fn add_marker(&mut self, marker: &Marker) -> Self::Layer;
    fn remove(&mut self, layer: Self::Layer);
    fn fit_bounds(&mut self, bounds: &LatLngBounds, padding_px: f64);
}

struct DrawnPath<L> {
    bounds: LatLngBounds,
    layer: L,
}

struct DrawnMarker<L> {
    position: LatLon,
    layer: L,
}

/// Owns every layer it adds to the surface and removes them before redrawing
pub struct MapRenderer<S: MapSurface> {
    surface: S,
    paths: Vec<DrawnPath<S::Layer>>,
    markers: BTreeMap<MarkerKind, DrawnMarker<S::Layer>>,
}

impl<S: MapSurface> MapRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            paths: Vec::new(),
            markers: BTreeMap::new(),
        }
    }

    /// Replace everything on the map with `segments` and the given markers,
    /// then fit the view to them
    pub fn render(
        &mut self,
        segments: &[Segment],
        origin: Option<&Marker>,
        destination: Option<&Marker>,
    ) {
        self.draw(segments, origin.into_iter().chain(destination));
    }

    /// Draw a computed itinerary with its endpoints and bike-share stations
    pub fn render_itinerary(
        &mut self,
        itinerary: &CanonicalItinerary,
        origin: Option<&Address>,
        destination: Option<&Address>,
    ) {
        let mut markers = Vec::with_capacity(4);
        markers.extend(origin.map(|a| Marker::for_address(MarkerKind::Origin, a)));
        markers.extend(destination.map(|a| Marker::for_address(MarkerKind::Destination, a)));

        if let Some(stations) = &itinerary.stations {
            markers.push(Marker {
                kind: MarkerKind::OriginStation,
                position: stations.origin.lat_lon(),
                label: stations.origin.name.clone(),
            });
            markers.push(Marker {
                kind: MarkerKind::DestinationStation,
                position: stations.destination.lat_lon(),
                label: stations.destination.name.clone(),
            });
        }

        self.draw(&segments_for_display(itinerary), markers.iter());
    }

    /// Place or move one marker, keeping everything else
    pub fn set_marker(&mut self, marker: &Marker) {
        if let Some(old) = self.markers.remove(&marker.kind) {
            self.surface.remove(old.layer);
        }
        let layer = self.surface.add_marker(marker);
        self.markers.insert(
            marker.kind,
            DrawnMarker {
                position: marker.position,
                layer,
            },
        );
        self.fit_view();
    }

    pub fn clear_paths(&mut self) {
        for path in self.paths.drain(..) {
            self.surface.remove(path.layer);
        }
    }

    /// Take one marker off the map, if present
    pub fn remove_marker(&mut self, kind: MarkerKind) {
        if let Some(old) = self.markers.remove(&kind) {
            self.surface.remove(old.layer);
        }
    }

    pub fn clear_all(&mut self) {
        self.clear_paths();
        for (_, marker) in std::mem::take(&mut self.markers) {
            self.surface.remove(marker.layer);
        }
    }

    /// Fit the viewport to every drawn marker and path
    pub fn fit_view(&mut self) {
        let mut bounds = LatLngBounds::new();
        for marker in self.markers.values() {
            bounds.extend(marker.position);
        }
        for path in &self.paths {
            bounds.extend_bounds(&path.bounds);
        }

        if bounds.is_valid() {
            self.surface.fit_bounds(&bounds, FIT_PADDING_PX);
        }
    }

    #[must_use]
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn draw<'a>(&mut self, segments: &[Segment], markers: impl IntoIterator<Item = &'a Marker>) {
        self.clear_all();

        for marker in markers {
            let layer = self.surface.add_marker(marker);
            if let Some(old) = self.markers.insert(
                marker.kind,
                DrawnMarker {
                    position: marker.position,
                    layer,
                },
            ) {
                self.surface.remove(old.layer);
            }
        }

        for segment in segments {
            if !segment.is_drawable() {
                warn!("Ignoring {:?} segment with {} point(s)", segment.segment_type, segment.points.len());
                continue;
            }
            let layer = self.surface.add_path(&segment.points, style_of(segment.segment_type));
            self.paths.push(DrawnPath {
                bounds: LatLngBounds::from_points(&segment.points),
                layer,
            });
        }

        self.fit_view();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BikeStation, RouteStep, StationPair, StepType};
    use std::collections::BTreeSet;

    /// Surface that records which layers are alive
    #[derive(Default)]
    struct RecordingSurface {
        next: usize,
        live_paths: BTreeSet<usize>,
        live_markers: BTreeSet<usize>,
        path_styles: Vec<PathStyle>,
        fits: Vec<LatLngBounds>,
    }

    impl MapSurface for RecordingSurface {
        type Layer = usize;

        fn add_path(&mut self, points: &[LatLon], style: PathStyle) -> usize {
            assert!(points.len() >= 2, "short path reached the surface");
            self.next += 1;
            self.live_paths.insert(self.next);
            self.path_styles.push(style);
            self.next
        }

        fn add_marker(&mut self, _marker: &Marker) -> usize {
            self.next += 1;
            self.live_markers.insert(self.next);
            self.next
        }

        fn remove(&mut self, layer: usize) {
            assert!(
                self.live_paths.remove(&layer) || self.live_markers.remove(&layer),
                "removed a layer twice"
            );
        }

        fn fit_bounds(&mut self, bounds: &LatLngBounds, _padding_px: f64) {
            self.fits.push(*bounds);
        }
    }

    fn segment(segment_type: StepType, points: &[LatLon]) -> Segment {
        Segment {
            segment_type,
            points: points.to_vec(),
        }
    }

    fn marker(kind: MarkerKind, position: LatLon) -> Marker {
        Marker {
            kind,
            position,
            label: format!("{kind:?}"),
        }
    }

    #[test]
    fn test_render_twice_leaves_one_copy() {
        let segments = vec![
            segment(StepType::Walk, &[(43.70, 7.25), (43.71, 7.26)]),
            segment(StepType::Bike, &[(43.71, 7.26), (43.72, 7.27), (43.73, 7.28)]),
        ];
        let origin = marker(MarkerKind::Origin, (43.70, 7.25));
        let destination = marker(MarkerKind::Destination, (43.73, 7.28));
        let mut renderer = MapRenderer::new(RecordingSurface::default());

        renderer.render(&segments, Some(&origin), Some(&destination));
        renderer.render(&segments, Some(&origin), Some(&destination));

        assert_eq!(renderer.surface().live_paths.len(), 2);
        assert_eq!(renderer.surface().live_markers.len(), 2);
        assert_eq!(renderer.path_count(), 2);
        assert_eq!(renderer.marker_count(), 2);
    }

    #[test]
    fn test_render_styles_by_segment_type() {
        let segments = vec![
            segment(StepType::Walk, &[(0.0, 0.0), (0.0, 1.0)]),
            segment(StepType::Bike, &[(0.0, 1.0), (0.0, 2.0)]),
        ];
        let mut renderer = MapRenderer::new(RecordingSurface::default());
        renderer.render(&segments, None, None);

        assert_eq!(
            renderer.surface().path_styles,
            vec![style_of(StepType::Walk), style_of(StepType::Bike)]
        );
    }

    #[test]
    fn test_short_segments_never_reach_surface() {
        let segments = vec![
            segment(StepType::Walk, &[(0.0, 0.0)]),
            segment(StepType::Bike, &[(0.0, 0.0), (1.0, 1.0)]),
        ];
        let mut renderer = MapRenderer::new(RecordingSurface::default());
        renderer.render(&segments, None, None);

        assert_eq!(renderer.surface().live_paths.len(), 1);
    }

    #[test]
    fn test_fit_covers_markers_and_paths() {
        let segments = vec![segment(StepType::Bike, &[(43.0, 7.0), (44.0, 8.0)])];
        let origin = marker(MarkerKind::Origin, (42.5, 6.5));
        let mut renderer = MapRenderer::new(RecordingSurface::default());
        renderer.render(&segments, Some(&origin), None);

        let fit = *renderer.surface().fits.last().expect("viewport was fitted");
        assert_eq!(fit.south_west(), (42.5, 6.5));
        assert_eq!(fit.north_east(), (44.0, 8.0));
    }

    #[test]
    fn test_empty_render_clears_without_fitting() {
        let segments = vec![segment(StepType::Walk, &[(0.0, 0.0), (1.0, 1.0)])];
        let mut renderer = MapRenderer::new(RecordingSurface::default());
        renderer.render(&segments, None, None);
        let fits = renderer.surface().fits.len();

        renderer.render(&[], None, None);
        assert!(renderer.surface().live_paths.is_empty());
        assert_eq!(renderer.surface().fits.len(), fits);
    }

    #[test]
    fn test_set_marker_replaces_same_kind() {
        let mut renderer = MapRenderer::new(RecordingSurface::default());
        renderer.set_marker(&marker(MarkerKind::Origin, (1.0, 1.0)));
        renderer.set_marker(&marker(MarkerKind::Origin, (2.0, 2.0)));
        renderer.set_marker(&marker(MarkerKind::Destination, (3.0, 3.0)));

        assert_eq!(renderer.surface().live_markers.len(), 2);
        renderer.clear_all();
        assert!(renderer.surface().live_markers.is_empty());
    }

    #[test]
    fn test_clear_paths_keeps_markers() {
        let segments = vec![segment(StepType::Walk, &[(0.0, 0.0), (1.0, 1.0)])];
        let origin = marker(MarkerKind::Origin, (0.0, 0.0));
        let mut renderer = MapRenderer::new(RecordingSurface::default());
        renderer.render(&segments, Some(&origin), None);

        renderer.clear_paths();
        assert!(renderer.surface().live_paths.is_empty());
        assert_eq!(renderer.surface().live_markers.len(), 1);
    }

    fn itinerary_with_stations() -> CanonicalItinerary {
        let station = |name: &str, lat: f64| BikeStation {
            name: name.to_string(),
            lat,
            lon: 7.27,
            available_bikes: 2,
            bike_stands: 10,
        };
        CanonicalItinerary {
            total_distance_meters: 1000.0,
            total_duration_seconds: 300.0,
            steps: vec![RouteStep {
                step_type: StepType::Bike,
                instruction: String::new(),
                distance_meters: 1000.0,
                duration_seconds: 300.0,
            }],
            polyline: vec![(43.70, 7.26), (43.71, 7.27), (43.72, 7.28)],
            use_bike: true,
            stations: Some(StationPair {
                origin: station("Massena", 43.70),
                destination: station("Garibaldi", 43.72),
            }),
            recommendation: None,
        }
    }

    fn address(label: &str, coordinates: (f64, f64)) -> Address {
        Address {
            label: label.to_string(),
            city: "Nice".to_string(),
            postcode: "06000".to_string(),
            coordinates,
        }
    }

    #[test]
    fn test_render_itinerary_adds_station_markers() {
        let itinerary = itinerary_with_stations();
        let origin = address("Place Massena", (7.26, 43.70));

        let mut renderer = MapRenderer::new(RecordingSurface::default());
        renderer.render_itinerary(&itinerary, Some(&origin), None);
        renderer.render_itinerary(&itinerary, Some(&origin), None);

        assert_eq!(renderer.marker_count(), 3);
        assert_eq!(renderer.surface().live_markers.len(), 3);
        assert_eq!(renderer.surface().live_paths.len(), 1);
    }

    #[test]
    fn test_failed_recalculation_leaves_only_address_markers() {
        let origin = address("Place Massena", (7.26, 43.70));
        let destination = address("Place Garibaldi", (7.28, 43.72));

        let mut renderer = MapRenderer::new(RecordingSurface::default());
        renderer.render_itinerary(&itinerary_with_stations(), Some(&origin), Some(&destination));
        assert_eq!(renderer.marker_count(), 4);

        renderer.clear_paths();
        renderer.remove_marker(MarkerKind::OriginStation);
        renderer.remove_marker(MarkerKind::DestinationStation);
        renderer.remove_marker(MarkerKind::DestinationStation);

        assert_eq!(renderer.path_count(), 0);
        assert_eq!(renderer.marker_count(), 2);
        assert!(renderer.surface().live_paths.is_empty());
        assert_eq!(renderer.surface().live_markers.len(), 2);
    }
}
