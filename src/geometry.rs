use crate::models::LatLon;

/// Side of a map tile in pixels at zoom 0
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the Web Mercator projection
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Geographic bounding box, empty until the first point is added
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    south: f64,
    west: f64,
    north: f64,
    east: f64,
}

impl Default for LatLngBounds {
    fn default() -> Self {
        Self {
            south: f64::INFINITY,
            west: f64::INFINITY,
            north: f64::NEG_INFINITY,
            east: f64::NEG_INFINITY,
        }
    }
}

impl LatLngBounds {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds covering every point of `points`
    #[must_use]
    pub fn from_points(points: &[LatLon]) -> Self {
        let mut bounds = Self::new();
        for &point in points {
            bounds.extend(point);
        }
        bounds
    }

    pub fn extend(&mut self, (lat, lon): LatLon) {
        self.south = self.south.min(lat);
        self.north = self.north.max(lat);
        self.west = self.west.min(lon);
        self.east = self.east.max(lon);
    }

    pub fn extend_bounds(&mut self, other: &Self) {
        if other.is_valid() {
            self.extend((other.south, other.west));
            self.extend((other.north, other.east));
        }
    }

    /// False until at least one point has been added
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.south <= self.north && self.west <= self.east
    }

    #[must_use]
    pub fn south_west(&self) -> LatLon {
        (self.south, self.west)
    }

    #[must_use]
    pub fn north_east(&self) -> LatLon {
        (self.north, self.east)
    }
}

/// Web Mercator world pixel coordinates of `point` at `zoom`
#[must_use]
pub fn project((lat, lon): LatLon, zoom: f64) -> (f64, f64) {
    let scale = TILE_SIZE * zoom.exp2();
    let lat_rad = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();

    let x = (lon + 180.0) / 360.0 * scale;
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0 * scale;
    (x, y)
}

/// Inverse of [`project`]
#[must_use]
pub fn unproject((x, y): (f64, f64), zoom: f64) -> LatLon {
    let scale = TILE_SIZE * zoom.exp2();

    let lon = x / scale * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * y / scale);
    let lat = n.sinh().atan().to_degrees();
    (lat, lon)
}

/// Center and whole-number zoom showing `bounds` inside a `width` x `height`
/// viewport with `padding` pixels kept clear on every side
#[must_use]
pub fn fit_bounds(
    bounds: &LatLngBounds,
    width: f64,
    height: f64,
    padding: f64,
    max_zoom: f64,
) -> (LatLon, f64) {
    let (min_x, max_y) = project(bounds.south_west(), 0.0);
    let (max_x, min_y) = project(bounds.north_east(), 0.0);

    let center = unproject(((min_x + max_x) / 2.0, (min_y + max_y) / 2.0), 0.0);

    let span_x = max_x - min_x;
    let span_y = max_y - min_y;
    let avail_x = (width - 2.0 * padding).max(1.0);
    let avail_y = (height - 2.0 * padding).max(1.0);

    let zoom = if span_x <= f64::EPSILON && span_y <= f64::EPSILON {
        max_zoom
    } else {
        let scale_x = if span_x > 0.0 { avail_x / span_x } else { f64::INFINITY };
        let scale_y = if span_y > 0.0 { avail_y / span_y } else { f64::INFINITY };
        scale_x.min(scale_y).log2().floor().clamp(0.0, max_zoom)
    };

    (center, zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bounds_are_invalid() {
        assert!(!LatLngBounds::new().is_valid());
        assert!(!LatLngBounds::from_points(&[]).is_valid());
    }

    #[test]
    fn test_bounds_cover_points() {
        let bounds = LatLngBounds::from_points(&[(43.7, 7.3), (43.6, 7.2), (43.65, 7.25)]);
        assert!(bounds.is_valid());
        assert_eq!(bounds.south_west(), (43.6, 7.2));
        assert_eq!(bounds.north_east(), (43.7, 7.3));
    }

    #[test]
    fn test_extend_bounds_ignores_empty() {
        let mut bounds = LatLngBounds::from_points(&[(1.0, 1.0)]);
        bounds.extend_bounds(&LatLngBounds::new());
        assert_eq!(bounds, LatLngBounds::from_points(&[(1.0, 1.0)]));

        bounds.extend_bounds(&LatLngBounds::from_points(&[(2.0, -1.0)]));
        assert_eq!(bounds.south_west(), (1.0, -1.0));
        assert_eq!(bounds.north_east(), (2.0, 1.0));
    }

    #[test]
    fn test_project_origin_is_world_center() {
        let (x, y) = project((0.0, 0.0), 0.0);
        assert!((x - 128.0).abs() < 1e-9);
        assert!((y - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_roundtrip() {
        let point = (43.7102, 7.2620);
        let (lat, lon) = unproject(project(point, 13.0), 13.0);
        assert!((lat - point.0).abs() < 1e-9);
        assert!((lon - point.1).abs() < 1e-9);
    }

    #[test]
    fn test_fit_single_point_uses_max_zoom() {
        let bounds = LatLngBounds::from_points(&[(43.7, 7.26)]);
        let ((lat, lon), zoom) = fit_bounds(&bounds, 800.0, 600.0, 50.0, 19.0);
        assert_eq!(zoom, 19.0);
        assert!((lat - 43.7).abs() < 1e-9);
        assert!((lon - 7.26).abs() < 1e-9);
    }

    #[test]
    fn test_fit_keeps_route_inside_padded_viewport() {
        let bounds = LatLngBounds::from_points(&[(43.69, 7.24), (43.72, 7.29)]);
        let (center, zoom) = fit_bounds(&bounds, 800.0, 600.0, 50.0, 19.0);

        let (cx, cy) = project(center, zoom);
        for corner in [bounds.south_west(), bounds.north_east()] {
            let (x, y) = project(corner, zoom);
            assert!((x - cx).abs() <= 350.0 + 1e-6);
            assert!((y - cy).abs() <= 250.0 + 1e-6);
        }

        // One level closer no longer fits
        let (x0, _) = project(bounds.south_west(), zoom + 1.0);
        let (x1, _) = project(bounds.north_east(), zoom + 1.0);
        let (_, y0) = project(bounds.north_east(), zoom + 1.0);
        let (_, y1) = project(bounds.south_west(), zoom + 1.0);
        assert!(x1 - x0 > 700.0 || y1 - y0 > 500.0);
    }
}
