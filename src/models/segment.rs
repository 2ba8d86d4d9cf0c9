use super::{LatLon, StepType};

/// Contiguous sub-path of the route geometry attributed to one travel mode
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub segment_type: StepType,
    pub points: Vec<LatLon>,
}

impl Segment {
    /// A polyline needs at least two points
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }
}
