//! Split the whole-trip polyline into per-mode segments.
//!
//! The backend sends one geometry for the trip and distance metadata per step.
//! Each step gets a share of the polyline points proportional to its share of
//! the total distance, walking the steps in order with a cursor.

use crate::logging::{log, warn};
use crate::models::{CanonicalItinerary, Segment, StepType};

/// Minimum number of points a step claims from the polyline
const MIN_POINTS_PER_STEP: usize = 2;

/// Partition the itinerary polyline by step
///
/// Steps whose slice ends up shorter than two points (the polyline ran out)
/// produce no segment, so the output can be shorter than `steps`. A zero total
/// distance yields no segments.
#[must_use]
pub fn segment(itinerary: &CanonicalItinerary) -> Vec<Segment> {
    let polyline = &itinerary.polyline;
    let total = itinerary.total_distance_meters;

    if !(total.is_finite() && total > 0.0) {
        log!("Skipping segmentation: total distance is {}", total);
        return Vec::new();
    }

    #[allow(clippy::cast_precision_loss)]
    let point_count = polyline.len() as f64;
    let mut cursor = 0;
    let mut segments = Vec::with_capacity(itinerary.steps.len());

    for (i, step) in itinerary.steps.iter().enumerate() {
        let share = (step.distance_meters / total).max(0.0);
        // Rounded share of a finite point count, never negative
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let claimed = (point_count * share).round() as usize;
        let points_in_step = claimed.max(MIN_POINTS_PER_STEP);

        let end = (cursor + points_in_step).min(polyline.len());
        let points = polyline[cursor..end].to_vec();
        cursor = end;

        if points.len() < MIN_POINTS_PER_STEP {
            warn!(
                "Step {} ({:?}) dropped: only {} point(s) left",
                i + 1,
                step.step_type,
                points.len()
            );
            continue;
        }

        log!(
            "Step {}/{}: {:?} - {} points",
            i + 1,
            itinerary.steps.len(),
            step.step_type,
            points.len()
        );
        segments.push(Segment {
            segment_type: step.step_type,
            points,
        });
    }

    segments
}

/// Segments to draw for an itinerary
///
/// A walk-only itinerary, or one without steps, is drawn as a single walking
/// path over the whole polyline.
#[must_use]
pub fn segments_for_display(itinerary: &CanonicalItinerary) -> Vec<Segment> {
    if itinerary.steps.is_empty() || !itinerary.use_bike {
        let whole = Segment {
            segment_type: StepType::Walk,
            points: itinerary.polyline.clone(),
        };
        return if whole.is_drawable() { vec![whole] } else { Vec::new() };
    }

    segment(itinerary)
}
