use crate::models::StepType;

/// Stroke of one route path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStyle {
    pub color: &'static str,
    pub width: f64,
    pub opacity: f64,
    /// Alternating dash/gap lengths in pixels; solid when `None`
    pub dash: Option<&'static [f64]>,
}

const WALK_DASH: &[f64] = &[10.0, 5.0];
const PATH_OPACITY: f64 = 0.7;

/// Fixed styling per travel mode: walking is thin and dashed, cycling solid
#[must_use]
pub const fn style_of(step_type: StepType) -> PathStyle {
    match step_type {
        StepType::Walk => PathStyle {
            color: "#cc1f4d",
            width: 5.0,
            opacity: PATH_OPACITY,
            dash: Some(WALK_DASH),
        },
        StepType::Bike => PathStyle {
            color: "#3120b5",
            width: 6.0,
            opacity: PATH_OPACITY,
            dash: None,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkerKind {
    Origin,
    Destination,
    OriginStation,
    DestinationStation,
}

impl MarkerKind {
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Origin => "#3498db",
            Self::Destination => "#e74c3c",
            Self::OriginStation | Self::DestinationStation => "#27ae60",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Origin => "Departure",
            Self::Destination => "Arrival",
            Self::OriginStation => "Pick-up station",
            Self::DestinationStation => "Drop-off station",
        }
    }
}
