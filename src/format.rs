use crate::models::{RouteStep, StepType};

const DEFAULT_INSTRUCTION: &str = "Continue straight";

/// Distance in kilometres with two decimals, e.g. `"4.70 km"`
#[must_use]
pub fn format_distance_km(meters: f64) -> String {
    format!("{:.2} km", meters / 1000.0)
}

/// Whole minutes, rounded half away from zero
#[must_use]
pub fn duration_minutes(seconds: f64) -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    let minutes = (seconds / 60.0).round() as i64;
    minutes
}

#[must_use]
pub fn format_duration_minutes(seconds: f64) -> String {
    format!("{} minutes", duration_minutes(seconds))
}

/// Secondary line of one step: `"<m> m • <min> min"`
#[must_use]
pub fn step_detail(step: &RouteStep) -> String {
    format!(
        "{:.0} m • {} min",
        step.distance_meters,
        duration_minutes(step.duration_seconds)
    )
}

#[must_use]
pub fn instruction_or_default(step: &RouteStep) -> &str {
    let instruction = step.instruction.trim();
    if instruction.is_empty() {
        DEFAULT_INSTRUCTION
    } else {
        instruction
    }
}

/// Heading shown above the steps of leg `index`
#[must_use]
pub fn leg_title(index: usize, step_type: StepType, use_bike: bool) -> String {
    if !use_bike {
        return "On foot".to_string();
    }

    let title = match step_type {
        StepType::Bike => "By bike",
        StepType::Walk if index == 0 => "Walk to the station",
        StepType::Walk => "Walk to the destination",
    };
    format!("{}. {title}", index + 1)
}

#[must_use]
pub fn travel_mode_label(use_bike: bool) -> &'static str {
    if use_bike {
        "Bike + walk"
    } else {
        "On foot"
    }
}
