use leptos::{component, view, CollectView, IntoView, Signal, SignalWith};

use crate::format::{
    format_distance_km, format_duration_minutes, instruction_or_default, leg_title, step_detail,
    travel_mode_label,
};
use crate::models::{BikeStation, CanonicalItinerary, RouteStep, StepType};

fn step_item(step: &RouteStep) -> impl IntoView {
    let icon_class = match step.step_type {
        StepType::Walk => "step-icon walk",
        StepType::Bike => "step-icon bike",
    };

    view! {
        <div class="step-item">
            <div class=icon_class>
                <i class={step.step_type.icon()}></i>
            </div>
            <div class="step-content">
                <p>{instruction_or_default(step).to_string()}</p>
                <small>{step_detail(step)}</small>
            </div>
        </div>
    }
}

fn station_card(title: &'static str, station: &BikeStation) -> impl IntoView {
    view! {
        <div class="station-card">
            <h4>{title}</h4>
            <p>{station.name.clone()}</p>
            <div class="bikes-info">
                <span><i class="fa-solid fa-bicycle"></i>" "{station.available_bikes}" bikes"</span>
                <span><i class="fa-solid fa-square-parking"></i>" "{station.free_stands()}" stands"</span>
            </div>
        </div>
    }
}

fn itinerary_details(itinerary: &CanonicalItinerary) -> impl IntoView {
    let mode_icon = if itinerary.use_bike { "fa-solid fa-bicycle" } else { "fa-solid fa-person-walking" };

    let walking = !itinerary.use_bike;
    let recommendation = itinerary.recommendation.clone().map(|text| {
        view! {
            <div class="recommendation" class:walking=walking>
                <p><i class="fa-solid fa-lightbulb"></i>" "{text}</p>
            </div>
        }
    });

    let stations = itinerary.stations.as_ref().map(|pair| {
        view! {
            <div class="stations">
                <h4><i class="fa-solid fa-bicycle"></i>" Bike stations"</h4>
                {station_card("Pick-up station", &pair.origin)}
                {station_card("Drop-off station", &pair.destination)}
            </div>
        }
    });

    let legs = itinerary
        .legs()
        .into_iter()
        .enumerate()
        .map(|(index, (step_type, steps))| {
            view! {
                <h5 class="leg-title">{leg_title(index, step_type, itinerary.use_bike)}</h5>
                {steps.iter().map(step_item).collect_view()}
            }
        })
        .collect_view();

    view! {
        <div class="summary">
            <div class="summary-item">
                <i class="fa-solid fa-route"></i>
                <div>
                    <strong>"Distance: "</strong>
                    <span>{format_distance_km(itinerary.total_distance_meters)}</span>
                </div>
            </div>
            <div class="summary-item">
                <i class="fa-solid fa-clock"></i>
                <div>
                    <strong>"Duration: "</strong>
                    <span>{format_duration_minutes(itinerary.total_duration_seconds)}</span>
                </div>
            </div>
            <div class="summary-item">
                <i class=mode_icon></i>
                <div>
                    <strong>"Mode: "</strong>
                    <span>{travel_mode_label(itinerary.use_bike)}</span>
                </div>
            </div>
            {recommendation}
        </div>
        {stations}
        <div class="steps">{legs}</div>
    }
}

#[component]
#[must_use]
pub fn ResultsPanel(itinerary: Signal<Option<CanonicalItinerary>>) -> impl IntoView {
    view! {
        <div class="results">
            {move || itinerary.with(|it| it.as_ref().map(itinerary_details))}
        </div>
    }
}
