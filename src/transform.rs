use crate::api::raw::{
    FlatItinerary, NestedItinerary, NestedRoute, RawGeometry, RawItinerary, RawStation,
    RouteCollection,
};
use crate::error::ItineraryError;
use crate::models::{BikeStation, CanonicalItinerary, LatLon, RouteStep, StationPair, StepType};

/// Map any backend payload onto the canonical itinerary
///
/// # Errors
///
/// - `MalformedResponse` when totals, steps or geometry are missing, negative
///   or not finite, or the geometry has fewer than two points
/// - `UnknownStepType` when a step's mode label is neither walk nor bike
pub fn normalize(raw: RawItinerary) -> Result<CanonicalItinerary, ItineraryError> {
    match raw {
        RawItinerary::Flat(flat) => normalize_flat(flat),
        RawItinerary::Nested(nested) => normalize_nested(nested),
        RawItinerary::Envelope(payload) => {
            let inner = match payload {
                serde_json::Value::String(body) => RawItinerary::from_json(&body)?,
                other => RawItinerary::from_value(other)?,
            };
            normalize(inner)
        }
    }
}

fn normalize_flat(flat: FlatItinerary) -> Result<CanonicalItinerary, ItineraryError> {
    let steps = flat
        .steps
        .into_iter()
        .map(|step| {
            Ok(RouteStep {
                step_type: StepType::from_label(&step.mode)?,
                instruction: step.instruction.unwrap_or_default(),
                distance_meters: non_negative("step distance", step.distance)?,
                duration_seconds: non_negative("step duration", step.duration)?,
            })
        })
        .collect::<Result<Vec<_>, ItineraryError>>()?;

    Ok(CanonicalItinerary {
        total_distance_meters: non_negative("total distance", flat.total_distance)?,
        total_duration_seconds: non_negative("total duration", flat.total_duration)?,
        steps,
        polyline: polyline(&flat.geometry)?,
        use_bike: flat.use_bike,
        stations: stations(flat.closest_origin_station, flat.closest_destination_station),
        recommendation: flat.preferred_option.filter(|s| !s.trim().is_empty()),
    })
}

fn normalize_nested(nested: NestedItinerary) -> Result<CanonicalItinerary, ItineraryError> {
    let legs = nested.itinerary;

    let typed_legs: Vec<(StepType, RouteCollection)> = match (
        legs.origin_to_station,
        legs.station_to_station,
        legs.station_to_destination,
        legs.routes,
    ) {
        (Some(to_station), Some(ride), Some(to_destination), _) => vec![
            (StepType::Walk, to_station),
            (StepType::Bike, ride),
            (StepType::Walk, to_destination),
        ],
        (None, None, None, Some(routes)) => vec![(StepType::Walk, RouteCollection { routes })],
        _ => {
            return Err(ItineraryError::MalformedResponse(
                "itinerary needs either routes or all three bike-share legs".to_string(),
            ))
        }
    };

    let mut total_distance = 0.0;
    let mut total_duration = 0.0;
    let mut steps = Vec::new();
    let mut points: Vec<LatLon> = Vec::new();

    for (step_type, collection) in typed_legs {
        let route = first_route(collection)?;
        total_distance += non_negative("leg distance", route.summary.distance)?;
        total_duration += non_negative("leg duration", route.summary.duration)?;

        for step in route.segments.into_iter().flat_map(|s| s.steps) {
            steps.push(RouteStep {
                step_type,
                instruction: step.instruction.unwrap_or_default(),
                distance_meters: non_negative("step distance", step.distance)?,
                duration_seconds: non_negative("step duration", step.duration)?,
            });
        }

        for point in coordinates(&route.geometry)? {
            // Consecutive legs share their junction point
            if points.last() != Some(&point) {
                points.push(point);
            }
        }
    }

    if points.len() < 2 {
        return Err(ItineraryError::MalformedResponse(format!(
            "route geometry has {} point(s), need at least 2",
            points.len()
        )));
    }

    Ok(CanonicalItinerary {
        total_distance_meters: total_distance,
        total_duration_seconds: total_duration,
        steps,
        polyline: points,
        use_bike: nested.use_bike,
        stations: stations(nested.closest_origin_station, nested.closest_destination_station),
        recommendation: nested.preferred_option.filter(|s| !s.trim().is_empty()),
    })
}

fn first_route(collection: RouteCollection) -> Result<NestedRoute, ItineraryError> {
    collection
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| ItineraryError::MalformedResponse("empty routes array".to_string()))
}

fn non_negative(field: &str, value: f64) -> Result<f64, ItineraryError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ItineraryError::MalformedResponse(format!(
            "{field} must be a non-negative number, got {value}"
        )))
    }
}

/// `[lon, lat, ..]` pairs to `(lat, lon)`
fn coordinates(geometry: &RawGeometry) -> Result<Vec<LatLon>, ItineraryError> {
    geometry
        .coordinates
        .iter()
        .map(|pair| match pair.as_slice() {
            [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Ok((*lat, *lon)),
            _ => Err(ItineraryError::MalformedResponse(format!(
                "invalid coordinate {pair:?}"
            ))),
        })
        .collect()
}

fn polyline(geometry: &RawGeometry) -> Result<Vec<LatLon>, ItineraryError> {
    let points = coordinates(geometry)?;
    if points.len() < 2 {
        return Err(ItineraryError::MalformedResponse(format!(
            "route geometry has {} point(s), need at least 2",
            points.len()
        )));
    }
    Ok(points)
}

fn stations(origin: Option<RawStation>, destination: Option<RawStation>) -> Option<StationPair> {
    let convert = |raw: RawStation| BikeStation {
        name: raw.name,
        lat: raw.latitude,
        lon: raw.longitude,
        available_bikes: raw.available_bikes,
        bike_stands: raw.bike_stands,
    };

    Some(StationPair {
        origin: convert(origin?),
        destination: convert(destination?),
    })
}
