use criterion::{black_box, criterion_group, criterion_main, Criterion};
use itinerary_planner::api::raw::RawItinerary;
use itinerary_planner::segmentation::segment;
use itinerary_planner::transform::normalize;
use serde_json::{json, Value};

const POINTS_PER_LEG: usize = 1500;
const STEPS_PER_LEG: usize = 40;

fn leg(start_lat: f64, distance: f64) -> Value {
    let coordinates: Vec<Value> = (0..POINTS_PER_LEG)
        .map(|i| json!([7.20 + i as f64 * 0.00001, start_lat + i as f64 * 0.00001]))
        .collect();
    let steps: Vec<Value> = (0..STEPS_PER_LEG)
        .map(|i| json!({"instruction": format!("Step {i}"), "distance": distance / STEPS_PER_LEG as f64, "duration": 30.0}))
        .collect();

    json!({
        "routes": [{
            "summary": {"distance": distance, "duration": distance / 4.0},
            "geometry": {"coordinates": coordinates},
            "segments": [{"steps": steps}]
        }]
    })
}

/// Three-leg bike trip roughly the size of a long cross-town ride
fn bike_payload() -> String {
    json!({
        "UseBike": true,
        "Itinerary": {
            "OriginToStation": leg(43.690, 400.0),
            "StationToStation": leg(43.705, 5200.0),
            "StationToDestination": leg(43.720, 300.0)
        }
    })
    .to_string()
}

fn benchmark_itinerary_pipeline(c: &mut Criterion) {
    let body = bike_payload();
    let itinerary = normalize(RawItinerary::from_json(&body).expect("valid payload")).expect("normalizable");

    // Decode + normalize
    c.bench_function("normalize_nested", |b| {
        b.iter(|| normalize(RawItinerary::from_json(black_box(&body)).expect("valid payload")));
    });

    c.bench_function("segment", |b| {
        b.iter(|| segment(black_box(&itinerary)));
    });

    // What runs on every calculation response
    c.bench_function("full_pipeline", |b| {
        b.iter(|| {
            let raw = RawItinerary::from_json(black_box(&body)).expect("valid payload");
            normalize(raw).map(|itinerary| segment(&itinerary))
        });
    });
}

criterion_group!(benches, benchmark_itinerary_pipeline);
criterion_main!(benches);
