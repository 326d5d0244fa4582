use crate::structures::{CampusMap, DirectionStep, ResolvedRoute};

/// Fixed conversion between map units and metres for the narrative text.
pub const METERS_PER_UNIT: f64 = 0.5;

/// Converts a resolved route into the three-step traversal narrative:
/// start, one aggregate continue step carrying the converted distance, and
/// arrival. Deliberately coarse; the route is a single polyline, not a turn
/// sequence.
///
/// Returns an empty sequence for routes with fewer than 2 points.
pub fn synthesize(route: &ResolvedRoute, map: &CampusMap) -> Vec<DirectionStep> {
    if route.points.len() < 2 {
        return Vec::new();
    }

    let start = &route.points[0];
    let end = &route.points[route.points.len() - 1];
    let start_place = start.place_id.and_then(|id| map.get_node(id));
    let end_place = end.place_id.and_then(|id| map.get_node(id));

    let approx_meters = (route.length * METERS_PER_UNIT).round();

    vec![
        DirectionStep {
            id: "start",
            title: match start_place {
                Some(place) => format!("Start at {}", place.name),
                None => "Start".to_string(),
            },
            detail: "Head towards your destination.".to_string(),
            distance: 0.0,
        },
        DirectionStep {
            id: "continue",
            title: "Continue straight".to_string(),
            detail: format!("Walk for about {approx_meters} meters."),
            distance: approx_meters,
        },
        DirectionStep {
            id: "end",
            title: match end_place {
                Some(place) => format!("Arrive at {}", place.name),
                None => "Destination".to_string(),
            },
            detail: "You have reached your destination.".to_string(),
            distance: 0.0,
        },
    ]
}
