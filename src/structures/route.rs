use serde::{Deserialize, Serialize};

use crate::structures::{NodeId, Point};

/// An authored override polyline for a specific node pair, bypassing graph
/// search. Matches a requested (start, end) pair in either orientation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualRoute {
    pub id: u32,
    pub start: NodeId,
    pub end: NodeId,
    pub geometry: Vec<Point>,
    pub length: f64,
}

impl ManualRoute {
    pub fn matches(&self, a: NodeId, b: NodeId) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }
}

/// One vertex of a resolved route. Only the first and last point of a route
/// carry a `place_id`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutePoint {
    pub x: f64,
    pub y: f64,
    pub place_id: Option<NodeId>,
}

impl RoutePoint {
    pub fn new(x: f64, y: f64) -> RoutePoint {
        RoutePoint {
            x,
            y,
            place_id: None,
        }
    }

    pub fn at_place(x: f64, y: f64, place_id: NodeId) -> RoutePoint {
        RoutePoint {
            x,
            y,
            place_id: Some(place_id),
        }
    }
}

/// The final ordered point sequence plus length chosen for a start/end
/// request. Always holds at least 2 points; `length` is a unit-agnostic
/// scalar in the same unit as edge lengths.
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    pub points: Vec<RoutePoint>,
    pub length: f64,
}

/// One entry of the traversal narrative for a resolved route.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionStep {
    pub id: &'static str,
    pub title: String,
    pub detail: String,
    pub distance: f64,
}

/// Transient playback sample emitted on every animator tick. Never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub x: f64,
    pub y: f64,
    pub heading_degrees: f64,
    pub progress: f64,
}
