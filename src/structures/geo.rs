use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A point on the campus plane, in map units.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// Slice form used by the kdtree nearest-neighbour queries.
    pub fn distance(loc1: &[f64], loc2: &[f64]) -> f64 {
        assert!(loc1.len() == 2);
        assert!(loc2.len() == 2);
        let dx = loc1[0] - loc2[0];
        let dy = loc1[1] - loc2[1];

        return dx.hypot(dy);
    }

    pub fn dist(&self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
