use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::structures::Point;

/// Stable identifier of a campus node, taken verbatim from the static map
/// data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return self.0.fmt(f);
    }
}

/// A named point of interest with fixed planar coordinates. Immutable at
/// runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub name: String,
}

impl Node {
    pub fn loc(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
