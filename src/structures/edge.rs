use serde::{Deserialize, Serialize};

use crate::structures::{NodeId, Point};

/// An undirected traversable connection between two nodes.
///
/// `length` is the planar distance along `geometry` when present, else the
/// straight-line distance between the endpoints. Traversal in either
/// direction carries the same weight and the reversed geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: u32,
    pub source: NodeId,
    pub target: NodeId,
    pub length: f64,
    pub geometry: Option<Vec<Point>>,
}
