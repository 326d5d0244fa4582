use std::collections::HashMap;

use kdtree::KdTree;
use serde::{Deserialize, Serialize};

use crate::structures::{Edge, Graph, ManualRoute, Node, NodeId, Point};

/// Immutable snapshot of the campus: nodes by id, authored manual routes and
/// the graph index derived from the edge list.
///
/// Rebuilt wholesale via [`CampusMap::build`] whenever any input collection
/// changes. Route resolution treats the snapshot as read-only for the
/// duration of one call.
#[derive(Serialize, Deserialize)]
pub struct CampusMap {
    nodes: HashMap<NodeId, Node>,
    manual_routes: Vec<ManualRoute>,
    graph: Graph,
    nodes_tree: KdTree<f64, NodeId, [f64; 2]>,
}

impl CampusMap {
    pub fn build(nodes: Vec<Node>, edges: Vec<Edge>, manual_routes: Vec<ManualRoute>) -> CampusMap {
        let mut nodes_tree = KdTree::new(2);
        let mut by_id = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let _ = nodes_tree.add([node.x, node.y], node.id);
            by_id.insert(node.id, node);
        }

        CampusMap {
            nodes: by_id,
            manual_routes,
            graph: Graph::build(edges),
            nodes_tree,
        }
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn manual_routes(&self) -> &[ManualRoute] {
        &self.manual_routes
    }

    /// Snaps a map position to the closest node, for click handling in the
    /// presentation layer.
    pub fn nearest_node(&self, x: f64, y: f64) -> Option<(f64, NodeId)> {
        match self.nodes_tree.iter_nearest(&[x, y], &Point::distance) {
            Ok(mut it) => it.next().map(|(dist, id)| (dist, *id)),
            Err(_) => {
                tracing::warn!("Failed to find a close node");
                None
            }
        }
    }
}
