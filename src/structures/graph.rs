use std::{
    cmp::Reverse,
    collections::{HashMap, HashSet},
};

use priority_queue::PriorityQueue;
use serde::{Deserialize, Serialize};

use crate::structures::{Edge, NodeId};

/// One directed half of an undirected edge, as seen from a node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Neighbor {
    pub to: NodeId,
    pub weight: f64,
}

/// Shortest-path search result: the node-id path from start to goal and the
/// summed edge weight.
#[derive(Debug, Clone)]
pub struct ShortestPath {
    pub path: Vec<NodeId>,
    pub distance: f64,
}

#[derive(Debug, PartialEq)]
struct SearchPriority {
    weight: f64,
    seq: u64,
}

impl Eq for SearchPriority {}

impl Ord for SearchPriority {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for SearchPriority {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Derived adjacency and edge lookup over a flat edge list.
///
/// Rebuilt wholesale from the latest edge collection whenever the edge set
/// changes; never patched incrementally.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Graph {
    edges: Vec<Edge>,
    adjacency: HashMap<NodeId, Vec<Neighbor>>,
    edge_lookup: HashMap<(NodeId, NodeId), usize>,
}

impl Graph {
    /// Builds the adjacency and the bidirectional edge lookup. Pure; edges
    /// referencing unknown nodes are accepted structurally.
    pub fn build(edges: Vec<Edge>) -> Graph {
        let mut adjacency = HashMap::<NodeId, Vec<Neighbor>>::new();
        let mut edge_lookup = HashMap::<(NodeId, NodeId), usize>::new();

        for (idx, edge) in edges.iter().enumerate() {
            adjacency.entry(edge.source).or_default().push(Neighbor {
                to: edge.target,
                weight: edge.length,
            });
            adjacency.entry(edge.target).or_default().push(Neighbor {
                to: edge.source,
                weight: edge.length,
            });

            edge_lookup.insert((edge.source, edge.target), idx);
            edge_lookup.insert((edge.target, edge.source), idx);
        }

        Graph {
            edges,
            adjacency,
            edge_lookup,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn neighbors(&self, id: NodeId) -> &[Neighbor] {
        match self.adjacency.get(&id) {
            Some(neighbors) => neighbors,
            None => &[],
        }
    }

    /// Recovers the owning edge for a directed traversal step, in either
    /// direction.
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.edge_lookup
            .get(&(from, to))
            .and_then(|idx| self.edges.get(*idx))
    }

    /// Dijkstra from `a` to `b`. Ties between equal tentative distances are
    /// broken by discovery order, so identical inputs always expand in the
    /// same order. Returns `None` when the frontier is exhausted before the
    /// goal is reached; unreachable goals are not an error.
    pub fn shortest_path(&self, a: NodeId, b: NodeId) -> Option<ShortestPath> {
        let mut pq = PriorityQueue::<NodeId, Reverse<SearchPriority>>::new();
        let mut dist = HashMap::<NodeId, f64>::new();
        let mut origins = HashMap::<NodeId, NodeId>::new();
        let mut visited = HashSet::<NodeId>::new();
        let mut seq = 0u64;

        dist.insert(a, 0.0);
        pq.push(a, Reverse(SearchPriority { weight: 0.0, seq }));

        while let Some((id, p)) = pq.pop() {
            if id == b {
                return Some(ShortestPath {
                    path: Graph::reconstruct_path(&origins, a, b),
                    distance: p.0.weight,
                });
            }
            visited.insert(id);

            for neighbor in self.neighbors(id) {
                if visited.contains(&neighbor.to) {
                    continue;
                }
                let weight = p.0.weight + neighbor.weight;
                let improved = match dist.get(&neighbor.to) {
                    Some(current) => weight < *current,
                    None => true,
                };
                if !improved {
                    continue;
                }

                dist.insert(neighbor.to, weight);
                origins.insert(neighbor.to, id);
                seq += 1;
                match pq.get_priority(&neighbor.to) {
                    Some(_) => {
                        pq.change_priority(&neighbor.to, Reverse(SearchPriority { weight, seq }));
                    }
                    None => {
                        pq.push(neighbor.to, Reverse(SearchPriority { weight, seq }));
                    }
                }
            }
        }

        tracing::debug!("No path from {a} to {b}, frontier exhausted");
        None
    }

    fn reconstruct_path(origins: &HashMap<NodeId, NodeId>, start: NodeId, goal: NodeId) -> Vec<NodeId> {
        let mut path = vec![goal];
        let mut current = goal;

        while current != start {
            match origins.get(&current) {
                Some(prev) => {
                    path.push(*prev);
                    current = *prev;
                }
                None => break,
            }
        }

        path.reverse();
        return path;
    }
}
