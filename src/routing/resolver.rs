use crate::structures::{CampusMap, ManualRoute, Node, NodeId, Point, ResolvedRoute, RoutePoint};

/// One routing request between two campus nodes.
pub struct RouteQuery {
    pub start: NodeId,
    pub end: NodeId,
}

/// Resolves a route for `query` against the map snapshot, in priority
/// order: authored manual route, shortest path over the graph, straight
/// line between the node centers. Returns `None` when no strategy leaves at
/// least 2 usable points ("no route found").
///
/// Pure over its inputs; never mutates the snapshot.
pub fn resolve(map: &CampusMap, query: &RouteQuery) -> Option<ResolvedRoute> {
    let start_node = map.get_node(query.start);
    let end_node = map.get_node(query.end);

    // First matching manual route wins, in collection order. A matched
    // entry with unusable geometry still bypasses graph search.
    if let Some(manual) = map
        .manual_routes()
        .iter()
        .find(|r| r.matches(query.start, query.end))
    {
        if let Some(route) = from_manual(manual, query, start_node, end_node) {
            return Some(route);
        }
        return straight_line(start_node, end_node);
    }

    if !map.graph().is_empty() {
        if let Some(route) = from_graph(map, query, start_node, end_node) {
            return Some(route);
        }
    }

    straight_line(start_node, end_node)
}

/// Emits the authored geometry, reversed when the pair matched in the
/// opposite orientation. The length is recomputed from the emitted points
/// rather than read from the stored value, so it always agrees with the
/// geometry.
fn from_manual(
    manual: &ManualRoute,
    query: &RouteQuery,
    start_node: Option<&Node>,
    end_node: Option<&Node>,
) -> Option<ResolvedRoute> {
    let mut geometry: Vec<Point> = manual
        .geometry
        .iter()
        .filter(|p| p.is_finite())
        .copied()
        .collect();
    if manual.start == query.end {
        geometry.reverse();
    }
    if geometry.len() < 2 {
        return None;
    }

    Some(ResolvedRoute {
        length: polyline_length(&geometry),
        points: tag_endpoints(geometry, start_node, end_node),
    })
}

/// Runs the shortest-path search and stitches the polyline hop by hop:
/// edge geometry when present (reversed for backward traversal, first point
/// dropped past the first segment to avoid duplicating the shared joint),
/// else a straight two-point span between the node centers.
fn from_graph(
    map: &CampusMap,
    query: &RouteQuery,
    start_node: Option<&Node>,
    end_node: Option<&Node>,
) -> Option<ResolvedRoute> {
    let found = map.graph().shortest_path(query.start, query.end)?;
    if found.path.len() < 2 {
        return None;
    }

    let mut seq = Vec::<Point>::new();
    for hop in found.path.windows(2) {
        let (from, to) = (hop[0], hop[1]);

        let geometry = map.graph().edge_between(from, to).and_then(|edge| {
            edge.geometry.as_ref().map(|g| {
                if edge.source == from {
                    g.clone()
                } else {
                    g.iter().rev().copied().collect()
                }
            })
        });

        match geometry {
            Some(coords) if !coords.is_empty() => {
                if seq.is_empty() {
                    seq.extend(coords);
                } else {
                    seq.extend(coords.into_iter().skip(1));
                }
            }
            _ => {
                if let (Some(fn_node), Some(tn_node)) = (map.get_node(from), map.get_node(to)) {
                    seq.push(fn_node.loc());
                    seq.push(tn_node.loc());
                }
            }
        }
    }

    seq.retain(|p| p.is_finite());
    if seq.len() < 2 {
        return None;
    }

    // Length is the search distance, not re-derived from the stitched
    // geometry; the two may differ slightly when a straight hop was used.
    Some(ResolvedRoute {
        length: found.distance,
        points: tag_endpoints(seq, start_node, end_node),
    })
}

fn straight_line(start_node: Option<&Node>, end_node: Option<&Node>) -> Option<ResolvedRoute> {
    let (start, end) = match (start_node, end_node) {
        (Some(s), Some(e)) => (s, e),
        _ => return None,
    };

    Some(ResolvedRoute {
        points: vec![
            RoutePoint::at_place(start.x, start.y, start.id),
            RoutePoint::at_place(end.x, end.y, end.id),
        ],
        length: start.loc().dist(end.loc()),
    })
}

fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].dist(w[1])).sum()
}

/// Wraps raw points as route points, carrying the resolved node ids on the
/// first and last point only.
fn tag_endpoints(
    points: Vec<Point>,
    start_node: Option<&Node>,
    end_node: Option<&Node>,
) -> Vec<RoutePoint> {
    let last = points.len() - 1;
    points
        .into_iter()
        .enumerate()
        .map(|(idx, p)| {
            let place_id = if idx == 0 {
                start_node.map(|n| n.id)
            } else if idx == last {
                end_node.map(|n| n.id)
            } else {
                None
            };
            RoutePoint {
                x: p.x,
                y: p.y,
                place_id,
            }
        })
        .collect()
}
