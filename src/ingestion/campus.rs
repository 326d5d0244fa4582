//! Loaders for the static campus collections: nodes, edges and manually
//! authored routes.
//!
//! Manual routes come in two historical encodings: a GeoJSON-style `geom`
//! wrapper and a flat `path` coordinate array. A non-empty `geom` wins,
//! `path` is the fallback.

use std::fs;

use serde::Deserialize;

use crate::structures::{Edge, ManualRoute, Node, NodeId, Point};

#[derive(Debug, Deserialize)]
struct RawGeom {
    geometry: RawGeometry,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct RawEdge {
    id: u32,
    source: u32,
    target: u32,
    length: f64,
    geom: Option<RawGeom>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    id: u32,
    start: u32,
    end: u32,
    geom: Option<RawGeom>,
    path: Option<Vec<[f64; 2]>>,
    #[serde(default)]
    length: f64,
}

fn to_points(coordinates: Vec<[f64; 2]>) -> Vec<Point> {
    coordinates
        .into_iter()
        .map(|[x, y]| Point::new(x, y))
        .collect()
}

pub fn parse_nodes(content: &str) -> Result<Vec<Node>, String> {
    serde_json::from_str(content).map_err(|e| format!("Failed to parse nodes: {e}"))
}

pub fn parse_edges(content: &str) -> Result<Vec<Edge>, String> {
    let raw: Vec<RawEdge> =
        serde_json::from_str(content).map_err(|e| format!("Failed to parse edges: {e}"))?;

    Ok(raw
        .into_iter()
        .map(|e| Edge {
            id: e.id,
            source: NodeId(e.source),
            target: NodeId(e.target),
            length: e.length,
            geometry: e.geom.map(|g| to_points(g.geometry.coordinates)),
        })
        .collect())
}

pub fn parse_manual_routes(content: &str) -> Result<Vec<ManualRoute>, String> {
    let raw: Vec<RawRoute> =
        serde_json::from_str(content).map_err(|e| format!("Failed to parse routes: {e}"))?;

    Ok(raw
        .into_iter()
        .map(|r| {
            let geometry = match r.geom {
                Some(g) if !g.geometry.coordinates.is_empty() => to_points(g.geometry.coordinates),
                _ => to_points(r.path.unwrap_or_default()),
            };
            ManualRoute {
                id: r.id,
                start: NodeId(r.start),
                end: NodeId(r.end),
                geometry,
                length: r.length,
            }
        })
        .collect())
}

pub fn load_nodes(path: &str) -> Result<Vec<Node>, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read {path}: {e}"))?;
    parse_nodes(&content)
}

pub fn load_edges(path: &str) -> Result<Vec<Edge>, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read {path}: {e}"))?;
    parse_edges(&content)
}

pub fn load_manual_routes(path: &str) -> Result<Vec<ManualRoute>, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read {path}: {e}"))?;
    parse_manual_routes(&content)
}
