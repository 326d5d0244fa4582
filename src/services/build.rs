use std::time::SystemTime;

use tracing::{error, info};

use crate::{
    ingestion::{
        cache::resolve_path,
        campus::{load_edges, load_manual_routes, load_nodes},
    },
    structures::{BuildConfig, CampusMap, Edge, ManualRoute, MapInput, Node},
};

/// Loads every configured input and assembles the immutable map snapshot.
/// Returns `None` when any input cannot be resolved or parsed.
pub fn build_map(config: &BuildConfig) -> Option<CampusMap> {
    let mut nodes = Vec::<Node>::new();
    let mut edges = Vec::<Edge>::new();
    let mut manual_routes = Vec::<ManualRoute>::new();

    for input in &config.inputs {
        info!("Loading '{}'...", input.label());
        let before = SystemTime::now();

        let path = match resolve_path(input) {
            Ok(p) => p,
            Err(e) => {
                error!("Failed to resolve '{}': {e}", input.label());
                return None;
            }
        };

        let result = match input {
            MapInput::Nodes(_) => load_nodes(&path).map(|n| nodes = n),
            MapInput::Edges(_) => load_edges(&path).map(|e| edges = e),
            MapInput::Routes(_) => load_manual_routes(&path).map(|r| manual_routes = r),
        };

        match result {
            Ok(_) => {
                if let Ok(elapsed) = before.elapsed() {
                    info!("Loaded '{}' in {}ms", input.label(), elapsed.as_millis());
                }
            }
            Err(e) => {
                error!("Failed to ingest '{}': {e}", input.label());
                return None;
            }
        }
    }

    info!(
        "Built campus map: {} nodes, {} edges, {} manual routes",
        nodes.len(),
        edges.len(),
        manual_routes.len()
    );
    Some(CampusMap::build(nodes, edges, manual_routes))
}
