use std::fs;

use postcard::{from_bytes, to_allocvec};
use tracing::info;

use crate::structures::CampusMap;

pub fn save_map(map: &CampusMap, path: &str) -> Result<(), String> {
    let bytes = to_allocvec(map).map_err(|e| format!("Failed to serialize map: {e}"))?;
    fs::write(path, &bytes).map_err(|e| format!("Failed to save map: {e}"))?;
    info!("Campus map saved to {}", path);
    Ok(())
}

pub fn load_map(path: &str) -> Result<CampusMap, String> {
    let bytes = fs::read(path).map_err(|e| format!("Failed to read map file: {e}"))?;
    let res = from_bytes(&bytes).map_err(|e| format!("Failed to deserialize map: {e}"));
    info!("Campus map restored from {}", path);
    res
}
