use std::fs;

use serde::Deserialize;

use crate::ingestion::cache::SourceLocation;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub build: BuildConfig,
    pub default_animation: AnimationDefaultConfig,
}

#[derive(Debug, Deserialize)]
pub struct BuildConfig {
    pub inputs: Vec<MapInput>,
    pub output: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "collection")]
pub enum MapInput {
    #[serde(rename = "nodes")]
    Nodes(InputSource),
    #[serde(rename = "edges")]
    Edges(InputSource),
    #[serde(rename = "routes")]
    Routes(InputSource),
}

#[derive(Debug, Deserialize)]
pub struct InputSource {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct AnimationDefaultConfig {
    pub duration_ms: f64,
    pub speed_multiplier: f64,
}

impl MapInput {
    pub fn label(&self) -> &str {
        match self {
            MapInput::Nodes(_) => "nodes",
            MapInput::Edges(_) => "edges",
            MapInput::Routes(_) => "routes",
        }
    }

    pub fn url(&self) -> &str {
        match self {
            MapInput::Nodes(s) => &s.url,
            MapInput::Edges(s) => &s.url,
            MapInput::Routes(s) => &s.url,
        }
    }

    pub fn location(&self) -> Result<SourceLocation, String> {
        let url = self.url();
        if let Some(path) = url.strip_prefix("path:") {
            Ok(SourceLocation::Local(path.to_string()))
        } else if url.starts_with("http://") || url.starts_with("https://") {
            Ok(SourceLocation::Remote(url.to_string()))
        } else {
            Err(format!("Unknown URL scheme for '{}': {url}", self.label()))
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config: {e}"))?;
        serde_yml::from_str(&content).map_err(|e| format!("Failed to parse config: {e}"))
    }
}
