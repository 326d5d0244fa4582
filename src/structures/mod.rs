mod config;
mod edge;
mod geo;
mod graph;
mod map;
mod node;
mod route;

pub use config::*;
pub use edge::*;
pub use geo::*;
pub use graph::*;
pub use map::*;
pub use node::*;
pub use route::*;
