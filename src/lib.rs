//! Campus route resolution and marker animation engine: graph index,
//! route resolver, direction synthesizer and the marker animator state
//! machine, fed by static campus map data.

pub mod animation;
pub mod ingestion;
pub mod routing;
pub mod services;
pub mod structures;
