mod directions;
mod resolver;

pub use directions::*;
pub use resolver::*;
