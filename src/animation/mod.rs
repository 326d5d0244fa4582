mod animator;
pub(crate) mod clock;

pub use animator::*;
pub use clock::{FrameClock, MonotonicClock};
