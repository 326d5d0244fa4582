use std::time::Instant;

/// Monotonic time source sampled once per animator tick, in milliseconds.
///
/// The host's rendering loop owns the tick cadence; the clock only answers
/// "what time is it now".
pub trait FrameClock {
    fn now_ms(&self) -> f64;
}

/// Wall clock measured from construction.
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> MonotonicClock {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        MonotonicClock::new()
    }
}

impl FrameClock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}
