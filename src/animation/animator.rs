use crate::animation::{FrameClock, MonotonicClock};
use crate::structures::{AnimationFrame, ResolvedRoute, RoutePoint};

pub const MIN_SPEED: f64 = 0.2;
pub const MAX_SPEED: f64 = 4.0;
pub const DEFAULT_DURATION_MS: f64 = 6000.0;

/// Playback configuration handed to [`MarkerAnimator::create`].
#[derive(Debug, Clone, Copy)]
pub struct AnimatorConfig {
    pub duration_ms: f64,
    pub speed_multiplier: f64,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        AnimatorConfig {
            duration_ms: DEFAULT_DURATION_MS,
            speed_multiplier: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
    Completed,
    Destroyed,
}

/// Time-driven marker playback along a resolved route.
///
/// The host calls [`tick`](MarkerAnimator::tick) once per display frame; the
/// animator interpolates a position along the polyline and reports frames,
/// segment transitions and completion through the registered observers.
/// Single-threaded and cooperative: `pause()` and `destroy()` return with no
/// further callbacks possible, and at most one tick is ever in flight.
///
/// One animator per visual marker: destroy the previous handle before
/// creating a replacement, otherwise two tick streams compete.
pub struct MarkerAnimator {
    points: Vec<RoutePoint>,
    duration_ms: f64,
    speed: f64,
    clock: Box<dyn FrameClock>,
    state: PlaybackState,
    start_time: Option<f64>,
    pause_time: Option<f64>,
    last_segment: Option<usize>,
    on_update: Option<Box<dyn FnMut(AnimationFrame)>>,
    on_segment_change: Option<Box<dyn FnMut(usize)>>,
    on_complete: Option<Box<dyn FnMut()>>,
}

impl MarkerAnimator {
    /// Explicit-handle factory: the caller owns the returned animator and
    /// its teardown.
    pub fn create(route: &ResolvedRoute, config: AnimatorConfig) -> MarkerAnimator {
        MarkerAnimator::with_clock(route, config, Box::new(MonotonicClock::new()))
    }

    pub fn with_clock(
        route: &ResolvedRoute,
        config: AnimatorConfig,
        clock: Box<dyn FrameClock>,
    ) -> MarkerAnimator {
        MarkerAnimator {
            points: route.points.clone(),
            duration_ms: config.duration_ms,
            speed: config.speed_multiplier.clamp(MIN_SPEED, MAX_SPEED),
            clock,
            state: PlaybackState::Idle,
            start_time: None,
            pause_time: None,
            last_segment: None,
            on_update: None,
            on_segment_change: None,
            on_complete: None,
        }
    }

    pub fn on_update(&mut self, callback: impl FnMut(AnimationFrame) + 'static) {
        self.on_update = Some(Box::new(callback));
    }

    pub fn on_segment_change(&mut self, callback: impl FnMut(usize) + 'static) {
        self.on_segment_change = Some(Box::new(callback));
    }

    pub fn on_complete(&mut self, callback: impl FnMut() + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Starts or resumes playback. No-op while already playing, after
    /// completion or teardown, and when fewer than 2 points are loaded.
    /// Resuming shifts the start timestamp forward by the paused duration,
    /// so elapsed progress is preserved exactly.
    pub fn play(&mut self) {
        match self.state {
            PlaybackState::Playing | PlaybackState::Completed | PlaybackState::Destroyed => return,
            PlaybackState::Idle | PlaybackState::Paused => {}
        }
        if self.points.len() < 2 {
            return;
        }

        let now = self.clock.now_ms();
        if let Some(paused_at) = self.pause_time.take() {
            if let Some(start) = self.start_time.as_mut() {
                *start += now - paused_at;
            }
        } else if self.start_time.is_none() {
            self.start_time = Some(now);
        }

        self.state = PlaybackState::Playing;
    }

    /// Suspends playback. Any tick arriving while paused produces no
    /// callbacks.
    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.pause_time = Some(self.clock.now_ms());
        self.state = PlaybackState::Paused;
    }

    /// Clamped to `[0.2, 4.0]`; effective on the next tick.
    pub fn set_speed(&mut self, multiplier: f64) {
        if self.state == PlaybackState::Destroyed || !multiplier.is_finite() {
            return;
        }
        self.speed = multiplier.clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Resets all timing state and starts playback from time zero.
    pub fn replay(&mut self) {
        if self.state == PlaybackState::Destroyed {
            return;
        }
        self.start_time = None;
        self.pause_time = None;
        self.last_segment = None;
        self.state = PlaybackState::Idle;
        self.play();
    }

    /// Terminal teardown: drops the point data and every observer. All
    /// later calls on this handle are no-ops.
    pub fn destroy(&mut self) {
        self.state = PlaybackState::Destroyed;
        self.points = Vec::new();
        self.start_time = None;
        self.pause_time = None;
        self.last_segment = None;
        self.on_update = None;
        self.on_segment_change = None;
        self.on_complete = None;
    }

    /// One animation update, driven by the host's rendering clock. Does
    /// nothing unless playing.
    pub fn tick(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        let start = match self.start_time {
            Some(start) => start,
            None => return,
        };

        let elapsed = (self.clock.now_ms() - start) * self.speed;
        let progress = (elapsed / self.duration_ms).min(1.0);

        let count = self.points.len();
        let t = progress * (count - 1) as f64;
        let idx = (t.floor() as usize).min(count - 2);
        let frac = t - idx as f64;
        let a = self.points[idx];
        let b = self.points[idx + 1];

        // Bad stored coordinates skip this frame instead of killing
        // playback; the state machine still completes below.
        let endpoints_valid =
            a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite();
        if endpoints_valid {
            let x = a.x + (b.x - a.x) * frac;
            let y = a.y + (b.y - a.y) * frac;

            let dx = b.x - a.x;
            let dy = b.y - a.y;
            let heading_degrees = if dx != 0.0 || dy != 0.0 {
                dy.atan2(dx).to_degrees()
            } else {
                0.0
            };

            if let Some(callback) = self.on_update.as_mut() {
                callback(AnimationFrame {
                    x,
                    y,
                    heading_degrees,
                    progress,
                });
            }

            if self.last_segment != Some(idx) {
                self.last_segment = Some(idx);
                if let Some(callback) = self.on_segment_change.as_mut() {
                    callback(idx);
                }
            }
        } else {
            tracing::warn!("Invalid point data at segment {idx}, skipping frame");
        }

        if progress >= 1.0 {
            self.state = PlaybackState::Completed;
            self.start_time = None;
            self.pause_time = None;
            if let Some(callback) = self.on_complete.as_mut() {
                callback();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::animation::clock::testing::ManualClock;
    use approx::assert_relative_eq;

    fn route(points: Vec<RoutePoint>) -> ResolvedRoute {
        ResolvedRoute {
            length: 0.0,
            points,
        }
    }

    fn line_route(n: usize) -> ResolvedRoute {
        route(
            (0..n)
                .map(|i| RoutePoint::new(i as f64 * 10.0, 0.0))
                .collect(),
        )
    }

    fn animator(points: usize, duration_ms: f64, speed: f64) -> (MarkerAnimator, ManualClock) {
        let clock = ManualClock::new();
        let animator = MarkerAnimator::with_clock(
            &line_route(points),
            AnimatorConfig {
                duration_ms,
                speed_multiplier: speed,
            },
            Box::new(clock.clone()),
        );
        (animator, clock)
    }

    #[test]
    fn progress_scales_with_speed() {
        let (mut anim, clock) = animator(2, 1000.0, 2.0);
        let frames = Rc::new(RefCell::new(Vec::<AnimationFrame>::new()));
        let sink = frames.clone();
        anim.on_update(move |f| sink.borrow_mut().push(f));
        let completions = Rc::new(RefCell::new(0));
        let counter = completions.clone();
        anim.on_complete(move || *counter.borrow_mut() += 1);

        anim.play();
        clock.set(250.0);
        anim.tick();
        clock.set(500.0);
        anim.tick();

        let frames = frames.borrow();
        assert_relative_eq!(frames[0].progress, 0.5);
        assert_relative_eq!(frames[0].x, 5.0);
        assert_relative_eq!(frames[1].progress, 1.0);
        assert_relative_eq!(frames[1].x, 10.0);
        assert_eq!(anim.state(), PlaybackState::Completed);
        assert_eq!(*completions.borrow(), 1);

        // Completed is terminal for tick and play.
        clock.set(600.0);
        anim.tick();
        anim.play();
        assert_eq!(anim.state(), PlaybackState::Completed);
        assert_eq!(*completions.borrow(), 1);
    }

    #[test]
    fn pause_contributes_no_progress() {
        let (mut anim, clock) = animator(2, 1000.0, 1.0);
        let frames = Rc::new(RefCell::new(Vec::<AnimationFrame>::new()));
        let sink = frames.clone();
        anim.on_update(move |f| sink.borrow_mut().push(f));

        anim.play();
        clock.set(300.0);
        anim.tick();
        anim.pause();

        // Half a second passes while paused; ticks emit nothing.
        clock.set(800.0);
        anim.tick();
        assert_eq!(frames.borrow().len(), 1);

        anim.play();
        clock.set(900.0);
        anim.tick();

        let frames = frames.borrow();
        assert_relative_eq!(frames[0].progress, 0.3);
        assert_relative_eq!(frames[1].progress, 0.4);
    }

    #[test]
    fn segment_changes_fire_once_per_index_in_order() {
        let (mut anim, clock) = animator(4, 900.0, 1.0);
        let segments = Rc::new(RefCell::new(Vec::<usize>::new()));
        let sink = segments.clone();
        anim.on_segment_change(move |idx| sink.borrow_mut().push(idx));
        let completions = Rc::new(RefCell::new(0));
        let counter = completions.clone();
        anim.on_complete(move || *counter.borrow_mut() += 1);

        anim.play();
        for ms in [0.0, 100.0, 350.0, 400.0, 650.0, 900.0] {
            clock.set(ms);
            anim.tick();
        }

        // N - 1 firings for an N-point route, strictly increasing.
        assert_eq!(*segments.borrow(), vec![0, 1, 2]);
        assert_eq!(*completions.borrow(), 1);
    }

    #[test]
    fn heading_follows_active_segment() {
        let clock = ManualClock::new();
        let mut anim = MarkerAnimator::with_clock(
            &route(vec![
                RoutePoint::new(0.0, 0.0),
                RoutePoint::new(0.0, 10.0),
            ]),
            AnimatorConfig {
                duration_ms: 1000.0,
                speed_multiplier: 1.0,
            },
            Box::new(clock.clone()),
        );
        let frames = Rc::new(RefCell::new(Vec::<AnimationFrame>::new()));
        let sink = frames.clone();
        anim.on_update(move |f| sink.borrow_mut().push(f));

        anim.play();
        clock.set(500.0);
        anim.tick();

        assert_relative_eq!(frames.borrow()[0].heading_degrees, 90.0);
    }

    #[test]
    fn zero_length_segment_reports_zero_heading() {
        let clock = ManualClock::new();
        let mut anim = MarkerAnimator::with_clock(
            &route(vec![RoutePoint::new(3.0, 3.0), RoutePoint::new(3.0, 3.0)]),
            AnimatorConfig {
                duration_ms: 1000.0,
                speed_multiplier: 1.0,
            },
            Box::new(clock.clone()),
        );
        let frames = Rc::new(RefCell::new(Vec::<AnimationFrame>::new()));
        let sink = frames.clone();
        anim.on_update(move |f| sink.borrow_mut().push(f));

        anim.play();
        clock.set(500.0);
        anim.tick();

        let frames = frames.borrow();
        assert_relative_eq!(frames[0].heading_degrees, 0.0);
        assert!(frames[0].x.is_finite());
    }

    #[test]
    fn invalid_points_skip_frames_without_stopping() {
        let clock = ManualClock::new();
        let mut anim = MarkerAnimator::with_clock(
            &route(vec![
                RoutePoint::new(0.0, 0.0),
                RoutePoint::new(f64::NAN, 5.0),
                RoutePoint::new(10.0, 0.0),
            ]),
            AnimatorConfig {
                duration_ms: 1000.0,
                speed_multiplier: 1.0,
            },
            Box::new(clock.clone()),
        );
        let frames = Rc::new(RefCell::new(Vec::<AnimationFrame>::new()));
        let sink = frames.clone();
        anim.on_update(move |f| sink.borrow_mut().push(f));

        anim.play();
        clock.set(250.0);
        anim.tick();
        assert!(frames.borrow().is_empty());
        assert_eq!(anim.state(), PlaybackState::Playing);

        clock.set(1000.0);
        anim.tick();
        assert!(frames.borrow().is_empty());
        assert_eq!(anim.state(), PlaybackState::Completed);
    }

    #[test]
    fn speed_change_applies_on_next_tick() {
        let (mut anim, clock) = animator(2, 1000.0, 1.0);

        anim.play();
        clock.set(400.0);
        anim.tick();
        anim.set_speed(2.0);
        clock.set(500.0);
        anim.tick();

        // progress = elapsed * speed / duration = 500 * 2 / 1000
        assert_eq!(anim.state(), PlaybackState::Completed);
    }

    #[test]
    fn set_speed_clamps_to_bounds() {
        let (mut anim, clock) = animator(2, 1000.0, 1.0);
        let frames = Rc::new(RefCell::new(Vec::<AnimationFrame>::new()));
        let sink = frames.clone();
        anim.on_update(move |f| sink.borrow_mut().push(f));

        anim.set_speed(100.0);
        anim.play();
        clock.set(100.0);
        anim.tick();
        // Clamped to 4.0: progress = 100 * 4 / 1000.
        assert_relative_eq!(frames.borrow()[0].progress, 0.4);

        anim.set_speed(0.0);
        clock.set(200.0);
        anim.tick();
        // Clamped to 0.2: progress = 200 * 0.2 / 1000.
        assert_relative_eq!(frames.borrow()[1].progress, 0.04);
    }

    #[test]
    fn replay_restarts_from_time_zero() {
        let (mut anim, clock) = animator(2, 1000.0, 1.0);
        let completions = Rc::new(RefCell::new(0));
        let counter = completions.clone();
        anim.on_complete(move || *counter.borrow_mut() += 1);

        anim.play();
        clock.set(1000.0);
        anim.tick();
        assert_eq!(anim.state(), PlaybackState::Completed);

        clock.set(2000.0);
        anim.replay();
        assert_eq!(anim.state(), PlaybackState::Playing);
        clock.set(2500.0);
        anim.tick();
        assert_eq!(anim.state(), PlaybackState::Playing);
        clock.set(3000.0);
        anim.tick();
        assert_eq!(anim.state(), PlaybackState::Completed);
        assert_eq!(*completions.borrow(), 2);
    }

    #[test]
    fn play_is_noop_below_two_points() {
        let clock = ManualClock::new();
        let mut anim = MarkerAnimator::with_clock(
            &route(vec![RoutePoint::new(0.0, 0.0)]),
            AnimatorConfig::default(),
            Box::new(clock.clone()),
        );

        anim.play();
        assert_eq!(anim.state(), PlaybackState::Idle);
        anim.tick();
        assert_eq!(anim.state(), PlaybackState::Idle);
    }

    #[test]
    fn destroyed_animator_ignores_everything() {
        let (mut anim, clock) = animator(3, 1000.0, 1.0);
        let frames = Rc::new(RefCell::new(Vec::<AnimationFrame>::new()));
        let sink = frames.clone();
        anim.on_update(move |f| sink.borrow_mut().push(f));

        anim.play();
        anim.destroy();
        assert_eq!(anim.state(), PlaybackState::Destroyed);

        clock.set(500.0);
        anim.tick();
        anim.play();
        anim.replay();
        anim.set_speed(2.0);
        anim.pause();
        assert_eq!(anim.state(), PlaybackState::Destroyed);
        assert!(frames.borrow().is_empty());
    }

    #[test]
    fn pause_prevents_scheduled_tick_callbacks() {
        let (mut anim, clock) = animator(2, 1000.0, 1.0);
        let frames = Rc::new(RefCell::new(Vec::<AnimationFrame>::new()));
        let sink = frames.clone();
        anim.on_update(move |f| sink.borrow_mut().push(f));

        anim.play();
        anim.pause();
        clock.set(100.0);
        anim.tick();

        assert!(frames.borrow().is_empty());
    }
}
