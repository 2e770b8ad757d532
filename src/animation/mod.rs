//! Frame-driven scalar animation.

use std::fmt;
use std::time::{Duration, Instant};

mod easing;

pub use easing::Easing;

/// Duration of an animation when none is specified.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(1000);

type UpdateFn = Box<dyn FnMut(f64)>;
type EndFn = Box<dyn FnMut()>;

/// Returns a new animation from `from` to `to`, scheduled to receive its
/// first frame.
///
/// The host drives the animation by calling [`Animation::tick()`] once per
/// frame. Callbacks are attached using the builder methods.
pub fn animate(from: f64, to: f64, duration: Duration, easing: Easing) -> Animation {
    Animation::new(from, to).duration(duration).easing(easing)
}

/// Lifecycle of a single animation run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunState {
    /// A frame is scheduled.
    Scheduled,
    /// Paused before completion. No more frames will be scheduled.
    Paused,
    /// Reached the end value. No more frames will be scheduled.
    Finished,
}

/// Single run animating a scalar value over time.
///
/// A run has at most one frame outstanding. Pausing is terminal: there is no
/// resume, so to continue from where a paused run left off, start a new run.
pub struct Animation {
    from: f64,
    to: f64,
    duration: Duration,
    easing: Easing,

    /// Time of the first frame.
    start: Option<Instant>,
    progress: f64,
    latest: f64,
    state: RunState,

    on_update: Option<UpdateFn>,
    on_end: Option<EndFn>,
    on_pause: Option<UpdateFn>,
}
impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("progress", &self.progress)
            .field("latest", &self.latest)
            .field("state", &self.state)
            .finish()
    }
}

impl Animation {
    /// Returns a new animation using the default duration and easing.
    pub fn new(from: f64, to: f64) -> Self {
        Self {
            from,
            to,
            duration: DEFAULT_DURATION,
            easing: Easing::default(),

            start: None,
            progress: 0.0,
            latest: from,
            state: RunState::Scheduled,

            on_update: None,
            on_end: None,
            on_pause: None,
        }
    }

    /// Sets the duration of the animation. A zero duration completes on the
    /// first frame.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
    /// Sets the easing curve.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
    /// Sets a callback invoked with the current value on every frame.
    #[must_use]
    pub fn on_update(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }
    /// Sets a callback invoked once the end value has been reached.
    #[must_use]
    pub fn on_end(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }
    /// Sets a callback invoked with the latest value when the run stops,
    /// whether paused externally or on completion.
    #[must_use]
    pub fn on_pause(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.on_pause = Some(Box::new(f));
        self
    }

    /// Returns the most recently computed value.
    pub fn latest(&self) -> f64 {
        self.latest
    }
    /// Returns linear progress in `0.0..=1.0` as of the most recent frame.
    pub fn progress(&self) -> f64 {
        self.progress
    }
    /// Returns the lifecycle state of the run.
    pub fn state(&self) -> RunState {
        self.state
    }
    /// Returns `true` if a frame is scheduled.
    pub fn is_scheduled(&self) -> bool {
        self.state == RunState::Scheduled
    }

    /// Runs the scheduled frame at time `now`.
    ///
    /// Returns the new value, or `None` if no frame was scheduled because the
    /// run has already been paused or has finished.
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        if !self.is_scheduled() {
            return None;
        }

        let start = *self.start.get_or_insert(now);
        let elapsed = now.saturating_duration_since(start);
        let progress = if self.duration.as_nanos() == 0 {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        // A frame stamped earlier than the last one holds progress in place.
        self.progress = progress.max(self.progress);
        self.latest = self.from + self.easing.apply(self.progress) * (self.to - self.from);
        if let Some(f) = &mut self.on_update {
            f(self.latest);
        }

        if self.progress >= 1.0 {
            self.pause();
            self.state = RunState::Finished;
            if let Some(f) = &mut self.on_end {
                f();
            }
        }
        Some(self.latest)
    }

    /// Cancels the scheduled frame, if any, and invokes the pause callback
    /// with the latest value.
    ///
    /// Calling this on a run that has already stopped does nothing.
    pub fn pause(&mut self) {
        if !self.is_scheduled() {
            return;
        }
        self.state = RunState::Paused;
        if let Some(f) = &mut self.on_pause {
            f(self.latest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Log {
        updates: Vec<f64>,
        ends: usize,
        pauses: Vec<f64>,
    }

    fn logged(animation: Animation) -> (Animation, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        let (l1, l2, l3) = (log.clone(), log.clone(), log.clone());
        let animation = animation
            .on_update(move |v| l1.borrow_mut().updates.push(v))
            .on_end(move || l2.borrow_mut().ends += 1)
            .on_pause(move |v| l3.borrow_mut().pauses.push(v));
        (animation, log)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_zero_duration_completes_on_first_frame() {
        let (mut a, log) = logged(animate(3.0, 8.0, Duration::ZERO, Easing::Linear));
        let t0 = Instant::now();
        assert_eq!(a.tick(t0), Some(8.0));
        assert_eq!(a.state(), RunState::Finished);
        assert_eq!(a.tick(t0 + ms(16)), None);

        let log = log.borrow();
        assert_eq!(log.updates, vec![8.0]);
        assert_eq!(log.ends, 1);
        assert_eq!(log.pauses, vec![8.0]);
    }

    #[test]
    fn test_linear_run() {
        let (mut a, log) = logged(animate(0.0, 10.0, ms(100), Easing::Linear));
        let t0 = Instant::now();
        assert_eq!(a.tick(t0), Some(0.0));
        assert_eq!(a.tick(t0 + ms(50)), Some(5.0));
        assert!(a.is_scheduled());
        assert_eq!(a.tick(t0 + ms(150)), Some(10.0));
        assert!(!a.is_scheduled());
        assert_eq!(a.progress(), 1.0);
        assert_eq!(log.borrow().updates, vec![0.0, 5.0, 10.0]);
        assert_eq!(log.borrow().ends, 1);
    }

    #[test]
    fn test_progress_never_goes_backwards() {
        let (mut a, log) = logged(animate(0.0, 10.0, ms(100), Easing::Linear));
        let t0 = Instant::now();
        a.tick(t0 + ms(10));
        a.tick(t0 + ms(60));
        assert_eq!(a.progress(), 0.5);
        // Earlier than the last frame, and earlier than the first.
        assert_eq!(a.tick(t0 + ms(30)), Some(5.0));
        assert_eq!(a.tick(t0), Some(5.0));
        assert_eq!(a.progress(), 0.5);
        assert_eq!(a.tick(t0 + ms(110)), Some(10.0));
        assert_eq!(log.borrow().updates, vec![0.0, 5.0, 5.0, 5.0, 10.0]);
    }

    #[test]
    fn test_reversed_range() {
        let mut a = animate(1.0, 0.0, ms(10), Easing::Linear);
        let t0 = Instant::now();
        a.tick(t0);
        assert_eq!(a.tick(t0 + ms(10)), Some(0.0));
    }

    #[test]
    fn test_pause_before_completion() {
        let (mut a, log) = logged(animate(0.0, 1.0, ms(100), Easing::Linear));
        let t0 = Instant::now();
        a.tick(t0);
        a.tick(t0 + ms(25));
        a.pause();
        a.pause();
        assert_eq!(a.state(), RunState::Paused);
        assert_eq!(a.tick(t0 + ms(200)), None);

        let log = log.borrow();
        assert_eq!(log.updates, vec![0.0, 0.25]);
        assert_eq!(log.pauses, vec![0.25]);
        assert_eq!(log.ends, 0);
    }

    #[test]
    fn test_pause_before_first_frame() {
        let (mut a, log) = logged(animate(4.0, 5.0, ms(100), Easing::Linear));
        a.pause();
        assert_eq!(log.borrow().pauses, vec![4.0]);
        assert!(log.borrow().updates.is_empty());
    }

    #[test]
    fn test_pause_after_completion_does_nothing() {
        let (mut a, log) = logged(animate(0.0, 1.0, Duration::ZERO, Easing::Linear));
        a.tick(Instant::now());
        a.pause();
        assert_eq!(a.state(), RunState::Finished);
        assert_eq!(log.borrow().pauses.len(), 1);
        assert_eq!(log.borrow().ends, 1);
    }

    #[test]
    fn test_defaults() {
        let a = Animation::new(0.0, 1.0);
        assert_eq!(a.duration, DEFAULT_DURATION);
        assert_eq!(a.easing, Easing::InOutSine);
        assert_eq!(a.latest(), 0.0);
    }
}
