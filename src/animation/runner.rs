//! Timing for a single started tween.

use std::time::Duration;

use crate::util::easing::EasingFunction;

/// Linear interpolation between two scalars.
#[inline]
#[must_use]
pub fn lerp(t: f32, start: f32, end: f32) -> f32 {
    start + (end - start) * t
}

/// Where a started tween is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenState {
    /// Started, still inside its delay.
    Pending,
    /// Interpolating.
    Running,
    /// Final values written and completion callback fired.
    Finished,
}

/// Clock bookkeeping for one tween, measured on the simulated timeline.
///
/// Completion is decided by comparing durations, not floats, so a tween of
/// `d` started at `t0` completes on the first frame with `now >= t0 + d`.
#[derive(Debug, Clone, Copy)]
pub struct TweenRunner {
    /// Simulated time at which the tween was started.
    start_time: Duration,
    delay: Duration,
    duration: Duration,
    easing: EasingFunction,
}

impl TweenRunner {
    /// Runner started at `start_time`.
    #[must_use]
    pub fn new(
        start_time: Duration,
        delay: Duration,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            start_time,
            delay,
            duration,
            easing,
        }
    }

    /// Moment interpolation begins (start time plus delay).
    #[must_use]
    pub fn active_since(&self) -> Duration {
        self.start_time + self.delay
    }

    /// Still waiting out the delay.
    #[must_use]
    pub fn is_pending(&self, now: Duration) -> bool {
        now < self.active_since()
    }

    /// Time spent interpolating so far.
    #[must_use]
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.active_since())
    }

    /// Elapsed time has reached the duration.
    #[must_use]
    pub fn is_complete(&self, now: Duration) -> bool {
        !self.is_pending(now) && self.elapsed(now) >= self.duration
    }

    /// Raw progress in `[0, 1]`. Zero-length tweens are immediately complete.
    #[must_use]
    pub fn progress(&self, now: Duration) -> f32 {
        if self.is_complete(now) {
            return 1.0;
        }
        let ratio =
            self.elapsed(now).as_secs_f64() / self.duration.as_secs_f64();
        (ratio as f32).clamp(0.0, 1.0)
    }

    /// Eased progress.
    #[must_use]
    pub fn eased_t(&self, now: Duration) -> f32 {
        self.easing.evaluate(self.progress(now))
    }

    /// Moment the tween completes.
    #[must_use]
    pub fn end_time(&self) -> Duration {
        self.active_since() + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn progress_clamps_and_completes() {
        let runner =
            TweenRunner::new(ms(100), ms(0), ms(200), EasingFunction::Linear);
        assert_eq!(runner.progress(ms(100)), 0.0);
        assert!((runner.progress(ms(200)) - 0.5).abs() < 1e-6);
        assert!(!runner.is_complete(ms(299)));
        assert!(runner.is_complete(ms(300)));
        assert_eq!(runner.progress(ms(5000)), 1.0);
    }

    #[test]
    fn zero_duration_is_complete_at_start() {
        let runner =
            TweenRunner::new(ms(40), ms(0), ms(0), EasingFunction::Linear);
        assert!(runner.is_complete(ms(40)));
        assert_eq!(runner.progress(ms(40)), 1.0);
    }

    #[test]
    fn delay_holds_progress_at_zero() {
        let runner = TweenRunner::new(
            ms(0),
            ms(500),
            ms(100),
            EasingFunction::QuadraticOut,
        );
        assert!(runner.is_pending(ms(499)));
        assert_eq!(runner.progress(ms(250)), 0.0);
        assert!(!runner.is_pending(ms(500)));
        assert_eq!(runner.end_time(), ms(600));
        assert!(runner.is_complete(ms(600)));
    }

    #[test]
    fn eased_t_applies_curve() {
        let runner =
            TweenRunner::new(ms(0), ms(0), ms(100), EasingFunction::QuadraticIn);
        assert!((runner.eased_t(ms(50)) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(0.0, 2.0, 6.0), 2.0);
        assert_eq!(lerp(1.0, 2.0, 6.0), 6.0);
        assert_eq!(lerp(0.5, 2.0, 6.0), 4.0);
    }
}
