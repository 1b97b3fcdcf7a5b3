//! Frame throttle
//!
//! `requestAnimationFrame` fires at the display rate. The game only ticks
//! when a full frame interval has elapsed and carries the remainder over,
//! so a 30 fps target on a 60 Hz display ticks every other callback.

use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq)]
pub struct FrameThrottle {
    /// Milliseconds per tick
    interval: f64,
    last: Option<f64>,
}

impl FrameThrottle {
    pub fn new(target_fps: f64) -> Self {
        Self {
            interval: 1000.0 / target_fps.max(1.0),
            last: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            interval: settings.frame_interval_ms(),
            last: None,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Whether a tick should run at `now` (milliseconds)
    pub fn ready(&mut self, now: f64) -> bool {
        let Some(last) = self.last else {
            self.last = Some(now);
            return true;
        };
        let delta = now - last;
        if delta < self.interval {
            return false;
        }
        self.last = Some(now - delta % self.interval);
        true
    }

    /// Forget the phase, e.g. after the tab was hidden
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_frame_always_ticks() {
        let mut throttle = FrameThrottle::new(60.0);
        assert!(throttle.ready(12_345.0));
    }

    #[test]
    fn test_half_rate_on_fast_display() {
        let mut throttle = FrameThrottle::new(30.0);
        let mut ticks = 0;
        // 60 Hz display for one second
        for i in 0..=60 {
            if throttle.ready(i as f64 * 1000.0 / 60.0) {
                ticks += 1;
            }
        }
        assert!((30..=31).contains(&ticks), "ticks = {ticks}");
    }

    #[test]
    fn test_remainder_is_carried() {
        let mut throttle = FrameThrottle::new(50.0);
        assert!(throttle.ready(0.0));
        // 25ms late: one tick, and the next one is due 15ms later
        assert!(throttle.ready(25.0));
        assert!(!throttle.ready(39.0));
        assert!(throttle.ready(40.0));
    }

    #[test]
    fn test_reset_ticks_immediately() {
        let mut throttle = FrameThrottle::new(60.0);
        throttle.ready(0.0);
        assert!(!throttle.ready(1.0));
        throttle.reset();
        assert!(throttle.ready(2.0));
    }

    proptest! {
        #[test]
        fn prop_never_ticks_under_budget(
            fps in prop::sample::select(vec![30.0f64, 60.0]),
            steps in prop::collection::vec(0.1f64..40.0, 1..200),
        ) {
            let mut throttle = FrameThrottle::new(fps);
            let mut now = 0.0;
            throttle.ready(now);
            let mut ticks = 0u32;
            for step in steps {
                now += step;
                if throttle.ready(now) {
                    ticks += 1;
                    // The k-th tick after the first cannot come before k intervals
                    prop_assert!(now + 1e-6 >= ticks as f64 * throttle.interval());
                }
            }
        }
    }
}
