//! Cooldown progress for alert indicators and hotbar slots
//!
//! The ratio counts down from 1 to 0 across the interval, then overshoots
//! negative at [`FADE_RATE`] per second so the indicator fades out briefly
//! after expiry instead of vanishing. It disappears once the ratio reaches
//! the -1 clamp floor.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AlertError;

/// Game time since round start
pub type GameTime = Duration;

/// Ratio units per second after the cooldown ends
pub const FADE_RATE: f64 = 5.0;

/// Monotonic time source, sampled once per frame
pub trait GameClock {
    fn now(&self) -> GameTime;
}

/// Window during which an alert or action is unavailable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownInterval {
    pub start: GameTime,
    pub end: GameTime,
}

impl CooldownInterval {
    pub fn new(start: GameTime, end: GameTime) -> Self {
        Self { start, end }
    }

    /// Construct an interval, rejecting `end <= start`
    pub fn checked(start: GameTime, end: GameTime) -> Result<Self, AlertError> {
        let interval = Self::new(start, end);
        if interval.is_degenerate() {
            return Err(AlertError::DegenerateCooldownInterval { start, end });
        }
        Ok(interval)
    }

    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }

    pub fn duration(&self) -> Duration {
        self.end.saturating_sub(self.start)
    }
}

/// Visual state of a cooldown overlay for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CooldownProgress {
    /// 1 (just started) .. 0 (ready) .. -1 (faded out)
    pub ratio: f32,
    pub visible: bool,
}

impl CooldownProgress {
    pub const NONE: Self = Self {
        ratio: 0.0,
        visible: false,
    };
}

/// Evaluate an optional cooldown at `now`.
///
/// Degenerate intervals count as no cooldown.
pub fn evaluate(interval: Option<CooldownInterval>, now: GameTime) -> CooldownProgress {
    let Some(interval) = interval.filter(|i| !i.is_degenerate()) else {
        return CooldownProgress::NONE;
    };

    let length = interval.duration().as_secs_f64();
    let elapsed_fraction = signed_secs(now, interval.start) / length;
    let ratio = if elapsed_fraction <= 1.0 {
        1.0 - elapsed_fraction
    } else {
        -FADE_RATE * now.saturating_sub(interval.end).as_secs_f64()
    };
    let ratio = ratio.clamp(-1.0, 1.0);

    CooldownProgress {
        ratio: ratio as f32,
        visible: ratio > -1.0,
    }
}

/// Time left until the cooldown ends (zero when absent or finished)
pub fn remaining(interval: Option<CooldownInterval>, now: GameTime) -> Duration {
    interval.map_or(Duration::ZERO, |i| i.end.saturating_sub(now))
}

/// Full length of the cooldown (zero when absent or degenerate)
pub fn total(interval: Option<CooldownInterval>) -> Duration {
    interval.map_or(Duration::ZERO, |i| i.duration())
}

/// `a - b` in seconds, negative when `a` is earlier
fn signed_secs(a: GameTime, b: GameTime) -> f64 {
    if a >= b {
        (a - b).as_secs_f64()
    } else {
        -(b - a).as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> GameTime {
        Duration::from_secs_f64(s)
    }

    fn ten_second_cooldown() -> CooldownInterval {
        CooldownInterval::new(secs(20.0), secs(30.0))
    }

    #[test]
    fn test_no_cooldown() {
        assert_eq!(evaluate(None, secs(5.0)), CooldownProgress::NONE);
    }

    #[test]
    fn test_endpoints() {
        let cd = ten_second_cooldown();
        let at_start = evaluate(Some(cd), cd.start);
        assert_eq!(at_start.ratio, 1.0);
        assert!(at_start.visible);

        let at_end = evaluate(Some(cd), cd.end);
        assert_eq!(at_end.ratio, 0.0);
        assert!(at_end.visible);
    }

    #[test]
    fn test_monotonic_over_interval() {
        let cd = ten_second_cooldown();
        let mut previous = f32::INFINITY;
        for step in 0..=100 {
            let now = cd.start + Duration::from_millis(step * 100);
            let progress = evaluate(Some(cd), now);
            assert!(progress.ratio <= previous, "ratio rose at step {step}");
            assert!(progress.visible);
            previous = progress.ratio;
        }
    }

    #[test]
    fn test_post_expiry_fade() {
        let cd = ten_second_cooldown();

        let fading = evaluate(Some(cd), cd.end + Duration::from_millis(100));
        assert!((fading.ratio + 0.5).abs() < 1e-6);
        assert!(fading.visible);

        let gone = evaluate(Some(cd), cd.end + Duration::from_millis(200));
        assert_eq!(gone.ratio, -1.0);
        assert!(!gone.visible);

        let long_gone = evaluate(Some(cd), cd.end + Duration::from_secs(60));
        assert_eq!(long_gone.ratio, -1.0);
        assert!(!long_gone.visible);
    }

    #[test]
    fn test_before_start_clamps_to_full() {
        let cd = ten_second_cooldown();
        let early = evaluate(Some(cd), secs(15.0));
        assert_eq!(early.ratio, 1.0);
        assert!(early.visible);
    }

    #[test]
    fn test_degenerate_interval_is_no_cooldown() {
        let zero = CooldownInterval::new(secs(5.0), secs(5.0));
        let inverted = CooldownInterval::new(secs(5.0), secs(2.0));
        assert_eq!(evaluate(Some(zero), secs(5.0)), CooldownProgress::NONE);
        assert_eq!(evaluate(Some(inverted), secs(3.0)), CooldownProgress::NONE);
        assert_eq!(total(Some(inverted)), Duration::ZERO);
        assert!(matches!(
            CooldownInterval::checked(secs(5.0), secs(5.0)),
            Err(AlertError::DegenerateCooldownInterval { .. })
        ));
    }

    #[test]
    fn test_remaining_and_total() {
        let cd = ten_second_cooldown();
        assert_eq!(remaining(Some(cd), secs(26.0)), Duration::from_secs(4));
        assert_eq!(remaining(Some(cd), secs(31.0)), Duration::ZERO);
        assert_eq!(remaining(None, secs(26.0)), Duration::ZERO);
        assert_eq!(total(Some(cd)), Duration::from_secs(10));
    }
}
