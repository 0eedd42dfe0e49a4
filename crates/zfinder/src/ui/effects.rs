//! Short animations layered over rendered panes.

use std::f32::consts::PI;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;

const SHAKE_DURATION: Duration = Duration::from_millis(400);

/// Horizontal oscillation: `amount * sin(progress * PI * shakes_per_unit)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shake {
    pub amount: f32,
    pub shakes_per_unit: u16,
}

impl Default for Shake {
    fn default() -> Self {
        Self {
            amount: 5.0,
            shakes_per_unit: 5,
        }
    }
}

impl Shake {
    /// Offset in columns for `progress` in `0.0..=1.0`.
    pub fn offset(&self, progress: f32) -> f32 {
        self.amount * (progress * PI * f32::from(self.shakes_per_unit)).sin()
    }
}

/// A running [`Shake`].
#[derive(Debug, Clone, Copy)]
pub struct ShakeAnimation {
    shake: Shake,
    started: Instant,
    duration: Duration,
}

impl ShakeAnimation {
    pub fn start(shake: Shake, now: Instant) -> Self {
        Self {
            shake,
            started: now,
            duration: SHAKE_DURATION,
        }
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }

    /// Whole-column offset at `now`; zero once finished.
    pub fn offset_at(&self, now: Instant) -> i16 {
        if self.is_finished(now) {
            return 0;
        }
        let elapsed = now.saturating_duration_since(self.started).as_secs_f32();
        let progress = elapsed / self.duration.as_secs_f32();
        self.shake.offset(progress).round() as i16
    }
}

/// Move `area` sideways by `dx`, keeping it inside `bounds`.
pub fn shift_within(area: Rect, dx: i16, bounds: Rect) -> Rect {
    if dx == 0 {
        return area;
    }
    let min_x = i32::from(bounds.x);
    let max_x = i32::from(bounds.right().saturating_sub(area.width)).max(min_x);
    let x = (i32::from(area.x) + i32::from(dx)).clamp(min_x, max_x);
    Rect {
        x: x as u16,
        ..area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shake_starts_and_ends_at_rest() {
        let shake = Shake::default();
        assert_eq!(shake.offset(0.0), 0.0);
        assert!(shake.offset(1.0).abs() < 1e-3);
        assert!((shake.offset(0.1) - 5.0).abs() < 1e-3);
    }

    #[test]
    fn animation_settles_after_duration() {
        let now = Instant::now();
        let animation = ShakeAnimation::start(Shake::default(), now);
        assert_eq!(animation.offset_at(now + Duration::from_millis(40)), 5);
        assert!(animation.is_finished(now + SHAKE_DURATION));
        assert_eq!(animation.offset_at(now + Duration::from_secs(1)), 0);
    }

    #[test]
    fn shift_is_clamped_to_bounds() {
        let bounds = Rect::new(0, 0, 40, 10);
        let pane = Rect::new(2, 1, 30, 8);
        assert_eq!(shift_within(pane, 3, bounds).x, 5);
        assert_eq!(shift_within(pane, -5, bounds).x, 0);
        assert_eq!(shift_within(pane, 20, bounds).x, 10);
        assert_eq!(shift_within(bounds, 4, bounds), bounds);
    }
}
