//! Time-based tweens for the reveal cascade and menu transitions.
//!
//! All animation in the app is driven by one monotonic clock measured in
//! seconds since startup. Tweens are evaluated against an explicit `now`
//! rather than reading the wall clock themselves, so the math is trivially
//! testable and every consumer sees a consistent frame time.

/// Easing curves applied to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Quadratic ease-out: fast start, gentle settle.
    QuadOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// A single scalar transition from one value to another.
///
/// `start` is absolute clock time; before it the tween reports `from`,
/// after `start + duration` it reports `to`. A zero duration is an
/// instant jump at `start`.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f64,
    to: f64,
    start: f64,
    duration: f64,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, start: f64, duration: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start,
            duration: duration.max(0.0),
            easing,
        }
    }

    /// A tween that is already finished and holds a constant value.
    pub fn hold(value: f64) -> Self {
        Self::new(value, value, 0.0, 0.0, Easing::Linear)
    }

    pub fn value_at(&self, now: f64) -> f64 {
        if now < self.start {
            return self.from;
        }
        if self.duration == 0.0 || now >= self.start + self.duration {
            return self.to;
        }
        let t = (now - self.start) / self.duration;
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    pub fn finished_at(&self, now: f64) -> bool {
        now >= self.start + self.duration
    }
}
