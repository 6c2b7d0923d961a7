//! Count-up interpolation for numeric readouts.
//!
//! A [`CountUp`] is advanced by whoever owns the frame loop: it is sampled with
//! the host's frame timestamp and reports the value to display.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountUp {
    /// Host clock reading (ms) when the animation started.
    pub start_time: f64,
    pub start_value: f64,
    pub target_value: f64,
    /// Milliseconds.
    pub duration: f64,
}

impl CountUp {
    pub fn new(start_time: f64, start_value: f64, target_value: f64, duration: f64) -> Self {
        Self {
            start_time,
            start_value,
            target_value,
            duration,
        }
    }

    /// Count from zero, as every card does.
    pub fn from_zero(start_time: f64, target_value: f64, duration: f64) -> Self {
        Self::new(start_time, 0.0, target_value, duration)
    }

    /// Linear progress in `[0, 1]`. A non-positive duration completes immediately.
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now: f64) -> f64 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.target_value;
        }
        self.start_value + (self.target_value - self.start_value) * progress
    }

    pub fn is_finished(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }
}
