use std::f32::consts::PI;
use std::time::{Duration, Instant};

pub const PULSE_MIN: f32 = 0.9;
pub const PULSE_MAX: f32 = 1.1;
pub const PULSE_HALF_CYCLE: Duration = Duration::from_millis(800);

/// Endless breathing scale for the drawn circles. Runs up from `PULSE_MIN` to
/// `PULSE_MAX` over one half cycle, then back down, easing in and out at both ends.
/// Only ever sampled, so it can be driven from any frame clock.
#[derive(Debug, Clone, Copy)]
pub struct Pulse {
    started: Instant,
    half_cycle: Duration,
}

fn ease(t: f32) -> f32 {
    ((t + 1.0) * PI).cos() / 2.0 + 0.5
}

impl Pulse {
    pub fn new(started: Instant) -> Pulse {
        Pulse {
            started,
            half_cycle: PULSE_HALF_CYCLE,
        }
    }

    pub fn scale_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started).as_millis();
        let half = self.half_cycle.as_millis().max(1);
        let cycle = elapsed / half;
        let mut t = (elapsed % half) as f32 / half as f32;
        if cycle % 2 == 1 {
            t = 1.0 - t;
        }
        PULSE_MIN + (PULSE_MAX - PULSE_MIN) * ease(t)
    }
}
