use std::time::Duration;

use log::info;

pub const PICK_PULSE: Duration = Duration::from_millis(150);

/// Fire-and-forget vibration. Devices without a motor simply skip the pulse.
pub trait Haptics {
    fn pulse(&mut self, duration: Duration);
}

/// For hardware with no vibration motor, such as the reMarkable.
#[derive(Debug, Default)]
pub struct NoHaptics {}

impl Haptics for NoHaptics {
    fn pulse(&mut self, duration: Duration) {
        info!("No haptics available, skipping {duration:?} pulse");
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingHaptics {
    pub pulses: Vec<Duration>,
}

#[cfg(test)]
impl Haptics for RecordingHaptics {
    fn pulse(&mut self, duration: Duration) {
        self.pulses.push(duration);
    }
}
