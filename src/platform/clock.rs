//! Frame timestamps to whole simulated milliseconds

/// Longest frame gap fed to the simulation; a hidden tab pauses the clock
pub const MAX_FRAME_MS: f64 = 100.0;

/// Accumulates animation-frame gaps and hands out whole milliseconds.
/// The sub-millisecond remainder carries into the next frame.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
    accumulator: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds to advance for a frame stamped `time` (ms). The first frame yields 0.
    pub fn tick(&mut self, time: f64) -> u64 {
        let dt = match self.last_time {
            Some(last) => (time - last).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_time = Some(time);

        self.accumulator += dt;
        let whole = self.accumulator.floor();
        self.accumulator -= whole;
        whole as u64
    }
}
