use std::time::Duration;

use foundation::time::Time;

/// One tick of a real-time driver.
///
/// Frames arrive at a fixed wall-clock rate and each one moves simulation time
/// forward by the wall-clock period times the playback speed. Frame time is
/// derived from the index alone, so long runs do not accumulate rounding drift
/// and a recorded run replays identically at any speed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub index: u64,
    /// Wall-clock seconds between frames.
    pub wall_dt_s: f64,
    /// Simulation seconds per wall-clock second.
    pub time_scale: f64,
    /// Simulation time the frame advances to.
    pub time: Time,
}

impl Frame {
    /// Frame zero of a clock ticking `frame_hz` times per wall-clock second.
    pub fn start(frame_hz: u32, time_scale: f64) -> Self {
        Self::at(0, 1.0 / f64::from(frame_hz.max(1)), time_scale)
    }

    fn at(index: u64, wall_dt_s: f64, time_scale: f64) -> Self {
        Self {
            index,
            wall_dt_s,
            time_scale,
            time: Time(index as f64 * wall_dt_s * time_scale),
        }
    }

    pub fn next(self) -> Self {
        Self::at(self.index + 1, self.wall_dt_s, self.time_scale)
    }

    /// Simulation seconds covered by one frame.
    pub fn sim_dt_s(&self) -> f64 {
        self.wall_dt_s * self.time_scale
    }

    /// Period for the driver's wall-clock interval timer.
    pub fn wall_interval(&self) -> Duration {
        Duration::from_secs_f64(self.wall_dt_s)
    }
}
