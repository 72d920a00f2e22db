use std::cmp::Ordering;

/// Simulation time in seconds.
///
/// All tour timing runs on this explicit timebase instead of the wall clock, so
/// playback can be stepped and replayed deterministically.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Time(pub f64);

impl Time {
    pub const ZERO: Time = Time(0.0);

    pub fn seconds(self) -> f64 {
        self.0
    }

    /// The instant `secs` seconds after this one.
    pub fn after(self, secs: f64) -> Time {
        Time(self.0 + secs)
    }

    /// Seconds elapsed since `earlier`, clamped to zero.
    pub fn since(self, earlier: Time) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }

    /// Total ordering, so times can be used as sort keys.
    pub fn total_cmp(&self, other: &Time) -> Ordering {
        self.0.total_cmp(&other.0)
    }

    pub fn max(self, other: Time) -> Time {
        if other.total_cmp(&self) == Ordering::Greater {
            other
        } else {
            self
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeSpan {
    pub start: Time,
    pub end: Time,
}

impl TimeSpan {
    pub fn new(start: Time, duration_s: f64) -> Self {
        Self {
            start,
            end: start.after(duration_s.max(0.0)),
        }
    }

    pub fn duration(&self) -> f64 {
        (self.end.0 - self.start.0).max(0.0)
    }
}
