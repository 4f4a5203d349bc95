//! Game-time source.
//!
//! All durations in the simulation are measured in game hours. The time
//! source is monotonic and shared by every entity; how fast it advances
//! relative to the tick cadence is the host's concern.

/// A monotonic, non-decreasing game clock.
pub trait TimeSource {
    /// Total elapsed game hours.
    fn elapsed_hours(&self) -> f64;

    /// Number of game hours in one game day.
    fn hours_per_day(&self) -> f64;
}

/// A clock that only moves when told to.
///
/// Useful for tests and for hosts that already own a calendar and just
/// need to feed its reading through.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualClock {
    /// Current reading in game hours.
    hours: f64,
    /// Hours per game day.
    hours_per_day: f64,
}

impl ManualClock {
    /// Create a clock at `hours` with the given day length.
    pub const fn new(hours: f64, hours_per_day: f64) -> Self {
        Self {
            hours,
            hours_per_day,
        }
    }

    /// Move the clock to `hours`. Readings earlier than the current one are
    /// ignored so the clock never runs backwards.
    pub fn set(&mut self, hours: f64) {
        if hours > self.hours {
            self.hours = hours;
        }
    }

    /// Advance the clock by `delta` hours. Negative or non-finite deltas
    /// are ignored.
    pub fn advance(&mut self, delta: f64) {
        if delta.is_finite() && delta > 0.0 {
            self.hours += delta;
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(0.0, 24.0)
    }
}

impl TimeSource for ManualClock {
    fn elapsed_hours(&self) -> f64 {
        self.hours
    }

    fn hours_per_day(&self) -> f64 {
        self.hours_per_day
    }
}
