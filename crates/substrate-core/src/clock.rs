//! Game calendar for the Substrate simulation.
//!
//! The calendar counts ticks and derives game hours from the tick number:
//!
//! ```text
//! elapsed_hours = start_hours + tick * hours_per_tick
//! ```
//!
//! Hours are never accumulated tick by tick, so long runs do not drift.
//! The calendar implements [`TimeSource`] and is the single clock every
//! grower and spore paper reads.

use substrate_world::TimeSource;

use crate::config::CalendarConfig;

/// Errors that can occur during calendar operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,

    /// Invalid calendar configuration (e.g. a zero-length day).
    #[error("invalid calendar configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Tick counter plus the mapping from ticks to game hours.
#[derive(Debug, Clone, PartialEq)]
pub struct GameCalendar {
    /// Ticks completed since the calendar started.
    tick: u64,
    /// Game hour at tick 0.
    start_hours: f64,
    /// Game hours per tick.
    hours_per_tick: f64,
    /// Game hours per day.
    hours_per_day: f64,
}

impl GameCalendar {
    /// Create a calendar at tick 0 from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if the day length is not
    /// positive, the tick length is negative, or a value is not finite.
    pub fn new(config: &CalendarConfig) -> Result<Self, ClockError> {
        Self::from_parts(
            0,
            config.start_hours,
            config.hours_per_tick,
            config.hours_per_day,
        )
    }

    /// Create a calendar from explicit parameters (useful for testing and
    /// state restoration).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] under the same conditions as
    /// [`GameCalendar::new`].
    pub fn from_parts(
        tick: u64,
        start_hours: f64,
        hours_per_tick: f64,
        hours_per_day: f64,
    ) -> Result<Self, ClockError> {
        if !hours_per_day.is_finite() || hours_per_day <= 0.0 {
            return Err(ClockError::InvalidConfig {
                reason: "hours_per_day must be positive".to_owned(),
            });
        }
        if !hours_per_tick.is_finite() || hours_per_tick < 0.0 {
            return Err(ClockError::InvalidConfig {
                reason: "hours_per_tick must be non-negative".to_owned(),
            });
        }
        if !start_hours.is_finite() {
            return Err(ClockError::InvalidConfig {
                reason: "start_hours must be finite".to_owned(),
            });
        }
        Ok(Self {
            tick,
            start_hours,
            hours_per_tick,
            hours_per_day,
        })
    }

    /// Advance the calendar by one tick. Returns the new tick number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::TickOverflow`] if the tick counter would exceed
    /// `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.tick = self.tick.checked_add(1).ok_or(ClockError::TickOverflow)?;
        Ok(self.tick)
    }

    /// Return the current tick number.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Game hour at tick 0.
    pub const fn start_hours(&self) -> f64 {
        self.start_hours
    }

    /// Game hours per tick.
    pub const fn hours_per_tick(&self) -> f64 {
        self.hours_per_tick
    }

    /// Whole game days elapsed, counted from hour 0.
    pub fn day(&self) -> f64 {
        (self.elapsed_hours() / self.hours_per_day).floor()
    }
}

impl TimeSource for GameCalendar {
    fn elapsed_hours(&self) -> f64 {
        // Exact up to 2^53 ticks.
        #[allow(clippy::cast_precision_loss)]
        let ticks = self.tick as f64;
        self.hours_per_tick.mul_add(ticks, self.start_hours)
    }

    fn hours_per_day(&self) -> f64 {
        self.hours_per_day
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn calendar(hours_per_tick: f64) -> GameCalendar {
        GameCalendar::from_parts(0, 0.0, hours_per_tick, 24.0).unwrap()
    }

    #[test]
    fn new_calendar_starts_at_configured_hour() {
        let config = CalendarConfig {
            start_hours: 6.0,
            ..CalendarConfig::default()
        };
        let calendar = GameCalendar::new(&config).unwrap();
        assert_eq!(calendar.tick(), 0);
        assert_eq!(calendar.elapsed_hours(), 6.0);
        assert_eq!(calendar.hours_per_day(), 24.0);
    }

    #[test]
    fn advance_moves_hours_by_tick_length() {
        let mut calendar = calendar(0.5);
        assert_eq!(calendar.advance().unwrap(), 1);
        assert_eq!(calendar.advance().unwrap(), 2);
        assert_eq!(calendar.elapsed_hours(), 1.0);
    }

    #[test]
    fn day_counts_whole_days() {
        let calendar = GameCalendar::from_parts(49, 0.0, 1.0, 24.0).unwrap();
        assert_eq!(calendar.day(), 2.0);
    }

    #[test]
    fn advance_overflow() {
        let mut calendar = GameCalendar::from_parts(u64::MAX, 0.0, 1.0, 24.0).unwrap();
        assert!(matches!(calendar.advance(), Err(ClockError::TickOverflow)));
    }

    #[test]
    fn invalid_parts_rejected() {
        assert!(GameCalendar::from_parts(0, 0.0, 1.0, 0.0).is_err());
        assert!(GameCalendar::from_parts(0, 0.0, -1.0, 24.0).is_err());
        assert!(GameCalendar::from_parts(0, f64::NAN, 1.0, 24.0).is_err());
    }

    #[test]
    fn frozen_calendar_reports_constant_hours() {
        let mut calendar = calendar(0.0);
        calendar.advance().unwrap();
        assert_eq!(calendar.elapsed_hours(), 0.0);
    }
}
