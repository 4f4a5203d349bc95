//! Bounded tick loop.
//!
//! [`run`] drives [`Simulation::tick`] a fixed number of times and hands
//! each summary to a [`TickCallback`]. [`run_paced`] does the same but
//! sleeps the configured tick interval between ticks.

use std::time::Duration;

use tracing::info;

use crate::driver::{Simulation, TickSummary};
use crate::error::DriverError;

/// Result of a bounded run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// Ticks executed.
    pub total_ticks: u64,
    /// Summary of the last tick, if any ran.
    pub final_summary: Option<TickSummary>,
}

/// Callback invoked after each tick completes.
///
/// Hosts use this to persist dirty entities, refresh status displays, or
/// record metrics.
pub trait TickCallback {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, sim: &Simulation);
}

/// A callback that does nothing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _sim: &Simulation) {}
}

/// Run `max_ticks` ticks back to back.
///
/// # Errors
///
/// Returns [`DriverError::Clock`] if the tick counter overflows.
pub fn run(
    sim: &mut Simulation,
    max_ticks: u64,
    callback: &mut dyn TickCallback,
) -> Result<RunResult, DriverError> {
    run_with_interval(sim, max_ticks, Duration::ZERO, callback)
}

/// Run `max_ticks` ticks, sleeping `world.tick_interval_ms` between them.
///
/// # Errors
///
/// Returns [`DriverError::Clock`] if the tick counter overflows.
pub fn run_paced(
    sim: &mut Simulation,
    max_ticks: u64,
    callback: &mut dyn TickCallback,
) -> Result<RunResult, DriverError> {
    let interval = Duration::from_millis(sim.config().world.tick_interval_ms);
    run_with_interval(sim, max_ticks, interval, callback)
}

fn run_with_interval(
    sim: &mut Simulation,
    max_ticks: u64,
    interval: Duration,
    callback: &mut dyn TickCallback,
) -> Result<RunResult, DriverError> {
    info!(
        max_ticks,
        start_tick = sim.calendar().tick(),
        interval_ms = interval.as_millis(),
        "Simulation starting"
    );

    let mut final_summary = None;
    let mut total_ticks: u64 = 0;
    while total_ticks < max_ticks {
        let summary = sim.tick()?;
        total_ticks = total_ticks.saturating_add(1);
        callback.on_tick(&summary, sim);
        final_summary = Some(summary);

        if !interval.is_zero() && total_ticks < max_ticks {
            std::thread::sleep(interval);
        }
    }

    info!(
        total_ticks,
        final_tick = final_summary.as_ref().map(|s| s.tick),
        "Simulation ended"
    );
    Ok(RunResult {
        total_ticks,
        final_summary,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::SubstrateConfig;

    struct Recorder {
        ticks: Vec<u64>,
    }

    impl TickCallback for Recorder {
        fn on_tick(&mut self, summary: &TickSummary, sim: &Simulation) {
            assert_eq!(summary.tick, sim.calendar().tick());
            self.ticks.push(summary.tick);
        }
    }

    #[test]
    fn runs_exactly_max_ticks() {
        let mut sim = Simulation::new(SubstrateConfig::default()).unwrap();
        let mut recorder = Recorder { ticks: Vec::new() };
        let result = run(&mut sim, 3, &mut recorder).unwrap();
        assert_eq!(result.total_ticks, 3);
        assert_eq!(recorder.ticks, vec![1, 2, 3]);
        assert_eq!(result.final_summary.unwrap().tick, 3);
    }

    #[test]
    fn zero_ticks_is_a_no_op() {
        let mut sim = Simulation::new(SubstrateConfig::default()).unwrap();
        let result = run(&mut sim, 0, &mut NoOpCallback).unwrap();
        assert_eq!(result.total_ticks, 0);
        assert!(result.final_summary.is_none());
        assert_eq!(sim.calendar().tick(), 0);
    }

    #[test]
    fn paced_run_with_zero_interval() {
        let mut config = SubstrateConfig::default();
        config.world.tick_interval_ms = 0;
        let mut sim = Simulation::new(config).unwrap();
        let result = run_paced(&mut sim, 2, &mut NoOpCallback).unwrap();
        assert_eq!(result.total_ticks, 2);
    }
}
