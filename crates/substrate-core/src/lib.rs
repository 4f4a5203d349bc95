//! Calendar, configuration, and world driver for the Substrate simulation.
//!
//! This crate wires the growth and collection state machines to a shared
//! game calendar, random source, registry, and block grid, and ticks every
//! entity once per interval.
//!
//! # Modules
//!
//! - [`clock`] -- Game calendar mapping ticks to game hours.
//! - [`config`] -- YAML configuration loading into strongly-typed structs.
//! - [`driver`] -- [`Simulation`]: entity placement, player actions, and
//!   the world tick.
//! - [`snapshot`] -- Whole-world JSON snapshots and restore.
//! - [`runner`] -- Bounded tick loop with a per-tick callback.
//! - [`logging`] -- `tracing` subscriber setup.
//! - [`error`] -- Driver error type.

pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod runner;
pub mod snapshot;

pub use clock::{ClockError, GameCalendar};
pub use config::{CalendarConfig, ConfigError, LoggingConfig, SubstrateConfig, WorldConfig};
pub use driver::{Grower, Simulation, SporePaper, TickSummary, footprint};
pub use error::DriverError;
pub use runner::{NoOpCallback, RunResult, TickCallback, run, run_paced};
pub use snapshot::{SNAPSHOT_VERSION, SnapshotError, WorldSnapshot};
