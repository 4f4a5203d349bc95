//! Growth containers for the Substrate simulation.
//!
//! A fruiting bag or grow bed is inoculated with a spore type, colonizes
//! for a sampled number of hours, then periodically rolls growth attempts
//! against the open positions next to it. Every attempt drains fertility;
//! once fertility runs out the container decays and must be re-inoculated.
//!
//! # Modules
//!
//! - [`config`] -- Per-container-type tunables and the container shape
//! - [`sites`] -- Candidate growth positions per container shape
//! - [`scheduler`] -- The per-tick growth state machine
//! - [`inoculate`] -- Introducing a spore print into a container
//! - [`harvest`] -- Harvest/place item snapshots and break drops
//! - [`status`] -- Read-only status queries for display
//! - [`error`] -- Error and rejection types

pub mod config;
pub mod error;
pub mod harvest;
pub mod inoculate;
pub mod scheduler;
pub mod sites;
pub mod status;

pub use config::{ContainerShape, DropItems, GrowerConfig};
pub use error::{GrowthError, InoculateRejection};
pub use harvest::{break_drops, harvest, place, rotten_drops};
pub use inoculate::inoculate;
pub use scheduler::{GrowthAttempt, GrowthOutcome, GrowthScheduler, GrowthTick, growth_block};
pub use sites::{Candidate, SiteProvider};
pub use status::GrowerStatus;
