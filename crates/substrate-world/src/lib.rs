//! Host-world boundary for the Substrate growth simulation.
//!
//! The state machines never reach for ambient globals. Everything they need
//! from the surrounding world is injected through the traits in this crate,
//! and each trait ships with an in-memory implementation for tests and
//! headless hosts.
//!
//! # Modules
//!
//! - [`accessor`] -- [`BlockAccessor`] (obstruction queries, spawning,
//!   neighbour notifications) and the in-memory [`MemoryWorld`]
//! - [`error`] -- Error types for world operations ([`WorldError`])
//! - [`random`] -- [`RandomSource`], the seeded [`WorldRng`], and the
//!   scripted [`FixedRandom`]
//! - [`registry`] -- [`Registry`] lookups and the [`ItemRegistry`] snapshot
//! - [`time`] -- [`TimeSource`] and the manually-driven [`ManualClock`]

pub mod accessor;
pub mod error;
pub mod random;
pub mod registry;
pub mod time;

// Re-export primary types at crate root.
pub use accessor::{BlockAccessor, MemoryWorld, PlacedBlock};
pub use error::WorldError;
pub use random::{FixedRandom, RandomSource, WorldRng};
pub use registry::{ItemRegistry, Registry};
pub use time::{ManualClock, TimeSource};
