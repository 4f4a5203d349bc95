//! Shared type definitions for the Substrate growth simulation.
//!
//! This crate is the single source of truth for the value types that flow
//! between the growth and collection state machines, the persistence codec,
//! and the host world.
//!
//! # Modules
//!
//! - [`attributes`] -- Flat named-field record ([`AttributeTree`]) used for
//!   storage and item snapshots
//! - [`code`] -- Asset codes (`domain:path`) and spore-name extraction
//! - [`item`] -- Collectible descriptors and item stacks
//! - [`natfloat`] -- The natural distribution used for sampled durations
//! - [`position`] -- Block positions and facings
//! - [`state`] -- Persisted per-entity state for growers and spore papers

pub mod attributes;
pub mod code;
pub mod item;
pub mod natfloat;
pub mod position;
pub mod state;

// Re-export all public types at crate root for convenience.
pub use attributes::{AttributeTree, AttributeValue};
pub use code::{AssetCode, mushroom_name};
pub use item::{CollectibleKind, CollectibleType, ItemStack};
pub use natfloat::{DistributionShape, NatFloat};
pub use position::{BlockPos, Facing};
pub use state::{GrowerState, SporePaperState};
