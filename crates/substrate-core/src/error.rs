//! Error types for the `substrate-core` crate.

use substrate_collection::CollectionRejection;
use substrate_growth::InoculateRejection;
use substrate_types::{AssetCode, BlockPos};
use substrate_world::WorldError;

use crate::clock::ClockError;
use crate::config::ConfigError;

/// Errors returned by [`Simulation`](crate::driver::Simulation) operations.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The configuration failed validation.
    #[error("configuration error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: ConfigError,
    },

    /// The calendar could not be built or advanced.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// A block operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// The container code has no grower or spore paper configuration.
    #[error("no container type configured for {code}")]
    UnknownContainer {
        /// The unconfigured code.
        code: AssetCode,
    },

    /// No grower occupies the position.
    #[error("no grower at {pos}")]
    NoGrower {
        /// The queried position.
        pos: BlockPos,
    },

    /// No spore paper occupies the position.
    #[error("no spore paper at {pos}")]
    NoSporePaper {
        /// The queried position.
        pos: BlockPos,
    },

    /// Nothing occupies the position.
    #[error("no block at {pos}")]
    NoBlock {
        /// The queried position.
        pos: BlockPos,
    },

    /// The container declined the spore print.
    #[error("inoculation at {pos} declined: {source}")]
    Inoculate {
        /// Container position.
        pos: BlockPos,
        /// Why it was declined.
        source: InoculateRejection,
    },

    /// The spore paper declined the insert.
    #[error("spore paper at {pos} declined: {source}")]
    Collection {
        /// Paper position.
        pos: BlockPos,
        /// Why it was declined.
        source: CollectionRejection,
    },
}
