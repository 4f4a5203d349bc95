//! Error types for the `substrate-world` crate.

use substrate_types::{AssetCode, BlockPos};

/// Errors that can occur during host-world operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The target position is already occupied by a solid block.
    #[error("position {pos} is occupied by {occupant}")]
    Occupied {
        /// The contested position.
        pos: BlockPos,
        /// Code of the block already there.
        occupant: AssetCode,
    },

    /// A collectible code did not resolve in the registry.
    #[error("unknown collectible: {0}")]
    UnknownCollectible(AssetCode),

    /// A duplicate registry entry was inserted.
    #[error("duplicate collectible code: {0}")]
    DuplicateCollectible(AssetCode),
}
