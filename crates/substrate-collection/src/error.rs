//! Error types for the `substrate-collection` crate.

use substrate_types::AssetCode;

/// Errors raised while validating spore paper configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    /// A configuration value is outside its allowed range.
    #[error("invalid spore paper config field `{field}`: {reason}")]
    InvalidConfig {
        /// The offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Reasons an insert is declined. The paper and the held stack are left
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionRejection {
    /// The paper has already been printed.
    #[error("spore paper is already printed")]
    AlreadyConverted,

    /// The targeted slot does not exist.
    #[error("slot {slot} does not exist (paper has {slot_count})")]
    NoSuchSlot {
        /// Requested slot.
        slot: usize,
        /// Number of slots on the paper.
        slot_count: usize,
    },

    /// The targeted slot already holds something.
    #[error("slot {slot} is occupied")]
    SlotOccupied {
        /// Requested slot.
        slot: usize,
    },

    /// The held stack is empty.
    #[error("nothing held to insert")]
    EmptyStack,

    /// The item cannot be collected from.
    #[error("{code} is not spore harvestable")]
    NotHarvestable {
        /// Code of the held item.
        code: AssetCode,
    },

    /// The paper already holds a different item.
    #[error("paper holds {expected}, not {found}")]
    Mismatch {
        /// Item already on the paper.
        expected: AssetCode,
        /// Item offered.
        found: AssetCode,
    },
}
