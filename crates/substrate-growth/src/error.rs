//! Error types for the `substrate-growth` crate.
//!
//! [`GrowthError`] covers invalid configuration. [`InoculateRejection`] is a
//! declined player action: the container is left untouched and the host may
//! show the reason as a notice.

use substrate_types::AssetCode;

use crate::config::ContainerShape;

/// Errors raised while validating growth configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GrowthError {
    /// A configuration value is outside its allowed range.
    #[error("invalid grower config field `{field}`: {reason}")]
    InvalidConfig {
        /// The offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Reasons an inoculation attempt is declined.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InoculateRejection {
    /// The container already holds a spore type.
    #[error("container is already inoculated with {spore}")]
    AlreadyInoculated {
        /// The spore already present.
        spore: String,
    },

    /// The held stack is empty.
    #[error("nothing held to inoculate with")]
    EmptyStack,

    /// The held item is not a spore print (or has no mushroom variant).
    #[error("{code} is not a spore print")]
    NotSporePrint {
        /// Code of the held item.
        code: AssetCode,
    },

    /// The spore cannot grow in this kind of container.
    #[error("{spore} cannot grow here; it needs a {required_container}")]
    UnacceptableSpore {
        /// Spore type of the print.
        spore: String,
        /// The container kind that would accept it.
        required_container: ContainerShape,
    },
}
