//! Per-container-type configuration.
//!
//! One [`GrowerConfig`] exists per container block type. Every field has a
//! default, so an empty YAML mapping yields a working fruiting bag:
//!
//! ```yaml
//! max_fertility: 1000
//! grow_chance: 0.1
//! fertility_drain: { avg: 25, var: 5 }
//! grow_increment: { avg: 4, var: 1, dist: gaussian }
//! colonize_increment: { avg: 24, var: 0 }
//! acceptable_spores: [chanterelle, bolete]
//! shape: single_block
//! refund_item: game:drygrass
//! ```

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use substrate_types::{AssetCode, NatFloat};

use crate::error::GrowthError;

/// Footprint of a container, which decides where growths may appear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerShape {
    /// A 2x1 bed; growths appear on top of its cells.
    GrowBed,
    /// A single block (fruiting bag); growths appear on its four sides.
    #[default]
    SingleBlock,
}

impl ContainerShape {
    /// The other container kind, used to tell the player where an
    /// unacceptable spore would grow instead.
    pub const fn counterpart(self) -> Self {
        match self {
            Self::GrowBed => Self::SingleBlock,
            Self::SingleBlock => Self::GrowBed,
        }
    }
}

impl fmt::Display for ContainerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GrowBed => f.write_str("grow bed"),
            Self::SingleBlock => f.write_str("fruiting bag"),
        }
    }
}

/// Tunables for one container type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowerConfig {
    /// Fertility of a fresh container (default: 1000).
    #[serde(default = "default_max_fertility")]
    pub max_fertility: f32,

    /// Per-site probability that a growth attempt spawns (default: 0.1).
    #[serde(default = "default_grow_chance")]
    pub grow_chance: f64,

    /// Fertility consumed per growth attempt (default: none).
    #[serde(default)]
    pub fertility_drain: NatFloat,

    /// Hours between growth attempts (default: 2).
    #[serde(default = "default_increment")]
    pub grow_increment: NatFloat,

    /// Hours of colonization after inoculation (default: 2).
    #[serde(default = "default_increment")]
    pub colonize_increment: NatFloat,

    /// Spore types this container accepts.
    #[serde(default)]
    pub acceptable_spores: BTreeSet<String>,

    /// Footprint of the container.
    #[serde(default)]
    pub shape: ContainerShape,

    /// Item refunded on decay when the container itself records none.
    #[serde(default)]
    pub refund_item: Option<String>,

    /// Compost units dropped when a spent container is broken.
    #[serde(default)]
    pub compost_drop: NatFloat,

    /// Rot units dropped when a spent container is broken.
    #[serde(default)]
    pub rot_drop: NatFloat,

    /// Refund item units dropped when a spent container is broken.
    #[serde(default)]
    pub refund_amount: NatFloat,
}

impl Default for GrowerConfig {
    fn default() -> Self {
        Self {
            max_fertility: default_max_fertility(),
            grow_chance: default_grow_chance(),
            fertility_drain: NatFloat::default(),
            grow_increment: default_increment(),
            colonize_increment: default_increment(),
            acceptable_spores: BTreeSet::new(),
            shape: ContainerShape::default(),
            refund_item: None,
            compost_drop: NatFloat::default(),
            rot_drop: NatFloat::default(),
            refund_amount: NatFloat::default(),
        }
    }
}

impl GrowerConfig {
    /// Whether `spore` may be inoculated into this container type.
    pub fn accepts(&self, spore: &str) -> bool {
        self.acceptable_spores.contains(spore)
    }

    /// Builder: accept additional spore types.
    #[must_use]
    pub fn with_spores<I, S>(mut self, spores: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.acceptable_spores
            .extend(spores.into_iter().map(Into::into));
        self
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`GrowthError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), GrowthError> {
        if !self.max_fertility.is_finite() || self.max_fertility <= 0.0 {
            return Err(invalid("max_fertility", "must be a positive number"));
        }
        if !(0.0..=1.0).contains(&self.grow_chance) {
            return Err(invalid("grow_chance", "must be between 0 and 1"));
        }
        let distributions = [
            ("fertility_drain", &self.fertility_drain),
            ("grow_increment", &self.grow_increment),
            ("colonize_increment", &self.colonize_increment),
            ("compost_drop", &self.compost_drop),
            ("rot_drop", &self.rot_drop),
            ("refund_amount", &self.refund_amount),
        ];
        for (field, dist) in distributions {
            if !dist.avg.is_finite() || !dist.var.is_finite() {
                return Err(invalid(field, "avg and var must be finite"));
            }
        }
        Ok(())
    }
}

/// Items produced when a container decays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropItems {
    /// Compost item code (default: `game:compost`).
    #[serde(default = "default_compost")]
    pub compost: AssetCode,

    /// Rot item code (default: `game:rot`).
    #[serde(default = "default_rot")]
    pub rot: AssetCode,
}

impl Default for DropItems {
    fn default() -> Self {
        Self {
            compost: default_compost(),
            rot: default_rot(),
        }
    }
}

fn invalid(field: &'static str, reason: &str) -> GrowthError {
    GrowthError::InvalidConfig {
        field,
        reason: reason.to_owned(),
    }
}

const fn default_max_fertility() -> f32 {
    1000.0
}

const fn default_grow_chance() -> f64 {
    0.1
}

const fn default_increment() -> NatFloat {
    NatFloat::constant(2.0)
}

fn default_compost() -> AssetCode {
    AssetCode::parse("game:compost")
}

fn default_rot() -> AssetCode {
    AssetCode::parse("game:rot")
}
