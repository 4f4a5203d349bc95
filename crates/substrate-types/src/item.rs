//! Collectible descriptors and item stacks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attributes::AttributeTree;
use crate::code::AssetCode;

/// Whether a collectible is a placeable block or a plain item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectibleKind {
    /// A plain inventory item.
    #[default]
    Item,
    /// A placeable block.
    Block,
}

/// Registry entry describing a collectible type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectibleType {
    /// Stable identifier.
    pub code: AssetCode,

    /// Block or item.
    #[serde(default)]
    pub kind: CollectibleKind,

    /// Variant tags (for example `mushroom: chanterelle`, `side: north`).
    #[serde(default)]
    pub variants: BTreeMap<String, String>,

    /// Whether the collectible can be laid on spore paper for collection.
    #[serde(default)]
    pub spore_harvestable: bool,
}

impl CollectibleType {
    /// Create a plain item type with no variants.
    pub fn item(code: impl Into<AssetCode>) -> Self {
        Self {
            code: code.into(),
            kind: CollectibleKind::Item,
            variants: BTreeMap::new(),
            spore_harvestable: false,
        }
    }

    /// Create a block type with no variants.
    pub fn block(code: impl Into<AssetCode>) -> Self {
        Self {
            kind: CollectibleKind::Block,
            ..Self::item(code)
        }
    }

    /// Builder: attach a variant tag.
    #[must_use]
    pub fn with_variant(mut self, key: &str, value: &str) -> Self {
        self.variants.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Builder: mark as spore-harvestable.
    #[must_use]
    pub const fn harvestable(mut self) -> Self {
        self.spore_harvestable = true;
        self
    }

    /// Look up a variant tag.
    pub fn variant(&self, key: &str) -> Option<&str> {
        self.variants.get(key).map(String::as_str)
    }
}

/// A quantity of one collectible, with its per-stack attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Which collectible this stack holds.
    pub code: AssetCode,
    /// Number of units.
    pub size: u32,
    /// Per-stack attributes (for example a harvested container's snapshot).
    #[serde(default, skip_serializing_if = "AttributeTree::is_empty")]
    pub attributes: AttributeTree,
}

impl ItemStack {
    /// Create a stack with no attributes.
    pub fn new(code: AssetCode, size: u32) -> Self {
        Self {
            code,
            size,
            attributes: AttributeTree::new(),
        }
    }

    /// Create a stack carrying the given attributes.
    pub const fn with_attributes(code: AssetCode, size: u32, attributes: AttributeTree) -> Self {
        Self {
            code,
            size,
            attributes,
        }
    }
}
