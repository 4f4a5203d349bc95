//! Collectible registry lookups.
//!
//! The registry is read-only once the world starts: the state machines
//! resolve string codes to [`CollectibleType`] descriptors and must cope
//! with a code that no longer resolves (for example a refund item from a
//! mod that was since removed).

use std::collections::BTreeMap;

use substrate_types::{AssetCode, CollectibleType};

use crate::error::WorldError;

/// Read-only lookup of collectible types by code.
pub trait Registry {
    /// Resolve a code to its descriptor, if registered.
    fn resolve(&self, code: &AssetCode) -> Option<&CollectibleType>;

    /// Resolve a raw string code (normalising the domain first).
    fn resolve_str(&self, code: &str) -> Option<&CollectibleType> {
        self.resolve(&AssetCode::parse(code))
    }
}

/// An immutable snapshot of registered collectibles.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    /// Descriptors keyed by code.
    entries: BTreeMap<AssetCode, CollectibleType>,
}

impl ItemRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Build a registry from a list of descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateCollectible`] if two descriptors share
    /// a code.
    pub fn from_entries(
        entries: impl IntoIterator<Item = CollectibleType>,
    ) -> Result<Self, WorldError> {
        let mut registry = Self::new();
        for entry in entries {
            registry.register(entry)?;
        }
        Ok(registry)
    }

    /// Add a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateCollectible`] if the code is taken.
    pub fn register(&mut self, entry: CollectibleType) -> Result<(), WorldError> {
        if self.entries.contains_key(&entry.code) {
            return Err(WorldError::DuplicateCollectible(entry.code));
        }
        self.entries.insert(entry.code.clone(), entry);
        Ok(())
    }

    /// Number of registered collectibles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over every descriptor in code order.
    pub fn iter(&self) -> impl Iterator<Item = &CollectibleType> {
        self.entries.values()
    }

    /// All spore-harvestable collectibles.
    pub fn spore_harvestable(&self) -> impl Iterator<Item = &CollectibleType> {
        self.entries.values().filter(|c| c.spore_harvestable)
    }
}

impl Registry for ItemRegistry {
    fn resolve(&self, code: &AssetCode) -> Option<&CollectibleType> {
        self.entries.get(code)
    }
}
