//! Per-paper-type configuration.

use serde::{Deserialize, Serialize};
use substrate_types::AssetCode;

use crate::error::CollectionError;

/// Tunables for one spore paper type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SporePaperConfig {
    /// In-game days a full paper must sit before printing (default: 0).
    #[serde(default)]
    pub collect_days: f64,

    /// Number of mushroom slots (default: 4).
    #[serde(default = "default_slot_count")]
    pub slot_count: usize,

    /// Item that replaces every slot on printing (default: `game:rot`).
    #[serde(default = "default_byproduct")]
    pub byproduct_item: AssetCode,
}

impl Default for SporePaperConfig {
    fn default() -> Self {
        Self {
            collect_days: 0.0,
            slot_count: default_slot_count(),
            byproduct_item: default_byproduct(),
        }
    }
}

impl SporePaperConfig {
    /// Total collection time in hours for a calendar with `hours_per_day`.
    pub fn collect_hours(&self, hours_per_day: f64) -> f64 {
        self.collect_days * hours_per_day
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), CollectionError> {
        if !self.collect_days.is_finite() || self.collect_days < 0.0 {
            return Err(CollectionError::InvalidConfig {
                field: "collect_days",
                reason: "must be a non-negative number".to_owned(),
            });
        }
        if self.slot_count == 0 {
            return Err(CollectionError::InvalidConfig {
                field: "slot_count",
                reason: "must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

const fn default_slot_count() -> usize {
    4
}

fn default_byproduct() -> AssetCode {
    AssetCode::parse("game:rot")
}
