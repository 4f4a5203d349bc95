//! Spore paper storage codec.

use substrate_types::{AssetCode, AttributeTree, SporePaperState};

use crate::schema::{SPORE_PAPER_SCHEMA, Schema, spore_paper_keys};
use crate::{PersistenceCodec, log_issues, non_blank, sanitize_timestamp};

/// Record key for slot `index`.
pub fn slot_key(index: usize) -> String {
    format!("{}{index}", spore_paper_keys::SLOT)
}

/// Codec for a spore paper's storage record.
///
/// Slot entries beyond `slot_count` are ignored on decode; missing entries
/// decode as empty slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SporePaperCodec {
    /// Number of slots on the paper type.
    pub slot_count: usize,
}

impl SporePaperCodec {
    /// Create a codec for a paper type with `slot_count` slots.
    pub const fn new(slot_count: usize) -> Self {
        Self { slot_count }
    }
}

impl PersistenceCodec<SporePaperState> for SporePaperCodec {
    fn schema(&self) -> &'static Schema {
        &SPORE_PAPER_SCHEMA
    }

    fn encode(&self, state: &SporePaperState) -> AttributeTree {
        let mut tree = AttributeTree::new();
        tree.set_double(
            spore_paper_keys::START_COLLECTING_HOURS,
            state.start_collecting_hours,
        );
        if let Some(spore) = state.result_spore.as_deref() {
            tree.set_string(spore_paper_keys::RESULT_SPORE, spore);
        }
        for (index, slot) in state.slots.iter().enumerate() {
            if let Some(code) = slot {
                tree.set_string(&slot_key(index), code.as_str());
            }
        }
        tree
    }

    fn decode(&self, tree: &AttributeTree) -> SporePaperState {
        log_issues(&SPORE_PAPER_SCHEMA, tree);
        let slots = (0..self.slot_count)
            .map(|index| non_blank(tree, &slot_key(index)).map(AssetCode::from))
            .collect();
        SporePaperState {
            slots,
            start_collecting_hours: sanitize_timestamp(
                tree.get_double(spore_paper_keys::START_COLLECTING_HOURS),
            ),
            result_spore: non_blank(tree, spore_paper_keys::RESULT_SPORE),
        }
    }
}
