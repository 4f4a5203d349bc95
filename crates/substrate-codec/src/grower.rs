//! Grower codecs: full storage records and harvested-item snapshots.
//!
//! The storage record writes every field. The item snapshot only writes
//! fields that differ from a pristine container, so a freshly crafted
//! container and a harvested-but-untouched one stack together.

use substrate_types::{AttributeTree, GrowerState};

use crate::{PersistenceCodec, log_issues, non_blank, sanitize_timestamp};
use crate::schema::{GROWER_ITEM_SCHEMA, GROWER_SCHEMA, Schema, grower_keys, item_keys};

/// Fertility differences at or below this are treated as "still full"
/// when snapshotting onto an item.
pub const FULL_FERTILITY_TOLERANCE: f32 = 0.01;

/// Clamp a decoded fertility into `[0, max_fertility]`, falling back to
/// `max_fertility` for a missing or non-finite value.
fn sanitize_fertility(raw: Option<f32>, max_fertility: f32) -> f32 {
    match raw {
        Some(v) if v.is_finite() => v.max(0.0).min(max_fertility),
        _ => max_fertility,
    }
}

/// A non-negative hour count; anything else decodes to zero.
fn sanitize_hours(raw: Option<f64>) -> f64 {
    raw.filter(|v| v.is_finite() && *v >= 0.0).unwrap_or(0.0)
}

/// Codec for a placed grower's storage record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowerCodec {
    /// Maximum fertility of the container type; the default for a missing
    /// fertility field.
    pub max_fertility: f32,
}

impl GrowerCodec {
    /// Create a codec for a container type.
    pub const fn new(max_fertility: f32) -> Self {
        Self { max_fertility }
    }
}

impl PersistenceCodec<GrowerState> for GrowerCodec {
    fn schema(&self) -> &'static Schema {
        &GROWER_SCHEMA
    }

    fn encode(&self, state: &GrowerState) -> AttributeTree {
        let mut tree = AttributeTree::new();
        if let Some(spore) = state.spore() {
            tree.set_string(grower_keys::SPORE, spore);
        }
        if let Some(refund) = state.refund_item.as_deref() {
            tree.set_string(grower_keys::REFUND_ITEM, refund);
        }
        tree.set_float(grower_keys::FERTILITY, state.fertility);
        tree.set_double(grower_keys::START_GROWING_HOURS, state.start_growing_hours);
        tree.set_double(
            grower_keys::ELAPSED_COLONIZE_HOURS,
            state.elapsed_colonize_hours,
        );
        tree.set_double(grower_keys::COLONIZE_DURATION, state.colonize_duration_hours);
        tree.set_double(grower_keys::NEXT_GROW_HOURS, state.next_grow_hours);
        tree
    }

    fn decode(&self, tree: &AttributeTree) -> GrowerState {
        log_issues(&GROWER_SCHEMA, tree);
        GrowerState {
            inoculated_spore: non_blank(tree, grower_keys::SPORE),
            refund_item: non_blank(tree, grower_keys::REFUND_ITEM),
            fertility: sanitize_fertility(
                tree.get_float(grower_keys::FERTILITY),
                self.max_fertility,
            ),
            start_growing_hours: sanitize_timestamp(
                tree.get_double(grower_keys::START_GROWING_HOURS),
            ),
            elapsed_colonize_hours: sanitize_hours(
                tree.get_double(grower_keys::ELAPSED_COLONIZE_HOURS),
            ),
            colonize_duration_hours: sanitize_hours(
                tree.get_double(grower_keys::COLONIZE_DURATION),
            ),
            next_grow_hours: sanitize_timestamp(tree.get_double(grower_keys::NEXT_GROW_HOURS)),
            last_colonize_progress: None,
        }
    }
}

/// Codec for the snapshot carried by a harvested container item.
///
/// Only non-default fields are written:
///
/// | Field                  | Written when                         |
/// |------------------------|--------------------------------------|
/// | `fertility`            | differs from max by more than 0.01   |
/// | `elapsedColonizeHours` | positive                             |
/// | `colonizeDuration`     | positive                             |
/// | `sporetype`            | inoculated                           |
/// | `refundItem`           | a refund item is recorded            |
///
/// Placing from a snapshot resets the growth timer: the next attempt is
/// armed fresh once the container is ready.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowerItemCodec {
    /// Maximum fertility of the container type.
    pub max_fertility: f32,
}

impl GrowerItemCodec {
    /// Create a codec for a container type.
    pub const fn new(max_fertility: f32) -> Self {
        Self { max_fertility }
    }
}

impl PersistenceCodec<GrowerState> for GrowerItemCodec {
    fn schema(&self) -> &'static Schema {
        &GROWER_ITEM_SCHEMA
    }

    fn encode(&self, state: &GrowerState) -> AttributeTree {
        let mut tree = AttributeTree::new();
        if (state.fertility - self.max_fertility).abs() > FULL_FERTILITY_TOLERANCE {
            tree.set_float(item_keys::FERTILITY, state.fertility);
        }
        if let Some(refund) = state.refund_item.as_deref() {
            tree.set_string(item_keys::REFUND_ITEM, refund);
        }
        if state.elapsed_colonize_hours > 0.0 {
            tree.set_double(item_keys::ELAPSED_COLONIZE_HOURS, state.elapsed_colonize_hours);
        }
        if state.colonize_duration_hours > 0.0 {
            tree.set_double(item_keys::COLONIZE_DURATION, state.colonize_duration_hours);
        }
        if let Some(spore) = state.spore() {
            tree.set_string(item_keys::SPORE, spore);
        }
        tree
    }

    fn decode(&self, tree: &AttributeTree) -> GrowerState {
        log_issues(&GROWER_ITEM_SCHEMA, tree);
        GrowerState {
            inoculated_spore: non_blank(tree, item_keys::SPORE),
            refund_item: non_blank(tree, item_keys::REFUND_ITEM),
            fertility: sanitize_fertility(tree.get_float(item_keys::FERTILITY), self.max_fertility),
            elapsed_colonize_hours: sanitize_hours(
                tree.get_double(item_keys::ELAPSED_COLONIZE_HOURS),
            ),
            colonize_duration_hours: sanitize_hours(
                tree.get_double(item_keys::COLONIZE_DURATION),
            ),
            ..GrowerState::new(self.max_fertility)
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn colonizing_state() -> GrowerState {
        GrowerState {
            inoculated_spore: Some("chanterelle".to_owned()),
            refund_item: Some("game:drygrass".to_owned()),
            fertility: 750.0,
            start_growing_hours: 0.0,
            elapsed_colonize_hours: 3.5,
            colonize_duration_hours: 10.0,
            next_grow_hours: 0.0,
            last_colonize_progress: Some(120.25),
        }
    }

    #[test]
    fn storage_round_trip_is_exact() {
        let codec = GrowerCodec::new(1000.0);
        let mut state = colonizing_state();
        state.fertility = 123.456_79;
        state.next_grow_hours = 7_000.125;
        state.start_growing_hours = 1.0 / 3.0;

        let decoded = codec.decode(&codec.encode(&state));
        assert_eq!(decoded, state);
        assert_eq!(decoded.fertility.to_bits(), state.fertility.to_bits());
        assert_eq!(decoded.last_colonize_progress, None);
    }

    #[test]
    fn storage_round_trip_of_pristine_and_spent_states() {
        let codec = GrowerCodec::new(1000.0);
        let pristine = GrowerState::new(1000.0);
        assert_eq!(codec.decode(&codec.encode(&pristine)), pristine);

        let mut spent = colonizing_state();
        spent.reset_spent();
        assert_eq!(codec.decode(&codec.encode(&spent)), spent);
    }

    #[test]
    fn blank_spore_survives_round_trip_as_uninoculated() {
        let codec = GrowerCodec::new(1000.0);
        let mut state = colonizing_state();
        state.inoculated_spore = Some("  ".to_owned());
        let decoded = codec.decode(&codec.encode(&state));
        assert_eq!(decoded, state);
        assert_eq!(decoded.inoculated_spore, None);
    }

    #[test]
    fn empty_record_decodes_to_defaults() {
        let codec = GrowerCodec::new(800.0);
        let state = codec.decode(&AttributeTree::new());
        assert_eq!(state, GrowerState::new(800.0));
    }

    #[test]
    fn corrupt_fields_fall_back_without_affecting_others() {
        let codec = GrowerCodec::new(1000.0);
        let mut tree = AttributeTree::new();
        tree.set_string(grower_keys::FERTILITY, "not a number");
        tree.set_double(grower_keys::ELAPSED_COLONIZE_HOURS, f64::NAN);
        tree.set_double(grower_keys::COLONIZE_DURATION, 6.0);
        tree.set_string(grower_keys::SPORE, "bolete");

        let state = codec.decode(&tree);
        assert_eq!(state.fertility, 1000.0);
        assert_eq!(state.elapsed_colonize_hours, 0.0);
        assert_eq!(state.colonize_duration_hours, 6.0);
        assert_eq!(state.spore(), Some("bolete"));
    }

    #[test]
    fn out_of_range_fertility_is_clamped() {
        let codec = GrowerCodec::new(1000.0);
        let mut tree = AttributeTree::new();
        tree.set_float(grower_keys::FERTILITY, -5.0);
        assert_eq!(codec.decode(&tree).fertility, 0.0);
        tree.set_float(grower_keys::FERTILITY, 5000.0);
        assert_eq!(codec.decode(&tree).fertility, 1000.0);
    }

    #[test]
    fn blank_spore_string_decodes_as_absent() {
        let codec = GrowerCodec::new(1000.0);
        let mut tree = AttributeTree::new();
        tree.set_string(grower_keys::SPORE, "");
        assert!(!codec.decode(&tree).is_inoculated());
    }

    #[test]
    fn item_snapshot_reproduces_harvested_values() {
        let codec = GrowerItemCodec::new(1000.0);
        let state = colonizing_state();
        let tree = codec.encode(&state);

        assert_eq!(tree.get_float(item_keys::FERTILITY), Some(750.0));
        assert_eq!(tree.get_double(item_keys::ELAPSED_COLONIZE_HOURS), Some(3.5));
        assert_eq!(tree.get_double(item_keys::COLONIZE_DURATION), Some(10.0));
        assert_eq!(tree.get_string(item_keys::SPORE), Some("chanterelle"));

        let placed = codec.decode(&tree);
        assert_eq!(placed.fertility, 750.0);
        assert_eq!(placed.elapsed_colonize_hours, 3.5);
        assert_eq!(placed.colonize_duration_hours, 10.0);
        assert_eq!(placed.spore(), Some("chanterelle"));
        assert_eq!(placed.refund_item.as_deref(), Some("game:drygrass"));
        assert_eq!(placed.next_grow_hours, 0.0);
    }

    #[test]
    fn pristine_snapshot_is_empty() {
        let codec = GrowerItemCodec::new(1000.0);
        let tree = codec.encode(&GrowerState::new(1000.0));
        assert!(tree.is_empty());
        assert_eq!(codec.decode(&tree), GrowerState::new(1000.0));
    }

    #[test]
    fn near_full_fertility_snaps_to_full() {
        let codec = GrowerItemCodec::new(1000.0);
        let mut state = GrowerState::new(1000.0);
        state.fertility = 999.995;
        assert!(codec.encode(&state).is_empty());
    }

    #[test]
    fn storage_record_survives_json() {
        let codec = GrowerCodec::new(1000.0);
        let state = colonizing_state();
        let json = serde_json::to_string(&codec.encode(&state)).unwrap_or_default();
        let tree: AttributeTree = serde_json::from_str(&json).unwrap_or_default();
        assert_eq!(codec.decode(&tree), state);
    }
}
