//! Harvest and place transforms, and what a container drops when broken.
//!
//! Breaking a healthy container yields one container item carrying a
//! snapshot of its fertility, colonization progress, spore type, and
//! refund item. Placing that item restores the snapshot. Breaking a spent
//! container yields the rotten drops instead.

use substrate_codec::{GrowerItemCodec, PersistenceCodec};
use substrate_types::{AssetCode, GrowerState, ItemStack, NatFloat};
use substrate_world::{RandomSource, Registry};
use tracing::debug;

use crate::config::{DropItems, GrowerConfig};

/// The refund item for a container: its own record, falling back to the
/// container type's configured item.
pub fn effective_refund<'a>(state: &'a GrowerState, config: &'a GrowerConfig) -> Option<&'a str> {
    state
        .refund_item
        .as_deref()
        .or(config.refund_item.as_deref())
}

/// Snapshot a container onto a portable item of type `container`.
pub fn harvest(container: &AssetCode, state: &GrowerState, config: &GrowerConfig) -> ItemStack {
    let codec = GrowerItemCodec::new(config.max_fertility);
    let mut snapshot = state.clone();
    snapshot.refund_item = effective_refund(state, config).map(str::to_owned);
    ItemStack::with_attributes(container.clone(), 1, codec.encode(&snapshot))
}

/// Restore a container's state from a harvested item.
///
/// Absent fields default to a pristine container. The growth timer is not
/// carried over: the first eligible tick after placement is an attempt.
pub fn place(item: &ItemStack, config: &GrowerConfig) -> GrowerState {
    GrowerItemCodec::new(config.max_fertility).decode(&item.attributes)
}

/// Drops for breaking a container: the rotten drops if it is spent,
/// otherwise the harvested container item.
pub fn break_drops<R, G>(
    container: &AssetCode,
    state: &GrowerState,
    config: &GrowerConfig,
    items: &DropItems,
    rng: &mut R,
    registry: &G,
) -> Vec<ItemStack>
where
    R: RandomSource + ?Sized,
    G: Registry + ?Sized,
{
    if state.is_spent() {
        rotten_drops(state, config, items, rng, registry)
    } else {
        vec![harvest(container, state, config)]
    }
}

/// Compose the drops of a decayed container: sampled compost and rot
/// counts, plus a sampled count of the refund item when one is recorded
/// and still registered.
pub fn rotten_drops<R, G>(
    state: &GrowerState,
    config: &GrowerConfig,
    items: &DropItems,
    rng: &mut R,
    registry: &G,
) -> Vec<ItemStack>
where
    R: RandomSource + ?Sized,
    G: Registry + ?Sized,
{
    let mut drops = Vec::new();
    push_sampled(&mut drops, &items.compost, &config.compost_drop, rng);
    push_sampled(&mut drops, &items.rot, &config.rot_drop, rng);

    if let Some(refund) = effective_refund(state, config) {
        match registry.resolve_str(refund) {
            Some(collectible) => {
                let code = collectible.code.clone();
                push_sampled(&mut drops, &code, &config.refund_amount, rng);
            }
            None => debug!(refund, "Refund item no longer registered, skipping"),
        }
    }
    drops
}

/// Whole units for a sampled drop amount: any positive fraction rounds up.
pub fn drop_count(sample: f32) -> u32 {
    if !sample.is_finite() || sample <= 0.0 {
        return 0;
    }
    // Positive, finite, and capped at u32::MAX before the cast.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let count = sample.ceil().min(u32::MAX as f32) as u32;
    count
}

fn push_sampled<R>(drops: &mut Vec<ItemStack>, code: &AssetCode, dist: &NatFloat, rng: &mut R)
where
    R: RandomSource + ?Sized,
{
    let count = drop_count(rng.sample(dist));
    if count > 0 {
        drops.push(ItemStack::new(code.clone(), count));
    }
}
