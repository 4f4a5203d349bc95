//! Block access: obstruction queries, spawning, and neighbour updates.
//!
//! The growth scheduler asks the host which adjacent positions are open,
//! places new growths there, and asks the host to notify neighbours of
//! each change. [`MemoryWorld`] is a sparse in-memory grid implementing
//! the same contract.

use std::collections::BTreeMap;

use substrate_types::{AssetCode, BlockPos, Facing};
use tracing::debug;

use crate::error::WorldError;

/// Side-effecting block operations issued by the state machines.
pub trait BlockAccessor {
    /// Whether `pos` has no solid obstruction.
    fn is_open(&self, pos: BlockPos) -> bool;

    /// Place a block of type `code` at `pos`, oriented towards `facing`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Occupied`] if `pos` is not open.
    fn spawn(&mut self, code: &AssetCode, pos: BlockPos, facing: Facing)
    -> Result<(), WorldError>;

    /// Ask the host to run neighbour-update logic around `pos`.
    fn notify_neighbors(&mut self, pos: BlockPos);
}

/// A block occupying one position of a [`MemoryWorld`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedBlock {
    /// Block type.
    pub code: AssetCode,
    /// Orientation, if the block has one.
    pub facing: Option<Facing>,
}

/// Sparse in-memory block grid. Positions without an entry are open.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorld {
    /// Occupied positions.
    blocks: BTreeMap<BlockPos, PlacedBlock>,
    /// Positions passed to `notify_neighbors`, in call order.
    neighbor_updates: Vec<BlockPos>,
}

impl MemoryWorld {
    /// Create an empty world.
    pub const fn new() -> Self {
        Self {
            blocks: BTreeMap::new(),
            neighbor_updates: Vec::new(),
        }
    }

    /// Occupy `pos` with an unoriented block, replacing whatever was there.
    pub fn place(&mut self, pos: BlockPos, code: AssetCode) {
        self.blocks.insert(pos, PlacedBlock { code, facing: None });
    }

    /// Occupy `pos` with `block`, keeping its orientation.
    pub fn place_block(&mut self, pos: BlockPos, block: PlacedBlock) {
        self.blocks.insert(pos, block);
    }

    /// Clear `pos`, returning the block that was there.
    pub fn remove(&mut self, pos: BlockPos) -> Option<PlacedBlock> {
        self.blocks.remove(&pos)
    }

    /// The block at `pos`, if any.
    pub fn block_at(&self, pos: BlockPos) -> Option<&PlacedBlock> {
        self.blocks.get(&pos)
    }

    /// Number of occupied positions.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Every occupied position and its block, in position order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockPos, &PlacedBlock)> {
        self.blocks.iter().map(|(pos, block)| (*pos, block))
    }

    /// Positions notified so far, in call order.
    pub fn neighbor_updates(&self) -> &[BlockPos] {
        &self.neighbor_updates
    }

    /// Drain the recorded neighbour notifications.
    pub fn take_neighbor_updates(&mut self) -> Vec<BlockPos> {
        std::mem::take(&mut self.neighbor_updates)
    }
}

impl BlockAccessor for MemoryWorld {
    fn is_open(&self, pos: BlockPos) -> bool {
        !self.blocks.contains_key(&pos)
    }

    fn spawn(
        &mut self,
        code: &AssetCode,
        pos: BlockPos,
        facing: Facing,
    ) -> Result<(), WorldError> {
        if let Some(existing) = self.blocks.get(&pos) {
            return Err(WorldError::Occupied {
                pos,
                occupant: existing.code.clone(),
            });
        }
        debug!(%pos, %code, %facing, "Block spawned");
        self.blocks.insert(
            pos,
            PlacedBlock {
                code: code.clone(),
                facing: Some(facing),
            },
        );
        Ok(())
    }

    fn notify_neighbors(&mut self, pos: BlockPos) {
        self.neighbor_updates.push(pos);
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn empty_world_is_open_everywhere() {
        let world = MemoryWorld::new();
        assert!(world.is_open(BlockPos::new(0, 0, 0)));
        assert_eq!(world.block_count(), 0);
    }

    #[test]
    fn spawn_occupies_and_rejects_second_spawn() {
        let mut world = MemoryWorld::new();
        let pos = BlockPos::new(1, 2, 3);
        let code = AssetCode::parse("mushroom-bolete-normal-west");

        assert!(world.spawn(&code, pos, Facing::West).is_ok());
        assert!(!world.is_open(pos));
        assert_eq!(
            world.block_at(pos).and_then(|b| b.facing),
            Some(Facing::West)
        );

        let second = world.spawn(&code, pos, Facing::East);
        assert!(matches!(second, Err(WorldError::Occupied { .. })));
    }

    #[test]
    fn place_and_remove() {
        let mut world = MemoryWorld::new();
        let pos = BlockPos::new(0, 0, 0);
        world.place(pos, AssetCode::parse("substrate:fruitingbag"));
        assert!(!world.is_open(pos));
        assert!(world.remove(pos).is_some());
        assert!(world.is_open(pos));
    }

    #[test]
    fn oriented_blocks_keep_their_facing() {
        let mut world = MemoryWorld::new();
        let block = PlacedBlock {
            code: AssetCode::parse("substrate:sporepaper"),
            facing: Some(Facing::North),
        };
        world.place_block(BlockPos::new(0, 1, 0), block.clone());
        world.place(BlockPos::new(0, 0, 0), AssetCode::parse("game:soil"));

        let listed: Vec<_> = world.iter().collect();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1], (BlockPos::new(0, 1, 0), &block));
    }

    #[test]
    fn neighbor_updates_are_recorded_in_order() {
        let mut world = MemoryWorld::new();
        world.notify_neighbors(BlockPos::new(1, 0, 0));
        world.notify_neighbors(BlockPos::new(0, 0, 1));
        assert_eq!(
            world.take_neighbor_updates(),
            vec![BlockPos::new(1, 0, 0), BlockPos::new(0, 0, 1)]
        );
        assert!(world.neighbor_updates().is_empty());
    }
}
