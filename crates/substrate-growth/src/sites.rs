//! Candidate growth positions around a container.
//!
//! | Shape          | Offsets from origin                          | Facing |
//! |----------------|----------------------------------------------|--------|
//! | `GrowBed`      | up, up+east, up+south, up+east+south         | up     |
//! | `SingleBlock`  | north, east, south, west                     | side   |
//!
//! Only positions the host reports as open are returned. No open positions
//! is a normal steady state, not an error.

use substrate_types::{BlockPos, Facing};
use substrate_world::BlockAccessor;

use crate::config::ContainerShape;

/// A position where a growth may appear, with the direction pointing away
/// from the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Target position.
    pub pos: BlockPos,
    /// Direction from the container towards `pos`.
    pub facing: Facing,
}

/// Enumerates candidate growth positions for one container shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteProvider {
    /// Four positions on top of a 2x1 bed footprint.
    GrowBed,
    /// The four horizontal neighbours of a single block.
    SingleBlock,
}

impl From<ContainerShape> for SiteProvider {
    fn from(shape: ContainerShape) -> Self {
        match shape {
            ContainerShape::GrowBed => Self::GrowBed,
            ContainerShape::SingleBlock => Self::SingleBlock,
        }
    }
}

impl SiteProvider {
    /// Every candidate position, open or not, in a fixed order.
    pub fn candidates(self, origin: BlockPos) -> Vec<Candidate> {
        match self {
            Self::GrowBed => {
                let above = origin.up();
                [above, above.east(), above.south(), above.east().south()]
                    .into_iter()
                    .map(|pos| Candidate {
                        pos,
                        facing: Facing::Up,
                    })
                    .collect()
            }
            Self::SingleBlock => Facing::HORIZONTALS
                .into_iter()
                .map(|facing| Candidate {
                    pos: origin.offset(facing),
                    facing,
                })
                .collect(),
        }
    }

    /// Candidates the host currently reports as open.
    pub fn open_sites<W>(self, origin: BlockPos, world: &W) -> Vec<Candidate>
    where
        W: BlockAccessor + ?Sized,
    {
        self.candidates(origin)
            .into_iter()
            .filter(|c| world.is_open(c.pos))
            .collect()
    }

    /// Number of open candidates.
    pub fn open_count<W>(self, origin: BlockPos, world: &W) -> usize
    where
        W: BlockAccessor + ?Sized,
    {
        self.candidates(origin)
            .iter()
            .filter(|c| world.is_open(c.pos))
            .count()
    }
}
