//! Block positions and facings.
//!
//! Positions are integer grid coordinates. All offsets use saturating
//! arithmetic so that a position at the edge of the coordinate range
//! clamps instead of wrapping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the six axis-aligned faces of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    /// Negative Z.
    North,
    /// Positive X.
    East,
    /// Positive Z.
    South,
    /// Negative X.
    West,
    /// Positive Y.
    Up,
    /// Negative Y.
    Down,
}

impl Facing {
    /// The four horizontal facings in north, east, south, west order.
    pub const HORIZONTALS: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Return the facing pointing the opposite way.
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Lowercase code used in asset paths (`north`, `up`, ...).
    pub const fn code(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Unit offset `(dx, dy, dz)` for this facing.
    pub const fn normal(self) -> (i32, i32, i32) {
        match self {
            Self::North => (0, 0, -1),
            Self::East => (1, 0, 0),
            Self::South => (0, 0, 1),
            Self::West => (-1, 0, 0),
            Self::Up => (0, 1, 0),
            Self::Down => (0, -1, 0),
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Integer block coordinates.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BlockPos {
    /// East-west axis.
    pub x: i32,
    /// Vertical axis.
    pub y: i32,
    /// North-south axis.
    pub z: i32,
}

impl BlockPos {
    /// Create a position from its coordinates.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return the position offset by `(dx, dy, dz)`.
    pub const fn add(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            z: self.z.saturating_add(dz),
        }
    }

    /// Return the neighbouring position on the given face.
    pub const fn offset(self, facing: Facing) -> Self {
        let (dx, dy, dz) = facing.normal();
        self.add(dx, dy, dz)
    }

    /// The position directly above.
    pub const fn up(self) -> Self {
        self.offset(Facing::Up)
    }

    /// The position one step east.
    pub const fn east(self) -> Self {
        self.offset(Facing::East)
    }

    /// The position one step south.
    pub const fn south(self) -> Self {
        self.offset(Facing::South)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}
