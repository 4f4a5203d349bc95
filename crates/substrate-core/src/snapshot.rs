//! Whole-world snapshots.
//!
//! A snapshot holds the tick counter, every block in the grid, and one
//! attribute record per grower and spore paper, written through the same
//! codecs the host uses for per-block storage. Snapshots serialize to
//! JSON.
//!
//! Restoring rebuilds the calendar at the saved tick and reseeds the random
//! source from the world seed and the tick, so a restored world does not
//! replay the draws of the original run. Entities whose container type is
//! no longer configured are logged and left out; their blocks stay.

use serde::{Deserialize, Serialize};
use substrate_codec::{GrowerCodec, PersistenceCodec, SporePaperCodec};
use substrate_types::{AssetCode, AttributeTree, BlockPos, Facing};
use substrate_world::{PlacedBlock, WorldRng};
use tracing::{info, warn};

use crate::clock::GameCalendar;
use crate::config::SubstrateConfig;
use crate::driver::{Grower, Simulation, SporePaper, footprint};
use crate::error::DriverError;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors that can occur while reading or restoring a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot text is not valid JSON for this format.
    #[error("failed to parse snapshot JSON: {source}")]
    Json {
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The snapshot was written by an unknown format version.
    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version in the snapshot.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },

    /// Building the world from configuration or placing an entity failed.
    #[error("failed to restore world: {source}")]
    Driver {
        /// The underlying driver error.
        #[from]
        source: DriverError,
    },
}

impl From<serde_json::Error> for SnapshotError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json { source }
    }
}

/// One block in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    /// Position.
    pub pos: BlockPos,
    /// Block type.
    pub code: AssetCode,
    /// Orientation, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facing: Option<Facing>,
}

/// One grower's storage record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowerRecord {
    /// Origin.
    pub pos: BlockPos,
    /// Container type.
    pub container: AssetCode,
    /// Encoded state.
    pub attributes: AttributeTree,
}

/// One spore paper's storage record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SporePaperRecord {
    /// Position.
    pub pos: BlockPos,
    /// Paper type.
    pub container: AssetCode,
    /// Side the paper is attached to.
    pub side: Facing,
    /// Encoded state.
    pub attributes: AttributeTree,
}

/// Everything needed to rebuild a world, given its configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Format version.
    pub version: u32,
    /// Calendar tick at capture.
    pub tick: u64,
    /// Every occupied position.
    #[serde(default)]
    pub blocks: Vec<BlockRecord>,
    /// Every grower.
    #[serde(default)]
    pub growers: Vec<GrowerRecord>,
    /// Every spore paper.
    #[serde(default)]
    pub spore_papers: Vec<SporePaperRecord>,
}

impl WorldSnapshot {
    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON, checking the format version.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] for malformed input, or
    /// [`SnapshotError::UnsupportedVersion`] for another format version.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }
}

impl Simulation {
    /// Capture the world.
    pub fn snapshot(&self) -> WorldSnapshot {
        let blocks = self
            .blocks
            .iter()
            .map(|(pos, block)| BlockRecord {
                pos,
                code: block.code.clone(),
                facing: block.facing,
            })
            .collect();

        let growers = self
            .growers
            .iter()
            .filter_map(|(pos, grower)| {
                let config = self.config.growers.get(&grower.container)?;
                Some(GrowerRecord {
                    pos: *pos,
                    container: grower.container.clone(),
                    attributes: GrowerCodec::new(config.max_fertility).encode(&grower.state),
                })
            })
            .collect();

        let spore_papers = self
            .papers
            .iter()
            .filter_map(|(pos, paper)| {
                let config = self.config.spore_papers.get(&paper.container)?;
                Some(SporePaperRecord {
                    pos: *pos,
                    container: paper.container.clone(),
                    side: paper.side,
                    attributes: SporePaperCodec::new(config.slot_count).encode(&paper.state),
                })
            })
            .collect();

        WorldSnapshot {
            version: SNAPSHOT_VERSION,
            tick: self.calendar.tick(),
            blocks,
            growers,
            spore_papers,
        }
    }

    /// Rebuild a world from `config` and a snapshot taken with it.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::UnsupportedVersion`] for another format
    /// version, or [`SnapshotError::Driver`] if the configuration is
    /// invalid.
    pub fn restore(
        config: SubstrateConfig,
        snapshot: &WorldSnapshot,
    ) -> Result<Self, SnapshotError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let mut sim = Self::new(config)?;
        sim.calendar = GameCalendar::from_parts(
            snapshot.tick,
            sim.config.calendar.start_hours,
            sim.config.calendar.hours_per_tick,
            sim.config.calendar.hours_per_day,
        )
        .map_err(DriverError::from)?;
        sim.rng = WorldRng::seeded(sim.config.world.seed.wrapping_add(snapshot.tick));

        for record in &snapshot.blocks {
            sim.blocks.place_block(
                record.pos,
                PlacedBlock {
                    code: record.code.clone(),
                    facing: record.facing,
                },
            );
        }

        for record in &snapshot.growers {
            let Some(config) = sim.config.growers.get(&record.container) else {
                warn!(
                    pos = %record.pos,
                    container = %record.container,
                    "Grower type not configured, skipping"
                );
                continue;
            };
            let state = GrowerCodec::new(config.max_fertility).decode(&record.attributes);
            for cell in footprint(config.shape, record.pos) {
                sim.footprints.insert(cell, record.pos);
            }
            sim.growers.insert(
                record.pos,
                Grower {
                    container: record.container.clone(),
                    state,
                },
            );
        }

        for record in &snapshot.spore_papers {
            let Some(config) = sim.config.spore_papers.get(&record.container) else {
                warn!(
                    pos = %record.pos,
                    container = %record.container,
                    "Spore paper type not configured, skipping"
                );
                continue;
            };
            let state = SporePaperCodec::new(config.slot_count).decode(&record.attributes);
            sim.papers.insert(
                record.pos,
                SporePaper {
                    container: record.container.clone(),
                    side: record.side,
                    state,
                },
            );
        }

        info!(
            tick = snapshot.tick,
            blocks = snapshot.blocks.len(),
            growers = sim.growers.len(),
            spore_papers = sim.papers.len(),
            "World restored"
        );
        Ok(sim)
    }
}
