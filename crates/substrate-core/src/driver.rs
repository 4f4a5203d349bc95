//! The world driver: owns every grower and spore paper and ticks them.
//!
//! Each [`Simulation::tick`] runs these phases in order:
//!
//! 1. **Calendar** -- advance one tick and read the game hour.
//! 2. **Growers** -- run every grower's growth scheduler against the shared
//!    block grid, random source, and registry.
//! 3. **Spore papers** -- run every paper's collection timer; printed papers
//!    swap their block for the printed variant.
//! 4. **Summary** -- return counts for the host.
//!
//! An entity whose container type has no configuration is logged and
//! skipped; the rest of the world still ticks.

use std::collections::BTreeMap;

use substrate_collection::{CollectionTick, CollectionTimer};
use substrate_growth::{
    ContainerShape, GrowerConfig, GrowerStatus, GrowthOutcome, GrowthScheduler, GrowthTick,
    break_drops, place,
};
use substrate_types::{AssetCode, BlockPos, Facing, GrowerState, ItemStack, SporePaperState};
use substrate_world::{
    BlockAccessor, ItemRegistry, MemoryWorld, PlacedBlock, Registry, TimeSource, WorldError,
    WorldRng,
};
use tracing::{debug, info, warn};

use crate::clock::GameCalendar;
use crate::config::SubstrateConfig;
use crate::error::DriverError;

/// Variant key naming the spore a printed paper carries.
const PRINTED_VARIANT: &str = "mushroom";

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A placed growth container.
#[derive(Debug, Clone, PartialEq)]
pub struct Grower {
    /// Container type; the key into the grower configuration.
    pub container: AssetCode,
    /// Persisted state.
    pub state: GrowerState,
}

/// A placed spore paper.
#[derive(Debug, Clone, PartialEq)]
pub struct SporePaper {
    /// Paper type; the key into the spore paper configuration.
    pub container: AssetCode,
    /// Side the paper is attached to.
    pub side: Facing,
    /// Persisted state.
    pub state: SporePaperState,
}

/// Block positions a container of `shape` occupies.
pub fn footprint(shape: ContainerShape, origin: BlockPos) -> Vec<BlockPos> {
    match shape {
        ContainerShape::GrowBed => vec![
            origin,
            origin.east(),
            origin.south(),
            origin.east().south(),
        ],
        ContainerShape::SingleBlock => vec![origin],
    }
}

// ---------------------------------------------------------------------------
// TickSummary
// ---------------------------------------------------------------------------

/// What one world tick did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickSummary {
    /// The tick number that just ran.
    pub tick: u64,
    /// Game hour the tick ran at.
    pub hours: f64,
    /// Growers ticked.
    pub growers: usize,
    /// Spore papers ticked.
    pub spore_papers: usize,
    /// Growths placed this tick.
    pub growths: usize,
    /// Growths that won their roll but could not be placed.
    pub failed_growths: usize,
    /// Growers that finished colonizing.
    pub colonized: usize,
    /// Growers that ran out of fertility.
    pub decayed: usize,
    /// Spore papers that printed.
    pub printed: usize,
    /// Entities whose persisted state changed.
    pub dirty: usize,
    /// Entities skipped for lack of configuration.
    pub skipped: usize,
}

impl TickSummary {
    fn record_growth(&mut self, result: GrowthTick) {
        self.growers = self.growers.saturating_add(1);
        if result.dirty {
            self.dirty = self.dirty.saturating_add(1);
        }
        match result.outcome {
            GrowthOutcome::Decayed => {
                self.decayed = self.decayed.saturating_add(1);
            }
            GrowthOutcome::Colonized { .. } => {
                self.colonized = self.colonized.saturating_add(1);
            }
            GrowthOutcome::Attempted(attempt) => {
                self.growths = self.growths.saturating_add(attempt.spawned.len());
                self.failed_growths = self.failed_growths.saturating_add(attempt.failed);
            }
            GrowthOutcome::Dormant
            | GrowthOutcome::Colonizing { .. }
            | GrowthOutcome::Waiting { .. } => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// Every entity of one world plus the shared clock, random source,
/// registry, and block grid.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Validated configuration.
    pub(crate) config: SubstrateConfig,
    /// Collectibles from the configuration.
    pub(crate) registry: ItemRegistry,
    /// Game calendar.
    pub(crate) calendar: GameCalendar,
    /// Shared random source.
    pub(crate) rng: WorldRng,
    /// Block grid.
    pub(crate) blocks: MemoryWorld,
    /// Growers by origin.
    pub(crate) growers: BTreeMap<BlockPos, Grower>,
    /// Every position a grower occupies, mapped to its origin.
    pub(crate) footprints: BTreeMap<BlockPos, BlockPos>,
    /// Spore papers by position.
    pub(crate) papers: BTreeMap<BlockPos, SporePaper>,
}

impl Simulation {
    /// Build an empty world from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Config`] if validation fails,
    /// [`DriverError::World`] if two collectibles share a code, or
    /// [`DriverError::Clock`] if the calendar cannot be built.
    pub fn new(config: SubstrateConfig) -> Result<Self, DriverError> {
        config.validate()?;
        let registry = ItemRegistry::from_entries(config.collectibles.iter().cloned())?;
        let calendar = GameCalendar::new(&config.calendar)?;
        let rng = WorldRng::seeded(config.world.seed);
        info!(
            world_name = config.world.name,
            seed = config.world.seed,
            growers = config.growers.len(),
            spore_papers = config.spore_papers.len(),
            collectibles = registry.len(),
            "Simulation initialized"
        );
        Ok(Self {
            config,
            registry,
            calendar,
            rng,
            blocks: MemoryWorld::new(),
            growers: BTreeMap::new(),
            footprints: BTreeMap::new(),
            papers: BTreeMap::new(),
        })
    }

    // ----- Accessors -----

    /// The configuration the world runs with.
    pub const fn config(&self) -> &SubstrateConfig {
        &self.config
    }

    /// The collectible registry.
    pub const fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    /// The game calendar.
    pub const fn calendar(&self) -> &GameCalendar {
        &self.calendar
    }

    /// The block grid.
    pub const fn blocks(&self) -> &MemoryWorld {
        &self.blocks
    }

    /// The grower whose footprint covers `pos`.
    pub fn grower(&self, pos: BlockPos) -> Option<&Grower> {
        self.footprints
            .get(&pos)
            .and_then(|origin| self.growers.get(origin))
    }

    /// The spore paper at `pos`.
    pub fn spore_paper(&self, pos: BlockPos) -> Option<&SporePaper> {
        self.papers.get(&pos)
    }

    /// Every grower by origin.
    pub fn growers(&self) -> impl Iterator<Item = (BlockPos, &Grower)> {
        self.growers.iter().map(|(pos, g)| (*pos, g))
    }

    /// Every spore paper by position.
    pub fn spore_papers(&self) -> impl Iterator<Item = (BlockPos, &SporePaper)> {
        self.papers.iter().map(|(pos, p)| (*pos, p))
    }

    // ----- Placement -----

    /// Place a plain block, such as an obstruction or a harvested growth.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::World`] if `pos` is occupied.
    pub fn place_block(&mut self, pos: BlockPos, code: AssetCode) -> Result<(), DriverError> {
        self.ensure_open(pos)?;
        self.blocks.place(pos, code);
        self.blocks.notify_neighbors(pos);
        Ok(())
    }

    /// Place a fresh container of type `container` with its origin at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::UnknownContainer`] if the type has no grower
    /// configuration, or [`DriverError::World`] if any footprint position
    /// is occupied.
    pub fn place_grower(
        &mut self,
        pos: BlockPos,
        container: &AssetCode,
    ) -> Result<(), DriverError> {
        let max_fertility = self.grower_config(container)?.max_fertility;
        self.insert_grower(pos, container.clone(), GrowerState::new(max_fertility))
    }

    /// Place a container from a harvested container item, restoring the
    /// snapshot it carries.
    ///
    /// # Errors
    ///
    /// Same as [`Simulation::place_grower`], keyed on the item's code.
    pub fn place_grower_item(
        &mut self,
        pos: BlockPos,
        item: &ItemStack,
    ) -> Result<(), DriverError> {
        let state = place(item, self.grower_config(&item.code)?);
        self.insert_grower(pos, item.code.clone(), state)
    }

    /// Place a spore paper of type `container` attached on `side`.
    ///
    /// A paper type registered with a `mushroom` variant is already
    /// printed.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::UnknownContainer`] if the type has no spore
    /// paper configuration, or [`DriverError::World`] if `pos` is occupied.
    pub fn place_spore_paper(
        &mut self,
        pos: BlockPos,
        container: &AssetCode,
        side: Facing,
    ) -> Result<(), DriverError> {
        let slot_count = self
            .config
            .spore_papers
            .get(container)
            .ok_or_else(|| DriverError::UnknownContainer {
                code: container.clone(),
            })?
            .slot_count;
        self.ensure_open(pos)?;

        let printed = self
            .registry
            .resolve(container)
            .and_then(|c| c.variant(PRINTED_VARIANT));
        let state = printed.map_or_else(
            || SporePaperState::new(slot_count),
            |spore| SporePaperState::printed(slot_count, spore),
        );

        self.blocks.place_block(
            pos,
            PlacedBlock {
                code: container.clone(),
                facing: Some(side),
            },
        );
        self.blocks.notify_neighbors(pos);
        self.papers.insert(
            pos,
            SporePaper {
                container: container.clone(),
                side,
                state,
            },
        );
        debug!(%pos, %container, %side, "Spore paper placed");
        Ok(())
    }

    // ----- Player actions -----

    /// Inoculate the grower covering `pos` with the held spore print.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::NoGrower`] if no grower covers `pos`, or
    /// [`DriverError::Inoculate`] if the container declines the print.
    pub fn inoculate(
        &mut self,
        pos: BlockPos,
        held: &mut ItemStack,
    ) -> Result<String, DriverError> {
        let origin = self.grower_origin(pos)?;
        let grower = self
            .growers
            .get_mut(&origin)
            .ok_or(DriverError::NoGrower { pos })?;
        let config = self.config.growers.get(&grower.container).ok_or_else(|| {
            DriverError::UnknownContainer {
                code: grower.container.clone(),
            }
        })?;
        substrate_growth::inoculate(&mut grower.state, held, config, &self.registry, &mut self.rng)
            .map_err(|source| DriverError::Inoculate { pos, source })
    }

    /// Put one unit of the held item into `slot` of the paper at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::NoSporePaper`] if there is no paper at `pos`,
    /// or [`DriverError::Collection`] if the paper declines the item.
    pub fn insert(
        &mut self,
        pos: BlockPos,
        slot: usize,
        held: &mut ItemStack,
    ) -> Result<(), DriverError> {
        let now = self.calendar.elapsed_hours();
        let paper = self
            .papers
            .get_mut(&pos)
            .ok_or(DriverError::NoSporePaper { pos })?;
        let config = self.config.spore_papers.get(&paper.container).ok_or_else(|| {
            DriverError::UnknownContainer {
                code: paper.container.clone(),
            }
        })?;
        CollectionTimer::new(config)
            .insert(&mut paper.state, slot, held, &self.registry, now)
            .map_err(|source| DriverError::Collection { pos, source })
    }

    /// Take one unit off the paper at `pos`. See
    /// [`CollectionTimer::take`] for the index rules.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::NoSporePaper`] if there is no paper at `pos`.
    pub fn take(&mut self, pos: BlockPos, index: usize) -> Result<Option<AssetCode>, DriverError> {
        let paper = self
            .papers
            .get_mut(&pos)
            .ok_or(DriverError::NoSporePaper { pos })?;
        let config = self.config.spore_papers.get(&paper.container).ok_or_else(|| {
            DriverError::UnknownContainer {
                code: paper.container.clone(),
            }
        })?;
        Ok(CollectionTimer::new(config).take(&mut paper.state, index))
    }

    /// Break whatever occupies `pos` and return its drops.
    ///
    /// A grower drops its harvested item, or its rotten drops when spent.
    /// A spore paper drops itself plus whatever its slots hold. Any other
    /// block drops one of itself.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::NoBlock`] if `pos` is empty.
    pub fn break_block(&mut self, pos: BlockPos) -> Result<Vec<ItemStack>, DriverError> {
        if let Some(origin) = self.footprints.get(&pos).copied() {
            return self.break_grower(origin);
        }
        let block = self.blocks.remove(pos).ok_or(DriverError::NoBlock { pos })?;
        self.blocks.notify_neighbors(pos);

        let mut drops = vec![ItemStack::new(block.code, 1)];
        if let Some(paper) = self.papers.remove(&pos) {
            let mut contents: BTreeMap<AssetCode, u32> = BTreeMap::new();
            for code in paper.state.slots.into_iter().flatten() {
                let count = contents.entry(code).or_insert(0);
                *count = count.saturating_add(1);
            }
            drops.extend(
                contents
                    .into_iter()
                    .map(|(code, size)| ItemStack::new(code, size)),
            );
        }
        debug!(%pos, drops = drops.len(), "Block broken");
        Ok(drops)
    }

    // ----- Status -----

    /// Status of the grower covering `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::NoGrower`] if no grower covers `pos`.
    pub fn grower_status(&self, pos: BlockPos) -> Result<GrowerStatus, DriverError> {
        let origin = self.grower_origin(pos)?;
        let grower = self.growers.get(&origin).ok_or(DriverError::NoGrower { pos })?;
        let config = self.grower_config(&grower.container)?;
        Ok(GrowerStatus::of(&grower.state, config, origin, &self.blocks))
    }

    /// Hours until the paper at `pos` prints, or `None` if it is not
    /// collecting.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::NoSporePaper`] if there is no paper at `pos`.
    pub fn collection_hours_left(&self, pos: BlockPos) -> Result<Option<f64>, DriverError> {
        let paper = self.papers.get(&pos).ok_or(DriverError::NoSporePaper { pos })?;
        let config = self.config.spore_papers.get(&paper.container).ok_or_else(|| {
            DriverError::UnknownContainer {
                code: paper.container.clone(),
            }
        })?;
        let timer = CollectionTimer::new(config);
        Ok(timer.is_collecting(&paper.state, &self.registry).then(|| {
            timer
                .remaining_hours(
                    &paper.state,
                    self.calendar.elapsed_hours(),
                    self.calendar.hours_per_day(),
                )
                .max(0.0)
        }))
    }

    // ----- Tick -----

    /// Advance the calendar one tick and tick every entity once.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Clock`] if the tick counter overflows. Entity
    /// problems never fail the tick.
    pub fn tick(&mut self) -> Result<TickSummary, DriverError> {
        let tick = self.calendar.advance()?;
        let now = self.calendar.elapsed_hours();
        let mut summary = TickSummary {
            tick,
            hours: now,
            ..TickSummary::default()
        };

        for (origin, grower) in &mut self.growers {
            let Some(config) = self.config.growers.get(&grower.container) else {
                warn!(%origin, container = %grower.container, "No grower config, skipping");
                summary.skipped = summary.skipped.saturating_add(1);
                continue;
            };
            let result = GrowthScheduler::new(config).tick(
                &mut grower.state,
                *origin,
                now,
                &mut self.rng,
                &mut self.blocks,
                &self.registry,
            );
            summary.record_growth(result);
        }

        for (pos, paper) in &mut self.papers {
            let Some(config) = self.config.spore_papers.get(&paper.container) else {
                warn!(%pos, container = %paper.container, "No spore paper config, skipping");
                summary.skipped = summary.skipped.saturating_add(1);
                continue;
            };
            summary.spore_papers = summary.spore_papers.saturating_add(1);
            let result = CollectionTimer::new(config).tick(
                &mut paper.state,
                paper.side,
                &self.calendar,
                &self.registry,
            );
            if let CollectionTick::Converted { printed_block, .. } = result {
                self.blocks.place_block(
                    *pos,
                    PlacedBlock {
                        code: printed_block,
                        facing: Some(paper.side),
                    },
                );
                self.blocks.notify_neighbors(*pos);
                summary.printed = summary.printed.saturating_add(1);
                summary.dirty = summary.dirty.saturating_add(1);
            }
        }

        debug!(
            tick,
            hours = now,
            growths = summary.growths,
            decayed = summary.decayed,
            printed = summary.printed,
            dirty = summary.dirty,
            "Tick complete"
        );
        Ok(summary)
    }

    // ----- Internals -----

    fn grower_config(&self, container: &AssetCode) -> Result<&GrowerConfig, DriverError> {
        self.config
            .growers
            .get(container)
            .ok_or_else(|| DriverError::UnknownContainer {
                code: container.clone(),
            })
    }

    fn grower_origin(&self, pos: BlockPos) -> Result<BlockPos, DriverError> {
        self.footprints
            .get(&pos)
            .copied()
            .ok_or(DriverError::NoGrower { pos })
    }

    fn ensure_open(&self, pos: BlockPos) -> Result<(), DriverError> {
        match self.blocks.block_at(pos) {
            Some(existing) => Err(WorldError::Occupied {
                pos,
                occupant: existing.code.clone(),
            }
            .into()),
            None => Ok(()),
        }
    }

    /// Occupy the footprint and register the grower.
    fn insert_grower(
        &mut self,
        origin: BlockPos,
        container: AssetCode,
        state: GrowerState,
    ) -> Result<(), DriverError> {
        let shape = self.grower_config(&container)?.shape;
        let cells = footprint(shape, origin);
        for cell in &cells {
            self.ensure_open(*cell)?;
        }
        for cell in cells {
            self.blocks.place(cell, container.clone());
            self.footprints.insert(cell, origin);
        }
        self.blocks.notify_neighbors(origin);
        debug!(%origin, %container, fertility = state.fertility, "Grower placed");
        self.growers.insert(origin, Grower { container, state });
        Ok(())
    }

    fn break_grower(&mut self, origin: BlockPos) -> Result<Vec<ItemStack>, DriverError> {
        let grower = self
            .growers
            .remove(&origin)
            .ok_or(DriverError::NoGrower { pos: origin })?;
        self.footprints.retain(|_, o| *o != origin);

        let drops = match self.config.growers.get(&grower.container) {
            Some(config) => {
                for cell in footprint(config.shape, origin) {
                    self.blocks.remove(cell);
                }
                break_drops(
                    &grower.container,
                    &grower.state,
                    config,
                    &self.config.items,
                    &mut self.rng,
                    &self.registry,
                )
            }
            None => {
                self.blocks.remove(origin);
                warn!(%origin, container = %grower.container, "No grower config, dropping nothing");
                Vec::new()
            }
        };
        self.blocks.notify_neighbors(origin);
        debug!(%origin, container = %grower.container, drops = drops.len(), "Grower broken");
        Ok(drops)
    }
}
