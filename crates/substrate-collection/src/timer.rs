//! The spore collection timer and the insert/take actions.
//!
//! A paper is *collecting* while every slot holds a spore-harvestable item
//! and it has not been printed. Each successful insert stamps
//! `start_collecting_hours`, so only the insert that filled the paper
//! decides when printing happens:
//!
//! ```text
//! remaining = collect_days * hours_per_day - (now - start_collecting_hours)
//! ```
//!
//! When `remaining <= 0` every slot is replaced with the byproduct item and
//! the paper records the spore type of the mushrooms it held.

use substrate_types::{AssetCode, Facing, ItemStack, SporePaperState, mushroom_name};
use substrate_world::{Registry, TimeSource};
use tracing::{debug, info, warn};

use crate::config::SporePaperConfig;
use crate::error::CollectionRejection;

/// Code of the printed paper block for `spore` facing `side`.
pub fn printed_paper_code(spore: &str, side: Facing) -> AssetCode {
    AssetCode::from_parts(
        "substrate",
        &format!("sporepaperprinted-{spore}-{}", side.code()),
    )
}

/// What a collection tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionTick {
    /// Not collecting: a slot is empty, holds an ineligible item, or the
    /// paper is already printed.
    Idle,
    /// Collecting, with hours left before printing.
    Collecting {
        /// Hours until printing.
        remaining_hours: f64,
    },
    /// The paper was printed this tick.
    Converted {
        /// Spore type recorded on the paper.
        spore: String,
        /// Block the host should swap the paper for.
        printed_block: AssetCode,
    },
}

impl CollectionTick {
    /// Whether persisted state changed.
    pub const fn is_dirty(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }
}

/// Drives one paper type's collection rules.
#[derive(Debug, Clone, Copy)]
pub struct CollectionTimer<'a> {
    /// Paper type tunables.
    config: &'a SporePaperConfig,
}

impl<'a> CollectionTimer<'a> {
    /// Create a timer for a paper type.
    pub const fn new(config: &'a SporePaperConfig) -> Self {
        Self { config }
    }

    /// The paper type's configuration.
    pub const fn config(&self) -> &'a SporePaperConfig {
        self.config
    }

    /// Whether every slot holds a spore-harvestable item and the paper is
    /// not yet printed.
    pub fn is_collecting<G>(&self, state: &SporePaperState, registry: &G) -> bool
    where
        G: Registry + ?Sized,
    {
        !state.is_converted()
            && state.is_full()
            && state.slots.iter().flatten().all(|code| {
                registry
                    .resolve(code)
                    .is_some_and(|c| c.spore_harvestable)
            })
    }

    /// Hours left before printing, measured from the last insert.
    pub fn remaining_hours(&self, state: &SporePaperState, now: f64, hours_per_day: f64) -> f64 {
        self.config.collect_hours(hours_per_day) - (now - state.start_collecting_hours)
    }

    /// Advance one paper to the clock's current reading.
    pub fn tick<T, G>(
        &self,
        state: &mut SporePaperState,
        side: Facing,
        clock: &T,
        registry: &G,
    ) -> CollectionTick
    where
        T: TimeSource + ?Sized,
        G: Registry + ?Sized,
    {
        if !self.is_collecting(state, registry) {
            return CollectionTick::Idle;
        }

        let remaining_hours =
            self.remaining_hours(state, clock.elapsed_hours(), clock.hours_per_day());
        if remaining_hours > 0.0 {
            return CollectionTick::Collecting { remaining_hours };
        }

        let Some((_, first)) = state.first_occupied() else {
            return CollectionTick::Idle;
        };
        let spore = mushroom_name(first.as_str()).map_or_else(
            || {
                warn!(item = %first, "Collected item has no mushroom name, using its path");
                first.path().to_owned()
            },
            str::to_owned,
        );

        for slot in &mut state.slots {
            *slot = Some(self.config.byproduct_item.clone());
        }
        state.result_spore = Some(spore.clone());

        let printed_block = printed_paper_code(&spore, side);
        info!(spore, %printed_block, "Spore paper printed");
        CollectionTick::Converted {
            spore,
            printed_block,
        }
    }

    /// Put one unit of the held item into `slot`, stamping the collection
    /// start time.
    ///
    /// The first item on a blank paper must be spore harvestable; later
    /// items must match it.
    ///
    /// # Errors
    ///
    /// Returns a [`CollectionRejection`] and leaves the paper and `held`
    /// untouched if the paper is printed, the slot is missing or occupied,
    /// the stack is empty, or the item is not acceptable.
    pub fn insert<G>(
        &self,
        state: &mut SporePaperState,
        slot: usize,
        held: &mut ItemStack,
        registry: &G,
        now: f64,
    ) -> Result<(), CollectionRejection>
    where
        G: Registry + ?Sized,
    {
        if state.is_converted() {
            return Err(CollectionRejection::AlreadyConverted);
        }
        let slot_count = state.slots.len();
        let Some(target) = state.slots.get(slot) else {
            return Err(CollectionRejection::NoSuchSlot { slot, slot_count });
        };
        if target.is_some() {
            return Err(CollectionRejection::SlotOccupied { slot });
        }
        if held.size == 0 {
            return Err(CollectionRejection::EmptyStack);
        }

        match state.first_occupied() {
            Some((_, expected)) if *expected != held.code => {
                return Err(CollectionRejection::Mismatch {
                    expected: expected.clone(),
                    found: held.code.clone(),
                });
            }
            Some(_) => {}
            None => {
                let harvestable = registry
                    .resolve(&held.code)
                    .is_some_and(|c| c.spore_harvestable);
                if !harvestable {
                    return Err(CollectionRejection::NotHarvestable {
                        code: held.code.clone(),
                    });
                }
            }
        }

        if let Some(target) = state.slots.get_mut(slot) {
            *target = Some(held.code.clone());
        }
        held.size = held.size.saturating_sub(1);
        state.start_collecting_hours = now;
        debug!(slot, item = %held.code, now, "Item placed on spore paper");
        Ok(())
    }

    /// Take one unit off the paper.
    ///
    /// `index == slot_count` (the whole paper) or any take from a printed
    /// paper removes from the first occupied slot; otherwise the targeted
    /// slot is emptied. Returns `None` if there is nothing there.
    pub fn take(&self, state: &mut SporePaperState, index: usize) -> Option<AssetCode> {
        let whole_paper = index == state.slots.len() || state.is_converted();
        let target = if whole_paper {
            state.first_occupied().map(|(i, _)| i)?
        } else {
            index
        };
        let taken = state.slots.get_mut(target).and_then(Option::take);
        if let Some(code) = &taken {
            debug!(slot = target, item = %code, "Item taken from spore paper");
        }
        taken
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use substrate_types::CollectibleType;
    use substrate_world::{ItemRegistry, ManualClock};

    use super::*;

    const BOLETE: &str = "game:mushroom-bolete-normal";
    const FIELD: &str = "game:mushroom-fieldmushroom-normal";

    fn registry() -> ItemRegistry {
        ItemRegistry::from_entries([
            CollectibleType::block(BOLETE).harvestable(),
            CollectibleType::block(FIELD).harvestable(),
            CollectibleType::item("game:rot"),
            CollectibleType::item("game:flint"),
        ])
        .unwrap()
    }

    fn two_day_config() -> SporePaperConfig {
        SporePaperConfig {
            collect_days: 2.0,
            ..SporePaperConfig::default()
        }
    }

    fn fill(timer: &CollectionTimer<'_>, state: &mut SporePaperState, now: f64) {
        let registry = registry();
        let mut held = ItemStack::new(AssetCode::parse(BOLETE), 4);
        for slot in 0..4 {
            timer.insert(state, slot, &mut held, &registry, now).unwrap();
        }
        assert_eq!(held.size, 0);
    }

    #[test]
    fn timer_completes_exactly_once() {
        let config = two_day_config();
        let timer = CollectionTimer::new(&config);
        let registry = registry();
        let mut state = SporePaperState::new(4);
        fill(&timer, &mut state, 0.0);
        assert!(timer.is_collecting(&state, &registry));

        let tick = timer.tick(&mut state, Facing::North, &ManualClock::new(47.0, 24.0), &registry);
        assert_eq!(tick, CollectionTick::Collecting { remaining_hours: 1.0 });
        assert!(state.result_spore.is_none());

        let tick = timer.tick(&mut state, Facing::North, &ManualClock::new(48.0, 24.0), &registry);
        assert_eq!(
            tick,
            CollectionTick::Converted {
                spore: "bolete".to_owned(),
                printed_block: AssetCode::parse("substrate:sporepaperprinted-bolete-north"),
            }
        );
        assert!(tick.is_dirty());
        assert_eq!(state.result_spore.as_deref(), Some("bolete"));
        assert!(state.slots.iter().all(|s| s.as_ref().map(AssetCode::as_str) == Some("game:rot")));

        let settled = state.clone();
        let tick = timer.tick(&mut state, Facing::North, &ManualClock::new(100.0, 24.0), &registry);
        assert_eq!(tick, CollectionTick::Idle);
        assert_eq!(state, settled);
    }

    #[test]
    fn partial_paper_is_idle() {
        let config = two_day_config();
        let timer = CollectionTimer::new(&config);
        let registry = registry();
        let mut state = SporePaperState::new(4);
        let mut held = ItemStack::new(AssetCode::parse(BOLETE), 3);
        for slot in 0..3 {
            timer.insert(&mut state, slot, &mut held, &registry, 0.0).unwrap();
        }
        let tick = timer.tick(&mut state, Facing::East, &ManualClock::new(500.0, 24.0), &registry);
        assert_eq!(tick, CollectionTick::Idle);
    }

    #[test]
    fn refilling_restarts_the_timer() {
        let config = two_day_config();
        let timer = CollectionTimer::new(&config);
        let registry = registry();
        let mut state = SporePaperState::new(4);
        fill(&timer, &mut state, 0.0);

        assert_eq!(timer.take(&mut state, 2).unwrap().as_str(), BOLETE);
        let mut held = ItemStack::new(AssetCode::parse(BOLETE), 1);
        timer.insert(&mut state, 2, &mut held, &registry, 30.0).unwrap();
        assert_eq!(state.start_collecting_hours, 30.0);

        let tick = timer.tick(&mut state, Facing::East, &ManualClock::new(50.0, 24.0), &registry);
        assert_eq!(tick, CollectionTick::Collecting { remaining_hours: 28.0 });
    }

    #[test]
    fn every_insert_stamps_the_start_time() {
        let config = two_day_config();
        let timer = CollectionTimer::new(&config);
        let registry = registry();
        let mut state = SporePaperState::new(4);
        let mut held = ItemStack::new(AssetCode::parse(BOLETE), 2);
        timer.insert(&mut state, 0, &mut held, &registry, 5.0).unwrap();
        assert_eq!(state.start_collecting_hours, 5.0);
        timer.insert(&mut state, 3, &mut held, &registry, 9.0).unwrap();
        assert_eq!(state.start_collecting_hours, 9.0);
    }

    #[test]
    fn insert_rejections_leave_state_untouched() {
        let config = two_day_config();
        let timer = CollectionTimer::new(&config);
        let registry = registry();
        let mut state = SporePaperState::new(4);

        let mut flint = ItemStack::new(AssetCode::parse("game:flint"), 1);
        assert!(matches!(
            timer.insert(&mut state, 0, &mut flint, &registry, 0.0),
            Err(CollectionRejection::NotHarvestable { .. })
        ));

        let mut bolete = ItemStack::new(AssetCode::parse(BOLETE), 2);
        timer.insert(&mut state, 0, &mut bolete, &registry, 0.0).unwrap();
        assert_eq!(
            timer.insert(&mut state, 0, &mut bolete, &registry, 0.0),
            Err(CollectionRejection::SlotOccupied { slot: 0 })
        );
        assert_eq!(
            timer.insert(&mut state, 9, &mut bolete, &registry, 0.0),
            Err(CollectionRejection::NoSuchSlot {
                slot: 9,
                slot_count: 4
            })
        );

        let mut field = ItemStack::new(AssetCode::parse(FIELD), 1);
        assert!(matches!(
            timer.insert(&mut state, 1, &mut field, &registry, 0.0),
            Err(CollectionRejection::Mismatch { .. })
        ));
        assert_eq!(field.size, 1);

        let mut empty = ItemStack::new(AssetCode::parse(BOLETE), 0);
        assert_eq!(
            timer.insert(&mut state, 1, &mut empty, &registry, 0.0),
            Err(CollectionRejection::EmptyStack)
        );
        assert_eq!(state.occupied_count(), 1);
        assert_eq!(bolete.size, 1);
    }

    #[test]
    fn printed_paper_rejects_inserts_but_allows_takes() {
        let config = SporePaperConfig::default();
        let timer = CollectionTimer::new(&config);
        let registry = registry();
        let mut state = SporePaperState::new(4);
        fill(&timer, &mut state, 0.0);

        // Zero collect days: the first tick prints.
        let tick = timer.tick(&mut state, Facing::South, &ManualClock::new(0.0, 24.0), &registry);
        assert!(matches!(tick, CollectionTick::Converted { .. }));

        let mut held = ItemStack::new(AssetCode::parse(BOLETE), 1);
        assert_eq!(
            timer.insert(&mut state, 0, &mut held, &registry, 1.0),
            Err(CollectionRejection::AlreadyConverted)
        );

        // Takes on a printed paper always clear from the first occupied slot.
        for _ in 0..4 {
            assert_eq!(timer.take(&mut state, 3).unwrap().as_str(), "game:rot");
        }
        assert_eq!(timer.take(&mut state, 0), None);
        assert!(state.is_converted());
    }

    #[test]
    fn whole_paper_index_takes_first_occupied() {
        let config = two_day_config();
        let timer = CollectionTimer::new(&config);
        let registry = registry();
        let mut state = SporePaperState::new(4);
        let mut held = ItemStack::new(AssetCode::parse(BOLETE), 2);
        timer.insert(&mut state, 1, &mut held, &registry, 0.0).unwrap();
        timer.insert(&mut state, 3, &mut held, &registry, 0.0).unwrap();

        assert!(timer.take(&mut state, 4).is_some());
        assert!(state.slots[1].is_none());
        assert!(state.slots[3].is_some());
        assert_eq!(timer.take(&mut state, 0), None);
        assert_eq!(timer.take(&mut state, 7), None);
    }

    #[test]
    fn printed_from_creation_never_collects() {
        let config = two_day_config();
        let timer = CollectionTimer::new(&config);
        let registry = registry();
        let mut state = SporePaperState::printed(4, "bolete");
        let tick = timer.tick(&mut state, Facing::West, &ManualClock::new(1000.0, 24.0), &registry);
        assert_eq!(tick, CollectionTick::Idle);
        let mut held = ItemStack::new(AssetCode::parse(BOLETE), 1);
        assert_eq!(
            timer.insert(&mut state, 0, &mut held, &registry, 0.0),
            Err(CollectionRejection::AlreadyConverted)
        );
    }

    #[test]
    fn unregistered_items_stop_collection() {
        let config = two_day_config();
        let timer = CollectionTimer::new(&config);
        let mut state = SporePaperState::new(4);
        fill(&timer, &mut state, 0.0);
        let tick = timer.tick(
            &mut state,
            Facing::West,
            &ManualClock::new(100.0, 24.0),
            &ItemRegistry::new(),
        );
        assert_eq!(tick, CollectionTick::Idle);
    }

    #[test]
    fn printed_paper_codes() {
        assert_eq!(
            printed_paper_code("chanterelle", Facing::East).as_str(),
            "substrate:sporepaperprinted-chanterelle-east"
        );
    }
}
