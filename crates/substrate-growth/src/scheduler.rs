//! The per-tick growth state machine.
//!
//! Each tick a container goes through exactly one of these steps:
//!
//! 1. **Dormant** -- not inoculated; nothing happens.
//! 2. **Decay** -- inoculated but out of fertility; the spore and every
//!    colonization field are cleared. The rotten drops are paid once, when
//!    the spent container is broken.
//! 3. **Colonize** -- colonization in progress; elapsed time is integrated
//!    from the last observed clock reading. On completion the first growth
//!    attempt is armed.
//! 4. **Attempt** -- the next attempt time has been reached; the timer is
//!    re-armed, fertility is drained, and every open candidate site rolls
//!    independently against the grow chance.
//!
//! Draining and re-arming happen even when no site is open, so a walled-in
//! container still runs out eventually.

use substrate_types::{AssetCode, BlockPos, CollectibleType, Facing, GrowerState};
use substrate_world::{BlockAccessor, RandomSource, Registry};
use tracing::{debug, warn};

use crate::config::GrowerConfig;
use crate::sites::{Candidate, SiteProvider};

// ---------------------------------------------------------------------------
// Tick results
// ---------------------------------------------------------------------------

/// Result of a growth-attempt step.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthAttempt {
    /// Fertility consumed by this attempt.
    pub drained: f32,
    /// Number of open candidate sites at the time of the attempt.
    pub candidates: usize,
    /// Sites where a growth was placed, in roll order.
    pub spawned: Vec<Candidate>,
    /// Sites that won the roll but could not be filled (unresolvable growth
    /// type or a spawn refused by the host).
    pub failed: usize,
}

/// What a tick did to a container.
#[derive(Debug, Clone, PartialEq)]
pub enum GrowthOutcome {
    /// Not inoculated.
    Dormant,
    /// Fertility ran out; the container reset to its spent state.
    Decayed,
    /// Colonization is still in progress.
    Colonizing {
        /// Hours left before growth attempts start.
        remaining_hours: f64,
    },
    /// Colonization finished this tick.
    Colonized {
        /// Game hour of the first growth attempt.
        next_grow_hours: f64,
    },
    /// Ready, but the next attempt is not due yet.
    Waiting {
        /// Game hour of the next growth attempt.
        next_grow_hours: f64,
    },
    /// A growth attempt ran.
    Attempted(GrowthAttempt),
}

/// Outcome of one tick plus the persist flag for the host.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthTick {
    /// What happened.
    pub outcome: GrowthOutcome,
    /// Whether any persisted field changed.
    pub dirty: bool,
}

impl GrowthTick {
    const fn clean(outcome: GrowthOutcome) -> Self {
        Self {
            outcome,
            dirty: false,
        }
    }

    const fn dirty(outcome: GrowthOutcome) -> Self {
        Self {
            outcome,
            dirty: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Growth block resolution
// ---------------------------------------------------------------------------

/// Resolve the block a growth of `spore` should become when attached on
/// the `side` face.
///
/// Tries `game:mushroom-{spore}-normal-{side}` first, then the undirected
/// `game:mushroom-{spore}-normal`.
pub fn growth_block<'r, G>(
    registry: &'r G,
    spore: &str,
    side: Facing,
) -> Option<&'r CollectibleType>
where
    G: Registry + ?Sized,
{
    let directed =
        AssetCode::from_parts("game", &format!("mushroom-{spore}-normal-{}", side.code()));
    registry.resolve(&directed).or_else(|| {
        let plain = AssetCode::from_parts("game", &format!("mushroom-{spore}-normal"));
        registry.resolve(&plain)
    })
}

// ---------------------------------------------------------------------------
// GrowthScheduler
// ---------------------------------------------------------------------------

/// Drives one container type's growth rules.
///
/// The scheduler is stateless apart from borrowed configuration; all
/// per-container state lives in the [`GrowerState`] passed to [`tick`].
///
/// [`tick`]: GrowthScheduler::tick
#[derive(Debug, Clone, Copy)]
pub struct GrowthScheduler<'a> {
    /// Container type tunables.
    config: &'a GrowerConfig,
    /// Candidate enumeration for the container's shape.
    sites: SiteProvider,
}

impl<'a> GrowthScheduler<'a> {
    /// Create a scheduler for a container type.
    pub fn new(config: &'a GrowerConfig) -> Self {
        Self {
            config,
            sites: SiteProvider::from(config.shape),
        }
    }

    /// The container type's configuration.
    pub const fn config(&self) -> &'a GrowerConfig {
        self.config
    }

    /// The site provider selected from the container shape.
    pub const fn sites(&self) -> SiteProvider {
        self.sites
    }

    /// Advance one container to game hour `now`.
    ///
    /// Never fails: unresolvable growth types and refused spawns are logged
    /// and skipped, and the rest of the tick proceeds.
    pub fn tick<R, W, G>(
        &self,
        state: &mut GrowerState,
        origin: BlockPos,
        now: f64,
        rng: &mut R,
        world: &mut W,
        registry: &G,
    ) -> GrowthTick
    where
        R: RandomSource + ?Sized,
        W: BlockAccessor + ?Sized,
        G: Registry + ?Sized,
    {
        if !state.is_inoculated() {
            return GrowthTick::clean(GrowthOutcome::Dormant);
        }

        if state.is_spent() {
            debug!(%origin, spore = ?state.spore(), "Container decayed");
            state.reset_spent();
            return GrowthTick::dirty(GrowthOutcome::Decayed);
        }

        if state.is_colonizing() {
            return self.colonize(state, now, rng);
        }

        if now >= state.next_grow_hours {
            let attempt = self.attempt(state, origin, now, rng, world, registry);
            return GrowthTick::dirty(GrowthOutcome::Attempted(attempt));
        }

        GrowthTick::clean(GrowthOutcome::Waiting {
            next_grow_hours: state.next_grow_hours,
        })
    }

    /// Sample the delay until the next growth attempt, in hours.
    fn next_increment<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        f64::from(rng.sample(&self.config.grow_increment).max(0.0))
    }

    /// Integrate colonization time since the last observed reading.
    fn colonize<R: RandomSource + ?Sized>(
        &self,
        state: &mut GrowerState,
        now: f64,
        rng: &mut R,
    ) -> GrowthTick {
        let last = state.last_colonize_progress.unwrap_or(now);
        let delta = (now - last).max(0.0);
        state.elapsed_colonize_hours += delta;
        state.last_colonize_progress = Some(now);

        if let Some(remaining_hours) = state.remaining_colonize_hours() {
            let outcome = GrowthOutcome::Colonizing { remaining_hours };
            return if delta > 0.0 {
                GrowthTick::dirty(outcome)
            } else {
                GrowthTick::clean(outcome)
            };
        }

        state.last_colonize_progress = None;
        state.next_grow_hours = now + self.next_increment(rng);
        debug!(
            spore = ?state.spore(),
            next_grow_hours = state.next_grow_hours,
            "Colonization complete"
        );
        GrowthTick::dirty(GrowthOutcome::Colonized {
            next_grow_hours: state.next_grow_hours,
        })
    }

    /// Run one growth attempt.
    fn attempt<R, W, G>(
        &self,
        state: &mut GrowerState,
        origin: BlockPos,
        now: f64,
        rng: &mut R,
        world: &mut W,
        registry: &G,
    ) -> GrowthAttempt
    where
        R: RandomSource + ?Sized,
        W: BlockAccessor + ?Sized,
        G: Registry + ?Sized,
    {
        state.next_grow_hours = now + self.next_increment(rng);

        let drained = rng.sample(&self.config.fertility_drain).max(0.0);
        state.fertility = (state.fertility - drained).max(0.0);

        let mut sites = self.sites.open_sites(origin, world);
        rng.shuffle(&mut sites);

        let mut attempt = GrowthAttempt {
            drained,
            candidates: sites.len(),
            spawned: Vec::new(),
            failed: 0,
        };

        let Some(spore) = state.spore().map(str::to_owned) else {
            return attempt;
        };

        for site in sites {
            if rng.next_f64() >= self.config.grow_chance {
                continue;
            }
            let Some(block) = growth_block(registry, &spore, site.facing.opposite()) else {
                warn!(%origin, pos = %site.pos, spore, "No growth block registered for spore");
                attempt.failed = attempt.failed.saturating_add(1);
                continue;
            };
            match world.spawn(&block.code, site.pos, site.facing) {
                Ok(()) => {
                    world.notify_neighbors(site.pos);
                    attempt.spawned.push(site);
                }
                Err(err) => {
                    warn!(%origin, pos = %site.pos, %err, "Growth spawn refused");
                    attempt.failed = attempt.failed.saturating_add(1);
                }
            }
        }

        debug!(
            %origin,
            spore,
            fertility = state.fertility,
            candidates = attempt.candidates,
            spawned = attempt.spawned.len(),
            next_grow_hours = state.next_grow_hours,
            "Growth attempt"
        );
        attempt
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
