//! Read-only status of a container, for block info and held-item tooltips.

use substrate_types::{BlockPos, GrowerState};
use substrate_world::BlockAccessor;

use crate::config::GrowerConfig;
use crate::sites::SiteProvider;

/// Snapshot of what a player would be told about a container.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowerStatus {
    /// Inoculated spore type, if any.
    pub spore: Option<String>,
    /// Remaining fertility as a fraction of the maximum.
    pub fertility_fraction: f32,
    /// Whether fertility is exhausted.
    pub moldy: bool,
    /// Hours of colonization left, if colonizing.
    pub colonizing_hours_left: Option<f64>,
    /// Open candidate sites around the container.
    pub open_sites: usize,
}

impl GrowerStatus {
    /// Describe a placed container at `origin`.
    pub fn of<W>(state: &GrowerState, config: &GrowerConfig, origin: BlockPos, world: &W) -> Self
    where
        W: BlockAccessor + ?Sized,
    {
        Self {
            spore: state.spore().map(str::to_owned),
            fertility_fraction: state.fertility_fraction(config.max_fertility),
            moldy: state.is_spent(),
            colonizing_hours_left: state.remaining_colonize_hours(),
            open_sites: SiteProvider::from(config.shape).open_count(origin, world),
        }
    }

    /// Whether the container can grow but has nowhere to put growths.
    pub const fn is_blocked(&self) -> bool {
        !self.moldy && self.open_sites == 0
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use substrate_types::{AssetCode, Facing};
    use substrate_world::MemoryWorld;

    use super::*;

    #[test]
    fn colonizing_bag_reports_progress() {
        let state = GrowerState {
            inoculated_spore: Some("chanterelle".to_owned()),
            fertility: 250.0,
            elapsed_colonize_hours: 1.5,
            colonize_duration_hours: 4.0,
            ..GrowerState::new(1000.0)
        };
        let origin = BlockPos::new(0, 0, 0);
        let mut world = MemoryWorld::new();
        world.place(origin.offset(Facing::East), AssetCode::parse("game:soil"));

        let status = GrowerStatus::of(&state, &GrowerConfig::default(), origin, &world);
        assert_eq!(status.spore.as_deref(), Some("chanterelle"));
        assert_eq!(status.fertility_fraction, 0.25);
        assert!(!status.moldy);
        assert_eq!(status.colonizing_hours_left, Some(2.5));
        assert_eq!(status.open_sites, 3);
        assert!(!status.is_blocked());
    }

    #[test]
    fn spent_bag_is_moldy() {
        let mut state = GrowerState::new(1000.0);
        state.reset_spent();
        let status = GrowerStatus::of(
            &state,
            &GrowerConfig::default(),
            BlockPos::new(0, 0, 0),
            &MemoryWorld::new(),
        );
        assert!(status.moldy);
        assert_eq!(status.fertility_fraction, 0.0);
        assert_eq!(status.spore, None);
    }
}
