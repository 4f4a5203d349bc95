//! Introducing a spore print into a container.
//!
//! A spore print is any collectible whose code path starts with
//! `sporeprint` and that carries a `mushroom` variant naming the spore
//! type. Inoculation consumes one print and starts colonization.

use substrate_types::{GrowerState, ItemStack};
use substrate_world::{RandomSource, Registry};
use tracing::debug;

use crate::config::GrowerConfig;
use crate::error::InoculateRejection;

/// Code path prefix shared by every spore print.
pub const SPORE_PRINT_PREFIX: &str = "sporeprint";

/// Variant key naming a print's spore type.
pub const MUSHROOM_VARIANT: &str = "mushroom";

/// Inoculate a container with the print held in `held`.
///
/// On success one unit is taken from `held`, colonization starts with a
/// sampled duration, and the spore type is returned.
///
/// # Errors
///
/// Returns an [`InoculateRejection`] and leaves both `state` and `held`
/// untouched if the container is already inoculated, the stack is empty,
/// the item is not a spore print, or the spore is not accepted here.
/// A spent container that has decayed is not inoculated and accepts a new
/// print.
pub fn inoculate<R, G>(
    state: &mut GrowerState,
    held: &mut ItemStack,
    config: &GrowerConfig,
    registry: &G,
    rng: &mut R,
) -> Result<String, InoculateRejection>
where
    R: RandomSource + ?Sized,
    G: Registry + ?Sized,
{
    if let Some(spore) = state.spore() {
        return Err(InoculateRejection::AlreadyInoculated {
            spore: spore.to_owned(),
        });
    }
    if held.size == 0 {
        return Err(InoculateRejection::EmptyStack);
    }

    let spore = registry
        .resolve(&held.code)
        .filter(|c| c.code.path_starts_with(SPORE_PRINT_PREFIX))
        .and_then(|c| c.variant(MUSHROOM_VARIANT))
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| InoculateRejection::NotSporePrint {
            code: held.code.clone(),
        })?
        .to_owned();

    if !config.accepts(&spore) {
        return Err(InoculateRejection::UnacceptableSpore {
            spore,
            required_container: config.shape.counterpart(),
        });
    }

    let duration = f64::from(rng.sample(&config.colonize_increment).max(0.0));
    state.inoculated_spore = Some(spore.clone());
    state.colonize_duration_hours = duration;
    state.elapsed_colonize_hours = 0.0;
    state.last_colonize_progress = None;
    held.size = held.size.saturating_sub(1);

    debug!(spore, colonize_hours = duration, "Container inoculated");
    Ok(spore)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use substrate_types::{AssetCode, CollectibleType, NatFloat};
    use substrate_world::{FixedRandom, ItemRegistry};

    use super::*;
    use crate::config::ContainerShape;

    fn registry() -> ItemRegistry {
        ItemRegistry::from_entries([
            CollectibleType::item("substrate:sporeprint-chanterelle")
                .with_variant(MUSHROOM_VARIANT, "chanterelle"),
            CollectibleType::item("substrate:sporeprint-bolete")
                .with_variant(MUSHROOM_VARIANT, "bolete"),
            CollectibleType::item("substrate:sporeprint-blank"),
            CollectibleType::item("game:flint").with_variant(MUSHROOM_VARIANT, "chanterelle"),
        ])
        .unwrap()
    }

    fn config() -> GrowerConfig {
        GrowerConfig {
            colonize_increment: NatFloat::constant(24.0),
            ..GrowerConfig::default()
        }
        .with_spores(["chanterelle"])
    }

    fn print(name: &str, size: u32) -> ItemStack {
        ItemStack::new(AssetCode::parse(&format!("substrate:sporeprint-{name}")), size)
    }

    #[test]
    fn accepted_print_starts_colonization_and_is_consumed() {
        let mut state = GrowerState::new(1000.0);
        let mut held = print("chanterelle", 3);

        let spore = inoculate(
            &mut state,
            &mut held,
            &config(),
            &registry(),
            &mut FixedRandom::constant(0.5),
        )
        .unwrap();

        assert_eq!(spore, "chanterelle");
        assert_eq!(state.spore(), Some("chanterelle"));
        assert_eq!(state.colonize_duration_hours, 24.0);
        assert!(state.is_colonizing());
        assert_eq!(held.size, 2);
    }

    #[test]
    fn inoculated_container_declines() {
        let mut state = GrowerState {
            inoculated_spore: Some("chanterelle".to_owned()),
            ..GrowerState::new(1000.0)
        };
        let before = state.clone();
        let mut held = print("chanterelle", 1);

        let result = inoculate(
            &mut state,
            &mut held,
            &config(),
            &registry(),
            &mut FixedRandom::constant(0.5),
        );
        assert!(matches!(result, Err(InoculateRejection::AlreadyInoculated { .. })));
        assert_eq!(state, before);
        assert_eq!(held.size, 1);
    }

    #[test]
    fn non_prints_are_rejected() {
        let registry = registry();
        for code in ["game:flint", "substrate:sporeprint-blank", "substrate:unknown"] {
            let mut state = GrowerState::new(1000.0);
            let mut held = ItemStack::new(AssetCode::parse(code), 1);
            let result = inoculate(
                &mut state,
                &mut held,
                &config(),
                &registry,
                &mut FixedRandom::constant(0.5),
            );
            assert!(
                matches!(result, Err(InoculateRejection::NotSporePrint { .. })),
                "{code} should not inoculate"
            );
            assert!(!state.is_inoculated());
        }
    }

    #[test]
    fn unacceptable_spore_names_the_other_container() {
        let mut state = GrowerState::new(1000.0);
        let mut held = print("bolete", 1);
        let result = inoculate(
            &mut state,
            &mut held,
            &config(),
            &registry(),
            &mut FixedRandom::constant(0.5),
        );
        assert_eq!(
            result,
            Err(InoculateRejection::UnacceptableSpore {
                spore: "bolete".to_owned(),
                required_container: ContainerShape::GrowBed,
            })
        );
        assert_eq!(held.size, 1);
    }

    #[test]
    fn empty_stack_is_rejected() {
        let mut state = GrowerState::new(1000.0);
        let mut held = print("chanterelle", 0);
        let result = inoculate(
            &mut state,
            &mut held,
            &config(),
            &registry(),
            &mut FixedRandom::constant(0.5),
        );
        assert_eq!(result, Err(InoculateRejection::EmptyStack));
    }

    #[test]
    fn decayed_container_accepts_a_new_print() {
        let mut state = GrowerState {
            inoculated_spore: Some("chanterelle".to_owned()),
            ..GrowerState::new(1000.0)
        };
        state.reset_spent();
        let mut held = print("chanterelle", 1);
        let result = inoculate(
            &mut state,
            &mut held,
            &config(),
            &registry(),
            &mut FixedRandom::constant(0.5),
        );
        assert!(result.is_ok());
        assert!(state.is_inoculated());
        assert_eq!(state.fertility, 0.0);
    }
}
