//! Metal grants after progress, and metal transfer in the grab phase.

use crate::config::GameRules;
use crate::env::{RngOracle, RollContext, compute_seed};
use crate::state::{Metal, MetalSet, PlayerState};

/// Runs every grant window against the level the player just reached.
///
/// A window only fires for a player holding neither metal of its pair, so the
/// grant alone can never yield both metals of a pair. Returns the metal
/// handed out, if any.
pub(crate) fn maybe_grant(
    rules: &GameRules,
    rng: &dyn RngOracle,
    state: &mut PlayerState,
    seed: u64,
) -> Option<Metal> {
    let level = state.level;
    let mut granted = None;

    for window in &rules.grant_windows {
        let Some(percent) = window.chance_at(level) else {
            continue;
        };
        if window.pair.iter().any(|metal| state.metals.has(*metal)) {
            continue;
        }

        if !rng.chance(compute_seed(seed, level, RollContext::GrantChance), percent) {
            continue;
        }

        let metal = window.pair[rng.pick(
            compute_seed(seed, level, RollContext::GrantPick),
            window.pair.len(),
        )];
        state.metals.grant(metal);
        granted = Some(metal);
    }

    granted
}

/// Takes one metal the target holds and the scanner lacks, uniformly at
/// random. Returns `None` when the target has nothing new to offer.
pub(crate) fn grab_from(
    rng: &dyn RngOracle,
    scanner: &mut PlayerState,
    target: &MetalSet,
    seed: u64,
) -> Option<Metal> {
    let grabbable = target.missing_from(&scanner.metals);
    if grabbable.is_empty() {
        return None;
    }

    let metal = grabbable[rng.pick(
        compute_seed(seed, scanner.level, RollContext::GrabPick),
        grabbable.len(),
    )];
    scanner.metals.grant(metal);
    Some(metal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    #[test]
    fn level_ten_always_grants_exactly_one_of_the_first_pair() {
        let rules = GameRules::default();
        for seed in 0..1_000u64 {
            let mut state = PlayerState::new(10, 3);
            let granted = maybe_grant(&rules, &PcgRng, &mut state, seed);

            let metal = granted.expect("level 10 grant is guaranteed");
            assert!(matches!(metal, Metal::Aluminium | Metal::Copper));
            assert_eq!(state.metals.metals().count(), 1);
        }
    }

    #[test]
    fn level_twenty_always_grants_one_of_the_second_pair() {
        let rules = GameRules::default();
        for seed in 0..1_000u64 {
            let mut state = PlayerState::new(20, 3).with_metals([Metal::Copper]);
            let granted = maybe_grant(&rules, &PcgRng, &mut state, seed);

            assert!(matches!(granted, Some(Metal::Tin | Metal::Zinc)));
            assert_eq!(state.metals.metals().count(), 2);
        }
    }

    #[test]
    fn holding_one_of_the_pair_blocks_the_window() {
        let rules = GameRules::default();
        for seed in 0..200u64 {
            let mut state = PlayerState::new(10, 3).with_metals([Metal::Aluminium]);
            assert_eq!(maybe_grant(&rules, &PcgRng, &mut state, seed), None);
            assert!(!state.metals.has(Metal::Copper));
        }
    }

    #[test]
    fn outside_windows_nothing_is_granted() {
        let rules = GameRules::default();
        for level in [2, 7, 11, 17, 21] {
            let mut state = PlayerState::new(level, 3);
            assert_eq!(maybe_grant(&rules, &PcgRng, &mut state, 99), None);
            assert!(state.metals.is_empty());
        }
    }

    #[test]
    fn grab_takes_the_only_new_metal() {
        let mut scanner = PlayerState::new(20, 2);
        let target: MetalSet = [Metal::Tin].into_iter().collect();

        for seed in 0..50u64 {
            let mut scanner = scanner.clone();
            assert_eq!(grab_from(&PcgRng, &mut scanner, &target, seed), Some(Metal::Tin));
        }

        scanner.metals.grant(Metal::Tin);
        assert_eq!(grab_from(&PcgRng, &mut scanner, &target, 1), None);
    }
}
