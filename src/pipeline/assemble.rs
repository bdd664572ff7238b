//! Pipeline assembly: build the step catalog, sort it, flatten it.
//!
//! `assemble` is the one function both the UI ("what will happen in this
//! battle") and the executor are driven by. It is deterministic given
//! identical battle-state content: no randomness, no I/O.

use crate::battle::{BattleState, Side, UnitFilter};
use crate::pipeline::phases::{first_strike_state, submarine::can_withdraw, FirstStrikeState};
use crate::pipeline::step::{BattleStep, StepDetails};

/// Builds the full step catalog, computing every step's applicability
/// from the current battle snapshot.
pub fn catalog(state: &BattleState) -> Vec<BattleStep> {
    let offense = first_strike_state(Side::Offense, state);
    let defense = first_strike_state(Side::Defense, state);
    catalog_with_applicability(state, offense, defense)
}

/// Builds the catalog with externally supplied first-strike states.
///
/// The legacy resume path uses this for version-1 saves, which persisted
/// no catalog: the first-strike states come from the documented default
/// rather than being re-derived against current rules.
pub fn catalog_with_applicability(
    state: &BattleState,
    offense_fs: FirstStrikeState,
    defense_fs: FirstStrikeState,
) -> Vec<BattleStep> {
    let aa = |side: Side| {
        state.has_unit(UnitFilter::Alive, side, |p| p.anti_air && p.aa_strength > 0)
            && state.has_unit(UnitFilter::Alive, side.opposite(), |p| p.is_air)
    };
    let aa_any = aa(Side::Offense) || aa(Side::Defense);

    let bombard = state.is_amphibious
        && state.has_unit(UnitFilter::Alive, Side::Offense, |p| p.bombard);

    let non_combatants = state.has_unit(UnitFilter::Alive, Side::Offense, |p| p.is_infrastructure)
        || state.has_unit(UnitFilter::Alive, Side::Defense, |p| p.is_infrastructure);

    let paratroopers = state
        .units(UnitFilter::Alive, Side::Offense)
        .any(|u| u.airborne);

    let transports = state.has_unit(UnitFilter::Alive, Side::Offense, |p| p.is_sea_transport)
        || state.has_unit(UnitFilter::Alive, Side::Defense, |p| p.is_sea_transport);

    let submerge_vs_air = |side: Side| {
        state.side_is_air_only(side.opposite())
            && state.has_unit(UnitFilter::Alive, side, |p| p.can_submerge)
    };

    let general_fire = |side: Side| {
        state
            .units(UnitFilter::Alive, side)
            .any(|u| u.strength() > 0 && !u.profile.first_strike && !u.profile.anti_air)
    };

    let suicide = state.has_unit(UnitFilter::Alive, Side::Offense, |p| {
        p.suicide && p.first_strike
    }) || state.has_unit(UnitFilter::Alive, Side::Defense, |p| {
        p.suicide && p.first_strike
    });

    vec![
        BattleStep::AaFire {
            side: Side::Offense,
            applies: aa(Side::Offense),
        },
        BattleStep::AaFire {
            side: Side::Defense,
            applies: aa(Side::Defense),
        },
        BattleStep::AaCasualtyRemoval { applies: aa_any },
        BattleStep::NavalBombardment { applies: bombard },
        BattleStep::BombardCasualtyRemoval { applies: bombard },
        BattleStep::RemoveNonCombatants {
            applies: non_combatants,
        },
        BattleStep::LandParatroopers {
            applies: paratroopers,
        },
        BattleStep::MarkNoMovement,
        BattleStep::PreBattleSubRetreat {
            side: Side::Offense,
            applies: can_withdraw(Side::Offense, state),
        },
        BattleStep::PreBattleSubRetreat {
            side: Side::Defense,
            applies: can_withdraw(Side::Defense, state),
        },
        BattleStep::RemoveUnprotectedPreBattle { applies: transports },
        BattleStep::SubmergeVsAirOnly {
            applies: submerge_vs_air(Side::Offense) || submerge_vs_air(Side::Defense),
        },
        BattleStep::FirstStrikeFire {
            side: Side::Offense,
            state: offense_fs,
        },
        BattleStep::FirstStrikeFire {
            side: Side::Defense,
            state: defense_fs,
        },
        BattleStep::FirstStrikeCasualtyRemoval {
            classic: state.ruleset.classic_simultaneous_first_strike,
            offense: offense_fs,
            defense: defense_fs,
        },
        BattleStep::RemoveSuicideUnits { applies: suicide },
        BattleStep::GeneralFire {
            side: Side::Offense,
            applies: general_fire(Side::Offense),
        },
        BattleStep::GeneralFire {
            side: Side::Defense,
            applies: general_fire(Side::Defense),
        },
        BattleStep::GeneralCasualtyRemoval {
            applies: general_fire(Side::Offense) || general_fire(Side::Defense),
        },
        BattleStep::RemoveUnprotectedGeneral { applies: transports },
        BattleStep::BattleEndCheck,
        BattleStep::PostBattleSubRetreat {
            offense: can_withdraw(Side::Offense, state),
            defense: can_withdraw(Side::Defense, state),
        },
        BattleStep::OffensiveRetreat {
            applies: state.count(UnitFilter::Alive, Side::Offense) > 0,
        },
        BattleStep::StalemateCheck,
    ]
}

/// Sorts a catalog into execution order and flattens each step's
/// displayable sub-steps into one ordered list.
pub fn flatten(mut steps: Vec<BattleStep>) -> Vec<StepDetails> {
    steps.sort_by_key(|s| s.order());
    steps.iter().flat_map(|s| s.step_details()).collect()
}

/// The ordered phase list for one battle, for display and execution.
pub fn assemble(state: &BattleState) -> Vec<StepDetails> {
    flatten(catalog(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{Ruleset, TerritoryId, UnitProfile};

    fn mixed_battle() -> BattleState {
        let mut state = BattleState::new(TerritoryId(1), Ruleset::default(), true);
        state.add_unit(Side::Offense, UnitProfile::land(2, 2, 3));
        state.add_unit(Side::Offense, UnitProfile::submarine(2, 1, 6));
        state.add_unit(Side::Offense, UnitProfile::fighter(3, 4, 10));
        state.add_unit(Side::Offense, UnitProfile::bombard_ship(4, 4, 20));
        state.add_unit(Side::Defense, UnitProfile::land(1, 2, 3));
        state.add_unit(Side::Defense, UnitProfile::aa_gun(5));
        state.add_unit(Side::Defense, UnitProfile::transport(7));
        state
    }

    #[test]
    fn flattened_orders_are_non_decreasing() {
        let details = assemble(&mixed_battle());
        assert!(!details.is_empty());
        for pair in details.windows(2) {
            assert!(
                pair[0].order <= pair[1].order,
                "{:?} before {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn order_invariant_holds_for_any_construction_order() {
        let state = mixed_battle();
        let mut reversed = catalog(&state);
        reversed.reverse();
        assert_eq!(flatten(reversed), assemble(&state));
    }

    #[test]
    fn assemble_is_deterministic() {
        let state = mixed_battle();
        assert_eq!(assemble(&state), assemble(&state));
    }

    #[test]
    fn empty_sides_yield_only_bookkeeping_steps() {
        let state = BattleState::new(TerritoryId(1), Ruleset::default(), false);
        let names: Vec<String> = assemble(&state).into_iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "mark no movement".to_string(),
                "battle end check".to_string(),
                "stalemate check".to_string(),
            ]
        );
    }

    #[test]
    fn aa_fire_needs_opposing_air() {
        let mut state = BattleState::new(TerritoryId(1), Ruleset::default(), false);
        state.add_unit(Side::Defense, UnitProfile::aa_gun(5));
        state.add_unit(Side::Offense, UnitProfile::land(2, 2, 3));
        let names: Vec<String> = assemble(&state).into_iter().map(|d| d.name).collect();
        assert!(!names.iter().any(|n| n.contains("anti-air")));

        state.add_unit(Side::Offense, UnitProfile::fighter(3, 4, 10));
        let names: Vec<String> = assemble(&state).into_iter().map(|d| d.name).collect();
        assert!(names.iter().any(|n| n.contains("anti-air")));
    }

    #[test]
    fn bombardment_requires_amphibious_assault() {
        let mut state = BattleState::new(TerritoryId(1), Ruleset::default(), false);
        state.add_unit(Side::Offense, UnitProfile::bombard_ship(4, 4, 20));
        state.add_unit(Side::Defense, UnitProfile::land(1, 2, 3));
        let names: Vec<String> = assemble(&state).into_iter().map(|d| d.name).collect();
        assert!(!names.iter().any(|n| n.contains("bombardment")));

        state.is_amphibious = true;
        let names: Vec<String> = assemble(&state).into_iter().map(|d| d.name).collect();
        assert!(names.iter().any(|n| n.contains("bombardment")));
    }

    #[test]
    fn resume_applicability_overrides_current_rules() {
        let mut state = mixed_battle();
        // Current rules would say Regular once a destroyer shows up.
        state.add_unit(Side::Defense, UnitProfile::destroyer(2, 2, 8));

        let steps = catalog_with_applicability(
            &state,
            FirstStrikeState::SneakAttack,
            FirstStrikeState::NotApplicable,
        );
        let fs_offense = steps
            .iter()
            .find(|s| {
                matches!(
                    s,
                    BattleStep::FirstStrikeFire {
                        side: Side::Offense,
                        ..
                    }
                )
            })
            .unwrap();
        assert_eq!(
            *fs_offense,
            BattleStep::FirstStrikeFire {
                side: Side::Offense,
                state: FirstStrikeState::SneakAttack,
            }
        );
    }
}
