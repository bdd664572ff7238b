//! First-strike applicability and the casualty-clearing asymmetry.
//!
//! The two most rule-sensitive algorithms in the pipeline. Both are pure
//! functions over the battle snapshot and ruleset flags; the applicability
//! result is computed once at step construction and never re-derived
//! mid-battle.

use serde::{Deserialize, Serialize};

use crate::battle::{BattleState, Side, UnitFilter, BOTH_SIDES};

/// How a side's first-strike units fire this battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstStrikeState {
    /// Fire before the enemy can return fire.
    SneakAttack,
    /// First-strike units exist but fire simultaneously with everyone.
    Regular,
    /// No first-strike units alive on this side.
    NotApplicable,
}

/// Computes `side`'s first-strike state from the battle snapshot.
///
/// Rules, in precedence order:
/// - no alive first-strike units -> `NotApplicable`;
/// - classic simultaneous-first-strike ruleset -> `SneakAttack`;
/// - defender with the defending-sneak-attack flag -> `SneakAttack`;
/// - no alive sneak-attack detector (destroyer) opposing -> `SneakAttack`;
/// - otherwise -> `Regular`.
pub fn first_strike_state(side: Side, state: &BattleState) -> FirstStrikeState {
    if !state.has_unit(UnitFilter::Alive, side, |p| p.first_strike) {
        return FirstStrikeState::NotApplicable;
    }
    if state.ruleset.classic_simultaneous_first_strike {
        return FirstStrikeState::SneakAttack;
    }
    if side == Side::Defense && state.ruleset.defending_first_strike_sneak_attack {
        return FirstStrikeState::SneakAttack;
    }
    if !state.has_unit(UnitFilter::Alive, side.opposite(), |p| p.detects_first_strike) {
        return FirstStrikeState::SneakAttack;
    }
    FirstStrikeState::Regular
}

/// Which sides have their first-strike casualties cleared before return
/// fire.
///
/// - classic rule off -> both sides, always;
/// - classic rule on and exactly one side sneak-attacked -> only the
///   side that did not (the sneak attacker keeps firing with units that
///   would otherwise be dead);
/// - classic rule on, both or neither sneak-attacked -> both sides.
pub fn casualty_clear_sides(
    classic: bool,
    offense: FirstStrikeState,
    defense: FirstStrikeState,
) -> Vec<Side> {
    if !classic {
        return BOTH_SIDES.to_vec();
    }
    let off_sneak = offense == FirstStrikeState::SneakAttack;
    let def_sneak = defense == FirstStrikeState::SneakAttack;
    match (off_sneak, def_sneak) {
        (true, false) => vec![Side::Defense],
        (false, true) => vec![Side::Offense],
        _ => BOTH_SIDES.to_vec(),
    }
}
