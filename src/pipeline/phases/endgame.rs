//! End-of-battle checks: victory, attacker retreat, stalemate.

use crate::battle::{BattleActions, BattleState, Outcome, Side, UnitFilter, BOTH_SIDES};
use crate::bridge::{Bridge, BridgeError, Change};
use crate::pipeline::retreat::can_attacker_retreat;

/// Ends the battle when a side has been wiped out.
pub fn run_battle_end_check(
    state: &mut BattleState,
    bridge: &mut dyn Bridge,
) -> Result<(), BridgeError> {
    if state.outcome().is_some() {
        return Ok(());
    }
    let offense_alive = state.count(UnitFilter::Alive, Side::Offense) > 0;
    let defense_alive = state.count(UnitFilter::Alive, Side::Defense) > 0;
    let outcome = match (offense_alive, defense_alive) {
        (false, false) => Outcome::Draw,
        (true, false) => Outcome::OffenseWins,
        (false, true) => Outcome::DefenseWins,
        (true, true) => return Ok(()),
    };
    state.end_battle(outcome);
    bridge.apply_change(&Change::BattleEnded { outcome })?;
    bridge.history_write(&format!("battle ended: {outcome:?}"))?;
    Ok(())
}

/// Offers the attacker its general retreat, honoring any standing retreat
/// order registered by the decision layer.
pub fn run_offensive_retreat(
    state: &mut BattleState,
    bridge: &mut dyn Bridge,
) -> Result<(), BridgeError> {
    if state.outcome().is_some() {
        return Ok(());
    }

    let eligible = {
        let defenders: Vec<_> = state.units(UnitFilter::Alive, Side::Defense).collect();
        can_attacker_retreat(
            &defenders,
            &state.ruleset,
            || state.retreat_territories().to_vec(),
            state.is_amphibious,
        )
    };
    if !eligible {
        return Ok(());
    }

    let Some(to) = state.retreat_order() else {
        bridge.history_write("offense declines to retreat")?;
        return Ok(());
    };

    let retreated = state.retreat_side(Side::Offense, to);
    state.end_battle(Outcome::OffenseRetreated);
    bridge.apply_change(&Change::Retreated {
        side: Side::Offense,
        to,
        count: retreated,
    })?;
    bridge.apply_change(&Change::BattleEnded {
        outcome: Outcome::OffenseRetreated,
    })?;
    bridge.history_write(&format!("offense retreats {retreated} units"))?;
    Ok(())
}

/// Ends the battle as a stalemate when both sides stand but neither can
/// land a hit.
pub fn run_stalemate_check(
    state: &mut BattleState,
    bridge: &mut dyn Bridge,
) -> Result<(), BridgeError> {
    if state.outcome().is_some() {
        return Ok(());
    }
    let both_standing = BOTH_SIDES
        .iter()
        .all(|&side| state.count(UnitFilter::Alive, side) > 0);
    let neither_can_hit = BOTH_SIDES.iter().all(|&side| !state.side_has_power(side));
    if both_standing && neither_can_hit {
        state.end_battle(Outcome::Stalemate);
        bridge.apply_change(&Change::BattleEnded {
            outcome: Outcome::Stalemate,
        })?;
        bridge.history_write("battle ended: stalemate")?;
    }
    Ok(())
}
