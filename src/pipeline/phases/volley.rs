//! Shared fire machinery: rolling, casualty selection, and removal.
//!
//! Every fire phase decomposes into a roll, a selection, and a
//! notification sub-operation; the hits rolled are parked on the battle
//! state between the roll and the selection so a persisted snapshot taken
//! between them stays unambiguous.

use crate::battle::{
    BattleActions, BattleState, Side, Unit, UnitFilter, UnitId, Volley,
};
use crate::bridge::{Bridge, BridgeError, Change};

/// Units of `firing` that roll dice in `volley`, in id order.
///
/// Uncleared casualties still fire (`AliveOrWaitingToDie`); whether they
/// got cleared first is exactly what the casualty-clearing phase decides.
pub fn firing_units<'a>(state: &'a BattleState, volley: Volley, firing: Side) -> Vec<&'a Unit> {
    state
        .units(UnitFilter::AliveOrWaitingToDie, firing)
        .filter(|u| !u.airborne)
        .filter(|u| match volley {
            Volley::AntiAir => u.profile.anti_air && u.profile.aa_strength > 0,
            Volley::Bombard => u.profile.bombard,
            Volley::FirstStrike => u.profile.first_strike,
            Volley::General => {
                !u.profile.first_strike && !u.profile.anti_air && u.strength() > 0
            }
        })
        .collect()
}

/// Rolls the dice for one volley and parks the hit count on the state.
pub fn run_roll(
    volley: Volley,
    firing: Side,
    state: &mut BattleState,
    bridge: &mut dyn Bridge,
) -> Result<(), BridgeError> {
    let target = firing.opposite();
    let die_sides = state.ruleset.die_sides;

    // AA fire rolls one die per opposing air unit at the best emplacement
    // strength; every other volley rolls one die per firing unit at that
    // unit's own strength.
    let strengths: Vec<u8> = if volley == Volley::AntiAir {
        let best = firing_units(state, volley, firing)
            .iter()
            .map(|u| u.profile.aa_strength)
            .max()
            .unwrap_or(0);
        let air_targets = state
            .units(UnitFilter::Alive, target)
            .filter(|u| u.profile.is_air)
            .count();
        vec![best; air_targets]
    } else {
        firing_units(state, volley, firing)
            .iter()
            .map(|u| u.strength())
            .collect()
    };

    if strengths.is_empty() {
        state.set_pending_hits(volley, target, 0);
        return Ok(());
    }

    let rolls = bridge.roll_dice(strengths.len() as u32, die_sides)?;
    let hits = rolls
        .iter()
        .zip(&strengths)
        .filter(|&(roll, strength)| roll < strength)
        .count() as u32;

    bridge.apply_change(&Change::DiceRolled {
        volley,
        firing,
        rolls: rolls.clone(),
        hits,
    })?;
    bridge.history_write(&format!(
        "{} {} fire: {} dice, {} hits",
        firing.name(),
        volley.name(),
        rolls.len(),
        hits
    ))?;
    state.set_pending_hits(volley, target, hits);
    Ok(())
}

/// Turns parked hits into waiting-to-die casualties on `target`.
///
/// With the AI layer out of scope, selection is the deterministic
/// cheapest-first policy with the unit id as tiebreak, so every
/// participant computes the identical casualty set.
pub fn run_select(
    volley: Volley,
    target: Side,
    state: &mut BattleState,
    bridge: &mut dyn Bridge,
) -> Result<(), BridgeError> {
    let hits = state.take_pending_hits(volley, target);
    if hits == 0 {
        return Ok(());
    }

    let chosen = select_casualties(state, volley, target, hits);
    if chosen.is_empty() {
        return Ok(());
    }

    state.mark_waiting_to_die(&chosen);
    bridge.apply_change(&Change::CasualtiesMarked {
        volley,
        target,
        count: chosen.len() as u32,
    })?;
    bridge.history_write(&format!(
        "{} selects {} {} casualties",
        target.name(),
        chosen.len(),
        volley.name()
    ))?;
    Ok(())
}

/// Announces the casualties selected in this volley to observers.
pub fn run_notify(
    volley: Volley,
    target: Side,
    state: &BattleState,
    bridge: &mut dyn Bridge,
) -> Result<(), BridgeError> {
    let waiting = state.count(UnitFilter::WaitingToDie, target);
    bridge.history_write(&format!(
        "{}: {} casualties waiting to die after {}",
        target.name(),
        waiting,
        volley.name()
    ))?;
    Ok(())
}

/// Clears waiting-to-die casualties of the given sides off the board.
pub fn run_remove_casualties(
    sides: &[Side],
    state: &mut BattleState,
    bridge: &mut dyn Bridge,
) -> Result<(), BridgeError> {
    let removed = state.remove_casualties(sides);
    if removed > 0 {
        bridge.apply_change(&Change::CasualtiesRemoved {
            sides: sides.to_vec(),
            count: removed,
        })?;
        bridge.history_write(&format!("{removed} casualties removed"))?;
    }
    Ok(())
}

/// Picks `hits` casualties on `target`, cheapest first.
fn select_casualties(state: &BattleState, volley: Volley, target: Side, hits: u32) -> Vec<UnitId> {
    let mut candidates: Vec<&Unit> = state
        .units(UnitFilter::Alive, target)
        .filter(|u| !u.profile.is_infrastructure)
        .filter(|u| volley != Volley::AntiAir || u.profile.is_air)
        .collect();

    // Restricted rulesets spare transports until nothing else remains.
    let protect_transports = state.ruleset.restrict_transport_casualties
        && candidates.iter().any(|u| !u.profile.is_sea_transport);
    if protect_transports {
        candidates.retain(|u| !u.profile.is_sea_transport);
    }

    candidates.sort_by_key(|u| (u.profile.value, u.id));
    candidates
        .into_iter()
        .take(hits as usize)
        .map(|u| u.id)
        .collect()
}
