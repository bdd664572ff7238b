//! Pre-combat housekeeping phases.
//!
//! Non-combatant withdrawal, paratrooper landing, movement marking, and
//! the unprotected-transport sweep. Each is a single atomic sub-operation.

use crate::battle::{BattleActions, BattleState, BOTH_SIDES};
use crate::bridge::{Bridge, BridgeError, Change};

pub fn run_remove_non_combatants(
    state: &mut BattleState,
    bridge: &mut dyn Bridge,
) -> Result<(), BridgeError> {
    let withdrawn = state.remove_non_combatants();
    if withdrawn > 0 {
        bridge.apply_change(&Change::NonCombatantsWithdrawn { count: withdrawn })?;
        bridge.history_write(&format!("{withdrawn} non-combatants withdrawn"))?;
    }
    Ok(())
}

pub fn run_land_paratroopers(
    state: &mut BattleState,
    bridge: &mut dyn Bridge,
) -> Result<(), BridgeError> {
    let landed = state.land_paratroopers();
    if landed > 0 {
        bridge.apply_change(&Change::ParatroopersLanded { count: landed })?;
        bridge.history_write(&format!("{landed} paratroopers landed"))?;
    }
    Ok(())
}

pub fn run_mark_no_movement(
    state: &mut BattleState,
    bridge: &mut dyn Bridge,
) -> Result<(), BridgeError> {
    let marked = state.mark_no_movement();
    if marked > 0 {
        bridge.apply_change(&Change::MovementSpent { count: marked })?;
    }
    Ok(())
}

/// Sweeps both sides for transports left without any combatant cover.
pub fn run_remove_unprotected(
    state: &mut BattleState,
    bridge: &mut dyn Bridge,
) -> Result<(), BridgeError> {
    for side in BOTH_SIDES {
        let removed = state.remove_unprotected(side);
        if removed > 0 {
            bridge.apply_change(&Change::UnprotectedRemoved {
                side,
                count: removed,
            })?;
            bridge.history_write(&format!(
                "{} loses {} unprotected transports",
                side.name(),
                removed
            ))?;
        }
    }
    Ok(())
}

pub fn run_remove_suicide_units(
    state: &mut BattleState,
    bridge: &mut dyn Bridge,
) -> Result<(), BridgeError> {
    let removed = state.remove_suicide_units();
    if removed > 0 {
        bridge.apply_change(&Change::SuicideUnitsRemoved { count: removed })?;
        bridge.history_write(&format!("{removed} suicide units removed"))?;
    }
    Ok(())
}
