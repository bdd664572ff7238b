//! Submarine phases: early withdrawal and submerging against air.
//!
//! Submarine-like units may slip out of a battle before or after general
//! combat, but an opposing detector (destroyer) pins them in place.

use serde::{Deserialize, Serialize};

use crate::battle::{BattleActions, BattleState, Side, UnitFilter, BOTH_SIDES};
use crate::bridge::{Bridge, BridgeError, Change};

/// Whether a submarine withdrawal happens before or after the general
/// combat rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetreatTiming {
    BeforeBattle,
    AfterBattle,
}

/// True if `side` has withdraw-capable units and no opposing detector
/// pins them down.
pub fn can_withdraw(side: Side, state: &BattleState) -> bool {
    state.has_unit(UnitFilter::Alive, side, |p| p.can_withdraw_early)
        && !state.has_unit(UnitFilter::Alive, side.opposite(), |p| p.detects_first_strike)
}

pub fn run_sub_retreat(
    side: Side,
    timing: RetreatTiming,
    state: &mut BattleState,
    bridge: &mut dyn Bridge,
) -> Result<(), BridgeError> {
    // A decided battle has nothing left to withdraw from.
    if timing == RetreatTiming::AfterBattle && state.outcome().is_some() {
        return Ok(());
    }
    if !can_withdraw(side, state) {
        return Ok(());
    }
    let withdrawn = state.withdraw_early(side);
    if withdrawn > 0 {
        bridge.apply_change(&Change::Withdrawn {
            side,
            count: withdrawn,
        })?;
        bridge.history_write(&format!(
            "{} withdraws {} submarines",
            side.name(),
            withdrawn
        ))?;
    }
    Ok(())
}

/// Submerges a side's submersibles when only air units oppose them.
pub fn run_submerge_vs_air(
    state: &mut BattleState,
    bridge: &mut dyn Bridge,
) -> Result<(), BridgeError> {
    for side in BOTH_SIDES {
        if !state.side_is_air_only(side.opposite()) {
            continue;
        }
        let submerged = state.submerge_side(side);
        if submerged > 0 {
            bridge.apply_change(&Change::Submerged {
                side,
                count: submerged,
            })?;
            bridge.history_write(&format!(
                "{} submerges {} units against air-only opposition",
                side.name(),
                submerged
            ))?;
        }
    }
    Ok(())
}
