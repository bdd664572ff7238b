//! The execution stack: resumable control flow as an explicit work list.
//!
//! A phase's `execute` pushes its sub-operations in reverse, so popping
//! yields forward execution order. The stack, not the call frame, is the
//! unit of persisted progress: a snapshot taken between two pops loses
//! nothing beyond "which sub-operation is next", which the top entry
//! encodes.

use serde::{Deserialize, Serialize};

use crate::battle::{BattleState, Side, Volley};
use crate::bridge::{Bridge, BridgeError};
use crate::pipeline::phases::{endgame, prep, submarine, volley, RetreatTiming};

/// One pending sub-operation of the currently executing phase.
///
/// Entries are the retry and persistence boundary: each is atomic against
/// the bridge, and the only sanctioned suspension point is between the pop
/// of one entry and the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StackEntry {
    RollDice { volley: Volley, firing: Side },
    SelectCasualties { volley: Volley, target: Side },
    NotifyCasualties { volley: Volley, target: Side },
    RemoveCasualties { sides: Vec<Side> },
    RemoveNonCombatants,
    LandParatroopers,
    MarkNoMovement,
    SubRetreat { side: Side, timing: RetreatTiming },
    RemoveUnprotected,
    SubmergeVsAirOnly,
    RemoveSuicideUnits,
    BattleEndCheck,
    OffensiveRetreat,
    StalemateCheck,
}

impl StackEntry {
    /// Executes this sub-operation against the battle state and bridge.
    pub fn run(
        &self,
        state: &mut BattleState,
        bridge: &mut dyn Bridge,
    ) -> Result<(), BridgeError> {
        match self {
            StackEntry::RollDice { volley, firing } => {
                volley::run_roll(*volley, *firing, state, bridge)
            }
            StackEntry::SelectCasualties { volley, target } => {
                volley::run_select(*volley, *target, state, bridge)
            }
            StackEntry::NotifyCasualties { volley, target } => {
                volley::run_notify(*volley, *target, state, bridge)
            }
            StackEntry::RemoveCasualties { sides } => {
                volley::run_remove_casualties(sides, state, bridge)
            }
            StackEntry::RemoveNonCombatants => prep::run_remove_non_combatants(state, bridge),
            StackEntry::LandParatroopers => prep::run_land_paratroopers(state, bridge),
            StackEntry::MarkNoMovement => prep::run_mark_no_movement(state, bridge),
            StackEntry::SubRetreat { side, timing } => {
                submarine::run_sub_retreat(*side, *timing, state, bridge)
            }
            StackEntry::RemoveUnprotected => prep::run_remove_unprotected(state, bridge),
            StackEntry::SubmergeVsAirOnly => submarine::run_submerge_vs_air(state, bridge),
            StackEntry::RemoveSuicideUnits => prep::run_remove_suicide_units(state, bridge),
            StackEntry::BattleEndCheck => endgame::run_battle_end_check(state, bridge),
            StackEntry::OffensiveRetreat => endgame::run_offensive_retreat(state, bridge),
            StackEntry::StalemateCheck => endgame::run_stalemate_check(state, bridge),
        }
    }
}

/// LIFO work list of pending sub-operations for one battle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionStack {
    entries: Vec<StackEntry>,
}

impl ExecutionStack {
    pub fn new() -> Self {
        ExecutionStack::default()
    }

    /// Rebuilds a stack from persisted entries (bottom first).
    pub fn from_entries(entries: Vec<StackEntry>) -> Self {
        ExecutionStack { entries }
    }

    /// The remaining entries, bottom first, for persistence.
    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }

    pub fn push(&mut self, entry: StackEntry) {
        self.entries.push(entry);
    }

    /// Pushes a group of entries given in forward execution order, so
    /// that popping yields that order.
    pub fn push_group(&mut self, group: Vec<StackEntry>) {
        for entry in group.into_iter().rev() {
            self.entries.push(entry);
        }
    }

    pub fn pop(&mut self) -> Option<StackEntry> {
        self.entries.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
