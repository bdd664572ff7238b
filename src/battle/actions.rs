//! The side-effecting mutation surface of a battle.
//!
//! Every board mutation a phase can request goes through this trait, each
//! call atomic from the pipeline's point of view. `BattleState` implements
//! it directly; tests substitute recording implementations to assert which
//! operations were requested.

use super::side::{Side, UnitFilter};
use super::state::{BattleState, Outcome};
use super::unit::{TerritoryId, UnitId, UnitStatus};

/// Mutations a phase may request. Each returns the number of units it
/// affected where that is meaningful for history logging.
pub trait BattleActions {
    /// Clears waiting-to-die casualties of the given sides off the board.
    fn remove_casualties(&mut self, sides: &[Side]) -> u32;

    /// Marks the given units as casualties awaiting removal.
    fn mark_waiting_to_die(&mut self, ids: &[UnitId]);

    /// Withdraws infrastructure and other non-combatants from the battle.
    fn remove_non_combatants(&mut self) -> u32;

    /// Lands airborne paratroopers so they can fight.
    fn land_paratroopers(&mut self) -> u32;

    /// Marks all committed offensive units as having spent their movement.
    fn mark_no_movement(&mut self) -> u32;

    /// Withdraws `side`'s submarine-like units before general combat.
    fn withdraw_early(&mut self, side: Side) -> u32;

    /// Submerges `side`'s submersible units out of the battle.
    fn submerge_side(&mut self, side: Side) -> u32;

    /// Removes `side`'s unprotected non-combat transports as casualties
    /// when nothing remains to defend them.
    fn remove_unprotected(&mut self, side: Side) -> u32;

    /// Removes suicide first-strike units that have delivered their shot.
    fn remove_suicide_units(&mut self) -> u32;

    /// Retreats all of `side`'s remaining units to `to`.
    fn retreat_side(&mut self, side: Side, to: TerritoryId) -> u32;

    /// Records the battle's outcome.
    fn end_battle(&mut self, outcome: Outcome);
}

impl BattleActions for BattleState {
    fn remove_casualties(&mut self, sides: &[Side]) -> u32 {
        let mut removed = 0;
        for unit in &mut self.units {
            if unit.status == UnitStatus::WaitingToDie && sides.contains(&unit.side) {
                unit.status = UnitStatus::Removed;
                removed += 1;
            }
        }
        removed
    }

    fn mark_waiting_to_die(&mut self, ids: &[UnitId]) {
        for unit in &mut self.units {
            if unit.status == UnitStatus::Alive && ids.contains(&unit.id) {
                unit.status = UnitStatus::WaitingToDie;
            }
        }
    }

    fn remove_non_combatants(&mut self) -> u32 {
        let mut withdrawn = 0;
        for unit in &mut self.units {
            if unit.status == UnitStatus::Alive && unit.profile.is_infrastructure {
                unit.status = UnitStatus::Withdrawn;
                withdrawn += 1;
            }
        }
        withdrawn
    }

    fn land_paratroopers(&mut self) -> u32 {
        let mut landed = 0;
        for unit in &mut self.units {
            if unit.status == UnitStatus::Alive && unit.airborne {
                unit.airborne = false;
                landed += 1;
            }
        }
        landed
    }

    fn mark_no_movement(&mut self) -> u32 {
        let mut marked = 0;
        for unit in &mut self.units {
            if unit.side == Side::Offense && unit.movement_left {
                unit.movement_left = false;
                marked += 1;
            }
        }
        marked
    }

    fn withdraw_early(&mut self, side: Side) -> u32 {
        let mut withdrawn = 0;
        for unit in &mut self.units {
            if unit.side == side
                && unit.status == UnitStatus::Alive
                && unit.profile.can_withdraw_early
            {
                unit.status = UnitStatus::Withdrawn;
                withdrawn += 1;
            }
        }
        withdrawn
    }

    fn submerge_side(&mut self, side: Side) -> u32 {
        let mut submerged = 0;
        for unit in &mut self.units {
            if unit.side == side && unit.status == UnitStatus::Alive && unit.profile.can_submerge {
                unit.status = UnitStatus::Withdrawn;
                submerged += 1;
            }
        }
        submerged
    }

    fn remove_unprotected(&mut self, side: Side) -> u32 {
        // Only applies when the opponent still has combatants and this
        // side has nothing left but cargo.
        if self.has_combatants(side) || !self.has_combatants(side.opposite()) {
            return 0;
        }
        if self.count(UnitFilter::Alive, side) == 0 {
            return 0;
        }
        let mut removed = 0;
        for unit in &mut self.units {
            if unit.side == side
                && unit.status == UnitStatus::Alive
                && unit.profile.is_sea_transport
            {
                unit.status = UnitStatus::Removed;
                removed += 1;
            }
        }
        removed
    }

    fn remove_suicide_units(&mut self) -> u32 {
        let mut removed = 0;
        for unit in &mut self.units {
            if unit.status == UnitStatus::Alive
                && unit.profile.suicide
                && unit.profile.first_strike
            {
                unit.status = UnitStatus::Removed;
                removed += 1;
            }
        }
        removed
    }

    fn retreat_side(&mut self, side: Side, _to: TerritoryId) -> u32 {
        let mut retreated = 0;
        for unit in &mut self.units {
            if unit.side == side && unit.status == UnitStatus::Alive {
                unit.status = UnitStatus::Withdrawn;
                retreated += 1;
            }
        }
        retreated
    }

    fn end_battle(&mut self, outcome: Outcome) {
        if self.outcome.is_none() {
            self.outcome = Some(outcome);
        }
    }
}
