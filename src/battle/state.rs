//! Battle state: the unit roster and battle geometry for one encounter.
//!
//! The pipeline only ever reads this surface; all mutation flows through
//! the [`BattleActions`](super::actions::BattleActions) trait so that the
//! side-effecting seam stays explicit and mockable.

use serde::{Deserialize, Serialize};

use super::ruleset::Ruleset;
use super::side::{Side, UnitFilter};
use super::unit::{TerritoryId, Unit, UnitId, UnitProfile, UnitStatus, Volley};

/// How a finished battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    OffenseWins,
    DefenseWins,
    OffenseRetreated,
    /// Both sides still standing but neither able to hit the other.
    Stalemate,
    /// Both sides wiped out in the same exchange.
    Draw,
}

/// Complete state of one battle.
///
/// Owned by the orchestrator; the pipeline receives it by reference for
/// the duration of one call and never caches query results across phase
/// boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    pub territory: TerritoryId,
    pub is_amphibious: bool,
    pub ruleset: Ruleset,
    pub(crate) units: Vec<Unit>,
    pub(crate) retreat_territories: Vec<TerritoryId>,
    /// Standing retreat order registered by the (out-of-scope) AI layer.
    pub(crate) retreat_order: Option<TerritoryId>,
    /// Hits rolled but not yet turned into casualties, keyed by volley and
    /// target side. Bridges the gap between the roll and the selection
    /// sub-operations so a snapshot between them is unambiguous.
    pub(crate) pending_hits: Vec<(Volley, Side, u32)>,
    pub(crate) outcome: Option<Outcome>,
}

impl BattleState {
    /// Creates a battle with no units committed yet.
    pub fn new(territory: TerritoryId, ruleset: Ruleset, is_amphibious: bool) -> Self {
        BattleState {
            territory,
            is_amphibious,
            ruleset,
            units: Vec::new(),
            retreat_territories: Vec::new(),
            retreat_order: None,
            pending_hits: Vec::new(),
            outcome: None,
        }
    }

    /// Commits a unit to the battle and returns its id.
    pub fn add_unit(&mut self, side: Side, profile: UnitProfile) -> UnitId {
        let id = UnitId(self.units.len() as u32);
        let airborne = profile.paratrooper;
        self.units.push(Unit {
            id,
            side,
            profile,
            status: UnitStatus::Alive,
            airborne,
            movement_left: true,
        });
        id
    }

    /// Sets the legal retreat destinations for the attacker.
    pub fn set_retreat_territories(&mut self, territories: Vec<TerritoryId>) {
        self.retreat_territories = territories;
    }

    /// Legal retreat destinations for the attacker.
    pub fn retreat_territories(&self) -> &[TerritoryId] {
        &self.retreat_territories
    }

    /// Registers a standing retreat order for the offense.
    pub fn order_retreat(&mut self, to: TerritoryId) {
        self.retreat_order = Some(to);
    }

    /// The standing retreat order, if any.
    pub fn retreat_order(&self) -> Option<TerritoryId> {
        self.retreat_order
    }

    /// How the battle ended, once it has.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Looks up a unit by id.
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.0 as usize)
    }

    /// Units of `side` matching `filter`, in id order.
    pub fn units(&self, filter: UnitFilter, side: Side) -> impl Iterator<Item = &Unit> {
        self.units
            .iter()
            .filter(move |u| u.side == side && filter_matches(filter, u.status))
    }

    /// Number of units of `side` matching `filter`.
    pub fn count(&self, filter: UnitFilter, side: Side) -> usize {
        self.units(filter, side).count()
    }

    /// True if `side` has any unit matching `filter` whose profile
    /// satisfies `pred`.
    pub fn has_unit(
        &self,
        filter: UnitFilter,
        side: Side,
        pred: impl Fn(&UnitProfile) -> bool,
    ) -> bool {
        self.units(filter, side).any(|u| pred(&u.profile))
    }

    /// True if `side` still fields combatants: alive units that are not
    /// pure cargo or infrastructure.
    pub fn has_combatants(&self, side: Side) -> bool {
        self.units(UnitFilter::Alive, side)
            .any(|u| !u.profile.is_sea_transport && !u.profile.is_infrastructure)
    }

    /// True if any alive unit of `side` can roll a hit.
    pub fn side_has_power(&self, side: Side) -> bool {
        self.units(UnitFilter::Alive, side)
            .any(|u| u.strength() > 0 || u.profile.anti_air && u.profile.aa_strength > 0)
    }

    /// True if every alive unit of `side` is an air unit (and there is at
    /// least one).
    pub fn side_is_air_only(&self, side: Side) -> bool {
        let mut any = false;
        for unit in self.units(UnitFilter::Alive, side) {
            if !unit.profile.is_air {
                return false;
            }
            any = true;
        }
        any
    }

    /// Records rolled-but-unapplied hits against `target`.
    pub(crate) fn set_pending_hits(&mut self, volley: Volley, target: Side, hits: u32) {
        self.pending_hits.retain(|(v, s, _)| !(*v == volley && *s == target));
        self.pending_hits.push((volley, target, hits));
    }

    /// Takes and clears the pending hits against `target`, if any.
    pub(crate) fn take_pending_hits(&mut self, volley: Volley, target: Side) -> u32 {
        let mut hits = 0;
        self.pending_hits.retain(|(v, s, h)| {
            if *v == volley && *s == target {
                hits = *h;
                false
            } else {
                true
            }
        });
        hits
    }
}

fn filter_matches(filter: UnitFilter, status: UnitStatus) -> bool {
    match filter {
        UnitFilter::Alive => status == UnitStatus::Alive,
        UnitFilter::WaitingToDie => status == UnitStatus::WaitingToDie,
        UnitFilter::AliveOrWaitingToDie => {
            matches!(status, UnitStatus::Alive | UnitStatus::WaitingToDie)
        }
    }
}
