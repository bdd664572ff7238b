//! The fixed total ordering of battle phases.
//!
//! Declaration order *is* the ordering: `Ord` is derived, and every battle
//! sequences its steps by it. The list is never computed, only filtered —
//! a phase with nothing to do simply contributes no visible steps.

/// Identity and position of every phase the pipeline can run.
///
/// Two phases of the same kind for opposite sides (e.g. offensive and
/// defensive AA fire) hold distinct adjacent positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PhaseOrder {
    OffensiveAaFire,
    DefensiveAaFire,
    AaCasualtyRemoval,
    NavalBombardment,
    BombardCasualtyRemoval,
    RemoveNonCombatants,
    LandParatroopers,
    MarkNoMovement,
    OffensiveSubRetreatBefore,
    DefensiveSubRetreatBefore,
    RemoveUnprotectedPreBattle,
    SubmergeVsAirOnly,
    OffensiveFirstStrike,
    DefensiveFirstStrike,
    FirstStrikeCasualtyRemoval,
    RemoveSuicideUnits,
    OffensiveGeneralFire,
    DefensiveGeneralFire,
    GeneralCasualtyRemoval,
    RemoveUnprotectedGeneral,
    BattleEndCheck,
    SubRetreatAfter,
    OffensiveRetreat,
    StalemateCheck,
}

/// Every phase in sequence.
pub const ALL_PHASES: [PhaseOrder; 24] = [
    PhaseOrder::OffensiveAaFire,
    PhaseOrder::DefensiveAaFire,
    PhaseOrder::AaCasualtyRemoval,
    PhaseOrder::NavalBombardment,
    PhaseOrder::BombardCasualtyRemoval,
    PhaseOrder::RemoveNonCombatants,
    PhaseOrder::LandParatroopers,
    PhaseOrder::MarkNoMovement,
    PhaseOrder::OffensiveSubRetreatBefore,
    PhaseOrder::DefensiveSubRetreatBefore,
    PhaseOrder::RemoveUnprotectedPreBattle,
    PhaseOrder::SubmergeVsAirOnly,
    PhaseOrder::OffensiveFirstStrike,
    PhaseOrder::DefensiveFirstStrike,
    PhaseOrder::FirstStrikeCasualtyRemoval,
    PhaseOrder::RemoveSuicideUnits,
    PhaseOrder::OffensiveGeneralFire,
    PhaseOrder::DefensiveGeneralFire,
    PhaseOrder::GeneralCasualtyRemoval,
    PhaseOrder::RemoveUnprotectedGeneral,
    PhaseOrder::BattleEndCheck,
    PhaseOrder::SubRetreatAfter,
    PhaseOrder::OffensiveRetreat,
    PhaseOrder::StalemateCheck,
];

impl PhaseOrder {
    /// Returns the display name used in narration and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            PhaseOrder::OffensiveAaFire => "offensive AA fire",
            PhaseOrder::DefensiveAaFire => "defensive AA fire",
            PhaseOrder::AaCasualtyRemoval => "AA casualty removal",
            PhaseOrder::NavalBombardment => "naval bombardment",
            PhaseOrder::BombardCasualtyRemoval => "bombardment casualty removal",
            PhaseOrder::RemoveNonCombatants => "remove non-combatants",
            PhaseOrder::LandParatroopers => "land paratroopers",
            PhaseOrder::MarkNoMovement => "mark no movement",
            PhaseOrder::OffensiveSubRetreatBefore => "offensive submarine retreat",
            PhaseOrder::DefensiveSubRetreatBefore => "defensive submarine retreat",
            PhaseOrder::RemoveUnprotectedPreBattle => "remove unprotected units",
            PhaseOrder::SubmergeVsAirOnly => "submerge against air",
            PhaseOrder::OffensiveFirstStrike => "offensive first strike fire",
            PhaseOrder::DefensiveFirstStrike => "defensive first strike fire",
            PhaseOrder::FirstStrikeCasualtyRemoval => "first strike casualty removal",
            PhaseOrder::RemoveSuicideUnits => "remove suicide units",
            PhaseOrder::OffensiveGeneralFire => "offensive fire",
            PhaseOrder::DefensiveGeneralFire => "defensive fire",
            PhaseOrder::GeneralCasualtyRemoval => "general casualty removal",
            PhaseOrder::RemoveUnprotectedGeneral => "remove unprotected units (general)",
            PhaseOrder::BattleEndCheck => "battle end check",
            PhaseOrder::SubRetreatAfter => "post-battle submarine retreat",
            PhaseOrder::OffensiveRetreat => "offensive retreat",
            PhaseOrder::StalemateCheck => "stalemate check",
        }
    }
}
