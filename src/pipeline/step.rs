//! The step contract and the closed phase family.
//!
//! Every phase the pipeline can run is one variant of [`BattleStep`], so
//! the assembler and the tests can match exhaustively. A step's
//! applicability is baked in at construction from the battle snapshot that
//! existed when the phase list was built and is never recomputed: the
//! ordering shown to players before execution must match what actually
//! executes.

use serde::{Deserialize, Serialize};

use crate::battle::{Side, Volley, BOTH_SIDES};
use crate::bridge::{Bridge, BridgeError};
use crate::pipeline::order::PhaseOrder;
use crate::pipeline::phases::{casualty_clear_sides, FirstStrikeState, RetreatTiming};
use crate::pipeline::stack::{ExecutionStack, StackEntry};

/// One displayable, executable unit of the battle: a phase name and the
/// position it runs at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDetails {
    pub name: String,
    pub order: PhaseOrder,
}

/// The fixed catalog of phase kinds, with per-battle applicability.
///
/// Serializable so a persisted battle resumes with the applicability
/// decided at battle start instead of re-deriving it from the mutated
/// mid-battle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleStep {
    AaFire { side: Side, applies: bool },
    AaCasualtyRemoval { applies: bool },
    NavalBombardment { applies: bool },
    BombardCasualtyRemoval { applies: bool },
    RemoveNonCombatants { applies: bool },
    LandParatroopers { applies: bool },
    MarkNoMovement,
    PreBattleSubRetreat { side: Side, applies: bool },
    RemoveUnprotectedPreBattle { applies: bool },
    SubmergeVsAirOnly { applies: bool },
    FirstStrikeFire { side: Side, state: FirstStrikeState },
    FirstStrikeCasualtyRemoval {
        classic: bool,
        offense: FirstStrikeState,
        defense: FirstStrikeState,
    },
    RemoveSuicideUnits { applies: bool },
    GeneralFire { side: Side, applies: bool },
    GeneralCasualtyRemoval { applies: bool },
    RemoveUnprotectedGeneral { applies: bool },
    BattleEndCheck,
    PostBattleSubRetreat { offense: bool, defense: bool },
    OffensiveRetreat { applies: bool },
    StalemateCheck,
}

impl BattleStep {
    /// This step's fixed position in the phase ordering.
    pub fn order(&self) -> PhaseOrder {
        match self {
            BattleStep::AaFire { side: Side::Offense, .. } => PhaseOrder::OffensiveAaFire,
            BattleStep::AaFire { side: Side::Defense, .. } => PhaseOrder::DefensiveAaFire,
            BattleStep::AaCasualtyRemoval { .. } => PhaseOrder::AaCasualtyRemoval,
            BattleStep::NavalBombardment { .. } => PhaseOrder::NavalBombardment,
            BattleStep::BombardCasualtyRemoval { .. } => PhaseOrder::BombardCasualtyRemoval,
            BattleStep::RemoveNonCombatants { .. } => PhaseOrder::RemoveNonCombatants,
            BattleStep::LandParatroopers { .. } => PhaseOrder::LandParatroopers,
            BattleStep::MarkNoMovement => PhaseOrder::MarkNoMovement,
            BattleStep::PreBattleSubRetreat { side: Side::Offense, .. } => {
                PhaseOrder::OffensiveSubRetreatBefore
            }
            BattleStep::PreBattleSubRetreat { side: Side::Defense, .. } => {
                PhaseOrder::DefensiveSubRetreatBefore
            }
            BattleStep::RemoveUnprotectedPreBattle { .. } => PhaseOrder::RemoveUnprotectedPreBattle,
            BattleStep::SubmergeVsAirOnly { .. } => PhaseOrder::SubmergeVsAirOnly,
            BattleStep::FirstStrikeFire { side: Side::Offense, .. } => {
                PhaseOrder::OffensiveFirstStrike
            }
            BattleStep::FirstStrikeFire { side: Side::Defense, .. } => {
                PhaseOrder::DefensiveFirstStrike
            }
            BattleStep::FirstStrikeCasualtyRemoval { .. } => PhaseOrder::FirstStrikeCasualtyRemoval,
            BattleStep::RemoveSuicideUnits { .. } => PhaseOrder::RemoveSuicideUnits,
            BattleStep::GeneralFire { side: Side::Offense, .. } => PhaseOrder::OffensiveGeneralFire,
            BattleStep::GeneralFire { side: Side::Defense, .. } => PhaseOrder::DefensiveGeneralFire,
            BattleStep::GeneralCasualtyRemoval { .. } => PhaseOrder::GeneralCasualtyRemoval,
            BattleStep::RemoveUnprotectedGeneral { .. } => PhaseOrder::RemoveUnprotectedGeneral,
            BattleStep::BattleEndCheck => PhaseOrder::BattleEndCheck,
            BattleStep::PostBattleSubRetreat { .. } => PhaseOrder::SubRetreatAfter,
            BattleStep::OffensiveRetreat { .. } => PhaseOrder::OffensiveRetreat,
            BattleStep::StalemateCheck => PhaseOrder::StalemateCheck,
        }
    }

    /// Whether this step will produce any observable work.
    pub fn applies(&self) -> bool {
        match self {
            BattleStep::AaFire { applies, .. }
            | BattleStep::AaCasualtyRemoval { applies }
            | BattleStep::NavalBombardment { applies }
            | BattleStep::BombardCasualtyRemoval { applies }
            | BattleStep::RemoveNonCombatants { applies }
            | BattleStep::LandParatroopers { applies }
            | BattleStep::PreBattleSubRetreat { applies, .. }
            | BattleStep::RemoveUnprotectedPreBattle { applies }
            | BattleStep::SubmergeVsAirOnly { applies }
            | BattleStep::RemoveSuicideUnits { applies }
            | BattleStep::GeneralFire { applies, .. }
            | BattleStep::GeneralCasualtyRemoval { applies }
            | BattleStep::RemoveUnprotectedGeneral { applies }
            | BattleStep::OffensiveRetreat { applies } => *applies,
            BattleStep::FirstStrikeFire { state, .. } => {
                *state != FirstStrikeState::NotApplicable
            }
            BattleStep::FirstStrikeCasualtyRemoval { offense, defense, .. } => {
                *offense != FirstStrikeState::NotApplicable
                    || *defense != FirstStrikeState::NotApplicable
            }
            BattleStep::PostBattleSubRetreat { offense, defense } => *offense || *defense,
            BattleStep::MarkNoMovement
            | BattleStep::BattleEndCheck
            | BattleStep::StalemateCheck => true,
        }
    }

    /// The displayable sub-steps this phase contributes.
    ///
    /// Pure function of the baked-in applicability: an inapplicable step
    /// contributes nothing but keeps its conceptual slot in the ordering.
    pub fn step_details(&self) -> Vec<StepDetails> {
        if !self.applies() {
            return Vec::new();
        }
        let order = self.order();
        match self {
            BattleStep::AaFire { side, .. } => fire_details(Volley::AntiAir, *side, order),
            BattleStep::NavalBombardment { .. } => {
                fire_details(Volley::Bombard, Side::Offense, order)
            }
            BattleStep::FirstStrikeFire { side, .. } => {
                fire_details(Volley::FirstStrike, *side, order)
            }
            BattleStep::GeneralFire { side, .. } => fire_details(Volley::General, *side, order),
            _ => vec![StepDetails {
                name: order.name().to_string(),
                order,
            }],
        }
    }

    /// Pushes this phase's sub-operations, narrating the phase start.
    ///
    /// Safe to re-invoke after an error: the narration call precedes the
    /// first push, so a failure leaves the stack untouched.
    pub fn execute(
        &self,
        stack: &mut ExecutionStack,
        bridge: &mut dyn Bridge,
    ) -> Result<(), BridgeError> {
        if !self.applies() {
            return Ok(());
        }
        bridge.goto_step(self.order().name())?;
        match self {
            BattleStep::AaFire { side, .. } => stack.push_group(fire_group(Volley::AntiAir, *side)),
            BattleStep::AaCasualtyRemoval { .. } => stack.push(StackEntry::RemoveCasualties {
                sides: BOTH_SIDES.to_vec(),
            }),
            BattleStep::NavalBombardment { .. } => {
                stack.push_group(fire_group(Volley::Bombard, Side::Offense))
            }
            BattleStep::BombardCasualtyRemoval { .. } => {
                stack.push(StackEntry::RemoveCasualties {
                    sides: vec![Side::Defense],
                })
            }
            BattleStep::RemoveNonCombatants { .. } => stack.push(StackEntry::RemoveNonCombatants),
            BattleStep::LandParatroopers { .. } => stack.push(StackEntry::LandParatroopers),
            BattleStep::MarkNoMovement => stack.push(StackEntry::MarkNoMovement),
            BattleStep::PreBattleSubRetreat { side, .. } => stack.push(StackEntry::SubRetreat {
                side: *side,
                timing: RetreatTiming::BeforeBattle,
            }),
            BattleStep::RemoveUnprotectedPreBattle { .. }
            | BattleStep::RemoveUnprotectedGeneral { .. } => {
                stack.push(StackEntry::RemoveUnprotected)
            }
            BattleStep::SubmergeVsAirOnly { .. } => stack.push(StackEntry::SubmergeVsAirOnly),
            BattleStep::FirstStrikeFire { side, .. } => {
                stack.push_group(fire_group(Volley::FirstStrike, *side))
            }
            BattleStep::FirstStrikeCasualtyRemoval {
                classic,
                offense,
                defense,
            } => stack.push(StackEntry::RemoveCasualties {
                sides: casualty_clear_sides(*classic, *offense, *defense),
            }),
            BattleStep::RemoveSuicideUnits { .. } => stack.push(StackEntry::RemoveSuicideUnits),
            BattleStep::GeneralFire { side, .. } => {
                stack.push_group(fire_group(Volley::General, *side))
            }
            BattleStep::GeneralCasualtyRemoval { .. } => {
                stack.push(StackEntry::RemoveCasualties {
                    sides: BOTH_SIDES.to_vec(),
                })
            }
            BattleStep::BattleEndCheck => stack.push(StackEntry::BattleEndCheck),
            BattleStep::PostBattleSubRetreat { offense, defense } => {
                let mut group = Vec::new();
                if *offense {
                    group.push(StackEntry::SubRetreat {
                        side: Side::Offense,
                        timing: RetreatTiming::AfterBattle,
                    });
                }
                if *defense {
                    group.push(StackEntry::SubRetreat {
                        side: Side::Defense,
                        timing: RetreatTiming::AfterBattle,
                    });
                }
                stack.push_group(group);
            }
            BattleStep::OffensiveRetreat { .. } => stack.push(StackEntry::OffensiveRetreat),
            BattleStep::StalemateCheck => stack.push(StackEntry::StalemateCheck),
        }
        Ok(())
    }
}

fn fire_details(volley: Volley, firing: Side, order: PhaseOrder) -> Vec<StepDetails> {
    let target = firing.opposite();
    vec![
        StepDetails {
            name: format!("{} {} fire", firing.name(), volley.name()),
            order,
        },
        StepDetails {
            name: format!("{} select {} casualties", target.name(), volley.name()),
            order,
        },
        StepDetails {
            name: format!("{} notify {} casualties", target.name(), volley.name()),
            order,
        },
    ]
}

fn fire_group(volley: Volley, firing: Side) -> Vec<StackEntry> {
    let target = firing.opposite();
    vec![
        StackEntry::RollDice { volley, firing },
        StackEntry::SelectCasualties { volley, target },
        StackEntry::NotifyCasualties { volley, target },
    ]
}
