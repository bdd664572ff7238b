//! The bridge: sole gateway to non-deterministic and outward-facing
//! primitives.
//!
//! Dice, change application, history logging, and step narration all flow
//! through this trait so that replays and distributed sessions consume the
//! same stream in the same order. Every method is called at most once per
//! logical sub-operation.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::battle::{Outcome, Side, TerritoryId, Volley};

/// A transient execution fault raised by a bridge implementation, e.g. a
/// dropped network connection. Recoverable by retrying the current stack
/// entry; never swallowed by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("bridge failure: {0}")]
pub struct BridgeError(pub String);

/// A description of one applied effect, written to the change stream for
/// replay and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Change {
    DiceRolled {
        volley: Volley,
        firing: Side,
        rolls: Vec<u8>,
        hits: u32,
    },
    CasualtiesMarked {
        volley: Volley,
        target: Side,
        count: u32,
    },
    CasualtiesRemoved {
        sides: Vec<Side>,
        count: u32,
    },
    NonCombatantsWithdrawn {
        count: u32,
    },
    ParatroopersLanded {
        count: u32,
    },
    MovementSpent {
        count: u32,
    },
    Withdrawn {
        side: Side,
        count: u32,
    },
    Submerged {
        side: Side,
        count: u32,
    },
    UnprotectedRemoved {
        side: Side,
        count: u32,
    },
    SuicideUnitsRemoved {
        count: u32,
    },
    Retreated {
        side: Side,
        to: TerritoryId,
        count: u32,
    },
    BattleEnded {
        outcome: Outcome,
    },
}

/// Gateway for randomness, change application, logging, and narration.
pub trait Bridge {
    /// Rolls `count` dice with faces `0..sides`.
    fn roll_dice(&mut self, count: u32, sides: u8) -> Result<Vec<u8>, BridgeError>;

    /// Records an applied effect in the change stream.
    fn apply_change(&mut self, change: &Change) -> Result<(), BridgeError>;

    /// Appends a line to the battle history log.
    fn history_write(&mut self, text: &str) -> Result<(), BridgeError>;

    /// Announces the full planned step list to observers at battle start.
    fn list_steps(&mut self, names: &[String]) -> Result<(), BridgeError>;

    /// Announces that a phase is beginning.
    fn goto_step(&mut self, name: &str) -> Result<(), BridgeError>;
}

/// In-process bridge with seeded dice and in-memory logs.
///
/// The driver binary and tests use this; a networked session would supply
/// its own implementation over the same trait.
pub struct LocalBridge {
    rng: SmallRng,
    pub history: Vec<String>,
    pub changes: Vec<Change>,
    pub narration: Vec<String>,
}

impl LocalBridge {
    /// Creates a bridge whose dice stream is fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        LocalBridge {
            rng: SmallRng::seed_from_u64(seed),
            history: Vec::new(),
            changes: Vec::new(),
            narration: Vec::new(),
        }
    }
}

impl Bridge for LocalBridge {
    fn roll_dice(&mut self, count: u32, sides: u8) -> Result<Vec<u8>, BridgeError> {
        let mut rolls = Vec::with_capacity(count as usize);
        for _ in 0..count {
            rolls.push(self.rng.gen_range(0..sides));
        }
        Ok(rolls)
    }

    fn apply_change(&mut self, change: &Change) -> Result<(), BridgeError> {
        self.changes.push(change.clone());
        Ok(())
    }

    fn history_write(&mut self, text: &str) -> Result<(), BridgeError> {
        self.history.push(text.to_string());
        Ok(())
    }

    fn list_steps(&mut self, names: &[String]) -> Result<(), BridgeError> {
        self.narration.push(format!("steps: {}", names.join(" | ")));
        Ok(())
    }

    fn goto_step(&mut self, name: &str) -> Result<(), BridgeError> {
        self.narration.push(format!("step: {name}"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_dice() {
        let mut a = LocalBridge::seeded(42);
        let mut b = LocalBridge::seeded(42);
        assert_eq!(a.roll_dice(10, 6).unwrap(), b.roll_dice(10, 6).unwrap());
    }

    #[test]
    fn dice_stay_in_range() {
        let mut bridge = LocalBridge::seeded(7);
        for roll in bridge.roll_dice(100, 6).unwrap() {
            assert!(roll < 6);
        }
    }

    #[test]
    fn history_and_narration_accumulate() {
        let mut bridge = LocalBridge::seeded(0);
        bridge.history_write("offense fire").unwrap();
        bridge.goto_step("offense fire (general combat)").unwrap();
        assert_eq!(bridge.history.len(), 1);
        assert_eq!(bridge.narration.len(), 1);
    }
}
