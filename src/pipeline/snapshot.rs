//! Persisted battle resume state.
//!
//! A battle may span multiple network turns with interruptions between
//! steps; the snapshot captures the remaining execution-stack entries plus
//! the full step catalog carrying the applicability decided at battle
//! start, versioned so old saves keep their original behavior instead of
//! being silently re-derived against the mutated mid-battle state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::battle::{BattleState, Side, UnitFilter};
use crate::pipeline::assemble::catalog_with_applicability;
use crate::pipeline::phases::FirstStrikeState;
use crate::pipeline::stack::StackEntry;
use crate::pipeline::step::BattleStep;

/// Current snapshot schema version. Version 1 predates the persisted step
/// catalog.
pub const SNAPSHOT_VERSION: u32 = 2;

/// Everything needed to rebuild and continue an interrupted battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub version: u32,
    /// Index of the next catalog step to execute.
    pub next_step: usize,
    /// Remaining stack entries, bottom first.
    pub stack: Vec<StackEntry>,
    /// The sorted step catalog with every step's applicability as decided
    /// at battle start. Absent in version-1 snapshots; see
    /// [`BattleSnapshot::catalog`].
    #[serde(default)]
    pub steps: Option<Vec<BattleStep>>,
}

/// Why a persisted battle cannot be resumed. Fatal for that battle; the
/// session layer reports it rather than guessing.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("corrupt snapshot: {0}")]
    Corrupt(String),
}

impl BattleSnapshot {
    pub fn new(next_step: usize, stack: Vec<StackEntry>, steps: Vec<BattleStep>) -> Self {
        BattleSnapshot {
            version: SNAPSHOT_VERSION,
            next_step,
            stack,
            steps: Some(steps),
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: BattleSnapshot = serde_json::from_str(json)?;
        if snapshot.version == 0 || snapshot.version > SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }
        Ok(snapshot)
    }

    /// The step catalog to resume with.
    ///
    /// Version-2 snapshots carry the catalog verbatim, applicability
    /// included, so resumption never re-derives it from the mutated
    /// mid-battle state. Version-1 snapshots predate the persisted
    /// catalog and were written when the classic simultaneous rule was
    /// the only behavior: a side with alive first-strike units defaults
    /// to `SneakAttack`, a side without them to `NotApplicable`, and the
    /// remaining steps are rebuilt from the state as saved.
    pub fn catalog(&self, state: &BattleState) -> Vec<BattleStep> {
        if let Some(steps) = &self.steps {
            return steps.clone();
        }
        let legacy = |side: Side| {
            if state.has_unit(UnitFilter::Alive, side, |p| p.first_strike) {
                FirstStrikeState::SneakAttack
            } else {
                FirstStrikeState::NotApplicable
            }
        };
        catalog_with_applicability(state, legacy(Side::Offense), legacy(Side::Defense))
    }
}
