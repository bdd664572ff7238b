//! The battle runner: drives one battle through its ordered phase list.
//!
//! Exactly one logical thread of control resolves a battle; phases are
//! strictly sequential. The runner owns the execution stack for the
//! battle's duration and suspends only at the boundary between two stack
//! pops, where a persisted snapshot is valid.

use thiserror::Error;

use crate::battle::{BattleState, Outcome};
use crate::bridge::{Bridge, BridgeError, LocalBridge};
use crate::pipeline::assemble::catalog;
use crate::pipeline::order::PhaseOrder;
use crate::pipeline::snapshot::{BattleSnapshot, SnapshotError};
use crate::pipeline::stack::ExecutionStack;
use crate::pipeline::step::{BattleStep, StepDetails};

/// Faults surfacing from battle execution.
///
/// Bridge faults are transient: the runner puts the current entry back
/// and the orchestrator may retry. Ordering faults are programmer errors
/// and propagate uncaught.
#[derive(Debug, Error)]
pub enum BattleError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error("phase `{phase}` executed out of order after `{previous}`")]
    OutOfOrder { phase: String, previous: String },
}

/// Drives one battle to completion, resumable across process boundaries.
pub struct BattleRunner {
    steps: Vec<BattleStep>,
    next: usize,
    stack: ExecutionStack,
    last_order: Option<PhaseOrder>,
    announced: bool,
}

impl BattleRunner {
    /// Builds the runner for a fresh battle, computing all applicability
    /// from the current snapshot of `state`.
    pub fn new(state: &BattleState) -> Self {
        let mut steps = catalog(state);
        steps.sort_by_key(|s| s.order());
        BattleRunner {
            steps,
            next: 0,
            stack: ExecutionStack::new(),
            last_order: None,
            announced: false,
        }
    }

    /// Rebuilds a runner from a persisted snapshot, carrying forward the
    /// full catalog with the applicability decided at battle start.
    pub fn from_snapshot(
        state: &BattleState,
        snapshot: &BattleSnapshot,
    ) -> Result<Self, SnapshotError> {
        let mut steps = snapshot.catalog(state);
        steps.sort_by_key(|s| s.order());
        if snapshot.next_step > steps.len() {
            return Err(SnapshotError::Corrupt(format!(
                "next step {} beyond catalog of {}",
                snapshot.next_step,
                steps.len()
            )));
        }
        let last_order = snapshot
            .next_step
            .checked_sub(1)
            .map(|i| steps[i].order());
        Ok(BattleRunner {
            steps,
            next: snapshot.next_step,
            stack: ExecutionStack::from_entries(snapshot.stack.clone()),
            last_order,
            announced: true,
        })
    }

    /// The flattened phase list shown to players before the battle.
    pub fn planned_steps(&self) -> Vec<StepDetails> {
        self.steps.iter().flat_map(|s| s.step_details()).collect()
    }

    /// Captures the resume state. Only valid at the tick boundary the
    /// runner naturally stops at; never call mid-entry.
    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot::new(self.next, self.stack.entries().to_vec(), self.steps.clone())
    }

    /// True once every phase has executed and the stack is drained.
    pub fn is_complete(&self) -> bool {
        self.next >= self.steps.len() && self.stack.is_empty()
    }

    /// Executes one unit of work: either pops and runs one stack entry,
    /// or executes the next phase (pushing its sub-operations).
    ///
    /// Returns `Ok(false)` when the battle is complete. On a bridge fault
    /// the current entry is pushed back so the caller can retry from the
    /// last stable boundary.
    pub fn tick(
        &mut self,
        state: &mut BattleState,
        bridge: &mut dyn Bridge,
    ) -> Result<bool, BattleError> {
        if !self.announced {
            let names: Vec<String> = self
                .planned_steps()
                .into_iter()
                .map(|d| d.name)
                .collect();
            bridge.list_steps(&names)?;
            self.announced = true;
        }

        if let Some(entry) = self.stack.pop() {
            if let Err(err) = entry.run(state, bridge) {
                self.stack.push(entry);
                return Err(err.into());
            }
            return Ok(true);
        }

        if self.next >= self.steps.len() {
            return Ok(false);
        }

        let order = self.steps[self.next].order();
        if let Some(previous) = self.last_order {
            if order < previous {
                return Err(BattleError::OutOfOrder {
                    phase: order.name().to_string(),
                    previous: previous.name().to_string(),
                });
            }
        }
        // A failed execute has pushed nothing; `next` stays put so the
        // retry re-invokes the phase from the beginning.
        self.steps[self.next].execute(&mut self.stack, bridge)?;
        self.last_order = Some(order);
        self.next += 1;
        Ok(true)
    }

    /// Runs the battle to completion.
    pub fn run(
        &mut self,
        state: &mut BattleState,
        bridge: &mut dyn Bridge,
    ) -> Result<Option<Outcome>, BattleError> {
        while self.tick(state, bridge)? {}
        Ok(state.outcome())
    }
}

/// Resolves independent battles, each against its own seeded bridge so
/// the per-battle dice stream is reproducible regardless of scheduling.
/// Outcomes come back in input order.
pub fn resolve_battles(
    battles: &mut [BattleState],
    base_seed: u64,
    parallel: bool,
) -> Result<Vec<Option<Outcome>>, BattleError> {
    fn resolve_one(index: usize, state: &mut BattleState, base_seed: u64) -> Result<Option<Outcome>, BattleError> {
        let mut bridge = LocalBridge::seeded(base_seed.wrapping_add(index as u64));
        let mut runner = BattleRunner::new(state);
        runner.run(state, &mut bridge)
    }

    if parallel {
        use rayon::prelude::*;
        battles
            .par_iter_mut()
            .enumerate()
            .map(|(i, s)| resolve_one(i, s, base_seed))
            .collect()
    } else {
        battles
            .iter_mut()
            .enumerate()
            .map(|(i, s)| resolve_one(i, s, base_seed))
            .collect()
    }
}
