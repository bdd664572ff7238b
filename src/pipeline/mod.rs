//! Phase pipeline: ordering, catalog, execution stack, runner, snapshots.

pub mod assemble;
pub mod order;
pub mod phases;
pub mod retreat;
pub mod runner;
pub mod snapshot;
pub mod stack;
pub mod step;

pub use assemble::{assemble, catalog, catalog_with_applicability, flatten};
pub use order::PhaseOrder;
pub use phases::{casualty_clear_sides, first_strike_state, FirstStrikeState, RetreatTiming};
pub use retreat::can_attacker_retreat;
pub use runner::{resolve_battles, BattleError, BattleRunner};
pub use snapshot::{BattleSnapshot, SnapshotError, SNAPSHOT_VERSION};
pub use stack::{ExecutionStack, StackEntry};
pub use step::{BattleStep, StepDetails};
