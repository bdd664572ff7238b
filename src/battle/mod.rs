//! Battle data model: sides, units, ruleset flags, and the battle state
//! with its read-only query surface and mutation trait.

pub mod actions;
pub mod ruleset;
pub mod side;
pub mod state;
pub mod unit;

pub use actions::BattleActions;
pub use ruleset::Ruleset;
pub use side::{Side, UnitFilter, BOTH_SIDES};
pub use state::{BattleState, Outcome};
pub use unit::{TerritoryId, Unit, UnitId, UnitProfile, UnitStatus, Volley};
