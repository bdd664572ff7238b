//! Battle sides and unit query filters.
//!
//! A battle always has exactly two sides, fixed at battle start. Filters
//! are pure query parameters for the battle state's unit roster.

use serde::{Deserialize, Serialize};

/// The role a force plays in a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Offense,
    Defense,
}

/// Both sides in canonical order.
pub const BOTH_SIDES: [Side; 2] = [Side::Offense, Side::Defense];

impl Side {
    /// Returns the opposing side.
    pub const fn opposite(self) -> Side {
        match self {
            Side::Offense => Side::Defense,
            Side::Defense => Side::Offense,
        }
    }

    /// Returns the lowercase display name used in step names and history.
    pub const fn name(self) -> &'static str {
        match self {
            Side::Offense => "offense",
            Side::Defense => "defense",
        }
    }
}

/// Liveness filter for unit roster queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitFilter {
    /// Units still standing and able to be targeted.
    Alive,
    /// Units selected as casualties but not yet cleared from the board.
    WaitingToDie,
    /// Units that can still fire: alive plus uncleared casualties.
    AliveOrWaitingToDie,
}
