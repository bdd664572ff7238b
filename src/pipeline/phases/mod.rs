//! The concrete phase family: fire machinery, first-strike rules,
//! housekeeping, submarine behavior, and end-of-battle checks.

pub mod endgame;
pub mod first_strike;
pub mod prep;
pub mod submarine;
pub mod volley;

pub use first_strike::{casualty_clear_sides, first_strike_state, FirstStrikeState};
pub use submarine::RetreatTiming;
