//! Cannonade battle-resolution library.
//!
//! Exposes the battle state model, the phase pipeline, the bridge seam to
//! the outside world, and scenario loading for use by integration tests
//! and the binary entry point.

pub mod battle;
pub mod bridge;
pub mod pipeline;
pub mod scenario;
