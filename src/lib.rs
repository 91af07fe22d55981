//! Deterministic tactical combat core: turn scheduler, effect pipeline,
//! attack resolution, and seeded dice. Reusable outside the game loop by
//! an offline Monte Carlo balance harness — every public entry point that
//! consumes randomness takes an injected [`rng::CombatRng`] rather than
//! reaching for ambient state.

pub mod combat;
pub mod conditions;
pub mod dice;
pub mod effects;
pub mod error;
pub mod external;
pub mod model;
pub mod regeneration;
pub mod rng;
pub mod scheduler;

pub mod archetype;

pub use error::{Diagnostic, InvariantViolation, PreconditionFailure, ValidationError};
pub use rng::{CombatRng, LcgRng};
