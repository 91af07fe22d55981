//! Error taxonomy: validation failures, precondition failures, logged
//! diagnostics, and invariant violations, each its own type rather than
//! one exhaustively-typed error per call site.

use thiserror::Error;

/// Malformed input data: bad dice strings, unknown ids, unknown damage
/// types, missing required fields on an inline creature. Surfaced to the
/// caller; aborts the current action without mutating combat state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("malformed dice expression: {0:?}")]
    MalformedDice(String),
    #[error("unknown damage type: {0:?}")]
    UnknownDamageType(String),
    #[error("unknown creature id: {0:?}")]
    UnknownCreatureId(String),
    #[error("unknown item id: {0:?}")]
    UnknownItemId(String),
    #[error("missing required field: {0:?}")]
    MissingField(String),
    #[error("unknown step type: {0:?}")]
    UnknownStepType(String),
    #[error("health must be > 0, got {0}")]
    NonPositiveHealth(i64),
    #[error("speed must be > 0, got {0}")]
    NonPositiveSpeed(i64),
}

/// A step or action cannot be attempted at all given current state:
/// empty inventory slot, already-equipped item, no charges, no melee
/// weapon available. Leaves state unchanged; the caller gets a "failed"
/// result and a user-facing message.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PreconditionFailure {
    #[error("inventory slot is empty")]
    EmptySlot,
    #[error("item is already equipped")]
    AlreadyEquipped,
    #[error("no charges remaining")]
    NoCharges,
    #[error("no melee weapon available")]
    NoMeleeWeapon,
    #[error("no ammo of type {0:?} remaining")]
    NoAmmo(String),
}

/// A step could not apply given the entities it was handed — missing
/// health pool, missing position for an AoE, target out of range. Logged
/// to the [`crate::effects::MessageCollector`]; the pipeline continues.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic(pub String);

impl Diagnostic {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A programmer error: negative clamped health, an out-of-bounds position
/// write, an unknown step variant reaching the driver. These should halt
/// the simulation rather than be silently absorbed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("current_health {current} exceeds max_health {max} for combatant {id:?}")]
    HealthAboveMax { id: String, current: u32, max: u32 },
    #[error("position {0:?} is out of bounds")]
    OutOfBounds(String),
    #[error("speed {0} is below the minimum of 1")]
    SpeedBelowMinimum(i32),
}
