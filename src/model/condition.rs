//! Time-bounded status effects on combatants (`Condition`) and items
//! (`ItemProperty`/`Brand`). Both are keyed by a stable `typeId` string
//! rather than a Rust type, since they're instantiated from declarative
//! definitions at runtime (spec §9: "static registry of constructors
//! keyed by the step's declarative `type` string").

use crate::model::types::DamageType;
use crate::model::EntityId;
use serde::{Deserialize, Serialize};

pub type ConditionTypeId = String;

/// Per-turn damage-over-time payload carried by some conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotPayload {
    pub dice: crate::dice::DiceExpr,
    pub damage_type: DamageType,
    pub armor_piercing: bool,
}

/// A time-bounded behavioural modifier applied to a combatant (spec §3,
/// §4.7). Application replaces any existing condition with the same
/// `type_id` rather than stacking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub type_id: ConditionTypeId,
    pub display_name: String,
    pub remaining_duration: i32,
    pub dot: Option<DotPayload>,
    /// For kill attribution; looked up against the `EntityManager`, not
    /// held as a shared owning reference (spec §9).
    pub source: Option<EntityId>,
}

impl Condition {
    pub fn new(type_id: impl Into<String>, display_name: impl Into<String>, duration: i32) -> Self {
        Self {
            type_id: type_id.into(),
            display_name: display_name.into(),
            remaining_duration: duration,
            dot: None,
            source: None,
        }
    }

    /// Decrements duration by one turn. Returns `true` if this tick
    /// expired the condition (caller is responsible for removal and
    /// firing `onExpired`).
    pub fn tick(&mut self) -> bool {
        self.remaining_duration -= 1;
        self.remaining_duration <= 0
    }
}

/// Analogous to `Condition` but attached to an item rather than a
/// combatant; consulted by attack steps to modify damage or add
/// on-hit effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemProperty {
    pub type_id: ConditionTypeId,
    pub display_name: String,
    pub remaining_duration: i32,
    pub bonus_damage_dice: Option<crate::dice::DiceExpr>,
    pub on_hit_condition: Option<ConditionTypeId>,
}

impl ItemProperty {
    pub fn tick(&mut self) -> bool {
        self.remaining_duration -= 1;
        self.remaining_duration <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_expires_at_zero() {
        let mut c = Condition::new("burning", "Burning", 2);
        assert!(!c.tick());
        assert!(c.tick());
        assert_eq!(c.remaining_duration, 0);
    }
}
