//! Attack definitions: the value type weapons and natural attacks share.

use crate::dice::DiceExpr;
use crate::model::types::{AttackKind, DamageType};
use serde::{Deserialize, Serialize};

/// A single named attack a combatant can make (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackDefinition {
    pub name: String,
    pub kind: AttackKind,
    pub dice: DiceExpr,
    pub damage_type: DamageType,
    pub range: i32,
    pub ammo_type: Option<String>,
    pub delay_multiplier: f64,
    pub max_str_bonus: Option<i32>,
}

impl AttackDefinition {
    pub fn new(name: impl Into<String>, kind: AttackKind, dice: DiceExpr, damage_type: DamageType) -> Self {
        let range = match kind {
            AttackKind::Melee => 1,
            AttackKind::Ranged => 6,
        };
        Self {
            name: name.into(),
            kind,
            dice,
            damage_type,
            range,
            ammo_type: None,
            delay_multiplier: 1.0,
            max_str_bonus: None,
        }
    }

    pub fn is_melee(&self) -> bool {
        matches!(self.kind, AttackKind::Melee)
    }

    /// STR bonus applied to raw damage, capped at `max_str_bonus` if set.
    /// Ranged attacks never get a STR bonus (spec §4.5 raw damage formula).
    pub fn capped_str_bonus(&self, strength: i32) -> i32 {
        if !self.is_melee() {
            return 0;
        }
        match self.max_str_bonus {
            Some(cap) => strength.min(cap),
            None => strength,
        }
    }
}
