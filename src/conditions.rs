//! Condition registry ticking (spec §4.7): driven by the scheduler at
//! each turn boundary of the affected combatant. DoT payloads deal
//! damage through the same damage-modifier path attack steps use, so a
//! poisoned creature with fire resistance takes resisted fire-DoT damage
//! exactly like a fire bolt would.

use crate::combat::damage::apply_typed_damage;
use crate::model::combatant::Combatant;

/// One tick's worth of outcome for a single condition, so the caller can
/// narrate expirations and DoT damage without re-deriving them.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionTickEvent {
    pub type_id: String,
    pub dot_damage: i32,
    pub expired: bool,
}

/// Ticks every active condition on `bearer` by one turn: applies any
/// DoT payload's damage (subtracting armor first unless the payload is
/// `armor_piercing`, same as a direct attack would), decrements
/// remaining duration, and removes any condition that expires this
/// tick. Iterates `type_id`s in sorted order for deterministic RNG
/// consumption and event ordering.
pub fn tick_conditions(bearer: &mut Combatant) -> Vec<ConditionTickEvent> {
    let mut type_ids: Vec<String> = bearer.conditions.keys().cloned().collect();
    type_ids.sort();

    let mut events = Vec::with_capacity(type_ids.len());

    for type_id in type_ids {
        let dot = bearer.conditions.get(&type_id).and_then(|c| c.dot.clone());
        let dot_damage = match dot {
            Some(dot) => {
                let raw = dot.dice.average() as i32;
                let raw = if dot.armor_piercing { raw } else { (raw - bearer.armor).max(0) };
                apply_typed_damage(bearer, raw, dot.damage_type)
            }
            None => 0,
        };

        let expired = match bearer.conditions.get_mut(&type_id) {
            Some(condition) => condition.tick(),
            None => false,
        };

        if expired {
            bearer.conditions.remove(&type_id);
        }

        events.push(ConditionTickEvent {
            type_id,
            dot_damage,
            expired,
        });
    }

    events
}
