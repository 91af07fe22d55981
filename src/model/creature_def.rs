//! External data shapes consumed when building a `Combatant` (spec §6):
//! `CreatureDefinition` plus the equipment items folded into it during
//! construction. These are deserialized from inline JSON/YAML by the
//! host (CLI, scenario files); the combat core only reads them.

use crate::model::attack::AttackDefinition;
use crate::model::types::DamageType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named skill a combatant has available. The combat core treats the
/// skill's effect pipeline as opaque configuration data; only `name` is
/// used for pipeline-origin labeling in `EffectContext`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDescriptor {
    pub name: String,
}

/// A piece of equipment folded into a combatant at construction time
/// (spec §4.2, step 2).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub name: String,
    #[serde(default)]
    pub armor: i32,
    #[serde(default)]
    pub evasion: i32,
    #[serde(default)]
    pub speed: i32,
    #[serde(default)]
    pub regen_bonus: i32,
    #[serde(default)]
    pub attacks: Vec<AttackDefinition>,
    #[serde(default)]
    pub ammo: Vec<(String, u32)>,
    #[serde(default)]
    pub resistances: HashSet<DamageType>,
    #[serde(default)]
    pub vulnerabilities: HashSet<DamageType>,
    #[serde(default)]
    pub immunities: HashSet<DamageType>,
}

/// The host-supplied shape a combatant is built from: base stats plus
/// the unequipped attacks/resistances a creature has naturally (spec
/// §6's `CreatureDefinition`). `threat` is carried through unread by
/// the combat core; it's an encounter-composition concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureDefinition {
    pub id: String,
    pub name: String,
    pub strength: i32,
    pub agility: i32,
    pub endurance: i32,
    pub will: i32,
    pub speed: i32,
    pub base_health: i32,
    pub base_willpower: i32,
    #[serde(default)]
    pub equipment: Vec<EquipmentItem>,
    #[serde(default)]
    pub natural_attacks: Vec<AttackDefinition>,
    #[serde(default)]
    pub skills: Vec<SkillDescriptor>,
    #[serde(default)]
    pub resistances: HashSet<DamageType>,
    #[serde(default)]
    pub vulnerabilities: HashSet<DamageType>,
    #[serde(default)]
    pub immunities: HashSet<DamageType>,
    #[serde(default)]
    pub threat: i32,
}
