pub mod attack;
pub mod combatant;
pub mod condition;
pub mod creature_def;
pub mod stats;
pub mod types;

pub use attack::AttackDefinition;
pub use combatant::{build_combatant, Combatant};
pub use condition::{Condition, ConditionTypeId, DotPayload, ItemProperty};
pub use creature_def::{CreatureDefinition, EquipmentItem, SkillDescriptor};
pub use types::{AttackKind, DamageModifier, DamageType, EntityId, Faction, GridPos};
