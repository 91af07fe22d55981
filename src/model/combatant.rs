//! The `Combatant` struct and its construction from a `CreatureDefinition`
//! plus equipment (spec §3, §4.2).

use crate::error::ValidationError;
use crate::model::attack::AttackDefinition;
use crate::model::condition::{Condition, ConditionTypeId, ItemProperty};
use crate::model::creature_def::{CreatureDefinition, SkillDescriptor};
use crate::model::stats::health_bonus;
use crate::model::types::{DamageModifier, DamageType, EntityId, Faction, GridPos};
use std::collections::{HashMap, HashSet};

/// A participant in combat: identity, stats, pools, scheduler bookkeeping,
/// inventory-derived attacks, and active conditions (spec §3).
#[derive(Debug, Clone)]
pub struct Combatant {
    pub id: EntityId,
    pub name: String,
    pub faction: Faction,
    pub position: GridPos,

    pub strength: i32,
    pub agility: i32,
    pub endurance: i32,
    pub will: i32,

    pub armor: i32,
    pub evasion: i32,
    pub speed: i32,
    pub regen_bonus: i32,

    pub max_health: i32,
    pub current_health: i32,
    pub max_willpower: i32,
    pub current_willpower: i32,

    pub accumulated_time: i32,
    pub regen_points: i32,
    pub wp_regen_points: i32,

    pub attacks: Vec<AttackDefinition>,
    pub ammo: HashMap<String, u32>,
    pub skills: Vec<SkillDescriptor>,

    pub immunities: HashSet<DamageType>,
    pub resistances: HashSet<DamageType>,
    pub vulnerabilities: HashSet<DamageType>,

    pub conditions: HashMap<ConditionTypeId, Condition>,

    /// Time-bounded properties attached to an equipment slot by
    /// `ApplyBrand`/`ApplyProperty` (spec §3, §4.6).
    pub item_properties: HashMap<String, ItemProperty>,

    /// Opaque to the combat core beyond reset-on-respawn (spec §3).
    pub flee_turns_remaining: i32,
    pub flee_target_distance: i32,
}

impl Combatant {
    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Damage-modifier lookup with fixed precedence: immune > vulnerable
    /// > resistant > none (spec §3, §4.5).
    pub fn damage_modifier(&self, damage_type: DamageType) -> DamageModifier {
        if self.immunities.contains(&damage_type) {
            DamageModifier::Immune
        } else if self.vulnerabilities.contains(&damage_type) {
            DamageModifier::Vulnerable
        } else if self.resistances.contains(&damage_type) {
            DamageModifier::Resistant
        } else {
            DamageModifier::None
        }
    }

    /// `defenseModifier(c) = c.agility + c.evasion` (spec §4.5).
    pub fn defense_modifier(&self) -> i32 {
        self.agility + self.evasion
    }

    /// `attackModifier(c, isMelee) = isMelee ? strength : agility` (spec §4.5).
    pub fn attack_modifier(&self, is_melee: bool) -> i32 {
        if is_melee {
            self.strength
        } else {
            self.agility
        }
    }

    /// Reduces `current_health`, floored at 0. Returns the amount actually
    /// dealt (no overkill in the return) per spec §4.5 `applyDamage`.
    pub fn apply_damage(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0);
        let dealt = amount.min(self.current_health);
        self.current_health -= dealt;
        dealt
    }

    /// Heals, clamped at `max_health`. Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0);
        let room = self.max_health - self.current_health;
        let healed = amount.min(room);
        self.current_health += healed;
        healed
    }

    pub fn first_melee_attack(&self) -> Option<&AttackDefinition> {
        self.attacks.iter().find(|a| a.is_melee())
    }
}

/// Builds a `Combatant` from a `CreatureDefinition` and its equipment
/// (spec §4.2): clone base stats, fold in each equipped item's armor/
/// evasion/speed/regenBonus/ammo, replace natural attacks with weapon
/// attacks if any are supplied, union damage-type sets, clamp speed,
/// compute `maxHealth`, and zero scheduler counters.
pub fn build_combatant(
    id: EntityId,
    def: &CreatureDefinition,
    faction: Faction,
    position: GridPos,
) -> Result<Combatant, ValidationError> {
    if def.base_health <= 0 {
        return Err(ValidationError::NonPositiveHealth(def.base_health as i64));
    }
    if def.speed <= 0 {
        return Err(ValidationError::NonPositiveSpeed(def.speed as i64));
    }

    let mut armor = 0;
    let mut evasion = 0;
    let mut speed = def.speed;
    let mut regen_bonus = 0;
    let mut ammo: HashMap<String, u32> = HashMap::new();
    let mut weapon_attacks: Vec<AttackDefinition> = Vec::new();
    let mut immunities = def.immunities.clone();
    let mut resistances = def.resistances.clone();
    let mut vulnerabilities = def.vulnerabilities.clone();

    for item in &def.equipment {
        armor += item.armor;
        evasion += item.evasion;
        speed += item.speed;
        regen_bonus += item.regen_bonus;
        for (ammo_type, count) in &item.ammo {
            *ammo.entry(ammo_type.clone()).or_insert(0) += count;
        }
        weapon_attacks.extend(item.attacks.iter().cloned());
        immunities.extend(item.immunities.iter().copied());
        resistances.extend(item.resistances.iter().copied());
        vulnerabilities.extend(item.vulnerabilities.iter().copied());
    }

    let attacks = if weapon_attacks.is_empty() {
        def.natural_attacks.clone()
    } else {
        weapon_attacks
    };

    speed = speed.max(1);

    let max_health = def.base_health + health_bonus(def.endurance);
    let max_willpower = def.base_willpower;

    Ok(Combatant {
        id,
        name: def.name.clone(),
        faction,
        position,
        strength: def.strength,
        agility: def.agility,
        endurance: def.endurance,
        will: def.will,
        armor,
        evasion,
        speed,
        regen_bonus,
        max_health,
        current_health: max_health,
        max_willpower,
        current_willpower: max_willpower,
        accumulated_time: 0,
        regen_points: 0,
        wp_regen_points: 0,
        attacks,
        ammo,
        skills: def.skills.clone(),
        immunities,
        resistances,
        vulnerabilities,
        conditions: HashMap::new(),
        item_properties: HashMap::new(),
        flee_turns_remaining: 0,
        flee_target_distance: 0,
    })
}
