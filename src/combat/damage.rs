//! Typed damage application: runs an amount through a target's
//! immune/vulnerable/resistant lookup before reducing health (spec
//! §4.5, §4.7 — the same path DoT ticks use).

use crate::model::{Combatant, DamageType};

/// Applies `raw_amount` of `damage_type` to `target` after resolving its
/// damage modifier. Returns the amount actually dealt (post-modifier,
/// post-clamp — no overkill in the return).
pub fn apply_typed_damage(target: &mut Combatant, raw_amount: i32, damage_type: DamageType) -> i32 {
    let modifier = target.damage_modifier(damage_type);
    let modified = modifier.apply(raw_amount.max(0));
    target.apply_damage(modified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{build_combatant, CreatureDefinition, EntityId, Faction, GridPos};

    fn skeleton() -> Combatant {
        let mut def = CreatureDefinition {
            id: "skeleton".into(),
            name: "Skeleton".into(),
            strength: 0,
            agility: 0,
            endurance: 0,
            will: 0,
            speed: 10,
            base_health: 20,
            base_willpower: 0,
            equipment: vec![],
            natural_attacks: vec![],
            skills: vec![],
            resistances: Default::default(),
            vulnerabilities: Default::default(),
            immunities: Default::default(),
            threat: 0,
        };
        def.resistances.insert(DamageType::Piercing);
        def.vulnerabilities.insert(DamageType::Bludgeoning);
        build_combatant(EntityId(1), &def, Faction::Hostile, GridPos::new(0, 0)).unwrap()
    }

    #[test]
    fn resistant_piercing_hit_for_8_loses_4_hp() {
        let mut s = skeleton();
        let dealt = apply_typed_damage(&mut s, 8, DamageType::Piercing);
        assert_eq!(dealt, 4);
        assert_eq!(s.current_health, s.max_health - 4);
    }

    #[test]
    fn vulnerable_bludgeoning_hit_for_5_loses_10_hp() {
        let mut s = skeleton();
        let dealt = apply_typed_damage(&mut s, 5, DamageType::Bludgeoning);
        assert_eq!(dealt, 10);
    }

    #[test]
    fn vulnerable_damage_capped_at_current_health() {
        let mut s = skeleton();
        s.current_health = 6;
        let dealt = apply_typed_damage(&mut s, 5, DamageType::Bludgeoning);
        assert_eq!(dealt, 6);
        assert_eq!(s.current_health, 0);
    }

    #[test]
    fn type_in_both_immune_and_vulnerable_yields_zero() {
        let mut s = skeleton();
        s.immunities.insert(DamageType::Bludgeoning);
        let dealt = apply_typed_damage(&mut s, 50, DamageType::Bludgeoning);
        assert_eq!(dealt, 0);
    }
}
