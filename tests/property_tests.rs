//! Property-based invariant checks against the formulas and bounds
//! named as invariants: dice rolls stay in range, health never exceeds
//! its max, calculateDelay never dips below MIN_DELAY, and healthBonus
//! matches its closed form for every endurance value exercised.

use combat_core::dice::DiceExpr;
use combat_core::model::stats::health_bonus;
use combat_core::model::{build_combatant, AttackDefinition, AttackKind, CreatureDefinition, DamageType, EntityId, Faction, GridPos};
use combat_core::rng::LcgRng;
use combat_core::scheduler::{calculate_delay, MIN_DELAY};
use proptest::prelude::*;

fn def_with(endurance: i32, speed: i32) -> CreatureDefinition {
    CreatureDefinition {
        id: "p".into(),
        name: "P".into(),
        strength: 0,
        agility: 0,
        endurance,
        will: 0,
        speed,
        base_health: 10,
        base_willpower: 0,
        equipment: vec![],
        natural_attacks: vec![AttackDefinition::new(
            "hit",
            AttackKind::Melee,
            DiceExpr::parse("1d4").unwrap(),
            DamageType::Slashing,
        )],
        skills: vec![],
        resistances: Default::default(),
        vulnerabilities: Default::default(),
        immunities: Default::default(),
        threat: 0,
    }
}

proptest! {
    #[test]
    fn dice_rolls_stay_within_declared_bounds(count in 1u32..6, sides in 1u32..20, modifier in -5i32..5) {
        let expr = DiceExpr::new(count, sides, modifier);
        let mut rng = LcgRng::seed_from_u64(7);
        for _ in 0..50 {
            let roll = expr.roll(&mut rng);
            prop_assert!(roll >= expr.min());
            prop_assert!(roll <= expr.max());
        }
    }

    #[test]
    fn calculate_delay_never_drops_below_min_delay(speed in 1i32..200, base_cost in 1i32..50, seed in any::<u64>()) {
        let mut rng = LcgRng::seed_from_u64(seed);
        let delay = calculate_delay(speed, base_cost, &mut rng);
        prop_assert!(delay >= MIN_DELAY);
    }

    #[test]
    fn health_bonus_matches_its_closed_form(endurance in -10i32..40) {
        let bonus = health_bonus(endurance);
        if endurance <= 0 {
            prop_assert_eq!(bonus, 0);
        } else {
            prop_assert_eq!(bonus, (endurance * endurance + 9 * endurance) / 2);
        }
        prop_assert!(bonus >= 0);
    }

    #[test]
    fn applied_damage_never_pushes_health_out_of_bounds(endurance in 0i32..20, speed in 1i32..30, raw in 0i32..200) {
        let def = def_with(endurance, speed);
        let mut c = build_combatant(EntityId(1), &def, Faction::Hostile, GridPos::new(0, 0)).unwrap();
        let dealt = c.apply_damage(raw);
        prop_assert!(c.current_health >= 0);
        prop_assert!(c.current_health <= c.max_health);
        prop_assert!(dealt <= raw);
    }

    #[test]
    fn healing_never_exceeds_max_health(endurance in 0i32..20, speed in 1i32..30, damage_first in 0i32..50, heal_amount in 0i32..200) {
        let def = def_with(endurance, speed);
        let mut c = build_combatant(EntityId(1), &def, Faction::Hostile, GridPos::new(0, 0)).unwrap();
        c.apply_damage(damage_first);
        c.heal(heal_amount);
        prop_assert!(c.current_health <= c.max_health);
        prop_assert!(c.current_health >= 0);
    }
}
