//! Opposed-roll attack resolution (spec §4.5).

use crate::model::{AttackDefinition, Combatant};
use crate::rng::CombatRng;

/// Rolls `2d6 + attacker_bonus` against `2d6 + defender_bonus`. When
/// `attacker_wins_ties` is set, `attacker_total >= defender_total` wins
/// (attack rolls); otherwise the defender wins ties (save rolls, spec
/// §4.6 `SaveCheck`). Returns `(attacker_total, defender_total, attacker_wins)`.
pub fn opposed_roll(
    attacker_bonus: i32,
    defender_bonus: i32,
    attacker_wins_ties: bool,
    rng: &mut dyn CombatRng,
) -> (i32, i32, bool) {
    let attacker_total = roll_2d6(rng) + attacker_bonus;
    let defender_total = roll_2d6(rng) + defender_bonus;
    let attacker_wins = if attacker_wins_ties {
        attacker_total >= defender_total
    } else {
        attacker_total > defender_total
    };
    (attacker_total, defender_total, attacker_wins)
}

fn roll_2d6(rng: &mut dyn CombatRng) -> i32 {
    (1 + (rng.random() * 6.0).floor() as i32) + (1 + (rng.random() * 6.0).floor() as i32)
}

/// Outcome of a single attack resolution attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackOutcome {
    pub hit: bool,
    pub attack_roll: i32,
    pub defense_roll: i32,
    pub raw_damage: i32,
}

/// Resolves one attack from `attacker` against `defender` using `attack`.
/// Hit iff `attackRoll >= defenseRoll` (attacker wins ties, spec §4.5).
/// Raw damage is pre-modifier: `rollDice(attack.dice) + strBonus - targetArmor`,
/// clamped to `>= 0`. Damage-type modifier lookup is left to the caller
/// (the `Damage`/`WeaponDamage` pipeline steps apply it), since this
/// function only resolves the hit/miss and the unmodified amount.
pub fn resolve_attack(
    attacker: &Combatant,
    defender: &Combatant,
    attack: &AttackDefinition,
    rng: &mut dyn CombatRng,
) -> AttackOutcome {
    let is_melee = attack.is_melee();
    let attacker_bonus = attacker.attack_modifier(is_melee);
    let defender_bonus = defender.defense_modifier();

    let (attack_roll, defense_roll, hit) = opposed_roll(attacker_bonus, defender_bonus, true, rng);

    let raw_damage = if hit {
        let str_bonus = attack.capped_str_bonus(attacker.strength);
        (attack.dice.roll(rng) + str_bonus - defender.armor).max(0)
    } else {
        0
    };

    AttackOutcome {
        hit,
        attack_roll,
        defense_roll,
        raw_damage,
    }
}
