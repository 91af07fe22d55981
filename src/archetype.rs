//! Archetype inference: a pure, stateless classifier from a combatant's
//! derived stats to the glossary's seven archetypes. Opaque to combat
//! resolution; used only as a slot-selector input by an external encounter
//! composer (spec §6, §9 — the referenced "§9 archetype inference rules"
//! don't exist in the distilled text, so this heuristic fills the gap).

use crate::model::Combatant;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Archetype {
    Tank,
    Warrior,
    Assassin,
    Ranged,
    Support,
    Brute,
    Scout,
}

/// Classifies a combatant by comparing its derived combat stats against
/// a handful of simple thresholds. Ties are broken in the declared order
/// below (Tank checked first, Scout last).
pub fn infer_archetype(c: &Combatant) -> Archetype {
    let has_ranged_attack = c.attacks.iter().any(|a| !a.is_melee());
    let bulk = c.armor + c.max_health / 10;
    let offense = c.strength + c.agility;

    if c.max_willpower > 0 && c.will > c.strength && c.will > c.agility {
        return Archetype::Support;
    }
    if bulk >= 8 && c.speed <= AVERAGE_DEFENSIVE_SPEED {
        return Archetype::Tank;
    }
    if has_ranged_attack && c.agility >= c.strength {
        return Archetype::Ranged;
    }
    if c.agility > c.strength && c.speed > AVERAGE_DEFENSIVE_SPEED {
        return Archetype::Assassin;
    }
    if c.speed > AVERAGE_DEFENSIVE_SPEED && offense <= 2 {
        return Archetype::Scout;
    }
    if c.strength >= c.agility && bulk < 8 {
        return Archetype::Brute;
    }
    Archetype::Warrior
}

const AVERAGE_DEFENSIVE_SPEED: i32 = 10;
