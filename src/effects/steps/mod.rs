pub mod checks;
pub mod conditions;
pub mod damage;
pub mod healing;
pub mod movement;
pub mod social;
pub mod world;

/// Reads a [`crate::effects::step::StatKind`] off a combatant.
pub(crate) fn stat_value(c: &crate::model::Combatant, stat: crate::effects::step::StatKind) -> i32 {
    use crate::effects::step::StatKind::*;
    match stat {
        Strength => c.strength,
        Agility => c.agility,
        Endurance => c.endurance,
        Will => c.will,
    }
}
