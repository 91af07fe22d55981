//! Threshold-based regeneration accumulators (spec §4.4). Called once per
//! turn per living combatant by the scheduler loop; the host decides when
//! that is, this module only does the arithmetic.

use crate::model::combatant::Combatant;
use crate::model::stats::regen_rate;

/// Accumulates HP regen points and converts every full 100 points into 1
/// HP healed. Resets the accumulator to 0 (no stockpiling) once at full
/// health or dead. Returns the HP healed this call.
pub fn regenerate_health(c: &mut Combatant) -> i32 {
    if !c.is_alive() || c.current_health >= c.max_health {
        c.regen_points = 0;
        return 0;
    }

    c.regen_points += regen_rate(c.max_health, c.regen_bonus);

    let mut healed = 0;
    while c.regen_points >= 100 && c.current_health < c.max_health {
        c.regen_points -= 100;
        c.current_health += 1;
        healed += 1;
    }

    if c.current_health >= c.max_health {
        c.regen_points = 0;
    }

    healed
}

/// Willpower analogue of [`regenerate_health`], against
/// `max_willpower`/`current_willpower`/`wp_regen_points`. Uses the same
/// point rate formula, reusing `regen_bonus` since there's no separate
/// willpower regen bonus stat.
pub fn regenerate_willpower(c: &mut Combatant) -> i32 {
    if !c.is_alive() || c.current_willpower >= c.max_willpower {
        c.wp_regen_points = 0;
        return 0;
    }

    c.wp_regen_points += regen_rate(c.max_willpower, c.regen_bonus);

    let mut restored = 0;
    while c.wp_regen_points >= 100 && c.current_willpower < c.max_willpower {
        c.wp_regen_points -= 100;
        c.current_willpower += 1;
        restored += 1;
    }

    if c.current_willpower >= c.max_willpower {
        c.wp_regen_points = 0;
    }

    restored
}
