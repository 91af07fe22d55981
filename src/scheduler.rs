//! Turn scheduler: speed-to-delay conversion, time accumulation, and
//! next-ready selection (spec §4.3). Single-threaded, cooperative: a
//! scheduler iteration is atomic from the pipeline's perspective, and
//! nothing here suspends mid-call.

use crate::model::{Combatant, EntityId};
use crate::rng::CombatRng;

pub const AVERAGE_SPEED: i32 = 10;
pub const MIN_DELAY: i32 = 6;
pub const STANDARD_ACTION_DELAY: i32 = 10;

/// `weightedRound(x, rng)`: `floor(x) + 1` with probability `frac(x)`,
/// else `floor(x)`. Zero-bias integer rounding over many calls.
pub fn weighted_round(x: f64, rng: &mut dyn CombatRng) -> i32 {
    let floor = x.floor();
    let frac = x - floor;
    let base = floor as i32;
    if rng.random() < frac {
        base + 1
    } else {
        base
    }
}

/// `calculateDelay(speed, baseCost, rng) = max(MIN_DELAY, weightedRound(baseCost * 10 / max(1, speed), rng))`.
pub fn calculate_delay(speed: i32, base_cost: i32, rng: &mut dyn CombatRng) -> i32 {
    let raw = (base_cost as f64 * 10.0) / (speed.max(1) as f64);
    MIN_DELAY.max(weighted_round(raw, rng))
}

/// Adds `delta` to `accumulated_time` for every living combatant.
pub fn advance_time(combatants: &mut [Combatant], delta: i32) {
    for c in combatants.iter_mut() {
        if c.is_alive() {
            c.accumulated_time += delta;
        }
    }
}

/// Among living combatants whose `accumulated_time >= calculate_delay(...)`,
/// returns the id of the one with the highest speed, ties broken by
/// lowest id. `None` if nobody is ready.
///
/// Each eligibility check independently calls `calculate_delay`, so it
/// draws from `rng` once per living combatant per call (Open Question
/// decision: taken literally from the source's independent functions,
/// still fully deterministic for a fixed seed and call order).
pub fn get_next_ready(combatants: &[Combatant], base_cost: i32, rng: &mut dyn CombatRng) -> Option<EntityId> {
    let mut best: Option<&Combatant> = None;
    for c in combatants.iter() {
        if !c.is_alive() {
            continue;
        }
        let delay = calculate_delay(c.speed, base_cost, rng);
        if c.accumulated_time < delay {
            continue;
        }
        best = match best {
            None => Some(c),
            Some(b) if c.speed > b.speed || (c.speed == b.speed && c.id < b.id) => Some(c),
            Some(b) => Some(b),
        };
    }
    best.map(|c| c.id)
}

/// Subtracts the delay just computed from the actor's accumulated time.
/// Negative accumulated time is legal — it represents an early/free
/// action carried forward.
pub fn deduct_time(actor: &mut Combatant, base_cost: i32, rng: &mut dyn CombatRng) {
    let delay = calculate_delay(actor.speed, base_cost, rng);
    actor.accumulated_time -= delay;
}

/// Whether only one (or zero) team has living members — the scheduler's
/// sole termination criterion (spec §4.3).
pub fn one_team_remains(combatants: &[Combatant]) -> bool {
    let factions: std::collections::HashSet<_> = combatants
        .iter()
        .filter(|c| c.is_alive())
        .map(|c| c.faction)
        .collect();
    factions.len() <= 1
}

/// Lazily yields the next ready actor, advancing time by 1 unit per
/// iteration whenever nobody is ready, and stopping once only one team
/// has living members. Owns the combatants' mutable state through the
/// caller for the duration of each `next()` call; no implicit suspension.
pub struct TurnOrder<'a> {
    combatants: &'a mut [Combatant],
    base_cost: i32,
}

impl<'a> TurnOrder<'a> {
    pub fn new(combatants: &'a mut [Combatant], base_cost: i32) -> Self {
        Self { combatants, base_cost }
    }

    /// Returns the index (within the slice passed to [`TurnOrder::new`])
    /// of the next actor to take a turn, deducting its delay, or `None`
    /// if combat has ended (checked before each yield, per spec §4.3).
    pub fn next(&mut self, rng: &mut dyn CombatRng) -> Option<usize> {
        if one_team_remains(self.combatants) {
            return None;
        }
        loop {
            if let Some(id) = get_next_ready(self.combatants, self.base_cost, rng) {
                let idx = self.combatants.iter().position(|c| c.id == id).unwrap();
                deduct_time(&mut self.combatants[idx], self.base_cost, rng);
                return Some(idx);
            }
            advance_time(self.combatants, 1);
            if one_team_remains(self.combatants) {
                return None;
            }
        }
    }
}
