//! Capability interfaces the combat core consumes from its host (spec
//! §6). The core never holds a concrete renderer, pathfinder, or level
//! generator — only these traits, so it stays reusable outside the game
//! loop (the Monte Carlo harness supplies null/headless implementations
//! of the optional ones and [`CombatantRoster`] for entity storage).

use crate::model::{Combatant, EntityId, GridPos};
use std::collections::HashMap;

/// Map queries the pipeline needs for movement/targeting steps. The map
/// itself is read-only from the pipeline's perspective except where a
/// step explicitly creates a hazard or reveals exploration bits.
pub trait MapSystem {
    fn is_in_bounds(&self, pos: GridPos) -> bool;
    fn is_walkable(&self, pos: GridPos) -> bool;
    fn all_walkable_tiles(&self) -> Vec<GridPos>;
}

/// Owns combatants exclusively; pipeline steps borrow mutably one at a
/// time. `all_ids` must return ids pre-sorted, since `HashMap` iteration
/// order is not deterministic and every consumer here needs reproducible
/// ordering for a fixed seed.
pub trait EntityManager {
    fn get(&self, id: EntityId) -> Option<&Combatant>;
    fn get_mut(&mut self, id: EntityId) -> Option<&mut Combatant>;
    fn entity_at(&self, pos: GridPos) -> Option<EntityId>;
    fn is_occupied(&self, pos: GridPos) -> bool {
        self.entity_at(pos).is_some()
    }
    fn all_ids(&self) -> Vec<EntityId>;
    fn add(&mut self, combatant: Combatant);
    fn remove(&mut self, id: EntityId) -> Option<Combatant>;
}

/// Creates entities by definition id, for steps like `Clone` or
/// `SpawnHazard` that need to materialize new combatants/items.
pub trait EntityFactory {
    fn create_creature(&self, definition_id: &str, pos: GridPos) -> Option<Combatant>;
}

/// Reveals map area as explored (the `MagicMapping` step, spec §4.6).
pub trait VisionSystem {
    fn reveal_area_as_explored(&mut self, center: GridPos, radius: i32);
}

/// Spawns a projectile that, for a headless host, resolves its impact
/// callback synchronously and immediately (spec §6: "callbacks must run
/// synchronously on the same thread when the projectile notionally
/// arrives").
pub trait ProjectileSystem {
    fn spawn_projectile_with_callback(
        &mut self,
        from: GridPos,
        to: GridPos,
        kind: &str,
        on_impact: Box<dyn FnOnce(&mut dyn EntityManager)>,
    );
}

/// Optional, fire-and-forget. The core never awaits it and its absence
/// has no effect on combat resolution.
pub trait VisualEffectSystem {
    fn spawn_projectile(&mut self, from: GridPos, to: GridPos, kind: &str);
    fn spawn_explosion(&mut self, center: GridPos, radius: i32);
}

/// A combat event broadcast to observers. Observers are pure sinks and
/// must not mutate combat state (spec §9).
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    AttackHit { attacker: EntityId, target: EntityId, amount: i32 },
    AttackBlocked { attacker: EntityId, target: EntityId },
    SkillDamageDealt { source: EntityId, target: EntityId, amount: i32, label: String },
}

pub trait CombatObserver {
    fn on_event(&mut self, event: &CombatEvent);
}

/// A `CombatObserver` that discards every event, for headless Monte
/// Carlo runs that don't need narration.
#[derive(Debug, Default)]
pub struct NullObserver;

impl CombatObserver for NullObserver {
    fn on_event(&mut self, _event: &CombatEvent) {}
}

/// A `ProjectileSystem` that resolves impact immediately with no travel
/// delay or visual side effect, for headless hosts.
#[derive(Debug, Default)]
pub struct NullProjectileSystem;

impl ProjectileSystem for NullProjectileSystem {
    fn spawn_projectile_with_callback(
        &mut self,
        _from: GridPos,
        _to: GridPos,
        _kind: &str,
        on_impact: Box<dyn FnOnce(&mut dyn EntityManager)>,
    ) {
        let mut noop = CombatantRoster::new();
        on_impact(&mut noop);
    }
}

/// The combat core's own default in-memory `EntityManager`, so it can
/// run standalone (e.g. the Monte Carlo harness) without a host game
/// loop. Iteration order is always lowest-id-first for determinism,
/// matching the sort-by-id requirement every scheduler/pipeline
/// consumer here relies on.
#[derive(Debug, Default)]
pub struct CombatantRoster {
    entities: HashMap<EntityId, Combatant>,
}

impl CombatantRoster {
    pub fn new() -> Self {
        Self { entities: HashMap::new() }
    }

    pub fn living(&self) -> impl Iterator<Item = &Combatant> {
        let mut ids: Vec<_> = self.entities.keys().copied().collect();
        ids.sort();
        ids.into_iter()
            .filter_map(move |id| self.entities.get(&id))
            .filter(|c| c.is_alive())
    }
}

impl EntityManager for CombatantRoster {
    fn get(&self, id: EntityId) -> Option<&Combatant> {
        self.entities.get(&id)
    }

    fn get_mut(&mut self, id: EntityId) -> Option<&mut Combatant> {
        self.entities.get_mut(&id)
    }

    fn entity_at(&self, pos: GridPos) -> Option<EntityId> {
        let mut ids: Vec<_> = self.entities.keys().copied().collect();
        ids.sort();
        ids.into_iter().find(|id| {
            self.entities
                .get(id)
                .map(|c| c.position == pos && c.is_alive())
                .unwrap_or(false)
        })
    }

    fn all_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<_> = self.entities.keys().copied().collect();
        ids.sort();
        ids
    }

    fn add(&mut self, combatant: Combatant) {
        self.entities.insert(combatant.id, combatant);
    }

    fn remove(&mut self, id: EntityId) -> Option<Combatant> {
        self.entities.remove(&id)
    }
}
