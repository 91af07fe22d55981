//! `Knockback`, `Blink`, `Teleport`, and `MoveTiles` steps (spec §4.6).

use crate::effects::context::{EffectContext, EffectState, MessageCollector, PipelineEnv};
use crate::effects::step::{BlinkParams, KnockbackParams, MoveTilesParams, TeleportParams};
use crate::model::{EntityId, Faction, GridPos};

use super::stat_value;

fn step_toward(from: GridPos, delta: GridPos) -> GridPos {
    GridPos::new(from.x + delta.x.signum(), from.y + delta.y.signum())
}

/// Pushes the target away from the caster, up to `distance` tiles (plus
/// stat scaling), stopping at the first blocker. Runs `on_collision`
/// once for the pushed target on a wall collision, or twice (pushed
/// target and collided entity) on an entity collision, each with a
/// fresh `EffectState` but the shared `MessageCollector` (spec §4.6).
pub fn knockback(
    params: &KnockbackParams,
    ctx: &EffectContext,
    state: &mut EffectState,
    messages: &mut MessageCollector,
    env: &mut PipelineEnv,
) {
    let Some(caster) = ctx.caster.and_then(|id| env.entities.get(id)) else {
        messages.push("knockback has no caster", "gray");
        return;
    };
    let Some(target) = env.entities.get(ctx.target) else {
        messages.push("knockback has no valid target", "gray");
        return;
    };
    let caster_pos = caster.position;
    let target_pos = target.position;

    let scale = match params.stat_scale {
        Some((stat, mult)) => (stat_value(caster, stat) as f64 * mult) as i32,
        None => 0,
    };
    let max_distance = params.distance + scale;

    let delta = GridPos::new(target_pos.x - caster_pos.x, target_pos.y - caster_pos.y);
    if delta.x == 0 && delta.y == 0 {
        return;
    }

    let mut pos = target_pos;
    let mut collided_with: Option<EntityId> = None;
    let mut traveled = 0;
    for _ in 0..max_distance {
        let next = step_toward(pos, delta);
        if !env.map.is_in_bounds(next) || !env.map.is_walkable(next) {
            break;
        }
        if let Some(occupant) = env.entities.entity_at(next) {
            collided_with = Some(occupant);
            break;
        }
        pos = next;
        traveled += 1;
    }

    if traveled == 0 && collided_with.is_none() {
        messages.push(format!("{} cannot be pushed", target.name), "gray");
        return;
    }

    if let Some(target) = env.entities.get_mut(ctx.target) {
        target.position = pos;
    }

    if let Some(pipeline) = &params.on_collision {
        if let Some(blocker) = collided_with {
            {
                let mut sub_state = EffectState::new();
                let _guard = messages.scoped_entity(ctx.target);
                let sub_ctx = EffectContext::new(ctx.target, ctx.skill);
                pipeline.run(&sub_ctx, &mut sub_state, messages, env);
            }
            let mut sub_state2 = EffectState::new();
            let _guard = messages.scoped_entity(blocker);
            let sub_ctx2 = EffectContext::new(blocker, ctx.skill);
            pipeline.run(&sub_ctx2, &mut sub_state2, messages, env);
        }
        // Reached max distance without colliding: no sub-pipeline runs.
    }

    state.success = true;
}

/// Teleports the target to a random walkable, unoccupied tile within
/// Chebyshev `range` (default 5).
pub fn blink(params: &BlinkParams, ctx: &EffectContext, messages: &mut MessageCollector, env: &mut PipelineEnv) {
    let Some(target) = env.entities.get(ctx.target) else {
        messages.push("blink has no valid target", "gray");
        return;
    };
    let origin = target.position;
    let range = if params.range > 0 { params.range } else { 5 };

    let candidate = env
        .map
        .all_walkable_tiles()
        .into_iter()
        .filter(|pos| origin.chebyshev_distance(*pos) <= range)
        .find(|pos| env.entities.entity_at(*pos).is_none());

    match candidate {
        Some(dest) => {
            if let Some(target) = env.entities.get_mut(ctx.target) {
                target.position = dest;
            }
        }
        None => messages.push("nowhere to blink to", "gray"),
    }
}

/// Range `<= 0` means anywhere on the map; otherwise range-limited. If
/// the target is player-factioned and `teleport_companions` is set,
/// every player-faction entity is also moved within Chebyshev 3 of the
/// new position (spec §4.6, end-to-end scenario 6).
pub fn teleport(params: &TeleportParams, ctx: &EffectContext, messages: &mut MessageCollector, env: &mut PipelineEnv) {
    let Some(target) = env.entities.get(ctx.target) else {
        messages.push("teleport has no valid target", "gray");
        return;
    };
    let origin = target.position;
    let is_player = target.faction == Faction::Player;

    let tiles = env.map.all_walkable_tiles();
    let candidate = tiles
        .iter()
        .copied()
        .filter(|pos| params.range <= 0 || origin.chebyshev_distance(*pos) <= params.range)
        .filter(|pos| env.entities.entity_at(*pos).is_none())
        .next();

    let Some(dest) = candidate else {
        messages.push("no valid teleport destination", "gray");
        return;
    };

    if let Some(target) = env.entities.get_mut(ctx.target) {
        target.position = dest;
    }

    if is_player && params.teleport_companions {
        let companion_ids: Vec<EntityId> = env
            .entities
            .all_ids()
            .into_iter()
            .filter(|id| *id != ctx.target)
            .filter(|id| env.entities.get(*id).map(|c| c.faction == Faction::Player).unwrap_or(false))
            .collect();

        for companion_id in companion_ids {
            let companion_dest = tiles
                .iter()
                .copied()
                .filter(|pos| dest.chebyshev_distance(*pos) <= 3)
                .filter(|pos| env.entities.entity_at(*pos).is_none())
                .next();
            if let Some(cdest) = companion_dest {
                if let Some(companion) = env.entities.get_mut(companion_id) {
                    companion.position = cdest;
                }
            }
        }
    }
}

/// Moves the caster `amount` tiles toward `ctx.target_position`. Swaps
/// with a friendly entity on the first tile, blocks on a hostile first
/// tile (failure), and stops early on any non-first-tile entity.
pub fn move_tiles(
    params: &MoveTilesParams,
    ctx: &EffectContext,
    state: &mut EffectState,
    messages: &mut MessageCollector,
    env: &mut PipelineEnv,
) {
    let Some(caster_id) = ctx.caster else {
        messages.push("move tiles has no caster", "gray");
        return;
    };
    let Some(dest) = ctx.target_position else {
        messages.push("move tiles has no target position", "gray");
        return;
    };
    let Some(caster) = env.entities.get(caster_id) else {
        return;
    };
    let caster_faction = caster.faction;
    let caster_pos = caster.position;
    let delta = GridPos::new(dest.x - caster_pos.x, dest.y - caster_pos.y);
    if delta.x == 0 && delta.y == 0 {
        return;
    }

    let mut pos = caster_pos;
    for i in 0..params.amount {
        let next = step_toward(pos, delta);
        if !env.map.is_in_bounds(next) || !env.map.is_walkable(next) {
            break;
        }
        match env.entities.entity_at(next) {
            None => {
                pos = next;
            }
            Some(occupant_id) => {
                if i == 0 {
                    let occupant_faction = env.entities.get(occupant_id).map(|c| c.faction);
                    if occupant_faction == Some(caster_faction) {
                        if let Some(occupant) = env.entities.get_mut(occupant_id) {
                            occupant.position = caster_pos;
                        }
                        pos = next;
                    } else {
                        messages.push("path is blocked", "gray");
                        return;
                    }
                }
                break;
            }
        }
    }

    if let Some(caster) = env.entities.get_mut(caster_id) {
        caster.position = pos;
    }
    state.success = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::{CombatantRoster, NullObserver, NullProjectileSystem};
    use crate::model::{build_combatant, CreatureDefinition, Faction};
    use crate::rng::LcgRng;

    struct OpenMap {
        size: i32,
    }
    impl crate::external::MapSystem for OpenMap {
        fn is_in_bounds(&self, pos: GridPos) -> bool {
            pos.x >= 0 && pos.y >= 0 && pos.x < self.size && pos.y < self.size
        }
        fn is_walkable(&self, pos: GridPos) -> bool {
            self.is_in_bounds(pos)
        }
        fn all_walkable_tiles(&self) -> Vec<GridPos> {
            (0..self.size).flat_map(|x| (0..self.size).map(move |y| GridPos::new(x, y))).collect()
        }
    }
    struct NullVision;
    impl crate::external::VisionSystem for NullVision {
        fn reveal_area_as_explored(&mut self, _center: GridPos, _radius: i32) {}
    }

    fn def() -> CreatureDefinition {
        CreatureDefinition {
            id: "t".into(),
            name: "Test".into(),
            strength: 0,
            agility: 0,
            endurance: 0,
            will: 0,
            speed: 10,
            base_health: 10,
            base_willpower: 0,
            equipment: vec![],
            natural_attacks: vec![],
            skills: vec![],
            resistances: Default::default(),
            vulnerabilities: Default::default(),
            immunities: Default::default(),
            threat: 0,
        }
    }

    fn env_with<'a>(
        roster: &'a mut CombatantRoster,
        map: &'a OpenMap,
        vision: &'a mut NullVision,
        projectiles: &'a mut NullProjectileSystem,
        observer: &'a mut NullObserver,
        rng: &'a mut LcgRng,
    ) -> PipelineEnv<'a> {
        PipelineEnv {
            entities: roster,
            map,
            vision,
            projectiles,
            visuals: None,
            observer,
            rng,
        }
    }

    #[test]
    fn knockback_stops_at_a_blocker_and_leaves_the_blocked_tile_empty() {
        let mut roster = CombatantRoster::new();
        roster.add(build_combatant(EntityId(1), &def(), Faction::Player, GridPos::new(2, 2)).unwrap());
        roster.add(build_combatant(EntityId(2), &def(), Faction::Hostile, GridPos::new(3, 2)).unwrap());
        roster.add(build_combatant(EntityId(3), &def(), Faction::Hostile, GridPos::new(5, 2)).unwrap());
        let map = OpenMap { size: 10 };
        let mut vision = NullVision;
        let mut projectiles = NullProjectileSystem;
        let mut observer = NullObserver;
        let mut rng = LcgRng::seed_from_u64(1);
        let mut env = env_with(&mut roster, &map, &mut vision, &mut projectiles, &mut observer, &mut rng);

        let ctx = EffectContext::new(EntityId(2), "shove").with_caster(EntityId(1));
        let mut state = EffectState::new();
        let mut messages = MessageCollector::new();
        let params = KnockbackParams {
            distance: 5,
            stat_scale: None,
            on_collision: None,
        };
        knockback(&params, &ctx, &mut state, &mut messages, &mut env);

        // Pushed away from (2,2) toward +x, blocked by the entity at (5,2):
        // it should land just short of the blocker, not on top of it.
        assert_eq!(env.entities.get(EntityId(2)).unwrap().position, GridPos::new(4, 2));
        assert!(state.success);
    }

    #[test]
    fn knockback_with_nowhere_to_go_reports_failure_message() {
        let mut roster = CombatantRoster::new();
        roster.add(build_combatant(EntityId(1), &def(), Faction::Player, GridPos::new(0, 0)).unwrap());
        roster.add(build_combatant(EntityId(2), &def(), Faction::Hostile, GridPos::new(1, 0)).unwrap());
        // Wall immediately behind the target at x=2.
        let map = OpenMap { size: 2 };
        let mut vision = NullVision;
        let mut projectiles = NullProjectileSystem;
        let mut observer = NullObserver;
        let mut rng = LcgRng::seed_from_u64(1);
        let mut env = env_with(&mut roster, &map, &mut vision, &mut projectiles, &mut observer, &mut rng);

        let ctx = EffectContext::new(EntityId(2), "shove").with_caster(EntityId(1));
        let mut state = EffectState::new();
        let mut messages = MessageCollector::new();
        let params = KnockbackParams {
            distance: 5,
            stat_scale: None,
            on_collision: None,
        };
        knockback(&params, &ctx, &mut state, &mut messages, &mut env);

        assert!(!state.success);
        assert_eq!(env.entities.get(EntityId(2)).unwrap().position, GridPos::new(1, 0));
        assert!(messages.messages().iter().any(|m| m.text.contains("cannot be pushed")));
    }

    #[test]
    fn teleport_moves_companions_within_range_of_the_caster() {
        let mut roster = CombatantRoster::new();
        roster.add(build_combatant(EntityId(1), &def(), Faction::Player, GridPos::new(0, 0)).unwrap());
        roster.add(build_combatant(EntityId(2), &def(), Faction::Player, GridPos::new(1, 0)).unwrap());
        let map = OpenMap { size: 20 };
        let mut vision = NullVision;
        let mut projectiles = NullProjectileSystem;
        let mut observer = NullObserver;
        let mut rng = LcgRng::seed_from_u64(7);
        let mut env = env_with(&mut roster, &map, &mut vision, &mut projectiles, &mut observer, &mut rng);

        let ctx = EffectContext::new(EntityId(1), "teleport").with_target_position(GridPos::new(15, 15));
        let mut messages = MessageCollector::new();
        let params = TeleportParams {
            range: 0,
            teleport_companions: true,
        };
        teleport(&params, &ctx, &mut messages, &mut env);

        let leader_pos = env.entities.get(EntityId(1)).unwrap().position;
        let companion_pos = env.entities.get(EntityId(2)).unwrap().position;
        assert!(leader_pos.chebyshev_distance(companion_pos) <= 3);
    }

    #[test]
    fn move_tiles_swaps_with_a_friendly_occupant_on_the_first_tile() {
        let mut roster = CombatantRoster::new();
        roster.add(build_combatant(EntityId(1), &def(), Faction::Player, GridPos::new(0, 0)).unwrap());
        roster.add(build_combatant(EntityId(2), &def(), Faction::Player, GridPos::new(1, 0)).unwrap());
        let map = OpenMap { size: 10 };
        let mut vision = NullVision;
        let mut projectiles = NullProjectileSystem;
        let mut observer = NullObserver;
        let mut rng = LcgRng::seed_from_u64(1);
        let mut env = env_with(&mut roster, &map, &mut vision, &mut projectiles, &mut observer, &mut rng);

        let ctx = EffectContext::new(EntityId(1), "advance")
            .with_caster(EntityId(1))
            .with_target_position(GridPos::new(3, 0));
        let mut state = EffectState::new();
        let mut messages = MessageCollector::new();
        let params = MoveTilesParams { amount: 1 };
        move_tiles(&params, &ctx, &mut state, &mut messages, &mut env);

        assert_eq!(env.entities.get(EntityId(1)).unwrap().position, GridPos::new(1, 0));
        assert_eq!(env.entities.get(EntityId(2)).unwrap().position, GridPos::new(0, 0));
        assert!(state.success);
    }

    #[test]
    fn move_tiles_blocks_on_a_hostile_first_tile() {
        let mut roster = CombatantRoster::new();
        roster.add(build_combatant(EntityId(1), &def(), Faction::Player, GridPos::new(0, 0)).unwrap());
        roster.add(build_combatant(EntityId(2), &def(), Faction::Hostile, GridPos::new(1, 0)).unwrap());
        let map = OpenMap { size: 10 };
        let mut vision = NullVision;
        let mut projectiles = NullProjectileSystem;
        let mut observer = NullObserver;
        let mut rng = LcgRng::seed_from_u64(1);
        let mut env = env_with(&mut roster, &map, &mut vision, &mut projectiles, &mut observer, &mut rng);

        let ctx = EffectContext::new(EntityId(1), "advance")
            .with_caster(EntityId(1))
            .with_target_position(GridPos::new(3, 0));
        let mut state = EffectState::new();
        let mut messages = MessageCollector::new();
        let params = MoveTilesParams { amount: 1 };
        move_tiles(&params, &ctx, &mut state, &mut messages, &mut env);

        assert_eq!(env.entities.get(EntityId(1)).unwrap().position, GridPos::new(0, 0));
        assert!(!state.success);
        assert!(messages.messages().iter().any(|m| m.text.contains("blocked")));
    }
}
