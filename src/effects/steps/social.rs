//! `Clone` and `Charm` steps (spec §4.6).

use crate::effects::context::{EffectContext, EffectState, MessageCollector, PipelineEnv};
use crate::effects::step::{CharmParams, CloneParams};
use crate::model::{EntityId, Faction};

/// Creates a copy of `ctx.target` at an adjacent walkable tile. The
/// clone inherits faction and full combat stats; it is assigned the
/// next unused id (one past the highest currently allocated), since
/// `EntityManager` exposes no dedicated id allocator.
pub fn clone_entity(_params: &CloneParams, ctx: &EffectContext, messages: &mut MessageCollector, env: &mut PipelineEnv) {
    let Some(target) = env.entities.get(ctx.target) else {
        messages.push("clone has no valid target", "gray");
        return;
    };
    let origin = target.position;

    let adjacent = env
        .map
        .all_walkable_tiles()
        .into_iter()
        .filter(|pos| origin.chebyshev_distance(*pos) == 1)
        .find(|pos| env.entities.entity_at(*pos).is_none());

    let Some(dest) = adjacent else {
        messages.push("no room to clone into", "gray");
        return;
    };

    let mut clone = target.clone();
    let next_id = env.entities.all_ids().iter().map(|id| id.0).max().unwrap_or(0) + 1;
    clone.id = EntityId(next_id);
    clone.position = dest;
    env.entities.add(clone);
}

/// Converts the target's faction to `Player`; idempotent when already
/// player-factioned.
pub fn charm(
    _params: &CharmParams,
    ctx: &EffectContext,
    state: &mut EffectState,
    messages: &mut MessageCollector,
    env: &mut PipelineEnv,
) {
    let Some(target) = env.entities.get_mut(ctx.target) else {
        messages.push("charm has no valid target", "gray");
        return;
    };
    if target.faction == Faction::Player {
        messages.push(format!("{} is already friendly", target.name), "gray");
        return;
    }
    target.faction = Faction::Player;
    state.success = true;
}
