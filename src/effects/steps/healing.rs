//! `Heal`, `HealCaster`, and `ModifyWillpower` steps (spec §4.6).

use crate::effects::context::{EffectContext, EffectState, MessageCollector, PipelineEnv};
use crate::effects::step::{HealCasterParams, HealParams, ModifyWillpowerParams};

use super::stat_value;

pub fn heal(
    params: &HealParams,
    ctx: &EffectContext,
    state: &mut EffectState,
    messages: &mut MessageCollector,
    env: &mut PipelineEnv,
) {
    let Some(target) = env.entities.get(ctx.target) else {
        messages.push("heal step has no valid target", "gray");
        return;
    };

    let mut amount = if let Some(percent) = params.percent_of_max {
        (target.max_health as f64 * percent) as i32
    } else {
        let stat_bonus = match (params.stat_scale, ctx.caster.and_then(|id| env.entities.get(id))) {
            (Some((stat, mult)), Some(caster)) => (stat_value(caster, stat) as f64 * mult) as i32,
            _ => 0,
        };
        params.flat + stat_bonus
    };

    if let Some(dice) = params.dice {
        amount += dice.roll(env.rng);
    }

    let Some(target) = env.entities.get_mut(ctx.target) else {
        return;
    };
    let healed = target.heal(amount);
    if healed > 0 {
        state.success = true;
    }
}

/// Heals the caster by `fraction * state.damage_dealt` (vampiric).
pub fn heal_caster(
    params: &HealCasterParams,
    ctx: &EffectContext,
    state: &mut EffectState,
    messages: &mut MessageCollector,
    env: &mut PipelineEnv,
) {
    let Some(caster_id) = ctx.caster else {
        messages.push("heal caster has no caster", "gray");
        return;
    };
    let amount = (state.damage_dealt as f64 * params.fraction) as i32;
    let Some(caster) = env.entities.get_mut(caster_id) else {
        return;
    };
    let healed = caster.heal(amount);
    if healed > 0 {
        state.success = true;
    }
}

/// Positive amount restores, negative drains; respects pool bounds.
pub fn modify_willpower(
    params: &ModifyWillpowerParams,
    ctx: &EffectContext,
    state: &mut EffectState,
    messages: &mut MessageCollector,
    env: &mut PipelineEnv,
) {
    let Some(target) = env.entities.get_mut(ctx.target) else {
        messages.push("modify willpower has no valid target", "gray");
        return;
    };
    if params.amount >= 0 {
        let room = target.max_willpower - target.current_willpower;
        let gained = params.amount.min(room.max(0));
        target.current_willpower += gained;
        if gained > 0 {
            state.success = true;
        }
    } else {
        let drained = (-params.amount).min(target.current_willpower);
        target.current_willpower -= drained;
        if drained > 0 {
            state.success = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::{CombatantRoster, EntityManager, MapSystem, NullObserver, NullProjectileSystem, VisionSystem};
    use crate::model::{build_combatant, CreatureDefinition, EntityId, Faction, GridPos};
    use crate::rng::LcgRng;

    struct NullMap;
    impl MapSystem for NullMap {
        fn is_in_bounds(&self, _pos: GridPos) -> bool {
            true
        }
        fn is_walkable(&self, _pos: GridPos) -> bool {
            true
        }
        fn all_walkable_tiles(&self) -> Vec<GridPos> {
            vec![]
        }
    }
    struct NullVision;
    impl VisionSystem for NullVision {
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
            base_health: 20,
            base_willpower: 10,
            equipment: vec![],
            natural_attacks: vec![],
            skills: vec![],
            resistances: Default::default(),
            vulnerabilities: Default::default(),
            immunities: Default::default(),
            threat: 0,
        }
    }

    #[test]
    fn willpower_drain_respects_lower_bound() {
        let mut roster = CombatantRoster::new();
        roster.add(build_combatant(EntityId(1), &def(), Faction::Player, GridPos::new(0, 0)).unwrap());
        let map = NullMap;
        let mut vision = NullVision;
        let mut projectiles = NullProjectileSystem;
        let mut observer = NullObserver;
        let mut rng = LcgRng::seed_from_u64(1);
        let mut env = PipelineEnv {
            entities: &mut roster,
            map: &map,
            vision: &mut vision,
            projectiles: &mut projectiles,
            visuals: None,
            observer: &mut observer,
            rng: &mut rng,
        };
        let ctx = EffectContext::new(EntityId(1), "drain");
        let mut state = EffectState::new();
        let mut messages = MessageCollector::new();
        modify_willpower(&ModifyWillpowerParams { amount: -100 }, &ctx, &mut state, &mut messages, &mut env);
        assert_eq!(env.entities.get(EntityId(1)).unwrap().current_willpower, 0);
    }
}
