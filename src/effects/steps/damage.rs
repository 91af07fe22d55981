//! `Damage`, `WeaponDamage`, and `ChainDamage` steps (spec §4.6 table,
//! rows 3-4 and the chain-lightning row).

use crate::combat::damage::apply_typed_damage;
use crate::effects::context::{EffectContext, EffectState, MessageCollector, PipelineEnv};
use crate::effects::step::{ChainDamageParams, DamageParams, WeaponDamageParams};
use crate::external::CombatEvent;
use crate::model::EntityId;

use super::stat_value;

pub fn damage(
    params: &DamageParams,
    ctx: &EffectContext,
    state: &mut EffectState,
    messages: &mut MessageCollector,
    env: &mut PipelineEnv,
) {
    let caster_stat_bonus = match (params.stat_scale, ctx.caster.and_then(|id| env.entities.get(id))) {
        (Some((stat, multiplier)), Some(caster)) => (stat_value(caster, stat) as f64 * multiplier) as i32,
        _ => 0,
    };

    let mut amount = params.flat + caster_stat_bonus;
    if let Some(dice) = params.dice {
        amount += dice.roll(env.rng);
    }

    if params.half_on_save && state.save_succeeded {
        amount /= 2;
    }

    let Some(target) = env.entities.get(ctx.target) else {
        messages.push("damage step has no valid target", "gray");
        return;
    };
    let amount = if params.armor_piercing {
        amount.max(0)
    } else {
        (amount - target.armor).max(0)
    };

    let Some(target) = env.entities.get_mut(ctx.target) else {
        return;
    };
    let dealt = apply_typed_damage(target, amount, params.damage_type);

    if dealt > 0 {
        state.damage_dealt += dealt;
        state.success = true;
    }
}

pub fn weapon_damage(
    _params: &WeaponDamageParams,
    ctx: &EffectContext,
    state: &mut EffectState,
    messages: &mut MessageCollector,
    env: &mut PipelineEnv,
) {
    if state.attack_missed {
        return;
    }
    let Some(caster_id) = ctx.caster else {
        messages.push("weapon damage has no caster", "gray");
        return;
    };
    let Some(caster) = env.entities.get(caster_id) else {
        return;
    };
    let Some(attack) = caster.first_melee_attack().cloned() else {
        messages.push(format!("{} has no melee weapon available", caster.name), "gray");
        return;
    };
    let str_bonus = attack.capped_str_bonus(caster.strength);

    let Some(target) = env.entities.get(ctx.target) else {
        return;
    };
    let raw = (attack.dice.roll(env.rng) + str_bonus - target.armor).max(0);

    let Some(target) = env.entities.get_mut(ctx.target) else {
        return;
    };
    let dealt = apply_typed_damage(target, raw, attack.damage_type);

    if dealt > 0 {
        state.damage_dealt += dealt;
        state.success = true;
        env.observer.on_event(&CombatEvent::AttackHit {
            attacker: caster_id,
            target: ctx.target,
            amount: dealt,
        });
    } else {
        env.observer.on_event(&CombatEvent::AttackBlocked {
            attacker: caster_id,
            target: ctx.target,
        });
    }
}

/// Lightning-style chain: starts at `ctx.target`, repeatedly finds the
/// nearest not-yet-hit hostile within Chebyshev `bounce_range`, hitting
/// at most `max_bounces` targets total, multiplying damage by
/// `damage_falloff` per hop (floored to at least 1, spec §4.6).
pub fn chain_damage(
    params: &ChainDamageParams,
    ctx: &EffectContext,
    state: &mut EffectState,
    messages: &mut MessageCollector,
    env: &mut PipelineEnv,
) {
    let caster_faction = match ctx.caster.and_then(|id| env.entities.get(id)) {
        Some(c) => c.faction,
        None => {
            messages.push("chain damage has no caster", "gray");
            return;
        }
    };

    let mut hit: Vec<EntityId> = Vec::new();
    let mut current = ctx.target;
    let mut hop = 0i32;

    loop {
        let Some(current_combatant) = env.entities.get(current) else {
            break;
        };
        let current_pos = current_combatant.position;

        let raw = params.base_dice.roll(env.rng);
        let falloff = params.damage_falloff.powi(hop);
        let amount = ((raw as f64 * falloff).floor() as i32).max(1);

        if let Some(target) = env.entities.get_mut(current) {
            let dealt = apply_typed_damage(target, amount, params.damage_type);
            state.damage_dealt += dealt;
            if dealt > 0 {
                state.success = true;
            }
        }
        hit.push(current);

        if hit.len() as i32 >= params.max_bounces {
            break;
        }

        let next = env
            .entities
            .all_ids()
            .into_iter()
            .filter(|id| !hit.contains(id))
            .filter_map(|id| env.entities.get(id).map(|c| (id, c)))
            .filter(|(_, c)| c.is_alive() && caster_faction.is_hostile_to(c.faction))
            .map(|(id, c)| (id, current_pos.chebyshev_distance(c.position)))
            .filter(|(_, dist)| *dist <= params.bounce_range)
            .min_by_key(|(_, dist)| *dist);

        match next {
            Some((id, _)) => {
                current = id;
                hop += 1;
            }
            None => break,
        }
    }
}
