//! `SaveCheck` and `AttackRoll` steps (spec §4.6 table, rows 1-2).

use crate::combat::resolve::opposed_roll;
use crate::effects::context::{EffectContext, EffectState, MessageCollector, PipelineEnv};
use crate::effects::step::{AttackRollParams, SaveCheckParams};

use super::stat_value;

pub fn save_check(
    params: &SaveCheckParams,
    ctx: &EffectContext,
    state: &mut EffectState,
    messages: &mut MessageCollector,
    env: &mut PipelineEnv,
) {
    let Some(save_stat) = params.save_stat else {
        // Missing saveStat means automatic fail: the effect always lands.
        state.save_failed = true;
        state.save_succeeded = false;
        return;
    };

    let Some(target) = env.entities.get(ctx.target) else {
        messages.push("save check has no valid target", "gray");
        return;
    };
    let defender_bonus = stat_value(target, save_stat) + params.modifier;

    let attacker_bonus = match ctx.caster.and_then(|id| env.entities.get(id)) {
        Some(caster) if !params.attack_stats.is_empty() => {
            let sum: i32 = params.attack_stats.iter().map(|s| stat_value(caster, *s)).sum();
            sum / params.attack_stats.len() as i32
        }
        _ => 0,
    };

    let (_, _, attacker_wins) = opposed_roll(attacker_bonus, defender_bonus, false, env.rng);

    if attacker_wins {
        state.save_failed = true;
        state.save_succeeded = false;
    } else {
        state.save_succeeded = true;
        state.save_failed = false;
        if params.stop_on_success {
            state.stop();
        }
    }
}

pub fn attack_roll(
    params: &AttackRollParams,
    ctx: &EffectContext,
    state: &mut EffectState,
    messages: &mut MessageCollector,
    env: &mut PipelineEnv,
) {
    let (Some(caster_id), target_id) = (ctx.caster, ctx.target) else {
        messages.push("attack roll has no caster", "gray");
        return;
    };
    let Some(caster) = env.entities.get(caster_id) else {
        messages.push("attack roll caster not found", "gray");
        return;
    };
    let Some(target) = env.entities.get(target_id) else {
        messages.push("attack roll target not found", "gray");
        return;
    };

    let attacker_bonus = caster.attack_modifier(params.melee);
    let defender_bonus = target.defense_modifier();
    let (_, _, hit) = opposed_roll(attacker_bonus, defender_bonus, true, env.rng);

    if hit {
        state.attack_hit = true;
        state.attack_missed = false;
    } else {
        state.attack_hit = false;
        state.attack_missed = true;
        if params.stop_on_miss {
            state.stop();
        }
    }
}
