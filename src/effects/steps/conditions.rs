//! `ApplyCondition`, `ApplyBrand`/`ApplyProperty`, and
//! `ApplyPrime`/`ApplyPrepare` steps (spec §4.6).

use crate::effects::context::{EffectContext, EffectState, MessageCollector, PipelineEnv};
use crate::effects::step::{ApplyItemPropertyParams, ApplyPrimeParams, ApplyConditionParams};
use crate::model::condition::{Condition, ItemProperty};

/// Instantiates a condition on the target, gated by `require_save_failed`
/// or `require_damage_dealt`. Replaces any existing condition with the
/// same `type_id` rather than stacking (spec §4.7).
pub fn apply_condition(
    params: &ApplyConditionParams,
    ctx: &EffectContext,
    state: &mut EffectState,
    messages: &mut MessageCollector,
    env: &mut PipelineEnv,
) {
    if params.require_save_failed && !state.save_failed {
        return;
    }
    if params.require_damage_dealt && state.damage_dealt <= 0 {
        return;
    }

    let Some(target) = env.entities.get_mut(ctx.target) else {
        messages.push("apply condition has no valid target", "gray");
        return;
    };

    let condition = Condition {
        type_id: params.type_id.clone(),
        display_name: params.display_name.clone(),
        remaining_duration: params.duration,
        dot: params.dot.clone(),
        source: ctx.caster,
    };
    target.conditions.insert(params.type_id.clone(), condition);
    state.success = true;
}

/// Attaches a time-bounded property to the caster's weapon in the named
/// equipment slot (spec §4.6 — `ApplyBrand` and `ApplyProperty` share
/// this contract).
pub fn apply_item_property(
    params: &ApplyItemPropertyParams,
    ctx: &EffectContext,
    messages: &mut MessageCollector,
    env: &mut PipelineEnv,
) {
    let Some(caster_id) = ctx.caster else {
        messages.push("apply item property has no caster", "gray");
        return;
    };
    let Some(caster) = env.entities.get_mut(caster_id) else {
        return;
    };
    caster.item_properties.insert(
        params.slot.clone(),
        ItemProperty {
            type_id: params.type_id.clone(),
            display_name: params.display_name.clone(),
            remaining_duration: params.duration,
            bonus_damage_dice: params.bonus_damage_dice,
            on_hit_condition: None,
        },
    );
}

/// Puts a "next attack" modifier condition on the caster. Re-applying
/// the same named prepare is a no-op with a user-visible message (spec
/// §4.6 — `ApplyPrime` and `ApplyPrepare` share this contract).
pub fn apply_prime(params: &ApplyPrimeParams, ctx: &EffectContext, messages: &mut MessageCollector, env: &mut PipelineEnv) {
    let Some(caster_id) = ctx.caster else {
        messages.push("apply prime has no caster", "gray");
        return;
    };
    let type_id = format!("prime:{}", params.name);
    let Some(caster) = env.entities.get_mut(caster_id) else {
        return;
    };

    if caster.conditions.contains_key(&type_id) {
        messages.push(format!("{} is already primed with {}", caster.name, params.name), "yellow");
        return;
    }

    caster.conditions.insert(
        type_id.clone(),
        Condition {
            type_id,
            display_name: params.name.clone(),
            remaining_duration: params.duration,
            dot: None,
            source: Some(caster_id),
        },
    );
}
