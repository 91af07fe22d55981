//! The closed step enum and pipeline driver (spec §4.6, §9: "represent
//! steps as a tagged variant over a closed step enum with per-variant
//! parameters; the driver dispatches on the tag"). New steps are added
//! by extending the variant set, not by implementing a trait per step.

use crate::dice::DiceExpr;
use crate::model::{ConditionTypeId, DamageType, EntityId};

use super::context::{EffectContext, EffectState, MessageCollector, PipelineEnv};
use super::steps;

/// Which primary stat a step reads off a combatant, for save/attack/heal
/// scaling parameters that are configured data rather than hardcoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Strength,
    Agility,
    Endurance,
    Will,
}

#[derive(Debug, Clone)]
pub struct SaveCheckParams {
    pub save_stat: Option<StatKind>,
    pub modifier: i32,
    pub attack_stats: Vec<StatKind>,
    pub stop_on_success: bool,
    pub half_on_success: bool,
}

#[derive(Debug, Clone)]
pub struct AttackRollParams {
    pub melee: bool,
    pub stop_on_miss: bool,
}

#[derive(Debug, Clone)]
pub struct DamageParams {
    pub dice: Option<DiceExpr>,
    pub flat: i32,
    pub stat_scale: Option<(StatKind, f64)>,
    pub damage_type: DamageType,
    pub armor_piercing: bool,
    pub half_on_save: bool,
}

#[derive(Debug, Clone, Default)]
pub struct WeaponDamageParams {}

#[derive(Debug, Clone)]
pub struct HealParams {
    pub dice: Option<DiceExpr>,
    pub flat: i32,
    pub stat_scale: Option<(StatKind, f64)>,
    pub percent_of_max: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct HealCasterParams {
    pub fraction: f64,
}

#[derive(Debug, Clone)]
pub struct ApplyConditionParams {
    pub type_id: ConditionTypeId,
    pub display_name: String,
    pub duration: i32,
    pub require_save_failed: bool,
    pub require_damage_dealt: bool,
    pub dot: Option<crate::model::DotPayload>,
}

#[derive(Debug, Clone)]
pub struct ApplyItemPropertyParams {
    pub type_id: ConditionTypeId,
    pub display_name: String,
    pub duration: i32,
    pub slot: String,
    pub bonus_damage_dice: Option<DiceExpr>,
}

#[derive(Debug, Clone)]
pub struct ApplyPrimeParams {
    pub name: String,
    pub duration: i32,
    pub hit_bonus: i32,
    pub damage_bonus: i32,
    pub arc: bool,
}

#[derive(Debug, Clone)]
pub struct KnockbackParams {
    pub distance: i32,
    pub stat_scale: Option<(StatKind, f64)>,
    pub on_collision: Option<Box<Pipeline>>,
}

#[derive(Debug, Clone)]
pub struct BlinkParams {
    pub range: i32,
}

#[derive(Debug, Clone)]
pub struct TeleportParams {
    pub range: i32,
    pub teleport_companions: bool,
}

#[derive(Debug, Clone)]
pub struct MoveTilesParams {
    pub amount: i32,
}

#[derive(Debug, Clone)]
pub struct SpawnHazardParams {
    pub hazard_type: String,
    pub duration: i32,
    pub damage_dice: DiceExpr,
    pub damage_type: DamageType,
    pub radius: i32,
}

#[derive(Debug, Clone, Default)]
pub struct MagicMappingParams {
    pub radius: i32,
}

#[derive(Debug, Clone)]
pub struct ChainDamageParams {
    pub max_bounces: i32,
    pub bounce_range: i32,
    pub damage_falloff: f64,
    pub base_dice: DiceExpr,
    pub damage_type: DamageType,
}

#[derive(Debug, Clone, Default)]
pub struct CloneParams {}

#[derive(Debug, Clone, Default)]
pub struct CharmParams {}

#[derive(Debug, Clone)]
pub struct ModifyWillpowerParams {
    pub amount: i32,
}

/// A single operation inside a pipeline (spec glossary). Constructed
/// from a declarative `StepDefinition` by the host; this crate only
/// defines the runtime shape.
#[derive(Debug, Clone)]
pub enum Step {
    SaveCheck(SaveCheckParams),
    AttackRoll(AttackRollParams),
    Damage(DamageParams),
    WeaponDamage(WeaponDamageParams),
    Heal(HealParams),
    HealCaster(HealCasterParams),
    ApplyCondition(ApplyConditionParams),
    ApplyBrand(ApplyItemPropertyParams),
    ApplyProperty(ApplyItemPropertyParams),
    ApplyPrime(ApplyPrimeParams),
    ApplyPrepare(ApplyPrimeParams),
    Knockback(KnockbackParams),
    Blink(BlinkParams),
    Teleport(TeleportParams),
    MoveTiles(MoveTilesParams),
    SpawnHazard(SpawnHazardParams),
    MagicMapping(MagicMappingParams),
    ChainDamage(ChainDamageParams),
    Clone(CloneParams),
    Charm(CharmParams),
    ModifyWillpower(ModifyWillpowerParams),
}

impl Step {
    /// Dispatches this step against the shared state, context, and
    /// external environment. Steps that cannot proceed log a diagnostic
    /// and return without setting `success`; only a step that explicitly
    /// clears `state.keep_going` ends the pipeline early (spec §4.8).
    pub fn execute(
        &self,
        ctx: &EffectContext,
        state: &mut EffectState,
        messages: &mut MessageCollector,
        env: &mut PipelineEnv,
    ) {
        match self {
            Step::SaveCheck(p) => steps::checks::save_check(p, ctx, state, messages, env),
            Step::AttackRoll(p) => steps::checks::attack_roll(p, ctx, state, messages, env),
            Step::Damage(p) => steps::damage::damage(p, ctx, state, messages, env),
            Step::WeaponDamage(p) => steps::damage::weapon_damage(p, ctx, state, messages, env),
            Step::Heal(p) => steps::healing::heal(p, ctx, state, messages, env),
            Step::HealCaster(p) => steps::healing::heal_caster(p, ctx, state, messages, env),
            Step::ApplyCondition(p) => steps::conditions::apply_condition(p, ctx, state, messages, env),
            Step::ApplyBrand(p) => steps::conditions::apply_item_property(p, ctx, messages, env),
            Step::ApplyProperty(p) => steps::conditions::apply_item_property(p, ctx, messages, env),
            Step::ApplyPrime(p) => steps::conditions::apply_prime(p, ctx, messages, env),
            Step::ApplyPrepare(p) => steps::conditions::apply_prime(p, ctx, messages, env),
            Step::Knockback(p) => steps::movement::knockback(p, ctx, state, messages, env),
            Step::Blink(p) => steps::movement::blink(p, ctx, messages, env),
            Step::Teleport(p) => steps::movement::teleport(p, ctx, messages, env),
            Step::MoveTiles(p) => steps::movement::move_tiles(p, ctx, state, messages, env),
            Step::SpawnHazard(p) => steps::world::spawn_hazard(p, ctx, messages),
            Step::MagicMapping(p) => steps::world::magic_mapping(p, ctx, messages, env),
            Step::ChainDamage(p) => steps::damage::chain_damage(p, ctx, state, messages, env),
            Step::Clone(p) => steps::social::clone_entity(p, ctx, messages, env),
            Step::Charm(p) => steps::social::charm(p, ctx, state, messages, env),
            Step::ModifyWillpower(p) => steps::healing::modify_willpower(p, ctx, state, messages, env),
        }
    }
}

/// An ordered list of steps sharing one `EffectState` and one
/// `MessageCollector` (spec glossary). The driver honours
/// `state.keep_going`: the first step that clears it terminates the
/// pipeline early.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    pub steps: Vec<Step>,
}

impl Pipeline {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Runs every step in order against a fresh or caller-supplied
    /// `EffectState`, stopping early if a step clears `keep_going`.
    pub fn run(
        &self,
        ctx: &EffectContext,
        state: &mut EffectState,
        messages: &mut MessageCollector,
        env: &mut PipelineEnv,
    ) {
        for step in &self.steps {
            if !state.keep_going {
                break;
            }
            step.execute(ctx, state, messages, env);
        }
    }
}
