//! Per-execution pipeline context: identity ([`EffectContext`]), shared
//! mutable state ([`EffectState`]), output log ([`MessageCollector`]),
//! and the external-system bundle a step may reach into ([`PipelineEnv`]).
//!
//! `EffectContext` is kept separate from `PipelineEnv` deliberately:
//! the context is Copy-able per-execution identity (who's casting, who's
//! the target), while the env holds `&mut dyn Trait` references to
//! external systems. Mixing the two into one struct would force every
//! step to borrow the whole bundle mutably just to read `caster`, which
//! fights the borrow checker the moment a step also needs `entities`
//! mutably. Conditions reference participants by [`crate::model::EntityId`]
//! and look them up against `PipelineEnv::entities` rather than holding
//! a shared owning reference (spec §9).

use crate::external::{CombatObserver, EntityManager, MapSystem, ProjectileSystem, VisionSystem, VisualEffectSystem};
use crate::model::{EntityId, GridPos};
use crate::rng::CombatRng;

/// Per-pipeline-execution identity bundle (spec §3).
#[derive(Debug, Clone, Copy)]
pub struct EffectContext {
    pub caster: Option<EntityId>,
    pub target: EntityId,
    pub target_position: Option<GridPos>,
    /// Originating skill name, for message/event labeling.
    pub skill: &'static str,
}

impl EffectContext {
    pub fn new(target: EntityId, skill: &'static str) -> Self {
        Self {
            caster: None,
            target,
            target_position: None,
            skill,
        }
    }

    pub fn with_caster(mut self, caster: EntityId) -> Self {
        self.caster = Some(caster);
        self
    }

    pub fn with_target_position(mut self, pos: GridPos) -> Self {
        self.target_position = Some(pos);
        self
    }
}

/// Per-execution mutable record shared by all steps in one pipeline
/// (spec §3). A fresh `EffectState` is created per top-level pipeline
/// and per independently-scoped sub-pipeline, so a sub-pipeline's rolls
/// never leak into the outer state.
#[derive(Debug, Clone, Default)]
pub struct EffectState {
    pub success: bool,
    pub keep_going: bool,
    pub attack_hit: bool,
    pub attack_missed: bool,
    pub save_succeeded: bool,
    pub save_failed: bool,
    pub damage_dealt: i32,
}

impl EffectState {
    pub fn new() -> Self {
        Self {
            keep_going: true,
            ..Default::default()
        }
    }

    pub fn stop(&mut self) {
        self.keep_going = false;
    }
}

/// One entry in a [`MessageCollector`]'s log.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub entity: Option<EntityId>,
    pub text: String,
    pub color: &'static str,
}

/// An append-only, entity-tagged log of textual events (spec §3). Output
/// only; the combat core never reads from it for control flow.
#[derive(Debug, Clone, Default)]
pub struct MessageCollector {
    messages: Vec<Message>,
    current_entity: Option<EntityId>,
}

impl MessageCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, color: &'static str) {
        self.messages.push(Message {
            entity: self.current_entity,
            text: text.into(),
            color,
        });
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn current_entity(&self) -> Option<EntityId> {
        self.current_entity
    }

    /// Swaps `current_entity` for the duration of the returned guard,
    /// restoring the previous value when the guard drops (spec §9: a
    /// scoped acquisition with guaranteed release on all exit paths,
    /// used by sub-pipelines to group messages under the sub-target).
    pub fn scoped_entity(&mut self, entity: EntityId) -> EntityCursorGuard<'_> {
        let previous = self.current_entity;
        self.current_entity = Some(entity);
        EntityCursorGuard {
            collector: self,
            previous,
        }
    }
}

/// RAII guard restoring [`MessageCollector::current_entity`] on drop,
/// including on early return or panic unwinding from inside a sub-pipeline.
pub struct EntityCursorGuard<'a> {
    collector: &'a mut MessageCollector,
    previous: Option<EntityId>,
}

impl Drop for EntityCursorGuard<'_> {
    fn drop(&mut self) {
        self.collector.current_entity = self.previous;
    }
}

/// Bundle of external-system capabilities a step may call into (spec
/// §6). Held as trait-object references rather than owned so the
/// combat core never depends on a concrete renderer or pathfinder.
pub struct PipelineEnv<'a> {
    pub entities: &'a mut dyn EntityManager,
    pub map: &'a dyn MapSystem,
    pub vision: &'a mut dyn VisionSystem,
    pub projectiles: &'a mut dyn ProjectileSystem,
    /// Fire-and-forget visual side channel; absent for headless hosts
    /// (e.g. the Monte Carlo harness). The core never awaits it.
    pub visuals: Option<&'a mut dyn VisualEffectSystem>,
    pub observer: &'a mut dyn CombatObserver,
    pub rng: &'a mut dyn CombatRng,
}
