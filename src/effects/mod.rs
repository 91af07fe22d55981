//! The composable effect pipeline: an ordered list of steps sharing a
//! mutable per-execution [`EffectState`] and a [`MessageCollector`]
//! (spec §4.6). Every higher-level action — spell, skill, item use,
//! monster ability — routes through a [`step::Pipeline`].

pub mod context;
pub mod step;
pub mod steps;

pub use context::{EffectContext, EffectState, EntityCursorGuard, Message, MessageCollector, PipelineEnv};
pub use step::{Pipeline, Step};
