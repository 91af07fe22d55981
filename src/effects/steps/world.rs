//! `SpawnHazard` and `MagicMapping` steps (spec §4.6).

use crate::effects::context::{EffectContext, MessageCollector, PipelineEnv};
use crate::effects::step::{MagicMappingParams, SpawnHazardParams};

/// Creates a persistent tile hazard. Spec §6 names no dedicated hazard
/// storage interface among the host capabilities the core consumes, so
/// hazard persistence is the host's responsibility; this step validates
/// the declaration and narrates it to the message log — a host wiring a
/// `HazardSystem` of its own can observe the same narration.
pub fn spawn_hazard(params: &SpawnHazardParams, ctx: &EffectContext, messages: &mut MessageCollector) {
    let Some(pos) = ctx.target_position else {
        messages.push("spawn hazard has no target position", "gray");
        return;
    };
    messages.push(
        format!(
            "a {} hazard (radius {}, {} turns) forms at ({}, {})",
            params.hazard_type, params.radius, params.duration, pos.x, pos.y
        ),
        "orange",
    );
}

pub fn magic_mapping(params: &MagicMappingParams, ctx: &EffectContext, messages: &mut MessageCollector, env: &mut PipelineEnv) {
    let center = match ctx.target_position {
        Some(pos) => pos,
        None => match env.entities.get(ctx.target) {
            Some(target) => target.position,
            None => {
                messages.push("magic mapping has no valid center", "gray");
                return;
            }
        },
    };
    env.vision.reveal_area_as_explored(center, params.radius);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::DiceExpr;
    use crate::external::{CombatantRoster, NullObserver, NullProjectileSystem};
    use crate::model::{build_combatant, CreatureDefinition, DamageType, EntityId, Faction, GridPos};
    use crate::rng::LcgRng;

    struct NullMap;
    impl crate::external::MapSystem for NullMap {
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

    #[derive(Default)]
    struct RecordingVision {
        calls: Vec<(GridPos, i32)>,
    }
    impl crate::external::VisionSystem for RecordingVision {
        fn reveal_area_as_explored(&mut self, center: GridPos, radius: i32) {
            self.calls.push((center, radius));
        }
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

    #[test]
    fn spawn_hazard_narrates_type_radius_duration_and_position() {
        let ctx = EffectContext::new(EntityId(1), "flamestrike").with_target_position(GridPos::new(5, 5));
        let mut messages = MessageCollector::new();
        let params = SpawnHazardParams {
            hazard_type: "fire".into(),
            duration: 3,
            damage_dice: DiceExpr::parse("2d6").unwrap(),
            damage_type: DamageType::Fire,
            radius: 2,
        };
        spawn_hazard(&params, &ctx, &mut messages);

        let text = &messages.messages()[0].text;
        assert!(text.contains("fire"));
        assert!(text.contains("radius 2"));
        assert!(text.contains("3 turns"));
        assert!(text.contains("(5, 5)"));
    }

    #[test]
    fn spawn_hazard_without_a_target_position_reports_failure() {
        let ctx = EffectContext::new(EntityId(1), "flamestrike");
        let mut messages = MessageCollector::new();
        let params = SpawnHazardParams {
            hazard_type: "fire".into(),
            duration: 3,
            damage_dice: DiceExpr::parse("2d6").unwrap(),
            damage_type: DamageType::Fire,
            radius: 2,
        };
        spawn_hazard(&params, &ctx, &mut messages);
        assert!(messages.messages()[0].text.contains("no target position"));
    }

    #[test]
    fn magic_mapping_reveals_around_the_explicit_target_position() {
        let mut roster = CombatantRoster::new();
        roster.add(build_combatant(EntityId(1), &def(), Faction::Player, GridPos::new(0, 0)).unwrap());
        let map = NullMap;
        let mut vision = RecordingVision::default();
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

        let ctx = EffectContext::new(EntityId(1), "mapping").with_target_position(GridPos::new(8, 4));
        let mut messages = MessageCollector::new();
        let params = MagicMappingParams { radius: 10 };
        magic_mapping(&params, &ctx, &mut messages, &mut env);

        assert_eq!(vision.calls, vec![(GridPos::new(8, 4), 10)]);
    }

    #[test]
    fn magic_mapping_falls_back_to_the_targets_position() {
        let mut roster = CombatantRoster::new();
        roster.add(build_combatant(EntityId(1), &def(), Faction::Player, GridPos::new(3, 3)).unwrap());
        let map = NullMap;
        let mut vision = RecordingVision::default();
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

        let ctx = EffectContext::new(EntityId(1), "mapping");
        let mut messages = MessageCollector::new();
        let params = MagicMappingParams { radius: 5 };
        magic_mapping(&params, &ctx, &mut messages, &mut env);

        assert_eq!(vision.calls, vec![(GridPos::new(3, 3), 5)]);
    }
}
