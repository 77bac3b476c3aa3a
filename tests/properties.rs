//! Property tests for the scene simulations

use metal_lab::sim::alloys::{ALLOY_BOUNDS, MAX_CARBON_PERCENT};
use metal_lab::sim::hammer::{HAMMER_BOUNDS, HammerPhase};
use metal_lab::sim::sea::{COOL_SPEED_LIMIT, HOT_SPEED_LIMIT, SEA_REGION};
use metal_lab::sim::wire::WIRE_BOUNDS;
use metal_lab::sim::{AlloyScene, HammerScene, SeaScene, WireScene};
use proptest::prelude::*;

const SPEED_EPSILON: f32 = 1e-3;

/// Split `total` seconds into steps proportional to `weights`
fn split_steps(total: f32, weights: &[f32]) -> Vec<f32> {
    let sum: f32 = weights.iter().sum();
    weights.iter().map(|w| total * w / sum).collect()
}

proptest! {
    #[test]
    fn reset_places_particles_in_bounds(seed in any::<u64>(), warmup in 0.0f32..5.0) {
        let mut sea = SeaScene::new(seed);
        sea.update(warmup);
        sea.reset();
        prop_assert!(sea.electrons.iter().all(|e| SEA_REGION.contains(e.pos)));

        let mut wire = WireScene::new(seed);
        wire.set_voltage(true);
        wire.update(warmup);
        wire.reset();
        prop_assert!(wire.electrons.iter().all(|e| WIRE_BOUNDS.contains(e.pos)));

        let mut hammer = HammerScene::new();
        hammer.update(warmup);
        hammer.reset();
        prop_assert!(hammer.ions.iter().all(|i| HAMMER_BOUNDS.contains(i.pos)));

        let mut alloys = AlloyScene::new(seed);
        alloys.set_carbon_percent(MAX_CARBON_PERCENT);
        alloys.reset();
        prop_assert!(alloys.ions.iter().all(|i| ALLOY_BOUNDS.contains(i.pos)));
        prop_assert!(alloys.fragments.is_empty());
    }

    #[test]
    fn sea_speed_is_clamped(
        seed in any::<u64>(),
        heating in any::<bool>(),
        steps in prop::collection::vec(0.0f32..0.5, 1..120),
    ) {
        let mut sea = SeaScene::new(seed);
        sea.set_heating(heating);
        for dt in steps {
            sea.update(dt);
            for e in &sea.electrons {
                let limit = sea.speed_limit_at(e.pos);
                prop_assert!(e.vel.length() <= limit + SPEED_EPSILON);
                prop_assert!(e.vel.length() <= HOT_SPEED_LIMIT + SPEED_EPSILON);
                if !heating && sea.heat_front() == 0.0 {
                    prop_assert!(e.vel.length() <= COOL_SPEED_LIMIT + SPEED_EPSILON);
                }
                prop_assert!(SEA_REGION.contains(e.pos));
            }
        }
    }

    #[test]
    fn wire_electrons_stay_in_wire(
        seed in any::<u64>(),
        steps in prop::collection::vec(0.0f32..0.5, 1..120),
    ) {
        let mut wire = WireScene::new(seed);
        wire.set_voltage(true);
        for dt in steps {
            wire.update(dt);
        }
        prop_assert!(wire.electrons.iter().all(|e| WIRE_BOUNDS.contains(e.pos)));
    }

    #[test]
    fn hammer_accumulators_stay_clamped(steps in prop::collection::vec(0.0f32..1.0, 1..200)) {
        let mut hammer = HammerScene::new();
        for dt in steps {
            hammer.update(dt);
            prop_assert!((0.0..=1.1).contains(&hammer.flatten_amount));
            prop_assert!((0.0..=1.0).contains(&hammer.compaction_level));
            prop_assert!(hammer.ions.iter().all(|i| HAMMER_BOUNDS.contains(i.pos)));
        }
    }

    #[test]
    fn hammer_phase_independent_of_step_size(
        to_strike in prop::collection::vec(0.01f32..1.0, 1..40),
        to_idle in prop::collection::vec(0.01f32..1.0, 1..40),
    ) {
        let mut hammer = HammerScene::new();
        for dt in split_steps(2.5, &to_strike) {
            hammer.update(dt);
        }
        prop_assert_eq!(hammer.phase, HammerPhase::Strike);

        for dt in split_steps(4.8, &to_idle) {
            hammer.update(dt);
        }
        prop_assert_eq!(hammer.phase, HammerPhase::Idle);
        prop_assert_eq!(hammer.flatten_amount, 0.0);
    }

    #[test]
    fn carbon_count_bounded_by_sites(seed in any::<u64>(), percent in -5.0f32..5.0) {
        let mut alloys = AlloyScene::new(seed);
        alloys.set_carbon_percent(percent);
        prop_assert!(alloys.carbon.len() <= alloys.sites.len());
        prop_assert!(alloys.carbon.len() <= alloys.max_carbon_count());
        prop_assert!((0.0..=MAX_CARBON_PERCENT).contains(&alloys.carbon_percent()));
    }

    #[test]
    fn fragments_stay_in_bounds(
        seed in any::<u64>(),
        steps in prop::collection::vec(0.0f32..0.2, 1..150),
    ) {
        let mut alloys = AlloyScene::new(seed);
        alloys.trigger_impact();
        for dt in steps {
            alloys.update(dt);
            prop_assert!(alloys.fragments.iter().all(|f| ALLOY_BOUNDS.contains(f.pos)));
            prop_assert!(alloys.fragments.iter().all(|f| f.life > 0.0));
        }
    }
}
