use bevy_ecs::system::RunSystemOnce;
use dreamwalk::systems::{boss_drift_system, BossDrift, DeltaTime, Transform};
use glam::Vec3;
use speculoos::prelude::*;

mod common;

#[test]
fn test_boss_drifts_toward_player() {
    let mut world = common::create_test_world();
    world.insert_resource(DeltaTime { seconds: 0.5 });
    let boss = world
        .spawn((BossDrift { speed: 1.2 }, Transform::at(Vec3::new(0.0, 1.5, -10.0))))
        .id();
    let still = world.spawn(Transform::at(Vec3::new(0.0, 1.0, -4.0))).id();

    world.run_system_once(boss_drift_system).expect("System should run successfully");

    let moved = world.get::<Transform>(boss).unwrap().translation;
    assert!(moved.abs_diff_eq(Vec3::new(0.0, 1.5, -9.4), 1e-5), "unexpected position {moved:?}");
    assert_that(&world.get::<Transform>(still).unwrap().translation).is_equal_to(Vec3::new(0.0, 1.0, -4.0));
}
