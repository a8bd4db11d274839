use bevy_ecs::system::RunSystemOnce;
use dreamwalk::systems::{format_run_time, run_timer_system, DeltaTime, RunTimer};
use speculoos::prelude::*;

mod common;

#[test]
fn test_timer_counts_only_while_running() {
    let mut timer = RunTimer::default();
    timer.tick(1.0);
    assert_that(&timer.millis()).is_equal_to(0);

    timer.start();
    timer.tick(0.25);
    timer.tick(0.25);
    assert_that(&timer.millis()).is_equal_to(500);

    timer.stop();
    timer.tick(1.0);
    assert_that(&timer.millis()).is_equal_to(500);
}

#[test]
fn test_timer_ignores_negative_delta() {
    let mut timer = RunTimer::default();
    timer.start();
    timer.tick(-1.0);
    assert_that(&timer.millis()).is_equal_to(0);
}

#[test]
fn test_timer_reset() {
    let mut timer = RunTimer::default();
    timer.start();
    timer.tick(2.0);
    timer.reset();

    assert_that(&timer.is_running()).is_false();
    assert_that(&timer.millis()).is_equal_to(0);
}

#[test]
fn test_run_timer_system() {
    let mut world = common::create_test_world();
    world.resource_mut::<RunTimer>().start();
    world.insert_resource(DeltaTime { seconds: 0.5 });

    world.run_system_once(run_timer_system).expect("System should run successfully");

    assert_that(&world.resource::<RunTimer>().millis()).is_equal_to(500);
}

#[test]
fn test_format_run_time() {
    assert_that(&format_run_time(0)).is_equal_to("00:00.000".to_string());
    assert_that(&format_run_time(62_345)).is_equal_to("01:02.345".to_string());
    assert_that(&format_run_time(59_999)).is_equal_to("00:59.999".to_string());
    // Minutes are not capped at two digits
    assert_that(&format_run_time(100 * 60_000 + 1)).is_equal_to("100:00.001".to_string());
}
