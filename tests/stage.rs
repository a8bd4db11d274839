use bevy_ecs::{entity::Entity, query::With, system::RunSystemOnce, world::World};
use dreamwalk::events::GameCommand;
use dreamwalk::scene::projection::Camera;
use dreamwalk::systems::{
    handle_pause_command, stage_system, DialogueBox, FragmentCount, GameMode, GameStage, PauseState, RunTimer,
    SceneObject,
};
use speculoos::prelude::*;

mod common;

fn scene_objects(world: &mut World) -> usize {
    let mut query = world.query_filtered::<Entity, With<SceneObject>>();
    query.iter(world).count()
}

fn run_command(world: &mut World, command: GameCommand) {
    common::clear_events(world);
    common::send_command(world, command);
    world.run_system_once(stage_system).expect("System should run successfully");
}

#[test]
fn test_selecting_mode_starts_run() {
    let mut world = common::create_test_world();
    world.resource_mut::<Camera>().yaw = 1.0;
    world.resource_mut::<FragmentCount>().0 = 2;
    world.resource_mut::<DialogueBox>().show("left over");

    run_command(&mut world, GameCommand::SelectMode(GameMode::Practice));

    assert_that(&*world.resource::<GameStage>()).is_equal_to(GameStage::Playing {
        mode: GameMode::Practice,
    });
    // Floor, three NPCs and three fragments
    assert_that(&scene_objects(&mut world)).is_equal_to(7);
    assert_that(&*world.resource::<Camera>()).is_equal_to(Camera::default());
    assert_that(&world.resource::<FragmentCount>().0).is_equal_to(0);
    assert_that(&world.resource::<DialogueBox>().text()).is_none();
    assert_that(&world.resource::<RunTimer>().is_running()).is_false();
}

#[test]
fn test_speedrun_starts_clock() {
    let mut world = common::create_test_world();
    run_command(&mut world, GameCommand::SelectMode(GameMode::Speedrun));

    let timer = *world.resource::<RunTimer>();
    assert_that(&timer.is_running()).is_true();
    assert_that(&timer.millis()).is_equal_to(0);
}

#[test]
fn test_mode_selection_ignored_during_run() {
    let mut world = common::create_test_world();
    run_command(&mut world, GameCommand::SelectMode(GameMode::Practice));
    run_command(&mut world, GameCommand::SelectMode(GameMode::Speedrun));

    assert_that(&*world.resource::<GameStage>()).is_equal_to(GameStage::Playing {
        mode: GameMode::Practice,
    });
}

#[test]
fn test_restart_returns_to_mode_select() {
    let mut world = common::create_test_world();
    run_command(&mut world, GameCommand::SelectMode(GameMode::Speedrun));
    world.insert_resource(PauseState::Active);

    run_command(&mut world, GameCommand::Restart);

    assert_that(&*world.resource::<GameStage>()).is_equal_to(GameStage::ModeSelect);
    assert_that(&*world.resource::<PauseState>()).is_equal_to(PauseState::Inactive);
    assert_that(&world.resource::<RunTimer>().is_running()).is_false();
}

#[test]
fn test_new_run_replaces_previous_scene() {
    let mut world = common::create_test_world();
    run_command(&mut world, GameCommand::SelectMode(GameMode::Practice));
    run_command(&mut world, GameCommand::Restart);
    run_command(&mut world, GameCommand::SelectMode(GameMode::Practice));

    assert_that(&scene_objects(&mut world)).is_equal_to(7);
}

#[test]
fn test_end_screen_confirm_returns_to_mode_select() {
    let mut world = common::create_test_world();
    world.insert_resource(GameStage::Ended {
        mode: GameMode::Speedrun,
    });

    run_command(&mut world, GameCommand::SelectMode(GameMode::Practice));
    assert_that(&world.resource::<GameStage>().is_playing()).is_false();

    run_command(&mut world, GameCommand::Confirm);
    assert_that(&*world.resource::<GameStage>()).is_equal_to(GameStage::ModeSelect);
}

#[test]
fn test_pause_toggles_in_practice() {
    let mut world = common::create_test_world();
    world.insert_resource(GameStage::Playing {
        mode: GameMode::Practice,
    });

    common::send_command(&mut world, GameCommand::TogglePause);
    world.run_system_once(handle_pause_command).expect("System should run successfully");
    assert_that(&*world.resource::<PauseState>()).is_equal_to(PauseState::Active);

    common::clear_events(&mut world);
    common::send_command(&mut world, GameCommand::TogglePause);
    world.run_system_once(handle_pause_command).expect("System should run successfully");
    assert_that(&*world.resource::<PauseState>()).is_equal_to(PauseState::Inactive);
}

#[test]
fn test_pause_unavailable_in_speedrun_and_menus() {
    for stage in [
        GameStage::Playing {
            mode: GameMode::Speedrun,
        },
        GameStage::ModeSelect,
    ] {
        let mut world = common::create_test_world();
        world.insert_resource(stage);

        common::send_command(&mut world, GameCommand::TogglePause);
        world.run_system_once(handle_pause_command).expect("System should run successfully");

        assert_that(&*world.resource::<PauseState>()).is_equal_to(PauseState::Inactive);
    }
}

#[test]
fn test_mode_flags() {
    assert_that(&GameMode::from_flag("--practice")).is_equal_to(Some(GameMode::Practice));
    assert_that(&GameMode::from_flag("--speedrun")).is_equal_to(Some(GameMode::Speedrun));
    assert_that(&GameMode::from_flag("--fast")).is_none();
    assert_that(&GameMode::Speedrun.is_timed()).is_true();
    assert_that(&GameMode::Practice.is_timed()).is_false();
}

#[test]
fn test_end_screen_restart_returns_to_mode_select() {
    let mut world = common::create_test_world();
    world.insert_resource(GameStage::Ended {
        mode: GameMode::Practice,
    });

    run_command(&mut world, GameCommand::Restart);

    assert_that(&*world.resource::<GameStage>()).is_equal_to(GameStage::ModeSelect);
}
