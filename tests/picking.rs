use bevy_ecs::{entity::Entity, event::Events, system::RunSystemOnce, world::World};
use dreamwalk::events::{GameCommand, GameEvent, InteractionEvent};
use dreamwalk::game;
use dreamwalk::scene::{projection::Camera, shape::Shape};
use dreamwalk::systems::{
    pick, picking_system, process_simple_input_events, Bindings, GameMode, GameStage, HeldKeys, Interactable,
    InteractionFlags, LookDelta, PauseState, PointerLock, SimpleInputEvent, Transform,
};
use glam::{IVec2, Vec3};
use speculoos::prelude::*;

mod common;

fn spawn_target(world: &mut World, z: f32) -> Entity {
    world
        .spawn((
            Transform::at(Vec3::new(0.0, 1.6, z)),
            Shape::Sphere { radius: 0.5 },
            Interactable(InteractionFlags::FRAGMENT),
        ))
        .id()
}

#[test]
fn test_pick_returns_nearest_hit() {
    let mut world = World::new();
    let near = world.spawn_empty().id();
    let far = world.spawn_empty().id();
    let off_axis = world.spawn_empty().id();

    let sphere = Shape::Sphere { radius: 0.5 };
    let ray = Camera::default().center_ray();
    let candidates = [
        (far, Vec3::new(0.0, 1.6, -9.0), &sphere),
        (off_axis, Vec3::new(4.0, 1.6, -2.0), &sphere),
        (near, Vec3::new(0.0, 1.6, -4.0), &sphere),
    ];

    let (entity, distance) = pick(&ray, candidates).expect("ray should hit a sphere");
    assert_that(&entity).is_equal_to(near);
    assert!((distance - 3.5).abs() < 1e-4, "unexpected distance {distance}");
}

#[test]
fn test_pick_tie_keeps_first_candidate() {
    let mut world = World::new();
    let first = world.spawn_empty().id();
    let second = world.spawn_empty().id();

    let sphere = Shape::Sphere { radius: 0.5 };
    let center = Vec3::new(0.0, 1.6, -4.0);
    let ray = Camera::default().center_ray();

    let hit = pick(&ray, [(first, center, &sphere), (second, center, &sphere)]);
    assert_that(&hit.map(|(entity, _)| entity)).is_equal_to(Some(first));
}

#[test]
fn test_pick_nothing_hit() {
    let mut world = World::new();
    let entity = world.spawn_empty().id();
    let sphere = Shape::Sphere { radius: 0.5 };
    let ray = Camera::default().center_ray();

    // Directly behind the camera
    assert_that(&pick(&ray, [(entity, Vec3::new(0.0, 1.6, 4.0), &sphere)])).is_none();
}

#[test]
fn test_picking_system_reports_nearest_interactable() {
    let mut world = common::create_test_world();
    world.insert_resource(GameStage::Playing {
        mode: GameMode::Practice,
    });
    let near = spawn_target(&mut world, -5.0);
    spawn_target(&mut world, -8.0);
    // Not interactable, so it does not block the ray
    world.spawn((Transform::at(Vec3::new(0.0, 1.6, -2.0)), Shape::cuboid(Vec3::ONE)));

    common::send_command(&mut world, GameCommand::Interact);
    world.run_system_once(picking_system).expect("System should run successfully");

    let events = common::read_events::<InteractionEvent>(&world);
    assert_that(&events.len()).is_equal_to(1);
    assert_that(&events[0].entity).is_equal_to(near);
}

#[test]
fn test_picking_system_one_event_per_click() {
    let mut world = common::create_test_world();
    world.insert_resource(GameStage::Playing {
        mode: GameMode::Speedrun,
    });
    spawn_target(&mut world, -5.0);

    common::send_command(&mut world, GameCommand::Interact);
    common::send_command(&mut world, GameCommand::Interact);
    world.run_system_once(picking_system).expect("System should run successfully");

    assert_that(&common::read_events::<InteractionEvent>(&world).len()).is_equal_to(2);
}

#[test]
fn test_picking_system_idle_outside_run() {
    let mut world = common::create_test_world();
    spawn_target(&mut world, -5.0);

    common::send_command(&mut world, GameCommand::Interact);
    world.run_system_once(picking_system).expect("System should run successfully");

    assert_that(&common::read_events::<InteractionEvent>(&world).is_empty()).is_true();
}

#[test]
fn test_click_while_paused_does_not_interact_after_resume() {
    let mut world = common::create_test_world();
    let stage = GameStage::Playing {
        mode: GameMode::Practice,
    };
    world.insert_resource(stage);
    world.insert_resource(PauseState::Active);
    spawn_target(&mut world, -5.0);

    let emitted = process_simple_input_events(
        &Bindings::default(),
        &mut HeldKeys::default(),
        &mut LookDelta::default(),
        stage,
        PointerLock { locked: true },
        PauseState::Active,
        &[SimpleInputEvent::Click(IVec2::new(480, 270))],
    );
    for event in emitted {
        world.resource_mut::<Events<GameEvent>>().send(event);
    }

    // The paused frame ends, then the player resumes
    game::update_events(&mut world);
    world.insert_resource(PauseState::Inactive);
    world.run_system_once(picking_system).expect("System should run successfully");

    assert_that(&common::read_events::<InteractionEvent>(&world).is_empty()).is_true();
}
