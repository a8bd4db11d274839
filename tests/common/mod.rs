#![allow(dead_code)]

use bevy_ecs::{
    entity::Entity,
    event::{Event, Events},
    world::World,
};
use dreamwalk::{
    events::{GameCommand, GameEvent, InteractionEvent},
    game,
    systems::{MemoryStore, ScoreStore},
};

/// A headless world with every game resource and event, backed by an empty in-memory leaderboard.
pub fn create_test_world() -> World {
    create_test_world_with_store(MemoryStore::default())
}

pub fn create_test_world_with_store(store: MemoryStore) -> World {
    let mut world = World::new();
    game::register_events(&mut world);
    let store: Box<dyn ScoreStore> = Box::new(store);
    game::insert_resources(&mut world, store);
    world
}

pub fn send_command(world: &mut World, command: GameCommand) {
    world.resource_mut::<Events<GameEvent>>().send(GameEvent::Command(command));
}

pub fn send_interaction(world: &mut World, entity: Entity) {
    world
        .resource_mut::<Events<InteractionEvent>>()
        .send(InteractionEvent { entity, distance: 1.0 });
}

/// Drops every pending event, as the end of a frame would after two updates.
pub fn clear_events(world: &mut World) {
    game::update_events(world);
    game::update_events(world);
}

/// Every event of type `T` still buffered in the world.
pub fn read_events<T: Event + Clone>(world: &World) -> Vec<T> {
    let events = world.resource::<Events<T>>();
    let mut cursor = events.get_cursor();
    cursor.read(events).cloned().collect()
}
