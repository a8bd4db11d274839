//! Scene layout: the floor, NPCs, fragments and the boss.

use bevy_ecs::entity::Entity;
use bevy_ecs::query::With;
use bevy_ecs::system::{Commands, Query};
use bevy_ecs::world::World;
use glam::Vec3;
use tracing::{debug, info};

use crate::constants::{boss, floor, fragment, npc};
use crate::systems::{
    BossDrift, BossHealth, Dialogue, DialogueBox, Interactable, InteractionFlags, Material, Renderable, SceneObject,
    Transform,
};

use self::shape::Shape;

pub mod projection;
pub mod shape;

/// Render layer for the floor; always drawn beneath everything else.
pub const FLOOR_LAYER: u8 = 0;
/// Render layer for objects standing on the floor.
pub const OBJECT_LAYER: u8 = 1;

/// Spawns the floor, every NPC and every fragment.
pub fn spawn_scene(commands: &mut Commands) {
    commands.spawn((
        SceneObject,
        Transform::at(Vec3::ZERO),
        Shape::Plane {
            half_size: floor::HALF_SIZE,
            tiles: floor::TILES,
        },
        Material { color: floor::COLOR },
        Renderable::new(FLOOR_LAYER),
    ));

    for (x, z, line) in npc::PLACEMENTS {
        let entity = commands
            .spawn((
                SceneObject,
                Transform::at(Vec3::new(x, npc::CENTER_Y, z)),
                Shape::cuboid(npc::SIZE),
                Material { color: npc::COLOR },
                Renderable::new(OBJECT_LAYER),
                Interactable(InteractionFlags::DIALOGUE),
                Dialogue(line.to_string()),
            ))
            .id();
        debug!(?entity, x, z, "Spawned NPC");
    }

    for (x, z) in fragment::PLACEMENTS {
        let entity = commands
            .spawn((
                SceneObject,
                Transform::at(Vec3::new(x, fragment::CENTER_Y, z)),
                Shape::Sphere {
                    radius: fragment::RADIUS,
                },
                Material { color: fragment::COLOR },
                Renderable::new(OBJECT_LAYER),
                Interactable(InteractionFlags::FRAGMENT),
            ))
            .id();
        debug!(?entity, x, z, "Spawned fragment");
    }

    info!(
        npcs = npc::PLACEMENTS.len(),
        fragments = fragment::PLACEMENTS.len(),
        "Scene spawned"
    );
}

/// Spawns the boss and announces it.
pub fn spawn_boss(commands: &mut Commands, dialogue: &mut DialogueBox) -> Entity {
    let entity = commands
        .spawn((
            SceneObject,
            Transform::at(boss::SPAWN),
            Shape::cuboid(boss::SIZE),
            Material { color: boss::COLOR },
            Renderable::new(OBJECT_LAYER),
            Interactable(InteractionFlags::BOSS),
            BossHealth(boss::HEALTH),
            BossDrift {
                speed: boss::DRIFT_SPEED,
            },
        ))
        .id();

    dialogue.show(boss::ARRIVAL_LINE);
    info!(?entity, health = boss::HEALTH, "Boss spawned");
    entity
}

/// Despawns everything [`spawn_scene`] and [`spawn_boss`] created.
pub fn clear_scene(commands: &mut Commands, objects: &Query<Entity, With<SceneObject>>) {
    let mut count = 0usize;
    for entity in objects.iter() {
        commands.entity(entity).despawn();
        count += 1;
    }
    debug!(count, "Cleared scene");
}

/// Spawns the scene directly into a world, outside of any system.
pub fn spawn_scene_in(world: &mut World) {
    {
        let mut commands = world.commands();
        spawn_scene(&mut commands);
    }
    world.flush();
}
