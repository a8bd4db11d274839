use bevy_ecs::{component::Component, resource::Resource};
use bitflags::bitflags;
use glam::Vec3;
use sdl2::pixels::Color;

/// Marks every entity that belongs to a run, so the whole scene can be cleared between runs.
#[derive(Default, Component, Debug, Clone, Copy)]
pub struct SceneObject;

/// World-space position of an entity's center.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
}

impl Transform {
    pub fn at(translation: Vec3) -> Self {
        Self { translation }
    }
}

/// Flat surface color, before lighting and fog.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
}

/// A component for entities drawn by the 3D renderer, with a layer for ordering.
///
/// Lower layers are drawn first; within a layer faces are sorted far to near.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderable {
    pub layer: u8,
}

impl Renderable {
    pub fn new(layer: u8) -> Self {
        Self { layer }
    }
}

bitflags! {
    /// What happens when the player clicks on an entity. Several flags may be set at once.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct InteractionFlags: u8 {
        /// Shows the entity's [`Dialogue`].
        const DIALOGUE = 1 << 0;
        /// Collected on click.
        const FRAGMENT = 1 << 1;
        /// Loses one [`BossHealth`] per click.
        const BOSS = 1 << 2;
    }
}

/// A component for entities the center ray can hit.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interactable(pub InteractionFlags);

/// A line of dialogue spoken when the entity is clicked.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Dialogue(pub String);

/// Remaining clicks before the boss is defeated.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossHealth(pub u32);

/// Moves the entity toward +Z at a constant speed, in units per second.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BossDrift {
    pub speed: f32,
}

/// Fragments collected in the current run.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FragmentCount(pub u32);

#[derive(Resource, Debug, Default)]
pub struct GlobalState {
    pub exit: bool,
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct DeltaTime {
    /// Time since the previous frame, in seconds.
    pub seconds: f32,
}
