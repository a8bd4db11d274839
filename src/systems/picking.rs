use bevy_ecs::{
    entity::Entity,
    event::{EventReader, EventWriter},
    query::With,
    system::{Query, Res},
};
use glam::Vec3;
use tracing::trace;

use crate::{
    events::{GameCommand, GameEvent, InteractionEvent},
    scene::{projection::Camera, shape::Ray, shape::Shape},
    systems::{GameStage, Interactable, Transform},
};

/// Returns the candidate nearest to the ray origin that the ray hits, along with its distance.
///
/// Equal distances keep the earlier candidate.
pub fn pick<'a>(ray: &Ray, candidates: impl IntoIterator<Item = (Entity, Vec3, &'a Shape)>) -> Option<(Entity, f32)> {
    candidates
        .into_iter()
        .filter_map(|(entity, center, shape)| shape.intersect(center, ray).map(|distance| (entity, distance)))
        .fold(None, |nearest: Option<(Entity, f32)>, hit| match nearest {
            Some(best) if best.1 <= hit.1 => Some(best),
            _ => Some(hit),
        })
}

/// Casts the screen-center ray on every `Interact` command and reports the nearest interactable hit.
pub fn picking_system(
    mut events: EventReader<GameEvent>,
    stage: Res<GameStage>,
    camera: Res<Camera>,
    interactables: Query<(Entity, &Transform, &Shape), With<Interactable>>,
    mut writer: EventWriter<InteractionEvent>,
) {
    let clicks = events
        .read()
        .filter(|event| **event == GameEvent::Command(GameCommand::Interact))
        .count();
    if clicks == 0 || !stage.is_playing() {
        return;
    }

    let ray = camera.center_ray();
    let Some((entity, distance)) = pick(
        &ray,
        interactables
            .iter()
            .map(|(entity, transform, shape)| (entity, transform.translation, shape)),
    ) else {
        trace!(clicks, "Interaction hit nothing");
        return;
    };

    trace!(?entity, distance, clicks, "Interaction hit");
    for _ in 0..clicks {
        writer.write(InteractionEvent { entity, distance });
    }
}
