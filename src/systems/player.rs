use bevy_ecs::{
    event::EventReader,
    resource::Resource,
    system::{Local, NonSend, NonSendMut, Res, ResMut},
};
use glam::Vec2;
use sdl2::{
    keyboard::Scancode,
    mouse::MouseUtil,
    render::Canvas,
    video::{FullscreenType, Window},
};
use tracing::{debug, info, warn};

use crate::{
    constants::player::{LOOK_SENSITIVITY, SPEED},
    events::{GameCommand, GameEvent},
    scene::projection::Camera,
    systems::{DeltaTime, GameStage, GlobalState, HeldKeys, LookDelta, PauseState},
};

const FORWARD_KEYS: [Scancode; 2] = [Scancode::W, Scancode::Up];
const BACKWARD_KEYS: [Scancode; 2] = [Scancode::S, Scancode::Down];
const LEFT_KEYS: [Scancode; 2] = [Scancode::A, Scancode::Left];
const RIGHT_KEYS: [Scancode; 2] = [Scancode::D, Scancode::Right];

/// Whether the mouse is captured for looking around.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PointerLock {
    pub locked: bool,
}

/// Handles commands that affect the player and the window rather than the run.
pub fn player_control_system(
    mut events: EventReader<GameEvent>,
    stage: Res<GameStage>,
    mut state: ResMut<GlobalState>,
    mut pointer: ResMut<PointerLock>,
    mut look: ResMut<LookDelta>,
) {
    for event in events.read() {
        let GameEvent::Command(command) = *event;
        match command {
            GameCommand::Exit => {
                state.exit = true;
            }
            GameCommand::LockPointer if stage.is_playing() => {
                pointer.locked = true;
            }
            GameCommand::UnlockPointer => {
                pointer.locked = false;
                look.0 = Vec2::ZERO;
            }
            _ => {}
        }
    }

    // The pointer is only ever captured during a run
    if pointer.locked && !stage.is_playing() {
        pointer.locked = false;
        look.0 = Vec2::ZERO;
    }
}

/// Movement intent from held keys: `x` is strafing to the right, `y` is forward.
///
/// Each axis is independent, so diagonal movement is faster than straight movement.
pub fn movement_intent(held: &HeldKeys) -> Vec2 {
    let axis = |positive: &[Scancode], negative: &[Scancode]| {
        let mut value = 0.0;
        if held.any_held(positive) {
            value += 1.0;
        }
        if held.any_held(negative) {
            value -= 1.0;
        }
        value
    };

    Vec2::new(axis(&RIGHT_KEYS, &LEFT_KEYS), axis(&FORWARD_KEYS, &BACKWARD_KEYS))
}

/// Turns the camera by the pointer motion gathered this frame.
///
/// Motion gathered while paused is discarded rather than applied on resume.
pub fn player_look_system(
    pointer: Res<PointerLock>,
    pause: Res<PauseState>,
    mut look: ResMut<LookDelta>,
    mut camera: ResMut<Camera>,
) {
    let delta = std::mem::take(&mut look.0);
    if !pointer.locked || pause.active() || delta == Vec2::ZERO {
        return;
    }

    camera.rotate(delta, LOOK_SENSITIVITY);
}

/// Walks the camera across the floor plane, whether or not the pointer is captured.
pub fn player_movement_system(held: Res<HeldKeys>, delta_time: Res<DeltaTime>, mut camera: ResMut<Camera>) {
    let intent = movement_intent(&held);
    if intent == Vec2::ZERO {
        return;
    }

    let distance = SPEED * delta_time.seconds;
    camera.move_forward(intent.y * distance);
    camera.move_right(intent.x * distance);
}

/// Applies the [`PointerLock`] resource to SDL's relative mouse mode.
pub fn pointer_capture_system(pointer: Res<PointerLock>, mouse: NonSend<MouseUtil>, mut applied: Local<bool>) {
    if pointer.locked == *applied {
        return;
    }

    mouse.set_relative_mouse_mode(pointer.locked);
    *applied = pointer.locked;
    debug!(locked = pointer.locked, "Pointer capture changed");
}

/// Switches between windowed and desktop fullscreen.
pub fn fullscreen_system(mut events: EventReader<GameEvent>, mut canvas: NonSendMut<Canvas<Window>>) {
    for event in events.read() {
        if *event != GameEvent::Command(GameCommand::ToggleFullscreen) {
            continue;
        }

        let window = canvas.window_mut();
        let next = match window.fullscreen_state() {
            FullscreenType::Off => FullscreenType::Desktop,
            _ => FullscreenType::Off,
        };

        match window.set_fullscreen(next) {
            Ok(()) => info!(?next, "Fullscreen changed"),
            Err(e) => warn!(error = %e, "Failed to change fullscreen mode"),
        }
    }
}
