use std::collections::{HashMap, HashSet};

use bevy_ecs::{
    event::EventWriter,
    resource::Resource,
    system::{NonSendMut, Res, ResMut},
};
use glam::{IVec2, Vec2};
use sdl2::{
    event::{Event, WindowEvent},
    keyboard::Scancode,
    mouse::MouseButton,
    EventPump,
};
use strum::IntoEnumIterator;
use tracing::trace;

use crate::constants::ui;
use crate::events::{GameCommand, GameEvent};
use crate::systems::{GameMode, GameStage, PauseState, PointerLock};

/// Physical-key bindings for discrete commands.
#[derive(Debug, Clone, Resource)]
pub struct Bindings {
    key_bindings: HashMap<Scancode, GameCommand>,
    movement_keys: HashSet<Scancode>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        key_bindings.insert(Scancode::P, GameCommand::TogglePause);
        key_bindings.insert(Scancode::R, GameCommand::Restart);
        key_bindings.insert(Scancode::Escape, GameCommand::UnlockPointer);
        key_bindings.insert(Scancode::Return, GameCommand::Confirm);
        key_bindings.insert(Scancode::KpEnter, GameCommand::Confirm);
        key_bindings.insert(Scancode::Num1, GameCommand::SelectMode(GameMode::Practice));
        key_bindings.insert(Scancode::Kp1, GameCommand::SelectMode(GameMode::Practice));
        key_bindings.insert(Scancode::Num2, GameCommand::SelectMode(GameMode::Speedrun));
        key_bindings.insert(Scancode::Kp2, GameCommand::SelectMode(GameMode::Speedrun));

        // Quitting and fullscreen belong to the browser page on the web build
        #[cfg(not(target_os = "emscripten"))]
        {
            key_bindings.insert(Scancode::Q, GameCommand::Exit);
            key_bindings.insert(Scancode::F11, GameCommand::ToggleFullscreen);
        }

        let movement_keys = HashSet::from([
            Scancode::W,
            Scancode::A,
            Scancode::S,
            Scancode::D,
            Scancode::Up,
            Scancode::Down,
            Scancode::Left,
            Scancode::Right,
        ]);

        Self {
            key_bindings,
            movement_keys,
        }
    }
}

impl Bindings {
    pub fn command_for(&self, key: Scancode) -> Option<GameCommand> {
        self.key_bindings.get(&key).copied()
    }

    pub fn is_movement_key(&self, key: Scancode) -> bool {
        self.movement_keys.contains(&key)
    }
}

/// Movement keys currently held down.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct HeldKeys(HashSet<Scancode>);

impl HeldKeys {
    pub fn any_held(&self, keys: &[Scancode]) -> bool {
        keys.iter().any(|key| self.0.contains(key))
    }

    pub fn press(&mut self, key: Scancode) {
        self.0.insert(key);
    }

    pub fn release(&mut self, key: Scancode) {
        self.0.remove(&key);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Relative pointer motion gathered since the camera last turned, in pixels.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct LookDelta(pub Vec2);

/// A reduced input event, decoupled from SDL so it can be built in tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimpleInputEvent {
    KeyDown(Scancode),
    KeyUp(Scancode),
    /// Left mouse button pressed at a canvas position.
    Click(IVec2),
    /// Relative pointer motion.
    Motion(Vec2),
    FocusLost,
    Quit,
}

impl SimpleInputEvent {
    /// Reduces an SDL event, dropping anything the game does not react to.
    pub fn from_sdl(event: &Event) -> Option<Self> {
        match *event {
            Event::Quit { .. } => Some(Self::Quit),
            Event::KeyDown {
                scancode: Some(key),
                repeat: false,
                ..
            } => Some(Self::KeyDown(key)),
            Event::KeyUp {
                scancode: Some(key), ..
            } => Some(Self::KeyUp(key)),
            Event::MouseButtonDown {
                mouse_btn: MouseButton::Left,
                x,
                y,
                ..
            } => Some(Self::Click(IVec2::new(x, y))),
            Event::MouseMotion { xrel, yrel, .. } => Some(Self::Motion(Vec2::new(xrel as f32, yrel as f32))),
            Event::Window {
                win_event: WindowEvent::FocusLost,
                ..
            } => Some(Self::FocusLost),
            _ => None,
        }
    }
}

/// Returns the mode select button under `point`, if any.
pub fn mode_button_at(point: IVec2) -> Option<GameMode> {
    GameMode::iter().find(|mode| {
        let (x, y, width, height) = mode_button(*mode);
        point.x >= x && point.x < x + width as i32 && point.y >= y && point.y < y + height as i32
    })
}

/// Bounds of a mode's button on the mode select screen.
pub fn mode_button(mode: GameMode) -> (i32, i32, u32, u32) {
    match mode {
        GameMode::Practice => ui::PRACTICE_BUTTON,
        GameMode::Speedrun => ui::SPEEDRUN_BUTTON,
    }
}

/// Translates input events into commands, updating held keys and pointer motion along the way.
///
/// Clicks during a paused run are dropped, so they neither capture the pointer nor interact on resume.
pub fn process_simple_input_events(
    bindings: &Bindings,
    held: &mut HeldKeys,
    look: &mut LookDelta,
    stage: GameStage,
    pointer: PointerLock,
    pause: PauseState,
    events: &[SimpleInputEvent],
) -> Vec<GameEvent> {
    let mut emitted = Vec::new();

    for event in events {
        match *event {
            SimpleInputEvent::Quit => emitted.push(GameCommand::Exit.into()),
            SimpleInputEvent::KeyDown(key) => {
                if bindings.is_movement_key(key) {
                    held.press(key);
                }
                if let Some(command) = bindings.command_for(key) {
                    emitted.push(command.into());
                }
            }
            SimpleInputEvent::KeyUp(key) => held.release(key),
            SimpleInputEvent::Click(position) => match stage {
                GameStage::ModeSelect => {
                    if let Some(mode) = mode_button_at(position) {
                        emitted.push(GameCommand::SelectMode(mode).into());
                    }
                }
                GameStage::Playing { .. } if pause.active() => {
                    trace!("Click ignored while paused");
                }
                GameStage::Playing { .. } => {
                    if !pointer.locked {
                        emitted.push(GameCommand::LockPointer.into());
                    }
                    emitted.push(GameCommand::Interact.into());
                }
                GameStage::Ended { .. } => {}
            },
            SimpleInputEvent::Motion(delta) => {
                if pointer.locked {
                    look.0 += delta;
                }
            }
            SimpleInputEvent::FocusLost => {
                held.clear();
                if pointer.locked {
                    emitted.push(GameCommand::UnlockPointer.into());
                }
            }
        }
    }

    emitted
}

#[allow(clippy::too_many_arguments)]
pub fn input_system(
    bindings: Res<Bindings>,
    stage: Res<GameStage>,
    pointer: Res<PointerLock>,
    pause: Res<PauseState>,
    mut held: ResMut<HeldKeys>,
    mut look: ResMut<LookDelta>,
    mut writer: EventWriter<GameEvent>,
    mut pump: NonSendMut<EventPump>,
) {
    let events: Vec<SimpleInputEvent> = pump.poll_iter().filter_map(|e| SimpleInputEvent::from_sdl(&e)).collect();
    if events.is_empty() {
        return;
    }

    let emitted = process_simple_input_events(&bindings, &mut held, &mut look, *stage, *pointer, *pause, &events);
    for event in emitted {
        trace!(?event, "Input command");
        writer.write(event);
    }
}
