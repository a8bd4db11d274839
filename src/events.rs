use bevy_ecs::prelude::*;

use crate::systems::stage::GameMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    /// Quit the game (desktop only).
    Exit,
    /// Cast a ray from the screen center and interact with whatever it hits.
    Interact,
    /// Capture the mouse so that relative motion turns the camera.
    LockPointer,
    /// Release a captured mouse.
    UnlockPointer,
    SelectMode(GameMode),
    /// Accept the current screen (start the highlighted mode, leave the end screen).
    Confirm,
    /// Abandon or leave the current run and return to mode select.
    Restart,
    TogglePause,
    ToggleFullscreen,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

/// Emitted by picking when the center ray hits an interactable entity.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct InteractionEvent {
    pub entity: Entity,
    pub distance: f32,
}
