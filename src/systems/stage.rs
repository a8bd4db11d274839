use bevy_ecs::{
    entity::Entity,
    event::EventReader,
    query::With,
    resource::Resource,
    system::{Commands, Query, Res, ResMut},
};
use strum_macros::{Display, EnumIter};
use tracing::{debug, info};

use crate::events::{GameCommand, GameEvent};
use crate::scene::{self, projection::Camera};
use crate::systems::{DialogueBox, FragmentCount, LookDelta, RunTimer, SceneObject};

/// How a run is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum GameMode {
    /// No clock, pausing allowed.
    Practice,
    /// Timed from mode selection to the boss's defeat; times go on the leaderboard.
    Speedrun,
}

impl GameMode {
    pub fn is_timed(&self) -> bool {
        matches!(self, GameMode::Speedrun)
    }

    /// Parses a command line flag that skips mode select.
    pub fn from_flag(flag: &str) -> Option<GameMode> {
        match flag {
            "--practice" => Some(GameMode::Practice),
            "--speedrun" => Some(GameMode::Speedrun),
            _ => None,
        }
    }

    /// The key shown next to the mode on the mode select screen.
    pub fn hotkey(&self) -> char {
        match self {
            GameMode::Practice => '1',
            GameMode::Speedrun => '2',
        }
    }
}

/// A resource to track the overall stage of the game from a high-level perspective.
#[derive(Resource, Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum GameStage {
    /// The title screen, waiting for a mode to be chosen.
    #[default]
    ModeSelect,
    /// A run is in progress.
    Playing { mode: GameMode },
    /// The boss has been defeated.
    Ended { mode: GameMode },
}

impl GameStage {
    pub fn is_playing(&self) -> bool {
        matches!(self, GameStage::Playing { .. })
    }
}

#[derive(Resource, Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum PauseState {
    #[default]
    Inactive,
    Active,
}

impl PauseState {
    pub fn active(&self) -> bool {
        matches!(self, PauseState::Active)
    }
}

/// The outcome of the most recent finished run.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary(pub Option<RunResult>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    pub mode: GameMode,
    /// Final clock value; only meaningful for timed modes.
    pub millis: u64,
    /// Zero-based leaderboard rank, if the time made the board.
    pub rank: Option<usize>,
}

/// Moves between mode select, a run and the end screen in response to commands.
#[allow(clippy::too_many_arguments)]
pub fn stage_system(
    mut events: EventReader<GameEvent>,
    mut stage: ResMut<GameStage>,
    mut pause: ResMut<PauseState>,
    mut camera: ResMut<Camera>,
    mut look: ResMut<LookDelta>,
    mut fragments: ResMut<FragmentCount>,
    mut dialogue: ResMut<DialogueBox>,
    mut timer: ResMut<RunTimer>,
    mut commands: Commands,
    objects: Query<Entity, With<SceneObject>>,
) {
    for event in events.read() {
        let GameEvent::Command(command) = *event;
        let next = match (*stage, command) {
            (GameStage::ModeSelect, GameCommand::SelectMode(mode)) => {
                scene::clear_scene(&mut commands, &objects);
                scene::spawn_scene(&mut commands);

                *camera = Camera::default();
                *look = LookDelta::default();
                *fragments = FragmentCount::default();
                dialogue.hide();
                timer.reset();
                if mode.is_timed() {
                    timer.start();
                }

                info!(%mode, "Run started");
                GameStage::Playing { mode }
            }
            (GameStage::Playing { mode }, GameCommand::Restart) => {
                info!(%mode, "Run abandoned");
                timer.stop();
                GameStage::ModeSelect
            }
            (GameStage::Ended { .. }, GameCommand::Restart | GameCommand::Confirm) => GameStage::ModeSelect,
            _ => continue,
        };

        debug!(from = ?*stage, to = ?next, "Game stage transition");
        *stage = next;
        *pause = PauseState::Inactive;
    }
}

/// Toggles pause during Practice runs. Speedruns cannot be paused.
pub fn handle_pause_command(mut events: EventReader<GameEvent>, stage: Res<GameStage>, mut pause: ResMut<PauseState>) {
    for event in events.read() {
        if *event != GameEvent::Command(GameCommand::TogglePause) {
            continue;
        }

        match *stage {
            GameStage::Playing {
                mode: GameMode::Practice,
            } => {
                *pause = match *pause {
                    PauseState::Active => {
                        info!("Game resumed");
                        PauseState::Inactive
                    }
                    PauseState::Inactive => {
                        info!("Game paused");
                        PauseState::Active
                    }
                };
            }
            GameStage::Playing {
                mode: GameMode::Speedrun,
            } => debug!("Pause ignored during a speedrun"),
            _ => {}
        }
    }
}
