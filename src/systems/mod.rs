//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

use bevy_ecs::event::EventReader;
use tracing::error;

use crate::error::GameError;

pub mod boss;
pub mod components;
pub mod dialogue;
pub mod hud;
pub mod input;
pub mod interact;
pub mod leaderboard;
pub mod picking;
pub mod player;
pub mod render;
pub mod stage;
pub mod timer;

pub use self::boss::*;
pub use self::components::*;
pub use self::dialogue::*;
pub use self::hud::*;
pub use self::input::*;
pub use self::interact::*;
pub use self::leaderboard::*;
pub use self::picking::*;
pub use self::player::*;
pub use self::render::*;
pub use self::stage::*;
pub use self::timer::*;

/// Logs every error systems reported this frame.
pub fn error_report_system(mut errors: EventReader<GameError>) {
    for e in errors.read() {
        error!(error = %e, "System reported an error");
    }
}
