use bevy_ecs::{
    resource::Resource,
    system::{Res, ResMut},
};
use tracing::trace;

use crate::constants;
use crate::systems::DeltaTime;

/// The on-screen dialogue line.
///
/// Showing a new line replaces the current one and restarts its timer, so a line is
/// never cut short by the expiry of an earlier one.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct DialogueBox {
    text: Option<String>,
    remaining: f32,
}

impl DialogueBox {
    pub fn show(&mut self, text: impl Into<String>) {
        let text = text.into();
        trace!(text = %text, "Showing dialogue");
        self.text = Some(text);
        self.remaining = constants::dialogue::DURATION;
    }

    pub fn hide(&mut self) {
        self.text = None;
        self.remaining = 0.0;
    }

    /// The visible line, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Counts down by `dt` seconds, hiding the line once its time is up.
    pub fn tick(&mut self, dt: f32) {
        if self.text.is_none() {
            return;
        }

        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.hide();
        }
    }
}

pub fn dialogue_system(mut dialogue: ResMut<DialogueBox>, dt: Res<DeltaTime>) {
    dialogue.tick(dt.seconds);
}
