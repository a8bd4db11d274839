use std::time::Duration;

use bevy_ecs::{
    resource::Resource,
    system::{Res, ResMut},
};

use crate::systems::DeltaTime;

/// The speedrun clock. Advances by frame delta time only while running.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunTimer {
    elapsed: Duration,
    running: bool,
}

impl RunTimer {
    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stops the clock and sets it back to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tick(&mut self, dt: f32) {
        if self.running && dt > 0.0 {
            self.elapsed += Duration::from_secs_f32(dt);
        }
    }

    /// Elapsed run time in whole milliseconds.
    pub fn millis(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}

pub fn run_timer_system(mut timer: ResMut<RunTimer>, dt: Res<DeltaTime>) {
    timer.tick(dt.seconds);
}

/// Formats a run time as `MM:SS.mmm`. Minutes keep growing past 99 rather than wrapping.
pub fn format_run_time(millis: u64) -> String {
    let minutes = millis / 60_000;
    let seconds = (millis / 1000) % 60;
    let millis = millis % 1000;
    format!("{minutes:02}:{seconds:02}.{millis:03}")
}
