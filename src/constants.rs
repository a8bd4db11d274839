//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::{UVec2, Vec3};

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of the canvas, in pixels.
pub const CANVAS_SIZE: UVec2 = UVec2::new(960, 540);

/// The scale factor for the window
pub const SCALE: f32 = 1.0;

/// Camera and projection parameters.
pub mod view {
    /// Vertical field of view, in degrees.
    pub const FOV_Y_DEGREES: f32 = 75.0;
    pub const NEAR: f32 = 0.1;
    pub const FAR: f32 = 1000.0;
    /// Height of the player's eyes above the floor.
    pub const EYE_HEIGHT: f32 = 1.6;
}

/// Scene lighting and fog.
pub mod lighting {
    use sdl2::pixels::Color;

    /// Fog color, also used as the clear color.
    pub const FOG_COLOR: Color = Color::RGB(0, 0, 0);
    /// View depth at which fog starts to blend in.
    pub const FOG_NEAR: f32 = 5.0;
    /// View depth past which everything is fully fogged.
    pub const FOG_FAR: f32 = 25.0;
    /// Intensity of the single white ambient light.
    pub const AMBIENT_INTENSITY: f32 = 0.6;
}

/// Player controller tuning.
pub mod player {
    /// Distance covered per 60 Hz frame while a movement key is held.
    pub const STEP_PER_FRAME: f32 = 14.0 * 0.05;
    /// Movement speed in units per second.
    pub const SPEED: f32 = STEP_PER_FRAME * 60.0;
    /// Radians of rotation per pixel of relative mouse motion.
    pub const LOOK_SENSITIVITY: f32 = 0.002;
}

/// Floor layout.
pub mod floor {
    use sdl2::pixels::Color;

    /// Half the side length of the square floor.
    pub const HALF_SIZE: f32 = 25.0;
    /// Tiles per side; the floor is drawn as `TILES * TILES` quads so fog varies across it.
    pub const TILES: u32 = 10;
    pub const COLOR: Color = Color::RGB(0x22, 0x22, 0x22);
}

/// Dialogue box behavior.
pub mod dialogue {
    /// How long a line of dialogue stays on screen, in seconds.
    pub const DURATION: f32 = 2.5;
}

/// NPC placement and lines.
pub mod npc {
    use sdl2::pixels::Color;

    pub const SIZE: glam::Vec3 = glam::Vec3::new(1.0, 2.0, 1.0);
    pub const COLOR: Color = Color::RGB(0x77, 0x77, 0xff);
    /// Height of the NPC's center above the floor.
    pub const CENTER_Y: f32 = 1.0;

    /// `(x, z, line)` for every NPC in the scene.
    pub const PLACEMENTS: [(f32, f32, &str); 3] = [
        (-4.0, -4.0, "You’re fast. Dreams don’t like that."),
        (4.0, -3.0, "If you stop moving, it gets closer."),
        (0.0, -6.0, "I’ll stay here. I always do."),
    ];
}

/// Collectible fragments.
pub mod fragment {
    use sdl2::pixels::Color;

    pub const RADIUS: f32 = 0.3;
    pub const COLOR: Color = Color::RGB(0xff, 0x00, 0xff);
    pub const CENTER_Y: f32 = 1.0;
    /// `(x, z)` for every fragment in the scene.
    pub const PLACEMENTS: [(f32, f32); 3] = [(-6.0, 2.0), (6.0, 2.0), (0.0, 6.0)];
    /// Number of fragments that summons the boss.
    pub const REQUIRED: u32 = 3;
}

/// The boss that appears once every fragment is collected.
pub mod boss {
    use sdl2::pixels::Color;

    pub const SIZE: glam::Vec3 = glam::Vec3::new(3.0, 3.0, 3.0);
    pub const COLOR: Color = Color::RGB(0xff, 0x00, 0x00);
    pub const SPAWN: glam::Vec3 = glam::Vec3::new(0.0, 1.5, -10.0);
    /// Clicks required to defeat the boss.
    pub const HEALTH: u32 = 5;
    /// Units per second the boss drifts toward +Z (0.02 per 60 Hz frame).
    pub const DRIFT_SPEED: f32 = 0.02 * 60.0;
    pub const ARRIVAL_LINE: &str = "So… you finished.";
}

/// Local leaderboard persistence.
pub mod leaderboard {
    /// Number of times kept on the board.
    pub const CAPACITY: usize = 10;
    /// Key used in browser `localStorage`.
    pub const STORAGE_KEY: &str = "dreamwalk-leaderboard";
    /// Default leaderboard file on desktop, relative to the working directory.
    pub const DEFAULT_FILE: &str = "dreamwalk-leaderboard.json";
    /// Environment variable overriding [`DEFAULT_FILE`].
    pub const PATH_ENV: &str = "DREAMWALK_LEADERBOARD";
}

/// HUD layout.
pub mod ui {
    use sdl2::pixels::Color;

    /// Width and height of a glyph in the built-in SDL2_gfx font.
    pub const GLYPH_SIZE: u32 = 8;
    pub const TEXT_COLOR: Color = Color::RGB(0xff, 0xff, 0xff);
    pub const DIM_TEXT_COLOR: Color = Color::RGB(0x88, 0x88, 0x88);
    pub const ACCENT_COLOR: Color = Color::RGB(0xff, 0x00, 0xff);
    pub const DIALOGUE_BACKGROUND: Color = Color::RGBA(0, 0, 0, 180);
    pub const CROSSHAIR_SIZE: i16 = 6;

    /// Clickable button for Practice on the mode select screen, as `(x, y, width, height)`.
    pub const PRACTICE_BUTTON: (i32, i32, u32, u32) = (280, 200, 180, 48);
    /// Clickable button for Speedrun on the mode select screen.
    pub const SPEEDRUN_BUTTON: (i32, i32, u32, u32) = (500, 200, 180, 48);

    /// Text shown alone on the end screen.
    pub const END_TEXT: &str = "...";
}

/// The initial camera eye position at the start of a run.
pub const PLAYER_START: Vec3 = Vec3::new(0.0, view::EYE_HEIGHT, 0.0);
