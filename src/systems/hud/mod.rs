//! Flat 2D overlays drawn over the scene.

use bevy_ecs::{
    event::EventWriter,
    system::{NonSend, Res},
};
use sdl2::{gfx::primitives::DrawRenderer, pixels::Color, render::Canvas, video::Window};

use crate::{
    constants::{fragment, ui, CANVAS_SIZE},
    error::GameError,
    systems::{
        ascii_fold, format_run_time, DialogueBox, FragmentCount, GameStage, LeaderboardResource, PauseState, PointerLock,
        RunSummary, RunTimer,
    },
};

pub mod screens;

pub use self::screens::*;

pub(crate) type DrawResult = Result<(), String>;

/// Pixel width of `text` in the built-in font, after folding.
pub fn text_width(text: &str) -> i32 {
    (ascii_fold(text).chars().count() as u32 * ui::GLYPH_SIZE) as i32
}

pub(crate) fn draw_text(canvas: &Canvas<Window>, text: &str, x: i32, y: i32, color: Color) -> DrawResult {
    canvas.string(x as i16, y as i16, &ascii_fold(text), color)
}

/// Draws `text` horizontally centered on the canvas with its top at `y`.
pub(crate) fn draw_centered(canvas: &Canvas<Window>, text: &str, y: i32, color: Color) -> DrawResult {
    let x = (CANVAS_SIZE.x as i32 - text_width(text)) / 2;
    draw_text(canvas, text, x, y, color)
}

fn draw_crosshair(canvas: &Canvas<Window>) -> DrawResult {
    let (cx, cy) = ((CANVAS_SIZE.x / 2) as i16, (CANVAS_SIZE.y / 2) as i16);
    let size = ui::CROSSHAIR_SIZE;
    canvas.hline(cx - size, cx + size, cy, ui::TEXT_COLOR)?;
    canvas.vline(cx, cy - size, cy + size, ui::TEXT_COLOR)
}

fn draw_dialogue(canvas: &Canvas<Window>, text: &str) -> DrawResult {
    let padding = 12;
    let width = text_width(text) + padding * 2;
    let height = ui::GLYPH_SIZE as i32 + padding * 2;
    let x = (CANVAS_SIZE.x as i32 - width) / 2;
    let y = CANVAS_SIZE.y as i32 - height - 40;

    canvas.box_(
        x as i16,
        y as i16,
        (x + width) as i16,
        (y + height) as i16,
        ui::DIALOGUE_BACKGROUND,
    )?;
    draw_text(canvas, text, x + padding, y + padding, ui::TEXT_COLOR)
}

fn draw_pause_overlay(canvas: &Canvas<Window>) -> DrawResult {
    canvas.box_(
        0,
        0,
        CANVAS_SIZE.x as i16,
        CANVAS_SIZE.y as i16,
        Color::RGBA(0, 0, 0, 160),
    )?;
    let middle = CANVAS_SIZE.y as i32 / 2;
    draw_centered(canvas, "PAUSED", middle - 12, ui::TEXT_COLOR)?;
    draw_centered(canvas, "Press P to resume", middle + 8, ui::DIM_TEXT_COLOR)
}

fn draw_run_hud(
    canvas: &Canvas<Window>,
    mode_timed: bool,
    fragments: &FragmentCount,
    dialogue: &DialogueBox,
    timer: &RunTimer,
    pointer: &PointerLock,
    paused: bool,
) -> DrawResult {
    draw_crosshair(canvas)?;
    draw_text(
        canvas,
        &format!("Fragments: {} / {}", fragments.0, fragment::REQUIRED),
        10,
        10,
        ui::TEXT_COLOR,
    )?;

    if mode_timed {
        let clock = format_run_time(timer.millis());
        let x = CANVAS_SIZE.x as i32 - text_width(&clock) - 10;
        draw_text(canvas, &clock, x, 10, ui::ACCENT_COLOR)?;
    }

    if let Some(text) = dialogue.text() {
        draw_dialogue(canvas, text)?;
    }

    if !pointer.locked {
        let y = CANVAS_SIZE.y as i32 / 2 + 24;
        draw_centered(canvas, "Click to look around", y, ui::TEXT_COLOR)?;
        draw_centered(canvas, "WASD to move, Esc to release the mouse", y + 14, ui::DIM_TEXT_COLOR)?;
    }

    let controls = if mode_timed { "R: restart" } else { "P: pause  R: restart" };
    draw_text(canvas, controls, 10, CANVAS_SIZE.y as i32 - 18, ui::DIM_TEXT_COLOR)?;

    if paused {
        draw_pause_overlay(canvas)?;
    }
    Ok(())
}

/// Renders the overlay for the current stage on top of the scene.
#[allow(clippy::too_many_arguments)]
pub fn hud_render_system(
    canvas: NonSend<Canvas<Window>>,
    stage: Res<GameStage>,
    pause: Res<PauseState>,
    fragments: Res<FragmentCount>,
    dialogue: Res<DialogueBox>,
    timer: Res<RunTimer>,
    pointer: Res<PointerLock>,
    leaderboard: Res<LeaderboardResource>,
    summary: Res<RunSummary>,
    mut errors: EventWriter<GameError>,
) {
    let drawn = match *stage {
        GameStage::ModeSelect => draw_mode_select(&canvas, &leaderboard.board),
        GameStage::Playing { mode } => draw_run_hud(
            &canvas,
            mode.is_timed(),
            &fragments,
            &dialogue,
            &timer,
            &pointer,
            pause.active(),
        ),
        GameStage::Ended { .. } => draw_end_screen(&canvas, summary.0.as_ref(), &leaderboard.board),
    };

    if let Err(e) = drawn {
        errors.write(GameError::Render(format!("Failed to draw HUD: {e}")));
    }
}
