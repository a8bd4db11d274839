use sdl2::{gfx::primitives::DrawRenderer, render::Canvas, video::Window};
use strum::IntoEnumIterator;

use crate::{
    constants::{ui, CANVAS_SIZE},
    systems::{format_run_time, mode_button, GameMode, Leaderboard, RunResult},
};

use super::{draw_centered, draw_text, text_width, DrawResult};

/// One line per leaderboard entry, e.g. ` 1. 01:02.345`.
pub fn leaderboard_lines(board: &Leaderboard) -> Vec<String> {
    board
        .times()
        .iter()
        .enumerate()
        .map(|(index, millis)| format!("{:>2}. {}", index + 1, format_run_time(*millis)))
        .collect()
}

fn draw_leaderboard(canvas: &Canvas<Window>, board: &Leaderboard, top: i32, highlight: Option<usize>) -> DrawResult {
    draw_centered(canvas, "Best times", top, ui::TEXT_COLOR)?;

    let lines = leaderboard_lines(board);
    if lines.is_empty() {
        return draw_centered(canvas, "No times yet", top + 18, ui::DIM_TEXT_COLOR);
    }

    for (index, line) in lines.iter().enumerate() {
        let color = if highlight == Some(index) {
            ui::ACCENT_COLOR
        } else {
            ui::TEXT_COLOR
        };
        draw_centered(canvas, line, top + 18 + index as i32 * 12, color)?;
    }
    Ok(())
}

fn draw_button(canvas: &Canvas<Window>, mode: GameMode) -> DrawResult {
    let (x, y, width, height) = mode_button(mode);
    let (right, bottom) = (x + width as i32, y + height as i32);

    canvas.box_(x as i16, y as i16, right as i16, bottom as i16, ui::DIALOGUE_BACKGROUND)?;
    canvas.rectangle(x as i16, y as i16, right as i16, bottom as i16, ui::ACCENT_COLOR)?;

    let label = format!("[{}] {}", mode.hotkey(), mode);
    let label_x = x + (width as i32 - text_width(&label)) / 2;
    let label_y = y + (height as i32 - ui::GLYPH_SIZE as i32) / 2;
    draw_text(canvas, &label, label_x, label_y, ui::TEXT_COLOR)
}

/// The title screen: both mode buttons and the saved leaderboard.
pub fn draw_mode_select(canvas: &Canvas<Window>, board: &Leaderboard) -> DrawResult {
    draw_centered(canvas, "DREAMWALK", 120, ui::ACCENT_COLOR)?;
    draw_centered(canvas, "Choose a mode", 150, ui::DIM_TEXT_COLOR)?;

    for mode in GameMode::iter() {
        draw_button(canvas, mode)?;
    }

    draw_leaderboard(canvas, board, 290, None)
}

/// The end screen. Speedruns also show the final time, its rank and the board.
pub fn draw_end_screen(canvas: &Canvas<Window>, result: Option<&RunResult>, board: &Leaderboard) -> DrawResult {
    let middle = CANVAS_SIZE.y as i32 / 2;

    match result {
        Some(result) if result.mode.is_timed() => {
            draw_centered(canvas, ui::END_TEXT, 80, ui::TEXT_COLOR)?;
            draw_centered(
                canvas,
                &format!("Time {}", format_run_time(result.millis)),
                110,
                ui::ACCENT_COLOR,
            )?;
            let placement = match result.rank {
                Some(rank) => format!("Rank #{}", rank + 1),
                None => "Not ranked".to_string(),
            };
            draw_centered(canvas, &placement, 126, ui::TEXT_COLOR)?;
            draw_leaderboard(canvas, board, 160, result.rank)?;
        }
        _ => draw_centered(canvas, ui::END_TEXT, middle - 4, ui::TEXT_COLOR)?,
    }

    draw_centered(
        canvas,
        "Press Enter to return",
        CANVAS_SIZE.y as i32 - 40,
        ui::DIM_TEXT_COLOR,
    )
}
