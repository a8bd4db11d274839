use std::time::{Duration, Instant};

use sdl2::Sdl;
use tracing::{debug, info, trace};

use crate::constants::{CANVAS_SIZE, LOOP_TIME, SCALE};
use crate::error::{GameError, GameResult};
use crate::formatter;
use crate::game::Game;
use crate::platform;
use crate::systems::GameMode;

/// Main application wrapper that manages SDL initialization, window lifecycle, and the game loop.
pub struct App {
    pub game: Game,
    last_tick: Instant,
    // Subsystems shut down when the context drops
    _sdl_context: Sdl,
}

impl App {
    /// Initializes SDL, creates the game window and sets up the game state.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if any SDL initialization step fails, or propagates
    /// errors from `Game::new()`.
    pub fn new(start_mode: Option<GameMode>) -> GameResult<Self> {
        info!("Initializing SDL2 application");
        let sdl_context = sdl2::init().map_err(GameError::Sdl)?;
        let video_subsystem = sdl_context.video().map_err(GameError::Sdl)?;
        let event_pump = sdl_context.event_pump().map_err(GameError::Sdl)?;
        let mouse = sdl_context.mouse();
        trace!("Yielding after subsystem init");
        platform::yield_to_browser();

        let (width, height) = (
            (CANVAS_SIZE.x as f32 * SCALE).round() as u32,
            (CANVAS_SIZE.y as f32 * SCALE).round() as u32,
        );
        trace!(width, height, scale = SCALE, "Creating game window");
        let window = video_subsystem
            .window("Dreamwalk", width, height)
            .resizable()
            .position_centered()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        let mut canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        canvas
            .set_logical_size(CANVAS_SIZE.x, CANVAS_SIZE.y)
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        debug!(renderer_info = ?canvas.info(), "Canvas renderer initialized");
        platform::yield_to_browser();

        let game = Game::new(canvas, event_pump, mouse, platform::score_store(), start_mode)?;

        info!("Application initialization completed successfully");
        Ok(App {
            game,
            last_tick: Instant::now(),
            _sdl_context: sdl_context,
        })
    }

    /// Runs a single frame, then sleeps off whatever is left of `LOOP_TIME`.
    ///
    /// Returns `true` if the game should continue running, `false` if the game requested exit.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        let dt = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = start;

        formatter::increment_frame();

        if self.game.tick(dt) {
            info!("Exit requested");
            return false;
        }

        if start.elapsed() < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(start.elapsed());
            if time != Duration::ZERO {
                platform::sleep(time);
            }
        } else {
            trace!(behind = ?(start.elapsed() - LOOP_TIME), "Frame over budget");
        }

        true
    }
}
