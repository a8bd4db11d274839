#![cfg_attr(all(not(debug_assertions), target_os = "windows"), windows_subsystem = "windows")]

use std::env;

use anyhow::Context;
use dreamwalk::{app::App, constants::LOOP_TIME, platform, systems::GameMode};
use tracing::info;

// Emscripten-specific: static storage for the App instance
// Required because emscripten_set_main_loop_arg needs a persistent pointer
#[cfg(target_os = "emscripten")]
static mut APP: Option<App> = None;

/// Emscripten main loop callback - runs once per frame
#[cfg(target_os = "emscripten")]
unsafe extern "C" fn main_loop_callback(_arg: *mut std::ffi::c_void) {
    if let Some(app) = (*std::ptr::addr_of_mut!(APP)).as_mut() {
        if !app.run() {
            platform::emscripten_cancel_main_loop();
        }
    }
}

/// The main entry point of the application.
///
/// Initializes logging, SDL, the window and the game state, then enters the main loop.
/// Passing `--practice` or `--speedrun` starts a run directly.
pub fn main() -> anyhow::Result<()> {
    platform::init_console().context("Could not initialize console")?;

    let start_mode = env::args().skip(1).find_map(|arg| GameMode::from_flag(&arg));
    let app = App::new(start_mode).context("Could not create app")?;

    info!(loop_time = ?LOOP_TIME, start_mode = ?start_mode, "Starting game loop");

    #[cfg(target_os = "emscripten")]
    {
        unsafe {
            *std::ptr::addr_of_mut!(APP) = Some(app);
            // fps=0 uses requestAnimationFrame; simulate_infinite_loop=1 never returns
            platform::emscripten_set_main_loop_arg(main_loop_callback, std::ptr::null_mut(), 0, 1);
        }
    }

    #[cfg(not(target_os = "emscripten"))]
    {
        let mut app = app;
        while app.run() {}
    }

    Ok(())
}
