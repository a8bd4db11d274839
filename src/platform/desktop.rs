//! Desktop platform implementation.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use crate::constants::leaderboard::{DEFAULT_FILE, PATH_ENV};
use crate::error::PlatformError;
use crate::formatter::FrameFormatter;
use crate::systems::{FileStore, ScoreStore};

pub fn sleep(duration: Duration) {
    spin_sleep::sleep(duration);
}

/// Only the browser needs control handed back during long setup.
pub fn yield_to_browser() {}

pub fn init_console() -> Result<(), PlatformError> {
    let subscriber = tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(true).event_format(FrameFormatter))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| PlatformError::ConsoleInit(format!("Failed to set tracing subscriber: {}", e)))?;

    Ok(())
}

/// Where the leaderboard file lives: the path in the environment override, or a file in the working directory.
pub fn leaderboard_path() -> PathBuf {
    leaderboard_path_from(env::var_os(PATH_ENV))
}

/// Resolves the leaderboard path from the override's value. An empty override counts as unset.
pub fn leaderboard_path_from(value: Option<OsString>) -> PathBuf {
    value
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE))
}

pub fn score_store() -> Box<dyn ScoreStore> {
    let path = leaderboard_path();
    debug!(path = %path.display(), "Using leaderboard file");
    Box::new(FileStore::new(path))
}
