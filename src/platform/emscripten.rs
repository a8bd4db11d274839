//! Emscripten platform implementation.

use std::ffi::{c_void, CStr, CString};
use std::io::{self, Write};
use std::os::raw::{c_char, c_int};
use std::time::Duration;

use crate::constants::leaderboard::STORAGE_KEY;
use crate::error::{PlatformError, StorageError};
use crate::formatter::FrameFormatter;
use crate::systems::ScoreStore;

/// Callback function type for emscripten main loop
pub type EmMainLoopCallback = unsafe extern "C" fn(*mut c_void);

// Emscripten FFI functions
extern "C" {
    fn emscripten_sleep(ms: u32);
    fn printf(format: *const c_char, ...) -> c_int;

    /// Set up a browser-friendly main loop with argument passing.
    /// - `fps`: target FPS (0 = use requestAnimationFrame)
    /// - `simulate_infinite_loop`: if 1, never returns
    pub fn emscripten_set_main_loop_arg(func: EmMainLoopCallback, arg: *mut c_void, fps: c_int, simulate_infinite_loop: c_int);

    pub fn emscripten_cancel_main_loop();

    fn emscripten_run_script_int(script: *const c_char) -> c_int;
    fn emscripten_run_script_string(script: *const c_char) -> *const c_char;
}

fn run_script_int(script: &str) -> Option<i32> {
    let cstr = CString::new(script).ok()?;
    Some(unsafe { emscripten_run_script_int(cstr.as_ptr()) })
}

fn run_script_string(script: &str) -> Option<String> {
    let cstr = CString::new(script).ok()?;
    let result = unsafe { emscripten_run_script_string(cstr.as_ptr()) };
    if result.is_null() {
        return None;
    }
    // The returned buffer is owned by emscripten and reused by the next call
    Some(unsafe { CStr::from_ptr(result) }.to_string_lossy().into_owned())
}

pub fn sleep(duration: Duration) {
    unsafe {
        emscripten_sleep(duration.as_millis() as u32);
    }
}

/// Yields control to browser event loop without delay.
pub fn yield_to_browser() {
    unsafe {
        emscripten_sleep(0);
    }
}

pub fn init_console() -> Result<(), PlatformError> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(|| EmscriptenConsoleWriter)
                .with_ansi(false)
                .event_format(FrameFormatter),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")));

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| PlatformError::ConsoleInit(format!("Failed to set tracing subscriber: {}", e)))?;

    Ok(())
}

/// A writer that outputs to the browser console via printf (redirected by emscripten)
struct EmscriptenConsoleWriter;

impl Write for EmscriptenConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(s) = std::str::from_utf8(buf) {
            if let Ok(cstr) = CString::new(s.trim_end_matches('\n')) {
                unsafe {
                    printf(c"%s\n".as_ptr(), cstr.as_ptr());
                }
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Quotes `value` as a single-quoted JavaScript string literal.
fn js_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

/// Browser `localStorage`, under a single key.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    key: String,
}

impl LocalStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl ScoreStore for LocalStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        // An empty string stands in for a missing key or storage that cannot be read
        let script = format!(
            "(function(){{try{{var v=localStorage.getItem({});return v===null?'':v;}}catch(e){{return '';}}}})()",
            js_string(&self.key)
        );
        let value = run_script_string(&script)
            .ok_or_else(|| StorageError::Unavailable("localStorage could not be queried".to_string()))?;
        Ok((!value.is_empty()).then_some(value))
    }

    fn save(&self, value: &str) -> Result<(), StorageError> {
        let script = format!(
            "(function(){{try{{localStorage.setItem({},{});return 1;}}catch(e){{return 0;}}}})()",
            js_string(&self.key),
            js_string(value)
        );
        match run_script_int(&script) {
            Some(1) => Ok(()),
            _ => Err(StorageError::Unavailable("localStorage rejected the write".to_string())),
        }
    }
}

pub fn score_store() -> Box<dyn ScoreStore> {
    Box::new(LocalStorage::new(STORAGE_KEY))
}
