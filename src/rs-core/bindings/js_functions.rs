use crate::{snackbar::TimerId, wasm_bindgen};

/// # js_functions
///
/// This file lists all JavaScript functions that are callable from Rust as well as
/// struct and enumeration used by those functions.
///
/// DOM manipulations are performed through `web-sys` (see `web_page`), what
/// remains here is what only the content-script shell knows how to do: writing
/// in the console with its own formatting and talking to the extension host.

#[wasm_bindgen]
extern "C" {
    // Log the given text in the JavaScript console, with the log level given.
    pub fn jsLog(log_level: LogLevel, log: &str);

    // Announce the playback rate now tracked for the page to the extension host,
    // so the popup menu can display it.
    //
    // This is sent after each action which changed the rate and each time the
    // host explicitly asks for it.
    pub fn jsSyncRate(current_rate: f64);

    // Starts a timer of `duration_ms` milliseconds.
    //
    // Once it has elapsed, and unless `jsClearTimer` has been called since with
    // the returned `TimerId`, the `on_timer_ended` method of the `PageController`
    // has to be called with that `TimerId`.
    pub fn jsTimer(duration_ms: u32) -> TimerId;

    // Clear a timer started with `jsTimer`.
    pub fn jsClearTimer(id: TimerId);
}

/// Log levels understood by `jsLog`.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}
