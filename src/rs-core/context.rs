use std::cell::Cell;
use std::rc::Rc;

/// Bounds and resting value of the playback rate, as configured by the host.
///
/// `minimum_rate <= default_rate <= maximum_rate` is guaranteed by the host
/// application and is not re-validated here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateLimits {
    pub default_rate: f64,
    pub minimum_rate: f64,
    pub maximum_rate: f64,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            default_rate: 1.,
            minimum_rate: 0.25,
            maximum_rate: 16.,
        }
    }
}

/// Playback state shared by everything running in a page (or frame).
///
/// Cloning a `PlaybackContext` gives another handle on the same state: it is
/// how video listeners and mutation callbacks, which outlive the call that
/// created them, keep reading and updating the tracked rate.
///
/// The state only lives as long as the page: a navigation drops the whole
/// WebAssembly instance and a new context is created on the next page.
#[derive(Clone, Debug)]
pub struct PlaybackContext {
    state: Rc<PlaybackState>,
}

#[derive(Debug)]
struct PlaybackState {
    /// Rate currently applied to (or reported by) the page's videos.
    current_rate: Cell<f64>,

    limits: Cell<RateLimits>,

    /// Set once settings have been received.
    initialized: Cell<bool>,

    /// Set the first time any video is instrumented. Never reset.
    has_ever_seen_video: Cell<bool>,
}

impl PlaybackContext {
    /// Creates a context with the built-in rate limits, not yet initialized.
    pub fn new() -> Self {
        let limits = RateLimits::default();
        Self {
            state: Rc::new(PlaybackState {
                current_rate: Cell::new(limits.default_rate),
                limits: Cell::new(limits),
                initialized: Cell::new(false),
                has_ever_seen_video: Cell::new(false),
            }),
        }
    }

    /// Applies the host's rate limits and resets the current rate to the default one.
    ///
    /// Only the first call has an effect, `false` is returned for every later call.
    pub fn initialize_once(&self, limits: RateLimits) -> bool {
        if self.state.initialized.get() {
            return false;
        }
        self.state.initialized.set(true);
        self.state.limits.set(limits);
        self.state.current_rate.set(limits.default_rate);
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.state.initialized.get()
    }

    pub fn current_rate(&self) -> f64 {
        self.state.current_rate.get()
    }

    /// Updates the tracked rate without touching any video.
    pub(crate) fn set_current_rate(&self, rate: f64) {
        self.state.current_rate.set(rate);
    }

    pub fn limits(&self) -> RateLimits {
        self.state.limits.get()
    }

    pub fn has_ever_seen_video(&self) -> bool {
        self.state.has_ever_seen_video.get()
    }

    pub(crate) fn mark_video_seen(&self) {
        self.state.has_ever_seen_video.set(true);
    }
}

impl Default for PlaybackContext {
    fn default() -> Self {
        Self::new()
    }
}
