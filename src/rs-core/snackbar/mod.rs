use std::collections::HashMap;

use crate::rate_controller::round_rate;

/// Time, in milliseconds, the snackbar stays visible after the last `show`.
pub const SNACKBAR_HIDE_DELAY_MS: u32 = 1000;

/// Identifies a pending hide timer.
pub type TimerId = i32;

/// Where the snackbar is displayed on the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SnackbarLocation {
    #[default]
    BottomCenter,
    BottomLeft,
    BottomRight,
    TopCenter,
    TopLeft,
    TopRight,
    Hidden,
}

impl SnackbarLocation {
    /// Parses the location names used by the host applications.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Bottom Center" | "BottomCenter" => Some(SnackbarLocation::BottomCenter),
            "Bottom Left" | "BottomLeft" => Some(SnackbarLocation::BottomLeft),
            "Bottom Right" | "BottomRight" => Some(SnackbarLocation::BottomRight),
            "Top Center" | "TopCenter" => Some(SnackbarLocation::TopCenter),
            "Top Left" | "TopLeft" => Some(SnackbarLocation::TopLeft),
            "Top Right" | "TopRight" => Some(SnackbarLocation::TopRight),
            "Hidden" | "None" => Some(SnackbarLocation::Hidden),
            _ => None,
        }
    }
}

/// Icons the snackbar can display instead of the rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnackbarIcon {
    Play,
    Pause,
    Forward,
    Backward,
    Skip,
    Mute,
    Unmute,
    PictureInPicture,
}

impl SnackbarIcon {
    /// Key of the icon in the host's icon set.
    pub fn key(self) -> &'static str {
        match self {
            SnackbarIcon::Play => "play",
            SnackbarIcon::Pause => "pause",
            SnackbarIcon::Forward => "forward",
            SnackbarIcon::Backward => "backward",
            SnackbarIcon::Skip => "skip",
            SnackbarIcon::Mute => "mute",
            SnackbarIcon::Unmute => "unmute",
            SnackbarIcon::PictureInPicture => "pip",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnackbarContent {
    /// Markup of an icon, displayed in a fixed-size view.
    Icon(String),
    Text(String),
}

/// The on-page element displaying the snackbar.
pub trait SnackbarView {
    fn place(&self, location: SnackbarLocation);

    fn render(&self, content: &SnackbarContent);

    fn set_visible(&self, visible: bool);

    /// Starts a timer of `delay_ms` milliseconds. Its end has to be reported to
    /// `Snackbar::on_hide_timer_ended` unless it is canceled before.
    ///
    /// Returns `None` if no timer could be started.
    fn schedule_hide(&self, delay_ms: u32) -> Option<TimerId>;

    fn cancel_hide(&self, id: TimerId);
}

/// Transient notification shown after an action is performed.
#[derive(Debug, Default)]
pub struct Snackbar {
    location: SnackbarLocation,

    /// Icon markup per icon key, as provided by the host.
    icons: HashMap<String, String>,

    /// Timer hiding the snackbar. A new `show` replaces it: only the last call
    /// decides when the snackbar disappears.
    pending_hide: Option<TimerId>,
}

impl Snackbar {
    pub fn new(location: SnackbarLocation, icons: HashMap<String, String>) -> Self {
        Self {
            location,
            icons,
            pending_hide: None,
        }
    }

    pub fn location(&self) -> SnackbarLocation {
        self.location
    }

    pub fn place<V: SnackbarView>(&self, view: &V) {
        view.place(self.location);
    }

    /// Shows `icon`, or the rate when there is no icon, for the next second.
    pub fn show<V: SnackbarView>(&mut self, view: &V, icon: Option<SnackbarIcon>, current_rate: f64) {
        let content = match icon {
            Some(icon) => SnackbarContent::Icon(self.icons.get(icon.key()).cloned().unwrap_or_default()),
            None => SnackbarContent::Text(format_rate(current_rate)),
        };
        view.render(&content);

        if let Some(id) = self.pending_hide.take() {
            view.cancel_hide(id);
        }
        view.set_visible(true);
        self.pending_hide = view.schedule_hide(SNACKBAR_HIDE_DELAY_MS);
    }

    /// Hides the snackbar if `id` is the timer started by the last `show`.
    ///
    /// Returns `false` and does nothing for timers replaced since.
    pub fn on_hide_timer_ended<V: SnackbarView>(&mut self, view: &V, id: TimerId) -> bool {
        if self.pending_hide != Some(id) {
            return false;
        }
        self.pending_hide = None;
        view.set_visible(false);
        true
    }
}

/// Formats a rate with at most two decimals, followed by `x` (e.g. `1.5x`).
pub fn format_rate(rate: f64) -> String {
    format!("{}x", round_rate(rate))
}
