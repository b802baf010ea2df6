use std::fmt;

use crate::rate_controller::round_rate;

/// Operation performed when a shortcut is triggered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    SpeedUp { amount: f64 },
    SlowDown { amount: f64 },
    /// Toggles between the given rate and the default one. `None` goes back to
    /// the default rate.
    SetRate(Option<f64>),
    ShowRate,
    PlayOrPause,
    SkipForward { seconds: i64 },
    SkipBackward { seconds: i64 },
    SkipToEnd,
    ToggleMute,
    PictureInPicture,
    Fullscreen,
}

impl Action {
    /// Name identifying the action in the settings sent by the host.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Action::SpeedUp { .. } => "speedUp",
            Action::SlowDown { .. } => "slowDown",
            Action::SetRate(_) => "setRate",
            Action::ShowRate => "showRate",
            Action::PlayOrPause => "playOrPause",
            Action::SkipForward { .. } => "skipForward",
            Action::SkipBackward { .. } => "skipBackward",
            Action::SkipToEnd => "skipToEnd",
            Action::ToggleMute => "toggleMute",
            Action::PictureInPicture => "pip",
            Action::Fullscreen => "toggleFullscreen",
        }
    }

    /// `true` for actions performed on every video of the page rather than on
    /// the active one.
    pub fn is_target_independent(&self) -> bool {
        matches!(
            self,
            Action::SpeedUp { .. } | Action::SlowDown { .. } | Action::SetRate(_) | Action::ShowRate
        )
    }

    fn default_description(&self) -> &'static str {
        match self {
            Action::SpeedUp { .. } => "Speed Up",
            Action::SlowDown { .. } => "Slow Down",
            Action::SetRate(_) => "Toggle Speed",
            Action::ShowRate => "Show Current Speed",
            Action::PlayOrPause => "Play/Pause",
            Action::SkipForward { .. } => "Skip Forward",
            Action::SkipBackward { .. } => "Skip Backward",
            Action::SkipToEnd => "Skip to End",
            Action::ToggleMute => "Toggle Mute",
            Action::PictureInPicture => "Toggle Picture in Picture",
            Action::Fullscreen => "Toggle Fullscreen",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SpeedUp { amount } | Action::SlowDown { amount } => {
                write!(f, "{} ({}x)", self.default_description(), round_rate(*amount))
            }
            Action::SetRate(None) => write!(f, "Toggle Default Speed"),
            Action::SetRate(Some(rate)) => write!(f, "Toggle {}x Speed", round_rate(*rate)),
            Action::SkipForward { seconds } | Action::SkipBackward { seconds } => {
                write!(f, "{} ({}s)", self.default_description(), seconds)
            }
            _ => write!(f, "{}", self.default_description()),
        }
    }
}
