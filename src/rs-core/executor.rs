use crate::context::PlaybackContext;
use crate::page::{CapabilityError, PageHost, TriggerEvent};
use crate::rate_controller;
use crate::resolver;
use crate::shortcuts::{Action, Shortcut};
use crate::snackbar::{Snackbar, SnackbarIcon};
use crate::video_registry;
use crate::Logger;

/// What came out of triggering a shortcut.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerOutcome {
    /// There was no video on the page: nothing was done.
    NoVideos,
    /// No video could be selected for an action needing one.
    NoActiveVideo,
    /// The selected video does not support the action.
    Unsupported(CapabilityError),
    /// The tracked playback rate was updated to the given value.
    RateChanged(f64),
    Performed,
}

/// Performs `shortcut`'s action on the current videos of the page.
///
/// Videos are looked for again on each call. `event` is the input event which
/// triggered the shortcut, if any: it is canceled as soon as there is a video
/// to act on, and its target helps finding the active video.
pub fn trigger<H: PageHost>(
    host: &H,
    context: &PlaybackContext,
    snackbar: &mut Snackbar,
    shortcut: &Shortcut,
    event: Option<&dyn TriggerEvent<H::Node>>,
) -> TriggerOutcome {
    let videos = video_registry::discover_from_body(host, context);
    if videos.is_empty() {
        Logger::debug("No video found on page");
        return TriggerOutcome::NoVideos;
    }

    let mut target = None;
    if let Some(event) = event {
        event.cancel();
        target = event.target();
    }

    Logger::lazy_debug(&|| format!("Triggering shortcut: {shortcut}"));

    let action = shortcut.action;
    if action.is_target_independent() {
        let new_rate = match action {
            Action::SpeedUp { amount } => rate_controller::speed_up(host, context, amount, &videos),
            Action::SlowDown { amount } => rate_controller::slow_down(host, context, amount, &videos),
            Action::SetRate(rate) => rate_controller::set_rate(host, context, rate, &videos),
            _ => None,
        };
        if shortcut.show_snackbar || action == Action::ShowRate {
            snackbar.show(host, None, context.current_rate());
        }
        return match new_rate {
            Some(rate) => TriggerOutcome::RateChanged(rate),
            None => TriggerOutcome::Performed,
        };
    }

    let Some(video) = resolver::resolve(host, context, &videos, target.as_ref()) else {
        return TriggerOutcome::NoActiveVideo;
    };

    match perform_on_video(host, action, &video) {
        Ok(icon) => {
            if shortcut.show_snackbar {
                if let Some(icon) = icon {
                    snackbar.show(host, Some(icon), context.current_rate());
                }
            }
            TriggerOutcome::Performed
        }
        Err(err) => {
            Logger::info(&err.to_string());
            TriggerOutcome::Unsupported(err)
        }
    }
}

/// Applies an action needing a single video, returning the icon describing
/// its result.
fn perform_on_video<H: PageHost>(
    host: &H,
    action: Action,
    video: &H::Node,
) -> Result<Option<SnackbarIcon>, CapabilityError> {
    let icon = match action {
        Action::PlayOrPause => {
            if host.is_paused(video) {
                host.play(video);
                SnackbarIcon::Play
            } else {
                host.pause(video);
                SnackbarIcon::Pause
            }
        }
        Action::SkipForward { seconds } => {
            host.set_current_time(video, host.current_time(video) + seconds as f64);
            SnackbarIcon::Forward
        }
        Action::SkipBackward { seconds } => {
            host.set_current_time(video, host.current_time(video) - seconds as f64);
            SnackbarIcon::Backward
        }
        Action::SkipToEnd => {
            host.set_current_time(video, host.duration(video));
            SnackbarIcon::Skip
        }
        Action::ToggleMute => {
            let muted = !host.is_muted(video);
            host.set_muted(video, muted);
            if muted {
                SnackbarIcon::Mute
            } else {
                SnackbarIcon::Unmute
            }
        }
        Action::PictureInPicture => {
            host.toggle_picture_in_picture(video)?;
            SnackbarIcon::PictureInPicture
        }
        Action::Fullscreen => {
            if !host.supports_fullscreen(video) {
                return Err(CapabilityError::FullscreenUnsupported);
            }
            if host.is_displaying_fullscreen(video) {
                host.exit_fullscreen(video);
            } else {
                host.enter_fullscreen(video);
            }
            // The page, and so the snackbar, is hidden behind the video.
            return Ok(None);
        }
        Action::SpeedUp { .. } | Action::SlowDown { .. } | Action::SetRate(_) | Action::ShowRate => {
            return Ok(None)
        }
    };
    Ok(Some(icon))
}
