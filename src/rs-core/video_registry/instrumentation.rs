use crate::page::{MediaEvent, HAVE_NOTHING};
use crate::rate_controller::round_rate;

/// What should happen after a media event on an instrumented video.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Reaction {
    /// Write the tracked rate to the video.
    ForceRate,
    /// Store the given rate as the tracked rate, without writing it to any video.
    SyncRate(f64),
    Ignore,
}

/// Per-video state of an instrumented video.
///
/// The first `canplay` and the first `play` events each force the tracked
/// rate on the video once: players tend to reset the rate while they load,
/// but later occurrences of those events must not override a rate the user
/// changed through the player's own controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instrumentation {
    awaiting_can_play: bool,
    awaiting_play: bool,
}

impl Instrumentation {
    pub fn new() -> Self {
        Self {
            awaiting_can_play: true,
            awaiting_play: true,
        }
    }

    pub fn on_event(&mut self, event: MediaEvent, ready_state: u16, playback_rate: f64) -> Reaction {
        match event {
            MediaEvent::CanPlay => self.on_can_play(),
            MediaEvent::Play => self.on_play(),
            MediaEvent::LoadStart => self.on_load_start(),
            MediaEvent::RateChange => self.on_rate_change(ready_state, playback_rate),
        }
    }

    pub fn on_can_play(&mut self) -> Reaction {
        if self.awaiting_can_play {
            self.awaiting_can_play = false;
            Reaction::ForceRate
        } else {
            Reaction::Ignore
        }
    }

    pub fn on_play(&mut self) -> Reaction {
        if self.awaiting_play {
            self.awaiting_play = false;
            Reaction::ForceRate
        } else {
            Reaction::Ignore
        }
    }

    /// A new resource is loading, which may reset the element's rate (e.g. when a
    /// player re-uses its element for the next video).
    pub fn on_load_start(&self) -> Reaction {
        Reaction::ForceRate
    }

    /// The rate changed, possibly from the native player controls.
    ///
    /// Elements which have not loaded anything yet report meaningless rates.
    pub fn on_rate_change(&self, ready_state: u16, playback_rate: f64) -> Reaction {
        if ready_state > HAVE_NOTHING {
            Reaction::SyncRate(round_rate(playback_rate))
        } else {
            Reaction::Ignore
        }
    }
}

impl Default for Instrumentation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_playable_events_force_once() {
        let mut inst = Instrumentation::new();
        assert_eq!(inst.on_event(MediaEvent::CanPlay, 4, 1.), Reaction::ForceRate);
        assert_eq!(inst.on_event(MediaEvent::CanPlay, 4, 1.), Reaction::Ignore);
        assert_eq!(inst.on_event(MediaEvent::Play, 4, 1.), Reaction::ForceRate);
        assert_eq!(inst.on_event(MediaEvent::Play, 4, 1.), Reaction::Ignore);
    }

    #[test]
    fn test_load_start_always_forces() {
        let mut inst = Instrumentation::new();
        for _ in 0..3 {
            assert_eq!(inst.on_event(MediaEvent::LoadStart, 0, 1.), Reaction::ForceRate);
        }
    }

    #[test]
    fn test_rate_change_sync() {
        let mut inst = Instrumentation::new();
        assert_eq!(
            inst.on_event(MediaEvent::RateChange, 1, 1.2345),
            Reaction::SyncRate(1.23)
        );
        assert_eq!(inst.on_event(MediaEvent::RateChange, 0, 3.), Reaction::Ignore);
    }
}
