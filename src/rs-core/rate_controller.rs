use crate::context::{PlaybackContext, RateLimits};
use crate::page::MediaElements;

/// Rounds a rate to two decimals, removing floating point artifacts such as
/// `1.0000000001` which accumulate through repeated increments.
pub fn round_rate(rate: f64) -> f64 {
    (rate * 100.).round() / 100.
}

/// Bounds a (rounded) rate to the configured limits.
fn clamp_rate(rate: f64, limits: &RateLimits) -> f64 {
    rate.max(limits.minimum_rate).min(limits.maximum_rate)
}

/// Rate which should be applied when `requested` is asked for.
///
/// Asking for no rate in particular, or for the rate already applied, goes
/// back to the default rate: asking twice for the same rate toggles it.
pub fn next_rate(current_rate: f64, requested: Option<f64>, limits: &RateLimits) -> f64 {
    match requested {
        None => limits.default_rate,
        Some(rate) if rate == current_rate => limits.default_rate,
        Some(rate) => clamp_rate(round_rate(rate), limits),
    }
}

/// Updates the tracked rate according to `requested` and applies it to every
/// video in `targets`.
///
/// Returns the rate applied, or `None` if there was no target, in which case
/// the tracked rate is left untouched.
pub fn set_rate<H: MediaElements>(
    host: &H,
    context: &PlaybackContext,
    requested: Option<f64>,
    targets: &[H::Node],
) -> Option<f64> {
    if targets.is_empty() {
        return None;
    }
    let new_rate = next_rate(context.current_rate(), requested, &context.limits());
    context.set_current_rate(new_rate);
    for video in targets {
        host.set_playback_rate(video, new_rate);
    }
    Some(new_rate)
}

pub fn speed_up<H: MediaElements>(
    host: &H,
    context: &PlaybackContext,
    amount: f64,
    targets: &[H::Node],
) -> Option<f64> {
    set_rate(host, context, Some(context.current_rate() + amount), targets)
}

pub fn slow_down<H: MediaElements>(
    host: &H,
    context: &PlaybackContext,
    amount: f64,
    targets: &[H::Node],
) -> Option<f64> {
    set_rate(host, context, Some(context.current_rate() - amount), targets)
}
