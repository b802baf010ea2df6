//! Selection of the video an action should be performed on.
//!
//! Pages regularly contain more than one `<video>` element (previews, ads,
//! background loops...). The heuristics, in order:
//!   1. only videos which have loaded something are candidates,
//!   2. a single candidate wins,
//!   3. candidates under the event's target (or the focused element) are
//!      preferred,
//!   4. the candidate stacked on top (highest z-index) wins,
//!   5. else the first playing candidate, else the first one.

use crate::context::PlaybackContext;
use crate::page::{MediaElements, HAVE_NOTHING};
use crate::video_registry;
use crate::Logger;

/// z-index considered for elements without any numeric z-index in their ancestors.
const AUTO_Z_INDEX: i64 = -1;

/// Returns the "active" video among `videos`.
///
/// `trigger` is the node the triggering event was dispatched to, if any.
/// Returns `None` if no video can be played, in which case the action should
/// be canceled.
pub fn resolve<H: MediaElements>(
    host: &H,
    context: &PlaybackContext,
    videos: &[H::Node],
    trigger: Option<&H::Node>,
) -> Option<H::Node> {
    let mut candidates = playable(host, videos.to_vec());
    match candidates.len() {
        0 => {
            Logger::debug("No playable video found");
            return None;
        }
        1 => {
            Logger::debug("Active video is only one found on page");
            return candidates.pop();
        }
        _ => {}
    }

    let focus_root = match trigger {
        Some(node) => Some(node.clone()),
        None => host.focused_element(),
    };
    if let Some(root) = focus_root {
        let mut focused = playable(host, video_registry::discover(host, context, &root));
        match focused.len() {
            0 => {}
            1 => {
                Logger::debug("Active video is only one found under focused element");
                return focused.pop();
            }
            _ => candidates = focused,
        }
    }

    let z_indexes: Vec<i64> = candidates
        .iter()
        .map(|video| effective_z_index(host, video))
        .collect();
    if let Some(top) = top_stacked(&z_indexes) {
        Logger::debug("Active video is one with highest z-index");
        return Some(candidates.swap_remove(top));
    }

    match candidates.iter().position(|video| !host.is_paused(video)) {
        Some(idx) => {
            Logger::debug("Active video is first playing video");
            Some(candidates.swap_remove(idx))
        }
        None => {
            Logger::debug("Active video is first video found");
            Some(candidates.swap_remove(0))
        }
    }
}

fn playable<H: MediaElements>(host: &H, mut videos: Vec<H::Node>) -> Vec<H::Node> {
    videos.retain(|video| host.ready_state(video) != HAVE_NOTHING);
    videos
}

/// Position of the element stacked on top, `None` if all z-indexes are equal.
///
/// On ties for the highest value, the first one wins.
fn top_stacked(z_indexes: &[i64]) -> Option<usize> {
    let mut max_idx = 0;
    let mut found_different = false;
    for i in 1..z_indexes.len() {
        if z_indexes[i] != z_indexes[max_idx] {
            found_different = true;
        }
        if z_indexes[i] > z_indexes[max_idx] {
            max_idx = i;
        }
    }
    if found_different {
        Some(max_idx)
    } else {
        None
    }
}

/// z-index of the closest element, from `node` up through its ancestors,
/// which has a z-index other than `auto`.
fn effective_z_index<H: MediaElements>(host: &H, node: &H::Node) -> i64 {
    let mut current = Some(node.clone());
    while let Some(element) = current {
        match host.computed_z_index(&element) {
            Some(value) if value != "auto" => {
                return value.trim().parse().unwrap_or(AUTO_Z_INDEX);
            }
            _ => current = host.parent_element(&element),
        }
    }
    AUTO_Z_INDEX
}
