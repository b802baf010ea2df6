use crate::context::PlaybackContext;
use crate::page::{DomTree, MediaElements, MediaEvent};
use crate::Logger;

pub use self::instrumentation::{Instrumentation, Reaction};

mod instrumentation;

/// Attribute set on videos once they are instrumented.
///
/// This is the only state written by the crate inside the page's videos.
pub const INSTRUMENTED_MARKER: &str = "accel-video";

/// Depth-first walk over a subtree, yielding the `<video>` elements found.
///
/// The walk uses an explicit stack so deeply nested pages cannot exhaust the
/// call stack. It goes through shadow roots and, on touch-capable
/// environments, through the documents of same-origin iframes. Children of a
/// `<video>` element are not visited.
///
/// Siblings are visited last-first. The resulting order carries no meaning
/// beyond being stable for a given tree.
pub struct VideoWalk<'a, H: DomTree> {
    host: &'a H,
    stack: Vec<H::Node>,
    visit_frames: bool,
}

impl<'a, H: DomTree> VideoWalk<'a, H> {
    pub fn new(host: &'a H, root: &H::Node) -> Self {
        Self {
            host,
            stack: vec![root.clone()],
            visit_frames: host.is_touch_capable(),
        }
    }
}

impl<'a, H: DomTree> Iterator for VideoWalk<'a, H> {
    type Item = H::Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            let is_video = self.host.is_video(&node);
            if !is_video {
                if let Some(children) = self.host.children(&node) {
                    self.stack.extend(children);
                }
            }

            if self.visit_frames && self.host.is_iframe(&node) {
                // Cross-origin frames have no reachable body: nothing is found in them.
                if let Some(frame_body) = self.host.frame_body(&node) {
                    self.stack.push(frame_body);
                }
            }

            if let Some(shadow_root) = self.host.shadow_root(&node) {
                self.stack.push(shadow_root);
            }

            if is_video {
                return Some(node);
            }
        }
        None
    }
}

/// Finds every video under `root` and makes sure each of them is instrumented.
///
/// The returned list is only valid for the current call: it is never kept, as
/// the page may remove or replace those elements at any time.
pub fn discover<H: MediaElements>(host: &H, context: &PlaybackContext, root: &H::Node) -> Vec<H::Node> {
    let videos: Vec<H::Node> = VideoWalk::new(host, root).collect();
    for video in &videos {
        instrument(host, context, video);
    }
    videos
}

/// `discover` from the document's body.
pub fn discover_from_body<H: MediaElements>(host: &H, context: &PlaybackContext) -> Vec<H::Node> {
    match host.body() {
        Some(body) => discover(host, context, &body),
        None => vec![],
    }
}

/// Configures a video so it follows the tracked playback rate.
///
/// Does nothing if the video was already instrumented. Returns `true` if it
/// was instrumented by this call.
pub fn instrument<H: MediaElements>(host: &H, context: &PlaybackContext, video: &H::Node) -> bool {
    if host.has_attribute(video, INSTRUMENTED_MARKER) {
        return false;
    }
    host.set_attribute(video, INSTRUMENTED_MARKER, "true");
    context.mark_video_seen();

    host.set_preserves_pitch(video);
    host.set_playback_rate(video, context.current_rate());

    let mut instrumentation = Instrumentation::new();
    let context = context.clone();
    host.add_media_listener(
        video,
        Box::new(move |host: &H, video: &H::Node, event: MediaEvent| {
            let reaction =
                instrumentation.on_event(event, host.ready_state(video), host.playback_rate(video));
            match reaction {
                Reaction::ForceRate => host.set_playback_rate(video, context.current_rate()),
                Reaction::SyncRate(rate) => {
                    context.set_current_rate(rate);
                    Logger::lazy_debug(&|| format!("Rate set to {rate}"));
                }
                Reaction::Ignore => {}
            }
        }),
    );

    Logger::lazy_debug(&|| format!("Configured video {video:?}"));
    true
}
