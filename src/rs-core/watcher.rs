//! Incremental video discovery as the page mutates.
//!
//! Single-page applications and lazy players insert their `<video>` elements
//! long after the content script ran its first scan. A `Watcher` reports
//! inserted nodes, which are then scanned like the initial document was.
//!
//! Insertions happening inside a shadow root are not reported to a watcher of
//! the document, so each shadow root found on an inserted node is returned to
//! the watcher to be observed as well.

use crate::context::PlaybackContext;
use crate::page::MediaElements;
use crate::video_registry;
use crate::Logger;

/// Observes subtrees for node insertions.
pub trait Watcher<N> {
    /// Starts reporting insertions happening anywhere under `root`.
    ///
    /// Can be called multiple times with different roots.
    fn start(&mut self, root: &N);

    /// Stops reporting insertions for all roots.
    fn stop(&mut self);
}

/// Reaction to a batch of inserted nodes: instruments the videos found under
/// them and returns the shadow roots that have to be watched from now on.
pub fn on_added_nodes<H: MediaElements>(
    host: &H,
    context: &PlaybackContext,
    added: &[H::Node],
) -> Vec<H::Node> {
    let mut new_roots = vec![];
    for node in added {
        let found = video_registry::discover(host, context, node);
        if !found.is_empty() {
            Logger::lazy_debug(&|| format!("Found {} video(s) in inserted content", found.len()));
        }
        if let Some(shadow_root) = host.shadow_root(node) {
            new_roots.push(shadow_root);
        }
    }
    new_roots
}
