use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{MutationObserver, MutationObserverInit, MutationRecord, Node};

use super::WebPage;
use crate::page::AddedNodesCallback;
use crate::watcher::Watcher;
use crate::Logger;

/// `Watcher` relying on a `MutationObserver`.
///
/// Roots returned by the callback are observed by the same observer, so
/// stopping it stops watching every shadow root registered along the way.
pub struct DomWatcher {
    observer: Option<MutationObserver>,

    /// Called by the observer. Kept alive as long as the watcher.
    _on_mutations: Closure<dyn FnMut(Array, MutationObserver)>,
}

fn observe(observer: &MutationObserver, root: &Node) {
    let options = MutationObserverInit::new();
    options.set_child_list(true);
    options.set_subtree(true);
    if let Err(err) = observer.observe_with_options(root, &options) {
        Logger::lazy_debug(&|| format!("Could not observe node: {err:?}"));
    }
}

impl DomWatcher {
    pub fn new(page: WebPage, mut on_added: AddedNodesCallback<WebPage>) -> Self {
        let on_mutations = Closure::wrap(Box::new(move |records: Array, observer: MutationObserver| {
            let mut added: Vec<Node> = vec![];
            for record in records.iter() {
                let nodes = record.unchecked_into::<MutationRecord>().added_nodes();
                added.extend((0..nodes.length()).filter_map(|idx| nodes.item(idx)));
            }
            if added.is_empty() {
                return;
            }
            for root in on_added(&page, &added) {
                observe(&observer, &root);
            }
        }) as Box<dyn FnMut(Array, MutationObserver)>);

        let observer = match MutationObserver::new(on_mutations.as_ref().unchecked_ref()) {
            Ok(observer) => Some(observer),
            Err(err) => {
                Logger::lazy_warn(&|| format!("Could not create MutationObserver: {err:?}"));
                None
            }
        };
        Self {
            observer,
            _on_mutations: on_mutations,
        }
    }
}

impl Watcher<Node> for DomWatcher {
    fn start(&mut self, root: &Node) {
        if let Some(observer) = &self.observer {
            observe(observer, root);
        }
    }

    fn stop(&mut self) {
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
    }
}
