use crate::{
    bindings::{jsSyncRate, WebPage},
    executor::TriggerOutcome,
    runtime::Runtime,
    wasm_bindgen,
};

mod api;
mod event_listeners;

/// The `PageController` is the interface exported to the content script. One
/// is created per page (and per frame), it controls the playback rate and the
/// other playback properties of that page's videos.
#[wasm_bindgen]
pub struct PageController {
    /// State and logic of the controller, independent of `web-sys`.
    runtime: Runtime<WebPage>,
}

/// State of the controller, as displayed in the host's context menu.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContextMenuInfo {
    pub is_initialized: bool,
    pub has_videos: bool,
    pub current_rate: f64,
}

impl PageController {
    /// Announces the rate to the host if one of the outcomes changed it.
    fn sync_rate_after(&self, outcomes: &[TriggerOutcome]) {
        let rate_changed = outcomes
            .iter()
            .any(|outcome| matches!(outcome, TriggerOutcome::RateChanged(_)));
        if rate_changed {
            jsSyncRate(self.runtime.context().current_rate());
        }
    }
}
