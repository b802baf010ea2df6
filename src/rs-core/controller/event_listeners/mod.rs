use web_sys::{KeyboardEvent, Node};

use crate::{
    bindings::{key_input, DomEvent},
    page::TriggerEvent,
    snackbar::TimerId,
    wasm_bindgen,
};

use super::{ContextMenuInfo, PageController};

/// Methods triggered on JavaScript events by the JavaScript code.
#[wasm_bindgen]
impl PageController {
    /// The JS code should call this method on each `keydown` event of the
    /// page, in the capture phase so shortcuts take precedence over the
    /// page's own key handling.
    ///
    /// The event is canceled if it triggered an action.
    pub fn on_key_down(&mut self, event: KeyboardEvent) {
        let input = key_input(&event);
        let event = DomEvent::from(event);
        let outcomes = self
            .runtime
            .on_key_down(&input, Some(&event as &dyn TriggerEvent<Node>));
        self.sync_rate_after(&outcomes);
    }

    /// The JS code should call this method each time a timer started with the
    /// `jsTimer` function finished.
    ///
    /// # Arguments
    ///
    /// * `id` - The `TimerId` returned by `jsTimer` when the timer was started.
    pub fn on_timer_ended(&mut self, id: TimerId) {
        self.runtime.on_hide_timer_ended(id);
    }

    /// The JS code should call this method on each `contextmenu` event, to
    /// update the host's context menu before it is displayed.
    pub fn context_menu_info(&self) -> ContextMenuInfo {
        let context = self.runtime.context();
        ContextMenuInfo {
            is_initialized: context.is_initialized(),
            has_videos: context.has_ever_seen_video(),
            current_rate: context.current_rate(),
        }
    }
}
