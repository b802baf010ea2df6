use wasm_bindgen::JsCast;
use web_sys::{Event, KeyboardEvent, Node};

use crate::page::{KeyInput, TriggerEvent};

/// A DOM event received from the JavaScript-side which may lead to a shortcut
/// being triggered.
pub struct DomEvent(Event);

impl DomEvent {
    pub fn new(event: Event) -> Self {
        Self(event)
    }
}

impl From<KeyboardEvent> for DomEvent {
    fn from(event: KeyboardEvent) -> Self {
        Self(event.into())
    }
}

impl TriggerEvent<Node> for DomEvent {
    fn target(&self) -> Option<Node> {
        self.0.target().and_then(|target| target.dyn_into::<Node>().ok())
    }

    fn cancel(&self) {
        self.0.prevent_default();
        self.0.stop_propagation();
    }
}

/// Extracts what is needed to compute key combinations from a `keydown` event.
pub fn key_input(event: &KeyboardEvent) -> KeyInput {
    KeyInput {
        code: event.code(),
        key: event.key(),
        ctrl: event.ctrl_key(),
        alt: event.alt_key(),
        shift: event.shift_key(),
        meta: event.meta_key(),
    }
}
