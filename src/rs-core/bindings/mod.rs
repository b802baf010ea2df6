mod dom_watcher;
mod event_listeners;
mod js_functions;
mod web_page;

pub use dom_watcher::DomWatcher;
pub use event_listeners::{key_input, DomEvent};
pub use js_functions::*;
pub use web_page::{WebPage, SNACKBAR_ELEMENT_ID};
