use crate::{
    bindings::{jsSyncRate, WebPage},
    config::Settings,
    runtime::Runtime,
    shortcuts::Shortcut,
    wasm_bindgen, JsValue, Logger,
};

use super::PageController;

/// Converts a JavaScript object received from the host to JSON.
fn to_json(value: &JsValue) -> Option<String> {
    match js_sys::JSON::stringify(value) {
        Ok(json) => json.as_string(),
        Err(err) => {
            Logger::lazy_error(&|| format!("Could not serialize host value: {err:?}"));
            None
        }
    }
}

/// Methods exposed to the JavaScript-side.
///
/// Note that these are not the only methods callable by JavaScript. There are
/// also "event_listeners", which should be called when particular DOM events
/// happen on the page.
#[wasm_bindgen]
impl PageController {
    /// Create a new `PageController` for the current page. Nothing happens on
    /// the page before `initialize` is called.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<PageController, JsValue> {
        let page = WebPage::new().ok_or_else(|| JsValue::from_str("No document to control"))?;
        Ok(PageController {
            runtime: Runtime::new(page),
        })
    }

    /// Apply the settings sent by the host and start controlling the page's
    /// videos.
    ///
    /// # Arguments
    ///
    /// * `settings` - The settings object, as sent by the host.
    ///
    /// * `page_url` - URL of the page, checked against the settings' blocklist.
    ///   The blocklist is ignored if not set.
    ///
    /// Returns `true` if the controller was initialized by this call. Only the
    /// first successful call has an effect.
    pub fn initialize(&mut self, settings: JsValue, page_url: Option<String>) -> bool {
        let Some(json) = to_json(&settings) else {
            return false;
        };
        match Settings::from_json(&json) {
            Ok(settings) => self.runtime.initialize(settings, page_url.as_deref()),
            Err(err) => {
                Logger::lazy_error(&|| format!("Invalid settings: {err}"));
                false
            }
        }
    }

    /// Trigger a shortcut on behalf of the host: global shortcuts, toolbar
    /// button, context menu or popup menu.
    ///
    /// Ignored if the controller is not initialized yet.
    pub fn trigger_action(&mut self, shortcut: JsValue) {
        let Some(json) = to_json(&shortcut) else {
            return;
        };
        match Shortcut::from_json(&json) {
            Ok(shortcut) => {
                if let Some(outcome) = self.runtime.trigger_external(&shortcut) {
                    self.sync_rate_after(&[outcome]);
                }
            }
            Err(err) => Logger::lazy_error(&|| format!("Invalid shortcut: {err}")),
        }
    }

    /// Playback rate currently applied to the page's videos.
    pub fn current_rate(&self) -> f64 {
        self.runtime.context().current_rate()
    }

    /// `true` if a video was ever found on this page.
    pub fn has_videos(&self) -> bool {
        self.runtime.context().has_ever_seen_video()
    }

    pub fn is_initialized(&self) -> bool {
        self.runtime.context().is_initialized()
    }

    /// Announce the current playback rate to the host through `jsSyncRate`.
    pub fn sync_rate(&self) {
        jsSyncRate(self.current_rate());
    }

    /// Returns `false` if the settings' blocklist excludes `url`.
    pub fn is_allowed(&self, url: &str) -> bool {
        self.runtime.is_allowed(url)
    }
}
