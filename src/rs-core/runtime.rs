use crate::config::{Blocklist, Settings};
use crate::context::PlaybackContext;
use crate::executor::{self, TriggerOutcome};
use crate::page::{DomTree, KeyInput, PageHost, TriggerEvent};
use crate::shortcuts::{Shortcut, ShortcutDispatcher};
use crate::snackbar::{Snackbar, TimerId};
use crate::utils::logger::LoggerLevel;
use crate::video_registry;
use crate::watcher::{self, Watcher};
use crate::Logger;

/// Everything running in a page once the controller is loaded, independently
/// of how the page is accessed.
pub struct Runtime<H: PageHost> {
    host: H,
    context: PlaybackContext,
    shortcuts: ShortcutDispatcher,
    snackbar: Snackbar,
    blocklist: Blocklist,

    /// Watches the document for inserted videos. `None` until initialized.
    watcher: Option<H::Watcher>,
}

impl<H: PageHost> Runtime<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            context: PlaybackContext::new(),
            shortcuts: ShortcutDispatcher::default(),
            snackbar: Snackbar::default(),
            blocklist: Blocklist::default(),
            watcher: None,
        }
    }

    /// Applies the host's settings and starts controlling the page's videos.
    ///
    /// Only the first call on an allowed page does something. Returns `true`
    /// if the controller was initialized by this call.
    pub fn initialize(&mut self, settings: Settings, page_url: Option<&str>) -> bool {
        if self.context.is_initialized() {
            Logger::debug("Already initialized");
            return false;
        }
        Logger::set_logger_level(LoggerLevel::from_verbosity(settings.is_verbose_logging));
        self.blocklist = settings.blocklist;
        if let Some(url) = page_url {
            if !self.blocklist.is_allowed(url) {
                Logger::lazy_info(&|| format!("Disabled on page: {url}"));
                return false;
            }
        }
        if !self.context.initialize_once(settings.rate_limits) {
            return false;
        }

        self.snackbar = Snackbar::new(settings.snackbar_location, settings.snackbar_icons);
        self.snackbar.place(&self.host);
        self.shortcuts = ShortcutDispatcher::build(settings.shortcuts, settings.key_encoding.encoder());

        let videos = video_registry::discover_from_body(&self.host, &self.context);
        Logger::lazy_debug(&|| format!("Initialized with {} video(s) on page", videos.len()));

        let context = self.context.clone();
        let mut page_watcher = self
            .host
            .create_watcher(Box::new(move |host: &H, added: &[H::Node]| {
                watcher::on_added_nodes(host, &context, added)
            }));
        page_watcher.start(&self.host.document_root());
        self.watcher = Some(page_watcher);
        true
    }

    /// Triggers the shortcuts bound to a key press.
    ///
    /// Returns the outcome of every shortcut triggered, in registration order.
    pub fn on_key_down(
        &mut self,
        input: &KeyInput,
        event: Option<&dyn TriggerEvent<H::Node>>,
    ) -> Vec<TriggerOutcome> {
        if !self.context.is_initialized() {
            return vec![];
        }
        let matched: Vec<Shortcut> = self
            .shortcuts
            .matches(&self.host, input)
            .into_iter()
            .cloned()
            .collect();
        matched
            .iter()
            .map(|shortcut| {
                executor::trigger(&self.host, &self.context, &mut self.snackbar, shortcut, event)
            })
            .collect()
    }

    /// Triggers a shortcut on behalf of the host (global shortcut, popup menu,
    /// context menu...).
    ///
    /// Returns `None` if the controller is not initialized yet.
    pub fn trigger_external(&mut self, shortcut: &Shortcut) -> Option<TriggerOutcome> {
        if !self.context.is_initialized() {
            Logger::debug("Ignoring shortcut: not initialized");
            return None;
        }
        Some(executor::trigger(&self.host, &self.context, &mut self.snackbar, shortcut, None))
    }

    /// Reports the end of a snackbar hide timer.
    pub fn on_hide_timer_ended(&mut self, id: TimerId) {
        if !self.snackbar.on_hide_timer_ended(&self.host, id) {
            Logger::lazy_debug(&|| format!("Ignoring replaced hide timer {id}"));
        }
    }

    pub fn is_allowed(&self, url: &str) -> bool {
        self.blocklist.is_allowed(url)
    }

    pub fn context(&self) -> &PlaybackContext {
        &self.context
    }

    pub fn shortcuts(&self) -> &ShortcutDispatcher {
        &self.shortcuts
    }
}

impl<H: PageHost> Drop for Runtime<H> {
    fn drop(&mut self) {
        if let Some(watcher) = self.watcher.as_mut() {
            watcher.stop();
        }
    }
}
