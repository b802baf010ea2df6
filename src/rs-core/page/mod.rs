//! Interface between the playback logic and the page it runs in.
//!
//! Everything the crate needs from the DOM is described by the traits of this
//! module. In the browser they are implemented on top of `web-sys` by
//! `bindings::WebPage`; tests implement them on an in-memory page.

use std::fmt::Debug;

use thiserror::Error;

use crate::snackbar::SnackbarView;
use crate::watcher::Watcher;

#[cfg(test)]
pub(crate) mod fake;

/// `HTMLMediaElement.HAVE_NOTHING`: no information is available about the media.
pub const HAVE_NOTHING: u16 = 0;

/// Callback given the nodes reported as inserted by a `Watcher`.
///
/// Returns the roots (shadow roots of those nodes) which have to be watched too.
pub type AddedNodesCallback<H> = Box<dyn FnMut(&H, &[<H as DomTree>::Node]) -> Vec<<H as DomTree>::Node>>;

/// Callback receiving the media events of a single video.
pub type MediaListener<H> = Box<dyn FnMut(&H, &<H as DomTree>::Node, MediaEvent)>;

/// Read access to the document tree, plus the few attributes the crate writes.
pub trait DomTree: Sized + 'static {
    /// Reference to a node of the page. Equality is node identity.
    type Node: Clone + PartialEq + Debug;

    /// Watches a subtree for inserted nodes.
    type Watcher: Watcher<Self::Node>;

    /// The document itself, root of what is watched for insertions.
    fn document_root(&self) -> Self::Node;

    /// The document's body, default root of video discovery.
    fn body(&self) -> Option<Self::Node>;

    /// The element which currently has the focus, if any.
    fn focused_element(&self) -> Option<Self::Node>;

    /// Upper-cased node name (e.g. `VIDEO`, `TEXTAREA`, `#document-fragment`).
    fn node_name(&self, node: &Self::Node) -> String;

    fn is_video(&self, node: &Self::Node) -> bool;

    fn is_iframe(&self, node: &Self::Node) -> bool;

    /// Element children of `node`, `None` if the node has no children collection.
    fn children(&self, node: &Self::Node) -> Option<Vec<Self::Node>>;

    /// The open shadow root attached to `node`, if any.
    fn shadow_root(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Body of the document loaded in an iframe.
    ///
    /// `None` when the frame is cross-origin or not loaded.
    fn frame_body(&self, iframe: &Self::Node) -> Option<Self::Node>;

    fn parent_element(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Computed `z-index` of an element (`auto`, `3`...), `None` when it cannot be computed.
    fn computed_z_index(&self, node: &Self::Node) -> Option<String>;

    fn has_attribute(&self, node: &Self::Node, name: &str) -> bool;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    fn attribute_names(&self, node: &Self::Node) -> Vec<String>;

    fn is_content_editable(&self, node: &Self::Node) -> bool;

    /// `true` when the environment accepts touch input.
    ///
    /// Touch input cannot focus the content of an iframe, so this is used as a
    /// hint that videos inside same-origin iframes have to be looked for eagerly.
    fn is_touch_capable(&self) -> bool;

    /// Creates a `Watcher` which calls `on_added` each time nodes are inserted
    /// under one of its roots.
    fn create_watcher(&self, on_added: AddedNodesCallback<Self>) -> Self::Watcher;
}

/// Operations on the media elements of the page.
///
/// Those are only called with nodes for which `DomTree::is_video` returned `true`.
pub trait MediaElements: DomTree {
    /// `HTMLMediaElement.readyState`.
    fn ready_state(&self, video: &Self::Node) -> u16;

    fn playback_rate(&self, video: &Self::Node) -> f64;

    fn set_playback_rate(&self, video: &Self::Node, rate: f64);

    /// Asks for the pitch to be kept when the playback rate changes.
    fn set_preserves_pitch(&self, video: &Self::Node);

    fn is_paused(&self, video: &Self::Node) -> bool;

    fn play(&self, video: &Self::Node);

    fn pause(&self, video: &Self::Node);

    fn is_muted(&self, video: &Self::Node) -> bool;

    fn set_muted(&self, video: &Self::Node, muted: bool);

    fn current_time(&self, video: &Self::Node) -> f64;

    fn set_current_time(&self, video: &Self::Node, time: f64);

    fn duration(&self, video: &Self::Node) -> f64;

    /// Switches the video between its inline and picture-in-picture presentations.
    fn toggle_picture_in_picture(&self, video: &Self::Node) -> Result<(), CapabilityError>;

    fn supports_fullscreen(&self, video: &Self::Node) -> bool;

    fn is_displaying_fullscreen(&self, video: &Self::Node) -> bool;

    fn enter_fullscreen(&self, video: &Self::Node);

    fn exit_fullscreen(&self, video: &Self::Node);

    /// Registers `listener` for the `canplay`, `play`, `loadstart` and
    /// `ratechange` events of `video`, for as long as the page lives.
    fn add_media_listener(&self, video: &Self::Node, listener: MediaListener<Self>);
}

/// Everything a page has to provide to run the playback controller.
pub trait PageHost: MediaElements + SnackbarView {}

impl<T: MediaElements + SnackbarView> PageHost for T {}

/// Media events the crate reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaEvent {
    CanPlay,
    Play,
    LoadStart,
    RateChange,
}

impl MediaEvent {
    pub const ALL: [MediaEvent; 4] = [
        MediaEvent::CanPlay,
        MediaEvent::Play,
        MediaEvent::LoadStart,
        MediaEvent::RateChange,
    ];

    /// Name of the corresponding DOM event.
    pub fn dom_name(self) -> &'static str {
        match self {
            MediaEvent::CanPlay => "canplay",
            MediaEvent::Play => "play",
            MediaEvent::LoadStart => "loadstart",
            MediaEvent::RateChange => "ratechange",
        }
    }

    pub fn from_dom_name(name: &str) -> Option<Self> {
        MediaEvent::ALL.into_iter().find(|e| e.dom_name() == name)
    }
}

/// An input event which led to an action being triggered.
pub trait TriggerEvent<N> {
    /// The node the event was dispatched to.
    fn target(&self) -> Option<N>;

    /// Prevents the page from also handling the event.
    fn cancel(&self);
}

/// Keyboard input, as needed to compute key combinations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyInput {
    /// Physical key (`KeyboardEvent.code`, e.g. `KeyD`).
    pub code: String,
    /// Character produced (`KeyboardEvent.key`, e.g. `d`).
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

/// A video did not support an action asked on it.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("This video does not support picture in picture")]
    PictureInPictureUnsupported,
    #[error("This video does not support full screen")]
    FullscreenUnsupported,
}
