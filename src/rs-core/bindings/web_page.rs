use js_sys::{Function, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, DocumentFragment, Element, Event, HtmlElement, HtmlIFrameElement, HtmlMediaElement,
    Node, Window,
};

use super::{jsClearTimer, jsTimer, DomWatcher};
use crate::page::{AddedNodesCallback, CapabilityError, DomTree, MediaElements, MediaEvent, MediaListener};
use crate::snackbar::{SnackbarContent, SnackbarLocation, SnackbarView, TimerId};
use crate::Logger;

/// `id` of the snackbar element inserted in the page.
pub const SNACKBAR_ELEMENT_ID: &str = "accel-snackbar";

/// Distance, in pixels, between the snackbar and the edges of the page.
const SNACKBAR_MARGIN_PX: u32 = 50;

/// Side of the square icons displayed in the snackbar, in pixels.
const SNACKBAR_ICON_SIZE_PX: u32 = 36;

const PIP_MODE: &str = "picture-in-picture";

/// Property of an instrumented video holding its media listener.
const LISTENER_PROPERTY: &str = "__accelMediaListener";

/// The page the content script runs in, accessed through `web-sys`.
#[derive(Clone, Debug)]
pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    /// Returns `None` outside of a document (e.g. in a worker).
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    fn snackbar_element(&self) -> Option<HtmlElement> {
        let element = match self.document.get_element_by_id(SNACKBAR_ELEMENT_ID) {
            Some(element) => element,
            None => {
                let element = self.document.create_element("div").ok()?;
                element.set_id(SNACKBAR_ELEMENT_ID);
                element
            }
        };

        // Out of the fullscreen element, the snackbar would not be visible.
        let container: Option<Element> = self
            .document
            .fullscreen_element()
            .or_else(|| self.document.body().map(Into::into));
        if let Some(container) = container {
            if element.parent_element().as_ref() != Some(&container) {
                if let Err(err) = container.append_child(&element) {
                    Logger::lazy_debug(&|| format!("Could not insert snackbar: {err:?}"));
                }
            }
        }
        element.dyn_into::<HtmlElement>().ok()
    }

    fn set_snackbar_opacity(&self, opacity: &str) {
        if let Some(element) = self.snackbar_element() {
            if let Err(err) = element.style().set_property("opacity", opacity) {
                Logger::lazy_debug(&|| format!("Could not set snackbar opacity: {err:?}"));
            }
        }
    }
}

/// `Element` view of `node`, if it is one.
///
/// Nodes can come from other realms (same-origin iframes), where `instanceof`
/// checks fail: the node type is relied on instead.
fn as_element(node: &Node) -> Option<&Element> {
    (node.node_type() == Node::ELEMENT_NODE).then(|| node.unchecked_ref::<Element>())
}

fn media(video: &Node) -> &HtmlMediaElement {
    video.unchecked_ref::<HtmlMediaElement>()
}

fn get_bool(target: &JsValue, property: &str) -> Option<bool> {
    Reflect::get(target, &JsValue::from_str(property))
        .ok()
        .and_then(|value| value.as_bool())
}

fn get_function(target: &JsValue, property: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(property))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

fn log_js_error(context: &str, result: Result<JsValue, JsValue>) {
    if let Err(err) = result {
        Logger::lazy_debug(&|| format!("{context}: {err:?}"));
    }
}

/// Inline style positioning the snackbar at `location`.
fn placement_style(location: SnackbarLocation) -> String {
    let margin = SNACKBAR_MARGIN_PX;
    let position = match location {
        SnackbarLocation::BottomCenter => {
            format!("bottom: {margin}px; left: 50%; transform: translateX(-50%);")
        }
        SnackbarLocation::BottomLeft => format!("bottom: {margin}px; left: {margin}px;"),
        SnackbarLocation::BottomRight => format!("bottom: {margin}px; right: {margin}px;"),
        SnackbarLocation::TopCenter => {
            format!("top: {margin}px; left: 50%; transform: translateX(-50%);")
        }
        SnackbarLocation::TopLeft => format!("top: {margin}px; left: {margin}px;"),
        SnackbarLocation::TopRight => format!("top: {margin}px; right: {margin}px;"),
        SnackbarLocation::Hidden => "display: none;".to_owned(),
    };
    format!(
        "position: fixed; z-index: 2147483647; padding: 12px 16px; border-radius: 8px; \
         background: rgba(0, 0, 0, 0.75); color: #fff; font: 600 18px sans-serif; \
         pointer-events: none; transition: opacity 0.2s; opacity: 0; {position}"
    )
}

/// Markup of the fixed-size view displaying an icon.
fn icon_markup(icon: &str) -> String {
    let size = SNACKBAR_ICON_SIZE_PX;
    format!(
        "<div style=\"box-sizing: content-box; width: {size}px; height: {size}px;\">{icon}</div>"
    )
}

impl DomTree for WebPage {
    type Node = Node;
    type Watcher = DomWatcher;

    fn document_root(&self) -> Node {
        self.document.clone().into()
    }

    fn body(&self) -> Option<Node> {
        self.document.body().map(Into::into)
    }

    fn focused_element(&self) -> Option<Node> {
        self.document.active_element().map(Into::into)
    }

    fn node_name(&self, node: &Node) -> String {
        node.node_name().to_uppercase()
    }

    fn is_video(&self, node: &Node) -> bool {
        node.node_type() == Node::ELEMENT_NODE && self.node_name(node) == "VIDEO"
    }

    fn is_iframe(&self, node: &Node) -> bool {
        node.node_type() == Node::ELEMENT_NODE && self.node_name(node) == "IFRAME"
    }

    fn children(&self, node: &Node) -> Option<Vec<Node>> {
        let collection = match node.node_type() {
            Node::ELEMENT_NODE => node.unchecked_ref::<Element>().children(),
            Node::DOCUMENT_NODE => node.unchecked_ref::<Document>().children(),
            Node::DOCUMENT_FRAGMENT_NODE => node.unchecked_ref::<DocumentFragment>().children(),
            _ => return None,
        };
        Some(
            (0..collection.length())
                .filter_map(|idx| collection.item(idx))
                .map(Into::into)
                .collect(),
        )
    }

    fn shadow_root(&self, node: &Node) -> Option<Node> {
        as_element(node)?.shadow_root().map(Into::into)
    }

    fn frame_body(&self, iframe: &Node) -> Option<Node> {
        // `null` for cross-origin frames.
        let document = iframe.unchecked_ref::<HtmlIFrameElement>().content_document()?;
        document.body().map(Into::into)
    }

    fn parent_element(&self, node: &Node) -> Option<Node> {
        node.parent_element().map(Into::into)
    }

    fn computed_z_index(&self, node: &Node) -> Option<String> {
        let element = as_element(node)?;
        let style = self.window.get_computed_style(element).ok()??;
        style.get_property_value("z-index").ok()
    }

    fn has_attribute(&self, node: &Node, name: &str) -> bool {
        as_element(node).is_some_and(|element| element.has_attribute(name))
    }

    fn set_attribute(&self, node: &Node, name: &str, value: &str) {
        if let Some(element) = as_element(node) {
            if let Err(err) = element.set_attribute(name, value) {
                Logger::lazy_debug(&|| format!("Could not set attribute {name}: {err:?}"));
            }
        }
    }

    fn attribute_names(&self, node: &Node) -> Vec<String> {
        match as_element(node) {
            Some(element) => element
                .get_attribute_names()
                .iter()
                .filter_map(|name| name.as_string())
                .collect(),
            None => vec![],
        }
    }

    fn is_content_editable(&self, node: &Node) -> bool {
        get_bool(node, "isContentEditable").unwrap_or(false)
    }

    fn is_touch_capable(&self) -> bool {
        Reflect::has(&self.window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
            || self.window.navigator().max_touch_points() > 0
    }

    fn create_watcher(&self, on_added: AddedNodesCallback<Self>) -> DomWatcher {
        DomWatcher::new(self.clone(), on_added)
    }
}

impl MediaElements for WebPage {
    fn ready_state(&self, video: &Node) -> u16 {
        media(video).ready_state()
    }

    fn playback_rate(&self, video: &Node) -> f64 {
        media(video).playback_rate()
    }

    fn set_playback_rate(&self, video: &Node, rate: f64) {
        media(video).set_playback_rate(rate);
    }

    fn set_preserves_pitch(&self, video: &Node) {
        for property in ["preservesPitch", "mozPreservesPitch", "webkitPreservesPitch"] {
            if let Err(err) = Reflect::set(video, &JsValue::from_str(property), &JsValue::TRUE) {
                Logger::lazy_debug(&|| format!("Could not set {property}: {err:?}"));
            }
        }
    }

    fn is_paused(&self, video: &Node) -> bool {
        media(video).paused()
    }

    fn play(&self, video: &Node) {
        // The returned promise rejects when autoplay is refused, nothing to do then.
        if let Err(err) = media(video).play() {
            Logger::lazy_debug(&|| format!("Could not play video: {err:?}"));
        }
    }

    fn pause(&self, video: &Node) {
        if let Err(err) = media(video).pause() {
            Logger::lazy_debug(&|| format!("Could not pause video: {err:?}"));
        }
    }

    fn is_muted(&self, video: &Node) -> bool {
        media(video).muted()
    }

    fn set_muted(&self, video: &Node, muted: bool) {
        media(video).set_muted(muted);
    }

    fn current_time(&self, video: &Node) -> f64 {
        media(video).current_time()
    }

    fn set_current_time(&self, video: &Node, time: f64) {
        media(video).set_current_time(time);
    }

    fn duration(&self, video: &Node) -> f64 {
        media(video).duration()
    }

    fn toggle_picture_in_picture(&self, video: &Node) -> Result<(), CapabilityError> {
        // WebKit's presentation mode API
        if let Some(set_mode) = get_function(video, "webkitSetPresentationMode") {
            let supported = get_function(video, "webkitSupportsPresentationMode")
                .and_then(|supports| supports.call1(video, &JsValue::from_str(PIP_MODE)).ok())
                .and_then(|supported| supported.as_bool())
                .unwrap_or(false);
            if !supported {
                return Err(CapabilityError::PictureInPictureUnsupported);
            }
            let current_mode = Reflect::get(video, &JsValue::from_str("webkitPresentationMode"))
                .ok()
                .and_then(|mode| mode.as_string());
            let next_mode = if current_mode.as_deref() == Some(PIP_MODE) {
                "inline"
            } else {
                PIP_MODE
            };
            log_js_error(
                "Could not change presentation mode",
                set_mode.call1(video, &JsValue::from_str(next_mode)),
            );
            return Ok(());
        }

        // Picture-in-Picture API
        let enabled = get_bool(&self.document, "pictureInPictureEnabled").unwrap_or(false);
        let disabled_on_video = get_bool(video, "disablePictureInPicture").unwrap_or(false);
        if !enabled || disabled_on_video {
            return Err(CapabilityError::PictureInPictureUnsupported);
        }
        let current = Reflect::get(&self.document, &JsValue::from_str("pictureInPictureElement"))
            .unwrap_or(JsValue::NULL);
        let video_value: &JsValue = video.as_ref();
        if &current == video_value {
            if let Some(exit) = get_function(&self.document, "exitPictureInPicture") {
                log_js_error("Could not exit picture in picture", exit.call0(&self.document));
            }
        } else {
            match get_function(video, "requestPictureInPicture") {
                Some(request) => {
                    log_js_error("Could not enter picture in picture", request.call0(video))
                }
                None => return Err(CapabilityError::PictureInPictureUnsupported),
            }
        }
        Ok(())
    }

    fn supports_fullscreen(&self, video: &Node) -> bool {
        get_bool(video, "webkitSupportsFullscreen")
            .unwrap_or_else(|| self.document.fullscreen_enabled())
    }

    fn is_displaying_fullscreen(&self, video: &Node) -> bool {
        if let Some(displaying) = get_bool(video, "webkitDisplayingFullscreen") {
            return displaying;
        }
        let video_value: &JsValue = video.as_ref();
        self.document
            .fullscreen_element()
            .is_some_and(|element| {
                let element_value: &JsValue = element.as_ref();
                element_value == video_value
            })
    }

    fn enter_fullscreen(&self, video: &Node) {
        if let Some(enter) = get_function(video, "webkitEnterFullscreen") {
            log_js_error("Could not enter full screen", enter.call0(video));
        } else if let Some(element) = as_element(video) {
            if let Err(err) = element.request_fullscreen() {
                Logger::lazy_debug(&|| format!("Could not enter full screen: {err:?}"));
            }
        }
    }

    fn exit_fullscreen(&self, video: &Node) {
        if let Some(exit) = get_function(video, "webkitExitFullscreen") {
            log_js_error("Could not exit full screen", exit.call0(video));
        } else {
            self.document.exit_fullscreen();
        }
    }

    fn add_media_listener(&self, video: &Node, mut listener: MediaListener<Self>) {
        let page = self.clone();
        let target = video.clone();
        let closure = Closure::wrap(Box::new(move |event: Event| {
            if let Some(media_event) = MediaEvent::from_dom_name(&event.type_()) {
                listener(&page, &target, media_event);
            }
        }) as Box<dyn FnMut(_)>);
        for event in MediaEvent::ALL {
            if let Err(err) =
                video.add_event_listener_with_callback(event.dom_name(), closure.as_ref().unchecked_ref())
            {
                Logger::lazy_debug(&|| format!("Could not listen to {}: {err:?}", event.dom_name()));
            }
        }
        // Stored on the video so the listener is collected along with it.
        let callback = closure.into_js_value();
        if let Err(err) = Reflect::set(video, &JsValue::from_str(LISTENER_PROPERTY), &callback) {
            Logger::lazy_debug(&|| format!("Could not keep media listener: {err:?}"));
        }
    }
}

impl SnackbarView for WebPage {
    fn place(&self, location: SnackbarLocation) {
        if let Some(element) = self.snackbar_element() {
            if let Err(err) = element.set_attribute("style", &placement_style(location)) {
                Logger::lazy_debug(&|| format!("Could not place snackbar: {err:?}"));
            }
        }
    }

    fn render(&self, content: &SnackbarContent) {
        let Some(element) = self.snackbar_element() else {
            return;
        };
        match content {
            SnackbarContent::Icon(icon) => element.set_inner_html(&icon_markup(icon)),
            SnackbarContent::Text(text) => element.set_text_content(Some(text)),
        }
    }

    fn set_visible(&self, visible: bool) {
        self.set_snackbar_opacity(if visible { "1" } else { "0" });
    }

    fn schedule_hide(&self, delay_ms: u32) -> Option<TimerId> {
        Some(jsTimer(delay_ms))
    }

    fn cancel_hide(&self, id: TimerId) {
        jsClearTimer(id);
    }
}
