//! In-memory page used by the unit tests.
//!
//! Nodes live in an arena and are referenced by `NodeId`. The page records
//! everything written to it (attributes, media state, snackbar calls) so tests
//! can check what the playback logic did.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{
    AddedNodesCallback, CapabilityError, DomTree, MediaElements, MediaEvent, MediaListener,
    TriggerEvent,
};
use crate::snackbar::{SnackbarContent, SnackbarLocation, SnackbarView, TimerId};
use crate::watcher::Watcher;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

const DOCUMENT: NodeId = NodeId(0);
const BODY: NodeId = NodeId(1);

/// Media state of a fake `<video>`.
#[derive(Clone, Debug, PartialEq)]
pub struct FakeMedia {
    pub ready_state: u16,
    pub playback_rate: f64,
    pub paused: bool,
    pub muted: bool,
    pub current_time: f64,
    pub duration: f64,
    pub preserves_pitch: bool,
    pub pip: bool,
    pub supports_pip: bool,
    pub supports_fullscreen: bool,
    pub fullscreen: bool,
}

impl Default for FakeMedia {
    fn default() -> Self {
        Self {
            ready_state: 4,
            playback_rate: 1.,
            paused: true,
            muted: false,
            current_time: 0.,
            duration: 120.,
            preserves_pitch: false,
            pip: false,
            supports_pip: true,
            supports_fullscreen: true,
            fullscreen: false,
        }
    }
}

/// What was asked of the snackbar view.
#[derive(Clone, Debug, Default)]
pub struct FakeSnackbar {
    pub location: Option<SnackbarLocation>,
    pub content: Option<SnackbarContent>,
    pub visible: bool,
    pub scheduled: Vec<(TimerId, u32)>,
    pub canceled: Vec<TimerId>,
    pub fired: Vec<TimerId>,
}

#[derive(Default)]
struct FakeNode {
    name: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    shadow_root: Option<NodeId>,
    frame_body: Option<NodeId>,
    z_index: Option<String>,
    attributes: Vec<(String, String)>,
    content_editable: bool,
    media: FakeMedia,
    listeners: Vec<MediaListener<FakePage>>,
}

struct FakeWatcherState {
    callback: Option<AddedNodesCallback<FakePage>>,
    roots: Vec<NodeId>,
}

#[derive(Default)]
struct FakeState {
    nodes: Vec<FakeNode>,
    focused: Option<NodeId>,
    touch_capable: bool,
    watchers: Vec<FakeWatcherState>,
    snackbar: FakeSnackbar,
    next_timer: TimerId,
}

#[derive(Clone)]
pub struct FakePage {
    state: Rc<RefCell<FakeState>>,
}

impl FakePage {
    /// A page with a document and an empty body.
    pub fn new() -> Self {
        let page = Self {
            state: Rc::new(RefCell::new(FakeState::default())),
        };
        page.create_node("#document", None);
        page.create_node("BODY", Some(DOCUMENT));
        page
    }

    pub fn body_id(&self) -> NodeId {
        BODY
    }

    fn create_node(&self, name: &str, parent: Option<NodeId>) -> NodeId {
        let mut state = self.state.borrow_mut();
        let id = NodeId(state.nodes.len());
        state.nodes.push(FakeNode {
            name: name.to_owned(),
            parent,
            ..FakeNode::default()
        });
        if let Some(parent) = parent {
            state.nodes[parent.0].children.push(id);
        }
        id
    }

    /// Appends a new element, without notifying watchers.
    pub fn append(&self, parent: NodeId, name: &str) -> NodeId {
        self.create_node(name, Some(parent))
    }

    pub fn append_video(&self, parent: NodeId) -> NodeId {
        self.append(parent, "VIDEO")
    }

    /// Appends an iframe. Same-origin frames get a document body, which is
    /// returned too.
    pub fn append_iframe(&self, parent: NodeId, same_origin: bool) -> (NodeId, Option<NodeId>) {
        let frame = self.append(parent, "IFRAME");
        if !same_origin {
            return (frame, None);
        }
        let frame_document = self.create_node("#document", None);
        let frame_body = self.create_node("BODY", Some(frame_document));
        self.state.borrow_mut().nodes[frame.0].frame_body = Some(frame_body);
        (frame, Some(frame_body))
    }

    /// Attaches a shadow root to `host` and returns it.
    pub fn attach_shadow(&self, host: NodeId) -> NodeId {
        let root = self.create_node("#document-fragment", None);
        self.state.borrow_mut().nodes[host.0].shadow_root = Some(root);
        root
    }

    /// Creates an element outside of the document.
    pub fn detached(&self, name: &str) -> NodeId {
        self.create_node(name, None)
    }

    /// Inserts a detached node under `parent`, notifying the watchers observing
    /// one of its ancestors.
    pub fn insert(&self, parent: NodeId, node: NodeId) {
        {
            let mut state = self.state.borrow_mut();
            state.nodes[node.0].parent = Some(parent);
            state.nodes[parent.0].children.push(node);
        }
        let ancestors = self.inclusive_ancestors(parent);
        let watcher_count = self.state.borrow().watchers.len();
        for index in 0..watcher_count {
            let callback = {
                let mut state = self.state.borrow_mut();
                let watcher = &mut state.watchers[index];
                if !watcher.roots.iter().any(|root| ancestors.contains(root)) {
                    continue;
                }
                watcher.callback.take()
            };
            let Some(mut callback) = callback else {
                continue;
            };
            let new_roots = callback(self, &[node]);
            let mut state = self.state.borrow_mut();
            let watcher = &mut state.watchers[index];
            watcher.callback = Some(callback);
            for root in new_roots {
                if !watcher.roots.contains(&root) {
                    watcher.roots.push(root);
                }
            }
        }
    }

    pub fn remove(&self, node: NodeId) {
        let mut state = self.state.borrow_mut();
        if let Some(parent) = state.nodes[node.0].parent.take() {
            state.nodes[parent.0].children.retain(|child| *child != node);
        }
    }

    /// `node` then its ancestors, stopping at document and shadow roots.
    fn inclusive_ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let state = self.state.borrow();
        let mut ancestors = vec![node];
        let mut current = node;
        while let Some(parent) = state.nodes[current.0].parent {
            ancestors.push(parent);
            current = parent;
        }
        ancestors
    }

    pub fn set_touch_capable(&self, touch_capable: bool) {
        self.state.borrow_mut().touch_capable = touch_capable;
    }

    pub fn set_z_index(&self, node: NodeId, z_index: &str) {
        self.state.borrow_mut().nodes[node.0].z_index = Some(z_index.to_owned());
    }

    pub fn set_focus(&self, node: Option<NodeId>) {
        self.state.borrow_mut().focused = node;
    }

    pub fn set_content_editable(&self, node: NodeId, editable: bool) {
        self.state.borrow_mut().nodes[node.0].content_editable = editable;
    }

    pub fn media(&self, video: NodeId) -> FakeMedia {
        self.state.borrow().nodes[video.0].media.clone()
    }

    pub fn update_media(&self, video: NodeId, update: impl FnOnce(&mut FakeMedia)) {
        update(&mut self.state.borrow_mut().nodes[video.0].media);
    }

    /// Calls the media listeners registered on `video`.
    pub fn dispatch_media_event(&self, video: NodeId, event: MediaEvent) {
        let mut listeners = std::mem::take(&mut self.state.borrow_mut().nodes[video.0].listeners);
        for listener in listeners.iter_mut() {
            listener(self, &video, event);
        }
        let mut state = self.state.borrow_mut();
        let added = std::mem::take(&mut state.nodes[video.0].listeners);
        listeners.extend(added);
        state.nodes[video.0].listeners = listeners;
    }

    pub fn listener_count(&self, video: NodeId) -> usize {
        self.state.borrow().nodes[video.0].listeners.len()
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.state.borrow().nodes[node.0]
            .attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.clone())
    }

    pub fn attribute_count(&self, node: NodeId) -> usize {
        self.state.borrow().nodes[node.0].attributes.len()
    }

    /// `true` if an active watcher observes `root`.
    pub fn is_watched(&self, root: NodeId) -> bool {
        self.state
            .borrow()
            .watchers
            .iter()
            .any(|watcher| watcher.roots.contains(&root))
    }

    pub fn snackbar(&self) -> FakeSnackbar {
        self.state.borrow().snackbar.clone()
    }

    /// Hide timers neither canceled nor fired yet.
    pub fn pending_hide_timers(&self) -> Vec<TimerId> {
        let state = self.state.borrow();
        let snackbar = &state.snackbar;
        snackbar
            .scheduled
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| !snackbar.canceled.contains(id) && !snackbar.fired.contains(id))
            .collect()
    }

    /// Ends every pending hide timer and returns their ids, to be reported
    /// to the `Snackbar`.
    pub fn fire_hide_timers(&self) -> Vec<TimerId> {
        let pending = self.pending_hide_timers();
        self.state.borrow_mut().snackbar.fired.extend(&pending);
        pending
    }

    fn is_element(&self, node: NodeId) -> bool {
        !self.state.borrow().nodes[node.0].name.starts_with('#')
    }
}

pub struct FakeWatcher {
    page: FakePage,
    index: usize,
}

impl Watcher<NodeId> for FakeWatcher {
    fn start(&mut self, root: &NodeId) {
        let mut state = self.page.state.borrow_mut();
        let roots = &mut state.watchers[self.index].roots;
        if !roots.contains(root) {
            roots.push(*root);
        }
    }

    fn stop(&mut self) {
        self.page.state.borrow_mut().watchers[self.index].roots.clear();
    }
}

/// Event dispatched to `target`, remembering if it was canceled.
#[derive(Debug, Default)]
pub struct FakeEvent {
    pub target: Option<NodeId>,
    pub cancelled: Cell<bool>,
}

impl FakeEvent {
    pub fn on(target: NodeId) -> Self {
        Self {
            target: Some(target),
            cancelled: Cell::new(false),
        }
    }
}

impl TriggerEvent<NodeId> for FakeEvent {
    fn target(&self) -> Option<NodeId> {
        self.target
    }

    fn cancel(&self) {
        self.cancelled.set(true);
    }
}

impl DomTree for FakePage {
    type Node = NodeId;
    type Watcher = FakeWatcher;

    fn document_root(&self) -> NodeId {
        DOCUMENT
    }

    fn body(&self) -> Option<NodeId> {
        Some(BODY)
    }

    fn focused_element(&self) -> Option<NodeId> {
        self.state.borrow().focused
    }

    fn node_name(&self, node: &NodeId) -> String {
        self.state.borrow().nodes[node.0].name.clone()
    }

    fn is_video(&self, node: &NodeId) -> bool {
        self.node_name(node) == "VIDEO"
    }

    fn is_iframe(&self, node: &NodeId) -> bool {
        self.node_name(node) == "IFRAME"
    }

    fn children(&self, node: &NodeId) -> Option<Vec<NodeId>> {
        Some(self.state.borrow().nodes[node.0].children.clone())
    }

    fn shadow_root(&self, node: &NodeId) -> Option<NodeId> {
        self.state.borrow().nodes[node.0].shadow_root
    }

    fn frame_body(&self, iframe: &NodeId) -> Option<NodeId> {
        self.state.borrow().nodes[iframe.0].frame_body
    }

    fn parent_element(&self, node: &NodeId) -> Option<NodeId> {
        let parent = self.state.borrow().nodes[node.0].parent?;
        self.is_element(parent).then_some(parent)
    }

    fn computed_z_index(&self, node: &NodeId) -> Option<String> {
        if !self.is_element(*node) {
            return None;
        }
        let z_index = self.state.borrow().nodes[node.0].z_index.clone();
        Some(z_index.unwrap_or_else(|| "auto".to_owned()))
    }

    fn has_attribute(&self, node: &NodeId, name: &str) -> bool {
        self.attribute(*node, name).is_some()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        let mut state = self.state.borrow_mut();
        let attributes = &mut state.nodes[node.0].attributes;
        match attributes.iter_mut().find(|(attr, _)| attr == name) {
            Some((_, current)) => *current = value.to_owned(),
            None => attributes.push((name.to_owned(), value.to_owned())),
        }
    }

    fn attribute_names(&self, node: &NodeId) -> Vec<String> {
        self.state.borrow().nodes[node.0]
            .attributes
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn is_content_editable(&self, node: &NodeId) -> bool {
        self.state.borrow().nodes[node.0].content_editable
    }

    fn is_touch_capable(&self) -> bool {
        self.state.borrow().touch_capable
    }

    fn create_watcher(&self, on_added: AddedNodesCallback<Self>) -> FakeWatcher {
        let mut state = self.state.borrow_mut();
        state.watchers.push(FakeWatcherState {
            callback: Some(on_added),
            roots: vec![],
        });
        FakeWatcher {
            page: self.clone(),
            index: state.watchers.len() - 1,
        }
    }
}

impl MediaElements for FakePage {
    fn ready_state(&self, video: &NodeId) -> u16 {
        self.media(*video).ready_state
    }

    fn playback_rate(&self, video: &NodeId) -> f64 {
        self.media(*video).playback_rate
    }

    fn set_playback_rate(&self, video: &NodeId, rate: f64) {
        self.update_media(*video, |m| m.playback_rate = rate);
    }

    fn set_preserves_pitch(&self, video: &NodeId) {
        self.update_media(*video, |m| m.preserves_pitch = true);
    }

    fn is_paused(&self, video: &NodeId) -> bool {
        self.media(*video).paused
    }

    fn play(&self, video: &NodeId) {
        self.update_media(*video, |m| m.paused = false);
    }

    fn pause(&self, video: &NodeId) {
        self.update_media(*video, |m| m.paused = true);
    }

    fn is_muted(&self, video: &NodeId) -> bool {
        self.media(*video).muted
    }

    fn set_muted(&self, video: &NodeId, muted: bool) {
        self.update_media(*video, |m| m.muted = muted);
    }

    fn current_time(&self, video: &NodeId) -> f64 {
        self.media(*video).current_time
    }

    fn set_current_time(&self, video: &NodeId, time: f64) {
        self.update_media(*video, |m| m.current_time = time);
    }

    fn duration(&self, video: &NodeId) -> f64 {
        self.media(*video).duration
    }

    fn toggle_picture_in_picture(&self, video: &NodeId) -> Result<(), CapabilityError> {
        if !self.media(*video).supports_pip {
            return Err(CapabilityError::PictureInPictureUnsupported);
        }
        self.update_media(*video, |m| m.pip = !m.pip);
        Ok(())
    }

    fn supports_fullscreen(&self, video: &NodeId) -> bool {
        self.media(*video).supports_fullscreen
    }

    fn is_displaying_fullscreen(&self, video: &NodeId) -> bool {
        self.media(*video).fullscreen
    }

    fn enter_fullscreen(&self, video: &NodeId) {
        self.update_media(*video, |m| m.fullscreen = true);
    }

    fn exit_fullscreen(&self, video: &NodeId) {
        self.update_media(*video, |m| m.fullscreen = false);
    }

    fn add_media_listener(&self, video: &NodeId, listener: MediaListener<Self>) {
        self.state.borrow_mut().nodes[video.0].listeners.push(listener);
    }
}

impl SnackbarView for FakePage {
    fn place(&self, location: SnackbarLocation) {
        self.state.borrow_mut().snackbar.location = Some(location);
    }

    fn render(&self, content: &SnackbarContent) {
        self.state.borrow_mut().snackbar.content = Some(content.clone());
    }

    fn set_visible(&self, visible: bool) {
        self.state.borrow_mut().snackbar.visible = visible;
    }

    fn schedule_hide(&self, delay_ms: u32) -> Option<TimerId> {
        let mut state = self.state.borrow_mut();
        state.next_timer += 1;
        let id = state.next_timer;
        state.snackbar.scheduled.push((id, delay_ms));
        Some(id)
    }

    fn cancel_hide(&self, id: TimerId) {
        self.state.borrow_mut().snackbar.canceled.push(id);
    }
}
