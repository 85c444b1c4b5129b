//! In-memory element
//!
//! Layout is not computed: tests and adapters set rects, client sizes and
//! scroll sizes directly. Scroll positions are clamped to the scrollable
//! range and every effective change queues a `SCROLL` event on the owning
//! document, delivered by [`HeadlessDocument::flush`].

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;
use trackbar_core::{
    event_types, Element, ElementId, Event, EventHandler, EventType, ListenerId, ObserverId,
    Overflow, Rect,
};
use trackbar_core::events::ResizeCallback;

use crate::document::HeadlessDocument;

pub(crate) struct Listener {
    pub(crate) seq: u64,
    pub(crate) event_type: EventType,
    pub(crate) handler: EventHandler,
}

/// Snapshot handlers registered for `event_type`, in registration order
pub(crate) fn handlers_for(
    listeners: &SlotMap<ListenerId, Listener>,
    event_type: EventType,
) -> SmallVec<[EventHandler; 4]> {
    let mut matching: SmallVec<[&Listener; 4]> = listeners
        .values()
        .filter(|listener| listener.event_type == event_type)
        .collect();
    matching.sort_by_key(|listener| listener.seq);
    matching
        .into_iter()
        .map(|listener| listener.handler.clone())
        .collect()
}

#[derive(Default)]
struct ElementState {
    rect: Rect,
    client_width: f32,
    client_height: f32,
    scroll_width: f32,
    scroll_height: f32,
    scroll_left: f32,
    scroll_top: f32,
    overflow_x: Overflow,
    overflow_y: Overflow,
    parent: Option<Weak<HeadlessElement>>,
    attributes: FxHashMap<String, String>,
    style: FxHashMap<String, String>,
    listeners: SlotMap<ListenerId, Listener>,
    observers: SlotMap<ObserverId, ResizeCallback>,
    next_seq: u64,
}

/// Element owned by a [`HeadlessDocument`]
pub struct HeadlessElement {
    id: ElementId,
    document: Weak<HeadlessDocument>,
    state: RefCell<ElementState>,
    listeners_added: Cell<usize>,
}

impl std::fmt::Debug for HeadlessElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("HeadlessElement")
            .field("id", &self.id)
            .field("rect", &state.rect)
            .field("scroll_left", &state.scroll_left)
            .field("scroll_top", &state.scroll_top)
            .field("listeners", &state.listeners.len())
            .finish_non_exhaustive()
    }
}

impl HeadlessElement {
    pub(crate) fn new(id: ElementId, document: Weak<HeadlessDocument>) -> Self {
        Self {
            id,
            document,
            state: RefCell::new(ElementState::default()),
            listeners_added: Cell::new(0),
        }
    }

    pub fn set_rect(&self, rect: Rect) {
        self.state.borrow_mut().rect = rect;
    }

    /// Visible extent, as `clientWidth`/`clientHeight`
    pub fn set_client_size(&self, width: f32, height: f32) {
        let mut state = self.state.borrow_mut();
        state.client_width = width;
        state.client_height = height;
    }

    /// Content extent, as `scrollWidth`/`scrollHeight`
    pub fn set_scroll_size(&self, width: f32, height: f32) {
        let mut state = self.state.borrow_mut();
        state.scroll_width = width;
        state.scroll_height = height;
    }

    pub fn set_overflow(&self, x: Overflow, y: Overflow) {
        let mut state = self.state.borrow_mut();
        state.overflow_x = x;
        state.overflow_y = y;
    }

    /// Change the element's size and schedule a resize notification for the
    /// next frame
    pub fn resize(&self, width: f32, height: f32) {
        {
            let mut state = self.state.borrow_mut();
            state.rect.width = width;
            state.rect.height = height;
            state.client_width = width;
            state.client_height = height;
        }
        if let Some(document) = self.document.upgrade() {
            document.queue_resize(self.id);
        }
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.state.borrow().attributes.get(name).cloned()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.state.borrow().attributes.contains_key(name)
    }

    pub fn style_property(&self, name: &str) -> Option<String> {
        self.state.borrow().style.get(name).cloned()
    }

    /// Live listener registrations
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    pub fn listener_count_for(&self, event_type: EventType) -> usize {
        self.state
            .borrow()
            .listeners
            .values()
            .filter(|listener| listener.event_type == event_type)
            .count()
    }

    /// Total `add_event_listener` calls over the element's lifetime
    pub fn listeners_added(&self) -> usize {
        self.listeners_added.get()
    }

    pub fn observer_count(&self) -> usize {
        self.state.borrow().observers.len()
    }

    pub fn parent(&self) -> Option<Rc<HeadlessElement>> {
        self.state.borrow().parent.as_ref().and_then(Weak::upgrade)
    }

    pub(crate) fn set_parent(&self, parent: &Rc<HeadlessElement>) {
        self.state.borrow_mut().parent = Some(Rc::downgrade(parent));
    }

    pub(crate) fn handlers(&self, event_type: EventType) -> SmallVec<[EventHandler; 4]> {
        handlers_for(&self.state.borrow().listeners, event_type)
    }

    pub(crate) fn resize_callbacks(&self) -> SmallVec<[ResizeCallback; 2]> {
        self.state.borrow().observers.values().cloned().collect()
    }

    pub(crate) fn size(&self) -> (f32, f32) {
        let rect = self.state.borrow().rect;
        (rect.width, rect.height)
    }

    fn queue_scroll(&self) {
        if let Some(document) = self.document.upgrade() {
            document.queue_event(Some(self.id), Event::bare(event_types::SCROLL, Some(self.id)));
        }
    }
}

fn clamp_scroll(value: f32, content: f32, viewport: f32) -> f32 {
    let max = (content - viewport).max(0.0);
    if value.is_finite() {
        value.clamp(0.0, max)
    } else {
        0.0
    }
}

impl Element for HeadlessElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounding_client_rect(&self) -> Rect {
        self.state.borrow().rect
    }

    fn client_width(&self) -> f32 {
        self.state.borrow().client_width
    }

    fn client_height(&self) -> f32 {
        self.state.borrow().client_height
    }

    fn scroll_width(&self) -> f32 {
        self.state.borrow().scroll_width
    }

    fn scroll_height(&self) -> f32 {
        self.state.borrow().scroll_height
    }

    fn scroll_left(&self) -> f32 {
        self.state.borrow().scroll_left
    }

    fn scroll_top(&self) -> f32 {
        self.state.borrow().scroll_top
    }

    fn set_scroll_left(&self, value: f32) {
        let changed = {
            let mut state = self.state.borrow_mut();
            let clamped = clamp_scroll(value, state.scroll_width, state.client_width);
            let changed = clamped != state.scroll_left;
            state.scroll_left = clamped;
            changed
        };
        if changed {
            self.queue_scroll();
        }
    }

    fn set_scroll_top(&self, value: f32) {
        let changed = {
            let mut state = self.state.borrow_mut();
            let clamped = clamp_scroll(value, state.scroll_height, state.client_height);
            let changed = clamped != state.scroll_top;
            state.scroll_top = clamped;
            changed
        };
        if changed {
            self.queue_scroll();
        }
    }

    fn overflow_x(&self) -> Overflow {
        self.state.borrow().overflow_x
    }

    fn overflow_y(&self) -> Overflow {
        self.state.borrow().overflow_y
    }

    fn contains(&self, other: ElementId) -> bool {
        if other == self.id {
            return true;
        }
        let Some(mut node) = self.document.upgrade().and_then(|doc| doc.element(other)) else {
            return false;
        };
        while let Some(parent) = node.parent() {
            if parent.id == self.id {
                return true;
            }
            node = parent;
        }
        false
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .attributes
            .insert(name.to_owned(), value.to_owned());
    }

    fn remove_attribute(&self, name: &str) {
        self.state.borrow_mut().attributes.remove(name);
    }

    fn set_style_property(&self, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .style
            .insert(name.to_owned(), value.to_owned());
    }

    fn add_event_listener(&self, event_type: EventType, handler: EventHandler) -> ListenerId {
        self.listeners_added.set(self.listeners_added.get() + 1);
        let mut state = self.state.borrow_mut();
        let seq = state.next_seq;
        state.next_seq += 1;
        state.listeners.insert(Listener {
            seq,
            event_type,
            handler,
        })
    }

    fn remove_event_listener(&self, id: ListenerId) {
        self.state.borrow_mut().listeners.remove(id);
    }

    fn observe_resize(&self, callback: ResizeCallback) -> ObserverId {
        self.state.borrow_mut().observers.insert(callback)
    }

    fn disconnect_resize(&self, id: ObserverId) {
        self.state.borrow_mut().observers.remove(id);
    }
}
