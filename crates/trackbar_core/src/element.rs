//! Host abstraction for elements and the document
//!
//! The engine never talks to a concrete UI toolkit. A host (a browser binding,
//! a native toolkit, or the in-memory `trackbar_headless` crate) implements
//! [`Element`] and [`Document`] and hands the engine `Rc` handles to them.
//!
//! Hosts must not dispatch events synchronously from inside a setter such as
//! [`Element::set_scroll_left`]; scroll notifications are queued and delivered
//! later, the way browsers deliver `scroll` events.

use std::rc::Rc;
use std::time::Duration;

use slotmap::new_key_type;

use crate::events::{EventHandler, EventType, ResizeCallback, TaskCallback};

/// Stable identity of an element within its host
pub type ElementId = u64;

/// Shared handle to a host element
pub type ElementRef = Rc<dyn Element>;

/// Shared handle to a host document
pub type DocumentRef = Rc<dyn Document>;

new_key_type! {
    /// Registration key returned by `add_event_listener`
    pub struct ListenerId;
    /// Registration key returned by `observe_resize`
    pub struct ObserverId;
    /// Registration key returned by `request_animation_frame`
    pub struct FrameId;
    /// Registration key returned by `set_timeout`
    pub struct TimerId;
}

/// Axis-aligned rectangle in client coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Inclusive containment, matching `getBoundingClientRect` hit checks
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left() && x <= self.right() && y >= self.top() && y <= self.bottom()
    }
}

/// Computed overflow value of an element along one axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
    Auto,
}

/// A host element the engine can observe and write to
///
/// All methods take `&self`; hosts use interior mutability. Layout reads
/// return CSS pixels.
pub trait Element {
    fn id(&self) -> ElementId;

    fn bounding_client_rect(&self) -> Rect;

    /// Visible extent excluding borders and native scrollbars
    fn client_width(&self) -> f32;
    fn client_height(&self) -> f32;

    /// Total scrollable content extent
    fn scroll_width(&self) -> f32;
    fn scroll_height(&self) -> f32;

    fn scroll_left(&self) -> f32;
    fn scroll_top(&self) -> f32;
    fn set_scroll_left(&self, value: f32);
    fn set_scroll_top(&self, value: f32);

    fn overflow_x(&self) -> Overflow;
    fn overflow_y(&self) -> Overflow;

    /// True if `other` is this element or one of its descendants
    fn contains(&self, other: ElementId) -> bool;

    fn set_attribute(&self, name: &str, value: &str);
    fn remove_attribute(&self, name: &str);
    fn set_style_property(&self, name: &str, value: &str);

    fn add_event_listener(&self, event_type: EventType, handler: EventHandler) -> ListenerId;
    fn remove_event_listener(&self, id: ListenerId);

    fn observe_resize(&self, callback: ResizeCallback) -> ObserverId;
    fn disconnect_resize(&self, id: ObserverId);
}

/// Document/window scope of a host
pub trait Document {
    fn add_event_listener(&self, event_type: EventType, handler: EventHandler) -> ListenerId;
    fn remove_event_listener(&self, id: ListenerId);

    fn request_animation_frame(&self, callback: TaskCallback) -> FrameId;
    fn cancel_animation_frame(&self, id: FrameId);

    fn set_timeout(&self, delay: Duration, callback: TaskCallback) -> TimerId;
    fn clear_timeout(&self, id: TimerId);
}
