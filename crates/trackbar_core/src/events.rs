//! Event vocabulary shared by the engine and its hosts
//!
//! Hosts translate their native events (DOM pointer events, winit input, test
//! scripts) into [`Event`] values and deliver them to the handlers the engine
//! registered through [`crate::element::Element::add_event_listener`].

use std::rc::Rc;

use crate::element::ElementId;

/// Event type identifier
pub type EventType = u32;

/// Event types the scrollbar engine listens for
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    pub const WHEEL: EventType = 12;
    pub const SCROLL: EventType = 30;
    /// Scroll gesture ended
    pub const SCROLL_END: EventType = 31;

    /// Whether events of this type propagate from the target to its ancestors
    /// and finally to document-scope listeners.
    pub const fn bubbles(event_type: EventType) -> bool {
        matches!(event_type, POINTER_DOWN | POINTER_UP | POINTER_MOVE | WHEEL)
    }
}

/// Pointer button codes, matching `MouseEvent.button`
pub mod buttons {
    pub const PRIMARY: u8 = 0;
    pub const AUXILIARY: u8 = 1;
    pub const SECONDARY: u8 = 2;
}

/// A UI event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    /// Innermost element the event was dispatched to, if any
    pub target: Option<ElementId>,
    pub data: EventData,
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    /// Pointer position in client (viewport) coordinates
    Pointer {
        x: f32,
        y: f32,
        button: u8,
        pressure: f32,
    },
    Wheel {
        delta_x: f32,
        delta_y: f32,
    },
    None,
}

impl Event {
    pub fn new(event_type: EventType, target: Option<ElementId>, data: EventData) -> Self {
        Self {
            event_type,
            target,
            data,
            timestamp: 0,
        }
    }

    /// Pointer event with the primary button
    pub fn pointer(event_type: EventType, target: Option<ElementId>, x: f32, y: f32) -> Self {
        Self::pointer_with_button(event_type, target, x, y, buttons::PRIMARY)
    }

    pub fn pointer_with_button(
        event_type: EventType,
        target: Option<ElementId>,
        x: f32,
        y: f32,
        button: u8,
    ) -> Self {
        Self::new(
            event_type,
            target,
            EventData::Pointer {
                x,
                y,
                button,
                pressure: 0.0,
            },
        )
    }

    pub fn wheel(target: Option<ElementId>, delta_x: f32, delta_y: f32) -> Self {
        Self::new(
            event_types::WHEEL,
            target,
            EventData::Wheel { delta_x, delta_y },
        )
    }

    /// Event without a payload (scroll, scroll-end, enter/leave)
    pub fn bare(event_type: EventType, target: Option<ElementId>) -> Self {
        Self::new(event_type, target, EventData::None)
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Client coordinate of a pointer event
    pub fn client_coordinate(&self) -> Option<Coordinate> {
        match self.data {
            EventData::Pointer { x, y, .. } => Some(Coordinate { x, y }),
            _ => None,
        }
    }

    /// True for pointer events carrying the primary button
    pub fn is_primary_button(&self) -> bool {
        matches!(
            self.data,
            EventData::Pointer {
                button: buttons::PRIMARY,
                ..
            }
        )
    }
}

/// Generic 2D point used for pointer tracking and drag deltas
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coordinate {
    pub x: f32,
    pub y: f32,
}

impl Coordinate {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Event handler function type
///
/// Handlers are reference counted so hosts can snapshot the handler list
/// before invoking it; a handler may detach listeners while running.
pub type EventHandler = Rc<dyn Fn(&Event)>;

/// Callback invoked by a host's resize observer with the new border-box size
pub type ResizeCallback = Rc<dyn Fn(f32, f32)>;

/// Callback for animation frames and timers
pub type TaskCallback = Box<dyn FnOnce()>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_events_default_to_primary_button() {
        let event = Event::pointer(event_types::POINTER_DOWN, Some(7), 10.0, 20.0);
        assert!(event.is_primary_button());
        assert_eq!(event.client_coordinate(), Some(Coordinate::new(10.0, 20.0)));
    }

    #[test]
    fn other_buttons_are_not_primary() {
        for button in [buttons::AUXILIARY, buttons::SECONDARY] {
            let event =
                Event::pointer_with_button(event_types::POINTER_DOWN, None, 0.0, 0.0, button);
            assert!(!event.is_primary_button());
        }
    }

    #[test]
    fn only_pointer_and_wheel_events_bubble() {
        assert!(event_types::bubbles(event_types::POINTER_MOVE));
        assert!(event_types::bubbles(event_types::WHEEL));
        assert!(!event_types::bubbles(event_types::SCROLL));
        assert!(!event_types::bubbles(event_types::POINTER_ENTER));
    }

    #[test]
    fn bare_events_have_no_coordinate() {
        let event = Event::bare(event_types::SCROLL, Some(1));
        assert_eq!(event.client_coordinate(), None);
        assert!(!event.is_primary_button());
    }
}
