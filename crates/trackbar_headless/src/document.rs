//! In-memory document with a virtual frame loop and clock
//!
//! Nothing runs on its own. Queued events are delivered by [`flush`], animation
//! frames and resize notifications by [`run_frame`], timers by [`advance`].
//! Callbacks are always invoked with no internal borrow held, so they may
//! register or remove listeners, request frames or set timers.
//!
//! [`flush`]: HeadlessDocument::flush
//! [`run_frame`]: HeadlessDocument::run_frame
//! [`advance`]: HeadlessDocument::advance

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::time::Duration;

use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;
use trackbar_core::events::TaskCallback;
use trackbar_core::{
    event_types, Document, Element, ElementId, Event, EventHandler, EventType, FrameId,
    ListenerId, TimerId,
};

use crate::element::{handlers_for, HeadlessElement, Listener};
use crate::error::{HeadlessError, Result};

struct Frame {
    seq: u64,
    callback: TaskCallback,
}

struct Timer {
    due: Duration,
    seq: u64,
    callback: TaskCallback,
}

struct QueuedEvent {
    target: Option<ElementId>,
    event: Event,
}

#[derive(Default)]
struct DocumentState {
    next_element_id: ElementId,
    next_seq: u64,
    elements: FxHashMap<ElementId, Weak<HeadlessElement>>,
    listeners: SlotMap<ListenerId, Listener>,
    frames: SlotMap<FrameId, Frame>,
    timers: SlotMap<TimerId, Timer>,
    queue: VecDeque<QueuedEvent>,
    pending_resizes: SmallVec<[ElementId; 4]>,
    now: Duration,
}

impl DocumentState {
    fn seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

/// Document scope of the headless host
pub struct HeadlessDocument {
    self_ref: Weak<HeadlessDocument>,
    state: RefCell<DocumentState>,
}

impl std::fmt::Debug for HeadlessDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("HeadlessDocument")
            .field("elements", &state.elements.len())
            .field("listeners", &state.listeners.len())
            .field("frames", &state.frames.len())
            .field("timers", &state.timers.len())
            .field("now", &state.now)
            .finish_non_exhaustive()
    }
}

impl HeadlessDocument {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|self_ref| Self {
            self_ref: self_ref.clone(),
            state: RefCell::new(DocumentState {
                next_element_id: 1,
                ..Default::default()
            }),
        })
    }

    /// Create a detached element
    pub fn create_element(&self) -> Rc<HeadlessElement> {
        let mut state = self.state.borrow_mut();
        let id = state.next_element_id;
        state.next_element_id += 1;
        let element = Rc::new(HeadlessElement::new(id, self.self_ref.clone()));
        state.elements.insert(id, Rc::downgrade(&element));
        element
    }

    /// Look up a live element by id
    pub fn element(&self, id: ElementId) -> Option<Rc<HeadlessElement>> {
        self.state.borrow().elements.get(&id).and_then(Weak::upgrade)
    }

    fn owns(&self, element: &HeadlessElement) -> bool {
        self.element(element.id())
            .is_some_and(|owned| std::ptr::eq(Rc::as_ptr(&owned), element))
    }

    /// Attach `child` under `parent`, moving it if it already has a parent
    pub fn append_child(
        &self,
        parent: &Rc<HeadlessElement>,
        child: &Rc<HeadlessElement>,
    ) -> Result<()> {
        if !self.owns(parent) {
            return Err(HeadlessError::UnknownElement(parent.id()));
        }
        if !self.owns(child) {
            return Err(HeadlessError::UnknownElement(child.id()));
        }
        if child.contains(parent.id()) {
            return Err(HeadlessError::CycleDetected {
                parent: parent.id(),
                child: child.id(),
            });
        }
        child.set_parent(parent);
        Ok(())
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Deliver `event` to `target` synchronously
    ///
    /// Bubbling types continue to every ancestor and then to document
    /// listeners. The event's `target` is set to the element's id, and an
    /// unset timestamp is stamped from the virtual clock.
    pub fn dispatch(&self, target: &HeadlessElement, event: Event) {
        let mut event = self.stamp(event);
        event.target = Some(target.id());
        tracing::trace!(event_type = event.event_type, target = target.id(), "dispatch");

        for handler in target.handlers(event.event_type) {
            handler(&event);
        }
        if !event_types::bubbles(event.event_type) {
            return;
        }

        let mut node = target.parent();
        while let Some(element) = node {
            for handler in element.handlers(event.event_type) {
                handler(&event);
            }
            node = element.parent();
        }
        self.dispatch_document(event);
    }

    /// Deliver `event` to document listeners only
    pub fn dispatch_document(&self, event: Event) {
        let event = self.stamp(event);
        let handlers = handlers_for(&self.state.borrow().listeners, event.event_type);
        for handler in handlers {
            handler(&event);
        }
    }

    fn stamp(&self, event: Event) -> Event {
        if event.timestamp != 0 {
            return event;
        }
        let millis = u64::try_from(self.now().as_millis()).unwrap_or(u64::MAX);
        event.with_timestamp(millis)
    }

    pub(crate) fn queue_event(&self, target: Option<ElementId>, event: Event) {
        self.state
            .borrow_mut()
            .queue
            .push_back(QueuedEvent { target, event });
    }

    pub(crate) fn queue_resize(&self, id: ElementId) {
        let mut state = self.state.borrow_mut();
        if !state.pending_resizes.contains(&id) {
            state.pending_resizes.push(id);
        }
    }

    /// Deliver queued events, including ones queued while flushing
    ///
    /// Returns the number of events delivered.
    pub fn flush(&self) -> usize {
        let mut delivered = 0;
        loop {
            let Some(queued) = self.state.borrow_mut().queue.pop_front() else {
                break;
            };
            delivered += 1;
            match queued.target.and_then(|id| self.element(id)) {
                Some(element) => self.dispatch(&element, queued.event),
                None if queued.target.is_none() => self.dispatch_document(queued.event),
                // Target dropped before delivery
                None => {}
            }
        }
        delivered
    }

    /// Run one frame
    ///
    /// Flushes events, delivers resize notifications, then runs the animation
    /// frames pending at that point. Frames requested from inside a frame
    /// callback run on the next frame. Returns the number
    /// of frame callbacks run.
    pub fn run_frame(&self) -> usize {
        self.flush();

        let resized = std::mem::take(&mut self.state.borrow_mut().pending_resizes);
        for id in resized {
            let Some(element) = self.element(id) else {
                continue;
            };
            let (width, height) = element.size();
            for callback in element.resize_callbacks() {
                callback(width, height);
            }
        }

        let mut frames: Vec<Frame> = {
            let mut state = self.state.borrow_mut();
            state.frames.drain().map(|(_, frame)| frame).collect()
        };
        frames.sort_by_key(|frame| frame.seq);
        let count = frames.len();
        for frame in frames {
            (frame.callback)();
        }
        self.flush();

        tracing::trace!(count, "frame");
        count
    }

    /// Move the virtual clock forward, firing due timers in order
    ///
    /// Each timer fires with the clock set to its due time. Returns the number
    /// of timers fired.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.state.borrow().now + by;
        let mut fired = 0;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let due = state
                    .timers
                    .iter()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(_, timer)| (timer.due, timer.seq))
                    .map(|(id, _)| id);
                let timer = due.and_then(|id| state.timers.remove(id));
                if let Some(timer) = &timer {
                    state.now = timer.due;
                }
                timer
            };
            let Some(timer) = next else {
                break;
            };
            fired += 1;
            self.flush();
            (timer.callback)();
            self.flush();
        }
        self.state.borrow_mut().now = target;
        fired
    }

    /// Virtual time since the document was created
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

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

    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    pub fn pending_events(&self) -> usize {
        self.state.borrow().queue.len()
    }
}

impl Document for HeadlessDocument {
    fn add_event_listener(&self, event_type: EventType, handler: EventHandler) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let seq = state.seq();
        state.listeners.insert(Listener {
            seq,
            event_type,
            handler,
        })
    }

    fn remove_event_listener(&self, id: ListenerId) {
        self.state.borrow_mut().listeners.remove(id);
    }

    fn request_animation_frame(&self, callback: TaskCallback) -> FrameId {
        let mut state = self.state.borrow_mut();
        let seq = state.seq();
        state.frames.insert(Frame { seq, callback })
    }

    fn cancel_animation_frame(&self, id: FrameId) {
        self.state.borrow_mut().frames.remove(id);
    }

    fn set_timeout(&self, delay: Duration, callback: TaskCallback) -> TimerId {
        let mut state = self.state.borrow_mut();
        let seq = state.seq();
        let due = state.now + delay;
        state.timers.insert(Timer { due, seq, callback })
    }

    fn clear_timeout(&self, id: TimerId) {
        self.state.borrow_mut().timers.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn element_ids_are_unique() {
        let document = HeadlessDocument::new();
        let a = document.create_element();
        let b = document.create_element();
        assert_ne!(a.id(), b.id());
        assert!(document.element(a.id()).is_some());
    }

    #[test]
    fn dropped_elements_leave_the_registry() {
        let document = HeadlessDocument::new();
        let id = document.create_element().id();
        assert!(document.element(id).is_none());
    }

    #[test]
    fn append_rejects_cycles() {
        let document = HeadlessDocument::new();
        let parent = document.create_element();
        let child = document.create_element();
        document.append_child(&parent, &child).unwrap();

        assert_eq!(
            document.append_child(&child, &parent),
            Err(HeadlessError::CycleDetected {
                parent: child.id(),
                child: parent.id(),
            })
        );
        assert!(document.append_child(&parent, &parent).is_err());
    }

    #[test]
    fn append_rejects_foreign_elements() {
        let document = HeadlessDocument::new();
        let other = HeadlessDocument::new();
        let mine = document.create_element();
        let theirs = other.create_element();
        assert!(matches!(
            document.append_child(&mine, &theirs),
            Err(HeadlessError::UnknownElement(_))
        ));
    }

    #[test]
    fn timers_fire_in_due_order() {
        let document = HeadlessDocument::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (label, ms) in [("late", 30u64), ("early", 10), ("mid", 20)] {
            let order = order.clone();
            document.set_timeout(
                Duration::from_millis(ms),
                Box::new(move || order.borrow_mut().push(label)),
            );
        }

        assert_eq!(document.advance(Duration::from_millis(15)), 1);
        assert_eq!(document.advance(Duration::from_millis(100)), 2);
        assert_eq!(*order.borrow(), vec!["early", "mid", "late"]);
        assert_eq!(document.now(), Duration::from_millis(115));
    }

    #[test]
    fn cleared_timers_never_fire() {
        let document = HeadlessDocument::new();
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let id = document.set_timeout(Duration::from_millis(5), Box::new(move || flag.set(true)));
        document.clear_timeout(id);
        document.advance(Duration::from_secs(1));
        assert!(!fired.get());
        assert_eq!(document.pending_timers(), 0);
    }

    #[test]
    fn frames_requested_during_a_frame_wait_for_the_next() {
        let document = HeadlessDocument::new();
        let runs = Rc::new(Cell::new(0));

        let weak = Rc::downgrade(&document);
        let counter = runs.clone();
        document.request_animation_frame(Box::new(move || {
            counter.set(counter.get() + 1);
            if let Some(document) = weak.upgrade() {
                let counter = counter.clone();
                document.request_animation_frame(Box::new(move || counter.set(counter.get() + 1)));
            }
        }));

        assert_eq!(document.run_frame(), 1);
        assert_eq!(runs.get(), 1);
        assert_eq!(document.pending_frames(), 1);
        assert_eq!(document.run_frame(), 1);
        assert_eq!(runs.get(), 2);
    }
}
