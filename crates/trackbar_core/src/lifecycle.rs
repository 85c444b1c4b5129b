//! Listener groups and cancellation
//!
//! Every listener the engine registers belongs to exactly one
//! [`ListenerGroup`], one group per [`ListenerScope`]. A group owns a
//! [`CancelToken`] that every one of its handlers checks before running, so
//! detaching a group revokes all of its handlers at once, including callbacks
//! the host has already queued.
//!
//! Groups hold their target weakly. Elements are borrowed from the host and may
//! be dropped before the scrollbar is unmounted; detaching a dead target is a
//! no-op.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::element::{
    Document, DocumentRef, Element, ElementId, ElementRef, ListenerId, ObserverId,
};
use crate::events::{Event, EventHandler, EventType, ResizeCallback};

/// Revocable flag shared between a group and its handlers
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Which target a group of listeners is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerScope {
    Container,
    Track,
    Thumb,
    Document,
}

impl ListenerScope {
    pub const ALL: [ListenerScope; 4] = [
        ListenerScope::Container,
        ListenerScope::Track,
        ListenerScope::Thumb,
        ListenerScope::Document,
    ];

    fn index(self) -> usize {
        match self {
            ListenerScope::Container => 0,
            ListenerScope::Track => 1,
            ListenerScope::Thumb => 2,
            ListenerScope::Document => 3,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Registration {
    Listener(ListenerId),
    Observer(ObserverId),
}

enum GroupTarget {
    Element(Weak<dyn Element>),
    Document(Weak<dyn Document>),
}

/// Listeners and observers registered on one target
pub struct ListenerGroup {
    scope: ListenerScope,
    element_id: Option<ElementId>,
    target: GroupTarget,
    token: CancelToken,
    registrations: SmallVec<[Registration; 4]>,
}

impl ListenerGroup {
    pub fn for_element(scope: ListenerScope, element: &ElementRef) -> Self {
        Self {
            scope,
            element_id: Some(element.id()),
            target: GroupTarget::Element(Rc::downgrade(element)),
            token: CancelToken::new(),
            registrations: SmallVec::new(),
        }
    }

    pub fn for_document(document: &DocumentRef) -> Self {
        Self {
            scope: ListenerScope::Document,
            element_id: None,
            target: GroupTarget::Document(Rc::downgrade(document)),
            token: CancelToken::new(),
            registrations: SmallVec::new(),
        }
    }

    /// Element the group is attached to (`None` for the document group)
    pub fn element_id(&self) -> Option<ElementId> {
        self.element_id
    }

    /// Number of live registrations
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Register `handler` for `event_type`; it stops running once the group
    /// is detached
    pub fn listen<F>(&mut self, event_type: EventType, handler: F)
    where
        F: Fn(&Event) + 'static,
    {
        if self.token.is_cancelled() {
            return;
        }
        let token = self.token.clone();
        let guarded: EventHandler = Rc::new(move |event: &Event| {
            if !token.is_cancelled() {
                handler(event);
            }
        });

        let id = match &self.target {
            GroupTarget::Element(element) => element
                .upgrade()
                .map(|element| element.add_event_listener(event_type, guarded)),
            GroupTarget::Document(document) => document
                .upgrade()
                .map(|document| document.add_event_listener(event_type, guarded)),
        };
        if let Some(id) = id {
            self.registrations.push(Registration::Listener(id));
        }
    }

    /// Observe resizes of the group's element
    pub fn observe_resize<F>(&mut self, callback: F)
    where
        F: Fn(f32, f32) + 'static,
    {
        if self.token.is_cancelled() {
            return;
        }
        let GroupTarget::Element(element) = &self.target else {
            return;
        };
        let Some(element) = element.upgrade() else {
            return;
        };
        let token = self.token.clone();
        let guarded: ResizeCallback = Rc::new(move |width, height| {
            if !token.is_cancelled() {
                callback(width, height);
            }
        });
        let id = element.observe_resize(guarded);
        self.registrations.push(Registration::Observer(id));
    }

    /// Revoke the token and remove every registration from the target
    pub fn detach(&mut self) {
        self.token.cancel();
        if self.registrations.is_empty() {
            return;
        }

        let count = self.registrations.len();
        match &self.target {
            GroupTarget::Element(element) => {
                if let Some(element) = element.upgrade() {
                    for registration in self.registrations.drain(..) {
                        match registration {
                            Registration::Listener(id) => element.remove_event_listener(id),
                            Registration::Observer(id) => element.disconnect_resize(id),
                        }
                    }
                }
            }
            GroupTarget::Document(document) => {
                if let Some(document) = document.upgrade() {
                    for registration in self.registrations.drain(..) {
                        if let Registration::Listener(id) = registration {
                            document.remove_event_listener(id);
                        }
                    }
                }
            }
        }
        self.registrations.clear();
        tracing::debug!(scope = ?self.scope, count, "detached listener group");
    }
}

impl Drop for ListenerGroup {
    fn drop(&mut self) {
        self.detach();
    }
}

/// The full set of groups owned by one scrollbar instance
#[derive(Default)]
pub struct ListenerSet {
    groups: [Option<ListenerGroup>; 4],
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `group` for its scope, detaching whatever was there first
    pub fn replace(&mut self, scope: ListenerScope, group: Option<ListenerGroup>) {
        if let Some(mut old) = self.groups[scope.index()].take() {
            old.detach();
        }
        if let Some(group) = &group {
            tracing::debug!(?scope, count = group.len(), "attached listener group");
        }
        self.groups[scope.index()] = group;
    }

    /// Detach one scope
    pub fn detach(&mut self, scope: ListenerScope) {
        self.replace(scope, None);
    }

    pub fn detach_all(&mut self) {
        for scope in ListenerScope::ALL {
            self.detach(scope);
        }
    }

    pub fn get(&self, scope: ListenerScope) -> Option<&ListenerGroup> {
        self.groups[scope.index()].as_ref()
    }

    pub fn is_attached(&self, scope: ListenerScope) -> bool {
        self.get(scope).is_some()
    }

    /// Element id the scope is currently attached to
    pub fn attached_element(&self, scope: ListenerScope) -> Option<ElementId> {
        self.get(scope).and_then(ListenerGroup::element_id)
    }

    /// Total live registrations across all groups
    pub fn registration_count(&self) -> usize {
        self.groups.iter().flatten().map(ListenerGroup::len).sum()
    }
}
