//! Scrollbar axis instance
//!
//! [`ScrollBarInstance`] is the object framework adapters create. It is
//! configured by an [`Axis`] and otherwise identical for horizontal and
//! vertical bars.
//!
//! ```rust,ignore
//! use trackbar_core::{ScrollBarInstance, ScrollBarOptions};
//!
//! let options = ScrollBarOptions::new()
//!     .container(move || Some(container.clone()))
//!     .track(move || Some(track.clone()))
//!     .thumb(move || Some(thumb.clone()));
//!
//! let bar = ScrollBarInstance::vertical(document, options);
//! let unmount = bar.mount();
//! // ... on every re-render
//! bar.update_options(ScrollBarOptions::new().track(move || Some(new_track.clone())));
//! // ... on teardown
//! unmount();
//! ```
//!
//! Every element accessor may return `None`; operations that need a missing
//! element do nothing.
//!
//! Handlers hold the instance weakly and every listener group carries its own
//! cancellation token, so callbacks delivered after `unmount` (or after the
//! instance is dropped) never touch its state. The internal borrow is always
//! released before calling into the host (scroll writes) or into the
//! `on_store_change` observer.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::auto_hide::{self, Activity, TimerAction};
use crate::config::{RenderTiming, ScrollbarConfig};
use crate::element::{DocumentRef, Element, ElementId, ElementRef, FrameId, TimerId};
use crate::error::Result;
use crate::events::{event_types, Coordinate, Event, EventData};
use crate::geometry::{
    scroll_offset_from_drag, scroll_offset_from_track_click, Axis, AxisDescriptor, DraggingInfo,
};
use crate::lifecycle::{ListenerGroup, ListenerScope, ListenerSet};
use crate::store::{self, ScrollBarStore, StorePatch};

/// Returns the element currently rendered for a role
pub type ElementAccessor = Rc<dyn Fn() -> Option<ElementRef>>;

/// Receives every merged store snapshot
pub type StoreObserver = Rc<dyn Fn(&ScrollBarStore)>;

/// Element accessors and adapter hooks
///
/// Every field is optional. [`ScrollBarInstance::update_options`] merges only
/// the fields that are set.
#[derive(Clone, Default)]
pub struct ScrollBarOptions {
    pub get_container_element: Option<ElementAccessor>,
    pub get_track_element: Option<ElementAccessor>,
    pub get_thumb_element: Option<ElementAccessor>,
    pub on_store_change: Option<StoreObserver>,
}

impl ScrollBarOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container<F>(mut self, accessor: F) -> Self
    where
        F: Fn() -> Option<ElementRef> + 'static,
    {
        self.get_container_element = Some(Rc::new(accessor));
        self
    }

    pub fn track<F>(mut self, accessor: F) -> Self
    where
        F: Fn() -> Option<ElementRef> + 'static,
    {
        self.get_track_element = Some(Rc::new(accessor));
        self
    }

    pub fn thumb<F>(mut self, accessor: F) -> Self
    where
        F: Fn() -> Option<ElementRef> + 'static,
    {
        self.get_thumb_element = Some(Rc::new(accessor));
        self
    }

    pub fn on_store_change<F>(mut self, observer: F) -> Self
    where
        F: Fn(&ScrollBarStore) + 'static,
    {
        self.on_store_change = Some(Rc::new(observer));
        self
    }

    /// Overlay the fields set in `other`
    pub fn merge(&mut self, other: ScrollBarOptions) {
        if other.get_container_element.is_some() {
            self.get_container_element = other.get_container_element;
        }
        if other.get_track_element.is_some() {
            self.get_track_element = other.get_track_element;
        }
        if other.get_thumb_element.is_some() {
            self.get_thumb_element = other.get_thumb_element;
        }
        if other.on_store_change.is_some() {
            self.on_store_change = other.on_store_change;
        }
    }
}

impl fmt::Debug for ScrollBarOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollBarOptions")
            .field("get_container_element", &self.get_container_element.is_some())
            .field("get_track_element", &self.get_track_element.is_some())
            .field("get_thumb_element", &self.get_thumb_element.is_some())
            .field("on_store_change", &self.on_store_change.is_some())
            .finish()
    }
}

/// Elements resolved from the accessors at one point in time
#[derive(Clone, Default)]
struct Elements {
    container: Option<ElementRef>,
    track: Option<ElementRef>,
    thumb: Option<ElementRef>,
}

impl Elements {
    fn for_scope(&self, scope: ListenerScope) -> Option<&ElementRef> {
        match scope {
            ListenerScope::Container => self.container.as_ref(),
            ListenerScope::Track => self.track.as_ref(),
            ListenerScope::Thumb => self.thumb.as_ref(),
            ListenerScope::Document => None,
        }
    }

    /// Track if present, else the thumb
    fn render_target(&self) -> Option<&ElementRef> {
        self.track.as_ref().or(self.thumb.as_ref())
    }
}

fn resolve(accessor: Option<ElementAccessor>) -> Option<ElementRef> {
    accessor.and_then(|accessor| accessor())
}

struct Inner {
    descriptor: &'static AxisDescriptor,
    document: DocumentRef,
    options: ScrollBarOptions,
    config: ScrollbarConfig,
    store: ScrollBarStore,
    dragging: Option<DraggingInfo>,
    pointer_in_container: bool,
    listeners: ListenerSet,
    mounted: bool,
    pending_frame: Option<FrameId>,
    hide_timer: Option<TimerId>,
}

type Shared = Rc<RefCell<Inner>>;

/// One direction of scrollbar behaviour for one container
pub struct ScrollBarInstance {
    inner: Shared,
}

impl fmt::Debug for ScrollBarInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ScrollBarInstance")
            .field("axis", &inner.descriptor.axis)
            .field("mounted", &inner.mounted)
            .field("store", &inner.store)
            .finish_non_exhaustive()
    }
}

impl ScrollBarInstance {
    /// Create an instance with the default configuration
    ///
    /// Does not attach listeners or touch any element.
    pub fn new(axis: Axis, document: DocumentRef, options: ScrollBarOptions) -> Self {
        let config = ScrollbarConfig::default();
        Self {
            inner: Rc::new(RefCell::new(Inner {
                descriptor: axis.descriptor(),
                document,
                options,
                config,
                store: ScrollBarStore::new(config.visibility.initially_visible()),
                dragging: None,
                pointer_in_container: false,
                listeners: ListenerSet::new(),
                mounted: false,
                pending_frame: None,
                hide_timer: None,
            })),
        }
    }

    pub fn horizontal(document: DocumentRef, options: ScrollBarOptions) -> Self {
        Self::new(Axis::Horizontal, document, options)
    }

    pub fn vertical(document: DocumentRef, options: ScrollBarOptions) -> Self {
        Self::new(Axis::Vertical, document, options)
    }

    /// Create an instance with a validated configuration
    pub fn with_config(
        axis: Axis,
        document: DocumentRef,
        options: ScrollBarOptions,
        config: ScrollbarConfig,
    ) -> Result<Self> {
        let instance = Self::new(axis, document, options);
        instance.set_config(config)?;
        Ok(instance)
    }

    pub fn axis(&self) -> Axis {
        self.inner.borrow().descriptor.axis
    }

    /// Snapshot of the current state
    pub fn store(&self) -> ScrollBarStore {
        self.inner.borrow().store
    }

    pub fn config(&self) -> ScrollbarConfig {
        self.inner.borrow().config
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.borrow().mounted
    }

    /// Listener and observer registrations currently held on host targets
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.registration_count()
    }

    /// Element a listener scope is attached to, if any
    pub fn attached_element(&self, scope: ListenerScope) -> Option<ElementId> {
        self.inner.borrow().listeners.attached_element(scope)
    }

    /// Replace the configuration
    ///
    /// Resets the visibility flag to the new mode's initial value and drops
    /// any pending hide timer.
    pub fn set_config(&self, config: ScrollbarConfig) -> Result<()> {
        if let Err(err) = config.validate() {
            tracing::warn!(%err, "rejected scrollbar config");
            return Err(err);
        }
        self.inner.borrow_mut().config = config;
        cancel_hide(&self.inner);
        update_store(
            &self.inner,
            StorePatch::new().visible(config.visibility.initially_visible()),
        );
        if self.is_mounted() {
            refresh(&self.inner, StorePatch::new());
        }
        Ok(())
    }

    /// Attach listeners, compute geometry and schedule the first render
    ///
    /// The returned callback is equivalent to [`ScrollBarInstance::unmount`].
    pub fn mount(&self) -> impl Fn() + 'static {
        mount(&self.inner);
        let weak = Rc::downgrade(&self.inner);
        move || {
            if let Some(inner) = weak.upgrade() {
                unmount(&inner);
            }
        }
    }

    /// Detach every listener; safe to call repeatedly or before `mount`
    pub fn unmount(&self) {
        unmount(&self.inner);
    }

    /// Merge new options and re-attach the listener groups whose element
    /// changed
    ///
    /// Identity is decided by the elements the accessors return now, not by
    /// the accessor closures.
    pub fn update_options(&self, options: ScrollBarOptions) {
        let mounted = {
            let mut inner = self.inner.borrow_mut();
            inner.options.merge(options);
            inner.mounted
        };
        if !mounted {
            return;
        }

        let elements = resolve_elements(&self.inner);
        let changed: Vec<ListenerScope> = {
            let inner = self.inner.borrow();
            [ListenerScope::Container, ListenerScope::Track, ListenerScope::Thumb]
                .into_iter()
                .filter(|scope| {
                    inner.listeners.attached_element(*scope)
                        != elements.for_scope(*scope).map(|element| element.id())
                })
                .collect()
        };
        if changed.is_empty() {
            return;
        }

        tracing::debug!(?changed, "scrollbar elements changed, re-attaching");
        for scope in changed {
            attach(&self.inner, scope, &elements);
        }
        refresh(&self.inner, StorePatch::new());
        request_render(&self.inner);
    }

    /// Merge a partial update into the store
    ///
    /// Returns `false` if nothing changed, in which case nothing renders.
    pub fn update_store(&self, patch: StorePatch) -> bool {
        update_store(&self.inner, patch)
    }

    /// Recompute track and thumb geometry from the current layout
    pub fn refresh(&self) {
        refresh(&self.inner, StorePatch::new());
    }
}

fn resolve_elements(this: &Shared) -> Elements {
    let (container, track, thumb) = {
        let inner = this.borrow();
        (
            inner.options.get_container_element.clone(),
            inner.options.get_track_element.clone(),
            inner.options.get_thumb_element.clone(),
        )
    };
    Elements {
        container: resolve(container),
        track: resolve(track),
        thumb: resolve(thumb),
    }
}

fn mount(this: &Shared) {
    if this.borrow().mounted {
        return;
    }
    this.borrow_mut().mounted = true;

    let elements = resolve_elements(this);
    for scope in ListenerScope::ALL {
        attach(this, scope, &elements);
    }
    tracing::debug!(
        axis = ?this.borrow().descriptor.axis,
        listeners = this.borrow().listeners.registration_count(),
        "scrollbar mounted"
    );

    refresh(this, StorePatch::new());
    request_render(this);
}

fn unmount(this: &Shared) {
    let was_mounted = {
        let mut inner = this.borrow_mut();
        inner.dragging = None;
        inner.pointer_in_container = false;
        inner.mounted
    };
    update_store(
        this,
        StorePatch::new()
            .dragging_thumb(false)
            .hovering_thumb(false)
            .hovering_track(false)
            .scrolling(false),
    );
    // Flush the cleared flags before the render target is let go
    if was_mounted {
        render_now(this);
    }

    let (document, frame, timer) = {
        let mut inner = this.borrow_mut();
        inner.mounted = false;
        inner.listeners.detach_all();
        (
            inner.document.clone(),
            inner.pending_frame.take(),
            inner.hide_timer.take(),
        )
    };
    if let Some(frame) = frame {
        document.cancel_animation_frame(frame);
    }
    if let Some(timer) = timer {
        document.clear_timeout(timer);
    }
    if was_mounted {
        tracing::debug!("scrollbar unmounted");
    }
}

type Handler = fn(&Shared, &Event);

fn bind(weak: &Weak<RefCell<Inner>>, handler: Handler) -> impl Fn(&Event) + 'static {
    let weak = weak.clone();
    move |event: &Event| {
        if let Some(inner) = weak.upgrade() {
            handler(&inner, event);
        }
    }
}

/// Build the group for `scope` from `elements` and swap it in
fn attach(this: &Shared, scope: ListenerScope, elements: &Elements) {
    let weak = Rc::downgrade(this);
    let group = match scope {
        ListenerScope::Container => elements.container.as_ref().map(|container| {
            let mut group = ListenerGroup::for_element(scope, container);
            group.listen(event_types::POINTER_MOVE, bind(&weak, on_container_pointer_move));
            group.listen(event_types::POINTER_ENTER, bind(&weak, on_container_pointer_enter));
            group.listen(event_types::POINTER_LEAVE, bind(&weak, on_container_pointer_leave));
            group.listen(event_types::SCROLL, bind(&weak, on_container_scroll));
            group.listen(event_types::SCROLL_END, bind(&weak, on_container_scroll_end));
            let resize_weak = weak.clone();
            group.observe_resize(move |_, _| {
                if let Some(inner) = resize_weak.upgrade() {
                    refresh(&inner, StorePatch::new());
                }
            });
            group
        }),
        ListenerScope::Track => elements.track.as_ref().map(|track| {
            let mut group = ListenerGroup::for_element(scope, track);
            group.listen(event_types::POINTER_DOWN, bind(&weak, on_track_pointer_down));
            group.listen(event_types::WHEEL, bind(&weak, on_track_wheel));
            let resize_weak = weak.clone();
            group.observe_resize(move |_, _| {
                if let Some(inner) = resize_weak.upgrade() {
                    refresh(&inner, StorePatch::new());
                }
            });
            group
        }),
        ListenerScope::Thumb => elements.thumb.as_ref().map(|thumb| {
            let mut group = ListenerGroup::for_element(scope, thumb);
            group.listen(event_types::POINTER_DOWN, bind(&weak, on_thumb_pointer_down));
            group.listen(event_types::WHEEL, bind(&weak, on_thumb_wheel));
            group
        }),
        ListenerScope::Document => {
            let document = this.borrow().document.clone();
            let mut group = ListenerGroup::for_document(&document);
            group.listen(event_types::POINTER_MOVE, bind(&weak, on_document_pointer_move));
            group.listen(event_types::POINTER_UP, bind(&weak, on_document_pointer_up));
            Some(group)
        }
    };
    this.borrow_mut().listeners.replace(scope, group);
}

// ============================================================================
// Store and render pipeline
// ============================================================================

fn update_store(this: &Shared, patch: StorePatch) -> bool {
    let (snapshot, observer, mounted) = {
        let mut inner = this.borrow_mut();
        if !inner.store.apply(&patch) {
            return false;
        }
        tracing::trace!(store = ?inner.store, "scrollbar store updated");
        (inner.store, inner.options.on_store_change.clone(), inner.mounted)
    };
    if let Some(observer) = observer {
        observer(&snapshot);
    }
    if mounted {
        request_render(this);
    }
    true
}

/// Measure the current elements and merge the result with `extra`
fn refresh(this: &Shared, extra: StorePatch) {
    let elements = resolve_elements(this);
    let (descriptor, min_thumb_size) = {
        let inner = this.borrow();
        (inner.descriptor, inner.config.min_thumb_size)
    };
    let measurement = descriptor.measure(
        elements.container.as_deref(),
        elements.track.as_deref(),
        min_thumb_size,
    );
    tracing::trace!(?measurement, "scrollbar geometry");

    update_store(this, extra.measurement(measurement));
}

fn request_render(this: &Shared) {
    let (timing, document, pending) = {
        let inner = this.borrow();
        if !inner.mounted {
            return;
        }
        (
            inner.config.render_timing,
            inner.document.clone(),
            inner.pending_frame.is_some(),
        )
    };
    match timing {
        RenderTiming::Immediate => render_now(this),
        RenderTiming::NextFrame if pending => {}
        RenderTiming::NextFrame => {
            let weak = Rc::downgrade(this);
            let frame = document.request_animation_frame(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().pending_frame = None;
                    render_now(&inner);
                }
            }));
            this.borrow_mut().pending_frame = Some(frame);
        }
    }
}

fn render_now(this: &Shared) {
    let store = {
        let inner = this.borrow();
        if !inner.mounted {
            return;
        }
        inner.store
    };
    let elements = resolve_elements(this);
    if let Some(target) = elements.render_target() {
        store::render(&store, target.as_ref());
    }
}

// ============================================================================
// Auto-hide
// ============================================================================

fn note_activity(this: &Shared, activity: Activity) {
    let plan = {
        let inner = this.borrow();
        auto_hide::plan(inner.config.visibility, activity, inner.pointer_in_container)
    };
    if plan.show {
        update_store(this, StorePatch::new().visible(true));
    }
    match plan.timer {
        TimerAction::Keep => {}
        TimerAction::Cancel => cancel_hide(this),
        TimerAction::Arm => arm_hide(this),
    }
}

fn cancel_hide(this: &Shared) {
    let (document, timer) = {
        let mut inner = this.borrow_mut();
        (inner.document.clone(), inner.hide_timer.take())
    };
    if let Some(timer) = timer {
        document.clear_timeout(timer);
    }
}

fn arm_hide(this: &Shared) {
    cancel_hide(this);
    let (document, delay) = {
        let inner = this.borrow();
        if !inner.mounted {
            return;
        }
        (inner.document.clone(), inner.config.auto_hide_delay)
    };
    let weak = Rc::downgrade(this);
    let timer = document.set_timeout(
        delay,
        Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                on_hide_timer(&inner);
            }
        }),
    );
    this.borrow_mut().hide_timer = Some(timer);
}

fn on_hide_timer(this: &Shared) {
    let hide = {
        let mut inner = this.borrow_mut();
        inner.hide_timer = None;
        inner.mounted
            && auto_hide::should_hide(
                inner.config.visibility,
                &inner.store,
                inner.pointer_in_container,
            )
    };
    if hide {
        tracing::trace!("auto-hiding scrollbar");
        update_store(this, StorePatch::new().visible(false).scrolling(false));
    }
}

// ============================================================================
// Event handlers
// ============================================================================

/// Pointer is over `element` either by DOM containment or by geometry
fn is_over(element: &dyn Element, target: Option<ElementId>, at: Coordinate) -> bool {
    target.is_some_and(|target| element.contains(target))
        || element.bounding_client_rect().contains(at.x, at.y)
}

fn targets_thumb(elements: &Elements, event: &Event) -> bool {
    match (&elements.thumb, event.target) {
        (Some(thumb), Some(target)) => thumb.contains(target),
        _ => false,
    }
}

fn on_container_pointer_move(this: &Shared, event: &Event) {
    let Some(at) = event.client_coordinate() else {
        return;
    };
    let elements = resolve_elements(this);
    let hovering_track = elements
        .track
        .as_ref()
        .is_some_and(|track| is_over(track.as_ref(), event.target, at));
    let hovering_thumb = elements
        .thumb
        .as_ref()
        .is_some_and(|thumb| is_over(thumb.as_ref(), event.target, at));

    this.borrow_mut().pointer_in_container = true;
    update_store(
        this,
        StorePatch::new()
            .hovering_track(hovering_track)
            .hovering_thumb(hovering_thumb),
    );
    note_activity(this, Activity::PointerInside);
    if hovering_track || hovering_thumb {
        note_activity(this, Activity::Hovered);
    }
}

fn on_container_pointer_enter(this: &Shared, _event: &Event) {
    this.borrow_mut().pointer_in_container = true;
    note_activity(this, Activity::PointerInside);
}

fn on_container_pointer_leave(this: &Shared, _event: &Event) {
    this.borrow_mut().pointer_in_container = false;
    update_store(
        this,
        StorePatch::new().hovering_track(false).hovering_thumb(false),
    );
    note_activity(this, Activity::PointerLeft);
}

fn on_container_scroll(this: &Shared, _event: &Event) {
    refresh(this, StorePatch::new().scrolling(true));
    note_activity(this, Activity::Scrolled);
}

fn on_container_scroll_end(this: &Shared, _event: &Event) {
    update_store(this, StorePatch::new().scrolling(false));
}

fn on_track_pointer_down(this: &Shared, event: &Event) {
    if !event.is_primary_button() {
        return;
    }
    let Some(at) = event.client_coordinate() else {
        return;
    };
    let elements = resolve_elements(this);
    if targets_thumb(&elements, event) {
        return;
    }
    let (Some(container), Some(track)) = (&elements.container, &elements.track) else {
        return;
    };

    let (descriptor, thumb_size) = {
        let inner = this.borrow();
        (inner.descriptor, inner.store.thumb_size)
    };
    if descriptor.is_overflow_hidden(container.as_ref()) {
        return;
    }
    let Some(offset) = scroll_offset_from_track_click(
        descriptor.metrics(container.as_ref()),
        descriptor.track_span(track.as_ref()),
        thumb_size,
        (descriptor.coordinate)(at),
    ) else {
        return;
    };

    tracing::trace!(offset, "track press");
    (descriptor.set_scroll_offset)(container.as_ref(), offset);
    note_activity(this, Activity::TrackPressed);
}

fn on_thumb_pointer_down(this: &Shared, event: &Event) {
    if !event.is_primary_button() {
        return;
    }
    let Some(at) = event.client_coordinate() else {
        return;
    };
    let elements = resolve_elements(this);
    let Some(container) = &elements.container else {
        return;
    };

    // Capture against fresh geometry
    refresh(this, StorePatch::new());
    let info = {
        let mut inner = this.borrow_mut();
        let info = DraggingInfo {
            pointer_coordinate: at,
            scroll_offset_at_drag_start: (inner.descriptor.scroll_offset)(container.as_ref()),
            thumb_offset_at_drag_start: inner.store.thumb_offset,
        };
        inner.dragging = Some(info);
        info
    };
    tracing::trace!(?info, "thumb drag started");
    update_store(
        this,
        StorePatch::new().dragging_thumb(true).hovering_thumb(true),
    );
    note_activity(this, Activity::Dragged);
}

fn on_document_pointer_move(this: &Shared, event: &Event) {
    let Some(info) = this.borrow().dragging else {
        return;
    };
    let Some(at) = event.client_coordinate() else {
        return;
    };
    let elements = resolve_elements(this);
    let (Some(container), Some(track)) = (&elements.container, &elements.track) else {
        return;
    };

    let (descriptor, thumb_size) = {
        let inner = this.borrow();
        (inner.descriptor, inner.store.thumb_size)
    };
    if descriptor.is_overflow_hidden(container.as_ref()) {
        return;
    }
    let Some(offset) = scroll_offset_from_drag(
        descriptor.metrics(container.as_ref()),
        descriptor.track_span(track.as_ref()).extent,
        thumb_size,
        info.thumb_offset_at_drag_start,
        descriptor.drag_delta(&info, at),
    ) else {
        return;
    };

    (descriptor.set_scroll_offset)(container.as_ref(), offset);
    note_activity(this, Activity::Dragged);
}

fn on_document_pointer_up(this: &Shared, _event: &Event) {
    let Some(info) = this.borrow_mut().dragging.take() else {
        return;
    };
    let elements = resolve_elements(this);
    if let Some(container) = &elements.container {
        let descriptor = this.borrow().descriptor;
        tracing::trace!(
            from = info.scroll_offset_at_drag_start,
            to = (descriptor.scroll_offset)(container.as_ref()),
            "thumb drag ended"
        );
    }
    update_store(this, StorePatch::new().dragging_thumb(false));
    note_activity(this, Activity::Released);
}

fn forward_wheel(this: &Shared, event: &Event, elements: &Elements) {
    let EventData::Wheel { delta_x, delta_y } = event.data else {
        return;
    };
    let Some(container) = &elements.container else {
        return;
    };
    let (descriptor, enabled) = {
        let inner = this.borrow();
        (inner.descriptor, inner.config.wheel_forwarding)
    };
    let delta = (descriptor.wheel_delta)(delta_x, delta_y);
    if !enabled || delta == 0.0 || descriptor.is_overflow_hidden(container.as_ref()) {
        return;
    }
    let current = (descriptor.scroll_offset)(container.as_ref());
    (descriptor.set_scroll_offset)(container.as_ref(), current + delta);
}

fn on_track_wheel(this: &Shared, event: &Event) {
    let elements = resolve_elements(this);
    // The thumb's own listener handles wheel events that bubble from it
    if targets_thumb(&elements, event) {
        return;
    }
    forward_wheel(this, event, &elements);
}

fn on_thumb_wheel(this: &Shared, event: &Event) {
    let elements = resolve_elements(this);
    forward_wheel(this, event, &elements);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_unset_fields() {
        let mut options = ScrollBarOptions::new()
            .container(|| None)
            .track(|| None)
            .on_store_change(|_| {});
        options.merge(ScrollBarOptions::new().thumb(|| None));

        assert!(options.get_container_element.is_some());
        assert!(options.get_track_element.is_some());
        assert!(options.get_thumb_element.is_some());
        assert!(options.on_store_change.is_some());
    }

    #[test]
    fn merge_replaces_set_fields() {
        let mut options = ScrollBarOptions::new().track(|| None);
        let first = options.get_track_element.clone().unwrap();
        options.merge(ScrollBarOptions::new().track(|| None));
        let second = options.get_track_element.clone().unwrap();
        assert!(!Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn options_debug_reports_presence() {
        let options = ScrollBarOptions::new().track(|| None);
        let debug = format!("{options:?}");
        assert!(debug.contains("get_track_element: true"));
        assert!(debug.contains("get_thumb_element: false"));
    }
}
