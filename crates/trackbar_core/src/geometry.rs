//! Thumb geometry and pointer-to-scroll mapping
//!
//! Everything here is pure arithmetic over [`ScrollMetrics`] except the
//! [`AxisDescriptor`] readers, which pull the metrics for one axis out of host
//! elements. Horizontal and vertical scrollbars share every formula; the
//! descriptor is the only thing that differs between them.
//!
//! Mapping contract:
//!
//! - `thumb_size = viewport / content * track`, raised to the configured
//!   minimum and capped at the track extent.
//! - `thumb_offset = scroll / (content - viewport) * (track - thumb_size)`,
//!   clamped to `[0, track - thumb_size]`. With no minimum size this equals
//!   `scroll / content * track`.
//! - Drags are ratio-scaled: moving the pointer by `d` moves the thumb by `d`
//!   and the container by `d * (content - viewport) / (track - thumb_size)`.
//!   The thumb therefore tracks the pointer even when it is shorter than the
//!   track.

use crate::element::{Element, Overflow, Rect};
use crate::events::Coordinate;

/// Scroll direction handled by an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn descriptor(self) -> &'static AxisDescriptor {
        match self {
            Axis::Horizontal => &HORIZONTAL,
            Axis::Vertical => &VERTICAL,
        }
    }
}

/// Axis-specific accessors
#[derive(Clone, Copy)]
pub struct AxisDescriptor {
    pub axis: Axis,
    /// Extent of a rect along the axis
    pub rect_extent: fn(&Rect) -> f32,
    /// Leading edge (left or top) of a rect
    pub rect_leading_edge: fn(&Rect) -> f32,
    pub viewport_extent: fn(&dyn Element) -> f32,
    pub content_extent: fn(&dyn Element) -> f32,
    pub scroll_offset: fn(&dyn Element) -> f32,
    pub set_scroll_offset: fn(&dyn Element, f32),
    pub overflow: fn(&dyn Element) -> Overflow,
    /// Pointer coordinate component along the axis
    pub coordinate: fn(Coordinate) -> f32,
    /// Wheel delta component along the axis
    pub wheel_delta: fn(f32, f32) -> f32,
}

impl std::fmt::Debug for AxisDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxisDescriptor")
            .field("axis", &self.axis)
            .finish_non_exhaustive()
    }
}

pub static HORIZONTAL: AxisDescriptor = AxisDescriptor {
    axis: Axis::Horizontal,
    rect_extent: rect_width,
    rect_leading_edge: rect_left,
    viewport_extent: client_width,
    content_extent: scroll_width,
    scroll_offset: scroll_left,
    set_scroll_offset: set_scroll_left,
    overflow: overflow_x,
    coordinate: coordinate_x,
    wheel_delta: wheel_x,
};

pub static VERTICAL: AxisDescriptor = AxisDescriptor {
    axis: Axis::Vertical,
    rect_extent: rect_height,
    rect_leading_edge: rect_top,
    viewport_extent: client_height,
    content_extent: scroll_height,
    scroll_offset: scroll_top,
    set_scroll_offset: set_scroll_top,
    overflow: overflow_y,
    coordinate: coordinate_y,
    wheel_delta: wheel_y,
};

fn rect_width(rect: &Rect) -> f32 {
    rect.width
}
fn rect_height(rect: &Rect) -> f32 {
    rect.height
}
fn rect_left(rect: &Rect) -> f32 {
    rect.left()
}
fn rect_top(rect: &Rect) -> f32 {
    rect.top()
}
fn client_width(el: &dyn Element) -> f32 {
    el.client_width()
}
fn client_height(el: &dyn Element) -> f32 {
    el.client_height()
}
fn scroll_width(el: &dyn Element) -> f32 {
    el.scroll_width()
}
fn scroll_height(el: &dyn Element) -> f32 {
    el.scroll_height()
}
fn scroll_left(el: &dyn Element) -> f32 {
    el.scroll_left()
}
fn scroll_top(el: &dyn Element) -> f32 {
    el.scroll_top()
}
fn set_scroll_left(el: &dyn Element, value: f32) {
    el.set_scroll_left(value)
}
fn set_scroll_top(el: &dyn Element, value: f32) {
    el.set_scroll_top(value)
}
fn overflow_x(el: &dyn Element) -> Overflow {
    el.overflow_x()
}
fn overflow_y(el: &dyn Element) -> Overflow {
    el.overflow_y()
}
fn coordinate_x(c: Coordinate) -> f32 {
    c.x
}
fn coordinate_y(c: Coordinate) -> f32 {
    c.y
}
fn wheel_x(dx: f32, _dy: f32) -> f32 {
    dx
}
fn wheel_y(_dx: f32, dy: f32) -> f32 {
    dy
}

/// Container scroll state along one axis
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub viewport_extent: f32,
    pub content_extent: f32,
    pub scroll_offset: f32,
}

impl ScrollMetrics {
    pub fn new(viewport_extent: f32, content_extent: f32, scroll_offset: f32) -> Self {
        Self {
            viewport_extent,
            content_extent,
            scroll_offset,
        }
    }

    /// Largest valid scroll offset
    pub fn max_scroll(&self) -> f32 {
        (self.content_extent - self.viewport_extent).max(0.0)
    }

    /// True when the content overflows the viewport
    pub fn is_scrollable(&self) -> bool {
        self.viewport_extent.is_finite()
            && self.content_extent.is_finite()
            && self.scroll_offset.is_finite()
            && self.content_extent > 0.0
            && self.content_extent > self.viewport_extent
    }
}

/// Thumb size and offset along the track, in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThumbGeometry {
    pub thumb_size: f32,
    pub thumb_offset: f32,
}

impl ThumbGeometry {
    pub const ZERO: ThumbGeometry = ThumbGeometry {
        thumb_size: 0.0,
        thumb_offset: 0.0,
    };
}

/// Track position along the axis
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackSpan {
    pub leading_edge: f32,
    pub extent: f32,
}

/// State captured when a thumb drag begins
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DraggingInfo {
    pub pointer_coordinate: Coordinate,
    pub scroll_offset_at_drag_start: f32,
    pub thumb_offset_at_drag_start: f32,
}

/// Compute the thumb for a container and track extent
///
/// A container without overflow yields a thumb filling the whole track.
pub fn thumb_geometry(
    metrics: ScrollMetrics,
    track_extent: f32,
    min_thumb_size: f32,
) -> ThumbGeometry {
    if !track_extent.is_finite() || track_extent <= 0.0 {
        return ThumbGeometry::ZERO;
    }
    if !metrics.is_scrollable() {
        return ThumbGeometry {
            thumb_size: track_extent,
            thumb_offset: 0.0,
        };
    }

    let proportional = metrics.viewport_extent.max(0.0) / metrics.content_extent * track_extent;
    let thumb_size = proportional.max(min_thumb_size).min(track_extent);
    let travel = track_extent - thumb_size;
    let progress = (metrics.scroll_offset / metrics.max_scroll()).clamp(0.0, 1.0);

    ThumbGeometry {
        thumb_size,
        thumb_offset: (progress * travel).clamp(0.0, travel),
    }
}

/// Scroll offset that centers the thumb under a track press
///
/// `pointer` is the client coordinate along the axis. Returns `None` when the
/// container cannot scroll or the thumb fills the track.
pub fn scroll_offset_from_track_click(
    metrics: ScrollMetrics,
    track: TrackSpan,
    thumb_size: f32,
    pointer: f32,
) -> Option<f32> {
    let travel = track.extent - thumb_size;
    if !metrics.is_scrollable() || !travel.is_finite() || travel <= 0.0 {
        return None;
    }

    let thumb_offset = pointer - track.leading_edge - thumb_size / 2.0;
    let progress = (thumb_offset / travel).clamp(0.0, 1.0);
    Some(progress * metrics.max_scroll())
}

/// Scroll offset for a drag that has moved the pointer `delta` pixels along
/// the axis since the drag started
///
/// The result is computed from the drag start, never from the previous move,
/// so rounding does not accumulate.
pub fn scroll_offset_from_drag(
    metrics: ScrollMetrics,
    track_extent: f32,
    thumb_size: f32,
    thumb_offset_at_drag_start: f32,
    delta: f32,
) -> Option<f32> {
    let travel = track_extent - thumb_size;
    if !metrics.is_scrollable() || !travel.is_finite() || travel <= 0.0 {
        return None;
    }

    let thumb_offset = (thumb_offset_at_drag_start + delta).clamp(0.0, travel);
    Some(thumb_offset / travel * metrics.max_scroll())
}

/// Everything one geometry pass produces
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Measurement {
    pub track_size: f32,
    pub thumb: ThumbGeometry,
}

impl AxisDescriptor {
    pub fn metrics(&self, container: &dyn Element) -> ScrollMetrics {
        ScrollMetrics {
            viewport_extent: (self.viewport_extent)(container),
            content_extent: (self.content_extent)(container),
            scroll_offset: (self.scroll_offset)(container),
        }
    }

    pub fn track_span(&self, track: &dyn Element) -> TrackSpan {
        let rect = track.bounding_client_rect();
        TrackSpan {
            leading_edge: (self.rect_leading_edge)(&rect),
            extent: (self.rect_extent)(&rect),
        }
    }

    /// Pointer movement along the axis since the drag started
    pub fn drag_delta(&self, start: &DraggingInfo, current: Coordinate) -> f32 {
        (self.coordinate)(current) - (self.coordinate)(start.pointer_coordinate)
    }

    /// Overflow on this axis is `hidden`, so no bar should show
    pub fn is_overflow_hidden(&self, container: &dyn Element) -> bool {
        (self.overflow)(container) == Overflow::Hidden
    }

    /// Thumb size and offset for the current elements
    ///
    /// Zero when either element is absent or overflow is hidden.
    pub fn measure(
        &self,
        container: Option<&dyn Element>,
        track: Option<&dyn Element>,
        min_thumb_size: f32,
    ) -> Measurement {
        let track_size = track.map(|t| self.track_span(t).extent).unwrap_or(0.0);
        let (Some(container), Some(_)) = (container, track) else {
            return Measurement {
                track_size,
                thumb: ThumbGeometry::ZERO,
            };
        };
        if self.is_overflow_hidden(container) {
            return Measurement {
                track_size,
                thumb: ThumbGeometry::ZERO,
            };
        }

        Measurement {
            track_size,
            thumb: thumb_geometry(self.metrics(container), track_size, min_thumb_size),
        }
    }
}
