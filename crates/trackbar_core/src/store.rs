//! Scrollbar state and its render step
//!
//! [`ScrollBarStore`] is the single source of truth for one axis instance.
//! Writes go through [`ScrollBarStore::apply`] with a [`StorePatch`]; fields
//! missing from the patch keep their value. [`render`] mirrors the state onto
//! the outermost scrollbar element as data-attributes and CSS custom
//! properties.

use crate::element::Element;
use crate::geometry::{Measurement, ThumbGeometry};

/// Attribute and custom-property names written by [`render`]
pub mod attributes {
    pub const SIZE: &str = "data-size";
    pub const THUMB_SIZE: &str = "data-thumb-size";
    pub const THUMB_OFFSET: &str = "data-thumb-offset";

    pub const IS_HOVERING_TRACK: &str = "data-is-hovering-track";
    pub const IS_HOVERING_THUMB: &str = "data-is-hovering-thumb";
    pub const IS_DRAGGING_THUMB: &str = "data-is-dragging-thumb";
    pub const IS_SCROLLING: &str = "data-is-scrolling";
    pub const IS_VISIBLE: &str = "data-is-visible";

    pub const SIZE_PROPERTY: &str = "--scrollbar-size";
    pub const THUMB_SIZE_PROPERTY: &str = "--scrollbar-thumb-size";
    pub const THUMB_OFFSET_PROPERTY: &str = "--scrollbar-thumb-offset";
}

/// Visual and interaction state of one axis instance
///
/// Numeric fields are pixel magnitudes along the instance's axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollBarStore {
    pub thumb_size: f32,
    pub thumb_offset: f32,
    pub track_size: f32,
    pub is_hovering_track: bool,
    pub is_hovering_thumb: bool,
    pub is_dragging_thumb: bool,
    pub is_scrolling: bool,
    /// Auto-hide visibility flag
    pub is_visible: bool,
}

/// Joint interaction state, most engaged first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionPhase {
    #[default]
    Idle,
    HoveringTrack,
    HoveringThumb,
    DraggingThumb,
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StorePatch {
    pub thumb_size: Option<f32>,
    pub thumb_offset: Option<f32>,
    pub track_size: Option<f32>,
    pub is_hovering_track: Option<bool>,
    pub is_hovering_thumb: Option<bool>,
    pub is_dragging_thumb: Option<bool>,
    pub is_scrolling: Option<bool>,
    pub is_visible: Option<bool>,
}

impl StorePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thumb(mut self, geometry: ThumbGeometry) -> Self {
        self.thumb_size = Some(geometry.thumb_size);
        self.thumb_offset = Some(geometry.thumb_offset);
        self
    }

    pub fn measurement(self, measurement: Measurement) -> Self {
        self.thumb(measurement.thumb).track_size(measurement.track_size)
    }

    pub fn track_size(mut self, size: f32) -> Self {
        self.track_size = Some(size);
        self
    }

    pub fn hovering_track(mut self, value: bool) -> Self {
        self.is_hovering_track = Some(value);
        self
    }

    pub fn hovering_thumb(mut self, value: bool) -> Self {
        self.is_hovering_thumb = Some(value);
        self
    }

    pub fn dragging_thumb(mut self, value: bool) -> Self {
        self.is_dragging_thumb = Some(value);
        self
    }

    pub fn scrolling(mut self, value: bool) -> Self {
        self.is_scrolling = Some(value);
        self
    }

    pub fn visible(mut self, value: bool) -> Self {
        self.is_visible = Some(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn merge<T: PartialEq + Copy>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(value) if *slot != value => {
            *slot = value;
            true
        }
        _ => false,
    }
}

impl ScrollBarStore {
    /// Zeroed store with the given initial visibility
    pub fn new(is_visible: bool) -> Self {
        Self {
            is_visible,
            ..Default::default()
        }
    }

    /// Merge a patch, returning whether any field changed
    pub fn apply(&mut self, patch: &StorePatch) -> bool {
        let mut changed = merge(&mut self.thumb_size, patch.thumb_size);
        changed |= merge(&mut self.thumb_offset, patch.thumb_offset);
        changed |= merge(&mut self.track_size, patch.track_size);
        changed |= merge(&mut self.is_hovering_track, patch.is_hovering_track);
        changed |= merge(&mut self.is_hovering_thumb, patch.is_hovering_thumb);
        changed |= merge(&mut self.is_dragging_thumb, patch.is_dragging_thumb);
        changed |= merge(&mut self.is_scrolling, patch.is_scrolling);
        changed |= merge(&mut self.is_visible, patch.is_visible);
        changed
    }

    pub fn phase(&self) -> InteractionPhase {
        if self.is_dragging_thumb {
            InteractionPhase::DraggingThumb
        } else if self.is_hovering_thumb {
            InteractionPhase::HoveringThumb
        } else if self.is_hovering_track {
            InteractionPhase::HoveringTrack
        } else {
            InteractionPhase::Idle
        }
    }

    /// True while the user hovers or drags any part of the bar
    pub fn is_interacting(&self) -> bool {
        self.phase() != InteractionPhase::Idle
    }
}

/// Format a pixel value the way CSS expects it (`40px`, `12.5px`)
pub fn format_px(value: f32) -> String {
    format!("{value}px")
}

fn set_flag(target: &dyn Element, name: &str, value: bool) {
    if value {
        target.set_attribute(name, "true");
    } else {
        target.remove_attribute(name);
    }
}

/// Write the store onto the outermost scrollbar element
pub fn render(store: &ScrollBarStore, target: &dyn Element) {
    let size = format_px(store.track_size);
    let thumb_size = format_px(store.thumb_size);
    let thumb_offset = format_px(store.thumb_offset);

    target.set_attribute(attributes::SIZE, &size);
    target.set_attribute(attributes::THUMB_SIZE, &thumb_size);
    target.set_attribute(attributes::THUMB_OFFSET, &thumb_offset);
    target.set_style_property(attributes::SIZE_PROPERTY, &size);
    target.set_style_property(attributes::THUMB_SIZE_PROPERTY, &thumb_size);
    target.set_style_property(attributes::THUMB_OFFSET_PROPERTY, &thumb_offset);

    set_flag(target, attributes::IS_HOVERING_TRACK, store.is_hovering_track);
    set_flag(target, attributes::IS_HOVERING_THUMB, store.is_hovering_thumb);
    set_flag(target, attributes::IS_DRAGGING_THUMB, store.is_dragging_thumb);
    set_flag(target, attributes::IS_SCROLLING, store.is_scrolling);
    set_flag(target, attributes::IS_VISIBLE, store.is_visible);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_preserves_missing_fields() {
        let mut store = ScrollBarStore::new(true);
        store.apply(&StorePatch::new().thumb(ThumbGeometry {
            thumb_size: 40.0,
            thumb_offset: 10.0,
        }));
        store.apply(&StorePatch::new().scrolling(true));

        assert_eq!(store.thumb_size, 40.0);
        assert_eq!(store.thumb_offset, 10.0);
        assert!(store.is_scrolling);
        assert!(store.is_visible);
    }

    #[test]
    fn apply_reports_changes() {
        let mut store = ScrollBarStore::default();
        assert!(store.apply(&StorePatch::new().track_size(100.0)));
        assert!(!store.apply(&StorePatch::new().track_size(100.0)));
        assert!(!store.apply(&StorePatch::new()));
        assert!(StorePatch::new().is_empty());
    }

    #[test]
    fn phase_prefers_the_most_engaged_flag() {
        let mut store = ScrollBarStore::default();
        assert_eq!(store.phase(), InteractionPhase::Idle);

        store.is_hovering_track = true;
        assert_eq!(store.phase(), InteractionPhase::HoveringTrack);

        store.is_hovering_thumb = true;
        assert_eq!(store.phase(), InteractionPhase::HoveringThumb);

        store.is_dragging_thumb = true;
        assert_eq!(store.phase(), InteractionPhase::DraggingThumb);

        // Scrolling is orthogonal to the hover/drag phase
        store.is_scrolling = true;
        assert_eq!(store.phase(), InteractionPhase::DraggingThumb);
    }

    #[test]
    fn pixel_formatting() {
        assert_eq!(format_px(40.0), "40px");
        assert_eq!(format_px(12.5), "12.5px");
        assert_eq!(format_px(0.0), "0px");
    }
}
