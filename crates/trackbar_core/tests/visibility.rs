//! Integration tests for auto-hide visibility
//!
//! These tests verify that:
//! - Auto bars appear on scroll and hide after the configured delay
//! - Hover bars follow the pointer in and out of the container
//! - Interaction holds an auto-hiding bar open

mod common;

use std::time::Duration;

use common::Fixture;
use trackbar_core::{
    attributes, event_types, Element, Event, RenderTiming, ScrollbarConfig, ScrollbarVisibility,
};

fn auto_config() -> ScrollbarConfig {
    ScrollbarConfig::auto_hide(Duration::from_millis(500))
        .with_render_timing(RenderTiming::Immediate)
}

/// Test that an always-visible bar is visible from the start
#[test]
fn test_always_visible_by_default() {
    let fixture = Fixture::horizontal();
    let bar = fixture.instance();
    let _unmount = bar.mount();
    fixture.document.run_frame();

    assert!(bar.store().is_visible);
    assert_eq!(fixture.track.attribute(attributes::IS_VISIBLE).as_deref(), Some("true"));
    assert_eq!(fixture.document.pending_timers(), 0);
}

/// Test that scrolling shows an auto bar and inactivity hides it
#[test]
fn test_auto_hide_after_delay() {
    let fixture = Fixture::horizontal();
    let bar = fixture.instance_with(auto_config());
    let _unmount = bar.mount();
    assert!(!bar.store().is_visible);
    assert!(!fixture.track.has_attribute(attributes::IS_VISIBLE));

    fixture.container.set_scroll_left(100.0);
    fixture.document.flush();
    assert!(bar.store().is_visible);
    assert!(fixture.track.has_attribute(attributes::IS_VISIBLE));
    assert_eq!(fixture.document.pending_timers(), 1);

    fixture.document.advance(Duration::from_millis(400));
    assert!(bar.store().is_visible);

    // Scrolling again restarts the countdown
    fixture.container.set_scroll_left(200.0);
    fixture.document.flush();
    assert_eq!(fixture.document.pending_timers(), 1);
    fixture.document.advance(Duration::from_millis(400));
    assert!(bar.store().is_visible);

    fixture.document.advance(Duration::from_millis(100));
    let store = bar.store();
    assert!(!store.is_visible);
    assert!(!store.is_scrolling);
    assert!(!fixture.track.has_attribute(attributes::IS_VISIBLE));
}

/// Test that hovering the bar keeps it open until the pointer leaves
#[test]
fn test_auto_hide_waits_for_hover_to_end() {
    let fixture = Fixture::horizontal();
    let bar = fixture.instance_with(auto_config());
    let _unmount = bar.mount();

    fixture.document.dispatch(
        &fixture.thumb,
        Event::pointer(event_types::POINTER_MOVE, None, 20.0, 95.0),
    );
    assert!(bar.store().is_visible);

    fixture.document.advance(Duration::from_secs(2));
    assert!(bar.store().is_visible);

    fixture
        .document
        .dispatch(&fixture.container, Event::bare(event_types::POINTER_LEAVE, None));
    fixture.document.advance(Duration::from_millis(500));
    assert!(!bar.store().is_visible);
}

/// Test that a drag holds an auto bar open
#[test]
fn test_auto_hide_waits_for_drag_to_end() {
    let fixture = Fixture::horizontal();
    let bar = fixture.instance_with(auto_config());
    let _unmount = bar.mount();

    fixture.document.dispatch(
        &fixture.thumb,
        Event::pointer(event_types::POINTER_DOWN, None, 20.0, 95.0),
    );
    fixture.document.advance(Duration::from_secs(1));
    assert!(bar.store().is_visible);

    fixture
        .document
        .dispatch(&fixture.container, Event::bare(event_types::POINTER_LEAVE, None));
    fixture.document.dispatch_document(Event::pointer(
        event_types::POINTER_UP,
        None,
        20.0,
        300.0,
    ));
    fixture.document.advance(Duration::from_millis(500));
    assert!(!bar.store().is_visible);
}

/// Test that hover bars follow the pointer
#[test]
fn test_hover_visibility() {
    let fixture = Fixture::horizontal();
    let bar = fixture.instance_with(ScrollbarConfig::show_on_hover());
    let _unmount = bar.mount();
    assert!(!bar.store().is_visible);

    fixture
        .document
        .dispatch(&fixture.container, Event::bare(event_types::POINTER_ENTER, None));
    assert!(bar.store().is_visible);

    fixture
        .document
        .dispatch(&fixture.container, Event::bare(event_types::POINTER_LEAVE, None));
    fixture.document.advance(Duration::from_millis(999));
    assert!(bar.store().is_visible);

    fixture.document.advance(Duration::from_millis(1));
    assert!(!bar.store().is_visible);
}

/// Test that re-entering cancels a pending hide
#[test]
fn test_hover_reentry_cancels_hide() {
    let fixture = Fixture::horizontal();
    let bar = fixture.instance_with(ScrollbarConfig::show_on_hover());
    let _unmount = bar.mount();

    fixture
        .document
        .dispatch(&fixture.container, Event::bare(event_types::POINTER_ENTER, None));
    fixture
        .document
        .dispatch(&fixture.container, Event::bare(event_types::POINTER_LEAVE, None));
    fixture.document.advance(Duration::from_millis(500));
    fixture
        .document
        .dispatch(&fixture.container, Event::bare(event_types::POINTER_ENTER, None));
    assert_eq!(fixture.document.pending_timers(), 0);

    fixture.document.advance(Duration::from_secs(5));
    assert!(bar.store().is_visible);
}

/// Test that a hidden bar never shows but still tracks geometry
#[test]
fn test_never_visible() {
    let fixture = Fixture::horizontal();
    let bar = fixture.instance_with(ScrollbarConfig::hidden());
    let _unmount = bar.mount();

    fixture.container.set_scroll_left(400.0);
    fixture.document.flush();
    let store = bar.store();
    assert!(!store.is_visible);
    assert_eq!(store.thumb_offset, 80.0);
    assert_eq!(fixture.document.pending_timers(), 0);
}

/// Test that unmount cancels the pending hide timer
#[test]
fn test_unmount_clears_hide_timer() {
    let fixture = Fixture::horizontal();
    let bar = fixture.instance_with(auto_config());
    let unmount = bar.mount();

    fixture.container.set_scroll_left(100.0);
    fixture.document.flush();
    assert_eq!(fixture.document.pending_timers(), 1);

    unmount();
    assert_eq!(fixture.document.pending_timers(), 0);
}

/// Test that switching modes resets visibility
#[test]
fn test_set_config_switches_modes() {
    let fixture = Fixture::horizontal();
    let bar = fixture.instance_with(auto_config());
    let _unmount = bar.mount();
    assert!(!bar.store().is_visible);

    bar.set_config(ScrollbarConfig::default()).unwrap();
    assert_eq!(bar.config().visibility, ScrollbarVisibility::Always);
    assert!(bar.store().is_visible);
}
