//! Shared fixtures for the integration tests
//!
//! The horizontal fixture is a 200px wide container scrolling 1000px of
//! content, with a 200px track along its bottom edge and a thumb inside the
//! track. The vertical fixture is the same layout turned on its side.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use trackbar_core::{
    Axis, DocumentRef, ElementRef, Overflow, Rect, ScrollBarInstance, ScrollBarOptions,
    ScrollbarConfig,
};
use trackbar_headless::{HeadlessDocument, HeadlessElement};

/// Route engine logs to the test harness; set `RUST_LOG=trackbar_core=trace`
/// to see them
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct Fixture {
    pub axis: Axis,
    pub document: Rc<HeadlessDocument>,
    pub container: Rc<HeadlessElement>,
    pub track: Rc<HeadlessElement>,
    pub thumb: Rc<HeadlessElement>,
}

impl Fixture {
    pub fn horizontal() -> Self {
        init_tracing();
        let document = HeadlessDocument::new();
        let container = document.create_element();
        container.set_rect(Rect::new(0.0, 0.0, 200.0, 100.0));
        container.set_client_size(200.0, 100.0);
        container.set_scroll_size(1000.0, 100.0);
        container.set_overflow(Overflow::Auto, Overflow::Hidden);

        let track = document.create_element();
        track.set_rect(Rect::new(0.0, 90.0, 200.0, 10.0));
        let thumb = document.create_element();
        thumb.set_rect(Rect::new(0.0, 90.0, 40.0, 10.0));

        document.append_child(&container, &track).unwrap();
        document.append_child(&track, &thumb).unwrap();

        Self {
            axis: Axis::Horizontal,
            document,
            container,
            track,
            thumb,
        }
    }

    pub fn vertical() -> Self {
        init_tracing();
        let document = HeadlessDocument::new();
        let container = document.create_element();
        container.set_rect(Rect::new(0.0, 0.0, 100.0, 200.0));
        container.set_client_size(100.0, 200.0);
        container.set_scroll_size(100.0, 1000.0);
        container.set_overflow(Overflow::Hidden, Overflow::Scroll);

        let track = document.create_element();
        track.set_rect(Rect::new(90.0, 0.0, 10.0, 200.0));
        let thumb = document.create_element();
        thumb.set_rect(Rect::new(90.0, 0.0, 10.0, 40.0));

        document.append_child(&container, &track).unwrap();
        document.append_child(&track, &thumb).unwrap();

        Self {
            axis: Axis::Vertical,
            document,
            container,
            track,
            thumb,
        }
    }

    pub fn document_ref(&self) -> DocumentRef {
        self.document.clone()
    }

    /// Options resolving all three elements
    pub fn options(&self) -> ScrollBarOptions {
        ScrollBarOptions::new()
            .container(accessor(&self.container))
            .track(accessor(&self.track))
            .thumb(accessor(&self.thumb))
    }

    pub fn instance(&self) -> ScrollBarInstance {
        ScrollBarInstance::new(self.axis, self.document_ref(), self.options())
    }

    pub fn instance_with(&self, config: ScrollbarConfig) -> ScrollBarInstance {
        ScrollBarInstance::with_config(self.axis, self.document_ref(), self.options(), config)
            .unwrap()
    }

    /// A fresh track under the container, same layout as the original
    pub fn replacement_track(&self) -> Rc<HeadlessElement> {
        let track = self.document.create_element();
        track.set_rect(self.track_rect());
        self.document.append_child(&self.container, &track).unwrap();
        track
    }

    fn track_rect(&self) -> Rect {
        match self.axis {
            Axis::Horizontal => Rect::new(0.0, 90.0, 200.0, 10.0),
            Axis::Vertical => Rect::new(90.0, 0.0, 10.0, 200.0),
        }
    }
}

/// Accessor closure returning `element`
pub fn accessor(element: &Rc<HeadlessElement>) -> impl Fn() -> Option<ElementRef> + 'static {
    let element = element.clone();
    move || Some(element.clone() as ElementRef)
}

/// Accessor that counts its calls
pub fn counting_accessor(
    element: &Rc<HeadlessElement>,
    calls: &Rc<Cell<usize>>,
) -> impl Fn() -> Option<ElementRef> + 'static {
    let element = element.clone();
    let calls = calls.clone();
    move || {
        calls.set(calls.get() + 1);
        Some(element.clone() as ElementRef)
    }
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}
