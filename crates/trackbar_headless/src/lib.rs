//! Trackbar Headless Host
//!
//! An in-memory implementation of the `trackbar_core` host traits. It keeps
//! an element tree with settable layout, delivers events with bubbling, and
//! drives animation frames and timers from a virtual clock, so scrollbar
//! behaviour can be exercised deterministically without a UI toolkit.
//!
//! # Example
//!
//! ```rust
//! use trackbar_core::{Element, Rect};
//! use trackbar_headless::HeadlessDocument;
//!
//! let document = HeadlessDocument::new();
//! let container = document.create_element();
//! container.set_rect(Rect::new(0.0, 0.0, 200.0, 100.0));
//! container.set_client_size(200.0, 100.0);
//! container.set_scroll_size(1000.0, 100.0);
//!
//! container.set_scroll_left(5000.0);
//! assert_eq!(container.scroll_left(), 800.0);
//! assert_eq!(document.flush(), 1);
//! ```

pub mod document;
pub mod element;
pub mod error;

pub use document::HeadlessDocument;
pub use element::HeadlessElement;
pub use error::{HeadlessError, Result};
