//! Trackbar Core Runtime
//!
//! This crate provides the engine behind custom overlay scrollbars:
//!
//! - **Geometry**: Thumb size and offset from a container's scroll metrics
//! - **Interaction**: Hover tracking, track presses and drag-to-scroll
//! - **Lifecycle**: Listener groups that attach, re-attach and detach cleanly
//! - **Rendering**: State mirrored onto elements as data-attributes
//!
//! The engine is host-agnostic. Elements and the document are reached through
//! the [`Element`] and [`Document`] traits; `trackbar_headless` provides an
//! in-memory implementation for tests and tooling.
//!
//! # Example
//!
//! ```rust,ignore
//! use trackbar_core::{ScrollBarInstance, ScrollBarOptions};
//!
//! let bar = ScrollBarInstance::horizontal(
//!     document,
//!     ScrollBarOptions::new()
//!         .container(move || Some(container.clone()))
//!         .track(move || Some(track.clone()))
//!         .thumb(move || Some(thumb.clone())),
//! );
//!
//! let unmount = bar.mount();
//! assert_eq!(bar.store().thumb_size, 40.0);
//! unmount();
//! ```

pub mod auto_hide;
pub mod config;
pub mod element;
pub mod error;
pub mod events;
pub mod geometry;
pub mod instance;
pub mod lifecycle;
pub mod store;

pub use config::{RenderTiming, ScrollbarConfig, ScrollbarVisibility};
pub use element::{
    Document, DocumentRef, Element, ElementId, ElementRef, FrameId, ListenerId, ObserverId,
    Overflow, Rect, TimerId,
};
pub use error::{ConfigError, Result};
pub use events::{event_types, Coordinate, Event, EventData, EventHandler, EventType};
pub use geometry::{Axis, AxisDescriptor, DraggingInfo, ScrollMetrics, ThumbGeometry};
pub use instance::{ElementAccessor, ScrollBarInstance, ScrollBarOptions, StoreObserver};
pub use lifecycle::{CancelToken, ListenerScope};
pub use store::{attributes, InteractionPhase, ScrollBarStore, StorePatch};
