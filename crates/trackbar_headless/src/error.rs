//! Headless host error types

use thiserror::Error;
use trackbar_core::ElementId;

/// Errors from tree manipulation on a headless document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeadlessError {
    /// The element was not created by this document, or has been dropped
    #[error("Unknown element: {0}")]
    UnknownElement(ElementId),

    /// The child is the parent or one of its ancestors
    #[error("Appending element {child} to {parent} would create a cycle")]
    CycleDetected {
        parent: ElementId,
        child: ElementId,
    },
}

/// Result type for headless host operations
pub type Result<T> = std::result::Result<T, HeadlessError>;
