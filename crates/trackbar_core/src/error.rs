//! Configuration error types

use thiserror::Error;

/// Rejected scrollbar configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Minimum thumb size must be a finite, non-negative pixel value
    #[error("Invalid minimum thumb size: {0}")]
    InvalidMinThumbSize(f32),

    /// Auto-hide needs a non-zero delay
    #[error("Auto-hide delay must be greater than zero")]
    ZeroAutoHideDelay,
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
