//! Scrollbar behaviour configuration

use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Scrollbar visibility modes
///
/// Visibility is a policy layered on top of geometry: it only toggles the
/// `is_visible` store flag, thumb size and offset are computed regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollbarVisibility {
    /// Always visible
    #[default]
    Always,
    /// Visible while the pointer is inside the container, hidden after the
    /// delay once it leaves
    Hover,
    /// Shown on scroll or interaction, auto-dismissed after inactivity
    Auto,
    /// Never visible (the container is still scrollable)
    Never,
}

impl ScrollbarVisibility {
    /// Visibility flag before any activity has been observed
    pub fn initially_visible(&self) -> bool {
        matches!(self, ScrollbarVisibility::Always)
    }

    /// Whether this mode schedules hide timers
    pub fn auto_hides(&self) -> bool {
        matches!(self, ScrollbarVisibility::Hover | ScrollbarVisibility::Auto)
    }
}

/// When attribute and style writes happen after a store update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderTiming {
    /// Coalesce writes into the next animation frame
    #[default]
    NextFrame,
    /// Write synchronously on every store update
    Immediate,
}

/// Configuration for scrollbar behaviour
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollbarConfig {
    /// Visibility mode
    pub visibility: ScrollbarVisibility,
    /// Inactivity delay before an auto-hiding bar hides
    pub auto_hide_delay: Duration,
    /// Minimum thumb length in pixels (0 keeps the thumb strictly proportional)
    pub min_thumb_size: f32,
    /// Render scheduling
    pub render_timing: RenderTiming,
    /// Scroll the container when the wheel turns over the track or thumb
    pub wheel_forwarding: bool,
}

impl Default for ScrollbarConfig {
    fn default() -> Self {
        Self {
            visibility: ScrollbarVisibility::Always,
            auto_hide_delay: Duration::from_millis(1000),
            min_thumb_size: 0.0,
            render_timing: RenderTiming::NextFrame,
            wheel_forwarding: true,
        }
    }
}

impl ScrollbarConfig {
    /// Config for a bar that shows on activity and auto-dismisses
    pub fn auto_hide(delay: Duration) -> Self {
        Self {
            visibility: ScrollbarVisibility::Auto,
            auto_hide_delay: delay,
            ..Default::default()
        }
    }

    /// Config for a bar that shows while the container is hovered
    pub fn show_on_hover() -> Self {
        Self {
            visibility: ScrollbarVisibility::Hover,
            ..Default::default()
        }
    }

    /// Config with a hidden bar
    pub fn hidden() -> Self {
        Self {
            visibility: ScrollbarVisibility::Never,
            ..Default::default()
        }
    }

    pub fn with_min_thumb_size(mut self, size: f32) -> Self {
        self.min_thumb_size = size;
        self
    }

    pub fn with_render_timing(mut self, timing: RenderTiming) -> Self {
        self.render_timing = timing;
        self
    }

    pub fn with_wheel_forwarding(mut self, enabled: bool) -> Self {
        self.wheel_forwarding = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_thumb_size.is_finite() || self.min_thumb_size < 0.0 {
            return Err(ConfigError::InvalidMinThumbSize(self.min_thumb_size));
        }
        if self.visibility.auto_hides() && self.auto_hide_delay.is_zero() {
            return Err(ConfigError::ZeroAutoHideDelay);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_and_always_visible() {
        let config = ScrollbarConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.visibility.initially_visible());
        assert!(!config.visibility.auto_hides());
    }

    #[test]
    fn negative_min_thumb_size_is_rejected() {
        let config = ScrollbarConfig::default().with_min_thumb_size(-4.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidMinThumbSize(-4.0))
        );
    }

    #[test]
    fn nan_min_thumb_size_is_rejected() {
        let config = ScrollbarConfig::default().with_min_thumb_size(f32::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMinThumbSize(_))
        ));
    }

    #[test]
    fn auto_hide_requires_a_delay() {
        let config = ScrollbarConfig::auto_hide(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroAutoHideDelay));

        // A zero delay is fine when nothing auto-hides
        let config = ScrollbarConfig {
            auto_hide_delay: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn presets() {
        assert_eq!(
            ScrollbarConfig::show_on_hover().visibility,
            ScrollbarVisibility::Hover
        );
        assert_eq!(
            ScrollbarConfig::hidden().visibility,
            ScrollbarVisibility::Never
        );
        assert!(!ScrollbarVisibility::Never.initially_visible());
        assert!(!ScrollbarVisibility::Auto.initially_visible());
    }
}
