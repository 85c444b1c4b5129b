//! Optional auto-hide policy
//!
//! Visibility sits on top of the geometry engine. The instance reports
//! [`Activity`] as it happens and this module decides whether the bar becomes
//! visible and what to do with the pending hide timer. When the timer fires
//! the instance asks [`should_hide`] before clearing the flag.

use crate::config::ScrollbarVisibility;
use crate::store::ScrollBarStore;

/// Something the user did that may affect visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// The container scrolled
    Scrolled,
    /// The pointer moved inside the container
    PointerInside,
    /// The pointer is over the track or thumb
    Hovered,
    /// The pointer left the container
    PointerLeft,
    /// A track press jumped the scroll position
    TrackPressed,
    /// A thumb drag started or moved
    Dragged,
    /// A thumb drag ended
    Released,
}

/// What to do with the hide timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    Keep,
    /// Restart the timer with the configured delay
    Arm,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub show: bool,
    pub timer: TimerAction,
}

impl Plan {
    const NOTHING: Plan = Plan {
        show: false,
        timer: TimerAction::Keep,
    };
}

pub fn plan(
    visibility: ScrollbarVisibility,
    activity: Activity,
    pointer_in_container: bool,
) -> Plan {
    match visibility {
        ScrollbarVisibility::Always | ScrollbarVisibility::Never => Plan::NOTHING,
        ScrollbarVisibility::Auto => match activity {
            Activity::PointerInside => Plan::NOTHING,
            // Restart the countdown in case it expired mid-hover
            Activity::PointerLeft => Plan {
                show: false,
                timer: TimerAction::Arm,
            },
            Activity::Scrolled
            | Activity::Hovered
            | Activity::TrackPressed
            | Activity::Dragged
            | Activity::Released => Plan {
                show: true,
                timer: TimerAction::Arm,
            },
        },
        ScrollbarVisibility::Hover => match activity {
            Activity::PointerInside
            | Activity::Hovered
            | Activity::Dragged
            | Activity::TrackPressed => Plan {
                show: true,
                timer: TimerAction::Cancel,
            },
            Activity::Scrolled if pointer_in_container => Plan {
                show: true,
                timer: TimerAction::Cancel,
            },
            Activity::Scrolled => Plan::NOTHING,
            Activity::PointerLeft => Plan {
                show: false,
                timer: TimerAction::Arm,
            },
            Activity::Released if pointer_in_container => Plan::NOTHING,
            Activity::Released => Plan {
                show: false,
                timer: TimerAction::Arm,
            },
        },
    }
}

/// Whether an expired hide timer should hide the bar
pub fn should_hide(
    visibility: ScrollbarVisibility,
    store: &ScrollBarStore,
    pointer_in_container: bool,
) -> bool {
    match visibility {
        ScrollbarVisibility::Auto => !store.is_interacting(),
        ScrollbarVisibility::Hover => !pointer_in_container && !store.is_dragging_thumb,
        ScrollbarVisibility::Always | ScrollbarVisibility::Never => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_modes_never_plan_anything() {
        for visibility in [ScrollbarVisibility::Always, ScrollbarVisibility::Never] {
            for activity in [Activity::Scrolled, Activity::Dragged, Activity::PointerLeft] {
                assert_eq!(plan(visibility, activity, true), Plan::NOTHING);
            }
            assert!(!should_hide(visibility, &ScrollBarStore::default(), false));
        }
    }

    #[test]
    fn auto_shows_on_scroll_and_rearms() {
        let plan = plan(ScrollbarVisibility::Auto, Activity::Scrolled, false);
        assert!(plan.show);
        assert_eq!(plan.timer, TimerAction::Arm);
    }

    #[test]
    fn auto_ignores_plain_pointer_movement() {
        assert_eq!(
            plan(ScrollbarVisibility::Auto, Activity::PointerInside, true),
            Plan::NOTHING
        );
    }

    #[test]
    fn auto_rearms_when_the_pointer_leaves() {
        let plan = plan(ScrollbarVisibility::Auto, Activity::PointerLeft, false);
        assert!(!plan.show);
        assert_eq!(plan.timer, TimerAction::Arm);
    }

    #[test]
    fn auto_keeps_bar_while_interacting() {
        let mut store = ScrollBarStore::default();
        assert!(should_hide(ScrollbarVisibility::Auto, &store, true));
        store.is_hovering_thumb = true;
        assert!(!should_hide(ScrollbarVisibility::Auto, &store, true));
    }

    #[test]
    fn hover_follows_the_pointer() {
        let enter = plan(ScrollbarVisibility::Hover, Activity::PointerInside, true);
        assert_eq!(
            enter,
            Plan {
                show: true,
                timer: TimerAction::Cancel
            }
        );

        let leave = plan(ScrollbarVisibility::Hover, Activity::PointerLeft, false);
        assert_eq!(leave.timer, TimerAction::Arm);
        assert!(!leave.show);

        // Releasing a drag outside the container starts the countdown
        let release = plan(ScrollbarVisibility::Hover, Activity::Released, false);
        assert_eq!(release.timer, TimerAction::Arm);
    }

    #[test]
    fn hover_does_not_hide_mid_drag() {
        let store = ScrollBarStore {
            is_dragging_thumb: true,
            ..Default::default()
        };
        assert!(!should_hide(ScrollbarVisibility::Hover, &store, false));
        assert!(should_hide(ScrollbarVisibility::Hover, &ScrollBarStore::default(), false));
    }
}
