//! Input routing: pointer, bullet and swipe input to navigation commands.

use std::time::Duration;

use web_time::Instant;

use crate::lightbox::{Frame, NavTarget, NavigationState};

/// Swipes arriving within this window after an accepted swipe are ignored.
pub const SWIPE_COOLDOWN: Duration = Duration::from_millis(1000);

/// Minimum horizontal travel for a touch to count as a swipe.
pub const SWIPE_MIN_DISTANCE: f64 = 50.0;

/// Navigation request produced by an input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Previous,
    Next,
    JumpTo(usize),
}

impl NavCommand {
    #[must_use]
    pub const fn target(self) -> NavTarget {
        match self {
            Self::Previous => NavTarget::Delta(-1),
            Self::Next => NavTarget::Delta(1),
            Self::JumpTo(index) => NavTarget::Index(index),
        }
    }
}

/// Which directional arrow to reveal while hovering the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrowHint {
    #[default]
    Hidden,
    Previous,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// Whether `page_x` falls in the left half of the frame (chrome
/// included on both sides).
fn in_left_half(page_x: f64, frame: &Frame, chrome: f64) -> bool {
    page_x < frame.left + (frame.width + chrome) / 2.0
}

/// Translates raw input into [`NavCommand`]s.
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    gestures_enabled: bool,
    swipe_blocked_until: Option<Instant>,
}

impl InputRouter {
    #[must_use]
    pub const fn new(gestures_enabled: bool) -> Self {
        Self {
            gestures_enabled,
            swipe_blocked_until: None,
        }
    }

    /// Click inside the frame: left half goes back, right half forward.
    /// Clicks on links are left to the link.
    #[must_use]
    pub fn route_click(
        &self,
        page_x: f64,
        frame: &Frame,
        chrome: f64,
        target_is_link: bool,
    ) -> Option<NavCommand> {
        if target_is_link {
            return None;
        }
        Some(if in_left_half(page_x, frame, chrome) {
            NavCommand::Previous
        } else {
            NavCommand::Next
        })
    }

    /// Pointer hover: reveal the arrow for the hovered half unless the
    /// move would be a no-op.
    #[must_use]
    pub fn route_hover(
        &self,
        page_x: f64,
        frame: &Frame,
        chrome: f64,
        nav: &NavigationState,
    ) -> ArrowHint {
        if in_left_half(page_x, frame, chrome) {
            if nav.is_first() {
                ArrowHint::Hidden
            } else {
                ArrowHint::Previous
            }
        } else if nav.is_last() {
            ArrowHint::Hidden
        } else {
            ArrowHint::Next
        }
    }

    /// Bullet activation.
    #[must_use]
    pub const fn route_bullet(&self, index: usize) -> NavCommand {
        NavCommand::JumpTo(index)
    }

    /// Swipe gesture. Left swipes advance, right swipes go back; input is
    /// ignored while gestures are disabled or during the cooldown that
    /// follows each accepted swipe.
    pub fn route_swipe(&mut self, direction: SwipeDirection, now: Instant) -> Option<NavCommand> {
        if !self.gestures_enabled {
            return None;
        }
        if self.swipe_blocked_until.is_some_and(|until| now < until) {
            tracing::trace!(?direction, "swipe ignored during cooldown");
            return None;
        }
        self.swipe_blocked_until = Some(now + SWIPE_COOLDOWN);
        Some(match direction {
            SwipeDirection::Left => NavCommand::Next,
            SwipeDirection::Right => NavCommand::Previous,
        })
    }
}

/// Detects horizontal swipes from touch start/end positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    start: Option<(f64, f64)>,
}

impl SwipeTracker {
    pub const fn touch_start(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
    }

    /// Finish a touch; returns a direction when horizontal travel reaches
    /// [`SWIPE_MIN_DISTANCE`] and dominates vertical travel.
    pub fn touch_end(&mut self, x: f64, y: f64) -> Option<SwipeDirection> {
        let (start_x, start_y) = self.start.take()?;
        let dx = x - start_x;
        let dy = y - start_y;
        if dx.abs() < SWIPE_MIN_DISTANCE || dx.abs() < dy.abs() {
            return None;
        }
        Some(if dx < 0.0 {
            SwipeDirection::Left
        } else {
            SwipeDirection::Right
        })
    }

    pub const fn cancel(&mut self) {
        self.start = None;
    }
}
