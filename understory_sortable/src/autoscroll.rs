// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Auto-scroll planning.
//!
//! When the dragged item's translation comes within half its extent of either
//! translation bound, the scroll container scrolls in that direction. Speed
//! grows linearly with how far past that threshold the translation is.

use crate::session::TranslateBounds;

/// Period of the auto-scroll interval, in milliseconds.
pub const AUTOSCROLL_TICK_MS: u32 = 5;

/// Speed multiplier applied per dragged-item extent past the threshold.
pub const AUTOSCROLL_ACCELERATION: f64 = 10.0;

/// Scroll direction along the active axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    /// Toward the start (up or left).
    Backward,
    /// Toward the end (down or right).
    Forward,
}

impl ScrollDirection {
    /// Sign of this direction.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Backward => -1.0,
            Self::Forward => 1.0,
        }
    }
}

/// An active auto-scroll: where to scroll and how much per tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AutoScroll {
    /// Scroll direction.
    pub direction: ScrollDirection,
    /// Magnitude per tick, in pixels.
    pub speed: f64,
}

impl AutoScroll {
    /// Signed scroll delta for one tick.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.speed * self.direction.sign()
    }
}

/// Decides whether a translation should auto-scroll.
///
/// Returns `None` when the translation is clear of both thresholds, or when
/// `dimension` is not positive.
#[must_use]
pub fn plan_autoscroll(translate: f64, bounds: TranslateBounds, dimension: f64) -> Option<AutoScroll> {
    if dimension <= 0.0 {
        return None;
    }
    let half = dimension / 2.0;
    let forward_at = bounds.max - half;
    let backward_at = bounds.min + half;

    if translate >= forward_at {
        Some(AutoScroll {
            direction: ScrollDirection::Forward,
            speed: AUTOSCROLL_ACCELERATION * (translate - forward_at) / dimension,
        })
    } else if translate <= backward_at {
        Some(AutoScroll {
            direction: ScrollDirection::Backward,
            speed: AUTOSCROLL_ACCELERATION * (backward_at - translate) / dimension,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{AutoScroll, ScrollDirection, plan_autoscroll};
    use crate::session::TranslateBounds;

    const BOUNDS: TranslateBounds = TranslateBounds {
        min: -175.0,
        max: 75.0,
    };

    #[test]
    fn clear_of_edges_does_not_scroll() {
        assert_eq!(plan_autoscroll(0.0, BOUNDS, 50.0), None);
        assert_eq!(plan_autoscroll(49.9, BOUNDS, 50.0), None);
        assert_eq!(plan_autoscroll(-149.9, BOUNDS, 50.0), None);
    }

    #[test]
    fn speed_grows_past_forward_threshold() {
        // Threshold is 75 - 25 = 50.
        let at = plan_autoscroll(50.0, BOUNDS, 50.0);
        assert_eq!(
            at,
            Some(AutoScroll {
                direction: ScrollDirection::Forward,
                speed: 0.0,
            })
        );
        let past = plan_autoscroll(75.0, BOUNDS, 50.0).map(|a| a.step());
        assert_eq!(past, Some(5.0));
    }

    #[test]
    fn speed_grows_past_backward_threshold() {
        // Threshold is -175 + 25 = -150.
        let past = plan_autoscroll(-200.0, BOUNDS, 50.0);
        assert_eq!(past.map(|a| a.direction), Some(ScrollDirection::Backward));
        assert_eq!(past.map(|a| a.step()), Some(-10.0));
    }

    #[test]
    fn degenerate_dimension_never_scrolls() {
        assert_eq!(plan_autoscroll(1000.0, BOUNDS, 0.0), None);
    }
}
