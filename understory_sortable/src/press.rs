// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pending press tracking.
//!
//! A press is the window between a pointer-down on a sortable element and the
//! moment its press-hold timer fires. Any move or release inside that window
//! cancels it, so taps and scroll gestures never turn into drags.
//!
//! ## Press Rules
//!
//! 1. **Resolution**: the pointer-down target, or its nearest ancestor, must be a
//!    registered sortable entry. Anything else is ignored.
//! 2. **Handles**: with drag handles enabled, the original event target must
//!    itself be a registered handle.
//! 3. **Replacement**: a new press replaces a pending one; the old timer is
//!    returned so the caller can clear it.
//! 4. **Stale timers**: a timer only completes the press it was scheduled for.

use core::hash::Hash;

use kurbo::Point;

use crate::registry::{ActiveTarget, SortableRegistry};
use crate::view::{PointerEvent, ViewAdapter, closest};

/// State for a pending press.
#[derive(Clone, Debug, PartialEq)]
pub struct Press<E, C, T> {
    /// The sortable element that was pressed.
    pub element: E,
    /// Collection and index of the pressed element.
    pub target: ActiveTarget<C>,
    /// Pointer position at press time.
    pub down_position: Point,
    /// Timer that completes the press.
    pub timer: T,
}

/// Tracks at most one pending press.
#[derive(Clone, Debug)]
pub struct PressState<E, C, T> {
    press: Option<Press<E, C, T>>,
}

impl<E, C, T> Default for PressState<E, C, T> {
    fn default() -> Self {
        Self { press: None }
    }
}

impl<E, C, T: Copy + Eq> PressState<E, C, T> {
    /// Creates an idle press state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a press, returning the press it replaced.
    pub fn on_down(&mut self, press: Press<E, C, T>) -> Option<Press<E, C, T>> {
        self.press.replace(press)
    }

    /// Completes the pending press if `timer` is the one it is waiting on.
    pub fn on_timer(&mut self, timer: T) -> Option<Press<E, C, T>> {
        if self.press.as_ref().is_some_and(|p| p.timer == timer) {
            self.press.take()
        } else {
            None
        }
    }

    /// Cancels the pending press, returning it so its timer can be cleared.
    pub fn cancel(&mut self) -> Option<Press<E, C, T>> {
        self.press.take()
    }

    /// Returns `true` while a press is pending.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// The pending press, if any.
    #[must_use]
    pub fn press(&self) -> Option<&Press<E, C, T>> {
        self.press.as_ref()
    }
}

/// Resolves the sortable element a pointer-down should press, if any.
///
/// Returns the element and its registry metadata.
pub fn resolve_press_target<A, C>(
    view: &A,
    registry: &SortableRegistry<A::Element, C>,
    event: &PointerEvent<A::Element>,
    use_drag_handle: bool,
) -> Option<(A::Element, ActiveTarget<C>)>
where
    A: ViewAdapter + ?Sized,
    C: Clone + Eq + Hash,
{
    let element = closest(view, &event.target, |el| registry.info_of(el).is_some())?;
    if use_drag_handle && !registry.is_handle(&event.target) {
        return None;
    }
    let (collection, index) = registry.info_of(&element)?;
    Some((element, ActiveTarget { collection, index }))
}
