// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session state and the per-move position math.

use core::fmt;

use hashbrown::HashSet;
use kurbo::{Point, Rect, Size, Vec2};

use crate::autoscroll::AutoScroll;
use crate::axis::{Axis, Edge};
use crate::view::{ListenerTarget, ViewAdapter};

/// Valid range of the dragged item's translation along the active axis.
///
/// The bounds keep the ghost's center inside the container, or inside the
/// window when the window is the scroll container.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TranslateBounds {
    /// Smallest allowed translation.
    pub min: f64,
    /// Largest allowed translation.
    pub max: f64,
}

impl TranslateBounds {
    /// Computes the bounds for a drag.
    ///
    /// - `container`: client rect of the container.
    /// - `dragged`: client rect of the dragged element at press time.
    /// - `dragged_size`: layout size of the dragged element.
    /// - `window`: inner size of the window, when it is the scroll container.
    #[must_use]
    pub fn compute(
        axis: Axis,
        container: Rect,
        dragged: Rect,
        dragged_size: Size,
        window: Option<Size>,
    ) -> Self {
        let edge = axis.edge();
        let start = edge.start_of(dragged) + axis.extent(dragged_size) / 2.0;
        let (lo, hi) = match window {
            Some(size) => (0.0, axis.extent(size)),
            None => {
                let lo = edge.start_of(container);
                (lo, lo + axis.extent(container.size()))
            }
        };
        Self {
            min: lo - start,
            max: hi - start,
        }
    }

    /// Clamps `translate` into the bounds.
    #[must_use]
    pub fn clamp(self, translate: f64) -> f64 {
        if translate < self.min {
            self.min
        } else if translate > self.max {
            self.max
        } else {
            translate
        }
    }
}

/// Result of applying a pointer position to a drag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PositionUpdate {
    /// Translation along the active axis.
    pub translate: f64,
    /// Offset to apply to the ghost.
    pub ghost_offset: Vec2,
}

/// Translates a pointer position into the dragged item's translation.
///
/// The active-axis component is clamped when `bounds` is given; `lock_axis`
/// zeroes the ghost's movement on the other axis.
#[must_use]
pub fn update_position(
    axis: Axis,
    lock_axis: Option<Axis>,
    bounds: Option<TranslateBounds>,
    initial: Point,
    current: Point,
) -> PositionUpdate {
    let delta = current - initial;
    let mut translate = axis.of_vec(delta);
    if let Some(bounds) = bounds {
        translate = bounds.clamp(translate);
    }
    let mut ghost_offset = axis.with_component(delta, translate);
    if let Some(lock) = lock_axis {
        ghost_offset = lock.lock(ghost_offset);
    }
    PositionUpdate {
        translate,
        ghost_offset,
    }
}

/// An auto-scroll interval and the plan it runs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AutoScrollTimer<T> {
    /// Interval handle.
    pub timer: T,
    /// Direction and speed applied each tick.
    pub plan: AutoScroll,
}

/// State of an active drag.
///
/// Created when the press-hold timer fires, mutated by move events and
/// auto-scroll ticks, and dropped on release or unmount.
pub struct DragSession<A: ViewAdapter, C> {
    pub(crate) collection: C,
    pub(crate) origin_index: usize,
    pub(crate) element: A::Element,
    pub(crate) axis: Axis,
    pub(crate) edge: Edge,
    pub(crate) dimension: f64,
    pub(crate) bounding_rect: Rect,
    pub(crate) bounds: TranslateBounds,
    pub(crate) initial_pointer: Point,
    pub(crate) initial_scroll: f64,
    pub(crate) offset_edge: f64,
    pub(crate) current_translate: f64,
    pub(crate) ghost: A::Element,
    pub(crate) listener: ListenerTarget<A::Element, A::Window>,
    pub(crate) new_index: Option<usize>,
    pub(crate) autoscroll: Option<AutoScrollTimer<A::Timer>>,
    /// Siblings carrying a displacement transform or transition.
    pub(crate) styled: HashSet<A::Element>,
}

impl<A: ViewAdapter, C> DragSession<A, C> {
    /// Collection being sorted.
    pub fn collection(&self) -> &C {
        &self.collection
    }

    /// Index the dragged item started at.
    pub fn origin_index(&self) -> usize {
        self.origin_index
    }

    /// The dragged element.
    pub fn element(&self) -> &A::Element {
        &self.element
    }

    /// The ghost element following the pointer.
    pub fn ghost(&self) -> &A::Element {
        &self.ghost
    }

    /// Where the session's move and end listeners are attached.
    pub fn listener(&self) -> &ListenerTarget<A::Element, A::Window> {
        &self.listener
    }

    /// Active axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Leading edge measured along the active axis.
    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// Extent of the dragged element along the active axis.
    pub fn dimension(&self) -> f64 {
        self.dimension
    }

    /// Client rect of the dragged element at press time.
    pub fn bounding_rect(&self) -> Rect {
        self.bounding_rect
    }

    /// Translation bounds.
    pub fn bounds(&self) -> TranslateBounds {
        self.bounds
    }

    /// Current translation along the active axis.
    pub fn current_translate(&self) -> f64 {
        self.current_translate
    }

    /// Index the item would land on if released now.
    ///
    /// `None` until the first move event.
    pub fn new_index(&self) -> Option<usize> {
        self.new_index
    }

    /// The running auto-scroll plan, if any.
    pub fn autoscroll(&self) -> Option<AutoScroll> {
        self.autoscroll.map(|a| a.plan)
    }
}

impl<A: ViewAdapter, C: fmt::Debug> fmt::Debug for DragSession<A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragSession")
            .field("collection", &self.collection)
            .field("origin_index", &self.origin_index)
            .field("element", &self.element)
            .field("axis", &self.axis)
            .field("dimension", &self.dimension)
            .field("bounds", &self.bounds)
            .field("current_translate", &self.current_translate)
            .field("new_index", &self.new_index)
            .field("autoscroll", &self.autoscroll)
            .finish_non_exhaustive()
    }
}
