// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The platform seam: geometry, styling, scrolling, listeners, and timers.
//!
//! [`ViewAdapter`] is the only way the engine touches the host. A browser host
//! implements it over DOM nodes; tests implement it over a deterministic
//! in-memory scene.

use core::fmt::Debug;
use core::hash::Hash;

use kurbo::{Point, Rect, Size, Vec2};

use crate::axis::Edge;

bitflags::bitflags! {
    /// The pointer event triplet a listener subscribes to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PointerEvents: u8 {
        /// `mousedown` / `touchstart`.
        const START = 0b0000_0001;
        /// `mousemove` / `touchmove`.
        const MOVE  = 0b0000_0010;
        /// `mouseup` / `touchend`.
        const END   = 0b0000_0100;
    }
}

/// Where a set of listeners is attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListenerTarget<E, W> {
    /// The owner document of the sortable container.
    Document,
    /// A single element; used for the dragged element on touch devices.
    Element(E),
    /// The content window.
    Window(W),
}

/// The element whose scroll position drives auto-scroll.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollTarget {
    /// The sortable container itself.
    Container,
    /// The document body, when the window is the scroll container.
    Body,
}

/// A pointer event as delivered by the host.
///
/// For touch input, `position` is the client position of the first touch.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent<E> {
    /// The element the event was dispatched to.
    pub target: E,
    /// Client-space pointer position.
    pub position: Point,
}

impl<E> PointerEvent<E> {
    /// Creates a new pointer event.
    pub const fn new(target: E, position: Point) -> Self {
        Self { target, position }
    }
}

/// Capability surface the engine needs from the host platform.
///
/// All geometry is in logical pixels. Client-space rectangles are relative to
/// the viewport; offsets are relative to the parent element, matching the DOM's
/// `getBoundingClientRect` and `offsetTop` / `offsetLeft` respectively.
pub trait ViewAdapter {
    /// Handle to a visual element.
    type Element: Clone + Eq + Hash + Debug;
    /// Handle to a content window.
    type Window: Clone + Eq + Debug;
    /// Handle to a scheduled timer.
    type Timer: Copy + Eq + Debug;

    /// Returns the parent of `element`, or `None` at the root or when detached.
    fn parent(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Returns `true` if `element` is the sortable container.
    fn is_container(&self, element: &Self::Element) -> bool;

    /// Returns `true` if `element` is still attached to the document.
    fn is_attached(&self, element: &Self::Element) -> bool;

    /// Offset of `element` from its parent (`offsetLeft`, `offsetTop`).
    fn offset_position(&self, element: &Self::Element) -> Point;

    /// Layout size of `element` (`offsetWidth`, `offsetHeight`).
    fn offset_size(&self, element: &Self::Element) -> Size;

    /// Client-space bounding rectangle of `element`.
    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    /// Client-space bounding rectangle of the sortable container.
    fn container_rect(&self) -> Rect;

    /// Window used when no content window is configured.
    fn default_window(&self) -> Self::Window;

    /// Inner size of `window`.
    fn window_inner_size(&self, window: &Self::Window) -> Size;

    /// Returns `true` when the platform delivers touch events.
    ///
    /// Decides which event triplet a drag session listens to and where the
    /// session listeners are attached.
    fn touch_support(&self) -> bool;

    /// Reads the scroll position of `target` along `edge`.
    fn scroll_offset(&self, target: ScrollTarget, edge: Edge) -> f64;

    /// Writes the scroll position of `target` along `edge`.
    fn set_scroll_offset(&mut self, target: ScrollTarget, edge: Edge, offset: f64);

    /// Deep-clones `element` and appends the clone to the document body.
    fn clone_into_body(&mut self, element: &Self::Element) -> Self::Element;

    /// Detaches `element` from the document.
    fn remove_element(&mut self, element: &Self::Element);

    /// Positions `element` with fixed positioning at `origin` with the given width.
    fn set_fixed_placement(&mut self, element: &Self::Element, origin: Point, width: f64);

    /// Adds a single CSS class to `element`.
    fn add_class(&mut self, element: &Self::Element, class: &str);

    /// Sets a translation on `element`, or clears it with `None`.
    fn set_transform(&mut self, element: &Self::Element, translate: Option<Vec2>);

    /// Sets the transition duration of `element` in milliseconds, or clears it with `None`.
    fn set_transition_duration(&mut self, element: &Self::Element, duration_ms: Option<u32>);

    /// Shows or hides `element` in place.
    fn set_visible(&mut self, element: &Self::Element, visible: bool);

    /// Subscribes the engine to `events` on `target`.
    fn add_listeners(
        &mut self,
        target: &ListenerTarget<Self::Element, Self::Window>,
        events: PointerEvents,
    );

    /// Removes a subscription made with [`ViewAdapter::add_listeners`].
    fn remove_listeners(
        &mut self,
        target: &ListenerTarget<Self::Element, Self::Window>,
        events: PointerEvents,
    );

    /// Schedules a one-shot timer that fires after `delay_ms`.
    fn set_timeout(&mut self, delay_ms: u32) -> Self::Timer;

    /// Schedules a repeating timer that fires every `period_ms`.
    fn set_interval(&mut self, period_ms: u32) -> Self::Timer;

    /// Cancels a timer. Cancelling an already fired or cancelled timer is a no-op.
    fn clear_timer(&mut self, timer: Self::Timer);
}

/// Walks from `element` up through its ancestors and returns the first one
/// (including `element` itself) for which `pred` holds.
pub fn closest<A, F>(view: &A, element: &A::Element, mut pred: F) -> Option<A::Element>
where
    A: ViewAdapter + ?Sized,
    F: FnMut(&A::Element) -> bool,
{
    let mut node = Some(element.clone());
    while let Some(el) = node {
        if pred(&el) {
            return Some(el);
        }
        node = view.parent(&el);
    }
    None
}

/// Distance of `element`'s leading `edge` from the container origin.
///
/// Sums parent-relative offsets up the ancestor chain until the container is
/// reached, so nested item markup is measured correctly. Returns `None` when
/// `element` is not a descendant of the container.
pub fn edge_offset<A>(view: &A, element: &A::Element, edge: Edge) -> Option<f64>
where
    A: ViewAdapter + ?Sized,
{
    let mut offset = 0.0;
    let mut node = element.clone();
    loop {
        offset += edge.of_point(view.offset_position(&node));
        let parent = view.parent(&node)?;
        if view.is_container(&parent) {
            return Some(offset);
        }
        node = parent;
    }
}
