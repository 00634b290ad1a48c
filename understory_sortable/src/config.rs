// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sortable container configuration.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use crate::axis::Axis;

/// Source of the content window a sortable container listens on and measures.
pub enum ContentWindow<W> {
    /// A fixed window handle.
    Value(W),
    /// A provider called once when the container mounts.
    Provider(Box<dyn Fn() -> W>),
}

impl<W: Clone> ContentWindow<W> {
    /// Resolves the window handle, calling the provider if there is one.
    pub fn resolve(&self) -> W {
        match self {
            Self::Value(window) => window.clone(),
            Self::Provider(provider) => provider(),
        }
    }
}

impl<W: fmt::Debug> fmt::Debug for ContentWindow<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(window) => f.debug_tuple("Value").field(window).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Options applied once per sortable container.
///
/// Construct with struct update syntax over [`Default`]:
///
/// ```rust
/// use understory_sortable::{Axis, SortableConfig};
///
/// let config: SortableConfig<()> = SortableConfig {
///     axis: Axis::X,
///     press_delay: 150,
///     ..SortableConfig::default()
/// };
/// assert_eq!(config.transition_duration, 300);
/// ```
#[derive(Debug)]
pub struct SortableConfig<W> {
    /// Axis along which items are sorted.
    pub axis: Axis,
    /// Restricts the ghost's movement to a single axis, independent of `axis`.
    pub lock_axis: Option<Axis>,
    /// How long a press must be held before a drag starts, in milliseconds.
    pub press_delay: u32,
    /// Only start drags from elements registered as drag handles.
    pub use_drag_handle: bool,
    /// Bound and auto-scroll against the window rather than the container.
    pub use_window_as_scroll_container: bool,
    /// Hide the original element while its ghost is being dragged.
    pub hide_sortable_ghost: bool,
    /// Keep the ghost's center inside the container (or window) bounds.
    pub lock_to_container_edges: bool,
    /// Whitespace separated CSS classes added to the ghost.
    pub helper_class: Option<String>,
    /// Duration of sibling displacement transitions in milliseconds; `0` disables them.
    pub transition_duration: u32,
    /// Window used for bounds and listeners; defaults to the adapter's window.
    pub content_window: Option<ContentWindow<W>>,
    /// Allow access to the wrapped component through
    /// [`SortableContainer::wrapped_instance`](crate::SortableContainer::wrapped_instance).
    pub with_ref: bool,
}

impl<W> Default for SortableConfig<W> {
    fn default() -> Self {
        Self {
            axis: Axis::Y,
            lock_axis: None,
            press_delay: 0,
            use_drag_handle: false,
            use_window_as_scroll_container: false,
            hide_sortable_ghost: true,
            lock_to_container_edges: false,
            helper_class: None,
            transition_duration: 300,
            content_window: None,
            with_ref: false,
        }
    }
}

impl<W> SortableConfig<W> {
    /// Iterates the individual classes of [`SortableConfig::helper_class`].
    pub fn helper_classes(&self) -> impl Iterator<Item = &str> {
        self.helper_class
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
    }
}
