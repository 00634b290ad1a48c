// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sortable --heading-base-level=0

//! Understory Sortable: a headless drag-to-reorder engine.
//!
//! This crate turns a stream of pointer events over a list or grid of visual
//! elements into a drag-to-reorder gesture: a press-hold starts the drag, a
//! ghost follows the pointer, siblings slide out of the way, the container
//! auto-scrolls near its edges, and release reports where the item landed.
//!
//! It does not render anything and does not reorder your data. The host:
//!
//! - implements [`ViewAdapter`] over its element handles (DOM nodes, widget
//!   ids, ...), providing geometry, styling, scrolling, listeners, and timers;
//! - registers each item with the engine's [`SortableRegistry`] as it mounts;
//! - forwards pointer events and fired timers to the [`SortableEngine`];
//! - commits the result of [`SortEvent::End`] with [`array_move`].
//!
//! ## Workflow
//!
//! 1) Build a [`SortableContainer`] (or a bare [`SortableEngine`]) from a
//!    [`SortableConfig`] and call `mount`.
//! 2) As items mount, call [`SortableRegistry::register`] with the item's
//!    collection, element, and index. Items with drag handles also call
//!    [`SortableRegistry::register_handle`] for the handle element.
//! 3) Forward pointer-down events from the document to
//!    [`SortableEngine::on_pointer_down`]. Forward move and up events to
//!    [`SortableEngine::on_pointer_move`] and [`SortableEngine::on_pointer_up`]
//!    once per listener that received them, passing the [`ListenerTarget`]
//!    that listener was attached to. Forward every fired timer to
//!    [`SortableEngine::on_timer`].
//! 4) React to the returned [`SortEvent`]s. On [`SortEvent::End`], move the
//!    item in your data:
//!
//! ```rust
//! use understory_sortable::{SortEnd, array_move};
//!
//! let mut todos = vec!["write", "review", "ship", "celebrate"];
//! let end = SortEnd { old_index: 3, new_index: 0, collection: "todos" };
//! array_move(&mut todos, end.old_index, end.new_index);
//! assert_eq!(todos, ["celebrate", "write", "review", "ship"]);
//! ```
//!
//! ## Sibling displacement
//!
//! Sorting never reorders elements while dragging. Each move recomputes, for
//! every sibling, whether the dragged item has crossed its threshold, and
//! translates crossed siblings by one item extent. See [`displacement`] for
//! the exact rule and its tie-break.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` floating-point support for `kurbo`.
//! - `tracing`: emits `tracing` events on press, drag start, drag end, and
//!   auto-scroll changes.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod array_move;
mod autoscroll;
mod axis;
mod config;
mod container;
pub mod displacement;
mod engine;
mod press;
mod registry;
mod session;
mod view;

pub use array_move::array_move;
pub use autoscroll::{
    AUTOSCROLL_ACCELERATION, AUTOSCROLL_TICK_MS, AutoScroll, ScrollDirection, plan_autoscroll,
};
pub use axis::{Axis, Edge};
pub use config::{ContentWindow, SortableConfig};
pub use container::{SORTABLE_DISPLAY_NAME, SortableContainer, display_name};
pub use engine::{RenderState, SortEnd, SortEvent, SortMove, SortStart, SortState, SortableEngine};
pub use press::{Press, PressState, resolve_press_target};
pub use registry::{ActiveTarget, SortableEntry, SortableRegistry};
pub use session::{AutoScrollTimer, DragSession, PositionUpdate, TranslateBounds, update_position};
pub use view::{
    ListenerTarget, PointerEvent, PointerEvents, ScrollTarget, ViewAdapter, closest, edge_offset,
};
