// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wrapping a presentational component with sortable behavior.

use alloc::format;
use alloc::string::String;
use core::fmt;
use core::hash::Hash;

use crate::config::SortableConfig;
use crate::engine::{RenderState, SortEvent, SortableEngine};
use crate::view::{ListenerTarget, PointerEvent, ViewAdapter};

/// Display name of an unnamed sortable container.
pub const SORTABLE_DISPLAY_NAME: &str = "SortableList";

/// Display name for a container wrapping a component named `wrapped_name`.
///
/// ```rust
/// use understory_sortable::display_name;
///
/// assert_eq!(display_name(Some("TodoList")), "SortableList(TodoList)");
/// assert_eq!(display_name(None), "SortableList");
/// ```
pub fn display_name(wrapped_name: Option<&str>) -> String {
    match wrapped_name {
        Some(name) => format!("{SORTABLE_DISPLAY_NAME}({name})"),
        None => String::from(SORTABLE_DISPLAY_NAME),
    }
}

/// A presentational component `W` augmented with a [`SortableEngine`].
///
/// The container is constructed once per mounted list and owns both the
/// wrapped component and the engine (with its registry). Item renderers are
/// handed [`SortableContainer::engine_mut`] to register themselves; the host
/// forwards pointer events and timers to the same engine.
pub struct SortableContainer<W, A: ViewAdapter, C> {
    wrapped: W,
    engine: SortableEngine<A, C>,
}

impl<W: fmt::Debug, A: ViewAdapter, C: fmt::Debug> fmt::Debug for SortableContainer<W, A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortableContainer")
            .field("wrapped", &self.wrapped)
            .field("engine", &self.engine)
            .finish()
    }
}

impl<W, A, C> SortableContainer<W, A, C>
where
    A: ViewAdapter,
    C: Clone + Eq + Hash + fmt::Debug,
{
    /// Wraps `wrapped` with a fresh engine built from `config`.
    pub fn new(wrapped: W, config: SortableConfig<A::Window>) -> Self {
        Self {
            wrapped,
            engine: SortableEngine::new(config),
        }
    }

    /// The wrapped component.
    ///
    /// # Panics
    ///
    /// Panics unless the container was configured with
    /// [`SortableConfig::with_ref`] set.
    #[track_caller]
    pub fn wrapped_instance(&self) -> &W {
        self.assert_with_ref();
        &self.wrapped
    }

    /// Mutable access to the wrapped component.
    ///
    /// # Panics
    ///
    /// Panics unless the container was configured with
    /// [`SortableConfig::with_ref`] set.
    #[track_caller]
    pub fn wrapped_instance_mut(&mut self) -> &mut W {
        self.assert_with_ref();
        &mut self.wrapped
    }

    /// Renders the wrapped component with the container's configuration and
    /// current sorting state.
    pub fn render<R>(
        &self,
        render: impl FnOnce(&W, &SortableConfig<A::Window>, RenderState) -> R,
    ) -> R {
        render(
            &self.wrapped,
            self.engine.config(),
            self.engine.render_state(),
        )
    }

    /// The engine driving this container.
    pub fn engine(&self) -> &SortableEngine<A, C> {
        &self.engine
    }

    /// Mutable access to the engine, for event delivery and item registration.
    pub fn engine_mut(&mut self) -> &mut SortableEngine<A, C> {
        &mut self.engine
    }

    /// Mounts the engine. See [`SortableEngine::mount`].
    pub fn mount(&mut self, view: &mut A) {
        self.engine.mount(view);
    }

    /// Unmounts the engine. See [`SortableEngine::unmount`].
    pub fn unmount(&mut self, view: &mut A) {
        self.engine.unmount(view);
    }

    /// See [`SortableEngine::on_pointer_down`].
    pub fn on_pointer_down(&mut self, view: &mut A, event: &PointerEvent<A::Element>) -> bool {
        self.engine.on_pointer_down(view, event)
    }

    /// See [`SortableEngine::on_pointer_move`].
    pub fn on_pointer_move(
        &mut self,
        view: &mut A,
        source: &ListenerTarget<A::Element, A::Window>,
        event: &PointerEvent<A::Element>,
    ) -> Option<SortEvent<A::Element, C>> {
        self.engine.on_pointer_move(view, source, event)
    }

    /// See [`SortableEngine::on_pointer_up`].
    pub fn on_pointer_up(
        &mut self,
        view: &mut A,
        source: &ListenerTarget<A::Element, A::Window>,
        event: &PointerEvent<A::Element>,
    ) -> Option<SortEvent<A::Element, C>> {
        self.engine.on_pointer_up(view, source, event)
    }

    /// See [`SortableEngine::on_timer`].
    pub fn on_timer(&mut self, view: &mut A, timer: A::Timer) -> Option<SortEvent<A::Element, C>> {
        self.engine.on_timer(view, timer)
    }

    #[track_caller]
    fn assert_with_ref(&self) {
        assert!(
            self.engine.config().with_ref,
            "To access the wrapped instance, configure the sortable container with `with_ref: true`"
        );
    }
}
