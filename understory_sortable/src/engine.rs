// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag engine: a press-hold-move-release state machine.
//!
//! ## States
//!
//! - **Idle**: nothing is pressed.
//! - **Pressed**: a sortable element was pressed and its press-hold timer is
//!   pending. Any move or release cancels back to Idle.
//! - **Dragging**: the timer fired. A ghost follows the pointer, siblings are
//!   displaced on every move, and the container auto-scrolls near its edges.
//!   Release ends the drag and reports the old and new index.
//!
//! ## Driving the engine
//!
//! The host forwards pointer events from every listener the engine subscribed
//! to (see [`ViewAdapter::add_listeners`]), together with the
//! [`ListenerTarget`] the listener was attached to, and calls
//! [`SortableEngine::on_timer`] whenever a timer scheduled through the adapter
//! fires. All calls are synchronous; each one completes its geometry reads and
//! style writes before returning.
//!
//! A single physical move or release usually reaches two listeners: the
//! document subscription made at mount and the session subscription made at
//! drag start. Only the document delivery cancels a pending press, and only
//! the session delivery drives a drag, so each physical event is handled once.

use core::fmt;
use core::hash::Hash;

use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::autoscroll::{AUTOSCROLL_TICK_MS, plan_autoscroll};
use crate::config::{ContentWindow, SortableConfig};
use crate::displacement::{DraggedGeometry, SiblingGeometry, compute_displacement};
use crate::press::{Press, PressState, resolve_press_target};
use crate::registry::{ActiveTarget, SortableRegistry};
use crate::session::{AutoScrollTimer, DragSession, TranslateBounds, update_position};
use crate::view::{
    ListenerTarget, PointerEvent, PointerEvents, ScrollTarget, ViewAdapter, edge_offset,
};

/// Coarse state of the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SortState {
    /// No press or drag in progress.
    Idle,
    /// Waiting for the press-hold timer.
    Pressed,
    /// A drag session is active.
    Dragging,
}

/// Payload of [`SortEvent::Start`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortStart<E, C> {
    /// The dragged element.
    pub element: E,
    /// Its logical index.
    pub index: usize,
    /// Its collection.
    pub collection: C,
}

/// Payload of [`SortEvent::Move`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SortMove {
    /// Translation along the active axis after this move.
    pub translate: f64,
    /// Index the item would land on if released now.
    pub new_index: usize,
}

/// Payload of [`SortEvent::End`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortEnd<C> {
    /// Index the item was dragged from.
    pub old_index: usize,
    /// Index the item was dropped at.
    pub new_index: usize,
    /// Collection that was sorted.
    pub collection: C,
}

/// Lifecycle notification for the host.
#[derive(Clone, Debug, PartialEq)]
pub enum SortEvent<E, C> {
    /// A drag started.
    Start(SortStart<E, C>),
    /// The pointer moved during a drag.
    Move(SortMove),
    /// The drag ended.
    End(SortEnd<C>),
}

/// Sorting state handed to the wrapped component when it renders.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderState {
    /// `true` while a drag session is active.
    pub sorting: bool,
    /// Index of the dragged item while sorting.
    pub sorting_index: Option<usize>,
}

#[derive(Clone, Debug)]
struct Mount<W> {
    window: W,
    scroll_target: ScrollTarget,
}

/// Drag-to-reorder engine for one sortable container.
///
/// Owns the [`SortableRegistry`] of its items, the pending press, and the
/// active [`DragSession`]. At most one session exists at a time.
pub struct SortableEngine<A: ViewAdapter, C> {
    config: SortableConfig<A::Window>,
    registry: SortableRegistry<A::Element, C>,
    mount: Option<Mount<A::Window>>,
    press: PressState<A::Element, C, A::Timer>,
    session: Option<DragSession<A, C>>,
}

impl<A: ViewAdapter, C: fmt::Debug> fmt::Debug for SortableEngine<A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortableEngine")
            .field("mounted", &self.mount.is_some())
            .field("pressed", &self.press.is_pressed())
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl<A, C> SortableEngine<A, C>
where
    A: ViewAdapter,
    C: Clone + Eq + Hash + fmt::Debug,
{
    /// Creates an unmounted engine with an empty registry.
    pub fn new(config: SortableConfig<A::Window>) -> Self {
        Self {
            config,
            registry: SortableRegistry::new(),
            mount: None,
            press: PressState::new(),
            session: None,
        }
    }

    /// The configuration this engine was created with.
    pub fn config(&self) -> &SortableConfig<A::Window> {
        &self.config
    }

    /// The item registry.
    pub fn registry(&self) -> &SortableRegistry<A::Element, C> {
        &self.registry
    }

    /// Mutable access to the item registry, for item mount/unmount.
    pub fn registry_mut(&mut self) -> &mut SortableRegistry<A::Element, C> {
        &mut self.registry
    }

    /// Returns `true` between [`SortableEngine::mount`] and [`SortableEngine::unmount`].
    pub fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }

    /// Current coarse state.
    pub fn state(&self) -> SortState {
        if self.session.is_some() {
            SortState::Dragging
        } else if self.press.is_pressed() {
            SortState::Pressed
        } else {
            SortState::Idle
        }
    }

    /// The active drag session, if any.
    pub fn session(&self) -> Option<&DragSession<A, C>> {
        self.session.as_ref()
    }

    /// The pending press, if any.
    pub fn press(&self) -> Option<&Press<A::Element, C, A::Timer>> {
        self.press.press()
    }

    /// Sorting state for the wrapped component.
    pub fn render_state(&self) -> RenderState {
        RenderState {
            sorting: self.session.is_some(),
            sorting_index: self.session.as_ref().map(|s| s.origin_index),
        }
    }

    /// Attaches the engine to its container.
    ///
    /// Resolves the content window and subscribes to pointer events on the
    /// document. Mounting twice is a no-op.
    pub fn mount(&mut self, view: &mut A) {
        if self.mount.is_some() {
            return;
        }
        let window = self
            .config
            .content_window
            .as_ref()
            .map_or_else(|| view.default_window(), ContentWindow::resolve);
        let scroll_target = if self.config.use_window_as_scroll_container {
            ScrollTarget::Body
        } else {
            ScrollTarget::Container
        };
        view.add_listeners(&ListenerTarget::Document, PointerEvents::all());
        self.mount = Some(Mount {
            window,
            scroll_target,
        });
    }

    /// Detaches the engine, tearing down any press or drag in progress.
    ///
    /// An active drag is cleaned up exactly as on release, but no
    /// [`SortEvent::End`] is produced.
    pub fn unmount(&mut self, view: &mut A) {
        if self.mount.take().is_none() {
            return;
        }
        self.cancel_press(view);
        if let Some(session) = self.session.take() {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                collection = ?session.collection,
                index = session.origin_index,
                "sortable unmounted mid-drag"
            );
            teardown(view, &mut self.registry, &self.config, &session);
        }
        self.registry.clear_active();
        view.remove_listeners(&ListenerTarget::Document, PointerEvents::all());
    }

    /// Handles a pointer-down anywhere in the document.
    ///
    /// Returns `true` if the press targets a sortable element and the engine is
    /// now waiting for the press-hold timer.
    pub fn on_pointer_down(&mut self, view: &mut A, event: &PointerEvent<A::Element>) -> bool {
        if self.mount.is_none() || self.session.is_some() {
            return false;
        }
        let Some((element, target)) =
            resolve_press_target(view, &self.registry, event, self.config.use_drag_handle)
        else {
            return false;
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            collection = ?target.collection,
            index = target.index,
            delay_ms = self.config.press_delay,
            "sortable pressed"
        );

        self.registry.set_active(target.clone());
        let timer = view.set_timeout(self.config.press_delay);
        let previous = self.press.on_down(Press {
            element,
            target,
            down_position: event.position,
            timer,
        });
        if let Some(previous) = previous {
            view.clear_timer(previous.timer);
        }
        true
    }

    /// Handles a pointer move delivered by the listener on `source`.
    ///
    /// From the document, cancels a pending press. From the session listener,
    /// updates the ghost, displaces siblings, and re-plans auto-scroll. Any
    /// other delivery is ignored.
    pub fn on_pointer_move(
        &mut self,
        view: &mut A,
        source: &ListenerTarget<A::Element, A::Window>,
        event: &PointerEvent<A::Element>,
    ) -> Option<SortEvent<A::Element, C>> {
        if matches!(source, ListenerTarget::Document) {
            if self.session.is_none() {
                self.cancel_press(view);
            }
            return None;
        }
        let mount = self.mount.as_ref()?;
        let session = self
            .session
            .as_mut()
            .filter(|session| session.listener == *source)?;

        let bounds = self
            .config
            .lock_to_container_edges
            .then_some(session.bounds);
        let update = update_position(
            session.axis,
            self.config.lock_axis,
            bounds,
            session.initial_pointer,
            event.position,
        );
        session.current_translate = update.translate;
        view.set_transform(&session.ghost, Some(update.ghost_offset));

        displace_siblings(
            view,
            &mut self.registry,
            &self.config,
            mount.scroll_target,
            session,
        );
        replan_autoscroll(view, session);

        let new_index = session.new_index.unwrap_or(session.origin_index);
        #[cfg(feature = "tracing")]
        tracing::trace!(translate = session.current_translate, new_index, "sortable moved");
        Some(SortEvent::Move(SortMove {
            translate: session.current_translate,
            new_index,
        }))
    }

    /// Handles a pointer release delivered by the listener on `source`.
    ///
    /// From the document, cancels a pending press. From the session listener,
    /// ends the drag. Any other delivery is ignored.
    pub fn on_pointer_up(
        &mut self,
        view: &mut A,
        source: &ListenerTarget<A::Element, A::Window>,
        _event: &PointerEvent<A::Element>,
    ) -> Option<SortEvent<A::Element, C>> {
        if matches!(source, ListenerTarget::Document) {
            if self.session.is_none() {
                self.cancel_press(view);
            }
            return None;
        }
        if !self.session.as_ref().is_some_and(|s| s.listener == *source) {
            return None;
        }
        let session = self.session.take()?;
        teardown(view, &mut self.registry, &self.config, &session);
        self.registry.clear_active();

        let end = SortEnd {
            old_index: session.origin_index,
            new_index: session.new_index.unwrap_or(session.origin_index),
            collection: session.collection,
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(
            collection = ?end.collection,
            old_index = end.old_index,
            new_index = end.new_index,
            "sortable drag ended"
        );
        Some(SortEvent::End(end))
    }

    /// Handles a fired timer.
    ///
    /// Completes a pending press (starting a drag) or advances auto-scroll.
    /// Timers the engine no longer tracks are ignored.
    pub fn on_timer(&mut self, view: &mut A, timer: A::Timer) -> Option<SortEvent<A::Element, C>> {
        if let Some(press) = self.press.on_timer(timer) {
            return self.start_drag(view, press).map(SortEvent::Start);
        }
        let mount = self.mount.as_ref()?;
        let session = self.session.as_mut()?;
        let running = session.autoscroll.filter(|a| a.timer == timer)?;

        let step = running.plan.step();
        let scroll = view.scroll_offset(mount.scroll_target, session.edge);
        view.set_scroll_offset(mount.scroll_target, session.edge, scroll + step);
        session.current_translate += step;
        if self.config.lock_to_container_edges {
            session.current_translate = session.bounds.clamp(session.current_translate);
        }
        displace_siblings(
            view,
            &mut self.registry,
            &self.config,
            mount.scroll_target,
            session,
        );
        None
    }

    fn cancel_press(&mut self, view: &mut A) {
        if let Some(press) = self.press.cancel() {
            #[cfg(feature = "tracing")]
            tracing::debug!(index = press.target.index, "sortable press cancelled");
            view.clear_timer(press.timer);
            self.registry.clear_active();
        }
    }

    fn start_drag(
        &mut self,
        view: &mut A,
        press: Press<A::Element, C, A::Timer>,
    ) -> Option<SortStart<A::Element, C>> {
        let mount = self.mount.as_ref()?;
        let config = &self.config;

        // The pressed item may have unmounted while the timer was pending.
        let Some((collection, index)) = self.registry.info_of(&press.element) else {
            self.registry.clear_active();
            return None;
        };
        let element = press.element;
        let axis = config.axis;
        let edge = axis.edge();
        let Some(offset_edge) = edge_offset(view, &element, edge) else {
            self.registry.clear_active();
            return None;
        };

        let container_rect = view.container_rect();
        let size = view.offset_size(&element);
        let bounding_rect = view.bounding_rect(&element);
        let window_size = config
            .use_window_as_scroll_container
            .then(|| view.window_inner_size(&mount.window));
        let bounds = TranslateBounds::compute(axis, container_rect, bounding_rect, size, window_size);
        let initial_scroll = view.scroll_offset(mount.scroll_target, edge);

        let ghost = view.clone_into_body(&element);
        view.set_fixed_placement(&ghost, bounding_rect.origin(), size.width);
        for class in config.helper_classes() {
            view.add_class(&ghost, class);
        }
        if config.hide_sortable_ghost {
            view.set_visible(&element, false);
        }

        let listener = if view.touch_support() {
            ListenerTarget::Element(element.clone())
        } else {
            ListenerTarget::Window(mount.window.clone())
        };
        view.add_listeners(&listener, PointerEvents::MOVE | PointerEvents::END);

        self.registry.set_active(ActiveTarget {
            collection: collection.clone(),
            index,
        });
        self.session = Some(DragSession {
            collection: collection.clone(),
            origin_index: index,
            element: element.clone(),
            axis,
            edge,
            dimension: axis.extent(size),
            bounding_rect,
            bounds,
            initial_pointer: press.down_position,
            initial_scroll,
            offset_edge,
            current_translate: 0.0,
            ghost,
            listener,
            new_index: None,
            autoscroll: None,
            styled: HashSet::new(),
        });

        #[cfg(feature = "tracing")]
        tracing::debug!(
            collection = ?collection,
            index,
            min = bounds.min,
            max = bounds.max,
            "sortable drag started"
        );
        Some(SortStart {
            element,
            index,
            collection,
        })
    }
}

/// Recomputes sibling shifts for the current translation and applies them.
fn displace_siblings<A, C>(
    view: &mut A,
    registry: &mut SortableRegistry<A::Element, C>,
    config: &SortableConfig<A::Window>,
    scroll_target: ScrollTarget,
    session: &mut DragSession<A, C>,
) where
    A: ViewAdapter,
    C: Clone + Eq + Hash,
{
    let delta_scroll = view.scroll_offset(scroll_target, session.edge) - session.initial_scroll;
    let sorting_offset = session.offset_edge + session.current_translate + delta_scroll;

    let mut entries = registry.ordered_entries_mut(Some(&session.collection));
    let siblings: SmallVec<[SiblingGeometry; 16]> = entries
        .iter_mut()
        .map(|entry| {
            if entry.edge_offset.is_none() {
                entry.edge_offset = edge_offset(&*view, &entry.element, session.edge);
            }
            SiblingGeometry {
                index: entry.index,
                dimension: session.axis.extent(view.offset_size(&entry.element)),
                edge_offset: entry.edge_offset,
            }
        })
        .collect();

    let displacement = compute_displacement(
        DraggedGeometry {
            index: session.origin_index,
            dimension: session.dimension,
            sorting_offset,
        },
        &siblings,
    );

    for shift in &displacement.shifts {
        let element = &entries[shift.slot].element;
        if config.transition_duration > 0 {
            view.set_transition_duration(element, Some(config.transition_duration));
        }
        view.set_transform(element, Some(session.axis.vec(shift.translate)));
        if !session.styled.contains(element) {
            session.styled.insert(element.clone());
        }
    }
    session.new_index = Some(displacement.new_index);

    // Siblings unregistered mid-drag drop out of the pass; put them back.
    let departed: SmallVec<[A::Element; 4]> = session
        .styled
        .iter()
        .filter(|el| !entries.iter().any(|entry| entry.element == **el))
        .cloned()
        .collect();
    for element in departed {
        session.styled.remove(&element);
        reset_style(view, &element);
    }
}

fn reset_style<A: ViewAdapter>(view: &mut A, element: &A::Element) {
    if view.is_attached(element) {
        view.set_transform(element, None);
        view.set_transition_duration(element, None);
    }
}

/// Starts, restarts, or stops the auto-scroll interval for the current translation.
fn replan_autoscroll<A: ViewAdapter, C>(view: &mut A, session: &mut DragSession<A, C>) {
    let plan = plan_autoscroll(session.current_translate, session.bounds, session.dimension);
    if session.autoscroll.map(|a| a.plan) == plan {
        return;
    }
    if let Some(running) = session.autoscroll.take() {
        view.clear_timer(running.timer);
    }
    if let Some(plan) = plan {
        #[cfg(feature = "tracing")]
        tracing::trace!(direction = ?plan.direction, speed = plan.speed, "sortable autoscroll");
        session.autoscroll = Some(AutoScrollTimer {
            timer: view.set_interval(AUTOSCROLL_TICK_MS),
            plan,
        });
    }
}

/// Undoes every visual effect of a drag session.
fn teardown<A, C>(
    view: &mut A,
    registry: &mut SortableRegistry<A::Element, C>,
    config: &SortableConfig<A::Window>,
    session: &DragSession<A, C>,
) where
    A: ViewAdapter,
    C: Clone + Eq + Hash,
{
    let events = PointerEvents::MOVE | PointerEvents::END;
    match &session.listener {
        ListenerTarget::Element(el) if !view.is_attached(el) => {}
        listener => view.remove_listeners(listener, events),
    }
    if view.is_attached(&session.ghost) {
        view.remove_element(&session.ghost);
    }
    if config.hide_sortable_ghost && view.is_attached(&session.element) {
        view.set_visible(&session.element, true);
    }
    registry.clear_collection_cache(&session.collection);
    for element in &session.styled {
        reset_style(view, element);
    }
    if let Some(running) = session.autoscroll {
        view.clear_timer(running.timer);
    }
}
