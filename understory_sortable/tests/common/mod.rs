// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A deterministic in-memory scene implementing [`ViewAdapter`].
//!
//! Elements are `u32` ids laid out in a body > container > items tree. The
//! scene records every style write, listener change, and timer so tests can
//! assert on what the engine did to the "page".

#![allow(
    dead_code,
    unreachable_pub,
    reason = "each test binary uses a different subset of the scene"
)]

use std::collections::{BTreeMap, HashMap};

use kurbo::{Point, Rect, Size, Vec2};
use understory_sortable::{
    Edge, ListenerTarget, PointerEvent, PointerEvents, ScrollTarget, SortEvent,
    SortableConfig, SortableEngine, ViewAdapter,
};

/// Root of the scene.
pub const BODY: u32 = 0;
/// The sortable container.
pub const CONTAINER: u32 = 1;
/// The default window handle.
pub const WINDOW: u32 = 999;
/// Collection all items are registered in.
pub const LIST: &str = "list";
/// The document subscription made at mount.
pub const DOCUMENT: ListenerTarget<u32, u32> = ListenerTarget::Document;
/// The session subscription of a mouse drag on the default window.
pub const MOUSE: ListenerTarget<u32, u32> = ListenerTarget::Window(WINDOW);

const FIRST_ITEM: u32 = 10;
const FIRST_HANDLE: u32 = 100;
const FIRST_LABEL: u32 = 200;
const FIRST_CLONE: u32 = 1000;

/// Element id of the item at `index`.
pub const fn item(index: usize) -> u32 {
    FIRST_ITEM + index as u32
}

/// Element id of the drag handle inside the item at `index`.
pub const fn handle(index: usize) -> u32 {
    FIRST_HANDLE + index as u32
}

/// Element id of the plain label inside the item at `index`, beside its handle.
pub const fn label(index: usize) -> u32 {
    FIRST_LABEL + index as u32
}

/// One element of the scene.
#[derive(Clone, Debug, Default)]
pub struct Node {
    pub parent: Option<u32>,
    pub offset: Point,
    pub size: Size,
    pub rect: Rect,
    pub attached: bool,
    pub visible: bool,
    pub transform: Option<Vec2>,
    pub transition: Option<u32>,
    pub classes: Vec<String>,
    pub fixed: Option<(Point, f64)>,
}

/// Kind of a scheduled timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerKind {
    Timeout(u32),
    Interval(u32),
}

/// The in-memory scene.
#[derive(Debug)]
pub struct Scene {
    pub nodes: HashMap<u32, Node>,
    pub container_rect: Rect,
    pub window_size: Size,
    pub touch: bool,
    pub container_scroll: Vec2,
    pub body_scroll: Vec2,
    pub listeners: Vec<(ListenerTarget<u32, u32>, PointerEvents)>,
    pub timers: BTreeMap<u32, TimerKind>,
    next_timer: u32,
    next_clone: u32,
}

impl Scene {
    /// A vertical list of `count` items, each `extent` tall and 100 wide,
    /// stacked from the top of a container that fits them exactly.
    pub fn column(count: usize, extent: f64) -> Self {
        let height = extent * count as f64;
        let mut nodes = HashMap::new();
        nodes.insert(
            BODY,
            Node {
                attached: true,
                visible: true,
                ..Node::default()
            },
        );
        nodes.insert(
            CONTAINER,
            Node {
                parent: Some(BODY),
                size: Size::new(100.0, height),
                rect: Rect::new(0.0, 0.0, 100.0, height),
                attached: true,
                visible: true,
                ..Node::default()
            },
        );
        for i in 0..count {
            let top = extent * i as f64;
            nodes.insert(
                item(i),
                Node {
                    parent: Some(CONTAINER),
                    offset: Point::new(0.0, top),
                    size: Size::new(100.0, extent),
                    rect: Rect::new(0.0, top, 100.0, top + extent),
                    attached: true,
                    visible: true,
                    ..Node::default()
                },
            );
            nodes.insert(
                handle(i),
                Node {
                    parent: Some(item(i)),
                    offset: Point::new(80.0, 0.0),
                    size: Size::new(20.0, extent),
                    rect: Rect::new(80.0, top, 100.0, top + extent),
                    attached: true,
                    visible: true,
                    ..Node::default()
                },
            );
            nodes.insert(
                label(i),
                Node {
                    parent: Some(item(i)),
                    size: Size::new(80.0, extent),
                    rect: Rect::new(0.0, top, 80.0, top + extent),
                    attached: true,
                    visible: true,
                    ..Node::default()
                },
            );
        }
        Self {
            nodes,
            container_rect: Rect::new(0.0, 0.0, 100.0, height),
            window_size: Size::new(1024.0, 768.0),
            touch: false,
            container_scroll: Vec2::ZERO,
            body_scroll: Vec2::ZERO,
            listeners: Vec::new(),
            timers: BTreeMap::new(),
            next_timer: 1,
            next_clone: FIRST_CLONE,
        }
    }

    pub fn node(&self, id: u32) -> &Node {
        &self.nodes[&id]
    }

    pub fn transform(&self, id: u32) -> Option<Vec2> {
        self.node(id).transform
    }

    /// Pending one-shot timers.
    pub fn timeouts(&self) -> Vec<u32> {
        self.timers
            .iter()
            .filter(|(_, kind)| matches!(kind, TimerKind::Timeout(_)))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Running intervals.
    pub fn intervals(&self) -> Vec<u32> {
        self.timers
            .iter()
            .filter(|(_, kind)| matches!(kind, TimerKind::Interval(_)))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn has_listener(&self, target: &ListenerTarget<u32, u32>) -> bool {
        self.listeners.iter().any(|(t, _)| t == target)
    }

    /// Ids of clones appended to the body that are still attached.
    pub fn attached_clones(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self
            .nodes
            .iter()
            .filter(|(id, node)| **id >= FIRST_CLONE && node.attached)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Detaches `id` as if the host had removed it from the document.
    pub fn detach(&mut self, id: u32) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.attached = false;
            node.parent = None;
        }
    }

    fn scroll_mut(&mut self, target: ScrollTarget) -> &mut Vec2 {
        match target {
            ScrollTarget::Container => &mut self.container_scroll,
            ScrollTarget::Body => &mut self.body_scroll,
        }
    }

    fn schedule(&mut self, kind: TimerKind) -> u32 {
        let id = self.next_timer;
        self.next_timer += 1;
        self.timers.insert(id, kind);
        id
    }
}

impl ViewAdapter for Scene {
    type Element = u32;
    type Window = u32;
    type Timer = u32;

    fn parent(&self, element: &u32) -> Option<u32> {
        self.nodes.get(element).and_then(|n| n.parent)
    }

    fn is_container(&self, element: &u32) -> bool {
        *element == CONTAINER
    }

    fn is_attached(&self, element: &u32) -> bool {
        self.nodes.get(element).is_some_and(|n| n.attached)
    }

    fn offset_position(&self, element: &u32) -> Point {
        self.nodes.get(element).map_or(Point::ZERO, |n| n.offset)
    }

    fn offset_size(&self, element: &u32) -> Size {
        self.nodes.get(element).map_or(Size::ZERO, |n| n.size)
    }

    fn bounding_rect(&self, element: &u32) -> Rect {
        self.nodes.get(element).map_or(Rect::ZERO, |n| n.rect)
    }

    fn container_rect(&self) -> Rect {
        self.container_rect
    }

    fn default_window(&self) -> u32 {
        WINDOW
    }

    fn window_inner_size(&self, _window: &u32) -> Size {
        self.window_size
    }

    fn touch_support(&self) -> bool {
        self.touch
    }

    fn scroll_offset(&self, target: ScrollTarget, edge: Edge) -> f64 {
        let scroll = match target {
            ScrollTarget::Container => self.container_scroll,
            ScrollTarget::Body => self.body_scroll,
        };
        match edge {
            Edge::Left => scroll.x,
            Edge::Top => scroll.y,
        }
    }

    fn set_scroll_offset(&mut self, target: ScrollTarget, edge: Edge, offset: f64) {
        let scroll = self.scroll_mut(target);
        match edge {
            Edge::Left => scroll.x = offset,
            Edge::Top => scroll.y = offset,
        }
    }

    fn clone_into_body(&mut self, element: &u32) -> u32 {
        let mut node = self.nodes.get(element).cloned().unwrap_or_default();
        node.parent = Some(BODY);
        node.offset = Point::ZERO;
        node.attached = true;
        node.visible = true;
        let id = self.next_clone;
        self.next_clone += 1;
        self.nodes.insert(id, node);
        id
    }

    fn remove_element(&mut self, element: &u32) {
        self.detach(*element);
    }

    fn set_fixed_placement(&mut self, element: &u32, origin: Point, width: f64) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.fixed = Some((origin, width));
        }
    }

    fn add_class(&mut self, element: &u32, class: &str) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.classes.push(class.to_owned());
        }
    }

    fn set_transform(&mut self, element: &u32, translate: Option<Vec2>) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.transform = translate;
        }
    }

    fn set_transition_duration(&mut self, element: &u32, duration_ms: Option<u32>) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.transition = duration_ms;
        }
    }

    fn set_visible(&mut self, element: &u32, visible: bool) {
        if let Some(node) = self.nodes.get_mut(element) {
            node.visible = visible;
        }
    }

    fn add_listeners(&mut self, target: &ListenerTarget<u32, u32>, events: PointerEvents) {
        self.listeners.push((target.clone(), events));
    }

    fn remove_listeners(&mut self, target: &ListenerTarget<u32, u32>, events: PointerEvents) {
        self.listeners.retain(|(t, e)| !(t == target && *e == events));
    }

    fn set_timeout(&mut self, delay_ms: u32) -> u32 {
        self.schedule(TimerKind::Timeout(delay_ms))
    }

    fn set_interval(&mut self, period_ms: u32) -> u32 {
        self.schedule(TimerKind::Interval(period_ms))
    }

    fn clear_timer(&mut self, timer: u32) {
        self.timers.remove(&timer);
    }
}

/// An engine over `scene`, mounted, with every item registered in [`LIST`].
pub fn mounted(
    scene: &mut Scene,
    count: usize,
    config: SortableConfig<u32>,
) -> SortableEngine<Scene, &'static str> {
    let mut engine = SortableEngine::new(config);
    for i in 0..count {
        engine.registry_mut().register(LIST, item(i), i);
        engine.registry_mut().register_handle(handle(i));
    }
    engine.mount(scene);
    engine
}

/// A pointer event at the center of the item at `index` in a column of `extent` tall items.
pub fn at_item(index: usize, extent: f64) -> PointerEvent<u32> {
    PointerEvent::new(item(index), Point::new(50.0, extent * index as f64 + extent / 2.0))
}

/// A pointer event targeting `target` at `(x, y)`.
pub fn at(target: u32, x: f64, y: f64) -> PointerEvent<u32> {
    PointerEvent::new(target, Point::new(x, y))
}

/// Fires a one-shot timer the way a host event loop would.
pub fn fire_timeout(
    scene: &mut Scene,
    engine: &mut SortableEngine<Scene, &'static str>,
    timer: u32,
) -> Option<SortEvent<u32, &'static str>> {
    scene.timers.remove(&timer);
    engine.on_timer(scene, timer)
}

/// Presses the item at `index` and fires its press-hold timer.
pub fn start_drag(
    scene: &mut Scene,
    engine: &mut SortableEngine<Scene, &'static str>,
    index: usize,
    extent: f64,
) -> Option<SortEvent<u32, &'static str>> {
    assert!(
        engine.on_pointer_down(scene, &at_item(index, extent)),
        "press on item {index} was not accepted"
    );
    let timer = engine.press().map(|p| p.timer)?;
    fire_timeout(scene, engine, timer)
}
