//! Render-side glue around the pure layout and geometry functions.
//!
//! A [`DiagramSession`] owns one roadmap graph and the direction it is shown in. It caches the
//! layout until the graph or direction changes, keeps the live node rectangles that dragging
//! mutates, and resolves every connector against those rectangles on demand. When a fresh
//! layout has been applied it tells its subscribers synchronously, so a viewport can fit itself
//! to the new bounds without waiting on a timer.

use crate::direction::Direction;
use crate::geometry::{
    AnchorPair, EdgeHandles, NodeRect, resolve_anchor_with, resolve_self_loop,
};
use crate::layout::{LayoutResult, layout};
use crate::options::LayoutOptions;
use indexmap::IndexMap;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use trailmap_graph::Graph;

/// Emitted after a new layout is in place and the live rectangles were reseeded from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutApplied {
    /// Increases by one with every recompute.
    pub generation: u64,
    pub direction: Direction,
    pub width: f64,
    pub height: f64,
}

type Listener = Rc<RefCell<dyn FnMut(&LayoutApplied)>>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

fn notify(listeners: &Rc<RefCell<Listeners>>, event: &LayoutApplied) {
    // Snapshot first so listeners may subscribe or unsubscribe while being called.
    let snapshot: Vec<Listener> = listeners
        .borrow()
        .entries
        .iter()
        .map(|(_, l)| Rc::clone(l))
        .collect();
    for listener in snapshot {
        let mut f = listener.borrow_mut();
        (&mut *f)(event);
    }
}

/// Keeps a layout listener registered; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .borrow_mut()
                .entries
                .retain(|(id, _)| *id != self.id);
        }
    }
}

/// Anchors of one edge for the current frame. `None` means "skip this edge for now".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeAnchors<'a> {
    pub edge_id: &'a str,
    pub anchors: Option<AnchorPair>,
}

pub struct DiagramSession {
    graph: Graph,
    node_ids: HashSet<String>,
    direction: Direction,
    options: LayoutOptions,

    layout: Option<LayoutResult>,
    generation: u64,
    live: IndexMap<String, NodeRect>,
    children: HashMap<String, Vec<String>>,

    listeners: Rc<RefCell<Listeners>>,
}

impl DiagramSession {
    pub fn new(graph: Graph, direction: Direction, options: LayoutOptions) -> Self {
        let node_ids = graph.nodes.iter().map(|n| n.id.clone()).collect();
        Self {
            graph,
            node_ids,
            direction,
            options,
            layout: None,
            generation: 0,
            live: IndexMap::new(),
            children: HashMap::default(),
            listeners: Rc::new(RefCell::new(Listeners::default())),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True when the next [`DiagramSession::ensure_layout`] will recompute.
    pub fn is_stale(&self) -> bool {
        self.layout.is_none()
    }

    pub fn set_graph(&mut self, graph: Graph) {
        self.node_ids = graph.nodes.iter().map(|n| n.id.clone()).collect();
        self.graph = graph;
        self.invalidate();
    }

    pub fn set_direction(&mut self, direction: Direction) {
        if direction != self.direction {
            self.direction = direction;
            self.invalidate();
        }
    }

    pub fn set_options(&mut self, options: LayoutOptions) {
        if options != self.options {
            self.options = options;
            self.invalidate();
        }
    }

    fn invalidate(&mut self) {
        self.layout = None;
    }

    pub fn on_layout_applied(&self, f: impl FnMut(&LayoutApplied) + 'static) -> Subscription {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        let listener: Listener = Rc::new(RefCell::new(f));
        listeners.entries.push((id, listener));
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    /// The cached layout, recomputing it first if the graph, direction or options changed.
    pub fn ensure_layout(&mut self) -> &LayoutResult {
        if self.layout.is_none() {
            let result = layout(&self.graph, self.direction, &self.options);
            self.seed_live_rects(&result);
            self.generation += 1;
            let event = LayoutApplied {
                generation: self.generation,
                direction: self.direction,
                width: result.width,
                height: result.height,
            };
            tracing::debug!(
                generation = event.generation,
                nodes = result.len(),
                "layout applied"
            );
            self.layout = Some(result);
            notify(&self.listeners, &event);
        }
        let direction = self.direction;
        self.layout
            .get_or_insert_with(|| LayoutResult::empty(direction))
    }

    pub fn layout(&self) -> Option<&LayoutResult> {
        self.layout.as_ref()
    }

    fn seed_live_rects(&mut self, result: &LayoutResult) {
        self.live.clear();
        self.children.clear();
        for (id, placement) in &result.nodes {
            if let Some(rect) = result.absolute_rect(id) {
                self.live.insert(id.clone(), rect);
            }
            if let Some(parent) = &placement.parent {
                self.children
                    .entry(parent.clone())
                    .or_default()
                    .push(id.clone());
            }
        }
    }

    pub fn live_rect(&self, id: &str) -> Option<&NodeRect> {
        self.live.get(id)
    }

    pub fn live_rects(&self) -> impl Iterator<Item = (&str, &NodeRect)> {
        self.live.iter().map(|(id, r)| (id.as_str(), r))
    }

    /// Moves a node's top-left corner to `(x, y)` in canvas space, carrying its group contents
    /// along. Never re-runs layout. Returns `false` for unknown nodes.
    pub fn move_node(&mut self, id: &str, x: f64, y: f64) -> bool {
        let Some(rect) = self.live.get(id) else {
            return false;
        };
        let (dx, dy) = (x - rect.x, y - rect.y);
        if !(dx.is_finite() && dy.is_finite()) {
            return false;
        }

        let mut stack: Vec<&str> = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(rect) = self.live.get_mut(cur) {
                *rect = rect.translated(dx, dy);
            }
            if let Some(children) = self.children.get(cur) {
                stack.extend(children.iter().map(String::as_str));
            }
        }
        true
    }

    /// Records the size a renderer actually measured for a node.
    pub fn set_measured_size(&mut self, id: &str, width: f64, height: f64) -> bool {
        let Some(rect) = self.live.get_mut(id) else {
            return false;
        };
        rect.width = width;
        rect.height = height;
        true
    }

    /// Anchors for every edge whose endpoints exist, resolved against the live rectangles.
    pub fn anchors(&self) -> Vec<EdgeAnchors<'_>> {
        self.graph
            .edges
            .iter()
            .filter(|e| self.node_ids.contains(&e.source) && self.node_ids.contains(&e.target))
            .map(|e| EdgeAnchors {
                edge_id: e.id.as_str(),
                anchors: self.resolve(e),
            })
            .collect()
    }

    pub fn anchors_for(&self, edge_id: &str) -> Option<AnchorPair> {
        let edge = self.graph.edges.iter().find(|e| e.id == edge_id)?;
        self.resolve(edge)
    }

    fn resolve(&self, edge: &trailmap_graph::Edge) -> Option<AnchorPair> {
        let source = self.live.get(&edge.source);
        if edge.is_self_loop() {
            return resolve_self_loop(source);
        }
        resolve_anchor_with(
            source,
            self.live.get(&edge.target),
            EdgeHandles::from_edge(edge),
            self.direction,
        )
    }
}
