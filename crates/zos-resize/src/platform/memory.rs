//! In-memory platform for headless hosts and tests
//!
//! Models just enough of a document to drive resize handles: an element
//! tree with inline styles and attributes, bubbling pointer/touch dispatch,
//! a settable viewport and a manual clock.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{
    touch_point, EventCallback, InputMode, ListenTarget, Platform, PointerEventKind, PointerSample,
};
use crate::error::ResizeError;
use crate::math::{Rect, Size, Vec2};

/// Element handle in a [`MemoryPlatform`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

/// Raw event delivered by a [`MemoryPlatform`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryEvent {
    /// Pointer position (pointer mode)
    pub client: Vec2,
    /// Primary pointer / button
    pub primary: bool,
    /// Active touch points (touch mode)
    pub touches: Vec<Vec2>,
    /// Touch points that changed in this event (touch mode)
    pub changed_touches: Vec<Vec2>,
}

impl MemoryEvent {
    /// Primary pointer event at a client position
    pub fn pointer(x: f32, y: f32) -> Self {
        Self {
            client: Vec2::new(x, y),
            primary: true,
            ..Default::default()
        }
    }

    /// Secondary button / non-primary pointer event
    pub fn secondary(x: f32, y: f32) -> Self {
        Self {
            client: Vec2::new(x, y),
            primary: false,
            ..Default::default()
        }
    }

    /// Touch event with active and changed touch points
    pub fn touch(touches: &[Vec2], changed_touches: &[Vec2]) -> Self {
        Self {
            primary: true,
            touches: touches.to_vec(),
            changed_touches: changed_touches.to_vec(),
            ..Default::default()
        }
    }
}

/// Listener registration token
#[derive(Debug, PartialEq, Eq)]
pub struct MemoryListener(u64);

#[derive(Default)]
struct MemoryNode {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    style: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    /// Position supplied by "stylesheets", used when no inline value is set
    sheet_position: Option<String>,
    rect: Rect,
}

struct Registration {
    id: u64,
    /// `None` for the document
    target: Option<NodeId>,
    kind: PointerEventKind,
    callback: EventCallback<MemoryEvent>,
}

/// In-memory document
pub struct MemoryPlatform {
    mode: InputMode,
    nodes: RefCell<BTreeMap<NodeId, MemoryNode>>,
    next_node: Cell<u32>,
    listeners: RefCell<Vec<Registration>>,
    next_listener: Cell<u64>,
    viewport: Cell<Size>,
    /// Simulated time in milliseconds
    time_ms: Cell<f64>,
}

impl Default for MemoryPlatform {
    fn default() -> Self {
        Self::new(InputMode::Pointer)
    }
}

impl MemoryPlatform {
    /// Create an empty document with a 1024x768 viewport
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            nodes: RefCell::new(BTreeMap::new()),
            next_node: Cell::new(1),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(1),
            viewport: Cell::new(Size::new(1024.0, 768.0)),
            time_ms: Cell::new(0.0),
        }
    }

    /// Add a detached `div` carrying `id`, resolvable as `#id`
    pub fn add_element(&self, id: &str) -> NodeId {
        let node = self.alloc("div");
        if let Some(n) = self.nodes.borrow_mut().get_mut(&node) {
            n.attributes.insert("id".to_string(), id.to_string());
        }
        node
    }

    /// Set the position a stylesheet would give an element
    pub fn set_sheet_position(&self, node: NodeId, position: &str) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(&node) {
            n.sheet_position = Some(position.to_string());
        }
    }

    /// Set the bounding rect reported for an element
    pub fn set_rect(&self, node: NodeId, rect: Rect) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(&node) {
            n.rect = rect;
        }
    }

    pub fn set_viewport(&self, width: f32, height: f32) {
        self.viewport.set(Size::new(width, height));
    }

    pub fn set_time(&self, ms: f64) {
        self.time_ms.set(ms);
    }

    pub fn advance_time(&self, ms: f64) {
        self.time_ms.set(self.time_ms.get() + ms);
    }

    /// Children of an element, in insertion order
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .borrow()
            .get(&node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow().get(&node).and_then(|n| n.parent)
    }

    pub fn tag(&self, node: NodeId) -> Option<String> {
        self.nodes.borrow().get(&node).map(|n| n.tag.clone())
    }

    /// Inline style value, if set and non-empty
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.nodes
            .borrow()
            .get(&node)
            .and_then(|n| n.style.get(property).cloned())
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes
            .borrow()
            .get(&node)
            .and_then(|n| n.attributes.get(name).cloned())
    }

    /// Number of live listeners on an element
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|r| r.target == Some(node))
            .count()
    }

    /// Number of live listeners on the document
    pub fn document_listener_count(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|r| r.target.is_none())
            .count()
    }

    /// Dispatch an event at `node`, bubbling through its ancestors to the document
    pub fn dispatch(&self, node: NodeId, kind: PointerEventKind, event: &MemoryEvent) {
        let mut path = vec![Some(node)];
        let mut current = self.parent(node);
        while let Some(ancestor) = current {
            path.push(Some(ancestor));
            current = self.parent(ancestor);
        }
        path.push(None);
        self.deliver(&path, kind, event);
    }

    /// Dispatch an event directly at the document
    pub fn dispatch_document(&self, kind: PointerEventKind, event: &MemoryEvent) {
        self.deliver(&[None], kind, event);
    }

    fn deliver(&self, path: &[Option<NodeId>], kind: PointerEventKind, event: &MemoryEvent) {
        for target in path {
            // Snapshot so callbacks can add or remove listeners.
            let callbacks: Vec<EventCallback<MemoryEvent>> = self
                .listeners
                .borrow()
                .iter()
                .filter(|r| r.kind == kind && r.target == *target)
                .map(|r| r.callback.clone())
                .collect();
            for callback in callbacks {
                callback(event);
            }
        }
    }

    fn alloc(&self, tag: &str) -> NodeId {
        let node = NodeId(self.next_node.get());
        self.next_node.set(node.0 + 1);
        self.nodes.borrow_mut().insert(
            node,
            MemoryNode {
                tag: tag.to_string(),
                ..Default::default()
            },
        );
        node
    }

    fn missing(node: NodeId) -> ResizeError {
        ResizeError::platform(format!("unknown node {:?}", node))
    }
}

impl Platform for MemoryPlatform {
    type Element = NodeId;
    type Event = MemoryEvent;
    type Listener = MemoryListener;

    fn input_mode(&self) -> InputMode {
        self.mode
    }

    fn query_element(&self, selector: &str) -> Option<NodeId> {
        let id = selector.strip_prefix('#')?;
        self.nodes
            .borrow()
            .iter()
            .find(|(_, n)| n.attributes.get("id").map(String::as_str) == Some(id))
            .map(|(node, _)| *node)
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, ResizeError> {
        Ok(self.alloc(tag))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), ResizeError> {
        let mut nodes = self.nodes.borrow_mut();
        if !nodes.contains_key(parent) {
            return Err(Self::missing(*parent));
        }
        let previous = {
            let node = nodes.get_mut(child).ok_or_else(|| Self::missing(*child))?;
            node.parent.replace(*parent)
        };
        if let Some(previous) = previous.and_then(|p| nodes.get_mut(&p)) {
            previous.children.retain(|c| c != child);
        }
        if let Some(parent) = nodes.get_mut(parent) {
            parent.children.push(*child);
        }
        Ok(())
    }

    fn remove_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), ResizeError> {
        let mut nodes = self.nodes.borrow_mut();
        let node = nodes.get_mut(child).ok_or_else(|| Self::missing(*child))?;
        if node.parent != Some(*parent) {
            return Err(ResizeError::platform(format!(
                "{:?} is not a child of {:?}",
                child, parent
            )));
        }
        node.parent = None;
        if let Some(parent) = nodes.get_mut(parent) {
            parent.children.retain(|c| c != child);
        }
        Ok(())
    }

    fn child_elements(&self, parent: &NodeId) -> Vec<NodeId> {
        self.children(*parent)
    }

    fn get_attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.attribute(*element, name)
    }

    fn computed_position(&self, element: &NodeId) -> Result<String, ResizeError> {
        let nodes = self.nodes.borrow();
        let node = nodes.get(element).ok_or_else(|| Self::missing(*element))?;
        Ok(node
            .style
            .get("position")
            .or(node.sheet_position.as_ref())
            .cloned()
            .unwrap_or_else(|| "static".to_string()))
    }

    fn set_style(&self, element: &NodeId, declarations: &[(&str, String)]) -> Result<(), ResizeError> {
        let mut nodes = self.nodes.borrow_mut();
        let node = nodes.get_mut(element).ok_or_else(|| Self::missing(*element))?;
        for (property, value) in declarations {
            if value.is_empty() {
                node.style.remove(*property);
            } else {
                node.style.insert(property.to_string(), value.clone());
            }
        }
        Ok(())
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) -> Result<(), ResizeError> {
        let mut nodes = self.nodes.borrow_mut();
        let node = nodes.get_mut(element).ok_or_else(|| Self::missing(*element))?;
        node.attributes.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn bounding_rect(&self, element: &NodeId) -> Rect {
        self.nodes
            .borrow()
            .get(element)
            .map(|n| n.rect)
            .unwrap_or(Rect::ZERO)
    }

    fn viewport_size(&self) -> Size {
        self.viewport.get()
    }

    fn now_ms(&self) -> f64 {
        self.time_ms.get()
    }

    fn pointer_sample(&self, event: &MemoryEvent) -> Option<PointerSample> {
        match self.mode {
            InputMode::Pointer => Some(PointerSample {
                position: event.client,
                primary: event.primary,
            }),
            InputMode::Touch => touch_point(
                event.touches.first().copied(),
                event.changed_touches.first().copied(),
            )
            .map(PointerSample::primary),
        }
    }

    fn listen(
        &self,
        target: ListenTarget<'_, NodeId>,
        kind: PointerEventKind,
        callback: EventCallback<MemoryEvent>,
    ) -> Result<MemoryListener, ResizeError> {
        let target = match target {
            ListenTarget::Element(node) => {
                if !self.nodes.borrow().contains_key(node) {
                    return Err(Self::missing(*node));
                }
                Some(*node)
            }
            ListenTarget::Document => None,
        };

        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push(Registration {
            id,
            target,
            kind,
            callback,
        });
        Ok(MemoryListener(id))
    }

    fn unlisten(&self, listener: MemoryListener) {
        self.listeners.borrow_mut().retain(|r| r.id != listener.0);
    }
}
