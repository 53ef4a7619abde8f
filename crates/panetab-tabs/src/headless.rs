//! Headless renderer
//!
//! An in-memory element tree that satisfies [`Renderer`]: ids, cues,
//! visibility and a fixed-width left-to-right tab layout. Hosts without a
//! drawing surface can drive a [`TabManager`](crate::TabManager) with it, and
//! the tests replay synthetic pointer events against it.
//!
//! Elements live in a slot arena. Removing an element frees its slots for
//! reuse and bumps their generation, so a stale [`ElementRef`] never resolves
//! to whatever takes the slot next.

use std::collections::{HashMap, HashSet};

use crate::renderer::{BoundingBox, Cue, Renderer, TabElementSpec};

pub const DEFAULT_TAB_WIDTH: f64 = 120.0;
const TAB_HEIGHT: f64 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementRef {
    index: usize,
    generation: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Container,
    Navbar,
    Tab,
    CloseButton,
    Panel,
    Node,
}

#[derive(Debug, Clone)]
struct Element {
    id: Option<String>,
    kind: ElementKind,
    parent: Option<ElementRef>,
    children: Vec<ElementRef>,
    cues: HashSet<Cue>,
    visible: bool,
    draggable: bool,
    text: String,
}

impl Element {
    fn new(id: Option<&str>, kind: ElementKind, parent: Option<ElementRef>) -> Self {
        Self {
            id: id.map(str::to_string),
            kind,
            parent,
            children: Vec::new(),
            cues: HashSet::new(),
            visible: true,
            draggable: false,
            text: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

#[derive(Debug, Clone)]
pub struct HeadlessRenderer {
    slots: Vec<Slot>,
    /// Indices of empty slots, reused before the arena grows
    free: Vec<usize>,
    /// Live elements by id; the first element created with an id owns it
    ids: HashMap<String, ElementRef>,
    alerts: Vec<String>,
    tab_width: f64,
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            ids: HashMap::new(),
            alerts: Vec::new(),
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }

    pub fn with_container(mut self, container_id: &str) -> Self {
        self.add_container(container_id);
        self
    }

    pub fn with_tab_width(mut self, width: f64) -> Self {
        self.tab_width = width;
        self
    }

    pub fn tab_width(&self) -> f64 {
        self.tab_width
    }

    pub fn add_container(&mut self, container_id: &str) -> ElementRef {
        self.push(Element::new(Some(container_id), ElementKind::Container, None))
    }

    /// Append a plain node under `parent`, e.g. content a host puts in a panel.
    pub fn append_child(&mut self, parent: &ElementRef, id: Option<&str>, text: &str) -> ElementRef {
        let mut element = Element::new(id, ElementKind::Node, Some(*parent));
        element.text = text.to_string();
        self.push(element)
    }

    fn push(&mut self, mut element: Element) -> ElementRef {
        element.parent = element.parent.filter(|p| self.node(p).is_some());

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                self.slots.len() - 1
            }
        };
        let element_ref = ElementRef {
            index,
            generation: self.slots[index].generation,
        };

        if let Some(id) = &element.id {
            self.ids.entry(id.clone()).or_insert(element_ref);
        }
        if let Some(parent) = element.parent {
            if let Some(parent) = self.node_mut(&parent) {
                parent.children.push(element_ref);
            }
        }

        self.slots[index].element = Some(element);
        element_ref
    }

    /// Empty the slot behind `element` and hand back what was in it.
    fn release(&mut self, element: &ElementRef) -> Option<Element> {
        let slot = self
            .slots
            .get_mut(element.index)
            .filter(|s| s.generation == element.generation)?;
        let node = slot.element.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(element.index);

        if let Some(id) = &node.id {
            if self.ids.get(id) == Some(element) {
                self.ids.remove(id);
            }
        }
        Some(node)
    }

    fn node(&self, element: &ElementRef) -> Option<&Element> {
        self.slots
            .get(element.index)
            .filter(|s| s.generation == element.generation)
            .and_then(|s| s.element.as_ref())
    }

    fn node_mut(&mut self, element: &ElementRef) -> Option<&mut Element> {
        self.slots
            .get_mut(element.index)
            .filter(|s| s.generation == element.generation)
            .and_then(|s| s.element.as_mut())
    }

    fn detach(&mut self, element: &ElementRef) -> Option<ElementRef> {
        let parent = self.node(element)?.parent?;
        if let Some(node) = self.node_mut(&parent) {
            node.children.retain(|c| c != element);
        }
        Some(parent)
    }

    fn insert_next_to(&mut self, element: &ElementRef, anchor: &ElementRef, after: bool) {
        if element == anchor || self.node(element).is_none() {
            return;
        }
        let Some(parent) = self.node(anchor).and_then(|a| a.parent) else {
            return;
        };

        self.detach(element);
        if let Some(node) = self.node_mut(&parent) {
            let siblings = &mut node.children;
            let index = siblings
                .iter()
                .position(|c| c == anchor)
                .map(|i| if after { i + 1 } else { i })
                .unwrap_or(siblings.len());
            siblings.insert(index, *element);
        }
        if let Some(node) = self.node_mut(element) {
            node.parent = Some(parent);
        }
    }

    pub fn kind(&self, element: &ElementRef) -> Option<ElementKind> {
        self.node(element).map(|e| e.kind)
    }

    pub fn text(&self, element: &ElementRef) -> Option<&str> {
        self.node(element).map(|e| e.text.as_str())
    }

    pub fn children(&self, element: &ElementRef) -> Vec<ElementRef> {
        self.node(element)
            .map(|e| e.children.clone())
            .unwrap_or_default()
    }

    pub fn close_button(&self, tab_id: &str) -> Option<ElementRef> {
        let tab = self.find(tab_id)?;
        self.node(&tab)?
            .children
            .iter()
            .copied()
            .find(|c| self.kind(c) == Some(ElementKind::CloseButton))
    }

    pub fn is_visible(&self, element_id: &str) -> bool {
        self.find(element_id)
            .and_then(|e| self.node(&e).map(|n| n.visible))
            .unwrap_or(false)
    }

    pub fn has_cue(&self, element_id: &str, cue: Cue) -> bool {
        self.find(element_id)
            .and_then(|e| self.node(&e).map(|n| n.cues.contains(&cue)))
            .unwrap_or(false)
    }

    pub fn is_draggable(&self, element_id: &str) -> bool {
        self.find(element_id)
            .and_then(|e| self.node(&e).map(|n| n.draggable))
            .unwrap_or(false)
    }

    /// Number of live elements of a kind
    pub fn count(&self, kind: ElementKind) -> usize {
        self.slots
            .iter()
            .filter_map(|s| s.element.as_ref())
            .filter(|e| e.kind == kind)
            .count()
    }

    /// Slots the arena holds, live or free
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Notices raised through [`Renderer::alert`], oldest first
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}

impl Renderer for HeadlessRenderer {
    type Element = ElementRef;

    fn container(&mut self, container_id: &str) -> Option<ElementRef> {
        self.find(container_id)
            .filter(|c| self.kind(c) == Some(ElementKind::Container))
    }

    fn create_navbar(&mut self, container: &ElementRef) -> ElementRef {
        self.push(Element::new(None, ElementKind::Navbar, Some(*container)))
    }

    fn create_tab(&mut self, navbar: &ElementRef, spec: &TabElementSpec<'_>) -> ElementRef {
        let mut element = Element::new(Some(spec.tab_id), ElementKind::Tab, Some(*navbar));
        element.text = spec.title.to_string();
        element.draggable = spec.draggable;
        let tab = self.push(element);

        if spec.show_close_button {
            let mut close = Element::new(None, ElementKind::CloseButton, Some(tab));
            close.text = "×".to_string();
            self.push(close);
        }

        tab
    }

    fn create_content_panel(&mut self, container: &ElementRef, content_id: &str) -> ElementRef {
        let mut element = Element::new(Some(content_id), ElementKind::Panel, Some(*container));
        element.visible = false;
        self.push(element)
    }

    fn show(&mut self, element: &ElementRef) {
        if let Some(e) = self.node_mut(element) {
            e.visible = true;
        }
    }

    fn hide(&mut self, element: &ElementRef) {
        if let Some(e) = self.node_mut(element) {
            e.visible = false;
        }
    }

    fn add_cue(&mut self, element: &ElementRef, cue: Cue) {
        if let Some(e) = self.node_mut(element) {
            e.cues.insert(cue);
        }
    }

    fn remove_cue(&mut self, element: &ElementRef, cue: Cue) {
        if let Some(e) = self.node_mut(element) {
            e.cues.remove(&cue);
        }
    }

    fn remove(&mut self, element: &ElementRef) {
        if self.node(element).is_none() {
            return;
        }
        self.detach(element);

        let mut pending = vec![*element];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.release(&current) {
                pending.extend(node.children);
            }
        }
    }

    fn find(&self, element_id: &str) -> Option<ElementRef> {
        self.ids
            .get(element_id)
            .copied()
            .filter(|e| self.node(e).is_some())
    }

    fn element_id(&self, element: &ElementRef) -> Option<String> {
        self.node(element).and_then(|e| e.id.clone())
    }

    fn closest_tab(&self, target: &ElementRef) -> Option<ElementRef> {
        let mut current = Some(*target);
        while let Some(element) = current {
            let node = self.node(&element)?;
            if node.kind == ElementKind::Tab {
                return Some(element);
            }
            current = node.parent;
        }
        None
    }

    fn contains(&self, ancestor: &ElementRef, node: &ElementRef) -> bool {
        let mut current = Some(*node);
        while let Some(element) = current {
            if element == *ancestor {
                return true;
            }
            current = self.node(&element).and_then(|n| n.parent);
        }
        false
    }

    fn bounding_box(&self, element: &ElementRef) -> BoundingBox {
        // Anything inside a tab shares the tab's box.
        let Some(tab) = self.closest_tab(element) else {
            return BoundingBox::default();
        };
        let Some(navbar) = self.node(&tab).and_then(|t| t.parent) else {
            return BoundingBox::default();
        };

        let index = self
            .node(&navbar)
            .and_then(|n| {
                n.children
                    .iter()
                    .filter(|c| self.kind(c) == Some(ElementKind::Tab))
                    .position(|c| *c == tab)
            })
            .unwrap_or(0);

        BoundingBox {
            x: index as f64 * self.tab_width,
            y: 0.0,
            width: self.tab_width,
            height: TAB_HEIGHT,
        }
    }

    fn move_before(&mut self, element: &ElementRef, anchor: &ElementRef) {
        self.insert_next_to(element, anchor, false);
    }

    fn move_after(&mut self, element: &ElementRef, anchor: &ElementRef) {
        self.insert_next_to(element, anchor, true);
    }

    fn tab_order(&self, navbar: &ElementRef) -> Vec<String> {
        self.children(navbar)
            .iter()
            .filter(|c| self.kind(c) == Some(ElementKind::Tab))
            .filter_map(|c| self.element_id(c))
            .collect()
    }

    fn alert(&mut self, message: &str) {
        tracing::debug!(message = %message, "Alert raised");
        self.alerts.push(message.to_string());
    }
}
