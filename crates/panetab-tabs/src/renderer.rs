//! Rendering contract
//!
//! The manager never draws anything itself. It drives an implementation of
//! [`Renderer`] and reads the live tab order back from it after a drag.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Visual cues the manager toggles on elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// The selected tab
    Active,
    /// The tab being carried by a drag (reduced opacity)
    Lifted,
    /// The tab currently under the pointer during a drag
    DropTarget,
}

impl Cue {
    /// Conventional class name for DOM-style renderers
    pub fn class_name(&self) -> &'static str {
        match self {
            Cue::Active => "active",
            Cue::Lifted => "dragging",
            Cue::DropTarget => "drag-over",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// What the renderer needs to build one tab element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabElementSpec<'a> {
    /// Element id, used later with [`Renderer::find`]
    pub tab_id: &'a str,
    pub title: &'a str,
    pub show_close_button: bool,
    pub draggable: bool,
}

pub trait Renderer {
    /// Handle to a rendered element
    type Element: Clone + PartialEq + Debug;

    /// Resolve the host container a tab group attaches to.
    fn container(&mut self, container_id: &str) -> Option<Self::Element>;

    /// Create the strip that holds tab elements, inside `container`.
    fn create_navbar(&mut self, container: &Self::Element) -> Self::Element;

    /// Append a tab element at the right end of `navbar`.
    fn create_tab(&mut self, navbar: &Self::Element, spec: &TabElementSpec<'_>) -> Self::Element;

    /// Create an empty content panel with the given id inside `container`.
    fn create_content_panel(&mut self, container: &Self::Element, content_id: &str)
        -> Self::Element;

    fn show(&mut self, element: &Self::Element);

    fn hide(&mut self, element: &Self::Element);

    fn add_cue(&mut self, element: &Self::Element, cue: Cue);

    fn remove_cue(&mut self, element: &Self::Element, cue: Cue);

    /// Destroy an element and its descendants.
    fn remove(&mut self, element: &Self::Element);

    /// Look an element up by id.
    fn find(&self, element_id: &str) -> Option<Self::Element>;

    fn element_id(&self, element: &Self::Element) -> Option<String>;

    /// Nearest tab element at or above `target`, so a hit on a close button
    /// resolves to the tab that owns it.
    fn closest_tab(&self, target: &Self::Element) -> Option<Self::Element>;

    /// Whether `node` is `ancestor` or lies inside it.
    fn contains(&self, ancestor: &Self::Element, node: &Self::Element) -> bool;

    fn bounding_box(&self, element: &Self::Element) -> BoundingBox;

    /// Move `element` so it sits immediately left of `anchor`.
    fn move_before(&mut self, element: &Self::Element, anchor: &Self::Element);

    /// Move `element` so it sits immediately right of `anchor`.
    fn move_after(&mut self, element: &Self::Element, anchor: &Self::Element);

    /// Ids of the tab elements in `navbar`, left to right, as currently rendered.
    fn tab_order(&self, navbar: &Self::Element) -> Vec<String>;

    /// Blocking, user-visible notice.
    fn alert(&mut self, message: &str);
}
