//! Pointer event handling: clicks and drag-to-reorder

use super::TabManager;
use crate::error::TabError;
use crate::event::{EventResponse, UiEvent};
use crate::renderer::{Cue, Renderer};
use crate::Result;

impl<R: Renderer> TabManager<R> {
    /// Feed one UI event from the renderer's event source into the group.
    pub fn handle_event(&mut self, event: UiEvent<R::Element>) -> EventResponse {
        if self.mount.is_none() {
            return EventResponse::Default;
        }

        match event {
            UiEvent::Click { target } => {
                if let Some(tab_id) = self.owning_tab_id(&target) {
                    self.switch_tab(&tab_id);
                }
                EventResponse::Default
            }
            UiEvent::CloseClick { target } => {
                // The owning tab never sees this click.
                if let Some(tab_id) = self.owning_tab_id(&target) {
                    self.remove_tab(&tab_id);
                }
                EventResponse::PreventDefault
            }
            UiEvent::DragStart { target } => self.on_drag_start(&target),
            UiEvent::DragOver { .. } => EventResponse::PreventDefault,
            UiEvent::DragEnter { target } => {
                self.on_drag_enter(&target);
                EventResponse::Default
            }
            UiEvent::DragLeave {
                target,
                related_target,
            } => {
                self.on_drag_leave(&target, related_target.as_ref());
                EventResponse::Default
            }
            UiEvent::Drop {
                target,
                current_target,
                client_x,
            } => {
                self.on_drop(&target, &current_target, client_x);
                EventResponse::PreventDefault
            }
            UiEvent::DragEnd { target } => {
                self.on_drag_end(&target);
                EventResponse::Default
            }
        }
    }

    /// Id of the stored tab that `target` is, or lies inside
    fn owning_tab_id(&self, target: &R::Element) -> Option<String> {
        let tab = self.renderer.closest_tab(target)?;
        self.renderer
            .element_id(&tab)
            .filter(|id| self.store.contains(id))
    }

    fn on_drag_start(&mut self, target: &R::Element) -> EventResponse {
        let Some(tab) = self.renderer.closest_tab(target) else {
            return EventResponse::Default;
        };
        let Some(tab_id) = self.owning_tab_id(&tab) else {
            return EventResponse::Default;
        };

        if !self.store.get(&tab_id).is_some_and(|r| r.draggable) {
            tracing::debug!(tab_id = %tab_id, "Tab is not draggable");
            return EventResponse::PreventDefault;
        }

        self.renderer.add_cue(&tab, Cue::Lifted);
        tracing::debug!(tab_id = %tab_id, "Drag started");
        self.drag.begin(tab_id);

        EventResponse::Default
    }

    fn on_drag_enter(&mut self, target: &R::Element) {
        if self.drag.in_flight().is_none() {
            return;
        }
        if let Some(tab) = self.renderer.closest_tab(target) {
            self.renderer.add_cue(&tab, Cue::DropTarget);
        }
    }

    fn on_drag_leave(&mut self, target: &R::Element, related_target: Option<&R::Element>) {
        let Some(tab) = self.renderer.closest_tab(target) else {
            return;
        };

        // Moving between a tab and its own children is not leaving it.
        if tab != *target {
            return;
        }
        if related_target.is_some_and(|related| self.renderer.contains(&tab, related)) {
            return;
        }

        self.renderer.remove_cue(&tab, Cue::DropTarget);
    }

    fn on_drop(&mut self, target: &R::Element, current_target: &R::Element, client_x: f64) {
        let drop_target = self
            .renderer
            .closest_tab(target)
            .unwrap_or_else(|| current_target.clone());

        let result = self.reorder_onto(&drop_target, client_x);
        self.renderer.remove_cue(&drop_target, Cue::DropTarget);

        let transition = match result {
            Ok(()) => self.drag.complete(),
            Err(err) => {
                tracing::warn!("{}", err);
                self.drag.cancel()
            }
        };
        if let Err(err) = transition {
            tracing::debug!(phase = %self.drag.phase(), "{}", err);
        }
    }

    /// Move the dragged tab next to `drop_target` in the rendered strip, then
    /// rebuild the store from what is rendered.
    fn reorder_onto(&mut self, drop_target: &R::Element, client_x: f64) -> Result<()> {
        let navbar = match self.mount.as_ref() {
            Some(mount) => mount.navbar.clone(),
            None => return Err(TabError::InvalidDrop("tab group is disabled".to_string())),
        };

        let tab_id = self
            .drag
            .in_flight()
            .map(str::to_string)
            .ok_or_else(|| TabError::InvalidDrop("no drag in progress".to_string()))?;
        let dragged = self.renderer.find(&tab_id).ok_or_else(|| {
            TabError::InvalidDrop(format!("dragged tab {} is no longer rendered", tab_id))
        })?;

        let target_id = self
            .owning_tab_id(drop_target)
            .ok_or_else(|| TabError::InvalidDrop("drop target is not a tab".to_string()))?;
        if dragged == *drop_target {
            return Err(TabError::InvalidDrop(format!(
                "tab {} dropped onto itself",
                tab_id
            )));
        }

        let bounds = self.renderer.bounding_box(drop_target);
        if client_x < bounds.center_x() {
            self.renderer.move_before(&dragged, drop_target);
        } else {
            self.renderer.move_after(&dragged, drop_target);
        }

        let rendered = self.renderer.tab_order(&navbar);
        self.store.rebuild_order(rendered);

        tracing::info!(
            tab_id = %tab_id,
            target = %target_id,
            position = ?self.store.position(&tab_id),
            "Reordered tab"
        );

        Ok(())
    }

    fn on_drag_end(&mut self, target: &R::Element) {
        let dragged = self
            .drag
            .payload()
            .and_then(|tab_id| self.renderer.find(tab_id))
            .or_else(|| self.renderer.closest_tab(target));

        if let Some(dragged) = dragged {
            self.renderer.remove_cue(&dragged, Cue::Lifted);
        }

        self.drag.finish();
    }
}
