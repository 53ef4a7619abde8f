//! Tab Manager
//!
//! Owns one tab group: the association store, the active tab id and the
//! capacity limit, and keeps a [`Renderer`] in step with them.
//!
//! None of the operations return errors. Failures are logged, capacity is
//! also alerted through the renderer, and the state is left unchanged.

mod dispatch;

use crate::drag::{DragPhase, DragSession};
use crate::error::TabError;
use crate::renderer::{Cue, Renderer, TabElementSpec};
use crate::store::AssociationStore;
use crate::tab::{content_id_for, NewTab, TabInfo, TabRecord};
use crate::Result;

/// Construction parameters for a tab group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabOptions {
    /// Id of the host element the group attaches to
    pub container_id: String,
    /// `None` means unbounded
    pub max_tabs: Option<usize>,
    /// Default for tabs that don't say otherwise
    pub allow_drag_and_drop: bool,
}

impl TabOptions {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            max_tabs: None,
            allow_drag_and_drop: true,
        }
    }

    pub fn with_max_tabs(mut self, max_tabs: usize) -> Self {
        self.max_tabs = Some(max_tabs);
        self
    }

    pub fn with_drag_and_drop(mut self, allow: bool) -> Self {
        self.allow_drag_and_drop = allow;
        self
    }
}

/// What [`TabManager::add_tab`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new tab was rendered and stored
    Created(String),
    /// The title mapped onto an open tab, which was focused instead
    Focused(String),
    /// Capacity reached; nothing changed
    Rejected,
    /// The group has no container to render into
    Disabled,
}

/// Handles to the elements a mounted group renders into
#[derive(Debug, Clone)]
struct Mount<E> {
    container: E,
    navbar: E,
}

pub struct TabManager<R: Renderer> {
    renderer: R,
    container_id: String,
    /// `None` when the container could not be resolved
    mount: Option<Mount<R::Element>>,
    store: AssociationStore,
    /// Empty when no tab is active
    active_tab_id: String,
    max_tabs: Option<usize>,
    allow_drag_and_drop: bool,
    drag: DragSession,
}

impl<R: Renderer> TabManager<R> {
    /// Attach a tab group to `options.container_id`.
    ///
    /// A container the renderer cannot resolve is logged and yields a
    /// disabled manager on which every operation is a no-op.
    pub fn new(mut renderer: R, options: TabOptions) -> Self {
        let mount = match renderer.container(&options.container_id) {
            Some(container) => {
                let navbar = renderer.create_navbar(&container);
                Some(Mount { container, navbar })
            }
            None => {
                let err = TabError::ContainerNotFound(options.container_id.clone());
                tracing::error!(container_id = %options.container_id, "{}", err);
                None
            }
        };

        Self {
            renderer,
            container_id: options.container_id,
            mount,
            store: AssociationStore::new(),
            active_tab_id: String::new(),
            max_tabs: options.max_tabs,
            allow_drag_and_drop: options.allow_drag_and_drop,
            drag: DragSession::default(),
        }
    }

    /// Open a tab, or focus the open tab its title maps onto.
    pub fn add_tab(&mut self, tab: NewTab) -> AddOutcome {
        self.open_tab(tab, None::<fn(&mut Self, &str)>)
    }

    /// Like [`add_tab`](Self::add_tab), calling `content` with the new
    /// content panel's id before the tab is activated.
    ///
    /// `content` gets the manager itself so it can reach the renderer, and may
    /// call back into any operation. It is not called when an existing tab is
    /// focused instead.
    pub fn add_tab_with<F>(&mut self, tab: NewTab, content: F) -> AddOutcome
    where
        F: FnOnce(&mut Self, &str),
    {
        self.open_tab(tab, Some(content))
    }

    fn open_tab<F>(&mut self, tab: NewTab, content: Option<F>) -> AddOutcome
    where
        F: FnOnce(&mut Self, &str),
    {
        let Some(Mount { container, navbar }) = self.mount.clone() else {
            tracing::debug!(title = %tab.title, "Tab group disabled, ignoring add");
            return AddOutcome::Disabled;
        };

        if let Err(err) = self.check_capacity() {
            tracing::warn!(title = %tab.title, "{}", err);
            self.renderer.alert(&err.to_string());
            return AddOutcome::Rejected;
        }

        let tab_id = tab.tab_id();
        if self.store.contains(&tab_id) {
            tracing::debug!(tab_id = %tab_id, "Tab already open, focusing it");
            self.switch_tab(&tab_id);
            return AddOutcome::Focused(tab_id);
        }

        let content_id = content_id_for(&tab.title);
        let draggable = tab.allow_drag_and_drop.unwrap_or(self.allow_drag_and_drop);

        self.renderer.create_tab(
            &navbar,
            &TabElementSpec {
                tab_id: &tab_id,
                title: &tab.title,
                show_close_button: tab.show_close_button,
                draggable,
            },
        );
        let panel = self.renderer.create_content_panel(&container, &content_id);
        self.renderer.hide(&panel);

        self.store.insert(
            tab_id.clone(),
            TabRecord::new(
                content_id.clone(),
                tab.title,
                tab.show_close_button,
                draggable,
            ),
        );

        tracing::info!(tab_id = %tab_id, content_id = %content_id, "Created new tab");

        if let Some(content) = content {
            content(self, &content_id);
        }

        // The content callback may already have closed it again.
        if self.store.contains(&tab_id) {
            self.switch_tab(&tab_id);
        }

        AddOutcome::Created(tab_id)
    }

    fn check_capacity(&self) -> Result<()> {
        match self.max_tabs {
            Some(max) if self.store.len() >= max => Err(TabError::CapacityExceeded { max }),
            _ => Ok(()),
        }
    }

    /// Close a tab and its content panel.
    ///
    /// If it was the active tab, focus moves to the tab that followed it, or
    /// to the one before it when it was the last.
    pub fn remove_tab(&mut self, tab_id: &str) {
        if self.mount.is_none() {
            return;
        }

        let Some(content_id) = self.store.content_id(tab_id).map(str::to_string) else {
            tracing::warn!("{}", TabError::NotFound(tab_id.to_string()));
            return;
        };

        for element_id in [tab_id, content_id.as_str()] {
            if let Some(element) = self.renderer.find(element_id) {
                self.renderer.remove(&element);
            }
        }

        let ordered = self.store.keys_in_order().to_vec();
        if let Err(err) = self.store.remove(tab_id) {
            tracing::warn!("{}", err);
            return;
        }

        tracing::info!(tab_id = %tab_id, "Closed tab");

        if self.store.contains(&self.active_tab_id) {
            return;
        }

        self.active_tab_id.clear();
        if self.store.is_empty() {
            return;
        }

        let index = ordered.iter().position(|id| id == tab_id).unwrap_or(0);
        let remaining = self.store.keys_in_order();
        let replacement = remaining
            .get(index)
            .or_else(|| remaining.get(index.saturating_sub(1)))
            .cloned();

        if let Some(next_id) = replacement {
            self.switch_tab(&next_id);
        }
    }

    pub fn remove_all_tabs(&mut self) {
        let ids = self.store.keys_in_order().to_vec();
        for tab_id in ids {
            self.remove_tab(&tab_id);
        }
    }

    /// Make `tab_id` the visible tab.
    ///
    /// Unknown ids are rejected with a warning and leave focus where it was.
    pub fn switch_tab(&mut self, tab_id: &str) {
        if self.mount.is_none() || self.active_tab_id == tab_id {
            return;
        }

        if !self.store.contains(tab_id) {
            tracing::warn!("{}", TabError::NotFound(tab_id.to_string()));
            return;
        }

        if !self.active_tab_id.is_empty() {
            let current = std::mem::take(&mut self.active_tab_id);
            self.set_visuals(&current, false);
        }

        self.set_visuals(tab_id, true);
        self.active_tab_id = tab_id.to_string();

        tracing::debug!(tab_id = %tab_id, "Switched tab");
    }

    fn set_visuals(&mut self, tab_id: &str, active: bool) {
        let tab = self.renderer.find(tab_id);
        let panel = self
            .store
            .content_id(tab_id)
            .and_then(|content_id| self.renderer.find(content_id));

        if let Some(tab) = tab {
            if active {
                self.renderer.add_cue(&tab, Cue::Active);
            } else {
                self.renderer.remove_cue(&tab, Cue::Active);
            }
        }

        if let Some(panel) = panel {
            if active {
                self.renderer.show(&panel);
            } else {
                self.renderer.hide(&panel);
            }
        }
    }

    pub fn next_tab(&mut self) {
        self.step(1);
    }

    pub fn previous_tab(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, offset: isize) {
        let direction = if offset > 0 { "next" } else { "previous" };

        let Some(position) = self.store.position(&self.active_tab_id) else {
            tracing::info!("No active tab to move from");
            return;
        };

        let neighbor = position
            .checked_add_signed(offset)
            .and_then(|i| self.store.keys_in_order().get(i))
            .cloned();

        match neighbor {
            Some(tab_id) => self.switch_tab(&tab_id),
            None => tracing::info!(tab_id = %self.active_tab_id, "No {} tab", direction),
        }
    }

    /// Active tab id, or `""` when there is none
    pub fn active_tab(&self) -> &str {
        &self.active_tab_id
    }

    /// Tab ids in display order
    pub fn all_tabs(&self) -> Vec<String> {
        self.store.keys_in_order().to_vec()
    }

    pub fn tab_count(&self) -> usize {
        self.store.len()
    }

    /// Change the limit for future adds. Tabs already open are never evicted.
    pub fn set_max_tabs(&mut self, max_tabs: Option<usize>) {
        if let Some(max) = max_tabs {
            if max < self.store.len() {
                tracing::debug!(
                    max_tabs = max,
                    tab_count = self.store.len(),
                    "Capacity below open tab count, keeping existing tabs"
                );
            }
        }
        self.max_tabs = max_tabs;
    }

    pub fn max_tabs(&self) -> Option<usize> {
        self.max_tabs
    }

    pub fn allow_drag_and_drop(&self) -> bool {
        self.allow_drag_and_drop
    }

    /// Whether the group found its container
    pub fn is_enabled(&self) -> bool {
        self.mount.is_some()
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn content_id(&self, tab_id: &str) -> Option<&str> {
        self.store.content_id(tab_id)
    }

    pub fn tab_info(&self, tab_id: &str) -> Option<TabInfo> {
        let position = self.store.position(tab_id)?;
        self.store
            .get(tab_id)
            .map(|record| self.info(tab_id, position, record))
    }

    /// Snapshots of every tab, in display order
    pub fn tabs(&self) -> Vec<TabInfo> {
        self.store
            .iter()
            .enumerate()
            .map(|(position, (tab_id, record))| self.info(tab_id, position, record))
            .collect()
    }

    fn info(&self, tab_id: &str, position: usize, record: &TabRecord) -> TabInfo {
        TabInfo {
            id: tab_id.to_string(),
            content_id: record.content_id.clone(),
            title: record.title.clone(),
            position,
            is_active: self.active_tab_id == tab_id,
            closable: record.closable,
            draggable: record.draggable,
            opened_at: record.opened_at,
        }
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{ElementKind, HeadlessRenderer};

    fn manager() -> TabManager<HeadlessRenderer> {
        TabManager::new(
            HeadlessRenderer::new().with_container("tabs"),
            TabOptions::new("tabs"),
        )
    }

    fn manager_with(titles: &[&str]) -> TabManager<HeadlessRenderer> {
        let mut manager = manager();
        for title in titles {
            manager.add_tab(NewTab::new(*title));
        }
        manager
    }

    #[test]
    fn test_add_tab_activates_it() {
        let mut manager = manager();

        let outcome = manager.add_tab(NewTab::new("Inbox"));
        assert_eq!(outcome, AddOutcome::Created("tab-inbox".to_string()));
        assert_eq!(manager.active_tab(), "tab-inbox");
        assert_eq!(manager.content_id("tab-inbox"), Some("tab-content-inbox"));

        let renderer = manager.renderer();
        assert!(renderer.is_visible("tab-content-inbox"));
        assert!(renderer.has_cue("tab-inbox", Cue::Active));
    }

    #[test]
    fn test_new_tab_hides_previous() {
        let manager = manager_with(&["A", "B"]);
        let renderer = manager.renderer();

        assert_eq!(manager.active_tab(), "tab-b");
        assert!(!renderer.is_visible("tab-content-a"));
        assert!(!renderer.has_cue("tab-a", Cue::Active));
        assert!(renderer.is_visible("tab-content-b"));
    }

    #[test]
    fn test_dedup_by_sanitization() {
        let mut manager = manager_with(&["Tab 1", "Other"]);
        assert_eq!(manager.active_tab(), "tab-other");

        let outcome = manager.add_tab(NewTab::new("tab 1!!"));

        assert_eq!(outcome, AddOutcome::Focused("tab-tab1".to_string()));
        assert_eq!(manager.tab_count(), 2);
        assert_eq!(manager.active_tab(), "tab-tab1");
        assert_eq!(manager.renderer().count(ElementKind::Panel), 2);
    }

    #[test]
    fn test_capacity_enforced() {
        let mut manager = TabManager::new(
            HeadlessRenderer::new().with_container("tabs"),
            TabOptions::new("tabs").with_max_tabs(2),
        );
        manager.add_tab(NewTab::new("A"));
        manager.add_tab(NewTab::new("B"));

        let outcome = manager.add_tab(NewTab::new("C"));

        assert_eq!(outcome, AddOutcome::Rejected);
        assert_eq!(manager.tab_count(), 2);
        assert_eq!(manager.active_tab(), "tab-b");
        assert_eq!(manager.renderer().alerts().len(), 1);
        assert!(manager.renderer().find("tab-c").is_none());
    }

    #[test]
    fn test_capacity_checked_before_dedup() {
        let mut manager = TabManager::new(
            HeadlessRenderer::new().with_container("tabs"),
            TabOptions::new("tabs").with_max_tabs(1),
        );
        manager.add_tab(NewTab::new("A"));

        assert_eq!(manager.add_tab(NewTab::new("a")), AddOutcome::Rejected);
    }

    #[test]
    fn test_set_max_tabs_never_evicts() {
        let mut manager = manager_with(&["A", "B", "C"]);
        manager.set_max_tabs(Some(1));

        assert_eq!(manager.tab_count(), 3);
        assert_eq!(manager.add_tab(NewTab::new("D")), AddOutcome::Rejected);

        manager.set_max_tabs(None);
        assert!(matches!(manager.add_tab(NewTab::new("D")), AddOutcome::Created(_)));
        assert_eq!(manager.tab_count(), 4);
    }

    #[test]
    fn test_remove_last_active_falls_back_to_previous() {
        let mut manager = manager_with(&["A", "B", "C"]);
        assert_eq!(manager.active_tab(), "tab-c");

        manager.remove_tab("tab-c");

        assert_eq!(manager.active_tab(), "tab-b");
        assert!(manager.renderer().is_visible("tab-content-b"));
    }

    #[test]
    fn test_remove_active_prefers_next() {
        let mut manager = manager_with(&["A", "B", "C"]);
        manager.switch_tab("tab-a");

        manager.remove_tab("tab-a");

        assert_eq!(manager.active_tab(), "tab-b");
        assert_eq!(manager.all_tabs(), vec!["tab-b", "tab-c"]);
    }

    #[test]
    fn test_remove_middle_active_prefers_next() {
        let mut manager = manager_with(&["A", "B", "C"]);
        manager.switch_tab("tab-b");

        manager.remove_tab("tab-b");

        assert_eq!(manager.active_tab(), "tab-c");
    }

    #[test]
    fn test_remove_inactive_keeps_focus() {
        let mut manager = manager_with(&["A", "B", "C"]);
        manager.switch_tab("tab-b");

        manager.remove_tab("tab-a");

        assert_eq!(manager.active_tab(), "tab-b");
        assert_eq!(manager.all_tabs(), vec!["tab-b", "tab-c"]);
    }

    #[test]
    fn test_remove_destroys_elements() {
        let mut manager = manager_with(&["A", "B"]);

        manager.remove_tab("tab-a");

        let renderer = manager.renderer();
        assert!(renderer.find("tab-a").is_none());
        assert!(renderer.find("tab-content-a").is_none());
        assert_eq!(renderer.count(ElementKind::Tab), 1);
        assert_eq!(renderer.count(ElementKind::Panel), 1);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut manager = manager_with(&["A"]);
        manager.remove_tab("tab-missing");
        assert_eq!(manager.tab_count(), 1);
        assert_eq!(manager.active_tab(), "tab-a");
    }

    #[test]
    fn test_remove_only_tab_clears_active() {
        let mut manager = manager_with(&["A"]);
        manager.remove_tab("tab-a");
        assert_eq!(manager.active_tab(), "");
        assert_eq!(manager.tab_count(), 0);
    }

    #[test]
    fn test_remove_all_tabs() {
        let mut manager = manager_with(&["A", "B", "C"]);
        manager.switch_tab("tab-b");

        manager.remove_all_tabs();

        assert_eq!(manager.tab_count(), 0);
        assert_eq!(manager.active_tab(), "");
        assert_eq!(manager.renderer().count(ElementKind::Tab), 0);
        assert_eq!(manager.renderer().count(ElementKind::Panel), 0);
    }

    #[test]
    fn test_remove_all_on_empty() {
        let mut manager = manager();
        manager.remove_all_tabs();
        assert_eq!(manager.tab_count(), 0);
        assert_eq!(manager.active_tab(), "");
    }

    #[test]
    fn test_switch_unknown_tab_is_rejected() {
        let mut manager = manager_with(&["A", "B"]);
        manager.switch_tab("tab-nope");
        assert_eq!(manager.active_tab(), "tab-b");
        assert!(manager.renderer().is_visible("tab-content-b"));
    }

    #[test]
    fn test_switch_to_active_is_noop() {
        let mut manager = manager_with(&["A"]);
        manager.switch_tab("tab-a");
        assert_eq!(manager.active_tab(), "tab-a");
        assert!(manager.renderer().is_visible("tab-content-a"));
    }

    #[test]
    fn test_navigation() {
        let mut manager = manager_with(&["A", "B", "C"]);
        manager.switch_tab("tab-a");

        manager.next_tab();
        assert_eq!(manager.active_tab(), "tab-b");
        manager.next_tab();
        assert_eq!(manager.active_tab(), "tab-c");
        manager.previous_tab();
        assert_eq!(manager.active_tab(), "tab-b");
    }

    #[test]
    fn test_navigation_boundaries() {
        let mut manager = manager_with(&["A", "B", "C"]);

        manager.next_tab();
        assert_eq!(manager.active_tab(), "tab-c");

        manager.switch_tab("tab-a");
        manager.previous_tab();
        assert_eq!(manager.active_tab(), "tab-a");
    }

    #[test]
    fn test_navigation_without_tabs() {
        let mut manager = manager();
        manager.next_tab();
        manager.previous_tab();
        assert_eq!(manager.active_tab(), "");
    }

    #[test]
    fn test_content_callback_receives_content_id() {
        let mut manager = manager();
        let mut seen = None;

        manager.add_tab_with(NewTab::new("Logs"), |manager, content_id| {
            let renderer = manager.renderer_mut();
            let panel = renderer.find(content_id).unwrap();
            renderer.append_child(&panel, None, "hello");
            seen = Some(content_id.to_string());
        });

        assert_eq!(seen.as_deref(), Some("tab-content-logs"));
        let panel = manager.renderer().find("tab-content-logs").unwrap();
        assert_eq!(manager.renderer().children(&panel).len(), 1);
        assert_eq!(manager.active_tab(), "tab-logs");
    }

    #[test]
    fn test_content_callback_not_called_for_existing_tab() {
        let mut manager = manager_with(&["Logs"]);
        let mut called = false;

        manager.add_tab_with(NewTab::new("LOGS"), |_, _| called = true);

        assert!(!called);
    }

    #[test]
    fn test_content_callback_may_reenter() {
        let mut manager = manager_with(&["A"]);

        manager.add_tab_with(NewTab::new("B"), |manager, _| {
            manager.add_tab(NewTab::new("C"));
        });

        assert_eq!(manager.all_tabs(), vec!["tab-a", "tab-b", "tab-c"]);
        assert_eq!(manager.active_tab(), "tab-b");
        assert!(!manager.renderer().is_visible("tab-content-c"));
    }

    #[test]
    fn test_content_callback_may_close_new_tab() {
        let mut manager = manager_with(&["A"]);

        let outcome = manager.add_tab_with(NewTab::new("B"), |manager, _| {
            manager.remove_tab("tab-b");
        });

        assert_eq!(outcome, AddOutcome::Created("tab-b".to_string()));
        assert_eq!(manager.all_tabs(), vec!["tab-a"]);
        assert_eq!(manager.active_tab(), "tab-a");
    }

    #[test]
    fn test_drag_default_inherited() {
        let mut manager = TabManager::new(
            HeadlessRenderer::new().with_container("tabs"),
            TabOptions::new("tabs").with_drag_and_drop(false),
        );
        manager.add_tab(NewTab::new("A"));
        manager.add_tab(NewTab::new("B").draggable(true));

        assert!(!manager.allow_drag_and_drop());
        assert!(!manager.renderer().is_draggable("tab-a"));
        assert!(manager.renderer().is_draggable("tab-b"));
        assert!(!manager.tab_info("tab-a").unwrap().draggable);
    }

    #[test]
    fn test_close_button_optional() {
        let mut manager = manager();
        manager.add_tab(NewTab::new("Pinned").without_close_button());
        manager.add_tab(NewTab::new("Loose"));

        assert!(manager.renderer().close_button("tab-pinned").is_none());
        assert!(manager.renderer().close_button("tab-loose").is_some());
    }

    #[test]
    fn test_missing_container_disables_group() {
        let mut manager = TabManager::new(
            HeadlessRenderer::new().with_container("tabs"),
            TabOptions::new("elsewhere"),
        );

        assert!(!manager.is_enabled());
        assert_eq!(manager.container_id(), "elsewhere");
        assert_eq!(manager.add_tab(NewTab::new("A")), AddOutcome::Disabled);
        manager.switch_tab("tab-a");
        manager.next_tab();
        manager.remove_all_tabs();

        assert_eq!(manager.tab_count(), 0);
        assert_eq!(manager.active_tab(), "");
        assert_eq!(manager.renderer().count(ElementKind::Navbar), 0);
    }

    #[test]
    fn test_tab_info_snapshot() {
        let manager = manager_with(&["First Tab", "Second"]);
        let tabs = manager.tabs();

        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[0].id, "tab-firsttab");
        assert_eq!(tabs[0].title, "First Tab");
        assert_eq!(tabs[0].position, 0);
        assert!(!tabs[0].is_active);
        assert!(tabs[1].is_active);
        assert_eq!(manager.tab_info("tab-second"), Some(tabs[1].clone()));
        assert!(manager.tab_info("tab-third").is_none());
    }

    #[test]
    fn test_open_close_cycles_keep_renderer_bounded() {
        let mut manager = manager_with(&["Keep"]);
        manager.add_tab(NewTab::new("A"));
        manager.remove_tab("tab-a");
        let settled = manager.renderer().slot_count();

        for _ in 0..1000 {
            manager.add_tab(NewTab::new("A"));
            manager.remove_tab("tab-a");
        }

        assert_eq!(manager.renderer().slot_count(), settled);
        assert_eq!(manager.all_tabs(), vec!["tab-keep"]);
        assert_eq!(manager.renderer().count(ElementKind::Panel), 1);
    }
}
