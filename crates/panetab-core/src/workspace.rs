//! Tab group registry
//!
//! One process can host several independent tab groups, each keyed by the
//! container it renders into. `Workspace` is a cheap, cloneable handle so
//! every event handler the host wires up can hold its own copy.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use panetab_tabs::{Renderer, TabError, TabInfo, TabManager};

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

/// Serializable view of one group for host UIs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub container_id: String,
    pub active_tab: String,
    pub max_tabs: Option<usize>,
    pub allow_drag_and_drop: bool,
    pub tabs: Vec<TabInfo>,
}

pub struct Workspace<R: Renderer> {
    groups: Arc<RwLock<HashMap<String, TabManager<R>>>>,
}

impl<R: Renderer> Workspace<R> {
    pub fn new() -> Self {
        Self {
            groups: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Mount a tab group on `config.container_id` using `renderer`.
    pub fn open_group(&self, renderer: R, config: &Config) -> Result<()> {
        config.validate()?;

        let mut groups = self.groups.write();
        if groups.contains_key(&config.container_id) {
            return Err(CoreError::DuplicateGroup(config.container_id.clone()));
        }

        let manager = TabManager::new(renderer, config.tab_options());
        if !manager.is_enabled() {
            return Err(TabError::ContainerNotFound(config.container_id.clone()).into());
        }

        groups.insert(config.container_id.clone(), manager);

        tracing::info!(
            container_id = %config.container_id,
            max_tabs = ?config.max_tabs,
            "Opened tab group"
        );

        Ok(())
    }

    /// Run `f` against one group.
    ///
    /// The registry stays locked while `f` runs, so `f` must not call back
    /// into this workspace. Re-entrant work on the same group goes through the
    /// `&mut TabManager` it is handed.
    pub fn with_group<F, T>(&self, container_id: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut TabManager<R>) -> T,
    {
        let mut groups = self.groups.write();
        let manager = groups
            .get_mut(container_id)
            .ok_or_else(|| CoreError::UnknownGroup(container_id.to_string()))?;
        Ok(f(manager))
    }

    /// Close every tab in a group and forget it.
    pub fn close_group(&self, container_id: &str) -> Result<()> {
        let mut manager = self
            .groups
            .write()
            .remove(container_id)
            .ok_or_else(|| CoreError::UnknownGroup(container_id.to_string()))?;

        manager.remove_all_tabs();

        tracing::info!(container_id = %container_id, "Closed tab group");

        Ok(())
    }

    /// Container ids of the open groups, sorted
    pub fn group_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.groups.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.groups.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.read().is_empty()
    }

    pub fn snapshot(&self) -> Vec<GroupSnapshot> {
        let groups = self.groups.read();
        let mut snapshots: Vec<GroupSnapshot> = groups
            .values()
            .map(|manager| GroupSnapshot {
                container_id: manager.container_id().to_string(),
                active_tab: manager.active_tab().to_string(),
                max_tabs: manager.max_tabs(),
                allow_drag_and_drop: manager.allow_drag_and_drop(),
                tabs: manager.tabs(),
            })
            .collect();
        snapshots.sort_by(|a, b| a.container_id.cmp(&b.container_id));
        snapshots
    }

    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }
}

impl<R: Renderer> Default for Workspace<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Renderer> Clone for Workspace<R> {
    fn clone(&self) -> Self {
        Self {
            groups: Arc::clone(&self.groups),
        }
    }
}
