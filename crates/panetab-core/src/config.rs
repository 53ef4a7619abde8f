//! Tab group configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use panetab_tabs::{NewTab, TabOptions};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Id of the host element the group attaches to
    pub container_id: String,
    /// Upper bound on open tabs; absent means unbounded
    pub max_tabs: Option<usize>,
    /// Whether tabs are draggable unless they say otherwise
    pub allow_drag_and_drop: bool,
    /// Whether tabs get a close button unless they say otherwise
    pub show_close_button: bool,
}

impl Config {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;

        tracing::debug!(path = %path.display(), container_id = %config.container_id, "Loaded tab config");

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.container_id.trim().is_empty() {
            return Err(CoreError::Config(
                "container_id cannot be empty".to_string(),
            ));
        }
        if self.max_tabs == Some(0) {
            return Err(CoreError::Config(
                "max_tabs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tab_options(&self) -> TabOptions {
        TabOptions {
            container_id: self.container_id.clone(),
            max_tabs: self.max_tabs,
            allow_drag_and_drop: self.allow_drag_and_drop,
        }
    }

    /// A [`NewTab`] carrying this group's close-button default
    pub fn new_tab(&self, title: impl Into<String>) -> NewTab {
        let tab = NewTab::new(title);
        if self.show_close_button {
            tab
        } else {
            tab.without_close_button()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            container_id: "tabs".to_string(),
            max_tabs: None,
            allow_drag_and_drop: true,
            show_close_button: true,
        }
    }
}
