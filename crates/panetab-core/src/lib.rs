//! PANETAB Core
//!
//! Configuration, logging and the registry of tab groups a host application
//! talks to.

mod config;
mod error;
mod workspace;

pub use config::Config;
pub use error::CoreError;
pub use workspace::{GroupSnapshot, Workspace};

// Re-export the tab model
pub use panetab_tabs::{
    AddOutcome, Cue, DragPhase, EventResponse, HeadlessRenderer, NewTab, Renderer, TabError,
    TabInfo, TabManager, TabOptions, UiEvent,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
