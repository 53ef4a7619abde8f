//! PANETAB Tab Management
//!
//! A group of mutually exclusive content panels behind a strip of tabs.
//! The ordered tab → content association lives in Rust; drawing is delegated
//! to a [`Renderer`], whose rendered order is the source of truth after a drag.

mod drag;
mod error;
mod event;
mod headless;
mod manager;
mod renderer;
mod store;
mod tab;

pub use drag::{DragPhase, DragSession};
pub use error::TabError;
pub use event::{EventResponse, UiEvent};
pub use headless::{ElementKind, ElementRef, HeadlessRenderer, DEFAULT_TAB_WIDTH};
pub use manager::{AddOutcome, TabManager, TabOptions};
pub use renderer::{BoundingBox, Cue, Renderer, TabElementSpec};
pub use store::AssociationStore;
pub use tab::{
    content_id_for, sanitize_title, tab_id_for, NewTab, TabInfo, TabRecord, CONTENT_ID_PREFIX,
    TAB_ID_PREFIX,
};

pub type Result<T> = std::result::Result<T, TabError>;
