//! Drag state machine
//!
//! ```text
//! Idle
//!   ↓ dragstart
//! Dragging ──drop──→ Dropped
//!   │                  ↓ dragend
//!   └──dragend────→ Cancelled → Idle
//! ```

use serde::{Deserialize, Serialize};

use crate::error::TabError;
use crate::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragPhase {
    /// No gesture in progress
    #[default]
    Idle,
    /// A tab has been lifted and carries a payload
    Dragging,
    /// The payload landed and the order was rebuilt
    Dropped,
    /// The gesture ended without a valid drop
    Cancelled,
}

impl DragPhase {
    pub fn can_transition_to(&self, target: DragPhase) -> bool {
        match (self, target) {
            (DragPhase::Idle, DragPhase::Dragging) => true,
            (DragPhase::Dragging, DragPhase::Dropped) => true,
            (DragPhase::Dragging, DragPhase::Cancelled) => true,
            (DragPhase::Dropped, DragPhase::Idle) => true,
            (DragPhase::Cancelled, DragPhase::Idle) => true,
            (a, b) if *a == b => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DragPhase::Idle => "idle",
            DragPhase::Dragging => "dragging",
            DragPhase::Dropped => "dropped",
            DragPhase::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for DragPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DragPhase {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(DragPhase::Idle),
            "dragging" => Ok(DragPhase::Dragging),
            "dropped" => Ok(DragPhase::Dropped),
            "cancelled" => Ok(DragPhase::Cancelled),
            _ => Err(format!("Unknown drag phase: {}", s)),
        }
    }
}

/// One drag gesture: its phase and the id of the tab being carried.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    phase: DragPhase,
    payload: Option<String>,
}

impl DragSession {
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Id of the dragged tab, until dragend closes the gesture
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// Id of the dragged tab while it can still be dropped. `None` once the
    /// gesture has dropped or been cancelled.
    pub fn in_flight(&self) -> Option<&str> {
        match self.phase {
            DragPhase::Dragging => self.payload(),
            _ => None,
        }
    }

    fn transition_to(&mut self, next: DragPhase) -> Result<()> {
        if !self.phase.can_transition_to(next) {
            return Err(TabError::InvalidTransition {
                from: self.phase.to_string(),
                to: next.to_string(),
            });
        }

        tracing::trace!(from = %self.phase, to = %next, "Drag phase transition");
        self.phase = next;
        Ok(())
    }

    /// Lift a tab. A gesture whose dragend never arrived is discarded first.
    pub fn begin(&mut self, tab_id: String) {
        if self.phase != DragPhase::Idle {
            tracing::debug!(phase = %self.phase, "Discarding stale drag session");
            *self = Self::default();
        }

        // Idle -> Dragging is always allowed
        let _ = self.transition_to(DragPhase::Dragging);
        self.payload = Some(tab_id);
    }

    /// Mark the carried tab as dropped
    pub fn complete(&mut self) -> Result<()> {
        self.transition_to(DragPhase::Dropped)
    }

    /// Abandon the gesture; order stays as it was
    pub fn cancel(&mut self) -> Result<()> {
        self.transition_to(DragPhase::Cancelled)
    }

    /// Close out the gesture on dragend and hand back the payload.
    pub fn finish(&mut self) -> Option<String> {
        if self.phase == DragPhase::Dragging {
            tracing::debug!(tab_id = ?self.payload, "Drag cancelled");
            let _ = self.cancel();
        }
        let _ = self.transition_to(DragPhase::Idle);
        self.payload.take()
    }
}
