//! Display events
//!
//! Event-based communication for UI synchronization. The slot manager
//! accumulates events as side effects of operations and deck callbacks; the
//! host drains them with [`SlotManager::take_events`](crate::SlotManager::take_events)
//! after each input it delivers.

use serde::{Deserialize, Serialize};

use crate::types::SlotSnapshot;

/// Events emitted by the cart state machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CartEvent {
    /// A slot's display-facing fields changed
    ///
    /// Deck panel and hot button both re-render from the same snapshot.
    SlotUpdated {
        /// 1-based slot index
        index: usize,
        /// Current view of the slot
        snapshot: SlotSnapshot,
    },

    /// Transient status-bar message
    Status {
        /// Human-readable message
        message: String,
    },

    /// Master gain changed (slots re-render their faders against it)
    MasterGainChanged {
        /// New master gain, 0.0-1.0
        gain: f32,
    },

    /// The file-to-slot assignment mapping changed; hosts persist on this
    AssignmentsChanged,

    /// File assignment entered or left the awaiting-target state; while
    /// active, every slot shows a drop-target affordance
    AwaitingTarget {
        /// Whether a file is currently awaiting a destination slot
        active: bool,
    },
}
