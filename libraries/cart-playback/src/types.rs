//! Core types for cart playback

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback state of a single slot
///
/// `Empty` and `Loaded` are set by the slot manager itself; `Playing` and
/// `Paused` follow the deck runtime's own lifecycle events so the state
/// machine reflects real playback, not requested playback. `Stopped` is the
/// one eager transition: stop is defined as pause-plus-rewind regardless of
/// event timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotState {
    /// No file assigned
    Empty,

    /// File assigned, playback not started
    Loaded,

    /// Deck runtime confirmed playback is running
    Playing,

    /// Deck runtime confirmed playback is paused mid-track
    Paused,

    /// Rewound to the start after an explicit stop
    Stopped,
}

/// Configuration for the slot manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    /// Number of playback slots (default: 20)
    pub slot_count: usize,

    /// Initial master gain, 0.0-1.0 (default: 1.0)
    pub master_gain: f32,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            slot_count: 20,
            master_gain: 1.0,
        }
    }
}

/// Display-facing view of one slot
///
/// Emitted whenever any of the fields change. Deck panels and hot buttons
/// are both rendered from this one snapshot; there is no separate
/// hot-button state to keep in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotSnapshot {
    /// 1-based slot index
    pub index: usize,

    /// Display name of the assigned file, if any
    pub file_name: Option<String>,

    /// Current playback state
    pub state: SlotState,

    /// Elapsed playback time
    pub elapsed: Duration,

    /// Track duration, once the deck runtime has reported metadata
    pub duration: Option<Duration>,

    /// Elapsed over duration, 0.0-1.0 (0.0 while duration is unknown)
    pub progress: f32,

    /// Whether this slot auto-starts when the previous slot finishes
    pub queued: bool,

    /// Per-slot gain, 0.0-1.0
    pub gain: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = CartConfig::default();
        assert_eq!(config.slot_count, 20);
        assert_eq!(config.master_gain, 1.0);
    }
}
