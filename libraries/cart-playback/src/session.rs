//! Session persistence seam
//!
//! The slot manager calls [`SessionStore::save`] after every load, clear,
//! and swap, and restores a saved mapping at startup. Where the mapping goes
//! (JSON file, key-value store, browser storage) is the host's business.
//! Only `name` and `locator` are persisted; queued flags and gains are not
//! guaranteed across restarts.

use cart_core::FileRef;
use std::collections::BTreeMap;

use crate::error::Result;

/// Slot-index to file mapping, keyed by 1-based slot index.
///
/// Only occupied slots appear. Serializes as a plain JSON object via
/// `serde_json`, e.g. `{"3": {"name": "...", "locator": "..."}}`.
pub type SlotAssignments = BTreeMap<usize, FileRef>;

/// Host-provided persistence for slot assignments.
///
/// Failures are reported but never fatal: the manager logs a warning and
/// keeps going with its in-memory state.
pub trait SessionStore {
    /// Persist the current assignment mapping
    fn save(&mut self, assignments: &SlotAssignments) -> Result<()>;

    /// Load the previously persisted mapping (empty when none exists)
    fn load(&mut self) -> Result<SlotAssignments>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_core::Locator;

    #[test]
    fn assignments_round_trip_through_json() {
        let mut assignments = SlotAssignments::new();
        assignments.insert(1, FileRef::new("intro.mp3", Locator::from("/audio/intro.mp3")));
        assignments.insert(14, FileRef::new("outro.wav", Locator::from("/audio/outro.wav")));

        let json = serde_json::to_string(&assignments).unwrap();
        let back: SlotAssignments = serde_json::from_str(&json).unwrap();

        assert_eq!(back, assignments);
        assert_eq!(back.len(), 2);
        assert_eq!(back[&14].name, "outro.wav");
    }
}
