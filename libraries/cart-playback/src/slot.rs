//! Per-slot bookkeeping
//!
//! A slot is one addressable playback channel. Decks and hot buttons are two
//! renderings of the same slot; nothing here is duplicated per view.

use cart_core::FileRef;
use std::time::Duration;

use crate::types::SlotState;

/// One playback slot.
///
/// Constructed once per index at startup and never destroyed; only the
/// assignment fields mutate over the process lifetime. All mutation goes
/// through the slot manager.
#[derive(Debug, Clone)]
pub(crate) struct Slot {
    /// Stable 1-based identity
    pub(crate) index: usize,

    /// Assigned file, `None` when empty
    pub(crate) file: Option<FileRef>,

    /// Current playback state
    pub(crate) state: SlotState,

    /// Auto-start when slot `index - 1` finishes
    pub(crate) queued: bool,

    /// Elapsed playback time, from deck runtime progress events
    pub(crate) elapsed: Duration,

    /// Track duration, once metadata arrived
    pub(crate) duration: Option<Duration>,

    /// Stamp bumped on every load/clear; deck events carrying an older
    /// stamp belong to a superseded request and are dropped.
    pub(crate) generation: u64,
}

impl Slot {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            file: None,
            state: SlotState::Empty,
            queued: false,
            elapsed: Duration::ZERO,
            duration: None,
            generation: 0,
        }
    }

    /// Whether a file is assigned
    pub(crate) fn is_loaded(&self) -> bool {
        self.file.is_some()
    }

    /// Empty the assignment fields, keeping identity and generation.
    ///
    /// Upholds the invariant that an empty slot is `Empty` with
    /// `queued == false`.
    pub(crate) fn reset_to_empty(&mut self) {
        self.file = None;
        self.state = SlotState::Empty;
        self.queued = false;
        self.elapsed = Duration::ZERO;
        self.duration = None;
    }

    /// Elapsed over duration, 0.0-1.0; 0.0 while duration is unknown or zero
    pub(crate) fn progress(&self) -> f32 {
        match self.duration {
            Some(duration) if !duration.is_zero() => {
                (self.elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_core::Locator;

    #[test]
    fn new_slot_is_empty() {
        let slot = Slot::new(7);
        assert_eq!(slot.index, 7);
        assert_eq!(slot.state, SlotState::Empty);
        assert!(!slot.queued);
        assert!(slot.file.is_none());
    }

    #[test]
    fn reset_clears_assignment_but_not_identity() {
        let mut slot = Slot::new(3);
        slot.file = Some(FileRef::new("a.mp3", Locator::from("/a.mp3")));
        slot.state = SlotState::Playing;
        slot.queued = true;
        slot.elapsed = Duration::from_secs(10);
        slot.duration = Some(Duration::from_secs(60));
        slot.generation = 5;

        slot.reset_to_empty();

        assert_eq!(slot.index, 3);
        assert_eq!(slot.generation, 5);
        assert_eq!(slot.state, SlotState::Empty);
        assert!(!slot.queued);
        assert!(slot.file.is_none());
        assert_eq!(slot.elapsed, Duration::ZERO);
        assert!(slot.duration.is_none());
    }

    #[test]
    fn progress_fraction() {
        let mut slot = Slot::new(1);
        assert_eq!(slot.progress(), 0.0);

        slot.duration = Some(Duration::from_secs(100));
        slot.elapsed = Duration::from_secs(25);
        assert!((slot.progress() - 0.25).abs() < 1e-6);

        // Never exceeds 1.0 even if progress overshoots duration
        slot.elapsed = Duration::from_secs(120);
        assert_eq!(slot.progress(), 1.0);

        // Zero duration never divides
        slot.duration = Some(Duration::ZERO);
        assert_eq!(slot.progress(), 0.0);
    }
}
