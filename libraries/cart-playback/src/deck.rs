//! Platform-agnostic deck runtime seam
//!
//! Abstracts the host media decoder (HTML audio element, Symphonia pipeline,
//! anything that can open a locator and play it). One runtime exists per
//! slot for the lifetime of the process: some host audio APIs forbid
//! re-creating the playback graph for a given output, so runtimes are reused
//! across loads, never replaced.

use crate::error::Result;
use cart_core::Locator;
use std::time::Duration;

/// The live media-playback engine bound to one slot.
///
/// All methods are commands; none of them mutate slot state directly. The
/// host delivers the runtime's lifecycle callbacks back into
/// [`SlotManager::handle_deck_event`](crate::SlotManager::handle_deck_event),
/// echoing the `generation` stamp that was passed to [`open`](Self::open) so
/// late completions for superseded loads can be discarded.
pub trait DeckRuntime {
    /// Begin opening a byte source.
    ///
    /// May fail synchronously (unresolvable locator) or asynchronously via a
    /// later [`DeckEvent::OpenFailed`]. Any previously opened source has
    /// already been dropped by [`release`](Self::release) when this is
    /// called.
    fn open(&mut self, locator: &Locator, generation: u64) -> Result<()>;

    /// Release the independently-allocated resource behind the current
    /// source, if any (revocable blob handle, file descriptor).
    ///
    /// Called exactly once per open, either before the next `open` or on
    /// clear. Must be idempotent when nothing is held.
    fn release(&mut self);

    /// Request playback start or resume
    fn play(&mut self);

    /// Request pause, keeping the current position
    fn pause(&mut self);

    /// Pause and seek back to the start of the track
    fn stop(&mut self);

    /// Apply an output gain, 0.0-1.0, as an immediate step change
    fn set_gain(&mut self, gain: f32);
}

/// Lifecycle events emitted by a deck runtime.
///
/// Delivered by the host together with the slot index and the generation
/// stamp of the open they belong to.
#[derive(Debug, Clone, PartialEq)]
pub enum DeckEvent {
    /// The source opened successfully and is ready to play
    Opened,

    /// An asynchronous open failed; the slot returns to empty
    OpenFailed {
        /// Host-provided failure description
        reason: String,
    },

    /// Track metadata became available
    MetadataReady {
        /// Total track duration
        duration: Duration,
    },

    /// Periodic playback position update
    Progress {
        /// Elapsed time from the start of the track
        position: Duration,
    },

    /// Playback actually started or resumed
    Started,

    /// Playback actually paused
    Paused,

    /// Playback reached the end of the track
    Ended,
}
