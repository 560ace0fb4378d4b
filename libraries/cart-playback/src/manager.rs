//! Slot manager - core orchestration
//!
//! Owns the fixed bank of slots and their deck runtimes, and is the only
//! component permitted to mutate slot state and file assignments. Host
//! inputs (pointer, keyboard, drag) arrive through the operations below or
//! through the assignment controller; deck runtime lifecycle callbacks
//! arrive through [`SlotManager::handle_deck_event`]. Everything runs on one
//! logical thread; correctness rests on each handler being atomic and
//! ordered, not on locking.

use tracing::{debug, warn};

use cart_core::FileRef;
use std::time::Duration;

use crate::{
    chain::chain_successor,
    deck::{DeckEvent, DeckRuntime},
    error::{CartError, Result},
    events::CartEvent,
    mixer::Mixer,
    session::{SessionStore, SlotAssignments},
    slot::Slot,
    types::{CartConfig, SlotSnapshot, SlotState},
};

/// Central cart state machine.
///
/// Coordinates the slot bank, the queue auto-chain, the two-stage mixer,
/// and session persistence. Display layers consume [`SlotSnapshot`]s via
/// the event queue; they never mutate slot state themselves.
pub struct SlotManager {
    config: CartConfig,

    // Slot i and runtimes[i] are a fixed 1:1 pair for the process lifetime;
    // runtimes are reused across loads, never recreated.
    slots: Vec<Slot>,
    runtimes: Vec<Box<dyn DeckRuntime>>,

    mixer: Mixer,
    session: Option<Box<dyn SessionStore>>,

    // Event queue for UI synchronization
    pending_events: Vec<CartEvent>,
}

impl SlotManager {
    /// Create a slot manager, building one deck runtime per slot.
    ///
    /// The factory is called once per index in `1..=slot_count`; the
    /// returned runtimes are bound to their slots permanently.
    pub fn new(
        config: CartConfig,
        mut make_runtime: impl FnMut(usize) -> Box<dyn DeckRuntime>,
    ) -> Self {
        let slot_count = config.slot_count;
        let mixer = Mixer::new(slot_count, config.master_gain);

        let slots: Vec<Slot> = (1..=slot_count).map(Slot::new).collect();
        let mut runtimes: Vec<Box<dyn DeckRuntime>> = (1..=slot_count).map(&mut make_runtime).collect();

        // Fan the initial gains out so runtimes start consistent
        for (position, runtime) in runtimes.iter_mut().enumerate() {
            runtime.set_gain(mixer.effective(position));
        }

        Self {
            config,
            slots,
            runtimes,
            mixer,
            session: None,
            pending_events: Vec::new(),
        }
    }

    /// Number of slots
    pub fn slot_count(&self) -> usize {
        self.config.slot_count
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index == 0 || index > self.config.slot_count {
            return Err(CartError::InvalidSlotIndex {
                index,
                max: self.config.slot_count,
            });
        }
        Ok(())
    }

    // ===== Slot Operations =====

    /// Assign a file to a slot.
    ///
    /// Releases whatever resource the slot's runtime previously held, opens
    /// the new locator, and leaves the slot `Loaded`. Never auto-plays. A
    /// failed open leaves the slot empty - no half-loaded state - and is
    /// surfaced as a status message as well as the returned error. The
    /// queued flag is not touched either way.
    pub fn load(&mut self, index: usize, file: FileRef) -> Result<()> {
        self.check_index(index)?;
        let position = index - 1;

        // Supersede any in-flight open on this slot before touching the
        // runtime: a late completion for the old request must find a newer
        // generation and drop itself.
        self.slots[position].generation += 1;
        let generation = self.slots[position].generation;

        let runtime = &mut self.runtimes[position];
        runtime.release();

        if let Err(err) = runtime.open(&file.locator, generation) {
            let reason = match err {
                CartError::LoadFailed { reason, .. } => reason,
                other => other.to_string(),
            };
            self.slots[position].reset_to_empty();
            warn!(slot = index, file = %file.name, %reason, "open failed");

            let error = CartError::LoadFailed {
                name: file.name,
                reason,
            };
            self.emit_status(error.to_string());
            self.emit_slot_updated(index);
            self.save_session();
            return Err(error);
        }

        let slot = &mut self.slots[position];
        slot.state = SlotState::Loaded;
        slot.elapsed = Duration::ZERO;
        slot.duration = None;
        slot.file = Some(file.clone());

        // Runtimes are reused, so re-assert the effective gain on each load
        let gain = self.mixer.effective(position);
        self.runtimes[position].set_gain(gain);

        debug!(slot = index, file = %file.name, "loaded");
        self.emit_slot_updated(index);
        self.emit_status(format!("Loaded: {}", file.name));
        self.save_session();
        Ok(())
    }

    /// Request playback on a slot. No-op (without error) when empty.
    ///
    /// The transition to `Playing` follows the runtime's own started event,
    /// so the state machine stays honest about real versus requested
    /// playback.
    pub fn play(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        if !self.slots[index - 1].is_loaded() {
            return Ok(());
        }
        self.runtimes[index - 1].play();
        self.emit_status(format!("Playing slot {index}"));
        Ok(())
    }

    /// Request pause on a slot. No-op when not playing.
    pub fn pause(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        if self.slots[index - 1].state != SlotState::Playing {
            return Ok(());
        }
        self.runtimes[index - 1].pause();
        self.emit_status(format!("Paused slot {index}"));
        Ok(())
    }

    /// Stop a slot: pause plus rewind to the start.
    ///
    /// `Stopped` is set eagerly - stop is the deterministic combination of
    /// pause and rewind, independent of runtime event timing. No-op on an
    /// empty slot.
    pub fn stop(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        let position = index - 1;
        if !self.slots[position].is_loaded() {
            return Ok(());
        }

        self.runtimes[position].stop();
        let slot = &mut self.slots[position];
        slot.state = SlotState::Stopped;
        slot.elapsed = Duration::ZERO;

        self.emit_slot_updated(index);
        self.emit_status(format!("Stopped slot {index}"));
        Ok(())
    }

    /// Empty a slot: release its resource, stop the runtime, drop the file,
    /// reset the queued flag and the fader to unity.
    ///
    /// The gain reset matches the observed behavior of the source app; a
    /// cleared slot always presents a fresh fader.
    pub fn clear(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        let position = index - 1;

        // Supersede any in-flight open as well
        self.slots[position].generation += 1;
        self.slots[position].reset_to_empty();

        let runtime = &mut self.runtimes[position];
        runtime.release();
        runtime.stop();

        self.mixer.reset_slot(position);
        let gain = self.mixer.effective(position);
        self.runtimes[position].set_gain(gain);

        debug!(slot = index, "cleared");
        self.emit_slot_updated(index);
        self.emit_status(format!("Cleared slot {index}"));
        self.save_session();
        Ok(())
    }

    /// Exchange the `(file, queued)` pairs of two slots. No-op when equal.
    ///
    /// Defined as: stop both if playing, capture both assignments, clear
    /// both, then reload each with the other's capture. The clear-first
    /// order guarantees no transient state where both slots reference the
    /// same open resource. Swapping is its own inverse for any combination
    /// of empty and occupied slots.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_index(a)?;
        self.check_index(b)?;
        if a == b {
            return Ok(());
        }

        for index in [a, b] {
            if self.slots[index - 1].state == SlotState::Playing {
                self.stop(index)?;
            }
        }

        let from_a = (self.slots[a - 1].file.clone(), self.slots[a - 1].queued);
        let from_b = (self.slots[b - 1].file.clone(), self.slots[b - 1].queued);

        self.clear(a)?;
        self.clear(b)?;

        self.reload_swapped(a, from_b)?;
        self.reload_swapped(b, from_a)?;

        self.emit_status(format!("Swapped slots {a} and {b}"));
        Ok(())
    }

    /// Reload one side of a swap, re-applying the captured queued flag
    /// (load itself never touches it, and clear just reset it).
    fn reload_swapped(&mut self, index: usize, captured: (Option<FileRef>, bool)) -> Result<()> {
        let (file, queued) = captured;
        if let Some(file) = file {
            self.load(index, file)?;
            if queued {
                self.slots[index - 1].queued = true;
                self.emit_slot_updated(index);
            }
        }
        Ok(())
    }

    /// Toggle a slot's queued flag; returns the new value.
    ///
    /// An empty slot cannot be queued (it would have nothing to play); the
    /// request is answered with a status message and `false`.
    pub fn toggle_queued(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        let slot = &mut self.slots[index - 1];

        if !slot.is_loaded() {
            self.emit_status(format!("Slot {index} is empty and cannot be queued"));
            return Ok(false);
        }

        slot.queued = !slot.queued;
        let queued = slot.queued;
        self.emit_slot_updated(index);
        if queued {
            if index > 1 {
                self.emit_status(format!("Slot {index} queued to play after slot {}", index - 1));
            } else {
                self.emit_status("Slot 1 queued".to_string());
            }
        } else {
            self.emit_status(format!("Slot {index} removed from queue"));
        }
        Ok(queued)
    }

    /// First empty slot in ascending order, `None` when the bank is full
    pub fn first_empty_slot(&self) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| !slot.is_loaded())
            .map(|position| position + 1)
    }

    /// Load into the first empty slot; when every slot is occupied, falls
    /// back to slot 1 and overwrites it.
    ///
    /// The silent overwrite is deliberate: a double-click always has a
    /// deterministic destination. Returns the index that received the file.
    pub fn load_to_first_empty(&mut self, file: FileRef) -> Result<usize> {
        let index = self.first_empty_slot().unwrap_or(1);
        self.load(index, file)?;
        Ok(index)
    }

    // ===== Volume =====

    /// Set the master gain (0.0-1.0, clamped) and fan the new effective
    /// gains out to every runtime
    pub fn set_master_gain(&mut self, gain: f32) {
        self.mixer.set_master(gain);
        for (position, runtime) in self.runtimes.iter_mut().enumerate() {
            runtime.set_gain(self.mixer.effective(position));
        }
        self.pending_events.push(CartEvent::MasterGainChanged {
            gain: self.mixer.master(),
        });
    }

    /// Current master gain
    pub fn master_gain(&self) -> f32 {
        self.mixer.master()
    }

    /// Set one slot's fader gain (0.0-1.0, clamped) and reapply it to that
    /// slot's runtime
    pub fn set_slot_gain(&mut self, index: usize, gain: f32) -> Result<()> {
        self.check_index(index)?;
        let position = index - 1;
        self.mixer.set_slot(position, gain);
        self.runtimes[position].set_gain(self.mixer.effective(position));
        self.emit_slot_updated(index);
        Ok(())
    }

    /// One slot's fader gain
    pub fn slot_gain(&self, index: usize) -> Result<f32> {
        self.check_index(index)?;
        Ok(self.mixer.slot(index - 1))
    }

    /// Effective output gain of one slot: fader times master
    pub fn effective_gain(&self, index: usize) -> Result<f32> {
        self.check_index(index)?;
        Ok(self.mixer.effective(index - 1))
    }

    // ===== Deck Runtime Events =====

    /// Deliver a deck runtime lifecycle event.
    ///
    /// `generation` is the stamp the runtime received with its open request.
    /// A mismatch against the slot's current generation means the request
    /// was superseded by a later load or clear; the event is silently
    /// dropped (debug-logged), never surfaced.
    pub fn handle_deck_event(
        &mut self,
        index: usize,
        generation: u64,
        event: DeckEvent,
    ) -> Result<()> {
        self.check_index(index)?;
        let position = index - 1;

        if self.slots[position].generation != generation {
            debug!(
                slot = index,
                stale = generation,
                current = self.slots[position].generation,
                "discarding stale deck event"
            );
            return Ok(());
        }

        match event {
            DeckEvent::Opened => {
                if self.slots[position].is_loaded() {
                    self.emit_slot_updated(index);
                }
            }
            DeckEvent::OpenFailed { reason } => {
                let name = self.slots[position]
                    .file
                    .as_ref()
                    .map(|file| file.name.clone())
                    .unwrap_or_default();
                self.slots[position].reset_to_empty();
                warn!(slot = index, file = %name, %reason, "async open failed");

                let error = CartError::LoadFailed { name, reason };
                self.emit_status(error.to_string());
                self.emit_slot_updated(index);
                self.save_session();
            }
            DeckEvent::MetadataReady { duration } => {
                self.slots[position].duration = Some(duration);
                self.emit_slot_updated(index);
            }
            DeckEvent::Progress { position: elapsed } => {
                self.slots[position].elapsed = elapsed;
                self.emit_slot_updated(index);
            }
            DeckEvent::Started => {
                self.slots[position].state = SlotState::Playing;
                self.emit_slot_updated(index);
            }
            DeckEvent::Paused => {
                // Stop already set Stopped eagerly; the runtime's pause
                // confirmation must not regress it.
                if self.slots[position].state == SlotState::Playing {
                    self.slots[position].state = SlotState::Paused;
                    self.emit_slot_updated(index);
                }
            }
            DeckEvent::Ended => self.handle_ended(index)?,
        }

        Ok(())
    }

    /// Ending effects plus the queue auto-chain.
    ///
    /// The chain decision is evaluated on the successor before the finishing
    /// slot is mutated, then the finisher is auto-cleared, then the
    /// successor starts.
    fn handle_ended(&mut self, index: usize) -> Result<()> {
        let next = chain_successor(&self.slots, index);

        self.clear(index)?;

        if let Some(next_index) = next {
            self.play(next_index)?;
            self.emit_status(format!("Auto-playing queued slot {next_index}"));
        }
        Ok(())
    }

    // ===== Session Persistence =====

    /// Attach the host's session store; assignments are saved through it
    /// after every load, clear, and swap
    pub fn set_session_store(&mut self, store: Box<dyn SessionStore>) {
        self.session = Some(store);
    }

    /// Restore previously persisted assignments at startup.
    ///
    /// Entries that no longer open are skipped (each already surfaced its
    /// own status message); entries addressing slots outside the bank are
    /// dropped with a warning.
    pub fn restore_session(&mut self) -> Result<()> {
        let Some(store) = self.session.as_mut() else {
            return Ok(());
        };

        let assignments = match store.load() {
            Ok(assignments) => assignments,
            Err(err) => {
                warn!(error = %err, "session restore failed");
                self.emit_status("Could not restore saved slot assignments".to_string());
                return Err(err);
            }
        };

        for (index, file) in assignments {
            if index == 0 || index > self.config.slot_count {
                warn!(slot = index, "dropping persisted assignment outside the slot bank");
                continue;
            }
            if self.load(index, file).is_err() {
                // Status already emitted; keep restoring the rest
                continue;
            }
        }
        Ok(())
    }

    fn save_session(&mut self) {
        self.pending_events.push(CartEvent::AssignmentsChanged);

        let Some(store) = self.session.as_mut() else {
            return;
        };
        let assignments: SlotAssignments = self
            .slots
            .iter()
            .filter_map(|slot| slot.file.clone().map(|file| (slot.index, file)))
            .collect();
        if let Err(err) = store.save(&assignments) {
            warn!(error = %err, "session save failed");
        }
    }

    // ===== Display =====

    /// Display-facing view of one slot
    pub fn snapshot(&self, index: usize) -> Result<SlotSnapshot> {
        self.check_index(index)?;
        Ok(self.snapshot_unchecked(index))
    }

    /// Snapshots for the whole bank, in slot order
    pub fn snapshots(&self) -> Vec<SlotSnapshot> {
        (1..=self.config.slot_count)
            .map(|index| self.snapshot_unchecked(index))
            .collect()
    }

    fn snapshot_unchecked(&self, index: usize) -> SlotSnapshot {
        let slot = &self.slots[index - 1];
        SlotSnapshot {
            index,
            file_name: slot.file.as_ref().map(|file| file.name.clone()),
            state: slot.state,
            elapsed: slot.elapsed,
            duration: slot.duration,
            progress: slot.progress(),
            queued: slot.queued,
            gain: self.mixer.slot(index - 1),
        }
    }

    /// Drain the pending event queue
    pub fn take_events(&mut self) -> Vec<CartEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub(crate) fn emit_status(&mut self, message: String) {
        self.pending_events.push(CartEvent::Status { message });
    }

    pub(crate) fn push_event(&mut self, event: CartEvent) {
        self.pending_events.push(event);
    }

    fn emit_slot_updated(&mut self, index: usize) {
        let snapshot = self.snapshot_unchecked(index);
        self.pending_events
            .push(CartEvent::SlotUpdated { index, snapshot });
    }
}
