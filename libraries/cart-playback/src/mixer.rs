//! Two-stage volume mixer
//!
//! Each slot carries an independent fader gain in 0.0-1.0; the actual output
//! gain of a slot is `slot gain * master gain`. Gain changes are immediate
//! step changes, matching simple fader-style controls - no smoothing.

/// Per-slot and master gain state.
///
/// Positions are 0-based (`0..slot_count`); the slot manager translates from
/// 1-based slot indices. The mixer holds the single source of truth for
/// gains; the manager fans changed values out to the deck runtimes.
#[derive(Debug, Clone)]
pub struct Mixer {
    master: f32,
    slot_gains: Vec<f32>,
}

impl Mixer {
    /// Create a mixer with every slot fader at unity
    pub fn new(slot_count: usize, master: f32) -> Self {
        Self {
            master: master.clamp(0.0, 1.0),
            slot_gains: vec![1.0; slot_count],
        }
    }

    /// Set the master gain, clamped to 0.0-1.0
    pub fn set_master(&mut self, gain: f32) {
        self.master = gain.clamp(0.0, 1.0);
    }

    /// Current master gain
    pub fn master(&self) -> f32 {
        self.master
    }

    /// Set one slot's fader gain, clamped to 0.0-1.0
    pub fn set_slot(&mut self, position: usize, gain: f32) {
        self.slot_gains[position] = gain.clamp(0.0, 1.0);
    }

    /// One slot's fader gain
    pub fn slot(&self, position: usize) -> f32 {
        self.slot_gains[position]
    }

    /// Reset one slot's fader to unity (on clear)
    pub fn reset_slot(&mut self, position: usize) {
        self.slot_gains[position] = 1.0;
    }

    /// Effective output gain for one slot: `slot gain * master gain`
    pub fn effective(&self, position: usize) -> f32 {
        self.slot_gains[position] * self.master
    }

    /// Number of slot faders
    pub fn len(&self) -> usize {
        self.slot_gains.len()
    }

    /// Whether the mixer has no faders
    pub fn is_empty(&self) -> bool {
        self.slot_gains.is_empty()
    }
}
