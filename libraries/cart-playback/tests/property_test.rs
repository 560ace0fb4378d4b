//! Property-based tests for the slot manager
//!
//! Uses proptest to verify the structural invariants of the slot bank across
//! many random operation sequences.

use proptest::prelude::*;
use cart_playback::{
    CartConfig, CartEvent, DeckEvent, DeckRuntime, FileRef, Locator, Result, SlotManager,
    SlotState,
};

// ===== Helpers =====

/// Deck runtime that accepts every command
struct StubDeck;

impl DeckRuntime for StubDeck {
    fn open(&mut self, _locator: &Locator, _generation: u64) -> Result<()> {
        Ok(())
    }
    fn release(&mut self) {}
    fn play(&mut self) {}
    fn pause(&mut self) {}
    fn stop(&mut self) {}
    fn set_gain(&mut self, _gain: f32) {}
}

const SLOT_COUNT: usize = 8;

fn manager() -> SlotManager {
    let config = CartConfig {
        slot_count: SLOT_COUNT,
        master_gain: 1.0,
    };
    SlotManager::new(config, |_| Box::new(StubDeck))
}

fn file(name: &str) -> FileRef {
    FileRef::new(name, Locator::new(format!("/audio/{name}")))
}

/// One random operation against a random slot
#[derive(Debug, Clone)]
enum Op {
    Load(usize),
    Clear(usize),
    ToggleQueued(usize),
    Stop(usize),
    Ended(usize),
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    (0u8..5, 1usize..=SLOT_COUNT).prop_map(|(kind, slot)| match kind {
        0 => Op::Load(slot),
        1 => Op::Clear(slot),
        2 => Op::ToggleQueued(slot),
        3 => Op::Stop(slot),
        _ => Op::Ended(slot),
    })
}

fn arbitrary_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(arbitrary_op(), 1..60)
}

/// Occupancy pattern plus queued flags for the whole bank
fn arbitrary_bank() -> impl Strategy<Value = Vec<(bool, bool)>> {
    prop::collection::vec((any::<bool>(), any::<bool>()), SLOT_COUNT)
}

/// Fill a fresh manager from a `(loaded, queued)` pattern; queued only
/// sticks on loaded slots, mirroring what the API allows.
fn populate(pattern: &[(bool, bool)]) -> SlotManager {
    let mut manager = manager();
    for (position, (loaded, queued)) in pattern.iter().enumerate() {
        let index = position + 1;
        if *loaded {
            manager.load(index, file(&format!("track-{index}.mp3"))).unwrap();
            if *queued {
                manager.toggle_queued(index).unwrap();
            }
        }
    }
    manager.take_events();
    manager
}

// ===== Property Tests =====

proptest! {
    /// Property: an empty slot is never queued and never mid-playback,
    /// no matter what sequence of operations produced it
    #[test]
    fn empty_slots_carry_no_queue_flag(ops in arbitrary_ops()) {
        let mut manager = manager();

        // Generation stamp tracking: load and clear each bump it, and a
        // delivered Ended clears (bumping again)
        let mut generations = vec![0u64; SLOT_COUNT + 1];

        for op in ops {
            match op {
                Op::Load(slot) => {
                    manager.load(slot, file("x.mp3")).unwrap();
                    generations[slot] += 1;
                }
                Op::Clear(slot) => {
                    manager.clear(slot).unwrap();
                    generations[slot] += 1;
                }
                Op::ToggleQueued(slot) => {
                    manager.toggle_queued(slot).unwrap();
                }
                Op::Stop(slot) => {
                    manager.stop(slot).unwrap();
                }
                Op::Ended(slot) => {
                    manager.handle_deck_event(slot, generations[slot], DeckEvent::Ended).unwrap();
                    generations[slot] += 1;
                }
            }
        }

        for snapshot in manager.snapshots() {
            if snapshot.file_name.is_none() {
                prop_assert_eq!(snapshot.state, SlotState::Empty);
                prop_assert!(!snapshot.queued, "empty slot {} left queued", snapshot.index);
            } else {
                prop_assert_ne!(snapshot.state, SlotState::Empty);
            }
        }
    }

    /// Property: swapping the same pair twice restores every slot exactly,
    /// for any combination of empty/occupied/queued slots
    #[test]
    fn swap_is_its_own_inverse(
        pattern in arbitrary_bank(),
        a in 1usize..=SLOT_COUNT,
        b in 1usize..=SLOT_COUNT,
    ) {
        let mut manager = populate(&pattern);
        let before = manager.snapshots();

        manager.swap(a, b).unwrap();
        manager.swap(a, b).unwrap();

        let after = manager.snapshots();
        for (original, restored) in before.iter().zip(&after) {
            prop_assert_eq!(&original.file_name, &restored.file_name);
            prop_assert_eq!(original.queued, restored.queued);
            prop_assert_eq!(original.state, restored.state);
        }
    }

    /// Property: a single swap exchanges the two slots' assignments and
    /// queue flags, touching nothing else
    #[test]
    fn swap_exchanges_exactly_two_slots(
        pattern in arbitrary_bank(),
        a in 1usize..=SLOT_COUNT,
        b in 1usize..=SLOT_COUNT,
    ) {
        let mut manager = populate(&pattern);
        let before = manager.snapshots();

        manager.swap(a, b).unwrap();
        let after = manager.snapshots();

        for snapshot in &after {
            let source = match snapshot.index {
                index if index == a => &before[b - 1],
                index if index == b => &before[a - 1],
                index => &before[index - 1],
            };
            prop_assert_eq!(&snapshot.file_name, &source.file_name);
            prop_assert_eq!(snapshot.queued, source.queued);
        }
    }

    /// Property: effective gain is the product of the clamped fader and
    /// master gains, and always lands in 0.0-1.0
    #[test]
    fn effective_gain_is_clamped_product(
        slot_gain in -0.5f32..1.5,
        master in -0.5f32..1.5,
        slot in 1usize..=SLOT_COUNT,
    ) {
        let mut manager = manager();
        manager.set_slot_gain(slot, slot_gain).unwrap();
        manager.set_master_gain(master);

        let expected = slot_gain.clamp(0.0, 1.0) * master.clamp(0.0, 1.0);
        let effective = manager.effective_gain(slot).unwrap();

        prop_assert!((effective - expected).abs() < 1e-6);
        prop_assert!((0.0..=1.0).contains(&effective));
    }

    /// Property: first_empty_slot returns the lowest unoccupied index, and
    /// load_to_first_empty fills exactly that slot (slot 1 when full)
    #[test]
    fn first_empty_slot_is_lowest_unoccupied(pattern in arbitrary_bank()) {
        let mut manager = populate(&pattern);

        let expected = pattern
            .iter()
            .position(|(loaded, _)| !loaded)
            .map(|position| position + 1);
        prop_assert_eq!(manager.first_empty_slot(), expected);

        let target = manager.load_to_first_empty(file("incoming.mp3")).unwrap();
        prop_assert_eq!(target, expected.unwrap_or(1));
        let snapshot = manager.snapshot(target).unwrap();
        prop_assert_eq!(snapshot.file_name.as_deref(), Some("incoming.mp3"));
    }

    /// Property: a finished slot chains into its immediate right neighbor
    /// exactly when that neighbor is loaded and queued, and the finisher
    /// always ends up empty
    #[test]
    fn ended_chains_iff_successor_loaded_and_queued(
        pattern in arbitrary_bank(),
        finisher in 1usize..=SLOT_COUNT,
    ) {
        let mut manager = populate(&pattern);

        let should_chain = finisher < SLOT_COUNT && {
            let (loaded, queued) = pattern[finisher];
            loaded && queued
        };

        // Generation after populate: 1 for loaded slots, 0 for empty ones
        let generation = u64::from(pattern[finisher - 1].0);
        manager.handle_deck_event(finisher, generation, DeckEvent::Ended).unwrap();

        prop_assert_eq!(manager.snapshot(finisher).unwrap().state, SlotState::Empty);

        let chained = manager.take_events().iter().any(|event| matches!(
            event,
            CartEvent::Status { message } if message.starts_with("Auto-playing queued slot")
        ));
        prop_assert_eq!(chained, should_chain);
    }
}
