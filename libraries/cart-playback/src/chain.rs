//! Queue auto-chain decision
//!
//! The chain relation is purely positional: slot K+1 follows slot K, and
//! nothing else. `queued` is advisory metadata on the downstream slot -
//! setting slot 5 queued means "slot 5 starts when slot 4 ends", regardless
//! of how slot 4 was populated or started.

use crate::slot::Slot;

/// Decide whether the slot after `ended_index` should auto-start.
///
/// Must be evaluated before any mutation of the finishing slot's state, so
/// the decision cannot accidentally couple to the ending effects applied to
/// slot K afterwards.
pub(crate) fn chain_successor(slots: &[Slot], ended_index: usize) -> Option<usize> {
    let next_index = ended_index + 1;
    if next_index > slots.len() {
        return None;
    }

    let next = &slots[next_index - 1];
    if next.queued && next.is_loaded() {
        Some(next_index)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_core::{FileRef, Locator};

    fn slots_with(count: usize, loaded: &[usize], queued: &[usize]) -> Vec<Slot> {
        let mut slots: Vec<Slot> = (1..=count).map(Slot::new).collect();
        for &index in loaded {
            slots[index - 1].file = Some(FileRef::new(
                format!("track{index}.mp3"),
                Locator::new(format!("/audio/track{index}.mp3")),
            ));
        }
        for &index in queued {
            slots[index - 1].queued = true;
        }
        slots
    }

    #[test]
    fn chains_to_queued_loaded_successor() {
        let slots = slots_with(20, &[4, 5], &[5]);
        assert_eq!(chain_successor(&slots, 4), Some(5));
    }

    #[test]
    fn no_chain_when_successor_not_queued() {
        let slots = slots_with(20, &[4, 5], &[]);
        assert_eq!(chain_successor(&slots, 4), None);
    }

    #[test]
    fn no_chain_when_successor_empty() {
        // Queued flag without a file never fires
        let mut slots = slots_with(20, &[4], &[]);
        slots[4].queued = true;
        assert_eq!(chain_successor(&slots, 4), None);
    }

    #[test]
    fn adjacency_only() {
        // Slot 6 queued must not fire when slot 4 ends
        let slots = slots_with(20, &[4, 6], &[6]);
        assert_eq!(chain_successor(&slots, 4), None);
        assert_eq!(chain_successor(&slots, 5), Some(6));
    }

    #[test]
    fn last_slot_has_no_successor() {
        let slots = slots_with(20, &[20], &[20]);
        assert_eq!(chain_successor(&slots, 20), None);
    }
}
