//! File assignment controller
//!
//! A small interaction state machine, independent of which UI mechanism
//! drives it: pick a file, then pick a destination slot by clicking it or by
//! typing its number. Drag-based reassignment is a parallel, stateless path
//! tracked by a single mutually-exclusive drag context.
//!
//! The controller holds no slot state of its own; it is handed the slot
//! manager by reference for the operations it triggers.

use cart_core::FileRef;

use crate::{
    error::{CartError, Result},
    events::CartEvent,
    manager::SlotManager,
};

/// What is currently being dragged.
///
/// A slot drag and a file drag are mutually exclusive; starting one replaces
/// the other.
#[derive(Debug, Clone, PartialEq)]
pub enum DragSource {
    /// A populated slot, dropped on a slot to swap the two
    Slot(usize),

    /// A file-list entry, dropped on a slot to load it there
    File(FileRef),
}

#[derive(Debug, Clone)]
enum AssignState {
    Idle,
    AwaitingTarget { file: FileRef, digits: String },
}

/// Click/type-to-assign state machine
#[derive(Debug, Clone)]
pub struct AssignmentController {
    state: AssignState,
    drag: Option<DragSource>,
}

/// Digit buffer cap: slot numbers never need more than two digits
const MAX_DIGITS: usize = 2;

impl Default for AssignmentController {
    fn default() -> Self {
        Self::new()
    }
}

impl AssignmentController {
    /// Create an idle controller
    pub fn new() -> Self {
        Self {
            state: AssignState::Idle,
            drag: None,
        }
    }

    /// Whether a file is awaiting a destination slot
    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, AssignState::AwaitingTarget { .. })
    }

    /// The file awaiting a destination, if any
    pub fn selected_file(&self) -> Option<&FileRef> {
        match &self.state {
            AssignState::AwaitingTarget { file, .. } => Some(file),
            AssignState::Idle => None,
        }
    }

    /// Current prompt text for the status line, `None` while idle
    pub fn prompt(&self) -> Option<String> {
        match &self.state {
            AssignState::AwaitingTarget { file, digits } => Some(prompt_text(file, digits)),
            AssignState::Idle => None,
        }
    }

    /// Select a file and start awaiting a target slot.
    ///
    /// Replaces any previous selection and broadcasts the awaiting-target
    /// affordance to every slot.
    pub fn select_file(&mut self, manager: &mut SlotManager, file: FileRef) {
        let prompt = prompt_text(&file, "");
        self.state = AssignState::AwaitingTarget {
            file,
            digits: String::new(),
        };
        manager.push_event(CartEvent::AwaitingTarget { active: true });
        manager.emit_status(prompt);
    }

    /// Resolve the awaited assignment to a slot (pointer click on a slot).
    ///
    /// An invalid index keeps the selection so the user can pick again; any
    /// other load failure consumes it (the choice was made, the file just
    /// would not open).
    pub fn choose_slot(&mut self, manager: &mut SlotManager, index: usize) -> Result<()> {
        let AssignState::AwaitingTarget { file, .. } = &self.state else {
            return Ok(());
        };
        let file = file.clone();

        match manager.load(index, file) {
            Ok(()) => {
                self.finish(manager);
                Ok(())
            }
            Err(err @ CartError::InvalidSlotIndex { .. }) => {
                manager.emit_status(err.to_string());
                Err(err)
            }
            Err(err) => {
                self.finish(manager);
                Err(err)
            }
        }
    }

    /// Append a typed digit to the transient target buffer.
    ///
    /// The buffer holds at most two characters; a third pushes the oldest
    /// out. Non-digits are ignored. The live prompt re-renders after every
    /// keystroke.
    pub fn push_digit(&mut self, manager: &mut SlotManager, digit: char) {
        let AssignState::AwaitingTarget { file, digits } = &mut self.state else {
            return;
        };
        if !digit.is_ascii_digit() {
            return;
        }

        digits.push(digit);
        if digits.len() > MAX_DIGITS {
            digits.remove(0);
        }

        let prompt = prompt_text(file, digits);
        manager.emit_status(prompt);
    }

    /// Remove the last typed digit.
    ///
    /// Emptying the buffer falls back to the generic prompt without leaving
    /// the awaiting state.
    pub fn backspace(&mut self, manager: &mut SlotManager) {
        let AssignState::AwaitingTarget { file, digits } = &mut self.state else {
            return;
        };
        digits.pop();
        let prompt = prompt_text(file, digits);
        manager.emit_status(prompt);
    }

    /// Confirm the typed slot number.
    ///
    /// Out-of-range entries are rejected with a status message; the state
    /// stays awaiting with only the digits cleared. Returns the slot that
    /// received the file, or `None` when there was nothing to confirm.
    pub fn confirm_digits(&mut self, manager: &mut SlotManager) -> Result<Option<usize>> {
        let AssignState::AwaitingTarget { digits, .. } = &self.state else {
            return Ok(None);
        };
        if digits.is_empty() {
            return Ok(None);
        }

        // Two ASCII digits always parse
        let index: usize = digits.parse().unwrap_or(0);

        match self.choose_slot(manager, index) {
            Ok(()) => Ok(Some(index)),
            Err(err) => {
                if let AssignState::AwaitingTarget { file, digits } = &mut self.state {
                    digits.clear();
                    let prompt = prompt_text(file, digits);
                    manager.emit_status(prompt);
                }
                Err(err)
            }
        }
    }

    /// Abandon the selection (pointer outside any target, or explicit
    /// cancel). Clears all affordances.
    pub fn cancel(&mut self, manager: &mut SlotManager) {
        if !self.is_awaiting() {
            return;
        }
        self.finish(manager);
        manager.emit_status("Assignment cancelled".to_string());
    }

    // ===== Drag Reassignment =====

    /// Start dragging a populated slot
    pub fn begin_slot_drag(&mut self, index: usize) {
        self.drag = Some(DragSource::Slot(index));
    }

    /// Start dragging a file-list entry
    pub fn begin_file_drag(&mut self, file: FileRef) {
        self.drag = Some(DragSource::File(file));
    }

    /// The active drag context, if any
    pub fn dragging(&self) -> Option<&DragSource> {
        self.drag.as_ref()
    }

    /// Abandon the drag without dropping
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Drop the current drag on a slot: a dragged slot swaps with the
    /// target, a dragged file loads into it. No-op when nothing is dragged.
    pub fn drop_on_slot(&mut self, manager: &mut SlotManager, target: usize) -> Result<()> {
        match self.drag.take() {
            Some(DragSource::Slot(source)) => manager.swap(source, target),
            Some(DragSource::File(file)) => manager.load(target, file),
            None => Ok(()),
        }
    }

    fn finish(&mut self, manager: &mut SlotManager) {
        self.state = AssignState::Idle;
        manager.push_event(CartEvent::AwaitingTarget { active: false });
    }
}

fn prompt_text(file: &FileRef, digits: &str) -> String {
    if digits.is_empty() {
        format!("Assign \"{}\": click a slot or type a number", file.name)
    } else {
        format!("Assign \"{}\" to slot {digits}_", file.name)
    }
}
