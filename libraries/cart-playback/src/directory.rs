//! Directory context
//!
//! Up to four independent directory slots, each remembering a root locator
//! and the sub-path currently being browsed. Exactly one slot is active at a
//! time and feeds the file list the assignment controller draws candidates
//! from. Traversal itself is host territory; this is metadata only.

use cart_core::Locator;
use serde::{Deserialize, Serialize};

use crate::error::{CartError, Result};

/// Number of directory slots
pub const DIRECTORY_SLOT_COUNT: usize = 4;

/// One directory slot: a root plus the current browsing position under it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySlot {
    /// Root locator chosen by the host's directory picker
    pub root: Option<Locator>,

    /// Current sub-path relative to the root (`None` = at the root)
    pub sub_path: Option<String>,
}

/// The four directory slots and the active selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryContext {
    slots: Vec<DirectorySlot>,
    active: usize,
}

impl Default for DirectoryContext {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryContext {
    /// Create a context with all slots unset and slot 1 active
    pub fn new() -> Self {
        Self {
            slots: vec![DirectorySlot::default(); DIRECTORY_SLOT_COUNT],
            active: 1,
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index == 0 || index > DIRECTORY_SLOT_COUNT {
            return Err(CartError::InvalidSlotIndex {
                index,
                max: DIRECTORY_SLOT_COUNT,
            });
        }
        Ok(())
    }

    /// Assign a root to a directory slot, resetting its browsing position
    pub fn set_root(&mut self, index: usize, root: Locator) -> Result<()> {
        self.check_index(index)?;
        self.slots[index - 1] = DirectorySlot {
            root: Some(root),
            sub_path: None,
        };
        Ok(())
    }

    /// Make a directory slot the active one
    pub fn activate(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.active = index;
        Ok(())
    }

    /// 1-based index of the active slot
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The active slot's data
    pub fn active_slot(&self) -> &DirectorySlot {
        &self.slots[self.active - 1]
    }

    /// Root of the active slot, if one was assigned
    pub fn active_root(&self) -> Option<&Locator> {
        self.active_slot().root.as_ref()
    }

    /// Descend the active slot to a sub-path under its root
    pub fn browse_to(&mut self, sub_path: impl Into<String>) {
        self.slots[self.active - 1].sub_path = Some(sub_path.into());
    }

    /// Step the active slot one path component up, back to the root when the
    /// sub-path has a single component
    pub fn go_up(&mut self) {
        let slot = &mut self.slots[self.active - 1];
        slot.sub_path = match slot.sub_path.take() {
            Some(path) => path
                .rsplit_once('/')
                .map(|(parent, _)| parent.to_string())
                .filter(|parent| !parent.is_empty()),
            None => None,
        };
    }
}
