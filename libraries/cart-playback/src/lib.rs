//! Cartwall - Slot Playback Management
//!
//! Platform-agnostic cart-player state machine for Cartwall.
//!
//! This crate provides:
//! - A fixed bank of playback slots (default 20) with load/play/pause/stop,
//!   clear, and swap operations
//! - Queue auto-chaining: a queued slot starts when its left neighbor ends
//! - Two-stage gain mixing (per-slot fader times master)
//! - Click/type/drag file assignment as a small interaction state machine
//! - Generation-stamped deck events so stale completions are dropped
//! - Session persistence of slot assignments through a host-provided store
//! - Directory slot metadata for the host's file browser
//!
//! # Architecture
//!
//! `cart-playback` is completely platform-agnostic:
//! - No dependency on any media decoder or audio output API
//! - No dependency on any UI toolkit
//! - No filesystem access of its own
//!
//! Platform-specific code (the actual media engine, persistence) is provided
//! via the [`DeckRuntime`] and [`SessionStore`] traits. Everything runs on
//! one logical thread: hosts deliver inputs and runtime callbacks, then
//! drain [`SlotManager::take_events`] to re-render.
//!
//! # Example: Basic Slot Control
//!
//! ```rust
//! use cart_playback::{
//!     CartConfig, DeckRuntime, FileRef, Locator, Result, SlotManager, SlotState,
//! };
//!
//! // Deck runtime backed by your platform's media engine
//! struct MyDeck;
//!
//! impl DeckRuntime for MyDeck {
//!     fn open(&mut self, _locator: &Locator, _generation: u64) -> Result<()> {
//!         Ok(())
//!     }
//!     fn release(&mut self) {}
//!     fn play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn stop(&mut self) {}
//!     fn set_gain(&mut self, _gain: f32) {}
//! }
//!
//! let mut manager = SlotManager::new(CartConfig::default(), |_| Box::new(MyDeck));
//!
//! // Assign a file and start it
//! let file = FileRef::new("sweeper.mp3", Locator::from("/audio/sweeper.mp3"));
//! manager.load(3, file)?;
//! manager.play(3)?;
//!
//! assert_eq!(manager.snapshot(3)?.state, SlotState::Loaded); // Playing follows the runtime's Started event
//!
//! // Queue slot 4 to follow slot 3, dim the master fader
//! manager.toggle_queued(3)?;
//! manager.set_master_gain(0.8);
//!
//! // Re-render from the accumulated events
//! for _event in manager.take_events() {
//!     // update the UI
//! }
//! # Ok::<(), cart_playback::CartError>(())
//! ```
//!
//! # Example: File Assignment
//!
//! ```rust
//! use cart_playback::{
//!     AssignmentController, CartConfig, DeckRuntime, FileRef, Locator, Result, SlotManager,
//! };
//! # struct MyDeck;
//! # impl DeckRuntime for MyDeck {
//! #     fn open(&mut self, _locator: &Locator, _generation: u64) -> Result<()> { Ok(()) }
//! #     fn release(&mut self) {}
//! #     fn play(&mut self) {}
//! #     fn pause(&mut self) {}
//! #     fn stop(&mut self) {}
//! #     fn set_gain(&mut self, _gain: f32) {}
//! # }
//!
//! let mut manager = SlotManager::new(CartConfig::default(), |_| Box::new(MyDeck));
//! let mut controller = AssignmentController::new();
//!
//! // Click a file, then type "12" + confirm to put it in slot 12
//! let file = FileRef::new("bed.wav", Locator::from("/audio/bed.wav"));
//! controller.select_file(&mut manager, file);
//! controller.push_digit(&mut manager, '1');
//! controller.push_digit(&mut manager, '2');
//! let assigned = controller.confirm_digits(&mut manager)?;
//! assert_eq!(assigned, Some(12));
//! # Ok::<(), cart_playback::CartError>(())
//! ```

mod assign;
mod chain;
mod deck;
mod directory;
mod error;
mod events;
mod manager;
mod mixer;
mod session;
mod slot;
pub mod types;

// Public exports
pub use assign::{AssignmentController, DragSource};
pub use deck::{DeckEvent, DeckRuntime};
pub use directory::{DirectoryContext, DirectorySlot, DIRECTORY_SLOT_COUNT};
pub use error::{CartError, Result};
pub use events::CartEvent;
pub use manager::SlotManager;
pub use mixer::Mixer;
pub use session::{SessionStore, SlotAssignments};
pub use types::{CartConfig, SlotSnapshot, SlotState};

// Re-exported for convenience; hosts mostly only need these two
pub use cart_core::{FileRef, Locator};
