//! Error types for the cart playback state machine

use thiserror::Error;

/// Cart playback errors
///
/// Every variant is recoverable: the slot manager converts failures into
/// status events at the boundary where they are detected, and the process
/// never terminates because of one.
#[derive(Debug, Error)]
pub enum CartError {
    /// A request addressed a slot outside `1..=max`
    #[error("Invalid slot index {index} (valid: 1..={max})")]
    InvalidSlotIndex {
        /// The rejected index
        index: usize,
        /// Highest valid slot index
        max: usize,
    },

    /// The deck runtime could not open a file's locator
    #[error("Could not load \"{name}\": {reason}")]
    LoadFailed {
        /// Display name of the file that failed to open
        name: String,
        /// Host-provided failure description
        reason: String,
    },

    /// Session store failure (save or restore)
    #[error("Session store error: {0}")]
    Session(String),
}

/// Result type for cart playback operations
pub type Result<T> = std::result::Result<T, CartError>;
