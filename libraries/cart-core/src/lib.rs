//! Cartwall Core
//!
//! Shared domain types for Cartwall, a multi-deck audio cart player.
//!
//! This crate provides the foundational building blocks used by the playback
//! state machine and by host applications (desktop, web):
//! - **Domain Types**: [`FileRef`], [`Locator`]
//! - **File policy**: accepted audio extensions, clock formatting
//! - **Error Handling**: unified [`CoreError`] and [`Result`] types
//!
//! # Example
//!
//! ```rust
//! use cart_core::{FileRef, Locator, is_audio_file};
//!
//! let file = FileRef::new("jingle.mp3", Locator::from("/carts/jingle.mp3"));
//! assert!(is_audio_file(&file.name));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod format;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use format::{format_clock, is_audio_file, SUPPORTED_EXTENSIONS};
pub use types::{FileRef, Locator};
