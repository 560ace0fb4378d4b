//! Domain types shared across Cartwall crates

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a byte source usable to open an audio resource.
///
/// Hosts put whatever they need to re-open the stream in here: a filesystem
/// path, a blob URL, or a handle token. The playback core never interprets
/// the contents; it only passes them to the deck runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    /// Create a locator from any string-like value
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw locator string, for the host that created it
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Locator {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for Locator {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A browsable audio file: display name plus an opaque locator.
///
/// Supplied by the host's file source (directory browser, search, drag-in)
/// and carried through slot assignments and session persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// Display name, usually the file name with extension
    pub name: String,

    /// Opaque handle used to re-open the byte stream
    pub locator: Locator,
}

impl FileRef {
    /// Create a file reference
    pub fn new(name: impl Into<String>, locator: Locator) -> Self {
        Self {
            name: name.into(),
            locator,
        }
    }

    /// Display name with the extension stripped, as shown on hot buttons
    pub fn display_name(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.name,
        }
    }
}
