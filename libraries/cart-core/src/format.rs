//! File policy and display formatting helpers
//!
//! The accepted-extension set is file-source policy: hosts use it when
//! listing directories or filtering drag-ins. The slot manager itself never
//! rejects a file by extension.

use std::time::Duration;

/// Audio file extensions accepted by the file browser (lowercase, no dot)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac", "aac", "m4a", "wma"];

/// Check whether a file name carries a supported audio extension
///
/// Comparison is case-insensitive; a name without an extension is rejected.
pub fn is_audio_file(name: &str) -> bool {
    let Some((stem, ext)) = name.rsplit_once('.') else {
        return false;
    };
    if stem.is_empty() {
        return false;
    }
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|candidate| ext.eq_ignore_ascii_case(candidate))
}

/// Format a duration as a `MM:SS` clock string
///
/// Minutes saturate at 99 so the display width stays fixed for any track a
/// cart player realistically holds.
pub fn format_clock(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let mins = (total_secs / 60).min(99);
    let secs = total_secs % 60;
    format!("{mins:02}:{secs:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_extensions() {
        assert!(is_audio_file("jingle.mp3"));
        assert!(is_audio_file("bed.WAV"));
        assert!(is_audio_file("promo.FlAc"));
        assert!(is_audio_file("id.wma"));
    }

    #[test]
    fn rejects_other_files() {
        assert!(!is_audio_file("notes.txt"));
        assert!(!is_audio_file("loopless"));
        assert!(!is_audio_file(".mp3"));
    }

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(Duration::ZERO), "00:00");
        assert_eq!(format_clock(Duration::from_secs(61)), "01:01");
        assert_eq!(format_clock(Duration::from_secs(599)), "09:59");
        // Saturates rather than widening the field
        assert_eq!(format_clock(Duration::from_secs(3600 * 3)), "99:00");
    }
}
