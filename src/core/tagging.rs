//! Best-effort OS file tagging reflecting the classification outcome.
//!
//! The tagging mechanism is an external collaborator injected into the
//! pipeline as a trait object, so the engine can run (and be tested) without
//! touching the OS. Tag calls are fire-and-forget: failures land in the log
//! and never affect the move or classification outcome.

use std::path::Path;

/// Finder label index applied to white-background images (green).
pub const WHITE_TAG_INDEX: u8 = 6;

/// Finder label index applied to non-white-background images (blue).
pub const NON_WHITE_TAG_INDEX: u8 = 4;

/// Injected capability to tag a file with the classification outcome.
pub trait FileTagger: Send {
    fn tag(&self, path: &Path, is_white: bool);
}

/// Tags files with a Finder label via `osascript`. A no-op with a log entry
/// on platforms without Finder.
pub struct FinderTagger;

impl FileTagger for FinderTagger {
    fn tag(&self, path: &Path, is_white: bool) {
        let index = if is_white {
            WHITE_TAG_INDEX
        } else {
            NON_WHITE_TAG_INDEX
        };
        apply_finder_label(path, index);
    }
}

#[cfg(target_os = "macos")]
fn apply_finder_label(path: &Path, index: u8) {
    use tracing::warn;

    let escaped = path.to_string_lossy().replace('"', "\\\"");
    let script = format!(
        "tell application \"Finder\" to set label index of (POSIX file \"{}\" as alias) to {}",
        escaped, index
    );

    match std::process::Command::new("osascript")
        .arg("-e")
        .arg(&script)
        .output()
    {
        Ok(output) if !output.status.success() => {
            warn!(
                "Finder tagging failed for {:?}: {}",
                path,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(_) => {}
        Err(e) => {
            warn!("Failed to invoke osascript for {:?}: {}", path, e);
        }
    }
}

#[cfg(not(target_os = "macos"))]
fn apply_finder_label(path: &Path, index: u8) {
    tracing::debug!(
        "File tagging unavailable on this platform, skipping label {} for {:?}",
        index,
        path
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct RecordingTagger {
        calls: Mutex<Vec<(PathBuf, bool)>>,
    }

    impl FileTagger for RecordingTagger {
        fn tag(&self, path: &Path, is_white: bool) {
            self.calls.lock().unwrap().push((path.to_path_buf(), is_white));
        }
    }

    #[test]
    fn test_tagger_receives_two_valued_mapping() {
        let tagger = RecordingTagger {
            calls: Mutex::new(Vec::new()),
        };
        tagger.tag(Path::new("/a.jpg"), true);
        tagger.tag(Path::new("/b.jpg"), false);

        let calls = tagger.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], (PathBuf::from("/a.jpg"), true));
        assert_eq!(calls[1], (PathBuf::from("/b.jpg"), false));
    }

    #[test]
    fn test_tag_indices_are_distinct() {
        assert_ne!(WHITE_TAG_INDEX, NON_WHITE_TAG_INDEX);
    }
}
