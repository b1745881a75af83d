use std::fs;
use std::path::Path;
use tracing::{debug, error};

/// Result type for file operations
pub type FileOpResult<T> = Result<T, FileOpError>;

/// Error types for file operations
#[derive(Debug)]
pub enum FileOpError {
    CopyFailed(String),
    RemoveFailed(String),
    IoError(std::io::Error),
}

impl std::fmt::Display for FileOpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOpError::CopyFailed(msg) => write!(f, "Copy failed: {}", msg),
            FileOpError::RemoveFailed(msg) => write!(f, "Remove failed: {}", msg),
            FileOpError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for FileOpError {}

impl From<std::io::Error> for FileOpError {
    fn from(error: std::io::Error) -> Self {
        FileOpError::IoError(error)
    }
}

/// Move a file from source to destination using copy + remove so the move
/// also works across drives.
pub fn move_file(src: &Path, dest: &Path) -> FileOpResult<()> {
    debug!("Moving file from {:?} to {:?}", src, dest);

    if let Err(e) = fs::copy(src, dest) {
        error!("Failed to copy file from {:?} to {:?}: {}", src, dest, e);
        return Err(FileOpError::CopyFailed(format!(
            "Failed to copy from {:?} to {:?}: {}",
            src, dest, e
        )));
    }

    if let Err(e) = fs::remove_file(src) {
        error!("Failed to remove original file {:?} after copy: {}", src, e);
        // Don't leave a duplicate behind on a half-finished move.
        let _ = fs::remove_file(dest);
        return Err(FileOpError::RemoveFailed(format!(
            "Failed to remove original file {:?}: {}",
            src, e
        )));
    }

    Ok(())
}
