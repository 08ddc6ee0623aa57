//! Recursive discovery of candidate video files.

use crate::config::ExtensionConfig;
use crate::error::AppError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Whether the path carries one of the configured video extensions
pub fn is_video_file(path: &Path, extensions: &ExtensionConfig) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            extensions
                .video
                .iter()
                .any(|known| known.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
}

/// Find all video files below `root`, sorted and de-duplicated.
///
/// Fails with [`AppError::NoFilesFound`] when nothing matches, so an empty
/// tree is never confused with a run whose statistics happen to be zero.
pub fn find_video_files(root: &Path, extensions: &ExtensionConfig) -> Result<Vec<PathBuf>, AppError> {
    if !root.is_dir() {
        return Err(AppError::InvalidPath(root.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_video_file(path, extensions))
        .collect();

    files.sort();
    files.dedup();

    debug!("Discovered {} video files under {}", files.len(), root.display());

    if files.is_empty() {
        Err(AppError::NoFilesFound(root.to_path_buf()))
    } else {
        Ok(files)
    }
}
