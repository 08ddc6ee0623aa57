//! Report rendering: a self-contained HTML page and an optional JSON export.

pub mod html;
pub mod json;

pub use html::render_html;
pub use json::render_json;

use crate::error::AppError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write rendered report text to `path`, creating parent directories
pub fn write_report(path: &Path, contents: &str) -> Result<PathBuf, AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    info!("Report written to {}", path.display());
    Ok(path.to_path_buf())
}
