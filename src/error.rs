use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{tool} is not available: {reason}")]
    ToolUnavailable { tool: String, reason: String },

    #[error("probe failed for {}: {reason}", path.display())]
    ProbeFailed { path: PathBuf, reason: String },

    #[error("no video stream metadata in {}", .0.display())]
    NoStreamMetadata(PathBuf),

    #[error("no video files found under {}", .0.display())]
    NoFilesFound(PathBuf),

    #[error("invalid path: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Whether the error only concerns one file and the run can go on.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            AppError::ProbeFailed { .. } | AppError::NoStreamMetadata(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_file_errors() {
        let probe = AppError::ProbeFailed {
            path: PathBuf::from("/v/a.mp4"),
            reason: "ffprobe timed out after 30s".to_string(),
        };
        assert!(probe.is_per_file());
        assert!(AppError::NoStreamMetadata(PathBuf::from("/v/a.mp4")).is_per_file());

        assert!(!AppError::NoFilesFound(PathBuf::from("/v")).is_per_file());
        assert!(
            !AppError::ToolUnavailable {
                tool: "ffprobe".to_string(),
                reason: "not found".to_string(),
            }
            .is_per_file()
        );
        assert!(!AppError::Io(std::io::Error::other("disk gone")).is_per_file());
    }
}
