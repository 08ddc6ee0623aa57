use crate::error::AppError;
use crate::utils::process::run_tool;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Locate an external tool.
///
/// An explicitly configured path wins. Otherwise a binary shipped next to
/// the running executable (or in `../Resources` inside a macOS bundle) is
/// preferred over the bare name, which is left to `PATH` lookup.
pub fn resolve_tool(name: &str, configured: Option<&Path>) -> PathBuf {
    if let Some(path) = configured {
        return path.to_path_buf();
    }

    let file_name = if cfg!(windows) {
        format!("{}.exe", name)
    } else {
        name.to_string()
    };

    let bundled = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .and_then(|dir| {
            [
                dir.join(&file_name),
                dir.join("..").join("Resources").join(&file_name),
            ]
            .into_iter()
            .find(|p| p.is_file())
        });

    match bundled {
        Some(path) => {
            debug!("Using bundled {} at {}", name, path.display());
            path
        }
        None => PathBuf::from(file_name),
    }
}

/// Check that a tool can be executed by asking for its version
pub fn check_tool(
    name: &str,
    program: &Path,
    version_arg: &str,
    timeout: Duration,
) -> Result<String, AppError> {
    run_tool(program, &[version_arg], timeout)
        .map(|out| out.lines().next().unwrap_or_default().trim().to_string())
        .map_err(|e| AppError::ToolUnavailable {
            tool: name.to_string(),
            reason: format!("{} ({})", e, program.display()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_path_wins() {
        let path = resolve_tool("ffprobe", Some(Path::new("/opt/ff/ffprobe")));
        assert_eq!(path, PathBuf::from("/opt/ff/ffprobe"));
    }

    #[test]
    fn falls_back_to_bare_name() {
        let path = resolve_tool("clipaudit-no-such-tool", None);
        assert!(path.ends_with("clipaudit-no-such-tool") || path.ends_with("clipaudit-no-such-tool.exe"));
    }

    #[test]
    fn unavailable_tool_is_reported() {
        let err = check_tool(
            "ffprobe",
            Path::new("/nonexistent/ffprobe"),
            "-version",
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::ToolUnavailable { .. }));
        assert!(err.to_string().starts_with("ffprobe is not available"));
    }
}
