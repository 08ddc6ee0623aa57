use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Failure of one external tool invocation
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} timed out after {}s", .after.as_secs())]
    Timeout { program: String, after: Duration },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("error waiting for {program}: {source}")]
    Wait {
        program: String,
        source: std::io::Error,
    },
}

/// Run a tool to completion and return its stdout.
///
/// The child is killed once `timeout` elapses. Output pipes are drained on
/// helper threads so a chatty child cannot block on a full pipe.
pub fn run_tool(program: &Path, args: &[&str], timeout: Duration) -> Result<String, ToolError> {
    let name = program.display().to_string();

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ToolError::Spawn {
            program: name.clone(),
            source,
        })?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ToolError::Timeout {
                    program: name,
                    after: timeout,
                });
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(source) => {
                let _ = child.kill();
                return Err(ToolError::Wait {
                    program: name,
                    source,
                });
            }
        }
    };

    let stdout = stdout.join().unwrap_or_default();
    let stderr = stderr.join().unwrap_or_default();

    if !status.success() {
        let last_lines: Vec<&str> = stderr.lines().rev().take(5).collect();
        return Err(ToolError::Failed {
            program: name,
            status: status.to_string(),
            stderr: last_lines.into_iter().rev().collect::<Vec<_>>().join("\n"),
        });
    }

    Ok(stdout)
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).to_string()
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str, timeout: Duration) -> Result<String, ToolError> {
        run_tool(Path::new("sh"), &["-c", script], timeout)
    }

    #[test]
    fn captures_stdout() {
        let out = sh("echo '{\"streams\": []}'", Duration::from_secs(5)).unwrap();
        assert_eq!(out.trim(), "{\"streams\": []}");
    }

    #[test]
    fn nonzero_exit_is_failure_with_stderr() {
        let err = sh("echo boom >&2; exit 3", Duration::from_secs(5)).unwrap_err();
        match err {
            ToolError::Failed { stderr, .. } => assert_eq!(stderr, "boom"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn slow_tool_times_out() {
        let started = Instant::now();
        let err = sh("sleep 5", Duration::from_millis(200)).unwrap_err();
        assert!(matches!(err, ToolError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn missing_binary_is_spawn_error() {
        let err = run_tool(
            Path::new("/nonexistent/clipaudit-tool"),
            &[],
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert!(matches!(err, ToolError::Spawn { .. }));
    }
}
