//! Subprocess boundary shared by the tool-backed sources
//!
//! Every external query (`git config`, `rpm --eval`) goes through
//! [`run_query`], which owns the child process for its whole lifetime and
//! reports failures as a [`CommandError`] value instead of panicking.

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("{program} produced non-UTF-8 output")]
    Utf8 { program: String },
}

impl CommandError {
    /// Exit code of the child, if it ran and exited normally
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            CommandError::Failed { status, .. } => status.code(),
            _ => None,
        }
    }
}

/// Runs `program args...` and returns its stdout
///
/// Exactly one trailing line terminator is stripped. An empty result maps
/// to `Ok(None)`. Stdin is closed so a tool that prompts cannot block.
pub fn run_query(
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
) -> Result<Option<String>, CommandError> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().map_err(|source| CommandError::Spawn {
        program: program.to_string(),
        source,
    })?;

    if !output.status.success() {
        return Err(CommandError::Failed {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let stdout = String::from_utf8(output.stdout).map_err(|_| CommandError::Utf8 {
        program: program.to_string(),
    })?;

    let value = strip_line_terminator(&stdout);
    if value.is_empty() {
        Ok(None)
    } else {
        Ok(Some(value.to_string()))
    }
}

fn strip_line_terminator(s: &str) -> &str {
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_single_trailing_newline() {
        assert_eq!(strip_line_terminator("Ms. Packager\n"), "Ms. Packager");
        assert_eq!(strip_line_terminator("crlf\r\n"), "crlf");
        assert_eq!(strip_line_terminator("two\n\n"), "two\n");
        assert_eq!(strip_line_terminator("  spaced  "), "  spaced  ");
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let err = run_query("guess-packager-no-such-tool", &[], None).unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
        assert_eq!(err.exit_code(), None);
    }

    #[cfg(unix)]
    #[test]
    fn captures_stdout() {
        let out = run_query("sh", &["-c", "echo 'Patty Packager'"], None).unwrap();
        assert_eq!(out.as_deref(), Some("Patty Packager"));
    }

    #[cfg(unix)]
    #[test]
    fn empty_stdout_is_none() {
        let out = run_query("sh", &["-c", "true"], None).unwrap();
        assert_eq!(out, None);
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_failed() {
        let err = run_query("sh", &["-c", "echo oops >&2; exit 3"], None).unwrap_err();
        assert_eq!(err.exit_code(), Some(3));
        match err {
            CommandError::Failed { stderr, .. } => assert_eq!(stderr, "oops"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn runs_in_given_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = run_query("pwd", &[], Some(dir.path())).unwrap().unwrap();
        let expected = dir.path().canonicalize().unwrap();
        let actual = std::path::PathBuf::from(out).canonicalize().unwrap();
        assert_eq!(actual, expected);
    }
}
