//! Child process execution
//!
//! Runs the connect command in the foreground while the TUI is suspended.

use std::io::{self, Write};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;
use tracing::{debug, warn};

use super::command::SshCommand;
use crate::event;

/// Failure modes of a foreground process
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("i/o error while running command: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Exit(ExitStatus),

    #[error("failed to restore terminal: {0}")]
    Terminal(String),
}

/// Runs a command to completion, blocking the caller.
///
/// The child's diagnostic stream goes to `stderr`, never to the terminal.
pub trait Executor {
    fn execute(&mut self, command: &SshCommand, stderr: &mut dyn Write) -> Result<(), ExecError>;
}

/// Executor that hands the real terminal to the child
#[derive(Debug, Default)]
pub struct SystemExecutor;

impl SystemExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for SystemExecutor {
    fn execute(&mut self, command: &SshCommand, stderr: &mut dyn Write) -> Result<(), ExecError> {
        run_suspended(event::suspend, event::resume, || {
            run_to_completion(command, stderr)
        })
    }
}

/// Run `run` between `suspend` and `resume`. `resume` is called whenever
/// `suspend` was attempted, including when it failed half way.
fn run_suspended<S, R, F>(suspend: S, resume: R, run: F) -> Result<(), ExecError>
where
    S: FnOnce() -> anyhow::Result<()>,
    R: FnOnce() -> anyhow::Result<()>,
    F: FnOnce() -> Result<(), ExecError>,
{
    if let Err(e) = suspend() {
        warn!("Failed to suspend terminal: {}", e);
        if let Err(e) = resume() {
            warn!("Failed to resume terminal: {}", e);
        }
        return Err(ExecError::Terminal(e.to_string()));
    }

    let result = run();

    if let Err(e) = resume() {
        warn!("Failed to resume terminal: {}", e);
        if result.is_ok() {
            return Err(ExecError::Terminal(e.to_string()));
        }
    }

    result
}

/// Spawn `command` with inherited stdin/stdout and its stderr copied into
/// `stderr`, then wait for it to exit.
pub fn run_to_completion(command: &SshCommand, stderr: &mut dyn Write) -> Result<(), ExecError> {
    debug!("Spawning {}", command);

    let mut child = Command::new(command.program())
        .args(command.args())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ExecError::Spawn {
            program: command.program().to_string(),
            source,
        })?;

    if let Some(mut pipe) = child.stderr.take() {
        io::copy(&mut pipe, stderr)?;
    }

    let status = child.wait()?;
    debug!("{} exited with {}", command.program(), status);

    if status.success() {
        Ok(())
    } else {
        Err(ExecError::Exit(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn sh(script: &str) -> SshCommand {
        SshCommand::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[test]
    fn test_failed_suspend_still_resumes() {
        let resumed = Cell::new(0);
        let ran = Cell::new(false);

        let result = run_suspended(
            || Err(anyhow::anyhow!("leave alternate screen")),
            || {
                resumed.set(resumed.get() + 1);
                Ok(())
            },
            || {
                ran.set(true);
                Ok(())
            },
        );

        match result {
            Err(ExecError::Terminal(msg)) => assert_eq!(msg, "leave alternate screen"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(resumed.get(), 1);
        assert!(!ran.get());
    }

    #[test]
    fn test_resume_after_failed_child() {
        let resumed = Cell::new(0);

        let result = run_suspended(
            || Ok(()),
            || {
                resumed.set(resumed.get() + 1);
                Ok(())
            },
            || Err(ExecError::Terminal("child".to_string())),
        );

        assert!(matches!(result, Err(ExecError::Terminal(ref m)) if m == "child"));
        assert_eq!(resumed.get(), 1);
    }

    #[test]
    fn test_resume_failure_reported_after_success() {
        let result = run_suspended(|| Ok(()), || Err(anyhow::anyhow!("tty gone")), || Ok(()));

        assert!(matches!(result, Err(ExecError::Terminal(ref m)) if m == "tty gone"));
    }

    #[test]
    fn test_success_captures_nothing() {
        let mut sink = Vec::new();
        let result = run_to_completion(&sh("exit 0"), &mut sink);

        assert!(result.is_ok());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_failure_captures_stderr() {
        let mut sink = Vec::new();
        let result = run_to_completion(&sh("echo oops >&2; exit 3"), &mut sink);

        match result {
            Err(ExecError::Exit(status)) => assert_eq!(status.code(), Some(3)),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(String::from_utf8_lossy(&sink), "oops\n");
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let mut sink = Vec::new();
        let cmd = SshCommand::new("/nonexistent/sshgo-test-binary", Vec::new());

        assert!(matches!(
            run_to_completion(&cmd, &mut sink),
            Err(ExecError::Spawn { .. })
        ));
    }
}
