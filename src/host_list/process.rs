//! Connect launcher
//!
//! Runs the connect command through an [`Executor`] and turns its outcome
//! into a [`ProcessFailure`] carrying the captured diagnostics.

use std::io;

use tracing::{error, info};

use super::error::ProcessFailure;
use crate::ssh::{Executor, SshCommand};

/// Write-only sink that keeps everything written to it
#[derive(Debug, Default)]
pub struct StdErrorWriter {
    buf: Vec<u8>,
}

impl StdErrorWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw captured bytes
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Captured text with surrounding whitespace removed
    pub fn message(&self) -> String {
        String::from_utf8_lossy(&self.buf).trim().to_string()
    }
}

impl io::Write for StdErrorWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `command` in the foreground and wait for it to exit.
pub fn launch(executor: &mut dyn Executor, command: &SshCommand) -> Result<(), ProcessFailure> {
    info!("Connecting: {}", command);

    let mut sink = StdErrorWriter::new();
    match executor.execute(command, &mut sink) {
        Ok(()) => Ok(()),
        Err(e) => {
            let captured = sink.message();
            let message = if captured.is_empty() {
                e.to_string()
            } else {
                captured
            };

            error!("Command failed: {}: {}", command, message);
            Err(ProcessFailure {
                command: command.to_string(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssh::ExecError;
    use std::io::Write;

    struct Scripted {
        stderr: &'static str,
        fail: bool,
    }

    impl Executor for Scripted {
        fn execute(
            &mut self,
            _command: &SshCommand,
            stderr: &mut dyn Write,
        ) -> Result<(), ExecError> {
            stderr.write_all(self.stderr.as_bytes())?;
            if self.fail {
                Err(ExecError::Terminal("lost tty".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn command() -> SshCommand {
        SshCommand::new("ssh", vec!["web.local".to_string()])
    }

    #[test]
    fn test_sink_accepts_everything() {
        let mut sink = StdErrorWriter::new();
        assert_eq!(sink.write(b"abc").unwrap(), 3);
        assert_eq!(sink.write(b"").unwrap(), 0);
        sink.write_all(b"  def \n").unwrap();

        assert_eq!(sink.bytes(), b"abc  def \n");
        assert_eq!(sink.message(), "abc  def");
    }

    #[test]
    fn test_clean_exit_ignores_stderr() {
        let mut exec = Scripted {
            stderr: "Warning: Permanently added host\n",
            fail: false,
        };

        assert!(launch(&mut exec, &command()).is_ok());
    }

    #[test]
    fn test_failure_uses_trimmed_stderr() {
        let mut exec = Scripted {
            stderr: "\nssh: connect to host web.local port 22: Connection refused\n",
            fail: true,
        };

        let failure = launch(&mut exec, &command()).unwrap_err();
        assert_eq!(failure.command, "ssh web.local");
        assert_eq!(
            failure.message,
            "ssh: connect to host web.local port 22: Connection refused"
        );
    }

    #[test]
    fn test_failure_without_stderr_uses_error() {
        let mut exec = Scripted {
            stderr: "   \n",
            fail: true,
        };

        let failure = launch(&mut exec, &command()).unwrap_err();
        assert_eq!(failure.message, "failed to restore terminal: lost tty");
    }
}
