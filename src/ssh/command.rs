//! SSH command construction
//!
//! Turns a host profile into the exact command line used to connect.

use std::fmt;

use crate::config::settings::SshSettings;
use crate::storage::Host;

/// A fully resolved command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshCommand {
    program: String,
    args: Vec<String>,
}

impl SshCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Executable to launch
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the executable
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for SshCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.chars().any(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Builds the connect command for a host. Must be pure.
pub trait CommandBuilder {
    fn build(&self, host: &Host) -> SshCommand;
}

/// Builder for the system `ssh` client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshCommandBuilder {
    program: String,
    extra_args: Vec<String>,
}

impl SshCommandBuilder {
    pub fn new(program: impl Into<String>, extra_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            extra_args,
        }
    }

    pub fn from_settings(settings: &SshSettings) -> Self {
        Self::new(settings.program.clone(), settings.extra_args.clone())
    }
}

impl Default for SshCommandBuilder {
    fn default() -> Self {
        Self::new("ssh", Vec::new())
    }
}

impl CommandBuilder for SshCommandBuilder {
    fn build(&self, host: &Host) -> SshCommand {
        let mut args = self.extra_args.clone();

        if let Some(key) = host.identity_file.as_deref().filter(|k| !k.is_empty()) {
            let expanded = shellexpand::tilde(key);
            args.push("-i".to_string());
            args.push(expanded.into_owned());
        }

        // Port 22 is the client default
        if let Some(port) = host.port {
            if port != 22 {
                args.push("-p".to_string());
                args.push(port.to_string());
            }
        }

        args.push(host.connection_string());

        SshCommand::new(self.program.clone(), args)
    }
}
