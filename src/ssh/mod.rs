//! SSH integration
//!
//! Command line construction and foreground execution.

pub mod command;
pub mod process;

pub use command::{CommandBuilder, SshCommand, SshCommandBuilder};
pub use process::{ExecError, Executor, SystemExecutor};
