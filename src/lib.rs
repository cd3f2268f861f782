//! sshgo - A keyboard-driven selector for SSH host profiles
//!
//! This library provides the host list state machine, storage, SSH command
//! handling and terminal user interface behind the `sshgo` binary.

pub mod app;
pub mod config;
pub mod editor;
pub mod event;
pub mod host_list;
pub mod ssh;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use app::App;
pub use config::Settings;
pub use host_list::{Event, HostList, Message, Mode};
pub use storage::{Host, HostId};
