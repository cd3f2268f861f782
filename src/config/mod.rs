//! Configuration module
//!
//! Handles loading and parsing configuration and state files.

pub mod keys;
pub mod settings;
pub mod state;

pub use keys::{KeyParseError, KeySpec};
pub use settings::Settings;
pub use state::{ApplicationState, SharedState};
