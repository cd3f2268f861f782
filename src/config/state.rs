//! Application state
//!
//! Cross-session state persisted as YAML next to the host file.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::storage::HostId;

/// File name used inside the application home
pub const STATE_FILE: &str = "state.yaml";

/// State remembered between runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationState {
    /// Last selected host
    pub selected: Option<HostId>,
}

/// State handle shared by the shell and the host list
pub type SharedState = Rc<RefCell<ApplicationState>>;

impl ApplicationState {
    /// Path of the state file inside an application home
    pub fn path_in(app_home: &Path) -> PathBuf {
        app_home.join(STATE_FILE)
    }

    /// Load state, falling back to defaults when the file is missing
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read state file: {:?}", path))?;
        let state = serde_yaml::from_str(&content).context("Failed to parse state file")?;
        Ok(state)
    }

    /// Save state to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)
            .context(format!("Failed to write state file: {:?}", path))?;
        Ok(())
    }

    pub fn into_shared(self) -> SharedState {
        Rc::new(RefCell::new(self))
    }
}
