//! Settings configuration
//!
//! TOML-based settings for sshgo.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// UI settings
    pub ui: UiSettings,

    /// SSH client settings
    pub ssh: SshSettings,

    /// Storage settings
    pub storage: StorageSettings,

    /// Keybindings
    pub keybindings: KeyBindings,
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Theme name ("dark" or "light")
    pub theme: String,
    /// Input poll interval in milliseconds
    pub tick_rate_ms: u64,
    /// Title shown when no host is selected
    pub placeholder_title: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            tick_rate_ms: 250,
            placeholder_title: "press 'n' to add a new host".to_string(),
        }
    }
}

/// SSH client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SshSettings {
    /// Client executable
    pub program: String,
    /// Arguments placed before the host-specific ones
    pub extra_args: Vec<String>,
}

impl Default for SshSettings {
    fn default() -> Self {
        Self {
            program: "ssh".to_string(),
            extra_args: Vec::new(),
        }
    }
}

/// Storage settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding hosts, state and log files
    pub app_home: Option<String>,
}

/// Key bindings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub connect: Vec<String>,
    pub remove: Vec<String>,
    pub edit: Vec<String>,
    pub append: Vec<String>,
    pub clone: Vec<String>,
    pub confirm: Vec<String>,
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub page_up: Vec<String>,
    pub page_down: Vec<String>,
    pub top: Vec<String>,
    pub bottom: Vec<String>,
    pub filter: Vec<String>,
    pub clear_filter: Vec<String>,
    pub help: Vec<String>,
    pub quit: Vec<String>,
}

fn keys(specs: &[&str]) -> Vec<String> {
    specs.iter().map(|s| s.to_string()).collect()
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            connect: keys(&["Enter"]),
            remove: keys(&["d"]),
            edit: keys(&["e"]),
            append: keys(&["n"]),
            clone: keys(&["c"]),
            confirm: keys(&["y"]),
            up: keys(&["k", "Up"]),
            down: keys(&["j", "Down"]),
            page_up: keys(&["h", "Left", "PageUp"]),
            page_down: keys(&["l", "Right", "PageDown"]),
            top: keys(&["g", "Home"]),
            bottom: keys(&["G", "End"]),
            filter: keys(&["/"]),
            clear_filter: keys(&["Esc"]),
            help: keys(&["?"]),
            quit: keys(&["q", "Ctrl-c"]),
        }
    }
}

impl Settings {
    /// Load settings from file
    pub fn load(custom_path: Option<&str>) -> Result<Self> {
        let path = if let Some(p) = custom_path {
            PathBuf::from(shellexpand::tilde(p).as_ref())
        } else {
            Self::default_config_path()
        };

        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .context(format!("Failed to read config file: {:?}", path))?;
            let settings: Settings =
                toml::from_str(&content).context("Failed to parse config file")?;
            Ok(settings)
        } else {
            // Return defaults if no config exists
            Ok(Self::default())
        }
    }

    /// Get default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("sshgo").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("~/.config/sshgo/config.toml"))
    }

    /// Get the application home directory
    pub fn app_home(&self) -> PathBuf {
        match self.storage.app_home.as_deref() {
            Some(dir) => PathBuf::from(shellexpand::tilde(dir).as_ref()),
            None => dirs::home_dir()
                .map(|d| d.join(".sshgo"))
                .unwrap_or_else(|| PathBuf::from(".sshgo")),
        }
    }

    /// Save settings to file
    pub fn save(&self, path: Option<&str>) -> Result<()> {
        let path = if let Some(p) = path {
            PathBuf::from(shellexpand::tilde(p).as_ref())
        } else {
            Self::default_config_path()
        };

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Generate default config file
    pub fn generate_default_config() -> String {
        let settings = Self::default();
        toml::to_string_pretty(&settings).unwrap_or_default()
    }
}
