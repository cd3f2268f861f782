//! Host records
//!
//! Defines the persisted SSH host profile.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable host identity assigned by the storage layer.
///
/// `HostId::NEW` (zero) marks a host that has not been saved yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostId(pub u64);

impl HostId {
    /// Identity of a host that was never persisted
    pub const NEW: HostId = HostId(0);

    /// Whether the storage still has to assign an identity
    pub fn is_new(self) -> bool {
        self == Self::NEW
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// SSH host profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    /// Storage identity
    #[serde(default)]
    pub id: HostId,

    /// Display title
    pub title: String,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Hostname or IP address
    pub address: String,

    /// SSH username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// SSH port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Path to identity file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_file: Option<String>,
}

impl Host {
    /// Create a new, unsaved host
    pub fn new(title: &str, address: &str) -> Self {
        Self {
            id: HostId::NEW,
            title: title.to_string(),
            description: None,
            address: address.to_string(),
            user: None,
            port: None,
            identity_file: None,
        }
    }

    /// Set the username
    pub fn with_user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }

    /// Set the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the identity file
    pub fn with_identity_file(mut self, path: &str) -> Self {
        self.identity_file = Some(path.to_string());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Get SSH connection string (user@address)
    pub fn connection_string(&self) -> String {
        match self.user.as_deref() {
            Some(user) if !user.is_empty() => format!("{}@{}", user, self.address),
            _ => self.address.clone(),
        }
    }

    /// Copy every field under a new title. The identity is left for the
    /// storage to assign.
    pub fn duplicate(&self, title: String) -> Self {
        Self {
            id: HostId::NEW,
            title,
            ..self.clone()
        }
    }
}
