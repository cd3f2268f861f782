use crate::storage::{Host, HostId};

/// A host wrapped for display in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    host: Host,
}

impl ListItem {
    pub fn new(host: Host) -> Self {
        Self { host }
    }

    pub fn id(&self) -> HostId {
        self.host.id
    }

    pub fn title(&self) -> &str {
        &self.host.title
    }

    pub fn description(&self) -> &str {
        self.host.description.as_deref().unwrap_or("")
    }

    pub fn host(&self) -> &Host {
        &self.host
    }
}
