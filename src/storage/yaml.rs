//! YAML-backed host storage
//!
//! Hosts live in a single `hosts.yaml` file as a sequence of records.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Host, HostId, HostStorage, StorageError};

/// File name used inside the application home
pub const HOSTS_FILE: &str = "hosts.yaml";

/// Host storage persisted to a YAML file
#[derive(Debug)]
pub struct YamlStorage {
    path: PathBuf,
    hosts: BTreeMap<HostId, Host>,
}

impl YamlStorage {
    /// Open the storage file, starting empty when it does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let mut hosts = BTreeMap::new();

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;

            if !content.trim().is_empty() {
                let records: Vec<Host> =
                    serde_yaml::from_str(&content).map_err(|source| StorageError::Parse {
                        path: path.clone(),
                        source,
                    })?;
                // Records written by hand may lack an id; number them after
                // every explicit id is known
                let (unnumbered, numbered): (Vec<Host>, Vec<Host>) =
                    records.into_iter().partition(|h| h.id.is_new());
                for host in numbered {
                    let id = host.id;
                    if hosts.insert(id, host).is_some() {
                        return Err(StorageError::DuplicateId {
                            path: path.clone(),
                            id,
                        });
                    }
                }
                for mut host in unnumbered {
                    host.id = next_id(&hosts);
                    hosts.insert(host.id, host);
                }
            }
        }

        debug!("Loaded {} hosts from {:?}", hosts.len(), path);
        Ok(Self { path, hosts })
    }

    /// Open `hosts.yaml` inside an application home directory
    pub fn in_dir(app_home: &Path) -> Result<Self, StorageError> {
        Self::open(app_home.join(HOSTS_FILE))
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let records: Vec<&Host> = self.hosts.values().collect();
        let content = serde_yaml::to_string(&records).map_err(StorageError::Serialize)?;
        std::fs::write(&self.path, content).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

fn next_id(hosts: &BTreeMap<HostId, Host>) -> HostId {
    let max = hosts.keys().next_back().map(|id| id.0).unwrap_or(0);
    HostId(max + 1)
}

impl HostStorage for YamlStorage {
    fn get_all(&self) -> Result<Vec<Host>, StorageError> {
        Ok(self.hosts.values().cloned().collect())
    }

    fn get(&self, id: HostId) -> Result<Host, StorageError> {
        self.hosts
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound(id))
    }

    fn save(&mut self, mut host: Host) -> Result<HostId, StorageError> {
        if host.id.is_new() {
            host.id = next_id(&self.hosts);
        } else if !self.hosts.contains_key(&host.id) {
            return Err(StorageError::NotFound(host.id));
        }

        let id = host.id;
        let previous = self.hosts.insert(id, host);

        if let Err(e) = self.flush() {
            match previous {
                Some(old) => {
                    self.hosts.insert(id, old);
                }
                None => {
                    self.hosts.remove(&id);
                }
            }
            return Err(e);
        }

        debug!("Saved host {}", id);
        Ok(id)
    }

    fn delete(&mut self, id: HostId) -> Result<(), StorageError> {
        let removed = self.hosts.remove(&id).ok_or(StorageError::NotFound(id))?;

        if let Err(e) = self.flush() {
            self.hosts.insert(id, removed);
            return Err(e);
        }

        debug!("Deleted host {}", id);
        Ok(())
    }
}
