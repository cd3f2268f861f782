//! Host storage
//!
//! Persistence boundary for host records.

pub mod host;
pub mod yaml;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use thiserror::Error;

pub use host::{Host, HostId};
pub use yaml::YamlStorage;

/// Errors raised by a host storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("duplicate host id {id} in {path}")]
    DuplicateId { path: PathBuf, id: HostId },

    #[error("failed to serialize hosts: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("host {0} not found")]
    NotFound(HostId),
}

/// Host repository. All calls are synchronous.
pub trait HostStorage {
    /// Enumerate every stored host
    fn get_all(&self) -> Result<Vec<Host>, StorageError>;

    /// Fetch a single host
    fn get(&self, id: HostId) -> Result<Host, StorageError>;

    /// Create or update a host, returning its identity
    fn save(&mut self, host: Host) -> Result<HostId, StorageError>;

    /// Remove a host
    fn delete(&mut self, id: HostId) -> Result<(), StorageError>;
}

/// Storage handle shared between the shell and the host list
pub type SharedStorage = Rc<RefCell<dyn HostStorage>>;

/// Wrap a backend into a shared handle
pub fn shared<S: HostStorage + 'static>(storage: S) -> SharedStorage {
    Rc::new(RefCell::new(storage))
}
