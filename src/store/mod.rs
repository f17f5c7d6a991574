pub mod disk;
pub mod memory;

use crate::core::config::AppConfig;
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

pub use disk::DiskStore;
pub use memory::MemoryStore;

/// Byte-oriented key-value storage for user preferences.
pub trait Store: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn put(&self, key: &str, value: &[u8]) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Opens the on-disk store under the configured data directory.
pub fn open_default(config: &AppConfig) -> Result<DiskStore> {
    let path = config.data_path()?.join("store");
    debug!("Opening preference store at {}", path.display());
    DiskStore::open(&path)
}
