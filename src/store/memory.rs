use super::Store;
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// In-memory store. Contents vanish with the value.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let map = self.inner.read().map_err(|_| anyhow!("memory store poisoned"))?;
        let value = map.get(key).cloned();
        debug!(key, found = value.is_some(), "store GET");
        Ok(value)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut map = self.inner.write().map_err(|_| anyhow!("memory store poisoned"))?;
        map.insert(key.to_string(), value.to_vec());
        debug!(key, "store PUT");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.inner.write().map_err(|_| anyhow!("memory store poisoned"))?;
        map.remove(key);
        debug!(key, "store REMOVE");
        Ok(())
    }
}
