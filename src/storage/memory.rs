use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::KeyValueStore;
use crate::error::AppError;

/// In-memory slots for tests and throwaway runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a slot, e.g. with data left by an older build.
    pub fn with_slot(key: &str, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.slots.write().insert(key.to_string(), value.into());
        store
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.read().get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn read(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.raw(key))
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.slots.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
