use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::{KeyValueStore, MemoryStore};
use crate::error::AppError;

/// Wraps a [`MemoryStore`] and fails reads or writes on demand, the way a
/// closed pool would.
#[derive(Default)]
pub struct FailingStore {
    pub inner: Arc<MemoryStore>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn read(&self, key: &str) -> Result<Option<String>, AppError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolClosed.into());
        }
        self.inner.read(key).await
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolClosed.into());
        }
        self.inner.write(key, value).await
    }
}
