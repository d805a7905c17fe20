//! In-memory storage implementation for testing.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use tokio::sync::Mutex;

use super::Storage;

/// In-memory storage with optional failure injection, for exercising the
/// store's recovery policies without touching the filesystem.
#[derive(Default)]
pub struct MemoryStorage {
    blob: Mutex<Option<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a pre-seeded blob, as if a previous session had saved it.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
            ..Self::default()
        }
    }

    /// Make subsequent `load` calls fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `save` calls fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// The last blob written, if any.
    pub async fn blob(&self) -> Option<String> {
        self.blob.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn load(&self) -> Result<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            anyhow::bail!("injected read failure");
        }
        Ok(self.blob.lock().await.clone())
    }

    async fn save(&self, blob: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("injected write failure");
        }
        *self.blob.lock().await = Some(blob.to_string());
        Ok(())
    }
}
