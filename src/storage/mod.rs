mod json_file;
mod memory;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;

use anyhow::Result;

/// Storage boundary for the serialized transaction list.
///
/// The store treats this as a single key-value slot: `load` returns the last
/// blob written (or `None` when nothing has been written yet), and `save`
/// overwrites the slot with the full current list.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    async fn load(&self) -> Result<Option<String>>;
    async fn save(&self, blob: &str) -> Result<()>;
}
