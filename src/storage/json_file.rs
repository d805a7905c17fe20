use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;

use super::Storage;

/// JSON file-based storage implementation.
///
/// The full transaction list lives in a single file:
/// ```text
/// data/
///   transactions.json
/// ```
pub struct JsonFileStorage {
    base_path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn transactions_file(&self) -> PathBuf {
        self.base_path.join("transactions.json")
    }
}

#[async_trait::async_trait]
impl Storage for JsonFileStorage {
    async fn load(&self) -> Result<Option<String>> {
        let path = self.transactions_file();
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        }
    }

    async fn save(&self, blob: &str) -> Result<()> {
        fs::create_dir_all(&self.base_path)
            .await
            .context("Failed to create data directory")?;
        let path = self.transactions_file();
        fs::write(&path, blob)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
