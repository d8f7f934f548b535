// ABOUTME: Key/value storage backends for the prompt store
// ABOUTME: A JSON document on disk and an in-memory map, both with string values per key

use async_trait::async_trait;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use super::error::{Result, StoreError};

/// String-valued key/value storage.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    async fn set_item(&mut self, key: &str, value: String) -> Result<()>;

    async fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// Stores every key in a single JSON object file.
///
/// The document is re-read on every access; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<IndexMap<String, String>> {
        if !fs::try_exists(&self.path).await? {
            return Ok(IndexMap::new());
        }

        let contents = fs::read_to_string(&self.path).await?;
        if contents.trim().is_empty() {
            return Ok(IndexMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| StoreError::CorruptedDocument {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    async fn persist(&self, items: &IndexMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !fs::try_exists(parent).await? {
                fs::create_dir_all(parent).await?;
            }
        }

        let contents = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, contents).await?;
        debug!("Store written to {} ({} keys)", self.path.display(), items.len());
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load().await?.shift_remove(key))
    }

    async fn set_item(&mut self, key: &str, value: String) -> Result<()> {
        let mut items = self.load().await?;
        items.insert(key.to_string(), value);
        self.persist(&items).await
    }

    async fn remove_item(&mut self, key: &str) -> Result<()> {
        let mut items = self.load().await?;
        if items.shift_remove(key).is_some() {
            self.persist(&items).await?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    items: IndexMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    async fn set_item(&mut self, key: &str, value: String) -> Result<()> {
        self.items.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.shift_remove(key);
        Ok(())
    }
}
