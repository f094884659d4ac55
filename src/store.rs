//! Best-effort persistent fallback store.
//!
//! The poller keeps the last successful scoreboard per league here so a failed
//! fetch can serve stale data instead of a blank board. The store is advisory:
//! every failure is logged and swallowed by the caller, never propagated.

use anyhow::Result;
use async_trait::async_trait;
use football_api::Game;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;

/// Async string-keyed storage of normalized game lists.
#[async_trait]
pub trait FallbackStore: Send + Sync {
    /// `Ok(None)` means "nothing stored under this key".
    async fn get(&self, key: &str) -> Result<Option<Vec<Game>>>;
    async fn set(&self, key: &str, games: &[Game]) -> Result<()>;
    async fn delete(&self, key: &str) -> Result<()>;
}

/// One JSON file per key under a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl FallbackStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<Game>>> {
        let path = self.path(key);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&contents) {
            Ok(games) => Ok(Some(games)),
            Err(e) => {
                // A corrupt cache entry is treated as absent, not fatal.
                warn!("discarding unreadable cache entry {}: {e}", path.display());
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, games: &[Game]) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_string_pretty(games)?;
        tokio::fs::write(self.path(key), json).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        match tokio::fs::remove_file(self.path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store for tests and cache-less runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<Game>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FallbackStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<Game>>> {
        let entries = self.entries.lock().expect("store lock");
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, games: &[Game]) -> Result<()> {
        let mut entries = self.entries.lock().expect("store lock");
        entries.insert(key.to_owned(), games.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().expect("store lock");
        entries.remove(key);
        Ok(())
    }
}
