use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{CacheEntry, RepositorySummary};

/// Key the viewer stores its dataset under
pub const CACHE_KEY: &str = "github-repos-cache";

/// One hour, in milliseconds
pub const CACHE_TTL_MS: i64 = 60 * 60 * 1000;

/// String key/value storage with last-writer-wins semantics per key.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local store, used by tests and `--no-cache` runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}

/// One JSON file per key under a cache directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<user cache dir>/star-ranking`, if the platform has one
    pub fn default_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("star-ranking"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file))
    }
}

impl CacheStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Readers never observe a half-written file.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Read the cached dataset if it is younger than [`CACHE_TTL_MS`] at `now_ms`.
///
/// Expired, future-dated and unparseable entries are removed and reported as absent.
pub fn read_cached(store: &dyn CacheStore, now_ms: i64) -> Option<Vec<RepositorySummary>> {
    let raw = match store.get(CACHE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Failed to read cache: {}", e);
            return None;
        }
    };

    let entry: CacheEntry = match serde_json::from_str(&raw) {
        Ok(entry) => entry,
        Err(e) => {
            warn!("Discarding corrupt cache entry: {}", e);
            clear_cached(store);
            return None;
        }
    };

    // A timestamp ahead of `now_ms` is as untrustworthy as a stale one.
    let age = now_ms.saturating_sub(entry.timestamp);
    if (0..CACHE_TTL_MS).contains(&age) {
        debug!("Using cached data ({} repos)", entry.data.len());
        Some(entry.data)
    } else {
        debug!("Cache entry expired (age {} ms)", age);
        clear_cached(store);
        None
    }
}

/// Overwrite the cached dataset, stamped with `now_ms`
pub fn write_cached(
    store: &dyn CacheStore,
    data: &[RepositorySummary],
    now_ms: i64,
) -> Result<()> {
    let entry = CacheEntry {
        data: data.to_vec(),
        timestamp: now_ms,
    };
    store.set(CACHE_KEY, &serde_json::to_string(&entry)?)
}

pub fn clear_cached(store: &dyn CacheStore) {
    if let Err(e) = store.remove(CACHE_KEY) {
        warn!("Failed to clear cache: {}", e);
    }
}
