//! Key/value persistence for JSON-serialized client state.
//!
//! String values under string keys, with synchronous reads and writes.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex as StdMutex;
use tracing::warn;

pub trait Storage: Send + Sync {
  fn get_item(&self, key: &str) -> Option<String>;
  fn set_item(&self, key: &str, value: &str) -> Result<()>;
  fn remove_item(&self, key: &str) -> Result<()>;
}

/// Serialize `value` and store it, logging instead of failing.
pub fn persist_json<T: serde::Serialize + ?Sized>(storage: &dyn Storage, key: &str, value: &T) {
  let result = serde_json::to_string(value)
    .with_context(|| format!("Failed to serialize {}", key))
    .and_then(|json| storage.set_item(key, &json));
  if let Err(e) = result {
    warn!(key, err = %format!("{:#}", e), "storage: write failed");
  }
}

/// Remove a key, logging instead of failing.
pub fn discard(storage: &dyn Storage, key: &str) {
  if let Err(e) = storage.remove_item(key) {
    warn!(key, err = %format!("{:#}", e), "storage: remove failed");
  }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
  dir: PathBuf,
}

impl FileStorage {
  pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
    let dir = dir.into();
    std::fs::create_dir_all(&dir).with_context(|| format!("Failed to create data directory {}", dir.display()))?;
    Ok(Self { dir })
  }

  fn path_for(&self, key: &str) -> PathBuf {
    self.dir.join(format!("{}.json", key))
  }
}

impl Storage for FileStorage {
  fn get_item(&self, key: &str) -> Option<String> {
    std::fs::read_to_string(self.path_for(key)).ok()
  }

  fn set_item(&self, key: &str, value: &str) -> Result<()> {
    let path = self.path_for(key);
    // Write to a temp file, then rename (atomic)
    let tmp_path = path.with_extension("json.part");
    std::fs::write(&tmp_path, value).with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, &path).with_context(|| format!("Failed to finalize {}", path.display()))?;
    Ok(())
  }

  fn remove_item(&self, key: &str) -> Result<()> {
    match std::fs::remove_file(self.path_for(key)) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(anyhow::Error::new(e).context(format!("Failed to remove {}", key))),
    }
  }
}

/// Process-local storage, used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
  items: StdMutex<HashMap<String, String>>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn contains(&self, key: &str) -> bool {
    self.items.lock().is_ok_and(|items| items.contains_key(key))
  }
}

impl Storage for MemoryStorage {
  fn get_item(&self, key: &str) -> Option<String> {
    self.items.lock().ok()?.get(key).cloned()
  }

  fn set_item(&self, key: &str, value: &str) -> Result<()> {
    let mut items = self.items.lock().map_err(|_| anyhow::anyhow!("memory storage lock poisoned"))?;
    items.insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove_item(&self, key: &str) -> Result<()> {
    let mut items = self.items.lock().map_err(|_| anyhow::anyhow!("memory storage lock poisoned"))?;
    items.remove(key);
    Ok(())
  }
}
