// Storage port - the key-value substrate behind the ledger

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("quota exceeded: {needed} bytes needed, {quota} available")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("{0}")]
    Other(String),
}

/// Port over the persistent key-value substrate.
///
/// Each key holds an opaque string (in practice a JSON-encoded list or a
/// preference value). Implementations synchronize internally; the ledger
/// assumes a single logical writer and does read-modify-write on top.
pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// ============================================================================
// IN-MEMORY BACKEND
// ============================================================================

/// Volatile backend over a locked map. The default substrate for tests and
/// the stand-in for a browser profile's local storage.
///
/// An optional byte quota makes the backend reject writes once the stored
/// keys and values would exceed it, mirroring a full local-storage quota.
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend {
            entries: RwLock::new(HashMap::new()),
            quota_bytes: None,
        }
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        MemoryBackend {
            entries: RwLock::new(HashMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn used_bytes(entries: &HashMap<String, String>) -> usize {
        entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().unwrap();
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap();

        if let Some(quota) = self.quota_bytes {
            let replaced = entries.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let needed = Self::used_bytes(&entries) - replaced + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap();
        entries.remove(key);
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
