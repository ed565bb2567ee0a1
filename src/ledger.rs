// Ledger store - durable CRUD over the four category lists

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use tracing::warn;

use crate::record::{Category, NewRecord, Record, RecordPatch, StoredRecord};
use crate::storage::StorageBackend;

const THEME_KEY: &str = "theme";

// ============================================================================
// ID GENERATION
// ============================================================================

/// Source of record ids. Every call returns a value strictly greater than
/// any value it returned before.
pub trait IdSource {
    fn next_id(&self) -> i64;
}

/// Ids derived from the wall clock in milliseconds, with an atomic floor so
/// two adds inside the same millisecond still get distinct, increasing ids.
pub struct ClockIdSource {
    floor: AtomicI64,
}

impl ClockIdSource {
    pub fn new() -> Self {
        ClockIdSource {
            floor: AtomicI64::new(0),
        }
    }
}

impl Default for ClockIdSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for ClockIdSource {
    fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut last = self.floor.load(Ordering::SeqCst);
        loop {
            let candidate = now.max(last + 1);
            match self
                .floor
                .compare_exchange(last, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}

/// Deterministic 1, 2, 3, … ids for tests.
pub struct SequenceIdSource {
    next: AtomicI64,
}

impl SequenceIdSource {
    pub fn new() -> Self {
        SequenceIdSource {
            next: AtomicI64::new(1),
        }
    }
}

impl Default for SequenceIdSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for SequenceIdSource {
    fn next_id(&self) -> i64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

// ============================================================================
// THEME PREFERENCE
// ============================================================================

/// Display theme preference, stored alongside the category lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn from_stored(value: &str) -> Theme {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

// ============================================================================
// LEDGER STORE
// ============================================================================

/// CRUD over the four category lists, plus the theme preference.
///
/// Every mutating operation is a read-modify-write against the backend:
/// decode the stored list, change the in-memory copy, write the whole list
/// back. That is safe under the single-logical-writer assumption and is
/// the contract this store offers; there is no optimistic concurrency
/// control.
///
/// Failure semantics: persistence failures come back as `false`, never as
/// a panic or an `Err`; a malformed stored list decodes as empty.
pub struct LedgerStore<B, I = ClockIdSource> {
    backend: B,
    ids: I,
}

impl<B: StorageBackend> LedgerStore<B> {
    pub fn new(backend: B) -> Self {
        LedgerStore {
            backend,
            ids: ClockIdSource::new(),
        }
    }
}

impl<B: StorageBackend, I: IdSource> LedgerStore<B, I> {
    /// Build a store with an explicit id source (tests use the sequence
    /// source for deterministic ids).
    pub fn with_id_source(backend: B, ids: I) -> Self {
        LedgerStore { backend, ids }
    }

    /// Access the underlying backend, e.g. to hand it to an exporter.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Ensure all four category lists exist; absent ones become empty
    /// lists. Idempotent. Returns false only if the backend rejects a
    /// write.
    pub fn initialize(&self) -> bool {
        let mut ok = true;
        for category in Category::ALL {
            let key = category.storage_key();
            match self.backend.read(key) {
                Ok(Some(_)) => {}
                Ok(None) => ok &= self.write_raw(key, "[]"),
                Err(err) => {
                    warn!(key, error = %err, "failed to probe category list");
                    ok = false;
                }
            }
        }
        ok
    }

    /// Current list for a category. Absent or malformed stored data is an
    /// empty list, never an error.
    pub fn get(&self, category: Category) -> Vec<Record> {
        let key = category.storage_key();
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(key, error = %err, "failed to read category list");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<StoredRecord>>(&raw) {
            Ok(stored) => stored
                .into_iter()
                .map(|s| Record::from_stored(s, category))
                .collect(),
            Err(err) => {
                warn!(key, error = %err, "stored list is malformed, treating as empty");
                Vec::new()
            }
        }
    }

    /// Persist `records` as the full replacement list for a category.
    pub fn set(&self, category: Category, records: &[Record]) -> bool {
        let stored: Vec<StoredRecord> = records.iter().map(|r| r.to_stored(category)).collect();
        let json = match serde_json::to_string(&stored) {
            Ok(json) => json,
            Err(err) => {
                warn!(key = category.storage_key(), error = %err, "failed to encode category list");
                return false;
            }
        };
        self.write_raw(category.storage_key(), &json)
    }

    /// Assign a fresh id, append, persist.
    ///
    /// The id is strictly greater than every id this source handed out and
    /// every id already in the stored list, so data written by an earlier
    /// (or faster) clock cannot collide.
    pub fn add(&self, category: Category, new: NewRecord) -> bool {
        let mut records = self.get(category);

        let mut id = self.ids.next_id();
        if let Some(max) = records.iter().map(|r| r.id).max() {
            if id <= max {
                id = max + 1;
            }
        }

        records.push(new.into_record(id));
        self.set(category, &records)
    }

    /// Merge `patch` into the record with `id` and persist. Returns false
    /// without touching storage when the id is absent.
    pub fn update(&self, category: Category, id: i64, patch: &RecordPatch) -> bool {
        let mut records = self.get(category);

        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        patch.apply(record);

        self.set(category, &records)
    }

    /// Remove the record with `id` if present and persist the result.
    /// Deleting an id that is not there is a no-op success.
    pub fn delete(&self, category: Category, id: i64) -> bool {
        let mut records = self.get(category);
        records.retain(|r| r.id != id);
        self.set(category, &records)
    }

    /// Reset all four categories to empty lists. The theme preference is
    /// left alone.
    pub fn clear_all(&self) -> bool {
        let mut ok = true;
        for category in Category::ALL {
            ok &= self.write_raw(category.storage_key(), "[]");
        }
        ok
    }

    /// Stored display theme; light when absent or unrecognized.
    pub fn theme(&self) -> Theme {
        match self.backend.read(THEME_KEY) {
            Ok(Some(value)) => Theme::from_stored(&value),
            Ok(None) => Theme::Light,
            Err(err) => {
                warn!(error = %err, "failed to read theme preference");
                Theme::Light
            }
        }
    }

    pub fn set_theme(&self, theme: Theme) -> bool {
        self.write_raw(THEME_KEY, theme.as_str())
    }

    fn write_raw(&self, key: &str, value: &str) -> bool {
        match self.backend.write(key, value) {
            Ok(()) => true,
            Err(err) => {
                warn!(key, error = %err, "storage rejected the write");
                false
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
