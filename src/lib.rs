// Lotto Ledger - Core Library
// Bookkeeping ledger for a single-user shop: categorized records, key-value
// persistence, derived net-profit reports, CSV/clipboard export.

pub mod db;
pub mod export;
pub mod ledger;
pub mod record;
pub mod report;
pub mod storage;
pub mod validate;

// Re-export commonly used types
pub use db::SqliteBackend;
pub use export::{csv_file_name, to_clipboard_text, to_csv};
pub use ledger::{ClockIdSource, IdSource, LedgerStore, SequenceIdSource, Theme};
pub use record::{Category, NewRecord, Record, RecordPatch};
pub use report::{Outcome, Report};
pub use storage::{MemoryBackend, StorageBackend, StorageError};
pub use validate::{ValidationError, MIN_AMOUNT, MIN_SUBJECT_LEN};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
