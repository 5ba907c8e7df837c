// ABOUTME: Persistence layer for namerecords.
// ABOUTME: Wraps the SQLite namerecords table behind a small gateway type.

pub mod sqlite;

pub use sqlite::{NameRecordStore, StoreError};
