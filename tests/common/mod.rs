//! Common helpers for catalog integration tests.

#![allow(dead_code)]

pub mod flaky_store;

use std::sync::Arc;

use codeforge_lib::db::Database;
use codeforge_lib::AppState;
use tempfile::TempDir;

pub use flaky_store::FlakyStore;

/// File-backed application state in a fresh temp directory.
/// Keep the returned `TempDir` alive for the duration of the test.
pub fn file_backed_state() -> (TempDir, Arc<Database>, AppState) {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = Arc::new(Database::open(dir.path().join("codeforge.db")).expect("open database"));
    let state = AppState::new(db.clone(), None);
    (dir, db, state)
}
