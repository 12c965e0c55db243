//! Codeforge catalog backend library.
//!
//! Resolves the language model catalog the desktop app shows in its model picker
//! and hands to the request router. It handles:
//! - Compiled-in cloud and local providers and their models
//! - Custom providers and models persisted in SQLite
//! - Merging both into one ordered provider list and per-provider model lists
//!
//! # Architecture
//!
//! - `commands`: request/response entry points for the UI process
//! - `model`: static catalog, custom registry, resolver
//! - `db`: Database layer with SQLite

pub mod commands;
pub mod db;
pub mod model;

#[cfg(test)]
mod testing;

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use db::Database;
use model::{CatalogError, CatalogResolver, SqliteCatalogStore};

// ---------------------------------------------------------------------------
// Shared error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Db(#[from] db::DbError),
    #[error("{0}")]
    Catalog(#[from] CatalogError),
    #[error("{0}")]
    Other(String),
}

impl Serialize for AppError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

pub struct AppState {
    pub store: Arc<SqliteCatalogStore>,
    pub resolver: CatalogResolver,
}

impl AppState {
    pub fn new(db: Arc<Database>, max_concurrency: Option<usize>) -> Self {
        let store = Arc::new(SqliteCatalogStore::new(db));
        let resolver = CatalogResolver::new(store.clone()).with_max_concurrency(max_concurrency);
        Self { store, resolver }
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

pub fn codeforge_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var("CODEFORGE_DATA_DIR") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(app_data) = std::env::var("APPDATA") {
            return PathBuf::from(app_data).join("Codeforge");
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".codeforge");
    }

    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".codeforge");
    }

    PathBuf::from(".codeforge")
}

/// Database file inside the data directory, creating the directory if needed.
pub fn stable_db_path() -> Result<PathBuf, AppError> {
    let data_dir = codeforge_data_dir();
    std::fs::create_dir_all(&data_dir).map_err(|e| {
        AppError::Other(format!(
            "failed to create app data directory {}: {e}",
            data_dir.display()
        ))
    })?;
    Ok(data_dir.join("codeforge.db"))
}

/// `CODEFORGE_MAX_CONCURRENCY`, ignored when unset, blank, zero or unparsable.
pub fn max_concurrency_from_env() -> Option<usize> {
    let raw = std::env::var("CODEFORGE_MAX_CONCURRENCY").ok()?;
    match raw.trim().parse::<usize>() {
        Ok(0) => None,
        Ok(n) => Some(n),
        Err(e) => {
            tracing::warn!("ignoring CODEFORGE_MAX_CONCURRENCY={raw:?}: {e}");
            None
        }
    }
}

/// Install the global fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codeforge=debug,info".parse().expect("valid env filter")),
        )
        .with_writer(std::io::stderr)
        .init();
}
