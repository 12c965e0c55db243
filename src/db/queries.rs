use rusqlite::{params, OptionalExtension, Row};
use serde::Serialize;

use super::{Database, DbError};

// ---------------------------------------------------------------------------
// Row types: flat structs that map directly to table columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomProviderRow {
    pub id: String,
    pub name: String,
    pub api_base_url: String,
    pub env_var_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomModelRow {
    pub id: i64,
    pub display_name: String,
    pub api_name: String,
    pub builtin_provider_id: Option<String>,
    pub custom_provider_id: Option<String>,
    pub description: Option<String>,
    pub max_output_tokens: Option<i64>,
    pub context_window: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

/// Insert payload for `language_models`; the row id is assigned by SQLite.
#[derive(Debug, Clone)]
pub struct NewCustomModelRow {
    pub display_name: String,
    pub api_name: String,
    pub builtin_provider_id: Option<String>,
    pub custom_provider_id: Option<String>,
    pub description: Option<String>,
    pub max_output_tokens: Option<i64>,
    pub context_window: Option<i64>,
    pub created_at: String,
}

/// Which foreign key column of `language_models` a provider id is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderColumn {
    Builtin,
    Custom,
}

impl ProviderColumn {
    const fn as_column(self) -> &'static str {
        match self {
            ProviderColumn::Builtin => "builtin_provider_id",
            ProviderColumn::Custom => "custom_provider_id",
        }
    }
}

const PROVIDER_COLUMNS: &str = "id, name, api_base_url, env_var_name, created_at, updated_at";

const MODEL_COLUMNS: &str = "id, display_name, api_name, builtin_provider_id, custom_provider_id, \
     description, max_output_tokens, context_window, created_at, updated_at";

fn provider_from_row(row: &Row<'_>) -> rusqlite::Result<CustomProviderRow> {
    Ok(CustomProviderRow {
        id: row.get(0)?,
        name: row.get(1)?,
        api_base_url: row.get(2)?,
        env_var_name: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn model_from_row(row: &Row<'_>) -> rusqlite::Result<CustomModelRow> {
    Ok(CustomModelRow {
        id: row.get(0)?,
        display_name: row.get(1)?,
        api_name: row.get(2)?,
        builtin_provider_id: row.get(3)?,
        custom_provider_id: row.get(4)?,
        description: row.get(5)?,
        max_output_tokens: row.get(6)?,
        context_window: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

// ---------------------------------------------------------------------------
// Custom provider queries
// ---------------------------------------------------------------------------

/// All custom providers in insertion order.
pub fn list_custom_providers(db: &Database) -> Result<Vec<CustomProviderRow>, DbError> {
    let conn = db.conn();
    let mut stmt = conn.prepare(&format!(
        "SELECT {PROVIDER_COLUMNS} FROM language_model_providers ORDER BY rowid ASC"
    ))?;
    let rows = stmt
        .query_map([], provider_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn get_custom_provider(db: &Database, id: &str) -> Result<Option<CustomProviderRow>, DbError> {
    let conn = db.conn();
    let row = conn
        .query_row(
            &format!("SELECT {PROVIDER_COLUMNS} FROM language_model_providers WHERE id = ?1"),
            params![id],
            provider_from_row,
        )
        .optional()?;
    Ok(row)
}

pub fn insert_custom_provider(db: &Database, row: &CustomProviderRow) -> Result<(), DbError> {
    let conn = db.conn();
    conn.execute(
        "INSERT INTO language_model_providers (id, name, api_base_url, env_var_name, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            row.id,
            row.name,
            row.api_base_url,
            row.env_var_name,
            row.created_at,
            row.updated_at
        ],
    )?;
    Ok(())
}

/// Delete a custom provider; attached models go with it through the cascade.
/// Returns the number of provider rows removed.
pub fn delete_custom_provider(db: &Database, id: &str) -> Result<usize, DbError> {
    let conn = db.conn();
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "DELETE FROM language_models WHERE custom_provider_id = ?1",
        params![id],
    )?;
    let removed = tx.execute(
        "DELETE FROM language_model_providers WHERE id = ?1",
        params![id],
    )?;
    tx.commit()?;
    Ok(removed)
}

// ---------------------------------------------------------------------------
// Custom model queries
// ---------------------------------------------------------------------------

/// Custom models attached to `provider_id` through the given column, in insertion order.
pub fn list_custom_models(
    db: &Database,
    column: ProviderColumn,
    provider_id: &str,
) -> Result<Vec<CustomModelRow>, DbError> {
    let conn = db.conn();
    let mut stmt = conn.prepare(&format!(
        "SELECT {MODEL_COLUMNS} FROM language_models WHERE {} = ?1 ORDER BY id ASC",
        column.as_column()
    ))?;
    let rows = stmt
        .query_map(params![provider_id], model_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Insert a custom model and return the stored row. An api name already attached to
/// the same provider is a `Conflict`.
pub fn insert_custom_model(
    db: &Database,
    row: &NewCustomModelRow,
) -> Result<CustomModelRow, DbError> {
    let conn = db.conn();
    let inserted = conn.execute(
        "INSERT INTO language_models (display_name, api_name, builtin_provider_id, custom_provider_id, description, max_output_tokens, context_window, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
        params![
            row.display_name,
            row.api_name,
            row.builtin_provider_id,
            row.custom_provider_id,
            row.description,
            row.max_output_tokens,
            row.context_window,
            row.created_at
        ],
    );
    match inserted {
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            let provider_id = row
                .builtin_provider_id
                .as_deref()
                .or(row.custom_provider_id.as_deref())
                .unwrap_or_default();
            return Err(DbError::Conflict(format!(
                "model {} for provider {provider_id}",
                row.api_name
            )));
        }
        other => {
            other?;
        }
    }
    let id = conn.last_insert_rowid();
    Ok(CustomModelRow {
        id,
        display_name: row.display_name.clone(),
        api_name: row.api_name.clone(),
        builtin_provider_id: row.builtin_provider_id.clone(),
        custom_provider_id: row.custom_provider_id.clone(),
        description: row.description.clone(),
        max_output_tokens: row.max_output_tokens,
        context_window: row.context_window,
        created_at: row.created_at.clone(),
        updated_at: row.created_at.clone(),
    })
}

pub fn delete_custom_model(
    db: &Database,
    column: ProviderColumn,
    provider_id: &str,
    api_name: &str,
) -> Result<usize, DbError> {
    let conn = db.conn();
    let removed = conn.execute(
        &format!(
            "DELETE FROM language_models WHERE {} = ?1 AND api_name = ?2",
            column.as_column()
        ),
        params![provider_id, api_name],
    )?;
    Ok(removed)
}
