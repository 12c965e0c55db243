use rusqlite::Connection;

use super::DbError;

struct Migration {
    version: i64,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: r#"
CREATE TABLE language_model_providers (
    id            TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    api_base_url  TEXT NOT NULL,
    env_var_name  TEXT,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

CREATE TABLE language_models (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    display_name        TEXT NOT NULL,
    api_name            TEXT NOT NULL,
    builtin_provider_id TEXT,
    custom_provider_id  TEXT REFERENCES language_model_providers(id) ON DELETE CASCADE,
    description         TEXT,
    max_output_tokens   INTEGER,
    context_window      INTEGER,
    created_at          TEXT NOT NULL,
    updated_at          TEXT NOT NULL
);
"#,
    },
    Migration {
        version: 2,
        sql: r#"
CREATE INDEX idx_language_models_builtin ON language_models(builtin_provider_id);
CREATE INDEX idx_language_models_custom ON language_models(custom_provider_id);
"#,
    },
    Migration {
        version: 3,
        sql: r#"
DELETE FROM language_models
WHERE id NOT IN (
    SELECT MIN(id) FROM language_models
    GROUP BY builtin_provider_id, custom_provider_id, api_name
);

CREATE UNIQUE INDEX idx_language_models_builtin_api_name
    ON language_models(builtin_provider_id, api_name)
    WHERE builtin_provider_id IS NOT NULL;
CREATE UNIQUE INDEX idx_language_models_custom_api_name
    ON language_models(custom_provider_id, api_name)
    WHERE custom_provider_id IS NOT NULL;
"#,
    },
];

/// Bring the schema up to the latest version, one transaction per migration.
pub(super) fn run_migrations(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL
        );",
    )?;

    let current: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM _migrations", [], |row| {
            row.get(0)
        })?;

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        tracing::info!(version = migration.version, "applying catalog store migration");

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(migration.sql)
            .map_err(|e| DbError::Migration(format!("v{}: {e}", migration.version)))?;
        tx.execute(
            "INSERT INTO _migrations (version, applied_at) VALUES (?1, ?2)",
            rusqlite::params![migration.version, chrono::Utc::now().to_rfc3339()],
        )?;
        tx.commit()?;
    }

    Ok(())
}
