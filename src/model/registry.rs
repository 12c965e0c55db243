//! Custom registry - user-defined providers and models held in the persistent store.
//!
//! The read side feeds catalog resolution; the write side backs the settings
//! screens that add and remove custom entries.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

use crate::db::queries::{self, CustomModelRow, CustomProviderRow, NewCustomModelRow, ProviderColumn};
use crate::db::{Database, DbError};
use crate::model::catalog::ModelCatalog;
use crate::model::provider::{
    custom_provider_id, is_custom_provider, Provider, ProviderKind, CUSTOM_PROVIDER_PREFIX,
};
use crate::model::types::{CatalogError, Model};

/// Read queries the resolver issues against the persistent store.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every custom provider row, in store order.
    async fn list_custom_providers(&self) -> Result<Vec<CustomProviderRow>, DbError>;

    /// Custom model rows attached to `provider_id` through `column`.
    async fn list_custom_models(
        &self,
        column: ProviderColumn,
        provider_id: &str,
    ) -> Result<Vec<CustomModelRow>, DbError>;
}

/// Which column a provider id keys custom model rows by.
pub fn provider_column(provider_id: &str) -> ProviderColumn {
    if is_custom_provider(provider_id) {
        ProviderColumn::Custom
    } else {
        ProviderColumn::Builtin
    }
}

impl From<CustomProviderRow> for Provider {
    fn from(row: CustomProviderRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            kind: ProviderKind::Custom,
            has_free_tier: None,
            website_url: None,
            gateway_prefix: None,
            env_var_name: row.env_var_name,
            api_base_url: Some(row.api_base_url),
        }
    }
}

/// Read every custom provider. A store failure is fatal to the caller.
pub async fn list_custom_providers(store: &dyn CatalogStore) -> Result<Vec<Provider>, CatalogError> {
    let rows = store
        .list_custom_providers()
        .await
        .map_err(CatalogError::StoreUnavailable)?;
    Ok(rows.into_iter().map(Provider::from).collect())
}

/// Read custom models for one provider. Store failures are logged and yield no models.
pub async fn list_custom_models(store: &dyn CatalogStore, provider_id: &str) -> Vec<Model> {
    match store
        .list_custom_models(provider_column(provider_id), provider_id)
        .await
    {
        Ok(rows) => rows.into_iter().map(Model::from).collect(),
        Err(e) => {
            tracing::error!(
                provider_id,
                "error fetching custom models for provider from store: {e}"
            );
            Vec::new()
        }
    }
}

// ---------------------------------------------------------------------------
// SQLite-backed store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomProviderParams {
    pub id: String,
    pub name: String,
    pub api_base_url: String,
    pub env_var_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomModelParams {
    pub provider_id: String,
    pub api_name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub max_output_tokens: Option<u32>,
    pub context_window: Option<u32>,
}

/// Catalog store over the application database. Queries run on the blocking pool.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    db: Arc<Database>,
}

impl SqliteCatalogStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T, DbError>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T, DbError> + Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(|e| DbError::Task(e.to_string()))?
    }

    pub async fn create_custom_provider(
        &self,
        params: CreateCustomProviderParams,
    ) -> Result<Provider, DbError> {
        let name = required("name", &params.name)?;
        let api_base_url = required("api base url", &params.api_base_url)?;
        let id = custom_provider_id(&params.id);
        required("id", &id[CUSTOM_PROVIDER_PREFIX.len()..])?;
        let env_var_name = params
            .env_var_name
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let row = self
            .blocking(move |db| {
                if queries::get_custom_provider(db, &id)?.is_some() {
                    return Err(DbError::Conflict(format!("custom provider {id}")));
                }
                let now = Utc::now().to_rfc3339();
                let row = CustomProviderRow {
                    id,
                    name,
                    api_base_url,
                    env_var_name,
                    created_at: now.clone(),
                    updated_at: now,
                };
                queries::insert_custom_provider(db, &row)?;
                Ok(row)
            })
            .await?;

        tracing::info!(provider_id = %row.id, "created custom provider");
        Ok(Provider::from(row))
    }

    pub async fn delete_custom_provider(&self, provider_id: &str) -> Result<(), DbError> {
        let id = custom_provider_id(provider_id);
        let removed = self
            .blocking({
                let id = id.clone();
                move |db| queries::delete_custom_provider(db, &id)
            })
            .await?;
        if removed == 0 {
            return Err(DbError::NotFound(format!("custom provider {id}")));
        }
        tracing::info!(provider_id = %id, "deleted custom provider");
        Ok(())
    }

    pub async fn create_custom_model(&self, params: CreateCustomModelParams) -> Result<Model, DbError> {
        let provider_id = required("provider id", &params.provider_id)?;
        let api_name = required("api name", &params.api_name)?;
        let display_name = required("display name", &params.display_name)?;
        let column = provider_column(&provider_id);

        if column == ProviderColumn::Builtin
            && !ModelCatalog::hardcoded_providers()
                .iter()
                .any(|p| p.id == provider_id)
        {
            return Err(DbError::NotFound(format!("builtin provider {provider_id}")));
        }

        if column == ProviderColumn::Builtin
            && ModelCatalog::models_for(&provider_id)
                .is_some_and(|models| models.iter().any(|m| m.name == api_name))
        {
            return Err(DbError::Conflict(format!(
                "model {api_name} is built into provider {provider_id}"
            )));
        }

        let new_row = NewCustomModelRow {
            display_name,
            api_name,
            builtin_provider_id: (column == ProviderColumn::Builtin).then(|| provider_id.clone()),
            custom_provider_id: (column == ProviderColumn::Custom).then(|| provider_id.clone()),
            description: params
                .description
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            max_output_tokens: params.max_output_tokens.map(i64::from),
            context_window: params.context_window.map(i64::from),
            created_at: Utc::now().to_rfc3339(),
        };

        let row = self
            .blocking(move |db| {
                if column == ProviderColumn::Custom
                    && queries::get_custom_provider(db, &provider_id)?.is_none()
                {
                    return Err(DbError::NotFound(format!("custom provider {provider_id}")));
                }
                queries::insert_custom_model(db, &new_row)
            })
            .await?;

        tracing::info!(model_id = row.id, api_name = %row.api_name, "created custom model");
        Ok(Model::from(row))
    }

    pub async fn delete_custom_model(&self, provider_id: &str, api_name: &str) -> Result<(), DbError> {
        let provider_id = provider_id.trim().to_string();
        let api_name = api_name.trim().to_string();
        let column = provider_column(&provider_id);
        let removed = self
            .blocking({
                let (provider_id, api_name) = (provider_id.clone(), api_name.clone());
                move |db| queries::delete_custom_model(db, column, &provider_id, &api_name)
            })
            .await?;
        if removed == 0 {
            return Err(DbError::NotFound(format!(
                "model {api_name} for provider {provider_id}"
            )));
        }
        Ok(())
    }
}

fn required(field: &str, value: &str) -> Result<String, DbError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DbError::Invalid(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn list_custom_providers(&self) -> Result<Vec<CustomProviderRow>, DbError> {
        self.blocking(queries::list_custom_providers).await
    }

    async fn list_custom_models(
        &self,
        column: ProviderColumn,
        provider_id: &str,
    ) -> Result<Vec<CustomModelRow>, DbError> {
        let provider_id = provider_id.to_string();
        self.blocking(move |db| queries::list_custom_models(db, column, &provider_id))
            .await
    }
}
