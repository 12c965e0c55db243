//! In-process catalog store for resolver tests.
//!
//! Serves fixed rows and fails on demand, so failure isolation can be tested
//! without a broken SQLite file.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::db::queries::{CustomModelRow, CustomProviderRow, ProviderColumn};
use crate::db::DbError;
use crate::model::registry::CatalogStore;

const TIMESTAMP: &str = "2025-01-01T00:00:00+00:00";

#[derive(Clone, Default)]
pub(crate) struct FakeStore {
    providers: Vec<CustomProviderRow>,
    models: Vec<CustomModelRow>,
    fail_providers: bool,
    failing_model_queries: HashSet<String>,
}

impl FakeStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_provider(mut self, row: CustomProviderRow) -> Self {
        self.providers.push(row);
        self
    }

    pub(crate) fn with_model(mut self, row: CustomModelRow) -> Self {
        self.models.push(row);
        self
    }

    /// Make `list_custom_providers` return an error.
    pub(crate) fn fail_providers(mut self) -> Self {
        self.fail_providers = true;
        self
    }

    /// Make custom-model lookups for `provider_id` return an error.
    pub(crate) fn fail_models_for(mut self, provider_id: &str) -> Self {
        self.failing_model_queries.insert(provider_id.to_string());
        self
    }
}

#[async_trait]
impl CatalogStore for FakeStore {
    async fn list_custom_providers(&self) -> Result<Vec<CustomProviderRow>, DbError> {
        tokio::task::yield_now().await;
        if self.fail_providers {
            return Err(DbError::Task("store offline".to_string()));
        }
        Ok(self.providers.clone())
    }

    async fn list_custom_models(
        &self,
        column: ProviderColumn,
        provider_id: &str,
    ) -> Result<Vec<CustomModelRow>, DbError> {
        tokio::task::yield_now().await;
        if self.failing_model_queries.contains(provider_id) {
            return Err(DbError::Task(format!("injected failure for {provider_id}")));
        }
        Ok(self
            .models
            .iter()
            .filter(|m| {
                let key = match column {
                    ProviderColumn::Builtin => m.builtin_provider_id.as_deref(),
                    ProviderColumn::Custom => m.custom_provider_id.as_deref(),
                };
                key == Some(provider_id)
            })
            .cloned()
            .collect())
    }
}

pub(crate) fn custom_provider_row(id: &str, name: &str) -> CustomProviderRow {
    CustomProviderRow {
        id: id.to_string(),
        name: name.to_string(),
        api_base_url: format!("https://{}.example.test/v1", name.to_lowercase().replace(' ', "-")),
        env_var_name: None,
        created_at: TIMESTAMP.to_string(),
        updated_at: TIMESTAMP.to_string(),
    }
}

pub(crate) fn custom_model_row(
    id: i64,
    column: ProviderColumn,
    provider_id: &str,
    api_name: &str,
) -> CustomModelRow {
    CustomModelRow {
        id,
        display_name: api_name.to_string(),
        api_name: api_name.to_string(),
        builtin_provider_id: (column == ProviderColumn::Builtin).then(|| provider_id.to_string()),
        custom_provider_id: (column == ProviderColumn::Custom).then(|| provider_id.to_string()),
        description: None,
        max_output_tokens: None,
        context_window: Some(128_000),
        created_at: TIMESTAMP.to_string(),
        updated_at: TIMESTAMP.to_string(),
    }
}
