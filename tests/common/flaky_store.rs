//! Store wrapper that fails custom-model lookups for selected providers.

use std::collections::HashSet;

use async_trait::async_trait;

use codeforge_lib::db::queries::{CustomModelRow, CustomProviderRow, ProviderColumn};
use codeforge_lib::db::DbError;
use codeforge_lib::model::{CatalogStore, SqliteCatalogStore};

pub struct FlakyStore {
    inner: SqliteCatalogStore,
    failing: HashSet<String>,
}

impl FlakyStore {
    pub fn new(inner: SqliteCatalogStore, failing: &[&str]) -> Self {
        Self {
            inner,
            failing: failing.iter().map(|id| id.to_string()).collect(),
        }
    }
}

#[async_trait]
impl CatalogStore for FlakyStore {
    async fn list_custom_providers(&self) -> Result<Vec<CustomProviderRow>, DbError> {
        self.inner.list_custom_providers().await
    }

    async fn list_custom_models(
        &self,
        column: ProviderColumn,
        provider_id: &str,
    ) -> Result<Vec<CustomModelRow>, DbError> {
        if self.failing.contains(provider_id) {
            return Err(DbError::Task(format!("simulated outage for {provider_id}")));
        }
        self.inner.list_custom_models(column, provider_id).await
    }
}
