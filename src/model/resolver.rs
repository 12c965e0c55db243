//! Catalog resolution: merges the static catalog with the custom registry.
//!
//! Nothing is cached between calls. Every resolution re-reads the store, so the
//! result always reflects the current registry contents.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::model::catalog::{ModelCatalog, ModelOption};
use crate::model::provider::{Provider, ProviderKind};
use crate::model::registry::{self, CatalogStore};
use crate::model::types::{CatalogError, Model};

/// Models grouped by provider id. Key order carries no meaning.
pub type ModelsByProvider = HashMap<String, Vec<Model>>;

#[derive(Clone)]
pub struct CatalogResolver {
    store: Arc<dyn CatalogStore>,
    max_concurrency: Option<usize>,
}

impl CatalogResolver {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            max_concurrency: None,
        }
    }

    /// Cap the number of provider resolutions in flight during `resolve_all_models`.
    /// `None` or zero leaves the fan-out unbounded.
    pub fn with_max_concurrency(mut self, limit: Option<usize>) -> Self {
        self.max_concurrency = limit.filter(|n| *n > 0);
        self
    }

    /// Hardcoded providers (cloud, then local) followed by custom providers.
    ///
    /// Custom rows are keyed by id; a repeated id keeps its first position and takes
    /// the later row's values. A custom id equal to a hardcoded id is not merged:
    /// both entries are emitted.
    pub async fn resolve_providers(&self) -> Result<Vec<Provider>, CatalogError> {
        let mut providers = ModelCatalog::hardcoded_providers();
        let custom = registry::list_custom_providers(self.store.as_ref()).await?;

        let mut merged: Vec<Provider> = Vec::with_capacity(custom.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(custom.len());
        for provider in custom {
            match index.get(&provider.id) {
                Some(&slot) => merged[slot] = provider,
                None => {
                    index.insert(provider.id.clone(), merged.len());
                    merged.push(provider);
                }
            }
        }

        for provider in &merged {
            if providers.iter().any(|p| p.id == provider.id) {
                // TODO: decide whether a custom provider may shadow a hardcoded one; the
                // picker currently shows both entries.
                tracing::warn!(provider_id = %provider.id, "custom provider id collides with a hardcoded provider");
            }
        }

        providers.extend(merged);
        Ok(providers)
    }

    /// Hardcoded models (cloud providers only) followed by custom models for one provider.
    ///
    /// An unknown provider yields an empty list. Only a failure to list providers
    /// is returned as an error.
    pub async fn resolve_models(&self, provider_id: &str) -> Result<Vec<Model>, CatalogError> {
        let providers = self.resolve_providers().await?;
        let Some(provider) = providers.iter().find(|p| p.id == provider_id) else {
            tracing::warn!(provider_id, "provider not found");
            return Ok(Vec::new());
        };

        let custom = registry::list_custom_models(self.store.as_ref(), provider_id).await;
        let table: Option<&'static [ModelOption]> = match provider.kind {
            ProviderKind::Cloud => ModelCatalog::models_for(provider_id),
            ProviderKind::Local | ProviderKind::Custom => Some(&[]),
        };
        Ok(merge_models(provider_id, table, custom))
    }

    /// Models for every non-local provider, resolved concurrently.
    pub async fn resolve_all_models(&self) -> Result<ModelsByProvider, CatalogError> {
        let ids: Vec<String> = self
            .resolve_providers()
            .await?
            .into_iter()
            .filter(|p| !p.is_local())
            .map(|p| p.id)
            .collect();

        let resolve = move |id: String| async move {
            let models = self.resolve_models(&id).await;
            (id, models)
        };

        let results = match self.max_concurrency {
            None => futures::future::join_all(ids.into_iter().map(resolve)).await,
            Some(limit) => {
                stream::iter(ids)
                    .map(resolve)
                    .buffer_unordered(limit)
                    .collect::<Vec<_>>()
                    .await
            }
        };

        let mut by_provider = ModelsByProvider::with_capacity(results.len());
        for (id, models) in results {
            by_provider.insert(id, models?);
        }
        tracing::debug!(providers = by_provider.len(), "resolved model catalog");
        Ok(by_provider)
    }
}

/// Hardcoded models from `table` followed by `custom`. A missing table means the
/// catalog has drifted from its provider list; custom models are still returned.
fn merge_models(
    provider_id: &str,
    table: Option<&'static [ModelOption]>,
    custom: Vec<Model>,
) -> Vec<Model> {
    let Some(options) = table else {
        tracing::warn!(
            provider_id,
            "provider is cloud type but has no hardcoded model table"
        );
        return custom;
    };
    let mut models: Vec<Model> = options.iter().map(ModelOption::to_model).collect();
    models.extend(custom);
    models
}
