use crate::model::catalog::ModelCatalog;
use crate::model::registry::{CreateCustomModelParams, CreateCustomProviderParams};
use crate::model::resolver::ModelsByProvider;
use crate::model::{Model, Provider};
use crate::{AppError, AppState};

pub async fn get_language_model_providers(state: &AppState) -> Result<Vec<Provider>, AppError> {
    Ok(state.resolver.resolve_providers().await?)
}

pub async fn get_language_models(
    state: &AppState,
    provider_id: String,
) -> Result<Vec<Model>, AppError> {
    Ok(state.resolver.resolve_models(provider_id.trim()).await?)
}

pub async fn get_language_models_by_providers(
    state: &AppState,
) -> Result<ModelsByProvider, AppError> {
    Ok(state.resolver.resolve_all_models().await?)
}

/// Whether requests to this provider may ask for extended reasoning output.
pub fn provider_supports_thinking(provider_id: String) -> bool {
    ModelCatalog::supports_thinking(provider_id.trim())
}

pub async fn create_custom_language_model_provider(
    state: &AppState,
    params: CreateCustomProviderParams,
) -> Result<Provider, AppError> {
    Ok(state.store.create_custom_provider(params).await?)
}

pub async fn delete_custom_language_model_provider(
    state: &AppState,
    provider_id: String,
) -> Result<(), AppError> {
    Ok(state.store.delete_custom_provider(&provider_id).await?)
}

pub async fn create_custom_language_model(
    state: &AppState,
    params: CreateCustomModelParams,
) -> Result<Model, AppError> {
    Ok(state.store.create_custom_model(params).await?)
}

pub async fn delete_custom_language_model(
    state: &AppState,
    provider_id: String,
    api_name: String,
) -> Result<(), AppError> {
    Ok(state
        .store
        .delete_custom_model(&provider_id, &api_name)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use std::sync::Arc;

    fn state() -> AppState {
        AppState::new(Arc::new(Database::open_in_memory().expect("in-memory DB")), None)
    }

    #[tokio::test]
    async fn create_then_resolve_custom_provider() {
        let state = state();
        let provider = create_custom_language_model_provider(
            &state,
            CreateCustomProviderParams {
                id: "acme".to_string(),
                name: "Acme".to_string(),
                api_base_url: "https://llm.acme.test/v1".to_string(),
                env_var_name: None,
            },
        )
        .await
        .unwrap();

        create_custom_language_model(
            &state,
            CreateCustomModelParams {
                provider_id: provider.id.clone(),
                api_name: "acme-large".to_string(),
                display_name: "Acme Large".to_string(),
                description: Some("House model".to_string()),
                max_output_tokens: None,
                context_window: Some(64_000),
            },
        )
        .await
        .unwrap();

        let providers = get_language_model_providers(&state).await.unwrap();
        assert_eq!(providers.last().unwrap().id, "custom::acme");

        let models = get_language_models(&state, "custom::acme".to_string())
            .await
            .unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].description, "House model");

        let all = get_language_models_by_providers(&state).await.unwrap();
        assert_eq!(all["custom::acme"], models);
    }

    #[test]
    fn thinking_support_follows_catalog() {
        assert!(provider_supports_thinking("google".to_string()));
        assert!(provider_supports_thinking(" auto ".to_string()));
        assert!(!provider_supports_thinking("openai".to_string()));
        assert!(!provider_supports_thinking("custom::acme".to_string()));
    }

    #[tokio::test]
    async fn delete_errors_serialize_as_messages() {
        let state = state();
        let err = delete_custom_language_model_provider(&state, "custom::nobody".to_string())
            .await
            .unwrap_err();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json, serde_json::json!("not found: custom provider custom::nobody"));
    }
}
