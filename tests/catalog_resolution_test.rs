//! Catalog resolution against a file-backed SQLite store.

mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;

use codeforge_lib::commands::providers;
use codeforge_lib::db::{Database, DbError};
use codeforge_lib::model::registry::{CreateCustomModelParams, CreateCustomProviderParams};
use codeforge_lib::model::{CatalogResolver, ModelType, ProviderKind, SqliteCatalogStore};
use codeforge_lib::AppState;

use common::{file_backed_state, FlakyStore};

fn acme() -> CreateCustomProviderParams {
    CreateCustomProviderParams {
        id: "acme".to_string(),
        name: "Acme".to_string(),
        api_base_url: "https://llm.acme.test/v1".to_string(),
        env_var_name: Some("ACME_API_KEY".to_string()),
    }
}

fn model(provider_id: &str, api_name: &str) -> CreateCustomModelParams {
    CreateCustomModelParams {
        provider_id: provider_id.to_string(),
        api_name: api_name.to_string(),
        display_name: api_name.to_string(),
        description: None,
        max_output_tokens: None,
        context_window: None,
    }
}

#[tokio::test]
async fn fresh_store_resolves_hardcoded_catalog() {
    let (_dir, _db, state) = file_backed_state();

    let providers = providers::get_language_model_providers(&state).await.unwrap();
    assert_eq!(providers[0].id, "openai");
    assert_eq!(providers[0].kind, ProviderKind::Cloud);
    assert!(providers.iter().all(|p| p.kind != ProviderKind::Custom));

    let models = providers::get_language_models(&state, "openai".to_string())
        .await
        .unwrap();
    assert_eq!(models[0].api_name, "gpt-4.1");
    assert_eq!(models[0].model_type, ModelType::Cloud);
}

#[tokio::test]
async fn custom_entries_survive_reopen() {
    let (dir, db, state) = file_backed_state();
    providers::create_custom_language_model_provider(&state, acme())
        .await
        .unwrap();
    providers::create_custom_language_model(&state, model("custom::acme", "acme-large"))
        .await
        .unwrap();
    drop(state);
    drop(db);

    let reopened = Arc::new(Database::open(dir.path().join("codeforge.db")).unwrap());
    let state = AppState::new(reopened, Some(3));

    let providers = providers::get_language_model_providers(&state).await.unwrap();
    let last = providers.last().unwrap();
    assert_eq!(last.id, "custom::acme");
    assert_eq!(last.kind, ProviderKind::Custom);
    assert_eq!(last.has_free_tier, None);

    let models = providers::get_language_models(&state, "custom::acme".to_string())
        .await
        .unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].api_name, "acme-large");
    assert_eq!(models[0].model_type, ModelType::Custom);
}

#[tokio::test]
async fn aggregate_has_cloud_and_custom_keys_only() {
    let (_dir, _db, state) = file_backed_state();
    providers::create_custom_language_model_provider(&state, acme())
        .await
        .unwrap();

    let all = providers::get_language_models_by_providers(&state)
        .await
        .unwrap();
    let providers = providers::get_language_model_providers(&state).await.unwrap();

    let expected: Vec<&str> = providers
        .iter()
        .filter(|p| p.kind != ProviderKind::Local)
        .map(|p| p.id.as_str())
        .collect();
    let mut keys: Vec<&str> = all.keys().map(String::as_str).collect();
    let mut expected_sorted = expected.clone();
    keys.sort_unstable();
    expected_sorted.sort_unstable();
    assert_eq!(keys, expected_sorted);
    assert!(all["custom::acme"].is_empty());
}

#[tokio::test]
async fn failing_model_query_only_affects_its_provider() {
    let (_dir, db, state) = file_backed_state();
    providers::create_custom_language_model(&state, model("openai", "gpt-extra"))
        .await
        .unwrap();
    providers::create_custom_language_model(&state, model("anthropic", "claude-extra"))
        .await
        .unwrap();

    let flaky = FlakyStore::new(SqliteCatalogStore::new(db), &["openai"]);
    let resolver = CatalogResolver::new(Arc::new(flaky));

    let openai = resolver.resolve_models("openai").await.unwrap();
    assert!(openai.iter().all(|m| m.model_type == ModelType::Cloud));

    let anthropic = resolver.resolve_models("anthropic").await.unwrap();
    assert_eq!(anthropic.last().unwrap().api_name, "claude-extra");

    let all = resolver.resolve_all_models().await.unwrap();
    assert!(all["openai"].iter().all(|m| m.api_name != "gpt-extra"));
    assert_eq!(all["anthropic"].last().unwrap().api_name, "claude-extra");
}

#[tokio::test]
async fn hardcoded_model_name_cannot_be_added_twice() {
    let (_dir, _db, state) = file_backed_state();
    let err = providers::create_custom_language_model(&state, model("openai", "gpt-4.1"))
        .await
        .unwrap_err();
    assert!(matches!(err, codeforge_lib::AppError::Db(DbError::Conflict(_))), "{err}");

    let models = providers::get_language_models(&state, "openai".to_string())
        .await
        .unwrap();
    assert_eq!(models.iter().filter(|m| m.api_name == "gpt-4.1").count(), 1);
}
