//! Model entries and catalog errors.

use serde::Serialize;

use crate::db::queries::CustomModelRow;
use crate::db::DbError;

/// How a model entry was sourced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Cloud,
    Custom,
}

/// One selectable model offered by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Store row id; only custom models have one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Wire-level name passed to the provider's API. Unique within one provider.
    pub api_name: String,
    pub display_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_window: Option<u32>,
    #[serde(rename = "type")]
    pub model_type: ModelType,
}

impl From<CustomModelRow> for Model {
    fn from(row: CustomModelRow) -> Self {
        Self {
            id: Some(row.id),
            api_name: row.api_name,
            display_name: row.display_name,
            description: row.description.unwrap_or_default(),
            tag: None,
            max_output_tokens: row.max_output_tokens.and_then(|v| u32::try_from(v).ok()),
            context_window: row.context_window.and_then(|v| u32::try_from(v).ok()),
            model_type: ModelType::Custom,
        }
    }
}

/// Failures that abort a catalog resolution.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("custom provider store unavailable: {0}")]
    StoreUnavailable(#[source] DbError),
}
