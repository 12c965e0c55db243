//! Language model provider and model catalog.
//!
//! ## Structure
//!
//! - `provider`: Provider type, kind tagging, custom id prefix
//! - `types`: Model entries and catalog errors
//! - `catalog`: Compiled-in providers and models
//! - `registry`: Custom providers/models from the persistent store
//! - `resolver`: Merge of static and custom entries, per provider and in aggregate

pub mod catalog;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod types;

// Re-export commonly used types
pub use catalog::ModelCatalog;
pub use provider::{is_custom_provider, Provider, ProviderKind, CUSTOM_PROVIDER_PREFIX};
pub use registry::{CatalogStore, SqliteCatalogStore};
pub use resolver::{CatalogResolver, ModelsByProvider};
pub use types::{CatalogError, Model, ModelType};
