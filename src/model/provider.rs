//! Provider identity, kind tagging and the custom-provider id convention.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Prefix carried by every custom provider id. Never assigned to a hardcoded provider.
pub const CUSTOM_PROVIDER_PREFIX: &str = "custom::";

/// Whether `provider_id` names a custom provider (and so keys custom-provider model rows).
pub fn is_custom_provider(provider_id: &str) -> bool {
    provider_id.starts_with(CUSTOM_PROVIDER_PREFIX)
}

/// Canonical stored id for a user-supplied custom provider id.
pub fn custom_provider_id(raw: &str) -> String {
    let trimmed = raw.trim();
    if is_custom_provider(trimmed) {
        trimmed.to_string()
    } else {
        format!("{CUSTOM_PROVIDER_PREFIX}{trimmed}")
    }
}

/// Where a provider comes from. A provider is exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Cloud,
    Local,
    Custom,
}

impl ProviderKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Cloud => "cloud",
            ProviderKind::Local => "local",
            ProviderKind::Custom => "custom",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cloud" => Ok(ProviderKind::Cloud),
            "local" => Ok(ProviderKind::Local),
            "custom" => Ok(ProviderKind::Custom),
            _ => Err(format!("unknown provider kind: {}", s)),
        }
    }
}

impl serde::Serialize for ProviderKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for ProviderKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ProviderKind::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// One source of language models in the resolved catalog.
///
/// Optional attributes stay `None` when the source does not know them, so
/// "unknown" is distinguishable from an explicit `false` or empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ProviderKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_free_tier: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_var_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
}

impl Provider {
    pub fn is_local(&self) -> bool {
        self.kind == ProviderKind::Local
    }
}
