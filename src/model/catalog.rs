//! Static model catalog - compiled-in provider and model metadata.
//!
//! This is the single source of truth for:
//! - Known cloud providers, in the order the picker shows them
//! - Local runtimes (no catalog models, direct connections only)
//! - Hardcoded models per cloud provider, with token limits
//!
//! Lookups never fail; a missing key is `None` and the caller decides how to degrade.

use crate::model::provider::{Provider, ProviderKind};
use crate::model::types::{Model, ModelType};

/// Hardcoded model entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOption {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub tag: Option<&'static str>,
    pub max_output_tokens: Option<u32>,
    pub context_window: Option<u32>,
}

impl ModelOption {
    const fn new(name: &'static str, display_name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            display_name,
            description,
            tag: None,
            max_output_tokens: None,
            context_window: None,
        }
    }

    const fn tagged(self, tag: &'static str) -> Self {
        Self {
            tag: Some(tag),
            ..self
        }
    }

    const fn limits(self, max_output_tokens: u32, context_window: u32) -> Self {
        Self {
            max_output_tokens: Some(max_output_tokens),
            context_window: Some(context_window),
            ..self
        }
    }

    pub fn to_model(&self) -> Model {
        Model {
            id: None,
            api_name: self.name.to_string(),
            display_name: self.display_name.to_string(),
            description: self.description.to_string(),
            tag: self.tag.map(str::to_string),
            max_output_tokens: self.max_output_tokens,
            context_window: self.context_window,
            model_type: ModelType::Cloud,
        }
    }
}

/// Compiled-in cloud provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloudProviderInfo {
    pub id: &'static str,
    pub display_name: &'static str,
    pub has_free_tier: bool,
    pub website_url: &'static str,
    pub gateway_prefix: &'static str,
    pub env_var_name: Option<&'static str>,
}

/// Compiled-in local runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalProviderInfo {
    pub id: &'static str,
    pub display_name: &'static str,
    pub has_free_tier: bool,
}

const CLOUD_PROVIDERS: &[CloudProviderInfo] = &[
    CloudProviderInfo {
        id: "openai",
        display_name: "OpenAI",
        has_free_tier: false,
        website_url: "https://platform.openai.com/api-keys",
        gateway_prefix: "",
        env_var_name: Some("OPENAI_API_KEY"),
    },
    CloudProviderInfo {
        id: "anthropic",
        display_name: "Anthropic",
        has_free_tier: false,
        website_url: "https://console.anthropic.com/settings/keys",
        gateway_prefix: "anthropic/",
        env_var_name: Some("ANTHROPIC_API_KEY"),
    },
    CloudProviderInfo {
        id: "google",
        display_name: "Google",
        has_free_tier: true,
        website_url: "https://aistudio.google.com/app/apikey",
        gateway_prefix: "gemini/",
        env_var_name: Some("GEMINI_API_KEY"),
    },
    CloudProviderInfo {
        id: "openrouter",
        display_name: "OpenRouter",
        has_free_tier: true,
        website_url: "https://openrouter.ai/settings/keys",
        gateway_prefix: "openrouter/",
        env_var_name: Some("OPENROUTER_API_KEY"),
    },
    CloudProviderInfo {
        id: "pollination",
        display_name: "Pollination AI",
        has_free_tier: false,
        website_url: "https://pollinations.ai/",
        gateway_prefix: "",
        env_var_name: Some("POLLINATION_API_KEY"),
    },
    CloudProviderInfo {
        id: "auto",
        display_name: "Smart Auto",
        has_free_tier: true,
        website_url: "",
        gateway_prefix: "",
        env_var_name: None,
    },
];

const LOCAL_PROVIDERS: &[LocalProviderInfo] = &[
    LocalProviderInfo {
        id: "ollama",
        display_name: "Ollama",
        has_free_tier: true,
    },
    LocalProviderInfo {
        id: "lmstudio",
        display_name: "LM Studio",
        has_free_tier: true,
    },
];

/// Providers whose models accept a thinking budget.
const THINKING_PROVIDERS: &[&str] = &["google", "auto"];

// o3/o4 mini and the Claude Sonnets accept more output than listed here, but the
// output budget counts against the context window, so large prompts would fail.
const OPENAI_MODELS: &[ModelOption] = &[
    ModelOption::new("gpt-4.1", "GPT 4.1", "OpenAI's flagship model").limits(32_768, 1_047_576),
    ModelOption::new(
        "gpt-4.1-mini",
        "GPT 4.1 Mini",
        "OpenAI's lightweight, but intelligent model",
    )
    .limits(32_768, 1_047_576),
    ModelOption::new("o3-mini", "o3 mini", "Reasoning model").limits(32_000, 200_000),
    ModelOption::new("o4-mini", "o4 mini", "Reasoning model").limits(32_000, 200_000),
];

const ANTHROPIC_MODELS: &[ModelOption] = &[
    ModelOption::new("claude-sonnet-4-20250514", "Claude 4 Sonnet", "Excellent coder")
        .limits(16_000, 200_000),
    ModelOption::new("claude-3-7-sonnet-latest", "Claude 3.7 Sonnet", "Excellent coder")
        .limits(16_000, 200_000),
    ModelOption::new(
        "claude-3-5-sonnet-20241022",
        "Claude 3.5 Sonnet",
        "Good coder, excellent at following instructions",
    )
    .limits(8_000, 200_000),
    ModelOption::new("claude-3-5-haiku-20241022", "Claude 3.5 Haiku", "Lightweight coder")
        .limits(8_000, 200_000),
];

// Vertex treats the Gemini output limit as exclusive, hence the -1.
const GOOGLE_MODELS: &[ModelOption] = &[
    ModelOption::new("gemini-2.5-pro", "Gemini 2.5 Pro", "Google's Gemini 2.5 Pro model")
        .limits(65_536 - 1, 1_048_576),
    ModelOption::new(
        "gemini-2.5-flash",
        "Gemini 2.5 Flash",
        "Google's Gemini 2.5 Flash model (free tier available)",
    )
    .limits(65_536 - 1, 1_048_576),
];

const OPENROUTER_MODELS: &[ModelOption] = &[
    ModelOption::new(
        "deepseek/deepseek-chat-v3-0324:free",
        "DeepSeek v3 (free)",
        "Use for free (data may be used for training)",
    )
    .limits(32_000, 128_000),
    ModelOption::new("moonshotai/kimi-k2", "Kimi K2", "Powerful cost-effective model")
        .limits(32_000, 131_000),
    ModelOption::new(
        "deepseek/deepseek-r1-0528",
        "DeepSeek R1",
        "Good reasoning model with excellent price for performance",
    )
    .limits(32_000, 128_000),
];

const AUTO_MODELS: &[ModelOption] = &[ModelOption::new(
    "auto",
    "Smart Auto",
    "Automatically selects the best model for your task",
)
.tagged("Smart Auto")
.limits(32_000, 1_000_000)];

const POLLINATION_MODELS: &[ModelOption] = &[
    ModelOption::new(
        "bidara",
        "BIDARA - Biomimetic Designer by NASA",
        "BIDARA - Biomimetic Designer and Research Assistant by NASA",
    )
    .tagged("Vision"),
    ModelOption::new("deepseek", "DeepSeek-V3", "DeepSeek-V3"),
    ModelOption::new(
        "deepseek-reasoning",
        "DeepSeek R1-0528",
        "DeepSeek R1-0528 reasoning model",
    )
    .tagged("Reasoning"),
    ModelOption::new(
        "elixposearch",
        "ElixpoSearch",
        "ElixpoSearch - Custom search-enhanced AI model",
    ),
    ModelOption::new("evil", "Evil", "Uncensored model").tagged("Vision"),
    ModelOption::new(
        "grok",
        "xAi Grok-3 Mini",
        "xAi Grok-3 Mini model with tools support",
    )
    .tagged("Tools"),
    ModelOption::new(
        "hypnosis-tracy",
        "Hypnosis Tracy 7B",
        "Hypnosis Tracy 7B with audio support",
    )
    .tagged("Audio"),
    ModelOption::new("llamascout", "Llama 4 Scout 17B", "Llama 4 Scout 17B model"),
    ModelOption::new("midijourney", "Midijourney", "Midijourney with tools support")
        .tagged("Tools"),
    ModelOption::new(
        "mirexa",
        "Mirexa AI Companion",
        "Mirexa AI Companion (GPT-4.1) with vision",
    )
    .tagged("Vision"),
    ModelOption::new(
        "mistral",
        "Mistral Small 3.1 24B",
        "Mistral Small 3.1 24B with vision and tools",
    )
    .tagged("Vision"),
    ModelOption::new("openai", "GPT-4.1-mini", "GPT-4.1-mini with vision and tools")
        .tagged("Vision"),
    ModelOption::new(
        "openai-audio",
        "GPT-4o-audio-preview",
        "GPT-4o-audio-preview with audio support",
    )
    .tagged("Audio"),
    ModelOption::new("openai-fast", "GPT-4.1-nano", "Fast GPT-4.1-nano with vision")
        .tagged("Vision"),
    ModelOption::new("openai-large", "GPT-4.1", "GPT-4.1 with vision and tools").tagged("Vision"),
    ModelOption::new("openai-reasoning", "OpenAI O3", "OpenAI O3 reasoning model")
        .tagged("Reasoning"),
    ModelOption::new("phi", "Phi-4 Instruct", "Phi-4 Instruct with vision and audio")
        .tagged("Vision"),
    ModelOption::new(
        "qwen-coder",
        "Qwen 2.5 Coder 32B",
        "Qwen 2.5 Coder 32B with tools support",
    )
    .tagged("Tools"),
    ModelOption::new("rtist", "Rtist", "Rtist with tools support").tagged("Tools"),
];

const MODEL_OPTIONS: &[(&str, &[ModelOption])] = &[
    ("openai", OPENAI_MODELS),
    ("anthropic", ANTHROPIC_MODELS),
    ("google", GOOGLE_MODELS),
    ("openrouter", OPENROUTER_MODELS),
    ("auto", AUTO_MODELS),
    ("pollination", POLLINATION_MODELS),
];

/// Static provider/model catalog.
pub struct ModelCatalog;

impl ModelCatalog {
    pub fn cloud_providers() -> &'static [CloudProviderInfo] {
        CLOUD_PROVIDERS
    }

    pub fn local_providers() -> &'static [LocalProviderInfo] {
        LOCAL_PROVIDERS
    }

    /// Hardcoded models for a provider, `None` when the table has no entry for it.
    pub fn models_for(provider_id: &str) -> Option<&'static [ModelOption]> {
        MODEL_OPTIONS
            .iter()
            .find(|(id, _)| *id == provider_id)
            .map(|(_, models)| *models)
    }

    /// Hardcoded providers: cloud table in declaration order, then local table.
    pub fn hardcoded_providers() -> Vec<Provider> {
        let cloud = CLOUD_PROVIDERS.iter().map(|p| Provider {
            id: p.id.to_string(),
            name: p.display_name.to_string(),
            kind: ProviderKind::Cloud,
            has_free_tier: Some(p.has_free_tier),
            website_url: Some(p.website_url.to_string()),
            gateway_prefix: Some(p.gateway_prefix.to_string()),
            env_var_name: p.env_var_name.map(str::to_string),
            api_base_url: None,
        });
        let local = LOCAL_PROVIDERS.iter().map(|p| Provider {
            id: p.id.to_string(),
            name: p.display_name.to_string(),
            kind: ProviderKind::Local,
            has_free_tier: Some(p.has_free_tier),
            website_url: None,
            gateway_prefix: None,
            env_var_name: None,
            api_base_url: None,
        });
        cloud.chain(local).collect()
    }

    pub fn supports_thinking(provider_id: &str) -> bool {
        THINKING_PROVIDERS.contains(&provider_id)
    }
}
