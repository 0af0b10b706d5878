use std::time::Duration;

use crate::config::{ConfigError, non_empty_env, parse_env};

/// Default chat model (xAI naming; `grok*` also routes genai to its xAI adapter).
pub const DEFAULT_ORACLE_MODEL: &str = "grok-4-1-fast";
/// Default OpenAI-compatible endpoint root.
pub const DEFAULT_ORACLE_BASE_URL: &str = "https://api.x.ai/v1";
/// Default per-call timeout.
pub const DEFAULT_ORACLE_TIMEOUT_SECS: u64 = 5 * 60;
/// Number of recent content samples included per profile in a prompt.
pub const DEFAULT_MAX_CONTENT_ITEMS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Transport used to reach the text-generation service.
pub enum OracleProvider {
    #[default]
    /// Direct `POST {base_url}/chat/completions` via reqwest.
    Http,
    /// Multi-provider client (`genai`), keyed by model name.
    Genai,
}

impl std::str::FromStr for OracleProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" | "openai" | "xai" => Ok(Self::Http),
            "genai" => Ok(Self::Genai),
            _ => Err(format!("Unknown oracle provider: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
/// Oracle client configuration.
pub struct OracleConfig {
    pub provider: OracleProvider,
    pub model: String,
    pub base_url: String,
    /// Bearer token for the HTTP provider. genai reads its own provider env vars.
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub max_content_items: usize,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            provider: OracleProvider::default(),
            model: DEFAULT_ORACLE_MODEL.to_string(),
            base_url: DEFAULT_ORACLE_BASE_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_ORACLE_TIMEOUT_SECS),
            max_content_items: DEFAULT_MAX_CONTENT_ITEMS,
        }
    }
}

impl OracleConfig {
    pub(crate) const ENV_PROVIDER: &'static str = "AFFINITY_ORACLE_PROVIDER";
    pub(crate) const ENV_MODEL: &'static str = "AFFINITY_ORACLE_MODEL";
    pub(crate) const ENV_BASE_URL: &'static str = "AFFINITY_ORACLE_BASE_URL";
    pub(crate) const ENV_API_KEY: &'static str = "AFFINITY_ORACLE_API_KEY";
    pub(crate) const ENV_API_KEY_FALLBACK: &'static str = "XAI_API_KEY";
    pub(crate) const ENV_TIMEOUT_SECS: &'static str = "AFFINITY_ORACLE_TIMEOUT_SECS";
    pub(crate) const ENV_MAX_CONTENT_ITEMS: &'static str = "AFFINITY_MAX_CONTENT_ITEMS";

    /// Loads oracle settings from environment variables (with defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let provider = parse_env(Self::ENV_PROVIDER)?.unwrap_or(defaults.provider);
        let model = non_empty_env(Self::ENV_MODEL).unwrap_or(defaults.model);
        let base_url = non_empty_env(Self::ENV_BASE_URL)
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);
        let api_key =
            non_empty_env(Self::ENV_API_KEY).or_else(|| non_empty_env(Self::ENV_API_KEY_FALLBACK));
        let timeout = parse_env::<u64>(Self::ENV_TIMEOUT_SECS)?
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);
        let max_content_items =
            parse_env(Self::ENV_MAX_CONTENT_ITEMS)?.unwrap_or(defaults.max_content_items);

        Ok(Self {
            provider,
            model,
            base_url,
            api_key,
            timeout,
            max_content_items,
        })
    }

    /// Returns the chat-completions endpoint for the HTTP provider.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
