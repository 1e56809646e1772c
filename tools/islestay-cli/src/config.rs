//! CLI configuration.

use anyhow::{Context, Result};
use islestay_auth::DEFAULT_TOKEN_ENV;
use islestay_listing::EngineConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Pricing and histogram settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Listings source.
    #[serde(default)]
    pub source: SourceConfig,

    /// Session settings.
    #[serde(default)]
    pub session: SessionConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config content, choosing the format from the file name.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Where stays are loaded from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to the listings JSON file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Refuse to load without an authenticated session.
    #[serde(default)]
    pub require_auth: bool,
}

/// Session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Environment variable holding the bearer token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
        }
    }
}

/// Generate a default islestay.toml config file.
pub fn generate_default_config() -> String {
    let engine = EngineConfig::default();
    format!(
        r#"# IsleStay listing configuration

[engine]
bin_count = {bins}
domain_step = {step}
weekly_min_nights = {weekly}
monthly_min_nights = {monthly}

[source]
# path = "stays.json"
require_auth = false

[session]
token_env = "{token_env}"
"#,
        bins = engine.bin_count,
        step = engine.domain_step,
        weekly = engine.weekly_min_nights,
        monthly = engine.monthly_min_nights,
        token_env = DEFAULT_TOKEN_ENV,
    )
}
