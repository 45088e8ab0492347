//! CLI configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use rosba_enrich::gemini::{api_key_from_env, API_KEY_ENV_VARS, DEFAULT_ENDPOINT, DEFAULT_MODEL};
use rosba_enrich::GeminiConfig;
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order, from the working directory up.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["rosba.toml", ".rosba.toml", "rosba.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront identity and contact details.
    #[serde(default)]
    pub store: StoreConfig,

    /// Image analyzer settings.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "json")
}

/// Storefront identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Display name.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// WhatsApp number in international format without "+", used for wa.me links.
    #[serde(default = "default_whatsapp_number")]
    pub whatsapp_number: String,

    /// Instagram profile URL.
    #[serde(default = "default_instagram_url")]
    pub instagram_url: String,

    /// Store location line.
    #[serde(default = "default_location")]
    pub location: String,
}

fn default_store_name() -> String {
    "Rosba Store".to_string()
}

fn default_whatsapp_number() -> String {
    "6285801102948".to_string()
}

fn default_instagram_url() -> String {
    "https://www.instagram.com/rosbastore_kitab?igsh=MXQyZjVxN2tnMnphMg==".to_string()
}

fn default_location() -> String {
    "Nganjuk, Jawa Timur".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_store_name(),
            whatsapp_number: default_whatsapp_number(),
            instagram_url: default_instagram_url(),
            location: default_location(),
        }
    }
}

/// Image analyzer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Gemini model name.
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key. Falls back to GEMINI_API_KEY, then API_KEY.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AnalyzerConfig {
    /// The API key from config or environment, if any.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(api_key_from_env)
    }

    /// Build the analyzer connection settings.
    pub fn to_gemini_config(&self) -> Result<GeminiConfig> {
        let api_key = self.resolve_api_key().with_context(|| {
            format!(
                "No analyzer API key. Set analyzer.api_key or one of: {}",
                API_KEY_ENV_VARS.join(", ")
            )
        })?;

        Ok(GeminiConfig::new(api_key)
            .with_endpoint(&self.endpoint)
            .with_model(&self.model)
            .with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

/// Catalog source configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON file with the starting products. Built-in sample when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
}

/// Log line layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format (for the terminal).
    #[default]
    Human,
    /// JSON format (for log aggregation).
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Line layout.
    #[serde(default)]
    pub format: LogFormat,

    /// Default filter directive when RUST_LOG is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_log_level(),
        }
    }
}

/// Generate a default rosba.toml config file.
pub fn generate_default_config(store_name: &str) -> String {
    format!(
        r#"# Rosba storefront configuration

[store]
name = "{store_name}"
whatsapp_number = "{whatsapp}"
instagram_url = "{instagram}"
location = "{location}"

[analyzer]
model = "{model}"
endpoint = "{endpoint}"
# api_key = "..."   # or set GEMINI_API_KEY / API_KEY
timeout_secs = 60

[catalog]
# seed_file = "catalog.json"

[logging]
format = "human"
level = "warn"
"#,
        store_name = store_name,
        whatsapp = default_whatsapp_number(),
        instagram = default_instagram_url(),
        location = default_location(),
        model = DEFAULT_MODEL,
        endpoint = DEFAULT_ENDPOINT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let content = generate_default_config("Rosba Store");
        let config: CliConfig = toml::from_str(&content).unwrap();
        assert_eq!(config.store.name, "Rosba Store");
        assert_eq!(config.store.whatsapp_number, "6285801102948");
        assert_eq!(config.analyzer.model, DEFAULT_MODEL);
        assert_eq!(config.analyzer.timeout_secs, 60);
        assert!(config.catalog.seed_file.is_none());
        assert_eq!(config.logging.format, LogFormat::Human);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.store.name, "Rosba Store");
        assert_eq!(config.analyzer.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_configured_api_key_wins() {
        let config = AnalyzerConfig {
            api_key: Some("from-config".to_string()),
            model: "gemini-2.5-flash".to_string(),
            ..Default::default()
        };
        let gemini = config.to_gemini_config().unwrap();
        assert_eq!(gemini.api_key, "from-config");
        assert_eq!(gemini.model, "gemini-2.5-flash");
        assert_eq!(gemini.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rosba.json");

        let mut config = CliConfig::default();
        config.logging.format = LogFormat::Json;
        config.save(&path).unwrap();

        let loaded = CliConfig::load(&path).unwrap();
        assert_eq!(loaded.logging.format, LogFormat::Json);
    }
}
