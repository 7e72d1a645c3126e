//! Application configuration for GrowthNews.
//!
//! User config lives at `~/.growthnews/growthnews.toml`.
//! Credentials are never stored in the file: it only names the environment
//! variables that hold them, and they are read when a request starts.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GrowthNewsError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "growthnews.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".growthnews";

// ---------------------------------------------------------------------------
// Config structs (matching growthnews.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Language-model API settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Campaign API settings.
    #[serde(default)]
    pub brevo: BrevoConfig,

    /// Page fetch settings.
    #[serde(default)]
    pub http: HttpConfig,
}

/// `[openai]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Name of the env var holding the API key.
    #[serde(default = "default_openai_key_env")]
    pub api_key_env: String,

    /// Chat model used for every generation call.
    #[serde(default = "default_model")]
    pub model: String,

    /// API root, overridable for proxies and tests.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_openai_key_env(),
            model: default_model(),
            base_url: default_openai_base_url(),
        }
    }
}

impl OpenAiConfig {
    /// Read the API key from its environment variable.
    pub fn api_key(&self) -> Result<String> {
        read_secret(&self.api_key_env)
    }
}

fn default_openai_key_env() -> String {
    "OPENAI_API_KEY".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".into()
}

/// `[brevo]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrevoConfig {
    /// Name of the env var holding the API key.
    #[serde(default = "default_brevo_key_env")]
    pub api_key_env: String,

    /// Name of the env var holding the recipient list id.
    #[serde(default = "default_list_id_env")]
    pub list_id_env: String,

    /// API root, overridable for tests.
    #[serde(default = "default_brevo_base_url")]
    pub base_url: String,

    /// Display name of the campaign sender.
    #[serde(default = "default_sender_name")]
    pub sender_name: String,

    /// Address of the campaign sender.
    #[serde(default = "default_sender_email")]
    pub sender_email: String,

    /// Campaign name prefix, followed by the sequence id.
    #[serde(default = "default_campaign_prefix")]
    pub campaign_prefix: String,
}

impl Default for BrevoConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_brevo_key_env(),
            list_id_env: default_list_id_env(),
            base_url: default_brevo_base_url(),
            sender_name: default_sender_name(),
            sender_email: default_sender_email(),
            campaign_prefix: default_campaign_prefix(),
        }
    }
}

impl BrevoConfig {
    /// Read the API key from its environment variable.
    pub fn api_key(&self) -> Result<String> {
        read_secret(&self.api_key_env)
    }

    /// Read and parse the recipient list id from its environment variable.
    pub fn list_id(&self) -> Result<i64> {
        let raw = read_secret(&self.list_id_env)?;
        parse_list_id(&self.list_id_env, &raw)
    }
}

fn default_brevo_key_env() -> String {
    "BREVO_API_KEY".into()
}
fn default_list_id_env() -> String {
    "BREVO_LIST_ID".into()
}
fn default_brevo_base_url() -> String {
    "https://api.brevo.com/v3".into()
}
fn default_sender_name() -> String {
    "Fabien Guilleux".into()
}
fn default_sender_email() -> String {
    "fabien@deux.io".into()
}
fn default_campaign_prefix() -> String {
    "LGN".into()
}

/// `[http]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent sent with page fetches.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    concat!("GrowthNews/", env!("CARGO_PKG_VERSION")).into()
}

// ---------------------------------------------------------------------------
// Secrets
// ---------------------------------------------------------------------------

/// Read a required secret from the environment. Empty values count as missing.
pub fn read_secret(var_name: &str) -> Result<String> {
    match std::env::var(var_name) {
        Ok(val) if !val.trim().is_empty() => Ok(val),
        _ => Err(GrowthNewsError::config(format!("{var_name} not configured"))),
    }
}

fn parse_list_id(var_name: &str, raw: &str) -> Result<i64> {
    raw.trim().parse().map_err(|_| {
        GrowthNewsError::config(format!("{var_name} must be a numeric list id, got '{raw}'"))
    })
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.growthnews/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| GrowthNewsError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.growthnews/growthnews.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| GrowthNewsError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        GrowthNewsError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| GrowthNewsError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| GrowthNewsError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| GrowthNewsError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("OPENAI_API_KEY"));
        assert!(toml_str.contains("BREVO_LIST_ID"));
        assert!(toml_str.contains("gpt-4o-mini"));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[openai]
model = "gpt-4o"

[brevo]
campaign_prefix = "NEWS"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.openai.model, "gpt-4o");
        assert_eq!(config.openai.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
        assert_eq!(config.brevo.campaign_prefix, "NEWS");
        assert_eq!(config.brevo.sender_email, "fabien@deux.io");
        assert!(config.http.user_agent.starts_with("GrowthNews/"));
    }

    #[test]
    fn missing_secret_is_config_error() {
        // Use a unique env var name to avoid interfering with other tests
        let mut config = AppConfig::default();
        config.openai.api_key_env = "GN_TEST_NONEXISTENT_KEY_12345".into();
        let err = config.openai.api_key().unwrap_err();
        assert!(matches!(err, GrowthNewsError::Config { .. }));
        assert!(err.to_string().contains("GN_TEST_NONEXISTENT_KEY_12345 not configured"));
    }

    #[test]
    fn missing_list_id_is_config_error() {
        let mut config = AppConfig::default();
        config.brevo.list_id_env = "GN_TEST_NONEXISTENT_LIST_12345".into();
        assert!(matches!(
            config.brevo.list_id(),
            Err(GrowthNewsError::Config { .. })
        ));
    }

    #[test]
    fn list_id_must_be_numeric() {
        assert_eq!(parse_list_id("BREVO_LIST_ID", " 42 ").unwrap(), 42);
        let err = parse_list_id("BREVO_LIST_ID", "newsletter").unwrap_err();
        assert!(err.to_string().contains("numeric list id"));
    }
}
