//! Trip planner configuration types and loading
//!
//! Configuration is loaded once at startup and handed to the generation
//! client and sink constructors; nothing below reads ambient state later.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Project-local config file name
const LOCAL_CONFIG: &str = ".tripplanner.yml";

/// Main trip planner configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Generation service configuration
    pub llm: LlmConfig,

    /// Outgoing mail configuration
    pub email: EmailConfig,

    /// Where history and exports are written
    pub storage: StorageConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that the API key environment variable is set so a submission
    /// fails fast instead of after the form has been filled in.
    pub fn validate(&self) -> Result<()> {
        if std::env::var(&self.llm.api_key_env).map(|v| v.trim().is_empty()).unwrap_or(true) {
            return Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                self.llm.api_key_env
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .tripplanner.yml
        let local_config = PathBuf::from(LOCAL_CONFIG);
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/tripplanner/tripplanner.yml
        if let Some(user_config) = user_config_path()
            && user_config.exists()
        {
            match Self::load_from_file(&user_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is set up
    ///
    /// Errors are swallowed; the full load reports them once logging works.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates = match config_path {
            Some(path) => vec![path.clone()],
            None => std::iter::once(PathBuf::from(LOCAL_CONFIG)).chain(user_config_path()).collect(),
        };
        candidates
            .into_iter()
            .filter(|p| p.exists())
            .find_map(|p| Self::load_from_file(&p).ok())
            .and_then(|c| c.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// User config location: `<config_dir>/tripplanner/tripplanner.yml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tripplanner").join("tripplanner.yml"))
}

/// Generation service configuration
///
/// `model`, `api-key-env` and `base-url` default per provider, so
/// `provider: openai` alone is a working OpenAI setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawLlmConfig")]
pub struct LlmConfig {
    /// Provider name ("gemini" or "openai")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::for_provider(DEFAULT_PROVIDER)
    }
}

const DEFAULT_PROVIDER: &str = "gemini";
const DEFAULT_MAX_TOKENS: u32 = 8192;
const DEFAULT_TIMEOUT_MS: u64 = 120_000;

/// Model, key variable and base URL used when the config leaves them out
fn provider_defaults(provider: &str) -> (&'static str, &'static str, &'static str) {
    match provider.to_lowercase().as_str() {
        "openai" => ("gpt-4o-mini", "OPENAI_API_KEY", "https://api.openai.com"),
        _ => (
            "gemini-1.5-flash",
            "GEMINI_API_KEY",
            "https://generativelanguage.googleapis.com",
        ),
    }
}

/// `llm` section as written in the file, before provider defaults apply
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLlmConfig {
    provider: Option<String>,
    model: Option<String>,
    #[serde(rename = "api-key-env")]
    api_key_env: Option<String>,
    #[serde(rename = "base-url")]
    base_url: Option<String>,
    #[serde(rename = "max-tokens")]
    max_tokens: Option<u32>,
    #[serde(rename = "timeout-ms")]
    timeout_ms: Option<u64>,
}

impl From<RawLlmConfig> for LlmConfig {
    fn from(raw: RawLlmConfig) -> Self {
        let provider = raw.provider.unwrap_or_else(|| DEFAULT_PROVIDER.to_string());
        let defaults = Self::for_provider(&provider);
        Self {
            model: raw.model.unwrap_or(defaults.model),
            api_key_env: raw.api_key_env.unwrap_or(defaults.api_key_env),
            base_url: raw.base_url.unwrap_or(defaults.base_url),
            max_tokens: raw.max_tokens.unwrap_or(defaults.max_tokens),
            timeout_ms: raw.timeout_ms.unwrap_or(defaults.timeout_ms),
            provider,
        }
    }
}

impl LlmConfig {
    /// Defaults for a provider; unknown providers get the Gemini settings
    pub fn for_provider(provider: &str) -> Self {
        let (model, api_key_env, base_url) = provider_defaults(provider);
        Self {
            provider: provider.to_string(),
            model: model.to_string(),
            api_key_env: api_key_env.to_string(),
            base_url: base_url.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        let key = std::env::var(&self.api_key_env)
            .with_context(|| format!("Environment variable {} is not set", self.api_key_env))?;
        if key.trim().is_empty() {
            return Err(eyre::eyre!("Environment variable {} is empty", self.api_key_env));
        }
        Ok(key)
    }
}

/// Outgoing mail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Mail relay host (STARTTLS)
    #[serde(rename = "smtp-host")]
    pub smtp_host: String,

    /// Mail relay port
    #[serde(rename = "smtp-port")]
    pub smtp_port: u16,

    /// From address
    pub sender: String,

    /// Login name; the sender address when unset
    pub username: Option<String>,

    /// Environment variable containing the relay password
    #[serde(rename = "password-env")]
    pub password_env: String,

    /// Subject line of the itinerary mail
    pub subject: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            sender: String::new(),
            username: None,
            password_env: "TRIPPLANNER_SMTP_PASSWORD".to_string(),
            subject: "Your Travel Itinerary".to_string(),
        }
    }
}

/// Email settings with credentials resolved from the environment
#[derive(Debug, Clone)]
pub struct ResolvedEmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub sender: String,
    pub username: String,
    pub password: String,
    pub subject: String,
}

impl EmailConfig {
    /// Resolve credentials; fails when the sender or password is missing
    pub fn resolve(&self) -> Result<ResolvedEmailConfig> {
        if self.sender.trim().is_empty() {
            return Err(eyre::eyre!("No sender address configured. Set email.sender in the config file."));
        }
        let password = std::env::var(&self.password_env)
            .with_context(|| format!("Mail password not found. Set the {} environment variable.", self.password_env))?;

        Ok(ResolvedEmailConfig {
            smtp_host: self.smtp_host.clone(),
            smtp_port: self.smtp_port,
            sender: self.sender.clone(),
            username: self.username.clone().unwrap_or_else(|| self.sender.clone()),
            password,
            subject: self.subject.clone(),
        })
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Append-only itinerary history (JSON lines)
    #[serde(rename = "history-path")]
    pub history_path: PathBuf,

    /// Default PDF export file
    #[serde(rename = "pdf-path")]
    pub pdf_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        // Use XDG data directory (~/.local/share/tripplanner on Linux)
        let history_path = dirs::data_dir()
            .map(|d| d.join("tripplanner"))
            .unwrap_or_else(|| PathBuf::from(".tripplanner"))
            .join("history.jsonl");

        Self {
            history_path,
            pdf_path: PathBuf::from("itinerary.pdf"),
        }
    }
}
