//! Global configuration parsing, validation, and credential loading.

use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::telemetry::LogFormat;
use crate::{AppError, Result};

/// Keychain service under which TaskFlow credentials are stored.
pub const KEYRING_SERVICE: &str = "taskflow";

/// Keychain entry holding the generative-language API key.
pub const API_KEY_ENTRY: &str = "gemini_api_key";

/// Environment variable consulted when the keychain has no API key.
pub const API_KEY_ENV: &str = "API_KEY";

/// Board behaviour: seed data, id generation, and toast pacing.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct BoardConfig {
    /// Seed the store with the demo tasks on startup.
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
    /// Repository recorded on git metadata for AI-assisted tasks.
    #[serde(default = "default_repo")]
    pub default_repo: String,
    /// Prefix of generated task ids (`TF` yields `TF-4821`).
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,
    /// Delay before the "create branch" hint follows a task creation toast.
    #[serde(default = "default_hint_delay_ms")]
    pub hint_delay_ms: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
            default_repo: default_repo(),
            id_prefix: default_id_prefix(),
            hint_delay_ms: default_hint_delay_ms(),
        }
    }
}

impl BoardConfig {
    /// Hint delay as a [`Duration`].
    #[must_use]
    pub fn hint_delay(&self) -> Duration {
        Duration::from_millis(self.hint_delay_ms)
    }
}

/// Command palette tuning.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct PaletteConfig {
    /// Relative edit-distance threshold for task matching (0 = exact).
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: default_fuzzy_threshold(),
        }
    }
}

/// AI suggestion service settings.
///
/// The API key is loaded at runtime via OS keychain or environment
/// variable, never from the TOML file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct AiConfig {
    /// Whether the remote planner may be used at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Generative model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the generative-language API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Upper bound for a single planning request.
    #[serde(default = "default_ai_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Simulated latency of the local fallback planner.
    #[serde(default = "default_fallback_delay_ms")]
    pub fallback_delay_ms: u64,
    /// API key (populated at runtime).
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_seconds: default_ai_timeout_seconds(),
            fallback_delay_ms: default_fallback_delay_ms(),
            api_key: None,
        }
    }
}

impl AiConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Whether the remote planner is both enabled and credentialed.
    #[must_use]
    pub fn remote_available(&self) -> bool {
        self.enabled && self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

/// Simulated git sync pacing.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SyncConfig {
    /// Time a triggered sync takes before reporting completion.
    #[serde(default = "default_sync_delay_ms")]
    pub delay_ms: u64,
    /// Delay before the "auto-closing PR" toast after a task lands in done.
    #[serde(default = "default_auto_close_delay_ms")]
    pub auto_close_delay_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_sync_delay_ms(),
            auto_close_delay_ms: default_auto_close_delay_ms(),
        }
    }
}

impl SyncConfig {
    /// Sync duration as a [`Duration`].
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Auto-close toast delay as a [`Duration`].
    #[must_use]
    pub fn auto_close_delay(&self) -> Duration {
        Duration::from_millis(self.auto_close_delay_ms)
    }
}

fn default_true() -> bool {
    true
}

fn default_repo() -> String {
    "taskflow-web".into()
}

fn default_id_prefix() -> String {
    "TF".into()
}

fn default_hint_delay_ms() -> u64 {
    900
}

fn default_fuzzy_threshold() -> f64 {
    0.4
}

fn default_model() -> String {
    "gemini-3-flash-preview".into()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}

fn default_ai_timeout_seconds() -> u64 {
    30
}

fn default_fallback_delay_ms() -> u64 {
    1000
}

fn default_sync_delay_ms() -> u64 {
    1200
}

fn default_auto_close_delay_ms() -> u64 {
    800
}

/// Global configuration parsed from `taskflow.toml`.
///
/// Every section is optional; an empty document yields the defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
    /// Board behaviour.
    #[serde(default)]
    pub board: BoardConfig,
    /// Command palette tuning.
    #[serde(default)]
    pub palette: PaletteConfig,
    /// AI suggestion service settings.
    #[serde(default)]
    pub ai: AiConfig,
    /// Simulated git sync pacing.
    #[serde(default)]
    pub sync: SyncConfig,
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string and validate it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the AI API key from OS keychain with env-var fallback.
    ///
    /// A missing key is not an error: the AI assist falls back to the local
    /// planner and a warning is logged.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the keychain lookup task panics.
    pub async fn load_credentials(&mut self) -> Result<()> {
        self.ai.api_key = load_credential(API_KEY_ENTRY, API_KEY_ENV).await?;
        if self.ai.api_key.is_some() {
            info!("ai credential loaded");
        } else {
            warn!(
                env = API_KEY_ENV,
                "API key not found; AI assist will use the local fallback planner"
            );
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let threshold = self.palette.fuzzy_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(AppError::Config(format!(
                "palette.fuzzy_threshold must be within 0..=1, got {threshold}"
            )));
        }

        if self.ai.timeout_seconds == 0 {
            return Err(AppError::Config(
                "ai.timeout_seconds must be greater than zero".into(),
            ));
        }

        if self.ai.model.trim().is_empty() {
            return Err(AppError::Config("ai.model must not be empty".into()));
        }

        if self.board.id_prefix.trim().is_empty() {
            return Err(AppError::Config("board.id_prefix must not be empty".into()));
        }

        Ok(())
    }
}

/// Load a single credential from OS keychain with env-var fallback.
async fn load_credential(keyring_key: &str, env_key: &str) -> Result<Option<String>> {
    let key = keyring_key.to_owned();

    // keyring is synchronous I/O.
    let keychain_result = tokio::task::spawn_blocking(move || {
        keyring::Entry::new(KEYRING_SERVICE, &key).and_then(|entry| entry.get_password())
    })
    .await
    .map_err(|err| AppError::Config(format!("keychain task panicked: {err}")))?;

    match keychain_result {
        Ok(value) if !value.is_empty() => return Ok(Some(value)),
        Ok(_) => {
            warn!(key = keyring_key, "keychain entry is empty, trying env var");
        }
        Err(err) => {
            warn!(
                key = keyring_key,
                ?err,
                "keychain lookup failed, trying env var"
            );
        }
    }

    Ok(env::var(env_key).ok().filter(|value| !value.is_empty()))
}
