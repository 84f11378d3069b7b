//! Game configuration loaded from TOML.

use crate::games::neon_bomb::DEFAULT_BOMBS;
use crate::llm_client::{LlmConfig, LlmProvider};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Settings for a Neon Bomb session.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Name shown for the X seat.
    human_name: String,

    /// Name shown for the O seat.
    opponent_name: String,

    /// Bombs each player starts with.
    initial_bombs: u8,

    /// Pause before the AI's move is applied, in milliseconds.
    ai_delay_ms: u64,

    /// Whether the AI may answer with a bomb.
    ai_bombs: bool,

    /// LLM provider (gemini, openai or anthropic).
    llm_provider: LlmProvider,

    /// LLM model name.
    llm_model: String,

    /// Maximum tokens for LLM responses.
    llm_max_tokens: u32,

    /// Optional endpoint override for the provider.
    llm_base_url: Option<String>,

    /// Where the TUI writes its log.
    log_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            human_name: "Human".to_string(),
            opponent_name: "Gemini".to_string(),
            initial_bombs: DEFAULT_BOMBS,
            ai_delay_ms: 1000,
            ai_bombs: true,
            llm_provider: LlmProvider::Gemini,
            llm_model: "gemini-2.5-flash".to_string(),
            llm_max_tokens: 256,
            llm_base_url: None,
            log_file: PathBuf::from("neon_bomb.log"),
        }
    }
}

impl GameConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            provider = %config.llm_provider,
            model = %config.llm_model,
            bombs = config.initial_bombs,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the starting bomb count.
    pub fn with_initial_bombs(mut self, bombs: u8) -> Self {
        self.initial_bombs = bombs;
        self
    }

    /// Overrides the AI delay.
    pub fn with_ai_delay_ms(mut self, delay_ms: u64) -> Self {
        self.ai_delay_ms = delay_ms;
        self
    }

    /// Overrides whether the AI may bomb.
    pub fn with_ai_bombs(mut self, ai_bombs: bool) -> Self {
        self.ai_bombs = ai_bombs;
        self
    }

    /// Overrides the log file location.
    pub fn with_log_file(mut self, log_file: impl Into<PathBuf>) -> Self {
        self.log_file = log_file.into();
        self
    }

    /// AI delay as a [`std::time::Duration`].
    pub fn ai_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.ai_delay_ms)
    }

    /// Creates LLM configuration from this config.
    ///
    /// Reads the provider's key from the environment: `GEMINI_API_KEY`
    /// (or `API_KEY`), `OPENAI_API_KEY`, or `ANTHROPIC_API_KEY`.
    #[instrument(skip(self), fields(provider = ?self.llm_provider, model = %self.llm_model))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        self.create_llm_config_with(|name| std::env::var(name).ok())
    }

    /// Like [`create_llm_config`](Self::create_llm_config) with a custom
    /// variable lookup.
    pub fn create_llm_config_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");

        let candidates: &[&str] = match self.llm_provider {
            LlmProvider::Gemini => &["GEMINI_API_KEY", "API_KEY"],
            LlmProvider::OpenAI => &["OPENAI_API_KEY"],
            LlmProvider::Anthropic => &["ANTHROPIC_API_KEY"],
        };

        let api_key = candidates
            .iter()
            .find_map(|name| lookup(name).filter(|v| !v.trim().is_empty()))
            .ok_or_else(|| {
                ConfigError::new(format!(
                    "{} environment variable not set",
                    candidates.join(" or ")
                ))
            })?;

        let config = LlmConfig::new(
            self.llm_provider,
            api_key,
            self.llm_model.clone(),
            self.llm_max_tokens,
        );
        Ok(match &self.llm_base_url {
            Some(url) => config.with_base_url(url.clone()),
            None => config,
        })
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
