pub mod env;
pub mod toml_config;

#[cfg(feature = "cli")]
pub mod cli;

use crate::domain::model::Shelf;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_directory, validate_non_empty_string, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_DATA_DIR: &str = "../data";
pub const DEFAULT_LOG_FILE: &str = "kahin-bot.log";

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a professional paraphraser specialized in Turkish language. \
Paraphrase the given text to a more natural-sounding and expressive version. \
Do not use Markdown, use only plain text.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub paraphraser: ParaphraserConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    #[serde(default = "default_telegram_api")]
    pub api_base: String,
    /// Long-poll timeout passed to `getUpdates`.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParaphraserConfig {
    pub api_key: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_gemini_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_paraphrase_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_system_instruction")]
    pub system_instruction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub layout: ContentLayout,
}

/// Shelf directories, relative to `data_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentLayout {
    pub millman_full: PathBuf,
    pub millman_summary: PathBuf,
    pub millman_short_json: PathBuf,
    pub millman_long_json: PathBuf,
    pub forbes_full: PathBuf,
    pub forbes_summary: PathBuf,
    pub enneagrams: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub json: bool,
    /// Daily rolling log file. An empty path turns file logging off.
    #[serde(default = "default_log_file")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            json: false,
            file: default_log_file(),
        }
    }
}

impl LoggingConfig {
    pub fn file_path(&self) -> Option<&Path> {
        self.file
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

fn default_telegram_api() -> String {
    DEFAULT_TELEGRAM_API.to_string()
}

fn default_poll_timeout() -> u64 {
    30
}

fn default_gemini_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_gemini_endpoint() -> String {
    DEFAULT_GEMINI_ENDPOINT.to_string()
}

fn default_paraphrase_timeout() -> u64 {
    120
}

fn default_system_instruction() -> String {
    DEFAULT_SYSTEM_INSTRUCTION.to_string()
}

fn default_log_file() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_LOG_FILE))
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

impl Default for ContentLayout {
    fn default() -> Self {
        Self {
            millman_full: PathBuf::from("millman/tr/MDs"),
            millman_summary: PathBuf::from("millman/tr/Summarizations"),
            millman_short_json: PathBuf::from("millman/tr/JSONs"),
            millman_long_json: PathBuf::from("millman/tr/JSONs_Extended"),
            forbes_full: PathBuf::from("forbes/tr/MDs"),
            forbes_summary: PathBuf::from("forbes/tr/Summarizations"),
            enneagrams: PathBuf::from("enneagrams"),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self::with_data_dir(DEFAULT_DATA_DIR)
    }
}

impl ContentConfig {
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            layout: ContentLayout::default(),
        }
    }

    pub fn shelf_dir(&self, shelf: Shelf) -> PathBuf {
        let relative = match shelf {
            Shelf::MillmanFull => &self.layout.millman_full,
            Shelf::MillmanSummary => &self.layout.millman_summary,
            Shelf::MillmanShortJson => &self.layout.millman_short_json,
            Shelf::MillmanLongJson => &self.layout.millman_long_json,
            Shelf::ForbesFull => &self.layout.forbes_full,
            Shelf::ForbesSummary => &self.layout.forbes_summary,
            Shelf::Enneagrams => &self.layout.enneagrams,
        };
        self.data_dir.join(relative)
    }
}

/// `${VAR}` left in place means the variable was not set.
fn validate_resolved(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    if value.contains("${") {
        return Err(crate::utils::error::KahinError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

impl Validate for BotConfig {
    fn validate(&self) -> Result<()> {
        validate_resolved("telegram.bot_token", &self.telegram.bot_token)?;
        validate_url("telegram.api_base", &self.telegram.api_base)?;
        validate_range("telegram.poll_timeout_secs", self.telegram.poll_timeout_secs, 0, 60)?;

        validate_resolved("paraphraser.api_key", &self.paraphraser.api_key)?;
        validate_non_empty_string("paraphraser.model", &self.paraphraser.model)?;
        validate_url("paraphraser.endpoint", &self.paraphraser.endpoint)?;
        validate_range("paraphraser.timeout_secs", self.paraphraser.timeout_secs, 1, 600)?;

        validate_directory("content.data_dir", &self.content.data_dir)?;

        tracing::info!("✅ Bot configuration validation passed");
        Ok(())
    }
}
