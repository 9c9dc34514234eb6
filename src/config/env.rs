use crate::config::{
    BotConfig, ContentConfig, LoggingConfig, ParaphraserConfig, TelegramConfig,
    DEFAULT_DATA_DIR, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL, DEFAULT_LOG_FILE,
    DEFAULT_SYSTEM_INSTRUCTION, DEFAULT_TELEGRAM_API,
};
use crate::utils::error::{KahinError, Result};
use std::path::PathBuf;
use std::str::FromStr;

pub const BOT_TOKEN_VAR: &str = "KAHIN_BOT_BOT_TOKEN";
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| KahinError::MissingConfigError {
                    field: name.to_string(),
                })
        };

        Ok(Self {
            telegram: TelegramConfig {
                bot_token: required(BOT_TOKEN_VAR)?,
                api_base: lookup("KAHIN_BOT_API_BASE")
                    .unwrap_or_else(|| DEFAULT_TELEGRAM_API.to_string()),
                poll_timeout_secs: parse_or(
                    "KAHIN_BOT_POLL_TIMEOUT_SECS",
                    lookup("KAHIN_BOT_POLL_TIMEOUT_SECS"),
                    30,
                )?,
            },
            paraphraser: ParaphraserConfig {
                api_key: required(GEMINI_API_KEY_VAR)?,
                model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                endpoint: lookup("GEMINI_ENDPOINT")
                    .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string()),
                timeout_secs: parse_or(
                    "GEMINI_TIMEOUT_SECS",
                    lookup("GEMINI_TIMEOUT_SECS"),
                    120,
                )?,
                system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            },
            content: ContentConfig::with_data_dir(
                lookup("KAHIN_BOT_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
            ),
            logging: LoggingConfig {
                verbose: false,
                json: lookup("LOG_FORMAT").is_some_and(|v| v == "json"),
                file: Some(PathBuf::from(
                    lookup("LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
                )),
            },
        })
    }
}

fn parse_or<T: FromStr>(name: &str, raw: Option<String>, default: T) -> Result<T> {
    match raw {
        None => Ok(default),
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(parsed),
            Err(_) => Err(KahinError::InvalidConfigValueError {
                field: name.to_string(),
                value,
                reason: "Expected a non-negative integer".to_string(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_required_vars_and_defaults() {
        let config = BotConfig::from_lookup(lookup_from(&[
            (BOT_TOKEN_VAR, "123:abc"),
            (GEMINI_API_KEY_VAR, "secret"),
        ]))
        .unwrap();

        assert_eq!(config.telegram.bot_token, "123:abc");
        assert_eq!(config.telegram.api_base, DEFAULT_TELEGRAM_API);
        assert_eq!(config.telegram.poll_timeout_secs, 30);
        assert_eq!(config.paraphraser.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.content.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.logging.file_path(), Some(Path::new(DEFAULT_LOG_FILE)));
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let err = BotConfig::from_lookup(lookup_from(&[(GEMINI_API_KEY_VAR, "secret")])).unwrap_err();
        assert!(matches!(err, KahinError::MissingConfigError { field } if field == BOT_TOKEN_VAR));
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let err = BotConfig::from_lookup(lookup_from(&[
            (BOT_TOKEN_VAR, "123:abc"),
            (GEMINI_API_KEY_VAR, "  "),
        ]))
        .unwrap_err();
        assert!(matches!(err, KahinError::MissingConfigError { field } if field == GEMINI_API_KEY_VAR));
    }

    #[test]
    fn test_overrides_and_bad_numbers() {
        let config = BotConfig::from_lookup(lookup_from(&[
            (BOT_TOKEN_VAR, "123:abc"),
            (GEMINI_API_KEY_VAR, "secret"),
            ("KAHIN_BOT_DATA_DIR", "/srv/kahin"),
            ("KAHIN_BOT_POLL_TIMEOUT_SECS", "10"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(config.content.data_dir, PathBuf::from("/srv/kahin"));
        assert_eq!(config.telegram.poll_timeout_secs, 10);
        assert!(config.logging.json);

        let quiet = BotConfig::from_lookup(lookup_from(&[
            (BOT_TOKEN_VAR, "123:abc"),
            (GEMINI_API_KEY_VAR, "secret"),
            ("LOG_FILE", ""),
        ]))
        .unwrap();
        assert_eq!(quiet.logging.file_path(), None);

        let err = BotConfig::from_lookup(lookup_from(&[
            (BOT_TOKEN_VAR, "123:abc"),
            (GEMINI_API_KEY_VAR, "secret"),
            ("KAHIN_BOT_POLL_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, KahinError::InvalidConfigValueError { .. }));
    }
}
