use crate::ai::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, ModelConfig};
use crate::error::ConfigError;
use crate::logger::DEFAULT_LOG_FILE;
use crate::models::{DEFAULT_QUESTION_COUNT, MAX_QUESTION_COUNT, MIN_QUESTION_COUNT};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub log_file: PathBuf,
    pub default_count: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig {
                model: DEFAULT_MODEL.to_string(),
                temperature: Some(DEFAULT_TEMPERATURE),
                max_tokens: Some(DEFAULT_MAX_TOKENS),
            },
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            default_count: DEFAULT_QUESTION_COUNT,
        }
    }
}

impl AppConfig {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(model) = lookup("QUIZ_MODEL").filter(|m| !m.trim().is_empty()) {
            config.model.model = model.trim().to_string();
        }
        if let Some(temperature) = parse_var::<f32, _>(&lookup, "QUIZ_TEMPERATURE")? {
            config.model.temperature = Some(temperature);
        }
        if let Some(max_tokens) = parse_var::<u32, _>(&lookup, "QUIZ_MAX_TOKENS")? {
            config.model.max_tokens = Some(max_tokens);
        }
        if let Some(log_file) = lookup("QUIZ_LOG_FILE").filter(|p| !p.trim().is_empty()) {
            config.log_file = PathBuf::from(log_file);
        }
        if let Some(count) = parse_var::<usize, _>(&lookup, "QUIZ_DEFAULT_COUNT")? {
            config.default_count = count.clamp(MIN_QUESTION_COUNT, MAX_QUESTION_COUNT);
        }

        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}
