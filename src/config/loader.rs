//! Settings loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::Settings;
use crate::config::validation::{validate_settings, ValidationError};

/// Error type for settings loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    InvalidValue { key: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {}: '{}'", key, value)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load settings: optional TOML file, then environment overrides, then validation.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

/// Same as [`load_settings`] with an explicit variable lookup.
pub fn load_settings_with<F>(path: Option<&Path>, lookup: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => Settings::default(),
    };

    apply_env_overrides(&mut settings, lookup)?;
    validate_settings(&settings).map_err(ConfigError::Validation)?;

    Ok(settings)
}

/// Overlay environment variables onto `settings`.
pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("APP_ENVIRONMENT") {
        settings.app_environment = value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key: "APP_ENVIRONMENT", value })?;
    }

    if let Some(value) = lookup("SUPPORTED_COUNTRY_CODES") {
        settings.supported_country_codes = parse_country_codes(&value);
    }

    if let Some(value) = lookup("STREAMCHASER_URL") {
        settings.streamchaser_url = value;
    }
    if let Some(value) = lookup("MEILI_URL") {
        settings.search.url = value;
    }
    if let Some(value) = lookup("MEILI_MASTER_KEY") {
        settings.search.api_key = value;
    }
    if let Some(value) = lookup("DATABASE_URL") {
        settings.database.url = value;
    }
    if let Some(value) = lookup("REDIS_URL") {
        settings.cache.url = value;
    }
    if let Some(value) = lookup("BIND_ADDRESS") {
        settings.listener.bind_address = value;
    }
    if let Some(value) = lookup("LOG_LEVEL") {
        settings.observability.log_level = value;
    }

    Ok(())
}

/// Split a comma separated list such as `"DK, SE,NO"`.
pub fn parse_country_codes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}
