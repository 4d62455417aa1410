//! Settings validation.
//!
//! Serde handles syntax; this module checks values. Every problem is
//! reported, not just the first one.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::Settings;

/// A single semantic problem with the loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("supported_country_codes must not be empty")]
    NoCountryCodes,

    #[error("supported_country_codes contains a blank entry")]
    BlankCountryCode,

    #[error("invalid search url '{0}'")]
    InvalidSearchUrl(String),

    #[error("database url must not be empty")]
    EmptyDatabaseUrl,

    #[error("cache url must not be empty")]
    EmptyCacheUrl,

    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("request timeout must be greater than zero")]
    ZeroRequestTimeout,

    #[error("streamchaser_url is required in production")]
    MissingSiteUrl,
}

/// Validate settings, returning all errors found.
pub fn validate_settings(settings: &Settings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if settings.supported_country_codes.is_empty() {
        errors.push(ValidationError::NoCountryCodes);
    } else if settings
        .supported_country_codes
        .iter()
        .any(|code| code.trim().is_empty())
    {
        errors.push(ValidationError::BlankCountryCode);
    }

    match url::Url::parse(&settings.search.url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::InvalidSearchUrl(settings.search.url.clone())),
    }

    if settings.database.url.trim().is_empty() {
        errors.push(ValidationError::EmptyDatabaseUrl);
    }

    if settings.cache.url.trim().is_empty() {
        errors.push(ValidationError::EmptyCacheUrl);
    }

    if settings.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            settings.listener.bind_address.clone(),
        ));
    }

    if settings.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if settings.app_environment.is_production() && settings.streamchaser_url.trim().is_empty() {
        errors.push(ValidationError::MissingSiteUrl);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::Environment;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(validate_settings(&Settings::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut settings = Settings::default();
        settings.supported_country_codes.clear();
        settings.search.url = "search:7700".to_string();
        settings.listener.request_timeout_secs = 0;

        let errors = validate_settings(&settings).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::NoCountryCodes,
                ValidationError::InvalidSearchUrl("search:7700".to_string()),
                ValidationError::ZeroRequestTimeout,
            ]
        );
    }

    #[test]
    fn test_production_requires_site_url() {
        let mut settings = Settings::default();
        settings.app_environment = Environment::Production;
        settings.streamchaser_url = String::new();

        let errors = validate_settings(&settings).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingSiteUrl]);

        settings.app_environment = Environment::Development;
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_blank_country_code_rejected() {
        let mut settings = Settings::default();
        settings.supported_country_codes = vec!["DK".into(), "  ".into()];
        assert_eq!(
            validate_settings(&settings),
            Err(vec![ValidationError::BlankCountryCode])
        );
    }
}
