//! Cross-origin policy.
//!
//! Production accepts the public site over http and https plus Vercel
//! preview deployments. Every other environment accepts any origin.
//! Credentials are allowed, so origins, methods and headers are mirrored
//! rather than answered with a wildcard.

use axum::http::request::Parts;
use axum::http::HeaderValue;
use regex::Regex;
use thiserror::Error;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::Settings;

/// Origins of preview deployments.
pub const PREVIEW_ORIGIN_PATTERN: &str = r"^https://streamchaser.*.vercel.app$";

#[derive(Debug, Error)]
pub enum CorsError {
    #[error("invalid origin '{0}'")]
    InvalidOrigin(String),

    #[error("invalid origin pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Exact origins allowed in production for a site host.
pub fn production_origins(site: &str) -> Vec<String> {
    let site = site.trim().trim_end_matches('/');
    vec![format!("http://{}", site), format!("https://{}", site)]
}

pub fn cors_layer(settings: &Settings) -> Result<CorsLayer, CorsError> {
    let layer = CorsLayer::new()
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    if !settings.app_environment.is_production() {
        tracing::info!("Running CORS origins in development mode");
        return Ok(layer.allow_origin(AllowOrigin::mirror_request()));
    }

    let exact = production_origins(&settings.streamchaser_url)
        .into_iter()
        .map(|origin| {
            HeaderValue::from_str(&origin).map_err(|_| CorsError::InvalidOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let preview = Regex::new(PREVIEW_ORIGIN_PATTERN)?;

    tracing::info!(site = %settings.streamchaser_url, "CORS restricted to site origins");

    Ok(layer.allow_origin(AllowOrigin::predicate(
        move |origin: &HeaderValue, _parts: &Parts| {
            exact.contains(origin)
                || origin
                    .to_str()
                    .map(|value| preview.is_match(value))
                    .unwrap_or(false)
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_origins() {
        assert_eq!(
            production_origins("streamchaser.tv/"),
            vec!["http://streamchaser.tv", "https://streamchaser.tv"]
        );
    }

    #[test]
    fn test_preview_pattern() {
        let preview = Regex::new(PREVIEW_ORIGIN_PATTERN).unwrap();
        assert!(preview.is_match("https://streamchaser-git-feature-team.vercel.app"));
        assert!(preview.is_match("https://streamchaser.vercel.app"));
        assert!(!preview.is_match("http://streamchaser-preview.vercel.app"));
        assert!(!preview.is_match("https://streamchaser-x.vercel.app.evil.com"));
        assert!(!preview.is_match("https://other.vercel.app"));
    }
}
