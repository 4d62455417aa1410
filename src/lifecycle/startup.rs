//! Startup orchestration.
//!
//! # Order
//! 1. Production only: configure the per-country search indexes
//! 2. Ensure the relational schema, retrying once after `SCHEMA_RETRY_DELAY`
//!
//! Both steps complete before the listener accepts traffic. A search failure
//! is fatal immediately; a schema failure is fatal on the second attempt.

use std::time::Duration;

use thiserror::Error;

use crate::config::Settings;
use crate::db::{SchemaBootstrap, SchemaError};
use crate::observability::metrics;
use crate::search::{update_index, SearchError, SearchService};

/// Wait between the first failed schema attempt and the retry.
pub const SCHEMA_RETRY_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("search index configuration failed: {0}")]
    Search(#[from] SearchError),

    #[error("database schema creation failed: {0}")]
    Schema(#[from] SchemaError),
}

/// What the startup sequence did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupReport {
    /// Number of search indexes configured; `None` when the step was skipped.
    pub indexes_configured: Option<usize>,
    /// Schema attempts made, 1 or 2.
    pub schema_attempts: u32,
}

/// Run the startup sequence.
pub async fn run_startup<S, B>(
    settings: &Settings,
    search: &S,
    schema: &B,
) -> Result<StartupReport, StartupError>
where
    S: SearchService + ?Sized,
    B: SchemaBootstrap + ?Sized,
{
    let indexes_configured = if settings.app_environment.is_production() {
        Some(update_index(search, &settings.supported_country_codes).await?)
    } else {
        // Development servers reload often; leave the indexes alone there.
        tracing::info!(
            environment = %settings.app_environment,
            "Skipping search index configuration"
        );
        None
    };

    let schema_attempts = ensure_schema_with_retry(schema, SCHEMA_RETRY_DELAY).await?;

    Ok(StartupReport {
        indexes_configured,
        schema_attempts,
    })
}

/// Ensure the schema, retrying exactly once after `delay`.
///
/// Returns the number of attempts made.
pub async fn ensure_schema_with_retry<B>(schema: &B, delay: Duration) -> Result<u32, SchemaError>
where
    B: SchemaBootstrap + ?Sized,
{
    match schema.ensure_schema().await {
        Ok(()) => {
            metrics::record_schema_attempt(true);
            return Ok(1);
        }
        Err(e) => {
            metrics::record_schema_attempt(false);
            tracing::warn!(
                error = %e,
                retry_in_secs = delay.as_secs(),
                "Schema creation failed, will try to connect to the database again"
            );
        }
    }

    tokio::time::sleep(delay).await;

    let result = schema.ensure_schema().await;
    metrics::record_schema_attempt(result.is_ok());
    result?;
    Ok(2)
}
