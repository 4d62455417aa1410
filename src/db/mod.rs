//! Relational database access.
//!
//! The pool is created lazily: no connection is opened until the first
//! query, which lets the startup sequence own the retry on an unreachable
//! database.

pub mod schema;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

pub use schema::{PgSchema, SchemaBootstrap, SchemaError, SCHEMA_STATEMENTS};

/// Build the connection pool without connecting.
pub fn connect_lazy(config: &DatabaseConfig) -> Result<PgPool, SchemaError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_lazy(&config.url)?;
    Ok(pool)
}
