//! Relational schema bootstrap.
//!
//! Statements are additive only: tables are created when missing and never
//! dropped or altered, so running the bootstrap against a populated database
//! is a no-op.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

/// Errors raised while preparing the schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Something that can make sure the schema exists.
#[async_trait]
pub trait SchemaBootstrap: Send + Sync {
    async fn ensure_schema(&self) -> Result<(), SchemaError>;
}

/// Catalogue tables read by the media, genre, provider and person routers.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS genre (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS provider (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        logo_path TEXT,
        display_priority INTEGER
    )"#,
    r#"CREATE TABLE IF NOT EXISTS media (
        id TEXT PRIMARY KEY,
        media_type TEXT NOT NULL,
        title TEXT,
        original_title TEXT,
        overview TEXT,
        release_date DATE,
        popularity DOUBLE PRECISION,
        poster_path TEXT,
        backdrop_path TEXT,
        country_code TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS media_genre (
        media_id TEXT NOT NULL REFERENCES media(id) ON DELETE CASCADE,
        genre_id INTEGER NOT NULL REFERENCES genre(id) ON DELETE CASCADE,
        PRIMARY KEY (media_id, genre_id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS media_provider (
        media_id TEXT NOT NULL REFERENCES media(id) ON DELETE CASCADE,
        provider_id INTEGER NOT NULL REFERENCES provider(id) ON DELETE CASCADE,
        country_code TEXT NOT NULL,
        offer_type TEXT NOT NULL,
        PRIMARY KEY (media_id, provider_id, country_code, offer_type)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS person (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        profile_path TEXT,
        popularity DOUBLE PRECISION
    )"#,
];

/// PostgreSQL schema bootstrap.
#[derive(Clone)]
pub struct PgSchema {
    pool: PgPool,
}

impl PgSchema {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaBootstrap for PgSchema {
    async fn ensure_schema(&self) -> Result<(), SchemaError> {
        let mut tx = self.pool.begin().await?;
        for statement in SCHEMA_STATEMENTS {
            sqlx::query(*statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;

        tracing::info!(tables = SCHEMA_STATEMENTS.len(), "Database schema ensured");
        Ok(())
    }
}
