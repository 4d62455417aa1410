//! Shared cache client.
//!
//! One `CacheHandle` is opened at process start and closed once at shutdown.
//! The Redis connection is established on first use; after `close` the
//! handle refuses further work.

use std::sync::atomic::{AtomicBool, Ordering};

use redis::aio::ConnectionManager;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::config::CacheConfig;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("cache client is closed")]
    Closed,
}

pub struct CacheHandle {
    client: redis::Client,
    connection: Mutex<Option<ConnectionManager>>,
    closed: AtomicBool,
}

impl CacheHandle {
    /// Parse the URL and prepare the client. Does not connect.
    pub fn open(config: &CacheConfig) -> Result<Self, CacheError> {
        let client = redis::Client::open(config.url.as_str())?;
        Ok(Self {
            client,
            connection: Mutex::new(None),
            closed: AtomicBool::new(false),
        })
    }

    /// Shared connection, created on first call.
    pub async fn connection(&self) -> Result<ConnectionManager, CacheError> {
        let mut guard = self.connection.lock().await;
        if self.is_closed() {
            return Err(CacheError::Closed);
        }
        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }

        let conn = ConnectionManager::new(self.client.clone()).await?;
        *guard = Some(conn.clone());
        tracing::debug!("Cache connection established");
        Ok(conn)
    }

    pub async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    /// Release the underlying connection.
    ///
    /// Returns `false` if the handle was already closed.
    pub async fn close(&self) -> bool {
        if self.closed.swap(true, Ordering::SeqCst) {
            return false;
        }
        let released = self.connection.lock().await.take();
        tracing::info!(had_connection = released.is_some(), "Cache client closed");
        true
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
