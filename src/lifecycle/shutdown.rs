//! Shutdown coordination.

use sqlx::PgPool;
use tokio::sync::broadcast;

use crate::cache::CacheHandle;

/// Coordinator for graceful shutdown.
///
/// Provides a broadcast channel that all long-running tasks can subscribe to.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of tasks still listening.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Release process-wide resources once the server has stopped.
///
/// The cache connection goes first, then the database pool.
pub async fn release_resources(cache: &CacheHandle, db: &PgPool) {
    if !cache.close().await {
        tracing::debug!("Cache client was already closed");
    }
    db.close().await;
    tracing::info!("Resources released");
}
