//! Streamchaser API server library.
//!
//! # Architecture Overview
//!
//! ```text
//!   process entry (main.rs)
//!        │
//!        ├─ config         Settings: TOML + environment, validated once
//!        ├─ observability  tracing subscriber, Prometheus exporter
//!        ├─ resources      MeiliClient · PgPool (lazy) · CacheHandle
//!        │
//!        ├─ lifecycle::startup
//!        │     ├─ search::update_index   (production only)
//!        │     └─ db schema bootstrap    (retry once after 2s)
//!        │
//!        ├─ http::HttpServer             root · health · CORS · request id
//!        │
//!        └─ lifecycle::shutdown          close cache → close pool
//! ```

pub mod cache;
pub mod config;
pub mod db;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod search;
pub mod util;

pub use config::Settings;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
