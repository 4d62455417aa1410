//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Configure search (production) → Ensure schema (one retry) → Start listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain requests → Close cache → Close pool
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup, nothing runs concurrently before the listener starts
//! - Any startup error is fatal and ends the process

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{release_resources, Shutdown};
pub use signals::{spawn_signal_listener, wait_for_signal};
pub use startup::{
    ensure_schema_with_retry, run_startup, StartupError, StartupReport, SCHEMA_RETRY_DELAY,
};
