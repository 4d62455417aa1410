//! Search index subsystem.
//!
//! # Data Flow
//! ```text
//! Settings.supported_country_codes
//!     → settings.rs (IndexSettings per country, index `media_{code}`)
//!     → configurator.rs (four settings updates per index, in order)
//!     → client.rs (SearchService; MeiliClient over HTTP)
//! ```
//!
//! # Design Decisions
//! - Runs at startup in production only
//! - Idempotent: every call replaces a whole settings list
//! - Fatal on first failure, no retry

pub mod client;
pub mod configurator;
pub mod settings;

pub use client::{MeiliClient, SearchError, SearchService, SettingsCategory};
pub use configurator::{apply_index_settings, update_index};
pub use settings::{index_name, IndexSettings};
