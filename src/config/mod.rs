//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (dotenv, optional)
//!     → config file (TOML, optional)
//!     → loader.rs (parse, then environment overrides)
//!     → validation.rs (semantic checks)
//!     → Settings (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Settings are built once at process entry and never reloaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_settings, load_settings_with, ConfigError};
pub use schema::{
    CacheConfig, DatabaseConfig, Environment, ListenerConfig, ObservabilityConfig, SearchConfig,
    Settings,
};
pub use validation::ValidationError;
