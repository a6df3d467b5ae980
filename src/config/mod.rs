//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (NOMAD_* / CONSUL_* environment overrides)
//!     → validation.rs (semantic checks)
//!     → WatcherConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_default, ConfigError};
pub use schema::{
    ConsulConfig, NomadConfig, ObservabilityConfig, RetryConfig, WatchConfig, WatcherConfig,
};
