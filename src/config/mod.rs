//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProviderConfig (validated, immutable)
//!     → shared via Arc with every provider instance
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ConfirmationConfig;
pub use schema::EventsConfig;
pub use schema::ObservabilityConfig;
pub use schema::ProviderConfig;
pub use schema::SigningConfig;
