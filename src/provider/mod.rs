//! Provider subsystem.
//!
//! # Data Flow
//! ```text
//! Host framework
//!     → interface.rs (ContractProvider: lookups, events, signing)
//!     → plugin.rs (ConnexProvider: session, connector calls)
//!     → method.rs (method handle + gas explainer)
//!     → blockchain / store subsystems
//! ```

pub mod interface;
pub mod method;
pub mod plugin;
pub mod settings;
pub mod types;

pub use interface::ContractProvider;
pub use method::ContractMethod;
pub use plugin::ConnexProvider;
pub use settings::{ConnexSettings, InstanceOptions, ProviderInstance};
pub use types::{
    MethodConfig, ProviderError, ProviderResult, ProviderType, SigningOptions, SigningOutcome,
};
