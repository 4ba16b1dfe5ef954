//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Provider, signer and store produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Whatever metrics recorder the host installs
//! ```

pub mod logging;
pub mod metrics;
