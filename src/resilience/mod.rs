//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Waiting on the connector (receipt polling):
//!     → backoff.rs (jittered exponential delay between polls)
//!     → bounded by the confirmation timeout in blockchain::transaction
//! ```

pub mod backoff;

pub use backoff::{calculate_backoff, PollSchedule};
