//! Contract description subsystem.
//!
//! - `abi.rs`: contract imports (ABI + address per chain tag) and name lookup
//! - `events.rs`: event filter options resolved into connector queries

pub mod abi;
pub mod events;

pub use abi::{AbiEntry, ContractImport, ImportError};
pub use events::{EventFilter, EventQuery, FilterRange, Order, PageOptions, RangeUnit, TopicCriteria};
