//! Reactive store subsystem.
//!
//! # Data Flow
//! ```text
//! prepare_signing(dispatch = "action")
//!     → wait for receipt
//!     → actions.rs (run the map action's mutation)
//!     → reactive.rs (merge result under the action's getter, notify observers)
//! ```

pub mod actions;
pub mod reactive;

pub use actions::{MapAction, Mutation, MutationContext, MutationError};
pub use reactive::{ReactiveStore, StoreState, SubscriberScope, SubscriptionId};
