//! Map actions: named store mutations run after a dispatched transaction confirms.

use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde_json::Value;
use thiserror::Error;

use crate::provider::{ConnexProvider, ProviderError};

/// Why a mutation produced no value.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("Mutation failed: {0}")]
    Failed(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Input to a mutation: the provider that signed, and the call arguments.
#[derive(Clone)]
pub struct MutationContext {
    pub provider: ConnexProvider,
    pub args: Vec<Value>,
}

pub type MutationFuture = BoxFuture<'static, Result<Value, MutationError>>;

/// Async mutation producing the new value for the action's getter key.
pub type Mutation = Arc<dyn Fn(MutationContext) -> MutationFuture + Send + Sync>;

/// A named store action.
#[derive(Clone)]
pub struct MapAction {
    /// State key the mutation result is written to.
    pub getter: String,
    /// Event name the host listens on to refresh this key.
    pub on_filter: String,
    pub mutation: Mutation,
}

impl MapAction {
    pub fn new<F, Fut>(getter: impl Into<String>, on_filter: impl Into<String>, mutation: F) -> Self
    where
        F: Fn(MutationContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, MutationError>> + Send + 'static,
    {
        Self {
            getter: getter.into(),
            on_filter: on_filter.into(),
            mutation: Arc::new(move |ctx| mutation(ctx).boxed()),
        }
    }

    pub async fn run(&self, ctx: MutationContext) -> Result<Value, MutationError> {
        (self.mutation)(ctx).await
    }
}

impl std::fmt::Debug for MapAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapAction")
            .field("getter", &self.getter)
            .field("on_filter", &self.on_filter)
            .finish()
    }
}
