//! Connex provider: the host-framework adapter over an injected connector.
//!
//! # Responsibilities
//! - Hold contract import, config and the session injected by the host
//! - Resolve ABI entries by name and hand them to the connector
//! - Mediate signing through the user prompt
//! - After a dispatched transaction confirms, run its map action and
//!   publish exactly one merged state to the store

use std::sync::Arc;

use alloy::primitives::Address;
use arc_swap::ArcSwap;
use async_trait::async_trait;
use serde_json::Value;

use crate::blockchain::{
    wait_for_confirmation, AccountVisitor, AskSigning, CallOutput, ChainTag, Connector, EventLog,
    EventVisitor, TxSigner, TxSigningRequest,
};
use crate::config::ProviderConfig;
use crate::contract::{AbiEntry, ContractImport, EventFilter, EventQuery};
use crate::observability::metrics;
use crate::provider::interface::ContractProvider;
use crate::provider::method::ContractMethod;
use crate::provider::settings::{ConnexSettings, ProviderInstance};
use crate::provider::types::{
    ProviderError, ProviderResult, ProviderType, SigningOptions, SigningOutcome,
};
use crate::store::{MutationContext, ReactiveStore, SubscriberScope, SubscriptionId};

/// Host-injected state, swapped whole on every settings change.
#[derive(Clone, Default)]
struct Session {
    connector: Option<Arc<dyn Connector>>,
    chain_tag: Option<ChainTag>,
    default_account: Option<Address>,
    store: Option<Arc<ReactiveStore>>,
    ask_signing: Option<AskSigning>,
    address: Option<Address>,
}

struct Inner {
    contract: ContractImport,
    config: Arc<ProviderConfig>,
    session: ArcSwap<Session>,
    /// Owner of this provider's store subscriptions.
    scope: SubscriberScope,
}

/// Connex-backed contract provider. Cloning shares the same session.
#[derive(Clone)]
pub struct ConnexProvider {
    inner: Arc<Inner>,
}

impl ConnexProvider {
    pub fn new(contract: ContractImport) -> Self {
        Self::with_config(contract, Arc::new(ProviderConfig::default()))
    }

    pub fn with_config(contract: ContractImport, config: Arc<ProviderConfig>) -> Self {
        Self {
            inner: Arc::new(Inner {
                contract,
                config,
                session: ArcSwap::from_pointee(Session::default()),
                scope: SubscriberScope::next(),
            }),
        }
    }

    pub fn contract(&self) -> &ContractImport {
        &self.inner.contract
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.inner.config
    }

    pub fn chain_tag(&self) -> Option<ChainTag> {
        self.inner.session.load().chain_tag
    }

    pub fn default_account(&self) -> Option<Address> {
        self.inner.session.load().default_account
    }

    /// Contract address resolved by the last successful `connect`.
    pub fn address(&self) -> Option<Address> {
        self.inner.session.load().address
    }

    pub fn store(&self) -> Option<Arc<ReactiveStore>> {
        self.inner.session.load().store.clone()
    }

    pub fn connector(&self) -> ProviderResult<Arc<dyn Connector>> {
        self.inner
            .session
            .load()
            .connector
            .clone()
            .ok_or(ProviderError::NotReady)
    }

    /// Observe a store key. `None` without a store or for an unknown key.
    pub fn subscribe<F>(&self, key: &str, callback: F) -> Option<SubscriptionId>
    where
        F: Fn(Option<&Value>) + Send + Sync + 'static,
    {
        self.store()?
            .subscribe_scoped(self.inner.scope, key, callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store().is_some_and(|store| store.unsubscribe(id))
    }

    fn session(&self) -> Arc<Session> {
        self.inner.session.load_full()
    }

    /// Drop this provider's observers on a store it no longer uses.
    fn release_store(&self, previous: &Session, current: Option<&Arc<ReactiveStore>>) {
        if let Some(old) = &previous.store {
            if current.map_or(true, |store| !Arc::ptr_eq(old, store)) {
                old.reset_scope(self.inner.scope);
            }
        }
    }

    /// Account visitor for the contract on the active chain.
    fn contract_account(&self) -> ProviderResult<Arc<dyn AccountVisitor>> {
        let session = self.session();
        let connector = session.connector.clone().ok_or(ProviderError::NotReady)?;
        let chain_tag = session
            .chain_tag
            .ok_or(ProviderError::MissingSettings(vec!["chain_tag"]))?;
        let address = session
            .address
            .or_else(|| self.inner.contract.address_for(chain_tag))
            .ok_or(ProviderError::NoContractAddress(chain_tag))?;
        Ok(connector.account(address))
    }
}

#[async_trait]
impl ContractProvider for ConnexProvider {
    fn describe(&self) -> String {
        let session = self.session();
        let show = |v: Option<String>| v.unwrap_or_else(|| "none".to_string());
        format!(
            "contract address: {}\nchain tag: {}\nowner: {}\n",
            show(session.address.map(|a| a.to_string())),
            show(session.chain_tag.map(|t| t.to_string())),
            show(session.default_account.map(|a| a.to_string())),
        )
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::Connex
    }

    fn on_ready(&self, settings: ConnexSettings) -> ProviderResult<()> {
        let current = settings.store.clone();
        let previous = self.inner.session.swap(Arc::new(Session {
            connector: settings.connector,
            chain_tag: settings.chain_tag,
            default_account: settings.default_account,
            store: settings.store,
            ask_signing: settings.ask_signing,
            address: None,
        }));
        self.release_store(&previous, current.as_ref());
        self.connect()
    }

    fn connect(&self) -> ProviderResult<()> {
        let session = self.session();

        if let Some(store) = &session.store {
            let dropped = store.reset_scope(self.inner.scope);
            if dropped > 0 {
                tracing::debug!(dropped, "Reset provider store subscriptions");
            }
        }

        let (Some(_), Some(chain_tag), Some(account)) = (
            &session.connector,
            session.chain_tag,
            session.default_account,
        ) else {
            let missing = ConnexSettings {
                connector: session.connector.clone(),
                chain_tag: session.chain_tag,
                default_account: session.default_account,
                ..ConnexSettings::default()
            }
            .missing();
            tracing::error!(missing = ?missing, "Provider connect without required settings");
            return Err(ProviderError::MissingSettings(missing));
        };

        let address = self.inner.contract.address_for(chain_tag);
        if address.is_none() {
            tracing::warn!(chain_tag = %chain_tag, "Contract import has no address for chain tag");
        }

        self.inner.session.rcu(|current| {
            let mut next = Session::clone(current);
            next.address = address;
            next
        });

        tracing::info!(
            chain_tag = %chain_tag,
            owner = %account,
            address = ?address,
            "Connex provider connected"
        );
        Ok(())
    }

    fn set_instance_options(&self, instance: ProviderInstance) {
        let options = instance.options;
        let previous = self.inner.session.rcu(|current| {
            let mut next = Session::clone(current);
            next.connector = Some(instance.provider.clone());
            if let Some(chain_tag) = options.chain_tag {
                next.chain_tag = Some(chain_tag);
                next.address = self.inner.contract.address_for(chain_tag);
            }
            if let Some(account) = options.default_account {
                next.default_account = Some(account);
            }
            if let Some(store) = &options.store {
                next.store = Some(store.clone());
            }
            if let Some(ask) = &options.ask_signing {
                next.ask_signing = Some(ask.clone());
            }
            next
        });

        if let Some(store) = &options.store {
            self.release_store(&previous, Some(store));
            store.reset_scope(self.inner.scope);
        }
    }

    fn get_abi_method(&self, name: &str) -> Option<AbiEntry> {
        self.inner.contract.entry(name)
    }

    fn get_method(&self, name: &str) -> ProviderResult<ContractMethod> {
        let abi = self
            .inner
            .contract
            .function(name)
            .ok_or_else(|| ProviderError::UnknownMethod(name.to_string()))?;
        let account = self.contract_account()?;
        Ok(ContractMethod::new(
            account.method(abi),
            self.connector()?,
            self.default_account(),
            self.config().signing.default_gas,
        ))
    }

    async fn call_method(&self, name: &str, args: &[Value]) -> ProviderResult<CallOutput> {
        let method = self.get_method(name)?;
        Ok(method.call(args).await?)
    }

    fn get_event(&self, name: &str) -> ProviderResult<Arc<dyn EventVisitor>> {
        let abi = self
            .inner
            .contract
            .event(name)
            .ok_or_else(|| ProviderError::UnknownEvent(name.to_string()))?;
        Ok(self.contract_account()?.event(abi))
    }

    async fn get_events(
        &self,
        name: &str,
        filter: Option<&EventFilter>,
    ) -> ProviderResult<Vec<EventLog>> {
        let event = self.get_event(name)?;
        let query = EventQuery::resolve(filter, &self.config().events);

        let logs = event.apply(&query).await?;
        metrics::record_event_query(name, logs.len());
        tracing::debug!(
            event = name,
            offset = query.offset,
            limit = query.limit,
            results = logs.len(),
            "Event query applied"
        );
        Ok(logs)
    }

    async fn prepare_signing(
        &self,
        name: &str,
        options: SigningOptions,
        args: Vec<Value>,
    ) -> ProviderResult<SigningOutcome> {
        let session = self.session();
        let connector = session.connector.clone().ok_or(ProviderError::NotReady)?;
        let method = self.get_method(name)?;

        let signer = options
            .from
            .or(session.default_account)
            .ok_or(ProviderError::MissingSettings(vec!["default_account"]))?;
        let gas = options.gas.unwrap_or(self.config().signing.default_gas);
        let clause = method.as_clause(&args)?;
        metrics::record_signing_request(name);

        let map_action = match (&options.dispatch, &session.store) {
            (Some(dispatch), Some(store)) => store
                .map_action(dispatch)
                .map(|action| (store.clone(), action)),
            _ => None,
        };
        if let (Some(dispatch), None) = (&options.dispatch, &map_action) {
            tracing::warn!(dispatch = %dispatch, "No map action registered; store will not update");
        }

        let request = TxSigningRequest {
            signer,
            gas,
            clauses: vec![clause],
            comment: options.comment.clone(),
        };
        let signer = TxSigner::new(connector.clone(), request).with_prompt(session.ask_signing.clone());

        let outcome = match signer.request_signing().await? {
            None => SigningOutcome::Declined,
            Some(tx) => match map_action {
                None => SigningOutcome::Signed(tx),
                Some((store, action)) => {
                    let receipt = wait_for_confirmation(
                        connector.as_ref(),
                        tx.txid,
                        &self.config().confirmation,
                    )
                    .await?;

                    let ctx = MutationContext {
                        provider: self.clone(),
                        args,
                    };
                    match action.run(ctx).await {
                        Ok(value) => {
                            let state = store.merge(&action.getter, value);
                            tracing::info!(
                                txid = %tx.txid,
                                getter = %action.getter,
                                "Store updated after confirmation"
                            );
                            SigningOutcome::Confirmed { tx, receipt, state }
                        }
                        Err(e) => {
                            tracing::error!(
                                txid = %tx.txid,
                                getter = %action.getter,
                                error = %e,
                                "Mutation error"
                            );
                            SigningOutcome::MutationFailed {
                                tx,
                                receipt,
                                error: e.to_string(),
                            }
                        }
                    }
                }
            },
        };

        metrics::record_signing_outcome(outcome.kind());
        Ok(outcome)
    }
}

impl std::fmt::Debug for ConnexProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.session();
        f.debug_struct("ConnexProvider")
            .field("chain_tag", &session.chain_tag)
            .field("default_account", &session.default_account)
            .field("address", &session.address)
            .field("connected", &session.connector.is_some())
            .finish()
    }
}
