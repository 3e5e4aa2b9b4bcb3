use crate::actions::Dispatcher;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::event::ClientEvent;
use crate::http::HttpTransport;
use crate::managers::{EntitlementManager, SkuManager, SubscriptionManager};
use crate::sink::EventSink;
use crate::transport::Transport;
use accord_cache::{Cache, Tombstones};
use accord_types::{Snowflake, Timestamp};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
struct Identity {
    user_id: Option<Snowflake>,
    application_id: Option<Snowflake>,
}

/// The owning context: caches, tombstones, the event sink and the transport.
///
/// Everything the dispatcher and managers touch hangs off one `Client`, so
/// several clients in one process never share state.
pub struct Client {
    config: ClientConfig,
    cache: Arc<Cache>,
    tombstones: Arc<Tombstones>,
    sink: Arc<dyn EventSink>,
    transport: Arc<dyn Transport>,
    identity: RwLock<Identity>,
}

impl Client {
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>, sink: Arc<dyn EventSink>) -> Self {
        let identity = Identity {
            user_id: None,
            application_id: config.application_id,
        };
        Self {
            cache: Arc::new(Cache::new(config.max_cached_messages)),
            tombstones: Arc::new(Tombstones::new(config.tombstone_horizon())),
            sink,
            transport,
            identity: RwLock::new(identity),
            config,
        }
    }

    /// A client talking to the REST API over HTTP.
    pub fn with_http(config: ClientConfig, sink: Arc<dyn EventSink>) -> ClientResult<Self> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::new(config, transport, sink))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<Cache> {
        &self.cache
    }

    pub fn tombstones(&self) -> &Arc<Tombstones> {
        &self.tombstones
    }

    /// The current user, once READY has been seen.
    pub fn user_id(&self) -> Option<Snowflake> {
        self.identity().user_id
    }

    /// The application id, configured or learned from READY.
    pub fn application_id(&self) -> Option<Snowflake> {
        self.identity().application_id
    }

    pub fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(self)
    }

    pub fn entitlements(&self) -> EntitlementManager<'_> {
        EntitlementManager::new(self)
    }

    pub fn skus(&self) -> SkuManager<'_> {
        SkuManager::new(self)
    }

    pub fn subscriptions(&self) -> SubscriptionManager<'_> {
        SubscriptionManager::new(self)
    }

    /// Drops tombstones older than the configured horizon.
    pub fn sweep_tombstones(&self) -> usize {
        let removed = self.tombstones.sweep(Timestamp::now());
        if removed > 0 {
            debug!(removed, "swept tombstones");
        }
        removed
    }

    pub(crate) fn sink(&self) -> &dyn EventSink {
        &*self.sink
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        &*self.transport
    }

    pub(crate) fn emit(&self, event: ClientEvent) {
        self.sink.emit(event);
    }

    pub(crate) fn require_application(&self) -> ClientResult<Snowflake> {
        self.application_id().ok_or(ClientError::MissingApplication)
    }

    pub(crate) fn set_user_id(&self, user_id: Snowflake) {
        self.identity_mut(|identity| identity.user_id = Some(user_id));
    }

    pub(crate) fn set_application_id(&self, application_id: Snowflake) {
        self.identity_mut(|identity| identity.application_id = Some(application_id));
    }

    fn identity(&self) -> Identity {
        *self.identity.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn identity_mut(&self, update: impl FnOnce(&mut Identity)) {
        update(&mut self.identity.write().unwrap_or_else(PoisonError::into_inner));
    }
}
