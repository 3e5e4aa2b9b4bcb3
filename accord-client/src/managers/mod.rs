//! Managers pair one cache store with the REST calls for its resource.
//!
//! Fetches serve from the store unless forced; remote results are upserted so
//! callers and later events share the same live instance. Remote failures
//! propagate unmodified and leave the cache untouched.

mod entitlements;
mod ext;
mod polls;
mod skus;
mod subscriptions;

pub use entitlements::{EntitlementManager, FetchEntitlements};
pub use ext::{EntitlementExt, MessageExt, SkuExt, SubscriptionExt};
pub use polls::FetchPollVoters;
pub use skus::{FetchSkus, SkuManager};
pub use subscriptions::{FetchSubscriptions, SubscriptionManager};

use crate::client::Client;
use crate::error::ClientResult;
use crate::sink::SinkDiagnostics;
use crate::transport::RestRequest;
use accord_cache::{Cached, Collection, EntityStore};
use accord_model::{DecodeContext, Entity};
use accord_types::Snowflake;
use serde_json::Value;
use std::fmt;

/// Anything that names an entity: its id, an id string, the entity itself, or
/// a cached handle.
pub enum Resolvable<'r, T> {
    Id(Snowflake),
    /// An id in string form. Resolves to nothing unless it parses.
    Raw(&'r str),
    Entity(&'r T),
    Cached(&'r Cached<T>),
}

impl<T: Entity<Key = Snowflake>> Resolvable<'_, T> {
    /// The named id, if the input is well-formed.
    pub fn id(&self) -> Option<Snowflake> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Raw(raw) => Snowflake::parse(raw).ok(),
            Self::Entity(entity) => Some(entity.key()),
            Self::Cached(handle) => Some(handle.id()),
        }
    }
}

impl<T: Entity> fmt::Debug for Resolvable<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => f.debug_tuple("Id").field(id).finish(),
            Self::Raw(raw) => f.debug_tuple("Raw").field(raw).finish(),
            Self::Entity(entity) => f.debug_tuple("Entity").field(entity).finish(),
            Self::Cached(handle) => f.debug_tuple("Cached").field(handle).finish(),
        }
    }
}

impl<T> From<Snowflake> for Resolvable<'_, T> {
    fn from(id: Snowflake) -> Self {
        Self::Id(id)
    }
}

impl<'r, T> From<&'r T> for Resolvable<'r, T> {
    fn from(entity: &'r T) -> Self {
        Self::Entity(entity)
    }
}

impl<'r, T> From<&'r Cached<T>> for Resolvable<'r, T> {
    fn from(handle: &'r Cached<T>) -> Self {
        Self::Cached(handle)
    }
}

/// Result of a fetch that may name one entity or list many.
#[derive(Debug)]
pub enum Fetched<T: Entity> {
    One(Cached<T>),
    Many(Collection<T>),
}

impl<T: Entity> Fetched<T> {
    pub fn one(self) -> Option<Cached<T>> {
        match self {
            Self::One(handle) => Some(handle),
            Self::Many(_) => None,
        }
    }

    pub fn many(self) -> Option<Collection<T>> {
        match self {
            Self::One(_) => None,
            Self::Many(collection) => Some(collection),
        }
    }
}

/// Store access shared by every manager.
pub struct CachedManager<'a, T: Entity> {
    client: &'a Client,
    store: &'a EntityStore<T>,
}

impl<'a, T: Entity<Key = Snowflake>> CachedManager<'a, T> {
    pub(crate) fn new(client: &'a Client, store: &'a EntityStore<T>) -> Self {
        Self { client, store }
    }

    /// The backing store.
    pub fn cache(&self) -> &'a EntityStore<T> {
        self.store
    }

    /// The cached instance named by `resolvable`. A handle resolves to itself.
    pub fn resolve<'r>(&self, resolvable: impl Into<Resolvable<'r, T>>) -> Option<Cached<T>> {
        match resolvable.into() {
            Resolvable::Cached(handle) => Some(handle.clone()),
            other => self.store.get(&other.id()?),
        }
    }

    /// The id named by `resolvable`. Malformed input yields `None`.
    pub fn resolve_id<'r>(&self, resolvable: impl Into<Resolvable<'r, T>>) -> Option<Snowflake> {
        resolvable.into().id()
    }

    pub(crate) fn client(&self) -> &'a Client {
        self.client
    }

    /// The cached instance for `id`, unless `force` asks for a refetch.
    pub(crate) fn cached(&self, id: Snowflake, force: bool) -> Option<Cached<T>> {
        if force {
            return None;
        }
        self.store.get(&id)
    }

    /// Issues `request` and decodes the single entity it returns.
    pub(crate) async fn fetch_entity(&self, request: RestRequest, cache: bool) -> ClientResult<Cached<T>> {
        let raw = self.client.transport().request(request).await?;
        self.add(&raw, cache)
    }

    /// Issues `request` and decodes the list it returns, in server order.
    pub(crate) async fn fetch_collection(&self, request: RestRequest, cache: bool) -> ClientResult<Collection<T>> {
        let raw = self.client.transport().request(request).await?;
        let items: Vec<Value> = serde_json::from_value(raw)?;
        items.iter().map(|item| self.add(item, cache)).collect()
    }

    /// Decodes a REST payload into the store (or detached when `cache` is off).
    pub(crate) fn add(&self, raw: &Value, cache: bool) -> ClientResult<Cached<T>> {
        let diagnostics =
            SinkDiagnostics::new(self.client.sink(), self.client.config().emit_debug);
        let ctx = DecodeContext::with_diagnostics(&diagnostics);
        Ok(self.store.add(raw, cache, &ctx)?)
    }
}
