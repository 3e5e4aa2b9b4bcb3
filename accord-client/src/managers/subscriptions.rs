use super::{CachedManager, Fetched, Resolvable};
use crate::client::Client;
use crate::error::{ClientError, ClientResult};
use crate::transport::RestRequest;
use accord_cache::{Cached, Collection};
use accord_model::Subscription;
use accord_types::Snowflake;
use std::ops::Deref;

/// Options for [`SubscriptionManager::fetch`]. Subscriptions are listed per
/// SKU, so `sku_id` is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSubscriptions {
    pub sku_id: Option<Snowflake>,
    pub id: Option<Snowflake>,
    pub before: Option<Snowflake>,
    pub after: Option<Snowflake>,
    pub limit: Option<u32>,
    pub cache: bool,
    pub force: bool,
}

impl Default for FetchSubscriptions {
    fn default() -> Self {
        Self {
            sku_id: None,
            id: None,
            before: None,
            after: None,
            limit: None,
            cache: true,
            force: false,
        }
    }
}

impl FetchSubscriptions {
    pub fn for_sku(sku_id: Snowflake) -> Self {
        Self {
            sku_id: Some(sku_id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: Snowflake) -> Self {
        self.id = Some(id);
        self
    }
}

/// Subscriptions to the application's SKUs.
pub struct SubscriptionManager<'a> {
    base: CachedManager<'a, Subscription>,
}

impl<'a> SubscriptionManager<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self {
            base: CachedManager::new(client, &client.cache().subscriptions),
        }
    }

    /// Fetches one subscription when `options.id` is set, otherwise lists the
    /// SKU's subscriptions.
    pub async fn fetch(&self, options: FetchSubscriptions) -> ClientResult<Fetched<Subscription>> {
        let sku_id = required_sku(&options)?;
        match options.id {
            Some(id) => Ok(Fetched::One(
                self.fetch_by_id(sku_id, id, options.force, options.cache).await?,
            )),
            None => Ok(Fetched::Many(self.list(sku_id, &options).await?)),
        }
    }

    pub async fn fetch_one<'r>(
        &self,
        sku_id: Snowflake,
        subscription: impl Into<Resolvable<'r, Subscription>>,
    ) -> ClientResult<Cached<Subscription>> {
        let id = self
            .resolve_id(subscription)
            .ok_or_else(|| ClientError::validation("subscription is not resolvable"))?;
        self.fetch_by_id(sku_id, id, false, true).await
    }

    /// Lists the SKU's subscriptions. `options.id` is ignored.
    pub async fn fetch_many(&self, options: FetchSubscriptions) -> ClientResult<Collection<Subscription>> {
        let sku_id = required_sku(&options)?;
        self.list(sku_id, &options).await
    }

    pub(crate) async fn fetch_by_id(
        &self,
        sku_id: Snowflake,
        id: Snowflake,
        force: bool,
        cache: bool,
    ) -> ClientResult<Cached<Subscription>> {
        if let Some(cached) = self.cached(id, force) {
            return Ok(cached);
        }
        let request = RestRequest::get(format!("/skus/{sku_id}/subscriptions/{id}"));
        self.fetch_entity(request, cache).await
    }

    async fn list(&self, sku_id: Snowflake, options: &FetchSubscriptions) -> ClientResult<Collection<Subscription>> {
        let request = RestRequest::get(format!("/skus/{sku_id}/subscriptions"))
            .query_opt("before", options.before)
            .query_opt("after", options.after)
            .query_opt("limit", options.limit);
        self.fetch_collection(request, options.cache).await
    }
}

fn required_sku(options: &FetchSubscriptions) -> ClientResult<Snowflake> {
    options
        .sku_id
        .ok_or_else(|| ClientError::validation("fetching subscriptions requires a sku"))
}

impl<'a> Deref for SubscriptionManager<'a> {
    type Target = CachedManager<'a, Subscription>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}
