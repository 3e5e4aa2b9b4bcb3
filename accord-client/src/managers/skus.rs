use super::{CachedManager, Fetched, Resolvable};
use crate::client::Client;
use crate::error::{ClientError, ClientResult};
use crate::transport::RestRequest;
use accord_cache::{Cached, Collection};
use accord_model::Sku;
use accord_types::Snowflake;
use std::ops::Deref;

/// Options for [`SkuManager::fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSkus {
    pub id: Option<Snowflake>,
    pub cache: bool,
    pub force: bool,
}

impl Default for FetchSkus {
    fn default() -> Self {
        Self {
            id: None,
            cache: true,
            force: false,
        }
    }
}

impl FetchSkus {
    pub fn id(id: Snowflake) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}

/// SKUs of the client's application.
pub struct SkuManager<'a> {
    base: CachedManager<'a, Sku>,
}

impl<'a> SkuManager<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self {
            base: CachedManager::new(client, &client.cache().skus),
        }
    }

    pub async fn fetch(&self, options: FetchSkus) -> ClientResult<Fetched<Sku>> {
        match options.id {
            Some(id) => Ok(Fetched::One(self.fetch_by_id(id, options.force, options.cache).await?)),
            None => Ok(Fetched::Many(self.fetch_many(options.cache).await?)),
        }
    }

    pub async fn fetch_one<'r>(&self, sku: impl Into<Resolvable<'r, Sku>>) -> ClientResult<Cached<Sku>> {
        let id = self
            .resolve_id(sku)
            .ok_or_else(|| ClientError::validation("sku is not resolvable"))?;
        self.fetch_by_id(id, false, true).await
    }

    /// Lists every SKU of the application, in server order.
    pub async fn fetch_many(&self, cache: bool) -> ClientResult<Collection<Sku>> {
        let application_id = self.client().require_application()?;
        let request = RestRequest::get(format!("/applications/{application_id}/skus"));
        self.fetch_collection(request, cache).await
    }

    pub(crate) async fn fetch_by_id(&self, id: Snowflake, force: bool, cache: bool) -> ClientResult<Cached<Sku>> {
        if let Some(cached) = self.cached(id, force) {
            return Ok(cached);
        }
        let application_id = self.client().require_application()?;
        let request = RestRequest::get(format!("/applications/{application_id}/skus/{id}"));
        self.fetch_entity(request, cache).await
    }
}

impl<'a> Deref for SkuManager<'a> {
    type Target = CachedManager<'a, Sku>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}
