use super::{CachedManager, Fetched, Resolvable};
use crate::client::Client;
use crate::error::{ClientError, ClientResult};
use crate::transport::RestRequest;
use accord_cache::{Cached, Collection};
use accord_model::{Entitlement, EntitlementOwnerType, Sku};
use accord_types::Snowflake;
use serde_json::json;
use std::ops::Deref;
use tracing::debug;

/// Options for [`EntitlementManager::fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchEntitlements {
    /// Fetch this one entitlement instead of listing.
    pub id: Option<Snowflake>,
    pub user_id: Option<Snowflake>,
    pub sku_ids: Vec<Snowflake>,
    pub guild_id: Option<Snowflake>,
    pub before: Option<Snowflake>,
    pub after: Option<Snowflake>,
    pub limit: Option<u32>,
    pub exclude_ended: bool,
    pub exclude_deleted: bool,
    /// Store fetched entitlements.
    pub cache: bool,
    /// Skip the cache lookup for single fetches.
    pub force: bool,
}

impl Default for FetchEntitlements {
    fn default() -> Self {
        Self {
            id: None,
            user_id: None,
            sku_ids: Vec::new(),
            guild_id: None,
            before: None,
            after: None,
            limit: None,
            exclude_ended: false,
            exclude_deleted: false,
            cache: true,
            force: false,
        }
    }
}

impl FetchEntitlements {
    pub fn id(id: Snowflake) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}

/// Entitlements of the client's application.
pub struct EntitlementManager<'a> {
    base: CachedManager<'a, Entitlement>,
}

impl<'a> EntitlementManager<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self {
            base: CachedManager::new(client, &client.cache().entitlements),
        }
    }

    /// Fetches one entitlement when `options.id` is set, otherwise lists.
    pub async fn fetch(&self, options: FetchEntitlements) -> ClientResult<Fetched<Entitlement>> {
        match options.id {
            Some(id) => {
                let entitlement = self.fetch_by_id(id, options.force, options.cache).await?;
                Ok(Fetched::One(entitlement))
            }
            None => Ok(Fetched::Many(self.fetch_many(options).await?)),
        }
    }

    /// Fetches one entitlement, serving from the cache when possible.
    pub async fn fetch_one<'r>(
        &self,
        entitlement: impl Into<Resolvable<'r, Entitlement>>,
    ) -> ClientResult<Cached<Entitlement>> {
        let id = self
            .resolve_id(entitlement)
            .ok_or_else(|| ClientError::validation("entitlement is not resolvable"))?;
        self.fetch_by_id(id, false, true).await
    }

    /// Lists entitlements matching `options`. `options.id` is ignored.
    pub async fn fetch_many(&self, options: FetchEntitlements) -> ClientResult<Collection<Entitlement>> {
        let application_id = self.client().require_application()?;
        let sku_ids = (!options.sku_ids.is_empty()).then(|| {
            options
                .sku_ids
                .iter()
                .map(Snowflake::to_string)
                .collect::<Vec<_>>()
                .join(",")
        });

        let request = RestRequest::get(format!("/applications/{application_id}/entitlements"))
            .query_opt("user_id", options.user_id)
            .query_opt("sku_ids", sku_ids)
            .query_opt("before", options.before)
            .query_opt("after", options.after)
            .query_opt("limit", options.limit)
            .query_opt("guild_id", options.guild_id)
            .query_opt("exclude_ended", options.exclude_ended.then_some(true))
            .query_opt("exclude_deleted", options.exclude_deleted.then_some(true));
        self.fetch_collection(request, options.cache).await
    }

    /// Grants a test entitlement for `sku` to a user or guild.
    pub async fn create_test_entitlement<'r>(
        &self,
        sku: impl Into<Resolvable<'r, Sku>>,
        owner_id: Snowflake,
        owner_type: EntitlementOwnerType,
    ) -> ClientResult<Cached<Entitlement>> {
        let sku_id = sku
            .into()
            .id()
            .ok_or_else(|| ClientError::validation("sku is not resolvable"))?;
        let application_id = self.client().require_application()?;

        let request = RestRequest::post(format!("/applications/{application_id}/entitlements")).body(json!({
            "sku_id": sku_id,
            "owner_id": owner_id,
            "owner_type": owner_type.code(),
        }));
        self.fetch_entity(request, true).await
    }

    /// Deletes a test entitlement remotely, then evicts it.
    pub async fn delete_test_entitlement<'r>(
        &self,
        entitlement: impl Into<Resolvable<'r, Entitlement>>,
    ) -> ClientResult<()> {
        let id = self
            .resolve_id(entitlement)
            .ok_or_else(|| ClientError::validation("entitlement is not resolvable"))?;
        let application_id = self.client().require_application()?;

        self.client()
            .transport()
            .request(RestRequest::delete(format!(
                "/applications/{application_id}/entitlements/{id}"
            )))
            .await?;
        self.cache().remove(&id);
        debug!(entitlement = %id, "test entitlement deleted");
        Ok(())
    }

    /// Marks a consumable entitlement consumed, remotely and then locally.
    pub async fn consume<'r>(&self, entitlement: impl Into<Resolvable<'r, Entitlement>>) -> ClientResult<()> {
        let id = self
            .resolve_id(entitlement)
            .ok_or_else(|| ClientError::validation("entitlement is not resolvable"))?;
        let application_id = self.client().require_application()?;

        self.client()
            .transport()
            .request(RestRequest::post(format!(
                "/applications/{application_id}/entitlements/{id}/consume"
            )))
            .await?;
        if let Some(entitlement) = self.cache().get(&id) {
            entitlement.write().consumed = true;
        }
        debug!(entitlement = %id, "entitlement consumed");
        Ok(())
    }

    pub(crate) async fn fetch_by_id(&self, id: Snowflake, force: bool, cache: bool) -> ClientResult<Cached<Entitlement>> {
        if let Some(cached) = self.cached(id, force) {
            return Ok(cached);
        }
        let application_id = self.client().require_application()?;
        let request = RestRequest::get(format!("/applications/{application_id}/entitlements/{id}"));
        self.fetch_entity(request, cache).await
    }
}

impl<'a> Deref for EntitlementManager<'a> {
    type Target = CachedManager<'a, Entitlement>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}
