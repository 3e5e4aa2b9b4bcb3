//! Entity-side shortcuts for the manager calls.

use super::polls::{self, FetchPollVoters};
use super::{Fetched, FetchSubscriptions};
use crate::client::Client;
use crate::error::{ClientError, ClientResult};
use accord_cache::{Cached, Collection};
use accord_model::{Entitlement, Message, Sku, Subscription, User};
use accord_types::Snowflake;
use async_trait::async_trait;

#[async_trait]
pub trait EntitlementExt {
    /// Refetches this entitlement. Without `force` the cached instance is
    /// returned as is.
    async fn fetch(&self, client: &Client, force: bool) -> ClientResult<Cached<Entitlement>>;

    async fn consume(&self, client: &Client) -> ClientResult<()>;

    /// Deletes this test entitlement.
    async fn delete(&self, client: &Client) -> ClientResult<()>;
}

#[async_trait]
impl EntitlementExt for Cached<Entitlement> {
    async fn fetch(&self, client: &Client, force: bool) -> ClientResult<Cached<Entitlement>> {
        client.entitlements().fetch_by_id(self.id(), force, true).await
    }

    async fn consume(&self, client: &Client) -> ClientResult<()> {
        client.entitlements().consume(self.id()).await
    }

    async fn delete(&self, client: &Client) -> ClientResult<()> {
        client.entitlements().delete_test_entitlement(self.id()).await
    }
}

#[async_trait]
pub trait SkuExt {
    async fn fetch(&self, client: &Client, force: bool) -> ClientResult<Cached<Sku>>;

    /// Fetches subscriptions to this SKU. The SKU in `options` is overridden.
    async fn fetch_subscriptions(
        &self,
        client: &Client,
        options: FetchSubscriptions,
    ) -> ClientResult<Fetched<Subscription>>;
}

#[async_trait]
impl SkuExt for Cached<Sku> {
    async fn fetch(&self, client: &Client, force: bool) -> ClientResult<Cached<Sku>> {
        client.skus().fetch_by_id(self.id(), force, true).await
    }

    async fn fetch_subscriptions(
        &self,
        client: &Client,
        options: FetchSubscriptions,
    ) -> ClientResult<Fetched<Subscription>> {
        let options = FetchSubscriptions {
            sku_id: Some(self.id()),
            ..options
        };
        client.subscriptions().fetch(options).await
    }
}

#[async_trait]
pub trait SubscriptionExt {
    /// Refetches this subscription under `sku_id`, or under its first SKU when
    /// none is given.
    async fn fetch(
        &self,
        client: &Client,
        sku_id: Option<Snowflake>,
        force: bool,
    ) -> ClientResult<Cached<Subscription>>;
}

#[async_trait]
impl SubscriptionExt for Cached<Subscription> {
    async fn fetch(
        &self,
        client: &Client,
        sku_id: Option<Snowflake>,
        force: bool,
    ) -> ClientResult<Cached<Subscription>> {
        let (id, first_sku) = {
            let subscription = self.read();
            (subscription.id, subscription.sku_ids.first().copied())
        };
        let sku_id = sku_id
            .or(first_sku)
            .ok_or_else(|| ClientError::validation("fetching subscriptions requires a sku"))?;
        client
            .subscriptions()
            .fetch_by_id(sku_id, id, force, true)
            .await
    }
}

#[async_trait]
pub trait MessageExt {
    /// Fetches the users who voted for `answer_id` of this message's poll.
    async fn fetch_poll_voters(
        &self,
        client: &Client,
        answer_id: u32,
        options: FetchPollVoters,
    ) -> ClientResult<Collection<User>>;
}

#[async_trait]
impl MessageExt for Cached<Message> {
    async fn fetch_poll_voters(
        &self,
        client: &Client,
        answer_id: u32,
        options: FetchPollVoters,
    ) -> ClientResult<Collection<User>> {
        let (channel_id, message_id, has_answer) = {
            let message = self.read();
            let has_answer = message
                .poll
                .as_ref()
                .is_some_and(|poll| poll.answer(answer_id).is_some());
            (message.channel_id, message.id, has_answer)
        };
        if !has_answer {
            return Err(ClientError::validation(format!(
                "message {message_id} has no poll answer {answer_id}"
            )));
        }
        polls::fetch_voters(client, channel_id, message_id, answer_id, options).await
    }
}
