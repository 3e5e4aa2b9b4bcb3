use super::{ActionOutcome, Dispatcher, SkipReason, fields};
use crate::event::ClientEvent;
use accord_model::{DecodeContext, Entity, ModelResult, Subscription};
use accord_types::Snowflake;
use serde_json::Value;

impl Dispatcher<'_> {
    pub(super) fn subscription_create(&self, data: &Value, ctx: &DecodeContext<'_>) -> ModelResult<ActionOutcome> {
        let subscription = self.client.cache().subscriptions.upsert(data, ctx)?;
        Ok(self.emit(ClientEvent::SubscriptionCreate(subscription)))
    }

    pub(super) fn subscription_update(&self, data: &Value, ctx: &DecodeContext<'_>) -> ModelResult<ActionOutcome> {
        let subscription_id = Subscription::key_of(data)?;
        let store = &self.client.cache().subscriptions;
        let old = store.get(&subscription_id).map(|subscription| subscription.snapshot());
        let new = store.upsert(data, ctx)?;
        Ok(self.emit(ClientEvent::SubscriptionUpdate { old, new }))
    }

    pub(super) fn subscription_delete(&self, data: &Value) -> ModelResult<ActionOutcome> {
        let subscription_id: Snowflake = fields(data, "subscription_delete")?.expect("id")?;
        match self.client.cache().subscriptions.remove(&subscription_id) {
            Some(subscription) => Ok(self.emit(ClientEvent::SubscriptionDelete(subscription))),
            None => Ok(ActionOutcome::Skipped(SkipReason::Unresolved)),
        }
    }
}
