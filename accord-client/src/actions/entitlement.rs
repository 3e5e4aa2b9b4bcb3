use super::{ActionOutcome, Dispatcher, SkipReason, fields};
use crate::event::ClientEvent;
use accord_model::{DecodeContext, Entitlement, Entity, ModelResult};
use accord_types::Snowflake;
use serde_json::Value;

impl Dispatcher<'_> {
    pub(super) fn entitlement_create(&self, data: &Value, ctx: &DecodeContext<'_>) -> ModelResult<ActionOutcome> {
        let entitlement = self.client.cache().entitlements.upsert(data, ctx)?;
        Ok(self.emit(ClientEvent::EntitlementCreate(entitlement)))
    }

    pub(super) fn entitlement_update(&self, data: &Value, ctx: &DecodeContext<'_>) -> ModelResult<ActionOutcome> {
        let entitlement_id = Entitlement::key_of(data)?;
        let store = &self.client.cache().entitlements;
        let old = store.get(&entitlement_id).map(|entitlement| entitlement.snapshot());
        let new = store.upsert(data, ctx)?;
        Ok(self.emit(ClientEvent::EntitlementUpdate { old, new }))
    }

    pub(super) fn entitlement_delete(&self, data: &Value) -> ModelResult<ActionOutcome> {
        let entitlement_id: Snowflake = fields(data, "entitlement_delete")?.expect("id")?;
        match self.client.cache().entitlements.remove(&entitlement_id) {
            Some(entitlement) => Ok(self.emit(ClientEvent::EntitlementDelete(entitlement))),
            None => Ok(ActionOutcome::Skipped(SkipReason::Unresolved)),
        }
    }
}
