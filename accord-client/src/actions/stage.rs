use super::{ActionOutcome, Dispatcher, SkipReason, fields};
use crate::event::ClientEvent;
use accord_model::{DecodeContext, Entity, ModelResult, StageInstance};
use accord_types::{Snowflake, Timestamp};
use serde_json::Value;

impl Dispatcher<'_> {
    pub(super) fn stage_instance_create(
        &self,
        data: &Value,
        ctx: &DecodeContext<'_>,
    ) -> ModelResult<ActionOutcome> {
        if let Err(reason) = self.stage_channel(data)? {
            return Ok(ActionOutcome::Skipped(reason));
        }
        let stage_id = StageInstance::key_of(data)?;
        self.client.tombstones().stage_instances.clear(&stage_id);
        let stage = self.client.cache().stage_instances.upsert(data, ctx)?;
        Ok(self.emit(ClientEvent::StageInstanceCreate(stage)))
    }

    pub(super) fn stage_instance_update(
        &self,
        data: &Value,
        ctx: &DecodeContext<'_>,
    ) -> ModelResult<ActionOutcome> {
        if let Err(reason) = self.stage_channel(data)? {
            return Ok(ActionOutcome::Skipped(reason));
        }
        let stage_id = StageInstance::key_of(data)?;
        if self.client.tombstones().stage_instances.has(&stage_id) {
            return Ok(ActionOutcome::Skipped(SkipReason::Tombstoned));
        }

        let cache = self.client.cache();
        let old = cache.stage_instances.get(&stage_id).map(|stage| stage.snapshot());
        let new = cache.stage_instances.upsert(data, ctx)?;
        Ok(self.emit(ClientEvent::StageInstanceUpdate { old, new }))
    }

    pub(super) fn stage_instance_delete(&self, data: &Value) -> ModelResult<ActionOutcome> {
        if let Err(reason) = self.stage_channel(data)? {
            return Ok(ActionOutcome::Skipped(reason));
        }
        let stage_id = StageInstance::key_of(data)?;
        let Some(stage) = self.client.cache().stage_instances.remove(&stage_id) else {
            return Ok(ActionOutcome::Skipped(SkipReason::Unresolved));
        };
        self.client.tombstones().stage_instances.mark(stage_id, Timestamp::now());
        Ok(self.emit(ClientEvent::StageInstanceDelete(stage)))
    }

    /// Stage events are dropped unless their channel is cached and live.
    fn stage_channel(&self, data: &Value) -> ModelResult<Result<(), SkipReason>> {
        let channel_id: Snowflake = fields(data, "stage_instance")?.expect("channel_id")?;
        if self.client.tombstones().channels.has(&channel_id) {
            return Ok(Err(SkipReason::Tombstoned));
        }
        if !self.client.cache().channels.contains(&channel_id) {
            return Ok(Err(SkipReason::Unresolved));
        }
        Ok(Ok(()))
    }
}
