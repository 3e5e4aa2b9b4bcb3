use super::{ActionOutcome, Dispatcher, SkipReason, fields};
use crate::event::ClientEvent;
use accord_model::{Channel, DecodeContext, Entity, ModelResult};
use accord_types::{Snowflake, Timestamp};
use serde_json::Value;

impl Dispatcher<'_> {
    /// THREAD_CREATE also fires when the client is added to an existing
    /// thread; `newly_created` tells the two apart.
    pub(super) fn thread_create(&self, data: &Value, ctx: &DecodeContext<'_>) -> ModelResult<ActionOutcome> {
        let thread_id = Channel::key_of(data)?;
        let newly_created = fields(data, "thread_create")?
            .get::<bool>("newly_created")?
            .unwrap_or(false);
        let cache = self.client.cache();
        let existed = cache.channels.contains(&thread_id);

        self.client.tombstones().channels.clear(&thread_id);
        let thread = cache.channels.upsert(data, ctx)?;
        if existed {
            return Ok(ActionOutcome::Applied);
        }
        Ok(self.emit(ClientEvent::ThreadCreate {
            thread,
            newly_created,
        }))
    }

    pub(super) fn thread_update(&self, data: &Value, ctx: &DecodeContext<'_>) -> ModelResult<ActionOutcome> {
        self.update_channel(data, ctx, |old, new| ClientEvent::ThreadUpdate { old, new })
    }

    /// THREAD_DELETE: the thread and every message cached in it are tombstoned
    /// with one timestamp.
    pub(super) fn thread_delete(&self, data: &Value) -> ModelResult<ActionOutcome> {
        let thread_id: Snowflake = fields(data, "thread_delete")?.expect("id")?;
        match self.remove_channel(thread_id, Timestamp::now()) {
            Some(thread) => Ok(self.emit(ClientEvent::ThreadDelete(thread))),
            None => Ok(ActionOutcome::Skipped(SkipReason::Unresolved)),
        }
    }
}
