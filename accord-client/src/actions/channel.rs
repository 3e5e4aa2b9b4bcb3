use super::{ActionOutcome, Dispatcher, SkipReason, fields};
use crate::event::ClientEvent;
use accord_cache::Cached;
use accord_model::{Channel, DecodeContext, Entity, ModelResult};
use accord_types::{Snowflake, Timestamp};
use serde_json::Value;
use tracing::debug;

impl Dispatcher<'_> {
    pub(super) fn channel_create(&self, data: &Value, ctx: &DecodeContext<'_>) -> ModelResult<ActionOutcome> {
        let channel_id = Channel::key_of(data)?;
        let cache = self.client.cache();
        let existed = cache.channels.contains(&channel_id);

        self.client.tombstones().channels.clear(&channel_id);
        let channel = cache.channels.upsert(data, ctx)?;
        if existed {
            return Ok(ActionOutcome::Applied);
        }
        Ok(self.emit(ClientEvent::ChannelCreate(channel)))
    }

    pub(super) fn channel_update(&self, data: &Value, ctx: &DecodeContext<'_>) -> ModelResult<ActionOutcome> {
        self.update_channel(data, ctx, |old, new| ClientEvent::ChannelUpdate { old, new })
    }

    pub(super) fn channel_delete(&self, data: &Value) -> ModelResult<ActionOutcome> {
        let channel_id: Snowflake = fields(data, "channel_delete")?.expect("id")?;
        match self.remove_channel(channel_id, Timestamp::now()) {
            Some(channel) => Ok(self.emit(ClientEvent::ChannelDelete(channel))),
            None => Ok(ActionOutcome::Skipped(SkipReason::Unresolved)),
        }
    }

    /// Snapshots then patches a channel or thread, emitting the event `event`
    /// builds from the pair.
    pub(super) fn update_channel(
        &self,
        data: &Value,
        ctx: &DecodeContext<'_>,
        event: impl FnOnce(Option<Channel>, Cached<Channel>) -> ClientEvent,
    ) -> ModelResult<ActionOutcome> {
        let channel_id = Channel::key_of(data)?;
        if self.client.tombstones().channels.has(&channel_id) {
            return Ok(ActionOutcome::Skipped(SkipReason::Tombstoned));
        }

        let cache = self.client.cache();
        let old = cache.channels.get(&channel_id).map(|channel| channel.snapshot());
        let new = cache.channels.upsert(data, ctx)?;
        Ok(self.emit(event(old, new)))
    }

    /// Removes a channel or thread and every cached message in it. The channel
    /// and its messages share one tombstone timestamp.
    pub(super) fn remove_channel(&self, channel_id: Snowflake, deleted_at: Timestamp) -> Option<Cached<Channel>> {
        let cache = self.client.cache();
        let tombstones = self.client.tombstones();

        let channel = cache.channels.remove(&channel_id)?;
        tombstones.channels.mark(channel_id, deleted_at);

        let messages = cache.messages_in(channel_id);
        for message in &messages {
            let message_id = message.id();
            cache.messages.remove(&message_id);
            tombstones.messages.mark(message_id, deleted_at);
        }
        debug!(channel = %channel_id, messages = messages.len(), "channel removed");
        Some(channel)
    }
}
