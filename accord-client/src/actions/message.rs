use super::{ActionOutcome, Dispatcher, SkipReason, fields};
use crate::event::ClientEvent;
use accord_model::{DecodeContext, Entity, Message, ModelResult};
use accord_types::{Snowflake, Timestamp};
use serde_json::Value;

impl Dispatcher<'_> {
    pub(super) fn message_create(&self, data: &Value, ctx: &DecodeContext<'_>) -> ModelResult<ActionOutcome> {
        let fields = fields(data, "message")?;
        let message_id = Message::key_of(data)?;
        let channel = match self.text_channel(fields.expect("channel_id")?) {
            Ok(channel) => channel,
            Err(reason) => return Ok(ActionOutcome::Skipped(reason)),
        };

        let cache = self.client.cache();
        if cache.messages.contains(&message_id) {
            return Ok(ActionOutcome::Skipped(SkipReason::Duplicate));
        }

        self.client.tombstones().messages.clear(&message_id);
        if let Some(raw_author) = fields.raw("author") {
            cache.users.upsert(raw_author, ctx)?;
        }
        let message = cache.messages.upsert(data, ctx)?;
        channel.write().last_message_id = Some(message_id);
        Ok(self.emit(ClientEvent::MessageCreate(message)))
    }

    /// MESSAGE_UPDATE only patches messages already cached; edits to
    /// uncached messages carry too little to build one.
    pub(super) fn message_update(&self, data: &Value, ctx: &DecodeContext<'_>) -> ModelResult<ActionOutcome> {
        let message_id = Message::key_of(data)?;
        if let Err(reason) = self.text_channel(fields(data, "message")?.expect("channel_id")?) {
            return Ok(ActionOutcome::Skipped(reason));
        }
        if self.client.tombstones().messages.has(&message_id) {
            return Ok(ActionOutcome::Skipped(SkipReason::Tombstoned));
        }

        let cache = self.client.cache();
        let Some(message) = cache.messages.get(&message_id) else {
            return Ok(ActionOutcome::Skipped(SkipReason::Unresolved));
        };
        let old = message.snapshot();
        message.write().patch(data, ctx)?;
        Ok(self.emit(ClientEvent::MessageUpdate {
            old: Some(old),
            new: message,
        }))
    }

    pub(super) fn message_delete(&self, data: &Value) -> ModelResult<ActionOutcome> {
        let fields = fields(data, "message_delete")?;
        let message_id: Snowflake = fields.expect("id")?;
        if let Err(reason) = self.text_channel(fields.expect("channel_id")?) {
            return Ok(ActionOutcome::Skipped(reason));
        }

        let Some(message) = self.client.cache().messages.remove(&message_id) else {
            return Ok(ActionOutcome::Skipped(SkipReason::Unresolved));
        };
        self.client.tombstones().messages.mark(message_id, Timestamp::now());
        Ok(self.emit(ClientEvent::MessageDelete(message)))
    }
}
