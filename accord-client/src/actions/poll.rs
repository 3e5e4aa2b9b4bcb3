use super::{ActionOutcome, Dispatcher, SkipReason, fields};
use crate::event::ClientEvent;
use accord_model::ModelResult;
use accord_types::Snowflake;
use serde_json::Value;
use tracing::debug;

impl Dispatcher<'_> {
    /// MESSAGE_POLL_VOTE_ADD / _REMOVE: adjusts the tally of one answer in
    /// place. The message is not re-patched, so the answer keeps its identity.
    pub(super) fn poll_vote(&self, data: &Value, added: bool) -> ModelResult<ActionOutcome> {
        let fields = fields(data, "poll_vote")?;
        let channel_id: Snowflake = fields.expect("channel_id")?;
        let message_id: Snowflake = fields.expect("message_id")?;
        let user_id: Snowflake = fields.expect("user_id")?;
        let answer_id: u32 = fields.expect("answer_id")?;

        if let Err(reason) = self.text_channel(channel_id) {
            return Ok(ActionOutcome::Skipped(reason));
        }
        let Some(message) = self.client.cache().messages.get(&message_id) else {
            return Ok(ActionOutcome::Skipped(SkipReason::Unresolved));
        };

        {
            let mut guard = message.write();
            let Some(answer) = guard.poll.as_mut().and_then(|poll| poll.answer_mut(answer_id)) else {
                return Ok(ActionOutcome::Skipped(SkipReason::Unresolved));
            };
            if added {
                answer.add_vote();
            } else {
                answer.remove_vote();
            }
            debug!(message = %message_id, answer_id, votes = answer.vote_count, "poll vote");
        }

        let event = if added {
            ClientEvent::MessagePollVoteAdd {
                message,
                answer_id,
                user_id,
            }
        } else {
            ClientEvent::MessagePollVoteRemove {
                message,
                answer_id,
                user_id,
            }
        };
        Ok(self.emit(event))
    }
}
