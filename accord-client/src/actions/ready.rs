use super::{ActionOutcome, Dispatcher, fields};
use crate::event::ClientEvent;
use crate::shard::{ShardContext, ShardStatus};
use accord_model::{DecodeContext, FieldMerge, MergePolicy, ModelResult};
use accord_types::Snowflake;
use serde_json::Value;
use tracing::info;

impl Dispatcher<'_> {
    /// READY: caches the current user and the announced guilds, then waits for
    /// the unavailable ones to stream in.
    pub(super) fn ready(
        &self,
        data: &Value,
        shard: &mut ShardContext,
        ctx: &DecodeContext<'_>,
    ) -> ModelResult<ActionOutcome> {
        let fields = fields(data, "ready")?;
        let cache = self.client.cache();

        if let Some(raw_user) = fields.raw("user") {
            let user = cache.users.upsert(raw_user, ctx)?;
            self.client.set_user_id(user.id());
        }

        shard.status = ShardStatus::WaitingForGuilds;
        shard.expected_guilds.clear();
        for raw_guild in fields.raw("guilds").and_then(Value::as_array).into_iter().flatten() {
            let guild = cache.guilds.upsert(raw_guild, ctx)?;
            let mut guild = guild.write();
            guild.shard_id = Some(shard.id);
            if !guild.available {
                shard.expected_guilds.insert(guild.id);
            }
        }

        if let Some(raw_application) = fields.raw("application") {
            let application_id: Snowflake =
                FieldMerge::new(raw_application, MergePolicy::Partial, "application")?.expect("id")?;
            self.client.set_application_id(application_id);
        }

        info!(
            shard = shard.id,
            expected_guilds = shard.expected_guilds.len(),
            "ready received"
        );

        if shard.check_ready() {
            return Ok(self.emit(ClientEvent::ShardReady {
                shard_id: shard.id,
                unavailable_guilds: Vec::new(),
            }));
        }
        Ok(ActionOutcome::Applied)
    }
}
