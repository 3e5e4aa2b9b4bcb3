use super::{ActionOutcome, Dispatcher, SkipReason, fields};
use crate::event::ClientEvent;
use crate::shard::ShardContext;
use accord_model::{DecodeContext, Entity, Guild, ModelResult};
use accord_types::{Snowflake, Timestamp};
use serde_json::Value;
use tracing::debug;

/// Nested arrays of a guild payload that are cached in their own stores.
const CHANNEL_ARRAYS: [&str; 2] = ["channels", "threads"];

impl Dispatcher<'_> {
    /// GUILD_CREATE: first sight of a guild, or a known guild becoming
    /// available again.
    ///
    /// A first sight emits `GuildCreate` only once the shard is ready; the
    /// initial stream after READY is part of the sync, not news. Becoming
    /// available always emits `GuildAvailable`.
    pub(super) fn guild_create(
        &self,
        data: &Value,
        shard: &mut ShardContext,
        ctx: &DecodeContext<'_>,
    ) -> ModelResult<ActionOutcome> {
        let cache = self.client.cache();
        let guild_id = Guild::key_of(data)?;
        let unavailable = fields(data, "guild")?.get::<bool>("unavailable")?.unwrap_or(false);

        let mut changed = false;
        let mut events = Vec::new();
        match cache.guilds.get(&guild_id) {
            Some(guild) => {
                if !guild.read().available && !unavailable {
                    {
                        let mut guild = guild.write();
                        guild.patch(data, ctx)?;
                        guild.shard_id = Some(shard.id);
                    }
                    self.cache_guild_children(guild_id, data, ctx)?;
                    changed = true;
                    events.push(ClientEvent::GuildAvailable(guild));
                }
            }
            None => {
                let guild = cache.guilds.upsert(data, ctx)?;
                guild.write().shard_id = Some(shard.id);
                self.cache_guild_children(guild_id, data, ctx)?;
                changed = true;
                if shard.is_ready() {
                    events.push(ClientEvent::GuildCreate(guild));
                }
            }
        }

        if shard.expected_guilds.remove(&guild_id) {
            changed = true;
            if shard.check_ready() {
                events.push(ClientEvent::ShardReady {
                    shard_id: shard.id,
                    unavailable_guilds: Vec::new(),
                });
            }
        }

        if !changed {
            return Ok(ActionOutcome::Skipped(SkipReason::Duplicate));
        }
        Ok(self.emit_all(events))
    }

    /// GUILD_DELETE: an outage when `unavailable` is set, otherwise the client
    /// left the guild and everything it owns is dropped.
    pub(super) fn guild_delete(&self, data: &Value) -> ModelResult<ActionOutcome> {
        let fields = fields(data, "guild_delete")?;
        let guild_id: Snowflake = fields.expect("id")?;
        let cache = self.client.cache();

        let Some(guild) = cache.guilds.get(&guild_id) else {
            return Ok(ActionOutcome::Skipped(SkipReason::Unresolved));
        };

        if fields.get::<bool>("unavailable")?.unwrap_or(false) {
            if !guild.read().available {
                return Ok(ActionOutcome::Skipped(SkipReason::Duplicate));
            }
            guild.write().available = false;
            debug!(guild = %guild_id, "guild unavailable");
            return Ok(self.emit(ClientEvent::GuildUnavailable(guild)));
        }

        let deleted_at = Timestamp::now();
        for channel in cache.channels_of(guild_id) {
            let channel_id = channel.id();
            self.remove_channel(channel_id, deleted_at);
        }
        let tombstones = self.client.tombstones();
        for member in cache.members_of(guild_id) {
            let key = member.id();
            cache.members.remove(&key);
            tombstones.members.mark(key, deleted_at);
        }
        for stage in cache.stage_instances_of(guild_id) {
            let stage_id = stage.id();
            cache.stage_instances.remove(&stage_id);
            tombstones.stage_instances.mark(stage_id, deleted_at);
        }

        match cache.guilds.remove(&guild_id) {
            Some(guild) => Ok(self.emit(ClientEvent::GuildDelete(guild))),
            None => Ok(ActionOutcome::Skipped(SkipReason::Unresolved)),
        }
    }

    /// Caches the channels, threads, members and stage instances embedded in a
    /// guild payload. Nested objects omit `guild_id`; it is filled in here.
    fn cache_guild_children(
        &self,
        guild_id: Snowflake,
        data: &Value,
        ctx: &DecodeContext<'_>,
    ) -> ModelResult<()> {
        let cache = self.client.cache();

        for key in CHANNEL_ARRAYS {
            for raw in nested(data, key) {
                cache.channels.upsert(&with_guild_id(raw, guild_id), ctx)?;
            }
        }
        for raw in nested(data, "members") {
            if let Some(raw_user) = raw.get("user") {
                cache.users.upsert(raw_user, ctx)?;
            }
            cache.members.upsert(&with_guild_id(raw, guild_id), ctx)?;
        }
        for raw in nested(data, "stage_instances") {
            cache.stage_instances.upsert(&with_guild_id(raw, guild_id), ctx)?;
        }
        Ok(())
    }
}

fn nested<'v>(data: &'v Value, key: &str) -> impl Iterator<Item = &'v Value> {
    data.get(key).and_then(Value::as_array).into_iter().flatten()
}

fn with_guild_id(raw: &Value, guild_id: Snowflake) -> Value {
    let mut raw = raw.clone();
    if let Some(object) = raw.as_object_mut() {
        object
            .entry("guild_id")
            .or_insert_with(|| Value::String(guild_id.to_string()));
    }
    raw
}
