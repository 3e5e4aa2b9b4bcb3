use super::{ActionOutcome, Dispatcher, SkipReason, fields};
use crate::event::ClientEvent;
use crate::shard::ShardContext;
use accord_model::{DecodeContext, Entity, GuildMember, ModelResult};
use accord_types::Timestamp;
use serde_json::Value;

impl Dispatcher<'_> {
    /// GUILD_MEMBER_ADD: a re-join clears the member's tombstone first so the
    /// add is not mistaken for a late event about the removed member.
    pub(super) fn member_add(
        &self,
        data: &Value,
        shard: &mut ShardContext,
        ctx: &DecodeContext<'_>,
    ) -> ModelResult<ActionOutcome> {
        let key = GuildMember::key_of(data)?;
        self.client.tombstones().members.clear(&key);

        let cache = self.client.cache();
        let Some(guild) = cache.guilds.get(&key.guild_id) else {
            return Ok(ActionOutcome::Skipped(SkipReason::Unresolved));
        };

        if let Some(raw_user) = fields(data, "guild_member")?.raw("user") {
            cache.users.upsert(raw_user, ctx)?;
        }
        let member = cache.members.upsert(data, ctx)?;
        {
            let mut guild = guild.write();
            guild.member_count = guild.member_count.saturating_add(1);
        }

        if !shard.is_ready() {
            return Ok(ActionOutcome::Applied);
        }
        Ok(self.emit(ClientEvent::GuildMemberAdd(member)))
    }

    pub(super) fn member_update(&self, data: &Value, ctx: &DecodeContext<'_>) -> ModelResult<ActionOutcome> {
        let key = GuildMember::key_of(data)?;
        if self.client.tombstones().members.has(&key) {
            return Ok(ActionOutcome::Skipped(SkipReason::Tombstoned));
        }

        let cache = self.client.cache();
        if !cache.guilds.contains(&key.guild_id) {
            return Ok(ActionOutcome::Skipped(SkipReason::Unresolved));
        }

        if let Some(raw_user) = fields(data, "guild_member")?.raw("user") {
            cache.users.upsert(raw_user, ctx)?;
        }
        let old = cache.members.get(&key).map(|member| member.snapshot());
        let new = cache.members.upsert(data, ctx)?;
        Ok(self.emit(ClientEvent::GuildMemberUpdate { old, new }))
    }

    pub(super) fn member_remove(&self, data: &Value) -> ModelResult<ActionOutcome> {
        let key = GuildMember::key_of(data)?;
        let cache = self.client.cache();

        let Some(guild) = cache.guilds.get(&key.guild_id) else {
            return Ok(ActionOutcome::Skipped(SkipReason::Unresolved));
        };
        let Some(member) = cache.members.remove(&key) else {
            return Ok(ActionOutcome::Skipped(SkipReason::Unresolved));
        };

        {
            let mut guild = guild.write();
            guild.member_count = guild.member_count.saturating_sub(1);
        }
        self.client.tombstones().members.mark(key, Timestamp::now());
        Ok(self.emit(ClientEvent::GuildMemberRemove(member)))
    }
}
