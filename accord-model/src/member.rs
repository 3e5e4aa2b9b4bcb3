use crate::{DecodeContext, Entity, EntityKind, FieldMerge, GuildMemberFlags, MergePolicy, ModelError, ModelResult};
use accord_types::{Snowflake, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Store key for a guild member: a user id is only unique within its guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberKey {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
}

impl MemberKey {
    #[must_use]
    pub const fn new(guild_id: Snowflake, user_id: Snowflake) -> Self {
        Self { guild_id, user_id }
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.guild_id, self.user_id)
    }
}

/// A user's membership in one guild.
///
/// Member payloads arrive from several events with different field subsets,
/// so every field is merged partially.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuildMember {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
    pub nick: Option<String>,
    pub avatar: Option<String>,
    pub roles: Vec<Snowflake>,
    pub joined_at: Option<Timestamp>,
    pub premium_since: Option<Timestamp>,
    pub pending: bool,
    pub communication_disabled_until: Option<Timestamp>,
    pub flags: GuildMemberFlags,
    #[serde(skip)]
    pub deleted: bool,
}

impl GuildMember {
    fn empty(key: MemberKey) -> Self {
        Self {
            guild_id: key.guild_id,
            user_id: key.user_id,
            nick: None,
            avatar: None,
            roles: Vec::new(),
            joined_at: None,
            premium_since: None,
            pending: false,
            communication_disabled_until: None,
            flags: GuildMemberFlags::empty(),
            deleted: false,
        }
    }

    /// Whether the member is timed out at `now`.
    #[must_use]
    pub fn is_communication_disabled(&self, now: Timestamp) -> bool {
        self.communication_disabled_until
            .is_some_and(|until| now.is_before(&until))
    }
}

impl Entity for GuildMember {
    type Key = MemberKey;
    const KIND: EntityKind = EntityKind::GuildMember;
    const MERGE_POLICY: MergePolicy = MergePolicy::Partial;

    fn key(&self) -> MemberKey {
        MemberKey::new(self.guild_id, self.user_id)
    }

    fn key_of(raw: &Value) -> ModelResult<MemberKey> {
        let fields = FieldMerge::new(raw, Self::MERGE_POLICY, "guild member")?;
        let guild_id = fields.expect("guild_id")?;
        let user = fields.raw("user").ok_or(ModelError::MissingField("user"))?;
        let user_id = FieldMerge::new(user, Self::MERGE_POLICY, "user")?.expect("id")?;
        Ok(MemberKey::new(guild_id, user_id))
    }

    fn from_raw(raw: &Value, ctx: &DecodeContext<'_>) -> ModelResult<Self> {
        let mut member = Self::empty(Self::key_of(raw)?);
        member.patch(raw, ctx)?;
        Ok(member)
    }

    fn patch(&mut self, raw: &Value, _ctx: &DecodeContext<'_>) -> ModelResult<()> {
        let fields = FieldMerge::new(raw, Self::MERGE_POLICY, "guild member")?;
        fields.merge("nick", &mut self.nick)?;
        fields.merge("avatar", &mut self.avatar)?;
        fields.merge("roles", &mut self.roles)?;
        fields.merge("joined_at", &mut self.joined_at)?;
        fields.merge("premium_since", &mut self.premium_since)?;
        fields.merge("pending", &mut self.pending)?;
        fields.merge(
            "communication_disabled_until",
            &mut self.communication_disabled_until,
        )?;
        fields.merge("flags", &mut self.flags)?;
        Ok(())
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}
