use crate::{DecodeContext, Entity, EntityKind, FieldMerge, MergePolicy, ModelResult};
use accord_types::{Snowflake, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A guild.
///
/// Nested arrays on a guild payload (`channels`, `threads`, `members`,
/// `stage_instances`) are not kept here; the guild-create handler upserts
/// them into their own stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
    pub icon: Option<String>,
    pub owner_id: Option<Snowflake>,
    pub member_count: u64,
    pub joined_at: Option<Timestamp>,
    /// Shard that owns this guild. Set by the dispatcher, never by payloads.
    pub shard_id: Option<u32>,
    pub available: bool,
    #[serde(skip)]
    pub deleted: bool,
}

impl Guild {
    fn empty(id: Snowflake) -> Self {
        Self {
            id,
            name: String::new(),
            icon: None,
            owner_id: None,
            member_count: 0,
            joined_at: None,
            shard_id: None,
            available: false,
            deleted: false,
        }
    }
}

impl Entity for Guild {
    type Key = Snowflake;
    const KIND: EntityKind = EntityKind::Guild;
    const MERGE_POLICY: MergePolicy = MergePolicy::Partial;

    fn key(&self) -> Snowflake {
        self.id
    }

    fn key_of(raw: &Value) -> ModelResult<Snowflake> {
        FieldMerge::new(raw, Self::MERGE_POLICY, "guild")?.expect("id")
    }

    fn from_raw(raw: &Value, ctx: &DecodeContext<'_>) -> ModelResult<Self> {
        let mut guild = Self::empty(Self::key_of(raw)?);
        guild.patch(raw, ctx)?;
        Ok(guild)
    }

    fn patch(&mut self, raw: &Value, _ctx: &DecodeContext<'_>) -> ModelResult<()> {
        let fields = FieldMerge::new(raw, Self::MERGE_POLICY, "guild")?;

        // Availability is restated by every guild payload: absence means available.
        let mut unavailable = false;
        fields.reset_if_absent("unavailable", &mut unavailable)?;
        self.available = !unavailable;

        fields.merge("name", &mut self.name)?;
        fields.merge("icon", &mut self.icon)?;
        fields.merge("owner_id", &mut self.owner_id)?;
        fields.merge("member_count", &mut self.member_count)?;
        fields.merge("joined_at", &mut self.joined_at)?;
        Ok(())
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}
