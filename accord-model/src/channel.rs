use crate::wire::wire_enum;
use crate::{DecodeContext, Entity, EntityKind, FieldMerge, MergePolicy, ModelResult};
use accord_types::{Snowflake, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

wire_enum! {
    /// Channel type.
    pub enum ChannelType: u8 {
        #[default]
        GuildText = 0,
        Dm = 1,
        GuildVoice = 2,
        GroupDm = 3,
        GuildCategory = 4,
        GuildAnnouncement = 5,
        AnnouncementThread = 10,
        PublicThread = 11,
        PrivateThread = 12,
        GuildStageVoice = 13,
        GuildDirectory = 14,
        GuildForum = 15,
        GuildMedia = 16,
    }
}

impl ChannelType {
    /// Thread channel types.
    #[must_use]
    pub const fn is_thread(&self) -> bool {
        matches!(
            self,
            Self::AnnouncementThread | Self::PublicThread | Self::PrivateThread
        )
    }

    /// Channel types that carry messages.
    #[must_use]
    pub const fn is_text_based(&self) -> bool {
        matches!(
            self,
            Self::GuildText
                | Self::Dm
                | Self::GuildVoice
                | Self::GroupDm
                | Self::GuildAnnouncement
                | Self::AnnouncementThread
                | Self::PublicThread
                | Self::PrivateThread
                | Self::GuildStageVoice
        )
    }
}

/// Thread-only state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThreadMetadata {
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub auto_archive_duration: Option<u32>,
    #[serde(default)]
    pub archive_timestamp: Option<Timestamp>,
    #[serde(default)]
    pub invitable: Option<bool>,
}

/// A guild channel, DM, or thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: Snowflake,
    pub kind: ChannelType,
    pub guild_id: Option<Snowflake>,
    pub name: Option<String>,
    pub topic: Option<String>,
    pub parent_id: Option<Snowflake>,
    pub position: Option<i64>,
    pub nsfw: bool,
    pub last_message_id: Option<Snowflake>,
    pub owner_id: Option<Snowflake>,
    pub thread_metadata: Option<ThreadMetadata>,
    pub message_count: Option<u64>,
    pub member_count: Option<u64>,
    #[serde(skip)]
    pub deleted: bool,
}

impl Channel {
    fn empty(id: Snowflake) -> Self {
        Self {
            id,
            kind: ChannelType::default(),
            guild_id: None,
            name: None,
            topic: None,
            parent_id: None,
            position: None,
            nsfw: false,
            last_message_id: None,
            owner_id: None,
            thread_metadata: None,
            message_count: None,
            member_count: None,
            deleted: false,
        }
    }

    #[must_use]
    pub fn is_thread(&self) -> bool {
        self.kind.is_thread()
    }

    #[must_use]
    pub fn is_text_based(&self) -> bool {
        self.kind.is_text_based()
    }
}

impl Entity for Channel {
    type Key = Snowflake;
    const KIND: EntityKind = EntityKind::Channel;
    const MERGE_POLICY: MergePolicy = MergePolicy::Partial;

    fn key(&self) -> Snowflake {
        self.id
    }

    fn key_of(raw: &Value) -> ModelResult<Snowflake> {
        FieldMerge::new(raw, Self::MERGE_POLICY, "channel")?.expect("id")
    }

    fn from_raw(raw: &Value, ctx: &DecodeContext<'_>) -> ModelResult<Self> {
        let mut channel = Self::empty(Self::key_of(raw)?);
        channel.patch(raw, ctx)?;
        Ok(channel)
    }

    fn patch(&mut self, raw: &Value, _ctx: &DecodeContext<'_>) -> ModelResult<()> {
        let fields = FieldMerge::new(raw, Self::MERGE_POLICY, "channel")?;
        fields.merge("type", &mut self.kind)?;
        fields.merge("guild_id", &mut self.guild_id)?;
        fields.merge("name", &mut self.name)?;
        fields.merge("topic", &mut self.topic)?;
        fields.merge("parent_id", &mut self.parent_id)?;
        fields.merge("position", &mut self.position)?;
        fields.merge("nsfw", &mut self.nsfw)?;
        fields.merge("last_message_id", &mut self.last_message_id)?;
        fields.merge("owner_id", &mut self.owner_id)?;
        fields.merge("thread_metadata", &mut self.thread_metadata)?;
        fields.merge("message_count", &mut self.message_count)?;
        fields.merge("member_count", &mut self.member_count)?;
        Ok(())
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}
