use crate::wire::wire_enum;
use crate::{DecodeContext, Entity, EntityKind, FieldMerge, MergePolicy, ModelResult};
use accord_types::Snowflake;
use serde::{Deserialize, Serialize};
use serde_json::Value;

wire_enum! {
    /// Who can see a stage instance.
    pub enum StagePrivacyLevel: u8 {
        Public = 1,
        #[default]
        GuildOnly = 2,
    }
}

/// A live stage in a stage channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageInstance {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    pub channel_id: Snowflake,
    pub topic: String,
    pub privacy_level: StagePrivacyLevel,
    pub discoverable_disabled: bool,
    pub guild_scheduled_event_id: Option<Snowflake>,
    #[serde(skip)]
    pub deleted: bool,
}

impl StageInstance {
    fn empty(id: Snowflake) -> Self {
        Self {
            id,
            guild_id: Snowflake::default(),
            channel_id: Snowflake::default(),
            topic: String::new(),
            privacy_level: StagePrivacyLevel::default(),
            discoverable_disabled: false,
            guild_scheduled_event_id: None,
            deleted: false,
        }
    }
}

impl Entity for StageInstance {
    type Key = Snowflake;
    const KIND: EntityKind = EntityKind::StageInstance;
    const MERGE_POLICY: MergePolicy = MergePolicy::Partial;

    fn key(&self) -> Snowflake {
        self.id
    }

    fn key_of(raw: &Value) -> ModelResult<Snowflake> {
        FieldMerge::new(raw, Self::MERGE_POLICY, "stage instance")?.expect("id")
    }

    fn from_raw(raw: &Value, ctx: &DecodeContext<'_>) -> ModelResult<Self> {
        let mut stage = Self::empty(Self::key_of(raw)?);
        stage.patch(raw, ctx)?;
        Ok(stage)
    }

    fn patch(&mut self, raw: &Value, _ctx: &DecodeContext<'_>) -> ModelResult<()> {
        let fields = FieldMerge::new(raw, Self::MERGE_POLICY, "stage instance")?;
        fields.required("guild_id", &mut self.guild_id)?;
        fields.required("channel_id", &mut self.channel_id)?;
        fields.merge("topic", &mut self.topic)?;
        fields.merge("privacy_level", &mut self.privacy_level)?;
        fields.merge("discoverable_disabled", &mut self.discoverable_disabled)?;
        fields.merge("guild_scheduled_event_id", &mut self.guild_scheduled_event_id)?;
        Ok(())
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}
