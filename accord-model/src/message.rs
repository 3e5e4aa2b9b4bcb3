use crate::{Component, DecodeContext, Entity, EntityKind, FieldMerge, MergePolicy, ModelResult, Poll};
use accord_types::{Snowflake, Timestamp};
use serde::Serialize;
use serde_json::Value;

/// A message in a text-based channel.
///
/// Update payloads are partial: an edit that only touches `content` keeps the
/// cached components, poll and author.
///
/// Components decode through [`Component::decode`], so messages are built with
/// [`Entity::from_raw`] rather than deserialized directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub guild_id: Option<Snowflake>,
    pub author_id: Option<Snowflake>,
    pub content: String,
    pub timestamp: Option<Timestamp>,
    pub edited_at: Option<Timestamp>,
    pub pinned: bool,
    pub components: Vec<Component>,
    pub poll: Option<Poll>,
    #[serde(skip)]
    pub deleted: bool,
}

impl Message {
    fn empty(id: Snowflake) -> Self {
        Self {
            id,
            channel_id: Snowflake::default(),
            guild_id: None,
            author_id: None,
            content: String::new(),
            timestamp: None,
            edited_at: None,
            pinned: false,
            components: Vec::new(),
            poll: None,
            deleted: false,
        }
    }

    #[must_use]
    pub fn is_edited(&self) -> bool {
        self.edited_at.is_some()
    }
}

impl Entity for Message {
    type Key = Snowflake;
    const KIND: EntityKind = EntityKind::Message;
    const MERGE_POLICY: MergePolicy = MergePolicy::Partial;

    fn key(&self) -> Snowflake {
        self.id
    }

    fn key_of(raw: &Value) -> ModelResult<Snowflake> {
        FieldMerge::new(raw, Self::MERGE_POLICY, "message")?.expect("id")
    }

    fn from_raw(raw: &Value, ctx: &DecodeContext<'_>) -> ModelResult<Self> {
        let mut message = Self::empty(Self::key_of(raw)?);
        message.patch(raw, ctx)?;
        Ok(message)
    }

    fn patch(&mut self, raw: &Value, ctx: &DecodeContext<'_>) -> ModelResult<()> {
        let fields = FieldMerge::new(raw, Self::MERGE_POLICY, "message")?;
        fields.required("channel_id", &mut self.channel_id)?;
        fields.merge("guild_id", &mut self.guild_id)?;
        if let Some(author) = fields.raw("author") {
            self.author_id = FieldMerge::new(author, Self::MERGE_POLICY, "author")?.get("id")?;
        }
        fields.merge("content", &mut self.content)?;
        fields.merge("timestamp", &mut self.timestamp)?;
        fields.merge("edited_timestamp", &mut self.edited_at)?;
        fields.merge("pinned", &mut self.pinned)?;

        if fields.has("components") {
            self.components = Component::decode_list(fields.raw("components"), ctx)?;
        }

        // The poll is patched in place so answer tallies survive edits.
        match (fields.raw("poll"), self.poll.as_mut()) {
            (None, _) => {}
            (Some(Value::Null), _) => self.poll = None,
            (Some(raw_poll), Some(poll)) => poll.patch(raw_poll)?,
            (Some(raw_poll), None) => self.poll = Some(Poll::from_raw(raw_poll)?),
        }
        Ok(())
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}
