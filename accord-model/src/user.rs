use crate::{DecodeContext, Entity, EntityKind, FieldMerge, MergePolicy, ModelResult};
use accord_types::Snowflake;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A platform user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub global_name: Option<String>,
    pub avatar: Option<String>,
    pub bot: bool,
    #[serde(skip)]
    pub deleted: bool,
}

impl User {
    fn empty(id: Snowflake) -> Self {
        Self {
            id,
            username: String::new(),
            global_name: None,
            avatar: None,
            bot: false,
            deleted: false,
        }
    }

    /// Global display name, falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }
}

impl Entity for User {
    type Key = Snowflake;
    const KIND: EntityKind = EntityKind::User;
    const MERGE_POLICY: MergePolicy = MergePolicy::Partial;

    fn key(&self) -> Snowflake {
        self.id
    }

    fn key_of(raw: &Value) -> ModelResult<Snowflake> {
        FieldMerge::new(raw, Self::MERGE_POLICY, "user")?.expect("id")
    }

    fn from_raw(raw: &Value, ctx: &DecodeContext<'_>) -> ModelResult<Self> {
        let mut user = Self::empty(Self::key_of(raw)?);
        user.patch(raw, ctx)?;
        Ok(user)
    }

    fn patch(&mut self, raw: &Value, _ctx: &DecodeContext<'_>) -> ModelResult<()> {
        let fields = FieldMerge::new(raw, Self::MERGE_POLICY, "user")?;
        fields.merge("username", &mut self.username)?;
        fields.merge("global_name", &mut self.global_name)?;
        fields.merge("avatar", &mut self.avatar)?;
        fields.merge("bot", &mut self.bot)?;
        Ok(())
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}
