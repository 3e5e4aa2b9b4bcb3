use crate::wire::wire_enum;
use crate::{DecodeContext, Entity, EntityKind, FieldMerge, MergePolicy, ModelResult, SkuFlags};
use accord_types::Snowflake;
use serde::{Deserialize, Serialize};
use serde_json::Value;

wire_enum! {
    /// What a SKU sells.
    pub enum SkuType: u8 {
        Durable = 2,
        Consumable = 3,
        #[default]
        Subscription = 5,
        SubscriptionGroup = 6,
    }
}

/// A purchasable premium offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sku {
    pub id: Snowflake,
    pub kind: SkuType,
    pub application_id: Snowflake,
    pub name: String,
    pub slug: String,
    pub flags: SkuFlags,
    #[serde(skip)]
    pub deleted: bool,
}

impl Sku {
    fn empty(id: Snowflake) -> Self {
        Self {
            id,
            kind: SkuType::default(),
            application_id: Snowflake::default(),
            name: String::new(),
            slug: String::new(),
            flags: SkuFlags::empty(),
            deleted: false,
        }
    }

    #[must_use]
    pub fn has_flag(&self, flag: SkuFlags) -> bool {
        self.flags.contains(flag)
    }
}

impl Entity for Sku {
    type Key = Snowflake;
    const KIND: EntityKind = EntityKind::Sku;
    const MERGE_POLICY: MergePolicy = MergePolicy::FullReplace;

    fn key(&self) -> Snowflake {
        self.id
    }

    fn key_of(raw: &Value) -> ModelResult<Snowflake> {
        FieldMerge::new(raw, Self::MERGE_POLICY, "sku")?.expect("id")
    }

    fn from_raw(raw: &Value, ctx: &DecodeContext<'_>) -> ModelResult<Self> {
        let mut sku = Self::empty(Self::key_of(raw)?);
        sku.patch(raw, ctx)?;
        Ok(sku)
    }

    fn patch(&mut self, raw: &Value, _ctx: &DecodeContext<'_>) -> ModelResult<()> {
        let fields = FieldMerge::new(raw, Self::MERGE_POLICY, "sku")?;
        fields.merge("type", &mut self.kind)?;
        fields.required("application_id", &mut self.application_id)?;
        fields.merge("name", &mut self.name)?;
        fields.merge("slug", &mut self.slug)?;
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
