//! Premium entitlements: a user's or guild's access to a SKU.

use crate::wire::wire_enum;
use crate::{DecodeContext, Entity, EntityKind, FieldMerge, MergePolicy, ModelResult};
use accord_types::{Snowflake, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

wire_enum! {
    /// How an entitlement was acquired.
    pub enum EntitlementType: u8 {
        Purchase = 1,
        PremiumSubscription = 2,
        DeveloperGift = 3,
        TestModePurchase = 4,
        FreePurchase = 5,
        UserGift = 6,
        PremiumPurchase = 7,
        #[default]
        ApplicationSubscription = 8,
    }
}

wire_enum! {
    /// Owner kind for test entitlements.
    pub enum EntitlementOwnerType: u8 {
        Guild = 1,
        #[default]
        User = 2,
    }
}

/// An entitlement.
///
/// Entitlement payloads are complete records, so absent optional fields
/// reset to `None`/`false` on every patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entitlement {
    pub id: Snowflake,
    pub sku_id: Snowflake,
    pub application_id: Snowflake,
    pub user_id: Option<Snowflake>,
    pub guild_id: Option<Snowflake>,
    pub promotion_id: Option<Snowflake>,
    pub subscription_id: Option<Snowflake>,
    pub kind: EntitlementType,
    /// The platform's own deletion flag (refunds, revoked gifts).
    pub revoked: bool,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub consumed: bool,
    #[serde(skip)]
    pub deleted: bool,
}

impl Entitlement {
    fn empty(id: Snowflake) -> Self {
        Self {
            id,
            sku_id: Snowflake::default(),
            application_id: Snowflake::default(),
            user_id: None,
            guild_id: None,
            promotion_id: None,
            subscription_id: None,
            kind: EntitlementType::default(),
            revoked: false,
            starts_at: None,
            ends_at: None,
            consumed: false,
            deleted: false,
        }
    }

    /// Whether the entitlement grants access at `now`. Absent bounds are open.
    #[must_use]
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.starts_at.is_none_or(|start| !now.is_before(&start))
            && self.ends_at.is_none_or(|end| !end.is_before(&now))
    }

    /// Whether the entitlement belongs to a guild rather than a user.
    #[must_use]
    pub fn is_guild_entitlement(&self) -> bool {
        self.guild_id.is_some()
    }
}

impl Entity for Entitlement {
    type Key = Snowflake;
    const KIND: EntityKind = EntityKind::Entitlement;
    const MERGE_POLICY: MergePolicy = MergePolicy::FullReplace;

    fn key(&self) -> Snowflake {
        self.id
    }

    fn key_of(raw: &Value) -> ModelResult<Snowflake> {
        FieldMerge::new(raw, Self::MERGE_POLICY, "entitlement")?.expect("id")
    }

    fn from_raw(raw: &Value, ctx: &DecodeContext<'_>) -> ModelResult<Self> {
        let mut entitlement = Self::empty(Self::key_of(raw)?);
        entitlement.patch(raw, ctx)?;
        Ok(entitlement)
    }

    fn patch(&mut self, raw: &Value, _ctx: &DecodeContext<'_>) -> ModelResult<()> {
        let fields = FieldMerge::new(raw, Self::MERGE_POLICY, "entitlement")?;
        fields.required("sku_id", &mut self.sku_id)?;
        fields.required("application_id", &mut self.application_id)?;
        fields.merge("user_id", &mut self.user_id)?;
        fields.merge("guild_id", &mut self.guild_id)?;
        fields.merge("promotion_id", &mut self.promotion_id)?;
        fields.merge("subscription_id", &mut self.subscription_id)?;
        fields.merge("type", &mut self.kind)?;
        fields.merge("deleted", &mut self.revoked)?;
        fields.merge("starts_at", &mut self.starts_at)?;
        fields.merge("ends_at", &mut self.ends_at)?;
        fields.merge("consumed", &mut self.consumed)?;
        Ok(())
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}
