//! Recurring premium subscriptions.

use crate::wire::wire_enum;
use crate::{DecodeContext, Entity, EntityKind, FieldMerge, MergePolicy, ModelResult};
use accord_types::{Snowflake, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

wire_enum! {
    /// Billing state of a subscription.
    pub enum SubscriptionStatus: u8 {
        #[default]
        Active = 0,
        Ending = 1,
        Inactive = 2,
    }
}

/// A subscription. References SKUs and entitlements by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub sku_ids: Vec<Snowflake>,
    pub entitlement_ids: Vec<Snowflake>,
    pub renewal_sku_ids: Option<Vec<Snowflake>>,
    pub current_period_start: Option<Timestamp>,
    pub current_period_end: Option<Timestamp>,
    pub status: SubscriptionStatus,
    pub canceled_at: Option<Timestamp>,
    pub country: Option<String>,
    #[serde(skip)]
    pub deleted: bool,
}

impl Subscription {
    fn empty(id: Snowflake) -> Self {
        Self {
            id,
            user_id: Snowflake::default(),
            sku_ids: Vec::new(),
            entitlement_ids: Vec::new(),
            renewal_sku_ids: None,
            current_period_start: None,
            current_period_end: None,
            status: SubscriptionStatus::default(),
            canceled_at: None,
            country: None,
            deleted: false,
        }
    }

    #[must_use]
    pub fn is_canceled(&self) -> bool {
        self.canceled_at.is_some()
    }
}

impl Entity for Subscription {
    type Key = Snowflake;
    const KIND: EntityKind = EntityKind::Subscription;
    const MERGE_POLICY: MergePolicy = MergePolicy::FullReplace;

    fn key(&self) -> Snowflake {
        self.id
    }

    fn key_of(raw: &Value) -> ModelResult<Snowflake> {
        FieldMerge::new(raw, Self::MERGE_POLICY, "subscription")?.expect("id")
    }

    fn from_raw(raw: &Value, ctx: &DecodeContext<'_>) -> ModelResult<Self> {
        let mut subscription = Self::empty(Self::key_of(raw)?);
        subscription.patch(raw, ctx)?;
        Ok(subscription)
    }

    fn patch(&mut self, raw: &Value, _ctx: &DecodeContext<'_>) -> ModelResult<()> {
        let fields = FieldMerge::new(raw, Self::MERGE_POLICY, "subscription")?;
        fields.required("user_id", &mut self.user_id)?;
        fields.merge("sku_ids", &mut self.sku_ids)?;
        fields.merge("entitlement_ids", &mut self.entitlement_ids)?;
        fields.merge("renewal_sku_ids", &mut self.renewal_sku_ids)?;
        fields.merge("current_period_start", &mut self.current_period_start)?;
        fields.merge("current_period_end", &mut self.current_period_end)?;
        fields.merge("status", &mut self.status)?;
        fields.merge("canceled_at", &mut self.canceled_at)?;
        fields.merge("country", &mut self.country)?;
        Ok(())
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}
