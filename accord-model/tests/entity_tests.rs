use accord_model::{
    Channel, ChannelType, DecodeContext, Entitlement, EntitlementType, Entity, EntityKind, Guild,
    GuildMember, GuildMemberFlags, MemberKey, MergePolicy, Message, ModelError, Sku, SkuFlags,
    SkuType, StageInstance, StagePrivacyLevel, Subscription, SubscriptionStatus, User,
};
use accord_types::{Snowflake, Timestamp};
use pretty_assertions::assert_eq;
use serde_json::json;

fn ctx() -> DecodeContext<'static> {
    DecodeContext::detached()
}

fn sf(id: u64) -> Snowflake {
    Snowflake::new(id)
}

fn subscription_payload() -> serde_json::Value {
    json!({
        "id": "500",
        "user_id": "10",
        "sku_ids": ["600"],
        "entitlement_ids": ["700"],
        "renewal_sku_ids": ["601"],
        "current_period_start": "2024-01-01T00:00:00Z",
        "current_period_end": "2024-02-01T00:00:00Z",
        "status": 1,
        "canceled_at": "2024-01-15T00:00:00Z",
        "country": "US"
    })
}

// ── Kinds & policies ─────────────────────────────────────────────

#[test]
fn kinds_declare_their_merge_policy() {
    assert_eq!(User::MERGE_POLICY, MergePolicy::Partial);
    assert_eq!(Guild::MERGE_POLICY, MergePolicy::Partial);
    assert_eq!(Channel::MERGE_POLICY, MergePolicy::Partial);
    assert_eq!(Message::MERGE_POLICY, MergePolicy::Partial);
    assert_eq!(GuildMember::MERGE_POLICY, MergePolicy::Partial);
    assert_eq!(StageInstance::MERGE_POLICY, MergePolicy::Partial);
    assert_eq!(Entitlement::MERGE_POLICY, MergePolicy::FullReplace);
    assert_eq!(Subscription::MERGE_POLICY, MergePolicy::FullReplace);
    assert_eq!(Sku::MERGE_POLICY, MergePolicy::FullReplace);
}

#[test]
fn kind_names_are_stable() {
    assert_eq!(GuildMember::KIND, EntityKind::GuildMember);
    assert_eq!(EntityKind::GuildMember.as_str(), "guild_member");
    assert_eq!(EntityKind::StageInstance.to_string(), "stage_instance");
}

// ── User ─────────────────────────────────────────────────────────

#[test]
fn user_from_raw_reads_fields() {
    let user = User::from_raw(
        &json!({"id": "1", "username": "ana", "global_name": "Ana", "bot": true}),
        &ctx(),
    )
    .unwrap();
    assert_eq!(user.id, sf(1));
    assert_eq!(user.username, "ana");
    assert_eq!(user.display_name(), "Ana");
    assert!(user.bot);
    assert!(!user.is_deleted());
}

#[test]
fn user_display_name_falls_back_to_username() {
    let user = User::from_raw(&json!({"id": "1", "username": "ana"}), &ctx()).unwrap();
    assert_eq!(user.display_name(), "ana");
}

#[test]
fn user_without_id_is_rejected() {
    let err = User::from_raw(&json!({"username": "ana"}), &ctx()).unwrap_err();
    assert!(matches!(err, ModelError::MissingField("id")));
}

#[test]
fn non_object_payload_is_rejected() {
    let err = User::from_raw(&json!([1, 2]), &ctx()).unwrap_err();
    assert!(matches!(err, ModelError::NotAnObject(_)));
}

// ── Guild ────────────────────────────────────────────────────────

#[test]
fn guild_unavailable_flag_is_restated_by_every_payload() {
    let mut guild = Guild::from_raw(&json!({"id": "1", "unavailable": true}), &ctx()).unwrap();
    assert!(!guild.available);

    guild.patch(&json!({"id": "1", "name": "Den"}), &ctx()).unwrap();
    assert!(guild.available);
    assert_eq!(guild.name, "Den");
}

#[test]
fn guild_patch_keeps_absent_fields() {
    let mut guild = Guild::from_raw(
        &json!({"id": "1", "name": "Den", "member_count": 12}),
        &ctx(),
    )
    .unwrap();
    guild.patch(&json!({"id": "1", "icon": "abc"}), &ctx()).unwrap();
    assert_eq!(guild.name, "Den");
    assert_eq!(guild.member_count, 12);
    assert_eq!(guild.icon.as_deref(), Some("abc"));
}

#[test]
fn guild_shard_id_is_never_read_from_payload() {
    let guild = Guild::from_raw(&json!({"id": "1", "shard_id": 3}), &ctx()).unwrap();
    assert_eq!(guild.shard_id, None);
}

// ── Channel ──────────────────────────────────────────────────────

#[test]
fn channel_type_is_normalized() {
    let thread = Channel::from_raw(
        &json!({"id": "5", "type": 11, "guild_id": "1", "parent_id": "4"}),
        &ctx(),
    )
    .unwrap();
    assert_eq!(thread.kind, ChannelType::PublicThread);
    assert!(thread.is_thread());
    assert!(thread.is_text_based());
}

#[test]
fn unknown_channel_type_is_retained() {
    let channel = Channel::from_raw(&json!({"id": "5", "type": 99}), &ctx()).unwrap();
    assert_eq!(channel.kind, ChannelType::Unknown(99));
    assert_eq!(channel.kind.code(), 99);
    assert!(!channel.is_text_based());
}

#[test]
fn category_is_not_text_based() {
    let channel = Channel::from_raw(&json!({"id": "5", "type": 4}), &ctx()).unwrap();
    assert!(!channel.is_text_based());
}

#[test]
fn channel_null_clears_field() {
    let mut channel = Channel::from_raw(
        &json!({"id": "5", "type": 0, "topic": "rules"}),
        &ctx(),
    )
    .unwrap();
    channel.patch(&json!({"id": "5", "topic": null}), &ctx()).unwrap();
    assert_eq!(channel.topic, None);
}

// ── Guild member ─────────────────────────────────────────────────

#[test]
fn member_key_combines_guild_and_user() {
    let raw = json!({"guild_id": "1", "user": {"id": "2"}, "nick": "n"});
    assert_eq!(GuildMember::key_of(&raw).unwrap(), MemberKey::new(sf(1), sf(2)));
    assert_eq!(MemberKey::new(sf(1), sf(2)).to_string(), "1/2");
}

#[test]
fn member_without_user_is_rejected() {
    let err = GuildMember::from_raw(&json!({"guild_id": "1"}), &ctx()).unwrap_err();
    assert!(matches!(err, ModelError::MissingField("user")));
}

#[test]
fn member_partial_patch_keeps_absent_fields() {
    let mut member = GuildMember::from_raw(
        &json!({
            "guild_id": "1",
            "user": {"id": "2"},
            "nick": "old",
            "roles": ["9"],
            "flags": 3
        }),
        &ctx(),
    )
    .unwrap();
    member
        .patch(&json!({"guild_id": "1", "user": {"id": "2"}, "pending": true}), &ctx())
        .unwrap();
    assert_eq!(member.nick.as_deref(), Some("old"));
    assert_eq!(member.roles, vec![sf(9)]);
    assert!(member.pending);
    assert!(member.flags.contains(GuildMemberFlags::DID_REJOIN));
    assert!(member.flags.contains(GuildMemberFlags::COMPLETED_ONBOARDING));
}

#[test]
fn member_timeout_is_relative_to_now() {
    let member = GuildMember::from_raw(
        &json!({
            "guild_id": "1",
            "user": {"id": "2"},
            "communication_disabled_until": 2_000
        }),
        &ctx(),
    )
    .unwrap();
    assert!(member.is_communication_disabled(Timestamp::from_millis(1_000)));
    assert!(!member.is_communication_disabled(Timestamp::from_millis(3_000)));
}

// ── Stage instance ───────────────────────────────────────────────

#[test]
fn stage_instance_reads_privacy_level() {
    let stage = StageInstance::from_raw(
        &json!({"id": "8", "guild_id": "1", "channel_id": "3", "topic": "AMA", "privacy_level": 1}),
        &ctx(),
    )
    .unwrap();
    assert_eq!(stage.privacy_level, StagePrivacyLevel::Public);
    assert_eq!(stage.topic, "AMA");
}

#[test]
fn stage_instance_update_may_omit_channel() {
    let mut stage = StageInstance::from_raw(
        &json!({"id": "8", "guild_id": "1", "channel_id": "3", "topic": "AMA"}),
        &ctx(),
    )
    .unwrap();
    stage.patch(&json!({"id": "8", "topic": "Q&A"}), &ctx()).unwrap();
    assert_eq!(stage.channel_id, sf(3));
    assert_eq!(stage.topic, "Q&A");
}

// ── Entitlement ──────────────────────────────────────────────────

#[test]
fn entitlement_requires_sku_and_application() {
    let err = Entitlement::from_raw(&json!({"id": "1", "application_id": "2"}), &ctx()).unwrap_err();
    assert!(matches!(err, ModelError::MissingField("sku_id")));
}

#[test]
fn entitlement_full_replace_resets_absent_fields() {
    let mut entitlement = Entitlement::from_raw(
        &json!({
            "id": "1",
            "sku_id": "2",
            "application_id": "3",
            "user_id": "4",
            "type": 4,
            "consumed": true,
            "ends_at": "2030-01-01T00:00:00Z"
        }),
        &ctx(),
    )
    .unwrap();
    assert_eq!(entitlement.kind, EntitlementType::TestModePurchase);
    assert!(entitlement.consumed);

    entitlement
        .patch(&json!({"id": "1", "sku_id": "2", "application_id": "3"}), &ctx())
        .unwrap();
    assert_eq!(entitlement.user_id, None);
    assert_eq!(entitlement.ends_at, None);
    assert!(!entitlement.consumed);
    assert_eq!(entitlement.kind, EntitlementType::default());
}

#[test]
fn entitlement_payload_deleted_flag_is_not_the_cache_flag() {
    let entitlement = Entitlement::from_raw(
        &json!({"id": "1", "sku_id": "2", "application_id": "3", "deleted": true}),
        &ctx(),
    )
    .unwrap();
    assert!(entitlement.revoked);
    assert!(!entitlement.is_deleted());
}

#[test]
fn entitlement_activity_window_is_open_when_unbounded() {
    let entitlement = Entitlement::from_raw(
        &json!({"id": "1", "sku_id": "2", "application_id": "3", "starts_at": 1_000, "ends_at": 5_000}),
        &ctx(),
    )
    .unwrap();
    assert!(!entitlement.is_active(Timestamp::from_millis(500)));
    assert!(entitlement.is_active(Timestamp::from_millis(1_000)));
    assert!(entitlement.is_active(Timestamp::from_millis(5_000)));
    assert!(!entitlement.is_active(Timestamp::from_millis(5_001)));

    let open = Entitlement::from_raw(
        &json!({"id": "1", "sku_id": "2", "application_id": "3"}),
        &ctx(),
    )
    .unwrap();
    assert!(open.is_active(Timestamp::from_millis(u64::MAX)));
}

// ── Subscription ─────────────────────────────────────────────────

#[test]
fn subscription_reads_all_fields() {
    let subscription = Subscription::from_raw(&subscription_payload(), &ctx()).unwrap();
    assert_eq!(subscription.user_id, sf(10));
    assert_eq!(subscription.sku_ids, vec![sf(600)]);
    assert_eq!(subscription.renewal_sku_ids, Some(vec![sf(601)]));
    assert_eq!(subscription.status, SubscriptionStatus::Ending);
    assert!(subscription.is_canceled());
    assert_eq!(subscription.country.as_deref(), Some("US"));
}

#[test]
fn subscription_full_replace_resets_missing_optional_field() {
    let mut subscription = Subscription::from_raw(&subscription_payload(), &ctx()).unwrap();
    let mut update = subscription_payload();
    let fields = update.as_object_mut().unwrap();
    fields.remove("canceled_at");
    fields.remove("renewal_sku_ids");
    fields.remove("country");

    subscription.patch(&update, &ctx()).unwrap();
    assert_eq!(subscription.canceled_at, None);
    assert_eq!(subscription.renewal_sku_ids, None);
    assert_eq!(subscription.country, None);
    assert_eq!(subscription.sku_ids, vec![sf(600)]);
}

// ── SKU ──────────────────────────────────────────────────────────

#[test]
fn sku_flags_keep_unknown_bits() {
    let bits: u64 = (1 << 2) | (1 << 40);
    let sku = Sku::from_raw(
        &json!({"id": "1", "type": 5, "application_id": "2", "name": "Gold", "slug": "gold", "flags": bits}),
        &ctx(),
    )
    .unwrap();
    assert_eq!(sku.kind, SkuType::Subscription);
    assert!(sku.has_flag(SkuFlags::AVAILABLE));
    assert!(!sku.has_flag(SkuFlags::USER_SUBSCRIPTION));
    assert_eq!(sku.flags.bits() & (1 << 40), 1 << 40);
}

#[test]
fn sku_type_codes_round_trip() {
    assert_eq!(SkuType::from_code(6), SkuType::SubscriptionGroup);
    assert_eq!(SkuType::from_code(42).code(), 42);
}

// ── Message & poll ───────────────────────────────────────────────

#[test]
fn message_reads_author_id() {
    let message = Message::from_raw(
        &json!({"id": "30", "channel_id": "3", "author": {"id": "2", "username": "ana"}, "content": "hi"}),
        &ctx(),
    )
    .unwrap();
    assert_eq!(message.author_id, Some(sf(2)));
    assert_eq!(message.content, "hi");
    assert!(!message.is_edited());
}

#[test]
fn message_edit_keeps_poll_tallies() {
    let mut message = Message::from_raw(
        &json!({
            "id": "30",
            "channel_id": "3",
            "poll": {
                "question": {"text": "Lunch?"},
                "answers": [
                    {"answer_id": 7, "poll_media": {"text": "Pizza"}},
                    {"answer_id": 8, "poll_media": {"text": "Salad"}}
                ],
                "results": {"is_finalized": false, "answer_counts": [{"id": 7, "count": 3}]}
            }
        }),
        &ctx(),
    )
    .unwrap();
    message
        .patch(&json!({"id": "30", "content": "edited", "edited_timestamp": 5_000}), &ctx())
        .unwrap();

    let poll = message.poll.as_ref().unwrap();
    assert_eq!(poll.question.as_deref(), Some("Lunch?"));
    assert_eq!(poll.answer(7).unwrap().vote_count, 3);
    assert_eq!(poll.answer(8).unwrap().vote_count, 0);
    assert_eq!(poll.total_votes(), 3);
    assert!(message.is_edited());
}

#[test]
fn poll_answer_without_count_keeps_tally() {
    let mut message = Message::from_raw(
        &json!({
            "id": "30",
            "channel_id": "3",
            "poll": {"answers": [{"answer_id": 7, "poll_media": {"text": "A"}, "count": 2}]}
        }),
        &ctx(),
    )
    .unwrap();
    message
        .patch(
            &json!({"id": "30", "poll": {"answers": [{"answer_id": 7, "poll_media": {"text": "A"}}]}}),
            &ctx(),
        )
        .unwrap();
    assert_eq!(message.poll.unwrap().answer(7).unwrap().vote_count, 2);
}

#[test]
fn poll_vote_removal_saturates_at_zero() {
    let mut message = Message::from_raw(
        &json!({"id": "30", "channel_id": "3", "poll": {"answers": [{"answer_id": 1}]}}),
        &ctx(),
    )
    .unwrap();
    let answer = message.poll.as_mut().unwrap().answer_mut(1).unwrap();
    answer.remove_vote();
    assert_eq!(answer.vote_count, 0);
    answer.add_vote();
    answer.add_vote();
    answer.remove_vote();
    assert_eq!(answer.vote_count, 1);
}

#[test]
fn message_null_poll_clears_it() {
    let mut message = Message::from_raw(
        &json!({"id": "30", "channel_id": "3", "poll": {"answers": []}}),
        &ctx(),
    )
    .unwrap();
    message.patch(&json!({"id": "30", "poll": null}), &ctx()).unwrap();
    assert!(message.poll.is_none());
}

// ── Lifecycle ────────────────────────────────────────────────────

#[test]
fn mark_deleted_sets_flag() {
    let mut user = User::from_raw(&json!({"id": "1"}), &ctx()).unwrap();
    user.mark_deleted();
    assert!(user.is_deleted());
}

#[test]
fn snapshot_is_detached_from_later_patches() {
    let mut member = GuildMember::from_raw(
        &json!({"guild_id": "1", "user": {"id": "2"}, "nick": "before", "roles": ["5"]}),
        &ctx(),
    )
    .unwrap();
    let before = member.snapshot();
    member
        .patch(&json!({"guild_id": "1", "user": {"id": "2"}, "nick": "after", "roles": []}), &ctx())
        .unwrap();
    assert_eq!(before.nick.as_deref(), Some("before"));
    assert_eq!(before.roles, vec![sf(5)]);
    assert_eq!(member.nick.as_deref(), Some("after"));
}

#[test]
fn key_is_fixed_at_construction() {
    let mut channel = Channel::from_raw(&json!({"id": "5", "type": 0}), &ctx()).unwrap();
    channel.patch(&json!({"id": "6", "name": "general"}), &ctx()).unwrap();
    assert_eq!(channel.key(), sf(5));
}
