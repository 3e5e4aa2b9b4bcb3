use accord_cache::{
    Cache, ChannelRelations, EntitlementRelations, GuildRelations, MemberRelations,
    StageInstanceRelations, SubscriptionRelations,
};
use accord_model::DecodeContext;
use accord_types::Snowflake;
use serde_json::json;

fn ctx() -> DecodeContext<'static> {
    DecodeContext::detached()
}

fn seeded() -> Cache {
    let cache = Cache::new(Some(10));
    cache.users.upsert(&json!({"id": "10", "username": "ana"}), &ctx()).unwrap();
    cache.guilds.upsert(&json!({"id": "1", "name": "Den", "owner_id": "10"}), &ctx()).unwrap();
    cache.channels.upsert(&json!({"id": "3", "type": 0, "guild_id": "1"}), &ctx()).unwrap();
    cache
        .channels
        .upsert(&json!({"id": "4", "type": 11, "guild_id": "1", "parent_id": "3"}), &ctx())
        .unwrap();
    cache.channels.upsert(&json!({"id": "99", "type": 1}), &ctx()).unwrap();
    cache.messages.upsert(&json!({"id": "30", "channel_id": "3"}), &ctx()).unwrap();
    cache.messages.upsert(&json!({"id": "31", "channel_id": "4"}), &ctx()).unwrap();
    cache
        .members
        .upsert(&json!({"guild_id": "1", "user": {"id": "10"}}), &ctx())
        .unwrap();
    cache.skus.upsert(&json!({"id": "600", "type": 5, "application_id": "7"}), &ctx()).unwrap();
    cache
}

// ── Helpers ──────────────────────────────────────────────────────

#[test]
fn messages_in_filters_by_channel() {
    let cache = seeded();
    let messages = cache.messages_in(Snowflake::new(3));
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].id(), Snowflake::new(30));
}

#[test]
fn channels_of_includes_threads() {
    let cache = seeded();
    assert_eq!(cache.channels_of(Snowflake::new(1)).len(), 2);
    assert_eq!(cache.threads_of(Snowflake::new(3)).len(), 1);
}

#[test]
fn message_store_is_bounded() {
    let cache = seeded();
    assert_eq!(cache.messages.capacity(), Some(10));
    assert_eq!(cache.guilds.capacity(), None);
}

// ── Relations ────────────────────────────────────────────────────

#[test]
fn guild_resolves_channels_members_and_owner() {
    let cache = seeded();
    let guild = cache.guilds.get(&Snowflake::new(1)).unwrap();
    let guild = guild.read();
    assert_eq!(guild.channels(&cache).len(), 2);
    assert_eq!(guild.members(&cache).len(), 1);
    assert_eq!(guild.owner(&cache).unwrap().read().username, "ana");
}

#[test]
fn channel_resolves_guild_parent_and_messages() {
    let cache = seeded();
    let thread = cache.channels.get(&Snowflake::new(4)).unwrap();
    let thread = thread.read();
    assert_eq!(thread.guild(&cache).unwrap().id(), Snowflake::new(1));
    assert_eq!(thread.parent(&cache).unwrap().id(), Snowflake::new(3));
    assert_eq!(thread.messages(&cache).len(), 1);
}

#[test]
fn dm_channel_has_no_guild() {
    let cache = seeded();
    let dm = cache.channels.get(&Snowflake::new(99)).unwrap();
    assert!(dm.read().guild(&cache).is_none());
}

#[test]
fn member_resolves_user() {
    let cache = seeded();
    let members = cache.members_of(Snowflake::new(1));
    assert_eq!(members[0].read().user(&cache).unwrap().id(), Snowflake::new(10));
}

#[test]
fn missing_references_resolve_to_none() {
    let cache = seeded();
    let entitlement = cache
        .entitlements
        .upsert(
            &json!({"id": "50", "sku_id": "601", "application_id": "7", "user_id": "11", "guild_id": "2"}),
            &ctx(),
        )
        .unwrap();
    let entitlement = entitlement.read();
    assert!(entitlement.user(&cache).is_none());
    assert!(entitlement.guild(&cache).is_none());
    assert!(entitlement.sku(&cache).is_none());
}

#[test]
fn subscription_skips_uncached_ids() {
    let cache = seeded();
    let subscription = cache
        .subscriptions
        .upsert(
            &json!({"id": "70", "user_id": "10", "sku_ids": ["600", "601"], "renewal_sku_ids": ["600"]}),
            &ctx(),
        )
        .unwrap();
    let subscription = subscription.read();
    assert_eq!(subscription.skus(&cache).len(), 1);
    assert_eq!(subscription.renewal_skus(&cache).len(), 1);
    assert!(subscription.entitlements(&cache).is_empty());
    assert!(subscription.user(&cache).is_some());
}

#[test]
fn stage_instance_resolves_channel() {
    let cache = seeded();
    let stage = cache
        .stage_instances
        .upsert(&json!({"id": "8", "guild_id": "1", "channel_id": "3"}), &ctx())
        .unwrap();
    assert_eq!(stage.read().channel(&cache).unwrap().id(), Snowflake::new(3));
    assert_eq!(cache.stage_instances_of(Snowflake::new(1)).len(), 1);
}
