//! Property-based tests for the entity lifecycle.
//!
//! - Snapshot detachment: patching the original never shows through a
//!   snapshot taken before the patch.
//! - Merge policy: partial kinds keep absent fields, full-replace kinds reset
//!   them.

use accord_model::{DecodeContext, Entity, GuildMember, Subscription};
use proptest::prelude::*;
use serde_json::json;

fn nick_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-z]{1,16}")
}

fn roles_strategy() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(1u64..1_000_000, 0..8)
}

fn member_raw(nick: &Option<String>, roles: &[u64]) -> serde_json::Value {
    let roles: Vec<String> = roles.iter().map(u64::to_string).collect();
    json!({"guild_id": "1", "user": {"id": "2"}, "nick": nick, "roles": roles})
}

proptest! {
    #[test]
    fn snapshot_survives_patch(
        nick_a in nick_strategy(),
        roles_a in roles_strategy(),
        nick_b in nick_strategy(),
        roles_b in roles_strategy(),
    ) {
        let ctx = DecodeContext::detached();
        let mut member = GuildMember::from_raw(&member_raw(&nick_a, &roles_a), &ctx).unwrap();
        let before = member.snapshot();
        let frozen = before.clone();

        member.patch(&member_raw(&nick_b, &roles_b), &ctx).unwrap();

        prop_assert_eq!(&before, &frozen);
        prop_assert_eq!(before.nick, nick_a);
        prop_assert_eq!(member.nick, nick_b);
    }

    #[test]
    fn partial_member_patch_keeps_absent_nick(
        nick in nick_strategy(),
        roles in roles_strategy(),
    ) {
        let ctx = DecodeContext::detached();
        let mut member = GuildMember::from_raw(&member_raw(&nick, &roles), &ctx).unwrap();
        member.patch(&json!({"guild_id": "1", "user": {"id": "2"}, "pending": true}), &ctx).unwrap();
        prop_assert_eq!(member.nick, nick);
        prop_assert_eq!(member.roles.len(), roles.len());
    }

    #[test]
    fn full_replace_subscription_resets_absent_country(country in "[A-Z]{2}") {
        let ctx = DecodeContext::detached();
        let mut subscription = Subscription::from_raw(
            &json!({"id": "5", "user_id": "6", "country": country}),
            &ctx,
        )
        .unwrap();
        subscription.patch(&json!({"id": "5", "user_id": "6"}), &ctx).unwrap();
        prop_assert_eq!(subscription.country, None);
    }
}
