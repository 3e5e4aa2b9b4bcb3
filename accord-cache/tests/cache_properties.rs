//! Property-based tests for store identity.
//!
//! - Upserting the same key any number of times yields one live instance.
//! - After removal the instance is flagged deleted and the key is absent.

use accord_cache::EntityStore;
use accord_model::{DecodeContext, User};
use accord_types::Snowflake;
use proptest::prelude::*;
use serde_json::json;

fn ops_strategy() -> impl Strategy<Value = Vec<(u64, String)>> {
    prop::collection::vec((1u64..20, "[a-z]{1,8}"), 1..40)
}

proptest! {
    #[test]
    fn one_instance_per_key(ops in ops_strategy()) {
        let store = EntityStore::<User>::new();
        let ctx = DecodeContext::detached();
        let mut first_seen = std::collections::HashMap::new();

        for (id, name) in &ops {
            let handle = store
                .upsert(&json!({"id": id.to_string(), "username": name}), &ctx)
                .unwrap();
            let first = first_seen.entry(*id).or_insert_with(|| handle.clone());
            prop_assert!(first.ptr_eq(&handle));
            prop_assert_eq!(&first.read().username, name);
        }
        prop_assert_eq!(store.len(), first_seen.len());
    }

    #[test]
    fn removal_flags_and_forgets(ids in prop::collection::hash_set(1u64..1000, 1..20)) {
        let store = EntityStore::<User>::new();
        let ctx = DecodeContext::detached();
        let handles: Vec<_> = ids
            .iter()
            .map(|id| store.upsert(&json!({"id": id.to_string()}), &ctx).unwrap())
            .collect();

        for id in &ids {
            store.remove(&Snowflake::new(*id));
        }
        prop_assert!(store.is_empty());
        prop_assert!(handles.iter().all(|h| h.is_deleted()));
    }
}
