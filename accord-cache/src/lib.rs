//! In-memory cache layer for accord.
//!
//! - [`EntityStore`] keeps at most one live instance per key and patches it in
//!   place, so every [`Cached`] handle observes later updates.
//! - [`Collection`] is the ordered, freshly built result of a list fetch.
//! - [`TombstoneRegistry`] remembers recent deletions so late events cannot
//!   revive them. [`Tombstones`] bundles the registries the dispatcher uses.
//! - [`Cache`] aggregates one store per entity kind.
//!
//! Stores lock internally and hand out handles; no store lock is held while an
//! entity is patched.

mod cache;
mod cached;
mod collection;
mod relations;
mod store;
mod tombstone;

pub use cache::Cache;
pub use cached::Cached;
pub use collection::Collection;
pub use relations::{
    ChannelRelations, EntitlementRelations, GuildRelations, MemberRelations, StageInstanceRelations,
    SubscriptionRelations,
};
pub use store::EntityStore;
pub use tombstone::{TombstoneRegistry, Tombstones};
