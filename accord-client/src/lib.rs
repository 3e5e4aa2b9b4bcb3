//! Cache synchronization and event normalization for accord.
//!
//! A [`Client`] owns the caches and feeds them from two directions:
//!
//! - **Gateway dispatches** go through the [`Dispatcher`]: one synchronous
//!   handler per dispatch kind resolves references, mutates the cache in place
//!   and emits a normalized [`ClientEvent`] to the [`EventSink`].
//! - **REST calls** go through the managers ([`EntitlementManager`],
//!   [`SkuManager`], [`SubscriptionManager`]) over a [`Transport`]; results
//!   are upserted into the same stores.
//!
//! ## Consistency
//!
//! The gateway stream is unreliable and may be reordered, so the dispatcher is
//! forgiving: events about entities it cannot resolve are dropped, and recent
//! deletions are remembered in tombstones so a late update cannot revive them.
//! Manager calls race with dispatches; the store resolves that as last write
//! wins.
//!
//! # Example
//!
//! ```ignore
//! use accord_client::{Client, ClientConfig, ShardContext};
//! use accord_types::GatewayPayload;
//! use std::sync::Arc;
//!
//! let (events, mut rx) = tokio::sync::mpsc::unbounded_channel();
//! let client = Client::with_http(ClientConfig::default(), Arc::new(events))?;
//! let mut shard = ShardContext::new(0);
//!
//! let frame: GatewayPayload = serde_json::from_str(raw_frame)?;
//! client.dispatcher().dispatch(&frame, &mut shard);
//! while let Ok(event) = rx.try_recv() {
//!     println!("{}", event.name());
//! }
//! ```

pub mod actions;
mod client;
mod config;
mod error;
mod event;
pub mod http;
pub mod managers;
mod shard;
mod sink;
pub mod transport;

pub use actions::{ActionOutcome, Dispatcher, SkipReason};
pub use client::Client;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use event::ClientEvent;
pub use http::HttpTransport;
pub use managers::{
    CachedManager, EntitlementExt, EntitlementManager, FetchEntitlements, FetchPollVoters, FetchSkus,
    FetchSubscriptions, Fetched, MessageExt, Resolvable, SkuExt, SkuManager, SubscriptionExt, SubscriptionManager,
};
pub use shard::{ShardContext, ShardStatus};
pub use sink::{EventSink, RecordingSink};
pub use transport::{Method, RestRequest, Transport};
