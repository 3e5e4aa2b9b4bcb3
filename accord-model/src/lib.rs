//! Core entity model for accord.
//!
//! Defines the cacheable domain objects and the contract every one of them
//! implements:
//! - [`Entity`]: construct-from-raw, patch-in-place, snapshot, mark-deleted
//! - [`MergePolicy`]: whether absent payload fields keep or reset a value,
//!   declared per entity kind and applied through [`FieldMerge`]
//! - [`DecodeContext`]: optional [`Diagnostics`] sink; its presence decides
//!   whether unknown component kinds are reported or rejected
//! - [`Component`]: the message-component tagged union
//!
//! Entities reference each other by id only. Resolving an id to a live
//! instance is the cache's job (`accord-cache`).

mod channel;
pub mod component;
mod entitlement;
mod entity;
mod error;
mod flags;
mod guild;
mod member;
mod merge;
mod message;
mod poll;
mod sku;
mod stage;
mod subscription;
mod user;
mod wire;

pub use channel::{Channel, ChannelType, ThreadMetadata};
pub use component::{Component, ComponentKind};
pub use entitlement::{Entitlement, EntitlementOwnerType, EntitlementType};
pub use entity::{DecodeContext, Diagnostics, Entity, EntityKind};
pub use error::{ModelError, ModelResult};
pub use flags::{GuildMemberFlags, SkuFlags};
pub use guild::Guild;
pub use member::{GuildMember, MemberKey};
pub use merge::{FieldMerge, MergePolicy};
pub use message::Message;
pub use poll::{PartialEmoji, Poll, PollAnswer};
pub use sku::{Sku, SkuType};
pub use stage::{StageInstance, StagePrivacyLevel};
pub use subscription::{Subscription, SubscriptionStatus};
pub use user::User;
