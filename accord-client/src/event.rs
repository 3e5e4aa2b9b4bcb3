//! Normalized client events.
//!
//! This catalog is the contract with downstream consumers: every variant's
//! name and payload shape is stable. New values are live handles; "old" values
//! are detached snapshots taken before the patch, `None` when nothing was
//! cached.

use accord_cache::Cached;
use accord_model::{Channel, Entitlement, Guild, GuildMember, Message, StageInstance, Subscription};
use accord_types::Snowflake;

#[derive(Debug, Clone)]
pub enum ClientEvent {
    ShardReady {
        shard_id: u32,
        unavailable_guilds: Vec<Snowflake>,
    },
    GuildCreate(Cached<Guild>),
    GuildAvailable(Cached<Guild>),
    GuildUnavailable(Cached<Guild>),
    GuildDelete(Cached<Guild>),
    GuildMemberAdd(Cached<GuildMember>),
    GuildMemberUpdate {
        old: Option<GuildMember>,
        new: Cached<GuildMember>,
    },
    GuildMemberRemove(Cached<GuildMember>),
    ChannelCreate(Cached<Channel>),
    ChannelUpdate {
        old: Option<Channel>,
        new: Cached<Channel>,
    },
    ChannelDelete(Cached<Channel>),
    ThreadCreate {
        thread: Cached<Channel>,
        newly_created: bool,
    },
    ThreadUpdate {
        old: Option<Channel>,
        new: Cached<Channel>,
    },
    ThreadDelete(Cached<Channel>),
    MessageCreate(Cached<Message>),
    MessageUpdate {
        old: Option<Message>,
        new: Cached<Message>,
    },
    MessageDelete(Cached<Message>),
    MessagePollVoteAdd {
        message: Cached<Message>,
        answer_id: u32,
        user_id: Snowflake,
    },
    MessagePollVoteRemove {
        message: Cached<Message>,
        answer_id: u32,
        user_id: Snowflake,
    },
    StageInstanceCreate(Cached<StageInstance>),
    StageInstanceUpdate {
        old: Option<StageInstance>,
        new: Cached<StageInstance>,
    },
    StageInstanceDelete(Cached<StageInstance>),
    EntitlementCreate(Cached<Entitlement>),
    EntitlementUpdate {
        old: Option<Entitlement>,
        new: Cached<Entitlement>,
    },
    EntitlementDelete(Cached<Entitlement>),
    SubscriptionCreate(Cached<Subscription>),
    SubscriptionUpdate {
        old: Option<Subscription>,
        new: Cached<Subscription>,
    },
    SubscriptionDelete(Cached<Subscription>),
    /// Low-severity diagnostic.
    Debug(String),
}

impl ClientEvent {
    /// Stable event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ShardReady { .. } => "shardReady",
            Self::GuildCreate(_) => "guildCreate",
            Self::GuildAvailable(_) => "guildAvailable",
            Self::GuildUnavailable(_) => "guildUnavailable",
            Self::GuildDelete(_) => "guildDelete",
            Self::GuildMemberAdd(_) => "guildMemberAdd",
            Self::GuildMemberUpdate { .. } => "guildMemberUpdate",
            Self::GuildMemberRemove(_) => "guildMemberRemove",
            Self::ChannelCreate(_) => "channelCreate",
            Self::ChannelUpdate { .. } => "channelUpdate",
            Self::ChannelDelete(_) => "channelDelete",
            Self::ThreadCreate { .. } => "threadCreate",
            Self::ThreadUpdate { .. } => "threadUpdate",
            Self::ThreadDelete(_) => "threadDelete",
            Self::MessageCreate(_) => "messageCreate",
            Self::MessageUpdate { .. } => "messageUpdate",
            Self::MessageDelete(_) => "messageDelete",
            Self::MessagePollVoteAdd { .. } => "messagePollVoteAdd",
            Self::MessagePollVoteRemove { .. } => "messagePollVoteRemove",
            Self::StageInstanceCreate(_) => "stageInstanceCreate",
            Self::StageInstanceUpdate { .. } => "stageInstanceUpdate",
            Self::StageInstanceDelete(_) => "stageInstanceDelete",
            Self::EntitlementCreate(_) => "entitlementCreate",
            Self::EntitlementUpdate { .. } => "entitlementUpdate",
            Self::EntitlementDelete(_) => "entitlementDelete",
            Self::SubscriptionCreate(_) => "subscriptionCreate",
            Self::SubscriptionUpdate { .. } => "subscriptionUpdate",
            Self::SubscriptionDelete(_) => "subscriptionDelete",
            Self::Debug(_) => "debug",
        }
    }
}
