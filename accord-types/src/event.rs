//! Gateway envelope and dispatch kinds.
//!
//! Every inbound gateway frame is `{ "op": u8, "d": any, "s": u64?, "t": string? }`.
//! Only opcode 0 (dispatch) frames carry a `t`, and that name is normalized to
//! [`DispatchKind`] here so nothing past decode ever compares event-name
//! strings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opcode of dispatch frames.
pub const OP_DISPATCH: u8 = 0;

/// The kind of a dispatch frame, decoded from its `t` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DispatchKind {
    Ready,
    GuildCreate,
    GuildDelete,
    GuildMemberAdd,
    GuildMemberUpdate,
    GuildMemberRemove,
    ChannelCreate,
    ChannelUpdate,
    ChannelDelete,
    ThreadCreate,
    ThreadUpdate,
    ThreadDelete,
    MessageCreate,
    MessageUpdate,
    MessageDelete,
    MessagePollVoteAdd,
    MessagePollVoteRemove,
    StageInstanceCreate,
    StageInstanceUpdate,
    StageInstanceDelete,
    EntitlementCreate,
    EntitlementUpdate,
    EntitlementDelete,
    SubscriptionCreate,
    SubscriptionUpdate,
    SubscriptionDelete,
    /// A dispatch this client has no handler for. Carries the raw name.
    Unknown(String),
}

impl DispatchKind {
    /// Normalizes a gateway event name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "READY" => Self::Ready,
            "GUILD_CREATE" => Self::GuildCreate,
            "GUILD_DELETE" => Self::GuildDelete,
            "GUILD_MEMBER_ADD" => Self::GuildMemberAdd,
            "GUILD_MEMBER_UPDATE" => Self::GuildMemberUpdate,
            "GUILD_MEMBER_REMOVE" => Self::GuildMemberRemove,
            "CHANNEL_CREATE" => Self::ChannelCreate,
            "CHANNEL_UPDATE" => Self::ChannelUpdate,
            "CHANNEL_DELETE" => Self::ChannelDelete,
            "THREAD_CREATE" => Self::ThreadCreate,
            "THREAD_UPDATE" => Self::ThreadUpdate,
            "THREAD_DELETE" => Self::ThreadDelete,
            "MESSAGE_CREATE" => Self::MessageCreate,
            "MESSAGE_UPDATE" => Self::MessageUpdate,
            "MESSAGE_DELETE" => Self::MessageDelete,
            "MESSAGE_POLL_VOTE_ADD" => Self::MessagePollVoteAdd,
            "MESSAGE_POLL_VOTE_REMOVE" => Self::MessagePollVoteRemove,
            "STAGE_INSTANCE_CREATE" => Self::StageInstanceCreate,
            "STAGE_INSTANCE_UPDATE" => Self::StageInstanceUpdate,
            "STAGE_INSTANCE_DELETE" => Self::StageInstanceDelete,
            "ENTITLEMENT_CREATE" => Self::EntitlementCreate,
            "ENTITLEMENT_UPDATE" => Self::EntitlementUpdate,
            "ENTITLEMENT_DELETE" => Self::EntitlementDelete,
            "SUBSCRIPTION_CREATE" => Self::SubscriptionCreate,
            "SUBSCRIPTION_UPDATE" => Self::SubscriptionUpdate,
            "SUBSCRIPTION_DELETE" => Self::SubscriptionDelete,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The gateway event name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Ready => "READY",
            Self::GuildCreate => "GUILD_CREATE",
            Self::GuildDelete => "GUILD_DELETE",
            Self::GuildMemberAdd => "GUILD_MEMBER_ADD",
            Self::GuildMemberUpdate => "GUILD_MEMBER_UPDATE",
            Self::GuildMemberRemove => "GUILD_MEMBER_REMOVE",
            Self::ChannelCreate => "CHANNEL_CREATE",
            Self::ChannelUpdate => "CHANNEL_UPDATE",
            Self::ChannelDelete => "CHANNEL_DELETE",
            Self::ThreadCreate => "THREAD_CREATE",
            Self::ThreadUpdate => "THREAD_UPDATE",
            Self::ThreadDelete => "THREAD_DELETE",
            Self::MessageCreate => "MESSAGE_CREATE",
            Self::MessageUpdate => "MESSAGE_UPDATE",
            Self::MessageDelete => "MESSAGE_DELETE",
            Self::MessagePollVoteAdd => "MESSAGE_POLL_VOTE_ADD",
            Self::MessagePollVoteRemove => "MESSAGE_POLL_VOTE_REMOVE",
            Self::StageInstanceCreate => "STAGE_INSTANCE_CREATE",
            Self::StageInstanceUpdate => "STAGE_INSTANCE_UPDATE",
            Self::StageInstanceDelete => "STAGE_INSTANCE_DELETE",
            Self::EntitlementCreate => "ENTITLEMENT_CREATE",
            Self::EntitlementUpdate => "ENTITLEMENT_UPDATE",
            Self::EntitlementDelete => "ENTITLEMENT_DELETE",
            Self::SubscriptionCreate => "SUBSCRIPTION_CREATE",
            Self::SubscriptionUpdate => "SUBSCRIPTION_UPDATE",
            Self::SubscriptionDelete => "SUBSCRIPTION_DELETE",
            Self::Unknown(name) => name,
        }
    }

    /// Returns true for names this client has no handler for.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for DispatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for DispatchKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for DispatchKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// A raw gateway frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayPayload {
    /// Opcode.
    pub op: u8,
    /// Event data.
    #[serde(default)]
    pub d: serde_json::Value,
    /// Sequence number, present on dispatches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<u64>,
    /// Dispatch kind, present on dispatches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<DispatchKind>,
}

impl GatewayPayload {
    /// Builds a dispatch frame.
    #[must_use]
    pub fn dispatch(kind: DispatchKind, data: serde_json::Value) -> Self {
        Self {
            op: OP_DISPATCH,
            d: data,
            s: None,
            t: Some(kind),
        }
    }

    /// Returns the dispatch kind if this is a dispatch frame.
    #[must_use]
    pub fn dispatch_kind(&self) -> Option<&DispatchKind> {
        if self.op == OP_DISPATCH {
            self.t.as_ref()
        } else {
            None
        }
    }
}
