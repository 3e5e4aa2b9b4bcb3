//! Action dispatcher.
//!
//! Each gateway dispatch runs one synchronous handler: resolve what the event
//! references, mutate the cache, emit the normalized event. Nothing in here
//! awaits, so a handler's snapshot, mutation and emission can never interleave
//! with another handler's.
//!
//! Handlers never fail outward. Unresolved or tombstoned references skip the
//! event silently; malformed payloads are logged, reported as a debug event,
//! and skipped.

mod channel;
mod entitlement;
mod guild;
mod member;
mod message;
mod poll;
mod ready;
mod stage;
mod subscription;
mod thread;

use crate::client::Client;
use crate::event::ClientEvent;
use crate::shard::ShardContext;
use crate::sink::SinkDiagnostics;
use accord_cache::Cached;
use accord_model::{Channel, DecodeContext, FieldMerge, MergePolicy, ModelResult};
use accord_types::{DispatchKind, GatewayPayload, Snowflake};
use serde_json::Value;
use tracing::{trace, warn};

/// What a handler did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The cache changed and these events were emitted, in order.
    Emitted(Vec<&'static str>),
    /// The cache changed but emission was gated off.
    Applied,
    /// Nothing changed.
    Skipped(SkipReason),
}

impl ActionOutcome {
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    /// Names of the emitted events; empty unless [`ActionOutcome::Emitted`].
    #[must_use]
    pub fn emitted(&self) -> &[&'static str] {
        match self {
            Self::Emitted(names) => names,
            Self::Applied | Self::Skipped(_) => &[],
        }
    }
}

/// Why an event left the cache untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A referenced entity is not cached.
    Unresolved,
    /// A referenced entity was deleted recently.
    Tombstoned,
    /// The entity is already cached; the event would not change anything.
    Duplicate,
    /// The payload could not be decoded.
    Malformed,
    /// No handler exists for this dispatch kind.
    UnknownKind,
    /// The frame was not a dispatch.
    NotDispatch,
}

/// Applies gateway dispatches to a client's cache.
pub struct Dispatcher<'a> {
    client: &'a Client,
}

impl<'a> Dispatcher<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Applies one gateway frame received on `shard`.
    pub fn dispatch(&self, payload: &GatewayPayload, shard: &mut ShardContext) -> ActionOutcome {
        match payload.dispatch_kind() {
            Some(kind) => self.handle(kind, &payload.d, shard),
            None => {
                trace!(op = payload.op, "ignoring non-dispatch frame");
                ActionOutcome::Skipped(SkipReason::NotDispatch)
            }
        }
    }

    /// Applies the dispatch `kind` carrying `data`.
    pub fn handle(&self, kind: &DispatchKind, data: &Value, shard: &mut ShardContext) -> ActionOutcome {
        let diagnostics =
            SinkDiagnostics::new(self.client.sink(), self.client.config().emit_debug);
        let ctx = DecodeContext::with_diagnostics(&diagnostics);

        let result = match kind {
            DispatchKind::Ready => self.ready(data, shard, &ctx),
            DispatchKind::GuildCreate => self.guild_create(data, shard, &ctx),
            DispatchKind::GuildDelete => self.guild_delete(data),
            DispatchKind::GuildMemberAdd => self.member_add(data, shard, &ctx),
            DispatchKind::GuildMemberUpdate => self.member_update(data, &ctx),
            DispatchKind::GuildMemberRemove => self.member_remove(data),
            DispatchKind::ChannelCreate => self.channel_create(data, &ctx),
            DispatchKind::ChannelUpdate => self.channel_update(data, &ctx),
            DispatchKind::ChannelDelete => self.channel_delete(data),
            DispatchKind::ThreadCreate => self.thread_create(data, &ctx),
            DispatchKind::ThreadUpdate => self.thread_update(data, &ctx),
            DispatchKind::ThreadDelete => self.thread_delete(data),
            DispatchKind::MessageCreate => self.message_create(data, &ctx),
            DispatchKind::MessageUpdate => self.message_update(data, &ctx),
            DispatchKind::MessageDelete => self.message_delete(data),
            DispatchKind::MessagePollVoteAdd => self.poll_vote(data, true),
            DispatchKind::MessagePollVoteRemove => self.poll_vote(data, false),
            DispatchKind::StageInstanceCreate => self.stage_instance_create(data, &ctx),
            DispatchKind::StageInstanceUpdate => self.stage_instance_update(data, &ctx),
            DispatchKind::StageInstanceDelete => self.stage_instance_delete(data),
            DispatchKind::EntitlementCreate => self.entitlement_create(data, &ctx),
            DispatchKind::EntitlementUpdate => self.entitlement_update(data, &ctx),
            DispatchKind::EntitlementDelete => self.entitlement_delete(data),
            DispatchKind::SubscriptionCreate => self.subscription_create(data, &ctx),
            DispatchKind::SubscriptionUpdate => self.subscription_update(data, &ctx),
            DispatchKind::SubscriptionDelete => self.subscription_delete(data),
            DispatchKind::Unknown(name) => {
                ctx.debug(&format!("Unhandled dispatch event: {name}"));
                return ActionOutcome::Skipped(SkipReason::UnknownKind);
            }
        };

        match result {
            Ok(ActionOutcome::Skipped(reason)) => {
                trace!(event = %kind, ?reason, "skipped");
                ActionOutcome::Skipped(reason)
            }
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(event = %kind, error = %err, "malformed dispatch payload");
                ctx.debug(&format!("[{kind}] malformed payload: {err}"));
                ActionOutcome::Skipped(SkipReason::Malformed)
            }
        }
    }

    /// Stops waiting for guilds READY announced. Emits `ShardReady` with the
    /// guilds that never arrived.
    pub fn expire_guild_wait(&self, shard: &mut ShardContext) -> ActionOutcome {
        match shard.force_ready() {
            Some(unavailable_guilds) => self.emit(ClientEvent::ShardReady {
                shard_id: shard.id,
                unavailable_guilds,
            }),
            None => ActionOutcome::Skipped(SkipReason::Duplicate),
        }
    }

    fn emit(&self, event: ClientEvent) -> ActionOutcome {
        let name = event.name();
        self.client.emit(event);
        ActionOutcome::Emitted(vec![name])
    }

    fn emit_all(&self, events: Vec<ClientEvent>) -> ActionOutcome {
        if events.is_empty() {
            return ActionOutcome::Applied;
        }
        let names = events.iter().map(ClientEvent::name).collect();
        for event in events {
            self.client.emit(event);
        }
        ActionOutcome::Emitted(names)
    }

    /// Resolves a live, message-carrying channel.
    fn text_channel(&self, channel_id: Snowflake) -> Result<Cached<Channel>, SkipReason> {
        if self.client.tombstones().channels.has(&channel_id) {
            return Err(SkipReason::Tombstoned);
        }
        match self.client.cache().channels.get(&channel_id) {
            Some(channel) if channel.read().is_text_based() => Ok(channel),
            _ => Err(SkipReason::Unresolved),
        }
    }
}

/// Field access for dispatch payloads that are not entities themselves.
fn fields<'v>(data: &'v Value, what: &'static str) -> ModelResult<FieldMerge<'v>> {
    FieldMerge::new(data, MergePolicy::Partial, what)
}
