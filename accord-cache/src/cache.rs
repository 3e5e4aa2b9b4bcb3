use crate::{Cached, EntityStore};
use accord_model::{
    Channel, Entitlement, Guild, GuildMember, Message, Sku, StageInstance, Subscription, User,
};
use accord_types::Snowflake;

/// One store per entity kind.
///
/// Messages live in one global store bounded by `max_messages`; the other
/// stores are unbounded.
pub struct Cache {
    pub users: EntityStore<User>,
    pub guilds: EntityStore<Guild>,
    pub channels: EntityStore<Channel>,
    pub messages: EntityStore<Message>,
    pub members: EntityStore<GuildMember>,
    pub stage_instances: EntityStore<StageInstance>,
    pub entitlements: EntityStore<Entitlement>,
    pub subscriptions: EntityStore<Subscription>,
    pub skus: EntityStore<Sku>,
}

impl Cache {
    pub fn new(max_messages: Option<usize>) -> Self {
        Self {
            users: EntityStore::new(),
            guilds: EntityStore::new(),
            channels: EntityStore::new(),
            messages: EntityStore::with_capacity(max_messages),
            members: EntityStore::new(),
            stage_instances: EntityStore::new(),
            entitlements: EntityStore::new(),
            subscriptions: EntityStore::new(),
            skus: EntityStore::new(),
        }
    }

    /// Cached messages of one channel, oldest first.
    pub fn messages_in(&self, channel_id: Snowflake) -> Vec<Cached<Message>> {
        self.messages.filter(|message| message.channel_id == channel_id)
    }

    pub fn members_of(&self, guild_id: Snowflake) -> Vec<Cached<GuildMember>> {
        self.members.filter(|member| member.guild_id == guild_id)
    }

    /// Channels and threads of one guild.
    pub fn channels_of(&self, guild_id: Snowflake) -> Vec<Cached<Channel>> {
        self.channels.filter(|channel| channel.guild_id == Some(guild_id))
    }

    /// Threads whose parent is `channel_id`.
    pub fn threads_of(&self, channel_id: Snowflake) -> Vec<Cached<Channel>> {
        self.channels
            .filter(|channel| channel.is_thread() && channel.parent_id == Some(channel_id))
    }

    pub fn stage_instances_of(&self, guild_id: Snowflake) -> Vec<Cached<StageInstance>> {
        self.stage_instances.filter(|stage| stage.guild_id == guild_id)
    }

    /// Forgets everything. Handles held elsewhere stay valid but detached.
    pub fn clear(&self) {
        self.users.clear();
        self.guilds.clear();
        self.channels.clear();
        self.messages.clear();
        self.members.clear();
        self.stage_instances.clear();
        self.entitlements.clear();
        self.subscriptions.clear();
        self.skus.clear();
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new(None)
    }
}
