//! Derived accessors that resolve stored ids through a [`Cache`].
//!
//! Entities hold ids, never other entities. These lookups run at access time
//! and return `None` (or skip the entry) when the referenced entity is not
//! cached.

use crate::{Cache, Cached};
use accord_model::{
    Channel, Entitlement, Guild, GuildMember, Message, Sku, StageInstance, Subscription, User,
};

pub trait EntitlementRelations {
    fn guild(&self, cache: &Cache) -> Option<Cached<Guild>>;
    fn user(&self, cache: &Cache) -> Option<Cached<User>>;
    fn sku(&self, cache: &Cache) -> Option<Cached<Sku>>;
}

impl EntitlementRelations for Entitlement {
    fn guild(&self, cache: &Cache) -> Option<Cached<Guild>> {
        cache.guilds.get(&self.guild_id?)
    }

    fn user(&self, cache: &Cache) -> Option<Cached<User>> {
        cache.users.get(&self.user_id?)
    }

    fn sku(&self, cache: &Cache) -> Option<Cached<Sku>> {
        cache.skus.get(&self.sku_id)
    }
}

pub trait SubscriptionRelations {
    fn user(&self, cache: &Cache) -> Option<Cached<User>>;
    fn skus(&self, cache: &Cache) -> Vec<Cached<Sku>>;
    fn entitlements(&self, cache: &Cache) -> Vec<Cached<Entitlement>>;
    fn renewal_skus(&self, cache: &Cache) -> Vec<Cached<Sku>>;
}

impl SubscriptionRelations for Subscription {
    fn user(&self, cache: &Cache) -> Option<Cached<User>> {
        cache.users.get(&self.user_id)
    }

    fn skus(&self, cache: &Cache) -> Vec<Cached<Sku>> {
        self.sku_ids.iter().filter_map(|id| cache.skus.get(id)).collect()
    }

    fn entitlements(&self, cache: &Cache) -> Vec<Cached<Entitlement>> {
        self.entitlement_ids
            .iter()
            .filter_map(|id| cache.entitlements.get(id))
            .collect()
    }

    fn renewal_skus(&self, cache: &Cache) -> Vec<Cached<Sku>> {
        self.renewal_sku_ids
            .iter()
            .flatten()
            .filter_map(|id| cache.skus.get(id))
            .collect()
    }
}

pub trait GuildRelations {
    fn channels(&self, cache: &Cache) -> Vec<Cached<Channel>>;
    fn members(&self, cache: &Cache) -> Vec<Cached<GuildMember>>;
    fn owner(&self, cache: &Cache) -> Option<Cached<User>>;
}

impl GuildRelations for Guild {
    fn channels(&self, cache: &Cache) -> Vec<Cached<Channel>> {
        cache.channels_of(self.id)
    }

    fn members(&self, cache: &Cache) -> Vec<Cached<GuildMember>> {
        cache.members_of(self.id)
    }

    fn owner(&self, cache: &Cache) -> Option<Cached<User>> {
        cache.users.get(&self.owner_id?)
    }
}

pub trait ChannelRelations {
    fn guild(&self, cache: &Cache) -> Option<Cached<Guild>>;
    fn parent(&self, cache: &Cache) -> Option<Cached<Channel>>;
    fn messages(&self, cache: &Cache) -> Vec<Cached<Message>>;
}

impl ChannelRelations for Channel {
    fn guild(&self, cache: &Cache) -> Option<Cached<Guild>> {
        cache.guilds.get(&self.guild_id?)
    }

    fn parent(&self, cache: &Cache) -> Option<Cached<Channel>> {
        cache.channels.get(&self.parent_id?)
    }

    fn messages(&self, cache: &Cache) -> Vec<Cached<Message>> {
        cache.messages_in(self.id)
    }
}

pub trait MemberRelations {
    fn user(&self, cache: &Cache) -> Option<Cached<User>>;
    fn guild(&self, cache: &Cache) -> Option<Cached<Guild>>;
}

impl MemberRelations for GuildMember {
    fn user(&self, cache: &Cache) -> Option<Cached<User>> {
        cache.users.get(&self.user_id)
    }

    fn guild(&self, cache: &Cache) -> Option<Cached<Guild>> {
        cache.guilds.get(&self.guild_id)
    }
}

pub trait StageInstanceRelations {
    fn channel(&self, cache: &Cache) -> Option<Cached<Channel>>;
    fn guild(&self, cache: &Cache) -> Option<Cached<Guild>>;
}

impl StageInstanceRelations for StageInstance {
    fn channel(&self, cache: &Cache) -> Option<Cached<Channel>> {
        cache.channels.get(&self.channel_id)
    }

    fn guild(&self, cache: &Cache) -> Option<Cached<Guild>> {
        cache.guilds.get(&self.guild_id)
    }
}
