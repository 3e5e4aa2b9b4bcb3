//! Flag sets carried on entities.
//!
//! Unknown bits are retained so a patch never drops flags this client does
//! not know about.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Flags on a SKU.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SkuFlags: u64 {
        const AVAILABLE = 1 << 2;
        const GUILD_SUBSCRIPTION = 1 << 7;
        const USER_SUBSCRIPTION = 1 << 8;
    }
}

bitflags! {
    /// Flags on a guild member.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GuildMemberFlags: u64 {
        const DID_REJOIN = 1 << 0;
        const COMPLETED_ONBOARDING = 1 << 1;
        const BYPASSES_VERIFICATION = 1 << 2;
        const STARTED_ONBOARDING = 1 << 3;
        const IS_GUEST = 1 << 4;
        const STARTED_SERVER_GUIDE = 1 << 5;
        const COMPLETED_SERVER_GUIDE = 1 << 6;
        const AUTOMOD_QUARANTINED_NAME = 1 << 7;
        const AUTOMOD_QUARANTINED_BIO = 1 << 8;
        const DM_SETTINGS_UPSELL_ACKNOWLEDGED = 1 << 9;
        const AUTOMOD_QUARANTINED_CLAN_TAG = 1 << 10;
    }
}

impl Serialize for SkuFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for SkuFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::from_bits_retain)
    }
}

impl Serialize for GuildMemberFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for GuildMemberFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::from_bits_retain)
    }
}
