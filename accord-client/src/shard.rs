use accord_types::Snowflake;
use std::collections::BTreeSet;
use tracing::info;

/// Connection phase of a shard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShardStatus {
    #[default]
    Connecting,
    /// READY received; guilds announced as unavailable are still streaming in.
    WaitingForGuilds,
    Ready,
}

/// Per-shard state the dispatcher consults to gate create events.
#[derive(Debug, Clone, Default)]
pub struct ShardContext {
    pub id: u32,
    pub status: ShardStatus,
    /// Guilds announced by READY that have not arrived yet.
    pub expected_guilds: BTreeSet<Snowflake>,
}

impl ShardContext {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// A shard that has already finished its initial sync.
    pub fn ready(id: u32) -> Self {
        Self {
            id,
            status: ShardStatus::Ready,
            expected_guilds: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == ShardStatus::Ready
    }

    /// Moves to [`ShardStatus::Ready`] once no guild is outstanding.
    /// Returns true on the transition.
    pub fn check_ready(&mut self) -> bool {
        if self.status != ShardStatus::WaitingForGuilds || !self.expected_guilds.is_empty() {
            return false;
        }
        self.status = ShardStatus::Ready;
        info!(shard = self.id, "shard ready");
        true
    }

    /// Gives up on outstanding guilds and marks the shard ready. Returns the
    /// guilds that never arrived, or `None` if the shard was not waiting.
    pub fn force_ready(&mut self) -> Option<Vec<Snowflake>> {
        if self.status != ShardStatus::WaitingForGuilds {
            return None;
        }
        let missing: Vec<Snowflake> = std::mem::take(&mut self.expected_guilds)
            .into_iter()
            .collect();
        self.status = ShardStatus::Ready;
        info!(shard = self.id, unavailable = missing.len(), "shard ready with unavailable guilds");
        Some(missing)
    }
}
