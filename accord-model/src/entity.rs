use crate::{MergePolicy, ModelResult};
use serde_json::Value;
use std::fmt;
use std::hash::Hash;

/// The resource kinds the cache keeps one store for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Guild,
    Channel,
    Message,
    GuildMember,
    StageInstance,
    Entitlement,
    Subscription,
    Sku,
}

impl EntityKind {
    /// Stable lowercase name, used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Guild => "guild",
            Self::Channel => "channel",
            Self::Message => "message",
            Self::GuildMember => "guild_member",
            Self::StageInstance => "stage_instance",
            Self::Entitlement => "entitlement",
            Self::Subscription => "subscription",
            Self::Sku => "sku",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiver for low-severity diagnostics produced while decoding.
///
/// The client wires its event sink in here so reports surface as debug
/// events. Decoding without a sink is the "no owning client" path.
pub trait Diagnostics: Send + Sync {
    /// Reports a diagnostic message.
    fn debug(&self, message: &str);
}

/// Ambient context for decoding raw payloads into entities.
#[derive(Clone, Copy, Default)]
pub struct DecodeContext<'a> {
    diagnostics: Option<&'a dyn Diagnostics>,
}

impl<'a> DecodeContext<'a> {
    /// A context with no owning client. Unknown discriminants are errors.
    #[must_use]
    pub const fn detached() -> Self {
        Self { diagnostics: None }
    }

    /// A context that reports unknown discriminants to `diagnostics`.
    #[must_use]
    pub const fn with_diagnostics(diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            diagnostics: Some(diagnostics),
        }
    }

    /// The diagnostics sink, if any.
    #[must_use]
    pub fn diagnostics(&self) -> Option<&'a dyn Diagnostics> {
        self.diagnostics
    }

    /// Reports `message` if a sink is attached. Returns whether it was reported.
    pub fn debug(&self, message: &str) -> bool {
        match self.diagnostics {
            Some(sink) => {
                sink.debug(message);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for DecodeContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeContext")
            .field("diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}

/// The lifecycle every cacheable domain object implements.
///
/// - The key is set by [`Entity::from_raw`] and never changes afterwards.
/// - [`Entity::patch`] mutates in place so holders of a shared handle observe
///   the update. Absent fields follow [`Entity::MERGE_POLICY`].
/// - [`Entity::snapshot`] is a detached deep copy: patching the original never
///   shows through it.
pub trait Entity: Clone + fmt::Debug + Send + Sync + 'static {
    /// Store key. A snowflake for most kinds.
    type Key: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// The resource kind.
    const KIND: EntityKind;

    /// How absent payload fields are merged.
    const MERGE_POLICY: MergePolicy;

    /// This entity's key.
    fn key(&self) -> Self::Key;

    /// Extracts the key from a raw payload without decoding the rest.
    fn key_of(raw: &Value) -> ModelResult<Self::Key>;

    /// Constructs a new instance from a raw payload.
    fn from_raw(raw: &Value, ctx: &DecodeContext<'_>) -> ModelResult<Self>;

    /// Applies a raw payload in place.
    fn patch(&mut self, raw: &Value, ctx: &DecodeContext<'_>) -> ModelResult<()>;

    /// Whether this instance has been removed from its store.
    fn is_deleted(&self) -> bool;

    /// Flags this instance as removed.
    fn mark_deleted(&mut self);

    /// A detached copy for before/after diffing.
    fn snapshot(&self) -> Self {
        self.clone()
    }
}
