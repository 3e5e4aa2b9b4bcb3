//! Core type definitions for accord.
//!
//! This crate defines the platform-agnostic primitives every other accord
//! crate builds on:
//! - [`Snowflake`] identifiers, normalized from string or integer form
//! - [`Timestamp`] instants, normalized from RFC 3339 strings or milliseconds
//! - The gateway envelope ([`GatewayPayload`]) and the canonical
//!   [`DispatchKind`] enum the action dispatcher selects handlers by
//!
//! Entity shapes (guilds, channels, entitlements, ...) live in
//! `accord-model`, not here.

mod event;
mod ids;
mod timestamp;

pub use event::{DispatchKind, GatewayPayload, OP_DISPATCH};
pub use ids::{DISCORD_EPOCH_MS, Snowflake};
pub use timestamp::Timestamp;

/// Result type alias using the crate's error type.
pub type TypesResult<T> = std::result::Result<T, TypesError>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum TypesError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid snowflake: {0}")]
    InvalidSnowflake(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
