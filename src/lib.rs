//! # placeip - cached address lookup for game server instances
//!
//! Given a place id and a server (job) id, placeip asks the game join
//! service for the instance and answers with the first relay endpoint
//! address it offers. Answers are kept in memory for a bounded time so
//! repeat lookups skip the join service entirely.
//!
//! ## Architecture
//!
//! - **network**: expiring store, join service client, endpoint extraction and the resolver
//! - **security**: session credential and the cookie it travels in
//! - **server**: axum router exposing the resolver over HTTP
//! - **config**: environment-driven startup configuration
//! - **utils**: shared error types

pub mod config;
pub mod network;
pub mod security;
pub mod server;
pub mod utils;

// Re-export main types for convenience
pub use config::Config;
pub use network::{ExpiringStore, JoinClient, JoinService, Resolver, ServerKey};
pub use utils::error::{PlaceIpError, Result, UpstreamError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = "placeip";

/// Built-in defaults, overridable through `Config`
pub mod defaults {
    use std::time::Duration;

    /// Port the HTTP server listens on
    pub const PORT: u16 = 3000;
    /// How long a resolved address stays valid
    pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);
    /// How often expired addresses are swept from memory
    pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(10 * 60);
    /// Longest TTL or sweep interval accepted
    pub const MAX_DURATION: Duration = Duration::from_secs(365 * 24 * 60 * 60);
}
