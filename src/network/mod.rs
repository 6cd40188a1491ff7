//! Network side of placeip
//!
//! Talks to the join service and remembers what it said.

mod cache;
mod client;
mod request;
mod resolver;
mod response;

pub use cache::{ExpiringStore, StoreEntry, StoreStats};
pub use client::{DEFAULT_JOIN_ENDPOINT, JoinClient, JoinService, USER_AGENT};
pub use request::{JoinRequest, ServerKey};
pub use resolver::Resolver;
pub use response::{Endpoint, JoinResponse, JoinScript, extract_address};
