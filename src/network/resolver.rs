//! Place/server address resolution with caching
//!
//! The resolver answers "which address serves this instance":
//! 1. Look the server key up in the store and return a fresh hit
//! 2. On a miss, ask the join service for the instance
//! 3. Pick the first relay endpoint address from the response
//! 4. Store it under the key with the default TTL and return it
//!
//! Nothing is stored when steps 2 or 3 fail. Concurrent misses on the
//! same key are not coalesced: each calls upstream and the last write wins.

use std::sync::Arc;

use log::{debug, info, warn};

use super::cache::ExpiringStore;
use super::client::JoinService;
use super::request::ServerKey;
use super::response::extract_address;
use crate::utils::Result;

/// Cached resolver in front of a join service
pub struct Resolver {
    store: ExpiringStore<String>,
    upstream: Arc<dyn JoinService>,
}

impl Resolver {
    /// Create a resolver over `upstream`, caching into `store`
    pub fn new(upstream: Arc<dyn JoinService>, store: ExpiringStore<String>) -> Self {
        Self { store, upstream }
    }

    /// Resolve the relay address for one server instance
    pub async fn resolve(&self, place_id: u64, server_id: &str) -> Result<String> {
        let key = ServerKey::new(place_id, server_id);
        let cache_key = key.cache_key();

        if let Some(address) = self.store.get(&cache_key) {
            debug!("Cache hit for {}", cache_key);
            return Ok(address);
        }

        debug!("Cache miss for {}, calling join service", cache_key);

        let response = self
            .upstream
            .join_game_instance(key.place_id(), key.server_id())
            .await
            .inspect_err(|e| warn!("Join failed for {}: {}", cache_key, e))?;

        let address = extract_address(&response, key.place_id(), key.server_id())
            .inspect_err(|e| warn!("{}", e))?;

        self.store.set(cache_key.as_str(), address.clone());
        info!("Resolved {} -> {}", cache_key, address);

        Ok(address)
    }

    /// Forget the cached address for one instance, returning it if it was fresh
    pub fn invalidate(&self, place_id: u64, server_id: &str) -> Option<String> {
        self.store.remove(&ServerKey::new(place_id, server_id).cache_key())
    }

    /// Get the backing store
    pub fn store(&self) -> &ExpiringStore<String> {
        &self.store
    }
}
