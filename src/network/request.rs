//! Join request types

use std::fmt;

use serde::Serialize;

/// Identifies one running server instance of a place.
///
/// Renders as `"{place_id}:{server_id}"`, which is also its store key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerKey {
    place_id: u64,
    server_id: String,
}

impl ServerKey {
    /// Create a key for a place/server pair
    pub fn new(place_id: u64, server_id: impl Into<String>) -> Self {
        Self {
            place_id,
            server_id: server_id.into(),
        }
    }

    /// Get the place id
    pub fn place_id(&self) -> u64 {
        self.place_id
    }

    /// Get the server id
    pub fn server_id(&self) -> &str {
        &self.server_id
    }

    /// Store key for this pair
    pub fn cache_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ServerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.place_id, self.server_id)
    }
}

/// Body of a `join-game-instance` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub place_id: u64,
    pub is_teleport: bool,
    pub game_id: String,
    pub game_join_attempt_id: String,
}

impl JoinRequest {
    /// Join an existing instance; the server id doubles as the attempt id
    pub fn for_instance(place_id: u64, server_id: &str) -> Self {
        Self {
            place_id,
            is_teleport: false,
            game_id: server_id.to_string(),
            game_join_attempt_id: server_id.to_string(),
        }
    }

    /// Referer the join service expects for this place
    pub fn referer(&self) -> String {
        format!("https://www.roblox.com/games/{}", self.place_id)
    }
}

impl From<&ServerKey> for JoinRequest {
    fn from(key: &ServerKey) -> Self {
        Self::for_instance(key.place_id, &key.server_id)
    }
}
