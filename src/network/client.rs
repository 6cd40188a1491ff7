//! Join service client

use async_trait::async_trait;
use log::debug;
use reqwest::header::{CONTENT_TYPE, COOKIE, REFERER};

use super::{JoinRequest, JoinResponse};
use crate::security::SessionCredential;
use crate::utils::{PlaceIpError, Result, UpstreamError};

/// Production join endpoint
pub const DEFAULT_JOIN_ENDPOINT: &str = "https://gamejoin.roblox.com/v1/join-game-instance";
/// Client identity the join service expects
pub const USER_AGENT: &str = "Roblox/WinInet";

/// Longest upstream error body kept in an error message
const MAX_ERROR_BODY_CHARS: usize = 512;

/// The single upstream operation the resolver depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JoinService: Send + Sync {
    /// Ask the join service for connection details of one instance
    async fn join_game_instance(
        &self,
        place_id: u64,
        server_id: &str,
    ) -> std::result::Result<JoinResponse, UpstreamError>;
}

/// HTTP client for `join-game-instance`.
///
/// One POST per call, no retries and no timeout beyond the transport's.
pub struct JoinClient {
    http: reqwest::Client,
    endpoint: String,
    credential: SessionCredential,
}

impl JoinClient {
    /// Create a client against the production endpoint
    pub fn new(credential: SessionCredential) -> Result<Self> {
        Self::with_endpoint(credential, DEFAULT_JOIN_ENDPOINT)
    }

    /// Create a client against a custom endpoint
    pub fn with_endpoint(credential: SessionCredential, endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| PlaceIpError::Configuration(format!("building HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            credential,
        })
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl JoinService for JoinClient {
    async fn join_game_instance(
        &self,
        place_id: u64,
        server_id: &str,
    ) -> std::result::Result<JoinResponse, UpstreamError> {
        let request = JoinRequest::for_instance(place_id, server_id);
        let body = serde_json::to_vec(&request).map_err(UpstreamError::Encode)?;

        debug!("POST {} for place {} server {}", self.endpoint, place_id, server_id);

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(REFERER, request.referer())
            .header(COOKIE, self.credential.cookie().header_value())
            .body(body)
            .send()
            .await
            .map_err(UpstreamError::Request)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(UpstreamError::Request)?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes)
                    .chars()
                    .take(MAX_ERROR_BODY_CHARS)
                    .collect(),
            });
        }

        serde_json::from_slice(&bytes).map_err(UpstreamError::Decode)
    }
}
