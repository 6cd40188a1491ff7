//! Error types for placeip

use thiserror::Error;

/// Main error type for placeip operations
#[derive(Debug, Error)]
pub enum PlaceIpError {
    /// Malformed inbound parameter (e.g. a non-numeric place id)
    #[error("invalid request: {0}")]
    Validation(String),
    /// The join service could not be reached or answered with garbage
    #[error("upstream join failed: {0}")]
    Upstream(#[from] UpstreamError),
    /// The join service answered but offered no relay endpoint
    #[error("no udmux endpoints found for place {place_id} server {server_id}")]
    NoEndpoint { place_id: u64, server_id: String },
    /// Missing or malformed process configuration
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Upstream join failures, tagged with the step that failed
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Request body could not be serialized
    #[error("encoding join request: {0}")]
    Encode(#[source] serde_json::Error),
    /// Transport failure while sending or reading the response
    #[error("sending join request: {0}")]
    Request(#[source] reqwest::Error),
    /// Join service returned a non-2xx status
    #[error("join service returned {status}: {body}")]
    Status { status: u16, body: String },
    /// Response body was not a join response
    #[error("decoding join response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl PlaceIpError {
    /// Shorthand for a no-endpoint failure
    pub fn no_endpoint(place_id: u64, server_id: impl Into<String>) -> Self {
        Self::NoEndpoint {
            place_id,
            server_id: server_id.into(),
        }
    }

    /// Returns the upstream error if this failure came from the join service
    pub fn as_upstream(&self) -> Option<&UpstreamError> {
        match self {
            Self::Upstream(e) => Some(e),
            _ => None,
        }
    }
}

/// Convenience Result type for placeip operations
pub type Result<T> = std::result::Result<T, PlaceIpError>;
