//! Join response types
//!
//! Only `joinScript.UdmuxEndpoints` is consulted when resolving an
//! address. Everything else is decoded so the shape is documented, and
//! every field defaults when missing or `null` so schema drift upstream
//! does not break decoding.

use serde::Deserialize;
use serde_json::Value;

use crate::utils::{PlaceIpError, Result};

/// A relay (UDMux) or direct server endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Endpoint {
    pub address: Option<String>,
    /// Not range-checked; never read when resolving
    pub port: Option<i64>,
}

/// Connection details for the allocated instance
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct JoinScript {
    pub client_port: Option<i64>,
    pub machine_address: Option<String>,
    pub server_port: Option<i64>,
    pub server_connections: Option<Vec<Endpoint>>,
    pub udmux_endpoints: Option<Vec<Endpoint>>,
    pub direct_server_return: Option<bool>,
    pub session_id: Option<String>,
    pub data_center_id: Option<i64>,
    pub place_id: Option<u64>,
    pub universe_id: Option<u64>,
    pub game_id: Option<String>,
    pub party_id: Option<String>,
}

/// Decoded `join-game-instance` response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JoinResponse {
    pub job_id: Option<String>,
    pub status: Option<i64>,
    /// Opaque; kept verbatim
    pub status_data: Option<Value>,
    pub join_script_url: Option<String>,
    pub authentication_url: Option<String>,
    pub authentication_ticket: Option<String>,
    /// Opaque; kept verbatim
    pub message: Option<Value>,
    pub join_script: Option<JoinScript>,
    pub queue_position: Option<i64>,
}

impl JoinResponse {
    /// Relay endpoints offered by the join script, empty if absent
    pub fn udmux_endpoints(&self) -> &[Endpoint] {
        self.join_script
            .as_ref()
            .and_then(|script| script.udmux_endpoints.as_deref())
            .unwrap_or_default()
    }

    /// Address of the first relay endpoint.
    ///
    /// Later endpoints and ports are ignored. An empty address counts as
    /// no endpoint.
    pub fn first_endpoint_address(&self) -> Option<&str> {
        self.udmux_endpoints()
            .first()
            .and_then(|endpoint| endpoint.address.as_deref())
            .filter(|address| !address.is_empty())
    }
}

/// Pick the address to hand back for a join response
pub fn extract_address(response: &JoinResponse, place_id: u64, server_id: &str) -> Result<String> {
    response
        .first_endpoint_address()
        .map(str::to_string)
        .ok_or_else(|| PlaceIpError::no_endpoint(place_id, server_id))
}
