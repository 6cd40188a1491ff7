//! HTTP front end
//!
//! Routes:
//! - `GET /place/{place_id}/ip/{server_id}` - resolved address as plain text
//! - `GET /health` - liveness probe

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use log::{error, info, warn};
use tokio::net::TcpListener;

use crate::network::Resolver;
use crate::utils::{PlaceIpError, Result};

/// Build the router over a shared resolver
pub fn build_router(resolver: Arc<Resolver>) -> Router {
    Router::new()
        .route("/place/{place_id}/ip/{server_id}", get(resolve_ip))
        .route("/health", get(health))
        .with_state(resolver)
}

/// Serve `router` on `listener` until the process exits
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on {}", addr);
    }
    axum::serve(listener, router).await
}

/// Parse the `place_id` path segment as an unsigned 64-bit id
pub fn parse_place_id(raw: &str) -> Result<u64> {
    raw.parse()
        .map_err(|e| PlaceIpError::Validation(format!("place_id {:?}: {}", raw, e)))
}

async fn resolve_ip(
    State(resolver): State<Arc<Resolver>>,
    Path((place_id, server_id)): Path<(String, String)>,
) -> Result<String> {
    let place_id = parse_place_id(&place_id)?;
    resolver.resolve(place_id, &server_id).await
}

async fn health() -> &'static str {
    "ok"
}

impl PlaceIpError {
    /// HTTP status reported for this failure
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::NoEndpoint { .. } => StatusCode::NOT_FOUND,
            Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PlaceIpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{} {}", status.as_u16(), self);
        } else {
            warn!("{} {}", status.as_u16(), self);
        }
        (status, self.to_string()).into_response()
    }
}
