//! placeip - cached address lookup for game server instances
//!
//! Entry point for the HTTP service.

use std::sync::Arc;

use log::{error, info};
use placeip::{Config, ExpiringStore, JoinClient, NAME, Resolver, VERSION, server};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("{} v{} starting", NAME, VERSION);

    let config = Config::from_env()?;

    let client = JoinClient::with_endpoint(config.security_token.clone(), &config.join_endpoint)?;
    let store = ExpiringStore::new(config.cache_ttl);
    let _janitor = store.spawn_janitor(config.cleanup_interval);
    let resolver = Arc::new(Resolver::new(Arc::new(client), store));

    info!(
        "Join endpoint {}, cache ttl {:?}, sweep every {:?}",
        config.join_endpoint, config.cache_ttl, config.cleanup_interval
    );

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    server::serve(listener, server::build_router(resolver)).await?;

    Ok(())
}
