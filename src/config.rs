//! Process configuration
//!
//! Read once at startup from the environment. A missing session token is
//! fatal: the process must not serve requests it cannot authenticate.

use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

use crate::network::DEFAULT_JOIN_ENDPOINT;
use crate::security::SessionCredential;
use crate::utils::{PlaceIpError, Result};

/// Session token variable (spelling kept for existing deployments)
pub const SECURITY_TOKEN_VAR: &str = "ROBLOX_SECURITY_TOEKN";
pub const LISTEN_ADDR_VAR: &str = "PLACEIP_LISTEN_ADDR";
pub const JOIN_ENDPOINT_VAR: &str = "PLACEIP_JOIN_ENDPOINT";
pub const CACHE_TTL_VAR: &str = "PLACEIP_CACHE_TTL_SECS";
pub const CLEANUP_INTERVAL_VAR: &str = "PLACEIP_CLEANUP_INTERVAL_SECS";

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Session credential for the join service
    pub security_token: SessionCredential,
    /// Address the HTTP server binds
    pub listen_addr: SocketAddr,
    /// Join service URL
    pub join_endpoint: String,
    /// How long a resolved address is served from memory
    pub cache_ttl: Duration,
    /// How often expired entries are reclaimed
    pub cleanup_interval: Duration,
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to fetch variables by name
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let security_token = lookup(SECURITY_TOKEN_VAR)
            .and_then(SessionCredential::new)
            .ok_or_else(|| {
                PlaceIpError::Configuration(format!("{} is not set", SECURITY_TOKEN_VAR))
            })?;

        let listen_addr = match lookup(LISTEN_ADDR_VAR) {
            Some(raw) => raw.parse().map_err(|e| {
                PlaceIpError::Configuration(format!("{}={:?}: {}", LISTEN_ADDR_VAR, raw, e))
            })?,
            None => SocketAddr::from(([0, 0, 0, 0], crate::defaults::PORT)),
        };

        let join_endpoint = lookup(JOIN_ENDPOINT_VAR)
            .unwrap_or_else(|| DEFAULT_JOIN_ENDPOINT.to_string());
        Url::parse(&join_endpoint).map_err(|e| {
            PlaceIpError::Configuration(format!("{}={:?}: {}", JOIN_ENDPOINT_VAR, join_endpoint, e))
        })?;

        let cache_ttl = seconds(&lookup, CACHE_TTL_VAR, crate::defaults::CACHE_TTL)?;
        let cleanup_interval =
            seconds(&lookup, CLEANUP_INTERVAL_VAR, crate::defaults::CLEANUP_INTERVAL)?;

        Ok(Self {
            security_token,
            listen_addr,
            join_endpoint,
            cache_ttl,
            cleanup_interval,
        })
    }
}

/// Parse a whole number of seconds in `1..=MAX_DURATION`, falling back to `default`
fn seconds<F>(lookup: &F, name: &str, default: Duration) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };

    let max = crate::defaults::MAX_DURATION.as_secs();
    match raw.trim().parse::<u64>() {
        Ok(secs) if (1..=max).contains(&secs) => Ok(Duration::from_secs(secs)),
        _ => Err(PlaceIpError::Configuration(format!(
            "{}={:?}: expected between 1 and {} seconds",
            name, raw, max
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tokio_test::{assert_err, assert_ok};

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = assert_ok!(load(&[(SECURITY_TOKEN_VAR, "token")]));

        assert_eq!(config.security_token.expose(), "token");
        assert_eq!(config.listen_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.join_endpoint, DEFAULT_JOIN_ENDPOINT);
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.cleanup_interval, Duration::from_secs(600));
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, PlaceIpError::Configuration(ref msg) if msg.contains(SECURITY_TOKEN_VAR)));

        assert_err!(load(&[(SECURITY_TOKEN_VAR, "")]));
    }

    #[test]
    fn test_one_year_accepted() {
        let config = assert_ok!(load(&[
            (SECURITY_TOKEN_VAR, "token"),
            (CACHE_TTL_VAR, "31536000"),
            (CLEANUP_INTERVAL_VAR, "31536000"),
        ]));
        assert_eq!(config.cache_ttl, crate::defaults::MAX_DURATION);
        assert_eq!(config.cleanup_interval, crate::defaults::MAX_DURATION);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            (SECURITY_TOKEN_VAR, "token"),
            (LISTEN_ADDR_VAR, "127.0.0.1:8080"),
            (JOIN_ENDPOINT_VAR, "http://127.0.0.1:9000/join"),
            (CACHE_TTL_VAR, "60"),
            (CLEANUP_INTERVAL_VAR, "120"),
        ])
        .unwrap();

        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.join_endpoint, "http://127.0.0.1:9000/join");
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.cleanup_interval, Duration::from_secs(120));
    }

    #[test]
    fn test_bad_values_rejected() {
        for (name, value) in [
            (LISTEN_ADDR_VAR, "not-an-addr"),
            (JOIN_ENDPOINT_VAR, "not a url"),
            (CACHE_TTL_VAR, "0"),
            (CACHE_TTL_VAR, "five"),
            (CLEANUP_INTERVAL_VAR, "-1"),
            (CACHE_TTL_VAR, "18446744073709551615"),
            (CACHE_TTL_VAR, "31536001"),
            (CLEANUP_INTERVAL_VAR, "18446744073709551615"),
        ] {
            let result = load(&[(SECURITY_TOKEN_VAR, "token"), (name, value)]);
            assert!(
                matches!(result, Err(PlaceIpError::Configuration(_))),
                "{}={} should be rejected",
                name,
                value
            );
        }
    }

    #[test]
    fn test_token_never_in_debug() {
        let config = load(&[(SECURITY_TOKEN_VAR, "super-secret")]).unwrap();
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
