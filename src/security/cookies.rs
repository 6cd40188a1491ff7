//! Session credential and the authentication cookie it is sent as

use std::fmt;

/// Cookie name the join service authenticates with
pub const SESSION_COOKIE_NAME: &str = ".ROBLOSECURITY";

/// A long-lived account session token.
///
/// `Debug` and `Display` never print the token.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredential(String);

impl SessionCredential {
    /// Wrap a token, rejecting blank values
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// Raw token value
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Cookie carrying this credential
    pub fn cookie(&self) -> Cookie {
        Cookie::new(SESSION_COOKIE_NAME, &self.0)
    }
}

impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionCredential(<redacted>)")
    }
}

impl fmt::Display for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// A request cookie.
///
/// Sent on every join request regardless of host, so no domain/path scope is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
}

impl Cookie {
    /// Create a cookie
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    /// Value for a `Cookie` request header
    pub fn header_value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_credential_rejected() {
        assert!(SessionCredential::new("").is_none());
        assert!(SessionCredential::new("   ").is_none());
        assert!(SessionCredential::new("_|WARNING:-DO-NOT-SHARE-THIS.|_abc").is_some());
    }

    #[test]
    fn test_credential_redacted() {
        let credential = SessionCredential::new("secret-token").unwrap();

        assert!(!format!("{:?}", credential).contains("secret-token"));
        assert!(!credential.to_string().contains("secret-token"));
        assert_eq!(credential.expose(), "secret-token");
    }

    #[test]
    fn test_session_cookie() {
        let cookie = SessionCredential::new("abc123").unwrap().cookie();

        assert_eq!(cookie.name, ".ROBLOSECURITY");
        assert_eq!(cookie.header_value(), ".ROBLOSECURITY=abc123");
    }
}
