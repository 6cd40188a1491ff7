//! Credentials sent to the join service

mod cookies;

pub use cookies::{Cookie, SESSION_COOKIE_NAME, SessionCredential};
