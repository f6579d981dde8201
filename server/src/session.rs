//! Admin sessions for the gateway variant.
//!
//! A successful credential check issues an opaque token held server-side;
//! the token travels in an `HttpOnly` cookie. Nothing about the login state
//! lives anywhere else.

use std::{collections::HashMap, sync::RwLock};

use axum::http::{header, HeaderMap};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "admin_session";

#[derive(Debug, Default)]
pub struct Sessions {
    tokens: RwLock<HashMap<String, String>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh opaque token for the given username.
    pub fn issue(&self, username: &str) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens
            .write()
            .expect("session lock poisoned")
            .insert(token.clone(), username.to_string());
        token
    }

    pub fn username(&self, token: &str) -> Option<String> {
        self.tokens
            .read()
            .expect("session lock poisoned")
            .get(token)
            .cloned()
    }

    pub fn revoke(&self, token: &str) {
        self.tokens
            .write()
            .expect("session lock poisoned")
            .remove(token);
    }
}

/// Pulls the session token out of the request's `Cookie` header, if any.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;

    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}

pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly")
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use axum::http::{header, HeaderMap, HeaderValue};

    use super::{token_from_headers, Sessions};

    #[test]
    fn issued_token_resolves_until_revoked() {
        let sessions = Sessions::new();

        let token = sessions.issue("admin");
        assert_eq!(sessions.username(&token), Some("admin".to_string()));

        sessions.revoke(&token);
        assert_eq!(sessions.username(&token), None);
    }

    #[test]
    fn tokens_are_unique() {
        let sessions = Sessions::new();
        assert_ne!(sessions.issue("admin"), sessions.issue("admin"));
    }

    #[test]
    fn token_is_found_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; admin_session=abc-123; lang=mn"),
        );

        assert_eq!(token_from_headers(&headers), Some("abc-123".to_string()));
    }

    #[test]
    fn no_cookie_header_means_no_token() {
        assert_eq!(token_from_headers(&HeaderMap::new()), None);
    }
}
