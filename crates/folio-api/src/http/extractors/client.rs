//! Client identity extraction for rate limiting.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::{COOKIE, HOST, USER_AGENT};
use axum::http::request::Parts;

use folio_core::rate_limit::{ClientHints, ClientKey};

use crate::state::AppState;

/// The rate-limit key of the calling client.
pub struct Client(pub ClientKey);

impl FromRequestParts<AppState> for Client {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let hints = client_hints(&parts.headers, &state.session_cookie);
        Ok(Client(ClientKey::derive(&hints)))
    }
}

/// Collect identity hints from request headers.
pub fn client_hints(headers: &HeaderMap, session_cookie: &str) -> ClientHints {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    ClientHints {
        host: headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .map(|h| strip_port(h).to_string()),
        session_id: headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|c| cookie_value(c, session_cookie))
            .map(str::to_string),
        forwarded_for: header("x-forwarded-for"),
        cf_connecting_ip: header("cf-connecting-ip"),
        real_ip: header("x-real-ip"),
        user_agent: headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    }
}

/// Value of cookie `name` in a `Cookie` header, if present and non-empty.
pub fn cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// Host name without the port. Bracketed IPv6 literals keep their brackets.
pub fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    host.split(':').next().unwrap_or(host)
}
