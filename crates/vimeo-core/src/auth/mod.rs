//! Authorization redirect URL construction.
//!
//! The authorization-code flow starts in the end user's browser. Building
//! that link is pure; nothing here touches the network.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::types::ApiUrl;

/// Path of the browser-facing authorization page.
pub const AUTHORIZE_PATH: &str = "/oauth/authorize";

/// Scope used when the caller asks for none.
pub const DEFAULT_SCOPE: &str = "public";

/// RFC 3986 unreserved characters stay as they are; everything else is
/// percent-encoded, so a space becomes `%20` rather than `+`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Parameters of an authorization redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest<'a> {
    /// Usually `code`.
    pub response_type: &'a str,
    pub client_id: &'a str,
    pub redirect_uri: &'a str,
    /// Opaque value echoed back to the redirect URI.
    pub state: &'a str,
    pub scopes: &'a [&'a str],
}

/// Joins scopes with a single space, defaulting to `public`.
pub fn join_scopes(scopes: &[&str]) -> String {
    let scopes: Vec<&str> = scopes
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    if scopes.is_empty() {
        DEFAULT_SCOPE.to_string()
    } else {
        scopes.join(" ")
    }
}

/// Builds the link the end user opens to grant access.
pub fn authorization_url(api: &ApiUrl, request: &AuthorizationRequest<'_>) -> Url {
    let scope = join_scopes(request.scopes);
    let params = [
        ("response_type", request.response_type),
        ("client_id", request.client_id),
        ("redirect_uri", request.redirect_uri),
        ("state", request.state),
        ("scope", scope.as_str()),
    ];

    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(value, QUERY_VALUE)))
        .collect::<Vec<_>>()
        .join("&");

    let mut url = api.endpoint(AUTHORIZE_PATH);
    url.set_query(Some(&query));
    url
}
