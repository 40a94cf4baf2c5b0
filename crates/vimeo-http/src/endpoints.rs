//! Endpoint paths and wire types.

use serde::{Deserialize, Serialize};

use vimeo_core::{Cursor, Page};

// ============================================================================
// Endpoint Paths
// ============================================================================

/// Client-credentials grant.
pub const CLIENT_CREDENTIALS: &str = "/oauth/authorize/client";

/// Authorization-code exchange.
pub const ACCESS_TOKEN: &str = "/oauth/access_token";

/// Legacy OAuth1 token conversion.
pub const CONVERT_OAUTH1: &str = "/oauth/authorize/vimeo_oauth1";

/// The token currently used for the request.
pub const TOKENS: &str = "/tokens";

pub const ME: &str = "/me";
pub const CATEGORIES: &str = "/categories";
pub const CHANNELS: &str = "/channels";

/// Media type selecting API version 3.4.
pub const ACCEPT_VERSION: &str = "application/vnd.vimeo.*+json;version=3.4";

// ============================================================================
// Grant Bodies (form encoded)
// ============================================================================

#[derive(Serialize)]
pub struct ClientCredentialsForm<'a> {
    pub grant_type: &'static str,
    pub scope: &'a str,
}

#[derive(Serialize)]
pub struct AuthorizationCodeForm<'a> {
    pub grant_type: &'static str,
    pub code: &'a str,
    pub redirect_uri: &'a str,
}

#[derive(Serialize)]
pub struct ConvertOauth1Form<'a> {
    pub grant_type: &'static str,
    pub token: &'a str,
    pub token_secret: &'a str,
}

// ============================================================================
// Response Envelopes
// ============================================================================

/// The paging envelope every list endpoint returns.
#[derive(Debug, Deserialize)]
pub struct PageEnvelope<T> {
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub paging: PagingLinks,
    pub data: Vec<T>,
}

fn first_page() -> u32 {
    1
}

/// Paging links as sent by the server (`/path?query`).
#[derive(Debug, Default, Deserialize)]
pub struct PagingLinks {
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
}

impl<T> PageEnvelope<T> {
    pub fn into_page(self) -> Page<T> {
        let paging = self.paging;
        Page {
            items: self.data,
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            cursor: Cursor::from_links(
                paging.next.as_deref(),
                paging.previous.as_deref(),
                paging.first.as_deref(),
                paging.last.as_deref(),
            ),
        }
    }
}

/// Error body format.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub developer_message: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
}
