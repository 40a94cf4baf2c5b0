//! Client credentials type.

use std::fmt;

use base64::Engine;

use crate::error::ConfigurationError;
use crate::tokens::AccessToken;
use crate::types::TrustedFingerprints;

/// Everything a client session authenticates with.
///
/// Holds the application's client id and secret, the access token once one
/// is known, and the certificate fingerprints the session trusts.
///
/// # Security
///
/// The secret and token are never exposed in Debug output.
///
/// # Example
///
/// ```
/// use vimeo_core::{AccessToken, Credentials, TrustedFingerprints};
///
/// let mut creds = Credentials::new("client-id", "client-secret", TrustedFingerprints::default());
/// assert!(creds.bearer().is_err());
///
/// creds.set_access_token(AccessToken::new("token"));
/// assert_eq!(creds.bearer().unwrap(), "Bearer token");
/// ```
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    access_token: Option<AccessToken>,
    trusted: TrustedFingerprints,
}

impl Credentials {
    /// Create credentials without an access token.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        trusted: TrustedFingerprints,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            access_token: None,
            trusted,
        }
    }

    /// Credentials for a caller that already holds a token.
    pub fn with_access_token(mut self, token: AccessToken) -> Self {
        self.set_access_token(token);
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the client secret.
    ///
    /// # Security
    ///
    /// Use this only when constructing authentication requests.
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// The held access token. A blank token counts as none.
    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref().filter(|t| !t.is_empty())
    }

    pub fn set_access_token(&mut self, token: AccessToken) {
        self.access_token = Some(token);
    }

    /// Forget the access token, e.g. after it was revoked.
    pub fn clear_access_token(&mut self) {
        self.access_token = None;
    }

    pub fn trusted_fingerprints(&self) -> &TrustedFingerprints {
        &self.trusted
    }

    /// The `Authorization` value for authenticated calls.
    ///
    /// # Errors
    ///
    /// Calling an authenticated operation without a token is a programmer
    /// error, reported as [`ConfigurationError::MissingAccessToken`].
    pub fn bearer(&self) -> Result<String, ConfigurationError> {
        self.access_token()
            .map(|t| format!("Bearer {}", t.as_str()))
            .ok_or(ConfigurationError::MissingAccessToken)
    }
}

/// Builds `Basic base64(client_id:client_secret)`.
pub fn basic_auth_header(
    client_id: &str,
    client_secret: &str,
) -> Result<String, ConfigurationError> {
    if client_id.trim().is_empty() {
        return Err(ConfigurationError::MissingClientId);
    }
    let combined = format!("{}:{}", client_id, client_secret);
    let encoded = base64::engine::general_purpose::STANDARD.encode(combined);
    Ok(format!("Basic {}", encoded))
}

// Intentionally hide secrets in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("access_token", &self.access_token)
            .field("trusted", &self.trusted.len())
            .finish()
    }
}
