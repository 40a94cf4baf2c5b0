//! OAuth grants and token revocation.

use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use tracing::{debug, info, instrument};
use url::Url;

use vimeo_core::auth::{AuthorizationRequest, DEFAULT_SCOPE, authorization_url};
use vimeo_core::credentials::basic_auth_header;
use vimeo_core::{Credentials, Result, Token};

use crate::client::HttpClient;
use crate::endpoints::{
    ACCESS_TOKEN, AuthorizationCodeForm, CLIENT_CREDENTIALS, CONVERT_OAUTH1, ClientCredentialsForm,
    ConvertOauth1Form, TOKENS,
};

/// Performs the credential flows that yield a bearer token.
///
/// Each operation is a single request. The manager keeps no session state
/// and never writes to [`Credentials`]: storing a new token, or clearing a
/// revoked one, is up to the caller. Tokens are not refreshed
/// automatically.
#[derive(Debug, Clone)]
pub struct AuthManager {
    http: HttpClient,
}

impl AuthManager {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Obtain an app-only token for public data.
    ///
    /// `scope` defaults to `public`.
    ///
    /// # Errors
    ///
    /// Rejected client credentials yield
    /// [`AuthError::InvalidCredentials`](vimeo_core::error::AuthError);
    /// connection and pinning failures yield a transport error.
    #[instrument(skip(self, client_secret))]
    pub async fn client_credentials_grant(
        &self,
        client_id: &str,
        client_secret: &str,
        scope: Option<&str>,
    ) -> Result<Token> {
        info!("Requesting client credentials token");

        let scope = scope
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SCOPE);
        let form = ClientCredentialsForm {
            grant_type: "client_credentials",
            scope,
        };

        let request = self
            .http
            .request(Method::POST, CLIENT_CREDENTIALS)
            .header(AUTHORIZATION, basic_auth_header(client_id, client_secret)?)
            .form(&form);

        let token: Token = self.http.send_json(request, "token response").await?;
        debug!(scope = %token.scope, "Client credentials token issued");
        Ok(token)
    }

    /// Build the link the end user opens to start the authorization-code
    /// flow. No request is made.
    pub fn authorization_code_redirect_url(
        &self,
        response_type: &str,
        client_id: &str,
        redirect_uri: &str,
        state: &str,
        scopes: &[&str],
    ) -> Url {
        authorization_url(
            self.http.api(),
            &AuthorizationRequest {
                response_type,
                client_id,
                redirect_uri,
                state,
                scopes,
            },
        )
    }

    /// Exchange the code delivered to `redirect_uri` for a user token.
    ///
    /// The only grant that may return a refresh token.
    #[instrument(skip(self, code, client_secret))]
    pub async fn exchange_authorization_code(
        &self,
        code: &str,
        redirect_uri: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Token> {
        info!("Exchanging authorization code");

        let form = AuthorizationCodeForm {
            grant_type: "authorization_code",
            code,
            redirect_uri,
        };

        let request = self
            .http
            .request(Method::POST, ACCESS_TOKEN)
            .header(AUTHORIZATION, basic_auth_header(client_id, client_secret)?)
            .form(&form);

        let token: Token = self.http.send_json(request, "token response").await?;
        debug!(
            scope = %token.scope,
            user = token.user.as_ref().map(|u| u.uri.as_str()),
            "Authorization code exchanged"
        );
        Ok(token)
    }

    /// Convert a legacy OAuth1 token pair into a bearer token.
    ///
    /// Authenticates with the bearer token already held in `credentials`.
    #[instrument(skip_all)]
    pub async fn convert_legacy_oauth1_token(
        &self,
        credentials: &Credentials,
        token: &str,
        token_secret: &str,
    ) -> Result<Token> {
        info!("Converting OAuth1 token");

        let bearer = credentials.bearer()?;
        let form = ConvertOauth1Form {
            grant_type: "vimeo_oauth1",
            token,
            token_secret,
        };

        let request = self
            .http
            .request(Method::POST, CONVERT_OAUTH1)
            .header(AUTHORIZATION, bearer)
            .form(&form);

        let token: Token = self.http.send_json(request, "token response").await?;
        debug!(scope = %token.scope, "OAuth1 token converted");
        Ok(token)
    }

    /// Revoke the token held in `credentials`.
    ///
    /// On success the caller should clear the token from its credentials.
    #[instrument(skip_all)]
    pub async fn revoke_current_token(&self, credentials: &Credentials) -> Result<()> {
        info!("Revoking access token");

        let bearer = credentials.bearer()?;
        let request = self
            .http
            .request(Method::DELETE, TOKENS)
            .header(AUTHORIZATION, bearer);

        self.http.send_no_content(request).await?;
        debug!("Access token revoked");
        Ok(())
    }
}
