//! The resource client.

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use vimeo_core::error::ConfigurationError;
use vimeo_core::{
    AccessToken, ApiUrl, Category, Channel, Credentials, Result, Token, User, Video,
};

use crate::auth::AuthManager;
use crate::client::HttpClient;
use crate::endpoints::{CATEGORIES, CHANNELS, ME};
use crate::listing::Listing;

/// Whose videos to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRef<'a> {
    /// The user the access token acts for.
    Me,
    /// A user by numeric id or vanity name.
    Id(&'a str),
}

impl UserRef<'_> {
    fn path(&self) -> String {
        match self {
            UserRef::Me => ME.to_string(),
            UserRef::Id(id) => format!("/users/{}", id),
        }
    }
}

/// A client session against the API.
///
/// Owns the session's [`Credentials`]. Cheap to clone; clones share the
/// credentials, so a token stored through one clone is used by all of them.
/// Rotating the token while other tasks are mid-request is not coordinated
/// here.
///
/// # Example
///
/// ```no_run
/// use vimeo_core::{ApiUrl, Credentials, ListParams, TrustedFingerprints};
/// use vimeo_http::VimeoClient;
///
/// # async fn example() -> Result<(), vimeo_core::Error> {
/// let trusted = TrustedFingerprints::parse(["<sha-256 of the api certificate>"])?;
/// let client = VimeoClient::new(ApiUrl::default(), Credentials::new("id", "secret", trusted))?;
/// client.authenticate_client_credentials(None).await?;
///
/// let mut categories = client.categories().paginate(ListParams::new().per_page(10)).await?;
/// while let Some(page) = categories.next().await? {
///     for category in &page.items {
///         println!("{}", category.name);
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct VimeoClient {
    http: HttpClient,
    credentials: Arc<RwLock<Credentials>>,
}

impl VimeoClient {
    /// Create a client trusting the fingerprints held in `credentials`.
    pub fn new(api: ApiUrl, credentials: Credentials) -> Result<Self> {
        let http = HttpClient::new(api, credentials.trusted_fingerprints().clone())?;
        Ok(Self::with_http(http, credentials))
    }

    /// Create a client over a preconfigured executor.
    pub fn with_http(http: HttpClient, credentials: Credentials) -> Self {
        Self {
            http,
            credentials: Arc::new(RwLock::new(credentials)),
        }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// The authentication manager for this client's API.
    pub fn auth(&self) -> AuthManager {
        AuthManager::new(self.http.clone())
    }

    /// A snapshot of the current credentials.
    pub async fn credentials(&self) -> Credentials {
        self.credentials.read().await.clone()
    }

    pub async fn set_access_token(&self, token: AccessToken) {
        self.credentials.write().await.set_access_token(token);
    }

    pub async fn clear_access_token(&self) {
        self.credentials.write().await.clear_access_token();
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Run the client-credentials grant with the held client id and secret
    /// and keep the resulting token.
    #[instrument(skip(self))]
    pub async fn authenticate_client_credentials(&self, scope: Option<&str>) -> Result<Token> {
        let (client_id, client_secret) = self.client_pair().await?;
        let token = self
            .auth()
            .client_credentials_grant(&client_id, &client_secret, scope)
            .await?;
        self.set_access_token(token.access_token.clone()).await;
        Ok(token)
    }

    /// Exchange an authorization code with the held client id and secret
    /// and keep the resulting token.
    #[instrument(skip(self, code))]
    pub async fn authenticate_with_code(&self, code: &str, redirect_uri: &str) -> Result<Token> {
        let (client_id, client_secret) = self.client_pair().await?;
        let token = self
            .auth()
            .exchange_authorization_code(code, redirect_uri, &client_id, &client_secret)
            .await?;
        self.set_access_token(token.access_token.clone()).await;
        Ok(token)
    }

    /// Convert a legacy OAuth1 pair and keep the resulting token.
    #[instrument(skip_all)]
    pub async fn convert_legacy_token(&self, token: &str, token_secret: &str) -> Result<Token> {
        let credentials = self.credentials().await;
        let converted = self
            .auth()
            .convert_legacy_oauth1_token(&credentials, token, token_secret)
            .await?;
        self.set_access_token(converted.access_token.clone()).await;
        Ok(converted)
    }

    /// Revoke the held token and forget it.
    #[instrument(skip(self))]
    pub async fn revoke_token(&self) -> Result<()> {
        let credentials = self.credentials().await;
        self.auth().revoke_current_token(&credentials).await?;
        self.clear_access_token().await;
        info!("Token revoked and cleared");
        Ok(())
    }

    async fn client_pair(&self) -> Result<(String, String)> {
        let credentials = self.credentials.read().await;
        if credentials.client_id().trim().is_empty() {
            return Err(ConfigurationError::MissingClientId.into());
        }
        Ok((
            credentials.client_id().to_string(),
            credentials.client_secret().to_string(),
        ))
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// The user the access token acts for.
    pub async fn me(&self) -> Result<User> {
        self.get(ME, "user").await
    }

    pub async fn user(&self, id: &str) -> Result<User> {
        self.get(&UserRef::Id(id).path(), "user").await
    }

    pub async fn video(&self, id: &str) -> Result<Video> {
        self.get(&format!("/videos/{}", id), "video").await
    }

    /// Videos uploaded by a user.
    pub fn videos(&self, owner: UserRef<'_>) -> Listing<Video> {
        self.listing(format!("{}/videos", owner.path()))
    }

    pub fn categories(&self) -> Listing<Category> {
        self.listing(CATEGORIES)
    }

    pub fn category_videos(&self, slug: &str) -> Listing<Video> {
        self.listing(format!("{}/{}/videos", CATEGORIES, slug))
    }

    pub fn channels(&self) -> Listing<Channel> {
        self.listing(CHANNELS)
    }

    pub fn channel_videos(&self, id: &str) -> Listing<Video> {
        self.listing(format!("{}/{}/videos", CHANNELS, id))
    }

    fn listing<T>(&self, path: impl Into<String>) -> Listing<T> {
        Listing::new(self.http.clone(), Arc::clone(&self.credentials), path)
    }

    #[instrument(skip(self))]
    async fn get<R: DeserializeOwned>(&self, path: &str, target: &'static str) -> Result<R> {
        debug!("Fetching resource");
        let bearer = self.credentials.read().await.bearer()?;
        let request = self
            .http
            .request(Method::GET, path)
            .header(AUTHORIZATION, bearer);
        self.http.send_json(request, target).await
    }
}

impl std::fmt::Debug for VimeoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VimeoClient")
            .field("http", &self.http)
            .field("credentials", &"[REDACTED]")
            .finish()
    }
}
