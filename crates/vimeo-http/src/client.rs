//! HTTP request executor.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace, warn};

use vimeo_core::error::{
    AuthError, ConfigurationError, DecodeError, Error, ProtocolError, TransportError,
};
use vimeo_core::{ApiUrl, Result, TrustedFingerprints};

use crate::endpoints::{ACCEPT_VERSION, ErrorBody};
use crate::middleware::{HttpResponse, Interceptor, NoopObserver, RequestObserver};
use crate::tls;

/// Builder for [`HttpClient`].
pub struct HttpClientBuilder {
    api: ApiUrl,
    trusted: TrustedFingerprints,
    user_agent: String,
    timeout: Option<Duration>,
    interceptors: Vec<Arc<dyn Interceptor>>,
    observer: Arc<dyn RequestObserver>,
}

impl HttpClientBuilder {
    pub fn new(api: ApiUrl, trusted: TrustedFingerprints) -> Self {
        Self {
            api,
            trusted,
            user_agent: concat!("vimeo-http/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
            interceptors: Vec::new(),
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Whole-request timeout. Unset by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Append an interceptor; interceptors run in insertion order.
    pub fn interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn observer(mut self, observer: impl RequestObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the TLS stack or the underlying
    /// client cannot be set up.
    pub fn build(self) -> Result<HttpClient> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if !self.api.is_tls() && !self.trusted.is_empty() {
            warn!(api = %self.api, "Plain HTTP target, certificate pins are not consulted");
        }

        // Nothing is sent with an empty pin set, so there is nothing to configure.
        if !self.trusted.is_empty() {
            builder = builder.use_preconfigured_tls(tls::pinned_client_config(self.trusted.clone())?);
        }

        let client = builder.build().map_err(|e| ConfigurationError::Client {
            message: e.to_string(),
        })?;

        Ok(HttpClient {
            inner: Arc::new(ClientInner {
                client,
                api: self.api,
                trusted: self.trusted,
                interceptors: self.interceptors,
                observer: self.observer,
            }),
        })
    }
}

/// Sends requests to the API and classifies failures.
///
/// Cheap to clone. Holds no per-request state, so clones may be used from
/// many tasks at once.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    client: reqwest::Client,
    api: ApiUrl,
    trusted: TrustedFingerprints,
    interceptors: Vec<Arc<dyn Interceptor>>,
    observer: Arc<dyn RequestObserver>,
}

impl HttpClient {
    /// A client with default settings.
    pub fn new(api: ApiUrl, trusted: TrustedFingerprints) -> Result<Self> {
        HttpClientBuilder::new(api, trusted).build()
    }

    pub fn builder(api: ApiUrl, trusted: TrustedFingerprints) -> HttpClientBuilder {
        HttpClientBuilder::new(api, trusted)
    }

    /// Returns the API base URL this client is configured for.
    pub fn api(&self) -> &ApiUrl {
        &self.inner.api
    }

    /// True when requests go over TLS and so are checked against the pins.
    ///
    /// Plain HTTP is accepted for loopback hosts only and never consults
    /// them.
    pub fn pins_enforced(&self) -> bool {
        self.inner.api.is_tls()
    }

    /// Start a request to an API path.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request_url(method, self.inner.api.endpoint(path))
    }

    /// Start a request to a prepared URL.
    pub fn request_url(&self, method: Method, url: Url) -> RequestBuilder {
        self.inner
            .client
            .request(method, url)
            .header(ACCEPT, HeaderValue::from_static(ACCEPT_VERSION))
    }

    /// Send a request and read the whole response.
    ///
    /// Non-success statuses are not errors at this level; see
    /// [`HttpClient::send_json`].
    ///
    /// # Errors
    ///
    /// Fails with [`TransportError::Tls`] without sending anything when no
    /// certificate fingerprints are trusted.
    pub async fn execute(&self, builder: RequestBuilder) -> Result<HttpResponse> {
        if self.inner.trusted.is_empty() {
            return Err(TransportError::Tls {
                message: "no trusted certificate fingerprints configured".to_string(),
            }
            .into());
        }

        let mut request = builder.build().map_err(transport_error)?;
        for interceptor in &self.inner.interceptors {
            request = interceptor.on_request(request);
        }

        self.inner.observer.on_request_start(request.url());
        debug!(method = %request.method(), url = %request.url(), "Sending request");

        let response = self
            .inner
            .client
            .execute(request)
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(transport_error)?.to_vec();
        self.inner.observer.on_request_complete(status);

        let mut response = HttpResponse {
            status,
            headers,
            body,
        };
        for interceptor in &self.inner.interceptors {
            response = interceptor.on_response(response);
        }

        trace!(status = %response.status, bytes = response.body.len(), "Response received");
        Ok(response)
    }

    /// Send a request and decode a JSON success body.
    #[instrument(skip(self, builder), fields(api = %self.inner.api))]
    pub async fn send_json<R>(&self, builder: RequestBuilder, target: &'static str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response = check_status(self.execute(builder).await?)?;
        serde_json::from_slice(&response.body).map_err(|e| DecodeError::new(target, e).into())
    }

    /// Send a request whose success carries no body.
    #[instrument(skip(self, builder), fields(api = %self.inner.api))]
    pub async fn send_no_content(&self, builder: RequestBuilder) -> Result<()> {
        check_status(self.execute(builder).await?)?;
        Ok(())
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("api", &self.inner.api)
            .field("trusted", &self.inner.trusted.len())
            .field("interceptors", &self.inner.interceptors.len())
            .finish()
    }
}

/// Map a non-success status to the matching error.
fn check_status(response: HttpResponse) -> Result<HttpResponse> {
    let status = response.status;
    if status.is_success() {
        return Ok(response);
    }

    let body: Option<ErrorBody> = serde_json::from_slice(&response.body).ok();
    trace!(%status, ?body, "Error response");

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(AuthError::InvalidCredentials {
            status: status.as_u16(),
            message: body.and_then(|b| b.error.or(b.developer_message)),
        }
        .into());
    }

    Err(match body {
        Some(body) => ProtocolError::new(
            status.as_u16(),
            body.error,
            body.developer_message,
            body.error_code,
        ),
        None => ProtocolError::new(status.as_u16(), None, None, None),
    }
    .into())
}

/// Classify a reqwest failure as a transport error.
fn transport_error(err: reqwest::Error) -> Error {
    let message = err.to_string();
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if is_tls_failure(&err) {
        TransportError::Tls {
            message: tls_detail(&err).unwrap_or(message),
        }
    } else if err.is_connect() {
        TransportError::Connection { message }
    } else {
        TransportError::Http { message }
    };
    Error::Transport(transport)
}

fn is_tls_failure(err: &reqwest::Error) -> bool {
    tls_detail(err).is_some()
}

/// Finds a rustls error anywhere below `err`.
fn tls_detail(err: &reqwest::Error) -> Option<String> {
    std::error::Error::source(err).and_then(find_rustls_error)
}

/// rustls errors travel wrapped in `io::Error`, possibly several deep, and
/// `io::Error::source()` skips the wrapped value. Each level is therefore
/// searched through `get_ref` as well as `source`.
fn find_rustls_error(err: &(dyn std::error::Error + 'static)) -> Option<String> {
    if let Some(tls) = err.downcast_ref::<rustls::Error>() {
        return Some(tls.to_string());
    }
    if let Some(io) = err.downcast_ref::<std::io::Error>() {
        if let Some(inner) = io.get_ref() {
            if let Some(found) = find_rustls_error(inner) {
                return Some(found);
            }
        }
    }
    err.source().and_then(find_rustls_error)
}
