//! Request/response interceptors and the request observer.

use reqwest::header::HeaderMap;
use reqwest::{Request, StatusCode, Url};

/// A fully read response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// The body as text, lossily decoded.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Transforms requests before they are sent and responses after they are
/// read.
///
/// Interceptors run in the order they were added to the
/// [`HttpClientBuilder`](crate::HttpClientBuilder), for both directions.
pub trait Interceptor: Send + Sync {
    fn on_request(&self, request: Request) -> Request {
        request
    }

    fn on_response(&self, response: HttpResponse) -> HttpResponse {
        response
    }
}

/// Notified around every request.
pub trait RequestObserver: Send + Sync {
    fn on_request_start(&self, _url: &Url) {}

    fn on_request_complete(&self, _status: StatusCode) {}
}

/// The default observer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RequestObserver for NoopObserver {}

/// Adds a fixed header to every request.
#[derive(Debug, Clone)]
pub struct HeaderInterceptor {
    name: reqwest::header::HeaderName,
    value: reqwest::header::HeaderValue,
}

impl HeaderInterceptor {
    pub fn new(name: reqwest::header::HeaderName, value: reqwest::header::HeaderValue) -> Self {
        Self { name, value }
    }
}

impl Interceptor for HeaderInterceptor {
    fn on_request(&self, mut request: Request) -> Request {
        request
            .headers_mut()
            .insert(self.name.clone(), self.value.clone());
        request
    }
}
